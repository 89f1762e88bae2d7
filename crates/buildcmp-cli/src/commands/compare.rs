//! Compare command
//!
//! Usage: buildcmp compare [--config <FILE>] [--source-model <FILE>] [--target-model <FILE>]
//!        [--source-version <V>] [--target-version <V>] [--report-dir <DIR>]

use buildcmp_store::config::{parse_config_file, BuildInvocationSpec, ComparisonConfig};
use buildcmp_store::{CompareBuilds, ModelFileExecutor};
use chrono::{SecondsFormat, Utc};
use clap::Args;
use std::path::PathBuf;

/// Report directory used when neither the config nor the flags name one
pub const DEFAULT_REPORT_DIR: &str = "reports/compare-builds";

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Comparison config file (YAML); flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Outcome model of the source build
    #[arg(long)]
    pub source_model: Option<PathBuf>,

    /// Outcome model of the target build
    #[arg(long)]
    pub target_model: Option<PathBuf>,

    /// Tool version the source build ran with
    #[arg(long)]
    pub source_version: Option<String>,

    /// Tool version the target build ran with
    #[arg(long)]
    pub target_version: Option<String>,

    /// Project directory of the source build
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Project directory of the target build
    #[arg(long)]
    pub target_dir: Option<PathBuf>,

    /// Directory the report is written to (cleared first)
    #[arg(short, long)]
    pub report_dir: Option<PathBuf>,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;

    let front_end = CompareBuilds::new(ModelFileExecutor)?;
    let generated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let outcome = front_end.execute(&config, &generated_at)?;

    for warning in &outcome.warnings {
        eprintln!("Warning: {}", warning);
    }

    let result = &outcome.result;
    if result.builds_are_identical() {
        println!("✓ Builds are identical");
    } else {
        println!(
            "✗ Builds differ ({} of {} outcomes differ)",
            result.difference_count(),
            result.len()
        );
    }
    println!("Report: {}", outcome.report.index.display());

    Ok(())
}

/// Merge the config file (if any) with command-line overrides
fn resolve_config(args: CompareArgs) -> Result<ComparisonConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => parse_config_file(path)?,
        None => ComparisonConfig {
            source: side_from_flags("source", args.source_version.as_deref())?,
            target: side_from_flags("target", args.target_version.as_deref())?,
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
        },
    };

    apply_overrides(
        &mut config.source,
        args.source_model,
        args.source_version,
        args.source_dir,
    );
    apply_overrides(
        &mut config.target,
        args.target_model,
        args.target_version,
        args.target_dir,
    );
    if let Some(report_dir) = args.report_dir {
        config.report_dir = report_dir;
    }

    config.validate()?;
    Ok(config)
}

fn side_from_flags(
    side: &str,
    version: Option<&str>,
) -> Result<BuildInvocationSpec, Box<dyn std::error::Error>> {
    let version =
        version.ok_or_else(|| format!("--{}-version is required without --config", side))?;
    Ok(BuildInvocationSpec::new(".", version))
}

fn apply_overrides(
    spec: &mut BuildInvocationSpec,
    model: Option<PathBuf>,
    version: Option<String>,
    project_dir: Option<PathBuf>,
) {
    if let Some(model) = model {
        spec.model_path = Some(model);
    }
    if let Some(version) = version {
        spec.tool_version = version;
    }
    if let Some(project_dir) = project_dir {
        spec.project_dir = project_dir;
    }
}
