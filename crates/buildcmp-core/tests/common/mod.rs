use buildcmp_core::outcome::{ArchiveEntry, ArchiveOutcome, Outcome, OutcomeSet, UnknownOutcome};
use buildcmp_core::render::{BuildDescriptor, RenderContext};
use buildcmp_core_types::RunId;

/// Archive outcome whose listing holds one file per path, with content
/// digest `d-<path>`
#[allow(dead_code)]
pub fn archive(name: &str, paths: &[&str]) -> Outcome {
    let entries = paths
        .iter()
        .map(|p| ArchiveEntry::file(*p, p.len() as u64, format!("d-{}", p)))
        .collect();
    ArchiveOutcome::new(name, format!(":{}", name), "zip")
        .with_entries(entries)
        .into()
}

#[allow(dead_code)]
pub fn unknown(name: &str, description: &str) -> Outcome {
    UnknownOutcome::new(name, format!(":{}", name), description).into()
}

#[allow(dead_code)]
pub fn source_set(outcomes: Vec<Outcome>) -> OutcomeSet {
    OutcomeSet::new("source", outcomes).unwrap()
}

#[allow(dead_code)]
pub fn target_set(outcomes: Vec<Outcome>) -> OutcomeSet {
    OutcomeSet::new("target", outcomes).unwrap()
}

/// Render context with fixed run id and timestamp
#[allow(dead_code)]
pub fn fixed_context(run_id: &str) -> RenderContext {
    let mut source = BuildDescriptor::new("Source Build");
    source.tool_version = "1.2".to_string();
    source.tasks = vec!["clean".to_string(), "assemble".to_string()];
    let mut target = BuildDescriptor::new("Target Build");
    target.tool_version = "1.3".to_string();
    target.tasks = vec!["clean".to_string(), "assemble".to_string()];
    RenderContext::new(RunId::from_string(run_id.to_string()), source, target)
        .with_generated_at("2026-01-01T00:00:00Z")
}
