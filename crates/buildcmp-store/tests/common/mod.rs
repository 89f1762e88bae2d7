use buildcmp_store::config::{BuildInvocationSpec, ComparisonConfig};
use serde_json::json;
use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;

/// Lay out a fake project under `root/<name>` with one zip archive whose
/// listing is `entries` (path, content), and write its outcome model.
///
/// Returns the model path.
#[allow(dead_code)]
pub fn write_build(root: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let project_dir = root.join(name);
    let build_dir = project_dir.join("build");
    fs::create_dir_all(&build_dir).unwrap();

    let archive_bytes: String = entries
        .iter()
        .map(|(path, content)| format!("{}={};", path, content))
        .collect();
    fs::write(build_dir.join("app.zip"), archive_bytes).unwrap();

    let listing: Vec<serde_json::Value> = entries
        .iter()
        .map(|(path, content)| {
            json!({
                "path": path,
                "size": content.len(),
                "content_digest": format!("digest-{}", content),
            })
        })
        .collect();

    let model = json!({
        "project_path": ":",
        "project_dir": project_dir,
        "file_outcomes": [{
            "task_path": ":distZip",
            "type_identifier": "artifact.type.zip",
            "file": "build/app.zip",
            "archive_entries": listing,
        }],
    });
    let model_path = root.join(format!("{}-outcomes.json", name));
    fs::write(&model_path, serde_json::to_string_pretty(&model).unwrap()).unwrap();
    model_path
}

/// Lay out a project under `root/<name>` with a real zip archive holding
/// `entries` (path, content), every entry stamped with `year`, and write an
/// outcome model that carries no listing.
///
/// Returns the model path.
#[allow(dead_code)]
pub fn write_zip_build(root: &Path, name: &str, year: u16, entries: &[(&str, &str)]) -> PathBuf {
    let project_dir = root.join(name);
    let build_dir = project_dir.join("build");
    fs::create_dir_all(&build_dir).unwrap();

    let options = FileOptions::default()
        .last_modified_time(zip::DateTime::from_date_and_time(year, 3, 14, 9, 26, 0).unwrap());
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in entries {
        writer.start_file(*path, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    let archive_bytes = writer.finish().unwrap().into_inner();
    fs::write(build_dir.join("app.zip"), archive_bytes).unwrap();

    write_model(root, name, &project_dir)
}

/// Write an outcome model for `root/<name>` whose zip outcome has no listing.
#[allow(dead_code)]
pub fn write_model(root: &Path, name: &str, project_dir: &Path) -> PathBuf {
    let model = json!({
        "project_path": ":",
        "project_dir": project_dir,
        "file_outcomes": [{
            "task_path": ":distZip",
            "type_identifier": "artifact.type.zip",
            "file": "build/app.zip",
        }],
    });
    let model_path = root.join(format!("{}-outcomes.json", name));
    fs::write(&model_path, serde_json::to_string_pretty(&model).unwrap()).unwrap();
    model_path
}

#[allow(dead_code)]
pub fn spec(
    project_dir: PathBuf,
    version: &str,
    model_path: Option<PathBuf>,
) -> BuildInvocationSpec {
    let mut spec = BuildInvocationSpec::new(project_dir, version);
    spec.model_path = model_path;
    spec
}

#[allow(dead_code)]
pub fn config(
    source: BuildInvocationSpec,
    target: BuildInvocationSpec,
    report_dir: PathBuf,
) -> ComparisonConfig {
    ComparisonConfig {
        source,
        target,
        report_dir,
    }
}
