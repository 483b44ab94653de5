// tests/config_loading.rs

use std::io::Write;

use tempfile::NamedTempFile;

use pipeline_builder::catalog::{parse_catalog, CatalogBackend, FileCatalog};
use pipeline_builder::config::{load_and_validate, load_edit_script};
use pipeline_builder::engine::InsertDirection;
use pipeline_builder::errors::BuilderError;
use pipeline_builder::model::{ParamValue, TaskScope};
use pipeline_builder::session::EditRequest;
use pipeline_builder_test_utils::init_tracing;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

// ---------------------------------------------------------------------------
// Pipeline files
// ---------------------------------------------------------------------------

#[test]
fn loads_tasks_placeholders_and_bindings() {
    init_tracing();

    let file = write_temp(
        r#"
[task.fetch]
task_ref = { name = "git-clone", scope = "global" }

[task.fetch.params]
url = "https://example.com/repo.git"
flags = ["--depth", "1"]

[task.fetch.resources]
output = "source-repo"

[task.build]
task_ref = { name = "buildah" }
run_after = ["fetch"]

[list_task.placeholder-1]
run_after = ["build"]
"#,
    );

    let graph = load_and_validate(file.path()).unwrap();

    assert_eq!(graph.tasks.len(), 2);
    assert_eq!(graph.list_tasks.len(), 1);

    let fetch = graph.task("fetch").unwrap();
    assert_eq!(fetch.task_ref.scope, TaskScope::Global);
    assert_eq!(
        fetch.param("url").unwrap().value,
        Some(ParamValue::from("https://example.com/repo.git"))
    );
    assert_eq!(
        fetch.param("flags").unwrap().value,
        Some(ParamValue::Array(vec!["--depth".to_string(), "1".to_string()]))
    );
    assert_eq!(fetch.resources[0].resource.as_deref(), Some("source-repo"));

    let build = graph.task("build").unwrap();
    assert_eq!(build.task_ref.scope, TaskScope::Local);
    assert_eq!(build.run_after, vec!["fetch".to_string()]);

    assert_eq!(
        graph.list_task("placeholder-1").unwrap().run_after,
        vec!["build".to_string()]
    );
}

#[test]
fn empty_file_is_the_empty_graph() {
    let file = write_temp("");
    let graph = load_and_validate(file.path()).unwrap();
    assert!(graph.is_empty());
}

#[test]
fn rejects_unknown_dependency() {
    let file = write_temp(
        r#"
[task.build]
task_ref = { name = "buildah" }
run_after = ["ghost"]
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, BuilderError::ConfigError(msg) if msg.contains("ghost")));
}

#[test]
fn rejects_self_dependency() {
    let file = write_temp(
        r#"
[list_task.placeholder-1]
run_after = ["placeholder-1"]
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, BuilderError::ConfigError(msg) if msg.contains("itself")));
}

#[test]
fn rejects_repeated_dependency() {
    let file = write_temp(
        r#"
[task.a]
task_ref = { name = "git-clone" }

[task.b]
task_ref = { name = "buildah" }
run_after = ["a", "a"]
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, BuilderError::ConfigError(msg) if msg.contains("more than once")));
}

#[test]
fn rejects_names_that_collide_with_view_ids() {
    let file = write_temp(
        r#"
[task.a]
task_ref = { name = "git-clone" }

[list_task."parallel~c~d"]
run_after = ["a"]
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, BuilderError::ConfigError(msg) if msg.contains('~')));
}

#[test]
fn rejects_name_declared_in_both_sections() {
    let file = write_temp(
        r#"
[task.build]
task_ref = { name = "buildah" }

[list_task.build]
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, BuilderError::ConfigError(_)));
}

#[test]
fn rejects_cycles() {
    let file = write_temp(
        r#"
[task.a]
task_ref = { name = "x" }
run_after = ["b"]

[task.b]
task_ref = { name = "x" }
run_after = ["a"]
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, BuilderError::GraphCycle(_)));
}

#[test]
fn rejects_malformed_toml() {
    let file = write_temp("[task.a\n");
    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, BuilderError::TomlError(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_and_validate("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, BuilderError::IoError(_)));
}

// ---------------------------------------------------------------------------
// Edit scripts
// ---------------------------------------------------------------------------

#[test]
fn edit_script_preserves_order_and_shapes() {
    let file = write_temp(
        r#"
[[edit]]
op = "add-first"

[[edit]]
op = "insert"
direction = "parallel"
related = "placeholder-1"

[[edit]]
op = "resolve"
placeholder = "placeholder-1"
task = "git-clone"
scope = "global"

[[edit]]
op = "rename"
from = "git-clone"
to = "fetch"

[[edit]]
op = "remove-placeholder"
name = "placeholder-2"

[[edit]]
op = "fix-invalid"
existing = "fetch"
task = "git-clone"
run_after = []
"#,
    );

    let edits = load_edit_script(file.path()).unwrap();

    assert_eq!(
        edits,
        vec![
            EditRequest::AddFirst,
            EditRequest::Insert {
                direction: InsertDirection::Parallel,
                related: "placeholder-1".to_string(),
            },
            EditRequest::Resolve {
                placeholder: "placeholder-1".to_string(),
                task: "git-clone".to_string(),
                scope: Some(TaskScope::Global),
                run_after: None,
            },
            EditRequest::Rename {
                from: "git-clone".to_string(),
                to: "fetch".to_string(),
            },
            EditRequest::RemovePlaceholder {
                name: "placeholder-2".to_string(),
            },
            EditRequest::FixInvalid {
                existing: "fetch".to_string(),
                task: "git-clone".to_string(),
                scope: None,
                run_after: Vec::new(),
            },
        ]
    );
}

#[test]
fn edit_script_rejects_unknown_op() {
    let file = write_temp(
        r#"
[[edit]]
op = "explode"
"#,
    );

    let err = load_edit_script(file.path()).unwrap_err();
    assert!(matches!(err, BuilderError::TomlError(_)));
}

// ---------------------------------------------------------------------------
// Catalog files
// ---------------------------------------------------------------------------

const CATALOG: &str = r#"
[[local]]
name = "buildah"
description = "Build an image"

[[local.params]]
name = "image"

[[local.params]]
name = "context"
default = "."

[[local.resources]]
name = "source"
type = "git"

[[global]]
name = "git-clone"

[[global]]
name = "buildah"
"#;

#[test]
fn catalog_sections_set_definition_scope() {
    let available = parse_catalog(CATALOG).unwrap();

    assert_eq!(available.len(), 3);
    assert!(available.local.iter().all(|d| d.scope == TaskScope::Local));
    assert!(available.global.iter().all(|d| d.scope == TaskScope::Global));

    let buildah = &available.local[0];
    assert_eq!(buildah.params.len(), 2);
    assert_eq!(buildah.params[1].default, Some(ParamValue::from(".")));
    assert_eq!(buildah.resources[0].kind, "git");
}

#[test]
fn catalog_resolution_prefers_local_unless_scoped() {
    let available = parse_catalog(CATALOG).unwrap();

    assert_eq!(
        available.resolve("buildah", None).unwrap().scope,
        TaskScope::Local
    );
    assert_eq!(
        available
            .resolve("buildah", Some(TaskScope::Global))
            .unwrap()
            .scope,
        TaskScope::Global
    );
    assert!(available.resolve("git-clone", Some(TaskScope::Local)).is_none());
    assert!(available.resolve("missing", None).is_none());
}

#[tokio::test]
async fn file_catalog_filters_excluded_names() {
    init_tracing();

    let file = write_temp(CATALOG);
    let catalog = FileCatalog::new(file.path());

    let available = catalog
        .list_available(vec!["buildah".to_string()])
        .await
        .unwrap();

    assert!(available.local.is_empty());
    assert_eq!(available.global.len(), 1);
    assert_eq!(available.global[0].name, "git-clone");
}

#[tokio::test]
async fn file_catalog_reports_missing_file() {
    let catalog = FileCatalog::new("/definitely/not/here/Catalog.toml");
    let err = catalog.list_available(Vec::new()).await.unwrap_err();
    assert!(matches!(err, BuilderError::IoError(_)));
}
