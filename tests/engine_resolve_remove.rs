// tests/engine_resolve_remove.rs

use pipeline_builder::engine::{apply_edit, EditOp};
use pipeline_builder::errors::{EditError, GraphDefect};
use pipeline_builder::model::{ParamValue, TaskGraph, TaskScope};
use pipeline_builder_test_utils::builders::{DefinitionBuilder, GraphBuilder};
use pipeline_builder_test_utils::init_tracing;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// a -> placeholder-1 -> b
fn with_placeholder() -> TaskGraph {
    GraphBuilder::new()
        .task("a", &[])
        .list_task("placeholder-1", &["a"])
        .task("b", &["placeholder-1"])
        .build_checked()
}

fn resolve(placeholder: &str, definition: &str, run_after: Option<Vec<String>>) -> EditOp {
    EditOp::ResolvePlaceholder {
        list_task: placeholder.to_string(),
        definition: DefinitionBuilder::local(definition).build(),
        run_after,
    }
}

// ---------------------------------------------------------------------------
// Resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_replaces_placeholder_and_its_references() {
    init_tracing();

    let next = apply_edit(&with_placeholder(), resolve("placeholder-1", "build", None)).unwrap();

    assert!(next.list_tasks.is_empty());
    let build = next.task("build").expect("resolved task");
    assert_eq!(build.run_after, names(&["a"]));
    assert_eq!(build.task_ref.name, "build");
    assert_eq!(build.task_ref.scope, TaskScope::Local);
    assert_eq!(next.task("b").unwrap().run_after, names(&["build"]));
}

#[test]
fn resolve_prefills_defaults_and_leaves_required_params_empty() {
    let definition = DefinitionBuilder::global("buildah")
        .required_param("image")
        .param_with_default("context", ".")
        .resource("source", "git")
        .build();

    let next = apply_edit(
        &with_placeholder(),
        EditOp::ResolvePlaceholder {
            list_task: "placeholder-1".to_string(),
            definition,
            run_after: None,
        },
    )
    .unwrap();

    let task = next.task("buildah").unwrap();
    assert_eq!(task.task_ref.scope, TaskScope::Global);
    assert!(task.param("image").unwrap().is_missing());
    let context = task.param("context").unwrap();
    assert_eq!(context.value, Some(ParamValue::from(".")));
    assert!(context.is_default_only());
    assert_eq!(task.resources.len(), 1);
    assert!(task.resources[0].resource.is_none());
}

#[test]
fn resolve_suffixes_name_when_definition_name_is_taken() {
    let graph = GraphBuilder::new()
        .task("build", &[])
        .list_task("placeholder-1", &["build"])
        .build_checked();

    let next = apply_edit(&graph, resolve("placeholder-1", "build", None)).unwrap();

    assert_eq!(next.task("build-1").unwrap().run_after, names(&["build"]));
}

#[test]
fn resolve_with_explicit_run_after_overrides_placeholder_edges() {
    let next = apply_edit(
        &with_placeholder(),
        resolve("placeholder-1", "build", Some(Vec::new())),
    )
    .unwrap();

    assert!(next.task("build").unwrap().run_after.is_empty());
    assert_eq!(next.task("b").unwrap().run_after, names(&["build"]));
}

#[test]
fn resolve_that_would_create_cycle_is_rejected() {
    // b depends on the placeholder; making the resolved task run after b
    // closes a loop.
    let graph = with_placeholder();
    let err = apply_edit(
        &graph,
        resolve("placeholder-1", "build", Some(names(&["b"]))),
    )
    .unwrap_err();

    assert!(matches!(err, EditError::Defect(GraphDefect::Cycle(_))));
    assert_eq!(graph, with_placeholder());
}

#[test]
fn resolve_with_unknown_predecessor_is_rejected() {
    let err = apply_edit(
        &with_placeholder(),
        resolve("placeholder-1", "build", Some(names(&["ghost"]))),
    )
    .unwrap_err();

    assert_eq!(
        err,
        EditError::Defect(GraphDefect::DanglingReference {
            node: "build".to_string(),
            missing: "ghost".to_string(),
        })
    );
}

#[test]
fn resolve_unknown_placeholder_is_rejected() {
    let err = apply_edit(&with_placeholder(), resolve("a", "build", None)).unwrap_err();
    assert_eq!(err, EditError::UnknownPlaceholder("a".to_string()));
}

// ---------------------------------------------------------------------------
// Rename
// ---------------------------------------------------------------------------

fn rename(from: &str, to: &str) -> EditOp {
    EditOp::RenameTask {
        old_name: from.to_string(),
        new_name: to.to_string(),
    }
}

#[test]
fn rename_rewrites_every_reference() {
    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("b", &["a"])
        .list_task("placeholder-1", &["a", "b"])
        .build_checked();

    let next = apply_edit(&graph, rename("a", "fetch")).unwrap();

    assert!(next.task("a").is_none());
    assert!(next.task("fetch").is_some());
    assert_eq!(next.task("b").unwrap().run_after, names(&["fetch"]));
    assert_eq!(
        next.list_task("placeholder-1").unwrap().run_after,
        names(&["fetch", "b"])
    );
    // Task order is preserved.
    assert_eq!(next.tasks[0].name, "fetch");
}

#[test]
fn rename_to_same_name_is_a_no_op() {
    let graph = with_placeholder();
    let next = apply_edit(&graph, rename("a", "a")).unwrap();
    assert_eq!(next, graph);
}

#[test]
fn rename_to_taken_name_is_rejected() {
    let err = apply_edit(&with_placeholder(), rename("a", "b")).unwrap_err();
    assert_eq!(err, EditError::NameTaken("b".to_string()));
}

#[test]
fn rename_unknown_node_is_rejected() {
    let err = apply_edit(&with_placeholder(), rename("ghost", "c")).unwrap_err();
    assert_eq!(err, EditError::UnknownNode("ghost".to_string()));
}

#[test]
fn rename_to_spacer_id_is_rejected() {
    // c and d share the fan-in {a, b}, so the view has a `parallel~c~d` spacer.
    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("b", &[])
        .task("c", &["a", "b"])
        .task("d", &["a", "b"])
        .build_checked();

    let err = apply_edit(&graph, rename("a", "parallel~c~d")).unwrap_err();

    assert_eq!(
        err,
        EditError::Defect(GraphDefect::ReservedName("parallel~c~d".to_string()))
    );
    assert!(graph.task("a").is_some());
}

#[test]
fn rename_to_any_name_with_separator_is_rejected() {
    let err = apply_edit(&with_placeholder(), rename("a", "a~to~b")).unwrap_err();
    assert!(matches!(err, EditError::Defect(GraphDefect::ReservedName(_))));
}

#[test]
fn resolve_with_repeated_run_after_is_rejected() {
    let err = apply_edit(
        &with_placeholder(),
        resolve("placeholder-1", "build", Some(names(&["a", "a"]))),
    )
    .unwrap_err();

    assert_eq!(
        err,
        EditError::Defect(GraphDefect::DuplicateDependency {
            node: "build".to_string(),
            dep: "a".to_string(),
        })
    );
}

// ---------------------------------------------------------------------------
// Remove
// ---------------------------------------------------------------------------

#[test]
fn remove_task_stitches_dependents_to_predecessors() {
    init_tracing();

    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("b", &["a"])
        .task("c", &["b"])
        .build_checked();

    let next = apply_edit(&graph, EditOp::RemoveTask { name: "b".to_string() }).unwrap();

    assert!(next.task("b").is_none());
    assert_eq!(next.task("c").unwrap().run_after, names(&["a"]));
}

#[test]
fn remove_task_does_not_duplicate_existing_predecessors() {
    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("x", &[])
        .task("b", &["a", "x"])
        .task("c", &["b", "x"])
        .build_checked();

    let next = apply_edit(&graph, EditOp::RemoveTask { name: "b".to_string() }).unwrap();

    assert_eq!(next.task("c").unwrap().run_after, names(&["a", "x"]));
}

#[test]
fn remove_root_leaves_dependents_as_roots() {
    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("b", &["a"])
        .build_checked();

    let next = apply_edit(&graph, EditOp::RemoveTask { name: "a".to_string() }).unwrap();

    assert!(next.task("b").unwrap().run_after.is_empty());
}

#[test]
fn remove_placeholder_stitches_across_collections() {
    let next = apply_edit(
        &with_placeholder(),
        EditOp::RemovePlaceholder {
            name: "placeholder-1".to_string(),
        },
    )
    .unwrap();

    assert!(next.list_tasks.is_empty());
    assert_eq!(next.task("b").unwrap().run_after, names(&["a"]));
}

#[test]
fn remove_checks_which_collection_the_node_is_in() {
    let graph = with_placeholder();

    let err = apply_edit(
        &graph,
        EditOp::RemoveTask {
            name: "placeholder-1".to_string(),
        },
    )
    .unwrap_err();
    assert_eq!(err, EditError::UnknownTask("placeholder-1".to_string()));

    let err = apply_edit(&graph, EditOp::RemovePlaceholder { name: "a".to_string() }).unwrap_err();
    assert_eq!(err, EditError::UnknownPlaceholder("a".to_string()));
}

#[test]
fn removing_the_last_node_leaves_an_empty_graph() {
    let graph = GraphBuilder::new().list_task("placeholder-1", &[]).build_checked();

    let next = apply_edit(
        &graph,
        EditOp::RemovePlaceholder {
            name: "placeholder-1".to_string(),
        },
    )
    .unwrap();

    assert!(next.is_empty());
}

// ---------------------------------------------------------------------------
// Fix invalid
// ---------------------------------------------------------------------------

#[test]
fn fix_invalid_task_keeps_its_position() {
    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("b", &["a"])
        .task("c", &["b"])
        .build_checked();

    let next = apply_edit(
        &graph,
        EditOp::FixInvalidPlaceholder {
            existing: "b".to_string(),
            definition: DefinitionBuilder::local("deploy").build(),
            run_after: names(&["a"]),
        },
    )
    .unwrap();

    let order: Vec<&str> = next.tasks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(order, vec!["a", "deploy", "c"]);
    assert_eq!(next.task("deploy").unwrap().run_after, names(&["a"]));
    assert_eq!(next.task("c").unwrap().run_after, names(&["deploy"]));
}

#[test]
fn fix_invalid_placeholder_becomes_task() {
    let next = apply_edit(
        &with_placeholder(),
        EditOp::FixInvalidPlaceholder {
            existing: "placeholder-1".to_string(),
            definition: DefinitionBuilder::local("lint").build(),
            run_after: names(&["a"]),
        },
    )
    .unwrap();

    assert!(next.list_tasks.is_empty());
    assert_eq!(next.task("lint").unwrap().run_after, names(&["a"]));
    assert_eq!(next.task("b").unwrap().run_after, names(&["lint"]));
}

#[test]
fn fix_invalid_unknown_node_is_rejected() {
    let err = apply_edit(
        &with_placeholder(),
        EditOp::FixInvalidPlaceholder {
            existing: "ghost".to_string(),
            definition: DefinitionBuilder::local("lint").build(),
            run_after: Vec::new(),
        },
    )
    .unwrap_err();

    assert_eq!(err, EditError::UnknownNode("ghost".to_string()));
}
