// tests/view_projection.rs

use pipeline_builder::model::TaskGraph;
use pipeline_builder::view::node::{NODE_WIDTH, SEED_NODE_ID, SPACER_WIDTH};
use pipeline_builder::view::{
    project_edges, project_nodes, resolve_parallel_nodes, BuilderView, NodeKind,
};
use pipeline_builder_test_utils::builders::GraphBuilder;

fn edge_ids(view: &BuilderView) -> Vec<&str> {
    view.edges.iter().map(|e| e.id.as_str()).collect()
}

fn node_ids(view: &BuilderView) -> Vec<&str> {
    view.nodes.iter().map(|n| n.id.as_str()).collect()
}

#[test]
fn empty_graph_projects_to_seed_node() {
    let view = BuilderView::from_graph(&TaskGraph::default());

    assert_eq!(view.nodes.len(), 1);
    assert_eq!(view.nodes[0].id, SEED_NODE_ID);
    assert_eq!(view.nodes[0].kind, NodeKind::Seed);
    assert!(view.nodes[0].kind.is_placeholder());
    assert!(view.edges.is_empty());
}

#[test]
fn tasks_project_before_placeholders_with_one_edge_per_dependency() {
    let graph = GraphBuilder::new()
        .list_task("placeholder-1", &["b"])
        .task("a", &[])
        .task("b", &["a"])
        .build_checked();

    let view = BuilderView::from_graph(&graph);

    assert_eq!(node_ids(&view), vec!["a", "b", "placeholder-1"]);
    assert_eq!(edge_ids(&view), vec!["a~to~b", "b~to~placeholder-1"]);

    let placeholder = view.node("placeholder-1").unwrap();
    assert!(matches!(placeholder.kind, NodeKind::ListTask(_)));
    assert_eq!(placeholder.width, NODE_WIDTH);

    match &view.node("b").unwrap().kind {
        NodeKind::Task(task) => assert_eq!(task.run_after, vec!["a".to_string()]),
        other => panic!("expected task node, got {other:?}"),
    }
}

#[test]
fn nodes_sharing_a_fan_in_are_routed_through_one_spacer() {
    // c and d both wait on {a, b}.
    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("b", &[])
        .task("c", &["a", "b"])
        .task("d", &["b", "a"])
        .build_checked();

    let view = BuilderView::from_graph(&graph);

    assert_eq!(node_ids(&view), vec!["a", "b", "c", "d", "parallel~c~d"]);

    let spacer = view.node("parallel~c~d").unwrap();
    assert_eq!(spacer.run_after, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(spacer.width, SPACER_WIDTH);
    assert_eq!(
        spacer.kind,
        NodeKind::Spacer {
            members: vec!["c".to_string(), "d".to_string()]
        }
    );

    assert_eq!(view.node("c").unwrap().run_after, vec!["parallel~c~d".to_string()]);
    assert_eq!(view.node("d").unwrap().run_after, vec!["parallel~c~d".to_string()]);

    assert_eq!(
        edge_ids(&view),
        vec![
            "parallel~c~d~to~c",
            "parallel~c~d~to~d",
            "a~to~parallel~c~d",
            "b~to~parallel~c~d",
        ]
    );
    assert_eq!(view.spacers().count(), 1);
}

#[test]
fn single_fan_in_node_is_left_alone() {
    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("b", &[])
        .task("c", &["a", "b"])
        .task("d", &["a"])
        .task("e", &["a"])
        .build_checked();

    let view = BuilderView::from_graph(&graph);

    assert_eq!(view.spacers().count(), 0);
    assert_eq!(
        view.node("c").unwrap().run_after,
        vec!["a".to_string(), "b".to_string()]
    );
}

#[test]
fn separate_groups_get_separate_spacers() {
    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("b", &[])
        .task("x", &[])
        .task("c", &["a", "b"])
        .task("d", &["a", "b"])
        .task("e", &["a", "x"])
        .list_task("placeholder-1", &["x", "a"])
        .build_checked();

    let view = BuilderView::from_graph(&graph);

    let spacers: Vec<&str> = view.spacers().map(|n| n.id.as_str()).collect();
    assert_eq!(spacers, vec!["parallel~c~d", "parallel~e~placeholder-1"]);
    assert_eq!(
        view.node("parallel~e~placeholder-1").unwrap().run_after,
        vec!["a".to_string(), "x".to_string()]
    );
}

#[test]
fn resolving_parallel_nodes_is_idempotent() {
    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("b", &[])
        .task("c", &["a", "b"])
        .task("d", &["a", "b"])
        .build_checked();

    let once = resolve_parallel_nodes(project_nodes(&graph));
    let twice = resolve_parallel_nodes(once.clone());

    assert_eq!(once, twice);
    assert_eq!(project_edges(&once), project_edges(&twice));
}

#[test]
fn projection_is_deterministic() {
    let graph = GraphBuilder::new()
        .task("a", &[])
        .task("b", &[])
        .task("c", &["a", "b"])
        .task("d", &["a", "b"])
        .build_checked();

    assert_eq!(BuilderView::from_graph(&graph), BuilderView::from_graph(&graph));
}
