//! Tests for GraphBuilder validation

use rstest::rstest;

use quadriclass::domain::{
    DomainError, EdgeSpec, GraphBuilder, GraphViolation, NodeKind, NodeSpec,
};

/// start -> q -> (yes: rhombus, no: kite)
fn valid_builder() -> GraphBuilder {
    GraphBuilder::new()
        .node(NodeSpec::root("start", "СТАРТ"))
        .node(NodeSpec::question("q", "Сите страни се со иста должина?"))
        .node(NodeSpec::outcome("rhombus"))
        .node(NodeSpec::outcome("kite"))
        .edge(EdgeSpec::plain("start", "q"))
        .edge(EdgeSpec::yes("q", "rhombus"))
        .edge(EdgeSpec::no("q", "kite"))
}

fn violation(builder: GraphBuilder) -> GraphViolation {
    match builder.build() {
        Err(DomainError::InvalidGraph(v)) => v,
        other => panic!("expected InvalidGraph, got {:?}", other.map(|g| g.len())),
    }
}

#[test]
fn given_valid_nodes_and_edges_when_building_then_creates_graph() {
    // Act
    let graph = valid_builder().build().unwrap();

    // Assert
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.root_id(), "start");
    assert_eq!(graph.outcomes(), vec!["rhombus", "kite"]);
    assert_eq!(graph.depth(), 3);
}

#[test]
fn given_no_root_when_building_then_errors() {
    let builder = GraphBuilder::new()
        .node(NodeSpec::question("q", "?"))
        .node(NodeSpec::outcome("a"))
        .node(NodeSpec::outcome("b"))
        .edge(EdgeSpec::yes("q", "a"))
        .edge(EdgeSpec::no("q", "b"));

    assert_eq!(violation(builder), GraphViolation::NoRoot);
}

#[test]
fn given_two_roots_when_building_then_names_both() {
    let builder = valid_builder().node(NodeSpec::root("again", "СТАРТ"));

    assert_eq!(
        violation(builder),
        GraphViolation::MultipleRoots(vec!["start".into(), "again".into()])
    );
}

#[test]
fn given_duplicate_id_when_building_then_errors() {
    let builder = valid_builder().node(NodeSpec::outcome("kite"));

    assert_eq!(
        violation(builder),
        GraphViolation::DuplicateNode("kite".into())
    );
}

#[test]
fn given_edge_to_unknown_node_when_building_then_errors() {
    let builder = valid_builder().edge(EdgeSpec::plain("kite", "ghost"));

    assert_eq!(
        violation(builder),
        GraphViolation::DanglingEdge {
            from: "kite".into(),
            to: "ghost".into()
        }
    );
}

#[test]
fn given_edge_into_root_when_building_then_errors() {
    let builder = valid_builder().edge(EdgeSpec::plain("kite", "start"));

    assert_eq!(
        violation(builder),
        GraphViolation::RootHasParent("start".into())
    );
}

#[test]
fn given_node_with_two_parents_when_building_then_errors() {
    let builder = GraphBuilder::new()
        .node(NodeSpec::root("start", "СТАРТ"))
        .node(NodeSpec::question("q", "?"))
        .node(NodeSpec::outcome("a"))
        .edge(EdgeSpec::plain("start", "q"))
        .edge(EdgeSpec::yes("q", "a"))
        .edge(EdgeSpec::no("q", "a"));

    assert_eq!(
        violation(builder),
        GraphViolation::IncomingEdges {
            node: "a".into(),
            count: 2
        }
    );
}

#[rstest]
#[case::single_child(vec![EdgeSpec::yes("q", "a")])]
#[case::two_yes(vec![EdgeSpec::yes("q", "a"), EdgeSpec::yes("q", "b")])]
#[case::unlabeled(vec![EdgeSpec::plain("q", "a"), EdgeSpec::no("q", "b")])]
fn given_question_without_yes_no_pair_when_building_then_errors(#[case] edges: Vec<EdgeSpec>) {
    let mut builder = GraphBuilder::new()
        .node(NodeSpec::root("start", "СТАРТ"))
        .node(NodeSpec::question("q", "?"))
        .node(NodeSpec::outcome("a"))
        .edge(EdgeSpec::plain("start", "q"))
        .edges(edges.clone());
    if edges.iter().any(|e| e.to == "b") {
        builder = builder.node(NodeSpec::outcome("b"));
    }

    assert_eq!(
        violation(builder),
        GraphViolation::Branching { node: "q".into() }
    );
}

#[test]
fn given_outcome_with_child_when_building_then_errors() {
    let builder = valid_builder()
        .node(NodeSpec::outcome("extra"))
        .edge(EdgeSpec::plain("kite", "extra"));

    assert_eq!(
        violation(builder),
        GraphViolation::OutcomeHasChildren("kite".into())
    );
}

#[test]
fn given_detached_cycle_when_building_then_errors() {
    // Every node has one parent, but q1 and q2 only point at each other
    let builder = GraphBuilder::new()
        .node(NodeSpec::root("start", "СТАРТ"))
        .node(NodeSpec::outcome("o1"))
        .node(NodeSpec::question("q1", "?"))
        .node(NodeSpec::question("q2", "?"))
        .node(NodeSpec::outcome("o2"))
        .node(NodeSpec::outcome("o3"))
        .edge(EdgeSpec::plain("start", "o1"))
        .edge(EdgeSpec::yes("q1", "q2"))
        .edge(EdgeSpec::no("q1", "o2"))
        .edge(EdgeSpec::yes("q2", "q1"))
        .edge(EdgeSpec::no("q2", "o3"));

    assert_eq!(
        violation(builder),
        GraphViolation::CycleDetected("q1".into())
    );
}

#[test]
fn given_root_only_when_building_then_no_outcomes() {
    let builder = GraphBuilder::new().node(NodeSpec::new("start", NodeKind::Root, "СТАРТ"));

    assert_eq!(violation(builder), GraphViolation::NoOutcomes);
}
