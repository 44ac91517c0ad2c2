//! Validating builder for classification graphs.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::arena::ClassificationGraph;
use crate::domain::entities::{Decision, EdgeSpec, NodeKind, NodeSpec};
use crate::domain::error::{DomainResult, GraphViolation};

/// Collects nodes and edges and checks the tree invariants before
/// producing a [`ClassificationGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<NodeSpec>,
    edges: Vec<EdgeSpec>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, node: NodeSpec) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn nodes(mut self, nodes: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn edge(mut self, edge: EdgeSpec) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn edges(mut self, edges: impl IntoIterator<Item = EdgeSpec>) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Validate and build the graph.
    ///
    /// # Errors
    /// [`DomainError::InvalidGraph`](crate::domain::DomainError::InvalidGraph)
    /// naming the first violation found.
    #[instrument(level = "debug", skip(self), fields(nodes = self.nodes.len(), edges = self.edges.len()))]
    pub fn build(self) -> DomainResult<ClassificationGraph> {
        self.validate()?;
        let graph = ClassificationGraph::assemble(self.nodes, &self.edges)?;
        debug!(
            "built graph: {} nodes, depth {}, {} outcomes",
            graph.len(),
            graph.depth(),
            graph.outcomes().len()
        );
        Ok(graph)
    }

    fn validate(&self) -> Result<(), GraphViolation> {
        let kinds = self.node_kinds()?;
        let root = self.find_root()?;

        let mut incoming: HashMap<&str, usize> = HashMap::new();
        let mut outgoing: HashMap<&str, Vec<&EdgeSpec>> = HashMap::new();
        for edge in &self.edges {
            if !kinds.contains_key(edge.from.as_str()) || !kinds.contains_key(edge.to.as_str()) {
                return Err(GraphViolation::DanglingEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
            *incoming.entry(edge.to.as_str()).or_default() += 1;
            outgoing.entry(edge.from.as_str()).or_default().push(edge);
        }

        for node in &self.nodes {
            let count = incoming.get(node.id.as_str()).copied().unwrap_or(0);
            let children = outgoing.get(node.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
            match node.kind {
                NodeKind::Root if count > 0 => {
                    return Err(GraphViolation::RootHasParent(node.id.clone()));
                }
                NodeKind::Root => {}
                _ if count != 1 => {
                    return Err(GraphViolation::IncomingEdges {
                        node: node.id.clone(),
                        count,
                    });
                }
                NodeKind::Question if !is_binary_branch(children) => {
                    return Err(GraphViolation::Branching {
                        node: node.id.clone(),
                    });
                }
                NodeKind::Outcome if !children.is_empty() => {
                    return Err(GraphViolation::OutcomeHasChildren(node.id.clone()));
                }
                _ => {}
            }
        }

        self.check_reachable(root, &outgoing)?;

        if !self.nodes.iter().any(|n| n.kind == NodeKind::Outcome) {
            return Err(GraphViolation::NoOutcomes);
        }
        Ok(())
    }

    fn node_kinds(&self) -> Result<HashMap<&str, NodeKind>, GraphViolation> {
        let mut kinds = HashMap::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if kinds.insert(node.id.as_str(), node.kind).is_some() {
                return Err(GraphViolation::DuplicateNode(node.id.clone()));
            }
        }
        Ok(kinds)
    }

    fn find_root(&self) -> Result<&str, GraphViolation> {
        let roots: Vec<&NodeSpec> = self
            .nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Root)
            .collect();
        match roots.as_slice() {
            [] => Err(GraphViolation::NoRoot),
            [root] => Ok(root.id.as_str()),
            _ => Err(GraphViolation::MultipleRoots(
                roots.iter().map(|n| n.id.clone()).collect(),
            )),
        }
    }

    /// Walk from the root; a node seen twice or never seen means a cycle,
    /// since every non-root node already has exactly one parent.
    fn check_reachable(
        &self,
        root: &str,
        outgoing: &HashMap<&str, Vec<&EdgeSpec>>,
    ) -> Result<(), GraphViolation> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack = vec![root];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                return Err(GraphViolation::CycleDetected(current.to_string()));
            }
            if let Some(children) = outgoing.get(current) {
                stack.extend(children.iter().map(|e| e.to.as_str()));
            }
        }

        match self.nodes.iter().find(|n| !visited.contains(n.id.as_str())) {
            Some(orphan) => Err(GraphViolation::CycleDetected(orphan.id.clone())),
            None => Ok(()),
        }
    }
}

fn is_binary_branch(children: &[&EdgeSpec]) -> bool {
    let count = |decision: Decision| children.iter().filter(|e| e.decision == decision).count();
    children.len() == 2 && count(Decision::Affirmative) == 1 && count(Decision::Negative) == 1
}
