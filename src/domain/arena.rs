//! Arena-backed classification tree.

use std::collections::{HashMap, HashSet};
use std::fmt;

use generational_arena::{Arena, Index};
use rand::Rng;
use tracing::instrument;

use crate::domain::entities::{
    Decision, EdgeRef, EdgeSpec, HighlightState, Highlights, NodeKind, NodeSpec,
};
use crate::domain::error::{DomainError, DomainResult, GraphViolation};

/// Tree node in the arena-based classification graph.
#[derive(Debug)]
pub struct GraphNode {
    /// Identity, kind and label of this node
    pub spec: NodeSpec,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes, in edge declaration order
    pub children: Vec<Index>,
    /// Answer on the incoming edge
    pub decision: Decision,
}

impl GraphNode {
    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn kind(&self) -> NodeKind {
        self.spec.kind
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decision.label() {
            Some(answer) => write!(f, "[{}] {}", answer, self.spec),
            None => write!(f, "{}", self.spec),
        }
    }
}

/// Immutable yes/no classification tree.
///
/// Built once through [`GraphBuilder`](crate::domain::GraphBuilder), which
/// guarantees a single root, one parent per node and two labeled branches per
/// question. Nodes live in a generational arena; ids map to arena indices.
#[derive(Debug)]
pub struct ClassificationGraph {
    arena: Arena<GraphNode>,
    root: Index,
    ids: HashMap<String, Index>,
    /// Node declaration order
    order: Vec<Index>,
    /// Edge declaration order
    edges: Vec<(Index, Index)>,
    outcomes: Vec<Index>,
}

impl ClassificationGraph {
    /// Assemble a graph from node and edge lists that already passed validation.
    pub(crate) fn assemble(nodes: Vec<NodeSpec>, edges: &[EdgeSpec]) -> DomainResult<Self> {
        let mut arena = Arena::with_capacity(nodes.len());
        let mut ids = HashMap::with_capacity(nodes.len());
        let mut order = Vec::with_capacity(nodes.len());
        let mut outcomes = Vec::new();
        let mut root = None;

        for spec in nodes {
            let id = spec.id.clone();
            let kind = spec.kind;
            let idx = arena.insert(GraphNode {
                spec,
                parent: None,
                children: Vec::new(),
                decision: Decision::Unlabeled,
            });
            match kind {
                NodeKind::Root => root = Some(idx),
                NodeKind::Outcome => outcomes.push(idx),
                NodeKind::Question => {}
            }
            ids.insert(id, idx);
            order.push(idx);
        }

        let root = root.ok_or(GraphViolation::NoRoot)?;

        let mut linked = Vec::with_capacity(edges.len());
        for edge in edges {
            let dangling = || GraphViolation::DanglingEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
            };
            let from = *ids.get(&edge.from).ok_or_else(dangling)?;
            let to = *ids.get(&edge.to).ok_or_else(dangling)?;

            if let Some(child) = arena.get_mut(to) {
                child.parent = Some(from);
                child.decision = edge.decision;
            }
            if let Some(parent) = arena.get_mut(from) {
                parent.children.push(to);
            }
            linked.push((from, to));
        }

        Ok(Self {
            arena,
            root,
            ids,
            order,
            edges: linked,
            outcomes,
        })
    }

    fn index_of(&self, id: &str) -> DomainResult<Index> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| DomainError::UnknownNode(id.to_string()))
    }

    fn id_at(&self, idx: Index) -> &str {
        self.arena.get(idx).map(GraphNode::id).unwrap_or_default()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&GraphNode> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.ids.get(id).and_then(|&idx| self.arena.get(idx))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_id(&self) -> &str {
        self.id_at(self.root)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
        self.order.iter().filter_map(|&idx| self.arena.get(idx))
    }

    /// Edges in declaration order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeRef, Decision)> + '_ {
        self.edges.iter().map(|&(from, to)| {
            let decision = self
                .arena
                .get(to)
                .map(|node| node.decision)
                .unwrap_or_default();
            (EdgeRef::new(self.id_at(from), self.id_at(to)), decision)
        })
    }

    /// Outcome ids in declaration order.
    pub fn outcomes(&self) -> Vec<&str> {
        self.outcomes.iter().map(|&idx| self.id_at(idx)).collect()
    }

    /// Children of a node, in edge declaration order.
    #[instrument(level = "trace", skip(self))]
    pub fn children(&self, id: &str) -> DomainResult<Vec<&GraphNode>> {
        let idx = self.index_of(id)?;
        Ok(self
            .arena
            .get(idx)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&child| self.arena.get(child))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Answer on the edge `from -> to`, None if there is no such edge.
    pub fn decision(&self, from: &str, to: &str) -> Option<Decision> {
        let parent = self.ids.get(from)?;
        let child = self.node(to)?;
        (child.parent == Some(*parent)).then_some(child.decision)
    }

    /// Node ids from the root down to `target`, both inclusive.
    ///
    /// Walks parent links upwards and reverses, so the result is never empty
    /// and always starts with the root.
    ///
    /// # Errors
    /// [`DomainError::UnknownNode`] if `target` is not part of the graph.
    #[instrument(level = "trace", skip(self))]
    pub fn path_to(&self, target: &str) -> DomainResult<Vec<String>> {
        let mut current = Some(self.index_of(target)?);
        let mut path = Vec::new();

        // Parent links form a tree, the bound only guards against corruption
        while let Some(idx) = current {
            if path.len() > self.order.len() {
                return Err(GraphViolation::CycleDetected(target.to_string()).into());
            }
            let Some(node) = self.arena.get(idx) else {
                break;
            };
            path.push(node.spec.id.clone());
            current = node.parent;
        }

        path.reverse();
        Ok(path)
    }

    /// Highlight state of every node and edge for an active path.
    ///
    /// An edge is active only when its endpoints are adjacent in `path`, in
    /// order. An empty path leaves everything neutral.
    #[instrument(level = "trace", skip(self, path))]
    pub fn classify<S: AsRef<str>>(&self, path: &[S]) -> Highlights {
        let on_path: HashSet<&str> = path.iter().map(AsRef::as_ref).collect();
        let steps: HashSet<(&str, &str)> = path
            .windows(2)
            .map(|pair| (pair[0].as_ref(), pair[1].as_ref()))
            .collect();

        let state = |active: bool| {
            if path.is_empty() {
                HighlightState::Neutral
            } else if active {
                HighlightState::Active
            } else {
                HighlightState::Dimmed
            }
        };

        let nodes = self
            .nodes()
            .map(|node| (node.spec.id.clone(), state(on_path.contains(node.id()))))
            .collect();

        let edges = self
            .edges()
            .map(|(edge, _)| {
                let active = steps.contains(&(edge.from.as_str(), edge.to.as_str()));
                (edge, state(active))
            })
            .collect();

        Highlights { nodes, edges }
    }

    /// Uniformly pick an outcome id using the caller's random source.
    #[instrument(level = "trace", skip(self, rng))]
    pub fn random_outcome<R: Rng>(&self, rng: &mut R) -> &str {
        // The builder rejects graphs without outcomes
        let pick = rng.random_range(0..self.outcomes.len());
        self.id_at(self.outcomes[pick])
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    #[instrument(level = "trace", skip(self))]
    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Pre-order traversal starting at the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }
}

pub struct TreeIterator<'a> {
    graph: &'a ClassificationGraph,
    stack: Vec<(usize, Index)>,
}

impl<'a> TreeIterator<'a> {
    fn new(graph: &'a ClassificationGraph) -> Self {
        Self {
            graph,
            stack: vec![(0, graph.root)],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    /// Level below the root and the node itself
    type Item = (usize, &'a GraphNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((level, current_idx)) = self.stack.pop() {
            if let Some(node) = self.graph.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((level + 1, child));
                }
                return Some((level, node));
            }
        }
        None
    }
}
