//! Domain entities: core data structures

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::measure::Calculator;

/// Role of a node in the classification tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Entry point, exactly one per graph
    Root,
    /// Yes/no question with one affirmative and one negative branch
    Question,
    /// Leaf naming a classifiable shape
    Outcome,
}

/// Answer attached to an edge leaving a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Decision {
    Affirmative,
    Negative,
    #[default]
    Unlabeled,
}

impl Decision {
    /// Label shown next to the edge ("Да"/"Не").
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Decision::Affirmative => Some("Да"),
            Decision::Negative => Some("Не"),
            Decision::Unlabeled => None,
        }
    }
}

/// Node description handed to the graph builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSpec {
    pub id: String,
    pub kind: NodeKind,
    /// Question text for questions, start text for the root
    pub label: String,
}

impl NodeSpec {
    pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
        }
    }

    pub fn root(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Root, label)
    }

    pub fn question(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Question, label)
    }

    pub fn outcome(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Outcome, "")
    }
}

impl fmt::Display for NodeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}", self.label)
        }
    }
}

/// Edge description handed to the graph builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub decision: Decision,
}

impl EdgeSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>, decision: Decision) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            decision,
        }
    }

    pub fn yes(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, Decision::Affirmative)
    }

    pub fn no(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, Decision::Negative)
    }

    pub fn plain(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, Decision::Unlabeled)
    }
}

/// Identity of an edge. Unique because every node has a single parent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeRef {
    pub from: String,
    pub to: String,
}

impl EdgeRef {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Rendering state of a node or edge relative to the active path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightState {
    Active,
    Dimmed,
    /// No path selected
    Neutral,
}

/// Per-node and per-edge highlight states for one active path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Highlights {
    pub nodes: BTreeMap<String, HighlightState>,
    pub edges: BTreeMap<EdgeRef, HighlightState>,
}

impl Highlights {
    pub fn node(&self, id: &str) -> Option<HighlightState> {
        self.nodes.get(id).copied()
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<HighlightState> {
        self.edges.get(&EdgeRef::new(from, to)).copied()
    }
}

/// Outcome of grading a free-text guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    Exact,
    /// Near miss, carries the alias the guess was corrected to
    Corrected(String),
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchResult::NoMatch)
    }
}

/// Perimeter and area formulas in display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formulas {
    /// Perimeter (L)
    pub perimeter: String,
    /// Area (P)
    pub area: String,
}

/// Descriptive content for an outcome node.
#[derive(Debug, Clone, PartialEq)]
pub struct Concept {
    pub name: String,
    /// Accepted spellings, in preference order
    pub aliases: Vec<String>,
    pub description: String,
    /// First entry doubles as the quiz hint
    pub properties: Vec<String>,
    pub formulas: Formulas,
    pub calculator: Option<Calculator>,
    /// Everyday object with this shape
    pub real_world: String,
}

impl Concept {
    pub fn hint(&self) -> Option<&str> {
        self.properties.first().map(String::as_str)
    }
}
