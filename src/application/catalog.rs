//! Shape catalog: the reference classification tree and its content table.
//!
//! The content is plain data. Nothing in here knows how shapes are drawn;
//! the catalog only binds concepts (names, aliases, formulas) to the outcome
//! nodes of a validated graph.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    normalize, Calculator, ClassificationGraph, Concept, Decision, EdgeSpec, Formulas,
    FuzzyMatcher, GraphBuilder, Highlights, MatchResult, NodeKind, NodeSpec,
};

struct ShapeEntry {
    id: &'static str,
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    properties: &'static [&'static str],
    perimeter: &'static str,
    area: &'static str,
    calculator: Calculator,
    real_world: &'static str,
}

const NODES: &[(&str, NodeKind, &str)] = &[
    ("start", NodeKind::Root, "СТАРТ"),
    ("q1", NodeKind::Question, "Само еден пар паралелни страни?"),
    ("q2", NodeKind::Question, "Две страни со иста должина?"),
    ("q3", NodeKind::Question, "Сите агли се 90°?"),
    ("res_h", NodeKind::Outcome, ""),
    ("res_i", NodeKind::Outcome, ""),
    ("q4", NodeKind::Question, "Сите страни се со иста должина?"),
    ("q5", NodeKind::Question, "Два пара еднакви агли?"),
    ("res_j", NodeKind::Outcome, ""),
    ("res_k", NodeKind::Outcome, ""),
    ("res_l", NodeKind::Outcome, ""),
    ("q6", NodeKind::Question, "Сите страни се со иста должина?"),
    ("res_m", NodeKind::Outcome, ""),
    ("res_n", NodeKind::Outcome, ""),
];

const EDGES: &[(&str, &str, Decision)] = &[
    ("start", "q1", Decision::Unlabeled),
    ("q1", "q2", Decision::Affirmative),
    ("q1", "q3", Decision::Negative),
    ("q2", "res_h", Decision::Affirmative),
    ("q2", "res_i", Decision::Negative),
    ("q3", "q4", Decision::Affirmative),
    ("q3", "q5", Decision::Negative),
    ("q4", "res_j", Decision::Affirmative),
    ("q4", "res_k", Decision::Negative),
    ("q5", "q6", Decision::Affirmative),
    ("q5", "res_l", Decision::Negative),
    ("q6", "res_m", Decision::Affirmative),
    ("q6", "res_n", Decision::Negative),
];

const SHAPES: &[ShapeEntry] = &[
    ShapeEntry {
        id: "res_h",
        name: "Рамнокрак Трапез",
        aliases: &["рамнокрак трапез", "рамнокрак"],
        description: "Трапез кај кој краците се еднакви.",
        properties: &[
            "Аглите при основата се еднакви.",
            "Дијагоналите се со еднаква должина.",
            "Има една оска на симетрија.",
        ],
        perimeter: "a + b + 2c",
        area: "((a + b) / 2) · h",
        calculator: Calculator::IsoscelesTrapezoid,
        real_world: "Саксија за цвеќе",
    },
    ShapeEntry {
        id: "res_i",
        name: "Трапез",
        aliases: &["трапез", "трапезоид"],
        description: "Четириаголник со еден пар паралелни страни.",
        properties: &[
            "Паралелните страни се викаат основи.",
            "Другите две страни се викаат краци.",
            "Збирот на аглите што лежат на ист крак е 180°.",
        ],
        perimeter: "a + b + c + d",
        area: "((a + b) / 2) · h",
        calculator: Calculator::Trapezoid,
        real_world: "Златна прачка",
    },
    ShapeEntry {
        id: "res_j",
        name: "Квадрат",
        aliases: &["квадрат"],
        description: "Правилен четириаголник со сите страни и агли еднакви.",
        properties: &[
            "Сите агли се 90°.",
            "Сите страни се еднакви.",
            "Дијагоналите се еднакви и се преполовуваат.",
        ],
        perimeter: "4 · a",
        area: "a²",
        calculator: Calculator::Square,
        real_world: "Прозорец",
    },
    ShapeEntry {
        id: "res_k",
        name: "Правоаголник",
        aliases: &["правоаголник"],
        description: "Паралелограм со сите агли по 90°.",
        properties: &[
            "Дијагоналите се со еднаква должина.",
            "Дијагоналите се преполовуваат.",
            "Спротивните страни се еднакви.",
        ],
        perimeter: "2 · (a + b)",
        area: "a · b",
        calculator: Calculator::Rectangle,
        real_world: "Смартфон / Таблет",
    },
    ShapeEntry {
        id: "res_l",
        name: "Делтоид",
        aliases: &["делтоид"],
        description: "Четириаголник со два пара соседни еднакви страни.",
        properties: &[
            "Дијагоналите се сечат под прав агол.",
            "Едната дијагонала ја преполовува другата.",
            "Аглите меѓу нееднаквите страни се еднакви.",
        ],
        perimeter: "2 · (a + b)",
        area: "(d₁ · d₂) / 2",
        calculator: Calculator::Kite,
        real_world: "Змеј (Играчка)",
    },
    ShapeEntry {
        id: "res_m",
        name: "Ромб",
        aliases: &["ромб"],
        description: "Паралелограм со сите страни еднакви.",
        properties: &[
            "Дијагоналите се сечат под прав агол.",
            "Дијагоналите се симетрали на аглите.",
            "Висините се еднакви.",
        ],
        perimeter: "4 · a",
        area: "a · h",
        calculator: Calculator::Rhombus,
        real_world: "Сообраќаен знак",
    },
    ShapeEntry {
        id: "res_n",
        name: "Паралелограм",
        aliases: &["паралелограм"],
        description: "Четириаголник со два пара паралелни страни.",
        properties: &[
            "Спротивните страни се еднакви.",
            "Спротивните агли се еднакви.",
            "Дијагоналите се преполовуваат.",
        ],
        perimeter: "2 · (a + b)",
        area: "a · h",
        calculator: Calculator::Parallelogram,
        real_world: "Гума за бришење",
    },
];

impl ShapeEntry {
    fn to_concept(&self) -> Concept {
        Concept {
            name: self.name.to_string(),
            aliases: self.aliases.iter().map(|a| a.to_string()).collect(),
            description: self.description.to_string(),
            properties: self.properties.iter().map(|p| p.to_string()).collect(),
            formulas: Formulas {
                perimeter: self.perimeter.to_string(),
                area: self.area.to_string(),
            },
            calculator: Some(self.calculator),
            real_world: self.real_world.to_string(),
        }
    }
}

/// Build the reference classification graph (start, q1..q6, res_h..res_n).
pub fn reference_graph() -> ApplicationResult<ClassificationGraph> {
    let graph = GraphBuilder::new()
        .nodes(
            NODES
                .iter()
                .map(|&(id, kind, label)| NodeSpec::new(id, kind, label)),
        )
        .edges(
            EDGES
                .iter()
                .map(|&(from, to, decision)| EdgeSpec::new(from, to, decision)),
        )
        .build()?;
    Ok(graph)
}

/// Concepts of the reference content, keyed by outcome id.
pub fn reference_concepts() -> HashMap<String, Concept> {
    SHAPES
        .iter()
        .map(|entry| (entry.id.to_string(), entry.to_concept()))
        .collect()
}

/// Root-to-node path plus the highlight states it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub target: String,
    pub path: Vec<String>,
    pub highlights: Highlights,
}

/// An alias accepted by more than one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCollision {
    pub alias: String,
    pub shapes: Vec<String>,
}

/// Validated graph plus the concept behind every outcome.
#[derive(Debug)]
pub struct Catalog {
    graph: ClassificationGraph,
    concepts: HashMap<String, Concept>,
    matcher: FuzzyMatcher,
}

impl Catalog {
    /// The built-in quadrilateral content with default tolerances.
    pub fn reference() -> ApplicationResult<Self> {
        Self::reference_with(FuzzyMatcher::default())
    }

    pub fn reference_with(matcher: FuzzyMatcher) -> ApplicationResult<Self> {
        Self::new(reference_graph()?, reference_concepts(), matcher)
    }

    /// Bind concepts to a graph.
    ///
    /// # Errors
    /// [`ApplicationError::Content`] when an outcome has no concept, a concept
    /// has no outcome, or a concept's aliases are empty or repeat.
    #[instrument(level = "debug", skip_all)]
    pub fn new(
        graph: ClassificationGraph,
        concepts: HashMap<String, Concept>,
        matcher: FuzzyMatcher,
    ) -> ApplicationResult<Self> {
        for outcome in graph.outcomes() {
            if !concepts.contains_key(outcome) {
                return Err(ApplicationError::content(format!(
                    "outcome {outcome} has no concept"
                )));
            }
        }

        for (id, concept) in &concepts {
            let is_outcome = graph
                .node(id)
                .is_some_and(|node| node.kind() == NodeKind::Outcome);
            if !is_outcome {
                return Err(ApplicationError::content(format!(
                    "concept {id} is not attached to an outcome node"
                )));
            }
            validate_aliases(id, concept)?;
        }

        let catalog = Self {
            graph,
            concepts,
            matcher,
        };
        for collision in catalog.alias_collisions() {
            warn!(
                "alias '{}' is shared by {}",
                collision.alias,
                collision.shapes.join(", ")
            );
        }
        debug!("catalog ready: {} shapes", catalog.concepts.len());
        Ok(catalog)
    }

    pub fn graph(&self) -> &ClassificationGraph {
        &self.graph
    }

    pub fn matcher(&self) -> &FuzzyMatcher {
        &self.matcher
    }

    pub fn concept(&self, id: &str) -> ApplicationResult<&Concept> {
        self.concepts
            .get(id)
            .ok_or_else(|| ApplicationError::UnknownShape(id.to_string()))
    }

    /// Outcome ids with their concepts, in graph declaration order.
    pub fn shapes(&self) -> impl Iterator<Item = (&str, &Concept)> + '_ {
        self.graph
            .outcomes()
            .into_iter()
            .filter_map(|id| self.concepts.get(id).map(|concept| (id, concept)))
    }

    /// Find a node by id, or a shape by (possibly misspelled) name.
    ///
    /// Exact alias matches win over corrected ones; among equals the first
    /// shape in declaration order wins.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve(&self, query: &str) -> ApplicationResult<&str> {
        let query = query.trim();
        if let Some(node) = self.graph.node(query) {
            return Ok(node.id());
        }

        let mut corrected = None;
        for (id, concept) in self.shapes() {
            match self.matcher.check(query, &concept.aliases) {
                MatchResult::Exact => return Ok(id),
                MatchResult::Corrected(_) if corrected.is_none() => corrected = Some(id),
                _ => {}
            }
        }
        corrected.ok_or_else(|| ApplicationError::UnknownShape(query.to_string()))
    }

    /// Grade a guess for the shape at `target`.
    #[instrument(level = "debug", skip(self))]
    pub fn grade(&self, target: &str, guess: &str) -> ApplicationResult<MatchResult> {
        let concept = self.concept(target)?;
        let result = self.matcher.check(guess, &concept.aliases);
        debug!("graded '{}' for {}: {:?}", guess, target, result);
        Ok(result)
    }

    /// Path and highlights for a clicked node.
    #[instrument(level = "debug", skip(self))]
    pub fn select(&self, node_id: &str) -> ApplicationResult<Selection> {
        let path = self.graph.path_to(node_id)?;
        let highlights = self.graph.classify(&path);
        Ok(Selection {
            target: node_id.to_string(),
            path,
            highlights,
        })
    }

    /// Aliases accepted by more than one shape, compared after normalization.
    pub fn alias_collisions(&self) -> Vec<AliasCollision> {
        let mut owners: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (id, concept) in self.shapes() {
            for alias in &concept.aliases {
                owners.entry(normalize(alias)).or_default().push(id.to_string());
            }
        }
        owners
            .into_iter()
            .filter(|(_, shapes)| shapes.len() > 1)
            .map(|(alias, shapes)| AliasCollision { alias, shapes })
            .collect()
    }
}

fn validate_aliases(id: &str, concept: &Concept) -> ApplicationResult<()> {
    if concept.aliases.is_empty() {
        return Err(ApplicationError::content(format!("{id} has no aliases")));
    }
    let mut seen = Vec::with_capacity(concept.aliases.len());
    for alias in &concept.aliases {
        let normalized = normalize(alias);
        if normalized.is_empty() {
            return Err(ApplicationError::content(format!("{id} has an empty alias")));
        }
        if seen.contains(&normalized) {
            return Err(ApplicationError::content(format!(
                "{id} repeats alias '{alias}'"
            )));
        }
        seen.push(normalized);
    }
    Ok(())
}
