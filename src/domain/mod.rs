//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod fuzzy;
pub mod measure;

pub use arena::{ClassificationGraph, GraphNode, TreeIterator};
pub use builder::GraphBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult, GraphViolation};
pub use fuzzy::{edit_distance, normalize, FuzzyMatcher, TolerancePolicy};
pub use measure::{format_value, CalcInput, Calculator, Measurement};
