//! Application layer: content catalog and quiz session
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod catalog;
pub mod error;
pub mod error_ext;
pub mod quiz;

pub use catalog::{AliasCollision, Catalog, Selection};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::ScoreResultExt;
pub use quiz::{Answer, QuizPhase, QuizSession, QuizSummary};
