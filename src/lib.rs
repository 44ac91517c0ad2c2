//! Quadrilateral classification trainer.
//!
//! A fixed yes/no decision graph sorts quadrilaterals into shapes, a tolerant
//! matcher grades typed shape names and a timed quiz ties both together.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
