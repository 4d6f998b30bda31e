//! mastery-core: score classification, learning targets, and mastery statistics.
//!
//! The pipeline runs leaves first: [`classifier`] picks the score columns out
//! of an export, [`normalize`] reduces them to 0/1 correctness, the
//! [`registry`] holds the user's learning targets, and the [`engine`] turns
//! both into per-target and per-question results. [`session`] ties them
//! together for one user.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod registry;
pub mod report;
pub mod session;

pub use error::{AnalysisError, Result};
