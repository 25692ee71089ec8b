//! # wikivocab-core
//!
//! Concept model, concept graph and exporters for wikivocab.
//!
//! A run flows through three stages, all in memory:
//!
//! 1. [`ConceptModelBuilder`] consumes a [`StatementSource`] and produces a
//!    [`ConceptModel`] plus a [`BuildReport`] of counts and warnings.
//! 2. [`ConceptGraph`] numbers the concepts in ascending URI order and
//!    answers BFS hop-distance queries; [`DistanceMatrix`] packages the
//!    all-pairs result.
//! 3. [`LabelDictionary`] projects the model onto one language.

pub mod builder;
pub mod defaults;
pub mod error;
pub mod export;
pub mod graph;
pub mod models;
pub mod statements;

// Re-export commonly used types at crate root
pub use builder::{ConceptModel, ConceptModelBuilder, ParentConflictPolicy};
pub use error::{Error, Result};
pub use export::{DistanceMatrix, LabelDictionary, LabelRecord, LanguageCoverage};
pub use graph::ConceptGraph;
pub use models::*;
pub use statements::{LabelStatement, StatementSet, StatementSource};
