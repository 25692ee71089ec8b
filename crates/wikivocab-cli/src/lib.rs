//! # wikivocab-cli
//!
//! Batch converter behind the `wikivocab` binary. Reads a SKOS thesaurus as
//! RDF (Turtle unless told otherwise) and writes the distance matrix plus one
//! label dictionary per configured language.

pub mod config;
pub mod pipeline;
pub mod telemetry;

pub use config::{Cli, RunConfig};
pub use pipeline::{run, RunSummary};
