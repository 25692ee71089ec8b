//! # wikivocab-rdf
//!
//! Statement ingestion for wikivocab: reads an RDF serialization of a SKOS
//! thesaurus (Turtle by default; N-Triples, N3, RDF/XML, TriG and N-Quads by
//! extension or explicit format) and exposes it as a
//! [`wikivocab_core::StatementSource`].
//!
//! ```
//! use wikivocab_core::StatementSource;
//! use wikivocab_rdf::RdfSource;
//!
//! let doc = r#"
//! @prefix skos: <http://www.w3.org/2004/02/skos/core#> .
//! <http://data.silknow.org/vocabulary/1> a skos:Concept ;
//!     skos:prefLabel "Silk"@en .
//! "#;
//! let source = RdfSource::parse_str(doc).unwrap();
//! assert_eq!(source.concept_uris().len(), 1);
//! ```

pub mod source;

pub use oxrdfio::RdfFormat;
pub use source::{format_for_path, parse_format, ParseStats, RdfSource, DEFAULT_FORMAT};
