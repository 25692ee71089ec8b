//! Output shapes consumed by the entity-linking service.
//!
//! - [`DistanceMatrix`]: `{"columns": [...], "index": [...], "data": [[...]]}`
//! - [`LabelDictionary`]: `{"<uri>": {"prefLabel": "...", "altLabel": [...]}}`
//!
//! Both serialize through serde; writing them to disk is the caller's job.

use std::collections::BTreeMap;
use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::builder::ConceptModel;
use crate::defaults::LABEL_FILE_INDENT;
use crate::error::Result;
use crate::graph::ConceptGraph;

// =============================================================================
// DISTANCE MATRIX
// =============================================================================

/// All-pairs hop distances with row and column labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    pub columns: Vec<String>,
    pub index: Vec<String>,
    pub data: Vec<Vec<i32>>,
}

impl DistanceMatrix {
    pub fn from_graph(graph: &ConceptGraph) -> Self {
        Self {
            columns: graph.uris().to_vec(),
            index: graph.uris().to_vec(),
            data: graph.full_distance_matrix(),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Distance between two concepts by URI.
    pub fn distance(&self, from: &str, to: &str) -> Option<i32> {
        let i = self.index.iter().position(|u| u == from)?;
        let j = self.columns.iter().position(|u| u == to)?;
        Some(self.data[i][j])
    }

    /// Compact JSON, no whitespace.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

// =============================================================================
// LABEL DICTIONARY
// =============================================================================

/// Labels of one concept in one language, as written to the label file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    #[serde(rename = "prefLabel", default, skip_serializing_if = "Option::is_none")]
    pub pref_label: Option<String>,
    #[serde(rename = "altLabel", default, skip_serializing_if = "Vec::is_empty")]
    pub alt_label: Vec<String>,
}

/// How many concepts carried labels in a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCoverage {
    pub language: String,
    pub labelled: usize,
    pub total: usize,
}

impl std::fmt::Display for LanguageCoverage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Language {:?}: {}/{} concepts had labels",
            self.language, self.labelled, self.total
        )
    }
}

/// Label records of every labelled concept in one language, keyed by URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDictionary {
    pub records: BTreeMap<String, LabelRecord>,
    pub coverage: LanguageCoverage,
}

impl LabelDictionary {
    pub fn export(model: &ConceptModel, language: &str) -> Self {
        let mut records = BTreeMap::new();

        for concept in model.iter() {
            let Some(labels) = concept.labels(language) else {
                continue;
            };

            let mut preferred = labels.preferred_labels.iter();
            let pref_label = preferred.next().cloned();
            let alt_label: Vec<String> = preferred
                .chain(labels.alternate_labels.iter())
                .cloned()
                .collect();

            let record = LabelRecord {
                pref_label,
                alt_label,
            };
            if record == LabelRecord::default() {
                continue;
            }
            records.insert(concept.uri.clone(), record);
        }

        let coverage = LanguageCoverage {
            language: language.to_string(),
            labelled: records.len(),
            total: model.len(),
        };
        info!(
            language = %language,
            labelled = coverage.labelled,
            total = coverage.total,
            "Label dictionary exported"
        );

        Self { records, coverage }
    }

    pub fn get(&self, uri: &str) -> Option<&LabelRecord> {
        self.records.get(uri)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pretty-printed JSON object with four-space indentation.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let indent = " ".repeat(LABEL_FILE_INDENT);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.records.serialize(&mut serializer)?;
        Ok(())
    }
}
