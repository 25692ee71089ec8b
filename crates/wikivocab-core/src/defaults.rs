//! Centralized default constants for wikivocab.
//!
//! The CLI and the tests reference these instead of repeating literals.

// =============================================================================
// VOCABULARY
// =============================================================================

/// Namespace that every accepted parent concept URI must start with.
pub const CONCEPT_NAMESPACE: &str = "http://data.silknow.org/vocabulary/";

/// SKOS core namespace.
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// `skos:Concept`.
pub const SKOS_CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";

/// `skos:broader`.
pub const SKOS_BROADER: &str = "http://www.w3.org/2004/02/skos/core#broader";

/// `skos:related`.
pub const SKOS_RELATED: &str = "http://www.w3.org/2004/02/skos/core#related";

/// `skos:prefLabel`.
pub const SKOS_PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";

/// `skos:altLabel`.
pub const SKOS_ALT_LABEL: &str = "http://www.w3.org/2004/02/skos/core#altLabel";

// =============================================================================
// GRAPH
// =============================================================================

/// Distance recorded for a pair of concepts with no connecting path.
pub const UNREACHABLE: i32 = -1;

// =============================================================================
// OUTPUT
// =============================================================================

/// Languages exported when none are configured.
pub const LANGUAGES: &[&str] = &["en", "fr", "es", "it"];

/// Default input file (Turtle serialization of the thesaurus).
pub const INPUT_FILE: &str = "thesaurus.ttl";

/// Default output directory.
pub const OUTPUT_DIR: &str = ".";

/// File name of the distance matrix.
pub const MATRIX_FILE: &str = "thesaurusDistanceMatrix.json";

/// Indentation width of label dictionary files.
pub const LABEL_FILE_INDENT: usize = 4;

/// File name of the label dictionary for `language`.
///
/// The four default languages keep the names the wikifier already reads;
/// any other tag falls back to `<tag>Labels.json`.
pub fn label_file_name(language: &str) -> String {
    match language {
        "en" => "englishLabels.json".to_string(),
        "fr" => "frenchLabels.json".to_string(),
        "es" => "spanishLabels.json".to_string(),
        "it" => "italianLabels.json".to_string(),
        other => format!("{}Labels.json", other),
    }
}
