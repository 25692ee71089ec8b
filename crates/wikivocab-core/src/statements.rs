//! Raw statement access.
//!
//! The converter never sees an RDF serialization directly. Whatever parses
//! the vocabulary implements [`StatementSource`] and hands over the five
//! kinds of statements the model builder needs. No ordering is promised on
//! any of the returned sequences.

use serde::{Deserialize, Serialize};

use crate::models::LabelKind;

/// A `skos:prefLabel` or `skos:altLabel` statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LabelStatement {
    pub concept_uri: String,
    /// Language tag of the literal; `None` for plain literals.
    pub language: Option<String>,
    pub text: String,
}

impl LabelStatement {
    pub fn new(
        concept_uri: impl Into<String>,
        language: Option<&str>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            concept_uri: concept_uri.into(),
            language: language.map(str::to_string),
            text: text.into(),
        }
    }
}

/// Supplier of the statements a concept model is built from.
pub trait StatementSource {
    /// Subjects typed as `skos:Concept`.
    fn concept_uris(&self) -> Vec<String>;

    /// `(child, parent)` pairs from `skos:broader`.
    fn broader_links(&self) -> Vec<(String, String)>;

    /// `(subject, object)` pairs from `skos:related`, as stated.
    fn related_links(&self) -> Vec<(String, String)>;

    /// Label statements of the given kind.
    fn labels(&self, kind: LabelKind) -> Vec<LabelStatement>;
}

/// In-memory [`StatementSource`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementSet {
    pub concepts: Vec<String>,
    pub broader: Vec<(String, String)>,
    pub related: Vec<(String, String)>,
    pub preferred: Vec<LabelStatement>,
    pub alternate: Vec<LabelStatement>,
}

impl StatementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn concept(mut self, uri: impl Into<String>) -> Self {
        self.add_concept(uri);
        self
    }

    pub fn broader(mut self, child: impl Into<String>, parent: impl Into<String>) -> Self {
        self.add_broader(child, parent);
        self
    }

    pub fn related(mut self, subject: impl Into<String>, object: impl Into<String>) -> Self {
        self.add_related(subject, object);
        self
    }

    pub fn label(
        mut self,
        kind: LabelKind,
        concept_uri: impl Into<String>,
        language: &str,
        text: impl Into<String>,
    ) -> Self {
        self.add_label(kind, LabelStatement::new(concept_uri, Some(language), text));
        self
    }

    pub fn add_concept(&mut self, uri: impl Into<String>) {
        self.concepts.push(uri.into());
    }

    pub fn add_broader(&mut self, child: impl Into<String>, parent: impl Into<String>) {
        self.broader.push((child.into(), parent.into()));
    }

    pub fn add_related(&mut self, subject: impl Into<String>, object: impl Into<String>) {
        self.related.push((subject.into(), object.into()));
    }

    pub fn add_label(&mut self, kind: LabelKind, statement: LabelStatement) {
        match kind {
            LabelKind::Preferred => self.preferred.push(statement),
            LabelKind::Alternate => self.alternate.push(statement),
        }
    }

    /// Total number of statements held.
    pub fn len(&self) -> usize {
        self.concepts.len()
            + self.broader.len()
            + self.related.len()
            + self.preferred.len()
            + self.alternate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StatementSource for StatementSet {
    fn concept_uris(&self) -> Vec<String> {
        self.concepts.clone()
    }

    fn broader_links(&self) -> Vec<(String, String)> {
        self.broader.clone()
    }

    fn related_links(&self) -> Vec<(String, String)> {
        self.related.clone()
    }

    fn labels(&self, kind: LabelKind) -> Vec<LabelStatement> {
        match kind {
            LabelKind::Preferred => self.preferred.clone(),
            LabelKind::Alternate => self.alternate.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods_fill_each_collection() {
        let set = StatementSet::new()
            .concept("a")
            .concept("b")
            .broader("b", "a")
            .related("a", "b")
            .label(LabelKind::Preferred, "a", "en", "A")
            .label(LabelKind::Alternate, "a", "en", "Alpha");

        assert_eq!(set.concept_uris(), vec!["a", "b"]);
        assert_eq!(set.broader_links(), vec![("b".to_string(), "a".to_string())]);
        assert_eq!(set.related_links(), vec![("a".to_string(), "b".to_string())]);
        assert_eq!(set.labels(LabelKind::Preferred).len(), 1);
        assert_eq!(
            set.labels(LabelKind::Alternate)[0],
            LabelStatement::new("a", Some("en"), "Alpha")
        );
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_empty_set() {
        let set = StatementSet::new();
        assert!(set.is_empty());
        assert!(set.labels(LabelKind::Preferred).is_empty());
    }
}
