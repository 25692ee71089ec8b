//! SKOS concept model types.
//!
//! A [`Concept`] is the per-URI record assembled from raw statements: at
//! most one parent, a set of related concepts, and one [`LabelSet`] per
//! language tag. Records are built by [`crate::ConceptModelBuilder`] and are
//! read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// LABEL TYPES
// =============================================================================

/// SKOS lexical label kinds consumed by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    /// `skos:prefLabel` - at most one per language after normalization.
    #[default]
    Preferred,

    /// `skos:altLabel` - any number per language.
    Alternate,
}

impl std::fmt::Display for LabelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preferred => write!(f, "pref_label"),
            Self::Alternate => write!(f, "alt_label"),
        }
    }
}

impl std::str::FromStr for LabelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pref_label" | "preflabel" | "preferred" => Ok(Self::Preferred),
            "alt_label" | "altlabel" | "alternate" => Ok(Self::Alternate),
            _ => Err(format!("Invalid label kind: {}", s)),
        }
    }
}

/// Labels of one concept in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    pub preferred_labels: Vec<String>,
    pub alternate_labels: Vec<String>,
}

/// Outcome of [`LabelSet::normalize`] when preferred labels had to be demoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demotion {
    /// Every distinct preferred label seen, sorted; the first one was kept.
    pub candidates: Vec<String>,
}

impl LabelSet {
    /// Add a label of the given kind. Duplicates are removed by [`normalize`](Self::normalize).
    pub fn push(&mut self, kind: LabelKind, text: impl Into<String>) {
        match kind {
            LabelKind::Preferred => self.preferred_labels.push(text.into()),
            LabelKind::Alternate => self.alternate_labels.push(text.into()),
        }
    }

    /// Sort and deduplicate both collections, then keep only the
    /// lexicographically smallest preferred label, moving the others into
    /// the alternates.
    ///
    /// Returns the candidate list when a demotion happened. Calling this on
    /// an already normalized set changes nothing and returns `None`.
    pub fn normalize(&mut self) -> Option<Demotion> {
        sort_dedup(&mut self.preferred_labels);
        sort_dedup(&mut self.alternate_labels);

        if self.preferred_labels.len() <= 1 {
            return None;
        }

        let candidates = self.preferred_labels.clone();
        let demoted = self.preferred_labels.split_off(1);
        self.alternate_labels.extend(demoted);
        sort_dedup(&mut self.alternate_labels);

        Some(Demotion { candidates })
    }

    /// The preferred label, if any.
    pub fn preferred(&self) -> Option<&str> {
        self.preferred_labels.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.preferred_labels.is_empty() && self.alternate_labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.preferred_labels.len() + self.alternate_labels.len()
    }
}

fn sort_dedup(labels: &mut Vec<String>) {
    labels.sort();
    labels.dedup();
}

// =============================================================================
// CONCEPT
// =============================================================================

/// One vocabulary concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub uri: String,
    /// `None` for top concepts.
    pub parent_uri: Option<String>,
    /// Targets of `skos:related` statements whose subject is this concept.
    /// Not mirrored; the graph mutualizes them.
    pub related_uris: BTreeSet<String>,
    pub labels_by_language: BTreeMap<String, LabelSet>,
}

impl Concept {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            parent_uri: None,
            related_uris: BTreeSet::new(),
            labels_by_language: BTreeMap::new(),
        }
    }

    pub fn labels(&self, language: &str) -> Option<&LabelSet> {
        self.labels_by_language.get(language)
    }

    pub(crate) fn labels_mut(&mut self, language: &str) -> &mut LabelSet {
        self.labels_by_language
            .entry(language.to_string())
            .or_default()
    }
}

// =============================================================================
// BUILD DIAGNOSTICS
// =============================================================================

/// Non-fatal issues found while building the concept model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildWarning {
    /// A broader link whose subject is not a declared concept.
    UnknownChild { child: String },
    /// A broader link pointing outside the concept namespace.
    ExternalParent { child: String, parent: String },
    /// A broader link pointing at an undeclared concept inside the namespace.
    UnknownParent { child: String, parent: String },
    /// A second, different parent for a concept (kept the first one).
    ConflictingParent {
        child: String,
        existing: String,
        conflicting: String,
    },
    /// A related link whose subject is not a declared concept.
    UnknownRelatedSubject { subject: String },
    /// A related link whose object is not a declared concept.
    UnknownRelatedObject { subject: String, object: String },
    /// Several preferred labels in one language; all but the first were demoted.
    MultiplePreferredLabels {
        concept: String,
        language: String,
        labels: Vec<String>,
    },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownChild { child } => write!(f, "unknown child {:?}", child),
            Self::ExternalParent { child, parent } => write!(
                f,
                "child {:?} refers to parent {:?} outside the namespace",
                child, parent
            ),
            Self::UnknownParent { child, parent } => {
                write!(f, "child {:?} refers to unknown parent {:?}", child, parent)
            }
            Self::ConflictingParent {
                child,
                existing,
                conflicting,
            } => write!(
                f,
                "child {:?} already has parent {:?}, ignoring {:?}",
                child, existing, conflicting
            ),
            Self::UnknownRelatedSubject { subject } => write!(
                f,
                "unknown concept {:?} (subject of a related link)",
                subject
            ),
            Self::UnknownRelatedObject { object, .. } => write!(
                f,
                "unknown concept {:?} (object of a related link)",
                object
            ),
            Self::MultiplePreferredLabels {
                concept,
                language,
                labels,
            } => write!(
                f,
                "{:?} has multiple preferred labels in {:?}: {:?}",
                concept, language, labels
            ),
        }
    }
}

/// Aggregate counts and warnings returned by a model build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub concepts: usize,
    pub concepts_with_parent: usize,
    pub related_links: usize,
    /// Accepted `skos:prefLabel` statements, counted before normalization.
    pub preferred_labels: usize,
    /// Accepted `skos:altLabel` statements, counted before normalization.
    pub alternate_labels: usize,
    /// Broader links skipped because the parent lies outside the namespace
    /// (each also reported as [`BuildWarning::ExternalParent`]).
    pub external_parents: usize,
    pub warnings: Vec<BuildWarning>,
}

impl std::fmt::Display for BuildReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} concepts, {} with parents, {} links to related concepts, {} prefLabels, {} altLabels",
            self.concepts,
            self.concepts_with_parent,
            self.related_links,
            self.preferred_labels,
            self.alternate_labels
        )
    }
}
