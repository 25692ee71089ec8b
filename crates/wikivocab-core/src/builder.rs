//! Concept model construction.
//!
//! Turns the raw statements of a [`StatementSource`] into one [`Concept`]
//! per declared URI, then normalizes every label set. The input is treated
//! as a set: each statement sequence is sorted and deduplicated before use,
//! so the resulting model and the order of reported warnings do not depend
//! on the order in which the source yields statements.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::defaults;
use crate::error::{Error, Result};
use crate::models::{BuildReport, BuildWarning, Concept, LabelKind};
use crate::statements::StatementSource;

/// What to do when a concept receives a second, different parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParentConflictPolicy {
    /// Abort the build with [`Error::ConflictingParent`].
    #[default]
    Fail,
    /// Keep the first parent and record a [`BuildWarning::ConflictingParent`].
    Warn,
}

impl std::fmt::Display for ParentConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Warn => write!(f, "warn"),
        }
    }
}

impl std::str::FromStr for ParentConflictPolicy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" | "error" => Ok(Self::Fail),
            "warn" | "skip" => Ok(Self::Warn),
            _ => Err(Error::Config(format!(
                "Invalid parent conflict policy: {} (expected fail or warn)",
                s
            ))),
        }
    }
}

/// The built vocabulary: concepts keyed (and therefore ordered) by URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptModel {
    pub concepts: BTreeMap<String, Concept>,
    pub report: BuildReport,
}

impl ConceptModel {
    pub fn get(&self, uri: &str) -> Option<&Concept> {
        self.concepts.get(uri)
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Concepts in ascending URI order.
    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.values()
    }
}

/// Builds a [`ConceptModel`] from raw statements.
#[derive(Debug, Clone)]
pub struct ConceptModelBuilder {
    namespace: String,
    on_parent_conflict: ParentConflictPolicy,
}

impl Default for ConceptModelBuilder {
    fn default() -> Self {
        Self::new(defaults::CONCEPT_NAMESPACE)
    }
}

impl ConceptModelBuilder {
    /// `namespace` is the prefix every accepted parent URI must start with.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            on_parent_conflict: ParentConflictPolicy::default(),
        }
    }

    pub fn on_parent_conflict(mut self, policy: ParentConflictPolicy) -> Self {
        self.on_parent_conflict = policy;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn build(&self, source: &impl StatementSource) -> Result<ConceptModel> {
        let start = Instant::now();
        let mut report = BuildReport::default();

        let mut concepts = BTreeMap::new();
        for uri in source.concept_uris() {
            if concepts.contains_key(&uri) {
                return Err(Error::DuplicateConcept(uri));
            }
            concepts.insert(uri.clone(), Concept::new(uri));
        }
        report.concepts = concepts.len();

        self.apply_broader(&mut concepts, source.broader_links(), &mut report)?;
        apply_related(&mut concepts, source.related_links(), &mut report);
        apply_labels(&mut concepts, source, &mut report);
        normalize_labels(&mut concepts, &mut report);

        info!(
            concepts = report.concepts,
            with_parent = report.concepts_with_parent,
            related_links = report.related_links,
            pref_labels = report.preferred_labels,
            alt_labels = report.alternate_labels,
            warnings = report.warnings.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Concept model built"
        );

        Ok(ConceptModel { concepts, report })
    }

    fn apply_broader(
        &self,
        concepts: &mut BTreeMap<String, Concept>,
        mut links: Vec<(String, String)>,
        report: &mut BuildReport,
    ) -> Result<()> {
        links.sort();
        links.dedup();

        for (child, parent) in links {
            if !concepts.contains_key(&child) {
                report.warnings.push(BuildWarning::UnknownChild { child });
                continue;
            }
            if !parent.starts_with(&self.namespace) {
                report.external_parents += 1;
                report
                    .warnings
                    .push(BuildWarning::ExternalParent { child, parent });
                continue;
            }
            if !concepts.contains_key(&parent) {
                report
                    .warnings
                    .push(BuildWarning::UnknownParent { child, parent });
                continue;
            }

            let Some(concept) = concepts.get_mut(&child) else {
                continue;
            };
            match concept.parent_uri.as_deref() {
                None => {
                    concept.parent_uri = Some(parent);
                    report.concepts_with_parent += 1;
                }
                Some(existing) if existing == parent => {}
                Some(existing) => {
                    let existing = existing.to_string();
                    match self.on_parent_conflict {
                        ParentConflictPolicy::Fail => {
                            return Err(Error::ConflictingParent {
                                child,
                                existing,
                                conflicting: parent,
                            });
                        }
                        ParentConflictPolicy::Warn => {
                            report.warnings.push(BuildWarning::ConflictingParent {
                                child,
                                existing,
                                conflicting: parent,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

fn apply_related(
    concepts: &mut BTreeMap<String, Concept>,
    mut links: Vec<(String, String)>,
    report: &mut BuildReport,
) {
    links.sort();
    links.dedup();

    for (subject, object) in links {
        if !concepts.contains_key(&subject) {
            report
                .warnings
                .push(BuildWarning::UnknownRelatedSubject { subject });
            continue;
        }
        if !concepts.contains_key(&object) {
            report
                .warnings
                .push(BuildWarning::UnknownRelatedObject { subject, object });
            continue;
        }
        if let Some(concept) = concepts.get_mut(&subject) {
            concept.related_uris.insert(object);
            report.related_links += 1;
        }
    }
}

fn apply_labels(
    concepts: &mut BTreeMap<String, Concept>,
    source: &impl StatementSource,
    report: &mut BuildReport,
) {
    for kind in [LabelKind::Preferred, LabelKind::Alternate] {
        let mut statements = source.labels(kind);
        statements.sort();
        statements.dedup();

        let mut accepted = 0;
        for statement in statements {
            let Some(concept) = concepts.get_mut(&statement.concept_uri) else {
                continue;
            };
            let Some(language) = statement.language.as_deref() else {
                trace!(concept_uri = %statement.concept_uri, "Untagged label ignored");
                continue;
            };
            concept.labels_mut(language).push(kind, statement.text);
            accepted += 1;
        }

        debug!(kind = %kind, count = accepted, "Label statements accepted");
        match kind {
            LabelKind::Preferred => report.preferred_labels = accepted,
            LabelKind::Alternate => report.alternate_labels = accepted,
        }
    }
}

fn normalize_labels(concepts: &mut BTreeMap<String, Concept>, report: &mut BuildReport) {
    for concept in concepts.values_mut() {
        for (language, labels) in concept.labels_by_language.iter_mut() {
            if let Some(demotion) = labels.normalize() {
                report.warnings.push(BuildWarning::MultiplePreferredLabels {
                    concept: concept.uri.clone(),
                    language: language.clone(),
                    labels: demotion.candidates,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statements::{LabelStatement, StatementSet};

    const NS: &str = "http://example.org/voc/";

    fn uri(id: &str) -> String {
        format!("{}{}", NS, id)
    }

    fn builder() -> ConceptModelBuilder {
        ConceptModelBuilder::new(NS)
    }

    #[test]
    fn test_one_record_per_concept() {
        let source = StatementSet::new().concept(uri("1")).concept(uri("2"));
        let model = builder().build(&source).unwrap();

        assert_eq!(model.len(), 2);
        assert_eq!(model.report.concepts, 2);
        assert!(model.get(&uri("1")).unwrap().parent_uri.is_none());
    }

    #[test]
    fn test_duplicate_concept_is_fatal() {
        let source = StatementSet::new().concept(uri("1")).concept(uri("1"));
        let err = builder().build(&source).unwrap_err();
        assert!(matches!(err, Error::DuplicateConcept(u) if u == uri("1")));
    }

    #[test]
    fn test_broader_sets_parent() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .concept(uri("2"))
            .broader(uri("2"), uri("1"));
        let model = builder().build(&source).unwrap();

        assert_eq!(
            model.get(&uri("2")).unwrap().parent_uri.as_deref(),
            Some(uri("1").as_str())
        );
        assert_eq!(model.report.concepts_with_parent, 1);
        assert!(model.report.warnings.is_empty());
    }

    #[test]
    fn test_broader_unknown_child_warns() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .broader(uri("9"), uri("1"));
        let model = builder().build(&source).unwrap();

        assert_eq!(
            model.report.warnings,
            vec![BuildWarning::UnknownChild { child: uri("9") }]
        );
        assert_eq!(model.report.concepts_with_parent, 0);
    }

    #[test]
    fn test_broader_external_parent_warns() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .broader(uri("1"), "http://vocab.getty.edu/aat/300014063");
        let model = builder().build(&source).unwrap();

        assert!(model.get(&uri("1")).unwrap().parent_uri.is_none());
        assert_eq!(model.report.external_parents, 1);
        assert_eq!(
            model.report.warnings,
            vec![BuildWarning::ExternalParent {
                child: uri("1"),
                parent: "http://vocab.getty.edu/aat/300014063".to_string(),
            }]
        );
    }

    #[test]
    fn test_broader_unknown_parent_warns() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .broader(uri("1"), uri("404"));
        let model = builder().build(&source).unwrap();

        assert_eq!(
            model.report.warnings,
            vec![BuildWarning::UnknownParent {
                child: uri("1"),
                parent: uri("404"),
            }]
        );
    }

    #[test]
    fn test_second_parent_fails_by_default() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .concept(uri("2"))
            .concept(uri("3"))
            .broader(uri("3"), uri("2"))
            .broader(uri("3"), uri("1"));
        let err = builder().build(&source).unwrap_err();

        match err {
            Error::ConflictingParent {
                child,
                existing,
                conflicting,
            } => {
                assert_eq!(child, uri("3"));
                assert_eq!(existing, uri("1"));
                assert_eq!(conflicting, uri("2"));
            }
            other => panic!("Expected ConflictingParent, got {:?}", other),
        }
    }

    #[test]
    fn test_second_parent_warns_and_keeps_first() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .concept(uri("2"))
            .concept(uri("3"))
            .broader(uri("3"), uri("2"))
            .broader(uri("3"), uri("1"));
        let model = builder()
            .on_parent_conflict(ParentConflictPolicy::Warn)
            .build(&source)
            .unwrap();

        assert_eq!(
            model.get(&uri("3")).unwrap().parent_uri.as_deref(),
            Some(uri("1").as_str())
        );
        assert_eq!(model.report.concepts_with_parent, 1);
        assert_eq!(
            model.report.warnings,
            vec![BuildWarning::ConflictingParent {
                child: uri("3"),
                existing: uri("1"),
                conflicting: uri("2"),
            }]
        );
    }

    #[test]
    fn test_repeated_identical_broader_is_not_a_conflict() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .concept(uri("2"))
            .broader(uri("2"), uri("1"))
            .broader(uri("2"), uri("1"));
        let model = builder().build(&source).unwrap();
        assert_eq!(model.report.concepts_with_parent, 1);
    }

    #[test]
    fn test_related_is_not_mirrored() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .concept(uri("2"))
            .related(uri("1"), uri("2"));
        let model = builder().build(&source).unwrap();

        assert!(model.get(&uri("1")).unwrap().related_uris.contains(&uri("2")));
        assert!(model.get(&uri("2")).unwrap().related_uris.is_empty());
        assert_eq!(model.report.related_links, 1);
    }

    #[test]
    fn test_related_unknown_endpoints_warn() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .related(uri("1"), uri("8"))
            .related(uri("9"), uri("1"));
        let model = builder().build(&source).unwrap();

        assert_eq!(
            model.report.warnings,
            vec![
                BuildWarning::UnknownRelatedObject {
                    subject: uri("1"),
                    object: uri("8"),
                },
                BuildWarning::UnknownRelatedSubject { subject: uri("9") },
            ]
        );
        assert_eq!(model.report.related_links, 0);
    }

    #[test]
    fn test_labels_grouped_by_language() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .label(LabelKind::Preferred, uri("1"), "en", "Silk")
            .label(LabelKind::Preferred, uri("1"), "fr", "Soie")
            .label(LabelKind::Alternate, uri("1"), "en", "Raw silk")
            .label(LabelKind::Preferred, uri("404"), "en", "Nobody");
        let model = builder().build(&source).unwrap();

        let concept = model.get(&uri("1")).unwrap();
        assert_eq!(concept.labels("en").unwrap().preferred(), Some("Silk"));
        assert_eq!(concept.labels("en").unwrap().alternate_labels, vec!["Raw silk"]);
        assert_eq!(concept.labels("fr").unwrap().preferred(), Some("Soie"));
        assert_eq!(model.report.preferred_labels, 2);
        assert_eq!(model.report.alternate_labels, 1);
        assert!(model.report.warnings.is_empty());
    }

    #[test]
    fn test_untagged_labels_are_discarded() {
        let mut source = StatementSet::new().concept(uri("1"));
        source.add_label(
            LabelKind::Preferred,
            LabelStatement::new(uri("1"), None, "Plain"),
        );
        let model = builder().build(&source).unwrap();

        assert!(model.get(&uri("1")).unwrap().labels_by_language.is_empty());
        assert_eq!(model.report.preferred_labels, 0);
    }

    #[test]
    fn test_multiple_preferred_labels_demoted_with_warning() {
        let source = StatementSet::new()
            .concept(uri("1"))
            .label(LabelKind::Preferred, uri("1"), "en", "silk")
            .label(LabelKind::Preferred, uri("1"), "en", "Silk");
        let model = builder().build(&source).unwrap();

        let labels = model.get(&uri("1")).unwrap().labels("en").unwrap();
        assert_eq!(labels.preferred_labels, vec!["Silk"]);
        assert_eq!(labels.alternate_labels, vec!["silk"]);
        assert_eq!(
            model.report.warnings,
            vec![BuildWarning::MultiplePreferredLabels {
                concept: uri("1"),
                language: "en".to_string(),
                labels: vec!["Silk".to_string(), "silk".to_string()],
            }]
        );
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "WARN".parse::<ParentConflictPolicy>().unwrap(),
            ParentConflictPolicy::Warn
        );
        assert_eq!(
            "fail".parse::<ParentConflictPolicy>().unwrap(),
            ParentConflictPolicy::Fail
        );
        assert!(matches!(
            "overwrite".parse::<ParentConflictPolicy>(),
            Err(Error::Config(_))
        ));
    }
}
