//! RDF document reader.
//!
//! Parses a whole document with `oxrdfio` and keeps only the statements the
//! concept model needs (`rdf:type skos:Concept`, `skos:broader`,
//! `skos:related`, `skos:prefLabel`, `skos:altLabel`). The document is
//! treated as an RDF graph, so repeated identical triples count once.
//! Named graphs in quad formats are flattened into one graph.

use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use oxrdf::{Quad, Subject, Term};
use oxrdfio::{RdfFormat, RdfParseError, RdfParser};
use tracing::{info, trace};

use wikivocab_core::defaults::{
    RDF_TYPE, SKOS_ALT_LABEL, SKOS_BROADER, SKOS_CONCEPT, SKOS_PREF_LABEL, SKOS_RELATED,
};
use wikivocab_core::{Error, LabelKind, LabelStatement, Result, StatementSet, StatementSource};

/// Format assumed when a file extension is missing or unknown.
pub const DEFAULT_FORMAT: RdfFormat = RdfFormat::Turtle;

/// Format for `path`, chosen by extension (`.ttl`, `.nt`, `.n3`, `.rdf`, ...).
pub fn format_for_path(path: &Path) -> RdfFormat {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(RdfFormat::from_extension)
        .unwrap_or(DEFAULT_FORMAT)
}

/// Format by name (`turtle`, `ntriples`, `n3`, `rdfxml`, `trig`, `nquads`)
/// or by file extension (`ttl`, `nt`, ...).
pub fn parse_format(name: &str) -> Option<RdfFormat> {
    let name = name.trim().to_lowercase();
    match name.as_str() {
        "turtle" => Some(RdfFormat::Turtle),
        "ntriples" | "n-triples" => Some(RdfFormat::NTriples),
        "rdfxml" | "rdf/xml" | "xml" => Some(RdfFormat::RdfXml),
        "nquads" | "n-quads" => Some(RdfFormat::NQuads),
        other => RdfFormat::from_extension(other),
    }
}

/// Triple counts of a parsed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub triples: usize,
    /// Triples kept as concept, link or label statements.
    pub relevant: usize,
    /// Triples with other predicates, or with a term of the wrong kind.
    pub ignored: usize,
}

#[derive(Default)]
struct Collector {
    concepts: BTreeSet<String>,
    broader: BTreeSet<(String, String)>,
    related: BTreeSet<(String, String)>,
    preferred: BTreeSet<LabelStatement>,
    alternate: BTreeSet<LabelStatement>,
    stats: ParseStats,
}

impl Collector {
    fn add(&mut self, quad: Quad) {
        self.stats.triples += 1;
        let subject = match &quad.subject {
            Subject::NamedNode(node) => Some(node.as_str()),
            _ => None,
        };
        let kept = match (subject, quad.predicate.as_str()) {
            (Some(s), RDF_TYPE) => {
                let is_concept = iri(&quad.object) == Some(SKOS_CONCEPT);
                if is_concept {
                    self.concepts.insert(s.to_string());
                }
                is_concept
            }
            (Some(s), SKOS_BROADER) => match iri(&quad.object) {
                Some(o) => {
                    self.broader.insert((s.to_string(), o.to_string()));
                    true
                }
                None => false,
            },
            (Some(s), SKOS_RELATED) => match iri(&quad.object) {
                Some(o) => {
                    self.related.insert((s.to_string(), o.to_string()));
                    true
                }
                None => false,
            },
            (Some(s), SKOS_PREF_LABEL) => Self::label(&mut self.preferred, s, &quad.object),
            (Some(s), SKOS_ALT_LABEL) => Self::label(&mut self.alternate, s, &quad.object),
            _ => false,
        };

        if kept {
            self.stats.relevant += 1;
        } else {
            trace!(predicate = %quad.predicate.as_str(), "Triple ignored");
            self.stats.ignored += 1;
        }
    }

    fn label(into: &mut BTreeSet<LabelStatement>, subject: &str, object: &Term) -> bool {
        match object {
            Term::Literal(literal) => {
                // Language tags are case-insensitive; store them lowercased.
                let language = literal.language().map(str::to_lowercase);
                into.insert(LabelStatement {
                    concept_uri: subject.to_string(),
                    language,
                    text: literal.value().to_string(),
                });
                true
            }
            _ => false,
        }
    }

    fn finish(self) -> (StatementSet, ParseStats) {
        let statements = StatementSet {
            concepts: self.concepts.into_iter().collect(),
            broader: self.broader.into_iter().collect(),
            related: self.related.into_iter().collect(),
            preferred: self.preferred.into_iter().collect(),
            alternate: self.alternate.into_iter().collect(),
        };
        (statements, self.stats)
    }
}

fn iri(term: &Term) -> Option<&str> {
    match term {
        Term::NamedNode(node) => Some(node.as_str()),
        _ => None,
    }
}

/// [`StatementSource`] backed by an RDF document.
#[derive(Debug, Clone)]
pub struct RdfSource {
    statements: StatementSet,
    stats: ParseStats,
}

impl RdfSource {
    /// Read the file at `path`, guessing the format from its extension.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_as(path, format_for_path(path))
    }

    pub fn open_as(path: &Path, format: RdfFormat) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        info!(path = %path.display(), format = format.name(), "Reading thesaurus");
        Self::parse_str_as(&content, format)
    }

    /// Parse a Turtle document.
    pub fn parse_str(input: &str) -> Result<Self> {
        Self::parse_str_as(input, DEFAULT_FORMAT)
    }

    pub fn parse_str_as(input: &str, format: RdfFormat) -> Result<Self> {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self::from_reader(input.as_bytes(), format)
    }

    pub fn from_reader<R: Read>(reader: R, format: RdfFormat) -> Result<Self> {
        let start = Instant::now();
        let mut collector = Collector::default();

        for quad in RdfParser::from_format(format).for_reader(reader) {
            let quad = quad.map_err(|e| match e {
                RdfParseError::Io(e) => Error::Io(e),
                RdfParseError::Syntax(e) => Error::Parse(e.to_string()),
            })?;
            collector.add(quad);
        }

        let (statements, stats) = collector.finish();
        info!(
            format = format.name(),
            triples = stats.triples,
            relevant = stats.relevant,
            ignored = stats.ignored,
            concepts = statements.concepts.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "RDF document parsed"
        );
        Ok(Self { statements, stats })
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    pub fn statements(&self) -> &StatementSet {
        &self.statements
    }

    pub fn into_statements(self) -> StatementSet {
        self.statements
    }
}

impl StatementSource for RdfSource {
    fn concept_uris(&self) -> Vec<String> {
        self.statements.concept_uris()
    }

    fn broader_links(&self) -> Vec<(String, String)> {
        self.statements.broader_links()
    }

    fn related_links(&self) -> Vec<(String, String)> {
        self.statements.related_links()
    }

    fn labels(&self, kind: LabelKind) -> Vec<LabelStatement> {
        self.statements.labels(kind)
    }
}
