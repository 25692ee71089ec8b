//! Reading a SKOS thesaurus from Turtle and N-Triples documents and building
//! a model from it.

use std::io::Write;

use wikivocab_core::{
    BuildWarning, ConceptGraph, ConceptModelBuilder, DistanceMatrix, LabelDictionary, LabelKind,
    StatementSource,
};
use wikivocab_rdf::{RdfFormat, RdfSource};

const NS: &str = "http://data.silknow.org/vocabulary/";

const NTRIPLES: &str = r#"<http://data.silknow.org/vocabulary/1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#Concept> .
<http://data.silknow.org/vocabulary/2> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#Concept> .
<http://data.silknow.org/vocabulary/3> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#Concept> .
<http://data.silknow.org/vocabulary/3> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#Concept> .
<http://data.silknow.org/vocabulary> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#ConceptScheme> .

<http://data.silknow.org/vocabulary/2> <http://www.w3.org/2004/02/skos/core#broader> <http://data.silknow.org/vocabulary/1> .
<http://data.silknow.org/vocabulary/1> <http://www.w3.org/2004/02/skos/core#broader> <http://vocab.getty.edu/aat/300014063> .
<http://data.silknow.org/vocabulary/9> <http://www.w3.org/2004/02/skos/core#broader> <http://data.silknow.org/vocabulary/1> .
<http://data.silknow.org/vocabulary/3> <http://www.w3.org/2004/02/skos/core#related> <http://data.silknow.org/vocabulary/2> .

<http://data.silknow.org/vocabulary/1> <http://www.w3.org/2004/02/skos/core#prefLabel> "Silk"@en .
<http://data.silknow.org/vocabulary/1> <http://www.w3.org/2004/02/skos/core#prefLabel> "silk"@en .
<http://data.silknow.org/vocabulary/1> <http://www.w3.org/2004/02/skos/core#prefLabel> "Soie"@fr .
<http://data.silknow.org/vocabulary/2> <http://www.w3.org/2004/02/skos/core#prefLabel> "Bourrette silk"@en .
<http://data.silknow.org/vocabulary/2> <http://www.w3.org/2004/02/skos/core#altLabel> "stumba"@en .
<http://data.silknow.org/vocabulary/2> <http://www.w3.org/2004/02/skos/core#altLabel> "stumba"@en .
<http://data.silknow.org/vocabulary/2> <http://www.w3.org/2004/02/skos/core#definition> "Silk from waste"@en .
<http://data.silknow.org/vocabulary/3> <http://www.w3.org/2004/02/skos/core#prefLabel> <http://data.silknow.org/vocabulary/1> .
"#;

const TURTLE: &str = r#"@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .
@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix voc: <http://data.silknow.org/vocabulary/> .

<http://data.silknow.org/vocabulary> a skos:ConceptScheme .

voc:1 a skos:Concept ;
    skos:broader <http://vocab.getty.edu/aat/300014063> ;
    skos:prefLabel "Silk"@en, "silk"@en, "Soie"@fr .

voc:2 a skos:Concept ;
    skos:broader voc:1 ;
    skos:prefLabel "Bourrette silk"@en ;
    skos:altLabel "stumba"@en ;
    skos:definition "Silk from waste"@en .

voc:3 rdf:type skos:Concept ;
    skos:related voc:2 ;
    skos:prefLabel voc:1 .

voc:9 skos:broader voc:1 .
"#;

#[test]
fn test_statements_extracted_and_deduplicated() {
    let source = RdfSource::parse_str_as(NTRIPLES, RdfFormat::NTriples).unwrap();

    assert_eq!(source.concept_uris().len(), 3);
    assert_eq!(source.broader_links().len(), 3);
    assert_eq!(source.related_links().len(), 1);
    assert_eq!(source.labels(LabelKind::Preferred).len(), 4);
    assert_eq!(source.labels(LabelKind::Alternate).len(), 1);

    let stats = source.stats();
    assert_eq!(stats.triples, 17);
    // ConceptScheme typing, skos:definition, and the non-literal prefLabel.
    assert_eq!(stats.ignored, 3);
    assert_eq!(stats.relevant, 14);
}

#[test]
fn test_model_from_ntriples() {
    let source = RdfSource::parse_str_as(NTRIPLES, RdfFormat::NTriples).unwrap();
    let model = ConceptModelBuilder::new(NS).build(&source).unwrap();
    let report = &model.report;

    assert_eq!(report.concepts, 3);
    assert_eq!(report.concepts_with_parent, 1);
    assert_eq!(report.external_parents, 1);
    assert!(report.warnings.contains(&BuildWarning::ExternalParent {
        child: format!("{}1", NS),
        parent: "http://vocab.getty.edu/aat/300014063".to_string(),
    }));
    assert_eq!(report.related_links, 1);
    assert_eq!(report.preferred_labels, 4);
    assert_eq!(report.alternate_labels, 1);
    assert!(report.warnings.contains(&BuildWarning::UnknownChild {
        child: format!("{}9", NS),
    }));
    assert!(report
        .warnings
        .iter()
        .any(|w| matches!(w, BuildWarning::MultiplePreferredLabels { language, .. } if language == "en")));
}

#[test]
fn test_outputs_from_ntriples() {
    let source = RdfSource::parse_str_as(NTRIPLES, RdfFormat::NTriples).unwrap();
    let model = ConceptModelBuilder::new(NS).build(&source).unwrap();
    let matrix = DistanceMatrix::from_graph(&ConceptGraph::from_model(&model));

    assert_eq!(
        matrix.distance(&format!("{}1", NS), &format!("{}3", NS)),
        Some(2)
    );

    let en = LabelDictionary::export(&model, "en");
    let first = en.get(&format!("{}1", NS)).unwrap();
    assert_eq!(first.pref_label.as_deref(), Some("Silk"));
    assert_eq!(first.alt_label, vec!["silk"]);
    let second = en.get(&format!("{}2", NS)).unwrap();
    assert_eq!(second.alt_label, vec!["stumba"]);
    assert!(en.get(&format!("{}3", NS)).is_none());
}

#[test]
fn test_open_picks_format_from_extension() {
    let mut file = tempfile::Builder::new().suffix(".nt").tempfile().unwrap();
    file.write_all(NTRIPLES.as_bytes()).unwrap();
    file.flush().unwrap();

    let source = RdfSource::open(file.path()).unwrap();
    assert_eq!(source.concept_uris().len(), 3);
    assert_eq!(source.stats().triples, 17);
}

#[test]
fn test_turtle_thesaurus_matches_ntriples() {
    let mut file = tempfile::Builder::new().suffix(".ttl").tempfile().unwrap();
    file.write_all(TURTLE.as_bytes()).unwrap();
    file.flush().unwrap();

    let turtle = RdfSource::open(file.path()).unwrap();
    let ntriples = RdfSource::parse_str_as(NTRIPLES, RdfFormat::NTriples).unwrap();

    assert_eq!(turtle.statements(), ntriples.statements());
}

#[test]
fn test_turtle_concept_with_prefixed_names() {
    let doc = r#"@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix voc: <http://data.silknow.org/vocabulary/> .
voc:1 a skos:Concept ; skos:prefLabel "Silk"@en .
"#;
    let source = RdfSource::parse_str(doc).unwrap();
    let model = ConceptModelBuilder::new(NS).build(&source).unwrap();

    let en = LabelDictionary::export(&model, "en");
    assert_eq!(
        en.get(&format!("{}1", NS)).unwrap().pref_label.as_deref(),
        Some("Silk")
    );
}

#[test]
fn test_ntriples_rejected_when_read_as_rdfxml() {
    let err = RdfSource::parse_str_as(NTRIPLES, RdfFormat::RdfXml).unwrap_err();
    assert!(matches!(err, wikivocab_core::Error::Parse(_)));
}

#[test]
fn test_open_missing_file_is_io_error() {
    let err = RdfSource::open(std::path::Path::new("/nonexistent/thesaurus.ttl")).unwrap_err();
    assert!(matches!(err, wikivocab_core::Error::Io(_)));
}
