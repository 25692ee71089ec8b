//! One conversion run: read, build, compute, write.
//!
//! Every output is rendered in memory before the first file is touched. All
//! of them are then staged as temporary siblings, and only once every stage
//! succeeded are they renamed into place. A failed run therefore leaves the
//! previous outputs as they were. The renames themselves are not atomic as a
//! group: a rename failing midway leaves a mix of new and old files, and the
//! run still reports the error.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use wikivocab_core::{
    BuildReport, ConceptGraph, ConceptModelBuilder, DistanceMatrix, LabelDictionary,
    LanguageCoverage,
};
use wikivocab_rdf::RdfSource;

use crate::config::RunConfig;

/// What a run produced, printed as JSON on stdout by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub triples: usize,
    pub report: BuildReport,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    pub coverage: Vec<LanguageCoverage>,
    pub files: Vec<PathBuf>,
    pub duration_ms: u64,
}

pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let start = Instant::now();

    let source = RdfSource::open_as(&config.input, config.input_format())
        .with_context(|| format!("failed to read thesaurus {}", config.input.display()))?;

    let model = ConceptModelBuilder::new(config.namespace.as_str())
        .on_parent_conflict(config.on_parent_conflict)
        .build(&source)
        .context("failed to build concept model")?;

    for warning in &model.report.warnings {
        warn!(warning = %warning, "Build warning");
    }
    info!(
        external_parents = model.report.external_parents,
        warnings = model.report.warnings.len(),
        "{}",
        model.report
    );

    let graph = ConceptGraph::from_model(&model);
    let component_count = graph.component_count();
    info!(
        vertex_count = graph.vertex_count(),
        edge_count = graph.edge_count(),
        component_count,
        "Concept graph built"
    );
    let matrix = DistanceMatrix::from_graph(&graph);

    let dictionaries: Vec<LabelDictionary> = config
        .languages
        .iter()
        .map(|language| LabelDictionary::export(&model, language))
        .collect();
    for dictionary in &dictionaries {
        info!("{}", dictionary.coverage);
    }

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let mut outputs = Vec::with_capacity(dictionaries.len() + 1);
    let mut body = Vec::new();
    matrix.write_json(&mut body)?;
    outputs.push((config.matrix_path(), body));
    for dictionary in &dictionaries {
        let mut body = Vec::new();
        dictionary.write_json(&mut body)?;
        outputs.push((config.label_path(&dictionary.coverage.language), body));
    }

    commit(&outputs)?;
    let files = outputs.into_iter().map(|(path, _)| path).collect();

    let summary = RunSummary {
        triples: source.stats().triples,
        report: model.report,
        vertex_count: graph.vertex_count(),
        edge_count: graph.edge_count(),
        component_count,
        coverage: dictionaries.into_iter().map(|d| d.coverage).collect(),
        files,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    info!(
        files = summary.files.len(),
        duration_ms = summary.duration_ms,
        "Conversion complete"
    );
    Ok(summary)
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid output path {}", path.display()))?;
    Ok(path.with_file_name(format!(".{}.tmp", file_name)))
}

fn stage(tmp: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(tmp)?;
    file.write_all(body)?;
    file.sync_all()
}

/// Write every `(path, body)` pair: stage all, then rename all.
fn commit(outputs: &[(PathBuf, Vec<u8>)]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(outputs.len());

    for (path, body) in outputs {
        let tmp = staging_path(path)?;
        if let Err(e) = stage(&tmp, body) {
            let _ = fs::remove_file(&tmp);
            for (tmp, _) in &staged {
                let _ = fs::remove_file(tmp);
            }
            return Err(e).with_context(|| format!("failed to write {}", path.display()));
        }
        staged.push((tmp, path.as_path()));
    }

    for (tmp, path) in &staged {
        fs::rename(tmp, path).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "Wrote output file");
    }
    Ok(())
}
