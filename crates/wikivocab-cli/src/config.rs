//! Run configuration.
//!
//! Every setting is resolved in the same order: command-line flag, then
//! environment variable (a `.env` file is loaded first by `main`), then the
//! constant in [`wikivocab_core::defaults`].
//!
//! | Flag | Environment | Default |
//! |------|-------------|---------|
//! | `--input` | `WIKIVOCAB_INPUT` | `thesaurus.ttl` |
//! | `--format` | `WIKIVOCAB_FORMAT` | from the input extension, else Turtle |
//! | `--output-dir` | `WIKIVOCAB_OUTPUT_DIR` | `.` |
//! | `--namespace` | `WIKIVOCAB_NAMESPACE` | `http://data.silknow.org/vocabulary/` |
//! | `--language` (repeatable) | `WIKIVOCAB_LANGUAGES` (comma separated) | `en,fr,es,it` |
//! | `--matrix-file` | `WIKIVOCAB_MATRIX_FILE` | `thesaurusDistanceMatrix.json` |
//! | `--on-parent-conflict` | `WIKIVOCAB_PARENT_CONFLICT` | `fail` |

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use wikivocab_core::defaults;
use wikivocab_core::{Error, ParentConflictPolicy, Result};
use wikivocab_rdf::RdfFormat;

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "wikivocab")]
#[command(
    author,
    version,
    about = "Convert a SKOS thesaurus into wikifier label dictionaries and a distance matrix"
)]
pub struct Cli {
    /// RDF file holding the thesaurus
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input syntax: turtle, ntriples, n3, rdfxml, trig, nquads
    #[arg(short, long)]
    pub format: Option<String>,

    /// Directory the JSON files are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// URI prefix a broader target must carry to count as a parent
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Language to export a label dictionary for (repeatable)
    #[arg(short, long = "language", value_name = "TAG")]
    pub languages: Vec<String>,

    /// File name of the distance matrix inside the output directory
    #[arg(long)]
    pub matrix_file: Option<String>,

    /// What to do when a concept has two different parents: fail or warn
    #[arg(long, value_name = "POLICY")]
    pub on_parent_conflict: Option<String>,
}

/// Fully resolved settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input: PathBuf,
    /// Explicit input syntax; `None` picks it from the file extension.
    pub format: Option<RdfFormat>,
    pub output_dir: PathBuf,
    pub namespace: String,
    pub languages: Vec<String>,
    pub matrix_file: String,
    pub on_parent_conflict: ParentConflictPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(defaults::INPUT_FILE),
            format: None,
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            namespace: defaults::CONCEPT_NAMESPACE.to_string(),
            languages: defaults::LANGUAGES.iter().map(|l| l.to_string()).collect(),
            matrix_file: defaults::MATRIX_FILE.to_string(),
            on_parent_conflict: ParentConflictPolicy::default(),
        }
    }
}

impl RunConfig {
    /// Resolve against the process environment.
    pub fn resolve(cli: Cli) -> Result<Self> {
        Self::resolve_with(cli, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup.
    pub fn resolve_with<F>(cli: Cli, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(input) = cli.input.or_else(|| env("WIKIVOCAB_INPUT").map(PathBuf::from)) {
            config.input = input;
        }
        if let Some(name) = cli.format.or_else(|| env("WIKIVOCAB_FORMAT")) {
            let format = wikivocab_rdf::parse_format(&name)
                .ok_or_else(|| Error::Config(format!("Unknown RDF format: {}", name)))?;
            config.format = Some(format);
        }
        if let Some(dir) = cli
            .output_dir
            .or_else(|| env("WIKIVOCAB_OUTPUT_DIR").map(PathBuf::from))
        {
            config.output_dir = dir;
        }
        if let Some(ns) = cli.namespace.or_else(|| env("WIKIVOCAB_NAMESPACE")) {
            if ns.trim().is_empty() {
                return Err(Error::Config("namespace must not be empty".to_string()));
            }
            config.namespace = ns;
        }

        let languages = if cli.languages.is_empty() {
            env("WIKIVOCAB_LANGUAGES")
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or_default()
        } else {
            cli.languages
        };
        if !languages.is_empty() {
            config.languages = normalize_languages(languages)?;
        }

        if let Some(name) = cli.matrix_file.or_else(|| env("WIKIVOCAB_MATRIX_FILE")) {
            if name.trim().is_empty() || name.contains(|c: char| c == '/' || c == '\\') {
                return Err(Error::Config(format!(
                    "matrix file must be a plain file name: {:?}",
                    name
                )));
            }
            config.matrix_file = name;
        }
        if let Some(policy) = cli
            .on_parent_conflict
            .or_else(|| env("WIKIVOCAB_PARENT_CONFLICT"))
        {
            config.on_parent_conflict = policy.parse()?;
        }

        debug!(
            input = %config.input.display(),
            format = config.input_format().name(),
            output_dir = %config.output_dir.display(),
            namespace = %config.namespace,
            languages = ?config.languages,
            on_parent_conflict = %config.on_parent_conflict,
            "Configuration resolved"
        );
        Ok(config)
    }

    /// Syntax the input is parsed with.
    pub fn input_format(&self) -> RdfFormat {
        self.format
            .unwrap_or_else(|| wikivocab_rdf::format_for_path(&self.input))
    }

    pub fn matrix_path(&self) -> PathBuf {
        self.output_dir.join(&self.matrix_file)
    }

    pub fn label_path(&self, language: &str) -> PathBuf {
        self.output_dir.join(defaults::label_file_name(language))
    }
}

/// Trim, lowercase, validate and deduplicate language tags, keeping order.
fn normalize_languages(raw: Vec<String>) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            continue;
        }
        let valid = tag
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
        if !valid {
            return Err(Error::Config(format!("Invalid language tag: {}", tag)));
        }
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    if out.is_empty() {
        return Err(Error::Config("no languages configured".to_string()));
    }
    Ok(out)
}
