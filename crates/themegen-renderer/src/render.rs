//! Template rendering.
//!
//! A render reads the template, applies one substitution list and writes the
//! result to a single output file:
//!
//! ```text
//! template ──read──▶ text ──apply rules──▶ text' ──write──▶ output
//!                           ▲
//! substitutions ──parse─────┘
//! ```
//!
//! The output is truncated and rewritten in place. A failure while writing can
//! leave a partially written file behind.

use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::{ParseError, parse_substitutions};
use crate::rules::{ApplyStats, SubstitutionList};

/// Error returned by rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to read template {}: {source}", path.display())]
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read substitution list {}: {source}", path.display())]
    ReadSubstitutions {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid substitution list {}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl RenderError {
    /// Whether the error comes from a malformed substitution list rather than I/O.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// The file the failed operation was working on.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadTemplate { path, .. }
            | Self::ReadSubstitutions { path, .. }
            | Self::Parse { path, .. }
            | Self::Write { path, .. } => path,
        }
    }
}

/// Paths for a single render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// Template to read.
    pub template: PathBuf,
    /// Substitution list to apply.
    pub substitutions: PathBuf,
    /// Destination file, created or truncated.
    pub output: PathBuf,
}

/// Template text after substitution, not yet written anywhere.
#[derive(Debug)]
pub struct Rendered {
    /// Final text.
    pub text: String,
    /// Number of rules in the substitution list.
    pub rules: usize,
    /// Replacement statistics.
    pub stats: ApplyStats,
}

/// Summary of a completed render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// File that was written.
    pub output: PathBuf,
    /// Number of rules in the substitution list.
    pub rules: usize,
    /// Total occurrences replaced.
    pub replacements: usize,
    /// Targets that never matched.
    pub unmatched: Vec<String>,
    /// Size of the written file.
    pub bytes_written: usize,
}

/// Read and parse a substitution list file.
pub fn load_substitutions(path: &Path) -> Result<SubstitutionList, RenderError> {
    let source = fs::read_to_string(path).map_err(|source| RenderError::ReadSubstitutions {
        path: path.to_path_buf(),
        source,
    })?;

    parse_substitutions(&source).map_err(|source| RenderError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply the job's substitution list to its template without writing output.
pub fn render_to_string(job: &RenderJob) -> Result<Rendered, RenderError> {
    let mut text = fs::read_to_string(&job.template).map_err(|source| {
        RenderError::ReadTemplate {
            path: job.template.clone(),
            source,
        }
    })?;

    let rules = load_substitutions(&job.substitutions)?;
    let stats = rules.apply(&mut text);

    tracing::debug!(
        template = %job.template.display(),
        substitutions = %job.substitutions.display(),
        rules = rules.len(),
        replacements = stats.replacements,
        "Applied substitution list"
    );
    for target in &stats.unmatched {
        tracing::warn!(
            substitutions = %job.substitutions.display(),
            target = %target,
            "Substitution target not found in template"
        );
    }

    Ok(Rendered {
        text,
        rules: rules.len(),
        stats,
    })
}

/// Render the job's template and write the result to its output path.
pub fn render(job: &RenderJob) -> Result<RenderReport, RenderError> {
    let rendered = render_to_string(job)?;

    fs::write(&job.output, &rendered.text).map_err(|source| RenderError::Write {
        path: job.output.clone(),
        source,
    })?;

    tracing::info!(
        output = %job.output.display(),
        bytes = rendered.text.len(),
        "Wrote rendered template"
    );

    Ok(RenderReport {
        output: job.output.clone(),
        rules: rendered.rules,
        replacements: rendered.stats.replacements,
        unmatched: rendered.stats.unmatched,
        bytes_written: rendered.text.len(),
    })
}
