//! Crate-wide error taxonomy and per-run diagnostics.

use thiserror::Error;

/// Fatal errors that abort a pipeline run.
///
/// Recoverable failures (embedder/extractor unavailable, export failures) are
/// never represented here; they are folded into [`Diagnostics`] instead so a
/// run degrades rather than aborts.
#[derive(Debug, Error)]
pub enum ClaimGraphError {
    #[error("annotator produced a malformed token record: {0}")]
    AnnotatorInput(String),

    #[error("resource exhausted while building the embedding matrix: {0}")]
    ResourceExhausted(String),

    #[error("failed to serialize graph or path export: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Recoverable failure kinds counted over the lifetime of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverableKind {
    /// Embedder or entity extractor call failed, timed out, or returned
    /// unusable output.
    ExternalUnavailable,
    /// A graph or path export could not be written; the in-memory graph is
    /// still valid.
    SerializationError,
}

/// Accumulates recoverable failures so callers can see how degraded a run
/// was without it becoming a hard failure.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    external_unavailable: u32,
    serialization_error: u32,
    notes: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: RecoverableKind, note: impl Into<String>) {
        match kind {
            RecoverableKind::ExternalUnavailable => self.external_unavailable += 1,
            RecoverableKind::SerializationError => self.serialization_error += 1,
        }
        self.notes.push(note.into());
    }

    pub fn external_unavailable_count(&self) -> u32 {
        self.external_unavailable
    }

    pub fn serialization_error_count(&self) -> u32 {
        self.serialization_error
    }

    pub fn is_clean(&self) -> bool {
        self.external_unavailable == 0 && self.serialization_error == 0
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}
