//! Collaborator error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The address parser found the same label twice in one string.
    /// Callers degrade the record being built instead of propagating.
    #[error("Repeated address label while parsing \"{parsed}\" from \"{original}\"")]
    RepeatedLabel { parsed: String, original: String },

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, PredictorError>;
