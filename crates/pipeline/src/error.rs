//! Pipeline error types

use thiserror::Error;

/// A failure that abandons the extraction session. Recoverable
/// collaborator failures (geolocation, address repeated-label) are caught
/// at the point of use and never surface here.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Collaborator error: {0}")]
    Predictor(#[from] casegraph_predictors::PredictorError),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
