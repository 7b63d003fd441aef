use std::collections::TryReserveError;

use thiserror::Error;

/// Top-level error type for mask spline evaluation.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// Errors related to spline control data.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("weight sample {index} has u = {current}, not after previous u = {previous}")]
    NonMonotonicWeights {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised while producing evaluated point buffers.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("failed to allocate {requested} output points")]
    Allocation {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("invalid evaluation parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`MaskError`].
pub type Result<T> = std::result::Result<T, MaskError>;

/// Allocates an empty buffer able to hold `requested` elements without
/// reallocating, reporting allocator failure instead of aborting.
///
/// # Errors
///
/// Returns [`EvaluationError::Allocation`] if the reservation fails.
pub(crate) fn try_buffer<T>(requested: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(requested)
        .map_err(|source| EvaluationError::Allocation { requested, source })?;
    Ok(buffer)
}
