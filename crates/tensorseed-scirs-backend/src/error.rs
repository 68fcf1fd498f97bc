//! Error types for fill execution.

use thiserror::Error;

use tensorseed_ir::{DType, DefError};

/// Errors raised by fill operators.
///
/// Construction-time failures (`Def`, `InvalidParameter`,
/// `UnsupportedDtype`, `ValueType`, `DeclaredInputs`) abort operator
/// creation; the remaining variants abort a single invocation and are
/// returned before the output tensor is resized.
#[derive(Error, Debug)]
pub enum FillerError {
    /// Definition-level configuration problem.
    #[error("Invalid definition: {0}")]
    Def(#[from] DefError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported dtype: {0}")]
    UnsupportedDtype(String),

    #[error("Argument 'value' has unexpected type {0}")]
    ValueType(&'static str),

    #[error("{op} requires exactly {required} input(s), definition declares {declared}")]
    DeclaredInputs {
        op: &'static str,
        required: usize,
        declared: usize,
    },

    #[error("Operator declares {declared} input(s) but was invoked with {provided}")]
    InputArity { declared: usize, provided: usize },

    #[error("Wrong input rank: expected {expected}, got {actual}")]
    WrongInputRank { expected: usize, actual: usize },

    #[error("Input dtype mismatch: expected {expected}, got {actual}")]
    InputDtype { expected: DType, actual: DType },

    #[error("{op} requires an output of rank at least {required}, got {actual}")]
    OutputRank {
        op: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("Dimension value {0} from shape input is negative")]
    NegativeDimValue(i64),

    #[error("Negative length {value} at position {index}")]
    NegativeLength { value: i32, index: usize },

    #[error("Unknown fill operator '{0}'")]
    UnknownOp(String),

    /// Should not happen; indicates a bug in this crate.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for fill operations.
pub type FillResult<T> = Result<T, FillerError>;
