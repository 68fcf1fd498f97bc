//! Error types for operator definitions.

use thiserror::Error;

/// Construction-time configuration errors.
///
/// Every invariant violation in a fill operator's definition surfaces as
/// one of these before any execution is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefError {
    #[error("Argument '{name}' holds {actual}, expected {expected}")]
    ArgumentType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Cannot set the shape argument and pass in an input at the same time")]
    ShapeAndInput,

    #[error("Cannot set extra_shape when there is no input")]
    ExtraShapeWithoutInput,

    #[error("An input must be given if input_as_shape is true")]
    InputAsShapeWithoutInput,

    #[error("Fill operators take at most one input, definition declares {0}")]
    TooManyInputs(usize),

    #[error("Negative dimension {0} in shape argument")]
    NegativeDim(i64),

    #[error("Unknown dtype tag '{0}'")]
    UnknownDtype(String),

    #[error("Dtype tag must not be 'undefined'")]
    UndefinedDtype,
}
