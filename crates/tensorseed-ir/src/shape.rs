//! Static shape descriptors and the fill-shape resolution plan.

use serde::{Deserialize, Serialize};

use crate::def::FillerDef;
use crate::error::DefError;

/// Shape information for a single tensor dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimSize {
    /// Static known size
    Static(usize),
    /// Dynamic size (known at runtime)
    Dynamic,
    /// Symbolic dimension (e.g., batch size)
    Symbolic(String),
}

impl DimSize {
    pub fn is_static(&self) -> bool {
        matches!(self, DimSize::Static(_))
    }

    pub fn as_static(&self) -> Option<usize> {
        match self {
            DimSize::Static(size) => Some(*size),
            _ => None,
        }
    }
}

/// Tensor shape representation used by the offline shape-propagation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorShape {
    pub dims: Vec<DimSize>,
}

impl TensorShape {
    pub fn new(dims: Vec<DimSize>) -> Self {
        TensorShape { dims }
    }

    pub fn static_shape(sizes: Vec<usize>) -> Self {
        TensorShape {
            dims: sizes.into_iter().map(DimSize::Static).collect(),
        }
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn is_static(&self) -> bool {
        self.dims.iter().all(|d| d.is_static())
    }

    pub fn as_static(&self) -> Option<Vec<usize>> {
        self.dims.iter().map(|d| d.as_static()).collect()
    }

    /// Append statically-known trailing dimensions.
    pub fn append_static(&mut self, extra: &[usize]) {
        self.dims.extend(extra.iter().map(|&d| DimSize::Static(d)));
    }
}

/// How a fill operator obtains its output dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMode {
    /// No runtime input; the `shape` argument is the output shape.
    Declared,
    /// The input tensor's own shape, plus `extra_shape`.
    InputDims,
    /// The input tensor's element values, plus `extra_shape`.
    InputValues,
}

/// Parsed shape-resolution configuration shared by every fill operator.
///
/// `from_def` runs the mutual-exclusion validation exactly once, at
/// operator construction. The branching between the three resolution modes
/// lives in [`FillShapePlan::mode`] and is consumed by both the runtime
/// resolver and [`static_output`](FillShapePlan::static_output), so the two
/// paths cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillShapePlan {
    shape: Vec<usize>,
    extra_shape: Vec<usize>,
    input_as_shape: bool,
    has_input: bool,
}

impl FillShapePlan {
    pub fn from_def(def: &FillerDef) -> Result<Self, DefError> {
        if def.num_inputs() > 1 {
            return Err(DefError::TooManyInputs(def.num_inputs()));
        }
        let has_input = def.num_inputs() == 1;
        let shape = to_dims(def.get_i64s("shape")?)?;
        let extra_shape = to_dims(def.get_i64s("extra_shape")?)?;
        let input_as_shape = def.get_bool("input_as_shape", false)?;

        if has_input {
            if !shape.is_empty() {
                return Err(DefError::ShapeAndInput);
            }
        } else {
            if !extra_shape.is_empty() {
                return Err(DefError::ExtraShapeWithoutInput);
            }
            if input_as_shape {
                return Err(DefError::InputAsShapeWithoutInput);
            }
        }

        Ok(FillShapePlan {
            shape,
            extra_shape,
            input_as_shape,
            has_input,
        })
    }

    pub fn mode(&self) -> ShapeMode {
        if !self.has_input {
            ShapeMode::Declared
        } else if self.input_as_shape {
            ShapeMode::InputValues
        } else {
            ShapeMode::InputDims
        }
    }

    pub fn has_input(&self) -> bool {
        self.has_input
    }

    /// The `shape` argument, meaningful only in [`ShapeMode::Declared`].
    pub fn declared(&self) -> &[usize] {
        &self.shape
    }

    pub fn extra(&self) -> &[usize] {
        &self.extra_shape
    }

    /// Concatenate a resolved base shape with the configured trailing dims.
    pub fn with_extra(&self, mut base: Vec<usize>) -> Vec<usize> {
        base.extend_from_slice(&self.extra_shape);
        base
    }

    /// Static-analysis view of the output shape.
    ///
    /// Returns `None` when the shape cannot be known without tensor data:
    /// in shape-as-input mode (the output depends on the input's runtime
    /// values), or when the input's own static shape is unavailable.
    pub fn static_output(&self, input: Option<&TensorShape>) -> Option<TensorShape> {
        match self.mode() {
            ShapeMode::Declared => Some(TensorShape::static_shape(self.shape.clone())),
            ShapeMode::InputValues => None,
            ShapeMode::InputDims => {
                let mut out = input?.clone();
                out.append_static(&self.extra_shape);
                Some(out)
            }
        }
    }
}

fn to_dims(raw: Vec<i64>) -> Result<Vec<usize>, DefError> {
    raw.into_iter()
        .map(|d| {
            if d < 0 {
                Err(DefError::NegativeDim(d))
            } else {
                Ok(d as usize)
            }
        })
        .collect()
}
