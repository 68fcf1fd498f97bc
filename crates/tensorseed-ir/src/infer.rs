//! Static shape inference for fill operators.

use serde::{Deserialize, Serialize};

use crate::def::FillerDef;
use crate::dtype::DType;
use crate::error::DefError;
use crate::shape::{FillShapePlan, TensorShape};

/// Statically inferred output of a fill operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillerShapeInfo {
    pub dtype: DType,
    /// `None` when the shape depends on runtime tensor contents.
    pub shape: Option<TensorShape>,
}

impl FillerShapeInfo {
    pub fn is_shape_known(&self) -> bool {
        self.shape.is_some()
    }
}

/// Shape/type inference consumed by the offline shape-propagation pass.
///
/// Operates on definition metadata and static input shapes only; never
/// touches tensor data and never mutates anything. In shape-as-input mode
/// the output shape is reported as unknown rather than guessed, since it
/// depends on the input's runtime values.
pub fn filler_shape_inference(
    def: &FillerDef,
    inputs: &[TensorShape],
) -> Result<FillerShapeInfo, DefError> {
    let dtype = match def.get_str("dtype")? {
        Some(tag) => match DType::parse(tag) {
            Some(DType::Undefined) => return Err(DefError::UndefinedDtype),
            Some(dtype) => dtype,
            None => return Err(DefError::UnknownDtype(tag.to_string())),
        },
        None => DType::F32,
    };

    let plan = FillShapePlan::from_def(def)?;
    let shape = plan.static_output(inputs.first());

    Ok(FillerShapeInfo { dtype, shape })
}
