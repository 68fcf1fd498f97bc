//! Runtime output-shape resolution.

use tensorseed_ir::{DType, FillShapePlan, ShapeMode};

use crate::error::{FillResult, FillerError};
use crate::tensor::DenseTensor;

/// Resolve the concrete output dimensions for one invocation.
///
/// Consumes the same [`FillShapePlan`] branching the static inference path
/// uses, so the two cannot drift apart. Every validation failure returns
/// before the caller resizes the output, leaving it untouched.
pub fn resolve_output_dims(
    plan: &FillShapePlan,
    input: Option<&DenseTensor>,
) -> FillResult<Vec<usize>> {
    let declared = usize::from(plan.has_input());
    let provided = usize::from(input.is_some());
    if declared != provided {
        return Err(FillerError::InputArity { declared, provided });
    }

    match (plan.mode(), input) {
        (ShapeMode::Declared, None) => Ok(plan.declared().to_vec()),
        (ShapeMode::InputDims, Some(input)) => Ok(plan.with_extra(input.shape().to_vec())),
        (ShapeMode::InputValues, Some(input)) => {
            if input.ndim() != 1 {
                return Err(FillerError::WrongInputRank {
                    expected: 1,
                    actual: input.ndim(),
                });
            }
            let values = input.as_i64().ok_or(FillerError::InputDtype {
                expected: DType::I64,
                actual: input.dtype(),
            })?;
            let mut dims = Vec::with_capacity(values.len());
            for &v in values.iter() {
                if v < 0 {
                    return Err(FillerError::NegativeDimValue(v));
                }
                dims.push(v as usize);
            }
            Ok(plan.with_extra(dims))
        }
        // has_input and input presence agree, so the mode always matches.
        _ => Err(FillerError::Internal(
            "shape mode inconsistent with input arity".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensorseed_ir::{ArgValue, FillerDef};

    fn plan_for(def: &FillerDef) -> FillShapePlan {
        FillShapePlan::from_def(def).unwrap()
    }

    #[test]
    fn test_declared_shape_verbatim() {
        let def = FillerDef::new("UniformFill").with_arg("shape", ArgValue::I64s(vec![5, 2]));
        let dims = resolve_output_dims(&plan_for(&def), None).unwrap();
        assert_eq!(dims, vec![5, 2]);
    }

    #[test]
    fn test_input_dims_with_extra() {
        let def = FillerDef::new("UniformFill")
            .with_inputs(1)
            .with_arg("extra_shape", ArgValue::I64s(vec![7]));
        let input = DenseTensor::zeros(&[2, 3], DType::F32).unwrap();
        let dims = resolve_output_dims(&plan_for(&def), Some(&input)).unwrap();
        assert_eq!(dims, vec![2, 3, 7]);
    }

    #[test]
    fn test_input_values_with_extra() {
        let def = FillerDef::new("UniformFill")
            .with_inputs(1)
            .with_arg("input_as_shape", ArgValue::Bool(true))
            .with_arg("extra_shape", ArgValue::I64s(vec![4]));
        let input = DenseTensor::vector_i64(&[2, 3]);
        let dims = resolve_output_dims(&plan_for(&def), Some(&input)).unwrap();
        assert_eq!(dims, vec![2, 3, 4]);
    }

    #[test]
    fn test_input_values_requires_rank_one() {
        let def = FillerDef::new("UniformFill")
            .with_inputs(1)
            .with_arg("input_as_shape", ArgValue::Bool(true));
        let input = DenseTensor::zeros(&[2, 2], DType::I64).unwrap();
        assert!(matches!(
            resolve_output_dims(&plan_for(&def), Some(&input)).unwrap_err(),
            FillerError::WrongInputRank {
                expected: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_input_values_requires_i64() {
        let def = FillerDef::new("UniformFill")
            .with_inputs(1)
            .with_arg("input_as_shape", ArgValue::Bool(true));
        let input = DenseTensor::vector_i32(&[2, 3]);
        assert!(matches!(
            resolve_output_dims(&plan_for(&def), Some(&input)).unwrap_err(),
            FillerError::InputDtype {
                expected: DType::I64,
                ..
            }
        ));
    }

    #[test]
    fn test_input_values_rejects_negative_dims() {
        let def = FillerDef::new("UniformFill")
            .with_inputs(1)
            .with_arg("input_as_shape", ArgValue::Bool(true));
        let input = DenseTensor::vector_i64(&[2, -1]);
        assert!(matches!(
            resolve_output_dims(&plan_for(&def), Some(&input)).unwrap_err(),
            FillerError::NegativeDimValue(-1)
        ));
    }

    #[test]
    fn test_arity_mismatch() {
        let def = FillerDef::new("UniformFill").with_arg("shape", ArgValue::I64s(vec![2]));
        let input = DenseTensor::zeros(&[2], DType::F32).unwrap();
        assert!(matches!(
            resolve_output_dims(&plan_for(&def), Some(&input)).unwrap_err(),
            FillerError::InputArity {
                declared: 0,
                provided: 1
            }
        ));

        let def = FillerDef::new("UniformFill").with_inputs(1);
        assert!(matches!(
            resolve_output_dims(&plan_for(&def), None).unwrap_err(),
            FillerError::InputArity {
                declared: 1,
                provided: 0
            }
        ));
    }
}
