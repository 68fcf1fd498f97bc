//! Fill operators: shape-resolving tensor initializers.
//!
//! A fill operator takes either zero or one input. With an input, the
//! output shape follows the input at run time (its own shape, or its values
//! in shape-as-input mode), with optional trailing dimensions appended via
//! `extra_shape`. With no input, the full shape comes from the `shape`
//! argument. The mutual-exclusion rules are validated once, at
//! construction, by [`FillShapePlan::from_def`].
//!
//! Each policy is a small struct behind the single-method [`Filler`] trait;
//! [`build_filler`] maps the host engine's op-type strings to boxed trait
//! objects.

use std::fmt;

use tracing::debug;

use scirs2_core::ndarray::ArrayD;
use tensorseed_ir::{ArgValue, DType, DefError, FillShapePlan, FillerDef};

use crate::context::CpuContext;
use crate::error::{FillResult, FillerError};
use crate::kernels;
use crate::resolve::resolve_output_dims;
use crate::tensor::DenseTensor;

/// A fill operator: resolves its output shape, resizes the output, and
/// writes every element.
///
/// Within one invocation, resolution and validation complete strictly
/// before the output is resized, and the resize completes before any
/// kernel touches the buffer. A failed invocation leaves the output's
/// previous contents intact.
pub trait Filler: std::fmt::Debug {
    fn run(
        &self,
        input: Option<&DenseTensor>,
        output: &mut DenseTensor,
        ctx: &mut CpuContext,
    ) -> FillResult<()>;
}

fn f32_data(output: &mut DenseTensor) -> FillResult<&mut ArrayD<f32>> {
    output
        .as_f32_mut()
        .ok_or_else(|| FillerError::Internal("output was just resized to f32".to_string()))
}

/// Uniform random fill over [min, max).
#[derive(Debug, Clone)]
pub struct UniformFill {
    plan: FillShapePlan,
    min: f32,
    max: f32,
}

impl UniformFill {
    pub fn from_def(def: &FillerDef) -> FillResult<Self> {
        let plan = FillShapePlan::from_def(def)?;
        let min = def.get_f32("min", 0.0)?;
        let max = def.get_f32("max", 1.0)?;
        if min >= max {
            return Err(FillerError::InvalidParameter(format!(
                "min ({min}) must be less than max ({max})"
            )));
        }
        Ok(UniformFill { plan, min, max })
    }
}

impl Filler for UniformFill {
    fn run(
        &self,
        input: Option<&DenseTensor>,
        output: &mut DenseTensor,
        ctx: &mut CpuContext,
    ) -> FillResult<()> {
        let dims = resolve_output_dims(&self.plan, input)?;
        output.resize(&dims, DType::F32)?;
        kernels::rand_uniform(ctx, self.min, self.max, f32_data(output)?);
        Ok(())
    }
}

/// Gaussian random fill with configurable mean and standard deviation.
#[derive(Debug, Clone)]
pub struct GaussianFill {
    plan: FillShapePlan,
    mean: f32,
    std: f32,
}

impl GaussianFill {
    pub fn from_def(def: &FillerDef) -> FillResult<Self> {
        let plan = FillShapePlan::from_def(def)?;
        let mean = def.get_f32("mean", 0.0)?;
        let std = def.get_f32("std", 1.0)?;
        if std <= 0.0 {
            return Err(FillerError::InvalidParameter(format!(
                "standard deviation must be positive, got {std}"
            )));
        }
        Ok(GaussianFill { plan, mean, std })
    }
}

impl Filler for GaussianFill {
    fn run(
        &self,
        input: Option<&DenseTensor>,
        output: &mut DenseTensor,
        ctx: &mut CpuContext,
    ) -> FillResult<()> {
        let dims = resolve_output_dims(&self.plan, input)?;
        output.resize(&dims, DType::F32)?;
        kernels::rand_gaussian(ctx, self.mean, self.std, f32_data(output)?);
        Ok(())
    }
}

type FillBody = Box<dyn Fn(&mut DenseTensor) -> FillResult<()> + Send + Sync>;

/// Constant fill with a construction-time resolved element type.
///
/// The element type comes from the `dtype` tag when present, otherwise it
/// is inferred from the `value` argument's own type (f32 or i64 only).
/// Resolution selects a typed fill body exactly once; every subsequent run
/// invokes it without re-checking the type.
pub struct ConstantFill {
    plan: FillShapePlan,
    dtype: DType,
    body: FillBody,
}

impl ConstantFill {
    pub fn from_def(def: &FillerDef) -> FillResult<Self> {
        let plan = FillShapePlan::from_def(def)?;
        let dtype = Self::resolve_dtype(def)?;
        let body = Self::typed_body(def, dtype)?;
        Ok(ConstantFill { plan, dtype, body })
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    fn resolve_dtype(def: &FillerDef) -> FillResult<DType> {
        if let Some(tag) = def.get_str("dtype")? {
            return DType::parse(tag)
                .ok_or_else(|| FillerError::Def(DefError::UnknownDtype(tag.to_string())));
        }
        if let Some(value) = def.arg("value") {
            let dtype = match value {
                ArgValue::F32(_) => DType::F32,
                ArgValue::I64(_) => DType::I64,
                other => return Err(FillerError::ValueType(other.type_name())),
            };
            debug!(
                dtype = dtype.as_str(),
                "dtype not provided, inferred from the value argument"
            );
            return Ok(dtype);
        }
        Ok(DType::F32)
    }

    fn typed_body(def: &FillerDef, dtype: DType) -> FillResult<FillBody> {
        match dtype {
            DType::F32 => {
                let value = def.get_f32("value", 0.0)?;
                Ok(Box::new(move |out| {
                    kernels::fill_with(value, f32_data(out)?);
                    Ok(())
                }))
            }
            DType::I32 => {
                let value = def.get_i64("value", 0)? as i32;
                Ok(Box::new(move |out| {
                    let data = out.as_i32_mut().ok_or_else(|| {
                        FillerError::Internal("constant body bound to i32".to_string())
                    })?;
                    kernels::fill_with(value, data);
                    Ok(())
                }))
            }
            DType::I64 => {
                let value = def.get_i64("value", 0)?;
                Ok(Box::new(move |out| {
                    let data = out.as_i64_mut().ok_or_else(|| {
                        FillerError::Internal("constant body bound to i64".to_string())
                    })?;
                    kernels::fill_with(value, data);
                    Ok(())
                }))
            }
            DType::Bool => {
                let value = def.get_bool("value", false)?;
                Ok(Box::new(move |out| {
                    let data = out.as_bool_mut().ok_or_else(|| {
                        FillerError::Internal("constant body bound to bool".to_string())
                    })?;
                    kernels::fill_with(value, data);
                    Ok(())
                }))
            }
            DType::Undefined => Err(FillerError::Def(DefError::UndefinedDtype)),
            other => Err(FillerError::UnsupportedDtype(other.as_str().to_string())),
        }
    }
}

impl Filler for ConstantFill {
    fn run(
        &self,
        input: Option<&DenseTensor>,
        output: &mut DenseTensor,
        _ctx: &mut CpuContext,
    ) -> FillResult<()> {
        let dims = resolve_output_dims(&self.plan, input)?;
        output.resize(&dims, self.dtype)?;
        (self.body)(output)
    }
}

impl fmt::Debug for ConstantFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantFill")
            .field("plan", &self.plan)
            .field("dtype", &self.dtype)
            .finish()
    }
}

/// Xavier (Glorot) initialization: uniform in [-s, s) with
/// s = sqrt(3 / fan_in), fan_in = element count / dim 0.
#[derive(Debug, Clone)]
pub struct XavierFill {
    plan: FillShapePlan,
}

impl XavierFill {
    pub fn from_def(def: &FillerDef) -> FillResult<Self> {
        Ok(XavierFill {
            plan: FillShapePlan::from_def(def)?,
        })
    }
}

impl Filler for XavierFill {
    fn run(
        &self,
        input: Option<&DenseTensor>,
        output: &mut DenseTensor,
        ctx: &mut CpuContext,
    ) -> FillResult<()> {
        let dims = resolve_output_dims(&self.plan, input)?;
        if dims.is_empty() {
            return Err(FillerError::OutputRank {
                op: "XavierFill",
                required: 1,
                actual: 0,
            });
        }
        output.resize(&dims, DType::F32)?;
        let data = f32_data(output)?;
        if data.is_empty() {
            return Ok(());
        }
        let fan_in = data.len() / dims[0];
        let scale = (3.0 / fan_in as f64).sqrt() as f32;
        kernels::rand_uniform(ctx, -scale, scale, data);
        Ok(())
    }
}

/// MSRA (He) initialization: Normal(0, sqrt(2 / fan_out)),
/// fan_out = element count / dim 1. Requires rank >= 2.
#[derive(Debug, Clone)]
pub struct MsraFill {
    plan: FillShapePlan,
}

impl MsraFill {
    pub fn from_def(def: &FillerDef) -> FillResult<Self> {
        Ok(MsraFill {
            plan: FillShapePlan::from_def(def)?,
        })
    }
}

impl Filler for MsraFill {
    fn run(
        &self,
        input: Option<&DenseTensor>,
        output: &mut DenseTensor,
        ctx: &mut CpuContext,
    ) -> FillResult<()> {
        let dims = resolve_output_dims(&self.plan, input)?;
        if dims.len() < 2 {
            return Err(FillerError::OutputRank {
                op: "MSRAFill",
                required: 2,
                actual: dims.len(),
            });
        }
        output.resize(&dims, DType::F32)?;
        let data = f32_data(output)?;
        if data.is_empty() {
            return Ok(());
        }
        let fan_out = data.len() / dims[1];
        let std = (2.0 / fan_out as f64).sqrt() as f32;
        kernels::rand_gaussian(ctx, 0.0, std, data);
        Ok(())
    }
}

/// Sequential fill: 0, 1, 2, ... in storage order. Deterministic; handy for
/// reading element indices back out of shape-sensitive operators downstream.
#[derive(Debug, Clone)]
pub struct RangeFill {
    plan: FillShapePlan,
}

impl RangeFill {
    pub fn from_def(def: &FillerDef) -> FillResult<Self> {
        Ok(RangeFill {
            plan: FillShapePlan::from_def(def)?,
        })
    }
}

impl Filler for RangeFill {
    fn run(
        &self,
        input: Option<&DenseTensor>,
        output: &mut DenseTensor,
        _ctx: &mut CpuContext,
    ) -> FillResult<()> {
        let dims = resolve_output_dims(&self.plan, input)?;
        output.resize(&dims, DType::F32)?;
        kernels::fill_range(f32_data(output)?);
        Ok(())
    }
}

/// Per-segment range fill: for a rank-1 lengths input, the output is one
/// flat `I32` tensor of size sum(lengths) where segment `i` counts
/// 0..lengths[i]-1. Shape is sum-derived, so this operator bypasses the
/// shape plan entirely.
#[derive(Debug, Clone)]
pub struct LengthsRangeFill;

impl LengthsRangeFill {
    pub fn from_def(def: &FillerDef) -> FillResult<Self> {
        if def.num_inputs() != 1 {
            return Err(FillerError::DeclaredInputs {
                op: "LengthsRangeFill",
                required: 1,
                declared: def.num_inputs(),
            });
        }
        Ok(LengthsRangeFill)
    }
}

impl Filler for LengthsRangeFill {
    fn run(
        &self,
        input: Option<&DenseTensor>,
        output: &mut DenseTensor,
        _ctx: &mut CpuContext,
    ) -> FillResult<()> {
        let input = input.ok_or(FillerError::InputArity {
            declared: 1,
            provided: 0,
        })?;
        if input.ndim() != 1 {
            return Err(FillerError::WrongInputRank {
                expected: 1,
                actual: input.ndim(),
            });
        }
        let raw = input.as_i32().ok_or(FillerError::InputDtype {
            expected: DType::I32,
            actual: input.dtype(),
        })?;

        let mut lengths = Vec::with_capacity(raw.len());
        let mut total = 0usize;
        for (i, &len) in raw.iter().enumerate() {
            if len < 0 {
                return Err(FillerError::NegativeLength {
                    value: len,
                    index: i,
                });
            }
            lengths.push(len as usize);
            total += len as usize;
        }

        output.resize(&[total], DType::I32)?;
        let data = output
            .as_i32_mut()
            .and_then(|a| a.as_slice_mut())
            .ok_or_else(|| {
                FillerError::Internal("freshly resized i32 output is contiguous".to_string())
            })?;

        let mut offset = 0;
        for len in lengths {
            for (j, v) in data[offset..offset + len].iter_mut().enumerate() {
                *v = j as i32;
            }
            offset += len;
        }
        Ok(())
    }
}

/// Construct a fill operator from its definition, keyed by op type.
///
/// Stands in for the host engine's operator registry; unknown op types are
/// an error rather than a fallback.
pub fn build_filler(def: &FillerDef) -> FillResult<Box<dyn Filler + Send + Sync>> {
    let op = def.op_type();
    debug!(op = %op, "building fill operator");
    match op {
        "UniformFill" => Ok(Box::new(UniformFill::from_def(def)?)),
        "ConstantFill" => Ok(Box::new(ConstantFill::from_def(def)?)),
        "GaussianFill" => Ok(Box::new(GaussianFill::from_def(def)?)),
        "XavierFill" => Ok(Box::new(XavierFill::from_def(def)?)),
        "MSRAFill" => Ok(Box::new(MsraFill::from_def(def)?)),
        "RangeFill" => Ok(Box::new(RangeFill::from_def(def)?)),
        "LengthsRangeFill" => Ok(Box::new(LengthsRangeFill::from_def(def)?)),
        other => Err(FillerError::UnknownOp(other.to_string())),
    }
}
