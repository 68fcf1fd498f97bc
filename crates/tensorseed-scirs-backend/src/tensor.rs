//! Type-tagged dense tensors over SciRS2 ndarray storage.

use scirs2_core::ndarray::{Array1, ArrayD, IxDyn};

use tensorseed_ir::DType;

use crate::error::{FillResult, FillerError};

/// Typed storage for a dense tensor, one arm per supported element type.
#[derive(Debug, Clone, PartialEq)]
pub enum TensorData {
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    Bool(ArrayD<bool>),
}

/// A dense tensor owned by the host graph executor.
///
/// Fill operators receive outputs by mutable reference and inputs by shared
/// reference; they never own tensors. [`resize`](DenseTensor::resize)
/// replaces shape and dtype together, so a successful fill always overwrites
/// the whole buffer and a failed invocation leaves the previous contents
/// intact.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTensor {
    data: TensorData,
}

impl DenseTensor {
    /// Allocate a zero-initialized tensor.
    pub fn zeros(dims: &[usize], dtype: DType) -> FillResult<Self> {
        let data = match dtype {
            DType::F32 => TensorData::F32(ArrayD::zeros(IxDyn(dims))),
            DType::F64 => TensorData::F64(ArrayD::zeros(IxDyn(dims))),
            DType::I32 => TensorData::I32(ArrayD::zeros(IxDyn(dims))),
            DType::I64 => TensorData::I64(ArrayD::zeros(IxDyn(dims))),
            DType::Bool => TensorData::Bool(ArrayD::from_elem(IxDyn(dims), false)),
            DType::Undefined => {
                return Err(FillerError::UnsupportedDtype(
                    "cannot allocate a tensor of undefined dtype".to_string(),
                ))
            }
        };
        Ok(DenseTensor { data })
    }

    pub fn from_f32(array: ArrayD<f32>) -> Self {
        DenseTensor {
            data: TensorData::F32(array),
        }
    }

    pub fn from_i32(array: ArrayD<i32>) -> Self {
        DenseTensor {
            data: TensorData::I32(array),
        }
    }

    pub fn from_i64(array: ArrayD<i64>) -> Self {
        DenseTensor {
            data: TensorData::I64(array),
        }
    }

    /// Rank-1 `I64` tensor, the shape-as-input carrier.
    pub fn vector_i64(values: &[i64]) -> Self {
        Self::from_i64(Array1::from(values.to_vec()).into_dyn())
    }

    /// Rank-1 `I32` tensor, the lengths carrier.
    pub fn vector_i32(values: &[i32]) -> Self {
        Self::from_i32(Array1::from(values.to_vec()).into_dyn())
    }

    pub fn dtype(&self) -> DType {
        match &self.data {
            TensorData::F32(_) => DType::F32,
            TensorData::F64(_) => DType::F64,
            TensorData::I32(_) => DType::I32,
            TensorData::I64(_) => DType::I64,
            TensorData::Bool(_) => DType::Bool,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match &self.data {
            TensorData::F32(a) => a.shape(),
            TensorData::F64(a) => a.shape(),
            TensorData::I32(a) => a.shape(),
            TensorData::I64(a) => a.shape(),
            TensorData::Bool(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn numel(&self) -> usize {
        self.shape().iter().product()
    }

    /// Re-shape and re-type the tensor, zeroing the buffer when anything
    /// changes. A no-op when shape and dtype already match, mirroring an
    /// executor that reuses output allocations across invocations.
    pub fn resize(&mut self, dims: &[usize], dtype: DType) -> FillResult<()> {
        if self.dtype() == dtype && self.shape() == dims {
            return Ok(());
        }
        *self = Self::zeros(dims, dtype)?;
        Ok(())
    }

    pub fn as_f32(&self) -> Option<&ArrayD<f32>> {
        match &self.data {
            TensorData::F32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_f32_mut(&mut self) -> Option<&mut ArrayD<f32>> {
        match &mut self.data {
            TensorData::F32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&ArrayD<f64>> {
        match &self.data {
            TensorData::F64(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<&ArrayD<i32>> {
        match &self.data {
            TensorData::I32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_i32_mut(&mut self) -> Option<&mut ArrayD<i32>> {
        match &mut self.data {
            TensorData::I32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&ArrayD<i64>> {
        match &self.data {
            TensorData::I64(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_i64_mut(&mut self) -> Option<&mut ArrayD<i64>> {
        match &mut self.data {
            TensorData::I64(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<&ArrayD<bool>> {
        match &self.data {
            TensorData::Bool(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_bool_mut(&mut self) -> Option<&mut ArrayD<bool>> {
        match &mut self.data {
            TensorData::Bool(a) => Some(a),
            _ => None,
        }
    }
}
