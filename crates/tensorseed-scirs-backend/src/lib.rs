//! SciRS2-backed CPU execution of the tensorseed fill operators.
//!
//! This crate implements the runtime half of the fill subsystem described
//! by `tensorseed-ir`: given an operator definition, it builds a fill
//! operator that resolves its output shape (from a declared `shape`, from
//! an input tensor's shape, or from an input tensor's values), resizes the
//! output, and populates it according to the configured policy.
//!
//! ## Module Organization
//!
//! - `fillers`: the fill operators (Uniform, Constant, Gaussian, Xavier,
//!   MSRA, Range, LengthsRange) and the `build_filler` factory
//! - `resolve`: runtime output-shape resolution over `FillShapePlan`
//! - `kernels`: uniform/gaussian/constant/range fill primitives
//! - `tensor`: type-tagged dense tensors over `scirs2_core::ndarray`
//! - `context`: the execution context owning the random generator
//! - `error`: error types and the `FillResult` alias

pub mod context;
pub mod error;
pub mod fillers;
pub mod kernels;
pub mod resolve;
pub mod tensor;


pub use context::CpuContext;
pub use error::{FillResult, FillerError};
pub use fillers::{
    build_filler, ConstantFill, Filler, GaussianFill, LengthsRangeFill, MsraFill, RangeFill,
    UniformFill, XavierFill,
};
pub use resolve::resolve_output_dims;
pub use tensor::{DenseTensor, TensorData};
