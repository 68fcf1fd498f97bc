//! Operator metadata and static analysis for the tensorseed fill subsystem.
//!
//! This crate defines everything the host graph engine needs to describe a
//! fill operator without executing it:
//!
//! - **FillerDef**: operator definitions with typed named-argument lookup
//! - **DType**: element-type tags for tensor buffers
//! - **TensorShape / DimSize**: static shape descriptors
//! - **FillShapePlan**: the validated shape-resolution configuration shared
//!   by every fill operator
//! - **filler_shape_inference**: pure shape/type inference for the offline
//!   shape-propagation pass
//!
//! Execution lives in `tensorseed-scirs-backend`; this crate is pure data
//! and pure functions, all serde-serializable.

pub mod def;
pub mod dtype;
pub mod error;
pub mod infer;
pub mod shape;

pub use def::{ArgValue, FillerDef};
pub use dtype::DType;
pub use error::DefError;
pub use infer::{filler_shape_inference, FillerShapeInfo};
pub use shape::{DimSize, FillShapePlan, ShapeMode, TensorShape};
