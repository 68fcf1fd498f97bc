//! Operator definitions with typed named-argument lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DefError;

/// A single named argument value in an operator definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArgValue {
    F32(f32),
    I64(i64),
    Bool(bool),
    Str(String),
    F32s(Vec<f32>),
    I64s(Vec<i64>),
}

impl ArgValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ArgValue::F32(_) => "f32",
            ArgValue::I64(_) => "i64",
            ArgValue::Bool(_) => "bool",
            ArgValue::Str(_) => "string",
            ArgValue::F32s(_) => "repeated f32",
            ArgValue::I64s(_) => "repeated i64",
        }
    }
}

/// Definition of a fill operator as the host engine hands it over: an
/// op-type name, the number of declared runtime inputs, and named
/// arguments.
///
/// Definitions are immutable once constructed; operators parse them once
/// and never look back. Typed getters return the caller's default when an
/// argument is absent and a [`DefError::ArgumentType`] when it exists
/// under a different type: absence is configuration, mismatch is a bug in
/// the graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillerDef {
    op_type: String,
    num_inputs: usize,
    args: HashMap<String, ArgValue>,
}

impl FillerDef {
    pub fn new(op_type: impl Into<String>) -> Self {
        FillerDef {
            op_type: op_type.into(),
            num_inputs: 0,
            args: HashMap::new(),
        }
    }

    pub fn with_inputs(mut self, num_inputs: usize) -> Self {
        self.num_inputs = num_inputs;
        self
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.args.insert(name.into(), value);
        self
    }

    pub fn op_type(&self) -> &str {
        &self.op_type
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn has_arg(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    pub fn arg(&self, name: &str) -> Option<&ArgValue> {
        self.args.get(name)
    }

    pub fn get_f32(&self, name: &str, default: f32) -> Result<f32, DefError> {
        match self.args.get(name) {
            None => Ok(default),
            Some(ArgValue::F32(v)) => Ok(*v),
            Some(other) => Err(mismatch(name, "f32", other)),
        }
    }

    pub fn get_i64(&self, name: &str, default: i64) -> Result<i64, DefError> {
        match self.args.get(name) {
            None => Ok(default),
            Some(ArgValue::I64(v)) => Ok(*v),
            Some(other) => Err(mismatch(name, "i64", other)),
        }
    }

    pub fn get_bool(&self, name: &str, default: bool) -> Result<bool, DefError> {
        match self.args.get(name) {
            None => Ok(default),
            Some(ArgValue::Bool(v)) => Ok(*v),
            Some(other) => Err(mismatch(name, "bool", other)),
        }
    }

    /// String arguments have no meaningful default; absence is `None`.
    pub fn get_str(&self, name: &str) -> Result<Option<&str>, DefError> {
        match self.args.get(name) {
            None => Ok(None),
            Some(ArgValue::Str(v)) => Ok(Some(v.as_str())),
            Some(other) => Err(mismatch(name, "string", other)),
        }
    }

    /// Repeated arguments default to empty.
    pub fn get_i64s(&self, name: &str) -> Result<Vec<i64>, DefError> {
        match self.args.get(name) {
            None => Ok(Vec::new()),
            Some(ArgValue::I64s(v)) => Ok(v.clone()),
            Some(other) => Err(mismatch(name, "repeated i64", other)),
        }
    }

    pub fn get_f32s(&self, name: &str) -> Result<Vec<f32>, DefError> {
        match self.args.get(name) {
            None => Ok(Vec::new()),
            Some(ArgValue::F32s(v)) => Ok(v.clone()),
            Some(other) => Err(mismatch(name, "repeated f32", other)),
        }
    }
}

fn mismatch(name: &str, expected: &'static str, actual: &ArgValue) -> DefError {
    DefError::ArgumentType {
        name: name.to_string(),
        expected,
        actual: actual.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_on_absent_args() {
        let def = FillerDef::new("UniformFill");
        assert_eq!(def.get_f32("min", 0.0).unwrap(), 0.0);
        assert_eq!(def.get_i64("value", 7).unwrap(), 7);
        assert!(!def.get_bool("input_as_shape", false).unwrap());
        assert_eq!(def.get_str("dtype").unwrap(), None);
        assert!(def.get_i64s("shape").unwrap().is_empty());
    }

    #[test]
    fn test_typed_lookup() {
        let def = FillerDef::new("ConstantFill")
            .with_arg("value", ArgValue::F32(3.5))
            .with_arg("dtype", ArgValue::Str("f32".to_string()))
            .with_arg("shape", ArgValue::I64s(vec![2, 3]));

        assert_eq!(def.get_f32("value", 0.0).unwrap(), 3.5);
        assert_eq!(def.get_str("dtype").unwrap(), Some("f32"));
        assert_eq!(def.get_i64s("shape").unwrap(), vec![2, 3]);
        assert!(def.has_arg("value"));
        assert!(!def.has_arg("extra_shape"));
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let def = FillerDef::new("ConstantFill").with_arg("value", ArgValue::Str("oops".into()));
        let err = def.get_f32("value", 0.0).unwrap_err();
        assert_eq!(
            err,
            DefError::ArgumentType {
                name: "value".to_string(),
                expected: "f32",
                actual: "string",
            }
        );
    }

    #[test]
    fn test_repeated_f32_lookup() {
        let def = FillerDef::new("X").with_arg("scales", ArgValue::F32s(vec![0.5, 2.0]));
        assert_eq!(def.get_f32s("scales").unwrap(), vec![0.5, 2.0]);
        assert!(def.get_i64s("scales").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let def = FillerDef::new("GaussianFill")
            .with_inputs(1)
            .with_arg("mean", ArgValue::F32(0.0))
            .with_arg("std", ArgValue::F32(2.0))
            .with_arg("extra_shape", ArgValue::I64s(vec![4]));

        let json = serde_json::to_string(&def).unwrap();
        let back: FillerDef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, def);
        assert_eq!(back.num_inputs(), 1);
        assert_eq!(back.op_type(), "GaussianFill");
    }
}
