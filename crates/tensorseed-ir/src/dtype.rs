//! Element type tags for dense tensors.

use serde::{Deserialize, Serialize};

/// Element type of a tensor's data buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    /// Carried by definitions that declare no usable type; rejected by
    /// every operator that needs a concrete element type.
    Undefined,
    F32,
    F64,
    I32,
    I64,
    Bool,
}

impl DType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Undefined => "undefined",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::Bool => "bool",
        }
    }

    /// Parse a type tag as it appears in operator definitions.
    pub fn parse(tag: &str) -> Option<DType> {
        match tag {
            "undefined" => Some(DType::Undefined),
            "f32" | "float" => Some(DType::F32),
            "f64" | "double" => Some(DType::F64),
            "i32" | "int32" => Some(DType::I32),
            "i64" | "int64" => Some(DType::I64),
            "bool" => Some(DType::Bool),
            _ => None,
        }
    }

    pub fn byte_size(&self) -> usize {
        match self {
            DType::F32 | DType::I32 => 4,
            DType::F64 | DType::I64 => 8,
            DType::Bool => 1,
            DType::Undefined => 0,
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_tags() {
        assert_eq!(DType::parse("f32"), Some(DType::F32));
        assert_eq!(DType::parse("i64"), Some(DType::I64));
        assert_eq!(DType::parse("bool"), Some(DType::Bool));
        assert_eq!(DType::parse("undefined"), Some(DType::Undefined));
        assert_eq!(DType::parse("complex64"), None);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(DType::parse("float"), Some(DType::F32));
        assert_eq!(DType::parse("int64"), Some(DType::I64));
    }

    #[test]
    fn test_as_str_round_trip() {
        for dtype in [
            DType::Undefined,
            DType::F32,
            DType::F64,
            DType::I32,
            DType::I64,
            DType::Bool,
        ] {
            assert_eq!(DType::parse(dtype.as_str()), Some(dtype));
        }
    }

    #[test]
    fn test_byte_size() {
        assert_eq!(DType::F32.byte_size(), 4);
        assert_eq!(DType::I64.byte_size(), 8);
        assert_eq!(DType::Bool.byte_size(), 1);
        assert_eq!(DType::Undefined.byte_size(), 0);
    }
}
