//! Typed block payloads and the scalar text codec

use crate::ado::block::BlockKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type of an array, as declared by the array header letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// `I`: integers
    Int,
    /// `E`: floating point numbers in scientific notation
    Float,
    /// `A`: fixed-width text
    Text,
}

impl ElementKind {
    /// Map an array header type letter to an element kind
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'I' => Some(Self::Int),
            'E' => Some(Self::Float),
            'A' => Some(Self::Text),
            _ => None,
        }
    }

    /// Type letter used in array headers
    pub const fn code(self) -> char {
        match self {
            Self::Int => 'I',
            Self::Float => 'E',
            Self::Text => 'A',
        }
    }

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single value stored in a scalar block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
}

impl Scalar {
    /// Decode a scalar value line
    ///
    /// The trimmed line is read as an integer if possible, otherwise as a
    /// float, otherwise kept as text. Decoding never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use adoflo_formats::ado::Scalar;
    ///
    /// assert_eq!(Scalar::decode("007"), Scalar::Int(7));
    /// assert_eq!(Scalar::decode(" 7.5"), Scalar::Float(7.5));
    /// assert_eq!(Scalar::decode("abc "), Scalar::Text("abc".to_string()));
    /// ```
    pub fn decode(line: &str) -> Self {
        let trimmed = line.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self::Int(value);
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            return Self::Float(value);
        }
        Self::Text(trimmed.to_string())
    }

    /// Encode the value as a scalar value line
    ///
    /// Floats use a fixed-point field 9 characters wide with 6 fractional
    /// digits.
    pub fn encode(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Float(value) => format!("{value:9.6}"),
            Self::Text(value) => value.clone(),
        }
    }

    /// Element kind of this value
    pub const fn element_kind(&self) -> ElementKind {
        match self {
            Self::Int(_) => ElementKind::Int,
            Self::Float(_) => ElementKind::Float,
            Self::Text(_) => ElementKind::Text,
        }
    }

    /// Numeric value as a float, converting integers
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Integer value, if this is an integer
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Text value, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Homogeneous values stored in an array block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrayValues {
    /// Integer elements
    Int(Vec<i64>),
    /// Floating point elements
    Float(Vec<f64>),
    /// Text elements
    Text(Vec<String>),
}

impl ArrayValues {
    /// Empty array of the given kind with room for `capacity` elements
    pub fn with_capacity(kind: ElementKind, capacity: usize) -> Self {
        match kind {
            ElementKind::Int => Self::Int(Vec::with_capacity(capacity)),
            ElementKind::Float => Self::Float(Vec::with_capacity(capacity)),
            ElementKind::Text => Self::Text(Vec::with_capacity(capacity)),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            Self::Int(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    /// Check if the array has no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element kind of this array
    pub const fn element_kind(&self) -> ElementKind {
        match self {
            Self::Int(_) => ElementKind::Int,
            Self::Float(_) => ElementKind::Float,
            Self::Text(_) => ElementKind::Text,
        }
    }

    /// Integer elements, if this is an integer array
    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Self::Int(values) => Some(values),
            _ => None,
        }
    }

    /// Float elements, if this is a float array
    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Self::Float(values) => Some(values),
            _ => None,
        }
    }

    /// Text elements, if this is a text array
    pub fn as_texts(&self) -> Option<&[String]> {
        match self {
            Self::Text(values) => Some(values),
            _ => None,
        }
    }

    /// Numeric elements as floats, converting integers
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        match self {
            Self::Int(values) => Some(values.iter().map(|&v| v as f64).collect()),
            Self::Float(values) => Some(values.clone()),
            Self::Text(_) => None,
        }
    }
}

impl From<Vec<i64>> for ArrayValues {
    fn from(values: Vec<i64>) -> Self {
        Self::Int(values)
    }
}

impl From<Vec<f64>> for ArrayValues {
    fn from(values: Vec<f64>) -> Self {
        Self::Float(values)
    }
}

impl From<Vec<String>> for ArrayValues {
    fn from(values: Vec<String>) -> Self {
        Self::Text(values)
    }
}

/// Payload of a block: either one scalar or one array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockValue {
    /// Single value (block kind 1)
    Scalar(Scalar),
    /// Array of values (block kind 2)
    Array(ArrayValues),
}

impl BlockValue {
    /// Block kind implied by the payload shape
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::Scalar(_) => BlockKind::Scalar,
            Self::Array(_) => BlockKind::Array,
        }
    }

    /// Element kind of the payload
    pub const fn element_kind(&self) -> ElementKind {
        match self {
            Self::Scalar(value) => value.element_kind(),
            Self::Array(values) => values.element_kind(),
        }
    }

    /// Check if the payload is textual (selects `*TEXT*`/`ENDTEXT` markers)
    pub const fn is_text(&self) -> bool {
        matches!(self.element_kind(), ElementKind::Text)
    }

    /// Number of values: 1 for scalars, element count for arrays
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Array(values) => values.len(),
        }
    }

    /// Check if the payload holds no values
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scalar payload, if any
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Array(_) => None,
        }
    }

    /// Array payload, if any
    pub const fn as_array(&self) -> Option<&ArrayValues> {
        match self {
            Self::Array(values) => Some(values),
            Self::Scalar(_) => None,
        }
    }
}

impl From<Scalar> for BlockValue {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<ArrayValues> for BlockValue {
    fn from(values: ArrayValues) -> Self {
        Self::Array(values)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_inference_order() {
        assert_eq!(Scalar::decode("7"), Scalar::Int(7));
        assert_eq!(Scalar::decode("007"), Scalar::Int(7));
        assert_eq!(Scalar::decode("-12"), Scalar::Int(-12));
        assert_eq!(Scalar::decode("7.5"), Scalar::Float(7.5));
        assert_eq!(Scalar::decode("1.0E+03"), Scalar::Float(1000.0));
        assert_eq!(Scalar::decode("abc"), Scalar::Text("abc".to_string()));
        assert_eq!(Scalar::decode("  padded  "), Scalar::Text("padded".to_string()));
        assert_eq!(Scalar::decode(""), Scalar::Text(String::new()));
    }

    #[test]
    fn test_scalar_encode() {
        assert_eq!(Scalar::Float(1.5).encode(), " 1.500000");
        assert_eq!(Scalar::Float(-12.25).encode(), "-12.250000");
        assert_eq!(Scalar::Int(42).encode(), "42");
        assert_eq!(Scalar::Text("GRID 1".to_string()).encode(), "GRID 1");
    }

    #[test]
    fn test_scalar_round_trip() {
        for value in [Scalar::Int(-3), Scalar::Float(0.125), Scalar::from("name")] {
            assert_eq!(Scalar::decode(&value.encode()), value);
        }
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(Scalar::Int(4).as_f64(), Some(4.0));
        assert_eq!(Scalar::Int(4).as_i64(), Some(4));
        assert_eq!(Scalar::Float(4.5).as_i64(), None);
        assert_eq!(Scalar::from("x").as_text(), Some("x"));
        assert_eq!(Scalar::from("x").as_f64(), None);
    }

    #[test]
    fn test_element_kind_codes() {
        assert_eq!(ElementKind::from_code('I'), Some(ElementKind::Int));
        assert_eq!(ElementKind::from_code('E'), Some(ElementKind::Float));
        assert_eq!(ElementKind::from_code('A'), Some(ElementKind::Text));
        assert_eq!(ElementKind::from_code('F'), None);
        assert_eq!(ElementKind::Float.code(), 'E');
    }

    #[test]
    fn test_block_value_shape() {
        let scalar = BlockValue::from(Scalar::Int(1));
        assert_eq!(scalar.kind(), BlockKind::Scalar);
        assert_eq!(scalar.len(), 1);
        assert!(scalar.as_array().is_none());

        let array = BlockValue::from(ArrayValues::from(vec!["a".to_string()]));
        assert_eq!(array.kind(), BlockKind::Array);
        assert!(array.is_text());
        assert_eq!(array.as_array().map(ArrayValues::len), Some(1));
    }

    #[test]
    fn test_array_to_f64() {
        let ints = ArrayValues::from(vec![1, 2, 3]);
        assert_eq!(ints.to_f64_vec(), Some(vec![1.0, 2.0, 3.0]));
        let texts = ArrayValues::from(vec!["a".to_string()]);
        assert_eq!(texts.to_f64_vec(), None);
    }
}
