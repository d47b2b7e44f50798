//! Property values and the coercion rules between writes, values and attributes.
//!
//! Coercion is total: every input maps to a value of the declared type, with
//! malformed input landing on the type's "empty" value (`false`, `0`, `""`).

use std::fmt;

/// The declared type of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    Number,
    String,
}

/// A loosely typed value handed to a property write.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Absent / null input.
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Number(f64::from(v))
    }
}

impl From<u32> for RawValue {
    fn from(v: u32) -> Self {
        RawValue::Number(f64::from(v))
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Str(v.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Str(v)
    }
}

impl From<PropValue> for RawValue {
    fn from(v: PropValue) -> Self {
        match v {
            PropValue::Bool(b) => RawValue::Bool(b),
            PropValue::Number(n) => RawValue::Number(n),
            PropValue::Str(s) => RawValue::Str(s),
        }
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Null, Into::into)
    }
}

/// A property value, always of its property's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Bool(bool),
    Number(f64),
    Str(String),
}

impl PropValue {
    /// The declared type this value belongs to.
    pub fn value_type(&self) -> ValueType {
        match self {
            PropValue::Bool(_) => ValueType::Boolean,
            PropValue::Number(_) => ValueType::Number,
            PropValue::Str(_) => ValueType::String,
        }
    }

    /// The Boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(b) => write!(f, "{b}"),
            PropValue::Number(n) => write!(f, "{n}"),
            PropValue::Str(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Coerce a written value to `ty`.
///
/// - Boolean: truthiness (`0`, NaN, `""` and null are false).
/// - Number: numeric cast; unparseable strings, NaN and null become `0`.
/// - String: the value's text; null becomes `""`.
pub fn coerce(ty: ValueType, raw: &RawValue) -> PropValue {
    match ty {
        ValueType::Boolean => PropValue::Bool(match raw {
            RawValue::Null => false,
            RawValue::Bool(b) => *b,
            RawValue::Number(n) => *n != 0.0 && !n.is_nan(),
            RawValue::Str(s) => !s.is_empty(),
        }),
        ValueType::Number => PropValue::Number(match raw {
            RawValue::Null => 0.0,
            RawValue::Bool(b) => f64::from(u8::from(*b)),
            RawValue::Number(n) if n.is_nan() => 0.0,
            RawValue::Number(n) => *n,
            RawValue::Str(s) => parse_number(s),
        }),
        ValueType::String => PropValue::Str(match raw {
            RawValue::Null => String::new(),
            RawValue::Bool(b) => b.to_string(),
            RawValue::Number(n) => n.to_string(),
            RawValue::Str(s) => s.clone(),
        }),
    }
}

/// Decode an attribute into a value of `ty` (inverse of [`to_attribute`]).
///
/// Boolean attributes are true when present, except for the literal `"false"`.
pub fn from_attribute(ty: ValueType, attribute: Option<&str>) -> PropValue {
    match ty {
        ValueType::Boolean => PropValue::Bool(matches!(attribute, Some(v) if v != "false")),
        ValueType::Number => PropValue::Number(attribute.map_or(0.0, parse_number)),
        ValueType::String => PropValue::Str(attribute.unwrap_or_default().to_owned()),
    }
}

/// Encode a value as an attribute. `None` means the attribute is removed.
pub fn to_attribute(value: &PropValue) -> Option<String> {
    match value {
        PropValue::Bool(true) => Some(String::new()),
        PropValue::Bool(false) => None,
        PropValue::Number(n) => Some(n.to_string()),
        PropValue::Str(s) if s.is_empty() => None,
        PropValue::Str(s) => Some(s.clone()),
    }
}

fn parse_number(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(n) if !n.is_nan() => n,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_truthiness() {
        let b = |raw: RawValue| coerce(ValueType::Boolean, &raw);
        assert_eq!(b(RawValue::Null), PropValue::Bool(false));
        assert_eq!(b(true.into()), PropValue::Bool(true));
        assert_eq!(b(0.into()), PropValue::Bool(false));
        assert_eq!(b(f64::NAN.into()), PropValue::Bool(false));
        assert_eq!(b(2.5.into()), PropValue::Bool(true));
        assert_eq!(b("".into()), PropValue::Bool(false));
        assert_eq!(b("false".into()), PropValue::Bool(true));
    }

    #[test]
    fn number_cast() {
        let n = |raw: RawValue| coerce(ValueType::Number, &raw);
        assert_eq!(n(RawValue::Null), PropValue::Number(0.0));
        assert_eq!(n(true.into()), PropValue::Number(1.0));
        assert_eq!(n(" 42 ".into()), PropValue::Number(42.0));
        assert_eq!(n("1.5".into()), PropValue::Number(1.5));
        assert_eq!(n("abc".into()), PropValue::Number(0.0));
        assert_eq!(n("NaN".into()), PropValue::Number(0.0));
        assert_eq!(n(f64::NAN.into()), PropValue::Number(0.0));
    }

    #[test]
    fn string_cast() {
        let s = |raw: RawValue| coerce(ValueType::String, &raw);
        assert_eq!(s(RawValue::Null), PropValue::Str(String::new()));
        assert_eq!(s(Option::<&str>::None.into()), PropValue::Str(String::new()));
        assert_eq!(s(false.into()), PropValue::Str("false".into()));
        assert_eq!(s(3.into()), PropValue::Str("3".into()));
        assert_eq!(s(0.25.into()), PropValue::Str("0.25".into()));
        assert_eq!(s("hi".into()), PropValue::Str("hi".into()));
    }

    #[test]
    fn attribute_decoding() {
        assert_eq!(from_attribute(ValueType::Boolean, Some("")), PropValue::Bool(true));
        assert_eq!(from_attribute(ValueType::Boolean, Some("false")), PropValue::Bool(false));
        assert_eq!(from_attribute(ValueType::Boolean, None), PropValue::Bool(false));
        assert_eq!(from_attribute(ValueType::Number, Some("7")), PropValue::Number(7.0));
        assert_eq!(from_attribute(ValueType::Number, Some("x7")), PropValue::Number(0.0));
        assert_eq!(from_attribute(ValueType::Number, None), PropValue::Number(0.0));
        assert_eq!(from_attribute(ValueType::String, None), PropValue::Str(String::new()));
    }

    #[test]
    fn attribute_encoding() {
        assert_eq!(to_attribute(&PropValue::Bool(true)).as_deref(), Some(""));
        assert_eq!(to_attribute(&PropValue::Bool(false)), None);
        assert_eq!(to_attribute(&PropValue::Number(0.0)).as_deref(), Some("0"));
        assert_eq!(to_attribute(&PropValue::Number(-1.5)).as_deref(), Some("-1.5"));
        assert_eq!(to_attribute(&PropValue::Str(String::new())), None);
    }

    #[test]
    fn encode_then_decode_preserves_value() {
        let values = [
            PropValue::Bool(true),
            PropValue::Bool(false),
            PropValue::Number(1e21),
            PropValue::Number(-0.125),
            PropValue::Str("x-large".into()),
            PropValue::Str(String::new()),
        ];
        for value in values {
            let attr = to_attribute(&value);
            assert_eq!(from_attribute(value.value_type(), attr.as_deref()), value);
        }
    }

    #[test]
    fn accessors() {
        assert_eq!(PropValue::Bool(true).as_bool(), Some(true));
        assert_eq!(PropValue::Bool(true).as_str(), None);
        assert_eq!(PropValue::Number(2.0).as_number(), Some(2.0));
        assert_eq!(PropValue::Str("a".into()).as_str(), Some("a"));
        assert_eq!(PropValue::Number(2.0).to_string(), "2");
    }
}
