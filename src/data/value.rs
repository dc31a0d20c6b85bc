use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Represents the possible values a card field can take.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    #[default]
    Nil,
}

impl Value {
    /// Reads the value as an integer, falling back to 0 for anything that is not one.
    ///
    /// Floats are truncated and strings are trimmed before parsing.
    pub fn to_int_or_zero(&self) -> i64 {
        match self {
            Self::Int(v) => *v,
            Self::Float(v) if v.is_finite() => v.trunc() as i64,
            Self::Str(v) => v.trim().parse::<i64>().unwrap_or(0),
            _ => 0,
        }
    }

    /// Whether the value carries nothing worth displaying.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Nil => true,
            Self::Str(v) => v.trim().is_empty(),
            _ => false,
        }
    }
}

macro_rules! value_from {
    ($($V:ty)+ => $Variant:ident($T:ty)) => {
        $(
            impl From<$V> for Value {
                fn from(value: $V) -> Self {
                    Self::$Variant(value as $T)
                }
            }
        )*
    };
}

value_from!(i64 i32 i16 i8 u32 u16 u8 => Int(i64));
value_from!(f64 f32 => Float(f64));
value_from!(bool => Bool(bool));

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

struct ValueVisitor;

macro_rules! visit {
    ($fn:ident $S:ty => $Variant:ident($T:ty)) => {
        fn $fn<E: de::Error>(self, v: $S) -> std::result::Result<Self::Value, E> {
            Ok(Value::$Variant(v as $T))
        }
    };
    ($fn:ident $S:ty => $Variant:ident) => {
        fn $fn<E: de::Error>(self, v: $S) -> std::result::Result<Self::Value, E> {
            Ok(Value::$Variant(v))
        }
    };
}

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, int, float, bool or none")
    }

    visit!(visit_i64 i64 => Int);
    visit!(visit_i32 i32 => Int(i64));
    visit!(visit_u32 u32 => Int(i64));

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Ok(i64::try_from(v).map(Value::Int).unwrap_or(Value::Float(v as f64)))
    }

    visit!(visit_f64 f64 => Float);
    visit!(visit_bool bool => Bool);

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(Value::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(Value::Nil)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(Value::Nil)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Self::Value, D::Error> {
        d.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Nil => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::Nil => write!(f, ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_parsing_is_lenient() {
        assert_eq!(Value::Int(70).to_int_or_zero(), 70);
        assert_eq!(Value::from(" 120 ").to_int_or_zero(), 120);
        assert_eq!(Value::Float(90.7).to_int_or_zero(), 90);
        assert_eq!(Value::from("N/A").to_int_or_zero(), 0);
        assert_eq!(Value::from("").to_int_or_zero(), 0);
        assert_eq!(Value::Nil.to_int_or_zero(), 0);
        assert_eq!(Value::Bool(true).to_int_or_zero(), 0);
    }

    #[test]
    fn deserializes_numbers_strings_and_null() {
        let values: Vec<Value> = serde_json::from_str(r#"[60, "70", null, 1.5, false]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Int(60),
                Value::from("70"),
                Value::Nil,
                Value::Float(1.5),
                Value::Bool(false),
            ]
        );
    }

    #[test]
    fn blank_values() {
        assert!(Value::Nil.is_blank());
        assert!(Value::from("  ").is_blank());
        assert!(!Value::Int(0).is_blank());
        assert!(!Value::from("N/A").is_blank());
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(Some(String::from("Fire"))), Value::from("Fire"));
        assert_eq!(Value::from(None::<String>), Value::Nil);
    }
}
