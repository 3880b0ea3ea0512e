//! The runtime value sum.

use core::fmt;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;

use crate::values::convert::ConversionError;

/// A runtime value produced by evaluating an expression.
///
/// The nine representations mirror the typed evaluation entry points: four
/// numeric kinds of increasing width ([`Value::Long`], [`Value::BigInteger`],
/// [`Value::Double`], [`Value::BigDecimal`]), three temporal kinds, plus
/// booleans and text.
#[derive(Debug, Clone)]
pub enum Value {
    Boolean(bool),
    Long(i64),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
    Double(f64),
    Text(String),
    LocalDate(NaiveDate),
    LocalDateTime(NaiveDateTime),
    LocalTime(NaiveTime),
}

/// The discriminant of a [`Value`], used as the target of conversions and in
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Long,
    BigInteger,
    BigDecimal,
    Double,
    Text,
    LocalDate,
    LocalDateTime,
    LocalTime,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "Boolean",
            ValueKind::Long => "Long",
            ValueKind::BigInteger => "BigInteger",
            ValueKind::BigDecimal => "BigDecimal",
            ValueKind::Double => "Double",
            ValueKind::Text => "Text",
            ValueKind::LocalDate => "LocalDate",
            ValueKind::LocalDateTime => "LocalDateTime",
            ValueKind::LocalTime => "LocalTime",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Long(_) => ValueKind::Long,
            Value::BigInteger(_) => ValueKind::BigInteger,
            Value::BigDecimal(_) => ValueKind::BigDecimal,
            Value::Double(_) => ValueKind::Double,
            Value::Text(_) => ValueKind::Text,
            Value::LocalDate(_) => ValueKind::LocalDate,
            Value::LocalDateTime(_) => ValueKind::LocalDateTime,
            Value::LocalTime(_) => ValueKind::LocalTime,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_big_integer(&self) -> Option<&BigInt> {
        match self {
            Value::BigInteger(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_big_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Value::BigDecimal(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_local_date(&self) -> Option<NaiveDate> {
        match self {
            Value::LocalDate(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_local_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::LocalDateTime(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_local_time(&self) -> Option<NaiveTime> {
        match self {
            Value::LocalTime(t) => Some(*t),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    /// Kind-first equality: two values of different kinds are never equal,
    /// even when numerically equivalent. `Double` payloads follow standard
    /// float equality (`NaN != NaN`).
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::BigInteger(a), Value::BigInteger(b)) => a == b,
            (Value::BigDecimal(a), Value::BigDecimal(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::LocalDate(a), Value::LocalDate(b)) => a == b,
            (Value::LocalDateTime(a), Value::LocalDateTime(b)) => a == b,
            (Value::LocalTime(a), Value::LocalTime(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Literal-ish rendering used in error texts and expression rendering.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Long(l) => write!(f, "{}", l),
            Value::BigInteger(i) => write!(f, "{}", i),
            Value::BigDecimal(d) => write!(f, "{}", d),
            Value::Double(d) => write!(f, "{}", d),
            Value::Text(t) => write!(f, "{:?}", t),
            Value::LocalDate(d) => write!(f, "{}", d),
            Value::LocalDateTime(d) => write!(f, "{}", d),
            Value::LocalTime(t) => write!(f, "{}", t),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::BigInteger(v)
    }
}

impl From<BigDecimal> for Value {
    fn from(v: BigDecimal) -> Self {
        Value::BigDecimal(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::LocalDate(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::LocalDateTime(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::LocalTime(v)
    }
}

// Payload extraction for the typed evaluation entry points. Each impl fails
// with the kind mismatch so `to_x` accessors never panic on a converter that
// ignored its target.

macro_rules! try_from_value {
    ($payload:ty, $variant:ident, $kind:ident) => {
        impl TryFrom<Value> for $payload {
            type Error = ConversionError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(ConversionError::wrong_kind(&other, ValueKind::$kind)),
                }
            }
        }
    };
}

try_from_value!(bool, Boolean, Boolean);
try_from_value!(i64, Long, Long);
try_from_value!(BigInt, BigInteger, BigInteger);
try_from_value!(BigDecimal, BigDecimal, BigDecimal);
try_from_value!(f64, Double, Double);
try_from_value!(String, Text, Text);
try_from_value!(NaiveDate, LocalDate, LocalDate);
try_from_value!(NaiveDateTime, LocalDateTime, LocalDateTime);
try_from_value!(NaiveTime, LocalTime, LocalTime);
