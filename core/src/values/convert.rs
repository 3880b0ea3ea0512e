//! The fallible value-conversion contract.
//!
//! Every typed evaluation entry point and both promotion ladders funnel
//! through [`Converter::convert`]. A converter either produces a value of
//! the requested kind or reports why it cannot; it never panics and never
//! approximates silently where exactness is expected.

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use thiserror::Error;

use crate::context::decimal::DecimalNumberContext;
use crate::values::{Value, ValueKind};

/// A conversion that could not be performed.
///
/// Carries a rendering of the offending value, the requested target kind and
/// a human readable reason.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert {value} to {target}: {reason}")]
pub struct ConversionError {
    pub value: String,
    pub target: ValueKind,
    pub reason: String,
}

impl ConversionError {
    pub fn new(value: &Value, target: ValueKind, reason: impl Into<String>) -> Self {
        ConversionError {
            value: value.to_string(),
            target,
            reason: reason.into(),
        }
    }

    pub(crate) fn wrong_kind(value: &Value, target: ValueKind) -> Self {
        ConversionError::new(value, target, format!("value is a {}", value.kind()))
    }
}

/// Converts an arbitrary runtime value to a requested target representation,
/// fallibly.
///
/// The decimal-format facts are supplied by the evaluation context so that
/// text↔number conversions honour the caller's locale conventions.
pub trait Converter {
    fn convert(
        &self,
        value: &Value,
        target: ValueKind,
        decimal: &DecimalNumberContext,
    ) -> Result<Value, ConversionError>;
}

/// The default converter.
///
/// Covers numeric widening, exactness-checked narrowing, text↔number using
/// the decimal-format facts, ISO-8601 text↔temporal, boolean↔number and the
/// date/datetime/time projections. Anything else is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicConverter;

impl Converter for BasicConverter {
    fn convert(
        &self,
        value: &Value,
        target: ValueKind,
        decimal: &DecimalNumberContext,
    ) -> Result<Value, ConversionError> {
        if value.kind() == target {
            return Ok(value.clone());
        }
        match target {
            ValueKind::Boolean => self.to_boolean(value),
            ValueKind::Long => self.to_long(value, decimal),
            ValueKind::BigInteger => self.to_big_integer(value, decimal),
            ValueKind::BigDecimal => self.to_big_decimal(value, decimal),
            ValueKind::Double => self.to_double(value, decimal),
            ValueKind::Text => Ok(Value::Text(render_plain(value))),
            ValueKind::LocalDate => self.to_local_date(value, decimal),
            ValueKind::LocalDateTime => self.to_local_date_time(value, decimal),
            ValueKind::LocalTime => self.to_local_time(value, decimal),
        }
    }
}

/// Renders a value as unquoted text, the way a text conversion (rather than
/// a diagnostic) wants it.
fn render_plain(value: &Value) -> String {
    match value {
        Value::Text(t) => t.clone(),
        other => other.to_string(),
    }
}

/// Days between 0001-01-01 (day 1 of the common era) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

impl BasicConverter {
    fn to_boolean(&self, value: &Value) -> Result<Value, ConversionError> {
        use num_traits::Zero;

        let target = ValueKind::Boolean;
        match value {
            Value::Long(l) => Ok(Value::Boolean(*l != 0)),
            Value::BigInteger(i) => Ok(Value::Boolean(!i.is_zero())),
            Value::BigDecimal(d) => Ok(Value::Boolean(!d.is_zero())),
            Value::Double(d) => Ok(Value::Boolean(*d != 0.0)),
            Value::Text(t) => match t.as_str() {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                _ => Err(ConversionError::new(value, target, "not a boolean literal")),
            },
            _ => Err(ConversionError::wrong_kind(value, target)),
        }
    }

    fn to_long(
        &self,
        value: &Value,
        decimal: &DecimalNumberContext,
    ) -> Result<Value, ConversionError> {
        self.long_of(value, decimal).map(Value::Long)
    }

    fn long_of(
        &self,
        value: &Value,
        decimal: &DecimalNumberContext,
    ) -> Result<i64, ConversionError> {
        let target = ValueKind::Long;
        match value {
            Value::Boolean(b) => Ok(i64::from(*b)),
            Value::Long(l) => Ok(*l),
            Value::BigInteger(i) => i
                .to_i64()
                .ok_or_else(|| ConversionError::new(value, target, "out of range")),
            Value::BigDecimal(d) => {
                if !d.is_integer() {
                    return Err(ConversionError::new(value, target, "not an integer"));
                }
                d.to_i64()
                    .ok_or_else(|| ConversionError::new(value, target, "out of range"))
            }
            Value::Double(d) => double_to_long(*d)
                .ok_or_else(|| ConversionError::new(value, target, "not exactly a long")),
            Value::Text(t) => decimal
                .normalize_number(t)
                .parse::<i64>()
                .map_err(|e| ConversionError::new(value, target, e.to_string())),
            // Temporal values become their epoch offsets: days for dates,
            // seconds for date-times, seconds-of-day for times.
            Value::LocalDate(d) => {
                Ok(i64::from(d.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE)
            }
            Value::LocalDateTime(dt) => Ok(dt.and_utc().timestamp()),
            Value::LocalTime(t) => Ok(i64::from(t.num_seconds_from_midnight())),
        }
    }

    fn to_big_integer(
        &self,
        value: &Value,
        decimal: &DecimalNumberContext,
    ) -> Result<Value, ConversionError> {
        let target = ValueKind::BigInteger;
        match value {
            Value::Boolean(b) => Ok(Value::BigInteger(BigInt::from(i64::from(*b)))),
            Value::Long(l) => Ok(Value::BigInteger(BigInt::from(*l))),
            Value::BigDecimal(d) => {
                if !d.is_integer() {
                    return Err(ConversionError::new(value, target, "not an integer"));
                }
                let (digits, _) = d.with_scale(0).into_bigint_and_exponent();
                Ok(Value::BigInteger(digits))
            }
            Value::Double(d) => {
                if !d.is_finite() || d.fract() != 0.0 {
                    return Err(ConversionError::new(value, target, "not an integer"));
                }
                BigInt::from_f64(*d)
                    .map(Value::BigInteger)
                    .ok_or_else(|| ConversionError::new(value, target, "not representable"))
            }
            Value::Text(t) => decimal
                .normalize_number(t)
                .parse::<BigInt>()
                .map(Value::BigInteger)
                .map_err(|e| ConversionError::new(value, target, e.to_string())),
            Value::LocalDate(_) | Value::LocalDateTime(_) | Value::LocalTime(_) => self
                .long_of(value, decimal)
                .map(|l| Value::BigInteger(BigInt::from(l))),
            _ => Err(ConversionError::wrong_kind(value, target)),
        }
    }

    fn to_big_decimal(
        &self,
        value: &Value,
        decimal: &DecimalNumberContext,
    ) -> Result<Value, ConversionError> {
        let target = ValueKind::BigDecimal;
        match value {
            Value::Boolean(b) => Ok(Value::BigDecimal(BigDecimal::from(i64::from(*b)))),
            Value::Long(l) => Ok(Value::BigDecimal(BigDecimal::from(*l))),
            Value::BigInteger(i) => Ok(Value::BigDecimal(BigDecimal::from(i.clone()))),
            Value::Double(d) => BigDecimal::from_f64(*d)
                .map(Value::BigDecimal)
                .ok_or_else(|| ConversionError::new(value, target, "not finite")),
            Value::Text(t) => decimal
                .normalize_number(t)
                .parse::<BigDecimal>()
                .map(Value::BigDecimal)
                .map_err(|e| ConversionError::new(value, target, e.to_string())),
            Value::LocalDate(_) | Value::LocalDateTime(_) | Value::LocalTime(_) => self
                .long_of(value, decimal)
                .map(|l| Value::BigDecimal(BigDecimal::from(l))),
            _ => Err(ConversionError::wrong_kind(value, target)),
        }
    }

    fn to_double(
        &self,
        value: &Value,
        decimal: &DecimalNumberContext,
    ) -> Result<Value, ConversionError> {
        let target = ValueKind::Double;
        match value {
            Value::Boolean(b) => Ok(Value::Double(f64::from(u8::from(*b)))),
            Value::Long(l) => Ok(Value::Double(*l as f64)),
            Value::BigInteger(i) => i
                .to_f64()
                .filter(|d| d.is_finite())
                .map(Value::Double)
                .ok_or_else(|| ConversionError::new(value, target, "out of range")),
            Value::BigDecimal(d) => d
                .to_f64()
                .filter(|d| d.is_finite())
                .map(Value::Double)
                .ok_or_else(|| ConversionError::new(value, target, "out of range")),
            Value::Text(t) => decimal
                .normalize_number(t)
                .parse::<f64>()
                .map(Value::Double)
                .map_err(|e| ConversionError::new(value, target, e.to_string())),
            Value::LocalDate(_) | Value::LocalDateTime(_) | Value::LocalTime(_) => self
                .long_of(value, decimal)
                .map(|l| Value::Double(l as f64)),
            _ => Err(ConversionError::wrong_kind(value, target)),
        }
    }

    fn to_local_date(
        &self,
        value: &Value,
        decimal: &DecimalNumberContext,
    ) -> Result<Value, ConversionError> {
        let target = ValueKind::LocalDate;
        match value {
            Value::LocalDateTime(dt) => Ok(Value::LocalDate(dt.date())),
            Value::Text(t) => NaiveDate::parse_from_str(t, "%Y-%m-%d")
                .map(Value::LocalDate)
                .map_err(|e| ConversionError::new(value, target, e.to_string())),
            Value::Long(_) | Value::BigInteger(_) | Value::BigDecimal(_) | Value::Double(_) => {
                let days = self.long_of(value, decimal)?;
                let from_ce = days
                    .checked_add(UNIX_EPOCH_DAYS_FROM_CE)
                    .and_then(|d| i32::try_from(d).ok());
                from_ce
                    .and_then(NaiveDate::from_num_days_from_ce_opt)
                    .map(Value::LocalDate)
                    .ok_or_else(|| ConversionError::new(value, target, "out of range"))
            }
            _ => Err(ConversionError::wrong_kind(value, target)),
        }
    }

    fn to_local_date_time(
        &self,
        value: &Value,
        decimal: &DecimalNumberContext,
    ) -> Result<Value, ConversionError> {
        let target = ValueKind::LocalDateTime;
        match value {
            Value::LocalDate(d) => Ok(Value::LocalDateTime(d.and_time(NaiveTime::MIN))),
            Value::Text(t) => NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(t, "%Y-%m-%d %H:%M:%S%.f"))
                .map(Value::LocalDateTime)
                .map_err(|e| ConversionError::new(value, target, e.to_string())),
            Value::Long(_) | Value::BigInteger(_) | Value::BigDecimal(_) | Value::Double(_) => {
                let seconds = self.long_of(value, decimal)?;
                chrono::DateTime::from_timestamp(seconds, 0)
                    .map(|dt| Value::LocalDateTime(dt.naive_utc()))
                    .ok_or_else(|| ConversionError::new(value, target, "out of range"))
            }
            _ => Err(ConversionError::wrong_kind(value, target)),
        }
    }

    fn to_local_time(
        &self,
        value: &Value,
        decimal: &DecimalNumberContext,
    ) -> Result<Value, ConversionError> {
        let target = ValueKind::LocalTime;
        match value {
            Value::LocalDateTime(dt) => Ok(Value::LocalTime(dt.time())),
            Value::Text(t) => NaiveTime::parse_from_str(t, "%H:%M:%S%.f")
                .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
                .map(Value::LocalTime)
                .map_err(|e| ConversionError::new(value, target, e.to_string())),
            Value::Long(_) | Value::BigInteger(_) | Value::BigDecimal(_) | Value::Double(_) => {
                let seconds = self.long_of(value, decimal)?;
                u32::try_from(seconds)
                    .ok()
                    .and_then(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, 0))
                    .map(Value::LocalTime)
                    .ok_or_else(|| ConversionError::new(value, target, "out of range"))
            }
            _ => Err(ConversionError::wrong_kind(value, target)),
        }
    }
}

/// Exact `f64` → `i64`, `None` when the double is non-finite, fractional or
/// out of range.
pub(crate) fn double_to_long(d: f64) -> Option<i64> {
    if !d.is_finite() || d.fract() != 0.0 {
        return None;
    }
    // i64::MAX is not exactly representable as f64; round-trip to reject the
    // boundary cases the cast would silently saturate.
    let candidate = d as i64;
    (candidate as f64 == d).then_some(candidate)
}

