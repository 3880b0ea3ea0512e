//! Tests for the runtime value sum.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

use super::{ConversionError, Value, ValueKind};

#[test]
fn kind_reports_the_variant() {
    assert_eq!(Value::Long(1).kind(), ValueKind::Long);
    assert_eq!(Value::Double(1.0).kind(), ValueKind::Double);
    assert_eq!(Value::Text("x".into()).kind(), ValueKind::Text);
    assert_eq!(
        Value::BigInteger(BigInt::from(1)).kind(),
        ValueKind::BigInteger
    );
}

#[test]
fn equality_is_kind_first() {
    // Numerically equivalent values of different kinds are not equal.
    assert_ne!(Value::Long(1), Value::Double(1.0));
    assert_ne!(Value::Long(1), Value::BigInteger(BigInt::from(1)));
    assert_eq!(Value::Long(1), Value::Long(1));
}

#[test]
fn double_equality_follows_floats() {
    assert_ne!(Value::Double(f64::NAN), Value::Double(f64::NAN));
    assert_eq!(Value::Double(0.0), Value::Double(-0.0));
}

#[test]
fn big_decimal_equality_ignores_scale() {
    let two = "2.0".parse::<BigDecimal>().unwrap();
    let two_more_zeros = "2.000".parse::<BigDecimal>().unwrap();
    assert_eq!(Value::BigDecimal(two), Value::BigDecimal(two_more_zeros));
}

#[test]
fn display_renders_literals() {
    assert_eq!(Value::Long(42).to_string(), "42");
    assert_eq!(Value::Boolean(true).to_string(), "true");
    assert_eq!(Value::Text("ab".into()).to_string(), "\"ab\"");
    assert_eq!(
        Value::LocalDate(NaiveDate::from_ymd_opt(2001, 2, 3).unwrap()).to_string(),
        "2001-02-03"
    );
}

#[test]
fn extractors_are_kind_strict() {
    assert_eq!(Value::Long(7).as_long(), Some(7));
    assert_eq!(Value::Double(7.0).as_long(), None);
    assert_eq!(Value::Text("t".into()).as_text(), Some("t"));
    assert_eq!(Value::Long(7).as_text(), None);
}

#[test]
fn try_from_reports_the_actual_kind() {
    let err = <i64 as TryFrom<Value>>::try_from(Value::Boolean(true)).unwrap_err();
    assert_eq!(
        err,
        ConversionError {
            value: "true".into(),
            target: ValueKind::Long,
            reason: "value is a Boolean".into(),
        }
    );
}
