//! Tests for the default converter.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

use super::{BasicConverter, Converter, Value, ValueKind};
use crate::context::DecimalNumberContext;

fn convert(value: Value, target: ValueKind) -> Result<Value, super::ConversionError> {
    BasicConverter.convert(&value, target, &DecimalNumberContext::default())
}

#[test]
fn same_kind_is_identity() {
    assert_eq!(convert(Value::Long(5), ValueKind::Long), Ok(Value::Long(5)));
}

#[test]
fn numeric_widening() {
    assert_eq!(
        convert(Value::Long(5), ValueKind::BigInteger),
        Ok(Value::BigInteger(BigInt::from(5)))
    );
    assert_eq!(
        convert(Value::Long(5), ValueKind::BigDecimal),
        Ok(Value::BigDecimal(BigDecimal::from(5)))
    );
    assert_eq!(
        convert(Value::Long(5), ValueKind::Double),
        Ok(Value::Double(5.0))
    );
}

#[test]
fn narrowing_checks_exactness() {
    assert_eq!(
        convert(Value::Double(2.0), ValueKind::Long),
        Ok(Value::Long(2))
    );
    let err = convert(Value::Double(2.5), ValueKind::Long).unwrap_err();
    assert_eq!(err.reason, "not exactly a long");

    let err = convert(
        Value::BigDecimal("1.25".parse().unwrap()),
        ValueKind::BigInteger,
    )
    .unwrap_err();
    assert_eq!(err.reason, "not an integer");
}

#[test]
fn integral_big_decimal_narrows() {
    assert_eq!(
        convert(Value::BigDecimal("12.00".parse().unwrap()), ValueKind::Long),
        Ok(Value::Long(12))
    );
    assert_eq!(
        convert(
            Value::BigDecimal("1200".parse().unwrap()),
            ValueKind::BigInteger
        ),
        Ok(Value::BigInteger(BigInt::from(1200)))
    );
}

#[test]
fn non_finite_doubles_do_not_narrow() {
    assert!(convert(Value::Double(f64::NAN), ValueKind::BigDecimal).is_err());
    assert!(convert(Value::Double(f64::INFINITY), ValueKind::Long).is_err());
}

#[test]
fn text_to_number_uses_decimal_facts() {
    assert_eq!(
        convert(Value::Text("1,234".into()), ValueKind::Long),
        Ok(Value::Long(1234))
    );
    assert_eq!(
        convert(Value::Text("1.5".into()), ValueKind::Double),
        Ok(Value::Double(1.5))
    );

    // European-style facts: comma decimal point, dot grouping.
    let european = DecimalNumberContext::new("€", ',', '.', 'e', '-', '+', "de-DE");
    assert_eq!(
        BasicConverter.convert(&Value::Text("1.234,5".into()), ValueKind::BigDecimal, &european),
        Ok(Value::BigDecimal("1234.5".parse().unwrap()))
    );
}

#[test]
fn number_to_text_is_unquoted() {
    assert_eq!(
        convert(Value::Long(12), ValueKind::Text),
        Ok(Value::Text("12".into()))
    );
    assert_eq!(
        convert(Value::Boolean(false), ValueKind::Text),
        Ok(Value::Text("false".into()))
    );
}

#[test]
fn boolean_number_round_trip() {
    assert_eq!(
        convert(Value::Boolean(true), ValueKind::Long),
        Ok(Value::Long(1))
    );
    assert_eq!(
        convert(Value::Long(0), ValueKind::Boolean),
        Ok(Value::Boolean(false))
    );
    assert_eq!(
        convert(Value::Long(7), ValueKind::Boolean),
        Ok(Value::Boolean(true))
    );
}

#[test]
fn iso_text_to_temporal() {
    assert_eq!(
        convert(Value::Text("2001-02-03".into()), ValueKind::LocalDate),
        Ok(Value::LocalDate(
            NaiveDate::from_ymd_opt(2001, 2, 3).unwrap()
        ))
    );
    assert_eq!(
        convert(Value::Text("12:34:56".into()), ValueKind::LocalTime),
        Ok(Value::LocalTime(
            NaiveTime::from_hms_opt(12, 34, 56).unwrap()
        ))
    );
    assert_eq!(
        convert(
            Value::Text("2001-02-03T12:34:56".into()),
            ValueKind::LocalDateTime
        ),
        Ok(Value::LocalDateTime(
            NaiveDate::from_ymd_opt(2001, 2, 3)
                .unwrap()
                .and_hms_opt(12, 34, 56)
                .unwrap()
        ))
    );
}

#[test]
fn temporal_projections() {
    let date = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();
    let time = NaiveTime::from_hms_opt(4, 5, 6).unwrap();
    let date_time = date.and_time(time);

    assert_eq!(
        convert(Value::LocalDateTime(date_time), ValueKind::LocalDate),
        Ok(Value::LocalDate(date))
    );
    assert_eq!(
        convert(Value::LocalDateTime(date_time), ValueKind::LocalTime),
        Ok(Value::LocalTime(time))
    );
    assert_eq!(
        convert(Value::LocalDate(date), ValueKind::LocalDateTime),
        Ok(Value::LocalDateTime(date.and_time(NaiveTime::MIN)))
    );
}

#[test]
fn epoch_numbers_to_temporal() {
    // 1970-01-01 plus 365 days.
    assert_eq!(
        convert(Value::Long(365), ValueKind::LocalDate),
        Ok(Value::LocalDate(NaiveDate::from_ymd_opt(1971, 1, 1).unwrap()))
    );
    assert_eq!(
        convert(Value::Long(0), ValueKind::LocalDate),
        Ok(Value::LocalDate(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()))
    );
    // Seconds of the day.
    assert_eq!(
        convert(Value::Long(3600), ValueKind::LocalTime),
        Ok(Value::LocalTime(NaiveTime::from_hms_opt(1, 0, 0).unwrap()))
    );
}

#[test]
fn temporal_to_epoch_numbers() {
    let date = NaiveDate::from_ymd_opt(1971, 1, 1).unwrap();
    assert_eq!(
        convert(Value::LocalDate(date), ValueKind::Long),
        Ok(Value::Long(365))
    );
    assert_eq!(
        convert(
            Value::LocalTime(NaiveTime::from_hms_opt(1, 0, 0).unwrap()),
            ValueKind::Long
        ),
        Ok(Value::Long(3600))
    );
    assert_eq!(
        convert(
            Value::LocalDateTime(date.and_time(NaiveTime::MIN)),
            ValueKind::Long
        ),
        Ok(Value::Long(365 * 86_400))
    );
    assert_eq!(
        convert(Value::LocalDate(date), ValueKind::BigDecimal),
        Ok(Value::BigDecimal(BigDecimal::from(365)))
    );
}

#[test]
fn incompatible_conversions_are_rejected() {
    let err = convert(
        Value::LocalTime(NaiveTime::from_hms_opt(1, 2, 3).unwrap()),
        ValueKind::Boolean,
    )
    .unwrap_err();
    assert_eq!(err.target, ValueKind::Boolean);
    assert_eq!(err.reason, "value is a LocalTime");
}
