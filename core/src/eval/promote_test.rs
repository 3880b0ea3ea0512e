//! Tests for evaluation and the promotion ladder.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use pretty_assertions::assert_eq;

use crate::context::{BasicExpressionEvaluationContext, ExpressionEvaluationContext};
use crate::error::{EvaluationFailure, ExpressionError};
use crate::tree::{Expression, ExpressionNode, ExpressionReference, FunctionName};
use crate::values::{ConversionError, Value, ValueKind};

/// A context with no functions and no references.
fn context() -> impl ExpressionEvaluationContext {
    BasicExpressionEvaluationContext::with_defaults(
        |name: &FunctionName, _args| Err(ExpressionError::UnknownFunction(name.to_string())),
        |_reference: &ExpressionReference| None,
    )
}

fn eval(expression: Expression) -> Result<Value, ExpressionError> {
    expression.to_value(&mut context())
}

fn big_decimal(text: &str) -> BigDecimal {
    text.parse().unwrap()
}

#[test]
fn long_plus_long() {
    let sum = Expression::addition(Expression::long_value(1), Expression::long_value(2));
    assert_eq!(eval(sum), Ok(Value::Long(3)));
}

#[test]
fn long_plus_double_promotes_to_double() {
    let sum = Expression::addition(Expression::long_value(1), Expression::double_value(2.5));
    assert_eq!(eval(sum), Ok(Value::Double(3.5)));
}

#[test]
fn long_plus_big_integer_promotes_to_big_integer() {
    let sum = Expression::addition(
        Expression::big_integer(BigInt::from(1) << 100),
        Expression::long_value(1),
    );
    assert_eq!(
        eval(sum),
        Ok(Value::BigInteger((BigInt::from(1) << 100) + 1))
    );
}

#[test]
fn big_decimal_is_the_default_lane() {
    let sum = Expression::addition(
        Expression::big_decimal(big_decimal("1.5")),
        Expression::long_value(1),
    );
    assert_eq!(eval(sum), Ok(Value::BigDecimal(big_decimal("2.5"))));

    // BigInteger × Double also lands in BigDecimal.
    let sum = Expression::addition(
        Expression::big_integer(BigInt::from(2)),
        Expression::double_value(0.5),
    );
    assert_eq!(eval(sum), Ok(Value::BigDecimal(big_decimal("2.5"))));
}

#[test]
fn text_addition_concatenates() {
    let sum = Expression::addition(Expression::text("a"), Expression::text("b"));
    assert_eq!(eval(sum), Ok(Value::Text("ab".into())));
}

#[test]
fn text_addition_converts_the_other_operand() {
    let sum = Expression::addition(Expression::text("n="), Expression::long_value(5));
    assert_eq!(eval(sum), Ok(Value::Text("n=5".into())));
}

#[test]
fn text_rejects_other_arithmetic() {
    let product =
        Expression::multiplication(Expression::text("a"), Expression::text("b"));
    assert_eq!(
        eval(product),
        Err(ExpressionError::Evaluation {
            expression: "\"a\"*\"b\"".into(),
            failure: EvaluationFailure::UnsupportedTextOperator {
                symbol: "*",
                left: "\"a\"".into(),
                right: "\"b\"".into(),
            },
        })
    );
}

#[test]
fn division_by_zero_fails() {
    let division = Expression::division(Expression::long_value(5), Expression::long_value(0));
    assert_eq!(
        eval(division),
        Err(ExpressionError::Evaluation {
            expression: "5/0".into(),
            failure: EvaluationFailure::DivisionByZero,
        })
    );
}

#[test]
fn modulo_by_zero_fails() {
    let modulo = Expression::modulo(Expression::long_value(5), Expression::long_value(0));
    assert_eq!(
        eval(modulo),
        Err(ExpressionError::Evaluation {
            expression: "5%0".into(),
            failure: EvaluationFailure::DivisionByZero,
        })
    );
}

#[test]
fn big_decimal_division_by_zero_fails() {
    let division = Expression::division(
        Expression::big_decimal(big_decimal("1")),
        Expression::big_decimal(big_decimal("0.00")),
    );
    assert!(matches!(
        eval(division),
        Err(ExpressionError::Evaluation {
            failure: EvaluationFailure::DivisionByZero,
            ..
        })
    ));
}

#[test]
fn long_division_truncates() {
    let division = Expression::division(Expression::long_value(7), Expression::long_value(-2));
    assert_eq!(eval(division), Ok(Value::Long(-3)));
}

#[test]
fn power_of_longs_stays_long_when_exact() {
    let power = Expression::power(Expression::long_value(2), Expression::long_value(10));
    assert_eq!(eval(power), Ok(Value::Long(1024)));
}

#[test]
fn power_precision_loss_fails() {
    let power = Expression::power(Expression::long_value(2), Expression::long_value(-1));
    assert_eq!(
        eval(power),
        Err(ExpressionError::Evaluation {
            expression: "2**-1".into(),
            failure: EvaluationFailure::PrecisionLoss { value: 0.5 },
        })
    );
}

#[test]
fn power_of_doubles() {
    let power = Expression::power(Expression::double_value(2.0), Expression::double_value(0.5));
    assert_eq!(eval(power), Ok(Value::Double(2.0_f64.powf(0.5))));
}

#[test]
fn non_finite_arithmetic_returns_the_left_operand() {
    // Not IEEE: the left operand's double comes back unmodified.
    let sum = Expression::addition(
        Expression::double_value(f64::INFINITY),
        Expression::double_value(1.0),
    );
    assert_eq!(eval(sum), Ok(Value::Double(f64::INFINITY)));

    let sum = Expression::addition(
        Expression::double_value(1.0),
        Expression::double_value(f64::INFINITY),
    );
    assert_eq!(eval(sum), Ok(Value::Double(1.0)));

    let sum = Expression::subtraction(
        Expression::double_value(f64::NAN),
        Expression::double_value(1.0),
    );
    match eval(sum) {
        Ok(Value::Double(d)) => assert!(d.is_nan()),
        other => panic!("expected NaN passthrough, got {:?}", other),
    }
}

#[test]
fn non_finite_comparisons_are_false() {
    for comparison in [
        Expression::greater_than(
            Expression::double_value(f64::NAN),
            Expression::double_value(1.0),
        ),
        Expression::less_than_equals(
            Expression::double_value(f64::NAN),
            Expression::double_value(1.0),
        ),
        Expression::equals(
            Expression::double_value(f64::INFINITY),
            Expression::double_value(f64::INFINITY),
        ),
        Expression::not_equals(
            Expression::double_value(1.0),
            Expression::double_value(f64::INFINITY),
        ),
    ] {
        assert_eq!(eval(comparison), Ok(Value::Boolean(false)));
    }
}

#[test]
fn finite_comparisons() {
    let less = Expression::less_than(Expression::long_value(1), Expression::long_value(2));
    assert_eq!(eval(less), Ok(Value::Boolean(true)));

    let at_least =
        Expression::greater_than_equals(Expression::double_value(2.5), Expression::long_value(3));
    assert_eq!(eval(at_least), Ok(Value::Boolean(false)));

    let equals = Expression::equals(Expression::long_value(2), Expression::long_value(2));
    assert_eq!(eval(equals), Ok(Value::Boolean(true)));
}

#[test]
fn text_comparison_is_lexicographic() {
    let less = Expression::less_than(Expression::text("a"), Expression::text("b"));
    assert_eq!(eval(less), Ok(Value::Boolean(true)));

    let equals = Expression::equals(Expression::text("b"), Expression::long_value(5));
    assert_eq!(eval(equals), Ok(Value::Boolean(false)));
}

#[test]
fn temporal_comparisons_use_the_default_lane() {
    let earlier = chrono::NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();
    let later = chrono::NaiveDate::from_ymd_opt(2001, 2, 4).unwrap();

    let less = Expression::less_than(
        Expression::local_date(earlier),
        Expression::local_date(later),
    );
    assert_eq!(eval(less), Ok(Value::Boolean(true)));

    let equals = Expression::equals(
        Expression::local_date(earlier),
        Expression::local_date(earlier),
    );
    assert_eq!(eval(equals), Ok(Value::Boolean(true)));
}

#[test]
fn big_decimal_comparison_ignores_scale() {
    let equals = Expression::equals(
        Expression::big_decimal(big_decimal("2.0")),
        Expression::big_decimal(big_decimal("2.00")),
    );
    assert_eq!(eval(equals), Ok(Value::Boolean(true)));
}

#[test]
fn logical_boolean_lane() {
    let and = Expression::and(Expression::boolean(true), Expression::boolean(false));
    assert_eq!(eval(and), Ok(Value::Boolean(false)));

    let xor = Expression::xor(Expression::boolean(true), Expression::boolean(false));
    assert_eq!(eval(xor), Ok(Value::Boolean(true)));

    // Either boolean operand pulls the pair into the boolean lane.
    let or = Expression::or(Expression::boolean(false), Expression::long_value(0));
    assert_eq!(eval(or), Ok(Value::Boolean(false)));
}

#[test]
fn logical_long_lane() {
    let and = Expression::and(Expression::long_value(6), Expression::long_value(3));
    assert_eq!(eval(and), Ok(Value::Long(2)));

    let or = Expression::or(Expression::long_value(6), Expression::long_value(3));
    assert_eq!(eval(or), Ok(Value::Long(7)));
}

#[test]
fn logical_big_integer_lane() {
    let and = Expression::and(
        Expression::big_integer(BigInt::from(2)),
        Expression::long_value(3),
    );
    assert_eq!(eval(and), Ok(Value::BigInteger(BigInt::from(2))));
}

#[test]
fn negative_keeps_the_numeric_representation() {
    assert_eq!(
        eval(Expression::negative(Expression::long_value(5))),
        Ok(Value::Long(-5))
    );
    assert_eq!(
        eval(Expression::negative(Expression::double_value(2.5))),
        Ok(Value::Double(-2.5))
    );
    assert_eq!(
        eval(Expression::negative(Expression::big_integer(BigInt::from(7)))),
        Ok(Value::BigInteger(BigInt::from(-7)))
    );
    assert_eq!(
        eval(Expression::negative(Expression::big_decimal(big_decimal("1.5")))),
        Ok(Value::BigDecimal(big_decimal("-1.5")))
    );
    // Non-numeric operands go through the converter into BigDecimal.
    assert_eq!(
        eval(Expression::negative(Expression::text("5"))),
        Ok(Value::BigDecimal(big_decimal("-5")))
    );
}

#[test]
fn not_complements() {
    assert_eq!(
        eval(Expression::not(Expression::boolean(true))),
        Ok(Value::Boolean(false))
    );
    assert_eq!(
        eval(Expression::not(Expression::long_value(0))),
        Ok(Value::Long(-1))
    );
    assert_eq!(
        eval(Expression::not(Expression::big_integer(BigInt::from(5)))),
        Ok(Value::BigInteger(BigInt::from(-6)))
    );
}

#[test]
fn group_is_transparent() {
    let grouped = Expression::group(Expression::addition(
        Expression::long_value(1),
        Expression::long_value(2),
    ));
    assert_eq!(eval(grouped.clone()), Ok(Value::Long(3)));
    assert_eq!(grouped.to_long(&mut context()), Ok(3));
}

#[test]
fn typed_accessors_convert_the_natural_value() {
    let sum = Expression::addition(Expression::long_value(1), Expression::long_value(2));
    let mut ctx = context();
    assert_eq!(sum.to_long(&mut ctx), Ok(3));
    assert_eq!(sum.to_double(&mut ctx), Ok(3.0));
    assert_eq!(sum.to_text(&mut ctx), Ok("3".into()));
    assert_eq!(sum.to_boolean(&mut ctx), Ok(true));
    assert_eq!(sum.to_big_integer(&mut ctx), Ok(BigInt::from(3)));
    assert_eq!(sum.to_big_decimal(&mut ctx), Ok(BigDecimal::from(3)));
}

#[test]
fn conversion_failures_carry_the_reason() {
    let boolean_of_time = Expression::local_time(
        chrono::NaiveTime::from_hms_opt(1, 2, 3).unwrap(),
    );
    assert_eq!(
        boolean_of_time.to_boolean(&mut context()),
        Err(ExpressionError::Conversion(ConversionError {
            value: "01:02:03".into(),
            target: ValueKind::Boolean,
            reason: "value is a LocalTime".into(),
        }))
    );
}

#[test]
fn functions_receive_evaluated_arguments() {
    let mut ctx = BasicExpressionEvaluationContext::with_defaults(
        |name: &FunctionName, args: Vec<Value>| {
            assert_eq!(name.value(), "add");
            let mut sum = 0;
            for arg in args {
                sum += arg.as_long().unwrap();
            }
            Ok(Value::Long(sum))
        },
        |_reference: &ExpressionReference| None,
    );

    let call = Expression::function(
        "add",
        vec![
            Expression::long_value(40),
            // Arguments arrive evaluated, not as sub-trees.
            Expression::addition(Expression::long_value(1), Expression::long_value(1)),
        ],
    );
    assert_eq!(call.to_value(&mut ctx), Ok(Value::Long(42)));
}

#[test]
fn unknown_function_surfaces() {
    let call = Expression::function("nope", vec![]);
    assert_eq!(
        eval(call),
        Err(ExpressionError::UnknownFunction("nope".into()))
    );
}

#[test]
fn references_resolve_through_the_context() {
    let mut ctx = BasicExpressionEvaluationContext::with_defaults(
        |name: &FunctionName, _args| Err(ExpressionError::UnknownFunction(name.to_string())),
        |reference: &ExpressionReference| {
            (reference.label() == "a").then(|| {
                ExpressionNode::new(Expression::addition(
                    Expression::long_value(20),
                    Expression::long_value(22),
                ))
            })
        },
    );

    let tree = Expression::reference("a");
    assert_eq!(tree.to_value(&mut ctx), Ok(Value::Long(42)));
    assert_eq!(tree.to_text(&mut ctx), Ok("42".into()));
}

#[test]
fn missing_reference_fails() {
    let tree = Expression::reference("missing");
    assert_eq!(
        eval(tree),
        Err(ExpressionError::MissingReference(ExpressionReference::new(
            "missing"
        )))
    );
}

#[test]
fn evaluation_aborts_at_the_first_error() {
    // The right operand would evaluate fine; the left division fails first.
    let tree = Expression::addition(
        Expression::division(Expression::long_value(1), Expression::long_value(0)),
        Expression::function("nope", vec![]),
    );
    assert!(matches!(
        eval(tree),
        Err(ExpressionError::Evaluation {
            failure: EvaluationFailure::DivisionByZero,
            ..
        })
    ));
}
