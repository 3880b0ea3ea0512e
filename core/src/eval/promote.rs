//! The shared numeric promotion ladder.
//!
//! Binary arithmetic and comparison nodes evaluate both children to their
//! natural values, classify the pair into a computation lane and compute
//! there. First match wins:
//!
//! 1. either operand is Text → text rules (concatenation / lexicographic);
//! 2. both Long → 64-bit integer arithmetic;
//! 3. either BigInteger, the other BigInteger-or-Long → BigInteger;
//! 4. either Double, the other Double-or-Long → Double;
//! 5. everything else → BigDecimal at the context's rounding precision.
//!
//! The Double lane preserves an intentionally non-IEEE rule: when either
//! operand is non-finite, arithmetic returns the left operand's double
//! unmodified and every comparison is `false`.

use core::cmp::Ordering;
use std::rc::Rc;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};

use crate::context::{ExpressionEvaluationContext, MathContext};
use crate::error::{EvaluationFailure, ExpressionError};
use crate::tree::{BinaryOp, Expression, UnaryOp};
use crate::values::convert::double_to_long;
use crate::values::{Value, ValueKind};

/// The classified operand pair of a binary arithmetic/comparison node.
enum Operands {
    /// Either side is text; operands are converted via the context.
    Text,
    Long(i64, i64),
    BigInteger(BigInt, BigInt),
    Double(f64, f64),
    /// The default lane; operands are converted via the context.
    BigDecimal,
}

fn classify(left: &Value, right: &Value) -> Operands {
    match (left, right) {
        (Value::Text(_), _) | (_, Value::Text(_)) => Operands::Text,
        (Value::Long(a), Value::Long(b)) => Operands::Long(*a, *b),
        (Value::BigInteger(a), Value::BigInteger(b)) => {
            Operands::BigInteger(a.clone(), b.clone())
        }
        (Value::BigInteger(a), Value::Long(b)) => {
            Operands::BigInteger(a.clone(), BigInt::from(*b))
        }
        (Value::Long(a), Value::BigInteger(b)) => {
            Operands::BigInteger(BigInt::from(*a), b.clone())
        }
        (Value::Double(a), Value::Double(b)) => Operands::Double(*a, *b),
        (Value::Double(a), Value::Long(b)) => Operands::Double(*a, *b as f64),
        (Value::Long(a), Value::Double(b)) => Operands::Double(*a as f64, *b),
        _ => Operands::BigDecimal,
    }
}

pub(crate) fn binary<C>(
    node: &Expression,
    op: BinaryOp,
    left: &Rc<Expression>,
    right: &Rc<Expression>,
    ctx: &mut C,
) -> Result<Value, ExpressionError>
where
    C: ExpressionEvaluationContext + ?Sized,
{
    let left = left.to_value(ctx)?;
    let right = right.to_value(ctx)?;
    if op.is_logical() {
        logical(op, left, right, ctx)
    } else if op.is_comparison() {
        comparison(op, left, right, ctx)
    } else {
        arithmetic(node, op, left, right, ctx)
    }
}

fn arithmetic<C>(
    node: &Expression,
    op: BinaryOp,
    left: Value,
    right: Value,
    ctx: &mut C,
) -> Result<Value, ExpressionError>
where
    C: ExpressionEvaluationContext + ?Sized,
{
    match classify(&left, &right) {
        Operands::Text => {
            if op != BinaryOp::Addition {
                return Err(ExpressionError::evaluation(
                    node,
                    EvaluationFailure::UnsupportedTextOperator {
                        symbol: op.symbol(),
                        left: left.to_string(),
                        right: right.to_string(),
                    },
                ));
            }
            let mut a: String = ctx.convert_or_fail(left, ValueKind::Text)?.try_into()?;
            let b: String = ctx.convert_or_fail(right, ValueKind::Text)?.try_into()?;
            a.push_str(&b);
            Ok(Value::Text(a))
        }
        Operands::Long(a, b) => long_arithmetic(node, op, a, b),
        Operands::BigInteger(a, b) => big_integer_arithmetic(node, op, a, b),
        Operands::Double(a, b) => Ok(Value::Double(double_arithmetic(op, a, b))),
        Operands::BigDecimal => {
            let a: BigDecimal = ctx
                .convert_or_fail(left, ValueKind::BigDecimal)?
                .try_into()?;
            let b: BigDecimal = ctx
                .convert_or_fail(right, ValueKind::BigDecimal)?
                .try_into()?;
            big_decimal_arithmetic(node, op, a, b, ctx.math_context())
        }
    }
}

fn long_arithmetic(
    node: &Expression,
    op: BinaryOp,
    a: i64,
    b: i64,
) -> Result<Value, ExpressionError> {
    let result = match op {
        BinaryOp::Addition => a.wrapping_add(b),
        BinaryOp::Subtraction => a.wrapping_sub(b),
        BinaryOp::Multiplication => a.wrapping_mul(b),
        BinaryOp::Division => {
            if b == 0 {
                return Err(ExpressionError::evaluation(
                    node,
                    EvaluationFailure::DivisionByZero,
                ));
            }
            a.wrapping_div(b)
        }
        BinaryOp::Modulo => {
            if b == 0 {
                return Err(ExpressionError::evaluation(
                    node,
                    EvaluationFailure::DivisionByZero,
                ));
            }
            a.wrapping_rem(b)
        }
        BinaryOp::Power => {
            let value = (a as f64).powf(b as f64);
            return double_to_long(value).map(Value::Long).ok_or_else(|| {
                ExpressionError::evaluation(node, EvaluationFailure::PrecisionLoss { value })
            });
        }
        other => unreachable!("{} is not an arithmetic operator", other.name()),
    };
    Ok(Value::Long(result))
}

fn big_integer_arithmetic(
    node: &Expression,
    op: BinaryOp,
    a: BigInt,
    b: BigInt,
) -> Result<Value, ExpressionError> {
    let result = match op {
        BinaryOp::Addition => a + b,
        BinaryOp::Subtraction => a - b,
        BinaryOp::Multiplication => a * b,
        BinaryOp::Division => {
            if b.is_zero() {
                return Err(ExpressionError::evaluation(
                    node,
                    EvaluationFailure::DivisionByZero,
                ));
            }
            a / b
        }
        BinaryOp::Modulo => {
            if b.is_zero() {
                return Err(ExpressionError::evaluation(
                    node,
                    EvaluationFailure::DivisionByZero,
                ));
            }
            a % b
        }
        BinaryOp::Power => {
            let value = to_double_lossy(&a).powf(to_double_lossy(&b));
            let exact = value.is_finite() && value.fract() == 0.0;
            return exact
                .then(|| BigInt::from_f64(value))
                .flatten()
                .map(Value::BigInteger)
                .ok_or_else(|| {
                    ExpressionError::evaluation(
                        node,
                        EvaluationFailure::PrecisionLoss { value },
                    )
                });
        }
        other => unreachable!("{} is not an arithmetic operator", other.name()),
    };
    Ok(Value::BigInteger(result))
}

/// Arithmetic in the Double lane.
///
/// Non-finite operands bypass IEEE arithmetic entirely: the left operand's
/// double is returned unmodified.
fn double_arithmetic(op: BinaryOp, a: f64, b: f64) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return a;
    }
    match op {
        BinaryOp::Addition => a + b,
        BinaryOp::Subtraction => a - b,
        BinaryOp::Multiplication => a * b,
        BinaryOp::Division => a / b,
        BinaryOp::Modulo => a % b,
        BinaryOp::Power => a.powf(b),
        other => unreachable!("{} is not an arithmetic operator", other.name()),
    }
}

fn big_decimal_arithmetic(
    node: &Expression,
    op: BinaryOp,
    a: BigDecimal,
    b: BigDecimal,
    math: MathContext,
) -> Result<Value, ExpressionError> {
    let result = match op {
        BinaryOp::Addition => a + b,
        BinaryOp::Subtraction => a - b,
        BinaryOp::Multiplication => a * b,
        BinaryOp::Division => {
            if b.is_zero() {
                return Err(ExpressionError::evaluation(
                    node,
                    EvaluationFailure::DivisionByZero,
                ));
            }
            a / b
        }
        BinaryOp::Modulo => {
            if b.is_zero() {
                return Err(ExpressionError::evaluation(
                    node,
                    EvaluationFailure::DivisionByZero,
                ));
            }
            a % b
        }
        BinaryOp::Power => {
            let value = to_double_lossy_decimal(&a).powf(to_double_lossy_decimal(&b));
            let result = BigDecimal::from_f64(value).ok_or_else(|| {
                ExpressionError::evaluation(node, EvaluationFailure::PrecisionLoss { value })
            })?;
            return Ok(Value::BigDecimal(math.round(result)));
        }
        other => unreachable!("{} is not an arithmetic operator", other.name()),
    };
    Ok(Value::BigDecimal(math.round(result)))
}

fn comparison<C>(
    op: BinaryOp,
    left: Value,
    right: Value,
    ctx: &mut C,
) -> Result<Value, ExpressionError>
where
    C: ExpressionEvaluationContext + ?Sized,
{
    let result = match classify(&left, &right) {
        Operands::Text => {
            let a: String = ctx.convert_or_fail(left, ValueKind::Text)?.try_into()?;
            let b: String = ctx.convert_or_fail(right, ValueKind::Text)?.try_into()?;
            apply_ordering(op, a.cmp(&b))
        }
        Operands::Long(a, b) => apply_ordering(op, a.cmp(&b)),
        Operands::BigInteger(a, b) => apply_ordering(op, a.cmp(&b)),
        // Comparisons involving a non-finite double are false, whatever the
        // operator.
        Operands::Double(a, b) => match a.partial_cmp(&b) {
            Some(ordering) if a.is_finite() && b.is_finite() => apply_ordering(op, ordering),
            _ => false,
        },
        Operands::BigDecimal => {
            let a: BigDecimal = ctx
                .convert_or_fail(left, ValueKind::BigDecimal)?
                .try_into()?;
            let b: BigDecimal = ctx
                .convert_or_fail(right, ValueKind::BigDecimal)?
                .try_into()?;
            apply_ordering(op, a.cmp(&b))
        }
    };
    Ok(Value::Boolean(result))
}

fn apply_ordering(op: BinaryOp, ordering: Ordering) -> bool {
    match op {
        BinaryOp::Equals => ordering == Ordering::Equal,
        BinaryOp::NotEquals => ordering != Ordering::Equal,
        BinaryOp::GreaterThan => ordering == Ordering::Greater,
        BinaryOp::GreaterThanEquals => ordering != Ordering::Less,
        BinaryOp::LessThan => ordering == Ordering::Less,
        BinaryOp::LessThanEquals => ordering != Ordering::Greater,
        other => unreachable!("{} is not a comparison operator", other.name()),
    }
}

/// The logical ladder: Boolean → boolean bitwise, both Long → Long bitwise,
/// else BigInteger bitwise.
fn logical<C>(
    op: BinaryOp,
    left: Value,
    right: Value,
    ctx: &mut C,
) -> Result<Value, ExpressionError>
where
    C: ExpressionEvaluationContext + ?Sized,
{
    match (&left, &right) {
        (Value::Boolean(_), _) | (_, Value::Boolean(_)) => {
            let a: bool = ctx.convert_or_fail(left, ValueKind::Boolean)?.try_into()?;
            let b: bool = ctx.convert_or_fail(right, ValueKind::Boolean)?.try_into()?;
            Ok(Value::Boolean(match op {
                BinaryOp::And => a & b,
                BinaryOp::Or => a | b,
                BinaryOp::Xor => a ^ b,
                other => unreachable!("{} is not a logical operator", other.name()),
            }))
        }
        (Value::Long(a), Value::Long(b)) => Ok(Value::Long(match op {
            BinaryOp::And => a & b,
            BinaryOp::Or => a | b,
            BinaryOp::Xor => a ^ b,
            other => unreachable!("{} is not a logical operator", other.name()),
        })),
        _ => {
            let a: BigInt = ctx
                .convert_or_fail(left, ValueKind::BigInteger)?
                .try_into()?;
            let b: BigInt = ctx
                .convert_or_fail(right, ValueKind::BigInteger)?
                .try_into()?;
            Ok(Value::BigInteger(match op {
                BinaryOp::And => a & b,
                BinaryOp::Or => a | b,
                BinaryOp::Xor => a ^ b,
                other => unreachable!("{} is not a logical operator", other.name()),
            }))
        }
    }
}

pub(crate) fn unary<C>(
    op: UnaryOp,
    child: &Rc<Expression>,
    ctx: &mut C,
) -> Result<Value, ExpressionError>
where
    C: ExpressionEvaluationContext + ?Sized,
{
    match op {
        // Parenthesization only; evaluation passes straight through.
        UnaryOp::Group => child.to_value(ctx),
        UnaryOp::Negative => {
            let value = child.to_value(ctx)?;
            match value {
                Value::Long(l) => Ok(Value::Long(l.wrapping_neg())),
                Value::BigInteger(i) => Ok(Value::BigInteger(-i)),
                Value::BigDecimal(d) => Ok(Value::BigDecimal(-d)),
                Value::Double(d) => Ok(Value::Double(-d)),
                other => {
                    let d: BigDecimal = ctx
                        .convert_or_fail(other, ValueKind::BigDecimal)?
                        .try_into()?;
                    Ok(Value::BigDecimal(-d))
                }
            }
        }
        UnaryOp::Not => {
            let value = child.to_value(ctx)?;
            match value {
                Value::Boolean(b) => Ok(Value::Boolean(!b)),
                Value::Long(l) => Ok(Value::Long(!l)),
                other => {
                    let i: BigInt = ctx
                        .convert_or_fail(other, ValueKind::BigInteger)?
                        .try_into()?;
                    Ok(Value::BigInteger(!i))
                }
            }
        }
    }
}

/// Power exponentiation happens in floating point whatever the lane; these
/// saturate out-of-range magnitudes to infinity, which the exactness checks
/// then reject.
fn to_double_lossy(value: &BigInt) -> f64 {
    value.to_f64().unwrap_or(f64::INFINITY)
}

fn to_double_lossy_decimal(value: &BigDecimal) -> f64 {
    value.to_f64().unwrap_or(f64::INFINITY)
}
