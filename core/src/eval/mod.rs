//! Evaluation.
//!
//! The typed `to_*` entry points live here as inherent methods on
//! [`Expression`] and [`ExpressionNode`]; the shared numeric promotion
//! ladder sits in [`promote`]. Evaluation is a pure, synchronous,
//! single-threaded recursive walk: it either completes with a value or
//! surfaces the first error, producing and caching nothing else.

pub mod promote;

#[cfg(test)]
mod promote_test;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;

use crate::context::ExpressionEvaluationContext;
use crate::error::ExpressionError;
use crate::tree::{Expression, ExpressionNode};
use crate::values::{ConversionError, Value, ValueKind};

impl Expression {
    /// Evaluates to the node's natural value.
    ///
    /// Literals yield themselves; operators compute through the promotion
    /// ladder; `Group` is transparent; references resolve through the
    /// context and function calls dispatch through it.
    pub fn to_value<C>(&self, ctx: &mut C) -> Result<Value, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        match self {
            Expression::Value(value) => Ok(value.clone()),
            Expression::Reference(reference) => ctx.evaluate_reference(reference),
            Expression::Unary { op, child } => promote::unary(*op, child, ctx),
            Expression::Binary { op, left, right } => {
                promote::binary(self, *op, left, right, ctx)
            }
            Expression::Function { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(arg.to_value(ctx)?);
                }
                ctx.call_function(name, values)
            }
        }
    }

    pub fn to_boolean<C>(&self, ctx: &mut C) -> Result<bool, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        coerce(self, ctx, ValueKind::Boolean)
    }

    pub fn to_long<C>(&self, ctx: &mut C) -> Result<i64, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        coerce(self, ctx, ValueKind::Long)
    }

    pub fn to_big_integer<C>(&self, ctx: &mut C) -> Result<BigInt, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        coerce(self, ctx, ValueKind::BigInteger)
    }

    pub fn to_big_decimal<C>(&self, ctx: &mut C) -> Result<BigDecimal, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        coerce(self, ctx, ValueKind::BigDecimal)
    }

    pub fn to_double<C>(&self, ctx: &mut C) -> Result<f64, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        coerce(self, ctx, ValueKind::Double)
    }

    pub fn to_text<C>(&self, ctx: &mut C) -> Result<String, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        coerce(self, ctx, ValueKind::Text)
    }

    pub fn to_local_date<C>(&self, ctx: &mut C) -> Result<NaiveDate, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        coerce(self, ctx, ValueKind::LocalDate)
    }

    pub fn to_local_date_time<C>(&self, ctx: &mut C) -> Result<NaiveDateTime, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        coerce(self, ctx, ValueKind::LocalDateTime)
    }

    pub fn to_local_time<C>(&self, ctx: &mut C) -> Result<NaiveTime, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        coerce(self, ctx, ValueKind::LocalTime)
    }
}

/// Natural value, then a context conversion to `target`, then payload
/// extraction. `convert_or_fail` has already pinned the result's kind, so
/// the extraction cannot fail for a well-behaved converter.
fn coerce<T, C>(expression: &Expression, ctx: &mut C, target: ValueKind) -> Result<T, ExpressionError>
where
    T: TryFrom<Value, Error = ConversionError>,
    C: ExpressionEvaluationContext + ?Sized,
{
    let value = expression.to_value(ctx)?;
    let converted = ctx.convert_or_fail(value, target)?;
    Ok(T::try_from(converted)?)
}

impl ExpressionNode {
    pub fn to_value<C>(&self, ctx: &mut C) -> Result<Value, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        self.expression().to_value(ctx)
    }

    pub fn to_boolean<C>(&self, ctx: &mut C) -> Result<bool, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        self.expression().to_boolean(ctx)
    }

    pub fn to_long<C>(&self, ctx: &mut C) -> Result<i64, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        self.expression().to_long(ctx)
    }

    pub fn to_big_integer<C>(&self, ctx: &mut C) -> Result<BigInt, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        self.expression().to_big_integer(ctx)
    }

    pub fn to_big_decimal<C>(&self, ctx: &mut C) -> Result<BigDecimal, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        self.expression().to_big_decimal(ctx)
    }

    pub fn to_double<C>(&self, ctx: &mut C) -> Result<f64, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        self.expression().to_double(ctx)
    }

    pub fn to_text<C>(&self, ctx: &mut C) -> Result<String, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        self.expression().to_text(ctx)
    }

    pub fn to_local_date<C>(&self, ctx: &mut C) -> Result<NaiveDate, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        self.expression().to_local_date(ctx)
    }

    pub fn to_local_date_time<C>(&self, ctx: &mut C) -> Result<NaiveDateTime, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        self.expression().to_local_date_time(ctx)
    }

    pub fn to_local_time<C>(&self, ctx: &mut C) -> Result<NaiveTime, ExpressionError>
    where
        C: ExpressionEvaluationContext + ?Sized,
    {
        self.expression().to_local_time(ctx)
    }
}
