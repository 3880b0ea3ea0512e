//! Read-only traversal over an expression tree.
//!
//! [`walk`] drives an [`ExpressionVisitor`] over a tree with exhaustive
//! matching on the closed [`Expression`] sum: one callback per leaf kind and
//! a `start_visit`/`end_visit` pair per parent family. `start_visit_*`
//! returning [`Visiting::Skip`] suppresses descent into the children; the
//! matching `end_visit_*` still fires.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;

use crate::tree::{BinaryOp, Expression, ExpressionReference, FunctionName, UnaryOp};
use crate::values::Value;

/// Whether to descend into a parent node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visiting {
    Continue,
    Skip,
}

/// Callbacks for [`walk`]. Every hook defaults to a no-op so visitors only
/// spell out what they care about.
pub trait ExpressionVisitor {
    fn visit_boolean(&mut self, _value: bool) {}
    fn visit_long(&mut self, _value: i64) {}
    fn visit_big_integer(&mut self, _value: &BigInt) {}
    fn visit_big_decimal(&mut self, _value: &BigDecimal) {}
    fn visit_double(&mut self, _value: f64) {}
    fn visit_text(&mut self, _value: &str) {}
    fn visit_local_date(&mut self, _value: NaiveDate) {}
    fn visit_local_date_time(&mut self, _value: NaiveDateTime) {}
    fn visit_local_time(&mut self, _value: NaiveTime) {}
    fn visit_reference(&mut self, _reference: &ExpressionReference) {}

    fn start_visit_unary(&mut self, _op: UnaryOp, _node: &Expression) -> Visiting {
        Visiting::Continue
    }
    fn end_visit_unary(&mut self, _op: UnaryOp, _node: &Expression) {}

    fn start_visit_binary(&mut self, _op: BinaryOp, _node: &Expression) -> Visiting {
        Visiting::Continue
    }
    fn end_visit_binary(&mut self, _op: BinaryOp, _node: &Expression) {}

    fn start_visit_function(&mut self, _name: &FunctionName, _node: &Expression) -> Visiting {
        Visiting::Continue
    }
    fn end_visit_function(&mut self, _name: &FunctionName, _node: &Expression) {}
}

/// Depth-first traversal of `expression`.
pub fn walk<V>(expression: &Expression, visitor: &mut V)
where
    V: ExpressionVisitor + ?Sized,
{
    match expression {
        Expression::Value(value) => match value {
            Value::Boolean(b) => visitor.visit_boolean(*b),
            Value::Long(l) => visitor.visit_long(*l),
            Value::BigInteger(i) => visitor.visit_big_integer(i),
            Value::BigDecimal(d) => visitor.visit_big_decimal(d),
            Value::Double(d) => visitor.visit_double(*d),
            Value::Text(t) => visitor.visit_text(t),
            Value::LocalDate(d) => visitor.visit_local_date(*d),
            Value::LocalDateTime(d) => visitor.visit_local_date_time(*d),
            Value::LocalTime(t) => visitor.visit_local_time(*t),
        },
        Expression::Reference(reference) => visitor.visit_reference(reference),
        Expression::Unary { op, child } => {
            if visitor.start_visit_unary(*op, expression) == Visiting::Continue {
                walk(child, visitor);
            }
            visitor.end_visit_unary(*op, expression);
        }
        Expression::Binary { op, left, right } => {
            if visitor.start_visit_binary(*op, expression) == Visiting::Continue {
                walk(left, visitor);
                walk(right, visitor);
            }
            visitor.end_visit_binary(*op, expression);
        }
        Expression::Function { name, args } => {
            if visitor.start_visit_function(name, expression) == Visiting::Continue {
                for arg in args {
                    walk(arg, visitor);
                }
            }
            visitor.end_visit_function(name, expression);
        }
    }
}
