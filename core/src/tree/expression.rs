//! The node catalogue.
//!
//! [`Expression`] is a closed sum grouped by arity: leaf literals and
//! references, unary operators, binary operators and variable-arity function
//! calls. The data is strictly top-down (children only, no parent links),
//! which is what lets edited trees share unedited subtrees by reference; the
//! parent/index bookkeeping lives on [`ExpressionNode`](super::ExpressionNode).

use core::fmt;
use std::rc::Rc;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use smallvec::{SmallVec, smallvec};

use crate::tree::{ExpressionReference, FunctionName};
use crate::values::Value;

/// Children of a node. Inline storage for the dominant 1/2-child case.
pub(crate) type ChildExpressions = SmallVec<[Rc<Expression>; 2]>;

/// The unary operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Arithmetic negation in the operand's own numeric representation.
    Negative,
    /// Logical complement on booleans, bitwise complement on integers.
    Not,
    /// Parenthesization; evaluation-transparent.
    Group,
}

impl UnaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            UnaryOp::Negative => "Negative",
            UnaryOp::Not => "Not",
            UnaryOp::Group => "Group",
        }
    }
}

/// The binary operator kinds: arithmetic, comparison and logical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Power,
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
    And,
    Or,
    Xor,
}

impl BinaryOp {
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Addition => "Addition",
            BinaryOp::Subtraction => "Subtraction",
            BinaryOp::Multiplication => "Multiplication",
            BinaryOp::Division => "Division",
            BinaryOp::Modulo => "Modulo",
            BinaryOp::Power => "Power",
            BinaryOp::Equals => "Equals",
            BinaryOp::NotEquals => "NotEquals",
            BinaryOp::GreaterThan => "GreaterThan",
            BinaryOp::GreaterThanEquals => "GreaterThanEquals",
            BinaryOp::LessThan => "LessThan",
            BinaryOp::LessThanEquals => "LessThanEquals",
            BinaryOp::And => "And",
            BinaryOp::Or => "Or",
            BinaryOp::Xor => "Xor",
        }
    }

    /// The operator's textual symbol, used in rendering and diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Addition => "+",
            BinaryOp::Subtraction => "-",
            BinaryOp::Multiplication => "*",
            BinaryOp::Division => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "**",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanEquals => ">=",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanEquals => "<=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Addition
                | BinaryOp::Subtraction
                | BinaryOp::Multiplication
                | BinaryOp::Division
                | BinaryOp::Modulo
                | BinaryOp::Power
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Equals
                | BinaryOp::NotEquals
                | BinaryOp::GreaterThan
                | BinaryOp::GreaterThanEquals
                | BinaryOp::LessThan
                | BinaryOp::LessThanEquals
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Xor)
    }
}

/// An immutable expression.
///
/// Built via the factory functions below; factories take already-built
/// children so arity violations cannot be expressed. Structural equality is
/// kind-first, then recursive over children or the leaf payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal leaf holding one of the nine runtime value kinds.
    Value(Value),
    /// An opaque reference, resolved by the evaluation context.
    Reference(ExpressionReference),
    Unary {
        op: UnaryOp,
        child: Rc<Expression>,
    },
    Binary {
        op: BinaryOp,
        left: Rc<Expression>,
        right: Rc<Expression>,
    },
    /// A named call with an ordered, variable-length argument list.
    Function {
        name: FunctionName,
        args: Vec<Rc<Expression>>,
    },
}

impl Expression {
    // Leaf factories.

    pub fn value(value: impl Into<Value>) -> Expression {
        Expression::Value(value.into())
    }

    pub fn long_value(value: i64) -> Expression {
        Expression::Value(Value::Long(value))
    }

    pub fn big_integer(value: BigInt) -> Expression {
        Expression::Value(Value::BigInteger(value))
    }

    pub fn big_decimal(value: BigDecimal) -> Expression {
        Expression::Value(Value::BigDecimal(value))
    }

    pub fn double_value(value: f64) -> Expression {
        Expression::Value(Value::Double(value))
    }

    pub fn boolean(value: bool) -> Expression {
        Expression::Value(Value::Boolean(value))
    }

    pub fn text(value: impl Into<String>) -> Expression {
        Expression::Value(Value::Text(value.into()))
    }

    pub fn local_date(value: NaiveDate) -> Expression {
        Expression::Value(Value::LocalDate(value))
    }

    pub fn local_date_time(value: NaiveDateTime) -> Expression {
        Expression::Value(Value::LocalDateTime(value))
    }

    pub fn local_time(value: NaiveTime) -> Expression {
        Expression::Value(Value::LocalTime(value))
    }

    pub fn reference(reference: impl Into<ExpressionReference>) -> Expression {
        Expression::Reference(reference.into())
    }

    // Unary factories.

    pub fn negative(child: Expression) -> Expression {
        Expression::unary(UnaryOp::Negative, child)
    }

    pub fn not(child: Expression) -> Expression {
        Expression::unary(UnaryOp::Not, child)
    }

    pub fn group(child: Expression) -> Expression {
        Expression::unary(UnaryOp::Group, child)
    }

    pub fn unary(op: UnaryOp, child: Expression) -> Expression {
        Expression::Unary {
            op,
            child: Rc::new(child),
        }
    }

    // Binary factories.

    pub fn addition(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::Addition, left, right)
    }

    pub fn subtraction(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::Subtraction, left, right)
    }

    pub fn multiplication(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::Multiplication, left, right)
    }

    pub fn division(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::Division, left, right)
    }

    pub fn modulo(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::Modulo, left, right)
    }

    pub fn power(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::Power, left, right)
    }

    pub fn equals(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::Equals, left, right)
    }

    pub fn not_equals(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::NotEquals, left, right)
    }

    pub fn greater_than(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::GreaterThan, left, right)
    }

    pub fn greater_than_equals(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::GreaterThanEquals, left, right)
    }

    pub fn less_than(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::LessThan, left, right)
    }

    pub fn less_than_equals(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::LessThanEquals, left, right)
    }

    pub fn and(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::And, left, right)
    }

    pub fn or(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::Or, left, right)
    }

    pub fn xor(left: Expression, right: Expression) -> Expression {
        Expression::binary(BinaryOp::Xor, left, right)
    }

    pub fn binary(op: BinaryOp, left: Expression, right: Expression) -> Expression {
        Expression::Binary {
            op,
            left: Rc::new(left),
            right: Rc::new(right),
        }
    }

    // Function factory.

    pub fn function(name: impl Into<FunctionName>, args: Vec<Expression>) -> Expression {
        Expression::Function {
            name: name.into(),
            args: args.into_iter().map(Rc::new).collect(),
        }
    }

    /// The kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Value(v) => v.kind().name(),
            Expression::Reference(_) => "Reference",
            Expression::Unary { op, .. } => op.name(),
            Expression::Binary { op, .. } => op.name(),
            Expression::Function { .. } => "Function",
        }
    }

    /// The exact child count this kind requires, or `None` for the
    /// variable-arity Function kind.
    pub fn required_child_count(&self) -> Option<usize> {
        match self {
            Expression::Value(_) | Expression::Reference(_) => Some(0),
            Expression::Unary { .. } => Some(1),
            Expression::Binary { .. } => Some(2),
            Expression::Function { .. } => None,
        }
    }

    /// The node's children, in order.
    pub(crate) fn child_expressions(&self) -> ChildExpressions {
        match self {
            Expression::Value(_) | Expression::Reference(_) => SmallVec::new(),
            Expression::Unary { child, .. } => smallvec![child.clone()],
            Expression::Binary { left, right, .. } => smallvec![left.clone(), right.clone()],
            Expression::Function { args, .. } => args.iter().cloned().collect(),
        }
    }

    /// A node of the same kind holding `children`.
    ///
    /// The caller has already validated cardinality; leaf kinds are returned
    /// unchanged.
    pub(crate) fn with_child_expressions(&self, mut children: ChildExpressions) -> Expression {
        match self {
            Expression::Value(_) | Expression::Reference(_) => self.clone(),
            Expression::Unary { op, .. } => Expression::Unary {
                op: *op,
                child: children.remove(0),
            },
            Expression::Binary { op, .. } => {
                let left = children.remove(0);
                let right = children.remove(0);
                Expression::Binary {
                    op: *op,
                    left,
                    right,
                }
            }
            Expression::Function { name, .. } => Expression::Function {
                name: name.clone(),
                args: children.into_vec(),
            },
        }
    }
}

impl fmt::Display for Expression {
    /// Renders the node's textual form: infix operators, explicit
    /// parentheses for Group, `name(a, b)` for calls.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Value(v) => write!(f, "{}", v),
            Expression::Reference(r) => write!(f, "{}", r),
            Expression::Unary { op, child } => match op {
                UnaryOp::Negative => write!(f, "-{}", child),
                UnaryOp::Not => write!(f, "!{}", child),
                UnaryOp::Group => write!(f, "({})", child),
            },
            Expression::Binary { op, left, right } => {
                write!(f, "{}{}{}", left, op.symbol(), right)
            }
            Expression::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
