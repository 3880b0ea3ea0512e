//! Ramus - immutable expression trees with a typed, numeric-promoting
//! evaluator
//!
//! # Overview
//!
//! Ramus models a small expression language as an immutable tree: literal
//! leaves, arithmetic/comparison/logical operators, unary operators,
//! variable-arity function calls and opaque references. Trees are built
//! programmatically with factory functions and evaluated against a
//! caller-supplied context that resolves functions and references, converts
//! values and supplies locale/rounding facts.
//!
//! # Quick Start
//!
//! ```
//! use ramus::{BasicExpressionEvaluationContext, Expression, ExpressionError, Value};
//!
//! // (1 + 2) * 4
//! let tree = Expression::multiplication(
//!     Expression::group(Expression::addition(
//!         Expression::long_value(1),
//!         Expression::long_value(2),
//!     )),
//!     Expression::long_value(4),
//! );
//!
//! let mut ctx = BasicExpressionEvaluationContext::with_defaults(
//!     |name, _args| Err(ExpressionError::UnknownFunction(name.to_string())),
//!     |_reference| None,
//! );
//!
//! assert_eq!(tree.to_value(&mut ctx).unwrap(), Value::Long(12));
//! assert_eq!(tree.to_text(&mut ctx).unwrap(), "12");
//! ```
//!
//! # Structural edits
//!
//! Trees are persistent: editing a node rebuilds only the path to the root
//! and shares every unedited subtree with the pre-edit tree.
//!
//! ```
//! use std::rc::Rc;
//! use ramus::{Expression, ExpressionNode};
//!
//! let root = ExpressionNode::new(Expression::addition(
//!     Expression::long_value(1),
//!     Expression::long_value(2),
//! ));
//!
//! let children = root.children();
//! let edited = root
//!     .set_children(vec![
//!         ExpressionNode::new(Expression::long_value(10)),
//!         children[1].clone(),
//!     ])
//!     .unwrap();
//!
//! // The new tree replaced the left leaf and shares the right leaf.
//! assert_eq!(*edited.expression(), Rc::new(Expression::addition(
//!     Expression::long_value(10),
//!     Expression::long_value(2),
//! )));
//! assert!(Rc::ptr_eq(
//!     edited.children()[1].expression(),
//!     children[1].expression(),
//! ));
//! ```
//!
//! # Cycle safety
//!
//! Wrap any context in
//! [`CycleDetectingExpressionEvaluationContext`] to guard reference
//! resolution against cycles. One context instance per top-level
//! evaluation: the decorator's in-progress state models a single call
//! stack.

// Re-export the public API from ramus_core
pub use ramus_core::context::{
    BasicExpressionEvaluationContext, CycleDetectingExpressionEvaluationContext,
    DecimalNumberContext, ExpressionEvaluationContext, MathContext,
};
pub use ramus_core::error::{EvaluationFailure, ExpressionError};
pub use ramus_core::tree::{
    BinaryOp, Expression, ExpressionNode, ExpressionReference, FunctionName, UnaryOp,
};
pub use ramus_core::values::{
    BasicConverter, ConversionError, Converter, Value, ValueKind,
};
pub use ramus_core::visitor::{ExpressionVisitor, Visiting, walk};

// Re-export the core modules for callers that want the full paths.
pub use ramus_core::{context, error, eval, tree, values, visitor};
