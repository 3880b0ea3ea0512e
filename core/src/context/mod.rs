//! The evaluation context SPI.
//!
//! Every evaluation entry point consumes an [`ExpressionEvaluationContext`]:
//! it supplies function dispatch, reference resolution, value conversion and
//! the decimal/locale facts. [`BasicExpressionEvaluationContext`] composes
//! these from caller-supplied collaborators;
//! [`CycleDetectingExpressionEvaluationContext`] decorates any context with
//! reference-cycle detection.
//!
//! Contexts are consumed by `&mut` and are **not** thread-safe: the
//! cycle-detecting decorator carries per-call state modelling one
//! evaluation's call stack. Use one context instance per concurrent
//! top-level evaluation (or reset it between calls).

pub mod basic;
pub mod cycle;
pub mod decimal;

pub use basic::BasicExpressionEvaluationContext;
pub use cycle::CycleDetectingExpressionEvaluationContext;
pub use decimal::{DecimalNumberContext, MathContext};

use crate::error::ExpressionError;
use crate::tree::{ExpressionNode, ExpressionReference, FunctionName};
use crate::values::{ConversionError, Value, ValueKind};


/// The SPI a caller implements to evaluate expressions.
pub trait ExpressionEvaluationContext {
    /// Resolves and invokes a named function against already-evaluated
    /// argument values.
    fn call_function(
        &mut self,
        name: &FunctionName,
        args: Vec<Value>,
    ) -> Result<Value, ExpressionError>;

    /// Resolves an opaque reference to a sub-expression, `Ok(None)` when
    /// unknown.
    fn reference(
        &mut self,
        reference: &ExpressionReference,
    ) -> Result<Option<ExpressionNode>, ExpressionError>;

    /// Converts `value` to the `target` representation, fallibly.
    fn convert(&mut self, value: Value, target: ValueKind) -> Result<Value, ConversionError>;

    /// The locale facts consumed by text↔number conversions.
    fn decimal_number_context(&self) -> &DecimalNumberContext;

    /// The precision/rounding policy applied to BigDecimal arithmetic.
    fn math_context(&self) -> MathContext;

    /// Like [`reference`](Self::reference) but missing references become
    /// [`ExpressionError::MissingReference`].
    fn reference_or_fail(
        &mut self,
        reference: &ExpressionReference,
    ) -> Result<ExpressionNode, ExpressionError> {
        self.reference(reference)?
            .ok_or_else(|| ExpressionError::MissingReference(reference.clone()))
    }

    /// Resolves `reference` and evaluates the resolved node to its natural
    /// value; a resolved node that is itself a reference resolves again.
    ///
    /// Reference evaluation flows through the context so a decorator can
    /// scope state to the whole nested evaluation — this is how the
    /// cycle-detecting context keeps a reference "in progress" until the
    /// subtree it resolved to has finished evaluating.
    fn evaluate_reference(
        &mut self,
        reference: &ExpressionReference,
    ) -> Result<Value, ExpressionError> {
        let resolved = self.reference_or_fail(reference)?;
        resolved.expression().to_value(self)
    }

    /// Like [`convert`](Self::convert) but failures become
    /// [`ExpressionError::Conversion`], and a converter that produced the
    /// wrong kind is rejected so callers can rely on the result's kind.
    fn convert_or_fail(
        &mut self,
        value: Value,
        target: ValueKind,
    ) -> Result<Value, ExpressionError> {
        let converted = self.convert(value, target)?;
        if converted.kind() != target {
            return Err(ConversionError::new(
                &converted,
                target,
                format!("converter produced a {}", converted.kind()),
            )
            .into());
        }
        Ok(converted)
    }
}
