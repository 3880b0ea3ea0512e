//! Cycle detection for reference resolution.

use crate::context::{DecimalNumberContext, ExpressionEvaluationContext, MathContext};
use crate::error::ExpressionError;
use crate::tree::{Expression, ExpressionNode, ExpressionReference, FunctionName};
use crate::values::{ConversionError, Value, ValueKind};

/// Decorates any context so reference resolution can never loop.
///
/// Holds an ordered list of in-progress references scoped to one evaluation
/// call tree. A reference stays in the list for the dynamic extent of its
/// resolution and evaluation: `evaluate_reference` keeps it held while the
/// resolved subtree evaluates, so both a direct chain `A→B→A` and a cycle
/// routed through operators (`a = b+1`, `b = a+1`) fail with
/// [`ExpressionError::Cycle`] instead of recursing forever. Plain
/// `reference` calls additionally cycle-check a resolved node that is itself
/// a reference, catching two-hop cycles without a deeper call.
///
/// The list is restored on every exit path, success or failure, so the same
/// reference may be resolved any number of times across independent,
/// non-overlapping branches of one evaluation.
///
/// The in-progress list models one evaluation's call stack: do not share an
/// instance across concurrent top-level evaluations. [`reset`](Self::reset)
/// clears leftover state if an instance is reused after an error was
/// swallowed by the caller.
pub struct CycleDetectingExpressionEvaluationContext<C> {
    context: C,
    in_progress: Vec<ExpressionReference>,
}

impl<C: ExpressionEvaluationContext> CycleDetectingExpressionEvaluationContext<C> {
    pub fn new(context: C) -> Self {
        CycleDetectingExpressionEvaluationContext {
            context,
            in_progress: Vec::new(),
        }
    }

    /// Clears the in-progress list.
    pub fn reset(&mut self) {
        self.in_progress.clear();
    }

    /// Unwraps the decorated context.
    pub fn into_inner(self) -> C {
        self.context
    }

    fn cycle_check(&self, reference: &ExpressionReference) -> Result<(), ExpressionError> {
        if self.in_progress.contains(reference) {
            tracing::debug!(%reference, "reference cycle detected");
            return Err(ExpressionError::Cycle(reference.clone()));
        }
        Ok(())
    }
}

impl<C: ExpressionEvaluationContext> ExpressionEvaluationContext
    for CycleDetectingExpressionEvaluationContext<C>
{
    fn call_function(
        &mut self,
        name: &FunctionName,
        args: Vec<Value>,
    ) -> Result<Value, ExpressionError> {
        self.context.call_function(name, args)
    }

    fn reference(
        &mut self,
        reference: &ExpressionReference,
    ) -> Result<Option<ExpressionNode>, ExpressionError> {
        self.cycle_check(reference)?;
        let depth = self.in_progress.len();
        self.in_progress.push(reference.clone());
        let resolved = self.context.reference(reference).and_then(|resolved| {
            // A resolved node that is itself a reference gets its target
            // checked now, catching two-hop cycles early.
            if let Some(node) = &resolved
                && let Expression::Reference(next) = node.expression().as_ref()
            {
                self.cycle_check(next)?;
            }
            Ok(resolved)
        });
        // Restore on success and failure alike so independent re-resolution
        // of the same reference never trips a stale entry.
        self.in_progress.truncate(depth);
        resolved
    }

    fn evaluate_reference(
        &mut self,
        reference: &ExpressionReference,
    ) -> Result<Value, ExpressionError> {
        self.cycle_check(reference)?;
        let depth = self.in_progress.len();
        self.in_progress.push(reference.clone());
        // The reference stays in progress while the resolved subtree
        // evaluates; nested references re-enter here and see it.
        let value = self
            .context
            .reference(reference)
            .and_then(|resolved| match resolved {
                None => Err(ExpressionError::MissingReference(reference.clone())),
                Some(node) => node.expression().to_value(self),
            });
        self.in_progress.truncate(depth);
        value
    }

    fn convert(&mut self, value: Value, target: ValueKind) -> Result<Value, ConversionError> {
        self.context.convert(value, target)
    }

    fn decimal_number_context(&self) -> &DecimalNumberContext {
        self.context.decimal_number_context()
    }

    fn math_context(&self) -> MathContext {
        self.context.math_context()
    }
}
