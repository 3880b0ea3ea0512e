//! Public error types for the ramus API.
//!
//! This is the single error surface exposed to library users. Every failure
//! mode of building or evaluating a tree is represented here; nothing is
//! swallowed or retried internally, and evaluation aborts at the first error.

use thiserror::Error;

use crate::tree::ExpressionReference;
use crate::values::ConversionError;

/// Public error type for all ramus operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// A structural edit supplied the wrong number of children for the
    /// node's kind.
    #[error("invalid child count for {kind}: expected {expected}, got {actual}")]
    Structural {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A value could not be converted to the requested representation.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A reference could not be resolved by the evaluation context.
    #[error("missing reference: {0}")]
    MissingReference(ExpressionReference),

    /// Reference resolution revisited a reference that is still being
    /// resolved within the same top-level evaluation.
    #[error("cycle detected while resolving reference: {0}")]
    Cycle(ExpressionReference),

    /// Evaluation of a node failed. Carries the textual form of the failed
    /// node for diagnostics.
    #[error("failed to evaluate {expression}: {failure}")]
    Evaluation {
        expression: String,
        failure: EvaluationFailure,
    },

    /// A caller-supplied collaborator (function dispatcher) rejected a call.
    #[error("unknown function: {0}")]
    UnknownFunction(String),
}

/// The arithmetic failure modes of the evaluator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationFailure {
    #[error("division by zero")]
    DivisionByZero,

    /// A floating computation produced a result that is not exactly
    /// representable in the requested integral type.
    #[error("precision loss: {value} is not exactly representable")]
    PrecisionLoss { value: f64 },

    /// Text operands only support concatenation via Addition.
    #[error("operator {symbol} is not supported for text values {left} and {right}")]
    UnsupportedTextOperator {
        symbol: &'static str,
        left: String,
        right: String,
    },
}

impl ExpressionError {
    /// Wrap an arithmetic failure with the textual form of the failed node.
    pub(crate) fn evaluation(
        expression: impl ToString,
        failure: EvaluationFailure,
    ) -> Self {
        ExpressionError::Evaluation {
            expression: expression.to_string(),
            failure,
        }
    }
}
