//! A context assembled from caller-supplied collaborators.

use crate::context::{DecimalNumberContext, ExpressionEvaluationContext, MathContext};
use crate::error::ExpressionError;
use crate::tree::{ExpressionNode, ExpressionReference, FunctionName};
use crate::values::{BasicConverter, ConversionError, Converter, Value, ValueKind};

/// An [`ExpressionEvaluationContext`] composed from four collaborators: a
/// function dispatcher, a reference resolver, a value converter and the
/// decimal-format facts. It holds no state of its own.
///
/// # Example
///
/// ```
/// use ramus_core::context::BasicExpressionEvaluationContext;
/// use ramus_core::tree::Expression;
/// use ramus_core::values::Value;
///
/// let mut ctx = BasicExpressionEvaluationContext::with_defaults(
///     |name, _args| Err(ramus_core::ExpressionError::UnknownFunction(name.to_string())),
///     |_reference| None,
/// );
/// let sum = Expression::addition(Expression::long_value(40), Expression::long_value(2));
/// assert_eq!(sum.to_value(&mut ctx).unwrap(), Value::Long(42));
/// ```
pub struct BasicExpressionEvaluationContext<F, R, C = BasicConverter> {
    functions: F,
    references: R,
    converter: C,
    decimal: DecimalNumberContext,
    math: MathContext,
}

impl<F, R, C> BasicExpressionEvaluationContext<F, R, C>
where
    F: FnMut(&FunctionName, Vec<Value>) -> Result<Value, ExpressionError>,
    R: FnMut(&ExpressionReference) -> Option<ExpressionNode>,
    C: Converter,
{
    pub fn new(
        functions: F,
        references: R,
        converter: C,
        decimal: DecimalNumberContext,
        math: MathContext,
    ) -> Self {
        BasicExpressionEvaluationContext {
            functions,
            references,
            converter,
            decimal,
            math,
        }
    }
}

impl<F, R> BasicExpressionEvaluationContext<F, R, BasicConverter>
where
    F: FnMut(&FunctionName, Vec<Value>) -> Result<Value, ExpressionError>,
    R: FnMut(&ExpressionReference) -> Option<ExpressionNode>,
{
    /// The default converter, en-US decimal facts and DECIMAL64 rounding.
    pub fn with_defaults(functions: F, references: R) -> Self {
        BasicExpressionEvaluationContext::new(
            functions,
            references,
            BasicConverter,
            DecimalNumberContext::default(),
            MathContext::default(),
        )
    }
}

impl<F, R, C> ExpressionEvaluationContext for BasicExpressionEvaluationContext<F, R, C>
where
    F: FnMut(&FunctionName, Vec<Value>) -> Result<Value, ExpressionError>,
    R: FnMut(&ExpressionReference) -> Option<ExpressionNode>,
    C: Converter,
{
    fn call_function(
        &mut self,
        name: &FunctionName,
        args: Vec<Value>,
    ) -> Result<Value, ExpressionError> {
        (self.functions)(name, args)
    }

    fn reference(
        &mut self,
        reference: &ExpressionReference,
    ) -> Result<Option<ExpressionNode>, ExpressionError> {
        Ok((self.references)(reference))
    }

    fn convert(&mut self, value: Value, target: ValueKind) -> Result<Value, ConversionError> {
        self.converter.convert(&value, target, &self.decimal)
    }

    fn decimal_number_context(&self) -> &DecimalNumberContext {
        &self.decimal
    }

    fn math_context(&self) -> MathContext {
        self.math
    }
}
