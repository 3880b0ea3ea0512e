//! Opaque keys resolved by the evaluation context.

use core::fmt;

/// An opaque key identifying a value or sub-expression to be resolved by an
/// evaluation context at evaluation time. References are not stored as part
/// of the tree they point to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpressionReference(String);

impl ExpressionReference {
    pub fn new(label: impl Into<String>) -> Self {
        ExpressionReference(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpressionReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExpressionReference {
    fn from(label: &str) -> Self {
        ExpressionReference::new(label)
    }
}

/// The name of a function invoked by a
/// [`Function`](crate::tree::Expression::Function) node, dispatched by the
/// evaluation context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionName(String);

impl FunctionName {
    pub fn new(name: impl Into<String>) -> Self {
        FunctionName(name.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FunctionName {
    fn from(name: &str) -> Self {
        FunctionName::new(name)
    }
}
