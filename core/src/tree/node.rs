//! The persistent node handle.
//!
//! An [`ExpressionNode`] pairs shared, parent-free value data
//! (`Rc<Expression>`) with its ancestry: the handle of its parent plus its
//! index among that parent's children. The ancestry chain points strictly
//! upward and the value data strictly downward, so no reference cycles can
//! exist while `parent()`/`index()` stay pure accessors.
//!
//! Structural edits are path-copying: [`ExpressionNode::set_children`]
//! rebuilds exactly the nodes between the edited node and the root, and every
//! subtree off that path is shared by reference with the pre-edit tree
//! (observable via [`Rc::ptr_eq`]).

use std::rc::Rc;

use crate::error::ExpressionError;
use crate::tree::expression::{ChildExpressions, Expression};

/// A handle onto a node of an immutable expression tree.
///
/// Handles are cheap to clone (two reference-count bumps). Equality is
/// structural and ignores ancestry: two handles are equal when their
/// expressions are equal, wherever they sit in their trees.
#[derive(Debug, Clone)]
pub struct ExpressionNode {
    expression: Rc<Expression>,
    ancestry: Option<Rc<Ancestry>>,
}

#[derive(Debug)]
struct Ancestry {
    parent: ExpressionNode,
    index: usize,
}

impl ExpressionNode {
    /// A detached root handle for `expression`.
    pub fn new(expression: Expression) -> Self {
        ExpressionNode {
            expression: Rc::new(expression),
            ancestry: None,
        }
    }

    /// The underlying expression data.
    pub fn expression(&self) -> &Rc<Expression> {
        &self.expression
    }

    /// This node's position among its parent's children, or `None` for a
    /// detached/root node.
    pub fn index(&self) -> Option<usize> {
        self.ancestry.as_ref().map(|a| a.index)
    }

    /// This node's parent, or `None` for a detached/root node.
    pub fn parent(&self) -> Option<ExpressionNode> {
        self.ancestry.as_ref().map(|a| a.parent.clone())
    }

    pub fn is_root(&self) -> bool {
        self.ancestry.is_none()
    }

    /// The root of the tree this handle belongs to (`self` when detached).
    pub fn root(&self) -> ExpressionNode {
        let mut node = self.clone();
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    /// The node's children, in order, each carrying `self` as its parent.
    pub fn children(&self) -> Vec<ExpressionNode> {
        self.expression
            .child_expressions()
            .into_iter()
            .enumerate()
            .map(|(index, expression)| ExpressionNode {
                expression,
                ancestry: Some(Rc::new(Ancestry {
                    parent: self.clone(),
                    index,
                })),
            })
            .collect()
    }

    /// The child at `index`, if any.
    pub fn child(&self, index: usize) -> Option<ExpressionNode> {
        let expression = self.expression.child_expressions().into_iter().nth(index)?;
        Some(ExpressionNode {
            expression,
            ancestry: Some(Rc::new(Ancestry {
                parent: self.clone(),
                index,
            })),
        })
    }

    /// Replaces this node's children, producing a new tree.
    ///
    /// Fixed-arity kinds reject a wrong child count. When `children` is
    /// structurally equal to the current children the original handle is
    /// returned unchanged, sharing the same expression allocation.
    /// Otherwise the node and every ancestor up to the root are rebuilt and
    /// the handle at this node's original position inside the new tree is
    /// returned; subtrees off the root path stay shared with the pre-edit
    /// tree.
    pub fn set_children(
        &self,
        children: Vec<ExpressionNode>,
    ) -> Result<ExpressionNode, ExpressionError> {
        let new: ChildExpressions = children
            .iter()
            .map(|child| child.expression.clone())
            .collect();

        if let Some(expected) = self.expression.required_child_count()
            && new.len() != expected
        {
            return Err(ExpressionError::Structural {
                kind: self.expression.kind_name(),
                expected,
                actual: new.len(),
            });
        }

        let current = self.expression.child_expressions();
        let unchanged = current.len() == new.len()
            && current
                .iter()
                .zip(&new)
                .all(|(old, new)| Rc::ptr_eq(old, new) || old == new);
        if unchanged {
            return Ok(self.clone());
        }

        let replacement = Rc::new(self.expression.with_child_expressions(new));
        Ok(self.replace_expression(replacement))
    }

    /// Detaches this node from its parent, yielding an equivalent root.
    pub fn remove_parent(&self) -> ExpressionNode {
        if self.is_root() {
            return self.clone();
        }
        ExpressionNode {
            expression: self.expression.clone(),
            ancestry: None,
        }
    }

    /// Adopts `replacement` at this node's position, rebuilding the ancestor
    /// chain; returns the handle for `replacement` inside the new tree.
    fn replace_expression(&self, replacement: Rc<Expression>) -> ExpressionNode {
        match &self.ancestry {
            None => ExpressionNode {
                expression: replacement,
                ancestry: None,
            },
            Some(ancestry) => {
                let mut siblings = ancestry.parent.expression.child_expressions();
                siblings[ancestry.index] = replacement.clone();
                let parent_expression =
                    Rc::new(ancestry.parent.expression.with_child_expressions(siblings));
                let parent = ancestry.parent.replace_expression(parent_expression);
                ExpressionNode {
                    expression: replacement,
                    ancestry: Some(Rc::new(Ancestry {
                        parent,
                        index: ancestry.index,
                    })),
                }
            }
        }
    }
}

impl PartialEq for ExpressionNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.expression, &other.expression) || self.expression == other.expression
    }
}

impl From<Expression> for ExpressionNode {
    fn from(expression: Expression) -> Self {
        ExpressionNode::new(expression)
    }
}
