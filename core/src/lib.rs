//! Core implementation of the ramus expression tree.
//!
//! The crate is organised leaves-first:
//!
//! - [`values`] — the runtime [`values::Value`] sum and the fallible
//!   conversion contract every node relies on.
//! - [`tree`] — the immutable node catalogue ([`tree::Expression`]) and the
//!   persistent handle type ([`tree::ExpressionNode`]) with its
//!   path-copying structural replace.
//! - [`context`] — the evaluation SPI a host implements, a basic
//!   composition of caller-supplied collaborators, and the cycle-detecting
//!   decorator.
//! - [`eval`] — the typed evaluation entry points and the shared numeric
//!   promotion ladder.
//! - [`visitor`] — read-only traversal over a tree.
//!
//! Trees are built programmatically via the factory functions on
//! [`tree::Expression`]; there is no parser here.

pub mod context;
pub mod error;
pub mod eval;
pub mod tree;
pub mod values;
pub mod visitor;

pub use error::ExpressionError;

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
