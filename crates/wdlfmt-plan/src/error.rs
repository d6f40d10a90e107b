//! Ordering errors

use thiserror::Error;

use wdlfmt_ast::NodeId;

/// Ordering result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while ordering a workflow body.
///
/// All variants are fatal to the current formatting attempt: they are
/// raised at the scope where they are detected and propagate unchanged
/// through every enclosing scope.
#[derive(Debug, Error)]
pub enum Error {
    /// A scope supplied two full definitions for the same identity.
    #[error("duplicate definition of '{0}' in workflow body")]
    DuplicateNode(NodeId),

    /// The dependency edges within one scope form a cycle, so no valid
    /// linear order exists.
    #[error("dependency cycle in workflow body: {}", join_path(.path))]
    Cycle {
        /// One traced dependency chain through the cycle, with the first
        /// node repeated at the end.
        path: Vec<NodeId>,
    },

    /// Internal consistency check failed. Indicates a bug in the ordering
    /// engine, not a problem with the input document.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

fn join_path(path: &[NodeId]) -> String {
    path.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
