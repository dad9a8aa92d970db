//! Error types for compilation.

use mixdown_core::GraphError;
use thiserror::Error;

/// Errors returned by [`MixCompiler::compile`](crate::MixCompiler::compile)
/// and the [`MixPlan`](crate::MixPlan) accessors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    /// The export preset is not in the compiler's preset table.
    #[error("unknown export preset '{0}'")]
    UnknownPreset(String),

    /// The plan has no output tap with this name.
    #[error("no output tap named '{0}'")]
    UnknownTap(String),

    /// The emitted instruction list failed its structural check.
    #[error("malformed filtergraph: {0}")]
    Graph(#[from] GraphError),
}
