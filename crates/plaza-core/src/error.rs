//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Both patterns
//! are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{AgentId, RouteId};

/// The top-level error type for `plaza-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("route {0} not found")]
    RouteNotFound(RouteId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `plaza-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
