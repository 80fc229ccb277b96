//! `plaza-agent` — agent records and the spawn-time builder.
//!
//! # Storage layout
//!
//! All per-agent state lives in [`AgentStore`], a Structure-of-Arrays
//! container: one `Vec` per field, all the same length, indexed by
//! `AgentId`.  The movement pass streams over a few of these arrays per
//! tick; SoA keeps each stream contiguous in cache.
//!
//! # Lifecycle
//!
//! Agents are created exactly once, from an [`AgentSpec`] each, via
//! [`AgentStoreBuilder`].  After the store is built only the movement
//! engine mutates it — one write per agent per tick, never destroying or
//! adding records.

pub mod builder;
pub mod error;
pub mod spec;
pub mod store;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use spec::{AgentSpec, DirectionChoice, Placement};
pub use store::AgentStore;
