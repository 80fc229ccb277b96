//! Non-fatal route diagnostics.
//!
//! A fault never aborts the tick: affected agents hold position and the
//! condition is surfaced once to the host (observer hook + `tracing` warn),
//! then silenced for the rest of the run.

use plaza_core::RouteId;
use thiserror::Error;

/// What went wrong with a route's geometry or registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum FaultKind {
    /// The segment an agent is traversing has (near-)coincident endpoints.
    #[error("segment {0} is degenerate (coincident waypoints)")]
    DegenerateSegment(u8),

    /// An agent references a route id missing from the route table.
    #[error("route is not registered in the route table")]
    UnknownRoute,
}

/// A deduplicated diagnostic: each distinct `(route, kind)` pair is reported
/// exactly once per run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Error)]
#[error("route {route}: {kind}")]
pub struct RouteFault {
    pub route: RouteId,
    pub kind: FaultKind,
}
