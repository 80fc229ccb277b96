//! `plaza-route` — the closed 4-point waypoint loops agents circulate.
//!
//! A [`Route`] is exactly four ordered world-space waypoints, implicitly
//! closed (the last connects back to the first).  Segment lengths and the
//! total loop length are precomputed at construction so the per-tick
//! movement pass and the even-spacing initializer only do array reads.
//!
//! Multiple independent loops coexist in a [`RouteTable`]; agents only ever
//! interact with agents on the same route.

pub mod error;
pub mod route;
pub mod table;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RouteError, RouteResult};
pub use route::{Leg, MIN_SEGMENT_LENGTH, Route, WAYPOINT_COUNT};
pub use table::RouteTable;
