//! `plaza-core` — foundational types for the `rust_plaza` crowd simulation.
//!
//! This crate is a dependency of every other `plaza-*` crate.  It
//! intentionally has no `plaza-*` dependencies and minimal external ones
//! (`glam`, `rand`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `RouteId`                                  |
//! | [`math`]    | look rotation, lateral perpendicular, proximity guard |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]     | `SimRng` (deterministic, seed-mixed)                  |
//! | [`class`]   | `AgentClass`, `AvoidancePolicy`                       |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod class;
pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use class::{AgentClass, AvoidancePolicy};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, RouteId};
pub use math::{PROXIMITY_EPSILON, flat_perpendicular, look_rotation};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
