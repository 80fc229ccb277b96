//! `plaza-engine` — the per-tick movement and avoidance pass.
//!
//! # Tick structure
//!
//! ```text
//! MovementEngine::tick(store, routes, dt):
//!   ① Spacing   — one-shot even redistribution of each route's agents
//!                 along the loop's arc length (skipped once done; routes
//!                 with no agents stay eligible).
//!   ② Snapshot  — copy every agent's scan fields into a reused buffer;
//!                 this is the frame-consistent view all agents read.
//!   ③ Compute   — per agent, independently: neighbor scan → speed and
//!                 steer bias → path advancement → pose and animation rate.
//!                 Parallel under the `parallel` feature, same results.
//!   ④ Commit    — write every agent's update back, count moved/held,
//!                 report newly discovered route faults (once per fault).
//! ```
//!
//! Within a tick no agent ever observes another agent's already-updated
//! state — phase ② pins the view, phase ④ publishes it.  The tick boundary
//! is the synchronization barrier.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs phase ③ on Rayon's thread pool.                   |
//! | `fx-hash`  | FxHash for the route-membership / fault-dedup maps.    |

pub mod avoidance;
pub mod engine;
pub mod fault;
pub mod snapshot;
pub mod spacing;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use avoidance::{ClassProfile, Reaction};
pub use engine::{MovementEngine, TickReport};
pub use fault::{FaultKind, RouteFault};
pub use snapshot::{AgentSnapshot, TickSnapshot};
pub use spacing::{SpacingState, space_evenly};
