//! `plaza-sim` — tick loop orchestrator for the rust_plaza crowd simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① on_tick_start
//!   ② engine.tick   — spacing, snapshot, movement pass, commit
//!   ③ on_route_fault — once per newly discovered fault
//!   ④ on_frame      — read-only pose + animation-rate publication
//!   ⑤ on_tick_end   — the tick's TickReport
//! ```
//!
//! The engine commits every agent's update before ③–⑤ run, so observers
//! always see a complete, consistent frame; the clock advances only after
//! the observer returns.  That boundary is the simulation's synchronization
//! barrier.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use plaza_core::{RouteId, SimConfig};
//! use plaza_agent::AgentSpec;
//! use plaza_route::Route;
//! use plaza_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config)
//!     .route(route)
//!     .spawn_many(AgentSpec::npc(RouteId(0)), 6)
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
