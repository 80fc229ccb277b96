//! Simulation observer trait — the seam to rendering, animation, and
//! diagnostics collaborators.

use plaza_agent::AgentStore;
use plaza_core::Tick;
use plaza_engine::{RouteFault, TickReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// `on_frame` is the transform/animation hand-off: it fires every tick after
/// all writes are committed, and the store reference is read-only — copy
/// `position`, `orientation`, and `animation_rate` out to whatever visual
/// representation the host drives.
///
/// # Example — pose printer
///
/// ```rust,ignore
/// struct PosePrinter;
///
/// impl SimObserver for PosePrinter {
///     fn on_frame(&mut self, tick: Tick, agents: &AgentStore) {
///         println!("{tick}: agent 0 at {}", agents.position[0]);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick's writes are committed.  Read-only view of all
    /// agent state — the publication point for the rendering/animation sink.
    fn on_frame(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once per newly discovered route fault (never repeated for the
    /// same fault).
    fn on_route_fault(&mut self, _tick: Tick, _fault: &RouteFault) {}

    /// Called at the end of each tick with that tick's [`TickReport`].
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
