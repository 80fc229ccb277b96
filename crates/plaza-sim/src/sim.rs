//! The `Sim` struct and its tick loop.

use plaza_agent::AgentStore;
use plaza_core::{SimClock, SimConfig, Tick};
use plaza_engine::MovementEngine;
use plaza_route::RouteTable;

use crate::SimObserver;

/// The main simulation runner.
///
/// Owns all simulation state and drives the tick loop: one
/// [`MovementEngine::tick`] per simulated tick, bracketed by observer
/// callbacks.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Global configuration (total ticks, Δt, seed).
    pub config: SimConfig,

    /// Simulation clock — the current tick and the Δt per tick.
    pub clock: SimClock,

    /// All agent records (SoA arrays).  Written by the engine once per
    /// tick; read-only for everyone else.
    pub agents: AgentStore,

    /// The waypoint loops agents circulate.
    pub routes: RouteTable,

    /// The movement and avoidance pass, including per-route spacing state.
    pub engine: MovementEngine,
}

impl Sim {
    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            self.process_tick(now, observer);
            self.clock.advance();
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.process_tick(now, observer);
            self.clock.advance();
        }
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        observer.on_tick_start(now);

        let report = self
            .engine
            .tick(&mut self.agents, &self.routes, self.clock.dt_secs);

        // All writes for this tick are committed; publish in order.
        for fault in &report.faults {
            observer.on_route_fault(now, fault);
        }
        observer.on_frame(now, &self.agents);
        observer.on_tick_end(now, &report);
    }
}
