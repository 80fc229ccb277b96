//! Fluent builder for constructing a [`Sim`].

use plaza_agent::{AgentSpec, AgentStoreBuilder};
use plaza_core::{SimConfig, SimRng};
use plaza_engine::MovementEngine;
use plaza_route::{Route, RouteTable};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — total ticks, Δt, seed
/// - at least one [`Route`] and the [`AgentSpec`]s that reference it
///
/// # Optional inputs
///
/// | Method       | Default                                  |
/// |--------------|------------------------------------------|
/// | `.engine(e)` | `MovementEngine::new()` (stock profiles) |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .route(plaza_loop)
///     .spawn_many(AgentSpec::npc(RouteId(0)), 6)
///     .spawn(AgentSpec::vehicle(RouteId(0)).placed_at(0, 0.5))
///     .build()?;
/// sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config: SimConfig,
    routes: Vec<Route>,
    agents: AgentStoreBuilder,
    engine: MovementEngine,
}

impl SimBuilder {
    /// Create a builder with the run configuration.
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            routes: Vec::new(),
            agents: AgentStoreBuilder::new(),
            engine: MovementEngine::new(),
        }
    }

    /// Register a waypoint loop.
    ///
    /// Degenerate loops are accepted — the engine degrades their agents to
    /// standing still and reports a fault — but hosts that want to fail fast
    /// can call [`Route::validate`] before handing the route over.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Queue one agent for spawning.
    pub fn spawn(mut self, spec: AgentSpec) -> Self {
        self.agents = self.agents.spawn(spec);
        self
    }

    /// Queue `n` agents sharing one spec.
    pub fn spawn_many(mut self, spec: AgentSpec, n: usize) -> Self {
        self.agents = self.agents.spawn_many(spec, n);
        self
    }

    /// Replace the stock movement engine (e.g. to override a
    /// [`ClassProfile`][plaza_engine::ClassProfile]).
    pub fn engine(mut self, engine: MovementEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Validate the configuration, resolve spawn specs, and return a
    /// ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`] for a non-positive or non-finite `dt_secs`
    /// - [`SimError::Route`] for duplicate route ids
    /// - [`SimError::Agent`] for invalid specs (range ordering, unknown
    ///   routes, bad placements, …)
    pub fn build(self) -> SimResult<Sim> {
        if !self.config.dt_secs.is_finite() || self.config.dt_secs <= 0.0 {
            return Err(SimError::Config(format!(
                "dt_secs must be positive and finite, got {}",
                self.config.dt_secs
            )));
        }

        let mut routes = RouteTable::new();
        for route in self.routes {
            routes.insert(route)?;
        }

        // Spawn randomness derives from the master seed, so a seed pins the
        // whole run.
        let mut rng = SimRng::new(self.config.seed);
        let agents = self.agents.build(&routes, &mut rng)?;

        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            agents,
            routes,
            engine: self.engine,
        })
    }
}
