//! square-loop — smallest runnable scenario for rust_plaza.
//!
//! A plaza square with pedestrians circulating in both directions, plus a
//! surrounding ring road carrying a small hand-staggered vehicle fleet.
//! Prints a pose sample once per simulated second and a summary at the end.
//! Scale note: the pass is O(N²) per route per tick; hundreds of agents per
//! loop are comfortable at 10 Hz.

use anyhow::Result;
use glam::Vec3;
use tracing::info;

use plaza_agent::{AgentSpec, AgentStore};
use plaza_core::{RouteId, SimConfig, Tick};
use plaza_engine::{RouteFault, TickReport};
use plaza_route::Route;
use plaza_sim::{SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const NPC_COUNT: usize = 6;
const SEED: u64 = 42;
const DT_SECS: f32 = 0.1; // 10 ticks per simulated second
const SIM_SECONDS: u64 = 60;
const TOTAL_TICKS: u64 = SIM_SECONDS * 10;

const PLAZA: RouteId = RouteId(0);
const RING_ROAD: RouteId = RouteId(1);

// ── Routes ────────────────────────────────────────────────────────────────────

/// The pedestrian square: side 12, centered on the origin.
fn plaza_square() -> Result<Route> {
    Ok(Route::new(
        PLAZA,
        [
            Vec3::new(-6.0, 0.0, -6.0),
            Vec3::new(6.0, 0.0, -6.0),
            Vec3::new(6.0, 0.0, 6.0),
            Vec3::new(-6.0, 0.0, 6.0),
        ],
    )?)
}

/// The vehicle ring: side 30, enclosing the plaza.
fn ring_road() -> Result<Route> {
    Ok(Route::new(
        RING_ROAD,
        [
            Vec3::new(-15.0, 0.0, -15.0),
            Vec3::new(15.0, 0.0, -15.0),
            Vec3::new(15.0, 0.0, 15.0),
            Vec3::new(-15.0, 0.0, 15.0),
        ],
    )?)
}

// ── Console observer ──────────────────────────────────────────────────────────

struct ConsoleObserver {
    /// Print a pose sample every this many ticks.
    sample_interval: u64,
    held_ticks: usize,
}

impl SimObserver for ConsoleObserver {
    fn on_frame(&mut self, tick: Tick, agents: &AgentStore) {
        if tick.0 % self.sample_interval != 0 {
            return;
        }
        let p = agents.position[0];
        info!(
            "{tick}: npc0 at ({:6.2}, {:6.2}) wp{} speed {:.2} anim {:.2}",
            p.x,
            p.z,
            agents.current_waypoint[0],
            agents.speed[0],
            agents.animation_rate[0],
        );
    }

    fn on_route_fault(&mut self, tick: Tick, fault: &RouteFault) {
        tracing::warn!("{tick}: {fault}");
    }

    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
        self.held_ticks += report.held;
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!("simulation finished at {final_tick} ({} held agent-ticks)", self.held_ticks);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = SimConfig {
        total_ticks: TOTAL_TICKS,
        dt_secs: DT_SECS,
        seed: SEED,
        num_threads: None,
    };

    let mut sim = SimBuilder::new(config)
        .route(plaza_square()?)
        .route(ring_road()?)
        // Pedestrians: spacing and direction resolved at startup.
        .spawn_many(AgentSpec::npc(PLAZA), NPC_COUNT)
        // Vehicles: a hand-staggered fleet, one per road side.
        .spawn(AgentSpec::vehicle(RING_ROAD).placed_at(0, 0.0))
        .spawn(AgentSpec::vehicle(RING_ROAD).placed_at(1, 0.33))
        .spawn(AgentSpec::vehicle(RING_ROAD).placed_at(2, 0.66))
        .build()?;

    info!(
        "running {} agents on {} routes for {} ticks (dt = {}s)",
        sim.agents.count,
        sim.routes.len(),
        TOTAL_TICKS,
        DT_SECS
    );

    let mut observer = ConsoleObserver {
        sample_interval: 10, // once per simulated second
        held_ticks: 0,
    };
    sim.run(&mut observer);

    // Final fleet summary.
    for id in sim.agents.agent_ids() {
        let i = id.index();
        let p = sim.agents.position[i];
        info!(
            "{} {:7}: ({:6.2}, {:6.2}) wp{} d={:5.2}",
            id,
            sim.agents.class[i].to_string(),
            p.x,
            p.z,
            sim.agents.current_waypoint[i],
            sim.agents.distance_along[i],
        );
    }

    Ok(())
}
