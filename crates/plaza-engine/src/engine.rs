//! The `MovementEngine` and its tick pass.

use glam::{Quat, Vec3};

use plaza_agent::AgentStore;
use plaza_core::{AgentClass, RouteId, look_rotation};
use plaza_route::{Route, RouteTable};

use crate::avoidance::{ClassProfile, resolve_neighbors};
use crate::fault::{FaultKind, RouteFault};
use crate::snapshot::{AgentSnapshot, TickSnapshot};
use crate::spacing::{SpacingState, space_evenly};

#[cfg(feature = "fx-hash")]
use rustc_hash::{FxHashMap as Map, FxHashSet as Set};
#[cfg(not(feature = "fx-hash"))]
use std::collections::{HashMap as Map, HashSet as Set};

/// World units per second an avoiding agent is nudged sideways.
const LATERAL_STEP_RATE: f32 = 0.3;

/// Weight of the steer bias when blending the look direction.
const STEER_LOOK_BLEND: f32 = 0.5;

// ── TickReport ────────────────────────────────────────────────────────────────

/// What one tick did, for observers and logging.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    /// Agents that advanced (including those momentarily stopped by a
    /// neighbor — they still ran the full pass).
    pub moved: usize,
    /// Agents frozen by a route fault this tick.
    pub held: usize,
    /// Faults discovered this tick.  Each distinct fault appears in exactly
    /// one report over the engine's lifetime.
    pub faults: Vec<RouteFault>,
}

// ── Per-agent update record ───────────────────────────────────────────────────

/// One agent's computed next state, buffered until commit.
#[derive(Copy, Clone, Debug)]
struct AgentUpdate {
    position: Vec3,
    orientation: Quat,
    current_waypoint: u8,
    distance_along: f32,
    speed: f32,
    animation_rate: f32,
    fault: Option<FaultKind>,
}

impl AgentUpdate {
    /// Freeze `agent` in place for this tick.
    fn hold(agent: &AgentSnapshot, profile: &ClassProfile, fault: FaultKind) -> Self {
        Self {
            position: agent.position,
            orientation: agent.orientation,
            current_waypoint: agent.current_waypoint,
            distance_along: agent.distance_along,
            speed: 0.0,
            animation_rate: if profile.emits_animation_rate { 0.0 } else { 1.0 },
            fault: Some(fault),
        }
    }
}

// ── MovementEngine ────────────────────────────────────────────────────────────

/// The per-tick movement and avoidance pass.
///
/// Owns the reusable snapshot/update buffers, the per-route spacing state
/// machine, and the fault-dedup set.  Agent records live in the
/// [`AgentStore`] the caller passes to [`tick`][MovementEngine::tick]; the
/// engine is the only writer during simulation.
pub struct MovementEngine {
    npc_profile: ClassProfile,
    vehicle_profile: ClassProfile,

    /// Read buffer: the frame-consistent view (reused across ticks).
    snapshot: TickSnapshot,

    /// Write buffer: per-agent updates awaiting commit (reused across ticks).
    updates: Vec<AgentUpdate>,

    /// Agent indices per route, in ascending (spawn) order.  Route
    /// membership is fixed at spawn, so this is built once.
    members: Map<RouteId, Vec<u32>>,
    members_built: bool,

    /// Per-route initialization state machine.
    spacing: Map<RouteId, SpacingState>,

    /// Faults already surfaced; repeats are silenced.
    reported: Set<RouteFault>,
}

impl Default for MovementEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementEngine {
    /// Engine with the stock per-class profiles.
    pub fn new() -> Self {
        Self {
            npc_profile: ClassProfile::for_class(AgentClass::Npc),
            vehicle_profile: ClassProfile::for_class(AgentClass::Vehicle),
            snapshot: TickSnapshot::new(),
            updates: Vec::new(),
            members: Map::default(),
            members_built: false,
            spacing: Map::default(),
            reported: Set::default(),
        }
    }

    /// Override the profile used for `class`.
    pub fn with_profile(mut self, class: AgentClass, profile: ClassProfile) -> Self {
        match class {
            AgentClass::Npc => self.npc_profile = profile,
            AgentClass::Vehicle => self.vehicle_profile = profile,
        }
        self
    }

    /// The profile currently in effect for `class`.
    pub fn profile(&self, class: AgentClass) -> &ClassProfile {
        match class {
            AgentClass::Npc => &self.npc_profile,
            AgentClass::Vehicle => &self.vehicle_profile,
        }
    }

    /// Initialization state of `route`'s spacing pass.
    pub fn spacing_state(&self, route: RouteId) -> SpacingState {
        self.spacing.get(&route).copied().unwrap_or_default()
    }

    /// Run one full tick over `store`.
    ///
    /// `dt` is the simulated seconds this tick represents.  All writes are
    /// committed before the method returns; the caller may publish the store
    /// to its rendering sink immediately after.
    pub fn tick(&mut self, store: &mut AgentStore, routes: &RouteTable, dt: f32) -> TickReport {
        let mut report = TickReport::default();
        if store.is_empty() {
            return report;
        }

        self.build_members(store);

        // ── Phase 1: one-shot even spacing per route-group ────────────────
        //
        // Strictly before the movement pass so freshly spaced agents get a
        // pose from their new seat this same tick.
        let members = &self.members;
        let spacing = &mut self.spacing;
        for (&route_id, group) in members {
            let state = spacing.entry(route_id).or_default();
            if *state == SpacingState::Initialized {
                continue;
            }
            let Some(route) = routes.get(route_id) else {
                // Missing route surfaces as an UnknownRoute fault below.
                continue;
            };
            if space_evenly(store, route, group) {
                *state = SpacingState::Initialized;
            }
        }

        // ── Phase 2: frame-consistent snapshot ────────────────────────────
        self.snapshot.fill_from(store);

        // ── Phase 3: per-agent compute ────────────────────────────────────
        //
        // Explicit field borrows so the closure only captures shared data.
        let snap = self.snapshot.agents();
        let npc_profile = &self.npc_profile;
        let vehicle_profile = &self.vehicle_profile;
        let updates = &mut self.updates;

        let step = |i: usize| -> AgentUpdate {
            let agent = &snap[i];
            let profile = match agent.class {
                AgentClass::Npc => npc_profile,
                AgentClass::Vehicle => vehicle_profile,
            };
            match routes.get(agent.route) {
                None => AgentUpdate::hold(agent, profile, FaultKind::UnknownRoute),
                Some(route) => step_agent(i, snap, route, profile, dt),
            }
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..snap.len())
                .into_par_iter()
                .map(step)
                .collect_into_vec(updates);
        }

        #[cfg(not(feature = "parallel"))]
        {
            updates.clear();
            updates.extend((0..snap.len()).map(step));
        }

        // ── Phase 4: sequential commit + fault reporting ──────────────────
        let updates = &self.updates;
        let reported = &mut self.reported;
        for (i, update) in updates.iter().enumerate() {
            store.position[i] = update.position;
            store.orientation[i] = update.orientation;
            store.current_waypoint[i] = update.current_waypoint;
            store.distance_along[i] = update.distance_along;
            store.speed[i] = update.speed;
            store.animation_rate[i] = update.animation_rate;

            match update.fault {
                None => report.moved += 1,
                Some(kind) => {
                    report.held += 1;
                    let fault = RouteFault {
                        route: store.route_id[i],
                        kind,
                    };
                    if reported.insert(fault) {
                        tracing::warn!(%fault, "route fault; affected agents hold position");
                        report.faults.push(fault);
                    }
                }
            }
        }

        report
    }

    fn build_members(&mut self, store: &AgentStore) {
        if self.members_built {
            return;
        }
        for (i, &route_id) in store.route_id.iter().enumerate() {
            self.members.entry(route_id).or_default().push(i as u32);
        }
        self.members_built = true;
    }
}

// ── Per-agent step ────────────────────────────────────────────────────────────

/// Compute one agent's next state from the snapshot.  Pure: reads only
/// `snap` and its arguments, so it can run on any thread in any order.
fn step_agent(
    i: usize,
    snap: &[AgentSnapshot],
    route: &Route,
    profile: &ClassProfile,
    dt: f32,
) -> AgentUpdate {
    let agent = &snap[i];

    let mut leg = route.leg(agent.current_waypoint, agent.direction);
    if leg.is_degenerate() {
        return AgentUpdate::hold(
            agent,
            profile,
            FaultKind::DegenerateSegment(agent.current_waypoint),
        );
    }

    // ── Neighbor resolution ───────────────────────────────────────────────
    let reaction = resolve_neighbors(i, snap, agent.forward(), profile);
    let speed = reaction.candidate_speed.min(agent.max_speed);

    // ── Path advancement ──────────────────────────────────────────────────
    let mut waypoint = agent.current_waypoint;
    let mut distance = agent.distance_along + speed * dt;
    if distance >= leg.length {
        distance = 0.0;
        waypoint = leg.next_waypoint;
        leg = route.leg(waypoint, agent.direction);
        if leg.is_degenerate() {
            // Wrapped onto a collapsed segment: park at its start waypoint.
            return AgentUpdate {
                position: leg.start,
                orientation: agent.orientation,
                current_waypoint: waypoint,
                distance_along: 0.0,
                speed: 0.0,
                animation_rate: if profile.emits_animation_rate { 0.0 } else { 1.0 },
                fault: Some(FaultKind::DegenerateSegment(waypoint)),
            };
        }
    }

    // ── Pose output ───────────────────────────────────────────────────────
    let travel_dir = leg.direction();
    let mut position = leg.point_at(distance / leg.length);
    let mut look = travel_dir;

    if reaction.steering() {
        let steer_dir = reaction.steer.normalize_or_zero();
        position += steer_dir * LATERAL_STEP_RATE * dt;
        let blended = (travel_dir + steer_dir * STEER_LOOK_BLEND).normalize_or_zero();
        if blended != Vec3::ZERO {
            look = blended;
        }
    }

    AgentUpdate {
        position,
        orientation: look_rotation(look, Vec3::Y),
        current_waypoint: waypoint,
        distance_along: distance,
        speed,
        animation_rate: if profile.emits_animation_rate {
            speed / agent.max_speed
        } else {
            1.0
        },
        fault: None,
    }
}
