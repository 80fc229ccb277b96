//! Spawn-time agent descriptions, as handed over by the authoring layer.

use plaza_core::{AgentClass, RouteId};

// ── DirectionChoice ───────────────────────────────────────────────────────────

/// Traversal direction preference for a new agent.
///
/// The resolved direction is fixed for the agent's lifetime.  Only NPC-class
/// agents may travel in reverse; vehicles are always forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionChoice {
    /// Walk the loop in waypoint order (`+1`).
    Forward,
    /// Walk the loop against waypoint order (`-1`).
    Reverse,
    /// Pick forward or reverse uniformly at random at spawn.
    Random,
}

// ── Placement ─────────────────────────────────────────────────────────────────

/// Where a new agent starts on its loop.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Let the initializer distribute this agent evenly along the loop's arc
    /// length together with its route-mates.
    EvenSpacing,

    /// Start exactly at `fraction` (in `[0, 1]`) of segment `segment`.
    ///
    /// Used to stagger a small hand-placed fleet without the initializer.
    At { segment: u8, fraction: f32 },
}

// ── AgentSpec ─────────────────────────────────────────────────────────────────

/// Everything the simulation needs to know about one agent at spawn.
///
/// The class constructors carry the stock tuning for each agent kind;
/// override individual fields with the `with_*` methods.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    pub class: AgentClass,
    pub route: RouteId,
    /// Nominal travel speed in world units per second.
    pub max_speed: f32,
    /// Radius at which the agent notices a neighbor ahead and slows.
    pub detection_range: f32,
    /// Closer radius at which the agent stops (and, for NPCs, steers).
    /// Must not exceed `detection_range`.
    pub avoidance_range: f32,
    pub direction: DirectionChoice,
    pub placement: Placement,
}

impl AgentSpec {
    /// A pedestrian with stock tuning: ambling speed, wide sensing.
    pub fn npc(route: RouteId) -> Self {
        Self {
            class: AgentClass::Npc,
            route,
            max_speed: 1.5,
            detection_range: 3.0,
            avoidance_range: 1.5,
            direction: DirectionChoice::Random,
            placement: Placement::EvenSpacing,
        }
    }

    /// A vehicle with stock tuning: faster, longer braking distance.
    pub fn vehicle(route: RouteId) -> Self {
        Self {
            class: AgentClass::Vehicle,
            route,
            max_speed: 5.0,
            detection_range: 5.0,
            avoidance_range: 2.0,
            direction: DirectionChoice::Forward,
            placement: Placement::EvenSpacing,
        }
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_ranges(mut self, detection: f32, avoidance: f32) -> Self {
        self.detection_range = detection;
        self.avoidance_range = avoidance;
        self
    }

    pub fn with_direction(mut self, direction: DirectionChoice) -> Self {
        self.direction = direction;
        self
    }

    /// Hand-place this agent at `fraction` of `segment` instead of letting
    /// the initializer space it.
    pub fn placed_at(mut self, segment: u8, fraction: f32) -> Self {
        self.placement = Placement::At { segment, fraction };
        self
    }
}
