//! Core agent storage: the `AgentStore` SoA container.

use glam::{Quat, Vec3};

use plaza_core::{AgentClass, AgentId, RouteId};

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is
/// the index into all of them:
///
/// ```ignore
/// let pos = store.position[agent.index()];  // O(1), cache-friendly
/// ```
///
/// The spawn-time fields (`route_id`, `class`, `direction`, `max_speed`,
/// the two ranges, `hand_placed`) never change after construction.  The
/// movement engine owns the rest during simulation; the rendering sink
/// reads `position`, `orientation`, and `animation_rate` between ticks.
#[derive(Debug)]
pub struct AgentStore {
    /// Number of agents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    // ── Pose (engine-written, sink-read) ──────────────────────────────────
    /// World-space position.
    pub position: Vec<Vec3>,

    /// World-space heading; forward is the local `+Z` axis.
    pub orientation: Vec<Quat>,

    // ── Path progress ─────────────────────────────────────────────────────
    /// Index of the waypoint this agent last passed (`0..=3`).
    pub current_waypoint: Vec<u8>,

    /// Traversal direction around the loop: `+1` or `-1`, fixed at spawn.
    pub direction: Vec<i8>,

    /// World-length units travelled into the current segment.  Always less
    /// than the segment length except transiently at the wrap instant.
    pub distance_along: Vec<f32>,

    // ── Kinematics ────────────────────────────────────────────────────────
    /// Speed resolved by the latest tick, in `[0, max_speed]`.
    pub speed: Vec<f32>,

    /// Nominal travel speed.
    pub max_speed: Vec<f32>,

    // ── Sensing radii ─────────────────────────────────────────────────────
    /// "Notice and slow" radius.
    pub detection_range: Vec<f32>,

    /// "Imminent — stop/steer" radius.  Never exceeds `detection_range`.
    pub avoidance_range: Vec<f32>,

    // ── Grouping ──────────────────────────────────────────────────────────
    /// The loop this agent circulates.  Agents only influence same-route
    /// agents.
    pub route_id: Vec<RouteId>,

    /// Agent class (pedestrian / vehicle).
    pub class: Vec<AgentClass>,

    // ── Derived outputs ───────────────────────────────────────────────────
    /// `speed / max_speed`, published for the animation sink.  Held at 1.0
    /// for classes that do not animate.
    pub animation_rate: Vec<f32>,

    // ── Initialization bookkeeping ────────────────────────────────────────
    /// `true` for agents seated from an explicit `Placement::At`; the
    /// even-spacing initializer leaves these untouched.
    pub hand_placed: Vec<bool>,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// The agent's forward vector (its heading applied to local `+Z`).
    #[inline]
    pub fn forward(&self, agent: AgentId) -> Vec3 {
        self.orientation[agent.index()] * Vec3::Z
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn with_capacity(count: usize) -> Self {
        Self {
            count: 0,
            position: Vec::with_capacity(count),
            orientation: Vec::with_capacity(count),
            current_waypoint: Vec::with_capacity(count),
            direction: Vec::with_capacity(count),
            distance_along: Vec::with_capacity(count),
            speed: Vec::with_capacity(count),
            max_speed: Vec::with_capacity(count),
            detection_range: Vec::with_capacity(count),
            avoidance_range: Vec::with_capacity(count),
            route_id: Vec::with_capacity(count),
            class: Vec::with_capacity(count),
            animation_rate: Vec::with_capacity(count),
            hand_placed: Vec::with_capacity(count),
        }
    }
}
