//! The frame-consistent snapshot all agents read during one tick.

use glam::{Quat, Vec3};

use plaza_agent::AgentStore;
use plaza_core::{AgentClass, RouteId};

/// One agent's state as captured at tick start.
///
/// This is everything the movement pass reads about an agent — its own
/// record and every potential neighbor's.  Copied, not borrowed, so the
/// store can be written during commit without aliasing the scan.
#[derive(Copy, Clone, Debug)]
pub struct AgentSnapshot {
    pub position: Vec3,
    pub orientation: Quat,
    pub route: RouteId,
    pub class: AgentClass,
    pub current_waypoint: u8,
    pub direction: i8,
    pub distance_along: f32,
    pub max_speed: f32,
    pub detection_range: f32,
    pub avoidance_range: f32,
}

impl AgentSnapshot {
    /// The agent's forward vector (heading applied to local `+Z`).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }
}

/// Reusable snapshot buffer.
///
/// `fill_from` clears and repopulates in place; after the first tick the
/// allocation is warm and refills are pure copies — no per-tick arrays.
#[derive(Default)]
pub struct TickSnapshot {
    agents: Vec<AgentSnapshot>,
}

impl TickSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture all agents' scan fields from `store`.
    pub fn fill_from(&mut self, store: &AgentStore) {
        self.agents.clear();
        self.agents.reserve(store.count);
        for i in 0..store.count {
            self.agents.push(AgentSnapshot {
                position: store.position[i],
                orientation: store.orientation[i],
                route: store.route_id[i],
                class: store.class[i],
                current_waypoint: store.current_waypoint[i],
                direction: store.direction[i],
                distance_along: store.distance_along[i],
                max_speed: store.max_speed[i],
                detection_range: store.detection_range[i],
                avoidance_range: store.avoidance_range[i],
            });
        }
    }

    /// The captured view, indexed by `AgentId`.
    #[inline]
    pub fn agents(&self) -> &[AgentSnapshot] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
