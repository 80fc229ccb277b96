//! Agent classes and their avoidance policy constants.
//!
//! The two classes share one movement pass; they differ only in the small
//! set of constants gathered here.  Pedestrians notice neighbors over a wide
//! forward cone, keep shuffling at reduced speed while slowing, sidestep
//! laterally when boxed in, and feed a walk-cycle rate to the animation
//! sink.  Vehicles use a narrow cone, brake fully to a stop, never leave
//! their lane, and stop scanning at the first obstruction ahead.

use std::fmt;

// ── AvoidancePolicy ───────────────────────────────────────────────────────────

/// How the neighbor scan combines multiple qualifying neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AvoidancePolicy {
    /// Consider every qualifying neighbor: take the minimum candidate speed
    /// and sum the lateral steer contributions.  Scan-order independent.
    AccumulateAll,

    /// React to the first qualifying neighbor found and stop scanning.
    /// Order-dependent: a driver fixates on the car directly ahead.
    FirstMatchWins,
}

impl fmt::Display for AvoidancePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvoidancePolicy::AccumulateAll => write!(f, "accumulate-all"),
            AvoidancePolicy::FirstMatchWins => write!(f, "first-match-wins"),
        }
    }
}

// ── AgentClass ────────────────────────────────────────────────────────────────

/// The two kinds of agents that circulate a waypoint loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentClass {
    /// Pedestrian-like actor.  May traverse the loop in either direction.
    Npc,
    /// Vehicle actor.  Always traverses the loop forward.
    Vehicle,
}

impl AgentClass {
    /// Dot-product threshold for the "is the neighbor ahead of me" test.
    ///
    /// A neighbor at bearing `b` qualifies when
    /// `dot(forward, normalize(to_other)) > threshold`.
    #[inline]
    pub fn ahead_dot_threshold(self) -> f32 {
        match self {
            AgentClass::Npc => 0.3,
            AgentClass::Vehicle => 0.5,
        }
    }

    /// Lower clamp on the proportional slowdown factor.
    ///
    /// Pedestrians never drop below 30 % of max speed while merely slowing
    /// (they still stop dead inside the avoidance radius); vehicles brake
    /// all the way to zero.
    #[inline]
    pub fn min_slow_factor(self) -> f32 {
        match self {
            AgentClass::Npc => 0.3,
            AgentClass::Vehicle => 0.0,
        }
    }

    /// Default neighbor-combination policy for this class.
    #[inline]
    pub fn avoidance_policy(self) -> AvoidancePolicy {
        match self {
            AgentClass::Npc => AvoidancePolicy::AccumulateAll,
            AgentClass::Vehicle => AvoidancePolicy::FirstMatchWins,
        }
    }

    /// Whether agents of this class sidestep laterally inside the avoidance
    /// radius.  Vehicles hold their lane and only brake.
    #[inline]
    pub fn steers(self) -> bool {
        matches!(self, AgentClass::Npc)
    }

    /// Whether this class publishes `speed / max_speed` to the animation sink.
    #[inline]
    pub fn emits_animation_rate(self) -> bool {
        matches!(self, AgentClass::Npc)
    }

    /// Whether this class may traverse the loop in reverse.
    #[inline]
    pub fn reversible(self) -> bool {
        matches!(self, AgentClass::Npc)
    }
}

impl fmt::Display for AgentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentClass::Npc => write!(f, "npc"),
            AgentClass::Vehicle => write!(f, "vehicle"),
        }
    }
}
