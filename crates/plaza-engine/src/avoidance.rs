//! Neighbor resolution: how one agent's speed and steer bias react to the
//! agents around it.

use glam::Vec3;

use plaza_core::{AgentClass, AvoidancePolicy, PROXIMITY_EPSILON, flat_perpendicular};

use crate::snapshot::AgentSnapshot;

// ── ClassProfile ──────────────────────────────────────────────────────────────

/// The tunable constants of the movement pass for one agent class.
///
/// Defaults come from [`AgentClass`]; override individual fields (via
/// [`MovementEngine::with_profile`][crate::MovementEngine::with_profile]) to
/// experiment with, e.g., accumulate-all vehicles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClassProfile {
    /// How multiple qualifying neighbors combine.
    pub policy: AvoidancePolicy,
    /// Forward-cone threshold for the "ahead" test.
    pub ahead_dot_threshold: f32,
    /// Floor on the proportional slowdown factor.
    pub min_slow_factor: f32,
    /// Whether agents sidestep laterally inside the avoidance radius.
    pub steers: bool,
    /// Whether agents publish `speed / max_speed` to the animation sink.
    pub emits_animation_rate: bool,
}

impl ClassProfile {
    /// The stock profile for `class`.
    pub fn for_class(class: AgentClass) -> Self {
        Self {
            policy: class.avoidance_policy(),
            ahead_dot_threshold: class.ahead_dot_threshold(),
            min_slow_factor: class.min_slow_factor(),
            steers: class.steers(),
            emits_animation_rate: class.emits_animation_rate(),
        }
    }
}

// ── Reaction ──────────────────────────────────────────────────────────────────

/// Outcome of one agent's neighbor scan.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Reaction {
    /// Resolved speed, already within `[0, max_speed]`.
    pub candidate_speed: f32,
    /// Sum of lateral avoidance contributions (unnormalized).  Zero when no
    /// neighbor forced a sidestep — or when contributions cancelled.
    pub steer: Vec3,
}

impl Reaction {
    /// `true` when some lateral bias survived accumulation.
    #[inline]
    pub fn steering(&self) -> bool {
        self.steer != Vec3::ZERO
    }
}

// ── Neighbor scan ─────────────────────────────────────────────────────────────

/// Resolve agent `me`'s speed and steer bias against the snapshot.
///
/// Scans every other agent sharing `me`'s route.  A neighbor qualifies when
/// it is within detection range, not coincident (`dist > PROXIMITY_EPSILON`,
/// which also covers self-overlap), and ahead of `me`'s heading per the
/// profile's dot threshold.  Inside the avoidance radius the candidate speed
/// is zero and (steering classes only) a horizontal perpendicular is
/// accumulated; between the radii speed scales linearly, floored at
/// `min_slow_factor`.
///
/// `AccumulateAll` keeps the minimum candidate over the whole scan;
/// `FirstMatchWins` stops at the first qualifying neighbor.
pub(crate) fn resolve_neighbors(
    me: usize,
    agents: &[AgentSnapshot],
    forward: Vec3,
    profile: &ClassProfile,
) -> Reaction {
    let my = &agents[me];
    let mut candidate = my.max_speed;
    let mut steer = Vec3::ZERO;

    for (j, other) in agents.iter().enumerate() {
        if j == me || other.route != my.route {
            continue;
        }

        let to_other = other.position - my.position;
        let dist = to_other.length();
        if dist >= my.detection_range || dist <= PROXIMITY_EPSILON {
            continue;
        }

        let to_other_norm = to_other / dist;
        if forward.dot(to_other_norm) <= profile.ahead_dot_threshold {
            continue;
        }

        let speed_here = if dist < my.avoidance_range {
            if profile.steers {
                steer += flat_perpendicular(to_other_norm);
            }
            0.0
        } else {
            // dist ∈ [avoidance, detection) implies the span is positive.
            let span = my.detection_range - my.avoidance_range;
            let slow = ((dist - my.avoidance_range) / span).clamp(profile.min_slow_factor, 1.0);
            my.max_speed * slow
        };
        candidate = candidate.min(speed_here);

        if profile.policy == AvoidancePolicy::FirstMatchWins {
            break;
        }
    }

    Reaction {
        candidate_speed: candidate,
        steer,
    }
}
