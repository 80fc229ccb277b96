//! Fluent builder turning a batch of [`AgentSpec`]s into an [`AgentStore`].
//!
//! # Usage
//!
//! ```ignore
//! let mut rng = SimRng::new(42);
//! let store = AgentStoreBuilder::new()
//!     .spawn_many(AgentSpec::npc(RouteId(0)), 6)
//!     .spawn(AgentSpec::vehicle(RouteId(1)).placed_at(0, 0.25))
//!     .build(&routes, &mut rng)?;
//! ```
//!
//! `build` is the single validation gate for authoring data: range ordering,
//! speed positivity, route existence, and placement bounds are all checked
//! here so the engine can index blindly afterwards.

use glam::Vec3;

use plaza_core::{AgentClass, SimRng, look_rotation};
use plaza_route::RouteTable;

use crate::spec::{AgentSpec, DirectionChoice, Placement};
use crate::{AgentError, AgentResult, AgentStore};

/// Fluent builder for [`AgentStore`].
///
/// Specs accumulate in spawn order; the spawn index becomes the `AgentId`.
#[derive(Default)]
pub struct AgentStoreBuilder {
    specs: Vec<AgentSpec>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one agent.
    pub fn spawn(mut self, spec: AgentSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Queue `n` agents sharing one spec.
    pub fn spawn_many(mut self, spec: AgentSpec, n: usize) -> Self {
        self.specs.extend(std::iter::repeat_n(spec, n));
        self
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Validate every spec and build the store.
    ///
    /// `rng` resolves `DirectionChoice::Random`; injecting it keeps spawn
    /// outcomes reproducible from the master seed.
    ///
    /// # Errors
    ///
    /// Returns the first [`AgentError`] encountered, tagged with the
    /// offending spec's spawn index.
    pub fn build(self, routes: &RouteTable, rng: &mut SimRng) -> AgentResult<AgentStore> {
        let mut store = AgentStore::with_capacity(self.specs.len());

        for (i, spec) in self.specs.into_iter().enumerate() {
            validate_ranges(i, &spec)?;

            let route = routes
                .get(spec.route)
                .ok_or(AgentError::UnknownRoute {
                    agent: i,
                    route: spec.route,
                })?;

            let direction = resolve_direction(i, &spec, rng)?;

            let (waypoint, distance, hand_placed) = match spec.placement {
                Placement::EvenSpacing => (0u8, 0.0f32, false),
                Placement::At { segment, fraction } => {
                    if segment as usize >= plaza_route::WAYPOINT_COUNT {
                        return Err(AgentError::PlacementSegment { agent: i, segment });
                    }
                    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
                        return Err(AgentError::PlacementFraction { agent: i, fraction });
                    }
                    let leg = route.leg(segment, direction);
                    (segment, fraction * leg.length, true)
                }
            };

            // Initial pose: seat the agent on its leg facing travel direction.
            // A degenerate starting leg pins the agent at the waypoint; the
            // engine reports the route fault on the first tick.
            let leg = route.leg(waypoint, direction);
            let position = if leg.is_degenerate() {
                leg.start
            } else {
                leg.point_at(distance / leg.length)
            };
            let orientation = look_rotation(leg.direction(), Vec3::Y);

            store.position.push(position);
            store.orientation.push(orientation);
            store.current_waypoint.push(waypoint);
            store.direction.push(direction);
            store.distance_along.push(distance);
            store.speed.push(spec.max_speed);
            store.max_speed.push(spec.max_speed);
            store.detection_range.push(spec.detection_range);
            store.avoidance_range.push(spec.avoidance_range);
            store.route_id.push(spec.route);
            store.class.push(spec.class);
            store.animation_rate.push(1.0);
            store.hand_placed.push(hand_placed);
        }

        store.count = store.position.len();
        Ok(store)
    }
}

// ── Validation helpers ────────────────────────────────────────────────────────

fn validate_ranges(i: usize, spec: &AgentSpec) -> AgentResult<()> {
    if !spec.max_speed.is_finite() || spec.max_speed <= 0.0 {
        return Err(AgentError::NonPositive {
            agent: i,
            field: "max_speed",
            value: spec.max_speed,
        });
    }
    if !spec.detection_range.is_finite() || spec.detection_range <= 0.0 {
        return Err(AgentError::NonPositive {
            agent: i,
            field: "detection_range",
            value: spec.detection_range,
        });
    }
    if !spec.avoidance_range.is_finite() || spec.avoidance_range < 0.0 {
        return Err(AgentError::NonPositive {
            agent: i,
            field: "avoidance_range",
            value: spec.avoidance_range,
        });
    }
    if spec.avoidance_range > spec.detection_range {
        return Err(AgentError::RangeOrder {
            agent: i,
            detection: spec.detection_range,
            avoidance: spec.avoidance_range,
        });
    }
    Ok(())
}

fn resolve_direction(i: usize, spec: &AgentSpec, rng: &mut SimRng) -> AgentResult<i8> {
    match (spec.class, spec.direction) {
        (AgentClass::Vehicle, DirectionChoice::Forward) => Ok(1),
        (AgentClass::Vehicle, _) => Err(AgentError::VehicleDirection { agent: i }),
        (AgentClass::Npc, DirectionChoice::Forward) => Ok(1),
        (AgentClass::Npc, DirectionChoice::Reverse) => Ok(-1),
        (AgentClass::Npc, DirectionChoice::Random) => Ok(if rng.gen_bool(0.5) { 1 } else { -1 }),
    }
}
