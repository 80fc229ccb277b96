//! The `Route` type: a closed loop of exactly four waypoints.

use glam::Vec3;

use plaza_core::RouteId;

use crate::{RouteError, RouteResult};

/// Number of waypoints in every loop.  Segment `i` spans waypoint `i` to
/// waypoint `(i + 1) % 4`; segment 3 closes the loop.
pub const WAYPOINT_COUNT: usize = 4;

/// Segments shorter than this are degenerate: they have no usable direction
/// and would divide by ~zero during interpolation.  Agents whose current leg
/// is degenerate hold position instead.
pub const MIN_SEGMENT_LENGTH: f32 = 1e-4;

// ── Leg ───────────────────────────────────────────────────────────────────────

/// The geometry of one traversal step: from the waypoint an agent last
/// passed to the waypoint it is heading for, honoring travel direction.
///
/// Reverse traversal of the loop walks the same four segments backwards, so
/// a leg's `length` always equals one of the route's segment lengths.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Leg {
    /// Waypoint the agent last passed.
    pub start: Vec3,
    /// Waypoint the agent is heading for.
    pub end: Vec3,
    /// `distance(start, end)`.
    pub length: f32,
    /// Index of the waypoint at `end`.
    pub next_waypoint: u8,
}

impl Leg {
    /// Unit travel direction, or `Vec3::ZERO` for a degenerate leg.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).normalize_or_zero()
    }

    /// `true` when this leg is too short to travel (see
    /// [`MIN_SEGMENT_LENGTH`]).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length < MIN_SEGMENT_LENGTH
    }

    /// Point at fraction `t` of the leg (`t` in `[0, 1]`).
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.start.lerp(self.end, t)
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// A closed loop of four world-space waypoints with precomputed lengths.
///
/// Immutable after construction; the movement pass shares `&Route` across
/// all agent computations of a tick.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    id: RouteId,
    points: [Vec3; WAYPOINT_COUNT],
    segment_lengths: [f32; WAYPOINT_COUNT],
    total_length: f32,
}

impl Route {
    /// Build a route from four ordered waypoints.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NonFiniteWaypoint`] if any coordinate is NaN or
    /// infinite.  Coincident waypoints are accepted here — the engine
    /// degrades gracefully — but [`Route::validate`] reports them so hosts
    /// can reject bad authoring data up front.
    pub fn new(id: RouteId, points: [Vec3; WAYPOINT_COUNT]) -> RouteResult<Self> {
        for (i, p) in points.iter().enumerate() {
            if !p.is_finite() {
                return Err(RouteError::NonFiniteWaypoint {
                    route: id,
                    index: i as u8,
                });
            }
        }

        let mut segment_lengths = [0.0f32; WAYPOINT_COUNT];
        for i in 0..WAYPOINT_COUNT {
            segment_lengths[i] = points[i].distance(points[(i + 1) % WAYPOINT_COUNT]);
        }
        let total_length = segment_lengths.iter().sum();

        Ok(Self {
            id,
            points,
            segment_lengths,
            total_length,
        })
    }

    #[inline]
    pub fn id(&self) -> RouteId {
        self.id
    }

    /// All four waypoints in loop order.
    #[inline]
    pub fn points(&self) -> &[Vec3; WAYPOINT_COUNT] {
        &self.points
    }

    /// Waypoint by index (wraps mod 4).
    #[inline]
    pub fn waypoint(&self, index: u8) -> Vec3 {
        self.points[index as usize % WAYPOINT_COUNT]
    }

    /// Length of segment `segment` (wraps mod 4).
    #[inline]
    pub fn segment_length(&self, segment: u8) -> f32 {
        self.segment_lengths[segment as usize % WAYPOINT_COUNT]
    }

    /// Total loop length `L` — the sum of all four segment lengths.
    #[inline]
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// The waypoint reached after leaving `waypoint` travelling in
    /// `direction` (`+1` forward, `-1` reverse).
    #[inline]
    pub fn next_waypoint(waypoint: u8, direction: i8) -> u8 {
        ((waypoint as i32 + direction as i32 + WAYPOINT_COUNT as i32) % WAYPOINT_COUNT as i32)
            as u8
    }

    /// Traversal geometry for an agent at `waypoint` moving in `direction`.
    pub fn leg(&self, waypoint: u8, direction: i8) -> Leg {
        let next = Self::next_waypoint(waypoint, direction);
        let start = self.waypoint(waypoint);
        let end = self.waypoint(next);
        Leg {
            start,
            end,
            length: start.distance(end),
            next_waypoint: next,
        }
    }

    /// Decompose a forward arc-length position into `(waypoint, offset)`.
    ///
    /// Walks the cumulative segment lengths from waypoint 0; `arc` values
    /// outside `[0, L)` wrap around the loop.  Used by the even-spacing
    /// initializer.  For a zero-length loop the decomposition collapses to
    /// `(0, 0.0)`.
    pub fn locate(&self, arc: f32) -> (u8, f32) {
        if self.total_length < MIN_SEGMENT_LENGTH {
            return (0, 0.0);
        }
        let mut remaining = arc.rem_euclid(self.total_length);
        for segment in 0..WAYPOINT_COUNT as u8 {
            let len = self.segment_length(segment);
            if remaining < len {
                return (segment, remaining);
            }
            remaining -= len;
        }
        // Float residue at exactly L wraps back to the loop start.
        (0, 0.0)
    }

    /// Index of the first degenerate segment, if any.
    pub fn degenerate_segment(&self) -> Option<u8> {
        (0..WAYPOINT_COUNT as u8).find(|&s| self.segment_length(s) < MIN_SEGMENT_LENGTH)
    }

    /// Reject routes with coincident waypoints.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::DegenerateSegment`] naming the first offending
    /// segment.
    pub fn validate(&self) -> RouteResult<()> {
        match self.degenerate_segment() {
            Some(segment) => Err(RouteError::DegenerateSegment {
                route: self.id,
                segment,
            }),
            None => Ok(()),
        }
    }
}
