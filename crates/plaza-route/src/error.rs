use plaza_core::RouteId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route {route} waypoint {index} has a non-finite coordinate")]
    NonFiniteWaypoint { route: RouteId, index: u8 },

    #[error("route {route} segment {segment} is degenerate (coincident waypoints)")]
    DegenerateSegment { route: RouteId, segment: u8 },

    #[error("route {0} is already registered")]
    DuplicateRoute(RouteId),
}

pub type RouteResult<T> = Result<T, RouteError>;
