use plaza_core::RouteId;
use thiserror::Error;

/// Spawn-time validation failures.  `agent` is the spec's spawn-order index.
#[derive(Debug, Error, PartialEq)]
pub enum AgentError {
    #[error("agent {agent}: avoidance range {avoidance} exceeds detection range {detection}")]
    RangeOrder {
        agent: usize,
        detection: f32,
        avoidance: f32,
    },

    #[error("agent {agent}: {field} must be positive and finite, got {value}")]
    NonPositive {
        agent: usize,
        field: &'static str,
        value: f32,
    },

    #[error("agent {agent}: references unknown route {route}")]
    UnknownRoute { agent: usize, route: RouteId },

    #[error("agent {agent}: placement segment {segment} is out of range (0..=3)")]
    PlacementSegment { agent: usize, segment: u8 },

    #[error("agent {agent}: placement fraction {fraction} is outside [0, 1]")]
    PlacementFraction { agent: usize, fraction: f32 },

    #[error("agent {agent}: vehicles always travel forward; direction preference is NPC-only")]
    VehicleDirection { agent: usize },
}

pub type AgentResult<T> = Result<T, AgentError>;
