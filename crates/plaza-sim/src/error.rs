use plaza_agent::AgentError;
use plaza_route::RouteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("route error: {0}")]
    Route(#[from] RouteError),

    #[error("agent spawn error: {0}")]
    Agent(#[from] AgentError),
}

pub type SimResult<T> = Result<T, SimError>;
