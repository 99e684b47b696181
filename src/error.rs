// Error types shared across layers
use thiserror::Error;

/// Why a measurement request produced no usable page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body is not a measurement page
    #[error("malformed measurement payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid window: start {start} must be before end {end}")]
    InvalidWindow { start: i64, end: i64 },

    #[error("window {start}..{end} cannot move by {delta}s without leaving the timestamp range")]
    WindowOutOfRange { start: i64, end: i64, delta: i64 },

    #[error("no container for graph '{0}'")]
    MissingContainer(String),

    #[error("no graph named '{0}'")]
    UnknownGraph(String),

    #[error("dashboard is not initialized")]
    NotInitialized,

    #[error("no window has been shown yet")]
    NoActiveWindow,

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
