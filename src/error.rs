use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Transport Error: {0}")]
    Transport(Box<ureq::Transport>),
    #[error("Request for {point} failed with status {code}")]
    Status { point: String, code: u16 },
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Field '{field}' not found for {point}")]
    MissingField { point: String, field: &'static str },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Repetition did not finish within {0:?}")]
    PoolTimeout(Duration),
    #[error("Thread pool Error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<ureq::Transport> for BenchError {
    fn from(err: ureq::Transport) -> Self {
        BenchError::Transport(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
