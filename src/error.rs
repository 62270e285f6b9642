use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParkError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Booking Rejected: {0}")]
    BookingRejected(String),

    #[error("A booking submission is already in flight")]
    SubmissionInFlight,

    #[error("Not Found: {0}")]
    NotFound(String),
}

pub type ParkResult<T> = Result<T, ParkError>;
