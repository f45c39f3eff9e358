//! Error taxonomy for the admin service layer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Local precondition failure; no request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A mutation on this order is still in flight.
    #[error("another operation on this order is still in flight")]
    Busy,

    /// HTTP 401 from the backend. The operator session is gone.
    #[error("unauthorized")]
    Unauthorized,

    #[error("backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the dashboard must force a logout before anything else.
    pub fn requires_logout(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
