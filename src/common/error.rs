//! Error types for webhdfs

use crate::client::envelope::RemoteException;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Config Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid parameter: {0}")]
    InvalidParam(String),

    // === Network Errors ===
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Operation timeout: {0}")]
    Timeout(String),

    #[error("Namenode {url} answered with status {status}{}", describe(.exception))]
    Status {
        status: u16,
        url: String,
        exception: Option<RemoteException>,
    },

    /// `cause` is the first answer that names a real service exception
    /// (a standby's refusal does not count), else the last failure.
    #[error("All {attempts} namenode(s) failed, tried {tried:?}: {cause}")]
    EndpointsExhausted {
        attempts: usize,
        tried: Vec<String>,
        #[source]
        cause: Box<Error>,
    },

    // === Write Protocol Errors ===
    #[error("No Location header in write redirect (status {status})")]
    MissingLocation { status: u16 },

    #[error("Invalid write redirect location: {0}")]
    InvalidLocation(String),

    #[error("Datanode rejected upload with status {status}{}", describe(.exception))]
    UploadRejected {
        status: u16,
        exception: Option<RemoteException>,
    },

    // === Response Errors ===
    #[error("Remote exception {}: {}", .0.exception, .0.message)]
    Remote(RemoteException),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response missing expected field: {0}")]
    MissingField(&'static str),

    // === Generic ===
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Does this error count against the current namenode?
    ///
    /// Retryable errors make the dispatcher rotate to the next endpoint;
    /// everything else is returned to the caller straight away.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::ConnectionFailed(_)
                | Error::Timeout(_)
                | Error::Status { .. }
        )
    }

    /// The service-side exception carried by this error, if any.
    pub fn remote_exception(&self) -> Option<&RemoteException> {
        match self {
            Error::Remote(e) => Some(e),
            Error::Status { exception, .. } | Error::UploadRejected { exception, .. } => {
                exception.as_ref()
            }
            Error::EndpointsExhausted { cause, .. } => cause.remote_exception(),
            _ => None,
        }
    }

    /// True when the service reported that the path does not exist.
    pub fn is_not_found(&self) -> bool {
        self.remote_exception()
            .map(|e| e.exception == "FileNotFoundException")
            .unwrap_or(false)
    }

    /// A service exception other than an HA standby refusing the request.
    ///
    /// Such an answer is authoritative: retrying elsewhere cannot change it.
    pub fn is_service_answer(&self) -> bool {
        self.remote_exception()
            .map(|e| e.exception != STANDBY_EXCEPTION)
            .unwrap_or(false)
    }
}

const STANDBY_EXCEPTION: &str = "StandbyException";

fn describe(exception: &Option<RemoteException>) -> String {
    exception
        .as_ref()
        .map(|e| format!(" ({})", e))
        .unwrap_or_default()
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout(e.to_string())
        } else if e.is_connect() {
            Error::ConnectionFailed(e.to_string())
        } else {
            Error::Http(e.to_string())
        }
    }
}

// Implement From for common error types
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
