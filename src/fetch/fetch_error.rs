use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    Network(String),
    EnvironmentUnavailable(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {msg}"),
            FetchError::EnvironmentUnavailable(msg) => {
                write!(f, "Browser automation unavailable: {msg}")
            }
        }
    }
}

impl Error for FetchError {}
