use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{what}: {source}")]
    Context {
        what: String,
        #[source]
        source: Box<NavError>,
    },
}

impl NavError {
    /// Wrap this error with a description of the resource that failed.
    pub fn context(self, what: impl Into<String>) -> Self {
        NavError::Context {
            what: what.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
