//! Error types for status sources.

use thiserror::Error;

/// Errors that can occur while obtaining the status text.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The router rejected the username or password.
    #[error("Authentication failed: got \"{0}\", so username/password incorrect")]
    AuthenticationFailed(String),

    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection to the router failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// A configured URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The login page has no form with the configured id.
    #[error("Could not find login form #{0}")]
    LoginFormNotFound(String),

    /// The statistics page has no element with the configured id.
    #[error("Could not find {0}")]
    StatusElementNotFound(String),

    /// Reading a saved page failed.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}
