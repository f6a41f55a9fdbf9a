/// Error types for the Search Console client library
use thiserror::Error;

/// Main error type for Search Console operations
#[derive(Error, Debug)]
pub enum GscError {
    /// Service account key file could not be read
    #[error("Failed to read service account key {path}: {source}")]
    CredentialRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Service account key file is not valid JSON or misses required fields
    #[error("Failed to parse service account key: {0}")]
    CredentialParse(#[from] serde_json::Error),

    /// Signing the OAuth token assertion failed
    #[error("Failed to sign token assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The identity provider rejected the token grant
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API request failed with status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The site identifier could not be encoded into the endpoint URL
    #[error("Invalid site URL: {0}")]
    InvalidSiteUrl(String),

    /// A response row's key values did not line up with the requested dimensions
    #[error("Malformed response row: expected {expected} dimension keys, found {found}")]
    MalformedRow { expected: usize, found: usize },
}

/// Type alias for Results using GscError
pub type Result<T> = std::result::Result<T, GscError>;
