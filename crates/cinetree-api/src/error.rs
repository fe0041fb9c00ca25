//! Error types shared by every layer of the crate.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Structural violations found at the top level of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A first-level entry has an empty name.
    #[error("illegal JSON with empty top level name")]
    EmptyKey,

    /// Two first-level entries share a name.
    #[error("illegal JSON with duplicate top level name `{0}`")]
    DuplicateKey(String),
}

/// Failures reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("TMDB API error (HTTP {http}): code={code}, message={message}")]
    Status {
        /// HTTP status code.
        http: u16,
        /// TMDB `status_code` from the error body (0 if absent).
        code: i64,
        /// TMDB `status_message`, or the raw body when it was not JSON.
        message: String,
    },
}

/// Every error the library can return.
#[derive(Debug, Error)]
pub enum Error {
    /// The input was not well-formed JSON.
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document violates the top-level structure rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A tree was requested from an empty or moved-from view.
    #[error("illegal access to invalid tree")]
    InvalidState,

    /// A required field is absent.
    #[error("required field `{0}` is missing")]
    FieldMissing(String),

    /// A field is present but holds the wrong kind of value.
    #[error("field `{field}` is not a {expected}")]
    FieldTypeMismatch {
        /// Field name.
        field: String,
        /// Name of the expected JSON kind.
        expected: &'static str,
    },

    /// No API key was passed and the environment has none.
    #[error("no API key given and environment variable {0} is not set")]
    MissingCredential(String),

    /// Fetching or parsing the remote configuration failed.
    #[error("session bootstrap failed: {0}")]
    BootstrapFailure(#[source] Box<Self>),

    /// The transport collaborator failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A request URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Builds a [`Error::FieldTypeMismatch`].
    pub(crate) fn mismatch(field: &str, expected: &'static str) -> Self {
        Self::FieldTypeMismatch {
            field: String::from(field),
            expected,
        }
    }
}
