/// Client error type
///
/// [`ClientError::NotAuthenticated`] is what callers see when they try an
/// identity-requiring operation on an anonymous session; a UI treats it as
/// "send the user to the login screen".

use uuid::Uuid;

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Error type for client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Operation needs a logged-in session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Server answered with a non-2xx status
    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Task is not on the local board
    #[error("Task {0} is not on the board")]
    UnknownTask(Uuid),

    /// Transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Token storage failed
    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    /// True for a 401 from the server
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }

    /// Server error code (`conflict`, `invalid_credentials`, ...), if any
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}
