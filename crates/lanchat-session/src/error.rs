//! Error types for the session layer.

/// Errors from registry operations.
///
/// These cover the login step, the only place the registry can refuse
/// a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The requested username is empty or contains whitespace.
    #[error("invalid username {0:?}")]
    InvalidUsername(String),

    /// Another connection is already logged in under this name.
    #[error("username {0} is already taken")]
    UsernameTaken(String),

    /// The session is already logged in (as the given name).
    #[error("session already logged in as {0}")]
    AlreadyAuthenticated(String),
}
