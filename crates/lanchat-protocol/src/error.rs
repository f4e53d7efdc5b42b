//! Error types for the protocol layer.
//!
//! Every variant here is recoverable from the server's point of view:
//! the engine turns it into an `ERR <reason>` line for the sender and
//! keeps going. The `#[error]` strings are the exact reasons clients see,
//! so changing one is a wire-protocol change.

/// A protocol violation reported back to the client as `ERR <reason>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// `LOGIN` with an empty username or one containing whitespace.
    #[error("invalid-username")]
    InvalidUsername,

    /// `LOGIN` with a name someone else already holds. The connecting
    /// session is closed right after this is sent.
    #[error("username-taken")]
    UsernameTaken,

    /// Anything other than `LOGIN` before authenticating.
    #[error("not-logged-in (send LOGIN <username>)")]
    NotLoggedIn,

    /// `DM` with a missing target or missing text.
    #[error("usage: DM <username> <text>")]
    DirectUsage,

    /// `DM` to a name that is not in the registry.
    #[error("user-not-found {0}")]
    UserNotFound(String),

    /// A line that matched no command (including a repeated `LOGIN`).
    #[error("unknown-command (use: MSG, WHO, PING, DM)")]
    UnknownCommand,

    /// The peer sent more than the framer's limit without a terminator.
    /// The connection is closed after this is sent.
    #[error("line-too-long")]
    LineTooLong {
        /// The configured cap, in bytes.
        limit: usize,
    },
}
