//! Unified error type for the lanchat server.

use lanchat_protocol::ProtocolError;
use lanchat_transport::TransportError;

use crate::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// None of these take the whole server down except a failure to start
/// (bad config, bind failure). Inside a running server they end, at
/// worst, the one connection they happened on.
#[derive(Debug, thiserror::Error)]
pub enum LanChatError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error that ended a connection (line too long).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::Shutdown;
        let lanchat_err: LanChatError = err.into();
        assert!(matches!(lanchat_err, LanChatError::Transport(_)));
        assert_eq!(lanchat_err.to_string(), "transport shut down");
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::LineTooLong { limit: 4 };
        let lanchat_err: LanChatError = err.into();
        assert!(matches!(lanchat_err, LanChatError::Protocol(_)));
    }

    #[test]
    fn test_from_config_error() {
        let err = ConfigError::Invalid {
            key: "PORT",
            value: "x".into(),
        };
        let lanchat_err: LanChatError = err.into();
        assert!(matches!(lanchat_err, LanChatError::Config(_)));
    }
}
