use std::net::SocketAddr;

/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The listening socket could not be bound.
    #[error("bind to {addr} failed: {source}")]
    BindFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Accepting a new TCP stream failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// Writing to the peer failed.
    #[error("send to {peer} failed: {source}")]
    SendFailed {
        peer: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Reading from the peer failed (reset, aborted, ...).
    #[error("receive from {peer} failed: {source}")]
    ReceiveFailed {
        peer: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The transport was shut down and accepts nothing further.
    #[error("transport shut down")]
    Shutdown,
}
