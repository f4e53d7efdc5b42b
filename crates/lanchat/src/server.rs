//! `LanChatServer` builder and server loop.
//!
//! This is the entry point for running a chat server. It ties together
//! all the layers: transport → framing → engine → registry.

use std::net::SocketAddr;
use std::sync::Arc;

use lanchat_protocol::DEFAULT_MAX_LINE_LEN;
use lanchat_session::Registry;
use lanchat_transport::{TcpConnection, TcpTransport, Transport};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::{ChatConfig, LanChatError};

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The
/// registry is the only mutable part, behind one lock.
pub(crate) struct ServerState {
    pub(crate) registry: Mutex<Registry>,
    pub(crate) max_line_len: usize,
}

/// Builder for configuring and starting a chat server.
///
/// # Example
///
/// ```rust,no_run
/// # async fn start() -> Result<(), lanchat::LanChatError> {
/// use lanchat::LanChatServer;
///
/// let server = LanChatServer::builder()
///     .bind("0.0.0.0:4000")
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct LanChatServerBuilder {
    bind_addr: String,
    max_line_len: usize,
}

impl LanChatServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:4000".to_string(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }

    /// Creates a builder pre-filled from a [`ChatConfig`].
    pub fn from_config(config: &ChatConfig) -> Self {
        Self {
            bind_addr: config.bind_addr().to_string(),
            max_line_len: config.max_line_len,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the longest line a client may send, terminator excluded.
    pub fn max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    /// Binds the listener and returns a server ready to [`run`](LanChatServer::run).
    pub async fn build(self) -> Result<LanChatServer, LanChatError> {
        let transport = TcpTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            registry: Mutex::new(Registry::new()),
            max_line_len: self.max_line_len,
        });

        Ok(LanChatServer { transport, state })
    }
}

impl Default for LanChatServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound chat server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct LanChatServer {
    transport: TcpTransport,
    state: Arc<ServerState>,
}

impl LanChatServer {
    /// Creates a new builder.
    pub fn builder() -> LanChatServerBuilder {
        LanChatServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the accept loop forever.
    ///
    /// Spawns one handler task per connection. A failed accept is logged
    /// and the loop keeps going.
    pub async fn run(self) -> Result<(), LanChatError> {
        self.run_until(std::future::pending()).await
    }

    /// Runs the accept loop until `shutdown` completes.
    ///
    /// On shutdown the listener stops accepting and is closed. Connections
    /// that are already open keep being served by their own tasks.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), LanChatError>
    where
        F: Future<Output = ()> + Send,
    {
        tracing::info!(addr = ?self.local_addr().ok(), "chat server running");
        let LanChatServer {
            mut transport,
            state,
        } = self;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = transport.accept() => match accepted {
                    Ok(conn) => spawn_handler(conn, &state),
                    Err(e) => tracing::error!(error = %e, "accept failed"),
                },
            }
        }

        transport.shutdown().await?;
        tracing::info!("chat server stopped");
        Ok(())
    }

    /// Runs until the process receives Ctrl-C.
    pub async fn run_until_ctrl_c(self) -> Result<(), LanChatError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "failed to install ctrl-c handler");
            }
        })
        .await
    }
}

fn spawn_handler(conn: TcpConnection, state: &Arc<ServerState>) {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        if let Err(e) = handle_connection(conn, state).await {
            tracing::debug!(error = %e, "connection ended with error");
        }
    });
}
