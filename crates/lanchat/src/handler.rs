//! Per-connection handler: framing, dispatch, and teardown.
//!
//! Each accepted connection gets its own Tokio task running this handler,
//! plus one writer task. The flow is:
//!   1. Spawn the writer, which drains the session's outbox to the socket
//!   2. Loop: receive a chunk → frame lines → parse → dispatch under the
//!      registry lock
//!   3. On EOF, receive error, oversize line, or `Flow::Close`: run the
//!      disconnect transition, let the writer flush, half-close the socket

use std::sync::Arc;

use lanchat_protocol::{Command, LineFramer, Reply};
use lanchat_session::{Outbox, Session};
use lanchat_transport::{Connection, TcpConnection};
use tokio::sync::mpsc;

use crate::engine::{self, Flow};
use crate::server::ServerState;
use crate::LanChatError;

/// Owns the session for the life of the connection task.
///
/// The normal path calls [`release`](Self::release), which runs the
/// disconnect transition inline. If the task unwinds instead, `Drop`
/// takes the name offline on a spawned task, since `Drop` cannot await
/// the registry lock.
struct SessionGuard {
    session: Session,
    state: Arc<ServerState>,
    released: bool,
}

impl SessionGuard {
    fn new(session: Session, state: Arc<ServerState>) -> Self {
        Self {
            session,
            state,
            released: false,
        }
    }

    /// Runs the disconnect transition and drops the session, closing its
    /// outbox. Returns the username that went offline.
    async fn release(mut self) -> Option<String> {
        self.released = true;
        let mut registry = self.state.registry.lock().await;
        engine::disconnect(&self.session, &mut registry)
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let Some(username) = self.session.username().map(str::to_owned) else {
            return;
        };
        let conn_id = self.session.id();
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let mut registry = state.registry.lock().await;
            engine::leave(&mut registry, &username, conn_id);
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: TcpConnection,
    state: Arc<ServerState>,
) -> Result<(), LanChatError> {
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    let peer = conn.peer_addr();
    tracing::info!(%conn_id, %peer, "client connected");

    let (outbox, outbound) = Outbox::channel();
    let writer = tokio::spawn(write_loop(Arc::clone(&conn), outbound));

    let mut guard = SessionGuard::new(Session::new(conn_id, outbox), Arc::clone(&state));
    let mut framer = LineFramer::with_max_line_len(state.max_line_len);

    let result = read_loop(&conn, &state, &mut guard.session, &mut framer).await;

    // Releasing drops the last outbox sender, so the writer flushes
    // whatever is queued and then closes.
    let gone = guard.release().await;
    if let Err(e) = writer.await {
        tracing::debug!(%conn_id, error = %e, "writer task failed");
    }

    tracing::info!(
        %conn_id,
        %peer,
        username = gone.as_deref(),
        "client disconnected"
    );
    result
}

/// Reads until the connection should close.
async fn read_loop(
    conn: &TcpConnection,
    state: &ServerState,
    session: &mut Session,
    framer: &mut LineFramer,
) -> Result<(), LanChatError> {
    let conn_id = conn.id();

    loop {
        let chunk = match conn.recv().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => {
                tracing::debug!(%conn_id, "peer closed the connection");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!(%conn_id, error = %e, "socket error");
                return Err(e.into());
            }
        };

        for line in framer.push(&chunk) {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(
                        %conn_id,
                        limit = state.max_line_len,
                        "line too long, closing"
                    );
                    session.reply(e.clone());
                    return Err(e.into());
                }
            };
            let command = Command::parse(&line);
            if command == Command::Empty {
                continue;
            }
            tracing::debug!(
                %conn_id,
                command = command.name(),
                line = line.trim(),
                "command received"
            );

            let flow = {
                let mut registry = state.registry.lock().await;
                engine::dispatch(session, &mut registry, command)
            };
            if flow == Flow::Close {
                return Ok(());
            }
        }
    }
}

/// Drains the outbox onto the socket, one line per reply.
///
/// Ends when every outbox sender is gone, then half-closes the socket so
/// the peer sees EOF after the last line.
async fn write_loop(
    conn: Arc<TcpConnection>,
    mut outbound: mpsc::UnboundedReceiver<Reply>,
) {
    let conn_id = conn.id();

    while let Some(reply) = outbound.recv().await {
        if let Err(e) = conn.send(&reply.encode()).await {
            tracing::debug!(%conn_id, error = %e, "write failed, dropping output");
            return;
        }
    }

    if let Err(e) = conn.close().await {
        tracing::debug!(%conn_id, error = %e, "close failed");
    }
}
