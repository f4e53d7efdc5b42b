//! Session types: the per-connection record the engine works on.
//!
//! A session tracks:
//! - WHICH connection it belongs to (`ConnectionId`)
//! - WHAT state it is in (logged in or not, and as whom)
//! - HOW to reach it (an [`Outbox`] drained by the connection's writer)

use lanchat_protocol::Reply;
use lanchat_transport::ConnectionId;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Outbox
// ---------------------------------------------------------------------------

/// Write capability for one connection.
///
/// Every line destined for a session, whether a direct reply, a room
/// broadcast or a DM from someone else, goes through its outbox. A single
/// writer task per connection drains the receiving end, so each recipient
/// sees replies in the order they were queued.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<Reply>,
}

impl Outbox {
    /// Creates an outbox and the receiver its writer task should drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Reply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queues a reply. Returns `false` if the connection's writer is gone,
    /// which only happens while that connection is being torn down.
    pub fn send(&self, reply: Reply) -> bool {
        self.tx.send(reply).is_ok()
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Whether a connection has logged in.
///
/// ```text
///   Unauthenticated ──(LOGIN ok)──→ Authenticated
///         │                              │
///         └──────(close)──→ ✕ ←──(close)─┘
/// ```
///
/// There is no way back from `Authenticated`; a session ends by closing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Connected, but only `LOGIN` is accepted.
    #[default]
    Unauthenticated,

    /// Logged in and present in the registry under `username`.
    Authenticated { username: String },
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One client connection's protocol state.
///
/// Created when a connection is accepted, dropped when it closes. The
/// registry never owns a `Session`; it only keeps a [`SessionHandle`] to
/// reach it.
#[derive(Debug)]
pub struct Session {
    id: ConnectionId,
    state: SessionState,
    outbox: Outbox,
}

impl Session {
    /// Creates an unauthenticated session for a fresh connection.
    pub fn new(id: ConnectionId, outbox: Outbox) -> Self {
        Self {
            id,
            state: SessionState::Unauthenticated,
            outbox,
        }
    }

    /// The connection this session belongs to.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Current authentication state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The bound username, if logged in.
    pub fn username(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { username } => Some(username),
            SessionState::Unauthenticated => None,
        }
    }

    /// Returns `true` once `LOGIN` has succeeded.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// Queues a reply for this session's own connection.
    pub fn reply(&self, reply: impl Into<Reply>) {
        if !self.outbox.send(reply.into()) {
            tracing::trace!(conn_id = %self.id, "reply dropped, writer closed");
        }
    }

    /// A registry entry pointing at this session.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            id: self.id,
            outbox: self.outbox.clone(),
        }
    }

    /// Binds the username. Only the registry calls this, as part of the
    /// same step that inserts the entry.
    pub(crate) fn authenticate(&mut self, username: String) {
        self.state = SessionState::Authenticated { username };
    }
}

// ---------------------------------------------------------------------------
// SessionHandle
// ---------------------------------------------------------------------------

/// What the registry stores per user: enough to address a session,
/// nothing that keeps it alive.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: ConnectionId,
    outbox: Outbox,
}

impl SessionHandle {
    /// The connection behind this entry.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queues a reply for the session behind this entry.
    pub fn send(&self, reply: Reply) -> bool {
        self.outbox.send(reply)
    }
}
