//! The protocol engine: what each command does.
//!
//! Given a session and one parsed [`Command`], [`dispatch`] decides the
//! registry change, the replies to the sender, and anything sent to other
//! users. It never awaits and never touches a socket; every outbound line
//! is queued on an [`Outbox`](lanchat_session::Outbox). The caller holds
//! the registry lock for the whole call.
//!
//! ```text
//!                   ┌─ LOGIN ok ──────────────→ Authenticated
//! Unauthenticated ──┼─ LOGIN taken ─→ close
//!                   └─ anything else → ERR not-logged-in
//! ```

use lanchat_protocol::{Command, ProtocolError, Reply};
use lanchat_session::{Registry, Session, SessionError};
use lanchat_transport::ConnectionId;

/// What the connection should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading commands.
    Continue,
    /// Flush queued replies, then close the connection.
    Close,
}

/// Applies one command to `session` and `registry`.
///
/// Protocol errors never escape: they are answered with an `ERR` line
/// and the connection stays open. The one exception is a username
/// collision, which answers `ERR username-taken` and returns
/// [`Flow::Close`] for the *connecting* session.
pub fn dispatch(session: &mut Session, registry: &mut Registry, command: Command) -> Flow {
    if session.is_authenticated() {
        dispatch_authenticated(session, registry, command);
        return Flow::Continue;
    }

    match command {
        Command::Login { username } => login(session, registry, &username),
        Command::Empty => Flow::Continue,
        _ => {
            session.reply(ProtocolError::NotLoggedIn);
            Flow::Continue
        }
    }
}

/// Runs the disconnect transition for a closing session.
///
/// If the session was logged in, its registry entry is removed and every
/// remaining user is told. Returns the username that went offline.
pub fn disconnect(session: &Session, registry: &mut Registry) -> Option<String> {
    let username = session.username()?;
    leave(registry, username, session.id()).then(|| username.to_string())
}

/// Takes `username` offline for connection `id` and announces it.
///
/// Does nothing if the name is not held by that connection, so a
/// rejected duplicate login can never evict the real owner.
pub fn leave(registry: &mut Registry, username: &str, id: ConnectionId) -> bool {
    if !registry.unregister(username, id) {
        return false;
    }
    registry.broadcast(
        &Reply::Left {
            username: username.to_string(),
        },
        None,
    );
    true
}

fn login(session: &mut Session, registry: &mut Registry, username: &str) -> Flow {
    match registry.register(session, username) {
        Ok(()) => {
            session.reply(Reply::Ok);
            registry.broadcast(
                &Reply::Joined {
                    username: username.to_string(),
                },
                Some(session.id()),
            );
            Flow::Continue
        }
        Err(SessionError::InvalidUsername(_)) => {
            session.reply(ProtocolError::InvalidUsername);
            Flow::Continue
        }
        Err(SessionError::UsernameTaken(_)) => {
            tracing::warn!(conn_id = %session.id(), username, "login rejected, name taken");
            session.reply(ProtocolError::UsernameTaken);
            Flow::Close
        }
        Err(SessionError::AlreadyAuthenticated(_)) => {
            // Unreachable from `dispatch`; a logged-in LOGIN goes through
            // the authenticated branch.
            session.reply(ProtocolError::UnknownCommand);
            Flow::Continue
        }
    }
}

fn dispatch_authenticated(session: &Session, registry: &Registry, command: Command) {
    // Logged in, so this is always `Some`.
    let Some(username) = session.username() else {
        return;
    };

    match command {
        Command::Message { text } => {
            if text.is_empty() {
                return;
            }
            registry.broadcast(
                &Reply::Chat {
                    from: username.to_string(),
                    text,
                },
                None,
            );
        }

        Command::Who => {
            session.reply(Reply::WhoHeader);
            for name in registry.usernames() {
                session.reply(Reply::User {
                    username: name.to_string(),
                });
            }
            session.reply(Reply::WhoFooter);
        }

        Command::Ping => session.reply(Reply::Pong),

        Command::DirectMessage { target, text } => {
            if target.is_empty() || text.is_empty() {
                session.reply(ProtocolError::DirectUsage);
                return;
            }
            let Some(recipient) = registry.get(&target) else {
                session.reply(ProtocolError::UserNotFound(target));
                return;
            };
            recipient.send(Reply::Direct {
                from: username.to_string(),
                text: text.clone(),
            });
            session.reply(Reply::DirectSent { to: target, text });
        }

        Command::Empty => {}

        // A second LOGIN lands here too: there is no re-login, and it is
        // reported as an unknown command rather than a state change.
        Command::Login { .. } | Command::Unknown { .. } => {
            session.reply(ProtocolError::UnknownCommand);
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
