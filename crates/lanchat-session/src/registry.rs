//! The registry: who is online right now.
//!
//! This is the single source of truth for usernames. It's responsible for:
//! - Enforcing username validity and uniqueness at login
//! - Resolving a username to a session for DMs
//! - Fanning a reply out to everyone for broadcasts
//! - Forgetting a user when their connection closes
//!
//! # Concurrency note
//!
//! `Registry` is NOT thread-safe by itself. The server keeps it behind a
//! single `tokio::sync::Mutex` and holds the lock for the whole dispatch
//! of one command. That makes [`Registry::register`]'s check-then-insert
//! atomic, and it means a broadcast always sees one consistent set of
//! users.

use std::collections::BTreeMap;

use lanchat_protocol::Reply;
use lanchat_transport::ConnectionId;

use crate::{Session, SessionError, SessionHandle};

/// Checks the username rules: non-empty, no whitespace anywhere.
pub fn validate_username(username: &str) -> Result<(), SessionError> {
    if username.is_empty() || username.chars().any(char::is_whitespace) {
        return Err(SessionError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

/// Username → session index.
///
/// ## Invariants
///
/// - Every key maps to a session whose state is
///   `Authenticated { username: key }`.
/// - At most one entry per (case-sensitive) username.
///
/// Entries are only added by [`register`](Self::register) and only removed
/// by [`unregister`](Self::unregister).
///
/// Iteration is in ascending username order, so `WHO` listings are stable.
#[derive(Debug, Default)]
pub struct Registry {
    members: BTreeMap<String, SessionHandle>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            members: BTreeMap::new(),
        }
    }

    /// Registers `session` under `username` and logs it in.
    ///
    /// Validation, the uniqueness check, the insert, and binding the
    /// username on the session happen in this one call.
    ///
    /// # Errors
    /// - [`SessionError::AlreadyAuthenticated`]: the session is logged in
    /// - [`SessionError::InvalidUsername`]: empty or contains whitespace
    /// - [`SessionError::UsernameTaken`]: someone else holds the name
    pub fn register(
        &mut self,
        session: &mut Session,
        username: &str,
    ) -> Result<(), SessionError> {
        if let Some(current) = session.username() {
            return Err(SessionError::AlreadyAuthenticated(current.to_string()));
        }
        validate_username(username)?;
        if self.members.contains_key(username) {
            return Err(SessionError::UsernameTaken(username.to_string()));
        }

        self.members.insert(username.to_string(), session.handle());
        session.authenticate(username.to_string());

        tracing::info!(conn_id = %session.id(), username, "user registered");
        Ok(())
    }

    /// Removes `username` if its entry belongs to connection `id`.
    ///
    /// Returns `false`, removing nothing, when the name is not online or
    /// is held by a different connection.
    pub fn unregister(&mut self, username: &str, id: ConnectionId) -> bool {
        let owned = self
            .members
            .get(username)
            .is_some_and(|entry| entry.id() == id);
        if !owned {
            return false;
        }

        self.members.remove(username);
        tracing::info!(conn_id = %id, username, "user unregistered");
        true
    }

    /// Looks up the session registered under `username`.
    pub fn get(&self, username: &str) -> Option<&SessionHandle> {
        self.members.get(username)
    }

    /// Online usernames in iteration order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Queues `reply` for every registered session except `except`.
    ///
    /// Returns how many sessions accepted it.
    pub fn broadcast(&self, reply: &Reply, except: Option<ConnectionId>) -> usize {
        let mut delivered = 0;
        for (username, handle) in &self.members {
            if Some(handle.id()) == except {
                continue;
            }
            if handle.send(reply.clone()) {
                delivered += 1;
            } else {
                tracing::trace!(%username, "broadcast skipped closed session");
            }
        }
        delivered
    }
}

// =========================================================================
// Tests
// =========================================================================
