//! Session state and the online-user registry for lanchat.
//!
//! This crate holds the two pieces of mutable state the chat protocol
//! works on:
//!
//! 1. **Sessions** ([`Session`]): one per connection, recording whether
//!    it is logged in, as whom, and how to write to it ([`Outbox`]).
//! 2. **The registry** ([`Registry`]): which usernames are online and
//!    which session each one belongs to.
//!
//! # How it fits in the stack
//!
//! ```text
//! Engine (above)  ← mutates sessions and the registry per command
//!     ↕
//! Session Layer (this crate)  ← identity, uniqueness, fan-out
//!     ↕
//! Protocol Layer (below)  ← provides Reply
//! ```

mod error;
mod registry;
mod session;

pub use error::SessionError;
pub use registry::{Registry, validate_username};
pub use session::{Outbox, Session, SessionHandle, SessionState};
