//! Wire protocol for lanchat.
//!
//! This crate defines the "language" that chat clients and the server speak:
//!
//! - **Framing** ([`LineFramer`], [`Lines`]): turning an arbitrarily
//!   chunked byte stream into complete `\n`-terminated lines.
//! - **Commands** ([`Command`]): what a client asked for, parsed from
//!   one line.
//! - **Replies** ([`Reply`]): every line the server can send back.
//! - **Errors** ([`ProtocolError`]): recoverable protocol violations.
//!   Their `Display` output is exactly the reason text after `ERR`.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw bytes) and session
//! (who is logged in). It is pure: nothing here touches a socket or the
//! user registry.
//!
//! ```text
//! Transport (bytes) → LineFramer (lines) → Command → engine → Reply → bytes
//! ```

mod command;
mod error;
mod framer;
mod reply;

pub use command::Command;
pub use error::ProtocolError;
pub use framer::{DEFAULT_MAX_LINE_LEN, LINE_TERMINATOR, LineFramer, Lines};
pub use reply::{Reply, WHO_FOOTER, WHO_HEADER};
