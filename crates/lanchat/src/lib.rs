//! # lanchat
//!
//! A minimal TCP chat server speaking a newline-delimited text protocol.
//!
//! Clients connect over a raw socket, `LOGIN` with a unique username, and
//! then exchange room-wide (`MSG`) or direct (`DM`) messages, list who is
//! online (`WHO`), and probe liveness (`PING`).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lanchat::prelude::*;
//!
//! # async fn start() -> Result<(), LanChatError> {
//! let config = ChatConfig::from_env()?;
//! let server = LanChatServerBuilder::from_config(&config).build().await?;
//! server.run().await
//! # }
//! ```
//!
//! ## Layers
//!
//! - `lanchat-transport`: TCP listener and connections
//! - `lanchat-protocol`: line framing, command parsing, replies
//! - `lanchat-session`: sessions and the online-user registry
//! - this crate: the [`engine`], per-connection handling, and the server

mod config;
pub mod engine;
mod error;
mod handler;
mod server;

pub use config::{ChatConfig, ConfigError, DEFAULT_PORT};
pub use error::LanChatError;
pub use server::{LanChatServer, LanChatServerBuilder};

/// Everything needed to embed or test a server.
pub mod prelude {
    pub use crate::engine::Flow;
    pub use crate::{
        ChatConfig, ConfigError, LanChatError, LanChatServer,
        LanChatServerBuilder,
    };
    pub use lanchat_protocol::{Command, LineFramer, ProtocolError, Reply};
    pub use lanchat_session::{Registry, Session, SessionError};
}
