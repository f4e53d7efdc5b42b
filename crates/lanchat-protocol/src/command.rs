//! Client commands and the line parser.
//!
//! Parsing is pure and total: every line maps to exactly one [`Command`],
//! with anything unrecognised landing in [`Command::Unknown`]. Whether a
//! command is *allowed* (logged in or not, valid username, existing DM
//! target) is decided later by the engine.

const LOGIN_PREFIX: &str = "LOGIN ";
const MSG_PREFIX: &str = "MSG ";
const DM_PREFIX: &str = "DM ";

/// One parsed client line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `LOGIN <username>`. The username is trimmed but not yet validated.
    Login { username: String },

    /// `MSG <text>`: broadcast to the whole room, sender included.
    Message { text: String },

    /// `DM <username> <text>`. Either field may be empty here.
    DirectMessage { target: String, text: String },

    /// `WHO`: list everyone online.
    Who,

    /// `PING`: liveness probe, answered with `PONG`.
    Ping,

    /// Anything else. `raw` is the line as received.
    Unknown { raw: String },

    /// Blank or whitespace-only line. Dropped before dispatch.
    Empty,
}

impl Command {
    /// Classifies one framed line (terminator already stripped).
    ///
    /// Prefix checks (`LOGIN `, `MSG `, `DM `) look at the line as
    /// received, so leading whitespace defeats them; exact keywords
    /// (`WHO`, `PING`) are compared after trimming.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Self::Empty;
        }

        if let Some(rest) = line.strip_prefix(LOGIN_PREFIX) {
            return Self::Login {
                username: rest.trim().to_string(),
            };
        }

        if let Some(rest) = line.strip_prefix(MSG_PREFIX) {
            return Self::Message {
                text: rest.trim().to_string(),
            };
        }

        match trimmed {
            "WHO" => return Self::Who,
            "PING" => return Self::Ping,
            _ => {}
        }

        if line.starts_with(DM_PREFIX) {
            // Single-space split: `DM  bob hi` has an empty target.
            let mut tokens = trimmed.split(' ').skip(1);
            let target = tokens.next().unwrap_or_default().to_string();
            let text = tokens.collect::<Vec<_>>().join(" ");
            return Self::DirectMessage { target, text };
        }

        Self::Unknown {
            raw: line.to_string(),
        }
    }

    /// The command keyword, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "LOGIN",
            Self::Message { .. } => "MSG",
            Self::DirectMessage { .. } => "DM",
            Self::Who => "WHO",
            Self::Ping => "PING",
            Self::Unknown { .. } => "UNKNOWN",
            Self::Empty => "EMPTY",
        }
    }
}
