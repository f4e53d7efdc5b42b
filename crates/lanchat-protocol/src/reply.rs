//! Server → client lines.
//!
//! Every line the server ever writes is one [`Reply`]. `Display` renders
//! the line without its terminator; [`Reply::encode`] produces the wire
//! bytes with exactly one `\n` appended.

use std::fmt;

use crate::{LINE_TERMINATOR, ProtocolError};

/// First line of a `WHO` listing.
pub const WHO_HEADER: &str = "--- Connected Users ---";

/// Last line of a `WHO` listing.
pub const WHO_FOOTER: &str = "-----------------------";

/// A single line sent from the server to a client.
///
/// `Clone` because the same reply is fanned out to every recipient of a
/// broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Login accepted.
    Ok,

    /// A recoverable protocol error: `ERR <reason>`.
    Error(ProtocolError),

    /// `INFO <username> joined the chat`, sent to everyone else on login.
    Joined { username: String },

    /// `INFO <username> disconnected`, sent to everyone left behind.
    Left { username: String },

    /// `MSG <from> <text>`: a room broadcast.
    Chat { from: String, text: String },

    /// `DM <from> <text>`: delivered to the target of a direct message.
    Direct { from: String, text: String },

    /// `DM-SENT <to> <text>`: confirmation to the sender of a DM.
    DirectSent { to: String, text: String },

    /// Answer to `PING`.
    Pong,

    /// `--- Connected Users ---`
    WhoHeader,

    /// `USER <username>`: one entry of a `WHO` listing.
    User { username: String },

    /// `-----------------------`
    WhoFooter,
}

impl Reply {
    /// Renders the reply as wire bytes, terminator included.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = self.to_string().into_bytes();
        bytes.push(LINE_TERMINATOR);
        bytes
    }
}

impl From<ProtocolError> for Reply {
    fn from(err: ProtocolError) -> Self {
        Self::Error(err)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::Error(err) => write!(f, "ERR {err}"),
            Self::Joined { username } => {
                write!(f, "INFO {username} joined the chat")
            }
            Self::Left { username } => write!(f, "INFO {username} disconnected"),
            Self::Chat { from, text } => write!(f, "MSG {from} {text}"),
            Self::Direct { from, text } => write!(f, "DM {from} {text}"),
            Self::DirectSent { to, text } => write!(f, "DM-SENT {to} {text}"),
            Self::Pong => f.write_str("PONG"),
            Self::WhoHeader => f.write_str(WHO_HEADER),
            Self::User { username } => write!(f, "USER {username}"),
            Self::WhoFooter => f.write_str(WHO_FOOTER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_each_reply_line() {
        let cases = [
            (Reply::Ok, "OK"),
            (
                Reply::Error(ProtocolError::UsernameTaken),
                "ERR username-taken",
            ),
            (
                Reply::Joined {
                    username: "alice".into(),
                },
                "INFO alice joined the chat",
            ),
            (
                Reply::Left {
                    username: "alice".into(),
                },
                "INFO alice disconnected",
            ),
            (
                Reply::Chat {
                    from: "alice".into(),
                    text: "hello  there".into(),
                },
                "MSG alice hello  there",
            ),
            (
                Reply::Direct {
                    from: "alice".into(),
                    text: "hi".into(),
                },
                "DM alice hi",
            ),
            (
                Reply::DirectSent {
                    to: "bob".into(),
                    text: "hi".into(),
                },
                "DM-SENT bob hi",
            ),
            (Reply::Pong, "PONG"),
            (Reply::WhoHeader, "--- Connected Users ---"),
            (
                Reply::User {
                    username: "bob".into(),
                },
                "USER bob",
            ),
            (Reply::WhoFooter, "-----------------------"),
        ];

        for (reply, expected) in cases {
            assert_eq!(reply.to_string(), expected);
        }
    }

    #[test]
    fn test_encode_appends_single_terminator() {
        assert_eq!(Reply::Pong.encode(), b"PONG\n");
        assert_eq!(
            Reply::Error(ProtocolError::UserNotFound("carol".into())).encode(),
            b"ERR user-not-found carol\n"
        );
    }

    #[test]
    fn test_from_protocol_error_wraps_in_error_reply() {
        let reply: Reply = ProtocolError::NotLoggedIn.into();
        assert_eq!(
            reply.to_string(),
            "ERR not-logged-in (send LOGIN <username>)"
        );
    }
}
