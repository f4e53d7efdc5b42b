//! Stream-to-lines framing.
//!
//! TCP hands us bytes in whatever chunks the network felt like: half a
//! command, three commands at once, a UTF-8 character split down the
//! middle. [`LineFramer`] buffers those chunks and hands back complete
//! lines, one per `\n`, with the terminator removed and nothing else
//! touched (no trimming, `\r` included).
//!
//! Lines come out of a lazy [`Lines`] iterator. If the caller stops
//! iterating early, the remaining complete lines stay buffered and are
//! produced first by the next [`LineFramer::push`] or
//! [`LineFramer::lines`] call, so the sequence survives any chunking.

use crate::ProtocolError;

/// The byte that ends every command and every reply.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Default cap on a single line, in bytes, terminator excluded.
pub const DEFAULT_MAX_LINE_LEN: usize = 8 * 1024;

/// Per-connection line decoder with partial-read buffering.
#[derive(Debug)]
pub struct LineFramer {
    /// Bytes received but not yet handed out as lines.
    buf: Vec<u8>,
    /// How much of `buf` has already been yielded. Compacted on `push`.
    consumed: usize,
    max_line_len: usize,
    /// Set once a line broke the cap. Nothing is framed after that.
    overflowed: bool,
}

impl LineFramer {
    /// Creates a framer with the [`DEFAULT_MAX_LINE_LEN`] cap.
    pub fn new() -> Self {
        Self::with_max_line_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Creates a framer that rejects lines longer than `max_line_len`
    /// bytes, whether or not their terminator has arrived yet.
    pub fn with_max_line_len(max_line_len: usize) -> Self {
        Self {
            buf: Vec::new(),
            consumed: 0,
            max_line_len,
            overflowed: false,
        }
    }

    /// The configured line cap in bytes.
    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    /// Number of buffered bytes not yet yielded as lines.
    pub fn buffered(&self) -> usize {
        self.buf.len() - self.consumed
    }

    /// Returns `true` once a line has exceeded the cap.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Appends `chunk` and returns the lines now available.
    ///
    /// Complete lines that precede an oversize one are still yielded, in
    /// order; the iterator then yields [`ProtocolError::LineTooLong`] once
    /// and stops. After that the framer discards all further input.
    pub fn push(&mut self, chunk: &[u8]) -> Lines<'_> {
        if !self.overflowed {
            if self.consumed > 0 {
                self.buf.drain(..self.consumed);
                self.consumed = 0;
            }
            self.buf.extend_from_slice(chunk);
        }
        self.lines()
    }

    /// Resumes yielding already-buffered complete lines without new input.
    pub fn lines(&mut self) -> Lines<'_> {
        Lines { framer: self }
    }

    fn overflow(&mut self, pending: usize) -> ProtocolError {
        tracing::trace!(pending, limit = self.max_line_len, "line over limit");
        self.overflowed = true;
        self.buf.clear();
        self.consumed = 0;
        ProtocolError::LineTooLong {
            limit: self.max_line_len,
        }
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy iterator over the complete lines held by a [`LineFramer`].
///
/// Each line is decoded as UTF-8; invalid sequences become U+FFFD. An
/// `Err` item is always the last one.
#[derive(Debug)]
pub struct Lines<'a> {
    framer: &'a mut LineFramer,
}

impl Iterator for Lines<'_> {
    type Item = Result<String, ProtocolError>;

    fn next(&mut self) -> Option<Self::Item> {
        let framer = &mut *self.framer;
        if framer.overflowed {
            return None;
        }

        let start = framer.consumed;
        let rest = &framer.buf[start..];
        let Some(len) = rest.iter().position(|&b| b == LINE_TERMINATOR) else {
            let pending = rest.len();
            return (pending > framer.max_line_len)
                .then(|| Err(framer.overflow(pending)));
        };
        if len > framer.max_line_len {
            return Some(Err(framer.overflow(len)));
        }

        let line =
            String::from_utf8_lossy(&framer.buf[start..start + len]).into_owned();
        framer.consumed = start + len + 1;
        Some(Ok(line))
    }
}
