//! Buffered line source with comment filtering.
//!
//! Yields logical lines from any buffered reader: terminators stripped,
//! `\r\n` tolerated, comment lines dropped before anyone downstream can
//! see them. Memory use is bounded by the longest single line, never by
//! the input size.

use crate::utils::error::InputError;
use std::io::BufRead;

/// Streaming line reader over any `BufRead` source
///
/// The internal buffer is reused across lines, so each call to
/// [`LineReader::next_line`] borrows the reader until the line has been
/// consumed.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    comments_skipped: u64,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(256),
            comments_skipped: 0,
        }
    }

    /// The next data line, or `Ok(None)` at clean end of input
    ///
    /// **Public** - the single source of line semantics for both the
    /// streaming and the sharded path
    ///
    /// The returned slice has its `\n` (and a preceding `\r`, if any)
    /// stripped. Lines whose first byte is `#` are comments: they are
    /// counted and skipped here, and never surface. A final line without
    /// a trailing newline is still yielded. Blank lines are data and are
    /// passed through for the parser to reject.
    pub fn next_line(&mut self) -> Result<Option<&[u8]>, InputError> {
        loop {
            self.buf.clear();
            let read = self.inner.read_until(b'\n', &mut self.buf)?;
            if read == 0 {
                return Ok(None);
            }

            if self.buf.last() == Some(&b'\n') {
                self.buf.pop();
                if self.buf.last() == Some(&b'\r') {
                    self.buf.pop();
                }
            }

            if self.buf.first() == Some(&b'#') {
                self.comments_skipped += 1;
                continue;
            }

            return Ok(Some(&self.buf));
        }
    }

    /// Comment lines skipped so far
    pub fn comments_skipped(&self) -> u64 {
        self.comments_skipped
    }
}
