//! Bounded line reader for credential files.
//!
//! Plain fields are single lines; key material is a PEM block that spans
//! many lines and is accumulated until its END marker. Both are capped so a
//! corrupted file produces an error instead of unbounded reads.

use std::io::{BufRead, Read};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ReadError {
    #[error("read failed: {0}")]
    Io(String),
    #[error("file ended before `{field}`")]
    UnexpectedEof { field: &'static str },
    #[error("`{field}` exceeds {limit} bytes")]
    LineTooLong { field: &'static str, limit: usize },
    #[error("`{field}` is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },
    #[error("expected `{expected}`, found `{found}`")]
    UnexpectedMarker { expected: String, found: String },
    #[error("PEM block exceeds {limit} bytes")]
    BlockTooLarge { limit: usize },
}

pub(crate) struct LineReader<R> {
    inner: R,
    line_limit: usize,
    block_limit: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R, line_limit: usize, block_limit: usize) -> Self {
        Self {
            inner,
            line_limit,
            block_limit,
        }
    }

    /// Next line with its line ending removed.
    pub(crate) fn field(&mut self, field: &'static str) -> Result<String, ReadError> {
        let raw = self.raw_line(field, self.line_limit)?;
        let mut line = String::from_utf8(raw).map_err(|_| ReadError::InvalidUtf8 { field })?;
        strip_line_ending(&mut line);
        Ok(line)
    }

    /// A PEM block from `begin` through `end`, line endings kept.
    ///
    /// The first line must be exactly `begin`; lines are then accumulated
    /// until one equals `end`.
    pub(crate) fn pem_block(
        &mut self,
        field: &'static str,
        begin: &str,
        end: &str,
    ) -> Result<String, ReadError> {
        let first = self.block_line(field)?;
        if trimmed(&first) != begin {
            return Err(ReadError::UnexpectedMarker {
                expected: begin.to_string(),
                found: trimmed(&first).to_string(),
            });
        }

        let mut block = first;
        loop {
            let line = self.block_line(field)?;
            if block.len() + line.len() > self.block_limit {
                return Err(ReadError::BlockTooLarge {
                    limit: self.block_limit,
                });
            }
            let done = trimmed(&line) == end;
            block.push_str(&line);
            if done {
                return Ok(block);
            }
        }
    }

    fn block_line(&mut self, field: &'static str) -> Result<String, ReadError> {
        let raw = self
            .raw_line(field, self.block_limit)
            .map_err(|e| match e {
                ReadError::LineTooLong { .. } => ReadError::BlockTooLarge {
                    limit: self.block_limit,
                },
                other => other,
            })?;
        String::from_utf8(raw).map_err(|_| ReadError::InvalidUtf8 { field })
    }

    /// Read one line (newline included) of at most `limit` bytes.
    fn raw_line(&mut self, field: &'static str, limit: usize) -> Result<Vec<u8>, ReadError> {
        let mut buf = Vec::new();
        let read = self
            .inner
            .by_ref()
            .take(limit as u64 + 1)
            .read_until(b'\n', &mut buf)
            .map_err(|e| ReadError::Io(e.to_string()))?;

        if read == 0 {
            return Err(ReadError::UnexpectedEof { field });
        }
        if buf.len() > limit {
            return Err(ReadError::LineTooLong { field, limit });
        }
        Ok(buf)
    }
}

fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

fn trimmed(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
