//! Line framing for the serial command stream.
//!
//! Bytes are accumulated until CR or LF. Two recovery paths keep a broken
//! host from wedging the input:
//! - OVERFLOW: a line longer than [`LINE_CAPACITY`] is thrown away whole
//! - IDLE FLUSH: a partial line with no byte for [`IDLE_FLUSH_MS`] is handed
//!   on as if it had been terminated

use heapless::Vec;

/// Maximum number of bytes in one line, excluding the terminator
pub const LINE_CAPACITY: usize = 192;

/// Silence after which a partial line is flushed (milliseconds)
pub const IDLE_FLUSH_MS: u32 = 30;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Errors reported by the line framer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`LINE_CAPACITY`]; the buffered bytes were discarded
    Overflow,
}

/// A complete line, without its terminator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8, LINE_CAPACITY>,
}

impl Line {
    /// Raw bytes of the line
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes in the line
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the line holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Line {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:a}", self.bytes.as_slice());
    }
}

/// Accumulates serial bytes into lines
#[derive(Debug, Clone)]
pub struct LineFramer {
    buffer: Vec<u8, LINE_CAPACITY>,
    /// Timestamp of the most recent non-terminator byte (ms)
    last_byte_ms: u32,
    idle_flush_ms: u32,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFramer {
    /// Create a framer with the standard idle flush threshold
    pub fn new() -> Self {
        Self::with_idle_flush(IDLE_FLUSH_MS)
    }

    /// Create a framer with a custom idle flush threshold
    pub fn with_idle_flush(idle_flush_ms: u32) -> Self {
        Self {
            buffer: Vec::new(),
            last_byte_ms: 0,
            idle_flush_ms,
        }
    }

    /// Number of bytes waiting for a terminator
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed a single byte received at `now_ms`
    ///
    /// Returns `Ok(Some(line))` when a terminator completes a non-empty line,
    /// `Ok(None)` when more bytes are needed (or for a terminator on an empty
    /// buffer, so CRLF dispatches once), and `Err(LineError::Overflow)` when
    /// the line no longer fits. After an overflow the next byte starts a
    /// fresh line.
    pub fn feed(&mut self, byte: u8, now_ms: u32) -> Result<Option<Line>, LineError> {
        match byte {
            CR | LF => Ok(self.take()),
            _ => {
                self.last_byte_ms = now_ms;
                if self.buffer.push(byte).is_err() {
                    self.buffer.clear();
                    return Err(LineError::Overflow);
                }
                Ok(None)
            }
        }
    }

    /// Flush a stalled partial line
    ///
    /// Returns the buffered bytes as a line if at least the idle threshold
    /// has passed since the last byte arrived.
    pub fn poll_idle(&mut self, now_ms: u32) -> Option<Line> {
        if self.buffer.is_empty() {
            return None;
        }
        if now_ms.wrapping_sub(self.last_byte_ms) >= self.idle_flush_ms {
            return self.take();
        }
        None
    }

    fn take(&mut self) -> Option<Line> {
        if self.buffer.is_empty() {
            return None;
        }
        Some(Line {
            bytes: core::mem::take(&mut self.buffer),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_str(framer: &mut LineFramer, s: &str, now_ms: u32) -> Option<Line> {
        let mut out = None;
        for &b in s.as_bytes() {
            if let Some(line) = framer.feed(b, now_ms).unwrap() {
                out = Some(line);
            }
        }
        out
    }

    #[test]
    fn test_lf_terminates_line() {
        let mut framer = LineFramer::new();
        let line = feed_str(&mut framer, "N,1,2,3,4,5,6\n", 0).unwrap();
        assert_eq!(line.as_bytes(), b"N,1,2,3,4,5,6");
        assert_eq!(framer.pending(), 0);
    }

    #[test]
    fn test_crlf_dispatches_once() {
        let mut framer = LineFramer::new();
        let mut lines = 0;
        for &b in b"A\r\n42\r\n" {
            if framer.feed(b, 0).unwrap().is_some() {
                lines += 1;
            }
        }
        assert_eq!(lines, 2);
    }

    #[test]
    fn test_terminator_on_empty_buffer_is_noop() {
        let mut framer = LineFramer::new();
        assert_eq!(framer.feed(b'\n', 0), Ok(None));
        assert_eq!(framer.feed(b'\r', 0), Ok(None));
    }

    #[test]
    fn test_overflow_discards_and_recovers() {
        let mut framer = LineFramer::new();
        for _ in 0..LINE_CAPACITY {
            assert_eq!(framer.feed(b'x', 0), Ok(None));
        }
        assert_eq!(framer.feed(b'x', 0), Err(LineError::Overflow));
        assert_eq!(framer.pending(), 0);

        let line = feed_str(&mut framer, "A\n", 1).unwrap();
        assert_eq!(line.as_bytes(), b"A");
    }

    #[test]
    fn test_full_line_without_overflow() {
        let mut framer = LineFramer::new();
        for _ in 0..LINE_CAPACITY {
            framer.feed(b'7', 0).unwrap();
        }
        let line = framer.feed(b'\n', 0).unwrap().unwrap();
        assert_eq!(line.len(), LINE_CAPACITY);
    }

    #[test]
    fn test_idle_flush_after_threshold() {
        let mut framer = LineFramer::new();
        assert!(feed_str(&mut framer, "42", 100).is_none());

        assert!(framer.poll_idle(100 + IDLE_FLUSH_MS - 1).is_none());
        let line = framer.poll_idle(100 + IDLE_FLUSH_MS).unwrap();
        assert_eq!(line.as_bytes(), b"42");
        assert!(framer.poll_idle(1_000).is_none());
    }

    #[test]
    fn test_idle_timer_restarts_on_each_byte() {
        let mut framer = LineFramer::new();
        framer.feed(b'4', 0).unwrap();
        framer.feed(b'2', 25).unwrap();
        assert!(framer.poll_idle(40).is_none());
        assert!(framer.poll_idle(55).is_some());
    }

    #[test]
    fn test_idle_flush_across_timer_wrap() {
        let mut framer = LineFramer::new();
        framer.feed(b'A', u32::MAX - 5).unwrap();
        assert!(framer.poll_idle(u32::MAX).is_none());
        assert!(framer.poll_idle(IDLE_FLUSH_MS).is_some());
    }

    #[test]
    fn test_idle_poll_on_empty_buffer() {
        let mut framer = LineFramer::new();
        assert!(framer.poll_idle(10_000).is_none());
    }
}
