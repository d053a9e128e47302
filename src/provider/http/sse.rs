//! Server-Sent Events (SSE) line handling.
//!
//! Response bodies arrive in arbitrary chunks. [`LineBuffer`] reassembles them
//! into complete lines; [`data_payload`] pulls the payload out of a `data: ` line.

/// Prefix of an SSE data line. The space is part of the match.
pub const DATA_PREFIX: &str = "data: ";

/// Incremental line splitter for SSE bodies.
///
/// Buffers raw bytes so a UTF-8 sequence split across two chunks is decoded
/// only once it is complete.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Vec<u8>,
    /// Last byte seen was `\r`; a following `\n` belongs to the same break.
    after_cr: bool,
}

impl LineBuffer {
    /// Create an empty line buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of body bytes and return every line it completes.
    ///
    /// Lines end at `\n`, `\r\n` or a bare `\r`, so all three yield the same
    /// lines. A `\r\n` split across two chunks counts as one break.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();

        for &byte in chunk {
            if std::mem::take(&mut self.after_cr) && byte == b'\n' {
                continue;
            }
            match byte {
                b'\n' => lines.push(self.take_line()),
                b'\r' => {
                    lines.push(self.take_line());
                    self.after_cr = true;
                }
                _ => self.buffer.push(byte),
            }
        }

        lines
    }

    fn take_line(&mut self) -> String {
        decode_line(&std::mem::take(&mut self.buffer))
    }

    /// Flush an unterminated final line once the body has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        self.after_cr = false;
        Some(self.take_line())
    }

    /// Check if there's a partial line in the buffer.
    pub fn has_pending(&self) -> bool {
        !self.buffer.is_empty()
    }
}

fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Return the payload of a `data: ` line, or `None` for any other line.
pub fn data_payload(line: &str) -> Option<&str> {
    line.strip_prefix(DATA_PREFIX)
}
