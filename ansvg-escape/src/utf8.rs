use std::io::{self, BufRead, BufReader, Read};
use std::mem;

use utf8parse::{Parser, Receiver};

/// Outcome of feeding one byte to the parser.
enum Step {
    Incomplete,
    Char(char),
    Invalid,
}

impl Receiver for Step {
    fn codepoint(&mut self, c: char) {
        *self = Step::Char(c);
    }

    fn invalid_sequence(&mut self) {
        *self = Step::Invalid;
    }
}

fn is_continuation(byte: u8) -> bool {
    matches!(byte, 0x80..=0xbf)
}

/// Buffered byte source yielding Unicode scalar values.
///
/// Invalid sequences become U+FFFD. A byte that breaks an unfinished
/// sequence without being a continuation byte is decoded again on its own,
/// so `\xe2A` yields U+FFFD followed by `A`. A sequence cut short by the end
/// of input is reported as a single U+FFFD as well.
pub(crate) struct CharReader<R> {
    inner: BufReader<R>,
    parser: Parser,
    /// Bytes of an unfinished sequence have been consumed.
    pending: bool,
}

impl<R: Read> CharReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
            parser: Parser::new(),
            pending: false,
        }
    }

    /// Returns `Ok(None)` once the underlying reader is exhausted.
    pub(crate) fn read_char(&mut self) -> io::Result<Option<char>> {
        loop {
            let buf = self.inner.fill_buf()?;
            if buf.is_empty() {
                if mem::take(&mut self.pending) {
                    self.parser = Parser::new();
                    return Ok(Some(char::REPLACEMENT_CHARACTER));
                }
                return Ok(None);
            }

            let mut consumed = 0;
            let mut decoded = None;
            for &byte in buf {
                let mut step = Step::Incomplete;
                self.parser.advance(&mut step, byte);
                match step {
                    Step::Incomplete => {
                        consumed += 1;
                        self.pending = true;
                    },
                    Step::Char(c) => {
                        consumed += 1;
                        decoded = Some(c);
                        break;
                    },
                    Step::Invalid => {
                        if !self.pending || is_continuation(byte) {
                            consumed += 1;
                        }
                        self.parser = Parser::new();
                        decoded = Some(char::REPLACEMENT_CHARACTER);
                        break;
                    },
                }
            }
            self.inner.consume(consumed);

            if let Some(c) = decoded {
                self.pending = false;
                return Ok(Some(c));
            }
        }
    }
}
