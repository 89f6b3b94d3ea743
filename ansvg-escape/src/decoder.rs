//! Pull based ANSI decoder.
//!
//! The [`Decoder`] walks an input stream one character at a time and hands
//! back every character that is meant to be shown (including `\r`, `\n` and
//! `\t`, which a consumer needs to lay out lines). Escape sequences are
//! consumed internally: SGR updates the running [`Style`], every other
//! control sequence and all operating system commands are dropped.
//!
//! Each returned [`DecodedChar`] carries the cell it was assigned and a copy
//! of the style in effect, so callers never have to read decoder state
//! between pulls. The decoder never rewinds; positions only move forward.

use std::io::Read;
use std::iter::FusedIterator;

use log::{debug, trace};

use crate::error::Result;
use crate::sgr::attrs_from_sgr_parameters;
use crate::style::Style;
use crate::utf8::CharReader;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Columns between tab stops.
pub const TAB_WIDTH: usize = 8;

/// Zero based cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Parser state between two input characters.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Characters are content.
    #[default]
    Ground,
    /// Seen `ESC`.
    Escape,
    /// Inside `ESC [`, collecting parameters until a final byte.
    CsiParam,
    /// Inside `ESC ]`, skipping the payload.
    OscString,
    /// Seen `ESC` inside an operating system command.
    OscEscape,
}

/// A content character together with where and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedChar {
    pub ch: char,
    pub point: Point,
    pub style: Style,
}

/// Decodes a byte stream into positioned, styled characters.
pub struct Decoder<R> {
    reader: CharReader<R>,
    state: State,
    /// Raw CSI parameter characters of the sequence being parsed.
    params: String,
    style: Style,
    /// Cell of the character returned last.
    point: Point,
    /// Cell the next content character will get.
    next: Point,
    max_x: usize,
    max_y: usize,
    finished: bool,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: CharReader::new(reader),
            state: State::default(),
            params: String::new(),
            style: Style::default(),
            point: Point::default(),
            next: Point::default(),
            max_x: 0,
            max_y: 0,
            finished: false,
        }
    }

    /// Pull the next content character.
    ///
    /// Returns `Ok(None)` once the input is exhausted. An unterminated
    /// escape sequence at the end of input is discarded silently. A read
    /// failure is returned as is and ends the session: every later call
    /// returns `Ok(None)`.
    pub fn next_char(&mut self) -> Result<Option<DecodedChar>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let read = self.reader.read_char().inspect_err(|err| {
                debug!("[decoder] read failed: {err}");
                self.finished = true;
            })?;

            let Some(c) = read else {
                self.finish();
                return Ok(None);
            };

            match self.state {
                State::Ground => match c {
                    ESC => self.state = State::Escape,
                    _ => return Ok(Some(self.emit(c))),
                },
                State::Escape => match c {
                    '[' => self.state = State::CsiParam,
                    ']' => self.state = State::OscString,
                    _ => {
                        self.state = State::Ground;
                        return Ok(Some(self.emit(c)));
                    },
                },
                State::CsiParam if is_final_byte(c) => {
                    self.csi_dispatch(c);
                    self.state = State::Ground;
                },
                State::CsiParam => self.params.push(c),
                State::OscString => match c {
                    BEL => self.state = State::Ground,
                    ESC => self.state = State::OscEscape,
                    _ => {},
                },
                State::OscEscape => match c {
                    '\\' => self.state = State::Ground,
                    _ => self.state = State::OscString,
                },
            }
        }
    }

    /// Cell of the character returned last.
    pub fn point(&self) -> Point {
        self.point
    }

    /// Largest column assigned to a printable character so far.
    pub fn max_x(&self) -> usize {
        self.max_x
    }

    /// Largest row assigned to any content character so far.
    pub fn max_y(&self) -> usize {
        self.max_y
    }

    /// Style in effect for the next content character.
    pub fn style(&self) -> Style {
        self.style
    }

    pub fn state(&self) -> State {
        self.state
    }

    fn finish(&mut self) {
        if self.state != State::Ground {
            debug!(
                "[decoder] input ended inside {:?}, dropping {:?}",
                self.state, self.params
            );
            self.params.clear();
            self.state = State::Ground;
        }
        self.finished = true;
    }

    fn emit(&mut self, ch: char) -> DecodedChar {
        let point = self.next;
        self.point = point;
        self.max_y = self.max_y.max(point.y);

        match ch {
            '\r' => self.next.x = 0,
            '\n' => {
                self.next.x = 0;
                self.next.y += 1;
            },
            '\t' => self.next.x = next_tab_stop(point.x),
            _ => {
                self.max_x = self.max_x.max(point.x);
                self.next.x += 1;
            },
        }

        DecodedChar {
            ch,
            point,
            style: self.style,
        }
    }

    fn csi_dispatch(&mut self, final_byte: char) {
        let raw = std::mem::take(&mut self.params);
        trace!("[csi] params: {raw:?}, final: {final_byte:?}");

        if final_byte != 'm' {
            debug!("[unsupported csi] params: {raw:?}, final: {final_byte:?}");
            return;
        }

        for attr in attrs_from_sgr_parameters(&parse_params(&raw)) {
            self.style.apply(attr);
        }
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<DecodedChar>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_char().transpose()
    }
}

impl<R: Read> FusedIterator for Decoder<R> {}

/// Bytes ending a control sequence (`0x40..=0x7e`, plus `)`).
fn is_final_byte(c: char) -> bool {
    matches!(c, '@'..='~' | ')')
}

/// Column a tab at `x` advances to.
pub fn next_tab_stop(x: usize) -> usize {
    (x / TAB_WIDTH + 1) * TAB_WIDTH
}

/// Split CSI parameters on `;` and `:`.
///
/// Empty or non numeric parameters count as 0 and large values saturate. A
/// private marker is not special: `?0` is a non numeric parameter, so
/// `CSI ? 0 m` resets like `CSI 0 m`.
fn parse_params(raw: &str) -> Vec<u16> {
    raw
        .split([';', ':'])
        .map(|param| {
            param
                .bytes()
                .try_fold(0u16, |acc, b| {
                    let digit = (b as char).to_digit(10)? as u16;
                    Some(acc.saturating_mul(10).saturating_add(digit))
                })
                .unwrap_or(0)
        })
        .collect()
}
