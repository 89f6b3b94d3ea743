//! ANSI escape decoding for static terminal renderings.
//!
//! [`Decoder`] turns raw terminal output into [`DecodedChar`]s: every content
//! character together with its cell and the graphic rendition in effect.
//! Only SGR sequences influence the result; cursor movement, screen control
//! and operating system commands are parsed and dropped.

mod color;
mod decoder;
mod error;
mod sgr;
mod style;
mod utf8;

pub use color::{ANSI_COLORS, Color, ColorParseError, PaletteIndex, Rgb};
pub use decoder::{
    DecodedChar, Decoder, Point, State, TAB_WIDTH, next_tab_stop,
};
pub use error::{Error, Result};
pub use sgr::{Attr, attrs_from_sgr_parameters};
pub use style::{Flags, Style};
