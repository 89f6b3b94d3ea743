//! Screen model and SVG rendering for decoded terminal output.
//!
//! [`Screen`] lays out the characters produced by an
//! [`ansvg_escape::Decoder`] on a grid, and [`SvgRenderer`] turns that grid
//! into a standalone SVG document styled with a color scheme.

mod classes;
mod error;
mod geometry;
mod screen;
mod svg;

pub use error::{RenderError, Result};
pub use geometry::{BoxSize, DimensionError, Margin};
pub use screen::{Cell, Line, Screen};
pub use svg::{
    DEFAULT_FONT, DEFAULT_FONT_SIZE, EMBEDDED_FAMILY, EXTERNAL_FAMILY,
    FontFace, LINE_HEIGHT, SvgOptions, SvgRenderer,
};
