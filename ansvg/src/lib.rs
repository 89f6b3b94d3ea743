//! Convert ANSI colored terminal output to SVG.
//!
//! ```no_run
//! let input = "\x1b[1;32mok\x1b[0m done\n";
//! let mut svg = Vec::new();
//! ansvg::convert(input.as_bytes(), &mut svg, &ansvg::Options::default())?;
//! # Ok::<(), ansvg::Error>(())
//! ```

pub mod cli;
mod error;

use std::io::{Read, Write};

use ansvg_escape::Decoder;
pub use ansvg_surface::{BoxSize, Margin};
use ansvg_surface::{
    EMBEDDED_FAMILY, EXTERNAL_FAMILY, FontFace, Screen, SvgOptions,
    SvgRenderer,
};
use log::debug;

pub use error::{Error, Result};

/// Everything that shapes the generated document.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub font_name: String,
    /// Font file inlined into the document. Takes precedence over
    /// `font_ref`.
    pub font_embedded: Option<Vec<u8>>,
    /// URL of a font the viewer loads.
    pub font_ref: Option<String>,
    pub font_size: u32,
    /// Columns to size the document for; 0 sizes it to the content.
    pub terminal_width: usize,
    /// Pixel size of a cell; `0x0` keeps font relative units.
    pub char_box: BoxSize,
    pub margin: Margin,
    pub color_scheme: String,
    pub transparent: bool,
    pub grid: bool,
}

impl Default for Options {
    fn default() -> Self {
        let svg = SvgOptions::default();
        Self {
            font_name: svg.font_name,
            font_embedded: None,
            font_ref: None,
            font_size: svg.font_size,
            terminal_width: svg.terminal_width,
            char_box: svg.char_box,
            margin: svg.margin,
            color_scheme: ansvg_schemes::DEFAULT_SCHEME.to_owned(),
            transparent: svg.transparent,
            grid: svg.grid,
        }
    }
}

impl Options {
    /// Family the document ends up using.
    pub fn font_family(&self) -> &str {
        if self.font_embedded.is_some() {
            EMBEDDED_FAMILY
        } else if self.font_ref.is_some() {
            EXTERNAL_FAMILY
        } else {
            &self.font_name
        }
    }

    fn font_face(&self) -> Option<FontFace> {
        match (&self.font_embedded, &self.font_ref) {
            (Some(data), _) => Some(FontFace::Embedded(data.clone())),
            (None, Some(url)) => Some(FontFace::External(url.clone())),
            (None, None) => None,
        }
    }

    fn svg_options(&self) -> SvgOptions {
        SvgOptions {
            font_name: self.font_name.clone(),
            font_size: self.font_size,
            font_face: self.font_face(),
            char_box: self.char_box,
            margin: self.margin,
            terminal_width: self.terminal_width,
            transparent: self.transparent,
            grid: self.grid,
        }
    }
}

/// Decode `input` and write it to `output` as an SVG document.
///
/// The color scheme is resolved before any input is read.
pub fn convert<R: Read, W: Write>(
    input: R,
    output: W,
    options: &Options,
) -> Result<()> {
    let scheme = ansvg_schemes::load(&options.color_scheme)?;
    let screen = Screen::read(Decoder::new(input))?;
    debug!(
        "decoded {} columns by {} rows",
        screen.columns(),
        screen.rows()
    );

    SvgRenderer::new(scheme, options.svg_options()).render(&screen, output)?;
    Ok(())
}
