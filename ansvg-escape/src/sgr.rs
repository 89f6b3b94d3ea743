//! Select Graphic Rendition (`CSI ... m`) interpretation.

use log::debug;

use crate::color::{Color, PaletteIndex, Rgb};

/// A single graphic rendition change decoded from SGR parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    /// Clear colors and every flag.
    Reset,
    Bold,
    Dim,
    /// SGR 22 turns off both bold and faint.
    CancelBoldDim,
    Italic,
    CancelItalic,
    Underline,
    CancelUnderline,
    Reverse,
    CancelReverse,
    Strike,
    CancelStrike,
    Foreground(Color),
    Background(Color),
}

/// Translate SGR parameters into attributes, left to right.
///
/// Extended color codes (38/48) consume their sub-parameters so that those
/// are never interpreted as attributes of their own. Unknown codes are
/// skipped.
pub fn attrs_from_sgr_parameters(params: &[u16]) -> Vec<Attr> {
    let mut attrs = Vec::with_capacity(params.len());
    let mut iter = params.iter().copied();

    while let Some(param) = iter.next() {
        let attr = match param {
            0 => Some(Attr::Reset),
            1 => Some(Attr::Bold),
            2 => Some(Attr::Dim),
            3 => Some(Attr::Italic),
            4 => Some(Attr::Underline),
            7 => Some(Attr::Reverse),
            9 => Some(Attr::Strike),
            22 => Some(Attr::CancelBoldDim),
            23 => Some(Attr::CancelItalic),
            24 => Some(Attr::CancelUnderline),
            27 => Some(Attr::CancelReverse),
            29 => Some(Attr::CancelStrike),
            30..=37 => Some(Attr::Foreground(named_color(param - 30))),
            38 => Some(Attr::Foreground(parse_extended_color(&mut iter))),
            39 => Some(Attr::Foreground(Color::Default)),
            40..=47 => Some(Attr::Background(named_color(param - 40))),
            48 => Some(Attr::Background(parse_extended_color(&mut iter))),
            49 => Some(Attr::Background(Color::Default)),
            90..=97 => Some(Attr::Foreground(named_color(param - 90 + 8))),
            100..=107 => Some(Attr::Background(named_color(param - 100 + 8))),
            _ => {
                debug!("[unsupported sgr] param: {param}");
                None
            },
        };

        if let Some(attr) = attr {
            attrs.push(attr);
        }
    }

    attrs
}

fn named_color(index: u16) -> Color {
    Color::Indexed(index as PaletteIndex)
}

/// Parse the sub-parameters following 38 or 48.
///
/// `2;r;g;b` selects a truecolor with each channel clamped to 255, `5;n`
/// selects a palette entry. Indices above 15 are resolved to RGB right away.
/// Malformed or truncated input yields [`Color::Default`] after consuming
/// whatever the selected form had available; an unknown selector consumes
/// only itself.
fn parse_extended_color<I>(iter: &mut I) -> Color
where
    I: Iterator<Item = u16>,
{
    match iter.next() {
        Some(2) => {
            let channels: Vec<u16> = iter.by_ref().take(3).collect();
            match channels[..] {
                [r, g, b] => Color::TrueColor(Rgb::new(
                    clamp_channel(r),
                    clamp_channel(g),
                    clamp_channel(b),
                )),
                _ => {
                    debug!("[malformed sgr] truncated rgb: {channels:?}");
                    Color::Default
                },
            }
        },
        Some(5) => match iter.next() {
            Some(index @ 0..=15) => Color::Indexed(index as PaletteIndex),
            Some(index @ 16..=255) => {
                Rgb::from_palette_index(index as PaletteIndex)
                    .map_or(Color::Default, Color::TrueColor)
            },
            other => {
                debug!("[malformed sgr] palette index: {other:?}");
                Color::Default
            },
        },
        other => {
            debug!("[malformed sgr] color selector: {other:?}");
            Color::Default
        },
    }
}

fn clamp_channel(value: u16) -> u8 {
    value.min(u16::from(u8::MAX)) as u8
}
