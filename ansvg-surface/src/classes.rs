use std::fmt::Write as _;

use ansvg_escape::{ANSI_COLORS, Color, Rgb};

/// A color as it ends up in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Paint {
    /// Inherit the layer default; no class is emitted.
    Default,
    /// One of the scheme's named colors.
    Palette(u8),
    Custom(Rgb),
}

impl Paint {
    /// Resolve `color` against the default of its layer.
    ///
    /// Extended palette indices become their RGB value, and an RGB value equal
    /// to the default collapses to [`Paint::Default`].
    pub(crate) fn resolve(color: Color, default: Rgb) -> Self {
        let rgb = match color {
            Color::Default => return Paint::Default,
            Color::Indexed(index) if usize::from(index) < ANSI_COLORS => {
                return Paint::Palette(index);
            },
            Color::Indexed(index) => match Rgb::from_palette_index(index) {
                Some(rgb) => rgb,
                None => return Paint::Default,
            },
            Color::TrueColor(rgb) => rgb,
        };

        if rgb == default {
            Paint::Default
        } else {
            Paint::Custom(rgb)
        }
    }
}

/// What a [`ColorClasses`] table fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layer {
    Foreground,
    Background,
}

impl Layer {
    fn prefix(self) -> char {
        match self {
            Layer::Foreground => 'f',
            Layer::Background => 'b',
        }
    }
}

/// Assigns CSS class names to paints as they are used.
///
/// Palette colors map to `<p>a<N>`, custom colors get `<p>c<N>` in order of
/// first use, where `<p>` is `f` or `b`.
#[derive(Debug, Clone)]
pub(crate) struct ColorClasses {
    layer: Layer,
    palette: [Rgb; ANSI_COLORS],
    palette_used: [bool; ANSI_COLORS],
    custom: Vec<Rgb>,
}

impl ColorClasses {
    pub(crate) fn new(layer: Layer, palette: [Rgb; ANSI_COLORS]) -> Self {
        Self {
            layer,
            palette,
            palette_used: [false; ANSI_COLORS],
            custom: Vec::new(),
        }
    }

    pub(crate) fn class(&mut self, paint: Paint) -> Option<String> {
        let prefix = self.layer.prefix();
        match paint {
            Paint::Default => None,
            Paint::Palette(index) => {
                self.palette_used[usize::from(index)] = true;
                Some(format!("{prefix}a{index}"))
            },
            Paint::Custom(rgb) => {
                let position =
                    match self.custom.iter().position(|&c| c == rgb) {
                        Some(position) => position,
                        None => {
                            self.custom.push(rgb);
                            self.custom.len() - 1
                        },
                    };
                Some(format!("{prefix}c{position}"))
            },
        }
    }

    /// CSS rules for every class handed out so far.
    pub(crate) fn css(&self) -> String {
        let prefix = self.layer.prefix();
        let mut css = String::new();

        let used = self.palette.iter().zip(self.palette_used).enumerate();
        for (index, (rgb, _)) in used.filter(|(_, (_, used))| *used) {
            let _ = writeln!(css, ".{prefix}a{index} {{ fill: {rgb}; }}");
        }
        for (index, rgb) in self.custom.iter().enumerate() {
            let _ = writeln!(css, ".{prefix}c{index} {{ fill: {rgb}; }}");
        }

        css
    }
}
