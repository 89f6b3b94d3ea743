use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// An index into the 256 color palette.
pub type PaletteIndex = u8;

/// Number of named ANSI colors (8 standard + 8 bright).
pub const ANSI_COLORS: usize = 16;

/// Color of a character as set by SGR.
///
/// `Default` means no color was selected and the renderer should fall back to
/// the scheme foreground or background. Palette indices `0..16` refer to the
/// scheme's named colors; the decoder resolves extended indices into
/// `TrueColor` before they reach this type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum Color {
    #[default]
    Default,
    Indexed(PaletteIndex),
    TrueColor(Rgb),
}

impl Color {
    pub fn is_default(self) -> bool {
        self == Self::Default
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => Ok(()),
            Self::Indexed(index) => write!(f, "{index}"),
            Self::TrueColor(rgb) => Display::fmt(rgb, f),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::Default);
        }

        if s.starts_with('#') {
            return s.parse().map(Self::TrueColor);
        }

        s.parse::<PaletteIndex>()
            .map(Self::Indexed)
            .map_err(|_| ColorParseError(s.to_owned()))
    }
}

/// Returned when a color string is neither empty, a palette index nor a hex
/// triple.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {0:?}")]
pub struct ColorParseError(pub String);

#[derive(
    Debug, Eq, PartialEq, Copy, Clone, Default, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray with the same value on every channel.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Resolve an extended palette index (`16..=255`) to RGB.
    ///
    /// `16..=231` is the 6x6x6 color cube where channel step `c` maps to `0`
    /// for `c == 0` and to `c * 40 + 55` otherwise. `232..=255` is a 24 step
    /// grayscale ramp from black to white. Named colors (`0..16`) depend on
    /// the scheme and yield `None`.
    pub fn from_palette_index(index: PaletteIndex) -> Option<Self> {
        match index {
            0..=15 => None,
            16..=231 => {
                let cube = index - 16;
                let step = |c: u8| if c == 0 { 0 } else { c * 40 + 55 };
                Some(Self::new(
                    step(cube / 36),
                    step((cube % 36) / 6),
                    step(cube % 6),
                ))
            },
            232..=255 => {
                let level = u16::from(index - 232);
                Some(Self::gray((255 * level / 23) as u8))
            },
        }
    }

    /// `r:g:b` triple as used in colon separated SGR truecolor parameters.
    pub fn ansi_triple(self) -> String {
        format!("{}:{}:{}", self.r, self.g, self.b)
    }

    /// SGR sequence selecting this color as foreground.
    pub fn ansi_fg(self) -> String {
        format!("\x1b[38:2:{}m", self.ansi_triple())
    }

    /// SGR sequence selecting this color as background.
    pub fn ansi_bg(self) -> String {
        format!("\x1b[48:2:{}m", self.ansi_triple())
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(s.to_owned());

        let chars = if s.starts_with("0x") && s.len() == 8 {
            &s[2..]
        } else if s.starts_with('#') && s.len() == 7 {
            &s[1..]
        } else {
            return Err(invalid());
        };

        let channel = |range: std::ops::Range<usize>| {
            chars
                .get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(invalid)
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_display() {
        assert_eq!(Color::Default.to_string(), "");
        assert_eq!(Color::Indexed(9).to_string(), "9");
        assert_eq!(
            Color::TrueColor(Rgb::new(10, 20, 30)).to_string(),
            "#0a141e"
        );
    }

    #[test]
    fn color_from_str() {
        assert_eq!("".parse::<Color>(), Ok(Color::Default));
        assert_eq!("15".parse::<Color>(), Ok(Color::Indexed(15)));
        assert_eq!(
            "#ff8000".parse::<Color>(),
            Ok(Color::TrueColor(Rgb::new(0xff, 0x80, 0x00)))
        );
        assert!("256".parse::<Color>().is_err());
        assert!("red".parse::<Color>().is_err());
    }

    #[test]
    fn parse_rgb_prefixes() {
        assert_eq!("0x11aaff".parse::<Rgb>(), Ok(Rgb::new(0x11, 0xaa, 0xff)));
        assert_eq!("#11AAFF".parse::<Rgb>(), Ok(Rgb::new(0x11, 0xaa, 0xff)));
        assert!("#11aaf".parse::<Rgb>().is_err());
        assert!("#11aafg".parse::<Rgb>().is_err());
        assert!("11aaff".parse::<Rgb>().is_err());
    }

    #[test]
    fn palette_index_cube_and_ramp() {
        assert_eq!(Rgb::from_palette_index(15), None);
        assert_eq!(Rgb::from_palette_index(16), Some(Rgb::BLACK));
        assert_eq!(Rgb::from_palette_index(17), Some(Rgb::new(0, 0, 95)));
        assert_eq!(Rgb::from_palette_index(196), Some(Rgb::new(255, 0, 0)));
        assert_eq!(Rgb::from_palette_index(231), Some(Rgb::gray(255)));
        assert_eq!(Rgb::from_palette_index(232), Some(Rgb::BLACK));
        assert_eq!(Rgb::from_palette_index(244), Some(Rgb::gray(133)));
        assert_eq!(Rgb::from_palette_index(255), Some(Rgb::gray(255)));
    }

    #[test]
    fn ansi_sequences() {
        let rgb = Rgb::new(1, 2, 3);
        assert_eq!(rgb.ansi_fg(), "\x1b[38:2:1:2:3m");
        assert_eq!(rgb.ansi_bg(), "\x1b[48:2:1:2:3m");
    }

    #[test]
    fn rgb_serde_uses_hex_string() {
        let rgb: Rgb = serde_json::from_str("\"#102030\"").unwrap();
        assert_eq!(rgb, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(serde_json::to_string(&rgb).unwrap(), "\"#102030\"");
        assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
    }
}
