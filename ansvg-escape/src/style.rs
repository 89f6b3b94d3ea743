use bitflags::bitflags;

use crate::color::Color;
use crate::sgr::Attr;

bitflags! {
    /// Text attributes toggled by SGR sequences.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flags: u8 {
        const BOLD          = 1;
        const DIM           = 1 << 1;
        const ITALIC        = 1 << 2;
        const UNDERLINE     = 1 << 3;
        const INVERSE       = 1 << 4;
        const STRIKEOUT     = 1 << 5;
    }
}

/// Running graphic rendition of the decoder.
///
/// The style persists from one character to the next until an SGR sequence
/// changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub foreground: Color,
    pub background: Color,
    pub flags: Flags,
}

impl Style {
    pub fn intensity(&self) -> bool {
        self.flags.contains(Flags::BOLD)
    }

    pub fn dim(&self) -> bool {
        self.flags.contains(Flags::DIM)
    }

    pub fn italic(&self) -> bool {
        self.flags.contains(Flags::ITALIC)
    }

    pub fn underline(&self) -> bool {
        self.flags.contains(Flags::UNDERLINE)
    }

    pub fn invert(&self) -> bool {
        self.flags.contains(Flags::INVERSE)
    }

    pub fn strikethrough(&self) -> bool {
        self.flags.contains(Flags::STRIKEOUT)
    }

    /// Apply a single SGR attribute.
    pub fn apply(&mut self, attr: Attr) {
        match attr {
            Attr::Reset => *self = Self::default(),
            Attr::Bold => self.flags.insert(Flags::BOLD),
            Attr::Dim => self.flags.insert(Flags::DIM),
            Attr::CancelBoldDim => self.flags.remove(Flags::BOLD | Flags::DIM),
            Attr::Italic => self.flags.insert(Flags::ITALIC),
            Attr::CancelItalic => self.flags.remove(Flags::ITALIC),
            Attr::Underline => self.flags.insert(Flags::UNDERLINE),
            Attr::CancelUnderline => self.flags.remove(Flags::UNDERLINE),
            Attr::Reverse => self.flags.insert(Flags::INVERSE),
            Attr::CancelReverse => self.flags.remove(Flags::INVERSE),
            Attr::Strike => self.flags.insert(Flags::STRIKEOUT),
            Attr::CancelStrike => self.flags.remove(Flags::STRIKEOUT),
            Attr::Foreground(color) => self.foreground = color,
            Attr::Background(color) => self.background = color,
        }
    }
}
