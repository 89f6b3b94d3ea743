use ansvg_escape::{ANSI_COLORS, Rgb};
use serde::{Deserialize, Serialize};

/// Terminal colors in the VSCode `workbench.colorCustomizations` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    #[serde(rename = "terminal.foreground")]
    pub foreground: Rgb,
    #[serde(rename = "terminal.background")]
    pub background: Rgb,
    #[serde(rename = "terminal.ansiBlack")]
    pub black: Rgb,
    #[serde(rename = "terminal.ansiRed")]
    pub red: Rgb,
    #[serde(rename = "terminal.ansiGreen")]
    pub green: Rgb,
    #[serde(rename = "terminal.ansiYellow")]
    pub yellow: Rgb,
    #[serde(rename = "terminal.ansiBlue")]
    pub blue: Rgb,
    #[serde(rename = "terminal.ansiMagenta")]
    pub magenta: Rgb,
    #[serde(rename = "terminal.ansiCyan")]
    pub cyan: Rgb,
    #[serde(rename = "terminal.ansiWhite")]
    pub white: Rgb,
    #[serde(rename = "terminal.ansiBrightBlack")]
    pub bright_black: Rgb,
    #[serde(rename = "terminal.ansiBrightRed")]
    pub bright_red: Rgb,
    #[serde(rename = "terminal.ansiBrightGreen")]
    pub bright_green: Rgb,
    #[serde(rename = "terminal.ansiBrightYellow")]
    pub bright_yellow: Rgb,
    #[serde(rename = "terminal.ansiBrightBlue")]
    pub bright_blue: Rgb,
    #[serde(rename = "terminal.ansiBrightMagenta")]
    pub bright_magenta: Rgb,
    #[serde(rename = "terminal.ansiBrightCyan")]
    pub bright_cyan: Rgb,
    #[serde(rename = "terminal.ansiBrightWhite")]
    pub bright_white: Rgb,
    #[serde(
        rename = "terminal.selectionBackground",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selection_background: Option<Rgb>,
    #[serde(
        rename = "terminalCursor.foreground",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cursor: Option<Rgb>,
}

/// On-disk wrapper around [`ColorScheme`].
#[derive(Debug, Deserialize)]
pub(crate) struct SchemeFile {
    #[serde(rename = "workbench.colorCustomizations")]
    pub(crate) colors: ColorScheme,
}

impl ColorScheme {
    /// Named colors in SGR order: 8 standard followed by 8 bright.
    pub fn palette(&self) -> [Rgb; ANSI_COLORS] {
        [
            self.black,
            self.red,
            self.green,
            self.yellow,
            self.blue,
            self.magenta,
            self.cyan,
            self.white,
            self.bright_black,
            self.bright_red,
            self.bright_green,
            self.bright_yellow,
            self.bright_blue,
            self.bright_magenta,
            self.bright_cyan,
            self.bright_white,
        ]
    }

    /// One line sample: `label` in the scheme's own colors followed by a
    /// swatch of every palette entry, selection and cursor color.
    pub fn ansi_demo(&self, label: &str) -> String {
        let swatches: String = self
            .palette()
            .into_iter()
            .chain(self.selection_background)
            .chain(self.cursor)
            .map(|color| format!("{}  \x1b[0m", color.ansi_bg()))
            .collect();

        format!(
            "{}{}{label}{swatches}\x1b[0m",
            self.background.ansi_bg(),
            self.foreground.ansi_fg(),
        )
    }
}
