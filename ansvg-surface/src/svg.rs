use std::fmt::Write as _;
use std::io::{BufWriter, Write};

use ansvg_escape::{Color, Flags, Style};
use ansvg_schemes::ColorScheme;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::debug;

use crate::classes::{ColorClasses, Layer, Paint};
use crate::error::Result;
use crate::geometry::{BoxSize, Margin};
use crate::screen::{Cell, Screen};

/// Row height in `em` when coordinates are font relative.
pub const LINE_HEIGHT: f64 = 1.2;

pub const DEFAULT_FONT: &str = "Courier";
pub const DEFAULT_FONT_SIZE: u32 = 14;

/// Family name given to an embedded [`FontFace`].
pub const EMBEDDED_FAMILY: &str = "Embedded";
/// Family name given to an external [`FontFace`].
pub const EXTERNAL_FAMILY: &str = "ExternalRef";

/// A font shipped with the document through `@font-face`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontFace {
    /// Raw font file, inlined as a base64 data URL.
    Embedded(Vec<u8>),
    /// URL the viewer loads the font from.
    External(String),
}

impl FontFace {
    fn family(&self) -> &'static str {
        match self {
            FontFace::Embedded(_) => EMBEDDED_FAMILY,
            FontFace::External(_) => EXTERNAL_FAMILY,
        }
    }

    fn url(&self) -> String {
        match self {
            FontFace::Embedded(data) => format!(
                "data:{};base64,{}",
                font_mime(data),
                STANDARD.encode(data)
            ),
            FontFace::External(url) => url.clone(),
        }
    }
}

fn font_mime(data: &[u8]) -> &'static str {
    match data.get(..4) {
        Some(b"wOF2") => "font/woff2",
        Some(b"wOFF") => "font/woff",
        Some(b"OTTO") => "font/otf",
        _ => "font/ttf",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    pub font_name: String,
    /// Font size in pixels.
    pub font_size: u32,
    pub font_face: Option<FontFace>,
    /// Pixel size of a cell. Empty means font relative units.
    pub char_box: BoxSize,
    pub margin: Margin,
    /// Columns to size the document for. Zero uses the screen width.
    pub terminal_width: usize,
    /// Skip painting the scheme background.
    pub transparent: bool,
    /// Position every cell on its own instead of merging runs.
    pub grid: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            font_name: DEFAULT_FONT.to_owned(),
            font_size: DEFAULT_FONT_SIZE,
            font_face: None,
            char_box: BoxSize::default(),
            margin: Margin::default(),
            terminal_width: 0,
            transparent: false,
            grid: false,
        }
    }
}

/// Consecutive cells on one row sharing a background.
#[derive(Debug, Clone, PartialEq)]
struct BackgroundRun {
    x: usize,
    y: usize,
    width: usize,
    paint: Paint,
}

/// Consecutive characters drawn with the same class.
#[derive(Debug, Clone, PartialEq)]
struct Span {
    x: usize,
    flags: Flags,
    paint: Paint,
    text: String,
}

impl Span {
    fn is_blank(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

#[derive(Debug)]
struct TextLine {
    y: usize,
    spans: Vec<Span>,
}

/// Renders a [`Screen`] as a standalone SVG document.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    scheme: ColorScheme,
    options: SvgOptions,
}

impl SvgRenderer {
    pub fn new(scheme: ColorScheme, options: SvgOptions) -> Self {
        Self { scheme, options }
    }

    pub fn options(&self) -> &SvgOptions {
        &self.options
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    pub fn render<W: Write>(&self, screen: &Screen, out: W) -> Result<()> {
        let mut backgrounds = Vec::new();
        let mut lines = Vec::new();
        for (y, line) in screen.lines().iter().enumerate() {
            let mut text = TextLine { y, spans: Vec::new() };
            for (x, cell) in line.cells().iter().enumerate() {
                let (fg, bg) = self.cell_paints(cell.style);
                push_background(&mut backgrounds, x, y, bg);
                self.push_cell(&mut text.spans, x, cell, fg);
            }

            while text.spans.last().is_some_and(Span::is_blank) {
                text.spans.pop();
            }
            if !text.spans.is_empty() {
                lines.push(text);
            }
        }

        let columns = match self.options.terminal_width {
            0 => screen.columns(),
            width => width,
        };
        debug!(
            "[svg] {columns}x{} cells, {} background runs, {} text lines",
            screen.rows(),
            backgrounds.len(),
            lines.len()
        );

        let mut out = BufWriter::new(out);
        self.write_document(
            &mut out,
            columns,
            screen.rows(),
            &backgrounds,
            &lines,
        )?;
        out.flush()?;
        Ok(())
    }

    /// Foreground and background paint of a cell after inversion.
    fn cell_paints(&self, style: Style) -> (Paint, Paint) {
        let (fg, bg) = if style.invert() {
            let fg = match style.background {
                Color::Default => Color::TrueColor(self.scheme.background),
                color => color,
            };
            let bg = match style.foreground {
                Color::Default => Color::TrueColor(self.scheme.foreground),
                color => color,
            };
            (fg, bg)
        } else {
            (style.foreground, style.background)
        };

        (
            Paint::resolve(fg, self.scheme.foreground),
            Paint::resolve(bg, self.scheme.background),
        )
    }

    fn push_cell(
        &self,
        spans: &mut Vec<Span>,
        x: usize,
        cell: &Cell,
        paint: Paint,
    ) {
        let flags = text_flags(cell.style);
        if !self.options.grid {
            if let Some(last) = spans.last_mut() {
                let same = last.flags == flags && last.paint == paint;
                if same || cell.is_whitespace() {
                    last.text.push(cell.ch);
                    return;
                }
            }
        }

        spans.push(Span {
            x,
            flags,
            paint,
            text: cell.ch.to_string(),
        });
    }

    fn write_document<W: Write>(
        &self,
        out: &mut W,
        columns: usize,
        rows: usize,
        backgrounds: &[BackgroundRun],
        lines: &[TextLine],
    ) -> Result<()> {
        let palette = self.scheme.palette();
        let mut fg = ColorClasses::new(Layer::Foreground, palette);
        let mut bg = ColorClasses::new(Layer::Background, palette);
        let mut used = Flags::empty();

        // Classes are assigned while the body is produced so that the style
        // block only lists what the body references.
        let mut body = String::new();
        if !self.options.transparent {
            let _ = writeln!(
                body,
                "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
                self.scheme.background
            );
        }
        for run in backgrounds {
            let Some(class) = bg.class(run.paint) else {
                continue;
            };
            let _ = writeln!(
                body,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                 class=\"{class}\"/>",
                self.column(run.x as f64, true),
                self.row(run.y as f64, true),
                self.column(run.width as f64, false),
                self.row(1.0, false),
            );
        }
        for line in lines {
            let _ = write!(
                body,
                "<text x=\"{}\" y=\"{}\">",
                self.column(0.0, true),
                self.row(line.y as f64 + 0.5, true),
            );
            for span in &line.spans {
                used |= span.flags;
                body.push_str("<tspan");
                if self.options.grid {
                    let x = self.column(span.x as f64, true);
                    let _ = write!(body, " x=\"{x}\"");
                }
                let class = span_class(span.flags, fg.class(span.paint));
                if !class.is_empty() {
                    let _ = write!(body, " class=\"{class}\"");
                }
                body.push('>');
                xml_escape_into(&mut body, &span.text);
                body.push_str("</tspan>");
            }
            body.push_str("</text>\n");
        }

        let (width, height) = self.document_size(columns, rows);
        write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" \
             width=\"{width}\" height=\"{height}\""
        )?;
        if !self.options.char_box.is_empty() {
            write!(
                out,
                " viewBox=\"0 0 {} {}\"",
                number(self.pixel_width(columns)),
                number(self.pixel_height(rows))
            )?;
        }
        writeln!(out, " xml:space=\"preserve\">")?;

        writeln!(out, "<style>")?;
        out.write_all(self.style_block(used).as_bytes())?;
        out.write_all(fg.css().as_bytes())?;
        out.write_all(bg.css().as_bytes())?;
        writeln!(out, "</style>")?;
        out.write_all(body.as_bytes())?;
        writeln!(out, "</svg>")?;
        Ok(())
    }

    fn style_block(&self, used: Flags) -> String {
        let mut css = String::new();
        let family = match &self.options.font_face {
            Some(face) => {
                let _ = writeln!(
                    css,
                    "@font-face {{ font-family: {}; src: url({}); }}",
                    css_string(face.family()),
                    css_string(&face.url())
                );
                face.family()
            },
            None => self.options.font_name.as_str(),
        };

        let _ = writeln!(
            css,
            "svg {{ font-family: {}, monospace; font-size: {}px; }}",
            css_string(family),
            self.options.font_size
        );
        let _ = writeln!(
            css,
            "text {{ fill: {}; white-space: pre; \
             dominant-baseline: central; }}",
            self.scheme.foreground
        );

        let rules = [
            (Flags::BOLD, ".bold { font-weight: bold; }"),
            (Flags::DIM, ".dim { fill-opacity: 0.5; }"),
            (Flags::ITALIC, ".italic { font-style: italic; }"),
            (Flags::UNDERLINE, ".underline { text-decoration: underline; }"),
            (
                Flags::STRIKEOUT,
                ".strikethrough { text-decoration: line-through; }",
            ),
        ];
        for (flag, rule) in rules {
            if used.contains(flag) {
                css.push_str(rule);
                css.push('\n');
            }
        }

        css
    }

    fn document_size(&self, columns: usize, rows: usize) -> (String, String) {
        let margin = self.options.margin;
        if self.options.char_box.is_empty() {
            (
                self.column(columns as f64 + 2.0 * margin.x, false),
                self.row(rows as f64 + 2.0 * margin.y, false),
            )
        } else {
            (
                format!("{}px", number(self.pixel_width(columns))),
                format!("{}px", number(self.pixel_height(rows))),
            )
        }
    }

    fn pixel_width(&self, columns: usize) -> f64 {
        let cell = f64::from(self.options.char_box.width);
        cell * (columns as f64 + 2.0 * self.options.margin.x)
    }

    fn pixel_height(&self, rows: usize) -> f64 {
        let cell = f64::from(self.options.char_box.height);
        cell * (rows as f64 + 2.0 * self.options.margin.y)
    }

    fn column(&self, column: f64, with_margin: bool) -> String {
        let column = if with_margin {
            column + self.options.margin.x
        } else {
            column
        };
        match self.options.char_box {
            size if size.is_empty() => format!("{}ch", number(column)),
            size => format!("{}px", number(column * f64::from(size.width))),
        }
    }

    fn row(&self, row: f64, with_margin: bool) -> String {
        let row = if with_margin {
            row + self.options.margin.y
        } else {
            row
        };
        match self.options.char_box {
            size if size.is_empty() => {
                format!("{}em", number(row * LINE_HEIGHT))
            },
            size => format!("{}px", number(row * f64::from(size.height))),
        }
    }
}

fn push_background(
    runs: &mut Vec<BackgroundRun>,
    x: usize,
    y: usize,
    paint: Paint,
) {
    if paint == Paint::Default {
        return;
    }
    if let Some(last) = runs.last_mut() {
        if last.y == y && last.x + last.width == x && last.paint == paint {
            last.width += 1;
            return;
        }
    }
    runs.push(BackgroundRun {
        x,
        y,
        width: 1,
        paint,
    });
}

/// Text decorations that get a class. Underline wins over strikethrough.
fn text_flags(style: Style) -> Flags {
    let mut flags = style.flags & (Flags::BOLD | Flags::DIM | Flags::ITALIC);
    if style.underline() {
        flags |= Flags::UNDERLINE;
    } else if style.strikethrough() {
        flags |= Flags::STRIKEOUT;
    }
    flags
}

fn span_class(flags: Flags, color: Option<String>) -> String {
    let names = [
        (Flags::BOLD, "bold"),
        (Flags::DIM, "dim"),
        (Flags::ITALIC, "italic"),
        (Flags::UNDERLINE, "underline"),
        (Flags::STRIKEOUT, "strikethrough"),
    ];
    let mut classes: Vec<&str> = names
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .map(|(_, name)| *name)
        .collect();
    if let Some(color) = color.as_deref() {
        classes.push(color);
    }
    classes.join(" ")
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{}", rounded + 0.0)
}

/// Quoted CSS string, safe to place in XML character data.
fn css_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            },
            '\n' => quoted.push_str("\\a "),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');

    let mut escaped = String::with_capacity(quoted.len());
    xml_escape_into(&mut escaped, &quoted);
    escaped
}

/// Escape markup and replace characters XML 1.0 does not allow (C0
/// controls other than tab, line feed and carriage return, plus U+FFFE and
/// U+FFFF) with U+FFFD.
fn xml_escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\t' | '\n' | '\r' => out.push(c),
            '\0'..='\x1f' | '\u{fffe}' | '\u{ffff}' => {
                out.push(char::REPLACEMENT_CHARACTER)
            },
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use ansvg_escape::Decoder;

    use super::*;

    fn scheme() -> ColorScheme {
        ansvg_schemes::load(ansvg_schemes::DEFAULT_SCHEME).unwrap()
    }

    fn render_with(input: &str, options: SvgOptions) -> String {
        let screen = Screen::read(Decoder::new(input.as_bytes())).unwrap();
        let mut out = Vec::new();
        SvgRenderer::new(scheme(), options)
            .render(&screen, &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn render(input: &str) -> String {
        render_with(input, SvgOptions::default())
    }

    #[test]
    fn document_structure() {
        let svg = render("hello");

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("width=\"5ch\" height=\"1.2em\""));
        assert!(!svg.contains("viewBox"));
        assert!(svg.contains("svg { font-family: \"Courier\", monospace; font-size: 14px; }"));
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"#000000\"/>"));
        assert!(svg.contains("<text x=\"0ch\" y=\"0.6em\"><tspan>hello</tspan></text>"));
    }

    #[test]
    fn transparent_skips_background() {
        let options = SvgOptions {
            transparent: true,
            ..SvgOptions::default()
        };
        let svg = render_with("x", options);

        assert!(!svg.contains("height=\"100%\""));
    }

    #[test]
    fn runs_merge_by_class() {
        let svg = render("\x1b[31mred\x1b[1mbold\x1b[0m plain");

        assert!(svg.contains(
            "<tspan class=\"fa1\">red</tspan>\
             <tspan class=\"bold fa1\">bold </tspan>\
             <tspan>plain</tspan>"
        ));
        assert!(svg.contains(".fa1 { fill: #bb0000; }"));
        assert!(svg.contains(".bold { font-weight: bold; }"));
        assert!(!svg.contains(".italic"));
    }

    #[test]
    fn whitespace_joins_the_current_run() {
        let svg = render("\x1b[32ma\x1b[0m b");

        assert!(svg.contains("<tspan class=\"fa2\">a </tspan><tspan>b</tspan>"));
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        let svg = render("ab\x1b[4m   \x1b[0m\n\n");

        assert!(svg.contains("<tspan>ab   </tspan>"));
        assert_eq!(svg.matches("<text").count(), 1);
    }

    #[test]
    fn blank_only_line_has_no_text() {
        let svg = render("   \nx");

        assert_eq!(svg.matches("<text").count(), 1);
        assert!(svg.contains("y=\"1.8em\""));
    }

    #[test]
    fn underline_wins_over_strikethrough() {
        let svg = render("\x1b[4;9mx");

        assert!(svg.contains("<tspan class=\"underline\">x</tspan>"));
        assert!(!svg.contains(".strikethrough"));
    }

    #[test]
    fn custom_colors_in_first_use_order() {
        let svg = render("\x1b[38;2;1;2;3ma\x1b[38;5;196mb\x1b[38;2;1;2;3mc");

        assert!(svg.contains("<tspan class=\"fc0\">a</tspan>"));
        assert!(svg.contains("<tspan class=\"fc1\">b</tspan>"));
        assert!(svg.contains("<tspan class=\"fc0\">c</tspan>"));
        assert!(svg.contains(".fc0 { fill: #010203; }"));
        assert!(svg.contains(".fc1 { fill: #ff0000; }"));
    }

    #[test]
    fn backgrounds_merge_into_runs() {
        let svg = render("\x1b[44mab\x1b[45mc\x1b[0md");

        assert!(svg.contains(
            "<rect x=\"0ch\" y=\"0em\" width=\"2ch\" height=\"1.2em\" class=\"ba4\"/>"
        ));
        assert!(svg.contains(
            "<rect x=\"2ch\" y=\"0em\" width=\"1ch\" height=\"1.2em\" class=\"ba5\"/>"
        ));
        assert!(svg.contains(".ba4 { fill: #0000bb; }"));
        assert_eq!(svg.matches("class=\"ba").count(), 2);
    }

    #[test]
    fn inverse_swaps_with_scheme_defaults() {
        let svg = render("\x1b[7mx");

        assert!(svg.contains("class=\"bc0\""));
        assert!(svg.contains(".bc0 { fill: #bbbbbb; }"));
        assert!(svg.contains("<tspan class=\"fc0\">x</tspan>"));
        assert!(svg.contains(".fc0 { fill: #000000; }"));
    }

    #[test]
    fn inverse_swaps_explicit_colors() {
        let svg = render("\x1b[31;42;7mx");

        assert!(svg.contains("<tspan class=\"fa2\">x</tspan>"));
        assert!(svg.contains("class=\"ba1\""));
    }

    #[test]
    fn text_is_escaped() {
        let svg = render("a<b & c>d");

        assert!(svg.contains("a&lt;b &amp; c&gt;d"));
    }

    #[test]
    fn control_characters_are_replaced() {
        let svg = render("done\x07 ok\x00\x08");

        assert!(svg.contains("<tspan>done\u{fffd} ok\u{fffd}\u{fffd}</tspan>"));
        assert!(!svg.chars().any(|c| c < ' ' && c != '\n'));
    }

    #[test]
    fn literal_escape_is_replaced() {
        // ESC followed by ESC leaves the second one as content
        let svg = render("a\x1b\x1bb");

        assert!(svg.contains("<tspan>a\u{fffd}b</tspan>"));
    }

    #[test]
    fn char_box_uses_pixels() {
        let options = SvgOptions {
            char_box: BoxSize::new(8, 16),
            ..SvgOptions::default()
        };
        let svg = render_with("ab\ncd", options);

        assert!(svg.contains("width=\"16px\" height=\"32px\" viewBox=\"0 0 16 32\""));
        assert!(svg.contains("<text x=\"0px\" y=\"24px\">"));
    }

    #[test]
    fn margin_offsets_coordinates() {
        let options = SvgOptions {
            margin: Margin { x: 1.0, y: 0.5 },
            ..SvgOptions::default()
        };
        let svg = render_with("\x1b[41mab", options);

        assert!(svg.contains("width=\"4ch\" height=\"2.4em\""));
        assert!(svg.contains("<rect x=\"1ch\" y=\"0.6em\" width=\"2ch\""));
        assert!(svg.contains("<text x=\"1ch\" y=\"1.2em\">"));
    }

    #[test]
    fn terminal_width_overrides_columns() {
        let options = SvgOptions {
            terminal_width: 80,
            ..SvgOptions::default()
        };
        let svg = render_with("ab", options);

        assert!(svg.contains("width=\"80ch\""));
    }

    #[test]
    fn grid_positions_every_cell() {
        let options = SvgOptions {
            grid: true,
            ..SvgOptions::default()
        };
        let svg = render_with("ab c ", options);

        assert!(svg.contains(
            "<tspan x=\"0ch\">a</tspan><tspan x=\"1ch\">b</tspan>\
             <tspan x=\"2ch\"> </tspan><tspan x=\"3ch\">c</tspan></text>"
        ));
    }

    #[test]
    fn embedded_font_face() {
        let options = SvgOptions {
            font_face: Some(FontFace::Embedded(b"wOF2data".to_vec())),
            ..SvgOptions::default()
        };
        let svg = render_with("x", options);

        assert!(svg.contains(
            "@font-face { font-family: \"Embedded\"; \
             src: url(\"data:font/woff2;base64,d09GMmRhdGE=\"); }"
        ));
        assert!(svg.contains("font-family: \"Embedded\", monospace"));
    }

    #[test]
    fn external_font_face() {
        let options = SvgOptions {
            font_face: Some(FontFace::External("fonts/a&b.woff".into())),
            ..SvgOptions::default()
        };
        let svg = render_with("x", options);

        assert!(svg.contains("src: url(\"fonts/a&amp;b.woff\")"));
        assert!(svg.contains("font-family: \"ExternalRef\", monospace"));
    }

    #[test]
    fn font_name_is_quoted() {
        let options = SvgOptions {
            font_name: "My \"Mono\"".into(),
            ..SvgOptions::default()
        };
        let svg = render_with("x", options);

        assert!(svg.contains("font-family: \"My \\\"Mono\\\"\", monospace"));
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(number(3.0), "3");
        assert_eq!(number(2.5 * LINE_HEIGHT), "3");
        assert_eq!(number(0.5 * LINE_HEIGHT), "0.6");
        assert_eq!(number(-0.0), "0");
    }

    #[test]
    fn font_mime_sniffing() {
        assert_eq!(font_mime(b"OTTO...."), "font/otf");
        assert_eq!(font_mime(b"wOFF...."), "font/woff");
        assert_eq!(font_mime(b"\0\x01\0\0"), "font/ttf");
        assert_eq!(font_mime(b""), "font/ttf");
    }
}
