use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use ansvg_schemes::DEFAULT_SCHEME;
use ansvg_surface::{DEFAULT_FONT, DEFAULT_FONT_SIZE};
use clap::Parser;
use log::info;

use crate::{BoxSize, Error, Margin, Options, Result, convert};

#[derive(Debug, Parser)]
#[command(name = "ansvg", version)]
#[command(about = "Convert ANSI colored terminal output read from stdin to SVG")]
#[command(next_line_help = true)]
pub struct CliArgs {
    #[arg(
        long = "fontname",
        default_value = DEFAULT_FONT,
        help = "Font family to render with"
    )]
    pub font_name: String,

    #[arg(
        long = "fontfile",
        value_name = "PATH",
        help = "Font file to embed in the SVG"
    )]
    pub font_file: Option<PathBuf>,

    #[arg(
        long = "fontref",
        value_name = "URL",
        help = "URL of a font the SVG references"
    )]
    pub font_ref: Option<String>,

    #[arg(
        long = "fontsize",
        default_value_t = DEFAULT_FONT_SIZE,
        help = "Font size in pixels"
    )]
    pub font_size: u32,

    #[arg(
        long = "width",
        default_value_t = 0,
        help = "Terminal width in columns, 0 to fit the content"
    )]
    pub width: usize,

    #[arg(
        long = "colorscheme",
        default_value = DEFAULT_SCHEME,
        help = "Color scheme to use"
    )]
    pub color_scheme: String,

    #[arg(
        long = "listcolorschemes",
        help = "Print the available color schemes and exit"
    )]
    pub list_color_schemes: bool,

    #[arg(long, help = "Leave the background transparent")]
    pub transparent: bool,

    #[arg(long, help = "Position every character individually")]
    pub grid: bool,

    #[arg(
        long = "charboxsize",
        value_name = "WxH",
        default_value = "0x0",
        help = "Character cell size in pixels, 0x0 for font relative units"
    )]
    pub char_box: BoxSize,

    #[arg(
        long,
        value_name = "WxH",
        default_value = "0x0",
        help = "Margin around the text in characters"
    )]
    pub margin: Margin,
}

impl CliArgs {
    /// Options described by these arguments. A font file is read through
    /// `read_file`.
    pub fn options<F>(&self, read_file: F) -> Result<Options>
    where
        F: Fn(&Path) -> io::Result<Vec<u8>>,
    {
        let font_embedded = self
            .font_file
            .as_deref()
            .map(|path| {
                read_file(path).map_err(|source| Error::FontFile {
                    path: path.to_path_buf(),
                    source,
                })
            })
            .transpose()?;

        Ok(Options {
            font_name: self.font_name.clone(),
            font_embedded,
            font_ref: self.font_ref.clone(),
            font_size: self.font_size,
            terminal_width: self.width,
            char_box: self.char_box,
            margin: self.margin,
            color_scheme: self.color_scheme.clone(),
            transparent: self.transparent,
            grid: self.grid,
        })
    }
}

/// Process resources the command works with.
pub struct Env<'a> {
    pub stdin: Box<dyn Read + 'a>,
    pub stdout: Box<dyn Write + 'a>,
    pub read_file: Box<dyn Fn(&Path) -> io::Result<Vec<u8>> + 'a>,
}

impl Env<'static> {
    /// The real standard streams and file system.
    pub fn process() -> Self {
        Self {
            stdin: Box::new(io::stdin().lock()),
            stdout: Box::new(io::stdout().lock()),
            read_file: Box::new(|path| fs::read(path)),
        }
    }
}

pub fn run(args: CliArgs, env: Env<'_>) -> Result<()> {
    let Env {
        stdin,
        mut stdout,
        read_file,
    } = env;

    if args.list_color_schemes {
        return list_color_schemes(&mut stdout);
    }

    let options = args.options(read_file)?;
    info!(
        "rendering with color scheme {:?} and font {:?}",
        options.color_scheme,
        options.font_family()
    );
    convert(stdin, stdout, &options)
}

/// One demo line per bundled scheme, names padded to a common width.
fn list_color_schemes<W: Write>(out: &mut W) -> Result<()> {
    let names = ansvg_schemes::names();
    let width = names.iter().map(|name| name.len()).max().unwrap_or(0);

    for name in names {
        let scheme = ansvg_schemes::load(name)?;
        let label = format!("{name:<width$} ");
        writeln!(out, "{}", scheme.ansi_demo(&label)).map_err(Error::Output)?;
    }
    out.flush().map_err(Error::Output)
}
