use std::io::Read;
use std::ops::Index;

use ansvg_escape::{DecodedChar, Decoder, Style, next_tab_stop};

/// A single character on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Cell {
    pub fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }

    /// Unstyled space used for columns nothing was written to.
    pub fn blank() -> Self {
        Self::new(' ', Style::default())
    }

    pub fn is_whitespace(&self) -> bool {
        self.ch.is_whitespace()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

/// One row of cells, indexed by column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    cells: Vec<Cell>,
}

impl Line {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Write `cell` at `column`, padding any gap with blanks. A column that
    /// was already written is overwritten.
    pub fn put(&mut self, column: usize, cell: Cell) {
        if column >= self.cells.len() {
            self.cells.resize(column, Cell::blank());
            self.cells.push(cell);
        } else {
            self.cells[column] = cell;
        }
    }
}

impl Index<usize> for Line {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

/// Every character of a decoded stream laid out on a grid.
///
/// The screen only grows: rows are created on demand and there is no
/// scrolling or clearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: Vec<Line>,
    max_x: usize,
    max_y: usize,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Self {
            lines: vec![Line::default()],
            max_x: 0,
            max_y: 0,
        }
    }

    /// Drain `decoder` into a new screen.
    pub fn read<R: Read>(decoder: Decoder<R>) -> ansvg_escape::Result<Self> {
        let mut screen = Self::new();
        for decoded in decoder {
            screen.push(decoded?);
        }
        Ok(screen)
    }

    /// Place one decoded character.
    ///
    /// Line breaks only make sure the row exists. A tab fills the cells up to
    /// the next tab stop with spaces in the tab's style.
    pub fn push(&mut self, decoded: DecodedChar) {
        let DecodedChar { ch, point, style } = decoded;
        self.max_y = self.max_y.max(point.y);
        let line = self.line_mut(point.y);

        match ch {
            '\r' | '\n' => {},
            '\t' => {
                for column in point.x..next_tab_stop(point.x) {
                    line.put(column, Cell::new(' ', style));
                }
            },
            _ => {
                line.put(point.x, Cell::new(ch, style));
                self.max_x = self.max_x.max(point.x);
            },
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Width in cells: one past the rightmost printable character.
    pub fn columns(&self) -> usize {
        self.max_x + 1
    }

    /// Height in cells: one past the lowest content row.
    pub fn rows(&self) -> usize {
        self.max_y + 1
    }

    fn line_mut(&mut self, y: usize) -> &mut Line {
        if y >= self.lines.len() {
            self.lines.resize_with(y + 1, Line::default);
        }
        &mut self.lines[y]
    }
}

impl Extend<DecodedChar> for Screen {
    fn extend<T: IntoIterator<Item = DecodedChar>>(&mut self, iter: T) {
        for decoded in iter {
            self.push(decoded);
        }
    }
}
