use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    #[error("must be WxH")]
    Format,
    #[error("invalid number in {0:?}")]
    Number(String),
}

/// Pixel size of one character cell, written `WxH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxSize {
    pub width: u32,
    pub height: u32,
}

impl BoxSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero dimension means "use font relative units".
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Display for BoxSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for BoxSize {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = split_dimension(s)?;
        Ok(Self { width, height })
    }
}

/// Space around the character grid, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margin {
    pub x: f64,
    pub y: f64,
}

impl Display for Margin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

impl FromStr for Margin {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = split_dimension(s)?;
        Ok(Self { x, y })
    }
}

fn split_dimension<T: FromStr>(s: &str) -> Result<(T, T), DimensionError> {
    let (x, y) = s.split_once('x').ok_or(DimensionError::Format)?;
    if y.contains('x') {
        return Err(DimensionError::Format);
    }

    let parse = |part: &str| {
        part.trim()
            .parse::<T>()
            .map_err(|_| DimensionError::Number(s.to_owned()))
    };

    Ok((parse(x)?, parse(y)?))
}
