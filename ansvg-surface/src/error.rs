use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write svg: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
