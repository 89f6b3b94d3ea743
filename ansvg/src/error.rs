use std::io;
use std::path::PathBuf;

use ansvg_schemes::SchemeError;
use ansvg_surface::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] ansvg_escape::Error),

    #[error(transparent)]
    Scheme(#[from] SchemeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to read font file {}: {source}", path.display())]
    FontFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
