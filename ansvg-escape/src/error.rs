use std::io;

use thiserror::Error;

/// Errors produced while decoding an input stream.
///
/// Malformed escape sequences are never reported; only a failing reader ends
/// a decoding session early.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
