//! Color schemes bundled with the converter.
//!
//! Schemes are stored as VSCode `workbench.colorCustomizations` documents and
//! compiled into the binary, so lookups never touch the file system.

mod error;
mod scheme;
mod store;

pub use error::{Result, SchemeError};
pub use scheme::ColorScheme;
pub use store::{DEFAULT_SCHEME, load, names};
