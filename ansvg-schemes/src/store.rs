use log::debug;

use crate::error::{Result, SchemeError};
use crate::scheme::{ColorScheme, SchemeFile};

/// Scheme used when none is requested.
pub const DEFAULT_SCHEME: &str = "Builtin Dark";

macro_rules! bundled {
    ($($name:literal),+ $(,)?) => {
        &[$(($name, include_str!(concat!("../schemes/", $name, ".json")))),+]
    };
}

/// `(name, json)` pairs compiled into the binary.
const BUNDLED: &[(&str, &str)] = bundled![
    "Builtin Dark",
    "Builtin Light",
    "Builtin Solarized Dark",
    "Builtin Solarized Light",
    "Dracula",
    "Tango Dark",
];

/// Load a bundled scheme by its exact name.
pub fn load(name: &str) -> Result<ColorScheme> {
    let (_, json) = BUNDLED
        .iter()
        .find(|(bundled, _)| *bundled == name)
        .ok_or_else(|| SchemeError::NotFound(name.to_owned()))?;

    debug!("loading color scheme {name:?}");
    let file: SchemeFile =
        serde_json::from_str(json).map_err(|source| SchemeError::Json {
            name: name.to_owned(),
            source,
        })?;

    Ok(file.colors)
}

/// Names of all bundled schemes, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = BUNDLED.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}
