use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("color scheme not found: {0}")]
    NotFound(String),

    #[error("malformed color scheme {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SchemeError>;
