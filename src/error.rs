use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::content::ContentType;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Can't fetch content: {0}")]
    NotFound(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A directory at a scanned date level is not named with an integer
    #[error("Directory name '{name}' under {} is not a number", dir.display())]
    MalformedLayout { dir: PathBuf, name: String },

    #[error("Unsupported content type: {0}")]
    UnsupportedType(ContentType),

    #[error("Can't parse content from {context}: {source}")]
    MalformedDocument {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Title separator must contain at least one character")]
    InvalidSeparator,
}

impl StoreError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            context: context.into(),
            source,
        }
    }

    /// HTTP status equivalent used at the server boundary
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::UnsupportedType(_) => 422,
            _ => 500,
        }
    }
}
