use std::path::PathBuf;

use thiserror::Error;

/// A malformed style literal.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("style parse error at {line}:{col}: {message}")]
pub struct StyleParseError {
    pub message: String,
    /// 1-based source line number where the error occurred.
    pub line: usize,
    /// 1-based source column number where the error occurred.
    pub col: usize,
}

impl StyleParseError {
    pub(crate) fn new(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self { message: msg.into(), line, col }
    }
}

/// Failure to turn a UI definition file into a [`UiNode`](crate::UiNode) tree.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read UI definition {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported UI definition {path}: expected a .xml or .json file")]
    UnsupportedExtension { path: PathBuf },

    #[error("malformed XML UI definition: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("malformed JSON UI definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UI node has an empty type name")]
    EmptyTypeName,
}
