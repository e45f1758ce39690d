use domkit_markup::{LoadError, StyleParseError};
use thiserror::Error;

use crate::toolkit::ToolkitError;

/// Errors raised while building a widget tree from a [`UiNode`](domkit_markup::UiNode).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unknown widget type '{0}'")]
    UnknownWidgetType(String),

    #[error("cannot resolve '{key}': no handler named '{handler}'")]
    CallbackResolution { key: String, handler: String },

    #[error("'{key}' must name a handler, got a {found} value")]
    CallbackNotCallable { key: String, found: &'static str },

    #[error("invalid style on {widget}: {source}")]
    Style {
        widget: String,
        #[source]
        source: StyleParseError,
    },

    #[error(transparent)]
    Toolkit(#[from] ToolkitError),
}

/// Errors from [`DomExtension::load_ui`](crate::dom::DomExtension::load_ui).
#[derive(Debug, Error)]
pub enum DomError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Lookup of an undeclared element name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("element '{name}' not found")]
pub struct NameNotFoundError {
    pub name: String,
}
