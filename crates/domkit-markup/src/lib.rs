//! UI definition model and loaders for **domkit**.
//!
//! This crate turns XML or JSON documents into a uniform [`UiNode`] tree. It
//! knows nothing about widgets, so editors and linters can depend on it
//! without pulling in a toolkit.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`value`] | `Value`, the typed attribute value |
//! | [`coerce`] | string → `Value` coercion for XML attributes |
//! | [`literal`] | safe literal parser used for `style` attributes |
//! | [`node`] | `UiNode` |
//! | [`loader`] | `load_file`, `parse_xml_str`, `parse_json_str`, `LoaderOptions` |
//! | [`error`] | `LoadError`, `StyleParseError` |
//!
//! # Quick start
//!
//! ```rust
//! use domkit_markup::{loader, LoaderOptions, Value};
//!
//! let src = r#"
//!     <VStack xmlns:x="http://schemas.ui/name" spacing="4">
//!         <Label x:Name="label" text="empty"/>
//!     </VStack>
//! "#;
//!
//! let root = loader::parse_xml_str(src, &LoaderOptions::default()).unwrap();
//! assert_eq!(root.type_name, "VStack");
//! assert_eq!(root.attribute("spacing"), Some(&Value::Int(4)));
//! assert_eq!(root.children[0].name.as_deref(), Some("label"));
//! ```

pub mod coerce;
pub mod error;
pub mod literal;
pub mod loader;
pub mod node;
pub mod value;

pub use coerce::coerce;
pub use error::{LoadError, StyleParseError};
pub use literal::{parse_literal, parse_style};
pub use loader::{load_file, LoaderOptions};
pub use node::UiNode;
pub use value::Value;
