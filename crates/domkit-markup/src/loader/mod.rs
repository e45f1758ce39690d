//! Loading UI definitions from disk.
//!
//! Both formats produce the same [`UiNode`] tree. XML attribute strings go
//! through [`coerce`](crate::coerce::coerce); JSON values are already typed and
//! are taken as-is.

mod json;
mod xml;

use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;
use crate::node::UiNode;

pub use json::parse_json_str;
pub use xml::parse_xml_str;

/// Namespace URI that marks the name-declaring attribute in XML documents.
pub const NAME_NAMESPACE: &str = "http://schemas.ui/name";

// ── LoaderOptions ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Namespace URI of the XML name attribute (`xmlns:x="..."`).
    pub name_namespace: String,
    /// Local name of the XML name attribute (`x:Name`).
    pub name_attribute: String,
    /// XML attributes whose values are kept as raw strings.
    pub literal_attributes: Vec<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            name_namespace: NAME_NAMESPACE.to_string(),
            name_attribute: "Name".to_string(),
            literal_attributes: vec!["style".to_string()],
        }
    }
}

// ── Format ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xml,
    Json,
}

impl Format {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("xml") {
            Some(Format::Xml)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Format::Json)
        } else {
            None
        }
    }
}

// ── Entry points ──────────────────────────────────────────────────────────

/// Parse an in-memory UI definition of the given format.
pub fn parse_str(src: &str, format: Format, options: &LoaderOptions) -> Result<UiNode, LoadError> {
    match format {
        Format::Xml  => parse_xml_str(src, options),
        Format::Json => parse_json_str(src),
    }
}

/// Read and parse a `.xml` or `.json` UI definition.
pub fn load_file(path: impl AsRef<Path>, options: &LoaderOptions) -> Result<UiNode, LoadError> {
    let path = path.as_ref();
    let format = Format::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedExtension { path: path.to_path_buf() })?;

    let src = std::fs::read_to_string(path)
        .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;

    let root = parse_str(&src, format, options)?;
    log::debug!("parsed {} ({} nodes)", path.display(), root.count());
    Ok(root)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::value::Value;

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_xml_by_extension() {
        let file = write_temp(".xml", r#"<VStack spacing="4"><Label text="hi"/></VStack>"#);
        let root = load_file(file.path(), &LoaderOptions::default()).unwrap();
        assert_eq!(root.type_name, "VStack");
        assert_eq!(root.attribute("spacing"), Some(&Value::Int(4)));
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn loads_json_by_extension_case_insensitive() {
        let file = write_temp(".JSON", r#"{"type": "Label", "attributes": {"text": "hi"}}"#);
        let root = load_file(file.path(), &LoaderOptions::default()).unwrap();
        assert_eq!(root.type_name, "Label");
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_temp(".yaml", "type: Label");
        let err = load_file(file.path(), &LoaderOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(dir.path().join("absent.xml"), &LoaderOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn malformed_documents() {
        let xml = write_temp(".xml", "<VStack><Label></VStack>");
        assert!(matches!(
            load_file(xml.path(), &LoaderOptions::default()),
            Err(LoadError::Xml(_))
        ));
        let json = write_temp(".json", "{\"type\": ");
        assert!(matches!(
            load_file(json.path(), &LoaderOptions::default()),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: LoaderOptions = serde_json::from_str(r#"{"name_attribute": "Id"}"#).unwrap();
        assert_eq!(opts.name_attribute, "Id");
        assert_eq!(opts.name_namespace, NAME_NAMESPACE);
        assert_eq!(opts.literal_attributes, vec!["style".to_string()]);
    }
}
