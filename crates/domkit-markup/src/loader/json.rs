use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::LoadError;
use crate::node::UiNode;
use crate::value::Value;

/// Wire shape of a JSON node: `{"type", "name"?, "attributes"?, "children"?}`.
#[derive(Debug, Deserialize)]
struct JsonNode {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    attributes: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    children: Vec<JsonNode>,
}

impl TryFrom<JsonNode> for UiNode {
    type Error = LoadError;

    fn try_from(node: JsonNode) -> Result<Self, Self::Error> {
        if node.type_name.is_empty() {
            return Err(LoadError::EmptyTypeName);
        }
        Ok(UiNode {
            type_name: node.type_name,
            name: node.name,
            attributes: node.attributes.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            children: node
                .children
                .into_iter()
                .map(UiNode::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

/// Parse a JSON UI definition. Attribute values are used as typed by JSON.
pub fn parse_json_str(src: &str) -> Result<UiNode, LoadError> {
    let raw: JsonNode = serde_json::from_str(src)?;
    UiNode::try_from(raw)
}
