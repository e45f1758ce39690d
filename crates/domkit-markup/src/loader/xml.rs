use indexmap::IndexMap;
use roxmltree::{Document, Node};

use crate::coerce::coerce;
use crate::error::LoadError;
use crate::loader::LoaderOptions;
use crate::node::UiNode;
use crate::value::Value;

/// Parse an XML UI definition.
///
/// The tag becomes the widget type. The `x:Name` attribute (any prefix bound
/// to [`LoaderOptions::name_namespace`]) supplies the declared name.
/// Comments, processing instructions and text between elements are ignored.
pub fn parse_xml_str(src: &str, options: &LoaderOptions) -> Result<UiNode, LoadError> {
    let doc = Document::parse(src)?;
    element_to_node(doc.root_element(), options)
}

fn element_to_node(element: Node<'_, '_>, options: &LoaderOptions) -> Result<UiNode, LoadError> {
    let type_name = element.tag_name().name();
    if type_name.is_empty() {
        return Err(LoadError::EmptyTypeName);
    }

    let mut name = None;
    let mut attributes = IndexMap::new();
    for attr in element.attributes() {
        if attr.namespace() == Some(options.name_namespace.as_str())
            && attr.name() == options.name_attribute
        {
            name = Some(attr.value().to_string());
            continue;
        }
        let value = if options.literal_attributes.iter().any(|k| k == attr.name()) {
            Value::Str(attr.value().to_string())
        } else {
            coerce(attr.value())
        };
        attributes.insert(attr.name().to_string(), value);
    }

    let children = element
        .children()
        .filter(|child| child.is_element())
        .map(|child| element_to_node(child, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(UiNode { type_name: type_name.to_string(), name, attributes, children })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> UiNode {
        parse_xml_str(src, &LoaderOptions::default()).unwrap()
    }

    #[test]
    fn attributes_are_coerced() {
        let node =
            parse(r#"<Window title="Demo" width="300" ratio="0.5" visible="True" tag="yes"/>"#);
        assert_eq!(node.attribute("title"), Some(&Value::Str("Demo".into())));
        assert_eq!(node.attribute("width"), Some(&Value::Int(300)));
        assert_eq!(node.attribute("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(node.attribute("visible"), Some(&Value::Bool(true)));
        assert_eq!(node.attribute("tag"), Some(&Value::Str("yes".into())));
    }

    #[test]
    fn namespaced_name_becomes_declared_name() {
        let node = parse(
            r#"<Window xmlns:x="http://schemas.ui/name" x:Name="self._window" title="T">
                 <Label x:Name="label" text="1"/>
               </Window>"#,
        );
        assert_eq!(node.name.as_deref(), Some("self._window"));
        assert!(node.attribute("Name").is_none());
        assert_eq!(node.children[0].name.as_deref(), Some("label"));
        assert_eq!(node.children[0].attribute("text"), Some(&Value::Int(1)));
    }

    #[test]
    fn other_namespace_name_is_a_plain_attribute() {
        let node = parse(r#"<Label xmlns:y="urn:other" y:Name="n"/>"#);
        assert_eq!(node.name, None);
        assert_eq!(node.attribute("Name"), Some(&Value::Str("n".into())));
    }

    #[test]
    fn style_is_kept_literal() {
        let node = parse(r#"<Button style="{'Button': {'margin': 2}}" text="OK"/>"#);
        assert_eq!(
            node.attribute("style"),
            Some(&Value::Str("{'Button': {'margin': 2}}".into()))
        );
    }

    #[test]
    fn dotted_model_value_key() {
        let node = parse(r#"<ProgressBar model.value="0.75"/>"#);
        assert_eq!(node.attribute("model.value"), Some(&Value::Float(0.75)));
    }

    #[test]
    fn children_in_order_skipping_comments() {
        let node = parse(concat!(
            "<VStack><!-- header --><Label text='a'/>",
            "text<?pi x?><Button text='b'/><Spacer/></VStack>",
        ));
        let types: Vec<_> = node.children.iter().map(|c| c.type_name.as_str()).collect();
        assert_eq!(types, ["Label", "Button", "Spacer"]);
    }

    #[test]
    fn attribute_order_is_preserved() {
        let node = parse(r#"<Label z="1" a="2" m="3"/>"#);
        assert_eq!(node.attributes.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
    }
}
