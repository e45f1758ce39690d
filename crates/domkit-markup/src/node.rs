use indexmap::IndexMap;

use crate::value::Value;

// ── UiNode ────────────────────────────────────────────────────────────────

/// One widget declaration in a loaded UI definition.
///
/// ```xml
/// <Button x:Name="ok" text="OK" width="80" clicked_fn="on_ok"/>
/// ```
///
/// The loader guarantees `type_name` is non-empty. `children` keep document
/// order, which is also construction order.
#[derive(Debug, Clone, PartialEq)]
pub struct UiNode {
    /// Widget type name: `"VStack"`, `"Label"`, `"ComboBox"`.
    pub type_name: String,
    /// Declared name used to expose the widget to application code.
    pub name: Option<String>,
    pub attributes: IndexMap<String, Value>,
    pub children: Vec<UiNode>,
}

impl UiNode {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: None,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(UiNode::count).sum::<usize>()
    }
}
