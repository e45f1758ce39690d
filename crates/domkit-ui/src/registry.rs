//! Widget type registry: maps type names to factories.

use std::collections::HashMap;

use crate::toolkit::{ConstructArgs, ToolkitError, WidgetRef};

/// Constructor for one widget type.
pub type Factory = Box<dyn Fn(ConstructArgs) -> Result<WidgetRef, ToolkitError>>;

/// How the builder treats a widget type's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Children (if any) are appended with the default child semantics.
    Leaf,
    /// Plain container; children appended in order.
    Container,
    /// Children are built inside the widget's frame (windows).
    Framed,
    /// Children are item declarations added to the widget model (combo boxes).
    SelectionList,
    /// Item declaration inside a [`SelectionList`](WidgetKind::SelectionList).
    SelectionItem,
    /// Children receive a reference to this widget (radio collections).
    ChoiceGroup,
    /// Member of a [`ChoiceGroup`](WidgetKind::ChoiceGroup).
    ChoiceItem,
}

/// A registered widget type.
pub struct WidgetClass {
    pub kind: WidgetKind,
    /// Attribute passed as the single positional constructor argument
    /// (`text` for labels, `title` for windows).
    pub positional: Option<String>,
    factory: Factory,
}

impl WidgetClass {
    pub fn new(
        kind: WidgetKind,
        factory: impl Fn(ConstructArgs) -> Result<WidgetRef, ToolkitError> + 'static,
    ) -> Self {
        Self { kind, positional: None, factory: Box::new(factory) }
    }

    pub fn positional(mut self, attribute: impl Into<String>) -> Self {
        self.positional = Some(attribute.into());
        self
    }

    pub fn construct(&self, args: ConstructArgs) -> Result<WidgetRef, ToolkitError> {
        (self.factory)(args)
    }
}

/// Registry mapping widget type names to their classes.
///
/// Open for extension: applications register their own types next to the
/// toolkit's without touching the builder.
#[derive(Default)]
pub struct WidgetRegistry {
    classes: HashMap<String, WidgetClass>,
}

impl WidgetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the class for `type_name`.
    pub fn register(&mut self, type_name: impl Into<String>, class: WidgetClass) {
        self.classes.insert(type_name.into(), class);
    }

    pub fn with(mut self, type_name: impl Into<String>, class: WidgetClass) -> Self {
        self.register(type_name, class);
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&WidgetClass> {
        self.classes.get(type_name)
    }

    pub fn kind_of(&self, type_name: &str) -> Option<WidgetKind> {
        self.get(type_name).map(|c| c.kind)
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.classes.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
