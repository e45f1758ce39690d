use std::collections::HashMap;

use crate::error::NameNotFoundError;
use crate::toolkit::WidgetRef;

/// Named widgets declared in a UI definition (`x:Name="label"`).
///
/// Holds shared handles for lookup only; parents own their children.
/// Re-declaring a name replaces the earlier widget.
#[derive(Default)]
pub struct ElementAccessor {
    elements: HashMap<String, WidgetRef>,
}

impl ElementAccessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a named widget.
    pub fn get(&self, name: &str) -> Result<WidgetRef, NameNotFoundError> {
        self.elements
            .get(name)
            .cloned()
            .ok_or_else(|| NameNotFoundError { name: name.to_string() })
    }

    /// Store a widget under `name`, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, widget: WidgetRef) -> Option<WidgetRef> {
        let name = name.into();
        let previous = self.elements.insert(name.clone(), widget);
        if previous.is_some() {
            log::debug!("element '{name}' redeclared; replacing previous widget");
        }
        previous
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    /// Declared names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.elements.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }
}
