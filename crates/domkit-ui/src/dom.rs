use std::path::Path;

use domkit_markup::{load_file, UiNode, Value};

use crate::accessor::ElementAccessor;
use crate::builder::DomBuilder;
use crate::callbacks::HandlerTable;
use crate::config::DomConfig;
use crate::error::{BuildError, DomError};
use crate::registry::WidgetRegistry;
use crate::toolkit::WidgetRef;

// ── DomExtension ──────────────────────────────────────────────────────────

/// Loads UI definition files and keeps what they declare.
///
/// ```rust,no_run
/// use domkit_ui::prelude::*;
///
/// let mut ext = DomExtension::new(domkit_ui::headless::registry())
///     .on("on_click", |_| println!("clicked"));
/// ext.load_ui("ui/complex_ui.xml")?;
/// let label = ext.elements().get("label")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DomExtension {
    registry: WidgetRegistry,
    config: DomConfig,
    handlers: HandlerTable,
    elements: ElementAccessor,
    root: Option<WidgetRef>,
}

impl DomExtension {
    pub fn new(registry: WidgetRegistry) -> Self {
        Self {
            registry,
            config: DomConfig::default(),
            handlers: HandlerTable::new(),
            elements: ElementAccessor::new(),
            root: None,
        }
    }

    pub fn with_config(mut self, config: DomConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a handler that documents can reference by `name`.
    pub fn on(mut self, name: impl Into<String>, f: impl Fn(&Value) + 'static) -> Self {
        self.handlers.register(name, f);
        self
    }

    pub fn handlers_mut(&mut self) -> &mut HandlerTable {
        &mut self.handlers
    }

    /// Load `path` (`.xml` or `.json`) and build it.
    pub fn load_ui(&mut self, path: impl AsRef<Path>) -> Result<(), DomError> {
        let path = path.as_ref();
        let node = load_file(path, &self.config.loader)?;
        log::info!("loaded {} ({} nodes)", path.display(), node.count());
        self.build_ui(&node)?;
        Ok(())
    }

    /// Build an already loaded tree. The root replaces any earlier one;
    /// names accumulate across calls.
    pub fn build_ui(&mut self, node: &UiNode) -> Result<(), BuildError> {
        let builder = DomBuilder::new(&self.registry, &self.config.builder);
        let root = builder.build(node, &mut self.handlers, &mut self.elements)?;
        self.root = Some(root);
        Ok(())
    }

    pub fn elements(&self) -> &ElementAccessor {
        &self.elements
    }

    /// Widget bound through the self prefix (`self._window` → `field("_window")`).
    pub fn field(&self, name: &str) -> Option<WidgetRef> {
        self.handlers.field(name)
    }

    pub fn root(&self) -> Option<&WidgetRef> {
        self.root.as_ref()
    }

    pub fn config(&self) -> &DomConfig {
        &self.config
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }
}
