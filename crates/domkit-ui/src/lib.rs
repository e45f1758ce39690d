//! domkit UI: builds widget trees from XML/JSON UI definitions.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use domkit_ui::prelude::*;
//!
//! let mut ext = DomExtension::new(domkit_ui::headless::registry())
//!     .on("on_click", |_| println!("clicked!"));
//!
//! // <Window x:Name="self._window" title="Demo"> ... <Button clicked_fn="on_click"/> ...
//! ext.load_ui("ui/complex_ui.xml")?;
//!
//! let window = ext.field("_window");
//! let label = ext.elements().get("label")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Plugging in a toolkit
//!
//! Implement [`Widget`](toolkit::Widget) (and [`Model`](toolkit::Model) for
//! value-bearing widgets), then register a factory per type name:
//!
//! ```rust,ignore
//! use domkit_ui::prelude::*;
//!
//! let label = WidgetClass::new(WidgetKind::Leaf, |args| make_label(args));
//! let window = WidgetClass::new(WidgetKind::Framed, |args| make_window(args));
//! let registry = WidgetRegistry::new()
//!     .with("Label", label.positional("text"))
//!     .with("Window", window.positional("title"));
//! ```

pub mod accessor;
pub mod builder;
pub mod callbacks;
pub mod config;
pub mod dom;
pub mod error;
pub mod headless;
pub mod logging;
pub mod registry;
pub mod toolkit;

pub use dom::DomExtension;
pub use domkit_markup as markup;

/// Everything needed to load UI files and wire them to application code.
pub mod prelude {
    pub use crate::accessor::ElementAccessor;
    pub use crate::builder::DomBuilder;
    pub use crate::callbacks::{HandlerOwner, HandlerTable};
    pub use crate::config::{BuilderConfig, DomConfig};
    pub use crate::dom::DomExtension;
    pub use crate::error::{BuildError, DomError, NameNotFoundError};
    pub use crate::registry::{WidgetClass, WidgetKind, WidgetRegistry};
    pub use crate::toolkit::{
        Arg, Args, Callback, ConstructArgs, Model, ToolkitError, Widget, WidgetRef,
    };

    pub use domkit_markup::{LoaderOptions, UiNode, Value};
}
