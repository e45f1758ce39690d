//! In-memory reference toolkit.
//!
//! Every widget is a [`HeadlessWidget`] that records its text, keyword
//! parameters, children, model and handlers. It is what the studio binary
//! renders and what the builder tests inspect; a real GUI backend registers
//! its own factories in a [`WidgetRegistry`] instead.
//!
//! ```rust
//! use domkit_markup::UiNode;
//! use domkit_ui::prelude::*;
//!
//! let registry = domkit_ui::headless::registry();
//! let config = BuilderConfig::default();
//! let mut handlers = HandlerTable::new();
//! let mut elements = ElementAccessor::new();
//!
//! let node = UiNode::new("Label").named("greeting").attr("text", "hi");
//! DomBuilder::new(&registry, &config).build(&node, &mut handlers, &mut elements).unwrap();
//!
//! let label = elements.get("greeting").unwrap();
//! let text = domkit_ui::headless::with_headless(&label, |w| w.text().map(str::to_string));
//! assert_eq!(text.flatten().as_deref(), Some("hi"));
//! ```

pub mod catalog;
mod model;
mod widget;

use domkit_markup::Value;

use crate::registry::{WidgetClass, WidgetRegistry};
use crate::toolkit::{Callback, ToolkitError, WidgetRef};

pub use catalog::{ClassInfo, ModelKind, CATALOG};
pub use model::HeadlessModel;
pub use widget::{HeadlessWidget, GROUP_KEYWORD};

/// A registry holding every type in [`CATALOG`].
pub fn registry() -> WidgetRegistry {
    let mut registry = WidgetRegistry::new();
    for info in CATALOG {
        let mut class =
            WidgetClass::new(info.kind, move |args| HeadlessWidget::construct(info, args));
        if let Some(attr) = info.positional {
            class = class.positional(attr);
        }
        registry.register(info.name, class);
    }
    registry
}

/// Run `f` against `widget` if it is a [`HeadlessWidget`].
pub fn with_headless<R>(widget: &WidgetRef, f: impl FnOnce(&HeadlessWidget) -> R) -> Option<R> {
    let widget = widget.borrow();
    widget.as_any().downcast_ref::<HeadlessWidget>().map(f)
}

/// Simulate a click: fires `clicked_fn` handlers and, for choice items,
/// selects the item in its group model. Returns the number of handlers run.
///
/// Handlers run after the widget borrow is released, so they may freely
/// inspect or update the clicked widget.
pub fn click(widget: &WidgetRef) -> Result<usize, ToolkitError> {
    let Some((callbacks, group, index)) = with_headless(widget, |w| {
        (w.callbacks_for("clicked_fn"), w.group().cloned(), w.group_index())
    }) else {
        let widget = widget.borrow().type_name().to_string();
        return Err(ToolkitError::Unsupported { widget, operation: "click" });
    };

    if let (Some(group), Some(index)) = (group, index) {
        let model = group.borrow().model();
        if let Some(model) = model {
            let index = i64::try_from(index).unwrap_or(i64::MAX);
            model.borrow_mut().set_value(Value::Int(index))?;
        }
    }

    for cb in &callbacks {
        cb.call(&Value::None);
    }
    Ok(callbacks.len())
}

/// Fire the handlers registered under `key` on `widget`.
pub fn fire(widget: &WidgetRef, key: &str) -> usize {
    let callbacks: Vec<Callback> =
        with_headless(widget, |w| w.callbacks_for(key)).unwrap_or_default();
    for cb in &callbacks {
        cb.call(&Value::None);
    }
    callbacks.len()
}

/// Render `widget` and its subtree as an indented outline.
pub fn outline(widget: &WidgetRef) -> String {
    let mut out = String::new();
    write_outline(widget, 0, &mut out);
    out
}

fn write_outline(widget: &WidgetRef, depth: usize, out: &mut String) {
    use std::fmt::Write;

    let w = widget.borrow();
    let _ = write!(out, "{}{}", "  ".repeat(depth), w.type_name());
    let Some(hw) = w.as_any().downcast_ref::<HeadlessWidget>() else {
        out.push('\n');
        return;
    };
    if let Some(text) = hw.text() {
        let _ = write!(out, " {text:?}");
    }
    for (key, arg) in hw.props() {
        let _ = write!(out, " {key}={arg:?}");
    }
    if let Some(model) = hw.model_handle() {
        use crate::toolkit::Model;
        let model = model.borrow();
        let _ = write!(out, " [model={}", model.value());
        let items = model.items();
        if !items.is_empty() {
            let _ = write!(out, " items={items:?}");
        }
        out.push(']');
    }
    out.push('\n');

    let frame_children = w
        .frame()
        .map(|f| with_headless(&f, |fw| fw.children().to_vec()).unwrap_or_default());
    let children = frame_children.unwrap_or_else(|| hw.children().to_vec());
    drop(w);
    for child in &children {
        write_outline(child, depth + 1, out);
    }
}
