//! The host-toolkit surface the builder drives.
//!
//! A toolkit provides widget factories (see [`WidgetRegistry`](crate::registry::WidgetRegistry))
//! and implements [`Widget`] / [`Model`] for what they return. The builder only
//! calls the operations declared here; it never looks inside a widget.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use domkit_markup::Value;
use indexmap::IndexMap;
use thiserror::Error;

/// Shared handle to a constructed widget.
pub type WidgetRef = Rc<RefCell<dyn Widget>>;

/// Shared handle to a widget's value model.
pub type ModelRef = Rc<RefCell<dyn Model>>;

// ── Callback ──────────────────────────────────────────────────────────────

/// An application handler. Widget events pass [`Value::None`]; model change
/// notifications pass the new value.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&Value)>);

impl Callback {
    pub fn new(f: impl Fn(&Value) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, value: &Value) {
        (self.0)(value)
    }

    /// True when both handles share the same closure.
    pub fn ptr_eq(a: &Callback, b: &Callback) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0).cast::<()>())
    }
}

// ── Arg ───────────────────────────────────────────────────────────────────

/// A constructor parameter after resolution.
#[derive(Clone)]
pub enum Arg {
    Value(Value),
    /// Reference to another widget, e.g. the shared radio group.
    Widget(WidgetRef),
    Callback(Callback),
}

impl Arg {
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Value(v)    => v.kind(),
            Arg::Widget(_)   => "widget",
            Arg::Callback(_) => "callback",
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Arg::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_widget(&self) -> Option<&WidgetRef> {
        match self {
            Arg::Widget(w) => Some(w),
            _ => None,
        }
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(v) => write!(f, "{v}"),
            Arg::Widget(w) => match w.try_borrow() {
                Ok(w)  => write!(f, "<{}>", w.type_name()),
                Err(_) => write!(f, "<widget>"),
            },
            Arg::Callback(c) => write!(f, "{c:?}"),
        }
    }
}

/// Resolved keyword parameters, in source order.
pub type Args = IndexMap<String, Arg>;

/// Everything a widget factory receives.
#[derive(Debug, Clone, Default)]
pub struct ConstructArgs {
    pub type_name: String,
    pub positional: Vec<Arg>,
    pub kwargs: Args,
}

impl ConstructArgs {
    /// Remove and return a keyword parameter.
    pub fn take(&mut self, key: &str) -> Option<Arg> {
        self.kwargs.shift_remove(key)
    }
}

// ── ToolkitError ──────────────────────────────────────────────────────────

/// Errors raised by the host toolkit while constructing or wiring widgets.
/// The builder propagates these unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolkitError {
    #[error("{widget}: missing required parameter '{param}'")]
    MissingParameter { widget: String, param: String },

    #[error("{widget}: parameter '{param}' expects {expected}, got {found}")]
    TypeMismatch {
        widget: String,
        param: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{widget}: value {value} is out of range")]
    OutOfRange { widget: String, value: String },

    #[error("{widget} does not support {operation}")]
    Unsupported { widget: String, operation: &'static str },

    #[error("{widget} has no model")]
    MissingModel { widget: String },
}

// ── Widget / Model ────────────────────────────────────────────────────────

/// A constructed widget as seen by the builder.
pub trait Widget: Any {
    fn type_name(&self) -> &str;

    /// Default child insertion for containers.
    fn append_child(&mut self, child: WidgetRef) -> Result<(), ToolkitError>;

    /// Scoped child container for framed widgets (windows). Children of a
    /// framed widget are built into this instead of the widget itself.
    fn frame(&self) -> Option<WidgetRef> {
        None
    }

    fn model(&self) -> Option<ModelRef> {
        None
    }

    /// Attach a handler under its attribute key (e.g. `clicked_fn`).
    /// Returns `Ok(false)` when the widget has no such registration.
    fn register_callback(&mut self, key: &str, callback: Callback) -> Result<bool, ToolkitError> {
        let _ = (key, callback);
        Ok(false)
    }

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// An observable value holder attached to a widget.
pub trait Model: Any {
    fn value(&self) -> Value;

    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError>;

    /// Append a selectable item (selection-list models only).
    fn append_item(&mut self, text: &str) -> Result<(), ToolkitError> {
        let _ = text;
        Err(ToolkitError::Unsupported { widget: "model".into(), operation: "append_item" })
    }

    fn items(&self) -> Vec<String> {
        Vec::new()
    }

    /// Attach a change handler under its attribute key (e.g. `add_value_changed_fn`).
    fn register_callback(&mut self, key: &str, callback: Callback) -> Result<bool, ToolkitError> {
        let _ = (key, callback);
        Ok(false)
    }

    fn as_any(&self) -> &dyn Any;
}
