//! Handler lookup and `*_fn` attribute extraction.

use std::collections::HashMap;

use domkit_markup::Value;
use indexmap::IndexMap;

use crate::error::BuildError;
use crate::toolkit::{Arg, Args, Callback, WidgetRef};

// ── HandlerOwner ──────────────────────────────────────────────────────────

/// The application object a UI definition is built for.
///
/// Handler names in the document (`clicked_fn="on_click"`) resolve through
/// [`resolve_handler`](HandlerOwner::resolve_handler), and widgets declared
/// with the self prefix (`x:Name="self._window"`) are handed to
/// [`assign_field`](HandlerOwner::assign_field).
pub trait HandlerOwner {
    fn resolve_handler(&self, name: &str) -> Option<Callback>;

    fn assign_field(&mut self, field: &str, widget: WidgetRef);
}

// ── HandlerTable ──────────────────────────────────────────────────────────

/// Explicit name → handler table, populated during application setup.
///
/// ```rust,ignore
/// let mut handlers = HandlerTable::new();
/// handlers.register("on_click", move |_| counter.set(counter.get() + 1));
/// ```
#[derive(Default)]
pub struct HandlerTable {
    handlers: HashMap<String, Callback>,
    fields: HashMap<String, WidgetRef>,
}

impl HandlerTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, f: impl Fn(&Value) + 'static) {
        self.handlers.insert(name.into(), Callback::new(f));
    }

    pub fn with(mut self, name: impl Into<String>, f: impl Fn(&Value) + 'static) -> Self {
        self.register(name, f);
        self
    }

    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Widget bound through the self prefix, e.g. `field("_window")`.
    pub fn field(&self, name: &str) -> Option<WidgetRef> {
        self.fields.get(name).cloned()
    }

    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl HandlerOwner for HandlerTable {
    fn resolve_handler(&self, name: &str) -> Option<Callback> {
        self.handlers.get(name).cloned()
    }

    fn assign_field(&mut self, field: &str, widget: WidgetRef) {
        self.fields.insert(field.to_string(), widget);
    }
}

// ── Extraction ────────────────────────────────────────────────────────────

/// Split `*_fn` entries out of `args` and resolve them against `owner`.
///
/// A string value names a handler and must resolve; an [`Arg::Callback`] is
/// taken as-is. Anything else cannot be called and is rejected.
pub fn extract_callbacks(
    args: Args,
    owner: &dyn HandlerOwner,
    suffix: &str,
) -> Result<(Args, IndexMap<String, Callback>), BuildError> {
    let mut remaining = Args::with_capacity(args.len());
    let mut callbacks = IndexMap::new();

    for (key, arg) in args {
        if !key.ends_with(suffix) {
            remaining.insert(key, arg);
            continue;
        }
        let callback = match arg {
            Arg::Value(Value::Str(handler)) => match owner.resolve_handler(&handler) {
                Some(cb) => cb,
                None => return Err(BuildError::CallbackResolution { key, handler }),
            },
            Arg::Callback(cb) => cb,
            other => {
                return Err(BuildError::CallbackNotCallable { key, found: other.kind() });
            }
        };
        callbacks.insert(key, callback);
    }

    Ok((remaining, callbacks))
}
