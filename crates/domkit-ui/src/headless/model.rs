use std::any::Any;

use domkit_markup::Value;

use crate::headless::catalog::{MODEL_CALLBACKS, ModelKind};
use crate::toolkit::{Callback, Model, ToolkitError};

/// In-memory value model.
///
/// Change handlers are called with the new value while the model is still
/// borrowed, so they must not borrow the same model again.
pub struct HeadlessModel {
    owner: String,
    kind: ModelKind,
    value: Value,
    items: Vec<String>,
    callbacks: Vec<(String, Callback)>,
}

impl HeadlessModel {
    pub fn new(owner: impl Into<String>, kind: ModelKind) -> Self {
        let value = match kind {
            ModelKind::Float => Value::Float(0.0),
            ModelKind::Int | ModelKind::Items => Value::Int(0),
            ModelKind::Bool => Value::Bool(false),
            ModelKind::Text => Value::Str(String::new()),
            ModelKind::Color => rgba([0.0, 0.0, 0.0, 1.0]),
        };
        Self { owner: owner.into(), kind, value, items: Vec::new(), callbacks: Vec::new() }
    }

    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    pub fn callback_count(&self, key: &str) -> usize {
        self.callbacks.iter().filter(|(k, _)| k == key).count()
    }

    pub fn begin_edit(&self) {
        self.fire("add_begin_edit_fn", &self.value);
    }

    pub fn end_edit(&self) {
        self.fire("add_end_edit_fn", &self.value);
    }

    fn fire(&self, key: &str, value: &Value) {
        for (_, cb) in self.callbacks.iter().filter(|(k, _)| k == key) {
            cb.call(value);
        }
    }

    fn mismatch(&self, expected: &'static str, found: &Value) -> ToolkitError {
        ToolkitError::TypeMismatch {
            widget: self.owner.clone(),
            param: "model.value".to_string(),
            expected,
            found: found.kind(),
        }
    }

    /// Convert `value` to this model's type, or explain why it cannot be.
    fn accept(&self, value: Value) -> Result<Value, ToolkitError> {
        match (self.kind, value) {
            (ModelKind::Float, v) => {
                v.as_f64().map(Value::Float).ok_or_else(|| self.mismatch("number", &v))
            }
            (ModelKind::Int, Value::Int(i))  => Ok(Value::Int(i)),
            (ModelKind::Int, Value::Bool(b)) => Ok(Value::Int(i64::from(b))),
            (ModelKind::Int, v) => Err(self.mismatch("int", &v)),
            (ModelKind::Bool, Value::Bool(b)) => Ok(Value::Bool(b)),
            (ModelKind::Bool, Value::Int(i))  => Ok(Value::Bool(i != 0)),
            (ModelKind::Bool, v) => Err(self.mismatch("bool", &v)),
            (ModelKind::Text, v @ (Value::List(_) | Value::Map(_))) => {
                Err(self.mismatch("scalar", &v))
            }
            (ModelKind::Text, v) => Ok(Value::Str(v.to_display_string())),
            (ModelKind::Items, Value::Int(i)) => {
                if usize::try_from(i).is_ok_and(|i| i < self.items.len()) {
                    Ok(Value::Int(i))
                } else {
                    Err(ToolkitError::OutOfRange {
                        widget: self.owner.clone(),
                        value: i.to_string(),
                    })
                }
            }
            (ModelKind::Items, v) => Err(self.mismatch("item index", &v)),
            (ModelKind::Color, v) => {
                color_components(&v).map(rgba).ok_or_else(|| self.mismatch("3 or 4 numbers", &v))
            }
        }
    }

    fn has_items(&self) -> bool {
        matches!(self.kind, ModelKind::Items | ModelKind::Color)
    }
}

fn rgba(components: [f64; 4]) -> Value {
    Value::List(components.into_iter().map(Value::Float).collect())
}

/// RGB or RGBA from a list of numbers or a comma-separated string; alpha
/// defaults to 1.
fn color_components(value: &Value) -> Option<[f64; 4]> {
    let parts: Vec<f64> = match value {
        Value::List(items) => items.iter().map(Value::as_f64).collect::<Option<_>>()?,
        Value::Str(s) => s.split(',').map(|p| p.trim().parse().ok()).collect::<Option<_>>()?,
        _ => return None,
    };
    match parts[..] {
        [r, g, b] => Some([r, g, b, 1.0]),
        [r, g, b, a] => Some([r, g, b, a]),
        _ => None,
    }
}

impl Model for HeadlessModel {
    fn value(&self) -> Value {
        self.value.clone()
    }

    fn set_value(&mut self, value: Value) -> Result<(), ToolkitError> {
        self.value = self.accept(value)?;
        let value = self.value.clone();
        self.fire("add_value_changed_fn", &value);
        if self.has_items() {
            self.fire("add_item_changed_fn", &value);
        }
        Ok(())
    }

    fn append_item(&mut self, text: &str) -> Result<(), ToolkitError> {
        if self.kind != ModelKind::Items {
            return Err(ToolkitError::Unsupported {
                widget: self.owner.clone(),
                operation: "append_item",
            });
        }
        self.items.push(text.to_string());
        Ok(())
    }

    fn items(&self) -> Vec<String> {
        self.items.clone()
    }

    fn register_callback(&mut self, key: &str, callback: Callback) -> Result<bool, ToolkitError> {
        let supported = MODEL_CALLBACKS.contains(&key)
            || (self.has_items() && key == "add_item_changed_fn");
        if supported {
            self.callbacks.push((key.to_string(), callback));
        }
        Ok(supported)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn float_model_widens_ints() {
        let mut m = HeadlessModel::new("ProgressBar", ModelKind::Float);
        m.set_value(Value::Int(1)).unwrap();
        assert_eq!(m.value(), Value::Float(1.0));
        assert!(m.set_value(Value::Str("0.75".into())).is_err());
    }

    #[test]
    fn text_model_stringifies_scalars() {
        let mut m = HeadlessModel::new("StringField", ModelKind::Text);
        m.set_value(Value::Int(7)).unwrap();
        assert_eq!(m.value(), Value::Str("7".into()));
    }

    #[test]
    fn bool_and_int_models() {
        let mut b = HeadlessModel::new("CheckBox", ModelKind::Bool);
        b.set_value(Value::Int(1)).unwrap();
        assert_eq!(b.value(), Value::Bool(true));
        let mut i = HeadlessModel::new("IntField", ModelKind::Int);
        assert!(i.set_value(Value::Float(1.5)).is_err());
    }

    #[test]
    fn items_model_checks_range() {
        let mut m = HeadlessModel::new("ComboBox", ModelKind::Items);
        m.append_item("Dark").unwrap();
        m.append_item("Light").unwrap();
        m.set_value(Value::Int(1)).unwrap();
        assert_eq!(m.items(), ["Dark", "Light"]);
        assert!(matches!(m.set_value(Value::Int(2)), Err(ToolkitError::OutOfRange { .. })));
        assert!(matches!(m.set_value(Value::Int(-1)), Err(ToolkitError::OutOfRange { .. })));
    }

    #[test]
    fn append_item_only_on_item_models() {
        let mut m = HeadlessModel::new("FloatField", ModelKind::Float);
        assert!(matches!(m.append_item("x"), Err(ToolkitError::Unsupported { .. })));
    }

    #[test]
    fn change_handlers_receive_new_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let mut m = HeadlessModel::new("ComboBox", ModelKind::Items);
        m.append_item("a").unwrap();
        m.append_item("b").unwrap();
        let cb = Callback::new(move |v| s.borrow_mut().push(v.clone()));
        assert!(m.register_callback("add_item_changed_fn", cb).unwrap());
        assert!(!m.register_callback("clicked_fn", Callback::new(|_| {})).unwrap());
        m.set_value(Value::Int(1)).unwrap();
        assert_eq!(*seen.borrow(), vec![Value::Int(1)]);
    }

    #[test]
    fn edit_handlers_see_current_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (b, e) = (seen.clone(), seen.clone());
        let mut m = HeadlessModel::new("StringField", ModelKind::Text);
        let begin = Callback::new(move |v| b.borrow_mut().push(format!("begin {v}")));
        let end = Callback::new(move |v| e.borrow_mut().push(format!("end {v}")));
        m.register_callback("add_begin_edit_fn", begin).unwrap();
        m.register_callback("add_end_edit_fn", end).unwrap();
        m.begin_edit();
        m.set_value(Value::Str("bob".into())).unwrap();
        m.end_edit();
        assert_eq!(*seen.borrow(), ["begin \"\"", "end \"bob\""]);
        assert_eq!(m.callback_count("add_end_edit_fn"), 1);
    }

    #[test]
    fn item_changed_not_supported_on_scalar_models() {
        let mut m = HeadlessModel::new("IntField", ModelKind::Int);
        assert!(!m.register_callback("add_item_changed_fn", Callback::new(|_| {})).unwrap());
    }

    #[test]
    fn color_model_takes_lists_and_strings() {
        let mut m = HeadlessModel::new("ColorWidget", ModelKind::Color);
        assert_eq!(m.value(), rgba([0.0, 0.0, 0.0, 1.0]));

        let rgb = Value::List(vec![Value::Int(1), Value::Float(0.5), Value::Int(0)]);
        m.set_value(rgb).unwrap();
        assert_eq!(m.value(), rgba([1.0, 0.5, 0.0, 1.0]));

        m.set_value(Value::Str("0.2, 0.4,0.8,0.5".into())).unwrap();
        assert_eq!(m.value(), rgba([0.2, 0.4, 0.8, 0.5]));
    }

    #[test]
    fn color_model_rejects_bad_components() {
        let mut m = HeadlessModel::new("ColorWidget", ModelKind::Color);
        assert!(m.set_value(Value::Float(0.5)).is_err());
        assert!(m.set_value(Value::Str("red".into())).is_err());
        assert!(m.set_value(Value::Str("0.1,0.2".into())).is_err());
        let five = Value::List(vec![Value::Int(0); 5]);
        assert!(matches!(m.set_value(five), Err(ToolkitError::TypeMismatch { .. })));
        assert_eq!(m.value(), rgba([0.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn color_model_fires_item_changed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (items, values) = (seen.clone(), seen.clone());
        let mut m = HeadlessModel::new("ColorWidget", ModelKind::Color);
        let on_item = Callback::new(move |v| items.borrow_mut().push(format!("item {v}")));
        let on_value = Callback::new(move |v| values.borrow_mut().push(format!("value {v}")));
        assert!(m.register_callback("add_item_changed_fn", on_item).unwrap());
        assert!(m.register_callback("add_value_changed_fn", on_value).unwrap());
        m.set_value(Value::Str("1,0,0".into())).unwrap();
        assert_eq!(seen.borrow().len(), 2);
        assert!(seen.borrow()[1].starts_with("item "));
        assert!(matches!(m.append_item("r"), Err(ToolkitError::Unsupported { .. })));
    }
}
