use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use domkit_markup::Value;

use crate::headless::catalog::{ClassInfo, WIDGET_CALLBACKS};
use crate::headless::model::HeadlessModel;
use crate::registry::WidgetKind;
use crate::toolkit::{
    Arg, Args, Callback, ConstructArgs, Model, ModelRef, ToolkitError, Widget, WidgetRef,
};

/// Keyword that links a choice item to its group.
pub const GROUP_KEYWORD: &str = "radio_collection";

/// A widget that records what the builder did to it.
pub struct HeadlessWidget {
    type_name: String,
    text: Option<String>,
    props: Args,
    children: Vec<WidgetRef>,
    frame: Option<WidgetRef>,
    model: Option<Rc<RefCell<HeadlessModel>>>,
    callbacks: Vec<(String, Callback)>,
    group: Option<WidgetRef>,
    group_index: Option<usize>,
    members: usize,
}

impl HeadlessWidget {
    fn empty(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            text: None,
            props: Args::new(),
            children: Vec::new(),
            frame: None,
            model: None,
            callbacks: Vec::new(),
            group: None,
            group_index: None,
            members: 0,
        }
    }

    /// A bare widget with no model, frame or properties.
    pub fn plain(type_name: &str) -> WidgetRef {
        Rc::new(RefCell::new(Self::empty(type_name)))
    }

    /// Factory shared by every catalog entry.
    pub(crate) fn construct(
        info: &'static ClassInfo,
        mut args: ConstructArgs,
    ) -> Result<WidgetRef, ToolkitError> {
        let mut widget = Self::empty(info.name);

        if let Some(arg) = args.positional.first() {
            widget.text = Some(positional_text(info, arg)?);
        }

        check_keywords(info.name, &args.kwargs)?;

        if info.kind == WidgetKind::ChoiceItem {
            if let Some(Arg::Widget(group)) = args.take(GROUP_KEYWORD) {
                widget.group_index = group
                    .borrow_mut()
                    .as_any_mut()
                    .downcast_mut::<HeadlessWidget>()
                    .map(HeadlessWidget::enroll);
                widget.group = Some(group);
            }
        }

        if info.kind == WidgetKind::Framed {
            widget.frame = Some(Self::plain("Frame"));
        }
        widget.model = info
            .model
            .map(|kind| Rc::new(RefCell::new(HeadlessModel::new(info.name, kind))));
        widget.props = args.kwargs;

        Ok(Rc::new(RefCell::new(widget)))
    }

    fn enroll(&mut self) -> usize {
        self.members += 1;
        self.members - 1
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn prop(&self, key: &str) -> Option<&Arg> {
        self.props.get(key)
    }

    pub fn props(&self) -> &Args {
        &self.props
    }

    pub fn children(&self) -> &[WidgetRef] {
        &self.children
    }

    /// The choice group this widget was linked to at construction.
    pub fn group(&self) -> Option<&WidgetRef> {
        self.group.as_ref()
    }

    pub fn group_index(&self) -> Option<usize> {
        self.group_index
    }

    pub fn model_handle(&self) -> Option<Rc<RefCell<HeadlessModel>>> {
        self.model.clone()
    }

    pub fn model_value(&self) -> Option<Value> {
        self.model.as_ref().map(|m| m.borrow().value())
    }

    pub fn callback_count(&self, key: &str) -> usize {
        self.callbacks.iter().filter(|(k, _)| k == key).count()
    }

    pub(crate) fn callbacks_for(&self, key: &str) -> Vec<Callback> {
        self.callbacks.iter().filter(|(k, _)| k == key).map(|(_, cb)| cb.clone()).collect()
    }
}

fn positional_text(info: &ClassInfo, arg: &Arg) -> Result<String, ToolkitError> {
    let param = info.positional.unwrap_or("text");
    match arg {
        // Window titles must be real strings; labels render any scalar.
        Arg::Value(Value::Str(s)) => Ok(s.clone()),
        Arg::Value(v)
            if info.kind != WidgetKind::Framed && !matches!(v, Value::List(_) | Value::Map(_)) =>
        {
            Ok(v.to_display_string())
        }
        other => Err(ToolkitError::TypeMismatch {
            widget: info.name.to_string(),
            param: param.to_string(),
            expected: "string",
            found: other.kind(),
        }),
    }
}

fn check_keywords(widget: &str, kwargs: &Args) -> Result<(), ToolkitError> {
    for (key, arg) in kwargs {
        let (ok, expected) = match key.as_str() {
            "width" | "height" | "spacing" => {
                (matches!(arg, Arg::Value(v) if v.is_number()), "number")
            }
            "visible" | "enabled" => (matches!(arg, Arg::Value(Value::Bool(_))), "bool"),
            "style" => (matches!(arg, Arg::Value(Value::Map(_))), "mapping"),
            "title" => (matches!(arg, Arg::Value(Value::Str(_))), "string"),
            GROUP_KEYWORD => (matches!(arg, Arg::Widget(_)), "widget"),
            _ => continue,
        };
        if !ok {
            return Err(ToolkitError::TypeMismatch {
                widget: widget.to_string(),
                param: key.clone(),
                expected,
                found: arg.kind(),
            });
        }
    }
    Ok(())
}

impl Widget for HeadlessWidget {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn append_child(&mut self, child: WidgetRef) -> Result<(), ToolkitError> {
        match &self.frame {
            Some(frame) => frame.borrow_mut().append_child(child),
            None => {
                self.children.push(child);
                Ok(())
            }
        }
    }

    fn frame(&self) -> Option<WidgetRef> {
        self.frame.clone()
    }

    fn model(&self) -> Option<ModelRef> {
        self.model.clone().map(|m| m as ModelRef)
    }

    fn register_callback(&mut self, key: &str, callback: Callback) -> Result<bool, ToolkitError> {
        if !WIDGET_CALLBACKS.contains(&key) {
            return Ok(false);
        }
        self.callbacks.push((key.to_string(), callback));
        Ok(true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
