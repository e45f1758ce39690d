use domkit_markup::{parse_style, UiNode, Value};
use indexmap::IndexMap;

use crate::accessor::ElementAccessor;
use crate::callbacks::{extract_callbacks, HandlerOwner};
use crate::config::BuilderConfig;
use crate::error::BuildError;
use crate::registry::{WidgetKind, WidgetRegistry};
use crate::toolkit::{Arg, Args, Callback, ConstructArgs, ToolkitError, WidgetRef};

// ── Resolved ──────────────────────────────────────────────────────────────

/// Constructor parameters for one node after style parsing and handler
/// extraction.
struct Resolved {
    args: Args,
    callbacks: IndexMap<String, Callback>,
    model_value: Option<Value>,
}

// ── DomBuilder ────────────────────────────────────────────────────────────

/// Turns a [`UiNode`] tree into widgets from a [`WidgetRegistry`].
///
/// The first error aborts the pass. Widgets already constructed and names
/// already registered are left in place.
pub struct DomBuilder<'a> {
    registry: &'a WidgetRegistry,
    config: &'a BuilderConfig,
}

impl<'a> DomBuilder<'a> {
    pub fn new(registry: &'a WidgetRegistry, config: &'a BuilderConfig) -> Self {
        Self { registry, config }
    }

    /// Build `node` and its subtree, binding declared names into `owner`
    /// (self-prefixed names) or `elements` (all others).
    pub fn build(
        &self,
        node: &UiNode,
        owner: &mut dyn HandlerOwner,
        elements: &mut ElementAccessor,
    ) -> Result<WidgetRef, BuildError> {
        self.build_node(node, None, owner, elements)
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn build_node(
        &self,
        node: &UiNode,
        group: Option<WidgetRef>,
        owner: &mut dyn HandlerOwner,
        elements: &mut ElementAccessor,
    ) -> Result<WidgetRef, BuildError> {
        let Resolved { mut args, callbacks, model_value } = self.resolve(node, group, owner)?;

        let class = self
            .registry
            .get(&node.type_name)
            .ok_or_else(|| BuildError::UnknownWidgetType(node.type_name.clone()))?;

        let positional = class
            .positional
            .as_deref()
            .and_then(|attr| args.shift_remove(attr))
            .into_iter()
            .collect();

        let widget = class.construct(ConstructArgs {
            type_name: node.type_name.clone(),
            positional,
            kwargs: args,
        })?;
        log::debug!("constructed {} ({} children)", node.type_name, node.children.len());

        match class.kind {
            WidgetKind::Framed => self.build_framed_children(node, &widget, owner, elements)?,
            WidgetKind::SelectionList => self.append_items(node, &widget)?,
            WidgetKind::ChoiceGroup => self.build_group_children(node, &widget, owner, elements)?,
            _ => {
                for child in &node.children {
                    let built = self.build_node(child, None, owner, elements)?;
                    widget.borrow_mut().append_child(built)?;
                }
            }
        }

        if let Some(value) = model_value {
            self.apply_model_value(node, &widget, value)?;
        }
        self.register_callbacks(node, &widget, callbacks)?;

        if let Some(name) = &node.name {
            match name.strip_prefix(self.config.self_prefix.as_str()) {
                Some(field) => owner.assign_field(field, widget.clone()),
                None => {
                    elements.insert(name.clone(), widget.clone());
                }
            }
            log::debug!("registered {} as '{name}'", node.type_name);
        }

        Ok(widget)
    }

    fn resolve(
        &self,
        node: &UiNode,
        group: Option<WidgetRef>,
        owner: &dyn HandlerOwner,
    ) -> Result<Resolved, BuildError> {
        let mut args = Args::with_capacity(node.attributes.len() + 1);
        for (key, value) in &node.attributes {
            let value = if *key == self.config.style_key {
                self.resolve_style(node, value)?
            } else {
                value.clone()
            };
            args.insert(key.clone(), Arg::Value(value));
        }
        if let Some(group) = group {
            args.insert(self.config.group_key.clone(), Arg::Widget(group));
        }

        let (mut args, callbacks) = extract_callbacks(args, owner, &self.config.callback_suffix)?;
        // null means "no initial value"
        let model_value = match args.shift_remove(&self.config.model_value_key) {
            Some(Arg::Value(Value::None)) | None => None,
            Some(Arg::Value(v)) => Some(v),
            Some(other) => {
                return Err(ToolkitError::TypeMismatch {
                    widget: node.type_name.clone(),
                    param: self.config.model_value_key.clone(),
                    expected: "value",
                    found: other.kind(),
                }
                .into());
            }
        };

        Ok(Resolved { args, callbacks, model_value })
    }

    /// String styles are parsed as literal mappings; anything else is passed
    /// through for the toolkit to check.
    fn resolve_style(&self, node: &UiNode, value: &Value) -> Result<Value, BuildError> {
        match value {
            Value::Str(src) => parse_style(src).map_err(|source| BuildError::Style {
                widget: node.type_name.clone(),
                source,
            }),
            other => Ok(other.clone()),
        }
    }

    fn build_framed_children(
        &self,
        node: &UiNode,
        widget: &WidgetRef,
        owner: &mut dyn HandlerOwner,
        elements: &mut ElementAccessor,
    ) -> Result<(), BuildError> {
        if node.children.is_empty() {
            return Ok(());
        }
        let frame = widget.borrow().frame().ok_or_else(|| ToolkitError::Unsupported {
            widget: node.type_name.clone(),
            operation: "frame",
        })?;
        for child in &node.children {
            let built = self.build_node(child, None, owner, elements)?;
            frame.borrow_mut().append_child(built)?;
        }
        Ok(())
    }

    /// Selection-list children are item declarations, never widgets.
    fn append_items(&self, node: &UiNode, widget: &WidgetRef) -> Result<(), BuildError> {
        if node.children.is_empty() {
            return Ok(());
        }
        let model = widget
            .borrow()
            .model()
            .ok_or_else(|| ToolkitError::MissingModel { widget: node.type_name.clone() })?;

        for child in &node.children {
            if self.registry.kind_of(&child.type_name) != Some(WidgetKind::SelectionItem) {
                log::warn!("{}: skipping non-item child {}", node.type_name, child.type_name);
                continue;
            }
            let text = child.attribute("text").map(Value::to_display_string).unwrap_or_default();
            model.borrow_mut().append_item(&text)?;
        }
        Ok(())
    }

    fn build_group_children(
        &self,
        node: &UiNode,
        widget: &WidgetRef,
        owner: &mut dyn HandlerOwner,
        elements: &mut ElementAccessor,
    ) -> Result<(), BuildError> {
        for child in &node.children {
            let group = (self.registry.kind_of(&child.type_name) == Some(WidgetKind::ChoiceItem))
                .then(|| widget.clone());
            let built = self.build_node(child, group, owner, elements)?;
            widget.borrow_mut().append_child(built)?;
        }
        Ok(())
    }

    fn apply_model_value(
        &self,
        node: &UiNode,
        widget: &WidgetRef,
        value: Value,
    ) -> Result<(), BuildError> {
        let model = widget
            .borrow()
            .model()
            .ok_or_else(|| ToolkitError::MissingModel { widget: node.type_name.clone() })?;
        model.borrow_mut().set_value(value)?;
        Ok(())
    }

    /// `add_*` / `set_*` keys go to the model, everything else to the widget.
    fn register_callbacks(
        &self,
        node: &UiNode,
        widget: &WidgetRef,
        callbacks: IndexMap<String, Callback>,
    ) -> Result<(), BuildError> {
        for (key, callback) in callbacks {
            let accepted = if key.starts_with("add_") || key.starts_with("set_") {
                let model = widget.borrow().model();
                match model {
                    Some(model) => model.borrow_mut().register_callback(&key, callback)?,
                    None => {
                        log::warn!("{}: '{key}' needs a model; handler ignored", node.type_name);
                        continue;
                    }
                }
            } else {
                widget.borrow_mut().register_callback(&key, callback)?
            };
            if !accepted {
                log::warn!("{}: '{key}' is not supported; handler ignored", node.type_name);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use domkit_markup::loader::{parse_json_str, parse_xml_str};
    use domkit_markup::LoaderOptions;

    use super::*;
    use crate::callbacks::HandlerTable;
    use crate::headless::{self, with_headless, HeadlessWidget};

    struct Fixture {
        registry: WidgetRegistry,
        config: BuilderConfig,
        handlers: HandlerTable,
        elements: ElementAccessor,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: headless::registry(),
                config: BuilderConfig::default(),
                handlers: HandlerTable::new(),
                elements: ElementAccessor::new(),
            }
        }

        fn build(&mut self, node: &UiNode) -> Result<WidgetRef, BuildError> {
            DomBuilder::new(&self.registry, &self.config).build(
                node,
                &mut self.handlers,
                &mut self.elements,
            )
        }

        fn build_xml(&mut self, src: &str) -> Result<WidgetRef, BuildError> {
            let node = parse_xml_str(src, &LoaderOptions::default()).unwrap();
            self.build(&node)
        }
    }

    fn model_value(w: &WidgetRef) -> Option<Value> {
        with_headless(w, HeadlessWidget::model_value).flatten()
    }

    const NS: &str = r#"xmlns:x="http://schemas.ui/name""#;

    fn text_of(widget: &WidgetRef) -> Option<String> {
        with_headless(widget, |w| w.text().map(str::to_string)).flatten()
    }

    #[test]
    fn xml_attributes_arrive_typed() {
        let mut fx = Fixture::new();
        let w = fx.build_xml(r#"<Spacer width="300" height="1.5"/>"#).unwrap();
        with_headless(&w, |w| {
            assert_eq!(w.prop("width").and_then(Arg::as_value), Some(&Value::Int(300)));
            assert_eq!(w.prop("height").and_then(Arg::as_value), Some(&Value::Float(1.5)));
        });
    }

    #[test]
    fn self_prefixed_name_binds_to_owner() {
        let mut fx = Fixture::new();
        let src = format!(r#"<Window {NS} x:Name="self._window" title="Demo"/>"#);
        let w = fx.build_xml(&src).unwrap();
        let field = fx.handlers.field("_window").unwrap();
        assert!(Rc::ptr_eq(&field, &w));
        assert!(!fx.elements.contains("self._window"));
        assert!(fx.elements.is_empty());
    }

    #[test]
    fn plain_name_goes_to_accessor() {
        let mut fx = Fixture::new();
        let src = r#"
            <VStack xmlns:x="http://schemas.ui/name">
                <Label x:Name="label" text="empty"/>
            </VStack>"#;
        let root = fx.build_xml(src).unwrap();
        let label = fx.elements.get("label").unwrap();
        let first = with_headless(&root, |r| r.children()[0].clone()).unwrap();
        assert!(Rc::ptr_eq(&label, &first));
        let err = fx.elements.get("nope").err().unwrap();
        assert_eq!(err.name, "nope");
    }

    #[test]
    fn text_is_passed_positionally() {
        let mut fx = Fixture::new();
        let w = fx.build_xml(r#"<Label text="Hello" width="10"/>"#).unwrap();
        assert_eq!(text_of(&w).as_deref(), Some("Hello"));
        assert!(with_headless(&w, |w| w.prop("text").is_none()).unwrap());
    }

    #[test]
    fn window_title_is_positional_and_children_land_in_frame() {
        let mut fx = Fixture::new();
        let src = r#"
            <Window title="Demo" width="400">
                <VStack><Label text="a"/></VStack>
            </Window>"#;
        let window = fx.build_xml(src).unwrap();
        assert_eq!(text_of(&window).as_deref(), Some("Demo"));
        assert_eq!(with_headless(&window, |w| w.children().len()), Some(0));
        let frame = window.borrow().frame().unwrap();
        let stack = with_headless(&frame, |f| f.children().to_vec()).unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack[0].borrow().type_name(), "VStack");
    }

    #[test]
    fn combo_items_become_model_items() {
        let mut fx = Fixture::new();
        let src = r#"
            <ComboBox xmlns:x="http://schemas.ui/name" x:Name="combo">
                <ComboItem x:Name="first" text="Dark"/>
                <ComboItem text="Light"/>
                <ComboItem text="3"/>
            </ComboBox>"#;
        let combo = fx.build_xml(src).unwrap();
        let model = combo.borrow().model().unwrap();
        assert_eq!(model.borrow().items(), ["Dark", "Light", "3"]);
        assert_eq!(with_headless(&combo, |w| w.children().len()), Some(0));
        assert_eq!(fx.elements.names(), ["combo"]);
    }

    #[test]
    fn combo_skips_foreign_children() {
        let mut fx = Fixture::new();
        let node = UiNode::new("ComboBox")
            .child(UiNode::new("ComboItem").attr("text", "a"))
            .child(UiNode::new("Label").attr("text", "not an item"));
        let combo = fx.build(&node).unwrap();
        assert_eq!(combo.borrow().model().unwrap().borrow().items(), ["a"]);
    }

    #[test]
    fn radio_buttons_share_group() {
        let mut fx = Fixture::new();
        let src = r#"
            <RadioCollection xmlns:x="http://schemas.ui/name" x:Name="mode">
                <RadioButton x:Name="a" text="Fast"/>
                <RadioButton x:Name="b" text="Exact"/>
            </RadioCollection>"#;
        let group = fx.build_xml(src).unwrap();
        let a = fx.elements.get("a").unwrap();
        let b = fx.elements.get("b").unwrap();
        let ga = with_headless(&a, |w| w.group().cloned()).flatten().unwrap();
        let gb = with_headless(&b, |w| w.group().cloned()).flatten().unwrap();
        assert!(Rc::ptr_eq(&ga, &gb));
        assert!(Rc::ptr_eq(&ga, &group));
        assert_eq!(with_headless(&group, |g| g.children().len()), Some(2));

        headless::click(&b).unwrap();
        assert_eq!(model_value(&group), Some(Value::Int(1)));
    }

    #[test]
    fn clicked_fn_registers_once() {
        let mut fx = Fixture::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        fx.handlers.register("on_click", move |_| h.set(h.get() + 1));

        let w = fx.build_xml(r#"<Button text="Go" clicked_fn="on_click"/>"#).unwrap();
        assert_eq!(with_headless(&w, |w| w.callback_count("clicked_fn")), Some(1));
        assert!(with_headless(&w, |w| w.prop("clicked_fn").is_none()).unwrap());

        headless::click(&w).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn missing_handler_fails_before_registration() {
        let mut fx = Fixture::new();
        let src = format!(r#"<Button {NS} x:Name="btn" clicked_fn="missing_method"/>"#);
        let err = fx.build_xml(&src).err().unwrap();
        assert!(matches!(
            err,
            BuildError::CallbackResolution { ref handler, .. } if handler == "missing_method"
        ));
        assert!(!fx.elements.contains("btn"));
    }

    #[test]
    fn style_string_is_parsed() {
        let mut fx = Fixture::new();
        let w = fx
            .build_xml(r#"<Button text="x" style="{'Button': {'background_color': 4278222024}}"/>"#)
            .unwrap();
        let style = with_headless(&w, |w| w.prop("style").and_then(Arg::as_value).cloned())
            .flatten()
            .unwrap();
        let inner = style.as_map().unwrap()["Button"].as_map().unwrap();
        assert_eq!(inner["background_color"], Value::Int(4278222024));
    }

    #[test]
    fn malformed_style_is_an_error() {
        let mut fx = Fixture::new();
        let err = fx.build_xml(r#"<Button text="x" style="{invalid"/>"#).err().unwrap();
        assert!(matches!(err, BuildError::Style { ref widget, .. } if widget == "Button"));
    }

    #[test]
    fn model_value_is_applied_as_float() {
        let mut fx = Fixture::new();
        let w = fx.build_xml(r#"<ProgressBar model.value="0.75"/>"#).unwrap();
        assert_eq!(model_value(&w), Some(Value::Float(0.75)));
        assert!(with_headless(&w, |w| w.prop("model.value").is_none()).unwrap());
    }

    #[test]
    fn null_model_value_is_ignored() {
        let mut fx = Fixture::new();
        let src = r#"{"type": "ProgressBar", "attributes": {"model.value": null}}"#;
        let w = fx.build(&parse_json_str(src).unwrap()).unwrap();
        assert_eq!(model_value(&w), Some(Value::Float(0.0)));
        assert!(with_headless(&w, |w| w.prop("model.value").is_none()).unwrap());
    }

    #[test]
    fn model_value_without_model_fails() {
        let mut fx = Fixture::new();
        let err = fx.build(&UiNode::new("Label").attr("model.value", 1i64)).err().unwrap();
        assert!(matches!(err, BuildError::Toolkit(ToolkitError::MissingModel { .. })));
    }

    #[test]
    fn model_callbacks_go_to_model() {
        let mut fx = Fixture::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        fx.handlers.register("on_changed", move |v| s.borrow_mut().push(v.clone()));

        let src = r#"<FloatSlider add_value_changed_fn="on_changed" model.value="0.5"/>"#;
        let w = fx.build_xml(src).unwrap();
        // registered after the initial value, so that one is not observed
        assert!(seen.borrow().is_empty());

        let model = w.borrow().model().unwrap();
        model.borrow_mut().set_value(Value::Float(0.25)).unwrap();
        assert_eq!(*seen.borrow(), vec![Value::Float(0.25)]);
    }

    #[test]
    fn color_widget_reports_item_changes() {
        let mut fx = Fixture::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        fx.handlers.register("on_color", move |v| s.borrow_mut().push(v.clone()));

        let src = r#"<ColorWidget add_item_changed_fn="on_color" model.value="0.5,0.5,0.5"/>"#;
        let w = fx.build_xml(src).unwrap();
        let grey = [0.5, 0.5, 0.5, 1.0].map(Value::Float).to_vec();
        assert_eq!(model_value(&w), Some(Value::List(grey)));
        assert!(seen.borrow().is_empty());

        let model = w.borrow().model().unwrap();
        model.borrow_mut().set_value(Value::Str("1,0,0".into())).unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn unsupported_callbacks_are_skipped() {
        let mut fx = Fixture::new();
        fx.handlers.register("noop", |_| {});
        let src = r#"<Label text="x" add_value_changed_fn="noop" custom_fn="noop"/>"#;
        let w = fx.build_xml(src).unwrap();
        assert_eq!(with_headless(&w, |w| w.callback_count("custom_fn")), Some(0));
    }

    #[test]
    fn unknown_type_is_an_error() {
        let mut fx = Fixture::new();
        let err = fx.build(&UiNode::new("VStack").child(UiNode::new("Gizmo"))).err().unwrap();
        assert!(matches!(err, BuildError::UnknownWidgetType(ref t) if t == "Gizmo"));
    }

    #[test]
    fn toolkit_errors_propagate_unchanged() {
        let mut fx = Fixture::new();
        let err = fx.build(&UiNode::new("Spacer").attr("width", "wide")).err().unwrap();
        match err {
            BuildError::Toolkit(ToolkitError::TypeMismatch { param, expected, .. }) => {
                assert_eq!(param, "width");
                assert_eq!(expected, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn partial_registrations_survive_failure() {
        let mut fx = Fixture::new();
        let node = UiNode::new("VStack")
            .child(UiNode::new("Label").named("ok").attr("text", "fine"))
            .child(UiNode::new("Gizmo"));
        assert!(fx.build(&node).is_err());
        assert!(fx.elements.contains("ok"));
    }

    #[test]
    fn duplicate_names_keep_last() {
        let mut fx = Fixture::new();
        let node = UiNode::new("VStack")
            .child(UiNode::new("Label").named("dup").attr("text", "first"))
            .child(UiNode::new("Label").named("dup").attr("text", "second"));
        fx.build(&node).unwrap();
        assert_eq!(text_of(&fx.elements.get("dup").unwrap()).as_deref(), Some("second"));
    }

    #[test]
    fn custom_conventions() {
        let mut fx = Fixture::new();
        fx.config.self_prefix = "this.".into();
        fx.config.callback_suffix = "_cb".into();
        fx.handlers.register("go", |_| {});
        let node = UiNode::new("Button").named("this.btn").attr("clicked_cb", "go");
        let w = fx.build(&node).unwrap();
        assert!(fx.handlers.field("btn").is_some());
        // `clicked_cb` is not a headless widget handler key, so it is only logged
        assert_eq!(with_headless(&w, |w| w.callback_count("clicked_cb")), Some(0));
        assert!(with_headless(&w, |w| w.prop("clicked_cb").is_none()).unwrap());
    }
}
