//! Handlers for the bundled `ui/complex_ui` documents.
//!
//! Handlers only record what happened; [`react`] applies the effects after
//! the triggering widget is released.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use domkit_markup::{coerce, Value};
use domkit_ui::headless::HeadlessWidget;
use domkit_ui::toolkit::WidgetRef;
use domkit_ui::DomExtension;

/// Shared event queue. Each handler pushes its name (and payload) here.
#[derive(Clone, Default)]
pub struct EventQueue(Rc<RefCell<Vec<(String, Value)>>>);

impl EventQueue {
    fn push(&self, name: &str, value: &Value) {
        self.0.borrow_mut().push((name.to_string(), value.clone()));
    }

    pub fn take(&self) -> Vec<(String, Value)> {
        self.0.borrow_mut().drain(..).collect()
    }
}

const HANDLERS: &[&str] = &[
    "on_click",
    "on_reset",
    "on_theme",
    "on_rendering_mode",
    "on_name_changed",
    "on_age_changed",
    "on_height_changed",
    "on_quality_changed",
    "on_enabled_changed",
    "on_advanced_changed",
    "on_bg_color_changed",
    "on_fg_color_changed",
    "on_accent_color_changed",
];

pub fn register_handlers(mut ext: DomExtension, events: &EventQueue) -> DomExtension {
    for name in HANDLERS {
        let events = events.clone();
        ext = ext.on(*name, move |value| events.push(name, value));
    }
    ext
}

/// Apply queued events to the tree.
pub fn react(ext: &DomExtension, events: &EventQueue) {
    let mut clicks = 0;
    for (name, value) in events.take() {
        log::info!("event {name} ({value})");
        match name.as_str() {
            "on_click" => {
                clicks += 1;
                set_label(ext, &format!("clicked {clicks} time(s)"));
            }
            "on_reset" => {
                clicks = 0;
                set_label(ext, "empty");
            }
            "on_theme" => set_label(ext, &format!("theme #{value}")),
            "on_rendering_mode" => set_label(ext, &format!("rendering mode {value}")),
            "on_name_changed" => set_label(ext, &format!("hello, {}", value.to_display_string())),
            "on_age_changed" => set_label(ext, &format!("age {value}")),
            "on_height_changed" => set_label(ext, &format!("height {value}")),
            "on_quality_changed" => set_label(ext, &format!("quality {value}")),
            "on_enabled_changed" => set_label(ext, &format!("enabled {value}")),
            "on_advanced_changed" => set_label(ext, &format!("advanced {value}")),
            "on_bg_color_changed" => set_label(ext, &format!("background {value}")),
            "on_fg_color_changed" => set_label(ext, &format!("foreground {value}")),
            "on_accent_color_changed" => set_label(ext, &format!("accent {value}")),
            _ => {}
        }
    }
}

fn set_label(ext: &DomExtension, text: &str) {
    let Ok(label) = ext.elements().get("label") else {
        log::warn!("no element named 'label'");
        return;
    };
    with_headless_mut(&label, |w| w.set_text(text));
}

fn with_headless_mut(widget: &WidgetRef, f: impl FnOnce(&mut HeadlessWidget)) {
    let mut widget = widget.borrow_mut();
    if let Some(w) = widget.as_any_mut().downcast_mut::<HeadlessWidget>() {
        f(w);
    }
}

/// Handle `name=value`; the value is coerced like an XML attribute.
pub fn set_model(ext: &DomExtension, assignment: &str) -> Result<()> {
    let Some((name, raw)) = assignment.split_once('=') else {
        bail!("expected ELEMENT=VALUE, got '{assignment}'");
    };
    let widget = ext.elements().get(name)?;
    let model = widget
        .borrow()
        .model()
        .with_context(|| format!("element '{name}' has no model"))?;
    model.borrow_mut().set_value(coerce(raw))?;
    Ok(())
}
