//! Static description of every widget type the headless toolkit provides.

use crate::registry::WidgetKind;

// ── Model kinds ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Float,
    Int,
    Bool,
    Text,
    /// Item list with an integer selection index.
    Items,
    /// Multi-value RGBA color; each component is an item.
    Color,
}

// ── Class info ────────────────────────────────────────────────────────────

pub struct ClassInfo {
    pub name:       &'static str,
    pub kind:       WidgetKind,
    /// Attribute passed positionally.
    pub positional: Option<&'static str>,
    pub model:      Option<ModelKind>,
    pub doc:        &'static str,
}

/// Widget-level handler keys every headless widget accepts.
pub const WIDGET_CALLBACKS: &[&str] = &[
    "clicked_fn",
    "mouse_pressed_fn",
    "mouse_released_fn",
    "mouse_double_clicked_fn",
    "mouse_hovered_fn",
];

/// Model-level handler keys; `add_item_changed_fn` only on item and color models.
pub const MODEL_CALLBACKS: &[&str] = &[
    "add_value_changed_fn",
    "add_begin_edit_fn",
    "add_end_edit_fn",
];

impl ClassInfo {
    const fn new(
        name: &'static str,
        kind: WidgetKind,
        positional: Option<&'static str>,
        model: Option<ModelKind>,
        doc: &'static str,
    ) -> Self {
        Self { name, kind, positional, model, doc }
    }

    const fn container(name: &'static str, doc: &'static str) -> Self {
        Self::new(name, WidgetKind::Container, None, None, doc)
    }

    const fn leaf(name: &'static str, text: bool, doc: &'static str) -> Self {
        let positional = if text { Some("text") } else { None };
        Self::new(name, WidgetKind::Leaf, positional, None, doc)
    }

    const fn input(name: &'static str, model: ModelKind, doc: &'static str) -> Self {
        Self::new(name, WidgetKind::Leaf, None, Some(model), doc)
    }
}

pub static CATALOG: &[ClassInfo] = &[
    // ── Framed / containers ───────────────────────────────────────────────
    ClassInfo::new(
        "Window",
        WidgetKind::Framed,
        Some("title"),
        None,
        "Top-level window; children go into its frame.",
    ),
    ClassInfo::container("Frame", "Plain frame."),
    ClassInfo::container("VStack", "Vertical stack."),
    ClassInfo::container("HStack", "Horizontal stack."),
    ClassInfo::container("ZStack", "Overlapping stack."),
    ClassInfo::container("ScrollingFrame", "Scrollable frame."),
    ClassInfo::container("CollapsableFrame", "Frame with a collapsible header (`title`)."),
    // ── Leaves ────────────────────────────────────────────────────────────
    ClassInfo::leaf("Label", true, "Static text."),
    ClassInfo::leaf("Button", true, "Push button; fires `clicked_fn`."),
    ClassInfo::leaf("Spacer", false, "Empty space."),
    ClassInfo::leaf("Line", false, "Separator line."),
    ClassInfo::leaf("Image", false, "Image from `source_url`."),
    ClassInfo::input("StringField", ModelKind::Text, "Single-line text input."),
    ClassInfo::input("IntField", ModelKind::Int, "Integer input."),
    ClassInfo::input("FloatField", ModelKind::Float, "Float input."),
    ClassInfo::input("IntSlider", ModelKind::Int, "Integer slider."),
    ClassInfo::input("FloatSlider", ModelKind::Float, "Float slider."),
    ClassInfo::input("CheckBox", ModelKind::Bool, "Boolean toggle."),
    ClassInfo::input("ProgressBar", ModelKind::Float, "Progress indicator; value in [0, 1]."),
    ClassInfo::input("ColorWidget", ModelKind::Color, "Color swatch; model holds RGBA components."),
    // ── Selection / choice ────────────────────────────────────────────────
    ClassInfo::new(
        "ComboBox",
        WidgetKind::SelectionList,
        None,
        Some(ModelKind::Items),
        "Drop-down list; `ComboItem` children become model items.",
    ),
    ClassInfo::new(
        "ComboItem",
        WidgetKind::SelectionItem,
        Some("text"),
        None,
        "Item declaration inside a `ComboBox`.",
    ),
    ClassInfo::new(
        "RadioCollection",
        WidgetKind::ChoiceGroup,
        None,
        Some(ModelKind::Int),
        "Shared selection for `RadioButton` children.",
    ),
    ClassInfo::new(
        "RadioButton",
        WidgetKind::ChoiceItem,
        Some("text"),
        None,
        "Member of a `RadioCollection`.",
    ),
];
