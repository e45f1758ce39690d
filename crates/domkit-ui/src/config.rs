use domkit_markup::LoaderOptions;
use serde::Deserialize;

/// Attribute and naming conventions the builder recognizes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Attribute keys ending in this suffix are event handlers.
    pub callback_suffix: String,
    /// Declared names with this prefix bind onto the handler owner.
    pub self_prefix: String,
    /// Attribute applied to the widget model after construction.
    pub model_value_key: String,
    /// Attribute parsed as a literal mapping when given as a string.
    pub style_key: String,
    /// Keyword used to hand a choice group to its members.
    pub group_key: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            callback_suffix: "_fn".to_string(),
            self_prefix: "self.".to_string(),
            model_value_key: "model.value".to_string(),
            style_key: "style".to_string(),
            group_key: "radio_collection".to_string(),
        }
    }
}

/// Full configuration for a [`DomExtension`](crate::dom::DomExtension).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    pub loader: LoaderOptions,
    pub builder: BuilderConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: DomConfig =
            serde_json::from_str(r#"{"builder": {"callback_suffix": "_cb"}}"#).unwrap();
        assert_eq!(cfg.builder.callback_suffix, "_cb");
        assert_eq!(cfg.builder.self_prefix, "self.");
        assert_eq!(cfg.loader, LoaderOptions::default());
    }
}
