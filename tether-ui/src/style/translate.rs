use serde_json::{Map, Value};
use std::collections::HashSet;

/// Ordered style mapping. Portable keys before translation, host attribute
/// names after.
pub type StyleMap = Map<String, Value>;

/// Portable key -> host attribute name.
const RENAMES: &[(&str, &str)] = &[
    ("backgroundColor", "background"),
    ("fontSize", "font-size"),
    ("flexDirection", "flex-direction"),
    ("alignItems", "align-items"),
    ("justifyContent", "justify-content"),
];

/// Keys dropped by every translator. Extend per host through
/// [`StyleTranslator::exclude`].
const EXCLUDED: &[&str] = &[];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shorthand {
    MarginHorizontal,
    MarginVertical,
}

impl Shorthand {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "marginHorizontal" => Some(Self::MarginHorizontal),
            "marginVertical" => Some(Self::MarginVertical),
            _ => None,
        }
    }

    fn expansion(self) -> [&'static str; 2] {
        match self {
            Self::MarginHorizontal => ["margin-left", "margin-right"],
            Self::MarginVertical => ["margin-top", "margin-bottom"],
        }
    }
}

/// Host attribute name for a portable style key, if the key is renamed.
pub fn native_name(key: &str) -> Option<&'static str> {
    RENAMES
        .iter()
        .find(|(portable, _)| *portable == key)
        .map(|(_, native)| *native)
}

/// Maps portable style keys onto the host's attribute vocabulary.
#[derive(Debug, Clone)]
pub struct StyleTranslator {
    excluded: HashSet<String>,
}

impl StyleTranslator {
    pub fn new() -> Self {
        Self {
            excluded: EXCLUDED.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn with_excluded<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut translator = Self::new();
        for key in keys {
            translator.exclude(key);
        }
        translator
    }

    pub fn exclude(&mut self, key: impl Into<String>) {
        self.excluded.insert(key.into());
    }

    pub fn is_excluded(&self, key: &str) -> bool {
        self.excluded.contains(key)
    }

    /// Translate a style mapping. Pure and total: shorthands expand, renamed
    /// keys move to their native name, excluded keys drop, everything else
    /// passes through. Keys are visited in input order, so a later key
    /// overwrites whatever an earlier one wrote.
    pub fn translate(&self, style: &StyleMap) -> StyleMap {
        let mut out = StyleMap::new();

        for (key, value) in style {
            if let Some(shorthand) = Shorthand::parse(key) {
                for native in shorthand.expansion() {
                    out.insert(native.to_string(), value.clone());
                }
                continue;
            }

            if let Some(native) = native_name(key) {
                out.insert(native.to_string(), value.clone());
                continue;
            }

            if self.is_excluded(key) {
                continue;
            }

            out.insert(key.clone(), value.clone());
        }

        out
    }
}

impl Default for StyleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate with the default rename table and exclusion set.
pub fn translate(style: &StyleMap) -> StyleMap {
    StyleTranslator::default().translate(style)
}

/// Build a style map from a JSON object. Anything else yields an empty map.
pub fn style_map(value: Value) -> StyleMap {
    match value {
        Value::Object(map) => map,
        _ => StyleMap::new(),
    }
}
