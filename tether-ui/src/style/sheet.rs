use super::translate::{StyleMap, StyleTranslator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named, already-distilled styles. Built once from an author spec and not
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet {
    entries: BTreeMap<String, StyleMap>,
}

impl StyleSheet {
    /// Translate every entry of `spec`. Recomputed on each call.
    pub fn create<I, K>(spec: I) -> Self
    where
        I: IntoIterator<Item = (K, StyleMap)>,
        K: Into<String>,
    {
        Self::create_with(&StyleTranslator::default(), spec)
    }

    pub fn create_with<I, K>(translator: &StyleTranslator, spec: I) -> Self
    where
        I: IntoIterator<Item = (K, StyleMap)>,
        K: Into<String>,
    {
        let entries = spec
            .into_iter()
            .map(|(name, style)| (name.into(), translator.translate(&style)))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&StyleMap> {
        self.entries.get(name)
    }

    /// Merge several entries left to right; missing names are skipped.
    pub fn compose(&self, names: &[&str]) -> StyleMap {
        let mut out = StyleMap::new();
        for style in names.iter().filter_map(|name| self.get(name)) {
            for (key, value) in style {
                out.insert(key.clone(), value.clone());
            }
        }
        out
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
