use crate::codec::StyleEncoding;
use crate::style::{StyleMap, StyleTranslator, style_map};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use thiserror::Error;

/// How fresh node ids are minted for elements without an authored id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    Uuid,
    /// `node-1`, `node-2`, ... Deterministic, for tests and replays.
    Sequential,
}

/// Bridge settings shared by the codec and the tree linkage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// First word of every transmitted `className`.
    pub class_prefix: String,
    /// Style every node starts from before author overrides.
    pub default_style: StyleMap,
    pub style_encoding: StyleEncoding,
    /// Portable style keys the host does not understand.
    pub excluded_style_keys: Vec<String>,
    pub id_strategy: IdStrategy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            class_prefix: "qt".to_string(),
            default_style: style_map(json!({
                "display": "flex",
                "flexDirection": "column",
            })),
            style_encoding: StyleEncoding::default(),
            excluded_style_keys: Vec::new(),
            id_strategy: IdStrategy::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BridgeConfig {
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!("Loaded bridge config from {:?}", path);
        Ok(config)
    }

    pub fn translator(&self) -> StyleTranslator {
        StyleTranslator::with_excluded(self.excluded_style_keys.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.class_prefix, "qt");
        assert_eq!(config.default_style.get("display"), Some(&json!("flex")));
        assert_eq!(config.style_encoding, StyleEncoding::Object);
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BridgeConfig::from_json_str(
            r#"{ "style_encoding": "string", "id_strategy": "sequential" }"#,
        )
        .unwrap();
        assert_eq!(config.style_encoding, StyleEncoding::String);
        assert_eq!(config.id_strategy, IdStrategy::Sequential);
        assert_eq!(config.class_prefix, "qt");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "class_prefix": "native", "excluded_style_keys": ["cursor"] }}"#
        )
        .unwrap();

        let config = BridgeConfig::from_path(file.path()).unwrap();
        assert_eq!(config.class_prefix, "native");
        assert!(config.translator().is_excluded("cursor"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = BridgeConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let err = BridgeConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
