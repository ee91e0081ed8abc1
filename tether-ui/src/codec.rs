use crate::config::BridgeConfig;
use crate::node::{Node, NodeId, PropValue};
use crate::style::StyleTranslator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields never sent to the host, whatever their value.
pub const STRIPPED_FIELDS: [&str; 2] = ["children", "data"];

/// How the translated style travels on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleEncoding {
    /// Nested JSON object.
    #[default]
    Object,
    /// JSON text inside a string field, for hosts that only take scalars.
    String,
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("failed to serialize node {id}: {source}")]
    Serialize {
        id: NodeId,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// Turns a node descriptor into the attribute set the host receives.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    translator: StyleTranslator,
    style_encoding: StyleEncoding,
}

impl Codec {
    pub fn new(translator: StyleTranslator, style_encoding: StyleEncoding) -> Self {
        Self {
            translator,
            style_encoding,
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(config.translator(), config.style_encoding)
    }

    /// Props merged with identity fields (identity wins), minus stripped
    /// fields and callables, with the style translated.
    pub fn attributes(&self, node: &Node) -> Result<Map<String, Value>> {
        let mut attrs = Map::new();

        for (name, value) in node.props.iter() {
            if let PropValue::Value(value) = value {
                attrs.insert(name.to_string(), value.clone());
            }
        }

        attrs.insert("type".into(), Value::from(node.kind.as_str()));
        attrs.insert("id".into(), Value::from(node.id.as_str()));
        match &node.parent_id {
            Some(parent) => {
                attrs.insert("parent".into(), Value::from(parent.as_str()));
            }
            None => {
                attrs.remove("parent");
            }
        }
        // Hosts treat any `persistent` field as set, so it is sent only when true.
        if node.persistent {
            attrs.insert("persistent".into(), Value::Bool(true));
        } else {
            attrs.remove("persistent");
        }
        attrs.insert("className".into(), Value::from(node.class_name.as_str()));

        attrs.remove("style");
        if !node.style.is_empty() {
            let style = self.translator.translate(&node.style);
            let encoded = match self.style_encoding {
                StyleEncoding::Object => Value::Object(style),
                StyleEncoding::String => {
                    let text = serde_json::to_string(&style).map_err(|source| {
                        CodecError::Serialize {
                            id: node.id.clone(),
                            source,
                        }
                    })?;
                    Value::String(text)
                }
            };
            attrs.insert("style".into(), encoded);
        }

        for field in STRIPPED_FIELDS {
            attrs.remove(field);
        }

        Ok(attrs)
    }

    pub fn encode(&self, node: &Node) -> Result<String> {
        let attrs = self.attributes(node)?;
        serde_json::to_string(&attrs).map_err(|source| CodecError::Serialize {
            id: node.id.clone(),
            source,
        })
    }
}

/// Encode with the default translator and nested style.
pub fn encode(node: &Node) -> Result<String> {
    Codec::default().encode(node)
}
