use anyhow::{Result, bail};
use colored::Colorize;
use serde_json::{Map, Value};
use tether_ui::events::{EventHandler, EventName};
use tether_ui::node::{Child, Element, WidgetType};
use tether_ui::style::style_map;

/// Parse a JSON element description:
///
/// ```json
/// { "type": "Button", "id": "ok", "text": "OK", "onPress": "ok-pressed",
///   "style": { "marginVertical": 4 }, "children": [ ... ] }
/// ```
///
/// A recognized event prop holding a string becomes a handler that logs the
/// string and the payload.
pub fn parse_element(value: &Value) -> Result<Element> {
    let Value::Object(fields) = value else {
        bail!("element must be a JSON object, got {}", value);
    };

    let kind = match fields.get("type") {
        Some(Value::String(tag)) => WidgetType::parse(tag),
        Some(other) => bail!("`type` must be a string, got {}", other),
        None => WidgetType::View,
    };

    let mut element = Element::new(kind);
    for (name, field) in fields {
        element = match name.as_str() {
            "type" => element,
            "id" => element.id(text_field(name, field)?),
            "key" => element.key(text_field(name, field)?),
            "className" => element.class_name(text_field(name, field)?),
            "style" => element.style(style_map(field.clone())),
            "children" => element.children(parse_children(field)?),
            _ => match (EventName::parse(name), field) {
                (Some(event), Value::String(label)) => {
                    element.prop(name.as_str(), logging_handler(event, label.clone()))
                }
                _ => element.prop(name.as_str(), field.clone()),
            },
        };
    }
    Ok(element)
}

/// A file holds either one tree or an array of successive renders.
pub fn parse_renders(value: &Value) -> Result<Vec<Element>> {
    match value {
        Value::Array(trees) => trees.iter().map(parse_element).collect(),
        single => Ok(vec![parse_element(single)?]),
    }
}

fn parse_children(value: &Value) -> Result<Vec<Child>> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };
    items
        .iter()
        .map(|item| match item {
            Value::Object(fields) if is_element(fields) => Ok(Child::Element(parse_element(item)?)),
            leaf => Ok(Child::Leaf(leaf.clone())),
        })
        .collect()
}

fn is_element(fields: &Map<String, Value>) -> bool {
    fields.contains_key("type")
}

fn text_field(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => bail!("`{}` must be a string or number, got {}", name, other),
    }
}

fn logging_handler(event: EventName, label: String) -> EventHandler {
    EventHandler::new(move |payload| {
        tracing::info!("{} fired {}", label, event);
        eprintln!("{} {} {}", "event".cyan().bold(), label, payload);
    })
}
