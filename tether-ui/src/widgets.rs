//! Constructors for the widget kinds the host knows how to build.
//!
//! These only assemble [`Element`]s. Lists expand their `data` through the
//! render callbacks into ordinary children; the raw `data` prop stays on the
//! element and is stripped by the codec.

use crate::node::{Element, WidgetType};
use serde_json::Value;

pub fn window() -> Element {
    Element::new(WidgetType::Window)
}

pub fn view() -> Element {
    Element::new(WidgetType::View)
}

pub fn scroll_view() -> Element {
    Element::new(WidgetType::ScrollView)
}

pub fn text(content: impl Into<String>) -> Element {
    Element::new(WidgetType::Text).prop("text", content.into())
}

pub fn button(label: impl Into<String>) -> Element {
    Element::new(WidgetType::Button).prop("text", label.into())
}

/// `source` is resolved by the host against its base path.
pub fn image(source: impl Into<String>) -> Element {
    Element::new(WidgetType::Image).prop("source", source.into())
}

pub fn text_input(placeholder: impl Into<String>) -> Element {
    Element::new(WidgetType::TextInput).prop("placeholder", placeholder.into())
}

/// Default list item key: the item's `key`, then its `id`, then its index.
pub fn default_key(item: &Value, index: usize) -> String {
    ["key", "id"]
        .iter()
        .find_map(|field| match item.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| index.to_string())
}

pub fn flat_list<F>(data: Vec<Value>, render_item: F) -> Element
where
    F: Fn(&Value, usize) -> Element,
{
    flat_list_keyed(data, default_key, render_item)
}

pub fn flat_list_keyed<K, F>(data: Vec<Value>, key_extractor: K, render_item: F) -> Element
where
    K: Fn(&Value, usize) -> String,
    F: Fn(&Value, usize) -> Element,
{
    let children: Vec<Element> = data
        .iter()
        .enumerate()
        .map(|(index, item)| render_item(item, index).key(key_extractor(item, index)))
        .collect();

    Element::new(WidgetType::FlatList)
        .prop("data", Value::Array(data))
        .children(children)
}

/// Sections are `{ "title": .., "data": [..] }`. Each section renders its
/// header followed by its items.
pub fn section_list<F, H>(sections: Vec<Value>, render_item: F, render_section_header: H) -> Element
where
    F: Fn(&Value, usize) -> Element,
    H: Fn(&Value) -> Element,
{
    let mut children = Vec::new();
    for (section_index, section) in sections.iter().enumerate() {
        children.push(render_section_header(section).key(format!("section-{section_index}")));

        let items = section.get("data").and_then(Value::as_array);
        for (index, item) in items.into_iter().flatten().enumerate() {
            let key = format!("{section_index}-{}", default_key(item, index));
            children.push(render_item(item, index).key(key));
        }
    }

    Element::new(WidgetType::SectionList)
        .prop("data", Value::Array(sections))
        .children(children)
}
