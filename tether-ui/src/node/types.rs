use crate::events::{EventHandler, HandlerSet};
use crate::style::StyleMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smartstring::{LazyCompact, SmartString};
use std::fmt;

/// Bridge identity of a rendered node. Stable for the element's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(SmartString<LazyCompact>);

impl NodeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(SmartString::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(SmartString::from(id))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Widget kind the host constructs for a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum WidgetType {
    Window,
    #[default]
    View,
    Text,
    Image,
    TextInput,
    Button,
    ScrollView,
    FlatList,
    SectionList,
    /// Any tag the host registers beyond the built-in set.
    Custom(SmartString<LazyCompact>),
}

impl WidgetType {
    pub fn as_str(&self) -> &str {
        match self {
            WidgetType::Window => "Window",
            WidgetType::View => "View",
            WidgetType::Text => "Text",
            WidgetType::Image => "Image",
            WidgetType::TextInput => "TextInput",
            WidgetType::Button => "Button",
            WidgetType::ScrollView => "ScrollView",
            WidgetType::FlatList => "FlatList",
            WidgetType::SectionList => "SectionList",
            WidgetType::Custom(tag) => tag.as_str(),
        }
    }

    pub fn parse(tag: &str) -> Self {
        match tag {
            "Window" => WidgetType::Window,
            "View" => WidgetType::View,
            "Text" => WidgetType::Text,
            "Image" => WidgetType::Image,
            "TextInput" => WidgetType::TextInput,
            "Button" => WidgetType::Button,
            "ScrollView" => WidgetType::ScrollView,
            "FlatList" => WidgetType::FlatList,
            "SectionList" => WidgetType::SectionList,
            other => WidgetType::Custom(other.into()),
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WidgetType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WidgetType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(WidgetType::parse(&tag))
    }
}

/// A single author-supplied attribute: plain data or a callable.
#[derive(Debug, Clone)]
pub enum PropValue {
    Value(Value),
    Handler(EventHandler),
}

impl PropValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            PropValue::Value(v) => Some(v),
            PropValue::Handler(_) => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, PropValue::Handler(_))
    }
}

impl From<Value> for PropValue {
    fn from(value: Value) -> Self {
        PropValue::Value(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Value(Value::from(value))
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Value(Value::from(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Value(Value::from(value))
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Value(Value::from(value))
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Value(Value::from(value))
    }
}

impl From<EventHandler> for PropValue {
    fn from(handler: EventHandler) -> Self {
        PropValue::Handler(handler)
    }
}

/// Ordered attribute bag. Inserting an existing name replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct Props {
    entries: Vec<(SmartString<LazyCompact>, PropValue)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<SmartString<LazyCompact>>,
        value: impl Into<PropValue>,
    ) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(PropValue::as_value)
    }

    pub fn remove(&mut self, name: &str) -> Option<PropValue> {
        let index = self.entries.iter().position(|(k, _)| k.as_str() == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A child slot of an element. Anything that is not an element (text,
/// numbers, malformed input) is carried as an opaque leaf.
#[derive(Debug, Clone)]
pub enum Child {
    Element(Element),
    Leaf(Value),
}

impl Child {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Child::Element(e) => Some(e),
            Child::Leaf(_) => None,
        }
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Child::Element(element)
    }
}

impl From<Value> for Child {
    fn from(value: Value) -> Self {
        Child::Leaf(value)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Leaf(Value::from(text))
    }
}

/// An author-described element, as handed to the bridge on each render.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub kind: WidgetType,
    /// Authored id. Durable identity when present.
    pub id: Option<NodeId>,
    pub key: Option<SmartString<LazyCompact>>,
    /// Set by the enclosing node during linkage, not by authors.
    pub parent: Option<NodeId>,
    pub class_name: Option<String>,
    pub style: StyleMap,
    pub props: Props,
    pub children: Vec<Child>,
}

impl Element {
    pub fn new(kind: WidgetType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn key(mut self, key: impl Into<SmartString<LazyCompact>>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Merge `style` over whatever style is already set.
    pub fn style(mut self, style: StyleMap) -> Self {
        for (key, value) in style {
            self.style.insert(key, value);
        }
        self
    }

    pub fn prop(
        mut self,
        name: impl Into<SmartString<LazyCompact>>,
        value: impl Into<PropValue>,
    ) -> Self {
        self.props.insert(name, value);
        self
    }

    pub fn on<F>(self, event: crate::events::EventName, f: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.prop(event.as_str(), EventHandler::new(f))
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

/// The per-render descriptor of one node: identity plus the current props,
/// style and relabelled children.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub kind: WidgetType,
    pub parent_id: Option<NodeId>,
    pub persistent: bool,
    pub class_name: String,
    pub style: StyleMap,
    pub props: Props,
    pub children: Vec<Child>,
}

impl Node {
    /// Recognized event handlers carried by this render.
    pub fn handlers(&self) -> HandlerSet {
        HandlerSet::from_props(&self.props)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Child::as_element)
    }
}
