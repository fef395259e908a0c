//! In-memory value graph accepted by the encoder and produced by the decoder.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{CodecError, ErrorKind};

/// A value that supplies its own JSON-ready representation.
///
/// The encoder calls [`JsonSerializable::json_serialize`] instead of looking
/// at the value's fields, then processes the returned node like any other.
pub trait JsonSerializable: fmt::Debug + Send + Sync {
    /// Returns the representation to encode in place of `self`.
    fn json_serialize(&self) -> Node;
}

/// Node of a value graph.
#[derive(Debug, Clone, Default)]
pub enum Node {
    /// JSON `null`.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Int(i64),
    /// Unsigned integer scalar beyond `i64` range.
    UInt(u64),
    /// Floating-point scalar; must be finite to encode.
    Float(f64),
    /// Text scalar.
    String(String),
    /// Binary string; must hold valid UTF-8 to encode.
    Bytes(Vec<u8>),
    /// Ordered sequence.
    List(Vec<Node>),
    /// Ordered mapping container with unique keys.
    Map(IndexMap<String, Node>),
    /// Generic object with public fields in declaration order.
    Object(Object),
    /// Structured markup node.
    Element(Element),
    /// Self-describing object.
    Serializable(Arc<dyn JsonSerializable>),
}

impl Node {
    /// Wraps a self-describing value.
    pub fn serializable<T: JsonSerializable + 'static>(value: T) -> Self {
        Node::Serializable(Arc::new(value))
    }

    /// Converts any serde-serializable value into a node.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnsupportedType`] when serde cannot represent the
    /// value as JSON (for example a map with non-string keys).
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, CodecError> {
        let value = serde_json::to_value(value).map_err(|err| {
            tracing::debug!(error = %err, "value has no JSON representation");
            CodecError::new(ErrorKind::UnsupportedType)
        })?;
        Ok(Self::from_value(value, true))
    }

    /// Converts a parsed JSON value; objects become [`Node::Map`] when
    /// `as_mapping` is set and [`Node::Object`] records otherwise.
    pub fn from_value(value: Value, as_mapping: bool) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Node::UInt(u)
                } else {
                    n.as_f64().map_or(Node::Null, Node::Float)
                }
            }
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::List(
                items
                    .into_iter()
                    .map(|item| Self::from_value(item, as_mapping))
                    .collect(),
            ),
            Value::Object(map) => {
                let fields: IndexMap<String, Node> = map
                    .into_iter()
                    .map(|(k, v)| (k, Self::from_value(v, as_mapping)))
                    .collect();
                if as_mapping {
                    Node::Map(fields)
                } else {
                    Node::Object(Object { fields })
                }
            }
        }
    }

    /// Returns true for [`Node::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Returns the text of a [`Node::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a key in a mapping or an object.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Map(map) => map.get(key),
            Node::Object(obj) => obj.fields.get(key),
            _ => None,
        }
    }

    /// Returns true for variants that hold other nodes or produce them.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Node::List(_)
                | Node::Map(_)
                | Node::Object(_)
                | Node::Element(_)
                | Node::Serializable(_)
        )
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Null, Node::Null) => true,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::Int(a), Node::Int(b)) => a == b,
            (Node::UInt(a), Node::UInt(b)) => a == b,
            (Node::Float(a), Node::Float(b)) => a == b,
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Bytes(a), Node::Bytes(b)) => a == b,
            (Node::List(a), Node::List(b)) => a == b,
            (Node::Map(a), Node::Map(b)) => a == b,
            (Node::Object(a), Node::Object(b)) => a == b,
            (Node::Element(a), Node::Element(b)) => a == b,
            (Node::Serializable(a), Node::Serializable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Generic object: named fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    /// Public fields.
    pub fields: IndexMap<String, Node>,
}

impl Object {
    /// Creates an object with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, replacing any earlier value under the same name.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Node>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// Markup element: a name, attributes, optional text and child elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Tag name.
    pub name: String,
    /// Attributes in document order.
    pub attributes: IndexMap<String, String>,
    /// Text content.
    pub text: Option<String>,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

/// Key under which element attributes are reported.
pub const ATTRIBUTES_KEY: &str = "@attributes";

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Flattens the element into a field mapping.
    ///
    /// Attributes go under `@attributes`. Children are keyed by tag name and
    /// repeated names collect into a list. A child with only text becomes
    /// that string. A leaf element reports its own text under `"0"`.
    pub fn to_fields(&self) -> IndexMap<String, Node> {
        let mut fields = IndexMap::new();
        if !self.attributes.is_empty() {
            let attrs = self
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), Node::String(v.clone())))
                .collect();
            fields.insert(ATTRIBUTES_KEY.to_string(), Node::Map(attrs));
        }

        if self.children.is_empty() {
            if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
                fields.insert("0".to_string(), Node::String(text.to_string()));
            }
            return fields;
        }

        for child in &self.children {
            let value = child.to_child_node();
            match fields.get_mut(&child.name) {
                // to_child_node never yields a list, so a list here is a group
                Some(Node::List(group)) => group.push(value),
                Some(existing) => {
                    let first = std::mem::take(existing);
                    *existing = Node::List(vec![first, value]);
                }
                None => {
                    fields.insert(child.name.clone(), value);
                }
            }
        }
        fields
    }

    fn to_child_node(&self) -> Node {
        let is_text_only = self.attributes.is_empty() && self.children.is_empty();
        match &self.text {
            Some(text) if is_text_only && !text.is_empty() => Node::String(text.clone()),
            _ => Node::Element(self.clone()),
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Int(i64::from(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Int(value)
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Node::Int(i),
            Err(_) => Node::UInt(value),
        }
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Vec<u8>> for Node {
    fn from(value: Vec<u8>) -> Self {
        Node::Bytes(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::List(value)
    }
}

impl From<IndexMap<String, Node>> for Node {
    fn from(value: IndexMap<String, Node>) -> Self {
        Node::Map(value)
    }
}

impl From<Object> for Node {
    fn from(value: Object) -> Self {
        Node::Object(value)
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from_value(value, true)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}
