use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::error::{CodecError, ErrorKind};
use crate::node::Node;

/// Deepest nesting the encoder and decoder accept.
///
/// Every list, mapping, object and element counts as one level. A
/// self-describing object counts as a level of its own, so a representation
/// that keeps producing fresh objects is stopped here.
pub const MAX_DEPTH: usize = 512;

/// Normalizes a value graph into plain JSON data.
///
/// The walk is depth-first and pre-order:
///
/// - self-describing objects are replaced by their representation, which is
///   then processed in turn;
/// - markup elements and generic objects become mappings of their fields;
/// - lists and mappings are rebuilt from their processed children;
/// - scalars are copied as they are.
///
/// Objects with no fields come out as an empty JSON object, never an empty
/// array.
///
/// # Errors
///
/// - [`ErrorKind::InfOrNan`] for a non-finite float;
/// - [`ErrorKind::Utf8`] for a binary string that is not UTF-8;
/// - [`ErrorKind::Recursion`] when a self-describing object occurs inside its
///   own representation;
/// - [`ErrorKind::Depth`] beyond [`MAX_DEPTH`] levels.
pub fn process_data(value: &Node) -> Result<Value, CodecError> {
    let mut walker = Walker {
        ancestors: Vec::new(),
        pointer: Vec::new(),
    };
    walker.walk(value, 0)
}

struct Walker {
    /// Self-describing objects currently being expanded.
    ancestors: Vec<*const ()>,
    /// Reference tokens from the root to the node being walked.
    pointer: Vec<String>,
}

impl Walker {
    fn walk(&mut self, node: &Node, depth: usize) -> Result<Value, CodecError> {
        match node {
            Node::Null => Ok(Value::Null),
            Node::Bool(b) => Ok(Value::Bool(*b)),
            Node::Int(i) => Ok(Value::from(*i)),
            Node::UInt(u) => Ok(Value::from(*u)),
            Node::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| self.reject(ErrorKind::InfOrNan)),
            Node::String(s) => Ok(Value::String(s.clone())),
            Node::Bytes(bytes) => std::str::from_utf8(bytes)
                .map(|s| Value::String(s.to_string()))
                .map_err(|_| self.reject(ErrorKind::Utf8)),
            Node::List(items) => {
                let depth = self.descend(depth)?;
                let mut out = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    self.pointer.push(idx.to_string());
                    let value = self.walk(item, depth);
                    self.pointer.pop();
                    out.push(value?);
                }
                Ok(Value::Array(out))
            }
            Node::Map(map) => self.walk_fields(map, depth),
            Node::Object(obj) => {
                tracing::trace!(
                    pointer = %self.location(),
                    fields = obj.fields.len(),
                    "converting object to mapping"
                );
                self.walk_fields(&obj.fields, depth)
            }
            Node::Element(el) => {
                tracing::trace!(
                    pointer = %self.location(),
                    element = %el.name,
                    "flattening markup element"
                );
                self.walk_fields(&el.to_fields(), depth)
            }
            Node::Serializable(obj) => {
                let key = Arc::as_ptr(obj) as *const ();
                if self.ancestors.contains(&key) {
                    return Err(self.reject(ErrorKind::Recursion));
                }
                let depth = self.descend(depth)?;
                tracing::trace!(
                    pointer = %self.location(),
                    value = ?obj,
                    "replacing self-describing object"
                );
                self.ancestors.push(key);
                let repr = obj.json_serialize();
                let result = self.walk(&repr, depth);
                self.ancestors.pop();
                result
            }
        }
    }

    fn walk_fields(
        &mut self,
        fields: &IndexMap<String, Node>,
        depth: usize,
    ) -> Result<Value, CodecError> {
        let depth = self.descend(depth)?;
        let mut out = Map::with_capacity(fields.len());
        for (key, child) in fields {
            self.pointer.push(key.replace('~', "~0").replace('/', "~1"));
            let value = self.walk(child, depth);
            self.pointer.pop();
            out.insert(key.clone(), value?);
        }
        Ok(Value::Object(out))
    }

    /// Enters one more level of nesting.
    fn descend(&self, depth: usize) -> Result<usize, CodecError> {
        if depth >= MAX_DEPTH {
            return Err(self.reject(ErrorKind::Depth));
        }
        Ok(depth + 1)
    }

    /// JSON Pointer of the node being walked, rendered only when logged.
    fn location(&self) -> String {
        if self.pointer.is_empty() {
            return "(root)".to_string();
        }
        self.pointer.iter().fold(String::new(), |mut acc, token| {
            acc.push('/');
            acc.push_str(token);
            acc
        })
    }

    fn reject(&self, kind: ErrorKind) -> CodecError {
        tracing::debug!(
            pointer = %self.location(),
            code = kind.code(),
            "value graph rejected: {}",
            kind
        );
        CodecError::new(kind)
    }
}

/// Rewrites every array as an object keyed by element index.
pub(crate) fn force_objects(value: &mut Value) {
    match value {
        Value::Array(items) => {
            let mut map = Map::with_capacity(items.len());
            for (idx, mut item) in std::mem::take(items).into_iter().enumerate() {
                force_objects(&mut item);
                map.insert(idx.to_string(), item);
            }
            *value = Value::Object(map);
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                force_objects(v);
            }
        }
        _ => {}
    }
}
