//! Untyped document tree.
//!
//! A parsed animation definition is an arbitrary nest of maps, sequences and
//! scalars. [`Node`] is the tagged union over those three shapes. Map keys are
//! always strings (scalar keys are stringified on parse) and keep their
//! insertion order, so writing a document back never reorders it.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_yaml::{Number, Value};

use crate::error::EditorError;

/// Ordered string-keyed map
pub type NodeMap = IndexMap<String, Node>;

/// Leaf value
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    Str(String),
}

/// Document tree node
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Map(NodeMap),
    Seq(Vec<Node>),
    Scalar(Scalar),
}

/// One step of a path from the root to a nested node
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSeg {
    Key(String),
    Index(usize),
}

pub type NodePath = Vec<PathSeg>;

impl Node {
    pub fn null() -> Self {
        Node::Scalar(Scalar::Null)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Node::Scalar(Scalar::Str(s.into()))
    }

    pub fn bool(b: bool) -> Self {
        Node::Scalar(Scalar::Bool(b))
    }

    pub fn uint(n: u64) -> Self {
        Node::Scalar(Scalar::Number(Number::from(n)))
    }

    pub fn map() -> Self {
        Node::Map(NodeMap::new())
    }

    pub fn as_map(&self) -> Option<&NodeMap> {
        match self {
            Node::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut NodeMap> {
        match self {
            Node::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Node]> {
        match self {
            Node::Seq(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Node::Scalar(Scalar::Number(n)) => n.as_u64(),
            _ => None,
        }
    }

    /// Map lookup; `None` for non-maps and missing keys
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map().and_then(|m| m.get(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.as_map_mut().and_then(|m| m.get_mut(key))
    }

    /// Null, empty string, empty map or empty sequence
    pub fn is_blank(&self) -> bool {
        match self {
            Node::Scalar(Scalar::Null) => true,
            Node::Scalar(Scalar::Str(s)) => s.is_empty(),
            Node::Map(m) => m.is_empty(),
            Node::Seq(s) => s.is_empty(),
            Node::Scalar(_) => false,
        }
    }

    /// Scalar rendered for display in a text field (`null` renders empty)
    pub fn display_text(&self) -> String {
        match self {
            Node::Scalar(Scalar::Null) => String::new(),
            Node::Scalar(Scalar::Bool(b)) => b.to_string(),
            Node::Scalar(Scalar::Number(n)) => n.to_string(),
            Node::Scalar(Scalar::Str(s)) => s.clone(),
            Node::Map(_) | Node::Seq(_) => String::new(),
        }
    }

    pub fn at_path(&self, path: &[PathSeg]) -> Option<&Node> {
        path.iter().try_fold(self, |node, seg| match (node, seg) {
            (Node::Map(m), PathSeg::Key(k)) => m.get(k),
            (Node::Seq(s), PathSeg::Index(i)) => s.get(*i),
            _ => None,
        })
    }

    pub fn at_path_mut(&mut self, path: &[PathSeg]) -> Option<&mut Node> {
        let mut node = self;
        for seg in path {
            node = match (node, seg) {
                (Node::Map(m), PathSeg::Key(k)) => m.get_mut(k)?,
                (Node::Seq(s), PathSeg::Index(i)) => s.get_mut(*i)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Set `key` on a map node, keeping its position if it already exists.
    /// Returns false when `self` is not a map.
    pub fn set(&mut self, key: &str, value: Node) -> bool {
        match self.as_map_mut() {
            Some(m) => {
                if let Some(slot) = m.get_mut(key) {
                    *slot = value;
                } else {
                    m.insert(key.to_string(), value);
                }
                true
            }
            None => false,
        }
    }
}

impl TryFrom<Value> for Node {
    type Error = EditorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => Node::null(),
            Value::Bool(b) => Node::bool(b),
            Value::Number(n) => Node::Scalar(Scalar::Number(n)),
            Value::String(s) => Node::string(s),
            Value::Sequence(items) => Node::Seq(
                items
                    .into_iter()
                    .map(Node::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Value::Mapping(mapping) => {
                let mut map = NodeMap::with_capacity(mapping.len());
                for (k, v) in mapping {
                    map.insert(key_to_string(k)?, Node::try_from(v)?);
                }
                Node::Map(map)
            }
            Value::Tagged(tagged) => {
                return Err(EditorError::Parse(format!(
                    "unsupported tag {}",
                    tagged.tag
                )));
            }
        })
    }
}

fn key_to_string(key: Value) -> Result<String, EditorError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        other => Err(EditorError::Parse(format!(
            "unsupported map key: {:?}",
            other
        ))),
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(s) => s.serialize(serializer),
            Node::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Node {
        let value: Value = serde_yaml::from_str(text).unwrap();
        Node::try_from(value).unwrap()
    }

    #[test]
    fn test_keys_keep_insertion_order() {
        let node = parse("zeta: 1\nalpha: 2\nmid: 3\n");
        let keys: Vec<&str> = node.as_map().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);

        let out = serde_yaml::to_string(&node).unwrap();
        assert_eq!(out, "zeta: 1\nalpha: 2\nmid: 3\n");
    }

    #[test]
    fn test_numeric_keys_are_stringified() {
        let node = parse("KeyFrames:\n  0: a.png\n  1: b.png\n");
        let frames = node.get("KeyFrames").unwrap().as_map().unwrap();
        assert_eq!(frames.get("0").and_then(Node::as_str), Some("a.png"));
        assert_eq!(frames.get("1").and_then(Node::as_str), Some("b.png"));
    }

    #[test]
    fn test_tagged_value_rejected() {
        let value: Value = serde_yaml::from_str("a: !custom 5").unwrap();
        assert!(matches!(Node::try_from(value), Err(EditorError::Parse(_))));
    }

    #[test]
    fn test_set_keeps_position() {
        let mut node = parse("a: 1\nb: 2\nc: 3\n");
        assert!(node.set("b", Node::string("x")));
        assert!(node.set("d", Node::bool(true)));
        let keys: Vec<&str> = node.as_map().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c", "d"]);
        assert_eq!(node.get("b").and_then(Node::as_str), Some("x"));

        let mut scalar = Node::string("root");
        assert!(!scalar.set("a", Node::null()));
    }

    #[test]
    fn test_path_navigation() {
        let mut node = parse("list:\n  - name: first\n  - name: second\n");
        let path = vec![
            PathSeg::Key("list".into()),
            PathSeg::Index(1),
            PathSeg::Key("name".into()),
        ];
        assert_eq!(node.at_path(&path).and_then(Node::as_str), Some("second"));

        *node.at_path_mut(&path).unwrap() = Node::string("renamed");
        assert_eq!(node.at_path(&path).and_then(Node::as_str), Some("renamed"));

        let bad = vec![PathSeg::Index(0)];
        assert!(node.at_path(&bad).is_none());
    }

    #[test]
    fn test_blank() {
        assert!(Node::null().is_blank());
        assert!(Node::string("").is_blank());
        assert!(Node::map().is_blank());
        assert!(!Node::string("walk").is_blank());
        assert!(!Node::bool(false).is_blank());
    }

    #[test]
    fn test_null_serializes_as_null() {
        let mut node = Node::map();
        node.set("Path", Node::null());
        assert_eq!(serde_yaml::to_string(&node).unwrap(), "Path: null\n");
    }
}
