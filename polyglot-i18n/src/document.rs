//! Document model for localization files
//!
//! A [`Document`] is either a flat `.properties`-style key/value map or an
//! arbitrarily nested JSON document. Both shapes share the same tree of
//! [`Node`]s so that traversal and translation treat them identically:
//! a flat document is just an object whose values are all [`Node::Text`].

use serde_json::{Map, Number, Value};

/// A single value in a localization document
///
/// Objects keep their entries in source order so that translated output is
/// deterministic and diffs cleanly against the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A translatable string leaf
    Text(String),
    /// Ordered key/value entries with unique keys
    Object(Vec<(String, Node)>),
    Array(Vec<Node>),
    Number(Number),
    Bool(bool),
    Null,
}

impl Node {
    /// Returns true if both trees have the same keys, nesting and array
    /// lengths, and the same kind of value at every position.
    ///
    /// String contents are ignored; non-string leaves must be equal.
    pub fn same_shape(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Text(_), Node::Text(_)) => true,
            (Node::Object(a), Node::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.same_shape(vb))
            }
            (Node::Array(a), Node::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            (a, b) => a == b,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Object(_) | Node::Array(_))
    }

    /// Look up a direct child of an object by key
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Node::Text(s),
            Value::Object(map) => {
                Node::Object(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
            Value::Array(items) => Node::Array(items.into_iter().map(Node::from).collect()),
            Value::Number(n) => Node::Number(n),
            Value::Bool(b) => Node::Bool(b),
            Value::Null => Node::Null,
        }
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Text(s) => Value::String(s.clone()),
            Node::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key.clone(), Value::from(value));
                }
                Value::Object(map)
            }
            Node::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            Node::Number(n) => Value::Number(n.clone()),
            Node::Bool(b) => Value::Bool(*b),
            Node::Null => Value::Null,
        }
    }
}

/// The on-disk format a document was read from and will be written back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// `key=value` lines (Java `.properties`)
    Flat,
    /// Nested JSON
    Json,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Flat => "properties",
            DocumentFormat::Json => "json",
        }
    }
}

/// A parsed localization file
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    format: DocumentFormat,
    root: Node,
}

impl Document {
    /// Build a flat document from key/value pairs.
    ///
    /// A repeated key replaces the earlier value but keeps its position.
    pub fn flat<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut root: Vec<(String, Node)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            let value = Node::Text(value.into());
            match root.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => root.push((key, value)),
            }
        }
        Document {
            format: DocumentFormat::Flat,
            root: Node::Object(root),
        }
    }

    /// Wrap a JSON value. Returns `None` unless the root is an object or array.
    pub fn json(value: Value) -> Option<Self> {
        let root = Node::from(value);
        root.is_container().then_some(Document {
            format: DocumentFormat::Json,
            root,
        })
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// A document of the same format with a different tree
    pub fn with_root(&self, root: Node) -> Document {
        Document {
            format: self.format,
            root,
        }
    }

    /// True when the top-level object or array has no entries
    pub fn is_empty(&self) -> bool {
        match &self.root {
            Node::Object(entries) => entries.is_empty(),
            Node::Array(items) => items.is_empty(),
            _ => true,
        }
    }

    /// Flat entries in source order. Non-string values are skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        let entries: &[(String, Node)] = match &self.root {
            Node::Object(entries) => entries,
            _ => &[],
        };
        entries
            .iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.as_str(), s)))
    }

    pub fn to_json_value(&self) -> Value {
        Value::from(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_keeps_order_and_last_duplicate() {
        let doc = Document::flat([("b", "1"), ("a", "2"), ("b", "3")]);
        let entries: Vec<_> = doc.entries().collect();
        assert_eq!(entries, vec![("b", "3"), ("a", "2")]);
        assert_eq!(doc.format(), DocumentFormat::Flat);
    }

    #[test]
    fn test_json_rejects_scalar_root() {
        assert!(Document::json(json!("hello")).is_none());
        assert!(Document::json(json!(42)).is_none());
        assert!(Document::json(json!([])).is_some());
    }

    #[test]
    fn test_json_preserves_key_order() {
        let value: Value = serde_json::from_str(r#"{"z": "1", "a": {"y": "2", "b": "3"}}"#).unwrap();
        let doc = Document::json(value).unwrap();
        let Node::Object(entries) = doc.root() else {
            panic!("expected object root");
        };
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(
            serde_json::to_string(&doc.to_json_value()).unwrap(),
            r#"{"z":"1","a":{"y":"2","b":"3"}}"#
        );
    }

    #[test]
    fn test_same_shape_ignores_text_content() {
        let a = Node::from(json!({"a": "hello", "b": {"c": "world"}, "n": 3, "l": ["x", 1]}));
        let b = Node::from(json!({"a": "hola", "b": {"c": "mundo"}, "n": 3, "l": ["y", 1]}));
        assert!(a.same_shape(&b));
    }

    #[test]
    fn test_same_shape_detects_differences() {
        let a = Node::from(json!({"a": "hello", "l": ["x"]}));
        assert!(!a.same_shape(&Node::from(json!({"a": "hello"}))));
        assert!(!a.same_shape(&Node::from(json!({"a": "hello", "l": ["x", "y"]}))));
        assert!(!a.same_shape(&Node::from(json!({"a": 1, "l": ["x"]}))));
        assert!(!a.same_shape(&Node::from(json!({"b": "hello", "l": ["x"]}))));
    }

    #[test]
    fn test_is_empty() {
        assert!(Document::flat(Vec::<(String, String)>::new()).is_empty());
        assert!(Document::json(json!({})).unwrap().is_empty());
        assert!(!Document::json(json!({"a": 1})).unwrap().is_empty());
    }

    #[test]
    fn test_get_child() {
        let node = Node::from(json!({"a": {"b": "c"}}));
        assert_eq!(node.get("a").and_then(|n| n.get("b")).and_then(Node::as_str), Some("c"));
        assert!(node.get("missing").is_none());
    }
}
