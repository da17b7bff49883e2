//! # Document Tree
//!
//! The decoded, dynamically-typed representation of one manifest.
//!
//! [`Node`] is built from a `serde_yaml::Value` with these normalizations:
//!
//! - YAML tags are unwrapped to the tagged value.
//! - Integers that fit `i64` become [`Node::Integer`]; every other number
//!   (including unsigned integers above `i64::MAX`) becomes [`Node::Float`].
//! - A mapping whose keys are all strings becomes [`Node::Mapping`]. A
//!   mapping with any other key (number, boolean, null, tagged or
//!   collection) becomes [`Node::MixedMapping`], which paths never descend
//!   into, so rules under it are skipped.
//!
//! [`Document`] wraps the root node and guarantees it is a mapping or null.
//! Top-level keys are the exception to the rule above: scalar keys there
//! are stringified (null becomes the empty string) and collection keys are
//! a decode failure.

use std::collections::BTreeMap;
use std::fmt;

use serde_yaml::Value;

use crate::error::DocumentError;

/// One node of a decoded manifest.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// String-keyed mapping. Key order is not significant.
    Mapping(BTreeMap<String, Node>),
    /// Mapping with at least one non-string key, in document order.
    MixedMapping(Vec<(Node, Node)>),
    /// Ordered list of nodes.
    Sequence(Vec<Node>),
    /// String scalar.
    String(String),
    /// Integer scalar that fits in `i64`.
    Integer(i64),
    /// Floating-point scalar.
    Float(f64),
    /// Boolean scalar.
    Boolean(bool),
    /// Explicit null or an empty value.
    Null,
}

impl Node {
    /// Short name of the variant, for logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::MixedMapping(_) => "mapping with non-string keys",
            Self::Sequence(_) => "sequence",
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
        }
    }

    /// Look up `key` if this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Follow a sequence of mapping keys from this node.
    ///
    /// Returns `None` as soon as a key is missing or an intermediate node
    /// is not a mapping. An empty path returns `self`.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, key| node.get(key.as_ref()))
    }

    /// Returns the entries if this node is a string-keyed mapping.
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the elements if this node is a sequence.
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the string if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for [`Node::Integer`] and [`Node::Float`].
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Integer view of a numeric scalar.
    ///
    /// Floats are truncated toward zero. Out-of-range floats saturate at
    /// the `i64` bounds and NaN maps to 0. Non-numeric nodes return `None`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            // `as` truncates toward zero and saturates.
            Self::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    fn from_number(number: &serde_yaml::Number) -> Self {
        if let Some(n) = number.as_i64() {
            return Self::Integer(n);
        }
        match number.as_f64() {
            Some(f) => Self::Float(f),
            None => Self::Null,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => Self::from_number(&n),
            Value::String(s) => Self::String(s),
            Value::Sequence(items) => Self::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Mapping(map) if map.keys().all(Value::is_string) => Self::Mapping(
                map.into_iter()
                    .filter_map(|(key, value)| match key {
                        Value::String(k) => Some((k, Node::from(value))),
                        _ => None,
                    })
                    .collect(),
            ),
            Value::Mapping(map) => Self::MixedMapping(
                map.into_iter()
                    .map(|(key, value)| (Node::from(key), Node::from(value)))
                    .collect(),
            ),
            Value::Tagged(tagged) => {
                let serde_yaml::value::TaggedValue { value, .. } = *tagged;
                Self::from(value)
            }
        }
    }
}

/// Renders scalars with their YAML spelling; collections as `{...}` / `[...]`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping(_) | Self::MixedMapping(_) => f.write_str("{...}"),
            Self::Sequence(_) => f.write_str("[...]"),
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
        }
    }
}

fn root_key(key: Value) -> Result<String, DocumentError> {
    match key {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        Value::Tagged(tagged) => {
            let serde_yaml::value::TaggedValue { value, .. } = *tagged;
            root_key(value)
        }
        Value::Sequence(_) => Err(DocumentError::RootKeyNotScalar { kind: "sequence" }),
        Value::Mapping(_) => Err(DocumentError::RootKeyNotScalar { kind: "mapping" }),
    }
}

/// A decoded manifest whose root is a mapping, or null for an empty file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Wrap a root node.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::RootNotMapping`] unless `root` is a mapping
    /// or null.
    pub fn new(root: Node) -> Result<Self, DocumentError> {
        match root {
            Node::Mapping(_) | Node::Null => Ok(Self { root }),
            other => Err(DocumentError::RootNotMapping { kind: other.kind() }),
        }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(map) => {
                let entries = map
                    .into_iter()
                    .map(|(key, value)| Ok((root_key(key)?, Node::from(value))))
                    .collect::<Result<BTreeMap<_, _>, DocumentError>>()?;
                Ok(Self {
                    root: Node::Mapping(entries),
                })
            }
            Value::Tagged(tagged) => {
                let serde_yaml::value::TaggedValue { value, .. } = *tagged;
                Self::try_from(value)
            }
            other => Self::new(Node::from(other)),
        }
    }
}
