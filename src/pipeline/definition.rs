//! Definition loading
//!
//! Pipeline and template files are parsed into a small tagged tree
//! ([`Node`]) with no pipeline semantics attached. Interpretation of the
//! tree lives in [`crate::pipeline::steps`].

use super::errors::GeneratorError;
use serde_yaml::Value;
use std::fmt;
use std::fs;
use std::path::Path;

/// A parsed YAML node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Node {
    /// Missing or `~` value
    #[default]
    Null,
    /// Any scalar, kept in its textual form
    Scalar(String),
    /// Ordered sequence
    Seq(Vec<Node>),
    /// Mapping in document order
    Map(Vec<(String, Node)>),
}

impl Node {
    /// Parses YAML text into a node tree
    ///
    /// # Errors
    ///
    /// Returns the YAML error if the text is malformed.
    pub fn parse(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str::<Value>(text).map(Self::from)
    }

    /// Looks up a key in a mapping node
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns the scalar text, if this is a scalar
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items, if this is a sequence
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Node]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries, if this is a mapping
    #[must_use]
    pub fn as_map(&self) -> Option<&[(String, Node)]> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns true for `Null`
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Scalar(b.to_string()),
            Value::Number(n) => Self::Scalar(n.to_string()),
            Value::String(s) => Self::Scalar(s),
            Value::Sequence(items) => Self::Seq(items.into_iter().map(Self::from).collect()),
            Value::Mapping(mapping) => Self::Map(
                mapping
                    .into_iter()
                    .map(|(k, v)| (key_text(k), Self::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

fn key_text(key: Value) -> String {
    match Node::from(key) {
        Node::Scalar(s) => s,
        Node::Null => String::new(),
        other => other.to_string(),
    }
}

/// Flow-style rendering, used when a structured value ends up in a command
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Scalar(s) => f.write_str(s),
            Self::Seq(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Reads and parses a definition file
///
/// # Errors
///
/// Returns [`GeneratorError::Read`] if the file cannot be read and
/// [`GeneratorError::Parse`] if it is not valid YAML.
pub fn load_definition(path: &Path) -> Result<Node, GeneratorError> {
    tracing::debug!(path = %path.display(), "Loading definition");

    let content = fs::read_to_string(path).map_err(|source| GeneratorError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Node::parse(&content).map_err(|source| GeneratorError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_keeps_mapping_order() {
        let node = Node::parse("b: 1\na: 2\nc: 3\n").unwrap();
        let keys: Vec<&str> = node
            .as_map()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_scalars_become_text() {
        let node = Node::parse("flag: true\ncount: 3\nname: app\n").unwrap();
        assert_eq!(node.get("flag").and_then(Node::as_scalar), Some("true"));
        assert_eq!(node.get("count").and_then(Node::as_scalar), Some("3"));
        assert_eq!(node.get("name").and_then(Node::as_scalar), Some("app"));
    }

    #[test]
    fn test_get_on_non_mapping() {
        let node = Node::parse("- a\n- b\n").unwrap();
        assert!(node.get("a").is_none());
        assert_eq!(node.as_seq().map(<[Node]>::len), Some(2));
    }

    #[test]
    fn test_empty_document_is_null() {
        assert!(Node::parse("").unwrap().is_null());
    }

    #[test]
    fn test_display_flow_style() {
        let node = Node::parse("list: [a, b]\nmap:\n  k: v\n").unwrap();
        assert_eq!(node.get("list").unwrap().to_string(), "[a, b]");
        assert_eq!(node.get("map").unwrap().to_string(), "{k: v}");
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_definition(&temp_dir.path().join("missing.yml"));
        assert!(matches!(result, Err(GeneratorError::Read { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yml");
        fs::write(&path, "jobs: [unclosed\n").unwrap();

        let result = load_definition(&path);
        assert!(matches!(result, Err(GeneratorError::Parse { .. })));
    }
}
