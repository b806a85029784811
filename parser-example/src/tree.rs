use parser_framework::{Node, Tree};
use std::fmt::{self, Write};

/// A JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonNode>),
    Object(Vec<Member>),
}

/// A key/value pair of an object, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub key: String,
    pub value: JsonNode,
}

/// Children of an object are added under an empty key; [`JsonTree`]
/// supplies the real keys. Scalars ignore children.
impl Node for JsonNode {
    fn add_child(&mut self, child: Self) {
        match self {
            JsonNode::Array(items) => items.push(child),
            JsonNode::Object(members) => members.push(Member {
                key: String::new(),
                value: child,
            }),
            _ => {}
        }
    }
}

impl fmt::Display for JsonNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNode::Null => f.write_str("null"),
            JsonNode::Bool(value) => write!(f, "{value}"),
            JsonNode::Number(value) => write!(f, "{value}"),
            JsonNode::String(value) => write_string(f, value),
            JsonNode::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            JsonNode::Object(members) => {
                f.write_char('{')?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_string(f, &member.key)?;
                    write!(f, ":{}", member.value)?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Kind of the innermost open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    Array,
    Object,
}

#[derive(Debug)]
struct Frame {
    node: JsonNode,
    key: Option<String>,
}

/// Builds a [`JsonNode`] from the grammar's events.
///
/// Containers are kept on a stack while open and attached to their parent
/// when closed. The first completed top-level value becomes the root.
#[derive(Debug, Default)]
pub struct JsonTree {
    root: Option<JsonNode>,
    open: Vec<Frame>,
}

impl JsonTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an array or object. Scalars go through [`JsonTree::value`].
    pub fn open(&mut self, container: Container) {
        let node = match container {
            Container::Array => JsonNode::Array(Vec::new()),
            Container::Object => JsonNode::Object(Vec::new()),
        };
        self.open.push(Frame { node, key: None });
    }

    /// Sets the key for the next value of the innermost object.
    pub fn key(&mut self, key: String) {
        if let Some(frame) = self.open.last_mut() {
            frame.key = Some(key);
        }
    }

    /// Adds a complete value to the innermost container, or makes it the root.
    pub fn value(&mut self, node: JsonNode) {
        match self.open.last_mut() {
            None => self.root = Some(node),
            Some(Frame {
                node: JsonNode::Object(members),
                key,
            }) => members.push(Member {
                key: key.take().unwrap_or_default(),
                value: node,
            }),
            Some(frame) => frame.node.add_child(node),
        }
    }

    /// Closes the innermost container and attaches it to its parent.
    /// Returns false if nothing was open.
    pub fn close(&mut self) -> bool {
        match self.open.pop() {
            Some(frame) => {
                self.value(frame.node);
                true
            }
            None => false,
        }
    }

    pub fn innermost(&self) -> Option<Container> {
        self.open.last().map(|frame| match frame.node {
            JsonNode::Object(_) => Container::Object,
            _ => Container::Array,
        })
    }

    /// Number of containers still open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn into_root(self) -> Option<JsonNode> {
        self.root
    }
}

impl Tree for JsonTree {
    type Node = JsonNode;

    fn root(&self) -> Option<&JsonNode> {
        self.root.as_ref()
    }
}
