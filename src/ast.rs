// AST representation
//
// The node model is shared by the reader, the analyzer and the code emitter.
// Its JSON form is the tagged shape `{"type": "<kind>", "value": ...}` which is also
// what gets stored alongside persisted terms, so the serde attributes below are part
// of the external contract.

pub mod json;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification the analyzer attaches to every symbol occurrence it visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolType {
    Local,
    Builtin,
    Unknown,
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolType::Local => "local",
            SymbolType::Builtin => "builtin",
            SymbolType::Unknown => "unknown",
        };

        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            // keep the fraction so the text reads back as a float
            Number::Float(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{:.1}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Integer(n)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::Float(n)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntry {
    pub key: Node,
    pub value: Node,
}

impl MapEntry {
    pub fn new(key: Node, value: Node) -> Self {
        Self { key, value }
    }
}

/// Payload of a node whose kind is not known to this crate.
/// It is kept so that the emitter can still render something sensible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Nodes(Vec<Node>),
    Other(serde_json::Value),
}

impl Default for Payload {
    fn default() -> Self {
        Payload::Other(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    List {
        #[serde(default)]
        value: Vec<Node>,
    },
    Vector {
        #[serde(default)]
        value: Vec<Node>,
    },
    Map {
        #[serde(default)]
        value: Vec<MapEntry>,
    },
    Set {
        #[serde(default)]
        value: Vec<Node>,
    },
    Symbol {
        value: String,
        #[serde(
            rename = "symbolType",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        symbol_type: Option<SymbolType>,
    },
    // the value includes the leading colon
    Keyword {
        value: String,
    },
    #[serde(
        alias = "integer",
        alias = "float",
        alias = "IntLiteral",
        alias = "FloatLiteral"
    )]
    Number {
        value: Number,
    },
    #[serde(alias = "StringLiteral")]
    String {
        value: String,
    },
    Character {
        value: String,
    },
    #[serde(alias = "BooleanLiteral")]
    Boolean {
        value: bool,
    },
    Nil,
    Regex {
        value: String,
    },
    Ratio {
        value: String,
    },
    Quote {
        value: Box<Node>,
    },
    SyntaxQuote {
        value: Box<Node>,
    },
    Unquote {
        value: Box<Node>,
    },
    UnquoteSplicing {
        value: Box<Node>,
    },
    Deref {
        value: Box<Node>,
    },
    #[serde(alias = "var")]
    VarQuote {
        value: Box<Node>,
    },
    // (metadata, annotated value)
    #[serde(alias = "with-meta")]
    Meta {
        value: Box<(Node, Node)>,
    },
    // the elements between `#(` and `)`
    #[serde(alias = "fn")]
    AnonymousFunction {
        #[serde(default)]
        value: Vec<Node>,
    },
    Discard {
        value: Box<Node>,
    },
    TaggedLiteral {
        tag: String,
        value: Box<Node>,
    },
    Unrecognized {
        kind: String,
        #[serde(default)]
        value: Payload,
    },
}

impl Node {
    pub fn list<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Node::List {
            value: elements.into_iter().map(Into::into).collect(),
        }
    }

    pub fn vector<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Node::Vector {
            value: elements.into_iter().map(Into::into).collect(),
        }
    }

    pub fn set<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Node::Set {
            value: elements.into_iter().map(Into::into).collect(),
        }
    }

    pub fn map<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Node, Node)>,
    {
        Node::Map {
            value: entries
                .into_iter()
                .map(|(k, v)| MapEntry::new(k, v))
                .collect(),
        }
    }

    pub fn anonymous_function<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Node::AnonymousFunction {
            value: elements.into_iter().map(Into::into).collect(),
        }
    }

    pub fn symbol(val: impl Into<String>) -> Self {
        Node::Symbol {
            value: val.into(),
            symbol_type: None,
        }
    }

    pub fn keyword(val: impl Into<String>) -> Self {
        Node::Keyword { value: val.into() }
    }

    pub fn string(val: impl Into<String>) -> Self {
        Node::String { value: val.into() }
    }

    pub fn character(val: impl Into<String>) -> Self {
        Node::Character { value: val.into() }
    }

    pub fn number<N: Into<Number>>(num: N) -> Self {
        Node::Number { value: num.into() }
    }

    pub fn boolean(val: bool) -> Self {
        Node::Boolean { value: val }
    }

    pub fn nil() -> Self {
        Node::Nil
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Node::Regex {
            value: pattern.into(),
        }
    }

    pub fn ratio(val: impl Into<String>) -> Self {
        Node::Ratio { value: val.into() }
    }

    pub fn quote(inner: Node) -> Self {
        Node::Quote {
            value: Box::new(inner),
        }
    }

    pub fn syntax_quote(inner: Node) -> Self {
        Node::SyntaxQuote {
            value: Box::new(inner),
        }
    }

    pub fn unquote(inner: Node) -> Self {
        Node::Unquote {
            value: Box::new(inner),
        }
    }

    pub fn unquote_splicing(inner: Node) -> Self {
        Node::UnquoteSplicing {
            value: Box::new(inner),
        }
    }

    pub fn deref(inner: Node) -> Self {
        Node::Deref {
            value: Box::new(inner),
        }
    }

    pub fn var_quote(inner: Node) -> Self {
        Node::VarQuote {
            value: Box::new(inner),
        }
    }

    pub fn meta(metadata: Node, inner: Node) -> Self {
        Node::Meta {
            value: Box::new((metadata, inner)),
        }
    }

    pub fn discard(inner: Node) -> Self {
        Node::Discard {
            value: Box::new(inner),
        }
    }

    pub fn tagged_literal(tag: impl Into<String>, inner: Node) -> Self {
        Node::TaggedLiteral {
            tag: tag.into(),
            value: Box::new(inner),
        }
    }

    /// The name of this node's kind as it appears in the `type` field of the JSON form.
    pub fn kind(&self) -> &str {
        match self {
            Node::List { .. } => "list",
            Node::Vector { .. } => "vector",
            Node::Map { .. } => "map",
            Node::Set { .. } => "set",
            Node::Symbol { .. } => "symbol",
            Node::Keyword { .. } => "keyword",
            Node::Number { .. } => "number",
            Node::String { .. } => "string",
            Node::Character { .. } => "character",
            Node::Boolean { .. } => "boolean",
            Node::Nil => "nil",
            Node::Regex { .. } => "regex",
            Node::Ratio { .. } => "ratio",
            Node::Quote { .. } => "quote",
            Node::SyntaxQuote { .. } => "syntax-quote",
            Node::Unquote { .. } => "unquote",
            Node::UnquoteSplicing { .. } => "unquote-splicing",
            Node::Deref { .. } => "deref",
            Node::VarQuote { .. } => "var-quote",
            Node::Meta { .. } => "meta",
            Node::AnonymousFunction { .. } => "anonymous-function",
            Node::Discard { .. } => "discard",
            Node::TaggedLiteral { .. } => "tagged-literal",
            Node::Unrecognized { kind, .. } => kind,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Node::Symbol { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn symbol_type(&self) -> Option<SymbolType> {
        match self {
            Node::Symbol { symbol_type, .. } => *symbol_type,
            _ => None,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Node::Symbol { .. })
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Node::String { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Node::List { .. })
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Node::Vector { .. })
    }

    pub fn elements(&self) -> Option<&[Node]> {
        match self {
            Node::List { value } | Node::Vector { value } | Node::Set { value } => Some(value),
            _ => None,
        }
    }

    /// Every direct child, in source order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::List { value }
            | Node::Vector { value }
            | Node::Set { value }
            | Node::AnonymousFunction { value } => value.iter().collect(),
            Node::Map { value } => value
                .iter()
                .flat_map(|entry| vec![&entry.key, &entry.value])
                .collect(),
            Node::Quote { value }
            | Node::SyntaxQuote { value }
            | Node::Unquote { value }
            | Node::UnquoteSplicing { value }
            | Node::Deref { value }
            | Node::VarQuote { value }
            | Node::Discard { value }
            | Node::TaggedLiteral { value, .. } => vec![value.as_ref()],
            Node::Meta { value } => vec![&value.0, &value.1],
            Node::Unrecognized {
                value: Payload::Nodes(nodes),
                ..
            } => nodes.iter().collect(),
            _ => vec![],
        }
    }

    /// Mutable references to every direct child, in source order.
    pub fn children_mut(&mut self) -> Vec<&mut Node> {
        match self {
            Node::List { value }
            | Node::Vector { value }
            | Node::Set { value }
            | Node::AnonymousFunction { value } => value.iter_mut().collect(),
            Node::Map { value } => value
                .iter_mut()
                .flat_map(|entry| vec![&mut entry.key, &mut entry.value])
                .collect(),
            Node::Quote { value }
            | Node::SyntaxQuote { value }
            | Node::Unquote { value }
            | Node::UnquoteSplicing { value }
            | Node::Deref { value }
            | Node::VarQuote { value }
            | Node::Discard { value }
            | Node::TaggedLiteral { value, .. } => vec![value.as_mut()],
            Node::Meta { value } => {
                let (metadata, inner) = value.as_mut();
                vec![metadata, inner]
            }
            Node::Unrecognized {
                value: Payload::Nodes(nodes),
                ..
            } => nodes.iter_mut().collect(),
            _ => vec![],
        }
    }

    /// Removes every analyzer annotation from this node and its descendants.
    pub fn clear_annotations(&mut self) {
        if let Node::Symbol { symbol_type, .. } = self {
            *symbol_type = None;
        }

        for child in self.children_mut() {
            child.clear_annotations();
        }
    }

    /// Structural equality that ignores analyzer annotations.
    pub fn same_form(&self, other: &Node) -> bool {
        let mut lhs = self.clone();
        let mut rhs = other.clone();
        lhs.clear_annotations();
        rhs.clear_annotations();
        lhs == rhs
    }
}

// a single form is a program of one
impl From<Node> for Vec<Node> {
    fn from(node: Node) -> Self {
        vec![node]
    }
}
