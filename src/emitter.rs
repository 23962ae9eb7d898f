// Code emitter
//
// Renders nodes back into source text that the reader accepts again. Rendering is
// canonical: one space between elements, no comments and no trailing whitespace, so
// canonical input comes back unchanged.

use crate::ast::{self, MapEntry, Node, Payload};

/// Render a program, one top-level form per line.
pub fn ast_to_code(ast: &[Node]) -> String {
    CodeEmitter::new().emit_program(ast)
}

/// Render a single form.
pub fn node_to_code(node: &Node) -> String {
    CodeEmitter::new().emit(node)
}

/// Render the JSON encoding of a form or a program.
///
/// Text that is not a valid encoding is returned unchanged.
pub fn json_to_code(text: &str) -> String {
    match ast::json::from_str(text) {
        Ok(forms) => ast_to_code(&forms),
        Err(e) => {
            log::debug!("not a JSON encoded AST ({}), returning input as is", e);
            text.to_string()
        }
    }
}

/// The emitter holds no state between calls and can be shared freely.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeEmitter;

impl CodeEmitter {
    pub fn new() -> Self {
        CodeEmitter
    }

    pub fn emit_program(&self, forms: &[Node]) -> String {
        forms
            .iter()
            .map(|form| self.emit(form))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn emit(&self, node: &Node) -> String {
        let mut out = String::new();
        self.write(node, &mut out);
        out
    }

    fn write(&self, node: &Node, out: &mut String) {
        match node {
            Node::List { value } => self.write_sequence("(", value, ")", out),
            Node::Vector { value } => self.write_sequence("[", value, "]", out),
            Node::Set { value } => self.write_sequence("#{", value, "}", out),
            Node::AnonymousFunction { value } => self.write_sequence("#(", value, ")", out),
            Node::Map { value } => self.write_map(value, out),
            Node::Symbol { value, .. } | Node::Keyword { value } | Node::Ratio { value } => {
                out.push_str(value)
            }
            Node::Number { value } => out.push_str(&value.to_string()),
            Node::String { value } => self.write_string(value, out),
            Node::Character { value } => {
                out.push('\\');
                out.push_str(value);
            }
            Node::Boolean { value } => out.push_str(if *value { "true" } else { "false" }),
            Node::Nil => out.push_str("nil"),
            Node::Regex { value } => {
                out.push_str("#\"");
                out.push_str(value);
                out.push('"');
            }
            Node::Quote { value } => self.write_prefixed("'", value, out),
            Node::SyntaxQuote { value } => self.write_prefixed("`", value, out),
            Node::Unquote { value } => self.write_prefixed("~", value, out),
            Node::UnquoteSplicing { value } => self.write_prefixed("~@", value, out),
            Node::Deref { value } => self.write_prefixed("@", value, out),
            Node::VarQuote { value } => self.write_prefixed("#'", value, out),
            Node::Discard { value } => self.write_prefixed("#_", value, out),
            Node::Meta { value } => {
                let (metadata, inner) = value.as_ref();
                self.write_prefixed("^", metadata, out);
                out.push(' ');
                self.write(inner, out);
            }
            Node::TaggedLiteral { tag, value } => {
                out.push('#');
                out.push_str(tag);
                out.push(' ');
                self.write(value, out);
            }
            Node::Unrecognized { kind, value } => {
                log::warn!("Unknown AST node type: {}", kind);
                self.write_payload(value, out)
            }
        }
    }

    fn write_sequence(&self, open: &str, elements: &[Node], close: &str, out: &mut String) {
        out.push_str(open);
        self.write_spaced(elements.iter(), out);
        out.push_str(close);
    }

    fn write_map(&self, entries: &[MapEntry], out: &mut String) {
        out.push('{');
        self.write_spaced(
            entries.iter().flat_map(|entry| vec![&entry.key, &entry.value]),
            out,
        );
        out.push('}');
    }

    fn write_spaced<'a, I>(&self, nodes: I, out: &mut String)
    where
        I: Iterator<Item = &'a Node>,
    {
        for (index, node) in nodes.enumerate() {
            if index > 0 {
                out.push(' ');
            }
            self.write(node, out);
        }
    }

    #[inline]
    fn write_prefixed(&self, prefix: &str, node: &Node, out: &mut String) {
        out.push_str(prefix);
        self.write(node, out);
    }

    // backslash first, so the escapes inserted afterwards are not escaped again
    fn write_string(&self, s: &str, out: &mut String) {
        out.push('"');

        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }

        out.push('"');
    }

    // best effort for kinds this crate does not know
    fn write_payload(&self, payload: &Payload, out: &mut String) {
        match payload {
            Payload::Nodes(nodes) => self.write_spaced(nodes.iter(), out),
            Payload::Other(serde_json::Value::Null) => (),
            Payload::Other(serde_json::Value::String(s)) => out.push_str(s),
            Payload::Other(other) => out.push_str(&other.to_string()),
        }
    }
}
