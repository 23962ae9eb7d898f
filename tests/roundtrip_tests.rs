use babble::analyzer;
use babble::ast::Node;
use babble::reader;
use babble::{ast_to_code, json_to_code};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

const SYMBOLS: &[&str] = &[
    "x", "y", "+", "map", "my-fn", "a.b/c", "empty?", "->thing", "*ns*", "swap!",
];
const KEYWORDS: &[&str] = &[":a", ":name", "::local", ":b/c"];
const CHARACTERS: &[&str] = &["a", "Z", "space", "newline", "tab", "u00e9"];
const TAGS: &[&str] = &["inst", "uuid", "my.ns/tag"];

/// A program the reader could have produced.
#[derive(Debug, Clone)]
struct Program(Vec<Node>);

impl Arbitrary for Program {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 4;
        Program((0..len).map(|_| arbitrary_node(g, 3)).collect())
    }
}

fn pick(g: &mut Gen, items: &[&'static str]) -> &'static str {
    g.choose(items).copied().unwrap_or(items[0])
}

fn children(g: &mut Gen, depth: usize) -> Vec<Node> {
    let len = usize::arbitrary(g) % 4;
    (0..len).map(|_| arbitrary_node(g, depth - 1)).collect()
}

fn arbitrary_node(g: &mut Gen, depth: usize) -> Node {
    let choice = u8::arbitrary(g) % if depth == 0 { 8 } else { 21 };

    match choice {
        0 => Node::symbol(pick(g, SYMBOLS)),
        1 => Node::keyword(pick(g, KEYWORDS)),
        2 => Node::number(i64::arbitrary(g)),
        3 => Node::number(f64::from(i32::arbitrary(g)) / 4.0),
        4 => Node::string(String::arbitrary(g)),
        5 => Node::boolean(bool::arbitrary(g)),
        6 => Node::nil(),
        7 => Node::character(pick(g, CHARACTERS)),
        8 => Node::list(children(g, depth)),
        9 => Node::vector(children(g, depth)),
        10 => Node::set(children(g, depth)),
        11 => {
            let len = usize::arbitrary(g) % 3;
            Node::map(
                (0..len)
                    .map(|_| (arbitrary_node(g, depth - 1), arbitrary_node(g, depth - 1)))
                    .collect::<Vec<_>>(),
            )
        }
        12 => Node::quote(arbitrary_node(g, depth - 1)),
        13 => Node::syntax_quote(arbitrary_node(g, depth - 1)),
        // `~@x` would read back as unquote-splicing
        14 => match arbitrary_node(g, depth - 1) {
            deref @ Node::Deref { .. } => Node::unquote(Node::list(vec![deref])),
            other => Node::unquote(other),
        },
        15 => Node::unquote_splicing(arbitrary_node(g, depth - 1)),
        16 => Node::deref(arbitrary_node(g, depth - 1)),
        17 => Node::var_quote(Node::symbol(pick(g, SYMBOLS))),
        18 => Node::meta(
            Node::keyword(pick(g, KEYWORDS)),
            arbitrary_node(g, depth - 1),
        ),
        19 => Node::tagged_literal(pick(g, TAGS), arbitrary_node(g, depth - 1)),
        _ => Node::anonymous_function(children(g, depth)),
    }
}

#[quickcheck]
fn prop_emitted_code_reads_back(program: Program) -> bool {
    let code = ast_to_code(&program.0);

    match reader::read(&code) {
        Ok(forms) => forms == program.0,
        Err(e) => {
            eprintln!("failed to read {:?}: {}", code, e);
            false
        }
    }
}

#[quickcheck]
fn prop_emitting_is_stable(program: Program) -> bool {
    let once = ast_to_code(&program.0);
    let twice = ast_to_code(&reader::read(&once).unwrap_or_default());

    once == twice
}

#[quickcheck]
fn prop_json_and_tree_render_alike(program: Program) -> bool {
    let text = serde_json::to_string(&program.0).unwrap_or_default();

    json_to_code(&text) == ast_to_code(&program.0)
}

#[quickcheck]
fn prop_analysis_is_idempotent(program: Program) -> bool {
    let first = analyzer::analyze(program.0);
    let second = analyzer::analyze(first.ast.clone());

    first.status == second.status && first.symbols == second.symbols
}

#[quickcheck]
fn prop_analysis_does_not_change_rendering(program: Program) -> bool {
    let before = ast_to_code(&program.0);
    let result = analyzer::analyze(program.0);

    ast_to_code(&result.ast) == before
}
