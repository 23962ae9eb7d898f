#![allow(dead_code)]

use babble::analyzer::{self, AnalysisResult};
pub use babble::analyzer::Status;
use babble::ast::{Node, SymbolType};
use babble::emitter;
use babble::reader;
pub use matches::assert_matches;

pub fn analyze_code(code: &str) -> AnalysisResult {
    analyzer::analyze(reader::read(code).unwrap())
}

pub fn assert_status(code: &str, expected: Status) {
    let result = analyze_code(code);
    assert_eq!(
        result.status, expected,
        "analyzing {:?} gave {:?}",
        code, result.message
    )
}

pub fn assert_error(code: &str, message: &str) {
    let result = analyze_code(code);

    assert_eq!(result.status, Status::Error, "expected an error for {:?}", code);
    assert!(
        result.errors.iter().any(|e| e.contains(message)),
        "expected an error containing {:?}, got {:?}",
        message,
        result.errors
    )
}

/// Every annotated symbol occurrence in source order.
pub fn annotations(forms: &[Node]) -> Vec<(String, SymbolType)> {
    let mut found = vec![];
    for form in forms {
        collect_annotations(form, &mut found);
    }
    found
}

fn collect_annotations(node: &Node, found: &mut Vec<(String, SymbolType)>) {
    if let (Some(name), Some(symbol_type)) = (node.as_symbol(), node.symbol_type()) {
        found.push((name.to_string(), symbol_type));
    }
    for child in node.children() {
        collect_annotations(child, found);
    }
}

pub fn reformat(code: &str) -> String {
    emitter::ast_to_code(&reader::read(code).unwrap())
}
