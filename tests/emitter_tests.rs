mod helpers;

use babble::ast::{json, Node};
use babble::{ast_to_code, json_to_code, node_to_code};
use helpers::*;

#[test]
fn test_canonical_source_is_unchanged() {
    for code in &[
        "(+ 1 2 3)",
        "(let [x 5] (* x x))",
        "{:name \"Alice\" :age 30}",
        "(defn square [x] (* x x))",
        "[1 2 3]",
        "(defn add ([x] x) ([x y] (+ x y)))",
        "(loop [i 0 acc []] (if (< i 3) (recur (inc i) (conj acc i)) acc))",
        "#{:a :b}",
        "(map #(* % %2) xs ys)",
        "(swap! counter inc)\n@counter",
        "(def ^:private secret \"s3cr3t\")",
        "#inst \"2024-01-01T00:00:00Z\"",
    ] {
        assert_eq!(&reformat(code), code);
    }
}

#[test]
fn test_formatting_normalizes_layout() {
    assert_eq!(reformat("(+   1\n  2)"), "(+ 1 2)");
    assert_eq!(reformat("[1, 2, 3]"), "[1 2 3]");
    assert_eq!(reformat("; comment\n(inc 1) ; trailing"), "(inc 1)");
    assert_eq!(reformat("(a)   (b)"), "(a)\n(b)");
    assert_eq!(reformat(""), "");
}

#[test]
fn test_reparse_keeps_top_level_length() {
    for code in &[
        "(def x 10) (def y 20) (+ x y)",
        "'(1 2) `(a ~b) #'inc #_ignored (str \\a \\space)",
        "1/2 -7 3.5 nil true false :k ::k \"a\\tb\"",
    ] {
        let forms = babble::reader::read(code).unwrap();
        let reparsed = babble::reader::read(&ast_to_code(&forms)).unwrap();

        assert_eq!(forms.len(), reparsed.len(), "while re-reading {:?}", code);
        assert_eq!(forms, reparsed);
    }
}

#[test]
fn test_json_input() {
    let forms = babble::reader::read("(defn square [x] (* x x))").unwrap();
    let text = json::to_string(&forms).unwrap();

    assert_eq!(json_to_code(&text), "(defn square [x] (* x x))");
}

#[test]
fn test_json_input_with_aliases() {
    let text = r#"{"type": "list", "value": [
        {"type": "symbol", "value": "str"},
        {"type": "StringLiteral", "value": "n = "},
        {"type": "FloatLiteral", "value": 1.5},
        {"type": "BooleanLiteral", "value": true},
        {"type": "with-meta", "value": [{"type": "keyword", "value": ":tag"}, {"type": "symbol", "value": "v"}]},
        {"type": "var", "value": {"type": "symbol", "value": "inc"}},
        {"type": "fn", "value": [{"type": "symbol", "value": "inc"}, {"type": "symbol", "value": "%"}]}]}"#;

    assert_eq!(
        json_to_code(text),
        "(str \"n = \" 1.5 true ^:tag v #'inc #(inc %))"
    );
}

#[test]
fn test_invalid_json_is_returned_unchanged() {
    assert_eq!(json_to_code("not json at all"), "not json at all");
    assert_eq!(json_to_code("{\"type\": 42}"), "{\"type\": 42}");
}

#[test]
fn test_analyzed_tree_renders_like_the_source() {
    let code = "(defn greet [name] (println \"Hello,\" name))";
    let result = analyze_code(code);

    assert_eq!(result.status, Status::Success);
    assert_eq!(ast_to_code(&result.ast), code);
}

#[test]
fn test_escapes() {
    assert_eq!(
        node_to_code(&Node::string("line\nnext \"quoted\" C:\\dir")),
        r#""line\nnext \"quoted\" C:\\dir""#
    );
}
