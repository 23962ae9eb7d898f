use crate::ast::Node;

use super::function::FunctionKind;
use super::{Analyzer, Context, SpecialForm};

/// Name introduced by a `def`, `defn` or `define` form, if `form` is one.
pub fn defined_name(form: &Node) -> Option<&str> {
    if !form.is_list() {
        return None;
    }

    let elements = form.elements()?;
    match SpecialForm::from_name(elements.first()?.as_symbol()?) {
        Some(special) if special.is_definition() => definition_name(elements.get(1)?),
        _ => None,
    }
}

/// The name of a definition, possibly carrying metadata as in `(def ^:private x 1)`.
fn definition_name(node: &Node) -> Option<&str> {
    match node {
        Node::Symbol { value, .. } => Some(value),
        Node::Meta { value } => value.1.as_symbol(),
        _ => None,
    }
}

impl Analyzer {
    /// ```grammar
    /// (def <name> <value>)
    /// (def <name> <docstring> <value>)
    /// ```
    pub(crate) fn analyze_def(&mut self, operator: &str, elements: &mut [Node], ctx: &Context) {
        let argc = elements.len() - 1;

        if argc < 2 {
            return self.error(format!(
                "'{}' requires at least 2 arguments (name and value), got {}",
                operator, argc
            ));
        }

        if argc > 3 {
            return self.error(format!(
                "'{}' accepts at most 3 arguments (name, docstring, value), got {}",
                operator, argc
            ));
        }

        if definition_name(&elements[1]).is_none() {
            let kind = elements[1].kind().to_string();
            return self.error(format!("'{}' name must be a symbol, got {}", operator, kind));
        }

        if argc == 3 && !elements[2].is_string() {
            let kind = elements[2].kind().to_string();
            return self.error(format!(
                "'{}' docstring must be a string, got {}",
                operator, kind
            ));
        }

        self.analyze_form(&mut elements[argc], &ctx.definition())
    }

    /// ```grammar
    /// (defn <name> <docstring>? <attr-map>? [<param>*] <body>+)
    /// (defn <name> <docstring>? <attr-map>? ([<param>*] <body>+)+)
    /// ```
    pub(crate) fn analyze_defn(&mut self, operator: &str, elements: &mut [Node], ctx: &Context) {
        let argc = elements.len() - 1;

        if argc < 2 {
            return self.error(format!(
                "'{}' requires at least 2 arguments (name and params), got {}",
                operator, argc
            ));
        }

        let name = match definition_name(&elements[1]) {
            Some(name) => name.to_string(),
            None => {
                let kind = elements[1].kind().to_string();
                return self.error(format!("'{}' name must be a symbol, got {}", operator, kind));
            }
        };

        let mut index = 2;
        if elements[index].is_string() {
            index += 1;
            if index >= elements.len() {
                return self.error(format!(
                    "'{}' with docstring requires parameter vector",
                    operator
                ));
            }
        }

        if matches!(elements[index], Node::Map { .. }) {
            index += 1;
            if index >= elements.len() {
                return self.error(format!(
                    "'{}' with metadata requires parameter vector",
                    operator
                ));
            }
        }

        // the function may call itself, but its body is not a recur target
        let scope = ctx.definition().with_loop(false).with_binding(name);
        let rest = &mut elements[index..];

        if rest[0].is_vector() {
            self.analyze_clause(operator, FunctionKind::Definition, None, rest, &scope, false);
        } else if rest[0].is_list() {
            self.analyze_arity_clauses(operator, FunctionKind::Definition, None, rest, &scope);
        } else {
            let kind = rest[0].kind().to_string();
            self.error(format!(
                "'{}' parameter list must be a vector, got {}",
                operator, kind
            ));
        }
    }

    /// `define` names a function when a parameter vector or an arity clause follows the
    /// name (and optional docstring), and a value otherwise.
    pub(crate) fn analyze_define(&mut self, operator: &str, elements: &mut [Node], ctx: &Context) {
        let mut index = 2;
        if elements.get(index).map_or(false, Node::is_string) && elements.len() > index + 1 {
            index += 1;
        }

        let names_function = match elements.get(index) {
            Some(Node::Vector { .. }) => true,
            Some(Node::List { value }) => matches!(value.first(), Some(Node::Vector { .. })),
            _ => false,
        };

        if names_function {
            self.analyze_defn(operator, elements, ctx)
        } else {
            self.analyze_def(operator, elements, ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::defined_name;
    use crate::analyzer::tests::*;
    use crate::analyzer::Status;
    use crate::ast::SymbolType;
    use crate::reader;

    #[test]
    fn test_defined_name() {
        let forms = reader::read(
            "(def x 1) (defn ^:private f [] 1) (define (g) 2) (let [y 1] y) [def z 1]",
        )
        .unwrap();
        let names: Vec<_> = forms.iter().map(defined_name).collect();

        assert_eq!(names, vec![Some("x"), Some("f"), None, None, None]);
    }

    #[test]
    fn test_def() {
        assert_eq!(analyze_source("(def x 42)").status, Status::Success);
        assert_eq!(analyze_source("(def x \"my variable\" 42)").status, Status::Success);
        assert_eq!(analyze_source("(def ^:private x 42)").status, Status::Success);
    }

    #[test]
    fn test_def_arity() {
        assert_error_contains("(def x)", "requires at least 2 arguments");
        assert_error_contains("(def)", "'def' requires at least 2 arguments (name and value), got 0");
        assert_error_contains("(def x \"doc\" 42 extra)", "accepts at most 3 arguments");
    }

    #[test]
    fn test_def_shape() {
        assert_error_contains("(def x 123 42)", "docstring must be a string");
        assert_error_contains("(def \"x\" 42)", "'def' name must be a symbol, got string");
    }

    #[test]
    fn test_def_value_is_analyzed_in_definition() {
        let result = analyze_source("(def total (reduce + items))");

        assert_eq!(result.status, Status::Success);
        assert_eq!(result.symbols.built_ins.to_vec(), vec!["reduce", "+"]);
        assert_eq!(result.symbols.unknowns.to_vec(), vec!["items"]);
        // the defined name is not a reference
        assert!(!result.symbols.unknowns.contains("total"));
    }

    #[test]
    fn test_definitions_only_at_top_level() {
        for source in &[
            "(let [] (def x 42))",
            "(let [] (defn foo [x] x))",
            "(let [] (define x 42))",
            "(do (def y 1))",
            "[(defn f [] 1)]",
            "(fn [] (def z 2))",
        ] {
            assert_error_contains(source, "can only be used at the top level");
        }
    }

    #[test]
    fn test_defn() {
        for source in &[
            "(defn square [x] (* x x))",
            "(defn square \"Squares a number\" [x] (* x x))",
            "(defn square \"Squares a number\" {:added \"1.0\"} [x] (* x x))",
            "(defn add ([x] x) ([x y] (+ x y)) ([x y z] (+ x y z)))",
            "(defn add \"Adds numbers\" ([x] x) ([x y] (+ x y)))",
            "(defn variadic ([x] x) ([x & more] (reduce + x more)))",
        ] {
            assert_eq!(analyze_source(source).status, Status::Success, "{}", source);
        }
    }

    #[test]
    fn test_defn_shape_errors() {
        assert_error_contains("(defn foo)", "requires at least 2 arguments");
        assert_error_contains("(defn foo [x])", "requires at least one body expression");
        assert_error_contains("(defn foo (x y) (+ x y))", "arity clause must start with a parameter vector");
        assert_error_contains("(defn foo 42 x)", "'defn' parameter list must be a vector, got number");
        assert_error_contains("(defn foo \"doc\")", "'defn' with docstring requires parameter vector");
        assert_error_contains("(defn foo {:a 1})", "'defn' with metadata requires parameter vector");
        assert_error_contains("(defn 3 [x] x)", "'defn' name must be a symbol, got number");
    }

    #[test]
    fn test_defn_parameter_errors() {
        assert_error_contains("(defn foo [x x] x)", "Duplicate parameter name: x");
        assert_error_contains("(defn foo [x 1] x)", "Parameter must be a symbol, got number");
    }

    #[test]
    fn test_defn_duplicate_arity() {
        assert_error_contains(
            "(defn add ([x y] (+ x y)) ([a b] (* a b)))",
            "duplicate arity",
        );
        assert_error_contains(
            "(defn f ([x] x) [y] y)",
            "'defn' arity clause must be a list, got vector",
        );
        assert_error_contains("(defn f ([x]) ([x y] x))", "arity clause requires at least one body expression");
    }

    #[test]
    fn test_defn_binds_parameters_and_its_own_name() {
        let result = analyze_source("(defn fact [n] (if (<= n 1) 1 (* n (fact (dec n)))))");

        assert_eq!(result.status, Status::Success);
        assert_eq!(result.symbols.locally_defined.to_vec(), vec!["n", "fact"]);
        assert!(result.symbols.unknowns.is_empty());
        assert_eq!(find_symbol(&result.ast, "fact"), Some(SymbolType::Local));
    }

    #[test]
    fn test_defn_body_is_not_a_recur_target() {
        assert_error_contains(
            "(defn countdown [n] (recur (dec n)))",
            "'recur' can only be used inside 'loop', 'fn', or 'defn'",
        );
        assert_eq!(
            analyze_source("(defn countdown [n] (loop [i n] (recur (dec i))))").status,
            Status::Success
        );
    }

    #[test]
    fn test_define() {
        for source in &[
            "(define x 42)",
            "(define x \"my variable\" 42)",
            "(define square [x] (* x x))",
            "(define square \"Squares a number\" [x] (* x x))",
            "(define add ([x] x) ([x y] (+ x y)))",
            "(define total (+ 1 2))",
            "(define greeting \"hello\")",
        ] {
            assert_eq!(analyze_source(source).status, Status::Success, "{}", source);
        }
    }

    #[test]
    fn test_define_keeps_its_name_in_errors() {
        assert_error_contains("(define x)", "'define' requires at least 2 arguments");
        assert_error_contains("(define f [x])", "'define' requires at least one body expression");
        assert_error_contains("(define f ([x] x) ([y] y))", "'define' has a duplicate arity clause");
    }
}
