use crate::ast::Node;

use super::{Analyzer, Context};

impl Analyzer {
    /// `let`, `let*` and `loop`
    ///
    /// ```grammar
    /// (let [<name> <value>]* <body>*)
    /// ```
    ///
    /// Each value sees the names bound before it. The body sees all of them.
    /// The body of a `loop` is a recur target.
    pub(crate) fn analyze_bindings(
        &mut self,
        operator: &str,
        elements: &mut [Node],
        ctx: &Context,
        is_loop: bool,
    ) {
        if elements.len() < 2 {
            return self.error(format!(
                "'{}' requires at least a binding vector, got {} arguments",
                operator,
                elements.len() - 1
            ));
        }

        let (head, body) = elements.split_at_mut(2);
        let bindings = match &mut head[1] {
            Node::Vector { value } => value,
            other => {
                let kind = other.kind().to_string();
                return self.error(format!(
                    "'{}' bindings must be a vector, got {}",
                    operator, kind
                ));
            }
        };

        if bindings.len() % 2 != 0 {
            return self.error(format!(
                "'{}' bindings must have an even number of forms (pairs of name and value)",
                operator
            ));
        }

        let mut scope = ctx.nested();
        for pair in bindings.chunks_mut(2) {
            let name = match pair[0].as_symbol() {
                Some(name) => name.to_string(),
                None => {
                    let kind = pair[0].kind().to_string();
                    self.error(format!(
                        "'{}' binding name must be a symbol, got {}",
                        operator, kind
                    ));
                    continue;
                }
            };

            self.analyze_form(&mut pair[1], &scope);
            scope = scope.with_binding(name);
        }

        if is_loop {
            scope = scope.with_loop(true);
        }

        self.analyze_all(body, &scope)
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::tests::*;
    use crate::analyzer::Status;
    use crate::ast::SymbolType;

    #[test]
    fn test_let_binds_names_in_body() {
        let result = analyze_source("(let [x 5] x)");

        assert_eq!(result.status, Status::Success);
        assert_eq!(find_symbol(&result.ast, "x"), Some(SymbolType::Local));
        assert_eq!(result.symbols.locally_defined.to_vec(), vec!["x"]);
    }

    #[test]
    fn test_bindings_are_sequential() {
        let result = analyze_source("(let [a 1 b (inc a)] (+ a b))");

        assert_eq!(result.status, Status::Success);
        assert!(result.symbols.unknowns.is_empty());
    }

    #[test]
    fn test_forward_references_are_unknown() {
        let result = analyze_source("(let [a b b 1] a)");

        assert_eq!(result.status, Status::Success);
        assert_eq!(result.symbols.unknowns.to_vec(), vec!["b"]);
        assert_eq!(result.symbols.locally_defined.to_vec(), vec!["a"]);
    }

    #[test]
    fn test_bindings_do_not_leak() {
        let result = analyze_source("(do (let [x 1] x) x)");

        assert!(result.symbols.locally_defined.contains("x"));
        assert!(result.symbols.unknowns.contains("x"));
    }

    #[test]
    fn test_let_star_keeps_operator_name() {
        assert_eq!(analyze_source("(let* [x 1] x)").status, Status::Success);
        assert_error_contains("(let* (x 1) x)", "'let*' bindings must be a vector, got list");
    }

    #[test]
    fn test_binding_shape_errors() {
        assert_error_contains("(let)", "'let' requires at least a binding vector, got 0 arguments");
        assert_error_contains("(let [x] x)", "'let' bindings must have an even number of forms");
        assert_error_contains("(let [1 2] 3)", "'let' binding name must be a symbol, got number");
        assert_error_contains("(loop [x 1 y] x)", "'loop' bindings must have an even number of forms");
    }

    #[test]
    fn test_bad_binding_name_does_not_stop_other_bindings() {
        let result = analyze_source("(let [1 2 y 3] (+ y z))");

        assert_eq!(result.status, Status::Error);
        assert_eq!(result.errors.len(), 1);
        assert!(result.symbols.locally_defined.contains("y"));
        assert!(result.symbols.unknowns.contains("z"));
    }

    #[test]
    fn test_loop_is_a_recur_target() {
        assert_eq!(
            analyze_source("(loop [i 0] (if (< i 10) (recur (inc i)) i))").status,
            Status::Success
        );
        assert_error_contains("(let [i 0] (recur i))", "'recur' can only be used inside");
    }

    #[test]
    fn test_recur_in_binding_value_of_loop_is_rejected() {
        assert_error_contains("(loop [x (recur 1)] x)", "'recur' can only be used inside");
    }
}
