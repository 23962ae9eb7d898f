use crate::ast::Node;

use super::{Analyzer, Context};

impl Analyzer {
    /// ```grammar
    /// (if <test> <consequent> <alternative>?)
    /// ```
    pub(crate) fn analyze_if(&mut self, operator: &str, elements: &mut [Node], ctx: &Context) {
        let argc = elements.len() - 1;

        if !(2..=3).contains(&argc) {
            return self.error(format!(
                "'{}' requires 2 or 3 arguments (test, then, optional else), got {}",
                operator, argc
            ));
        }

        self.analyze_all(&mut elements[1..], &ctx.nested())
    }

    pub(crate) fn analyze_do(&mut self, elements: &mut [Node], ctx: &Context) {
        self.analyze_all(&mut elements[1..], &ctx.nested())
    }

    /// `recur` jumps back to the closest `loop` or `fn`. The operands are analyzed
    /// either way.
    pub(crate) fn analyze_recur(&mut self, elements: &mut [Node], ctx: &Context) {
        if !ctx.is_in_loop() {
            self.error("'recur' can only be used inside 'loop', 'fn', or 'defn'");
        }

        self.analyze_all(&mut elements[1..], &ctx.nested())
    }

    /// `(var <symbol>)` names a var, the symbol is not a reference.
    pub(crate) fn analyze_var(&mut self, operator: &str, elements: &mut [Node]) {
        if elements.len() != 2 {
            self.error(format!(
                "'{}' requires exactly 1 argument, got {}",
                operator,
                elements.len() - 1
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::tests::*;
    use crate::analyzer::Status;

    #[test]
    fn test_if() {
        assert_eq!(analyze_source("(if true 1)").status, Status::Success);
        assert_eq!(analyze_source("(if (empty? xs) 0 (count xs))").status, Status::Success);
        assert_error_contains("(if 1)", "'if' requires 2 or 3 arguments (test, then, optional else), got 1");
        assert_error_contains("(if 1 2 3 4)", "got 4");
    }

    #[test]
    fn test_if_arity_error_stops_descent() {
        let result = analyze_source("(if unknown-thing)");

        assert_eq!(result.status, Status::Error);
        assert!(result.symbols.is_empty());
    }

    #[test]
    fn test_do() {
        let result = analyze_source("(do)");
        assert_eq!(result.status, Status::Success);

        let result = analyze_source("(do (println \"a\") (frob))");
        assert_eq!(result.status, Status::Success);
        assert_eq!(result.symbols.unknowns.to_vec(), vec!["frob"]);
    }

    #[test]
    fn test_recur_outside_loop() {
        let result = analyze_source("(recur x)");

        assert_eq!(result.status, Status::Error);
        assert_eq!(
            result.message,
            "'recur' can only be used inside 'loop', 'fn', or 'defn'"
        );
        // operands are still classified
        assert!(result.symbols.unknowns.contains("x"));
    }

    #[test]
    fn test_var() {
        assert_eq!(analyze_source("(var inc)").status, Status::Success);
        assert_error_contains("(var)", "'var' requires exactly 1 argument, got 0");
        assert_error_contains("(var a b)", "'var' requires exactly 1 argument, got 2");
        assert!(analyze_source("(var frob)").symbols.is_empty());
    }

    #[test]
    fn test_quote_is_data() {
        let result = analyze_source("(quote (frob 1 2))");

        assert_eq!(result.status, Status::Success);
        assert!(result.symbols.is_empty());
    }
}
