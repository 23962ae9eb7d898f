use rustc_hash::FxHashSet;

use crate::ast::Node;

use super::special::Arity;
use super::{Analyzer, Context};

/// Names bound inside `#(...)`
pub const ANONYMOUS_ARGUMENTS: &[&str] = &["%", "%1", "%2", "%3", "%&"];

/// Named definitions (`defn`, `define`) are checked more strictly than `fn` literals:
/// every parameter must be a symbol and every clause needs a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Definition,
    Lambda,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub names: Vec<String>,
    pub arity: Arity,
}

impl Analyzer {
    /// ```grammar
    /// (fn <name>? [<param>*] <body>*)
    /// (fn <name>? ([<param>*] <body>*)+)
    /// ```
    pub(crate) fn analyze_fn(&mut self, operator: &str, elements: &mut [Node], ctx: &Context) {
        let args = &mut elements[1..];
        let self_name = match args.first() {
            Some(first) => first.as_symbol().map(String::from),
            None => {
                return self.error(format!(
                    "'{}' requires at least a parameter vector, got 0 arguments",
                    operator
                ))
            }
        };

        let offset = if self_name.is_some() { 1 } else { 0 };
        let rest = &mut args[offset..];
        if rest.is_empty() {
            return self.error(format!("'{}' requires a parameter vector", operator));
        }

        // fn is always a recur target
        let scope = ctx
            .nested()
            .with_loop(true)
            .with_bindings(self_name.clone());
        let self_name = self_name.as_deref();

        if rest[0].is_vector() {
            self.analyze_clause(operator, FunctionKind::Lambda, self_name, rest, &scope, false);
        } else if rest[0].is_list() {
            self.analyze_arity_clauses(operator, FunctionKind::Lambda, self_name, rest, &scope);
        } else {
            let kind = rest[0].kind().to_string();
            self.error(format!(
                "'{}' parameter list must be a vector, got {}",
                operator, kind
            ));
        }
    }

    /// `#(...)`, an implicit function of `%`, `%1` .. `%3` and `%&`
    pub(crate) fn analyze_anonymous_function(&mut self, elements: &mut [Node], ctx: &Context) {
        let scope = ctx
            .nested()
            .with_loop(true)
            .with_bindings(ANONYMOUS_ARGUMENTS.iter().copied());

        self.analyze_all(elements, &scope)
    }

    /// Analyze one clause, a parameter vector followed by the body, and return its arity.
    /// `self_name` is the name of a named `fn`, no parameter may reuse it.
    pub(crate) fn analyze_clause(
        &mut self,
        operator: &str,
        kind: FunctionKind,
        self_name: Option<&str>,
        clause: &mut [Node],
        scope: &Context,
        multi_arity: bool,
    ) -> Option<Arity> {
        let (params, body) = match clause.split_first_mut() {
            Some((Node::Vector { value }, body)) => (value, body),
            _ => return None,
        };
        let parameters = self.collect_parameters(params, kind, self_name);

        if kind == FunctionKind::Definition && body.is_empty() {
            if multi_arity {
                self.error(format!(
                    "'{}' arity clause requires at least one body expression",
                    operator
                ));
            } else {
                self.error(format!(
                    "'{}' requires at least one body expression",
                    operator
                ));
            }
            return Some(parameters.arity);
        }

        let body_scope = scope.with_bindings(parameters.names);
        self.analyze_all(body, &body_scope);
        Some(parameters.arity)
    }

    /// ```grammar
    /// ([<param>*] <body>*)+
    /// ```
    pub(crate) fn analyze_arity_clauses(
        &mut self,
        operator: &str,
        kind: FunctionKind,
        self_name: Option<&str>,
        clauses: &mut [Node],
        scope: &Context,
    ) {
        let mut arities = FxHashSet::default();

        for clause in clauses.iter_mut() {
            let elements = match clause {
                Node::List { value } => value,
                other => {
                    let kind = other.kind().to_string();
                    self.error(format!(
                        "'{}' arity clause must be a list, got {}",
                        operator, kind
                    ));
                    continue;
                }
            };

            if !matches!(elements.first(), Some(Node::Vector { .. })) {
                self.error(format!(
                    "'{}' arity clause must start with a parameter vector",
                    operator
                ));
                continue;
            }

            if let Some(arity) = self.analyze_clause(operator, kind, self_name, elements, scope, true) {
                if !arities.insert(arity) {
                    self.error(format!(
                        "'{}' has a duplicate arity clause for {}",
                        operator, arity
                    ));
                }
            }
        }
    }

    /// Collect the names of a parameter vector. `&`, or any keyword in its place, marks the
    /// rest parameter.
    pub(crate) fn collect_parameters(
        &mut self,
        params: &[Node],
        kind: FunctionKind,
        self_name: Option<&str>,
    ) -> Parameters {
        let mut names: Vec<String> = Vec::with_capacity(params.len());
        let mut required = 0;
        let mut variadic = false;

        for param in params {
            match param {
                Node::Symbol { value, .. } if value == "&" => variadic = true,
                Node::Symbol { value, .. } => {
                    if names.contains(value) || self_name == Some(value.as_str()) {
                        self.error(format!("Duplicate parameter name: {}", value));
                    } else {
                        names.push(value.clone());
                    }
                    if !variadic {
                        required += 1;
                    }
                }
                // some readers produce the rest marker as a keyword
                Node::Keyword { .. } => variadic = true,
                other => {
                    if kind == FunctionKind::Definition {
                        self.error(format!("Parameter must be a symbol, got {}", other.kind()));
                    } else if !variadic {
                        required += 1;
                    }
                }
            }
        }

        let arity = if variadic {
            Arity::AtLeast(required)
        } else {
            Arity::Exactly(required)
        };

        Parameters { names, arity }
    }
}
