// Semantic analyzer
//
// Walks the forms of a program, checks the structure of every special form, tracks
// lexical scope and classifies each symbol occurrence as local, builtin or unknown.
// Problems are collected as diagnostics instead of being raised, so one pass reports
// everything that is wrong with a program.

pub mod binding;
pub mod builtins;
pub mod context;
pub mod control;
pub mod definition;
pub mod function;
pub mod result;
pub mod special;
pub mod symbols;

use crate::ast::{Node, SymbolType};
use crate::emitter;
pub use context::Context;
pub use result::{AnalysisResult, Status};
pub use special::SpecialForm;
pub use symbols::{SymbolInfo, SymbolSet};

/// Analyze a single form or a whole program.
///
/// Every top-level form is analyzed with a fresh top-level context. The forms are
/// annotated in place and handed back in `AnalysisResult::ast`.
pub fn analyze<A: Into<Vec<Node>>>(ast: A) -> AnalysisResult {
    let mut forms = ast.into();
    let mut analyzer = Analyzer::new();

    analyzer.analyze_program(&mut forms);
    analyzer.finish(forms)
}

#[derive(Debug, Default)]
pub struct Analyzer {
    errors: Vec<String>,
    warnings: Vec<String>,
    symbols: SymbolInfo,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze_program(&mut self, forms: &mut [Node]) {
        for (index, form) in forms.iter_mut().enumerate() {
            log::debug!("analyzing top-level form #{}", index);
            self.analyze_form(form, &Context::top_level());
        }
    }

    /// Turn the collected diagnostics into the final result.
    pub fn finish(self, ast: Vec<Node>) -> AnalysisResult {
        AnalysisResult::new(self.errors, self.warnings, ast, self.symbols)
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn symbols(&self) -> &SymbolInfo {
        &self.symbols
    }

    pub fn analyze_form(&mut self, node: &mut Node, ctx: &Context) {
        log::trace!("analyze {} (top level: {})", node.kind(), ctx.is_top_level());

        #[cfg(feature = "debug_analyzer")]
        log::trace!(
            "bound names: {:?}, in definition: {}, in loop: {}",
            ctx.bound_names().collect::<Vec<_>>(),
            ctx.is_in_definition(),
            ctx.is_in_loop()
        );

        match node {
            Node::List { value } => self.analyze_list(value, ctx),
            Node::Vector { value } => self.analyze_all(value, &ctx.nested()),
            Node::Map { value } => {
                let nested = ctx.nested();
                for entry in value.iter_mut() {
                    self.analyze_form(&mut entry.key, &nested);
                    self.analyze_form(&mut entry.value, &nested);
                }
            }
            Node::Set { value } => self.analyze_set(value, ctx),
            Node::AnonymousFunction { value } => self.analyze_anonymous_function(value, ctx),
            Node::Symbol { value, symbol_type } => self.classify_symbol(value, symbol_type, ctx),

            // quoted forms are data
            Node::Quote { .. } | Node::SyntaxQuote { .. } => (),

            // nothing quasi-quotes into an unquote, the reader only produces them as data
            Node::Unquote { value } => {
                self.error("unquote used outside of syntax-quote");
                self.analyze_form(value, ctx);
            }
            Node::UnquoteSplicing { value } => {
                self.error("unquote-splicing used outside of syntax-quote");
                self.analyze_form(value, ctx);
            }
            Node::Deref { value } | Node::VarQuote { value } | Node::TaggedLiteral { value, .. } => {
                self.analyze_form(value, &ctx.nested())
            }
            Node::Meta { value } => {
                let (metadata, inner) = value.as_mut();
                self.analyze_form(metadata, &ctx.nested());
                self.analyze_form(inner, ctx);
            }
            Node::Discard { .. } => (),

            Node::Keyword { .. }
            | Node::Number { .. }
            | Node::String { .. }
            | Node::Character { .. }
            | Node::Boolean { .. }
            | Node::Nil
            | Node::Regex { .. }
            | Node::Ratio { .. } => (),

            Node::Unrecognized { kind, .. } => {
                let warning = format!("Unknown form type: {}", kind);
                self.warning(warning)
            }
        }
    }

    fn analyze_list(&mut self, elements: &mut [Node], ctx: &Context) {
        let operator = match elements.first() {
            None => return,
            Some(Node::Symbol { value, .. }) => value.clone(),
            // a lambda or other expression in operator position
            Some(_) => return self.analyze_all(elements, &ctx.nested()),
        };

        match SpecialForm::from_name(&operator) {
            Some(special) if special.is_definition() && !ctx.is_top_level() => self.error(format!(
                "'{}' can only be used at the top level, not inside other forms",
                operator
            )),
            Some(special) => self.analyze_special(special, &operator, elements, ctx),
            None => self.analyze_all(elements, &ctx.nested()),
        }
    }

    fn analyze_special(
        &mut self,
        special: SpecialForm,
        operator: &str,
        elements: &mut [Node],
        ctx: &Context,
    ) {
        log::debug!("special form {:?} as '{}'", special, operator);

        match special {
            SpecialForm::Def => self.analyze_def(operator, elements, ctx),
            SpecialForm::Defn => self.analyze_defn(operator, elements, ctx),
            SpecialForm::Define => self.analyze_define(operator, elements, ctx),
            SpecialForm::Let => self.analyze_bindings(operator, elements, ctx, false),
            SpecialForm::Loop => self.analyze_bindings(operator, elements, ctx, true),
            SpecialForm::Fn => self.analyze_fn(operator, elements, ctx),
            SpecialForm::If => self.analyze_if(operator, elements, ctx),
            SpecialForm::Do => self.analyze_do(elements, ctx),
            SpecialForm::Recur => self.analyze_recur(elements, ctx),
            SpecialForm::Quote => (),
            SpecialForm::Var => self.analyze_var(operator, elements),
        }
    }

    fn analyze_set(&mut self, elements: &mut [Node], ctx: &Context) {
        for (index, element) in elements.iter().enumerate() {
            if elements[..index].iter().any(|seen| seen.same_form(element)) {
                let warning = format!("Duplicate value in set: {}", emitter::node_to_code(element));
                self.warning(warning);
            }
        }

        self.analyze_all(elements, &ctx.nested())
    }

    pub(crate) fn analyze_all(&mut self, nodes: &mut [Node], ctx: &Context) {
        for node in nodes.iter_mut() {
            self.analyze_form(node, ctx);
        }
    }

    fn classify_symbol(&mut self, name: &str, symbol_type: &mut Option<SymbolType>, ctx: &Context) {
        if symbols::is_special_token(name) {
            return;
        }

        let classification = if ctx.is_bound(name) {
            SymbolType::Local
        } else if builtins::is_builtin(name) {
            SymbolType::Builtin
        } else {
            SymbolType::Unknown
        };

        log::trace!("symbol {} is {}", name, classification);
        *symbol_type = Some(classification);
        self.symbols.record(name, classification);
    }

    pub(crate) fn error<S: Into<String>>(&mut self, message: S) {
        let message = message.into();
        log::debug!("error: {}", message);
        self.errors.push(message);
    }

    pub(crate) fn warning<S: Into<String>>(&mut self, message: S) {
        let message = message.into();
        log::debug!("warning: {}", message);
        self.warnings.push(message);
    }
}
