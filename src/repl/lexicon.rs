use crate::analyzer::definition;
use crate::analyzer::AnalysisResult;
use crate::ast::Node;
use crate::emitter;
use rustc_hash::FxHashMap;

/// Terms defined during a session, each with the form that defined it.
///
/// A term is defined once. Forms only enter the lexicon after they passed analysis.
#[derive(Debug, Default)]
pub struct Lexicon {
    names: Vec<String>,
    forms: FxHashMap<String, Node>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defined names, oldest first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn definition(&self, name: &str) -> Option<&Node> {
        self.forms.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.forms.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// One error for every form of `forms` that defines a term defined before, in the
    /// session or earlier in `forms`.
    pub fn redefinitions(&self, forms: &[Node]) -> Vec<String> {
        let mut pending: FxHashMap<&str, &Node> = FxHashMap::default();
        let mut errors = Vec::new();

        for form in forms {
            let name = match definition::defined_name(form) {
                Some(name) => name,
                None => continue,
            };

            match self.definition(name).or_else(|| pending.get(name).copied()) {
                Some(old) => errors.push(format!(
                    "The term {} already has a definition: {}",
                    name,
                    emitter::node_to_code(old)
                )),
                None => {
                    pending.insert(name, form);
                }
            }
        }

        errors
    }

    /// Add the definitions of an analyzed program. Nothing is added when the analysis
    /// failed or a term would be redefined; the returned errors say why.
    pub fn record(&mut self, result: &AnalysisResult) -> Vec<String> {
        if result.is_error() {
            return vec![];
        }

        let errors = self.redefinitions(&result.ast);
        if !errors.is_empty() {
            return errors;
        }

        for form in &result.ast {
            if let Some(name) = definition::defined_name(form) {
                log::debug!("defining {}", name);
                self.names.push(name.to_string());
                self.forms.insert(name.to_string(), form.clone());
            }
        }

        vec![]
    }

    /// Unknown symbols of `result` that the session has not defined either.
    pub fn unrecognized<'a>(&self, result: &'a AnalysisResult) -> Vec<&'a str> {
        result
            .symbols
            .unknowns
            .iter()
            .filter(|name| !self.contains(name))
            .collect()
    }
}
