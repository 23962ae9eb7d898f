use im_rc::HashSet;

/// Lexical context of the form under analysis.
///
/// Contexts are values. Scope introducing forms derive a new context for their body,
/// so bindings never leak into sibling forms. The bound names live in a persistent
/// set that shares structure with the context it was derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    top_level: bool,
    in_definition: bool,
    in_loop: bool,
    bound: HashSet<String>,
}

impl Context {
    /// The context every top-level form starts with.
    pub fn top_level() -> Self {
        Self {
            top_level: true,
            ..Self::default()
        }
    }

    /// Same scope, one level deeper.
    pub fn nested(&self) -> Self {
        Self {
            top_level: false,
            ..self.clone()
        }
    }

    /// The value or body of a definition.
    pub fn definition(&self) -> Self {
        Self {
            top_level: false,
            in_definition: true,
            ..self.clone()
        }
    }

    /// Marks (or unmarks) the context as a target for `recur`.
    pub fn with_loop(&self, in_loop: bool) -> Self {
        Self {
            in_loop,
            ..self.clone()
        }
    }

    pub fn with_binding<S: Into<String>>(&self, name: S) -> Self {
        Self {
            bound: self.bound.update(name.into()),
            ..self.clone()
        }
    }

    pub fn with_bindings<I>(&self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut bound = self.bound.clone();
        for name in names {
            bound.insert(name.into());
        }

        Self {
            bound,
            ..self.clone()
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.top_level
    }

    pub fn is_in_definition(&self) -> bool {
        self.in_definition
    }

    pub fn is_in_loop(&self) -> bool {
        self.in_loop
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bound.contains(name)
    }

    pub fn bound_names(&self) -> impl Iterator<Item = &String> {
        self.bound.iter()
    }
}
