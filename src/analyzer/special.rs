use std::fmt;

/// Operators with their own structural rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialForm {
    Def,
    Defn,
    Define,
    Let,
    Fn,
    If,
    Do,
    Loop,
    Recur,
    Quote,
    Var,
}

impl SpecialForm {
    pub fn from_name(name: &str) -> Option<Self> {
        let special = match name {
            "def" => SpecialForm::Def,
            "defn" => SpecialForm::Defn,
            "define" => SpecialForm::Define,
            "let" | "let*" => SpecialForm::Let,
            "fn" | "fn*" => SpecialForm::Fn,
            "if" => SpecialForm::If,
            "do" => SpecialForm::Do,
            "loop" => SpecialForm::Loop,
            "recur" => SpecialForm::Recur,
            "quote" => SpecialForm::Quote,
            "var" => SpecialForm::Var,
            _ => return None,
        };

        Some(special)
    }

    /// Definitions are only allowed at the top level.
    pub fn is_definition(&self) -> bool {
        matches!(
            self,
            SpecialForm::Def | SpecialForm::Defn | SpecialForm::Define
        )
    }
}

/// Number of arguments a function clause accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(1) => f.write_str("1 parameter"),
            Arity::Exactly(n) => write!(f, "{} parameters", n),
            Arity::AtLeast(n) => write!(f, "{} or more parameters", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(SpecialForm::from_name("let*"), Some(SpecialForm::Let));
        assert_eq!(SpecialForm::from_name("fn*"), Some(SpecialForm::Fn));
        assert_eq!(SpecialForm::from_name("define"), Some(SpecialForm::Define));
        assert_eq!(SpecialForm::from_name("lambda"), None);
        assert_eq!(SpecialForm::from_name("println"), None);
    }

    #[test]
    fn test_definitions() {
        assert!(SpecialForm::Def.is_definition());
        assert!(SpecialForm::Defn.is_definition());
        assert!(SpecialForm::Define.is_definition());
        assert!(!SpecialForm::Let.is_definition());
        assert!(!SpecialForm::Fn.is_definition());
    }

    #[test]
    fn test_arity_display() {
        assert_eq!(Arity::Exactly(1).to_string(), "1 parameter");
        assert_eq!(Arity::Exactly(2).to_string(), "2 parameters");
        assert_eq!(Arity::AtLeast(0).to_string(), "0 or more parameters");
    }
}
