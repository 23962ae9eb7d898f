use serde::Serialize;
use std::fmt;

use crate::ast::Node;

use super::symbols::SymbolInfo;

pub const SUCCESS_MESSAGE: &str = "Analysis completed successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Warning,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Success => "success",
            Status::Warning => "warning",
            Status::Error => "error",
        };

        f.write_str(name)
    }
}

/// Outcome of analyzing a program.
///
/// Any error makes the status `error` and the message lists the errors one per line.
/// Otherwise any warning makes it `warning` with the warnings as message. Warnings
/// are kept next to errors, but an outcome with status `warning` never has errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub status: Status,
    pub message: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub ast: Vec<Node>,
    pub symbols: SymbolInfo,
}

impl AnalysisResult {
    pub fn new(
        errors: Vec<String>,
        warnings: Vec<String>,
        ast: Vec<Node>,
        symbols: SymbolInfo,
    ) -> Self {
        let (status, message) = if !errors.is_empty() {
            (Status::Error, errors.join("\n"))
        } else if !warnings.is_empty() {
            (Status::Warning, warnings.join("\n"))
        } else {
            (Status::Success, SUCCESS_MESSAGE.to_string())
        };

        Self {
            status,
            message,
            errors,
            warnings,
            ast,
            symbols,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == Status::Error
    }

    /// Pretty printed JSON with the keys `status`, `message`, `errors`, `warnings`,
    /// `ast` and `symbols`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
