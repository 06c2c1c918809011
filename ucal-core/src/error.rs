//! Structured errors for the calculator front ends
//!
//! Errors never crash the engine. They are values returned from the entry
//! points, carrying a machine-readable code, a human-readable message and the
//! fragment of input that caused them.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNRECOGNIZED_SYMBOL: &str = "UNRECOGNIZED_SYMBOL";
    pub const EMPTY_EXPRESSION: &str = "EMPTY_EXPRESSION";
    pub const UNBALANCED_PARENS: &str = "UNBALANCED_PARENS";
    pub const INVALID_START: &str = "INVALID_START";
    pub const INVALID_END: &str = "INVALID_END";
    pub const INVALID_SYNTAX: &str = "INVALID_SYNTAX";
    pub const UNDEFINED_VAR: &str = "UNDEFINED_VAR";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const INCONSISTENT_UNITS: &str = "INCONSISTENT_UNITS";
    pub const INVALID_VALUE: &str = "INVALID_VALUE";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const OVERFLOW: &str = "OVERFLOW";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Which stage rejected the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Malformed input: bad symbol, bad token order, unknown name
    Parser,
    /// Dimensionally or numerically invalid operation
    Quantity,
}

/// Structured error returned by `evaluate`/`interpret`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UcalError {
    /// Parser or quantity error
    pub kind: ErrorKind,

    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// The piece of input the error refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl UcalError {
    /// Create a new error
    pub fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            fragment: None,
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: attach the offending input fragment
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    pub fn is_parser(&self) -> bool {
        self.kind == ErrorKind::Parser
    }

    pub fn is_quantity(&self) -> bool {
        self.kind == ErrorKind::Quantity
    }

    // ========== Parser Errors ==========

    pub fn parser(code: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parser, code, message)
    }

    pub fn unrecognized_symbol(rest: &str) -> Self {
        let symbol = rest.chars().next().map(String::from).unwrap_or_default();
        Self::parser(codes::UNRECOGNIZED_SYMBOL, format!("Symbol \"{}\" is not recognized", symbol))
            .with_fragment(rest)
    }

    pub fn empty_expression() -> Self {
        Self::parser(codes::EMPTY_EXPRESSION, "Empty expression")
    }

    pub fn unbalanced_parens() -> Self {
        Self::parser(codes::UNBALANCED_PARENS, "Unbalanced parentheses")
            .with_suggestion("Check that every '(' has a matching ')'")
    }

    pub fn invalid_start(token: &str) -> Self {
        Self::parser(codes::INVALID_START, format!("Invalid starting token \"{}\"", token))
            .with_fragment(token)
    }

    pub fn invalid_end(token: &str) -> Self {
        Self::parser(codes::INVALID_END, format!("Invalid ending token \"{}\"", token))
            .with_fragment(token)
    }

    pub fn invalid_syntax(previous: &str, token: &str) -> Self {
        Self::parser(codes::INVALID_SYNTAX, format!("Invalid syntax: \"{}\" cannot follow \"{}\"", token, previous))
            .with_fragment(token)
    }

    pub fn undefined_var(name: &str) -> Self {
        Self::parser(codes::UNDEFINED_VAR, format!("Variable \"{}\" is undefined", name))
            .with_fragment(name)
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::parser(codes::UNDEFINED_FUNC, format!("Function \"{}\" not recognized", name))
            .with_fragment(name)
            .with_suggestion("Available functions: sqrt, exp, ln, log, log10, abs")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::parser(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
    }

    // ========== Quantity Errors ==========

    pub fn quantity(code: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Quantity, code, message)
    }

    pub fn inconsistent_units(details: impl Into<String>) -> Self {
        Self::quantity(codes::INCONSISTENT_UNITS, format!("Inconsistent units: {}", details.into()))
    }

    pub fn invalid_value(details: impl Into<String>) -> Self {
        Self::quantity(codes::INVALID_VALUE, format!("Invalid value: {}", details.into()))
    }

    pub fn div_zero() -> Self {
        Self::quantity(codes::DIV_ZERO, "Division by zero")
            .with_suggestion("Ensure divisor is not zero")
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::quantity(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn overflow(details: impl Into<String>) -> Self {
        Self::quantity(codes::OVERFLOW, format!("Overflow: {}", details.into()))
    }
}

impl std::fmt::Display for UcalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for UcalError {}

impl From<NumberError> for UcalError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::invalid_value(format!("cannot parse \"{}\"", s)).with_fragment(s),
            NumberError::DivisionByZero => Self::div_zero(),
            NumberError::DomainError(s) => Self::domain_error(s),
            NumberError::Overflow => Self::overflow("numeric result too large"),
        }
    }
}
