//! Built-in one-argument functions

use ucal_core::UcalError;
use ucal_units::Quantity;

/// Functions callable as `name(expr)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sqrt,
    Exp,
    Ln,
    Log,
    Log10,
    Abs,
}

impl Function {
    pub const ALL: [Function; 6] = [
        Function::Sqrt,
        Function::Exp,
        Function::Ln,
        Function::Log,
        Function::Log10,
        Function::Abs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Log => "log",
            Function::Log10 => "log10",
            Function::Abs => "abs",
        }
    }

    /// Look up a function by its exact name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Apply to an evaluated argument
    pub fn apply(self, arg: &Quantity, precision: u32) -> Result<Quantity, UcalError> {
        match self {
            Function::Sqrt => arg.sqrt(precision),
            Function::Exp => arg.exp(precision),
            Function::Ln | Function::Log => arg.ln(precision),
            Function::Log10 => arg.log10(precision),
            Function::Abs => Ok(arg.abs()),
        }
    }
}
