//! Token types
//!
//! The lexer produces raw `Token`s that keep their source text. Once the
//! token stream has been rewritten and validated, each token is bound to an
//! `Item`: literals and names become quantities, operator symbols become
//! operator variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use ucal_units::Quantity;
use crate::functions::Function;

/// Syntactic category of a raw token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    OpenParen,
    CloseParen,
    Function,
    Variable,
    Value,
    Prefix,
    Infix,
    Postfix,
}

impl TokenKind {
    /// True for tokens after which an infix or postfix operator may appear
    pub fn produces_value(self) -> bool {
        matches!(
            self,
            TokenKind::CloseParen | TokenKind::Variable | TokenKind::Value | TokenKind::Postfix
        )
    }
}

/// A raw token and the text it was read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }

    pub fn infix(op: InfixOp) -> Self {
        Self::new(TokenKind::Infix, op.symbol())
    }

    pub fn value(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Value, text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Unary operators written before their operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Neg,
    Pos,
}

impl PrefixOp {
    pub const ALL: [PrefixOp; 2] = [PrefixOp::Neg, PrefixOp::Pos];

    pub fn symbol(self) -> &'static str {
        match self {
            PrefixOp::Neg => "-",
            PrefixOp::Pos => "+",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == s)
    }

    pub fn precedence(self) -> u8 {
        2
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl InfixOp {
    pub const ALL: [InfixOp; 6] = [
        InfixOp::Add,
        InfixOp::Sub,
        InfixOp::Mul,
        InfixOp::Div,
        InfixOp::Rem,
        InfixOp::Pow,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Rem => "%",
            InfixOp::Pow => "^",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == s)
    }

    /// Lower numbers bind tighter
    pub fn precedence(self) -> u8 {
        match self {
            InfixOp::Pow => 1,
            InfixOp::Mul | InfixOp::Div | InfixOp::Rem => 3,
            InfixOp::Add | InfixOp::Sub => 4,
        }
    }
}

/// Unary operators written after their operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    Factorial,
}

impl PostfixOp {
    pub const ALL: [PostfixOp; 1] = [PostfixOp::Factorial];

    pub fn symbol(self) -> &'static str {
        match self {
            PostfixOp::Factorial => "!",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == s)
    }

    pub fn precedence(self) -> u8 {
        1
    }
}

/// A token bound to its meaning, ready for evaluation
#[derive(Debug, Clone)]
pub enum Item {
    Open,
    Close,
    Value(Quantity),
    Function(Function),
    Prefix(PrefixOp),
    Infix(InfixOp),
    Postfix(PostfixOp),
}
