//! Token stream rewrites and syntax validation
//!
//! Run in order: percent reinterpretation, implicit multiplication, then
//! validation. The rewrites only insert or replace tokens; they never fail.

use tracing::debug;
use ucal_core::UcalError;
use crate::token::{InfixOp, Token, TokenKind};

use TokenKind::*;

/// Rewrite `<value> %` to `<value> * 0.01` where `%` cannot be modulo
///
/// Applies when the `%` is the last token or is followed by an infix
/// operator or a closing parenthesis.
pub fn reinterpret_percent(tokens: &mut Vec<Token>) {
    let mut i = 1;
    while i < tokens.len() {
        let is_percent = tokens[i].kind == Infix && tokens[i].text == InfixOp::Rem.symbol();
        if tokens[i - 1].kind == Value && is_percent {
            let percent_sign = match tokens.get(i + 1) {
                None => true,
                Some(next) => matches!(next.kind, Infix | CloseParen),
            };
            if percent_sign {
                debug!(index = i, "interpreting % as percent sign");
                tokens[i] = Token::value("0.01");
                tokens.insert(i, Token::infix(InfixOp::Mul));
                i += 1;
            }
        }
        i += 1;
    }
}

fn implies_multiplication(previous: TokenKind, next: TokenKind) -> bool {
    matches!(
        (previous, next),
        (Value, Variable) | (Variable, Variable) | (CloseParen, Variable) | (CloseParen, OpenParen)
    )
}

/// Insert the `*` a user leaves out in `7 mm`, `in lbs`, `(2) mm`, `(8)(9)`
pub fn insert_implicit_multiplication(tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i + 1 < tokens.len() {
        if implies_multiplication(tokens[i].kind, tokens[i + 1].kind) {
            debug!(left = %tokens[i], right = %tokens[i + 1], "adding implicit *");
            tokens.insert(i + 1, Token::infix(InfixOp::Mul));
        }
        i += 1;
    }
}

fn can_start(kind: TokenKind) -> bool {
    matches!(kind, OpenParen | Function | Variable | Value | Prefix)
}

fn can_end(kind: TokenKind) -> bool {
    matches!(kind, CloseParen | Variable | Value | Postfix)
}

fn can_follow(previous: TokenKind, next: TokenKind) -> bool {
    match previous {
        OpenParen | Infix => matches!(next, Function | Variable | Value | Prefix | OpenParen),
        Prefix => matches!(next, Function | Variable | Value | OpenParen),
        Function => next == OpenParen,
        CloseParen | Variable | Value => matches!(next, CloseParen | Infix | Postfix),
        Postfix => matches!(next, CloseParen | Infix),
    }
}

/// Reject token sequences that cannot be evaluated
pub fn validate(tokens: &[Token]) -> Result<(), UcalError> {
    let (first, last) = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(UcalError::empty_expression()),
    };

    let mut depth: i32 = 0;
    for token in tokens {
        match token.kind {
            OpenParen => depth += 1,
            CloseParen => {
                depth -= 1;
                if depth < 0 {
                    return Err(UcalError::unbalanced_parens());
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(UcalError::unbalanced_parens());
    }

    if !can_start(first.kind) {
        return Err(UcalError::invalid_start(&first.text));
    }
    if !can_end(last.kind) {
        return Err(UcalError::invalid_end(&last.text));
    }

    for pair in tokens.windows(2) {
        if !can_follow(pair[0].kind, pair[1].kind) {
            return Err(UcalError::invalid_syntax(&pair[0].text, &pair[1].text));
        }
    }

    Ok(())
}
