//! Expression tokenizer
//!
//! Scans the input left to right. Whether `+`/`-` is a sign or a binary
//! operator depends only on the token before it.

use tracing::trace;
use ucal_core::UcalError;
use crate::token::{InfixOp, PostfixOp, PrefixOp, Token, TokenKind};

/// Split `input` into raw tokens
pub fn tokenize(input: &str) -> Result<Vec<Token>, UcalError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let value_before = tokens.last().map_or(false, |t| t.kind.produces_value());
        let (token, len) = next_token(rest, value_before)?;
        tokens.push(token);
        rest = rest[len..].trim_start();
    }

    trace!(
        input,
        tokens = %tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" "),
        "tokenized"
    );
    Ok(tokens)
}

/// Read one token from the start of `text` (which has no leading whitespace)
fn next_token(text: &str, value_before: bool) -> Result<(Token, usize), UcalError> {
    let first = &text[..text.chars().next().map_or(0, char::len_utf8)];

    match first {
        "(" => return Ok((Token::new(TokenKind::OpenParen, "("), 1)),
        ")" => return Ok((Token::new(TokenKind::CloseParen, ")"), 1)),
        _ => {}
    }

    if !value_before {
        if let Some(op) = PrefixOp::from_symbol(first) {
            return Ok((Token::new(TokenKind::Prefix, op.symbol()), 1));
        }
    } else {
        if let Some(op) = InfixOp::from_symbol(first) {
            return Ok((Token::new(TokenKind::Infix, op.symbol()), 1));
        }
        if let Some(op) = PostfixOp::from_symbol(first) {
            return Ok((Token::new(TokenKind::Postfix, op.symbol()), 1));
        }
    }

    if let Some(len) = scan_identifier(text) {
        let kind = if text[len..].starts_with('(') {
            TokenKind::Function
        } else {
            TokenKind::Variable
        };
        return Ok((Token::new(kind, &text[..len]), len));
    }

    if let Some(len) = scan_number(text) {
        return Ok((Token::value(&text[..len]), len));
    }

    Err(UcalError::unrecognized_symbol(text))
}

/// Length of a leading identifier: an ASCII letter followed by letters/digits
fn scan_identifier(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if !bytes.first()?.is_ascii_alphabetic() {
        return None;
    }
    Some(1 + bytes[1..].iter().take_while(|b| b.is_ascii_alphanumeric()).count())
}

fn count_while(bytes: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    bytes[start.min(bytes.len())..].iter().take_while(|&&b| pred(b)).count()
}

/// Length of a leading numeric literal
///
/// Accepts `0x`/`0b` integers and decimals of the form
/// `[sign] digits [. digits] [e [sign] digits]` with at least one mantissa
/// digit. An incomplete exponent is not consumed.
fn scan_number(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();

    if bytes.len() > 2 && bytes[0] == b'0' {
        let digits = match bytes[1] {
            b'x' | b'X' => count_while(bytes, 2, |b| b.is_ascii_hexdigit()),
            b'b' | b'B' => count_while(bytes, 2, |b| b == b'0' || b == b'1'),
            _ => 0,
        };
        if digits > 0 {
            return Some(2 + digits);
        }
    }

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_digits = count_while(bytes, i, |b| b.is_ascii_digit());
    i += int_digits;
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        frac_digits = count_while(bytes, i, |b| b.is_ascii_digit());
        i += frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = count_while(bytes, j, |b| b.is_ascii_digit());
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    Some(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).unwrap().into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_simple_expression() {
        assert_eq!(texts("1 + 2*3"), vec!["1", "+", "2", "*", "3"]);
        assert_eq!(
            kinds("1 + 2"),
            vec![TokenKind::Value, TokenKind::Infix, TokenKind::Value]
        );
    }

    #[test]
    fn test_sign_depends_on_previous_token() {
        assert_eq!(
            kinds("-1 - -2"),
            vec![
                TokenKind::Prefix,
                TokenKind::Value,
                TokenKind::Infix,
                TokenKind::Prefix,
                TokenKind::Value,
            ]
        );
        assert_eq!(kinds("(-1)")[1], TokenKind::Prefix);
        assert_eq!(kinds("2^-1")[2], TokenKind::Prefix);
    }

    #[test]
    fn test_functions_and_variables() {
        assert_eq!(
            kinds("sqrt(4 m)"),
            vec![
                TokenKind::Function,
                TokenKind::OpenParen,
                TokenKind::Value,
                TokenKind::Variable,
                TokenKind::CloseParen,
            ]
        );
        // a space before the paren makes it a variable
        assert_eq!(kinds("sqrt (4)")[0], TokenKind::Variable);
    }

    #[test]
    fn test_literals() {
        assert_eq!(texts("0xAbCdEf"), vec!["0xAbCdEf"]);
        assert_eq!(texts("0b101"), vec!["0b101"]);
        assert_eq!(texts("1.5e-3"), vec!["1.5e-3"]);
        assert_eq!(texts(".1"), vec![".1"]);
        assert_eq!(texts("1."), vec!["1."]);
        assert_eq!(texts("5km"), vec!["5", "km"]);
    }

    #[test]
    fn test_incomplete_exponent_left_behind() {
        assert_eq!(texts("1ee10"), vec!["1", "ee10"]);
        assert_eq!(texts("1E+-1"), vec!["1", "E", "+", "-", "1"]);
        assert_eq!(texts("2e"), vec!["2", "e"]);
    }

    #[test]
    fn test_incomplete_radix_prefix() {
        assert_eq!(texts("0x"), vec!["0", "x"]);
        assert_eq!(texts("0xAG"), vec!["0xA", "G"]);
        assert_eq!(texts("0b"), vec!["0", "b"]);
    }

    #[test]
    fn test_postfix() {
        assert_eq!(
            kinds("3!"),
            vec![TokenKind::Value, TokenKind::Postfix]
        );
    }

    #[test]
    fn test_unrecognized_symbol() {
        let err = tokenize("1 # 2").unwrap_err();
        assert!(err.is_parser());
        assert!(err.message.contains('#'));
        assert_eq!(err.fragment.as_deref(), Some("# 2"));

        assert!(tokenize("%1").is_err());
        assert!(tokenize(".").is_err());
        assert!(tokenize("!").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   ").unwrap().is_empty());
    }
}
