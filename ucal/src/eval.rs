//! Expression evaluator
//!
//! Reduces a validated token stream to a single quantity. Parentheses are
//! resolved innermost first; each parenthesis-free span is then reduced in
//! four stages: functions, factorials, powers, then the remaining prefix and
//! infix operators by precedence level.

use tracing::trace;
use ucal_core::{codes, Number, UcalError};
use ucal_units::Quantity;
use crate::config::EngineConfig;
use crate::functions::Function;
use crate::lexer::tokenize;
use crate::passes::{insert_implicit_multiplication, reinterpret_percent, validate};
use crate::registry::Registry;
use crate::token::{InfixOp, Item, PostfixOp, PrefixOp, Token, TokenKind};

/// Run the full pipeline on `text`: tokenize, rewrite, validate, bind, evaluate
pub fn calculate(
    text: &str,
    units: &Registry,
    config: &EngineConfig,
) -> Result<Quantity, UcalError> {
    let mut tokens = tokenize(text)?;
    if config.allow_percent {
        reinterpret_percent(&mut tokens);
    }
    insert_implicit_multiplication(&mut tokens);
    validate(&tokens)?;

    let evaluator = Evaluator::new(config.working_precision);
    let items = evaluator.bind(tokens, units)?;
    evaluator.eval(items)
}

/// Token stream evaluator
pub struct Evaluator {
    precision: u32,
}

impl Evaluator {
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// Resolve literals, names and operator symbols
    pub fn bind(&self, tokens: Vec<Token>, units: &Registry) -> Result<Vec<Item>, UcalError> {
        tokens.into_iter().map(|token| self.bind_token(token, units)).collect()
    }

    fn bind_token(&self, token: Token, units: &Registry) -> Result<Item, UcalError> {
        let item = match token.kind {
            TokenKind::OpenParen => Item::Open,
            TokenKind::CloseParen => Item::Close,
            TokenKind::Value => {
                let number = Number::from_literal(&token.text, self.precision).map_err(|_| {
                    let message = format!("Invalid number \"{}\"", token.text);
                    UcalError::parser(codes::INVALID_SYNTAX, message)
                        .with_fragment(token.text.as_str())
                })?;
                Item::Value(Quantity::dimensionless(number))
            }
            TokenKind::Variable => match units.get(&token.text) {
                Some(q) => Item::Value(q.clone()),
                None => return Err(UcalError::undefined_var(&token.text)),
            },
            TokenKind::Function => match Function::from_name(&token.text) {
                Some(f) => Item::Function(f),
                None => return Err(UcalError::undefined_func(&token.text)),
            },
            TokenKind::Prefix => PrefixOp::from_symbol(&token.text)
                .map(Item::Prefix)
                .ok_or_else(|| unknown_operator("prefix", &token.text))?,
            TokenKind::Infix => InfixOp::from_symbol(&token.text)
                .map(Item::Infix)
                .ok_or_else(|| unknown_operator("infix", &token.text))?,
            TokenKind::Postfix => PostfixOp::from_symbol(&token.text)
                .map(Item::Postfix)
                .ok_or_else(|| unknown_operator("postfix", &token.text))?,
        };
        Ok(item)
    }

    /// Evaluate a bound token stream
    pub fn eval(&self, mut items: Vec<Item>) -> Result<Quantity, UcalError> {
        let mut open: Vec<usize> = Vec::new();
        let mut i = 0;

        while i < items.len() {
            match items[i] {
                Item::Open => {
                    open.push(i);
                    i += 1;
                }
                Item::Close => {
                    let start = open.pop().ok_or_else(UcalError::unbalanced_parens)?;
                    let inner: Vec<Item> = items.drain(start + 1..i).collect();
                    let value = self.eval_flat(inner)?;
                    items.splice(start..start + 2, [Item::Value(value)]);
                    i = start + 1;
                }
                _ => i += 1,
            }
        }

        if !open.is_empty() {
            return Err(UcalError::unbalanced_parens());
        }
        self.eval_flat(items)
    }

    /// Evaluate a span that contains no parentheses
    fn eval_flat(&self, mut items: Vec<Item>) -> Result<Quantity, UcalError> {
        trace!(items = items.len(), "evaluating flat span");

        // functions bind to the value on their right
        for i in (0..items.len()).rev() {
            if let Item::Function(f) = items[i] {
                let result = f.apply(value_at(&items, i + 1)?, self.precision)?;
                items.splice(i..i + 2, [Item::Value(result)]);
            }
        }

        // factorials bind to the value on their left
        for i in (1..items.len()).rev() {
            if let Item::Postfix(PostfixOp::Factorial) = items[i] {
                let result = value_at(&items, i - 1)?.factorial(self.precision)?;
                items.splice(i - 1..i + 1, [Item::Value(result)]);
            }
        }

        // powers, right to left
        let mut i = items.len();
        while i > 1 {
            i -= 1;
            if let Item::Infix(InfixOp::Pow) = items[i] {
                if let Some(&Item::Prefix(op)) = items.get(i + 1) {
                    let signed = apply_prefix(op, value_at(&items, i + 2)?);
                    items.splice(i + 1..i + 3, [Item::Value(signed)]);
                }
                let base = value_at(&items, i - 1)?;
                let result = base.pow(value_at(&items, i + 1)?, self.precision)?;
                items.splice(i - 1..i + 2, [Item::Value(result)]);
            }
        }

        // everything else, lowest precedence number first, left to right
        while items.len() > 1 {
            let level = items
                .iter()
                .filter_map(|item| match item {
                    Item::Prefix(op) => Some(op.precedence()),
                    Item::Infix(op) => Some(op.precedence()),
                    _ => None,
                })
                .min()
                .ok_or_else(|| UcalError::internal("operands without an operator"))?;

            let mut i = 0;
            while i < items.len() {
                match items[i] {
                    Item::Prefix(op) if op.precedence() == level => {
                        let result = apply_prefix(op, value_at(&items, i + 1)?);
                        items.splice(i..i + 2, [Item::Value(result)]);
                    }
                    Item::Infix(op) if op.precedence() == level => {
                        if i == 0 {
                            return Err(UcalError::internal(format!(
                                "operator {} without left operand",
                                op.symbol()
                            )));
                        }
                        let left = value_at(&items, i - 1)?;
                        let result = self.apply_infix(op, left, value_at(&items, i + 1)?)?;
                        items.splice(i - 1..i + 2, [Item::Value(result)]);
                        i -= 1;
                    }
                    _ => {}
                }
                i += 1;
            }
        }

        match items.pop() {
            Some(Item::Value(q)) if items.is_empty() => Ok(q),
            _ => Err(UcalError::internal("expression did not reduce to a value")),
        }
    }

    fn apply_infix(
        &self,
        op: InfixOp,
        left: &Quantity,
        right: &Quantity,
    ) -> Result<Quantity, UcalError> {
        match op {
            InfixOp::Add => left.add(right),
            InfixOp::Sub => left.sub(right),
            InfixOp::Mul => Ok(left.mul(right)),
            InfixOp::Div => left.div(right),
            InfixOp::Rem => left.rem(right),
            InfixOp::Pow => left.pow(right, self.precision),
        }
    }
}

fn apply_prefix(op: PrefixOp, operand: &Quantity) -> Quantity {
    match op {
        PrefixOp::Neg => operand.neg(),
        PrefixOp::Pos => operand.pos(),
    }
}

fn unknown_operator(kind: &str, symbol: &str) -> UcalError {
    UcalError::internal(format!("unknown {} operator {}", kind, symbol))
}

fn value_at(items: &[Item], index: usize) -> Result<&Quantity, UcalError> {
    match items.get(index) {
        Some(Item::Value(q)) => Ok(q),
        _ => Err(UcalError::internal(format!("expected a value at position {}", index))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucal_core::DEFAULT_PRECISION;
    use ucal_units::Dimension;
    use ucal_units::dimension::LENGTH;

    fn units() -> Registry {
        let mut registry = Registry::empty();
        registry.insert("m", Quantity::base_unit(LENGTH));
        registry.insert(
            "km",
            Quantity::new(Number::from_i64(1000), Dimension::base(LENGTH)),
        );
        registry
    }

    fn calc(text: &str) -> Result<Quantity, UcalError> {
        calculate(text, &units(), &EngineConfig::default())
    }

    fn show(text: &str) -> String {
        calc(text).unwrap().value.to_display(16)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(show("1 + 2 * 3"), "7");
        assert_eq!(show("(1 + 2) * 3"), "9");
        assert_eq!(show("10 - 4 - 3"), "3");
        assert_eq!(show("12 / 3 / 2"), "2");
        assert_eq!(show("2 * 3 % 4"), "2");
    }

    #[test]
    fn test_power_right_associative() {
        assert_eq!(show("3^3^3"), "7625597484987");
        assert_eq!(show("2 ^ 5"), "32");
        assert_eq!(show("-2^2"), "-4");
    }

    #[test]
    fn test_power_with_signed_exponent() {
        assert_eq!(show("2^-1"), "0.5");
        assert_eq!(show("10^+2"), "100");
        assert_eq!(show("2^-3!"), "0.015625");
    }

    #[test]
    fn test_factorial_binds_before_power() {
        assert_eq!(show("3^2!"), "9");
        assert_eq!(show("18!"), "6402373705728000");
        assert_eq!(show("3!^2"), "36");
        assert_eq!(show("2^3!^2"), "68719476736");
        assert_eq!(show("2 * 3! + 1"), "13");
    }

    #[test]
    fn test_nested_parentheses() {
        assert_eq!(show("(((1)))"), "1");
        assert_eq!(show("((2 + 3) * (4 - 1))"), "15");
        assert_eq!(show("(1)(1)"), "1");
    }

    #[test]
    fn test_prefix_signs() {
        assert_eq!(show("-1"), "-1");
        assert_eq!(show("+1"), "1");
        assert_eq!(show("1+-2"), "-1");
        assert_eq!(show("2 * -3"), "-6");
    }

    #[test]
    fn test_functions() {
        assert_eq!(show("sqrt(4)"), "2");
        assert_eq!(show("exp(0)"), "1");
        assert_eq!(show("ln(exp(1))"), "1");
        assert_eq!(show("log10(100)"), "2");
        assert_eq!(show("abs(-3) + 1"), "4");
        assert_eq!(show("sqrt(sqrt(16))"), "2");
    }

    #[test]
    fn test_units_combine() {
        let q = calc("2 km + 500 m").unwrap();
        assert_eq!(q.value.to_display(16), "2500");
        assert_eq!(q.dimension, Dimension::base(LENGTH));

        let area = calc("m m").unwrap();
        assert_eq!(area.dimension.exponents[LENGTH], 2.0);
    }

    #[test]
    fn test_quantity_errors() {
        for text in ["1 m + 1", "(1m)!", "1.5!", "(-1)!", "1 ^ (1m)", "(1m) % 2", "1 / 0"] {
            let err = calc(text).unwrap_err();
            assert!(err.is_quantity(), "{:?} gave {:?}", text, err);
        }
    }

    #[test]
    fn test_undefined_names() {
        let err = calc("2 furlong").unwrap_err();
        assert_eq!(err.code, codes::UNDEFINED_VAR);
        assert!(err.is_parser());

        let err = calc("thisIsUnrecognized(1)").unwrap_err();
        assert_eq!(err.code, codes::UNDEFINED_FUNC);
    }

    #[test]
    fn test_percent_toggle() {
        assert_eq!(show("50%"), "0.5");
        let config = EngineConfig::default().with_percent(false);
        assert!(calculate("50%", &units(), &config).is_err());
    }

    #[test]
    fn test_factorial_follows_working_precision() {
        let config = EngineConfig::default().with_precision(60);
        let q = calculate("40!", &units(), &config).unwrap();
        assert_eq!(q.value.to_display(60), "815915283247897734345611269596115894272000000000");
    }

    #[test]
    fn test_eval_reports_structural_errors() {
        let evaluator = Evaluator::new(DEFAULT_PRECISION);
        let one = || Item::Value(Quantity::dimensionless(Number::from_i64(1)));

        let err = evaluator.eval(vec![one(), Item::Infix(InfixOp::Add)]).unwrap_err();
        assert_eq!(err.code, codes::INTERNAL);

        let err = evaluator.eval(vec![one(), one()]).unwrap_err();
        assert_eq!(err.code, codes::INTERNAL);

        let err = evaluator.eval(vec![Item::Close]).unwrap_err();
        assert_eq!(err.code, codes::UNBALANCED_PARENS);
    }
}
