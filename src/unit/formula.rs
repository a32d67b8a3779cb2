use std::rc::Rc;

use crate::error::{LayoutError, Result};

use super::core::Length;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }

    fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Self::Add => lhs.saturating_add(rhs),
            Self::Sub => lhs.saturating_sub(rhs),
            Self::Mul => lhs.saturating_mul(rhs),
            Self::Div => lhs.checked_div(rhs).unwrap_or(0),
        }
    }
}

/// Build a dynamic length from a `calc(...)` formula such as `calc(50% - 1)`.
///
/// Operands and operators are separated by whitespace and folded left to
/// right; every operand resolves against the same parent size. Formulas are
/// validated here so a bad one never reaches a render pass.
pub fn calc(formula: &str) -> Result<Length> {
    let trimmed = formula.trim();
    let body = trimmed
        .strip_prefix("calc(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    let invalid = |reason: &str| LayoutError::InvalidFormula {
        formula: formula.to_string(),
        reason: reason.to_string(),
    };

    let tokens: Vec<&str> = body.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(invalid("empty formula"));
    }
    if tokens.len() % 2 == 0 {
        return Err(invalid("operand and operator count mismatch"));
    }

    let mut operands = Vec::with_capacity(tokens.len() / 2 + 1);
    let mut operators = Vec::with_capacity(tokens.len() / 2);

    for (idx, token) in tokens.iter().enumerate() {
        if idx % 2 == 1 {
            let operator =
                Operator::parse(token).ok_or_else(|| invalid(&format!("unknown operator `{token}`")))?;
            operators.push(operator);
            continue;
        }

        if *token == "auto" {
            return Err(invalid("`auto` cannot be an operand"));
        }
        if token.starts_with("calc(") {
            return Err(invalid("nested formulas are not supported"));
        }
        let operand = token
            .parse::<Length>()
            .map_err(|_| invalid(&format!("invalid operand `{token}`")))?;
        if operators.last() == Some(&Operator::Div) && operand == Length::Cells(0) {
            return Err(invalid("division by zero"));
        }
        operands.push(operand);
    }

    Ok(Length::Dynamic(Rc::new(move |size| {
        let first = operands[0].resolve(size, None);
        operators
            .iter()
            .zip(&operands[1..])
            .fold(first, |acc, (operator, operand)| {
                operator.apply(acc, operand.resolve(size, None))
            })
    })))
}
