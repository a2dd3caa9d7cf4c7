//! Group a token stream into nested operand/operator sequences.
//!
//! Each bracketed region becomes its own [`Item::Group`]. Credit clauses
//! (`<n> UNITS ...`) span a variable number of tokens and are collapsed into a
//! single credit leaf here, so the compiler only ever sees operands and
//! operators.

use serde::Serialize;

use crate::errors::ParseError;
use crate::expr::{Expr, Operator};
use crate::lexer::Token;

/// One element of a grouped sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Item {
    /// A leaf expression: a course or a credit clause.
    Operand(Expr),
    /// A connective awaiting its operands.
    Operator(Operator),
    /// A bracketed sub-sequence.
    Group(Vec<Item>),
}

/// Group tokens into a nested sequence, respecting bracket nesting.
///
/// Tokens with no role outside a credit clause (stray `UNITS`, `LEVEL`, lone
/// numbers and subject areas) are skipped.
///
/// # Errors
/// Returns [`ParseError`] when brackets are unbalanced or a credit clause is
/// truncated.
///
/// # Examples
/// ```
/// use unlock_core::{Expr, Item, Operator, group, tokenize};
///
/// let items = group(&tokenize("COMP1511 or (COMP1911)"))?;
/// assert_eq!(
///     items,
///     vec![
///         Item::Operand(Expr::course("COMP1511")),
///         Item::Operator(Operator::Or),
///         Item::Group(vec![Item::Operand(Expr::course("COMP1911"))]),
///     ]
/// );
/// # Ok::<(), unlock_core::ParseError>(())
/// ```
pub fn group(tokens: &[Token]) -> Result<Vec<Item>, ParseError> {
    let mut root = Vec::new();
    let mut open: Vec<(usize, Vec<Item>)> = Vec::new();
    let mut index = 0;

    while let Some(token) = tokens.get(index) {
        let mut next = index + 1;
        let item = match token {
            Token::Course(code) => Some(Item::Operand(Expr::course(code.as_str()))),
            Token::Number(units) if tokens.get(index + 1) == Some(&Token::Units) => {
                let (expr, end) = credit_clause(tokens, index, *units)?;
                next = end;
                Some(Item::Operand(expr))
            }
            Token::And => Some(Item::Operator(Operator::And)),
            Token::Or => Some(Item::Operator(Operator::Or)),
            Token::Open => {
                open.push((index, Vec::new()));
                None
            }
            Token::Close => {
                let (_, items) = open.pop().ok_or(ParseError::UnmatchedClose(index))?;
                Some(Item::Group(items))
            }
            Token::Number(_) | Token::Level | Token::Subject(_) | Token::Units => None,
        };

        if let Some(item) = item {
            open.last_mut()
                .map_or(&mut root, |(_, items)| items)
                .push(item);
        }
        index = next;
    }

    if let Some((at, _)) = open.first() {
        return Err(ParseError::UnclosedOpen(*at));
    }
    Ok(root)
}

/// Build the credit leaf for the clause starting at `start`.
///
/// `tokens[start]` is the unit count and `tokens[start + 1]` is `UNITS`.
/// Returns the leaf together with the index of the first token after the
/// clause.
fn credit_clause(tokens: &[Token], start: usize, units: u16) -> Result<(Expr, usize), ParseError> {
    let after = start + 2;
    match tokens.get(after) {
        Some(Token::Level) => {
            let Some(Token::Number(level)) = tokens.get(after + 1) else {
                return Err(ParseError::MissingLevel(start));
            };
            let level = *level;
            Ok(match tokens.get(after + 2) {
                Some(Token::Subject(area)) => (
                    Expr::CreditLevel {
                        level,
                        units,
                        area: Some(area.clone()),
                    },
                    after + 3,
                ),
                _ => (
                    Expr::CreditLevel {
                        level,
                        units,
                        area: None,
                    },
                    after + 2,
                ),
            })
        }
        Some(Token::Open) => credit_list(tokens, start, after + 1, units),
        // `COMP(1521, 2521)`: the subject only prefixes the bracketed list.
        Some(Token::Subject(_)) if tokens.get(after + 1) == Some(&Token::Open) => {
            credit_list(tokens, start, after + 2, units)
        }
        _ => Ok((Expr::CreditCount { units }, after)),
    }
}

/// Collect course codes from `first` up to and including the closing bracket.
fn credit_list(
    tokens: &[Token],
    start: usize,
    first: usize,
    units: u16,
) -> Result<(Expr, usize), ParseError> {
    let mut courses = Vec::new();
    let mut index = first;
    loop {
        match tokens.get(index) {
            Some(Token::Close) => return Ok((Expr::CreditList { units, courses }, index + 1)),
            Some(Token::Course(code)) => courses.push(code.clone()),
            Some(_) => {}
            None => return Err(ParseError::UnclosedCreditList(start)),
        }
        index += 1;
    }
}
