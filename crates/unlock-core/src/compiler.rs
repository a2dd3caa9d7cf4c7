//! Fold grouped sequences into a single expression tree.
//!
//! Operators carry no precedence. Each sequence is folded strictly left to
//! right, so `A AND B OR C` becomes `(A AND B) OR C`, which is the reading
//! the prerequisite data is written for.

use crate::errors::ParseError;
use crate::expr::Expr;
use crate::grouper::Item;

/// Compile a grouped sequence into its root expression.
///
/// An empty sequence compiles to `None`, meaning there is no prerequisite.
///
/// # Errors
/// Returns [`ParseError::MissingOperand`] when an operator lacks an operand,
/// [`ParseError::MissingOperator`] when two operands sit side by side and
/// [`ParseError::EmptyGroup`] for an empty bracketed group.
///
/// # Examples
/// ```
/// use unlock_core::{compile, group, tokenize};
///
/// let items = group(&tokenize("COMP1511 AND COMP1521 OR COMP1911"))?;
/// let root = compile(items)?.map(|expr| expr.to_string());
/// assert_eq!(root.as_deref(), Some("((COMP1511 AND COMP1521) OR COMP1911)"));
/// # Ok::<(), unlock_core::ParseError>(())
/// ```
pub fn compile(items: Vec<Item>) -> Result<Option<Expr>, ParseError> {
    let mut items = items.into_iter();
    let Some(first) = items.next() else {
        return Ok(None);
    };

    let mut root = operand(first)?;
    while let Some(item) = items.next() {
        let operator = match item {
            Item::Operator(operator) => operator,
            stray => {
                let stray = operand(stray)?.to_string();
                tracing::debug!(after = %root, operand = %stray, "operand without a connective");
                return Err(ParseError::MissingOperator(stray));
            }
        };
        let right = items.next().ok_or(ParseError::MissingOperand(operator))?;
        root = Expr::binary(operator, root, operand(right)?);
    }
    Ok(Some(root))
}

fn operand(item: Item) -> Result<Expr, ParseError> {
    match item {
        Item::Operand(expr) => Ok(expr),
        Item::Group(items) => compile(items)?.ok_or(ParseError::EmptyGroup),
        Item::Operator(operator) => Err(ParseError::MissingOperand(operator)),
    }
}
