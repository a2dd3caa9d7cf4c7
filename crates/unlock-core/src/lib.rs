//! Course prerequisite parsing and evaluation.
//!
//! Prerequisites arrive as loosely worded English, for example
//! `COMP1511 OR (MATH1131 AND 12 UNITS in (COMP1521, COMP2521))`. The crate
//! turns such a sentence into an expression tree in three stages and then
//! evaluates the tree against the courses a student has completed:
//!
//! 1. [`tokenize`] normalizes the text into course codes, unit counts,
//!    keywords and brackets, discarding everything else.
//! 2. [`group`] nests the tokens by bracket and collapses credit clauses into
//!    single leaves.
//! 3. [`compile`] folds each nested sequence strictly left to right into an
//!    [`Expr`]; `AND` and `OR` share the same precedence.
//!
//! [`Conditions`] holds the course-to-text dataset and answers
//! [`Conditions::is_unlocked`] queries.

mod compiler;
mod conditions;
mod errors;
mod expr;
mod grouper;
mod lexer;
mod prerequisite;

pub use compiler::compile;
pub use conditions::{CompiledConditions, Conditions, is_unlocked};
pub use errors::{ParseError, UnlockError};
pub use expr::{Expr, LEVEL_OFFSET, Operator, UNITS_PER_COURSE};
pub use grouper::{Item, group};
pub use lexer::{DEFAULT_SUBJECT, Token, normalize, render_tokens, tokenize};
pub use prerequisite::Prerequisite;
