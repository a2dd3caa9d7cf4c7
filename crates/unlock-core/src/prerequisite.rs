//! A single compiled prerequisite.

use std::fmt;

use serde::Serialize;

use crate::compiler::compile;
use crate::errors::ParseError;
use crate::expr::Expr;
use crate::grouper::group;
use crate::lexer::tokenize;

/// The compiled form of one prerequisite sentence.
///
/// A prerequisite with no root has no conditions and is satisfied by any
/// list of completed courses, including an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Prerequisite {
    root: Option<Expr>,
}

impl Prerequisite {
    /// Run the tokenize, group and compile stages over `text`.
    ///
    /// # Errors
    /// Returns [`ParseError`] when the text has unbalanced brackets, a
    /// truncated credit clause, an operator without an operand or two
    /// operands with no connective between them.
    ///
    /// # Examples
    /// ```
    /// use unlock_core::Prerequisite;
    ///
    /// let prereq = Prerequisite::parse("COMP1511 OR (MATH1131 AND COMP1521)")?;
    /// assert!(prereq.is_satisfied(&["MATH1131", "COMP1521"]));
    /// assert!(!prereq.is_satisfied(&["MATH1131"]));
    /// # Ok::<(), unlock_core::ParseError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let tokens = tokenize(text);
        let items = group(&tokens)?;
        let root = compile(items)?;
        Ok(Self { root })
    }

    /// Wrap an already compiled expression.
    #[must_use]
    pub fn from_expr(root: Option<Expr>) -> Self {
        Self { root }
    }

    /// The root of the expression tree, or `None` when there is no condition.
    #[must_use]
    pub fn root(&self) -> Option<&Expr> {
        self.root.as_ref()
    }

    /// Whether the prerequisite imposes no condition at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Check the prerequisite against the courses a student has completed.
    #[must_use]
    pub fn is_satisfied<S: AsRef<str>>(&self, completed: &[S]) -> bool {
        self.root
            .as_ref()
            .is_none_or(|root| root.is_satisfied(completed))
    }
}

impl fmt::Display for Prerequisite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => f.write_str("(none)"),
        }
    }
}
