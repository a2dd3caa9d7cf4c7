//! Error types shared by the prerequisite pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::expr::Operator;

/// Structural problems found while grouping or compiling prerequisite tokens.
///
/// Token positions are zero-based indices into the normalized token stream.
///
/// # Examples
/// ```
/// use unlock_core::ParseError;
/// let err = ParseError::UnmatchedClose(3);
/// assert_eq!(err.to_string(), "unmatched closing bracket at token 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `)` with no open bracket to close.
    #[error("unmatched closing bracket at token {0}")]
    UnmatchedClose(usize),
    /// A `(` still open at the end of the text.
    #[error("unclosed opening bracket at token {0}")]
    UnclosedOpen(usize),
    /// A bracketed credit list with no closing bracket.
    #[error("credit list starting at token {0} is never closed")]
    UnclosedCreditList(usize),
    /// A `LEVEL` credit clause with no level digit after it.
    #[error("credit clause at token {0} names LEVEL without a level digit")]
    MissingLevel(usize),
    /// An operator at the start or end of a sequence, or next to another
    /// operator.
    #[error("operator {0} is missing an operand")]
    MissingOperand(Operator),
    /// Two operands with no connective between them.
    #[error("operand `{0}` follows another operand without AND or OR")]
    MissingOperator(String),
    /// A pair of brackets with nothing usable inside.
    #[error("empty bracketed group")]
    EmptyGroup,
}

/// Errors surfaced while loading prerequisite data or answering queries.
#[derive(Debug, Error)]
pub enum UnlockError {
    /// The requested course has no entry in the dataset.
    #[error("no prerequisite entry for course `{0}`")]
    UnknownCourse(String),
    /// The course's prerequisite text could not be compiled.
    #[error("failed to parse prerequisite for `{course}`: {source}")]
    Parse {
        /// Course whose prerequisite failed to compile.
        course: String,
        /// The underlying structural error.
        #[source]
        source: ParseError,
    },
    /// The dataset file could not be read.
    #[error("failed to read conditions from {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The dataset is not a JSON object of strings.
    #[error("invalid conditions dataset: {0}")]
    Dataset(#[from] serde_json::Error),
}
