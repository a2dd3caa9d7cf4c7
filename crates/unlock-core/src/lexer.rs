//! Prerequisite lexer converting free-form text into normalized tokens.
//!
//! The lexer is deliberately forgiving: any word it cannot classify is
//! dropped, so phrases such as "Prerequisite: completion of" vanish and only
//! the course codes, unit counts, keywords and brackets survive.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Subject area assumed for bare four-digit course numbers such as `1511`.
pub const DEFAULT_SUBJECT: &str = "COMP";

static UNIT_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,3}$").unwrap_or_else(|_| unreachable!()));
static BARE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").unwrap_or_else(|_| unreachable!()));
static COURSE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}[0-9]{4}$").unwrap_or_else(|_| unreachable!()));
static SUBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}$").unwrap_or_else(|_| unreachable!()));

/// A normalized unit of prerequisite text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// A one to three digit integer, normally a unit count.
    Number(u16),
    /// The `LEVEL` keyword.
    Level,
    /// A full course code such as `COMP1511`.
    Course(String),
    /// A bare subject area such as `COMP`.
    Subject(String),
    /// The `OR` keyword.
    Or,
    /// The `AND` keyword.
    And,
    /// The `UNITS` keyword.
    Units,
    /// An opening bracket.
    Open,
    /// A closing bracket.
    Close,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Course(code) | Self::Subject(code) => f.write_str(code),
            Self::Level => f.write_str("LEVEL"),
            Self::Or => f.write_str("OR"),
            Self::And => f.write_str("AND"),
            Self::Units => f.write_str("UNITS"),
            Self::Open => f.write_str("("),
            Self::Close => f.write_str(")"),
        }
    }
}

/// Classify a buffered word, returning `None` for noise.
///
/// The checks run in a fixed order: numbers before keywords, and bare
/// four-digit numbers before subject codes.
fn classify(word: &str) -> Option<Token> {
    if UNIT_COUNT_RE.is_match(word) {
        return word.parse().ok().map(Token::Number);
    }
    if word.eq_ignore_ascii_case("level") || word.eq_ignore_ascii_case("levels") {
        return Some(Token::Level);
    }
    if BARE_NUMBER_RE.is_match(word) {
        return Some(Token::Course(format!("{DEFAULT_SUBJECT}{word}")));
    }
    if COURSE_CODE_RE.is_match(word) {
        return Some(Token::Course(word.to_owned()));
    }
    if SUBJECT_RE.is_match(word) {
        return Some(Token::Subject(word.to_owned()));
    }
    if word.eq_ignore_ascii_case("or") {
        return Some(Token::Or);
    }
    if word.eq_ignore_ascii_case("and") {
        return Some(Token::And);
    }
    if word.eq_ignore_ascii_case("unit") || word.eq_ignore_ascii_case("units") {
        return Some(Token::Units);
    }
    None
}

/// Split prerequisite text into normalized tokens.
///
/// Words are delimited by whitespace, commas, full stops and brackets.
/// Brackets are always emitted; unrecognised words are discarded.
///
/// # Examples
/// ```
/// use unlock_core::{Token, tokenize};
///
/// let tokens = tokenize("1511 or MATH1131");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Course("COMP1511".into()),
///         Token::Or,
///         Token::Course("MATH1131".into()),
///     ]
/// );
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();

    let flush_word = |word: &mut String, tokens: &mut Vec<Token>| {
        if let Some(token) = classify(word) {
            tokens.push(token);
        }
        word.clear();
    };

    for ch in text.chars() {
        match ch {
            '(' => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::Open);
            }
            ')' => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::Close);
            }
            ',' | '.' => flush_word(&mut word, &mut tokens),
            c if c.is_whitespace() => flush_word(&mut word, &mut tokens),
            c => word.push(c),
        }
    }

    flush_word(&mut word, &mut tokens);
    tracing::trace!(count = tokens.len(), "tokenized prerequisite text");
    tokens
}

/// Render a token sequence as a space-joined string.
#[must_use]
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokenize prerequisite text and render the normalized token stream.
///
/// # Examples
/// ```
/// use unlock_core::normalize;
///
/// assert_eq!(
///     normalize("Prerequisite: 1511 or a pass in MATH1131."),
///     "COMP1511 OR MATH1131"
/// );
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    render_tokens(&tokenize(text))
}
