//! Compiled prerequisite expression tree and its evaluation rules.

use std::fmt;

use serde::Serialize;

/// Units of credit awarded for every completed course.
pub const UNITS_PER_COURSE: u32 = 6;

/// Character offset of the level digit in a course code such as `COMP2521`.
///
/// Only used when a level clause names no subject area, and assumes every
/// code carries a four letter subject prefix.
pub const LEVEL_OFFSET: usize = 4;

/// Boolean connective joining two sub-expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Both operands must hold.
    And,
    /// At least one operand must hold.
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "AND",
            Self::Or => "OR",
        })
    }
}

/// A node of a compiled prerequisite.
///
/// Operator nodes own both children from construction onwards; the tree is
/// never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// A single required course.
    Course {
        /// Course code that must appear in the completed list.
        code: String,
    },
    /// Both children must be satisfied.
    And {
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Either child must be satisfied.
    Or {
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// A minimum number of units from any completed courses.
    CreditCount {
        /// Required units of credit.
        units: u16,
    },
    /// A minimum number of units drawn from a fixed list of courses.
    CreditList {
        /// Required units of credit.
        units: u16,
        /// Courses that contribute towards the total.
        courses: Vec<String>,
    },
    /// A minimum number of units at a given course level.
    CreditLevel {
        /// Course level digit, e.g. `2` for 2000-level courses.
        level: u16,
        /// Required units of credit.
        units: u16,
        /// Optional subject area restricting the matching courses.
        area: Option<String>,
    },
}

impl Expr {
    /// Build a course leaf.
    #[must_use]
    pub fn course(code: impl Into<String>) -> Self {
        Self::Course { code: code.into() }
    }

    /// Build an operator node from both of its operands.
    #[must_use]
    pub fn binary(operator: Operator, left: Self, right: Self) -> Self {
        let (left, right) = (Box::new(left), Box::new(right));
        match operator {
            Operator::And => Self::And { left, right },
            Operator::Or => Self::Or { left, right },
        }
    }

    /// Check the expression against the courses a student has completed.
    ///
    /// Duplicate entries in `completed` are not collapsed: a credit-count or
    /// credit-level leaf counts every occurrence.
    ///
    /// # Examples
    /// ```
    /// use unlock_core::{Expr, Operator};
    ///
    /// let expr = Expr::binary(
    ///     Operator::Or,
    ///     Expr::course("COMP1511"),
    ///     Expr::course("COMP1911"),
    /// );
    /// assert!(expr.is_satisfied(&["COMP1911"]));
    /// assert!(!expr.is_satisfied(&["MATH1131"]));
    /// ```
    #[must_use]
    pub fn is_satisfied<S: AsRef<str>>(&self, completed: &[S]) -> bool {
        match self {
            Self::Course { code } => contains(completed, code),
            Self::And { left, right } => {
                let (left, right) = (left.is_satisfied(completed), right.is_satisfied(completed));
                left && right
            }
            Self::Or { left, right } => {
                let (left, right) = (left.is_satisfied(completed), right.is_satisfied(completed));
                left || right
            }
            Self::CreditCount { units } => meets(completed.len(), *units),
            Self::CreditList { units, courses } => {
                let matched = courses
                    .iter()
                    .filter(|code| contains(completed, code))
                    .count();
                meets(matched, *units)
            }
            Self::CreditLevel { level, units, area } => {
                let matched = completed
                    .iter()
                    .filter(|course| at_level(course.as_ref(), *level, area.as_deref()))
                    .count();
                meets(matched, *units)
            }
        }
    }
}

fn contains<S: AsRef<str>>(completed: &[S], code: &str) -> bool {
    completed.iter().any(|course| course.as_ref() == code)
}

fn meets(courses: usize, units: u16) -> bool {
    let earned = u64::try_from(courses)
        .unwrap_or(u64::MAX)
        .saturating_mul(u64::from(UNITS_PER_COURSE));
    earned >= u64::from(units)
}

fn at_level(course: &str, level: u16, area: Option<&str>) -> bool {
    match area {
        Some(area) => course
            .strip_prefix(area)
            .is_some_and(|rest| rest.starts_with(&level.to_string())),
        None => {
            let digit = u32::from(level);
            char::from_digit(digit, 10)
                .is_some_and(|digit| course.chars().nth(LEVEL_OFFSET) == Some(digit))
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Course { code } => f.write_str(code),
            Self::And { left, right } => write!(f, "({left} AND {right})"),
            Self::Or { left, right } => write!(f, "({left} OR {right})"),
            Self::CreditCount { units } => write!(f, "{units} UNITS"),
            Self::CreditList { units, courses } => {
                write!(f, "{units} UNITS ({})", courses.join(", "))
            }
            Self::CreditLevel { level, units, area } => {
                write!(f, "{units} UNITS LEVEL {level}")?;
                if let Some(area) = area {
                    write!(f, " {area}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn credit_list(units: u16) -> Expr {
        Expr::CreditList {
            units,
            courses: vec!["COMP1511".into(), "COMP1521".into(), "COMP2521".into()],
        }
    }

    #[rstest]
    #[case(&[], false)]
    #[case(&["COMP1511"], false)]
    #[case(&["COMP1511", "MATH1131"], true)]
    fn and_requires_both(#[case] completed: &[&str], #[case] expected: bool) {
        let expr = Expr::binary(
            Operator::And,
            Expr::course("COMP1511"),
            Expr::course("MATH1131"),
        );
        assert_eq!(expr.is_satisfied(completed), expected);
    }

    #[rstest]
    #[case(&[], false)]
    #[case(&["MATH1131"], true)]
    #[case(&["COMP1511", "MATH1131"], true)]
    fn or_requires_either(#[case] completed: &[&str], #[case] expected: bool) {
        let expr = Expr::binary(
            Operator::Or,
            Expr::course("COMP1511"),
            Expr::course("MATH1131"),
        );
        assert_eq!(expr.is_satisfied(completed), expected);
    }

    #[rstest]
    #[case(3, false)]
    #[case(4, true)]
    #[case(5, true)]
    fn credit_count_uses_six_units_per_course(#[case] taken: usize, #[case] expected: bool) {
        let completed = vec!["ARTS1000"; taken];
        assert_eq!(
            Expr::CreditCount { units: 24 }.is_satisfied(&completed),
            expected
        );
    }

    #[rstest]
    #[case(&["COMP1511"], false)]
    #[case(&["COMP1511", "MATH1131"], false)]
    #[case(&["COMP1511", "COMP2521"], true)]
    #[case(&["COMP1511", "COMP1521", "COMP2521"], true)]
    fn credit_list_counts_listed_courses_only(#[case] completed: &[&str], #[case] expected: bool) {
        assert_eq!(credit_list(12).is_satisfied(completed), expected);
    }

    #[test]
    fn credit_list_ignores_repeated_completions() {
        assert!(!credit_list(12).is_satisfied(&["COMP1511", "COMP1511"]));
    }

    #[test]
    fn credit_level_with_area_matches_prefix() {
        let expr = Expr::CreditLevel {
            level: 2,
            units: 6,
            area: Some("COMP".into()),
        };
        assert!(expr.is_satisfied(&["COMP2521"]));
        assert!(!expr.is_satisfied(&["COMP1521"]));
        assert!(!expr.is_satisfied(&["MATH2521"]));
    }

    #[test]
    fn credit_level_without_area_reads_level_digit() {
        let expr = Expr::CreditLevel {
            level: 3,
            units: 12,
            area: None,
        };
        assert!(expr.is_satisfied(&["COMP3311", "MATH3411"]));
        assert!(!expr.is_satisfied(&["COMP3311", "MATH2411"]));
    }

    #[test]
    fn credit_level_counts_duplicate_completions() {
        let expr = Expr::CreditLevel {
            level: 1,
            units: 12,
            area: Some("COMP".into()),
        };
        assert!(expr.is_satisfied(&["COMP1511", "COMP1511"]));
    }

    #[test]
    fn credit_level_never_matches_multi_digit_level_without_area() {
        let expr = Expr::CreditLevel {
            level: 12,
            units: 6,
            area: None,
        };
        assert!(!expr.is_satisfied(&["COMP1211"]));
    }

    #[test]
    fn displays_fully_parenthesised_text() {
        let expr = Expr::binary(
            Operator::Or,
            Expr::course("COMP1511"),
            Expr::binary(
                Operator::And,
                Expr::course("MATH1131"),
                Expr::CreditLevel {
                    level: 2,
                    units: 6,
                    area: Some("COMP".into()),
                },
            ),
        );
        assert_eq!(
            expr.to_string(),
            "(COMP1511 OR (MATH1131 AND 6 UNITS LEVEL 2 COMP))"
        );
        assert_eq!(credit_list(12).to_string(), "12 UNITS (COMP1511, COMP1521, COMP2521)");
    }

    #[test]
    fn serialises_with_kind_tags() {
        let value = serde_json::to_value(Expr::CreditCount { units: 24 })
            .unwrap_or_else(|err| panic!("expression should serialise: {err}"));
        assert_eq!(value, serde_json::json!({ "kind": "credit_count", "units": 24 }));
    }
}
