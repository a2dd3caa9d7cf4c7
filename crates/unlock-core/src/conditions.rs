//! Prerequisite dataset keyed by course code.
//!
//! The dataset is a JSON object mapping each course code to its raw
//! prerequisite sentence. It is loaded once and never mutated afterwards, so
//! a shared reference can answer any number of queries concurrently.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ParseError, UnlockError};
use crate::prerequisite::Prerequisite;

/// Raw prerequisite text for every known course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conditions {
    entries: BTreeMap<String, String>,
}

impl Conditions {
    /// Parse a dataset from a JSON object of course code to text.
    ///
    /// # Errors
    /// Returns [`UnlockError::Dataset`] when `json` is not an object whose
    /// values are all strings.
    ///
    /// # Examples
    /// ```
    /// use unlock_core::Conditions;
    ///
    /// let conditions = Conditions::from_json_str(r#"{"COMP1521": "COMP1511"}"#)?;
    /// assert_eq!(conditions.text("COMP1521")?, "COMP1511");
    /// # Ok::<(), unlock_core::UnlockError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, UnlockError> {
        let conditions: Self = serde_json::from_str(json)?;
        tracing::debug!(courses = conditions.len(), "loaded prerequisite conditions");
        Ok(conditions)
    }

    /// Read and parse a dataset file.
    ///
    /// # Errors
    /// Returns [`UnlockError::Io`] when the file cannot be read and
    /// [`UnlockError::Dataset`] when its contents are not a valid dataset.
    pub fn from_path(path: &Path) -> Result<Self, UnlockError> {
        let json = fs::read_to_string(path).map_err(|source| UnlockError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Number of courses in the dataset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dataset holds no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw prerequisite text for `course`, if present.
    #[must_use]
    pub fn get(&self, course: &str) -> Option<&str> {
        self.entries.get(course).map(String::as_str)
    }

    /// Raw prerequisite text for `course`.
    ///
    /// # Errors
    /// Returns [`UnlockError::UnknownCourse`] when the course is absent.
    pub fn text(&self, course: &str) -> Result<&str, UnlockError> {
        self.get(course)
            .ok_or_else(|| UnlockError::UnknownCourse(course.to_owned()))
    }

    /// Iterate over `(course, text)` pairs in course-code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(course, text)| (course.as_str(), text.as_str()))
    }

    /// Compile the prerequisite of a single course.
    ///
    /// # Errors
    /// Returns [`UnlockError::UnknownCourse`] when the course is absent and
    /// [`UnlockError::Parse`] when its text is structurally malformed.
    pub fn prerequisite(&self, course: &str) -> Result<Prerequisite, UnlockError> {
        let text = self.text(course)?;
        Prerequisite::parse(text).map_err(|source| UnlockError::Parse {
            course: course.to_owned(),
            source,
        })
    }

    /// Decide whether `completed` satisfies the prerequisite of `target`.
    ///
    /// # Errors
    /// Returns [`UnlockError::UnknownCourse`] when `target` is not in the
    /// dataset and [`UnlockError::Parse`] when its text is malformed.
    ///
    /// # Examples
    /// ```
    /// use unlock_core::Conditions;
    ///
    /// let conditions: Conditions = [("COMP2521", "COMP1511 or DPST1091")]
    ///     .into_iter()
    ///     .collect();
    /// assert!(conditions.is_unlocked(&["DPST1091"], "COMP2521")?);
    /// assert!(!conditions.is_unlocked(&["MATH1131"], "COMP2521")?);
    /// # Ok::<(), unlock_core::UnlockError>(())
    /// ```
    pub fn is_unlocked<S: AsRef<str>>(
        &self,
        completed: &[S],
        target: &str,
    ) -> Result<bool, UnlockError> {
        let prerequisite = self.prerequisite(target)?;
        let unlocked = prerequisite.is_satisfied(completed);
        tracing::debug!(course = target, unlocked, "evaluated prerequisite");
        Ok(unlocked)
    }

    /// Compile every prerequisite in the dataset up front.
    #[must_use]
    pub fn compile(&self) -> CompiledConditions {
        let mut compiled = BTreeMap::new();
        let mut failures = BTreeMap::new();
        for (course, text) in self.iter() {
            match Prerequisite::parse(text) {
                Ok(prerequisite) => {
                    compiled.insert(course.to_owned(), prerequisite);
                }
                Err(err) => {
                    tracing::warn!(course, error = %err, "skipping malformed prerequisite");
                    failures.insert(course.to_owned(), err);
                }
            }
        }
        CompiledConditions { compiled, failures }
    }
}

impl<K, V> FromIterator<(K, V)> for Conditions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(course, text)| (course.into(), text.into()))
                .collect(),
        }
    }
}

/// Decide whether `completed` satisfies the prerequisite of `target`.
///
/// Convenience wrapper around [`Conditions::is_unlocked`].
///
/// # Errors
/// See [`Conditions::is_unlocked`].
pub fn is_unlocked<S: AsRef<str>>(
    conditions: &Conditions,
    completed: &[S],
    target: &str,
) -> Result<bool, UnlockError> {
    conditions.is_unlocked(completed, target)
}

/// Every prerequisite in a dataset, compiled once for repeated queries.
#[derive(Debug, Clone, Default)]
pub struct CompiledConditions {
    compiled: BTreeMap<String, Prerequisite>,
    failures: BTreeMap<String, ParseError>,
}

impl CompiledConditions {
    /// The compiled prerequisite of `course`.
    ///
    /// # Errors
    /// Returns [`UnlockError::Parse`] when the course's text failed to
    /// compile and [`UnlockError::UnknownCourse`] when it is absent.
    pub fn get(&self, course: &str) -> Result<&Prerequisite, UnlockError> {
        if let Some(source) = self.failures.get(course) {
            return Err(UnlockError::Parse {
                course: course.to_owned(),
                source: source.clone(),
            });
        }
        self.compiled
            .get(course)
            .ok_or_else(|| UnlockError::UnknownCourse(course.to_owned()))
    }

    /// Decide whether `completed` satisfies the prerequisite of `target`.
    ///
    /// # Errors
    /// See [`CompiledConditions::get`].
    pub fn is_unlocked<S: AsRef<str>>(
        &self,
        completed: &[S],
        target: &str,
    ) -> Result<bool, UnlockError> {
        Ok(self.get(target)?.is_satisfied(completed))
    }

    /// Courses not yet completed whose prerequisites `completed` satisfies.
    ///
    /// Courses whose text failed to compile are never reported.
    #[must_use]
    pub fn unlocked<S: AsRef<str>>(&self, completed: &[S]) -> Vec<&str> {
        self.compiled
            .iter()
            .filter(|(course, _)| !completed.iter().any(|done| done.as_ref() == course.as_str()))
            .filter(|(_, prerequisite)| prerequisite.is_satisfied(completed))
            .map(|(course, _)| course.as_str())
            .collect()
    }

    /// Courses whose prerequisite text failed to compile.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ParseError)> {
        self.failures
            .iter()
            .map(|(course, err)| (course.as_str(), err))
    }

    /// Number of successfully compiled prerequisites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Whether no prerequisite compiled successfully.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
