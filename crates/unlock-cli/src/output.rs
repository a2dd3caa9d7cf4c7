//! Helpers for rendering command output.

use std::io::Write;

use eyre::{Context, Result};
use serde::Serialize;
use unlock_core::{Expr, Token, render_tokens};

/// Outcome of a single prerequisite check.
#[derive(Debug, Serialize)]
pub(crate) struct CheckReport<'a> {
    pub target: &'a str,
    pub unlocked: bool,
}

/// How a prerequisite was tokenized and compiled.
#[derive(Debug, Serialize)]
pub(crate) struct ExplainReport<'a> {
    pub course: &'a str,
    pub text: &'a str,
    pub tokens: &'a [Token],
    pub tree: Option<&'a Expr>,
}

pub(crate) fn write_check(writer: &mut dyn Write, report: &CheckReport<'_>) -> Result<()> {
    let verdict = if report.unlocked { "unlocked" } else { "locked" };
    writeln!(writer, "{}: {verdict}", report.target)
        .wrap_err_with(|| format!("failed to write result for {}", report.target))
}

pub(crate) fn write_explain(writer: &mut dyn Write, report: &ExplainReport<'_>) -> Result<()> {
    let tree = report
        .tree
        .map_or_else(|| String::from("(none)"), ToString::to_string);
    writeln!(writer, "course: {}", report.course)
        .and_then(|()| writeln!(writer, "text:   {}", report.text))
        .and_then(|()| writeln!(writer, "tokens: {}", render_tokens(report.tokens)))
        .and_then(|()| writeln!(writer, "tree:   {tree}"))
        .wrap_err_with(|| format!("failed to write explanation for {}", report.course))
}

pub(crate) fn write_courses(writer: &mut dyn Write, courses: &[&str]) -> Result<()> {
    for course in courses {
        writeln!(writer, "{course}").wrap_err("failed to write course listing")?;
    }
    Ok(())
}

pub(crate) fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *writer, value).wrap_err("failed to serialize output to JSON")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")
}

#[cfg(test)]
mod tests {
    use super::*;
    use unlock_core::tokenize;

    fn rendered(write: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap_or_else(|err| panic!("output should be written: {err:#}"));
        String::from_utf8(buffer).unwrap_or_else(|err| panic!("output should be UTF-8: {err}"))
    }

    #[test]
    fn check_reports_verdict() {
        let report = CheckReport {
            target: "COMP2521",
            unlocked: false,
        };
        assert_eq!(rendered(|w| write_check(w, &report)), "COMP2521: locked\n");
    }

    #[test]
    fn explain_lists_each_stage() {
        let tokens = tokenize("COMP1511 or 1911");
        let tree = Expr::course("COMP1511");
        let report = ExplainReport {
            course: "COMP1521",
            text: "COMP1511 or 1911",
            tokens: &tokens,
            tree: Some(&tree),
        };
        let text = rendered(|w| write_explain(w, &report));
        assert!(text.contains("tokens: COMP1511 OR COMP1911\n"));
        assert!(text.contains("tree:   COMP1511\n"));
    }

    #[test]
    fn explain_marks_missing_tree() {
        let report = ExplainReport {
            course: "COMP1511",
            text: "",
            tokens: &[],
            tree: None,
        };
        assert!(rendered(|w| write_explain(w, &report)).ends_with("tree:   (none)\n"));
    }

    #[test]
    fn json_output_is_newline_terminated() {
        let report = CheckReport {
            target: "COMP1521",
            unlocked: true,
        };
        assert_eq!(
            rendered(|w| write_json(w, &report)),
            "{\"target\":\"COMP1521\",\"unlocked\":true}\n"
        );
    }

    #[test]
    fn course_listing_is_one_per_line() {
        assert_eq!(
            rendered(|w| write_courses(w, &["COMP1521", "COMP2521"])),
            "COMP1521\nCOMP2521\n"
        );
    }
}
