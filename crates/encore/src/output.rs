//! Styled progress lines on stderr.

use std::fmt::Display;

use console::{Style, Term};

/// Writes user-facing progress to stderr.
///
/// Write failures are ignored; a closed terminal must not fail an export.
pub(crate) struct Output {
    term: Term,
    label: Style,
    done: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().cyan().bold(),
            done: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }

    /// `label: value` with the label highlighted.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        let line = format!("{} {value}", self.label.apply_to(format!("{label}:")));
        let _ = self.term.write_line(&line);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.done, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.warn, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.fail, msg);
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
