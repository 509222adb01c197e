//! # Error and Diagnostic Types
//!
//! Two families live here:
//!
//! - [`RenderError`]: a value's `Debug` impl could not produce text. It never
//!   escapes the renderer, which substitutes a placeholder instead.
//! - [`Failure`] and [`FailureReport`]: `miette` diagnostics describing failed
//!   assertions, used by [`crate::harness::TestCase`] when it fails a test.

use std::{fmt, panic::Location};

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use thiserror::Error;

/// Why a value could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The `Debug` impl returned `fmt::Error`.
    #[error("debug formatting returned an error")]
    Format,
    /// The `Debug` impl panicked with the given message.
    #[error("debug formatting panicked: {0}")]
    Panicked(String),
}

// ============================================================================
// FAILURE DIAGNOSTICS
// ============================================================================

/// Source location of an assertion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single failed assertion.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(testr::mismatch))]
pub struct Failure {
    pub message: String,
    pub site: Option<CallSite>,
    #[help]
    pub help: Option<String>,
}

impl Failure {
    pub fn new(message: impl Into<String>, site: Option<CallSite>) -> Self {
        let help = site.map(|site| format!("asserted at {site}"));
        Self {
            message: message.into(),
            site,
            help,
        }
    }
}

/// Every failed assertion of one test case.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{} failed", describe(.test.as_deref(), .failures.len()))]
#[diagnostic(code(testr::assertion_failed))]
pub struct FailureReport {
    pub test: Option<String>,
    #[related]
    pub failures: Vec<Failure>,
}

fn describe(test: Option<&str>, count: usize) -> String {
    let noun = if count == 1 { "assertion" } else { "assertions" };
    match test {
        Some(name) => format!("{count} {noun} in `{name}`"),
        None => format!("{count} {noun}"),
    }
}

impl FailureReport {
    /// Renders the report through `miette`'s graphical handler.
    pub fn render(&self, use_colors: bool) -> String {
        let theme = if use_colors {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        let mut out = String::new();
        match GraphicalReportHandler::new_themed(theme).render_report(&mut out, self) {
            Ok(()) => out,
            Err(_) => self.plain(),
        }
    }

    /// One line per failure, without decoration.
    pub fn plain(&self) -> String {
        let mut out = self.to_string();
        for failure in &self.failures {
            out.push_str("\n  ");
            if let Some(site) = failure.site {
                out.push_str(&format!("{site}: "));
            }
            out.push_str(&failure.message);
        }
        out
    }
}
