//! The per-test output buffer and its assertions.

use std::fmt::{Display, Write as _};
use std::panic::Location;

use super::errors::ExpectError;
use super::ExpectHarness;
use crate::diff::{myers, render};

/// The expected side of an assertion. Built from a plain `&str`, or from
/// [`promoted`] to force a rewrite for this one call.
pub struct Expected<'a> {
    text: &'a str,
    force_promote: bool,
}

impl<'a> From<&'a str> for Expected<'a> {
    fn from(text: &'a str) -> Self {
        Self {
            text,
            force_promote: false,
        }
    }
}

/// Marks this call's literal for promotion regardless of the harness
/// trigger. The scanner recognizes the wrapping `promoted(` token when it
/// locates the block, so the call reads the same way the engine sees it.
pub fn promoted(text: &str) -> Expected<'_> {
    Expected {
        text,
        force_promote: true,
    }
}

/// Output buffer owned by one test scope.
///
/// Printed content accumulates until an [`expect`](Self::expect) call
/// consumes it; [`end`](Self::end) fails if anything is left over.
pub struct ExpectScope<'h> {
    harness: &'h ExpectHarness,
    buffer: String,
}

impl<'h> ExpectScope<'h> {
    pub(crate) fn new(harness: &'h ExpectHarness) -> Self {
        Self {
            harness,
            buffer: String::new(),
        }
    }

    /// Appends `content` to the output buffer.
    pub fn print(&mut self, content: impl Display) {
        let _ = write!(self.buffer, "{content}");
    }

    /// Appends `content` followed by a newline.
    pub fn println(&mut self, content: impl Display) {
        let _ = writeln!(self.buffer, "{content}");
    }

    /// Appends a bare newline.
    pub fn newline(&mut self) {
        self.buffer.push('\n');
    }

    /// Current buffered output.
    pub fn output(&self) -> &str {
        &self.buffer
    }

    /// Discards the buffered output.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Asserts that the buffered output matches `expected`, or rewrites the
    /// literal in place when promotion applies. The buffer is cleared
    /// either way.
    ///
    /// # Panics
    ///
    /// Panics with the rendered [`ExpectError`] on mismatch or promotion
    /// failure; this is how a failure reaches the test framework.
    #[track_caller]
    pub fn expect<'a>(&mut self, expected: impl Into<Expected<'a>>) {
        let location = Location::caller();
        if let Err(error) = self.check(expected.into(), location) {
            panic!("{error}");
        }
    }

    /// Fails the scope if any printed output was not consumed.
    ///
    /// # Panics
    ///
    /// Panics with [`ExpectError::UnconsumedOutput`] when the buffer is
    /// non-empty.
    pub fn end(&mut self) {
        if !self.buffer.is_empty() {
            let remaining = std::mem::take(&mut self.buffer);
            panic!("{}", ExpectError::UnconsumedOutput { remaining });
        }
    }

    fn check(&mut self, expected: Expected<'_>, location: &Location<'_>) -> Result<(), ExpectError> {
        // taking the buffer up front clears it whatever happens below
        let raw = std::mem::take(&mut self.buffer);
        let actual = normalize(&raw);
        let wanted = normalize(&strip_indent(expected.text));

        if actual == wanted {
            return Ok(());
        }

        if expected.force_promote || self.harness.trigger().should_promote() {
            let site = self.harness.call_site(location);
            self.harness.coordinator().promote(&site, &actual)?;
            return Ok(());
        }

        let expected_lines = split_lines(&wanted);
        let actual_lines = split_lines(&actual);
        let patch = myers::diff(&expected_lines, &actual_lines, |a, b| a == b);
        Err(ExpectError::Mismatch {
            file: location.file().to_string(),
            line: location.line(),
            column: location.column(),
            diff: render::render(&expected_lines, &patch),
        })
    }
}

fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

/// Trims trailing whitespace from every line and drops leading and trailing
/// fully-blank lines. Interior blank lines and leading spaces survive.
pub(crate) fn normalize(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').map(str::trim_end).collect();
    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);
    lines[first..=last].join("\n")
}

/// Removes the smallest leading-whitespace prefix shared by the non-blank
/// lines. The literal's indentation is dictated by where the block sits in
/// the source, so it must not participate in the comparison; relative
/// indentation within the block survives.
pub(crate) fn strip_indent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let min_indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| line.get(min_indent..).unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\n")
}
