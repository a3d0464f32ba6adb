// diag.rs — Unified diagnostics model
//
// Provides the shared diagnostic types used across canonicalization.
// A diagnostic is a headline plus an ordered sequence of note blocks;
// once built it is immutable and rendered verbatim to the user.
//
// Preconditions: none (types only).
// Postconditions: none (types only).
// Failure modes: none.
// Side effects: none.

use std::fmt;

use serde::Serialize;

use crate::decl::Span;

// ── Diagnostic code ──────────────────────────────────────────────────────

/// A stable diagnostic code (e.g., `E0801`).
///
/// Codes are `&'static str` constants defined in the `codes` module.
/// Once assigned, a code must never be reassigned to a different semantic
/// meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagCode(pub &'static str);

impl fmt::Display for DiagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable codes for canonicalization diagnostics.
pub mod codes {
    use super::DiagCode;

    pub const UNSUPPORTED_TYPE: DiagCode = DiagCode("E0801");
    pub const FREE_TYPE_VARIABLE: DiagCode = DiagCode("E0802");
    pub const CONTAINS_FUNCTIONS: DiagCode = DiagCode("E0803");
    pub const HIGHER_ORDER_FUNCTION: DiagCode = DiagCode("E0804");
    pub const SIGNAL_CONTAINS_FUNCTION: DiagCode = DiagCode("E0805");
    pub const EXTENDED_RECORD: DiagCode = DiagCode("E0806");
    pub const ALIAS_CYCLE: DiagCode = DiagCode("E0807");
    pub const BAD_MAILBOX_LOOPBACK: DiagCode = DiagCode("E0811");
    pub const BAD_PROMISE_LOOPBACK: DiagCode = DiagCode("E0812");
}

// ── Severity level ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagLevel {
    Error,
    Warning,
}

impl DiagLevel {
    fn as_str(self) -> &'static str {
        match self {
            DiagLevel::Error => "error",
            DiagLevel::Warning => "warning",
        }
    }
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// A canonicalization diagnostic: headline plus ordered note blocks.
///
/// Notes may span multiple lines; `Display` indents every note line by two
/// spaces under the headline.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub code: Option<DiagCode>,
    pub level: DiagLevel,
    pub span: Span,
    pub message: String,
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with no code and no notes.
    pub fn new(level: DiagLevel, span: Span, message: impl Into<String>) -> Self {
        Self {
            code: None,
            level,
            span,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    /// Attach a stable diagnostic code.
    pub fn with_code(mut self, code: DiagCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Append one note block.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Append several note blocks, preserving order.
    pub fn with_notes(mut self, notes: impl IntoIterator<Item = String>) -> Self {
        self.notes.extend(notes);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "{}[{}]: {}", self.level.as_str(), code, self.message)?;
        } else {
            write!(f, "{}: {}", self.level.as_str(), self.message)?;
        }
        for note in &self.notes {
            for line in note.lines() {
                write!(f, "\n  {}", line)?;
            }
        }
        Ok(())
    }
}

// ── JSON rendering ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct DiagnosticJson<'a> {
    code: Option<&'a str>,
    level: &'a str,
    start: usize,
    end: usize,
    message: &'a str,
    notes: &'a [String],
}

/// Serialize diagnostics for machine consumers (build tools, editors).
pub fn to_json(diags: &[Diagnostic]) -> serde_json::Value {
    let rows: Vec<DiagnosticJson<'_>> = diags
        .iter()
        .map(|d| DiagnosticJson {
            code: d.code.map(|c| c.0),
            level: d.level.as_str(),
            start: d.span.start,
            end: d.span.end,
            message: &d.message,
            notes: &d.notes,
        })
        .collect();
    serde_json::to_value(rows).unwrap_or(serde_json::Value::Null)
}
