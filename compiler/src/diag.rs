// diag.rs — Unified diagnostics model
//
// Shared diagnostic types used by every compile phase. The whole warning
// taxonomy is non-fatal: diagnostics ride alongside the construction plan
// and the caller decides whether to surface them.
//
// Preconditions: none (types only).
// Postconditions: none (types only).
// Failure modes: none.
// Side effects: none.

use std::fmt;

use crate::lexer::Span;

// ── Diagnostic code ──────────────────────────────────────────────────────

/// A stable diagnostic code (e.g. `W0200`).
///
/// Codes are `&'static str` constants defined in the `codes` module. Once
/// assigned, a code must never be reassigned to a different semantic
/// meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagCode(pub &'static str);

impl fmt::Display for DiagCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable codes for the compile warning taxonomy.
pub mod codes {
    use super::DiagCode;

    /// Malformed line contributed no node and no edge.
    pub const PARSE_LINE: DiagCode = DiagCode("W0100");
    /// Descriptor kind name absent from the registry; node dropped.
    pub const UNKNOWN_KIND: DiagCode = DiagCode("W0200");
    /// Value payload failed to parse or did not match the kind's arity;
    /// node created with default values.
    pub const VALUE_ARITY: DiagCode = DiagCode("W0300");
    /// One or both edge endpoints unresolved; edge dropped.
    pub const DANGLING_EDGE: DiagCode = DiagCode("W0400");
}

// ── Severity level ───────────────────────────────────────────────────────

/// Severity of a diagnostic. Compiling graph text only ever produces
/// warnings; `Error` is reserved for callers that promote warnings (the
/// CLI's `--deny-warnings`) and for host-boundary failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagLevel {
    Error,
    Warning,
}

// ── Diagnostic ───────────────────────────────────────────────────────────

/// A compiler diagnostic emitted by any phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub code: Option<DiagCode>,
    pub level: DiagLevel,
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with no code or hint.
    pub fn new(level: DiagLevel, span: Span, message: impl Into<String>) -> Self {
        Self {
            code: None,
            level,
            span,
            message: message.into(),
            hint: None,
        }
    }

    /// Convenience constructor for the common case: a coded warning.
    pub fn warning(code: DiagCode, span: Span, message: impl Into<String>) -> Self {
        Self::new(DiagLevel::Warning, span, message).with_code(code)
    }

    /// Attach a stable diagnostic code.
    pub fn with_code(mut self, code: DiagCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            DiagLevel::Error => "error",
            DiagLevel::Warning => "warning",
        };
        if let Some(code) = &self.code {
            write!(f, "{}[{}]: {}", level, code, self.message)?;
        } else {
            write!(f, "{}: {}", level, self.message)?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_span() -> Span {
        Span { start: 0, end: 1 }
    }

    #[test]
    fn display_without_code() {
        let d = Diagnostic::new(DiagLevel::Error, dummy_span(), "something failed");
        assert_eq!(format!("{d}"), "error: something failed");
    }

    #[test]
    fn display_with_code() {
        let d = Diagnostic::warning(codes::UNKNOWN_KIND, dummy_span(), "unknown kind `Foo`");
        assert_eq!(format!("{d}"), "warning[W0200]: unknown kind `Foo`");
    }

    #[test]
    fn display_with_hint() {
        let d = Diagnostic::warning(codes::PARSE_LINE, dummy_span(), "line yielded nothing")
            .with_hint("expected `id[Kind]` or `src --> dst`");
        assert_eq!(
            format!("{d}"),
            "warning[W0100]: line yielded nothing\n  hint: expected `id[Kind]` or `src --> dst`"
        );
    }

    #[test]
    fn codes_are_distinct() {
        let all = [
            codes::PARSE_LINE,
            codes::UNKNOWN_KIND,
            codes::VALUE_ARITY,
            codes::DANGLING_EDGE,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
