//! Parser configuration, passed explicitly to every parse entry point.
//!
//! Replaces what would otherwise be process-wide flags: callers that need
//! strict validation or OSIS input opt in per call site.

/// Which reference notation the input string uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// The native `BBB_C:V` notation with `_` and `:` separators.
    #[default]
    Internal,
    /// OSIS-style `Book.C.V` notation with `.` separators.
    Osis,
}

/// Options controlling parse-time validation.
///
/// The defaults match the tolerant behavior loaders want when ingesting
/// external data: unknown book codes are logged and accepted, and
/// semantically backwards lists/ranges are constructed as parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Input notation. Output is always the internal notation.
    pub notation: Notation,
    /// Reject book codes missing from the registry instead of warning.
    pub strict_books: bool,
    /// Enforce ordering invariants: list verses must increase by more than
    /// one (or change suffix), range ends must follow their starts.
    pub strict_order: bool,
}

impl ParseOptions {
    /// Options with every check enabled, internal notation.
    pub fn strict() -> Self {
        Self {
            notation: Notation::Internal,
            strict_books: true,
            strict_order: true,
        }
    }

    /// Default-leniency options reading OSIS notation.
    pub fn osis() -> Self {
        Self {
            notation: Notation::Osis,
            ..Self::default()
        }
    }
}
