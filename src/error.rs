/// Crate-level error types for reference parsing and validation.
///
/// Every error carries the offending text so a caller can produce a useful
/// diagnostic without re-parsing. Grammar mismatches are ordinary `Err`
/// values — the compound parser probes the simpler grammars by matching on
/// `Error::UnparseableReference` rather than by any silent mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A range end that is not after its start (strict-ordering mode only).
    #[error("range end `{end}` is not after start `{start}`")]
    BackwardsRange {
        /// Canonical text of the end verse.
        end: String,
        /// Canonical text of the start verse.
        start: String,
    },

    /// A book code field that is not exactly three separator-free characters.
    #[error("bad book code field: `{value}`")]
    BadBookField {
        /// The rejected field value.
        value: String,
    },

    /// A chapter field that is not 1-3 separator-free characters
    /// (the literal `-1` book-intro sentinel is allowed).
    #[error("bad chapter field: `{value}`")]
    BadChapterField {
        /// The rejected field value.
        value: String,
    },

    /// A suffix/index field that is neither empty, a letter a-d,
    /// nor a 1-4 digit number.
    #[error("bad suffix/index field: `{value}`")]
    BadSuffixField {
        /// The rejected field value.
        value: String,
    },

    /// A verse field that is not 1-3 separator-free characters.
    #[error("bad verse field: `{value}`")]
    BadVerseField {
        /// The rejected field value.
        value: String,
    },

    /// A book code with no OSIS abbreviation in the registry,
    /// encountered while building an OSIS reference.
    #[error("no OSIS abbreviation for book code `{bbb}`")]
    MissingOsisAbbreviation {
        /// The book code lacking an OSIS mapping.
        bbb: String,
    },

    /// A registry miss in strict mode. Lenient mode logs a warning instead
    /// because some external data sources use slightly non-standard codes.
    #[error("unknown book code `{code}`")]
    UnknownBookCode {
        /// The code missing from the registry.
        code: String,
    },

    /// An OSIS book abbreviation the registry cannot map to a book code.
    #[error("unknown OSIS book abbreviation `{abbreviation}`")]
    UnknownOsisAbbreviation {
        /// The unmapped OSIS abbreviation.
        abbreviation: String,
    },

    /// No grammar (plain or compound) matched the input string.
    #[error("unparseable verse reference `{text}`")]
    UnparseableReference {
        /// The input that matched no pattern.
        text: String,
    },

    /// List entries whose verse numbers do not increase by more than one
    /// without a suffix change (strict-ordering mode only).
    #[error("verse list entries not increasing at `{text}`")]
    VersesNotIncreasing {
        /// Canonical text of the offending entry.
        text: String,
    },
}
