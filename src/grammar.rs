//! Regex tables for the internal and OSIS reference notations.
//!
//! The two notations share one grammar shape and differ only in the book
//! abbreviation class and the separators around the chapter number:
//! `BBB_C:V` internally, `Book.C.V` for OSIS. Suffixes (`!a`..`!d`),
//! indexes (`!0`..`!999`), list separators (`,` same chapter, `;` cross
//! chapter), and range separators (`-` same chapter, `–` en-dash cross
//! chapter) are identical in both. Every pattern is anchored — partial
//! matches never count.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::options::Notation;

/// Finds BBB codes only (as strict as possible).
const BBB_PATTERN: &str = "([A-PR-XZ][A-EG-VX-Z1][A-WYZ1-6])";
/// OSIS book abbreviations: optional leading ordinal, then letters.
const OSIS_BOOK_PATTERN: &str = "([1-5]?[A-Za-z]{2,7})";
/// Chapter numbers 1..999 (the -1/0 intro sentinels never appear in text).
const C_PATTERN: &str = "([1-9][0-9]{0,2})";
/// Verse numbers 1..999.
const V_PATTERN: &str = "([1-9][0-9]{0,2})";
/// Sub-verse suffix marker.
const S_PATTERN: &str = "!([a-d])";
/// Character-offset index marker.
const I_PATTERN: &str = "!([0-9]{1,3})";

/// Lists are enumerated 2..=9 elements; longer lists are out of grammar.
pub(crate) const MAX_LIST_LEN: usize = 9;

/// Compiled anchored patterns for one notation.
pub(crate) struct ReferencePatterns {
    /// `BBB_C` whole-chapter shorthand.
    pub chapter: Regex,
    /// `BBB_C:V[!S]–C:V[!S]` cross-chapter range (en-dash).
    pub chapter_range: Regex,
    /// Same-chapter lists, index 0 holding the 2-element pattern.
    /// Groups: book, chapter, then (verse, suffix) pairs.
    pub comma_lists: Vec<Regex>,
    /// Cross-chapter lists, index 0 holding the 2-element pattern.
    /// Groups: book, then (chapter, verse, suffix) triples.
    pub semicolon_lists: Vec<Regex>,
    /// `BBB_C:V[!I]` with a numeric index.
    pub single_index: Regex,
    /// `BBB_C:V[!S]` with a letter suffix.
    pub single_suffix: Regex,
    /// Bare `V[!S]-V[!S]` compound-tail segment.
    pub tail_range: Regex,
    /// Bare `V[!S]` compound-tail segment.
    pub tail_single: Regex,
    /// `BBB_C:V[!S]-V[!S]` same-chapter range (hyphen).
    pub verse_range: Regex,
}

static INTERNAL: Lazy<ReferencePatterns> =
    Lazy::new(|| ReferencePatterns::build(BBB_PATTERN, "_", ":"));

static OSIS: Lazy<ReferencePatterns> =
    Lazy::new(|| ReferencePatterns::build(OSIS_BOOK_PATTERN, r"\.", r"\."));

/// The compiled pattern table for a notation.
pub(crate) fn patterns(notation: Notation) -> &'static ReferencePatterns {
    match notation {
        Notation::Internal => &INTERNAL,
        Notation::Osis => &OSIS,
    }
}

impl ReferencePatterns {
    /// Assemble and compile the full table from the notation's book class
    /// and separators. The patterns are fixed at compile time apart from
    /// those three parameters, so compilation cannot fail.
    fn build(book: &str, book_sep: &str, cv_sep: &str) -> Self {
        let vs = format!("{V_PATTERN}(?:{S_PATTERN})?");
        let vi = format!("{V_PATTERN}(?:{I_PATTERN})?");
        let cvs = format!("{C_PATTERN}{cv_sep}{vs}");
        let bcvs = format!("{book}{book_sep}{cvs}");
        let bcvi = format!("{book}{book_sep}{C_PATTERN}{cv_sep}{vi}");

        let mut comma_lists = Vec::new();
        let mut semicolon_lists = Vec::new();
        for n in 2..=MAX_LIST_LEN {
            let mut comma = bcvs.clone();
            let mut semicolon = bcvs.clone();
            for _ in 1..n {
                comma.push(',');
                comma.push_str(&vs);
                semicolon.push(';');
                semicolon.push_str(&cvs);
            }
            comma_lists.push(anchored(&comma));
            semicolon_lists.push(anchored(&semicolon));
        }

        Self {
            chapter: anchored(&format!("{book}{book_sep}{C_PATTERN}")),
            chapter_range: anchored(&format!("{bcvs}–{cvs}")),
            comma_lists,
            semicolon_lists,
            single_index: anchored(&bcvi),
            single_suffix: anchored(&bcvs),
            tail_range: anchored(&format!("{vs}-{vs}")),
            tail_single: anchored(&vs),
            verse_range: anchored(&format!("{bcvs}-{vs}")),
        }
    }
}

/// Compile a pattern anchored at both ends.
fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^{pattern}$")).expect("valid regex")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_single_matches_with_and_without_suffix() {
        let p = patterns(Notation::Internal);
        assert!(p.single_suffix.is_match("GEN_1:1"));
        assert!(p.single_suffix.is_match("REV_11:12!b"));
        assert!(!p.single_suffix.is_match("REV_11:12!5"));
        assert!(p.single_index.is_match("REV_11:12!5"));
        assert!(!p.single_suffix.is_match("MAT_1:1234"));
        assert!(!p.single_suffix.is_match("Gn_1:1"));
    }

    #[test]
    fn range_separators_are_distinct_codepoints() {
        let p = patterns(Notation::Internal);
        assert!(p.verse_range.is_match("SA2_19:12-19"));
        assert!(!p.verse_range.is_match("SA2_19:12–19"));
        assert!(p.chapter_range.is_match("SA2_12:22–13:2"));
        assert!(!p.chapter_range.is_match("SA2_12:22-13:2"));
    }

    #[test]
    fn list_patterns_cover_two_through_nine() {
        let p = patterns(Notation::Internal);
        assert_eq!(p.comma_lists.len(), MAX_LIST_LEN - 1);
        assert!(p.comma_lists[0].is_match("SA2_19:12,19"));
        assert!(p.comma_lists[7].is_match("PSA_119:1,3,5,7,9,11,13,15,17"));
        assert!(p.semicolon_lists[0].is_match("GEN_1:31;2:3"));
    }

    #[test]
    fn osis_notation_uses_dots() {
        let p = patterns(Notation::Osis);
        assert!(p.single_suffix.is_match("Gen.1.1"));
        assert!(p.single_suffix.is_match("2Sam.19.12!b"));
        assert!(!p.single_suffix.is_match("GEN_1:1"));
    }
}
