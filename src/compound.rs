//! Mixed references combining singles, lists, and ranges, e.g. `GEN_1:1,3-4`.

use std::fmt;
use std::iter;
use std::slice;

use crate::books::BookCodeTable;
use crate::error::Error;
use crate::grammar;
use crate::list::{self, VerseListKey};
use crate::options::{Notation, ParseOptions};
use crate::range::VerseRangeKey;
use crate::single::VerseKey;

/// One component of a compound reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseKeyPart {
    /// A single verse.
    Single(VerseKey),
    /// An enumerated verse list.
    List(VerseListKey),
    /// A contiguous range.
    Range(VerseRangeKey),
}

impl VerseKeyPart {
    /// The first verse of this part.
    pub fn first(&self) -> &VerseKey {
        match self {
            Self::Single(key) => key,
            Self::List(l) => l.iter().next().unwrap_or_else(|| unreachable!()),
            Self::Range(r) => r.start(),
        }
    }

    /// The last verse of this part.
    pub fn last(&self) -> &VerseKey {
        match self {
            Self::Single(key) => key,
            Self::List(l) => l.iter().next_back().unwrap_or_else(|| unreachable!()),
            Self::Range(r) => r.end(),
        }
    }

    /// Every verse this part denotes.
    pub fn included_verses(&self) -> Vec<VerseKey> {
        match self {
            Self::Single(key) => key.included_verses(),
            Self::List(l) => l.included_verses(),
            Self::Range(r) => r.included_verses(),
        }
    }

    /// Iterate over the constituent verses.
    pub fn iter(&self) -> PartIter<'_> {
        match self {
            Self::Single(key) => PartIter::Single(iter::once(key)),
            Self::List(l) => PartIter::Many(l.iter()),
            Self::Range(r) => PartIter::Many(r.iter()),
        }
    }

    /// The full reference text of this part on its own.
    fn full_text(&self) -> String {
        match self {
            Self::Single(key) => key.reference_text(),
            Self::List(l) => l.reference_text(),
            Self::Range(r) => r.reference_text(),
        }
    }

    fn full_short_text(&self) -> String {
        match self {
            Self::Single(key) => key.short_text(),
            Self::List(l) => l.short_text(),
            Self::Range(r) => r.short_text(),
        }
    }

}

/// Iterator over the verses of one [`VerseKeyPart`].
#[derive(Debug, Clone)]
pub enum PartIter<'a> {
    /// A lone verse.
    Single(iter::Once<&'a VerseKey>),
    /// Verses of a list or range.
    Many(slice::Iter<'a, VerseKey>),
}

impl<'a> Iterator for PartIter<'a> {
    type Item = &'a VerseKey;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Single(inner) => inner.next(),
            Self::Many(inner) => inner.next(),
        }
    }
}

/// The most general reference form: any verse reference at all.
///
/// Parsing probes the simpler shapes first (single, then list, then
/// range) and wraps a match as a one-part compound; only genuinely mixed
/// text like `GEN_1:1,3-4` engages the segment parser. There is no upper
/// bound on the number of parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundVerseKey {
    parts: Vec<VerseKeyPart>,
}

impl CompoundVerseKey {
    /// Build a compound from already-constructed parts.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnparseableReference` for an empty part vector and
    /// `Error::VersesNotIncreasing` under strict ordering when a part
    /// boundary fails to advance.
    pub fn from_parts(parts: Vec<VerseKeyPart>, options: ParseOptions) -> Result<Self, Error> {
        if parts.is_empty() {
            return Err(Error::UnparseableReference {
                text: "empty compound reference".to_string(),
            });
        }
        if options.strict_order {
            check_boundaries(&parts)?;
        }
        Ok(Self { parts })
    }

    /// Parse any reference form with the standard table and default
    /// options.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnparseableReference` when no shape matches.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, BookCodeTable::standard(), ParseOptions::default())
    }

    /// Parse with an explicit table and options.
    ///
    /// # Errors
    ///
    /// Same as [`CompoundVerseKey::parse`]; ordering and book-code errors
    /// from the probed shapes propagate unchanged.
    pub fn parse_with(
        text: &str,
        table: &BookCodeTable,
        options: ParseOptions,
    ) -> Result<Self, Error> {
        match VerseKey::parse_with(text, table, options) {
            Ok(key) => {
                return Ok(Self {
                    parts: vec![VerseKeyPart::Single(key)],
                });
            }
            Err(Error::UnparseableReference { .. }) => {}
            Err(other) => return Err(other),
        }
        match VerseListKey::parse_with(text, table, options) {
            Ok(l) => {
                return Ok(Self {
                    parts: vec![VerseKeyPart::List(l)],
                });
            }
            Err(Error::UnparseableReference { .. }) => {}
            Err(other) => return Err(other),
        }
        match VerseRangeKey::parse_with(text, table, options) {
            Ok(r) => {
                return Ok(Self {
                    parts: vec![VerseKeyPart::Range(r)],
                });
            }
            Err(Error::UnparseableReference { .. }) => {}
            Err(other) => return Err(other),
        }

        match parse_segments(text, table, options) {
            Ok(parts) => Self::from_parts(parts, options),
            Err(Error::UnparseableReference { .. }) => {
                log::error!("unparseable verse reference {text:?}");
                Err(Error::UnparseableReference {
                    text: text.to_string(),
                })
            }
            Err(other) => Err(other),
        }
    }

    /// The canonical form: every part's own full text joined with `", "`.
    /// The one compaction: exactly a range followed by a single verse in
    /// the range's closing chapter serializes as `rangeText,V[!S]`.
    pub fn reference_text(&self) -> String {
        if let [VerseKeyPart::Range(r), VerseKeyPart::Single(key)] = self.parts.as_slice() {
            if r.end().book() == key.book() && r.end().chapter() == key.chapter() {
                let mut out = r.reference_text();
                out.push(',');
                push_verse(&mut out, key);
                return out;
            }
        }
        let texts: Vec<String> = self.parts.iter().map(VerseKeyPart::full_text).collect();
        texts.join(", ")
    }

    /// The human-readable form: part short texts joined with `", "`,
    /// e.g. `GEN 1:1, GEN 1:3-4`. No compaction here.
    pub fn short_text(&self) -> String {
        let texts: Vec<String> = self
            .parts
            .iter()
            .map(VerseKeyPart::full_short_text)
            .collect();
        texts.join(", ")
    }

    /// The component parts, in textual order.
    pub fn parts(&self) -> &[VerseKeyPart] {
        &self.parts
    }

    /// Every verse named, parts concatenated in order, duplicates kept.
    pub fn included_verses(&self) -> Vec<VerseKey> {
        self.parts
            .iter()
            .flat_map(VerseKeyPart::included_verses)
            .collect()
    }

    /// Iterate over every constituent verse.
    pub fn iter(&self) -> impl Iterator<Item = &VerseKey> {
        self.parts.iter().flat_map(VerseKeyPart::iter)
    }

    /// Total number of verses across all parts.
    pub fn len(&self) -> usize {
        self.parts.iter().map(|p| p.included_verses().len()).sum()
    }

    /// Always false: a compound carries at least one part.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

fn push_verse(out: &mut String, key: &VerseKey) {
    out.push_str(key.verse());
    if let Some(s) = key.suffix() {
        out.push('!');
        out.push(s);
    } else if let Some(i) = key.verse_index() {
        out.push('!');
        out.push_str(i);
    }
}

/// Strict ordering across part boundaries follows the list rule: the next
/// part must start past the previous part's end.
fn check_boundaries(parts: &[VerseKeyPart]) -> Result<(), Error> {
    for pair in parts.windows(2) {
        list::check_ordering(&[pair[0].last().clone(), pair[1].first().clone()])?;
    }
    Ok(())
}

/// Parse genuinely mixed text by splitting into chapter groups on `;` and
/// verse segments on `,`. The opening segment of the first group carries
/// the book; later groups restate the chapter and are reparsed with the
/// book prefixed; plain segments are verse tails in the running chapter.
fn parse_segments(
    text: &str,
    table: &BookCodeTable,
    options: ParseOptions,
) -> Result<Vec<VerseKeyPart>, Error> {
    let unparseable = || Error::UnparseableReference {
        text: text.to_string(),
    };
    let patterns = grammar::patterns(options.notation);
    let mut parts: Vec<VerseKeyPart> = Vec::new();

    for (group_index, group) in text.split(';').enumerate() {
        for (segment_index, segment) in group.split(',').enumerate() {
            // The canonical compound form joins parts with `", "`, so a
            // segment may carry surrounding space.
            let segment = segment.trim();
            if segment_index > 0 {
                // A bare verse tail in the chapter of the previous part.
                let context = parts.last().map(VerseKeyPart::last).ok_or_else(unparseable)?;
                let (bbb, c) = (context.book().to_string(), context.chapter().to_string());
                parts.push(parse_tail(segment, &bbb, &c, patterns, table, options, text)?);
                continue;
            }

            // The group opener: a full reference, with the book prefixed
            // back on for groups after the first.
            let full;
            let opener = if group_index == 0 {
                segment
            } else {
                let context = parts.last().map(VerseKeyPart::last).ok_or_else(unparseable)?;
                full = format!(
                    "{}{}",
                    book_prefix(context.book(), table, options)?,
                    segment
                );
                &full
            };
            parts.push(parse_full(opener, table, options, text)?);
        }
    }

    if parts.len() < 2 {
        return Err(unparseable());
    }
    Ok(parts)
}

/// Parse one segment that carries its own book and chapter.
fn parse_full(
    segment: &str,
    table: &BookCodeTable,
    options: ParseOptions,
    whole: &str,
) -> Result<VerseKeyPart, Error> {
    match VerseKey::parse_with(segment, table, options) {
        Ok(key) => return Ok(VerseKeyPart::Single(key)),
        Err(Error::UnparseableReference { .. }) => {}
        Err(other) => return Err(other),
    }
    match VerseRangeKey::parse_with(segment, table, options) {
        Ok(r) => Ok(VerseKeyPart::Range(r)),
        Err(Error::UnparseableReference { .. }) => Err(Error::UnparseableReference {
            text: whole.to_string(),
        }),
        Err(other) => Err(other),
    }
}

/// Parse one verse-only tail (`V`, `V!S`, or `V[!S]-V[!S]`) in the given
/// book and chapter.
fn parse_tail(
    segment: &str,
    bbb: &str,
    c: &str,
    patterns: &grammar::ReferencePatterns,
    table: &BookCodeTable,
    options: ParseOptions,
    whole: &str,
) -> Result<VerseKeyPart, Error> {
    if let Some(cap) = patterns.tail_single.captures(segment) {
        let si = cap.get(2).map_or("", |m| m.as_str());
        let key = VerseKey::new_with(bbb, c, &cap[1], si, table, options)?;
        return Ok(VerseKeyPart::Single(key));
    }
    if let Some(cap) = patterns.tail_range.captures(segment) {
        let s1 = cap.get(2).map_or("", |m| m.as_str());
        let s2 = cap.get(4).map_or("", |m| m.as_str());
        let start = VerseKey::new_with(bbb, c, &cap[1], s1, table, options)?;
        let end = VerseKey::new_with(bbb, c, &cap[3], s2, table, options)?;
        return Ok(VerseKeyPart::Range(VerseRangeKey::from_keys(
            start, end, options,
        )?));
    }
    Err(Error::UnparseableReference {
        text: whole.to_string(),
    })
}

/// The textual book prefix for synthesizing chapter-restated references.
fn book_prefix(
    bbb: &str,
    table: &BookCodeTable,
    options: ParseOptions,
) -> Result<String, Error> {
    match options.notation {
        Notation::Internal => Ok(format!("{bbb}_")),
        Notation::Osis => {
            let abbreviation =
                table
                    .osis_abbreviation(bbb)
                    .ok_or_else(|| Error::MissingOsisAbbreviation {
                        bbb: bbb.to_string(),
                    })?;
            Ok(format!("{abbreviation}."))
        }
    }
}

impl fmt::Display for CompoundVerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference_text())
    }
}

impl<'a> IntoIterator for &'a CompoundVerseKey {
    type Item = &'a VerseKey;
    type IntoIter =
        iter::FlatMap<slice::Iter<'a, VerseKeyPart>, PartIter<'a>, fn(&'a VerseKeyPart) -> PartIter<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        let per_part: fn(&'a VerseKeyPart) -> PartIter<'a> = VerseKeyPart::iter;
        self.parts.iter().flat_map(per_part)
    }
}

impl serde::Serialize for CompoundVerseKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.reference_text())
    }
}

impl<'de> serde::Deserialize<'de> for CompoundVerseKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_simpler_shapes_first() {
        let single = CompoundVerseKey::parse("GEN_1:1").unwrap();
        assert!(matches!(single.parts(), [VerseKeyPart::Single(_)]));

        let l = CompoundVerseKey::parse("SA2_19:12,19").unwrap();
        assert!(matches!(l.parts(), [VerseKeyPart::List(_)]));

        let r = CompoundVerseKey::parse("SA2_19:12-19").unwrap();
        assert!(matches!(r.parts(), [VerseKeyPart::Range(_)]));
        assert_eq!(r.len(), 8);
    }

    #[test]
    fn single_then_range_expands_in_order() {
        let compound = CompoundVerseKey::parse("GEN_1:1,3-4").unwrap();
        assert_eq!(compound.parts().len(), 2);
        let verses = compound.included_verses();
        let numbers: Vec<&str> = verses.iter().map(VerseKey::verse).collect();
        assert_eq!(numbers, ["1", "3", "4"]);
        assert_eq!(compound.reference_text(), "GEN_1:1, GEN_1:3-4");
        assert_eq!(compound.short_text(), "GEN 1:1, GEN 1:3-4");
    }

    #[test]
    fn canonical_text_reparses_to_the_same_key() {
        let compound = CompoundVerseKey::parse("GEN_1:1,3-4").unwrap();
        let back = CompoundVerseKey::parse(&compound.reference_text()).unwrap();
        assert_eq!(back, compound);
    }

    #[test]
    fn range_then_single_round_trips() {
        let compound = CompoundVerseKey::parse("EXO_12:3-5,7").unwrap();
        let numbers: Vec<String> = compound
            .iter()
            .map(|k| k.verse().to_string())
            .collect();
        assert_eq!(numbers, ["3", "4", "5", "7"]);
        // The range-then-single compaction applies to the canonical form
        // only; the short form always joins with `", "`.
        assert_eq!(compound.reference_text(), "EXO_12:3-5,7");
        assert_eq!(compound.short_text(), "EXO 12:3-5, EXO 12:7");
    }

    #[test]
    fn compaction_requires_the_closing_chapter() {
        // Range then single, but the single sits in a later chapter.
        let compound = CompoundVerseKey::parse("SA2_19:12-19;20:1").unwrap();
        assert!(matches!(
            compound.parts(),
            [VerseKeyPart::Range(_), VerseKeyPart::Single(_)]
        ));
        assert_eq!(compound.reference_text(), "SA2_19:12-19, SA2_20:1");
    }

    #[test]
    fn long_mixed_compounds_have_no_part_ceiling() {
        let text = "PSA_119:1-2,9,17-18,25,33,41,49,57,65,73,81";
        let compound = CompoundVerseKey::parse(text).unwrap();
        assert_eq!(compound.parts().len(), 11);
        assert_eq!(
            compound.reference_text(),
            "PSA_119:1-2, PSA_119:9, PSA_119:17-18, PSA_119:25, PSA_119:33, \
             PSA_119:41, PSA_119:49, PSA_119:57, PSA_119:65, PSA_119:73, PSA_119:81"
        );
    }

    #[test]
    fn chapter_restated_groups() {
        let compound = CompoundVerseKey::parse("SA2_19:12-19;20:1").unwrap();
        assert_eq!(compound.parts().len(), 2);
        let verses = compound.included_verses();
        assert_eq!(verses.len(), 9);
        assert_eq!(verses.last().unwrap().cv(), ("20", "1"));
    }

    #[test]
    fn duplicates_are_preserved() {
        let compound = CompoundVerseKey::parse("GEN_1:1-3,2").unwrap();
        let numbers: Vec<String> = compound
            .included_verses()
            .iter()
            .map(|k| k.verse().to_string())
            .collect();
        assert_eq!(numbers, ["1", "2", "3", "2"]);
    }

    #[test]
    fn unparseable_text_is_a_hard_error() {
        for text in ["", "nonsense", "GEN_1:1,", "GEN_1:1,x", "GEN 1:1,3-4"] {
            assert!(
                matches!(
                    CompoundVerseKey::parse(text),
                    Err(Error::UnparseableReference { .. })
                ),
                "expected failure for {text:?}"
            );
        }
    }

    #[test]
    fn strict_ordering_applies_at_part_boundaries() {
        let strict = ParseOptions::strict();
        let table = BookCodeTable::standard();
        // Verse 2 abuts the preceding single; it should have been a range.
        assert!(matches!(
            CompoundVerseKey::parse_with("GEN_1:1,2-4", table, strict),
            Err(Error::VersesNotIncreasing { .. })
        ));
        assert!(CompoundVerseKey::parse_with("GEN_1:1,3-4", table, strict).is_ok());
    }

    #[test]
    fn serde_uses_canonical_text() {
        let compound = CompoundVerseKey::parse("GEN_1:1,3-4").unwrap();
        let json = serde_json::to_string(&compound).unwrap();
        assert_eq!(json, "\"GEN_1:1, GEN_1:3-4\"");
        let back: CompoundVerseKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, compound);
    }
}
