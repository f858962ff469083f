//! A contiguous run of verses, e.g. `SA2_19:12-19` or `GEN_1:28–2:3`.

use std::fmt;

use crate::books::BookCodeTable;
use crate::error::Error;
use crate::grammar;
use crate::options::ParseOptions;
use crate::single::{self, VerseKey};

/// Verse numbering varies between works, so cross-chapter expansion rolls
/// to the next chapter once the verse counter passes this bound.
const CHAPTER_ROLLOVER_VERSE: i32 = 222;

/// A whole-chapter reference expands to verses 1 through this bound.
const WHOLE_CHAPTER_LAST_VERSE: i32 = 999;

/// An inclusive verse range with both endpoints named.
///
/// A plain hyphen joins endpoints in the same chapter; an en dash (`–`)
/// joins endpoints in different chapters. The bare-chapter shorthand
/// `BBB_C` denotes the whole chapter. The constituent verses are
/// expanded eagerly at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRangeKey {
    start: VerseKey,
    end: VerseKey,
    keys: Vec<VerseKey>,
}

impl VerseRangeKey {
    /// Build a range from two endpoint keys.
    ///
    /// # Errors
    ///
    /// Under strict ordering, returns `Error::BackwardsRange` unless the
    /// end lies after the start (or the verse is equal with a different
    /// suffix). Lenient mode accepts any pair and degrades to just the
    /// two endpoints when the span cannot be enumerated.
    pub fn from_keys(start: VerseKey, end: VerseKey, options: ParseOptions) -> Result<Self, Error> {
        if options.strict_order && !advances(&start, &end) {
            return Err(Error::BackwardsRange {
                end: end.reference_text(),
                start: start.reference_text(),
            });
        }
        let keys = expand(&start, &end);
        Ok(Self { start, end, keys })
    }

    /// Parse a range reference with the standard table and default options.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnparseableReference` when the string is not a
    /// verse range, chapter range, or whole-chapter shorthand.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, BookCodeTable::standard(), ParseOptions::default())
    }

    /// Parse with an explicit table and options.
    ///
    /// # Errors
    ///
    /// Same as [`VerseRangeKey::parse`], plus book-code and ordering
    /// errors per options.
    pub fn parse_with(
        text: &str,
        table: &BookCodeTable,
        options: ParseOptions,
    ) -> Result<Self, Error> {
        let patterns = grammar::patterns(options.notation);

        if let Some(cap) = patterns.verse_range.captures(text) {
            let bbb = single::resolve_book(&cap[1], table, options)?;
            let c = &cap[2];
            let s1 = cap.get(4).map_or("", |m| m.as_str());
            let s2 = cap.get(6).map_or("", |m| m.as_str());
            let start = VerseKey::new_with(&bbb, c, &cap[3], s1, table, options)?;
            let end = VerseKey::new_with(&bbb, c, &cap[5], s2, table, options)?;
            return Self::from_keys(start, end, options);
        }

        if let Some(cap) = patterns.chapter_range.captures(text) {
            let bbb = single::resolve_book(&cap[1], table, options)?;
            let s1 = cap.get(4).map_or("", |m| m.as_str());
            let s2 = cap.get(7).map_or("", |m| m.as_str());
            let start = VerseKey::new_with(&bbb, &cap[2], &cap[3], s1, table, options)?;
            let end = VerseKey::new_with(&bbb, &cap[5], &cap[6], s2, table, options)?;
            return Self::from_keys(start, end, options);
        }

        if let Some(cap) = patterns.chapter.captures(text) {
            let bbb = single::resolve_book(&cap[1], table, options)?;
            let c = &cap[2];
            let start = VerseKey::new_with(&bbb, c, "1", "", table, options)?;
            let end = VerseKey::new_with(
                &bbb,
                c,
                &WHOLE_CHAPTER_LAST_VERSE.to_string(),
                "",
                table,
                options,
            )?;
            return Self::from_keys(start, end, options);
        }

        Err(Error::UnparseableReference {
            text: text.to_string(),
        })
    }

    /// The canonical form: the full start reference, then the minimal end
    /// tail (`-V` in-chapter, `–C:V` cross-chapter, `–BBB_C:V` cross-book).
    pub fn reference_text(&self) -> String {
        let mut out = self.start.reference_text();
        if self.start.book() != self.end.book() {
            out.push('–');
            out.push_str(&self.end.reference_text());
        } else if self.start.chapter() != self.end.chapter() {
            out.push('–');
            out.push_str(self.end.chapter());
            out.push(':');
            push_verse(&mut out, &self.end);
        } else {
            out.push('-');
            push_verse(&mut out, &self.end);
        }
        out
    }

    /// The human-readable form, e.g. `SA2 19:12-19`.
    pub fn short_text(&self) -> String {
        let mut out = self.start.short_text();
        if self.start.book() != self.end.book() {
            out.push('–');
            out.push_str(&self.end.short_text());
        } else if self.start.chapter() != self.end.chapter() {
            out.push('–');
            out.push_str(self.end.chapter());
            out.push(':');
            push_short_verse(&mut out, &self.end);
        } else {
            out.push('-');
            push_short_verse(&mut out, &self.end);
        }
        out
    }

    /// The first verse of the range.
    pub fn start(&self) -> &VerseKey {
        &self.start
    }

    /// The last verse of the range.
    pub fn end(&self) -> &VerseKey {
        &self.end
    }

    /// Every verse in the span, endpoints included, in order.
    pub fn included_verses(&self) -> Vec<VerseKey> {
        self.keys.clone()
    }

    /// Iterate over the constituent verses.
    pub fn iter(&self) -> std::slice::Iter<'_, VerseKey> {
        self.keys.iter()
    }

    /// Number of verses in the expanded span.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false: a range holds at least its start.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn push_verse(out: &mut String, key: &VerseKey) {
    out.push_str(key.verse());
    if let Some(s) = key.suffix() {
        out.push('!');
        out.push(s);
    }
}

fn push_short_verse(out: &mut String, key: &VerseKey) {
    out.push_str(key.verse());
    if let Some(s) = key.suffix() {
        out.push(s);
    }
}

/// Whether `end` lies strictly after `start`, counting a suffix change at
/// the same verse as an advance.
fn advances(start: &VerseKey, end: &VerseKey) -> bool {
    if start.book() != end.book() {
        return true;
    }
    match (start.chapter_number(), end.chapter_number()) {
        (Some(sc), Some(ec)) if sc != ec => return ec > sc,
        _ => {}
    }
    end.verse_number() > start.verse_number() || end.suffix() != start.suffix()
}

/// Expand a range into its constituent verses. The start suffix rides on
/// the first key and the end suffix on the last; interior verses are bare.
/// Spans that cannot be enumerated (non-numeric fields, backwards order,
/// differing books) degrade to just the two endpoints.
fn expand(start: &VerseKey, end: &VerseKey) -> Vec<VerseKey> {
    if start == end {
        return vec![start.clone()];
    }
    let enumerable = (
        start.chapter_number(),
        start.verse_number(),
        end.chapter_number(),
        end.verse_number(),
    );
    let (Some(sc), Some(sv), Some(ec), Some(ev)) = enumerable else {
        return vec![start.clone(), end.clone()];
    };
    if start.book() != end.book() || ec < sc || (ec == sc && ev < sv) {
        return vec![start.clone(), end.clone()];
    }
    if ec == sc && ev == sv {
        // Same verse, differing suffix: both endpoints, nothing between.
        return vec![start.clone(), end.clone()];
    }

    let mut keys = Vec::new();
    let mut c = sc;
    let mut v = sv;
    loop {
        let suffix = if c == sc && v == sv {
            start.suffix()
        } else if c == ec && v == ev {
            end.suffix()
        } else {
            None
        };
        keys.push(make_key(start.book(), c, v, suffix));
        if c == ec && v == ev {
            break;
        }
        v += 1;
        if v > CHAPTER_ROLLOVER_VERSE && c < ec {
            c += 1;
            v = 1;
        }
        // Termination guard for malformed spans.
        if v > WHOLE_CHAPTER_LAST_VERSE {
            break;
        }
    }
    keys
}

/// Endpoint fields already passed shape validation, so rebuilding interior
/// keys from numeric components cannot fail.
fn make_key(bbb: &str, c: i32, v: i32, suffix: Option<char>) -> VerseKey {
    let si = suffix.map(String::from).unwrap_or_default();
    VerseKey::new(bbb, &c.to_string(), &v.to_string(), &si)
        .unwrap_or_else(|_| unreachable!("range interior key from validated endpoints"))
}

impl fmt::Display for VerseRangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference_text())
    }
}

impl<'a> IntoIterator for &'a VerseRangeKey {
    type Item = &'a VerseKey;
    type IntoIter = std::slice::Iter<'a, VerseKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl serde::Serialize for VerseRangeKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.reference_text())
    }
}

impl<'de> serde::Deserialize<'de> for VerseRangeKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_chapter_range_expands_inclusively() {
        let range = VerseRangeKey::parse("SA2_19:12-19").unwrap();
        assert_eq!(range.len(), 8);
        assert_eq!(range.start().verse(), "12");
        assert_eq!(range.end().verse(), "19");
        assert_eq!(
            range.included_verses()[3],
            VerseKey::new("SA2", "19", "15", "").unwrap()
        );
        assert_eq!(range.reference_text(), "SA2_19:12-19");
        assert_eq!(range.short_text(), "SA2 19:12-19");
    }

    #[test]
    fn suffixes_ride_only_on_endpoints() {
        let range = VerseRangeKey::parse("GEN_1:2!b-4!a").unwrap();
        let verses = range.included_verses();
        assert_eq!(verses.len(), 3);
        assert_eq!(verses[0].suffix(), Some('b'));
        assert_eq!(verses[1].suffix(), None);
        assert_eq!(verses[2].suffix(), Some('a'));
        assert_eq!(range.reference_text(), "GEN_1:2!b-4!a");
    }

    #[test]
    fn cross_chapter_range_rolls_the_chapter() {
        let range = VerseRangeKey::parse("GEN_1:28–2:3").unwrap();
        let verses = range.included_verses();
        // 28..=222 of chapter 1, then 1..=3 of chapter 2.
        assert_eq!(verses.len(), 195 + 3);
        assert_eq!(verses[0].cv(), ("1", "28"));
        assert_eq!(verses[194].cv(), ("1", "222"));
        assert_eq!(verses[195].cv(), ("2", "1"));
        assert_eq!(verses.last().unwrap().cv(), ("2", "3"));
        assert_eq!(range.reference_text(), "GEN_1:28–2:3");
    }

    #[test]
    fn hyphen_and_dash_are_not_interchangeable() {
        assert!(VerseRangeKey::parse("GEN_1:28-2:3").is_err());
        assert!(VerseRangeKey::parse("SA2_19:12–19").is_err());
    }

    #[test]
    fn whole_chapter_shorthand_covers_the_chapter() {
        let range = VerseRangeKey::parse("PSA_23").unwrap();
        assert_eq!(range.len(), 999);
        assert_eq!(range.start().cv(), ("23", "1"));
        assert_eq!(range.end().cv(), ("23", "999"));
        assert_eq!(range.reference_text(), "PSA_23:1-999");
    }

    #[test]
    fn degenerate_and_backwards_ranges() {
        let strict = ParseOptions::strict();
        let table = BookCodeTable::standard();

        // Strict mode refuses a non-advancing range.
        assert!(matches!(
            VerseRangeKey::parse_with("SA2_19:19-12", table, strict),
            Err(Error::BackwardsRange { .. })
        ));
        assert!(matches!(
            VerseRangeKey::parse_with("SA2_19:12-12", table, strict),
            Err(Error::BackwardsRange { .. })
        ));
        // A suffix-only advance is legitimate.
        let range = VerseRangeKey::parse_with("SA2_19:12!a-12!b", table, strict).unwrap();
        assert_eq!(range.len(), 2);

        // Lenient mode degrades a backwards range to its endpoints.
        let backwards = VerseRangeKey::parse("SA2_19:19-12").unwrap();
        assert_eq!(backwards.len(), 2);
    }

    #[test]
    fn cross_book_range_from_keys() {
        let start = VerseKey::new("MAL", "4", "6", "").unwrap();
        let end = VerseKey::new("MAT", "1", "1", "").unwrap();
        let range = VerseRangeKey::from_keys(start, end, ParseOptions::default()).unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range.reference_text(), "MAL_4:6–MAT_1:1");
    }

    #[test]
    fn serde_uses_canonical_text() {
        let range = VerseRangeKey::parse("SA2_19:12-19").unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, "\"SA2_19:12-19\"");
        let back: VerseRangeKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
    }
}
