//! A list of individually named verses, e.g. `SA2_19:12,19`.

use std::fmt;

use crate::books::BookCodeTable;
use crate::error::Error;
use crate::grammar::{self, MAX_LIST_LEN};
use crate::options::ParseOptions;
use crate::single::{self, VerseKey};

/// An explicit enumeration of 2 to 9 verses, in textual order.
///
/// Comma-separated elements share a chapter (`SA2_19:12,19`);
/// semicolon-separated elements each restate their chapter
/// (`SA2_19:12;20:1`). Lists built from keys may also span books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseListKey {
    keys: Vec<VerseKey>,
}

impl VerseListKey {
    /// Build a list from already-constructed keys.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnparseableReference` for fewer than 2 or more than
    /// 9 keys, and `Error::VersesNotIncreasing` under strict ordering when
    /// consecutive verses fail to advance.
    pub fn from_keys(keys: Vec<VerseKey>, options: ParseOptions) -> Result<Self, Error> {
        if !(2..=MAX_LIST_LEN).contains(&keys.len()) {
            return Err(Error::UnparseableReference {
                text: format!("verse list of {} keys", keys.len()),
            });
        }
        if options.strict_order {
            check_ordering(&keys)?;
        }
        Ok(Self { keys })
    }

    /// Parse a list reference with the standard table and default options.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnparseableReference` when the string is not a
    /// comma or semicolon list of 2 to 9 verses.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, BookCodeTable::standard(), ParseOptions::default())
    }

    /// Parse with an explicit table and options.
    ///
    /// # Errors
    ///
    /// Same as [`VerseListKey::parse`], plus book-code and ordering errors
    /// per options.
    pub fn parse_with(
        text: &str,
        table: &BookCodeTable,
        options: ParseOptions,
    ) -> Result<Self, Error> {
        let patterns = grammar::patterns(options.notation);

        // Comma lists share one chapter; group layout is book, chapter,
        // then a (verse, suffix) pair per element.
        for regex in &patterns.comma_lists {
            if let Some(cap) = regex.captures(text) {
                let bbb = single::resolve_book(&cap[1], table, options)?;
                let c = cap[2].to_string();
                let mut keys = Vec::new();
                let mut group = 3;
                while group < cap.len() {
                    let Some(v) = cap.get(group).map(|m| m.as_str()) else {
                        break;
                    };
                    let si = cap.get(group + 1).map_or("", |m| m.as_str());
                    keys.push(VerseKey::new_with(&bbb, &c, v, si, table, options)?);
                    group += 2;
                }
                return Self::finish(keys, text, options);
            }
        }

        // Semicolon lists restate the chapter; layout is book, then a
        // (chapter, verse, suffix) triple per element.
        for regex in &patterns.semicolon_lists {
            if let Some(cap) = regex.captures(text) {
                let bbb = single::resolve_book(&cap[1], table, options)?;
                let mut keys = Vec::new();
                let mut group = 2;
                while group + 1 < cap.len() {
                    let Some(c) = cap.get(group).map(|m| m.as_str()) else {
                        break;
                    };
                    let v = &cap[group + 1];
                    let si = cap.get(group + 2).map_or("", |m| m.as_str());
                    keys.push(VerseKey::new_with(&bbb, c, v, si, table, options)?);
                    group += 3;
                }
                return Self::finish(keys, text, options);
            }
        }

        Err(Error::UnparseableReference {
            text: text.to_string(),
        })
    }

    fn finish(keys: Vec<VerseKey>, text: &str, options: ParseOptions) -> Result<Self, Error> {
        if keys.len() < 2 {
            return Err(Error::UnparseableReference {
                text: text.to_string(),
            });
        }
        if options.strict_order {
            check_ordering(&keys)?;
        }
        Ok(Self { keys })
    }

    /// The canonical form, reissuing the minimal separator per element:
    /// `,V` within a chapter, `;C:V` across chapters, `;BBB_C:V` across
    /// books.
    pub fn reference_text(&self) -> String {
        let mut out = String::new();
        let mut previous: Option<&VerseKey> = None;
        for key in &self.keys {
            match previous {
                None => out.push_str(&key.reference_text()),
                Some(prev) if prev.book() == key.book() && prev.chapter() == key.chapter() => {
                    out.push(',');
                    push_verse(&mut out, key);
                }
                Some(prev) if prev.book() == key.book() => {
                    out.push(';');
                    out.push_str(key.chapter());
                    out.push(':');
                    push_verse(&mut out, key);
                }
                Some(_) => {
                    out.push(';');
                    out.push_str(&key.reference_text());
                }
            }
            previous = Some(key);
        }
        out
    }

    /// The human-readable form, e.g. `SA2 19:12,19`.
    pub fn short_text(&self) -> String {
        let mut out = String::new();
        let mut previous: Option<&VerseKey> = None;
        for key in &self.keys {
            match previous {
                None => out.push_str(&key.short_text()),
                Some(prev) if prev.book() == key.book() && prev.chapter() == key.chapter() => {
                    out.push(',');
                    push_short_verse(&mut out, key);
                }
                Some(prev) if prev.book() == key.book() => {
                    out.push_str("; ");
                    out.push_str(key.chapter());
                    out.push(':');
                    push_short_verse(&mut out, key);
                }
                Some(_) => {
                    out.push_str("; ");
                    out.push_str(&key.short_text());
                }
            }
            previous = Some(key);
        }
        out
    }

    /// Every verse named by the list, in order, duplicates preserved.
    pub fn included_verses(&self) -> Vec<VerseKey> {
        self.keys.clone()
    }

    /// Iterate over the constituent verses.
    pub fn iter(&self) -> std::slice::Iter<'_, VerseKey> {
        self.keys.iter()
    }

    /// Number of verses in the list.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false: a list carries at least 2 verses.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
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

fn push_short_verse(out: &mut String, key: &VerseKey) {
    out.push_str(key.verse());
    if let Some(s) = key.suffix() {
        out.push(s);
    } else if let Some(i) = key.verse_index() {
        out.push('!');
        out.push_str(i);
    }
}

/// Strict ordering: each verse must advance by at least 2 within a chapter
/// unless the suffix changes (a gap of exactly 1 should be a range), and
/// chapters and books must not run backwards.
pub(crate) fn check_ordering(keys: &[VerseKey]) -> Result<(), Error> {
    for pair in keys.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.book() != next.book() {
            continue;
        }
        let (pc, nc) = (prev.chapter_number(), next.chapter_number());
        if nc > pc {
            continue;
        }
        let advances = nc == pc
            && (next.verse_number() > prev.verse_number().map(|v| v + 1)
                || next.suffix() != prev.suffix());
        if !advances {
            return Err(Error::VersesNotIncreasing {
                text: format!("{} then {}", prev.reference_text(), next.reference_text()),
            });
        }
    }
    Ok(())
}

impl fmt::Display for VerseListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference_text())
    }
}

impl<'a> IntoIterator for &'a VerseListKey {
    type Item = &'a VerseKey;
    type IntoIter = std::slice::Iter<'a, VerseKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl serde::Serialize for VerseListKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.reference_text())
    }
}

impl<'de> serde::Deserialize<'de> for VerseListKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_list_parses_and_round_trips() {
        let list = VerseListKey::parse("SA2_19:12,19").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.reference_text(), "SA2_19:12,19");
        assert_eq!(list.short_text(), "SA2 19:12,19");
        let verses = list.included_verses();
        assert_eq!(verses[0], VerseKey::new("SA2", "19", "12", "").unwrap());
        assert_eq!(verses[1], VerseKey::new("SA2", "19", "19", "").unwrap());
    }

    #[test]
    fn comma_list_carries_suffixes() {
        let list = VerseListKey::parse("GEN_1:5!a,7,9!b").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.included_verses()[0].suffix(), Some('a'));
        assert_eq!(list.included_verses()[2].suffix(), Some('b'));
        assert_eq!(list.reference_text(), "GEN_1:5!a,7,9!b");
    }

    #[test]
    fn semicolon_list_spans_chapters() {
        let list = VerseListKey::parse("SA2_19:12;20:1").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.included_verses()[1].cv(), ("20", "1"));
        assert_eq!(list.reference_text(), "SA2_19:12;20:1");
        assert_eq!(list.short_text(), "SA2 19:12; 20:1");
    }

    #[test]
    fn long_lists_up_to_nine_elements() {
        let list = VerseListKey::parse("PSA_119:1,9,17,25,33,41,49,57,65").unwrap();
        assert_eq!(list.len(), 9);
        assert_eq!(list.reference_text(), "PSA_119:1,9,17,25,33,41,49,57,65");
    }

    #[test]
    fn single_verse_and_overlong_lists_fail() {
        assert!(VerseListKey::parse("GEN_1:1").is_err());
        assert!(VerseListKey::parse("PSA_119:1,9,17,25,33,41,49,57,65,73").is_err());
    }

    #[test]
    fn from_keys_spans_books() {
        let keys = vec![
            VerseKey::new("MAL", "4", "6", "").unwrap(),
            VerseKey::new("MAT", "1", "1", "").unwrap(),
        ];
        let list = VerseListKey::from_keys(keys, ParseOptions::default()).unwrap();
        assert_eq!(list.reference_text(), "MAL_4:6;MAT_1:1");
    }

    #[test]
    fn strict_order_rejects_adjacent_and_backwards_verses() {
        let strict = ParseOptions::strict();
        let table = BookCodeTable::standard();
        // A gap of exactly 1 should have been written as a range.
        assert!(matches!(
            VerseListKey::parse_with("SA2_19:12,13", table, strict),
            Err(Error::VersesNotIncreasing { .. })
        ));
        assert!(matches!(
            VerseListKey::parse_with("SA2_19:19,12", table, strict),
            Err(Error::VersesNotIncreasing { .. })
        ));
        // A suffix change excuses the small gap.
        assert!(VerseListKey::parse_with("SA2_19:12!a,13!b", table, strict).is_ok());
        // Lenient mode accepts all of these.
        assert!(VerseListKey::parse("SA2_19:12,13").is_ok());
    }

    #[test]
    fn serde_uses_canonical_text() {
        let list = VerseListKey::parse("SA2_19:12,19").unwrap();
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, "\"SA2_19:12,19\"");
        let back: VerseListKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
    }
}
