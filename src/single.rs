//! A single verse locator in BCVS/BCVI form.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::books::BookCodeTable;
use crate::error::Error;
use crate::grammar;
use crate::options::{Notation, ParseOptions};

/// Characters that may never appear inside a reference field.
const SEPARATOR_CHARS: [char; 5] = [' ', '-', ',', '.', ':'];

/// One exact verse locator: book code, chapter, verse, and optionally either
/// a sub-verse suffix (`a`..`d`) or a character-offset index — never both.
///
/// Chapter and verse are kept as strings: external data occasionally carries
/// non-numeric values, and `-1`/`0` serve as book-intro/caption sentinels.
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct VerseKey {
    bbb: String,
    c: String,
    v: String,
    suffix: Option<char>,
    index: Option<String>,
}

impl VerseKey {
    /// Construct from explicit components, validating field shapes against
    /// the standard book-code table with default (lenient) options.
    ///
    /// `si` is either empty, a single suffix letter `a`..`d`, or a 1-4 digit
    /// index into the verse text.
    ///
    /// # Errors
    ///
    /// Returns a shape-violation error for any malformed field, or
    /// `Error::UnknownBookCode` under strict book checking.
    pub fn new(bbb: &str, c: &str, v: &str, si: &str) -> Result<Self, Error> {
        Self::new_with(bbb, c, v, si, BookCodeTable::standard(), ParseOptions::default())
    }

    /// Construct from explicit components against a caller-supplied table.
    ///
    /// # Errors
    ///
    /// Same as [`VerseKey::new`].
    pub fn new_with(
        bbb: &str,
        c: &str,
        v: &str,
        si: &str,
        table: &BookCodeTable,
        options: ParseOptions,
    ) -> Result<Self, Error> {
        if bbb.len() != 3 || bbb.contains(SEPARATOR_CHARS) {
            return Err(Error::BadBookField {
                value: bbb.to_string(),
            });
        }
        // The -1 chapter sentinel marks book-intro material and is the one
        // value allowed to carry a separator character.
        if !(1..=3).contains(&c.len()) || (c.contains(SEPARATOR_CHARS) && c != "-1") {
            return Err(Error::BadChapterField {
                value: c.to_string(),
            });
        }
        if !(1..=3).contains(&v.len()) || v.contains(SEPARATOR_CHARS) {
            return Err(Error::BadVerseField {
                value: v.to_string(),
            });
        }
        check_book_code(bbb, table, options)?;

        let (suffix, index) = split_suffix_or_index(si)?;
        Ok(Self {
            bbb: bbb.to_string(),
            c: c.to_string(),
            v: v.to_string(),
            suffix,
            index,
        })
    }

    /// Parse a reference string such as `SA2_19:5!b` or `REV_9:1!7`,
    /// using the standard table and default options.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnparseableReference` if the string matches neither
    /// the suffix nor the index grammar, or a book-code error per options.
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with(text, BookCodeTable::standard(), ParseOptions::default())
    }

    /// Parse with an explicit table and options (notation, strictness).
    ///
    /// # Errors
    ///
    /// Same as [`VerseKey::parse`].
    pub fn parse_with(
        text: &str,
        table: &BookCodeTable,
        options: ParseOptions,
    ) -> Result<Self, Error> {
        let patterns = grammar::patterns(options.notation);

        if let Some(cap) = patterns.single_suffix.captures(text) {
            let bbb = resolve_book(&cap[1], table, options)?;
            return Ok(Self {
                bbb,
                c: cap[2].to_string(),
                v: cap[3].to_string(),
                suffix: cap.get(4).and_then(|m| m.as_str().chars().next()),
                index: None,
            });
        }

        if let Some(cap) = patterns.single_index.captures(text) {
            let bbb = resolve_book(&cap[1], table, options)?;
            return Ok(Self {
                bbb,
                c: cap[2].to_string(),
                v: cap[3].to_string(),
                suffix: None,
                index: cap.get(4).map(|m| m.as_str().to_string()),
            });
        }

        Err(Error::UnparseableReference {
            text: text.to_string(),
        })
    }

    /// The canonical round-trippable form, e.g. `GEN_1:1` or `REV_11:12!b`.
    pub fn reference_text(&self) -> String {
        match (self.suffix, &self.index) {
            (Some(s), _) => format!("{}_{}:{}!{}", self.bbb, self.c, self.v, s),
            (None, Some(i)) => format!("{}_{}:{}!{}", self.bbb, self.c, self.v, i),
            (None, None) => format!("{}_{}:{}", self.bbb, self.c, self.v),
        }
    }

    /// The human-readable form, e.g. `GEN 1:1` or `REV 11:12b`.
    /// A numeric index keeps its `!` marker to stay distinguishable.
    pub fn short_text(&self) -> String {
        match (self.suffix, &self.index) {
            (Some(s), _) => format!("{} {}:{}{}", self.bbb, self.c, self.v, s),
            (None, Some(i)) => format!("{} {}:{}!{}", self.bbb, self.c, self.v, i),
            (None, None) => format!("{} {}:{}", self.bbb, self.c, self.v),
        }
    }

    /// The OSIS interop form `Abbrev.C.V`, e.g. `2Sam.19.12`.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingOsisAbbreviation` if the table has no OSIS
    /// mapping for this book code.
    pub fn osis_reference(&self, table: &BookCodeTable) -> Result<String, Error> {
        let abbreviation =
            table
                .osis_abbreviation(&self.bbb)
                .ok_or_else(|| Error::MissingOsisAbbreviation {
                    bbb: self.bbb.clone(),
                })?;
        Ok(format!("{}.{}.{}", abbreviation, self.c, self.v))
    }

    /// The 3-character book code.
    pub fn book(&self) -> &str {
        &self.bbb
    }

    /// The chapter number string.
    pub fn chapter(&self) -> &str {
        &self.c
    }

    /// The verse number string.
    pub fn verse(&self) -> &str {
        &self.v
    }

    /// The sub-verse suffix letter, if any.
    pub fn suffix(&self) -> Option<char> {
        self.suffix
    }

    /// The character-offset index string, if any.
    pub fn verse_index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// (book, chapter, verse).
    pub fn bcv(&self) -> (&str, &str, &str) {
        (&self.bbb, &self.c, &self.v)
    }

    /// (book, chapter, verse, suffix).
    pub fn bcvs(&self) -> (&str, &str, &str, Option<char>) {
        (&self.bbb, &self.c, &self.v, self.suffix)
    }

    /// (book, chapter, verse, index).
    pub fn bcvi(&self) -> (&str, &str, &str, Option<&str>) {
        (&self.bbb, &self.c, &self.v, self.index.as_deref())
    }

    /// (chapter, verse).
    pub fn cv(&self) -> (&str, &str) {
        (&self.c, &self.v)
    }

    /// (chapter, verse, suffix).
    pub fn cvs(&self) -> (&str, &str, Option<char>) {
        (&self.c, &self.v, self.suffix)
    }

    /// (chapter, verse, index).
    pub fn cvi(&self) -> (&str, &str, Option<&str>) {
        (&self.c, &self.v, self.index.as_deref())
    }

    /// The chapter as an integer. Mixed strings like `5a` degrade to their
    /// leading digit run with a logged warning; `None` if no digits lead.
    pub fn chapter_number(&self) -> Option<i32> {
        leading_number(&self.c, "chapter")
    }

    /// The verse as an integer, degrading like [`VerseKey::chapter_number`].
    pub fn verse_number(&self) -> Option<i32> {
        leading_number(&self.v, "verse")
    }

    /// Every individual verse this key denotes: itself, exactly once.
    /// Present for interchangeability with the list/range/compound keys.
    pub fn included_verses(&self) -> Vec<VerseKey> {
        vec![self.clone()]
    }

    /// Iterate over the constituent single verses: just this key.
    pub fn iter(&self) -> std::iter::Once<&VerseKey> {
        std::iter::once(self)
    }
}

/// Equality covers (book, chapter, verse, suffix); the verse index is
/// deliberately excluded, so two keys differing only by index compare equal.
impl PartialEq for VerseKey {
    fn eq(&self, other: &Self) -> bool {
        self.bbb == other.bbb
            && self.c == other.c
            && self.v == other.v
            && self.suffix == other.suffix
    }
}

impl Eq for VerseKey {}

/// Hashing follows equality: the index is excluded here too.
impl Hash for VerseKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bbb.hash(state);
        self.c.hash(state);
        self.v.hash(state);
        self.suffix.hash(state);
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference_text())
    }
}

impl<'a> IntoIterator for &'a VerseKey {
    type Item = &'a VerseKey;
    type IntoIter = std::iter::Once<&'a VerseKey>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}

impl serde::Serialize for VerseKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.reference_text())
    }
}

impl<'de> serde::Deserialize<'de> for VerseKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Validate a book code against the registry: an error under strict
/// checking, a logged warning otherwise (some external sources use
/// slightly non-standard codes).
pub(crate) fn check_book_code(
    bbb: &str,
    table: &BookCodeTable,
    options: ParseOptions,
) -> Result<(), Error> {
    if table.is_valid(bbb) {
        return Ok(());
    }
    if options.strict_books {
        return Err(Error::UnknownBookCode {
            code: bbb.to_string(),
        });
    }
    log::warn!("unknown book code {bbb:?}");
    Ok(())
}

/// Turn the raw book capture into a BBB code. Internal notation validates
/// the code directly; OSIS notation must map the abbreviation first and
/// fails hard when it can't (there is no code to fall back to).
pub(crate) fn resolve_book(
    raw: &str,
    table: &BookCodeTable,
    options: ParseOptions,
) -> Result<String, Error> {
    match options.notation {
        Notation::Internal => {
            check_book_code(raw, table, options)?;
            Ok(raw.to_string())
        }
        Notation::Osis => table.bbb_from_osis(raw).map(str::to_string).ok_or_else(|| {
            Error::UnknownOsisAbbreviation {
                abbreviation: raw.to_string(),
            }
        }),
    }
}

/// Split a combined suffix-or-index field: empty means neither, a single
/// letter `a`..`d` is a suffix, 1-4 digits are an index.
fn split_suffix_or_index(si: &str) -> Result<(Option<char>, Option<String>), Error> {
    if si.is_empty() {
        return Ok((None, None));
    }
    if si.len() == 1 && si.chars().all(|ch| ('a'..='d').contains(&ch)) {
        return Ok((si.chars().next(), None));
    }
    if (1..=4).contains(&si.len()) && si.chars().all(|ch| ch.is_ascii_digit()) {
        return Ok((None, Some(si.to_string())));
    }
    Err(Error::BadSuffixField {
        value: si.to_string(),
    })
}

/// Integer coercion with graceful degradation: a full parse first, then a
/// leading digit run with a warning, then `None`.
fn leading_number(value: &str, label: &str) -> Option<i32> {
    if let Ok(n) = value.parse::<i32>() {
        return Some(n);
    }
    log::warn!("unusual {label} value: {value:?}");
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
