//! The book-code registry: BBB validity plus OSIS/USFM abbreviation maps.
//!
//! A `BookCodeTable` is read-only after construction. The `standard()` table
//! is built once per process; callers with non-standard canons can supply
//! their own entries and pass the table by reference to the parsers.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// One book in the registry.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct BookEntry {
    /// The internal 3-character UPPERCASE book code, e.g. `SA2`.
    pub bbb: String,
    /// The OSIS abbreviation, e.g. `2Sam`.
    pub osis: String,
    /// The 1-based reference number in canonical order.
    pub number: u16,
    /// The USFM/Paratext abbreviation, e.g. `2SA`.
    pub usfm: String,
}

/// Immutable lookup table over a set of `BookEntry`s.
pub struct BookCodeTable {
    by_bbb: HashMap<String, usize>,
    by_number: HashMap<u16, usize>,
    by_osis: HashMap<String, usize>,
    by_usfm: HashMap<String, usize>,
    entries: Vec<BookEntry>,
}

/// (BBB, OSIS, USFM, reference number) for the standard canon:
/// the 66 protocanonical books plus the common deuterocanon.
/// BBB spellings follow the internal scheme (SA1/SA2, EZE, JNA, JAM, JDE…),
/// not USFM's.
const STANDARD_BOOKS: &[(&str, &str, &str, u16)] = &[
    ("GEN", "Gen", "GEN", 1),
    ("EXO", "Exod", "EXO", 2),
    ("LEV", "Lev", "LEV", 3),
    ("NUM", "Num", "NUM", 4),
    ("DEU", "Deut", "DEU", 5),
    ("JOS", "Josh", "JOS", 6),
    ("JDG", "Judg", "JDG", 7),
    ("RUT", "Ruth", "RUT", 8),
    ("SA1", "1Sam", "1SA", 9),
    ("SA2", "2Sam", "2SA", 10),
    ("KI1", "1Kgs", "1KI", 11),
    ("KI2", "2Kgs", "2KI", 12),
    ("CH1", "1Chr", "1CH", 13),
    ("CH2", "2Chr", "2CH", 14),
    ("EZR", "Ezra", "EZR", 15),
    ("NEH", "Neh", "NEH", 16),
    ("EST", "Esth", "EST", 17),
    ("JOB", "Job", "JOB", 18),
    ("PSA", "Ps", "PSA", 19),
    ("PRO", "Prov", "PRO", 20),
    ("ECC", "Eccl", "ECC", 21),
    ("SNG", "Song", "SNG", 22),
    ("ISA", "Isa", "ISA", 23),
    ("JER", "Jer", "JER", 24),
    ("LAM", "Lam", "LAM", 25),
    ("EZE", "Ezek", "EZK", 26),
    ("DAN", "Dan", "DAN", 27),
    ("HOS", "Hos", "HOS", 28),
    ("JOL", "Joel", "JOL", 29),
    ("AMO", "Amos", "AMO", 30),
    ("OBA", "Obad", "OBA", 31),
    ("JNA", "Jonah", "JON", 32),
    ("MIC", "Mic", "MIC", 33),
    ("NAH", "Nah", "NAM", 34),
    ("HAB", "Hab", "HAB", 35),
    ("ZEP", "Zeph", "ZEP", 36),
    ("HAG", "Hag", "HAG", 37),
    ("ZEC", "Zech", "ZEC", 38),
    ("MAL", "Mal", "MAL", 39),
    ("MAT", "Matt", "MAT", 40),
    ("MRK", "Mark", "MRK", 41),
    ("LUK", "Luke", "LUK", 42),
    ("JHN", "John", "JHN", 43),
    ("ACT", "Acts", "ACT", 44),
    ("ROM", "Rom", "ROM", 45),
    ("CO1", "1Cor", "1CO", 46),
    ("CO2", "2Cor", "2CO", 47),
    ("GAL", "Gal", "GAL", 48),
    ("EPH", "Eph", "EPH", 49),
    ("PHP", "Phil", "PHP", 50),
    ("COL", "Col", "COL", 51),
    ("TH1", "1Thess", "1TH", 52),
    ("TH2", "2Thess", "2TH", 53),
    ("TI1", "1Tim", "1TI", 54),
    ("TI2", "2Tim", "2TI", 55),
    ("TIT", "Titus", "TIT", 56),
    ("PHM", "Phlm", "PHM", 57),
    ("HEB", "Heb", "HEB", 58),
    ("JAM", "Jas", "JAS", 59),
    ("PE1", "1Pet", "1PE", 60),
    ("PE2", "2Pet", "2PE", 61),
    ("JN1", "1John", "1JN", 62),
    ("JN2", "2John", "2JN", 63),
    ("JN3", "3John", "3JN", 64),
    ("JDE", "Jude", "JUD", 65),
    ("REV", "Rev", "REV", 66),
    ("TOB", "Tob", "TOB", 67),
    ("JDT", "Jdt", "JDT", 68),
    ("ESG", "EsthGr", "ESG", 69),
    ("WIS", "Wis", "WIS", 70),
    ("SIR", "Sir", "SIR", 71),
    ("BAR", "Bar", "BAR", 72),
    ("LJE", "EpJer", "LJE", 73),
    ("SUS", "Sus", "SUS", 74),
    ("BEL", "Bel", "BEL", 75),
    ("MA1", "1Macc", "1MA", 76),
    ("MA2", "2Macc", "2MA", 77),
];

static STANDARD_TABLE: Lazy<BookCodeTable> = Lazy::new(|| {
    BookCodeTable::from_entries(
        STANDARD_BOOKS
            .iter()
            .map(|&(bbb, osis, usfm, number)| BookEntry {
                bbb: bbb.to_string(),
                osis: osis.to_string(),
                number,
                usfm: usfm.to_string(),
            })
            .collect(),
    )
});

impl BookCodeTable {
    /// The built-in standard canon, constructed on first use.
    pub fn standard() -> &'static Self {
        &STANDARD_TABLE
    }

    /// Build a table from caller-supplied entries.
    /// Later duplicates of a BBB, OSIS, or USFM key shadow earlier ones.
    pub fn from_entries(entries: Vec<BookEntry>) -> Self {
        let mut by_bbb = HashMap::new();
        let mut by_number = HashMap::new();
        let mut by_osis = HashMap::new();
        let mut by_usfm = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_bbb.insert(entry.bbb.clone(), idx);
            by_number.insert(entry.number, idx);
            by_osis.insert(entry.osis.clone(), idx);
            by_usfm.insert(entry.usfm.clone(), idx);
        }
        Self {
            by_bbb,
            by_number,
            by_osis,
            by_usfm,
            entries,
        }
    }

    /// Whether a BBB code is in the registry. Case-sensitive.
    pub fn is_valid(&self, bbb: &str) -> bool {
        self.by_bbb.contains_key(bbb)
    }

    /// The OSIS abbreviation for a BBB code, if any.
    pub fn osis_abbreviation(&self, bbb: &str) -> Option<&str> {
        self.by_bbb
            .get(bbb)
            .map(|&idx| self.entries[idx].osis.as_str())
    }

    /// Map an OSIS abbreviation back to its BBB code.
    pub fn bbb_from_osis(&self, abbreviation: &str) -> Option<&str> {
        self.by_osis
            .get(abbreviation)
            .map(|&idx| self.entries[idx].bbb.as_str())
    }

    /// Map a USFM/Paratext abbreviation to its BBB code.
    pub fn bbb_from_usfm(&self, abbreviation: &str) -> Option<&str> {
        self.by_usfm
            .get(abbreviation)
            .map(|&idx| self.entries[idx].bbb.as_str())
    }

    /// Map a 1-based reference number to its BBB code.
    pub fn bbb_from_reference_number(&self, number: u16) -> Option<&str> {
        self.by_number
            .get(&number)
            .map(|&idx| self.entries[idx].bbb.as_str())
    }

    /// Number of books in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
