//! Parsing, serialization, and range expansion for compact Bible verse
//! references in the `BBB_C:V` notation.
//!
//! A reference names a book by its 3-character code, then a chapter and
//! verse (`GEN_1:1`), optionally refined by a sub-verse suffix
//! (`REV_11:12!b`) or a character-offset index (`EXO_17:9!5`). Lists
//! (`SA2_19:12,19`), inclusive ranges (`SA2_19:12-19`), whole chapters
//! (`PSA_23`), and mixed compounds (`GEN_1:1,3-4`) build on the same
//! grammar, and every shape can enumerate the individual verses it
//! denotes. The OSIS interchange notation (`Gen.1.1`) is supported as an
//! alternative surface via [`ParseOptions`].
//!
//! ```
//! use versekey::{CompoundVerseKey, VerseKey};
//!
//! let key = VerseKey::parse("SA2_19:12!b")?;
//! assert_eq!(key.short_text(), "SA2 19:12b");
//!
//! let compound = CompoundVerseKey::parse("GEN_1:1,3-4")?;
//! assert_eq!(compound.included_verses().len(), 3);
//! # Ok::<(), versekey::Error>(())
//! ```

pub mod books;
pub mod compound;
pub mod error;
mod grammar;
pub mod list;
pub mod options;
pub mod range;
pub mod single;

pub use books::{BookCodeTable, BookEntry};
pub use compound::{CompoundVerseKey, VerseKeyPart};
pub use error::Error;
pub use list::VerseListKey;
pub use options::{Notation, ParseOptions};
pub use range::VerseRangeKey;
pub use single::VerseKey;
