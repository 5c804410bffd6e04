//! Postings, inverted lists, score lists and the cursors that walk them.
//!
//! These are the data structures every operator reads and produces. All of them
//! keep their entries sorted by ascending document id; the merge algorithms in
//! [`crate::query`] depend on that ordering and never re-check it.

pub mod cursor;
pub mod inverted_list;
pub mod posting;
pub mod score_list;

pub use self::cursor::{DocCursor, DocSequence, PositionCursor};
pub use self::inverted_list::InvertedList;
pub use self::posting::Posting;
pub use self::score_list::{IdResolution, RankedHit, ScoreList, ScoreListEntry};

/// Internal document identifier assigned by the index.
pub type DocId = u64;

/// Token position within a document field.
pub type Position = u32;
