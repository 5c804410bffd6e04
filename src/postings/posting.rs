//! A single document's occurrence record for a term.

use serde::{Deserialize, Serialize};

use crate::postings::{DocId, Position};

/// One document's positions for a term (or for a positional operator's matches).
///
/// Positions are strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Document ID.
    pub docid: DocId,
    /// Positions of the occurrences in the document field.
    pub positions: Vec<Position>,
}

impl Posting {
    /// Create a new posting.
    pub fn new(docid: DocId, positions: Vec<Position>) -> Self {
        debug_assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "positions must be strictly increasing"
        );
        Posting { docid, positions }
    }

    /// Get the positions.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Term frequency: the number of occurrences in the document.
    pub fn tf(&self) -> u32 {
        self.positions.len() as u32
    }
}
