//! Document-at-a-time cursors.
//!
//! A cursor is a borrowed reference to an immutable, docid-sorted sequence plus
//! an index into it. The traversal state lives in the cursor, never in the list,
//! so any number of cursors may walk the same list at once. Cursors only move
//! forward.

use crate::postings::{DocId, InvertedList, Position, Posting, ScoreList, ScoreListEntry};

/// A sequence of entries sorted by strictly increasing document id.
pub trait DocSequence {
    /// Number of entries.
    fn doc_count(&self) -> usize;

    /// Document id of the entry at `index`. `index` must be in bounds.
    fn docid_at(&self, index: usize) -> DocId;
}

impl DocSequence for InvertedList {
    fn doc_count(&self) -> usize {
        self.len()
    }

    fn docid_at(&self, index: usize) -> DocId {
        self.postings()[index].docid
    }
}

impl DocSequence for ScoreList {
    fn doc_count(&self) -> usize {
        self.len()
    }

    fn docid_at(&self, index: usize) -> DocId {
        self.entries()[index].docid
    }
}

/// A forward-only traversal position into a [`DocSequence`].
#[derive(Debug)]
pub struct DocCursor<'a, S: DocSequence + ?Sized> {
    target: &'a S,
    position: usize,
}

impl<S: DocSequence + ?Sized> Clone for DocCursor<'_, S> {
    fn clone(&self) -> Self {
        DocCursor {
            target: self.target,
            position: self.position,
        }
    }
}

impl<'a, S: DocSequence + ?Sized> DocCursor<'a, S> {
    /// Create a cursor positioned at the first entry.
    pub fn new(target: &'a S) -> Self {
        DocCursor {
            target,
            position: 0,
        }
    }

    /// The sequence this cursor walks.
    pub fn target(&self) -> &'a S {
        self.target
    }

    /// Current index into the sequence.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether the cursor has moved past the last entry.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.target.doc_count()
    }

    /// Document id under the cursor, or `None` once exhausted.
    pub fn docid(&self) -> Option<DocId> {
        if self.is_exhausted() {
            None
        } else {
            Some(self.target.docid_at(self.position))
        }
    }

    /// Move to the next entry.
    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.position += 1;
        }
    }

    /// Skip every entry whose docid is smaller than `target`.
    ///
    /// Returns the docid the cursor lands on.
    pub fn advance_to(&mut self, target: DocId) -> Option<DocId> {
        while let Some(docid) = self.docid() {
            if docid >= target {
                return Some(docid);
            }
            self.position += 1;
        }
        None
    }

    /// Skip every entry whose docid is smaller than or equal to `docid`.
    pub fn advance_past(&mut self, docid: DocId) -> Option<DocId> {
        match docid.checked_add(1) {
            Some(next) => self.advance_to(next),
            None => {
                self.position = self.target.doc_count();
                None
            }
        }
    }
}

impl<'a> DocCursor<'a, InvertedList> {
    /// Posting under the cursor.
    pub fn posting(&self) -> Option<&'a Posting> {
        self.target.posting(self.position)
    }
}

impl<'a> DocCursor<'a, ScoreList> {
    /// Score list entry under the cursor.
    pub fn entry(&self) -> Option<&'a ScoreListEntry> {
        self.target.entries().get(self.position)
    }
}

/// A forward-only cursor over one posting's positions.
#[derive(Debug, Clone)]
pub struct PositionCursor<'a> {
    positions: &'a [Position],
    index: usize,
}

impl<'a> PositionCursor<'a> {
    /// Create a cursor at the first position.
    pub fn new(positions: &'a [Position]) -> Self {
        PositionCursor {
            positions,
            index: 0,
        }
    }

    /// Current index into the positions.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position under the cursor.
    pub fn current(&self) -> Option<Position> {
        self.positions.get(self.index).copied()
    }

    /// Whether every position has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.index >= self.positions.len()
    }

    /// Move to the next position.
    pub fn advance(&mut self) {
        if !self.is_exhausted() {
            self.index += 1;
        }
    }

    /// Skip positions smaller than or equal to `position`.
    pub fn advance_past(&mut self, position: Position) -> Option<Position> {
        while let Some(current) = self.current() {
            if current > position {
                return Some(current);
            }
            self.index += 1;
        }
        None
    }
}
