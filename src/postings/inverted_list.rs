//! Field-scoped inverted lists.

use serde::{Deserialize, Serialize};

use crate::postings::{DocId, Position, Posting};

/// The postings of one term (or one positional operator result) within one field.
///
/// Postings are strictly increasing by document id. Lists produced by operators
/// are built with [`InvertedList::append_posting`], which only ever appends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvertedList {
    /// The field the postings belong to.
    field: String,
    /// The postings, sorted by document id.
    postings: Vec<Posting>,
}

impl InvertedList {
    /// Create a new empty inverted list for a field.
    pub fn new<S: Into<String>>(field: S) -> Self {
        InvertedList {
            field: field.into(),
            postings: Vec::new(),
        }
    }

    /// Create an inverted list from postings already sorted by document id.
    ///
    /// Sortedness is the supplier's responsibility and is not re-checked in
    /// release builds.
    pub fn from_postings<S: Into<String>>(field: S, postings: Vec<Posting>) -> Self {
        debug_assert!(
            postings.windows(2).all(|w| w[0].docid < w[1].docid),
            "postings must be strictly increasing by docid"
        );
        InvertedList {
            field: field.into(),
            postings,
        }
    }

    /// Append a posting for a document that sorts after every existing one.
    pub fn append_posting(&mut self, docid: DocId, positions: Vec<Position>) {
        debug_assert!(
            self.postings.last().is_none_or(|last| last.docid < docid),
            "postings must be appended in increasing docid order"
        );
        self.postings.push(Posting::new(docid, positions));
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the postings.
    pub fn postings(&self) -> &[Posting] {
        &self.postings
    }

    /// Get the n'th posting.
    pub fn posting(&self, n: usize) -> Option<&Posting> {
        self.postings.get(n)
    }

    /// Get the document id of the n'th posting.
    pub fn docid(&self, n: usize) -> Option<DocId> {
        self.postings.get(n).map(|p| p.docid)
    }

    /// Number of postings.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check if the list has no postings.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Document frequency.
    pub fn df(&self) -> usize {
        self.postings.len()
    }

    /// Collection term frequency: total occurrences across all documents.
    pub fn ctf(&self) -> u64 {
        self.postings.iter().map(|p| p.tf() as u64).sum()
    }

    /// Get an iterator over the postings.
    pub fn iter(&'_ self) -> std::slice::Iter<'_, Posting> {
        self.postings.iter()
    }
}

impl<'a> IntoIterator for &'a InvertedList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;

    fn into_iter(self) -> Self::IntoIter {
        self.postings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_access() {
        let mut list = InvertedList::new("body");
        list.append_posting(3, vec![1, 4]);
        list.append_posting(9, vec![2]);

        assert_eq!(list.field(), "body");
        assert_eq!(list.len(), 2);
        assert_eq!(list.docid(0), Some(3));
        assert_eq!(list.docid(1), Some(9));
        assert_eq!(list.docid(2), None);
        assert_eq!(list.posting(0).unwrap().positions(), &[1, 4]);
    }

    #[test]
    fn test_statistics() {
        let list = InvertedList::from_postings(
            "title",
            vec![Posting::new(1, vec![0, 3, 7]), Posting::new(4, vec![2])],
        );

        assert_eq!(list.df(), 2);
        assert_eq!(list.ctf(), 4);
        assert!(!list.is_empty());
        assert!(InvertedList::new("title").is_empty());
    }

    #[test]
    fn test_iteration_order() {
        let list = InvertedList::from_postings(
            "body",
            vec![
                Posting::new(1, vec![0]),
                Posting::new(2, vec![0]),
                Posting::new(8, vec![0]),
            ],
        );

        let docids: Vec<DocId> = list.iter().map(|p| p.docid).collect();
        assert_eq!(docids, vec![1, 2, 8]);
    }
}
