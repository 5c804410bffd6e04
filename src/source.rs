//! Collaborators that feed the evaluator.
//!
//! The evaluator never reads an index directly. It asks a [`PostingSource`] for
//! a term's inverted list and an [`ExternalIdResolver`] for the stable id of a
//! document. The in-memory implementations here hold lists that were built
//! elsewhere; they are what tests and small embedded deployments use.

use std::fmt::Debug;

use ahash::AHashMap;

use crate::error::{DaatError, Result};
use crate::model::RetrievalModel;
use crate::postings::{DocId, InvertedList};

/// Supplies term inverted lists.
///
/// Returned lists must be strictly increasing by docid and by position within
/// each posting. The evaluator does not validate this.
pub trait PostingSource: Send + Sync + Debug {
    /// Get the inverted list of `term` in `field`.
    ///
    /// A term that does not occur yields an empty list in `field`.
    fn inverted_list(&self, term: &str, field: &str, model: RetrievalModel)
    -> Result<InvertedList>;
}

/// Maps internal document ids to external document ids.
pub trait ExternalIdResolver: Send + Sync + Debug {
    /// Get the external id of a document.
    fn external_id(&self, docid: DocId) -> Result<String>;
}

/// A posting source over pre-built inverted lists held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPostingSource {
    lists: AHashMap<String, AHashMap<String, InvertedList>>,
}

impl MemoryPostingSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the inverted list of a term. The list's field is the key.
    pub fn insert<S: Into<String>>(&mut self, term: S, list: InvertedList) {
        self.lists
            .entry(list.field().to_string())
            .or_default()
            .insert(term.into(), list);
    }

    /// Builder-style [`MemoryPostingSource::insert`].
    pub fn with_list<S: Into<String>>(mut self, term: S, list: InvertedList) -> Self {
        self.insert(term, list);
        self
    }

    /// Number of registered term lists across all fields.
    pub fn len(&self) -> usize {
        self.lists.values().map(|terms| terms.len()).sum()
    }

    /// Check if no list is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PostingSource for MemoryPostingSource {
    fn inverted_list(
        &self,
        term: &str,
        field: &str,
        _model: RetrievalModel,
    ) -> Result<InvertedList> {
        Ok(self
            .lists
            .get(field)
            .and_then(|terms| terms.get(term))
            .cloned()
            .unwrap_or_else(|| InvertedList::new(field)))
    }
}

/// An external id table held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryExternalIds {
    ids: AHashMap<DocId, String>,
}

impl MemoryExternalIds {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a document to its external id.
    pub fn insert<S: Into<String>>(&mut self, docid: DocId, external_id: S) {
        self.ids.insert(docid, external_id.into());
    }

    /// Number of mapped documents.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<(DocId, String)> for MemoryExternalIds {
    fn from_iter<I: IntoIterator<Item = (DocId, String)>>(iter: I) -> Self {
        MemoryExternalIds {
            ids: iter.into_iter().collect(),
        }
    }
}

impl ExternalIdResolver for MemoryExternalIds {
    fn external_id(&self, docid: DocId) -> Result<String> {
        self.ids
            .get(&docid)
            .cloned()
            .ok_or(DaatError::UnknownDocument(docid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postings::Posting;

    #[test]
    fn test_memory_source_lookup() {
        let source = MemoryPostingSource::new().with_list(
            "apple",
            InvertedList::from_postings("body", vec![Posting::new(1, vec![3])]),
        );

        let list = source
            .inverted_list("apple", "body", RetrievalModel::UnrankedBoolean)
            .unwrap();
        assert_eq!(list.field(), "body");
        assert_eq!(list.len(), 1);
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_memory_source_missing_term_is_empty() {
        let source = MemoryPostingSource::new().with_list(
            "apple",
            InvertedList::from_postings("body", vec![Posting::new(1, vec![3])]),
        );

        // Same term, different field.
        let list = source
            .inverted_list("apple", "title", RetrievalModel::RankedBoolean)
            .unwrap();
        assert_eq!(list.field(), "title");
        assert!(list.is_empty());
    }

    #[test]
    fn test_external_ids() {
        let ids: MemoryExternalIds = vec![(1, "doc-a".to_string()), (2, "doc-b".to_string())]
            .into_iter()
            .collect();

        assert_eq!(ids.external_id(2).unwrap(), "doc-b");
        match ids.external_id(3) {
            Err(DaatError::UnknownDocument(3)) => {}
            other => panic!("Expected UnknownDocument, got {other:?}"),
        }
    }
}
