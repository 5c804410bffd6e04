//! Score lists and the ranking comparator.
//!
//! A [`ScoreList`] is what score-producing operators return: `(docid, score)`
//! entries in the order they were added (ascending docid when produced by an
//! operator). Each entry resolves and caches its external document id at
//! insertion time, so that ranking can break score ties on the stable,
//! user-facing identifier instead of the index-specific internal id.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::postings::DocId;
use crate::source::ExternalIdResolver;

/// Shared handle used by score lists to resolve external ids on insertion.
#[derive(Clone)]
pub struct IdResolution {
    resolver: Arc<dyn ExternalIdResolver>,
    fallback: String,
}

impl IdResolution {
    /// Create a handle with the empty string as the fallback key.
    pub fn new(resolver: Arc<dyn ExternalIdResolver>) -> Self {
        Self::with_fallback(resolver, String::new())
    }

    /// Create a handle with an explicit fallback key for unresolvable documents.
    pub fn with_fallback<S: Into<String>>(resolver: Arc<dyn ExternalIdResolver>, fallback: S) -> Self {
        IdResolution {
            resolver,
            fallback: fallback.into(),
        }
    }

    /// The key used when a document has no external id.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolve a document's external id, falling back to the fallback key.
    pub fn resolve(&self, docid: DocId) -> String {
        match self.resolver.external_id(docid) {
            Ok(external_id) => external_id,
            Err(e) => {
                warn!(
                    "failed to resolve external id of document {docid}, using '{}': {e}",
                    self.fallback
                );
                self.fallback.clone()
            }
        }
    }
}

impl fmt::Debug for IdResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdResolution")
            .field("resolver", &self.resolver)
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// One scored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreListEntry {
    /// Internal document id.
    pub docid: DocId,
    /// Score.
    pub score: f32,
    /// External document id, resolved once when the entry was created.
    pub external_id: String,
}

impl ScoreListEntry {
    /// Ranking order: higher score first, ties broken by ascending external id.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.external_id.cmp(&other.external_id))
    }
}

/// A document in a presentation ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHit {
    /// 1-based rank.
    pub rank: usize,
    /// Internal document id.
    pub docid: DocId,
    /// External document id.
    pub external_id: String,
    /// Score.
    pub score: f32,
}

/// A list of scored documents.
#[derive(Debug, Clone)]
pub struct ScoreList {
    entries: Vec<ScoreListEntry>,
    ids: IdResolution,
}

impl ScoreList {
    /// Create an empty score list.
    pub fn new(ids: IdResolution) -> Self {
        ScoreList {
            entries: Vec::new(),
            ids,
        }
    }

    /// Append a document score, resolving its external id now.
    pub fn add(&mut self, docid: DocId, score: f32) {
        let external_id = self.ids.resolve(docid);
        self.entries.push(ScoreListEntry {
            docid,
            score,
            external_id,
        });
    }

    /// The resolution handle shared with lists derived from this one.
    pub fn id_resolution(&self) -> &IdResolution {
        &self.ids
    }

    /// Get the n'th document id, in stored order.
    pub fn docid(&self, n: usize) -> Option<DocId> {
        self.entries.get(n).map(|e| e.docid)
    }

    /// Get the score of the n'th document, in stored order.
    pub fn score(&self, n: usize) -> Option<f32> {
        self.entries.get(n).map(|e| e.score)
    }

    /// Get the external id of the n'th document, in stored order.
    pub fn external_id(&self, n: usize) -> Option<&str> {
        self.entries.get(n).map(|e| e.external_id.as_str())
    }

    /// Get the entries, in stored order.
    pub fn entries(&self) -> &[ScoreListEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an iterator over the entries, in stored order.
    pub fn iter(&'_ self) -> std::slice::Iter<'_, ScoreListEntry> {
        self.entries.iter()
    }

    /// Entries in ranking order, leaving the stored order untouched.
    pub fn ranked(&self) -> Vec<&ScoreListEntry> {
        let mut ranked: Vec<&ScoreListEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| a.rank_cmp(b));
        ranked
    }

    /// Sort the stored entries into ranking order.
    ///
    /// After this the list is no longer docid-ordered and must not be fed back
    /// into an operator.
    pub fn sort_by_rank(&mut self) {
        self.entries.sort_by(|a, b| a.rank_cmp(b));
    }

    /// The best `limit` documents in ranking order.
    pub fn top_hits(&self, limit: usize) -> Vec<RankedHit> {
        self.ranked()
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, entry)| RankedHit {
                rank: i + 1,
                docid: entry.docid,
                external_id: entry.external_id.clone(),
                score: entry.score,
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ScoreList {
    type Item = &'a ScoreListEntry;
    type IntoIter = std::slice::Iter<'a, ScoreListEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryExternalIds;

    fn ids() -> IdResolution {
        let mut external = MemoryExternalIds::new();
        external.insert(5, "ext5");
        external.insert(6, "ext4");
        external.insert(7, "ext7");
        IdResolution::new(Arc::new(external))
    }

    #[test]
    fn test_add_resolves_external_id() {
        let mut list = ScoreList::new(ids());
        list.add(5, 0.8);

        assert_eq!(list.len(), 1);
        assert_eq!(list.docid(0), Some(5));
        assert_eq!(list.score(0), Some(0.8));
        assert_eq!(list.external_id(0), Some("ext5"));
        assert_eq!(list.docid(1), None);
    }

    #[test]
    fn test_tie_broken_by_external_id() {
        let mut list = ScoreList::new(ids());
        list.add(5, 0.8);
        list.add(6, 0.8);

        let ranked: Vec<&str> = list.ranked().iter().map(|e| e.external_id.as_str()).collect();
        assert_eq!(ranked, vec!["ext4", "ext5"]);

        // Stored order is untouched.
        assert_eq!(list.docid(0), Some(5));
    }

    #[test]
    fn test_score_dominates_external_id() {
        let mut list = ScoreList::new(ids());
        list.add(6, 0.2);
        list.add(7, 0.9);
        list.add(5, 0.5);

        list.sort_by_rank();
        let docids: Vec<DocId> = list.iter().map(|e| e.docid).collect();
        assert_eq!(docids, vec![7, 5, 6]);
    }

    #[test]
    fn test_unresolved_document_uses_fallback() {
        let resolution = IdResolution::with_fallback(Arc::new(MemoryExternalIds::new()), "?");
        let mut list = ScoreList::new(resolution);
        list.add(42, 1.0);

        assert_eq!(list.len(), 1);
        assert_eq!(list.external_id(0), Some("?"));
    }

    #[test]
    fn test_top_hits() {
        let mut list = ScoreList::new(ids());
        list.add(5, 0.8);
        list.add(6, 0.8);
        list.add(7, 1.0);

        let hits = list.top_hits(2);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].rank, 1);
        assert_eq!(hits[0].external_id, "ext7");
        assert_eq!(hits[1].rank, 2);
        assert_eq!(hits[1].external_id, "ext4");
    }
}
