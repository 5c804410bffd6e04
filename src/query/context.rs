//! Per-evaluation context shared by every node of an operator tree.

use crate::model::RetrievalModel;
use crate::postings::IdResolution;
use crate::source::PostingSource;

/// What a node needs to evaluate itself: where term lists come from, how
/// external ids are resolved, and which retrieval model is selected.
#[derive(Debug, Clone)]
pub struct EvaluationContext<'a> {
    source: &'a dyn PostingSource,
    ids: IdResolution,
    model: RetrievalModel,
}

impl<'a> EvaluationContext<'a> {
    /// Create a new evaluation context.
    pub fn new(source: &'a dyn PostingSource, ids: IdResolution, model: RetrievalModel) -> Self {
        EvaluationContext { source, ids, model }
    }

    /// Get the posting source.
    pub fn source(&self) -> &'a dyn PostingSource {
        self.source
    }

    /// Get the external id resolution handle.
    pub fn ids(&self) -> &IdResolution {
        &self.ids
    }

    /// Get the selected retrieval model.
    pub fn model(&self) -> RetrievalModel {
        self.model
    }
}
