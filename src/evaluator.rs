//! Top-level query evaluation.
//!
//! The [`Evaluator`] ties an operator tree to its collaborators: it builds the
//! [`EvaluationContext`] for the configured retrieval model, evaluates the
//! tree, and turns the result into a ranking.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use sarissa_daat::config::EvaluatorConfig;
//! use sarissa_daat::evaluator::Evaluator;
//! use sarissa_daat::postings::{InvertedList, Posting};
//! use sarissa_daat::query::QueryNode;
//! use sarissa_daat::source::{MemoryExternalIds, MemoryPostingSource};
//!
//! let source = MemoryPostingSource::new()
//!     .with_list("apple", InvertedList::from_postings("body", vec![Posting::new(1, vec![4])]))
//!     .with_list("pie", InvertedList::from_postings("body", vec![Posting::new(1, vec![5])]));
//! let mut ids = MemoryExternalIds::new();
//! ids.insert(1, "doc-1");
//!
//! let evaluator = Evaluator::new(Arc::new(source), Arc::new(ids), EvaluatorConfig::default()).unwrap();
//! let query = QueryNode::near(1, vec![QueryNode::term("apple", "body"), QueryNode::term("pie", "body")]).unwrap();
//!
//! let hits = evaluator.top_hits(&query).unwrap().unwrap();
//! assert_eq!(hits[0].external_id, "doc-1");
//! ```

use std::sync::Arc;

use log::debug;

use crate::config::EvaluatorConfig;
use crate::error::Result;
use crate::model::RetrievalModel;
use crate::postings::{IdResolution, RankedHit, ScoreList};
use crate::query::score::score_list_node;
use crate::query::{EvaluationContext, QueryNode, QueryResult};
use crate::source::{ExternalIdResolver, PostingSource};

/// Evaluates operator trees against a posting source.
#[derive(Debug, Clone)]
pub struct Evaluator {
    source: Arc<dyn PostingSource>,
    ids: IdResolution,
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Create a new evaluator. The configuration is validated.
    pub fn new(
        source: Arc<dyn PostingSource>,
        resolver: Arc<dyn ExternalIdResolver>,
        config: EvaluatorConfig,
    ) -> Result<Self> {
        config.validate()?;
        let ids = IdResolution::with_fallback(resolver, config.unresolved_external_id.clone());
        Ok(Evaluator {
            source,
            ids,
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Get the selected retrieval model.
    pub fn model(&self) -> RetrievalModel {
        self.config.retrieval_model
    }

    /// Select a different retrieval model.
    pub fn set_model(&mut self, model: RetrievalModel) {
        self.config.retrieval_model = model;
    }

    /// A fresh context for one evaluation.
    pub fn context(&self) -> EvaluationContext<'_> {
        EvaluationContext::new(self.source.as_ref(), self.ids.clone(), self.model())
    }

    /// Evaluate a tree, returning whatever its root produces.
    ///
    /// `Ok(None)` means a score-producing operator does not support the model.
    pub fn evaluate(&self, query: &QueryNode) -> Result<Option<QueryResult>> {
        debug!("evaluating {query} under {}", self.model());
        query.evaluate(&self.context())
    }

    /// Evaluate a tree into a score list, scoring a list-producing root.
    pub fn search(&self, query: &QueryNode) -> Result<Option<ScoreList>> {
        debug!("searching {query} under {}", self.model());
        let ctx = self.context();
        match query {
            QueryNode::List(node) => score_list_node(node, &ctx),
            QueryNode::Score(node) => node.evaluate(&ctx),
        }
    }

    /// Evaluate a tree and rank the result, keeping at most `max_results` hits.
    pub fn top_hits(&self, query: &QueryNode) -> Result<Option<Vec<RankedHit>>> {
        Ok(self
            .search(query)?
            .map(|scores| scores.top_hits(self.config.max_results)))
    }
}
