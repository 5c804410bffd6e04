//! `#SCORE`: turns an inverted list into a score list.

use std::fmt;

use log::debug;

use crate::error::Result;
use crate::model::RetrievalModel;
use crate::postings::{IdResolution, InvertedList, ScoreList};
use crate::query::context::EvaluationContext;
use crate::query::node::ListNode;

/// Scores every posting of a list-producing argument.
///
/// Under unranked boolean every posting scores 1.0; under ranked boolean a
/// posting scores its term frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOp {
    arg: ListNode,
}

impl ScoreOp {
    /// Create a new score operator.
    pub fn new<A: Into<ListNode>>(arg: A) -> Self {
        ScoreOp { arg: arg.into() }
    }

    /// Get the argument.
    pub fn arg(&self) -> &ListNode {
        &self.arg
    }

    /// Evaluate the argument and score its postings.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Option<ScoreList>> {
        score_list_node(&self.arg, ctx)
    }
}

impl fmt::Display for ScoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#SCORE( {} )", self.arg)
    }
}

/// Evaluate a list-producing node and score its result.
///
/// Returns `None` without evaluating the node when the model is not boolean.
pub fn score_list_node(node: &ListNode, ctx: &EvaluationContext<'_>) -> Result<Option<ScoreList>> {
    if !ctx.model().is_boolean() {
        debug!("#SCORE( {node} ): unsupported under {}", ctx.model());
        return Ok(None);
    }
    let list = node.evaluate(ctx)?;
    let scores = score_postings(ctx.model(), &list, ctx.ids());
    if let Some(scores) = &scores {
        debug!("#SCORE( {node} ): scored {} documents", scores.len());
    }
    Ok(scores)
}

/// Score the postings of an inverted list under a boolean model.
pub fn score_postings(
    model: RetrievalModel,
    list: &InvertedList,
    ids: &IdResolution,
) -> Option<ScoreList> {
    let mut scores = ScoreList::new(ids.clone());
    match model {
        RetrievalModel::UnrankedBoolean => {
            for posting in list {
                scores.add(posting.docid, 1.0);
            }
        }
        RetrievalModel::RankedBoolean => {
            for posting in list {
                scores.add(posting.docid, posting.tf() as f32);
            }
        }
        RetrievalModel::Bm25 | RetrievalModel::Indri => return None,
    }
    Some(scores)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::postings::Posting;
    use crate::query::term::TermOp;
    use crate::source::{MemoryExternalIds, MemoryPostingSource};

    fn list() -> InvertedList {
        InvertedList::from_postings(
            "body",
            vec![Posting::new(2, vec![1, 4, 6]), Posting::new(9, vec![3])],
        )
    }

    fn ids() -> IdResolution {
        IdResolution::new(Arc::new(MemoryExternalIds::new()))
    }

    #[test]
    fn test_unranked_scores_are_one() {
        let scores = score_postings(RetrievalModel::UnrankedBoolean, &list(), &ids()).unwrap();

        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|e| e.score == 1.0));
        assert_eq!(scores.docid(0), Some(2));
        assert_eq!(scores.docid(1), Some(9));
    }

    #[test]
    fn test_ranked_scores_are_term_frequencies() {
        let scores = score_postings(RetrievalModel::RankedBoolean, &list(), &ids()).unwrap();

        assert_eq!(scores.score(0), Some(3.0));
        assert_eq!(scores.score(1), Some(1.0));
    }

    #[test]
    fn test_non_boolean_model_unsupported() {
        assert!(score_postings(RetrievalModel::Bm25, &list(), &ids()).is_none());

        let source = MemoryPostingSource::new().with_list("apple", list());
        let ctx = EvaluationContext::new(&source, ids(), RetrievalModel::Indri);
        let op = ScoreOp::new(TermOp::new("apple", "body"));
        assert!(op.evaluate(&ctx).unwrap().is_none());
    }

    #[test]
    fn test_rendering() {
        let op = ScoreOp::new(TermOp::new("apple", "body"));
        assert_eq!(op.to_string(), "#SCORE( apple.body )");
    }
}
