//! OR union for the boolean retrieval models.

use std::fmt;

use log::debug;

use crate::error::{DaatError, Result};
use crate::model::RetrievalModel;
use crate::postings::{DocCursor, IdResolution, ScoreList};
use crate::query::context::EvaluationContext;
use crate::query::fmt_operator;
use crate::query::node::{ScoreNode, evaluate_score_args};

/// Matches documents that appear in any argument.
///
/// Under unranked boolean every match scores 1.0; under ranked boolean a
/// document scores the maximum of its argument scores. Other models are not
/// supported and yield no result.
#[derive(Debug, Clone, PartialEq)]
pub struct OrOp {
    args: Vec<ScoreNode>,
}

impl OrOp {
    /// Create a new OR operator. List-producing arguments are wrapped in `#SCORE`.
    pub fn new<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<ScoreNode>,
    {
        OrOp {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Append an argument.
    pub fn push_arg<A: Into<ScoreNode>>(&mut self, arg: A) {
        self.args.push(arg.into());
    }

    /// Get the arguments.
    pub fn args(&self) -> &[ScoreNode] {
        &self.args
    }

    /// Evaluate the arguments and merge them.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Option<ScoreList>> {
        if !ctx.model().is_boolean() {
            debug!("{self}: unsupported under {}", ctx.model());
            return Ok(None);
        }
        if self.args.len() < 2 {
            return Err(DaatError::invalid_argument(
                self.to_string(),
                "OR requires at least two arguments",
            ));
        }

        let Some(lists) = evaluate_score_args(&self.args, ctx)? else {
            return Ok(None);
        };
        let refs: Vec<&ScoreList> = lists.iter().collect();
        let result = union(ctx.model(), &refs, ctx.ids());
        if let Some(result) = &result {
            debug!("{self}: matched {} documents", result.len());
        }
        Ok(result)
    }
}

impl fmt::Display for OrOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_operator(f, "#OR", &self.args)
    }
}

/// Merge docid-sorted score lists into their union.
///
/// Returns `None` for models outside the boolean family. Documents whose folded
/// score is not positive are dropped.
pub fn union(model: RetrievalModel, lists: &[&ScoreList], ids: &IdResolution) -> Option<ScoreList> {
    if !model.is_boolean() {
        return None;
    }

    let mut result = ScoreList::new(ids.clone());
    let mut cursors: Vec<DocCursor<'_, ScoreList>> =
        lists.iter().map(|list| DocCursor::new(*list)).collect();

    // Exhausted cursors drop out of the minimum for good.
    while let Some(min_docid) = cursors.iter().filter_map(|c| c.docid()).min() {
        let mut doc_score = 0.0f32;
        for cursor in cursors.iter_mut() {
            if let Some(entry) = cursor.entry().filter(|e| e.docid == min_docid) {
                doc_score = doc_score.max(entry.score);
                cursor.advance();
            }
        }

        if doc_score > 0.0 {
            match model {
                RetrievalModel::RankedBoolean => result.add(min_docid, doc_score),
                _ => result.add(min_docid, 1.0),
            }
        }
    }

    Some(result)
}
