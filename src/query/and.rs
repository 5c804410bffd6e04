//! AND intersection for the boolean retrieval models.

use std::fmt;

use log::debug;

use crate::error::{DaatError, Result};
use crate::model::RetrievalModel;
use crate::postings::{DocCursor, DocId, IdResolution, ScoreList};
use crate::query::context::EvaluationContext;
use crate::query::fmt_operator;
use crate::query::node::{ScoreNode, evaluate_score_args};

/// Matches documents that appear in every argument.
///
/// Under unranked boolean every match scores 1.0; under ranked boolean a
/// document scores the minimum of its argument scores.
#[derive(Debug, Clone, PartialEq)]
pub struct AndOp {
    args: Vec<ScoreNode>,
}

impl AndOp {
    /// Create a new AND operator. List-producing arguments are wrapped in `#SCORE`.
    pub fn new<I, A>(args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<ScoreNode>,
    {
        AndOp {
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

    /// Evaluate the arguments and intersect them.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Option<ScoreList>> {
        if !ctx.model().is_boolean() {
            debug!("{self}: unsupported under {}", ctx.model());
            return Ok(None);
        }
        if self.args.len() < 2 {
            return Err(DaatError::invalid_argument(
                self.to_string(),
                "AND requires at least two arguments",
            ));
        }

        let Some(lists) = evaluate_score_args(&self.args, ctx)? else {
            return Ok(None);
        };
        let refs: Vec<&ScoreList> = lists.iter().collect();
        let result = intersection(ctx.model(), &refs, ctx.ids());
        if let Some(result) = &result {
            debug!("{self}: matched {} documents", result.len());
        }
        Ok(result)
    }
}

impl fmt::Display for AndOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_operator(f, "#AND", &self.args)
    }
}

/// Intersect docid-sorted score lists.
///
/// Returns `None` for models outside the boolean family.
pub fn intersection(
    model: RetrievalModel,
    lists: &[&ScoreList],
    ids: &IdResolution,
) -> Option<ScoreList> {
    if !model.is_boolean() {
        return None;
    }

    let mut result = ScoreList::new(ids.clone());
    if lists.is_empty() {
        return Some(result);
    }
    let mut cursors: Vec<DocCursor<'_, ScoreList>> =
        lists.iter().map(|list| DocCursor::new(*list)).collect();

    'docs: loop {
        // Leapfrog every cursor up to the largest current docid.
        let mut target: DocId = 0;
        for cursor in &cursors {
            match cursor.docid() {
                Some(docid) => target = target.max(docid),
                None => break 'docs,
            }
        }
        let mut aligned = true;
        for cursor in cursors.iter_mut() {
            match cursor.advance_to(target) {
                Some(docid) => aligned &= docid == target,
                None => break 'docs,
            }
        }
        if !aligned {
            continue;
        }

        let mut doc_score = f32::INFINITY;
        for cursor in cursors.iter_mut() {
            if let Some(entry) = cursor.entry() {
                doc_score = doc_score.min(entry.score);
            }
            cursor.advance();
        }

        if doc_score > 0.0 {
            match model {
                RetrievalModel::RankedBoolean => result.add(target, doc_score),
                _ => result.add(target, 1.0),
            }
        }
    }

    Some(result)
}
