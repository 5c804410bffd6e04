//! NEAR/n proximity intersection.
//!
//! `#NEAR/n( t0 t1 ... tk )` matches documents where the arguments occur in
//! argument order with every consecutive gap at most `n`. The result is a new
//! inverted list whose positions are the positions of `t0` that start a match.
//! Matches never share positions.

use std::fmt;

use log::{debug, trace};

use crate::error::{DaatError, Result};
use crate::postings::{DocCursor, DocId, InvertedList, Position, PositionCursor, Posting};
use crate::query::context::EvaluationContext;
use crate::query::node::{ListNode, QueryNode};
use crate::query::{fmt_operator, render_operator};

/// Proximity operator over list-producing arguments in one field.
#[derive(Debug, Clone, PartialEq)]
pub struct NearOp {
    /// Maximum gap between consecutive matched positions.
    distance: u32,
    /// Arguments, in the order their terms must occur.
    args: Vec<ListNode>,
}

impl NearOp {
    /// Create a new NEAR/n operator.
    pub fn new(distance: u32, args: Vec<ListNode>) -> Result<Self> {
        if distance == 0 {
            return Err(DaatError::invalid_argument(
                render_operator(&format!("#NEAR/{distance}"), &args),
                "distance must be at least 1",
            ));
        }
        Ok(NearOp { distance, args })
    }

    /// Create a NEAR/n operator from untyped nodes.
    ///
    /// Fails if any argument produces a score list instead of an inverted list.
    pub fn from_nodes(distance: u32, args: Vec<QueryNode>) -> Result<Self> {
        if let Some(bad) = args.iter().find(|arg| !arg.is_list_producing()) {
            return Err(DaatError::invalid_argument(
                render_operator(&format!("#NEAR/{distance}"), &args),
                format!("{bad} does not produce an inverted list"),
            ));
        }
        let args = args
            .into_iter()
            .map(ListNode::try_from)
            .collect::<Result<Vec<_>>>()?;
        Self::new(distance, args)
    }

    /// Append an argument.
    pub fn push_arg<A: Into<ListNode>>(&mut self, arg: A) {
        self.args.push(arg.into());
    }

    /// Get the maximum gap.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Get the arguments.
    pub fn args(&self) -> &[ListNode] {
        &self.args
    }

    /// Evaluate the arguments and intersect them by proximity.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<InvertedList> {
        if self.args.len() < 2 {
            return Err(DaatError::invalid_argument(
                self.to_string(),
                "NEAR requires at least two arguments",
            ));
        }

        let lists = self
            .args
            .iter()
            .map(|arg| arg.evaluate(ctx))
            .collect::<Result<Vec<_>>>()?;
        self.check_fields(&lists)?;

        let refs: Vec<&InvertedList> = lists.iter().collect();
        let result = proximity_intersect(self.distance, &refs);
        debug!("{self}: matched {} documents", result.len());
        Ok(result)
    }

    fn check_fields(&self, lists: &[InvertedList]) -> Result<()> {
        let expected = lists[0].field();
        match lists.iter().find(|list| list.field() != expected) {
            Some(list) => Err(DaatError::field_mismatch(
                self.to_string(),
                expected,
                list.field(),
            )),
            None => Ok(()),
        }
    }
}

impl fmt::Display for NearOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_operator(f, &format!("#NEAR/{}", self.distance), &self.args)
    }
}

/// Intersect inverted lists by proximity.
///
/// The result is in the field of the first list. Lists must share a field; that
/// is checked by [`NearOp::evaluate`], not here.
pub fn proximity_intersect(distance: u32, lists: &[&InvertedList]) -> InvertedList {
    let field = lists.first().map(|l| l.field()).unwrap_or_default();
    let mut result = InvertedList::new(field);
    if lists.is_empty() {
        return result;
    }

    let mut cursors: Vec<DocCursor<'_, InvertedList>> =
        lists.iter().map(|list| DocCursor::new(*list)).collect();

    // Once any list runs out, no later document can be common to all of them.
    while let Some(next_docid) = smallest_current_docid(&cursors) {
        let postings: Option<Vec<&Posting>> = cursors
            .iter()
            .map(|c| c.posting().filter(|p| p.docid == next_docid))
            .collect();

        if let Some(postings) = postings {
            let anchors = match_windows(distance, &postings);
            if !anchors.is_empty() {
                trace!("document {next_docid}: matches at {anchors:?}");
                result.append_posting(next_docid, anchors);
            }
        }

        for cursor in cursors.iter_mut() {
            cursor.advance_past(next_docid);
        }
    }

    result
}

/// Smallest docid under the cursors, or `None` if any cursor is exhausted.
fn smallest_current_docid(cursors: &[DocCursor<'_, InvertedList>]) -> Option<DocId> {
    cursors
        .iter()
        .map(|c| c.docid())
        .try_fold(DocId::MAX, |min, docid| docid.map(|d| min.min(d)))
}

/// Find the non-overlapping windows of one document.
///
/// `postings[0]` supplies the anchors. For each anchor the remaining arguments
/// are chained in order, each taking its first position after the previous
/// one. When argument `i` is too far from argument `i - 1`, argument `i - 1`
/// moves to its next position and the chain is retried. Returns the anchors of
/// the complete windows.
fn match_windows(distance: u32, postings: &[&Posting]) -> Vec<Position> {
    let mut cursors: Vec<PositionCursor<'_>> = postings
        .iter()
        .map(|p| PositionCursor::new(p.positions()))
        .collect();
    let mut anchors = Vec::new();

    'anchors: while let Some(anchor) = cursors[0].current() {
        let mut current = anchor;
        let mut complete = true;

        for i in 1..cursors.len() {
            let Some(position) = cursors[i].advance_past(current) else {
                // Cursors never move back, so no later anchor can match either.
                break 'anchors;
            };
            if position - current <= distance {
                current = position;
            } else {
                cursors[i - 1].advance();
                complete = false;
                break;
            }
        }

        if complete {
            anchors.push(anchor);
            for cursor in cursors.iter_mut() {
                cursor.advance();
                if cursor.is_exhausted() {
                    break 'anchors;
                }
            }
        }
    }

    anchors
}
