//! The operator tree.
//!
//! Nodes are split by what they produce. [`ListNode`]s produce inverted lists
//! and can be arguments of positional operators; [`ScoreNode`]s produce score
//! lists. [`QueryNode`] is the untyped union used by callers that assemble trees
//! from parsed input, and converting it into a [`ListNode`] is where a
//! score-producing argument in a list position is rejected.

use std::fmt;

use crate::error::{DaatError, Result};
use crate::model::RetrievalModel;
use crate::postings::{DocId, InvertedList, ScoreList};
use crate::query::and::AndOp;
use crate::query::context::EvaluationContext;
use crate::query::near::NearOp;
use crate::query::or::OrOp;
use crate::query::score::ScoreOp;
use crate::query::term::TermOp;

/// A node that produces an inverted list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListNode {
    /// A term leaf.
    Term(TermOp),
    /// A proximity operator.
    Near(NearOp),
}

impl ListNode {
    /// Evaluate this node.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<InvertedList> {
        match self {
            ListNode::Term(op) => op.evaluate(ctx),
            ListNode::Near(op) => op.evaluate(ctx),
        }
    }
}

impl fmt::Display for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListNode::Term(op) => write!(f, "{op}"),
            ListNode::Near(op) => write!(f, "{op}"),
        }
    }
}

impl From<TermOp> for ListNode {
    fn from(op: TermOp) -> Self {
        ListNode::Term(op)
    }
}

impl From<NearOp> for ListNode {
    fn from(op: NearOp) -> Self {
        ListNode::Near(op)
    }
}

impl TryFrom<QueryNode> for ListNode {
    type Error = DaatError;

    fn try_from(node: QueryNode) -> Result<Self> {
        match node {
            QueryNode::List(list) => Ok(list),
            QueryNode::Score(score) => Err(DaatError::invalid_argument(
                score.to_string(),
                "score-producing operator used where an inverted list is required",
            )),
        }
    }
}

/// A node that produces a score list.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreNode {
    /// Scores a list-producing node.
    Score(ScoreOp),
    /// Boolean union.
    Or(OrOp),
    /// Boolean intersection.
    And(AndOp),
}

impl ScoreNode {
    /// Evaluate this node. `None` means the model is not supported.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Option<ScoreList>> {
        match self {
            ScoreNode::Score(op) => op.evaluate(ctx),
            ScoreNode::Or(op) => op.evaluate(ctx),
            ScoreNode::And(op) => op.evaluate(ctx),
        }
    }

    /// Score of a document this node does not match.
    ///
    /// Zero for every model the boolean operators know about.
    pub fn default_score(&self, _model: RetrievalModel, _docid: DocId) -> f32 {
        0.0
    }
}

impl fmt::Display for ScoreNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreNode::Score(op) => write!(f, "{op}"),
            ScoreNode::Or(op) => write!(f, "{op}"),
            ScoreNode::And(op) => write!(f, "{op}"),
        }
    }
}

impl From<ScoreOp> for ScoreNode {
    fn from(op: ScoreOp) -> Self {
        ScoreNode::Score(op)
    }
}

impl From<OrOp> for ScoreNode {
    fn from(op: OrOp) -> Self {
        ScoreNode::Or(op)
    }
}

impl From<AndOp> for ScoreNode {
    fn from(op: AndOp) -> Self {
        ScoreNode::And(op)
    }
}

impl From<ListNode> for ScoreNode {
    fn from(node: ListNode) -> Self {
        ScoreNode::Score(ScoreOp::new(node))
    }
}

impl From<TermOp> for ScoreNode {
    fn from(op: TermOp) -> Self {
        ListNode::from(op).into()
    }
}

impl From<NearOp> for ScoreNode {
    fn from(op: NearOp) -> Self {
        ListNode::from(op).into()
    }
}

impl From<QueryNode> for ScoreNode {
    fn from(node: QueryNode) -> Self {
        match node {
            QueryNode::List(list) => list.into(),
            QueryNode::Score(score) => score,
        }
    }
}

/// Evaluate score-producing arguments in order.
///
/// `None` if any argument does not support the model.
pub(crate) fn evaluate_score_args(
    args: &[ScoreNode],
    ctx: &EvaluationContext<'_>,
) -> Result<Option<Vec<ScoreList>>> {
    let mut lists = Vec::with_capacity(args.len());
    for arg in args {
        match arg.evaluate(ctx)? {
            Some(list) => lists.push(list),
            None => return Ok(None),
        }
    }
    Ok(Some(lists))
}

/// Any operator tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode {
    /// A list-producing node.
    List(ListNode),
    /// A score-producing node.
    Score(ScoreNode),
}

/// The result of evaluating a [`QueryNode`].
#[derive(Debug, Clone)]
pub enum QueryResult {
    /// Result of a list-producing node.
    InvertedList(InvertedList),
    /// Result of a score-producing node.
    ScoreList(ScoreList),
}

impl QueryResult {
    /// The inverted list, if this is a list result.
    pub fn as_inverted_list(&self) -> Option<&InvertedList> {
        match self {
            QueryResult::InvertedList(list) => Some(list),
            QueryResult::ScoreList(_) => None,
        }
    }

    /// The score list, if this is a score result.
    pub fn as_score_list(&self) -> Option<&ScoreList> {
        match self {
            QueryResult::InvertedList(_) => None,
            QueryResult::ScoreList(list) => Some(list),
        }
    }

    /// Number of documents in the result.
    pub fn len(&self) -> usize {
        match self {
            QueryResult::InvertedList(list) => list.len(),
            QueryResult::ScoreList(list) => list.len(),
        }
    }

    /// Check if the result has no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueryNode {
    /// A term leaf.
    pub fn term<T: Into<String>, F: Into<String>>(term: T, field: F) -> Self {
        QueryNode::List(ListNode::Term(TermOp::new(term, field)))
    }

    /// A NEAR/n operator. Every argument must produce an inverted list.
    pub fn near(distance: u32, args: Vec<QueryNode>) -> Result<Self> {
        Ok(QueryNode::List(ListNode::Near(NearOp::from_nodes(
            distance, args,
        )?)))
    }

    /// An OR operator.
    pub fn or(args: Vec<QueryNode>) -> Self {
        QueryNode::Score(ScoreNode::Or(OrOp::new(args)))
    }

    /// An AND operator.
    pub fn and(args: Vec<QueryNode>) -> Self {
        QueryNode::Score(ScoreNode::And(AndOp::new(args)))
    }

    /// Whether this node produces an inverted list.
    pub fn is_list_producing(&self) -> bool {
        matches!(self, QueryNode::List(_))
    }

    /// Evaluate this node. `None` means the model is not supported.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<Option<QueryResult>> {
        match self {
            QueryNode::List(node) => Ok(Some(QueryResult::InvertedList(node.evaluate(ctx)?))),
            QueryNode::Score(node) => Ok(node.evaluate(ctx)?.map(QueryResult::ScoreList)),
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryNode::List(node) => write!(f, "{node}"),
            QueryNode::Score(node) => write!(f, "{node}"),
        }
    }
}

impl From<ListNode> for QueryNode {
    fn from(node: ListNode) -> Self {
        QueryNode::List(node)
    }
}

impl From<ScoreNode> for QueryNode {
    fn from(node: ScoreNode) -> Self {
        QueryNode::Score(node)
    }
}

impl From<TermOp> for QueryNode {
    fn from(op: TermOp) -> Self {
        QueryNode::List(op.into())
    }
}

impl From<NearOp> for QueryNode {
    fn from(op: NearOp) -> Self {
        QueryNode::List(op.into())
    }
}

impl From<OrOp> for QueryNode {
    fn from(op: OrOp) -> Self {
        QueryNode::Score(op.into())
    }
}

impl From<AndOp> for QueryNode {
    fn from(op: AndOp) -> Self {
        QueryNode::Score(op.into())
    }
}
