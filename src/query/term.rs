//! Term leaves.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::postings::InvertedList;
use crate::query::context::EvaluationContext;

/// Field used when a term is given without one.
pub const DEFAULT_FIELD: &str = "body";

/// A leaf that fetches one term's inverted list from the posting source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermOp {
    /// The term to look up.
    term: String,
    /// The field to look it up in.
    field: String,
}

impl TermOp {
    /// Create a new term leaf.
    pub fn new<T: Into<String>, F: Into<String>>(term: T, field: F) -> Self {
        TermOp {
            term: term.into(),
            field: field.into(),
        }
    }

    /// Create a term leaf in the default field.
    pub fn in_default_field<T: Into<String>>(term: T) -> Self {
        Self::new(term, DEFAULT_FIELD)
    }

    /// Get the term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Fetch the term's inverted list.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<InvertedList> {
        let list = ctx
            .source()
            .inverted_list(&self.term, &self.field, ctx.model())?;
        debug!("{self}: {} postings", list.len());
        Ok(list)
    }
}

impl fmt::Display for TermOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.term, self.field)
    }
}
