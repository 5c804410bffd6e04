//! Retrieval model selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DaatError, Result};

/// The retrieval model an operator tree is evaluated under.
///
/// Operators branch on this tag only. The boolean family is implemented here;
/// the other variants can be selected but boolean operators report them as
/// unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalModel {
    /// Every matching document scores exactly 1.0.
    #[default]
    UnrankedBoolean,
    /// Scores are derived from term frequencies and combined with max/min.
    RankedBoolean,
    /// Okapi BM25.
    Bm25,
    /// Indri query likelihood.
    Indri,
}

impl RetrievalModel {
    /// Whether this model belongs to the boolean family.
    pub fn is_boolean(&self) -> bool {
        matches!(
            self,
            RetrievalModel::UnrankedBoolean | RetrievalModel::RankedBoolean
        )
    }

    /// Get the canonical name of the model.
    pub fn name(&self) -> &'static str {
        match self {
            RetrievalModel::UnrankedBoolean => "unranked_boolean",
            RetrievalModel::RankedBoolean => "ranked_boolean",
            RetrievalModel::Bm25 => "bm25",
            RetrievalModel::Indri => "indri",
        }
    }
}

impl fmt::Display for RetrievalModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RetrievalModel {
    type Err = DaatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "unranked_boolean" | "unrankedboolean" => Ok(RetrievalModel::UnrankedBoolean),
            "ranked_boolean" | "rankedboolean" => Ok(RetrievalModel::RankedBoolean),
            "bm25" => Ok(RetrievalModel::Bm25),
            "indri" => Ok(RetrievalModel::Indri),
            other => Err(DaatError::config(format!("unknown retrieval model: {other}"))),
        }
    }
}
