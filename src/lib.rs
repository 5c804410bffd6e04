//! # Sarissa DAAT
//!
//! Document-at-a-time query evaluation over inverted lists.
//!
//! ## Features
//!
//! - NEAR/n ordered proximity intersection over positional postings
//! - Boolean OR/AND merges under unranked and ranked boolean models
//! - Forward-only cursors that borrow immutable lists
//! - Deterministic rankings that break score ties on external document ids

pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod postings;
pub mod query;
pub mod source;

pub mod prelude {
    pub use crate::config::EvaluatorConfig;
    pub use crate::error::{DaatError, Result};
    pub use crate::evaluator::Evaluator;
    pub use crate::model::RetrievalModel;
    pub use crate::postings::{DocId, InvertedList, Posting, RankedHit, ScoreList};
    pub use crate::query::{QueryNode, QueryResult};
    pub use crate::source::{
        ExternalIdResolver, MemoryExternalIds, MemoryPostingSource, PostingSource,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
