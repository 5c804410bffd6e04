//! Configuration for query evaluation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DaatError, Result};
use crate::model::RetrievalModel;

/// Default number of documents in a presentation ranking.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Configuration for an [`Evaluator`](crate::evaluator::Evaluator).
///
/// Every field has a default, so a JSON document only needs the fields it
/// changes:
///
/// ```
/// use sarissa_daat::config::EvaluatorConfig;
/// use sarissa_daat::model::RetrievalModel;
///
/// let config = EvaluatorConfig::from_json_str(r#"{ "retrieval_model": "ranked_boolean" }"#).unwrap();
/// assert_eq!(config.retrieval_model, RetrievalModel::RankedBoolean);
/// assert_eq!(config.max_results, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Retrieval model operators are evaluated under.
    pub retrieval_model: RetrievalModel,

    /// Maximum number of documents returned by a ranking.
    pub max_results: usize,

    /// External id recorded for documents the resolver cannot map.
    pub unresolved_external_id: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            retrieval_model: RetrievalModel::default(),
            max_results: DEFAULT_MAX_RESULTS,
            unresolved_external_id: String::new(),
        }
    }
}

impl EvaluatorConfig {
    /// Create a new builder.
    pub fn builder() -> EvaluatorConfigBuilder {
        EvaluatorConfigBuilder::new()
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EvaluatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize this configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the configuration for values that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(DaatError::config("max_results must be greater than 0"));
        }
        Ok(())
    }
}

/// Builder for [`EvaluatorConfig`].
#[derive(Debug, Clone, Default)]
pub struct EvaluatorConfigBuilder {
    config: EvaluatorConfig,
}

impl EvaluatorConfigBuilder {
    /// Create a builder starting from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retrieval model.
    pub fn retrieval_model(mut self, model: RetrievalModel) -> Self {
        self.config.retrieval_model = model;
        self
    }

    /// Set the maximum number of ranked results.
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.config.max_results = max_results;
        self
    }

    /// Set the external id used for unresolvable documents.
    pub fn unresolved_external_id<S: Into<String>>(mut self, external_id: S) -> Self {
        self.config.unresolved_external_id = external_id.into();
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<EvaluatorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
