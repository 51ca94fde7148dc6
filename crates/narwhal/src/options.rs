//! Serialized configuration for [`TaxonomyArranger`](crate::TaxonomyArranger).

use crate::inclusion::Connections;
use serde::Deserialize;

pub const DEFAULT_UNCOLLIDE_LIMIT: usize = 10_000;

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("invalid taxonomy arranger options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options for a taxonomy arrangement. Missing fields take their defaults.
///
/// ```
/// use narwhal::{Connections, TaxonomyArrangerOptions};
///
/// let opts = TaxonomyArrangerOptions::from_json_str(r#"{"maintainMean": true}"#).unwrap();
/// assert!(opts.maintain_mean);
/// assert_eq!(opts.uncollide_limit, 10_000);
/// assert_eq!(opts.connections, Connections::Links);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaxonomyArrangerOptions {
    /// Translate the result so the mean vertex position is unchanged.
    pub maintain_mean: bool,
    /// Condensations with more vertices than this are not uncollided.
    pub uncollide_limit: usize,
    /// How taxa carry their connections into the graphs handed to the taxon arrangers.
    pub connections: Connections,
}

impl Default for TaxonomyArrangerOptions {
    fn default() -> Self {
        Self {
            maintain_mean: false,
            uncollide_limit: DEFAULT_UNCOLLIDE_LIMIT,
            connections: Connections::default(),
        }
    }
}

impl TaxonomyArrangerOptions {
    pub fn from_json_str(text: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, OptionsError> {
        Ok(serde_json::from_value(value)?)
    }
}
