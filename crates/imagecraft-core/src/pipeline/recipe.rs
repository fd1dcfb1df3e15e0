use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::pipeline::filter::Filter;

/// An ordered filter list stored as JSON.
///
/// ```json
/// {"filters": [{"filter": "crop", "width": 800, "height": 600},
///              {"filter": "gaussian_blur", "sigma": 1.5}]}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub filters: Vec<Filter>,
}

impl Recipe {
    /// Parse and validate every filter's parameters.
    pub fn from_json(json: &str) -> Result<Self> {
        let recipe: Recipe = serde_json::from_str(json)?;
        recipe.validate()?;
        Ok(recipe)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let recipe = Self::from_json(&json)?;
        debug!(?path, filters = recipe.filters.len(), "loaded recipe");
        Ok(recipe)
    }

    pub fn validate(&self) -> Result<()> {
        self.filters.iter().try_for_each(Filter::validate)
    }

    /// Append every filter to `pipeline` under its own name.
    pub fn extend_pipeline(self, pipeline: &mut Pipeline) {
        for filter in self.filters {
            pipeline.push(filter);
        }
    }
}
