//! Industry solution model.
//!
//! `segment` is free text. `upstream`, `midstream` and `downstream` are the
//! expected values but nothing rejects others.

use super::validation::{FieldReader, ValidationError};
use super::Entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Narrative describing how the catalog addresses an industry problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustrySolution {
    pub slug: String,
    pub title: String,
    pub segment: String,
    /// The core operational challenge.
    pub problem: String,
    pub solution: String,
    /// Soft references to product slugs.
    #[serde(default)]
    pub related_products: Vec<String>,
    /// Optional long-form content.
    pub content: Option<String>,
}

impl Entity for IndustrySolution {
    const COLLECTION: &'static str = "industrysolution";

    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(value);
        let solution = Self {
            slug: reader.required_str("slug"),
            title: reader.required_str("title"),
            segment: reader.required_str("segment"),
            problem: reader.required_str("problem"),
            solution: reader.required_str("solution"),
            related_products: reader.str_list("related_products"),
            content: reader.optional_str("content"),
        };
        reader.finish(solution)
    }
}
