//! Customer case study model.

use super::validation::{FieldReader, ValidationError};
use super::Entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Published customer outcome, optionally illustrated by `image_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub slug: String,
    pub title: String,
    pub client: String,
    pub location: Option<String>,
    pub challenge: String,
    pub solution: String,
    pub outcome: String,
    /// Soft references to product slugs.
    #[serde(default)]
    pub products_used: Vec<String>,
    pub image_url: Option<String>,
}

impl Entity for CaseStudy {
    const COLLECTION: &'static str = "casestudy";

    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(value);
        let case_study = Self {
            slug: reader.required_str("slug"),
            title: reader.required_str("title"),
            client: reader.required_str("client"),
            location: reader.optional_str("location"),
            challenge: reader.required_str("challenge"),
            solution: reader.required_str("solution"),
            outcome: reader.required_str("outcome"),
            products_used: reader.str_list("products_used"),
            image_url: reader.optional_url("image_url"),
        };
        reader.finish(case_study)
    }
}
