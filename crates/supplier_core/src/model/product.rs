//! Product and embedded certification model.
//!
//! # Invariants
//! - `image_url`, `spec_pdf_url` and every `Certification::pdf_url` are
//!   well-formed http(s) URLs.
//! - `slug` uniqueness is not enforced by the model.

use super::validation::{FieldReader, ValidationError};
use super::Entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Certification or standard attached to a product.
///
/// Embedded in exactly one product; not addressable on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    /// Certification name, e.g. `ISO 9001:2015` or `API 6D`.
    pub name: String,
    /// Link to the certificate PDF.
    pub pdf_url: String,
    /// Standard code or short description.
    pub standard: Option<String>,
}

impl Certification {
    pub fn new(name: impl Into<String>, pdf_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pdf_url: pdf_url.into(),
            standard: None,
        }
    }

    fn parse(value: &Value, path: &str) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::nested(value, path);
        let certification = Self {
            name: reader.required_str("name"),
            pdf_url: reader.required_url("pdf_url"),
            standard: reader.optional_str("standard"),
        };
        reader.finish(certification)
    }
}

/// Catalog product addressed by `slug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub slug: String,
    pub name: String,
    /// Category such as `Valves`, `Pumps` or `Sensors`.
    pub category: String,
    pub description: String,
    pub image_url: String,
    /// Technical spec sheet PDF.
    pub spec_pdf_url: String,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Entity for Product {
    const COLLECTION: &'static str = "product";

    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(value);
        let product = Self {
            slug: reader.required_str("slug"),
            name: reader.required_str("name"),
            category: reader.required_str("category"),
            description: reader.required_str("description"),
            image_url: reader.required_url("image_url"),
            spec_pdf_url: reader.required_url("spec_pdf_url"),
            certifications: reader.object_list("certifications", Certification::parse),
            tags: reader.str_list("tags"),
        };
        reader.finish(product)
    }
}
