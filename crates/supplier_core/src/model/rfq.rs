//! Request-for-quote lead model.
//!
//! # Invariants
//! - `company_name`, `contact_name` and `email` are required.
//! - `email` is free text; its format is not checked.
//! - `quantity`, when present, is an integer >= 1.
//! - RFQs are write-once: nothing in core updates or deletes them.

use super::validation::{FieldReader, ValidationError};
use super::Entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest accepted `quantity`.
pub const MIN_QUANTITY: i64 = 1;

/// Sales lead submitted by a prospective buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rfq {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub project_name: Option<String>,
    pub project_description: Option<String>,
    pub specifications: Option<String>,
    /// Soft references to requested product slugs.
    #[serde(default)]
    pub product_slugs: Vec<String>,
    pub quantity: Option<i64>,
    pub timeline: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl Entity for Rfq {
    const COLLECTION: &'static str = "rfq";

    fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(value);
        let rfq = Self {
            company_name: reader.required_str("company_name"),
            contact_name: reader.required_str("contact_name"),
            email: reader.required_str("email"),
            phone: reader.optional_str("phone"),
            project_name: reader.optional_str("project_name"),
            project_description: reader.optional_str("project_description"),
            specifications: reader.optional_str("specifications"),
            product_slugs: reader.str_list("product_slugs"),
            quantity: reader.optional_int_at_least("quantity", MIN_QUANTITY),
            timeline: reader.optional_str("timeline"),
            location: reader.optional_str("location"),
            notes: reader.optional_str("notes"),
        };
        reader.finish(rfq)
    }
}
