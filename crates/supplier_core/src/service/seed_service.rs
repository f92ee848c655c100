//! Demo catalog seeding.
//!
//! # Invariants
//! - A collection is seeded only while it holds zero documents.
//! - Re-running the seed never duplicates demo records.
//! - Each collection is checked independently.

use super::ServiceResult;
use crate::model::case_study::CaseStudy;
use crate::model::product::{Certification, Product};
use crate::model::solution::IndustrySolution;
use crate::model::Entity;
use crate::repo::document_repo::{DocumentFilter, DocumentRepository};
use crate::repo::entity_repo::EntityRepository;
use log::info;

const DUMMY_PDF_URL: &str = "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf";

/// Number of demo documents inserted per collection by one seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub products: usize,
    pub solutions: usize,
    pub case_studies: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.products + self.solutions + self.case_studies
    }
}

pub struct SeedService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> SeedService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Inserts demo products, solutions and case studies into empty collections.
    pub fn seed_demo_data(&self) -> ServiceResult<SeedReport> {
        let report = SeedReport {
            products: self.seed_if_empty(demo_products())?,
            solutions: self.seed_if_empty(demo_solutions())?,
            case_studies: self.seed_if_empty(demo_case_studies())?,
        };
        info!(
            "event=seed module=service status=ok products={} solutions={} case_studies={}",
            report.products, report.solutions, report.case_studies
        );
        Ok(report)
    }

    fn seed_if_empty<E: Entity>(&self, records: Vec<E>) -> ServiceResult<usize> {
        if self.repo.count_entities::<E>(&DocumentFilter::new())? > 0 {
            return Ok(0);
        }
        for record in &records {
            self.repo.create_entity(record)?;
        }
        Ok(records.len())
    }
}

pub fn demo_products() -> Vec<Product> {
    vec![
        Product {
            slug: "cryogenic-solenoid-valve-csv200".to_string(),
            name: "Cryogenic Solenoid Valve CSV-200".to_string(),
            category: "Valves".to_string(),
            description: "High-reliability cryogenic solenoid valve for LNG applications down to -196°C.".to_string(),
            image_url: "https://images.unsplash.com/photo-1581091215367-59ab6d7c1b5b?q=80&w=1200&auto=format&fit=crop".to_string(),
            spec_pdf_url: DUMMY_PDF_URL.to_string(),
            certifications: vec![
                Certification::new("ISO 9001:2015", DUMMY_PDF_URL),
                Certification::new("API 6D", DUMMY_PDF_URL),
            ],
            tags: ["cryogenic", "valve", "LNG", "solenoid"]
                .map(String::from)
                .to_vec(),
        },
        Product {
            slug: "downhole-pressure-sensor-dps50".to_string(),
            name: "Downhole Pressure Sensor DPS-50".to_string(),
            category: "Sensors".to_string(),
            description: "High-accuracy downhole pressure sensor rated up to 20k psi for drilling ops.".to_string(),
            image_url: "https://images.unsplash.com/photo-1606229365485-931b9043d692?q=80&w=1200&auto=format&fit=crop".to_string(),
            spec_pdf_url: DUMMY_PDF_URL.to_string(),
            certifications: vec![Certification::new("ISO 14001", DUMMY_PDF_URL)],
            tags: ["sensor", "downhole", "pressure"].map(String::from).to_vec(),
        },
    ]
}

pub fn demo_solutions() -> Vec<IndustrySolution> {
    vec![
        IndustrySolution {
            slug: "upstream-drilling-automation".to_string(),
            title: "Upstream Drilling Automation".to_string(),
            segment: "upstream".to_string(),
            problem: "Inconsistent pressure readings lead to NPT and safety risks.".to_string(),
            solution: "Deploy DPS-50 sensors with real-time telemetry to improve decision-making and reduce NPT.".to_string(),
            related_products: vec!["downhole-pressure-sensor-dps50".to_string()],
            content: None,
        },
        IndustrySolution {
            slug: "midstream-lng-cryogenic-handling".to_string(),
            title: "Midstream LNG Cryogenic Handling".to_string(),
            segment: "midstream".to_string(),
            problem: "Valve leakage at cryogenic temperatures causes loss and hazards.".to_string(),
            solution: "Implement CSV-200 with certified sealing for -196°C service.".to_string(),
            related_products: vec!["cryogenic-solenoid-valve-csv200".to_string()],
            content: None,
        },
    ]
}

pub fn demo_case_studies() -> Vec<CaseStudy> {
    vec![CaseStudy {
        slug: "lng-terminal-leak-reduction".to_string(),
        title: "LNG Terminal Leak Reduction".to_string(),
        client: "Nordic LNG Co.".to_string(),
        location: Some("Norway".to_string()),
        challenge: "Frequent valve seat leaks during peak winter operations.".to_string(),
        solution: "Retrofitted 120 units of CSV-200 with improved seal design.".to_string(),
        outcome: "Leak incidents reduced by 87% within first quarter; improved throughput by 6%.".to_string(),
        products_used: vec!["cryogenic-solenoid-valve-csv200".to_string()],
        image_url: Some("https://images.unsplash.com/photo-1520607162513-77705c0f0d4a?q=80&w=1200&auto=format&fit=crop".to_string()),
    }]
}

#[cfg(test)]
mod tests {
    use super::{demo_case_studies, demo_products, demo_solutions};
    use crate::model::Entity;

    #[test]
    fn demo_records_satisfy_their_schemas() {
        demo_products().iter().for_each(|p| p.validate().unwrap());
        demo_solutions().iter().for_each(|s| s.validate().unwrap());
        demo_case_studies().iter().for_each(|c| c.validate().unwrap());
    }
}
