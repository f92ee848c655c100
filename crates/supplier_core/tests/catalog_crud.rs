use rusqlite::Connection;
use serde_json::json;
use supplier_core::db::open_db_in_memory;
use supplier_core::service::catalog_service::CatalogService;
use supplier_core::{
    Backend, CaseStudy, Certification, DocumentFilter, Entity, EntityRepository,
    IndustrySolution, Product, RepoError, ServiceError, SqliteDocumentRepository, Storage,
};

fn sample_product(slug: &str) -> Product {
    Product {
        slug: slug.to_string(),
        name: "Cryogenic Solenoid Valve CSV-200".to_string(),
        category: "Valves".to_string(),
        description: "LNG service valve rated to -196C".to_string(),
        image_url: "https://example.com/img/csv-200.jpg".to_string(),
        spec_pdf_url: "https://example.com/pdf/csv-200.pdf".to_string(),
        certifications: vec![Certification {
            name: "API 6D".to_string(),
            pdf_url: "https://example.com/pdf/api6d.pdf".to_string(),
            standard: Some("API 6D 25th ed.".to_string()),
        }],
        tags: vec!["cryogenic".to_string(), "valve".to_string()],
    }
}

fn sample_solution(slug: &str, segment: &str) -> IndustrySolution {
    IndustrySolution {
        slug: slug.to_string(),
        title: format!("{segment} solution"),
        segment: segment.to_string(),
        problem: "problem".to_string(),
        solution: "solution".to_string(),
        related_products: vec!["csv-200".to_string()],
        content: None,
    }
}

#[test]
fn create_then_find_by_slug_roundtrips_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn, "catalog");

    let product = sample_product("csv-200");
    let id = repo.create_entity(&product).unwrap();

    let filter = DocumentFilter::new().eq("slug", "csv-200");
    let stored = repo.find_entity::<Product>(&filter).unwrap().unwrap();
    assert_eq!(stored.id, id);
    assert_eq!(stored.entity, product);
}

#[test]
fn create_rejects_invalid_entity_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn, "catalog");

    let mut product = sample_product("bad");
    product.image_url = "not a url".to_string();

    let err = repo.create_entity(&product).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref v) if v.has_field("image_url")));
    assert_eq!(
        repo.count_entities::<Product>(&DocumentFilter::new()).unwrap(),
        0
    );
}

#[test]
fn slug_uniqueness_is_not_enforced() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn, "catalog");

    let first = repo.create_entity(&sample_product("dup")).unwrap();
    let second = repo.create_entity(&sample_product("dup")).unwrap();
    assert_ne!(first, second);
    assert_eq!(
        repo.list_entities::<Product>(&DocumentFilter::new().eq("slug", "dup"))
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn segment_filter_is_exact_and_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn, "catalog");
    for (slug, segment) in [
        ("a", "upstream"),
        ("b", "Upstream"),
        ("c", "upstream-ops"),
        ("d", "midstream"),
    ] {
        repo.create_entity(&sample_solution(slug, segment)).unwrap();
    }

    let service = CatalogService::new(repo);
    let upstream = service.list_solutions(Some("upstream")).unwrap();
    assert_eq!(upstream.len(), 1);
    assert_eq!(upstream[0].entity.slug, "a");
    assert!(upstream.iter().all(|s| s.entity.segment == "upstream"));

    assert_eq!(service.list_solutions(None).unwrap().len(), 4);
    assert_eq!(service.list_solutions(Some("")).unwrap().len(), 4);
    assert!(service.list_solutions(Some("downstream")).unwrap().is_empty());
}

#[test]
fn get_product_reports_absent_slug_as_not_found() {
    let backend = Backend::with_storage(Storage::in_memory("catalog").unwrap());
    backend.seed_demo_data().unwrap();

    let err = backend.get_product("no-such-slug").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound { collection: "product", ref key } if key == "no-such-slug"
    ));

    let found = backend
        .get_product("downhole-pressure-sensor-dps50")
        .unwrap();
    assert_eq!(found.entity.category, "Sensors");
}

#[test]
fn unconfigured_backend_is_distinct_from_empty_collection() {
    let unconfigured = Backend::unconfigured();
    assert!(matches!(
        unconfigured.list_products(),
        Err(ServiceError::StorageUnavailable)
    ));
    assert!(matches!(
        unconfigured.get_product("csv-200"),
        Err(ServiceError::StorageUnavailable)
    ));
    assert!(matches!(
        unconfigured.seed_demo_data(),
        Err(ServiceError::StorageUnavailable)
    ));

    let empty = Backend::with_storage(Storage::in_memory("catalog").unwrap());
    assert!(empty.list_products().unwrap().is_empty());
    assert!(empty.list_case_studies().unwrap().is_empty());
}

#[test]
fn stored_documents_serialize_with_string_id() {
    let backend = Backend::with_storage(Storage::in_memory("catalog").unwrap());
    backend.seed_demo_data().unwrap();

    let studies = backend.list_case_studies().unwrap();
    assert_eq!(studies.len(), 1);
    let json = serde_json::to_value(&studies[0]).unwrap();
    assert_eq!(json["_id"], studies[0].id);
    assert_eq!(json["slug"], "lng-terminal-leak-reduction");
    assert_eq!(json["location"], "Norway");
}

#[test]
fn read_path_rejects_documents_that_break_the_schema() {
    let conn = open_db_in_memory().unwrap();
    insert_raw(
        &conn,
        "casestudy",
        &json!({ "slug": "x", "title": "missing the rest" }).to_string(),
    );

    let repo = SqliteDocumentRepository::new(&conn, "catalog");
    let err = repo
        .list_entities::<CaseStudy>(&DocumentFilter::new())
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn unknown_payload_fields_are_not_persisted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::new(&conn, "catalog");

    let mut payload = serde_json::to_value(sample_product("extra")).unwrap();
    payload["internal_price"] = json!(1234);
    let product = Product::from_json(&payload).unwrap();
    let id = repo.create_entity(&product).unwrap();

    let raw: String = conn
        .query_row("SELECT body FROM documents WHERE id = ?1", [&id], |row| {
            row.get(0)
        })
        .unwrap();
    assert!(!raw.contains("internal_price"));
}

fn insert_raw(conn: &Connection, collection: &str, body: &str) {
    conn.execute(
        "INSERT INTO documents (id, database_name, collection, body)
         VALUES ('raw-1', 'catalog', ?1, ?2);",
        [collection, body],
    )
    .unwrap();
}
