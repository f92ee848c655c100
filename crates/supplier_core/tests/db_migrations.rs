use rusqlite::Connection;
use supplier_core::db::migrations::latest_version;
use supplier_core::db::{open_db, open_db_in_memory, DbError};
use supplier_core::{DocumentFilter, EntityRepository, Product, SqliteDocumentRepository, Storage};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "documents");
    assert_index_exists(&conn, "idx_documents_collection");
    assert_index_exists(&conn, "idx_documents_slug");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("supplier.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "documents");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn documents_survive_reopening_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("catalog.db").display());

    let storage = Storage::open(&url, "catalog").unwrap();
    let seeded = supplier_core::Backend::with_storage(storage)
        .seed_demo_data()
        .unwrap();
    assert_eq!(seeded.products, 2);

    let reopened = Storage::open(&url, "catalog").unwrap();
    let count = reopened
        .with_repo(|repo: SqliteDocumentRepository<'_>| {
            repo.count_entities::<Product>(&DocumentFilter::new())
        })
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn storage_rejects_foreign_connection_strings() {
    let err = Storage::open("mongodb://localhost:27017", "catalog")
        .err()
        .unwrap();
    assert!(matches!(err, DbError::InvalidLocation(_)));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    assert_schema_object(conn, "table", table_name);
}

fn assert_index_exists(conn: &Connection, index_name: &str) {
    assert_schema_object(conn, "index", index_name);
}

fn assert_schema_object(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = ?1 AND name = ?2
            );",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
