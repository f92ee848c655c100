//! Document repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide collection-parameterized insert/find/count over JSON documents.
//! - Keep SQL and `json_extract` details inside the persistence boundary.
//!
//! # Invariants
//! - Stored bodies are JSON objects without an `_id` key; identity lives in
//!   the `id` column.
//! - Equality filters only address top-level fields and compare exactly
//!   (case-sensitive, no partial match).
//! - Read paths reject non-object bodies instead of masking them.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Wire name of the identifier annotation on returned documents.
pub const ID_FIELD: &str = "_id";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid name regex"));

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for document persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// Collection or filter field name outside `[A-Za-z_][A-Za-z0-9_]*`.
    InvalidName(String),
    /// Filter value type that has no scalar equality semantics.
    UnsupportedFilterValue(String),
    InvalidData(String),
    Serialization(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidName(name) => write!(f, "invalid collection or field name `{name}`"),
            Self::UnsupportedFilterValue(field) => {
                write!(f, "filter on `{field}` must use a scalar value")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted document: {message}"),
            Self::Serialization(err) => write!(f, "document serialization failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidName(_) | Self::UnsupportedFilterValue(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Stored document with its storage-assigned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Map<String, Value>,
}

impl Document {
    /// Returns the body annotated with `_id`.
    pub fn into_json(self) -> Value {
        let mut body = self.body;
        body.insert(ID_FIELD.to_string(), Value::String(self.id));
        Value::Object(body)
    }
}

/// Conjunction of top-level equality clauses.
///
/// An empty filter matches every document in the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    clauses: Vec<(String, Value)>,
}

impl DocumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `field == value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    pub fn clauses(&self) -> &[(String, Value)] {
        &self.clauses
    }
}

/// Repository interface for collection-scoped document access.
pub trait DocumentRepository {
    /// Inserts `body` into `collection` and returns the assigned identifier.
    ///
    /// Any `_id` key in `body` is dropped.
    fn insert_document(&self, collection: &str, body: &Map<String, Value>) -> RepoResult<String>;
    /// Lists matching documents in storage-default order.
    fn find_documents(&self, collection: &str, filter: &DocumentFilter)
        -> RepoResult<Vec<Document>>;
    fn find_one_document(
        &self,
        collection: &str,
        filter: &DocumentFilter,
    ) -> RepoResult<Option<Document>>;
    fn find_document_by_id(&self, collection: &str, id: &str) -> RepoResult<Option<Document>>;
    fn count_documents(&self, collection: &str, filter: &DocumentFilter) -> RepoResult<u64>;
    /// Names of collections holding at least one document.
    fn list_collection_names(&self) -> RepoResult<Vec<String>>;
}

/// SQLite-backed document repository scoped to one database name.
#[derive(Clone, Copy)]
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn Connection,
    database_name: &'conn str,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    pub fn new(conn: &'conn Connection, database_name: &'conn str) -> Self {
        Self {
            conn,
            database_name,
        }
    }

    fn select(
        &self,
        columns: &str,
        collection: &str,
        filter: &DocumentFilter,
        tail: &str,
    ) -> RepoResult<(String, Vec<SqlValue>)> {
        ensure_name(collection)?;
        let mut sql =
            format!("SELECT {columns} FROM documents WHERE database_name = ? AND collection = ?");
        let mut bind_values = vec![
            SqlValue::Text(self.database_name.to_string()),
            SqlValue::Text(collection.to_string()),
        ];

        for (field, value) in filter.clauses() {
            ensure_name(field)?;
            let path = format!("json_extract(body, '$.{field}')");
            match filter_value_to_sql(field, value)? {
                Some(bound) => {
                    sql.push_str(&format!(" AND {path} = ?"));
                    bind_values.push(bound);
                }
                None => sql.push_str(&format!(" AND {path} IS NULL")),
            }
        }

        sql.push_str(tail);
        Ok((sql, bind_values))
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn insert_document(&self, collection: &str, body: &Map<String, Value>) -> RepoResult<String> {
        ensure_name(collection)?;
        let mut body = body.clone();
        body.remove(ID_FIELD);
        let encoded = serde_json::to_string(&Value::Object(body))?;
        let id = Uuid::new_v4().to_string();

        self.conn.execute(
            "INSERT INTO documents (id, database_name, collection, body)
             VALUES (?1, ?2, ?3, ?4);",
            params![id, self.database_name, collection, encoded],
        )?;

        Ok(id)
    }

    fn find_documents(
        &self,
        collection: &str,
        filter: &DocumentFilter,
    ) -> RepoResult<Vec<Document>> {
        let (sql, bind_values) = self.select("id, body", collection, filter, " ORDER BY rowid")?;
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            documents.push(parse_document_row(row)?);
        }

        Ok(documents)
    }

    fn find_one_document(
        &self,
        collection: &str,
        filter: &DocumentFilter,
    ) -> RepoResult<Option<Document>> {
        let (sql, bind_values) =
            self.select("id, body", collection, filter, " ORDER BY rowid LIMIT 1")?;
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_document_row(row)?));
        }

        Ok(None)
    }

    fn find_document_by_id(&self, collection: &str, id: &str) -> RepoResult<Option<Document>> {
        ensure_name(collection)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, body FROM documents
             WHERE database_name = ?1 AND collection = ?2 AND id = ?3;",
        )?;
        let mut rows = stmt.query(params![self.database_name, collection, id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_document_row(row)?));
        }

        Ok(None)
    }

    fn count_documents(&self, collection: &str, filter: &DocumentFilter) -> RepoResult<u64> {
        let (sql, bind_values) = self.select("COUNT(*)", collection, filter, "")?;
        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(bind_values), |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative document count {count}")))
    }

    fn list_collection_names(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT collection FROM documents
             WHERE database_name = ?1
             ORDER BY collection ASC;",
        )?;
        let names = stmt
            .query_map([self.database_name], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

fn ensure_name(name: &str) -> RepoResult<()> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(RepoError::InvalidName(name.to_string()))
    }
}

/// Maps a JSON filter value to the SQL value `json_extract` yields for it.
///
/// `None` means "match null or missing".
fn filter_value_to_sql(field: &str, value: &Value) -> RepoResult<Option<SqlValue>> {
    let bound = match value {
        Value::Null => return Ok(None),
        Value::Bool(flag) => SqlValue::Integer(i64::from(*flag)),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => SqlValue::Integer(integer),
            None => SqlValue::Real(number.as_f64().ok_or_else(|| {
                RepoError::UnsupportedFilterValue(field.to_string())
            })?),
        },
        Value::String(text) => SqlValue::Text(text.clone()),
        Value::Array(_) | Value::Object(_) => {
            return Err(RepoError::UnsupportedFilterValue(field.to_string()));
        }
    };
    Ok(Some(bound))
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<Document> {
    let id: String = row.get("id")?;
    let body_text: String = row.get("body")?;
    let body = match serde_json::from_str::<Value>(&body_text) {
        Ok(Value::Object(body)) => body,
        Ok(_) => {
            return Err(RepoError::InvalidData(format!(
                "document `{id}` body is not a JSON object"
            )));
        }
        Err(err) => {
            return Err(RepoError::InvalidData(format!(
                "document `{id}` body is not valid JSON: {err}"
            )));
        }
    };

    Ok(Document { id, body })
}

#[cfg(test)]
mod tests {
    use super::{DocumentFilter, DocumentRepository, RepoError, SqliteDocumentRepository};
    use crate::db::open_db_in_memory;
    use serde_json::{json, Map, Value};

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn insert_strips_payload_identifier() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteDocumentRepository::new(&conn, "catalog");

        let id = repo
            .insert_document("product", &object(json!({ "_id": "forged", "slug": "a" })))
            .unwrap();
        assert_ne!(id, "forged");

        let doc = repo.find_document_by_id("product", &id).unwrap().unwrap();
        assert!(!doc.body.contains_key("_id"));
        assert_eq!(doc.into_json()["_id"], id);
    }

    #[test]
    fn database_names_partition_collections() {
        let conn = open_db_in_memory().unwrap();
        let left = SqliteDocumentRepository::new(&conn, "left");
        let right = SqliteDocumentRepository::new(&conn, "right");

        left.insert_document("product", &object(json!({ "slug": "a" })))
            .unwrap();

        assert_eq!(left.count_documents("product", &DocumentFilter::new()).unwrap(), 1);
        assert_eq!(right.count_documents("product", &DocumentFilter::new()).unwrap(), 0);
        assert_eq!(left.list_collection_names().unwrap(), vec!["product"]);
        assert!(right.list_collection_names().unwrap().is_empty());
    }

    #[test]
    fn filter_on_scalar_types() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteDocumentRepository::new(&conn, "catalog");
        repo.insert_document("rfq", &object(json!({ "quantity": 5, "urgent": true, "notes": null })))
            .unwrap();
        repo.insert_document("rfq", &object(json!({ "quantity": 7, "urgent": false })))
            .unwrap();

        let by_int = DocumentFilter::new().eq("quantity", 5);
        assert_eq!(repo.count_documents("rfq", &by_int).unwrap(), 1);

        let by_bool = DocumentFilter::new().eq("urgent", false);
        assert_eq!(repo.count_documents("rfq", &by_bool).unwrap(), 1);

        let by_null = DocumentFilter::new().eq("notes", Value::Null);
        assert_eq!(repo.count_documents("rfq", &by_null).unwrap(), 2);
    }

    #[test]
    fn string_filter_does_not_match_numbers() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteDocumentRepository::new(&conn, "catalog");
        repo.insert_document("rfq", &object(json!({ "quantity": 5 })))
            .unwrap();

        let filter = DocumentFilter::new().eq("quantity", "5");
        assert!(repo.find_one_document("rfq", &filter).unwrap().is_none());
    }

    #[test]
    fn rejects_injection_in_names_and_nested_filter_values() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteDocumentRepository::new(&conn, "catalog");

        let bad_field = DocumentFilter::new().eq("slug') OR 1=1 --", "x");
        let err = repo.find_documents("product", &bad_field).unwrap_err();
        assert!(matches!(err, RepoError::InvalidName(_)));

        let err = repo
            .insert_document("product; DROP TABLE documents", &Map::new())
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidName(_)));

        let nested = DocumentFilter::new().eq("tags", json!(["a"]));
        let err = repo.find_documents("product", &nested).unwrap_err();
        assert!(matches!(err, RepoError::UnsupportedFilterValue(field) if field == "tags"));
    }
}
