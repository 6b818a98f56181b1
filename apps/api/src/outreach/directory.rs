//! Contact directory backends.
//!
//! Every backend answers the same question: which record, if any, has a
//! `company` that contains the needle, ignoring case. At most one record is
//! returned. `Ok(None)` means "no match"; `Err(LookupError)` means the
//! directory itself could not be read.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::contact::ContactRecord;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Directory API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Directory lookup timed out after {0:?}")]
    TimedOut(Duration),
}

/// Read-only access to a contact directory.
///
/// Implementations hold no per-request state and may be shared across
/// concurrent lookups behind an `Arc`.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn find_by_company(&self, needle: &str) -> Result<Option<ContactRecord>, LookupError>;

    /// Short backend label, surfaced by the health endpoint.
    fn backend(&self) -> &'static str;
}

/// Case-insensitive literal containment: the match rule every backend must agree with.
pub fn company_contains(company: &str, needle: &str) -> bool {
    company.to_lowercase().contains(&needle.to_lowercase())
}

/// Escapes `%`, `_` and `\` so user input is matched literally inside a LIKE pattern.
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

/// Directory backed by a `contacts (name, company, email)` table.
pub struct PgContactDirectory {
    pool: PgPool,
}

impl PgContactDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactDirectory for PgContactDirectory {
    async fn find_by_company(&self, needle: &str) -> Result<Option<ContactRecord>, LookupError> {
        // No ORDER BY: with several matches Postgres returns whichever row it reaches first.
        let record = sqlx::query_as::<_, ContactRecord>(
            r"
            SELECT name, company, email
            FROM contacts
            WHERE company ILIKE '%' || $1 || '%' ESCAPE '\'
            LIMIT 1
            ",
        )
        .bind(escape_like(needle))
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// REST (PostgREST / Supabase style)
// ────────────────────────────────────────────────────────────────────────────

/// Directory served over HTTP by a PostgREST-compatible endpoint exposing a
/// `contacts` resource.
#[derive(Clone)]
pub struct RestContactDirectory {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestContactDirectory {
    pub fn new(base_url: String, api_key: String) -> Result<Self, LookupError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn contacts_url(&self) -> String {
        format!("{}/contacts", self.base_url)
    }
}

/// Rows fetched per lookup. Candidates are re-checked locally, so the first
/// literal match must not be cut off by a tight limit.
const REST_CANDIDATE_LIMIT: usize = 25;

/// Query parameters for a case-insensitive containment search.
///
/// PostgREST rewrites `*` to `%`, and a backslash cannot escape it, so a
/// literal `*` is sent as the single-character wildcard `_`. The pattern is
/// therefore a superset of the real match and results go through `company_contains`.
fn rest_search_params(needle: &str) -> [(&'static str, String); 3] {
    let pattern = escape_like(needle).replace('*', "_");
    [
        ("select", "name,company,email".to_string()),
        ("company", format!("ilike.*{pattern}*")),
        ("limit", REST_CANDIDATE_LIMIT.to_string()),
    ]
}

#[async_trait]
impl ContactDirectory for RestContactDirectory {
    async fn find_by_company(&self, needle: &str) -> Result<Option<ContactRecord>, LookupError> {
        let response = self
            .client
            .get(self.contacts_url())
            .query(&rest_search_params(needle))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LookupError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let records: Vec<ContactRecord> = response.json().await?;
        debug!("Directory returned {} candidate(s)", records.len());

        Ok(records
            .into_iter()
            .find(|r| company_contains(&r.company, needle)))
    }

    fn backend(&self) -> &'static str {
        "rest"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory (JSON file)
// ────────────────────────────────────────────────────────────────────────────

/// Directory held entirely in memory. Loaded once from a JSON array of
/// `{name, company, email}` objects.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    records: Vec<ContactRecord>,
}

impl InMemoryDirectory {
    pub fn new(records: Vec<ContactRecord>) -> Self {
        Self { records }
    }

    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read contacts file '{}'", path.display()))?;
        let records: Vec<ContactRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Contacts file '{}' is not valid JSON", path.display()))?;

        info!(
            "Loaded {} contact(s) from {}",
            records.len(),
            path.display()
        );
        Ok(Self::new(records))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ContactDirectory for InMemoryDirectory {
    async fn find_by_company(&self, needle: &str) -> Result<Option<ContactRecord>, LookupError> {
        // First match in file order.
        Ok(self
            .records
            .iter()
            .find(|r| company_contains(&r.company, needle))
            .cloned())
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;
    use std::io::Write;

    fn contact(name: &str, company: &str, email: &str) -> ContactRecord {
        ContactRecord {
            name: name.to_string(),
            company: company.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("100%_real\\co"), "100\\%\\_real\\\\co");
        assert_eq!(escape_like("Acme Corp"), "Acme Corp");
    }

    #[test]
    fn test_rest_search_params() {
        let params = rest_search_params("Acme Corp");
        assert_eq!(params[1], ("company", "ilike.*Acme Corp*".to_string()));
        assert_eq!(params[2], ("limit", "25".to_string()));
    }

    #[test]
    fn test_rest_search_params_star_is_single_char_wildcard() {
        let params = rest_search_params("E*Trade");
        assert_eq!(params[1], ("company", "ilike.*E_Trade*".to_string()));
    }

    #[test]
    fn test_company_contains_treats_star_literally() {
        assert!(company_contains("E*Trade Financial", "e*trade"));
        assert!(!company_contains("Exchange Trade Co", "E*Trade"));
    }

    #[tokio::test]
    async fn test_in_memory_case_insensitive_substring() {
        let directory =
            InMemoryDirectory::new(vec![contact("Jane Doe", "Acme Corporation", "jane@acme.com")]);

        let found = directory.find_by_company("aCmE cOrP").await.unwrap();
        assert_eq!(found.unwrap().email, "jane@acme.com");
    }

    #[tokio::test]
    async fn test_in_memory_no_match() {
        let directory =
            InMemoryDirectory::new(vec![contact("Jane Doe", "Acme Corporation", "jane@acme.com")]);
        assert!(directory.find_by_company("Globex").await.unwrap().is_none());
        assert!(InMemoryDirectory::default()
            .find_by_company("Acme")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_in_memory_multiple_matches_returns_first() {
        let directory = InMemoryDirectory::new(vec![
            contact("Jane Doe", "Acme Corporation", "jane@acme.com"),
            contact("John Roe", "Acme Labs", "john@acmelabs.com"),
        ]);
        let found = directory.find_by_company("acme").await.unwrap().unwrap();
        assert_eq!(found.name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name":"Jane Doe","company":"Acme Corporation","email":"jane@acme.com"}}]"#
        )
        .unwrap();

        let directory = InMemoryDirectory::from_json_file(file.path()).unwrap();
        assert!(!directory.is_empty());
        assert!(directory.find_by_company("acme").await.unwrap().is_some());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = InMemoryDirectory::from_json_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_rest_directory_returns_first_record() {
        let app = Router::new().route(
            "/contacts",
            get(|| async {
                Json(vec![contact("Jane Doe", "Acme Corporation", "jane@acme.com")])
            }),
        );
        let base_url = serve(app).await;

        let directory = RestContactDirectory::new(base_url, "key".to_string()).unwrap();
        let found = directory.find_by_company("acme").await.unwrap();
        assert_eq!(found.unwrap().name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_rest_directory_skips_pattern_only_matches() {
        // The server matches loosely; only the literal substring match may be returned.
        let app = Router::new().route(
            "/contacts",
            get(|| async {
                Json(vec![
                    contact("Ed Exchange", "Exchange Trade Co", "ed@exchange.com"),
                    contact("Erin Trader", "E*Trade Financial", "erin@etrade.com"),
                ])
            }),
        );
        let base_url = serve(app).await;

        let directory = RestContactDirectory::new(base_url, "key".to_string()).unwrap();
        let found = directory.find_by_company("E*Trade").await.unwrap();
        assert_eq!(found.unwrap().email, "erin@etrade.com");

        assert!(directory
            .find_by_company("E*Trade Co")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_rest_directory_sends_star_as_single_char_wildcard() {
        let app = Router::new().route(
            "/contacts",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let expected = params.get("company").map(String::as_str) == Some("ilike.*E_Trade*")
                    && params.get("limit").map(String::as_str) == Some("25");
                if expected {
                    Json(vec![contact("Erin Trader", "E*Trade Financial", "erin@etrade.com")])
                } else {
                    Json(Vec::new())
                }
            }),
        );
        let base_url = serve(app).await;

        let directory = RestContactDirectory::new(base_url, "key".to_string()).unwrap();
        let found = directory.find_by_company("e*trade").await.unwrap();
        assert_eq!(found.unwrap().email, "erin@etrade.com");
    }

    #[tokio::test]
    async fn test_rest_directory_empty_array_is_no_match() {
        let app = Router::new().route(
            "/contacts",
            get(|| async { Json(Vec::<ContactRecord>::new()) }),
        );
        let base_url = serve(app).await;

        let directory = RestContactDirectory::new(base_url, "key".to_string()).unwrap();
        assert!(directory.find_by_company("acme").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rest_directory_server_error_is_lookup_error() {
        let app = Router::new().route(
            "/contacts",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
        let base_url = serve(app).await;

        let directory = RestContactDirectory::new(base_url, "key".to_string()).unwrap();
        match directory.find_by_company("acme").await {
            Err(LookupError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
