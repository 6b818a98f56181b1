//! Contact resolution: a pluggable, trait-based strategy that maps a company
//! query to at most one contact record.
//!
//! `DirectoryResolver` searches an external `ContactDirectory`.
//! `SyntheticResolver` derives a placeholder contact from the query alone and
//! is used when no directory is configured.
//!
//! `AppState` holds an `Arc<dyn ContactResolver>`, chosen at startup via config.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::contact::ContactRecord;
use crate::outreach::directory::{ContactDirectory, LookupError};
use crate::outreach::query::CompanyQuery;
use crate::outreach::render::fill_placeholders;
use crate::outreach::templates::SYNTHETIC_ADDRESSEE_TEMPLATE;

/// Outcome of a successful lookup. `NotFound` is a valid answer, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "contact", rename_all = "snake_case")]
pub enum Resolution {
    Found(ContactRecord),
    NotFound,
}

/// The resolver trait. Implement this to swap strategies without touching
/// the handlers.
#[async_trait]
pub trait ContactResolver: Send + Sync {
    async fn resolve(&self, query: &CompanyQuery) -> Result<Resolution, LookupError>;

    /// Backend label for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// DirectoryResolver
// ────────────────────────────────────────────────────────────────────────────

/// Resolves against an external directory with a per-lookup deadline.
/// Never retries; a timed-out read is reported as `LookupError::TimedOut`.
pub struct DirectoryResolver {
    directory: Arc<dyn ContactDirectory>,
    timeout: Duration,
}

impl DirectoryResolver {
    pub fn new(directory: Arc<dyn ContactDirectory>, timeout: Duration) -> Self {
        Self { directory, timeout }
    }
}

#[async_trait]
impl ContactResolver for DirectoryResolver {
    async fn resolve(&self, query: &CompanyQuery) -> Result<Resolution, LookupError> {
        let lookup = self.directory.find_by_company(query.as_str());

        let record = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    "Directory lookup for '{query}' exceeded {:?}",
                    self.timeout
                );
                return Err(LookupError::TimedOut(self.timeout));
            }
        };

        debug!(
            "Directory ({}) lookup for '{query}': {}",
            self.directory.backend(),
            if record.is_some() { "found" } else { "not found" }
        );

        Ok(match record {
            Some(record) => Resolution::Found(record),
            None => Resolution::NotFound,
        })
    }

    fn backend(&self) -> &'static str {
        self.directory.backend()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SyntheticResolver
// ────────────────────────────────────────────────────────────────────────────

/// Fabricates a contact from the query: `hr@<name without whitespace>.com`
/// addressed to the company's hiring manager. Always `Found`, never fails.
pub struct SyntheticResolver;

impl SyntheticResolver {
    pub fn synthesize(query: &CompanyQuery) -> ContactRecord {
        let domain: String = query
            .as_str()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        ContactRecord {
            name: fill_placeholders(SYNTHETIC_ADDRESSEE_TEMPLATE, &[("company", query.as_str())]),
            company: query.as_str().to_string(),
            email: format!("hr@{domain}.com"),
        }
    }
}

#[async_trait]
impl ContactResolver for SyntheticResolver {
    async fn resolve(&self, query: &CompanyQuery) -> Result<Resolution, LookupError> {
        Ok(Resolution::Found(Self::synthesize(query)))
    }

    fn backend(&self) -> &'static str {
        "synthetic"
    }
}
