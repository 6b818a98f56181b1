//! Lookup pipeline: validate → resolve → render.
//!
//! All-or-nothing: either a complete `CompanyInfo` or a typed error. No retries.

use tracing::info;

use crate::errors::AppError;
use crate::outreach::query::CompanyQuery;
use crate::outreach::render::{render, CompanyInfo};
use crate::outreach::resolver::{ContactResolver, Resolution};

/// Validates the raw query and resolves it. Validation failures never reach the directory.
pub async fn resolve_company(
    resolver: &dyn ContactResolver,
    raw_query: &str,
) -> Result<(CompanyQuery, Resolution), AppError> {
    let query = CompanyQuery::parse(raw_query)?;
    let resolution = resolver.resolve(&query).await?;
    Ok((query, resolution))
}

/// Full pipeline. `NotFound` surfaces as `AppError::ContactNotFound` and is never rendered.
pub async fn lookup_company_info(
    resolver: &dyn ContactResolver,
    raw_query: &str,
) -> Result<CompanyInfo, AppError> {
    let (query, resolution) = resolve_company(resolver, raw_query).await?;

    match resolution {
        Resolution::Found(record) => {
            info!(
                "Rendering outreach for '{query}' via {} backend",
                resolver.backend()
            );
            Ok(render(&query, &record))
        }
        Resolution::NotFound => Err(AppError::ContactNotFound(query.to_string())),
    }
}
