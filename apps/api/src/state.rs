use std::sync::Arc;

use crate::outreach::resolver::ContactResolver;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Resolution strategy (directory-backed or synthetic), picked at startup from `RESOLVER_MODE`.
    pub resolver: Arc<dyn ContactResolver>,
}
