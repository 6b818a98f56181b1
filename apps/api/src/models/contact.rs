use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One entry of the external contact directory. Read-only from this service's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ContactRecord {
    pub name: String,
    pub company: String,
    pub email: String,
}
