//! Organization profile domain types
//!
//! One row in the `users` table per organization directory listing. The wire
//! representation is identical to the persisted row shape.

use serde::{Deserialize, Serialize};

/// Persisted organization profile, including the storage-assigned id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    pub logo: String,
    /// Caller-supplied timestamps, stored verbatim
    pub created: String,
    pub updated: String,
    pub address: String,
    pub email: String,
    pub domains: String,
    pub office_phone: String,
    pub fax_phone: String,
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub instagram: String,
    pub pinterest: String,
    pub tiktok: String,
    pub ein: String,
    pub is_default: bool,
    pub is_active: bool,
}

/// Request body for create and update. Everything except `id`; updates
/// replace every field with the supplied values.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilePayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    pub logo: String,
    pub created: String,
    pub updated: String,
    pub address: String,
    pub email: String,
    pub domains: String,
    pub office_phone: String,
    pub fax_phone: String,
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub instagram: String,
    pub pinterest: String,
    pub tiktok: String,
    pub ein: String,
    pub is_default: bool,
    pub is_active: bool,
}
