use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PROBONO: &str = "PROBONO";
pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_INACTIVE: &str = "INACTIVE";

pub const CLIENT_STATUSES: [&str; 3] = [STATUS_PROBONO, STATUS_ACTIVE, STATUS_INACTIVE];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub legal_name: String,
    pub tax_id: String,
    pub municipal_registration: String,
    pub tax_regime: String,
    pub legal_nature: String,
    pub company_size: String,
    pub responsible_name: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub status: String,
    pub start_date: Option<String>,
    pub departure_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// A former client is one with a recorded departure date. Historical
    /// records carry both NULL and "" for "no departure", so an empty
    /// string counts as absent.
    pub fn is_former(&self) -> bool {
        departure_forces_inactive(self.departure_date.as_deref())
    }
}

/// Business rule on the update path: recording a non-empty departure date
/// moves the client to INACTIVE, regardless of any status supplied in the
/// same patch.
pub fn departure_forces_inactive(departure_date: Option<&str>) -> bool {
    departure_date.is_some_and(|date| !date.is_empty())
}

/// Status resolution for a patch: when the patch records a departure, the
/// stored status becomes INACTIVE even if the same patch also carries an
/// explicit status; otherwise the patched status (or None) passes through.
pub fn resolve_patch_status(
    status: Option<String>,
    departure_date: Option<&str>,
) -> Option<String> {
    if departure_forces_inactive(departure_date) {
        Some(STATUS_INACTIVE.to_string())
    } else {
        status
    }
}
