use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::maintenance::models::Urgency;

/// Status given to every request at creation. No mutation path changes it.
pub const STATUS_ANALYZED: &str = "analyzed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub property_address: Option<String>,
    pub category: Option<String>,
    pub diagnosis: String,
    #[sqlx(try_from = "String")]
    pub urgency: Urgency,
    pub estimated_cost: Option<String>,
    pub contractor_type: Option<String>,
    pub next_steps: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything a store needs to create a request; identity and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceRequest {
    pub user_id: Uuid,
    pub description: String,
    pub property_address: Option<String>,
    pub category: Option<String>,
    pub diagnosis: String,
    pub urgency: Urgency,
    pub estimated_cost: Option<String>,
    pub contractor_type: Option<String>,
    pub next_steps: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRequest {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}
