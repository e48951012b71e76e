//! Request Store — owner-scoped persistence for analyzed maintenance requests.
//!
//! `AppState` holds an `Arc<dyn RequestStore>`: `PgRequestStore` when a database is
//! configured, `InMemoryRequestStore` otherwise.
//!
//! Every read and delete is scoped by owner. A record that exists but belongs to
//! someone else is `Forbidden`, not `NotFound`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::maintenance::models::Urgency;
use crate::models::maintenance::{CreatedRequest, MaintenanceRequestRow, NewMaintenanceRequest};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRequestStore;
pub use postgres::PgRequestStore;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("maintenance request {0} not found")]
    NotFound(Uuid),

    #[error("maintenance request {0} belongs to another user")]
    Forbidden(Uuid),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::Conflict(db.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

/// Listing filter. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFilter {
    pub urgency: Option<Urgency>,
    pub page: u32,
    pub limit: u32,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            urgency: None,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl ListFilter {
    /// Builds a filter, clamping page to ≥ 1 and limit to 1..=MAX_PAGE_LIMIT.
    pub fn new(urgency: Option<Urgency>, page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            urgency,
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// One page of an owner's requests, newest first, plus the unpaged total.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPage {
    pub items: Vec<MaintenanceRequestRow>,
    pub total: u64,
}

#[async_trait]
pub trait RequestStore: Send + Sync {
    async fn create(&self, request: NewMaintenanceRequest) -> Result<CreatedRequest, StoreError>;

    async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<MaintenanceRequestRow, StoreError>;

    async fn list(&self, owner_id: Uuid, filter: &ListFilter) -> Result<RequestPage, StoreError>;

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), StoreError>;
}

/// Ownership check shared by both backends.
fn check_owner(row: &MaintenanceRequestRow, owner_id: Uuid) -> Result<(), StoreError> {
    if row.user_id == owner_id {
        Ok(())
    } else {
        Err(StoreError::Forbidden(row.id))
    }
}
