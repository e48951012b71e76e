use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::{check_owner, ListFilter, RequestPage, RequestStore, StoreError};
use crate::models::maintenance::{
    CreatedRequest, MaintenanceRequestRow, NewMaintenanceRequest, STATUS_ANALYZED,
};

const SELECT_BY_ID: &str = "SELECT * FROM maintenance_requests WHERE id = $1";

const INSERT: &str = r#"
    INSERT INTO maintenance_requests
        (id, user_id, description, property_address, category, diagnosis,
         urgency, estimated_cost, contractor_type, next_steps, status,
         created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
"#;

// Newest first; id breaks ties so pages stay stable for rows saved in the same instant.
const LIST: &str = r#"
    SELECT * FROM maintenance_requests
    WHERE user_id = $1 AND ($2::TEXT IS NULL OR urgency = $2)
    ORDER BY created_at DESC, id DESC
    LIMIT $3 OFFSET $4
"#;

const COUNT: &str = r#"
    SELECT COUNT(*) FROM maintenance_requests
    WHERE user_id = $1 AND ($2::TEXT IS NULL OR urgency = $2)
"#;

const DELETE: &str = "DELETE FROM maintenance_requests WHERE id = $1 AND user_id = $2";

/// PostgreSQL-backed store over the `maintenance_requests` table.
#[derive(Clone)]
pub struct PgRequestStore {
    pool: PgPool,
}

impl PgRequestStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: Uuid) -> Result<MaintenanceRequestRow, StoreError> {
        sqlx::query_as::<_, MaintenanceRequestRow>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn insert(
        &self,
        id: Uuid,
        created_at: DateTime<Utc>,
        request: &NewMaintenanceRequest,
    ) -> Result<(), StoreError> {
        sqlx::query(INSERT)
            .bind(id)
            .bind(request.user_id)
            .bind(&request.description)
            .bind(&request.property_address)
            .bind(&request.category)
            .bind(&request.diagnosis)
            .bind(request.urgency.as_str())
            .bind(&request.estimated_cost)
            .bind(&request.contractor_type)
            .bind(&request.next_steps)
            .bind(STATUS_ANALYZED)
            .bind(created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// OFFSET bind value. Offsets past i64::MAX are not reachable with clamped limits.
fn offset_param(filter: &ListFilter) -> i64 {
    i64::try_from(filter.offset()).unwrap_or(i64::MAX)
}

fn total_from_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

/// A DELETE that matched nothing means the row vanished after the ownership check.
fn deleted_or_not_found(rows_affected: u64, id: Uuid) -> Result<(), StoreError> {
    if rows_affected == 0 {
        Err(StoreError::NotFound(id))
    } else {
        Ok(())
    }
}

#[async_trait]
impl RequestStore for PgRequestStore {
    async fn create(&self, request: NewMaintenanceRequest) -> Result<CreatedRequest, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        self.insert(id, now, &request).await?;

        info!("Saved maintenance request {id} for user {}", request.user_id);
        Ok(CreatedRequest { id, created_at: now })
    }

    async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<MaintenanceRequestRow, StoreError> {
        let row = self.fetch(id).await?;
        check_owner(&row, owner_id)?;
        Ok(row)
    }

    async fn list(&self, owner_id: Uuid, filter: &ListFilter) -> Result<RequestPage, StoreError> {
        let urgency = filter.urgency.map(|u| u.as_str());

        let items = sqlx::query_as::<_, MaintenanceRequestRow>(LIST)
            .bind(owner_id)
            .bind(urgency)
            .bind(i64::from(filter.limit))
            .bind(offset_param(filter))
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar(COUNT)
            .bind(owner_id)
            .bind(urgency)
            .fetch_one(&self.pool)
            .await?;

        Ok(RequestPage {
            items,
            total: total_from_count(total),
        })
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), StoreError> {
        let row = self.fetch(id).await?;
        check_owner(&row, owner_id)?;

        let result = sqlx::query(DELETE)
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        deleted_or_not_found(result.rows_affected(), id)?;

        info!("Deleted maintenance request {id} for user {owner_id}");
        Ok(())
    }
}
