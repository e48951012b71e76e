use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{check_owner, ListFilter, RequestPage, RequestStore, StoreError};
use crate::models::maintenance::{
    CreatedRequest, MaintenanceRequestRow, NewMaintenanceRequest, STATUS_ANALYZED,
};

/// Process-local store. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryRequestStore {
    requests: Arc<RwLock<HashMap<Uuid, MaintenanceRequestRow>>>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn create(&self, request: NewMaintenanceRequest) -> Result<CreatedRequest, StoreError> {
        let now = Utc::now();
        let row = MaintenanceRequestRow {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            description: request.description,
            property_address: request.property_address,
            category: request.category,
            diagnosis: request.diagnosis,
            urgency: request.urgency,
            estimated_cost: request.estimated_cost,
            contractor_type: request.contractor_type,
            next_steps: request.next_steps,
            status: STATUS_ANALYZED.to_string(),
            created_at: now,
            updated_at: now,
        };
        let created = CreatedRequest {
            id: row.id,
            created_at: row.created_at,
        };

        let mut requests = self.requests.write().await;
        if requests.contains_key(&row.id) {
            return Err(StoreError::Conflict(format!("duplicate id {}", row.id)));
        }
        requests.insert(row.id, row);
        Ok(created)
    }

    async fn get(&self, id: Uuid, owner_id: Uuid) -> Result<MaintenanceRequestRow, StoreError> {
        let requests = self.requests.read().await;
        let row = requests.get(&id).ok_or(StoreError::NotFound(id))?;
        check_owner(row, owner_id)?;
        Ok(row.clone())
    }

    async fn list(&self, owner_id: Uuid, filter: &ListFilter) -> Result<RequestPage, StoreError> {
        let requests = self.requests.read().await;
        let mut matching: Vec<&MaintenanceRequestRow> = requests
            .values()
            .filter(|r| r.user_id == owner_id)
            .filter(|r| filter.urgency.map_or(true, |u| r.urgency == u))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(filter.limit as usize)
            .cloned()
            .collect();

        Ok(RequestPage { items, total })
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), StoreError> {
        let mut requests = self.requests.write().await;
        let row = requests.get(&id).ok_or(StoreError::NotFound(id))?;
        check_owner(row, owner_id)?;
        requests.remove(&id);
        Ok(())
    }
}
