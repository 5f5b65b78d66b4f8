use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::library::{SalonError, SalonResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::services::domain::model::ServiceEntity;
use crate::services::repository::ServiceRepository;

#[derive(Debug, Default)]
pub(crate) struct MemoryServiceRepository {
    records: RwLock<HashMap<String, ServiceEntity>>,
}

impl MemoryServiceRepository {
    pub(crate) fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Repository<ServiceEntity> for MemoryServiceRepository {
    async fn create(&self, entity: &ServiceEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        if records.contains_key(entity.service_id.as_str()) {
            return Err(SalonError::conflict(
                format!("service already exists {}", entity.service_id).as_str()));
        }
        records.insert(entity.service_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &ServiceEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        match records.get(entity.service_id.as_str()) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(SalonError::conflict(
                        format!("service version mismatch for {}", entity.service_id).as_str()));
                }
                let mut updated = entity.clone();
                updated.version += 1;
                updated.updated_at = Utc::now().naive_utc();
                records.insert(entity.service_id.to_string(), updated);
                Ok(1)
            }
            None => Err(SalonError::not_found(
                format!("service not found for {}", entity.service_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> SalonResult<ServiceEntity> {
        let records = self.records.read().await;
        records.get(id).cloned().ok_or_else(|| {
            SalonError::not_found(format!("service not found for {}", id).as_str())
        })
    }

    async fn delete(&self, id: &str) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        records.remove(id).map(|_| 1).ok_or_else(|| {
            SalonError::not_found(format!("service not found for {}", id).as_str())
        })
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SalonResult<PaginatedResult<ServiceEntity>> {
        let records = self.records.read().await;
        let mut matched: Vec<ServiceEntity> = records.values()
            .filter(|s| predicate.get("salon_id").map_or(true, |v| &s.salon_id == v))
            .filter(|s| predicate.get("service_name").map_or(true, |v| &s.name == v))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        matched.truncate(page_size);
        Ok(PaginatedResult::new(page, page_size, None, matched))
    }
}

#[async_trait]
impl ServiceRepository for MemoryServiceRepository {
    async fn find_active(&self, salon_id: &str) -> SalonResult<Vec<ServiceEntity>> {
        let records = self.records.read().await;
        let mut matched: Vec<ServiceEntity> = records.values()
            .filter(|s| s.salon_id == salon_id && s.active)
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(matched)
    }
}
