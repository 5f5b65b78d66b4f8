use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::library::{SalonError, SalonResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::masters::domain::model::MasterEntity;
use crate::masters::repository::MasterRepository;

// process-local directory used by tests and single-node development
#[derive(Debug, Default)]
pub(crate) struct MemoryMasterRepository {
    records: RwLock<HashMap<String, MasterEntity>>,
}

impl MemoryMasterRepository {
    pub(crate) fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl Repository<MasterEntity> for MemoryMasterRepository {
    async fn create(&self, entity: &MasterEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        if records.contains_key(entity.master_id.as_str()) {
            return Err(SalonError::conflict(
                format!("master already exists {}", entity.master_id).as_str()));
        }
        records.insert(entity.master_id.to_string(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &MasterEntity) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        match records.get(entity.master_id.as_str()) {
            Some(existing) => {
                if existing.version != entity.version {
                    return Err(SalonError::conflict(
                        format!("master version mismatch for {}", entity.master_id).as_str()));
                }
                let mut updated = entity.clone();
                updated.version += 1;
                updated.updated_at = Utc::now().naive_utc();
                records.insert(entity.master_id.to_string(), updated);
                Ok(1)
            }
            None => Err(SalonError::not_found(
                format!("master not found for {}", entity.master_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> SalonResult<MasterEntity> {
        let records = self.records.read().await;
        records.get(id).cloned().ok_or_else(|| {
            SalonError::not_found(format!("master not found for {}", id).as_str())
        })
    }

    async fn delete(&self, id: &str) -> SalonResult<usize> {
        let mut records = self.records.write().await;
        records.remove(id).map(|_| 1).ok_or_else(|| {
            SalonError::not_found(format!("master not found for {}", id).as_str())
        })
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SalonResult<PaginatedResult<MasterEntity>> {
        let records = self.records.read().await;
        let mut matched: Vec<MasterEntity> = records.values()
            .filter(|m| predicate.get("salon_id").map_or(true, |v| &m.salon_id == v))
            .filter(|m| predicate.get("display_name").map_or(true, |v| &m.display_name == v))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        matched.truncate(page_size);
        Ok(PaginatedResult::new(page, page_size, None, matched))
    }
}

#[async_trait]
impl MasterRepository for MemoryMasterRepository {
    async fn find_active(&self, salon_id: &str) -> SalonResult<Vec<MasterEntity>> {
        let records = self.records.read().await;
        let mut matched: Vec<MasterEntity> = records.values()
            .filter(|m| m.salon_id == salon_id && m.active)
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(matched)
    }
}
