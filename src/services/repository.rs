pub(crate) mod ddb_service_repository;
pub(crate) mod memory_service_repository;

use async_trait::async_trait;
use crate::core::library::SalonResult;
use crate::core::repository::Repository;
use crate::services::domain::model::ServiceEntity;

#[async_trait]
pub(crate) trait ServiceRepository: Repository<ServiceEntity> {
    async fn find_active(&self, salon_id: &str) -> SalonResult<Vec<ServiceEntity>>;
}
