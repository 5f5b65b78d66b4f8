pub(crate) mod ddb_master_repository;
pub(crate) mod memory_master_repository;

use async_trait::async_trait;
use crate::core::library::SalonResult;
use crate::core::repository::Repository;
use crate::masters::domain::model::MasterEntity;

#[async_trait]
pub(crate) trait MasterRepository: Repository<MasterEntity> {
    // masters eligible for batch availability, ordered by display name
    async fn find_active(&self, salon_id: &str) -> SalonResult<Vec<MasterEntity>>;
}
