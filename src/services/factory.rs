use std::sync::Arc;
use crate::core::repository::RepositoryStore;
use crate::services::repository::ddb_service_repository::DDBServiceRepository;
use crate::services::repository::memory_service_repository::MemoryServiceRepository;
use crate::services::repository::ServiceRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_service_repository(store: RepositoryStore) -> Arc<dyn ServiceRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBServiceRepository::new(client, "services", "services_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "services", "service_id", "salon_id", "service_name").await;
            Arc::new(DDBServiceRepository::new(client, "services", "services_ndx"))
        }
        RepositoryStore::InMemory => {
            Arc::new(MemoryServiceRepository::new())
        }
    }
}
