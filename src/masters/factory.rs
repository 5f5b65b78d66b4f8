use std::sync::Arc;
use crate::core::repository::RepositoryStore;
use crate::masters::repository::ddb_master_repository::DDBMasterRepository;
use crate::masters::repository::memory_master_repository::MemoryMasterRepository;
use crate::masters::repository::MasterRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_master_repository(store: RepositoryStore) -> Arc<dyn MasterRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBMasterRepository::new(client, "masters", "masters_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "masters", "master_id", "salon_id", "display_name").await;
            Arc::new(DDBMasterRepository::new(client, "masters", "masters_ndx"))
        }
        RepositoryStore::InMemory => {
            Arc::new(MemoryMasterRepository::new())
        }
    }
}
