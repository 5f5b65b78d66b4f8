use async_trait::async_trait;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::core::library::{SalonResult, PaginatedResult};
use crate::gateway::GatewayPublisherVia;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> SalonResult<usize>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> SalonResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> SalonResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> SalonResult<usize>;

    // find by secondary attributes
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> SalonResult<PaginatedResult<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    // process-local store used by tests and single-node development; the hold
    // working set is in-process either way
    InMemory,
}

impl RepositoryStore {
    pub fn gateway_publisher(&self) -> GatewayPublisherVia {
        match self {
            RepositoryStore::DynamoDB => { GatewayPublisherVia::Sns },
            RepositoryStore::LocalDynamoDB => { GatewayPublisherVia::LocalDynamoDB },
            RepositoryStore::InMemory => { GatewayPublisherVia::Logs },
        }
    }
}
