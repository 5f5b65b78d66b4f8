use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::events::DomainEvent;
use crate::core::library::SalonError;
use crate::gateway::events::EventPublisher;
use crate::utils::ddb::parse_item;

// DDBPublisher appends events to a table when running against local DynamoDB,
// where no SNS endpoint exists
#[derive(Debug)]
pub struct DDBPublisher {
    client: Client,
    table_name: String,
}

impl DDBPublisher {
    pub(crate) fn new(client: Client, table_name: &str, _index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl EventPublisher for DDBPublisher {
    async fn create_topic(&self, _topic: &str) -> Result<String, SalonError> {
        Ok("".to_string())
    }

    async fn get_topics(&self) -> Result<Vec<String>, SalonError> {
        Ok(vec![])
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), SalonError> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(event)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(event_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| ()).map_err(SalonError::from)
    }
}
