use std::sync::RwLock;
use async_trait::async_trait;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::SalonError;
use crate::gateway::events::EventPublisher;

// LogPublisher writes events to the structured log; used by the in-memory
// store in tests and single-node development where no dispatcher is wired
#[derive(Debug, Default)]
pub struct LogPublisher {
    topics: RwLock<Vec<String>>,
}

impl LogPublisher {
    pub(crate) fn new() -> Self {
        Self {
            topics: RwLock::new(vec![]),
        }
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn create_topic(&self, topic: &str) -> Result<String, SalonError> {
        if let Ok(mut topics) = self.topics.write() {
            if !topics.contains(&topic.to_string()) {
                topics.push(topic.to_string());
            }
        }
        Ok(topic.to_string())
    }

    async fn get_topics(&self) -> Result<Vec<String>, SalonError> {
        match self.topics.read() {
            Ok(topics) => Ok(topics.clone()),
            Err(_) => Ok(vec![]),
        }
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), SalonError> {
        info!(event = %event.name, group = %event.group, key = %event.key,
              data = %event.json_data, "domain event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::logs::publisher::LogPublisher;

    #[tokio::test]
    async fn test_should_publish_to_logs() {
        let publisher = LogPublisher::new();
        let data = HashMap::from([("hold_id", "h1")]);
        let event = DomainEvent::added("hold_created", "hold", "h1", &HashMap::new(), &data).expect("build event");
        let topic = publisher.create_topic(event.name.as_str()).await.expect("should create topic");
        let _ = publisher.publish(&event).await.expect("should publish");
        let topics = publisher.get_topics().await.expect("should get topics");
        assert!(topics.contains(&topic));
    }
}
