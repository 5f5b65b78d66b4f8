use std::collections::HashMap;
use std::sync::RwLock;
use aws_sdk_sns::Client;
use async_trait::async_trait;
use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::create_topic::CreateTopicError;
use aws_sdk_sns::operation::list_topics::ListTopicsError;
use aws_sdk_sns::operation::publish::PublishError;
use tracing::log::info;
use crate::core::events::DomainEvent;
use crate::core::library::SalonError;
use crate::gateway::events::EventPublisher;

#[derive(Debug)]
pub struct SnsPublisher {
    client: Client,
    // topic name -> ARN; publishers are shared across request workers
    topics: RwLock<HashMap<String, String>>,
}

impl SnsPublisher {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            topics: RwLock::new(HashMap::new()),
        }
    }

    fn topic_arn(&self, name: &str) -> Option<String> {
        match self.topics.read() {
            Ok(topics) => topics.get(name).cloned(),
            Err(_) => None,
        }
    }
}

#[async_trait]
impl EventPublisher for SnsPublisher {
    async fn create_topic(&self, topic: &str) -> Result<String, SalonError> {
        let resp = self.client.create_topic().name(topic).send().await?;
        let arn = resp.topic_arn().unwrap_or_default();
        if let Ok(mut topics) = self.topics.write() {
            topics.insert(topic.to_string(), arn.to_string());
        }
        info!("Created topic with ARN: {}", arn);
        Ok(arn.to_string())
    }

    async fn get_topics(&self) -> Result<Vec<String>, SalonError> {
        let mut topics = vec![];
        let resp = self.client.list_topics().send().await?;
        for topic in resp.topics().unwrap_or_default() {
            topics.push(topic.topic_arn().unwrap_or_default().to_string());
        }
        Ok(topics)
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), SalonError> {
        if let Some(arn) = self.topic_arn(event.name.as_str()) {
            let json = serde_json::to_string(event)?;
            self.client.publish().topic_arn(arn).message(json).send().await?;
            Ok(())
        } else {
            Err(SalonError::runtime(format!("topic is not found {}", event.name).as_str(), None))
        }
    }
}

impl From<SdkError<CreateTopicError>> for SalonError {
    fn from(err: SdkError<CreateTopicError>) -> Self {
        SalonError::runtime(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<ListTopicsError>> for SalonError {
    fn from(err: SdkError<ListTopicsError>) -> Self {
        SalonError::runtime(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<PublishError>> for SalonError {
    fn from(err: SdkError<PublishError>) -> Self {
        SalonError::runtime(format!("{:?}", err).as_str(), None)
    }
}
