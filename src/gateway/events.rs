use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::SalonError;

// EventPublisher hands booking-lifecycle events to the external notification
// dispatcher. Publishing is fire-and-forget from the engine's point of view;
// a failed publish never rolls back a committed booking.
#[async_trait]
pub(crate) trait EventPublisher: Sync + Send {
    async fn create_topic(&self, topic: &str) -> Result<String, SalonError>;
    async fn get_topics(&self) -> Result<Vec<String>, SalonError>;
    async fn publish(&self, event: &DomainEvent) -> Result<(), SalonError>;
}
