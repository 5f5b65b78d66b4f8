use std::sync::Arc;
use crate::booking::repository::BookingRepository;
use crate::core::domain::Configuration;
use crate::core::locks::KeyedLocks;
use crate::gateway::events::EventPublisher;
use crate::hold::domain::HoldService;
use crate::hold::domain::service::{HoldManagerImpl, SlotKey};
use crate::masters::repository::MasterRepository;
use crate::services::repository::ServiceRepository;

// the hold working set lives for the whole process; callers share one
// instance through the registry instead of building one per request
pub(crate) fn create_hold_service(config: &Configuration,
                                  master_repository: Arc<dyn MasterRepository>,
                                  service_repository: Arc<dyn ServiceRepository>,
                                  booking_repository: Arc<dyn BookingRepository>,
                                  events_publisher: Arc<dyn EventPublisher>,
                                  locks: Arc<KeyedLocks<SlotKey>>) -> Arc<dyn HoldService> {
    Arc::new(HoldManagerImpl::new(config, master_repository, service_repository,
                                  booking_repository, events_publisher, locks))
}
