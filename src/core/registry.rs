use std::sync::Arc;

use crate::availability::domain::AvailabilityService;
use crate::availability::factory::create_availability_service;
use crate::booking::domain::BookingService;
use crate::booking::factory::{create_booking_repository, create_booking_service};
use crate::booking::repository::BookingRepository;
use crate::calendar::domain::CalendarService;
use crate::calendar::factory::create_calendar_service;
use crate::core::domain::Configuration;
use crate::core::locks::KeyedLocks;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::hold::domain::HoldService;
use crate::hold::domain::service::SlotKey;
use crate::hold::factory::create_hold_service;
use crate::masters::factory::create_master_repository;
use crate::masters::repository::MasterRepository;
use crate::services::factory::create_service_repository;
use crate::services::repository::ServiceRepository;

// Registry wires the engine once at startup and hands shared service handles
// to every request worker. The hold working set and the slot locks must
// outlive individual requests, which is why services are not rebuilt per
// call; everything here is Arc-shared and cheap to clone through AppState.
pub(crate) struct Registry {
    pub masters: Arc<dyn MasterRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub calendar: Arc<dyn CalendarService>,
    pub availability: Arc<dyn AvailabilityService>,
    pub holds: Arc<dyn HoldService>,
    pub booking: Arc<dyn BookingService>,
}

impl Registry {
    pub(crate) async fn build(config: &Configuration, store: RepositoryStore) -> Arc<Registry> {
        let publisher = create_publisher(store.gateway_publisher()).await;
        let masters = create_master_repository(store).await;
        let services = create_service_repository(store).await;
        let bookings = create_booking_repository(store).await;
        let calendar = create_calendar_service(config, store, publisher.clone()).await;
        let availability = create_availability_service(
            config, masters.clone(), services.clone(), calendar.clone(), bookings.clone());
        let locks: Arc<KeyedLocks<SlotKey>> = Arc::new(KeyedLocks::new());
        let holds = create_hold_service(
            config, masters.clone(), services.clone(), bookings.clone(),
            publisher.clone(), locks.clone());
        let booking = create_booking_service(
            config, bookings.clone(), holds.clone(), masters.clone(), services.clone(),
            publisher, locks);
        Arc::new(Registry {
            masters,
            services,
            bookings,
            calendar,
            availability,
            holds,
            booking,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;
    use crate::core::registry::Registry;
    use crate::core::repository::RepositoryStore;
    use crate::hold::domain::HoldService;
    use crate::masters::repository::MasterRepository;

    #[tokio::test]
    async fn test_should_build_in_memory_registry() {
        let registry = Registry::build(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let active = registry.masters.find_active("test").await.expect("should query");
        assert!(active.is_empty());
        let purged = registry.holds.purge_expired().await.expect("should purge");
        assert_eq!(0, purged);
    }
}
