use std::sync::Arc;
use crate::booking::domain::BookingService;
use crate::booking::domain::service::BookingServiceImpl;
use crate::booking::repository::BookingRepository;
use crate::booking::repository::ddb_booking_repository::DDBBookingRepository;
use crate::booking::repository::memory_booking_repository::MemoryBookingRepository;
use crate::core::domain::Configuration;
use crate::core::locks::KeyedLocks;
use crate::core::repository::RepositoryStore;
use crate::gateway::events::EventPublisher;
use crate::hold::domain::HoldService;
use crate::hold::domain::service::SlotKey;
use crate::masters::repository::MasterRepository;
use crate::services::repository::ServiceRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_booking_repository(store: RepositoryStore) -> Arc<dyn BookingRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBBookingRepository::new(client, "bookings", "bookings_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "bookings", "booking_id", "master_id", "booking_date").await;
            Arc::new(DDBBookingRepository::new(client, "bookings", "bookings_ndx"))
        }
        RepositoryStore::InMemory => {
            Arc::new(MemoryBookingRepository::new())
        }
    }
}

pub(crate) fn create_booking_service(config: &Configuration,
                                     booking_repository: Arc<dyn BookingRepository>,
                                     hold_service: Arc<dyn HoldService>,
                                     master_repository: Arc<dyn MasterRepository>,
                                     service_repository: Arc<dyn ServiceRepository>,
                                     events_publisher: Arc<dyn EventPublisher>,
                                     locks: Arc<KeyedLocks<SlotKey>>) -> Arc<dyn BookingService> {
    Arc::new(BookingServiceImpl::new(config, booking_repository, hold_service,
                                     master_repository, service_repository,
                                     events_publisher, locks))
}
