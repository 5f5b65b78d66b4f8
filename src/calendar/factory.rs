use std::sync::Arc;
use crate::calendar::domain::CalendarService;
use crate::calendar::domain::service::CalendarServiceImpl;
use crate::calendar::repository::ddb_holiday_repository::DDBHolidayRepository;
use crate::calendar::repository::ddb_time_off_repository::DDBTimeOffRepository;
use crate::calendar::repository::ddb_working_hours_repository::DDBWorkingHoursRepository;
use crate::calendar::repository::memory_calendar_repository::{MemoryHolidayRepository, MemoryTimeOffRepository, MemoryWorkingHoursRepository};
use crate::calendar::repository::{HolidayRepository, TimeOffRepository, WorkingHoursRepository};
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::events::EventPublisher;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_working_hours_repository(store: RepositoryStore) -> Arc<dyn WorkingHoursRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBWorkingHoursRepository::new(client, "working_hours", "working_hours_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "working_hours", "rule_id", "master_id", "rule_id").await;
            Arc::new(DDBWorkingHoursRepository::new(client, "working_hours", "working_hours_ndx"))
        }
        RepositoryStore::InMemory => {
            Arc::new(MemoryWorkingHoursRepository::new())
        }
    }
}

pub(crate) async fn create_time_off_repository(store: RepositoryStore) -> Arc<dyn TimeOffRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBTimeOffRepository::new(client, "time_off", "time_off_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "time_off", "time_off_id", "master_id", "start_at").await;
            Arc::new(DDBTimeOffRepository::new(client, "time_off", "time_off_ndx"))
        }
        RepositoryStore::InMemory => {
            Arc::new(MemoryTimeOffRepository::new())
        }
    }
}

pub(crate) async fn create_holiday_repository(store: RepositoryStore) -> Arc<dyn HolidayRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBHolidayRepository::new(client, "holidays", "holidays_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "holidays", "holiday_date", "salon_id", "holiday_date").await;
            Arc::new(DDBHolidayRepository::new(client, "holidays", "holidays_ndx"))
        }
        RepositoryStore::InMemory => {
            Arc::new(MemoryHolidayRepository::new())
        }
    }
}

pub(crate) async fn create_calendar_service(config: &Configuration, store: RepositoryStore,
                                            events_publisher: Arc<dyn EventPublisher>) -> Arc<dyn CalendarService> {
    let working_hours_repository = create_working_hours_repository(store).await;
    let time_off_repository = create_time_off_repository(store).await;
    let holiday_repository = create_holiday_repository(store).await;
    Arc::new(CalendarServiceImpl::new(config, working_hours_repository,
                                      time_off_repository, holiday_repository, events_publisher))
}
