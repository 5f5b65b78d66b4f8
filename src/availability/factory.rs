use std::sync::Arc;
use crate::availability::domain::AvailabilityService;
use crate::availability::domain::service::AvailabilityServiceImpl;
use crate::booking::repository::BookingRepository;
use crate::calendar::domain::CalendarService;
use crate::core::domain::Configuration;
use crate::masters::repository::MasterRepository;
use crate::services::repository::ServiceRepository;

pub(crate) fn create_availability_service(config: &Configuration,
                                          master_repository: Arc<dyn MasterRepository>,
                                          service_repository: Arc<dyn ServiceRepository>,
                                          calendar_service: Arc<dyn CalendarService>,
                                          booking_repository: Arc<dyn BookingRepository>) -> Arc<dyn AvailabilityService> {
    Arc::new(AvailabilityServiceImpl::new(config, master_repository, service_repository,
                                          calendar_service, booking_repository))
}
