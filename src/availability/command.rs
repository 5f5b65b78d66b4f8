pub mod get_available_slots_cmd;
pub mod get_batch_availability_cmd;
pub mod get_available_dates_cmd;
