pub mod put_working_hours_cmd;
pub mod remove_working_hours_cmd;
pub mod add_time_off_cmd;
pub mod remove_time_off_cmd;
pub mod put_holiday_cmd;
pub mod remove_holiday_cmd;
