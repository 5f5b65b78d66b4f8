pub mod finalize_booking_cmd;
pub mod direct_booking_cmd;
pub mod confirm_booking_cmd;
pub mod cancel_booking_cmd;
