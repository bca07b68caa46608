pub mod employee;
pub mod record_kind;
pub mod shift;
pub mod shift_status;
pub mod time_record;
