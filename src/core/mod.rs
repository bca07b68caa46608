pub mod clock;
pub mod duration;
pub mod employee;
pub mod log;
pub mod reconcile;
pub mod record;
pub mod shift;
