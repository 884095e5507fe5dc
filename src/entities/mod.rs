pub mod aircraft;
pub mod booking;
pub mod flight;
