pub mod aircraft;
pub mod bookings;
pub mod flights;
