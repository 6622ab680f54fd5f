//! One service per REST resource
//!
//! Services only build requests. They carry no business logic and return the
//! raw response for every status code.

mod booking;
mod property;

pub use booking::BookingService;
pub use property::PropertyService;
