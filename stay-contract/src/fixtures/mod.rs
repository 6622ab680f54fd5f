//! Request builders and server-state-aware fixtures

mod booking;
mod property;

pub use booking::{
    OverlapKind, available_start_date, booking_with, create_available_booking,
    create_booking_with_available_dates, custom_booking, default_guest, last_booked_date,
};
pub use property::{
    ALIAS_PREFIX, DEFAULT_COUNTRY_CODE, construct_property, create_property, unique_alias,
};
