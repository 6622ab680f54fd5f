//! Booking fixtures, including dates derived from live server state

use crate::error::FixtureError;
use chrono::{Days, NaiveDate};
use stay_http_client::dates::{format_date, today_utc};
use stay_http_client::{
    Auth, BookingRequest, BookingResponse, BookingService, DateError, Guest, STATUS_SCHEDULED,
    StatusCode,
};
use tracing::debug;
use uuid::Uuid;

/// Guest used when a scenario does not care about guest details
pub fn default_guest() -> Guest {
    Guest::new("Diogo", "Pereira", "1984-05-18")
}

/// Booking with every field given explicitly
pub fn booking_with(
    id: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    property_id: Option<String>,
    status: Option<String>,
    guest: Option<Guest>,
) -> BookingRequest {
    BookingRequest {
        id,
        start_date,
        end_date,
        status,
        guest,
        property_id,
    }
}

/// Scheduled booking for the default guest over the given dates
pub fn custom_booking(property_id: &str, start_date: &str, end_date: &str) -> BookingRequest {
    booking_with(
        Some(Uuid::new_v4().to_string()),
        Some(start_date.to_string()),
        Some(end_date.to_string()),
        Some(property_id.to_string()),
        Some(STATUS_SCHEDULED.to_string()),
        Some(default_guest()),
    )
}

/// End date of the property's last booking, by list order
///
/// The last matching entry in the server's list is used as-is, without
/// comparing dates. This relies on the server listing bookings in creation
/// order; if it ever reorders, the derived date may collide.
pub fn last_booked_date(
    service: &BookingService<'_>,
    auth: &Auth,
    property_id: &str,
) -> Result<Option<NaiveDate>, FixtureError> {
    let response = service.retrieve_all(auth)?;
    if response.status() != StatusCode::OK {
        return Err(FixtureError::UnexpectedStatus {
            operation: "GET /bookings",
            status: response.status().as_u16(),
            body: response.body().to_string(),
        });
    }

    let bookings: Vec<BookingResponse> = response.json()?;
    let last = bookings
        .iter()
        .filter(|booking| booking.property_id.as_deref() == Some(property_id))
        .next_back();

    match last {
        Some(booking) => {
            let end_date = booking.end_date.as_ref().ok_or(FixtureError::MissingField {
                entity: "booking",
                field: "endDate",
            })?;
            Ok(Some(end_date.to_naive_date()?))
        }
        None => Ok(None),
    }
}

/// First date a new booking can start on, falling back to today (UTC)
pub fn available_start_date(
    service: &BookingService<'_>,
    auth: &Auth,
    property_id: &str,
) -> Result<NaiveDate, FixtureError> {
    let date = last_booked_date(service, auth, property_id)?;
    debug!(property_id, last_end = ?date, "resolved last booked date");
    Ok(date.unwrap_or_else(today_utc))
}

/// Booking of `nights` days starting on the property's first available date
pub fn create_available_booking(
    service: &BookingService<'_>,
    auth: &Auth,
    property_id: &str,
    nights: u64,
) -> Result<BookingRequest, FixtureError> {
    let start = available_start_date(service, auth, property_id)?;
    let end = start
        .checked_add_days(Days::new(nights))
        .ok_or_else(|| DateError::Format(format!("{} + {} days", format_date(start), nights)))?;

    Ok(custom_booking(
        property_id,
        &format_date(start),
        &format_date(end),
    ))
}

/// One-day booking starting exactly where the property's last booking ends
pub fn create_booking_with_available_dates(
    service: &BookingService<'_>,
    auth: &Auth,
    property_id: &str,
) -> Result<BookingRequest, FixtureError> {
    create_available_booking(service, auth, property_id, 1)
}

/// Ways a new date range can overlap an existing booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlapKind {
    /// Starts on the same day, ends later
    SameStart,
    /// Strictly within the existing range
    Inside,
    /// Starts before and ends inside
    OverlapStart,
    /// Starts inside and ends after
    OverlapEnd,
    /// Starts before and ends after
    Encompassing,
}

impl OverlapKind {
    /// Every overlap kind
    pub const ALL: [OverlapKind; 5] = [
        OverlapKind::SameStart,
        OverlapKind::Inside,
        OverlapKind::OverlapStart,
        OverlapKind::OverlapEnd,
        OverlapKind::Encompassing,
    ];

    /// Kebab-case name used in scenario output
    pub fn name(self) -> &'static str {
        match self {
            OverlapKind::SameStart => "same-start",
            OverlapKind::Inside => "inside",
            OverlapKind::OverlapStart => "overlap-start",
            OverlapKind::OverlapEnd => "overlap-end",
            OverlapKind::Encompassing => "encompassing",
        }
    }

    /// A range overlapping `[start, end]` in this way
    ///
    /// Overlaps are placed strictly inside the existing range rather than on
    /// its boundary days. Returns `None` when `end` is less than two days
    /// after `start`, since `Inside` would then need a start equal to its end.
    pub fn range(self, start: NaiveDate, end: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        if end.signed_duration_since(start).num_days() < 2 {
            return None;
        }

        let before = |date: NaiveDate| date.checked_sub_days(Days::new(1));
        let after = |date: NaiveDate| date.checked_add_days(Days::new(1));

        match self {
            OverlapKind::SameStart => Some((start, after(end)?)),
            OverlapKind::Inside => Some((after(start)?, before(end)?)),
            OverlapKind::OverlapStart => Some((before(start)?, after(start)?)),
            OverlapKind::OverlapEnd => Some((before(end)?, after(end)?)),
            OverlapKind::Encompassing => Some((before(start)?, after(end)?)),
        }
    }
}
