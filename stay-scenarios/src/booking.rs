//! Booking scenarios
//!
//! Scenarios that need a free date range create their own property first, so
//! they never collide with bookings left behind by earlier runs.

use anyhow::anyhow;
use stay_contract::{
    BookingField, ExpectedAuthError, ExpectedBookingRejection, FieldSet, FixtureError, OverlapKind,
    ScenarioContext, ScenarioError, SoftAssert, assert_unique_values, create_available_booking,
    create_booking_with_available_dates, create_property, custom_booking, expect_auth_error,
    expect_booking_rejection, expect_entity, validate_booking_response,
};
use stay_http_client::dates::{format_date, parse_date};
use stay_http_client::{
    Auth, BookingRequest, BookingResponse, Guest, Role, STATUS_SCHEDULED, StatusCode,
};
use tracing::{debug, info};
use uuid::Uuid;

const PATH: &str = "/bookings";

/// Status of a booking after `PATCH /bookings/{id}/cancel`
pub const STATUS_CANCELLED: &str = "CANCELLED";

/// Nights in the booking that overlap scenarios collide with
const OVERLAP_BASE_NIGHTS: u64 = 4;

/// Create a fresh property and return its id
fn fresh_property(ctx: &ScenarioContext<'_>, auth: &Auth) -> Result<String, ScenarioError> {
    let property = create_property(&ctx.properties(), auth)?;
    property
        .id
        .ok_or_else(|| anyhow!("created property has no id").into())
}

/// Create `booking`, requiring 201, and return what the server stored
fn book(
    ctx: &ScenarioContext<'_>,
    auth: &Auth,
    booking: &BookingRequest,
) -> Result<BookingResponse, ScenarioError> {
    let response = ctx.bookings().create(booking, auth)?;
    let mut soft = SoftAssert::new();
    let stored = expect_entity::<BookingResponse>(&mut soft, &response, StatusCode::CREATED);
    soft.finish()?;
    stored.ok_or_else(|| anyhow!("booking creation returned no entity").into())
}

fn list_bookings_have_unique_ids(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let response = ctx.bookings().retrieve_all(&ctx.admin()?)?;

    let mut soft = SoftAssert::new();
    if let Some(bookings) = expect_entity::<Vec<BookingResponse>>(&mut soft, &response, StatusCode::OK) {
        debug!(count = bookings.len(), "listed bookings");
        assert_unique_values(&mut soft, &bookings, |b| b.id.clone(), "Duplicate IDs found");
    }
    Ok(soft.finish()?)
}
scenario!(Booking, list_bookings_have_unique_ids, ["positive", "regression"]);

fn list_bookings_with_invalid_credentials(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let response = ctx.bookings().retrieve_all(&Auth::invalid())?;

    let mut soft = SoftAssert::new();
    expect_auth_error(
        &mut soft,
        &response,
        StatusCode::UNAUTHORIZED,
        &ExpectedAuthError::bad_credentials(PATH),
    );
    Ok(soft.finish()?)
}
scenario!(Booking, list_bookings_with_invalid_credentials, ["negative", "security", "regression"]);

fn list_bookings_without_credentials(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let response = ctx.bookings().retrieve_all(&Auth::anonymous())?;

    let mut soft = SoftAssert::new();
    expect_auth_error(
        &mut soft,
        &response,
        StatusCode::UNAUTHORIZED,
        &ExpectedAuthError::missing_credentials(PATH),
    );
    Ok(soft.finish()?)
}
scenario!(Booking, list_bookings_without_credentials, ["negative", "security", "regression"]);

fn list_bookings_forbidden_for_user_role(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let response = ctx.bookings().retrieve_all(&ctx.auth(Role::User)?)?;

    let mut soft = SoftAssert::new();
    soft.expect_status(&response, StatusCode::FORBIDDEN);
    Ok(soft.finish()?)
}
scenario!(Booking, list_bookings_forbidden_for_user_role, ["negative", "security", "regression"]);

fn create_booking_on_available_dates(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let auth = ctx.admin()?;
    let property_id = fresh_property(ctx, &auth)?;
    let booking = create_booking_with_available_dates(&ctx.bookings(), &auth, &property_id)?;
    info!(
        start = ?booking.start_date,
        end = ?booking.end_date,
        "booking available dates"
    );

    let response = ctx.bookings().create(&booking, &auth)?;
    let mut soft = SoftAssert::new();
    if let Some(stored) = expect_entity::<BookingResponse>(&mut soft, &response, StatusCode::CREATED) {
        validate_booking_response(&mut soft, &stored, &FieldSet::all(), &booking);
    }
    Ok(soft.finish()?)
}
scenario!(Booking, create_booking_on_available_dates, ["positive", "regression"]);

fn retrieve_created_booking_round_trips_dates(
    ctx: &ScenarioContext<'_>,
) -> Result<(), ScenarioError> {
    let auth = ctx.admin()?;
    let property_id = fresh_property(ctx, &auth)?;
    let booking = create_available_booking(&ctx.bookings(), &auth, &property_id, 3)?;
    let stored = book(ctx, &auth, &booking)?;
    let id = stored
        .id
        .ok_or_else(|| anyhow!("created booking has no id"))?;

    let response = ctx.bookings().retrieve(&id, &auth)?;
    let mut soft = SoftAssert::new();
    if let Some(fetched) = expect_entity::<BookingResponse>(&mut soft, &response, StatusCode::OK) {
        soft.assert_eq(&fetched.id.as_deref(), &Some(id.as_str()), "Booking ID mismatch");
        validate_booking_response(
            &mut soft,
            &fetched,
            &FieldSet::all().without(BookingField::Id),
            &booking,
        );
    }
    Ok(soft.finish()?)
}
scenario!(Booking, retrieve_created_booking_round_trips_dates, ["positive", "regression"]);

fn retrieve_unknown_booking(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let id = Uuid::new_v4().to_string();
    let response = ctx.bookings().retrieve(&id, &ctx.admin()?)?;

    let mut soft = SoftAssert::new();
    soft.expect_status(&response, StatusCode::NO_CONTENT);
    soft.check(
        response.is_empty(),
        format!("Expected an empty body, got {:?}", response.body()),
    );
    Ok(soft.finish()?)
}
scenario!(Booking, retrieve_unknown_booking, ["negative"]);

fn overlapping_bookings_are_rejected(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let auth = ctx.admin()?;
    let property_id = fresh_property(ctx, &auth)?;
    let existing =
        create_available_booking(&ctx.bookings(), &auth, &property_id, OVERLAP_BASE_NIGHTS)?;
    book(ctx, &auth, &existing)?;

    let (start, end) = match (&existing.start_date, &existing.end_date) {
        (Some(start), Some(end)) => (
            parse_date(start).map_err(FixtureError::from)?,
            parse_date(end).map_err(FixtureError::from)?,
        ),
        _ => return Err(anyhow!("fixture booking has no dates").into()),
    };

    let mut soft = SoftAssert::new();
    for kind in OverlapKind::ALL {
        let Some((overlap_start, overlap_end)) = kind.range(start, end) else {
            soft.fail(format!("no {} range for {} to {}", kind.name(), start, end));
            continue;
        };
        debug!(kind = kind.name(), %overlap_start, %overlap_end, "booking overlapping range");

        let overlapping = custom_booking(
            &property_id,
            &format_date(overlap_start),
            &format_date(overlap_end),
        );
        let response = ctx.bookings().create(&overlapping, &auth)?;
        expect_booking_rejection(&mut soft, &response, &ExpectedBookingRejection::dates_unavailable());
    }
    Ok(soft.finish()?)
}
scenario!(Booking, overlapping_bookings_are_rejected, ["negative", "regression"]);

fn zero_night_booking_is_invalid(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let auth = ctx.admin()?;
    let property_id = fresh_property(ctx, &auth)?;
    let available = create_booking_with_available_dates(&ctx.bookings(), &auth, &property_id)?;
    let booking = BookingRequest {
        end_date: available.start_date.clone(),
        ..available
    };

    let response = ctx.bookings().create(&booking, &auth)?;
    let mut soft = SoftAssert::new();
    expect_booking_rejection(&mut soft, &response, &ExpectedBookingRejection::invalid_booking());
    Ok(soft.finish()?)
}
scenario!(Booking, zero_night_booking_is_invalid, ["negative"]);

fn update_booking_guest(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let auth = ctx.admin()?;
    let property_id = fresh_property(ctx, &auth)?;
    let booking = create_booking_with_available_dates(&ctx.bookings(), &auth, &property_id)?;
    let stored = book(ctx, &auth, &booking)?;
    let id = stored
        .id
        .ok_or_else(|| anyhow!("created booking has no id"))?;

    let guest = Guest::new("Ana", "Costa", "1990-11-02");
    let response = ctx.bookings().update_guest(&id, &guest, &auth)?;

    let expected = BookingRequest {
        guest: Some(guest),
        ..booking
    };
    let mut soft = SoftAssert::new();
    if let Some(updated) = expect_entity::<BookingResponse>(&mut soft, &response, StatusCode::OK) {
        validate_booking_response(
            &mut soft,
            &updated,
            &FieldSet::none()
                .with(BookingField::Guest)
                .with(BookingField::PropertyId)
                .with(BookingField::StartDate)
                .with(BookingField::EndDate),
            &expected,
        );
    }
    Ok(soft.finish()?)
}
scenario!(Booking, update_booking_guest, ["positive"]);

fn cancel_and_rebook(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let auth = ctx.admin()?;
    let property_id = fresh_property(ctx, &auth)?;
    let booking = create_booking_with_available_dates(&ctx.bookings(), &auth, &property_id)?;
    let stored = book(ctx, &auth, &booking)?;
    let id = stored
        .id
        .ok_or_else(|| anyhow!("created booking has no id"))?;

    let mut soft = SoftAssert::new();
    let cancelled = ctx.bookings().cancel(&id, &auth)?;
    if let Some(body) = expect_entity::<BookingResponse>(&mut soft, &cancelled, StatusCode::OK) {
        soft.assert_eq(
            &body.status.as_deref(),
            &Some(STATUS_CANCELLED),
            "Status after cancel mismatch",
        );
    }

    let rebooked = ctx.bookings().rebook(&id, &booking, &auth)?;
    if let Some(body) = expect_entity::<BookingResponse>(&mut soft, &rebooked, StatusCode::OK) {
        soft.assert_eq(
            &body.status.as_deref(),
            &Some(STATUS_SCHEDULED),
            "Status after rebook mismatch",
        );
    }
    Ok(soft.finish()?)
}
scenario!(Booking, cancel_and_rebook, ["positive", "regression"]);
