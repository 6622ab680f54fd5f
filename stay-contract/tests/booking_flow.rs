//! End-to-end fixture and assertion flow against a stubbed API
//!
//! Mirrors what the booking scenarios do, with the server replaced by mockito.

use mockito::Matcher;
use serde_json::json;
use stay_contract::{
    ExpectedBookingRejection, FieldSet, OverlapKind, SoftAssert,
    create_booking_with_available_dates, custom_booking, expect_booking_rejection, expect_entity,
    validate_booking_response,
};
use stay_http_client::dates::{format_date, parse_date};
use stay_http_client::{
    ApiClient, Auth, BookingResponse, BookingService, Credentials, StatusCode,
};

const PROPERTY_ID: &str = "201c3466-153a-403b-9434-e3ff413a84cc";

fn admin() -> Auth {
    Auth::basic(Credentials::new("admin", "secret"))
}

#[test]
fn booking_on_available_dates_round_trips() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/bookings")
        .with_status(200)
        .with_body(
            json!([
                {"id": "a", "startDate": [2025, 3, 1], "endDate": [2025, 3, 4], "propertyId": PROPERTY_ID}
            ])
            .to_string(),
        )
        .create();
    let created = server
        .mock("POST", "/bookings")
        .match_body(Matcher::PartialJson(json!({
            "startDate": "2025-03-04",
            "endDate": "2025-03-05",
            "propertyId": PROPERTY_ID,
        })))
        .with_status(201)
        .with_body_from_request(|request| {
            let sent: serde_json::Value =
                serde_json::from_slice(request.body().unwrap()).unwrap();
            json!({
                "id": sent["id"],
                "startDate": [2025, 3, 4],
                "endDate": [2025, 3, 5],
                "status": "SCHEDULED",
                "guest": {"firstName": "Diogo", "lastName": "Pereira", "dateOfBirth": [1984, 5, 18]},
                "propertyId": PROPERTY_ID,
            })
            .to_string()
            .into_bytes()
        })
        .create();

    let client = ApiClient::builder().base_url(server.url()).unwrap().build().unwrap();
    let bookings = BookingService::new(&client);
    let auth = admin();

    let booking = create_booking_with_available_dates(&bookings, &auth, PROPERTY_ID).unwrap();
    let response = bookings.create(&booking, &auth).unwrap();

    let mut soft = SoftAssert::new();
    let stored: Option<BookingResponse> = expect_entity(&mut soft, &response, StatusCode::CREATED);
    validate_booking_response(&mut soft, &stored.unwrap(), &FieldSet::all(), &booking);

    created.assert();
    soft.finish().unwrap();
}

#[test]
fn overlapping_ranges_are_all_rejected() {
    let mut server = mockito::Server::new();
    let rejected = server
        .mock("POST", "/bookings")
        .with_status(422)
        .with_body(
            json!({
                "type": "about:blank",
                "title": "Unprocessable Entity",
                "status": 422,
                "BOOKING_DATES_UNAVAILABLE": "Booking dates are unavailable",
            })
            .to_string(),
        )
        .expect(OverlapKind::ALL.len())
        .create();

    let client = ApiClient::builder().base_url(server.url()).unwrap().build().unwrap();
    let bookings = BookingService::new(&client);
    let auth = admin();

    let start = parse_date("2025-07-01").unwrap();
    let end = parse_date("2025-07-05").unwrap();

    let mut soft = SoftAssert::new();
    for kind in OverlapKind::ALL {
        let (overlap_start, overlap_end) = kind.range(start, end).unwrap();
        let booking = custom_booking(
            PROPERTY_ID,
            &format_date(overlap_start),
            &format_date(overlap_end),
        );
        let response = bookings.create(&booking, &auth).unwrap();
        expect_booking_rejection(&mut soft, &response, &ExpectedBookingRejection::dates_unavailable());
    }

    rejected.assert();
    assert_eq!(soft.check_count(), 2 * OverlapKind::ALL.len());
    soft.finish().unwrap();
}
