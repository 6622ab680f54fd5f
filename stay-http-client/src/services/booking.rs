//! `/bookings` resource

use crate::auth::Auth;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{BookingRequest, Guest};
use crate::response::RawResponse;

const BOOKINGS: &str = "bookings";

/// Operations on `/bookings`
#[derive(Debug, Clone, Copy)]
pub struct BookingService<'a> {
    client: &'a ApiClient,
}

impl<'a> BookingService<'a> {
    /// Wrap a client
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /bookings/{id}`
    pub fn retrieve(&self, id: &str, auth: &Auth) -> Result<RawResponse, ApiError> {
        self.client.get(&[BOOKINGS, id], auth)
    }

    /// `GET /bookings`
    pub fn retrieve_all(&self, auth: &Auth) -> Result<RawResponse, ApiError> {
        self.client.get(&[BOOKINGS], auth)
    }

    /// `POST /bookings`
    pub fn create(&self, booking: &BookingRequest, auth: &Auth) -> Result<RawResponse, ApiError> {
        self.client.post_json(&[BOOKINGS], booking, auth)
    }

    /// `PATCH /bookings/{id}/rebook`
    pub fn rebook(
        &self,
        id: &str,
        booking: &BookingRequest,
        auth: &Auth,
    ) -> Result<RawResponse, ApiError> {
        self.client
            .patch_json(&[BOOKINGS, id, "rebook"], Some(booking), auth)
    }

    /// `PATCH /bookings/{id}/guest`
    pub fn update_guest(&self, id: &str, guest: &Guest, auth: &Auth) -> Result<RawResponse, ApiError> {
        self.client
            .patch_json(&[BOOKINGS, id, "guest"], Some(guest), auth)
    }

    /// `PATCH /bookings/{id}/cancel`
    pub fn cancel(&self, id: &str, auth: &Auth) -> Result<RawResponse, ApiError> {
        self.client
            .patch_json::<()>(&[BOOKINGS, id, "cancel"], None, auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::builder().base_url(server.url()).unwrap().build().unwrap()
    }

    #[test]
    fn test_sub_resource_paths() {
        let mut server = mockito::Server::new();
        let rebook = server
            .mock("PATCH", "/bookings/b-7/rebook")
            .match_body(Matcher::PartialJson(serde_json::json!({ "startDate": "2025-07-01" })))
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create();
        let guest = server
            .mock("PATCH", "/bookings/b-7/guest")
            .match_body(Matcher::Json(serde_json::json!({
                "firstName": "Ana", "lastName": "Lima", "dateOfBirth": "1990-01-02"
            })))
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create();
        let cancel = server
            .mock("PATCH", "/bookings/b-7/cancel")
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create();

        let client = client_for(&server);
        let service = BookingService::new(&client);
        let auth = Auth::anonymous();

        let booking = BookingRequest {
            start_date: Some("2025-07-01".to_string()),
            end_date: Some("2025-07-02".to_string()),
            ..Default::default()
        };
        service.rebook("b-7", &booking, &auth).unwrap();
        service
            .update_guest("b-7", &Guest::new("Ana", "Lima", "1990-01-02"), &auth)
            .unwrap();
        service.cancel("b-7", &auth).unwrap();

        rebook.assert();
        guest.assert();
        cancel.assert();
    }

    #[test]
    fn test_retrieve_all_and_by_id() {
        let mut server = mockito::Server::new();
        let all = server
            .mock("GET", "/bookings")
            .with_status(200)
            .with_body("[]")
            .expect(1)
            .create();
        let one = server
            .mock("GET", "/bookings/b-1")
            .with_status(204)
            .expect(1)
            .create();

        let client = client_for(&server);
        let service = BookingService::new(&client);

        assert_eq!(service.retrieve_all(&Auth::anonymous()).unwrap().body(), "[]");
        assert!(service.retrieve("b-1", &Auth::anonymous()).unwrap().is_empty());

        all.assert();
        one.assert();
    }
}
