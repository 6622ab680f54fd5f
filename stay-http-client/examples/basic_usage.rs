//! Basic usage example for the booking API client
//!
//! This example demonstrates how to:
//! - Create a client against a custom base URL with a timeout
//! - List properties with admin credentials
//! - Observe how the same call fails with invalid and missing credentials
//!
//! Note: This example talks to a live API. Set `API_BASE_URI`, `ADMIN_USERNAME`
//! and `ADMIN_PASSWORD` before running it.

use stay_http_client::{
    ApiClient, ApiOutcome, Auth, Credentials, DEFAULT_BASE_URL, PropertyResponse, PropertyService,
};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url = std::env::var("API_BASE_URI").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let username = std::env::var("ADMIN_USERNAME")?;
    let password = std::env::var("ADMIN_PASSWORD")?;

    let client = ApiClient::builder()
        .base_url(base_url.as_str())?
        .timeout(Duration::from_secs(30))
        .build()?;
    println!("Client created for {}", client.base_url());

    let properties = PropertyService::new(&client);
    let admin = Auth::basic(Credentials::new(username, password));

    for (label, auth) in [
        ("admin", admin),
        ("invalid", Auth::invalid()),
        ("anonymous", Auth::anonymous()),
    ] {
        let response = properties.retrieve_all(&auth)?;
        match response.outcome::<Vec<PropertyResponse>>()? {
            ApiOutcome::Success { body, .. } => {
                println!("{}: {} properties", label, body.len());
            }
            ApiOutcome::NoContent { status } => println!("{}: {} with no body", label, status),
            ApiOutcome::Failure { status, payload } => {
                println!("{}: {} ({} error)", label, status, payload.kind());
            }
        }
    }

    Ok(())
}
