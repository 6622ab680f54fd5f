//! Property fixtures

use crate::error::FixtureError;
use crate::fields::{FieldSet, PropertyField};
use chrono::Utc;
use stay_http_client::dates::current_utc_timestamp;
use stay_http_client::{Auth, PropertyRequest, PropertyResponse, PropertyService, StatusCode};
use tracing::debug;
use uuid::Uuid;

/// Country code used for generated properties
pub const DEFAULT_COUNTRY_CODE: &str = "BR";

/// Prefix of generated aliases
pub const ALIAS_PREFIX: &str = "Property for Hostfully";

/// A fresh alias, unique per call
pub fn unique_alias() -> String {
    format!(
        "{} {} {}",
        ALIAS_PREFIX,
        Utc::now().format("%Y%m%d%H%M%S%3f"),
        Uuid::new_v4().simple()
    )
}

/// Build a property populating only the named fields
///
/// Fields outside the set stay `None` and are omitted from the request body,
/// which is how missing-field validation is exercised.
pub fn construct_property(fields: &FieldSet<PropertyField>) -> PropertyRequest {
    let mut property = PropertyRequest::default();

    for field in fields.iter() {
        match field {
            PropertyField::Id => property.id = Some(Uuid::new_v4().to_string()),
            PropertyField::Alias => property.alias = Some(unique_alias()),
            PropertyField::CountryCode => {
                property.country_code = Some(DEFAULT_COUNTRY_CODE.to_string())
            }
            PropertyField::CreatedAt => property.created_at = Some(current_utc_timestamp()),
        }
    }

    property
}

/// Create a complete property on the server and return what it stored
///
/// Used when a scenario needs a property to attach bookings to.
pub fn create_property(
    service: &PropertyService<'_>,
    auth: &Auth,
) -> Result<PropertyResponse, FixtureError> {
    let request = construct_property(&FieldSet::all().without(PropertyField::Id));
    let response = service.create(&request, auth)?;

    if response.status() != StatusCode::CREATED {
        return Err(FixtureError::UnexpectedStatus {
            operation: "POST /properties",
            status: response.status().as_u16(),
            body: response.body().to_string(),
        });
    }

    let created: PropertyResponse = response.json()?;
    if created.id.is_none() {
        return Err(FixtureError::MissingField {
            entity: "property",
            field: "id",
        });
    }
    debug!(id = ?created.id, alias = ?created.alias, "created fixture property");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Field;
    use stay_http_client::ApiClient;

    #[test]
    fn test_only_named_fields_are_set() {
        let fields = FieldSet::from_names(&["alias", "countryCode"]);
        let property = construct_property(&fields);

        assert!(property.id.is_none());
        assert!(property.created_at.is_none());
        assert_eq!(property.country_code.as_deref(), Some(DEFAULT_COUNTRY_CODE));
        assert!(property.alias.unwrap().starts_with(ALIAS_PREFIX));
    }

    #[test]
    fn test_all_fields_are_valid() {
        let property = construct_property(&FieldSet::all());

        assert!(Uuid::parse_str(property.id.as_deref().unwrap()).is_ok());
        assert!(chrono::DateTime::parse_from_rfc3339(property.created_at.as_deref().unwrap()).is_ok());
        assert_eq!(PropertyField::ALL.len(), 4);
    }

    #[test]
    fn test_empty_set_builds_empty_body() {
        let property = construct_property(&FieldSet::none());
        assert_eq!(property, PropertyRequest::default());
    }

    #[test]
    fn test_aliases_are_unique() {
        let first = construct_property(&FieldSet::all());
        let second = construct_property(&FieldSet::all());

        assert_ne!(first.alias, second.alias);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_create_property_requires_201() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/properties")
            .with_status(409)
            .with_body(r#"{"title":"Conflict"}"#)
            .create();
        let client = ApiClient::builder().base_url(server.url()).unwrap().build().unwrap();

        let result = create_property(&PropertyService::new(&client), &Auth::anonymous());
        assert!(matches!(
            result,
            Err(FixtureError::UnexpectedStatus { status: 409, .. })
        ));
    }

    #[test]
    fn test_create_property_returns_server_entity() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/properties")
            .with_status(201)
            .with_body(r#"{"id":"0b8a6f3e-1c2d-4e5f-8a9b-0c1d2e3f4a5b","alias":"x","countryCode":"BR"}"#)
            .create();
        let client = ApiClient::builder().base_url(server.url()).unwrap().build().unwrap();

        let created = create_property(&PropertyService::new(&client), &Auth::anonymous()).unwrap();
        assert_eq!(created.id.as_deref(), Some("0b8a6f3e-1c2d-4e5f-8a9b-0c1d2e3f4a5b"));
    }
}
