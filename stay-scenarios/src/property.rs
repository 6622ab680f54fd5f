//! Property scenarios

use stay_contract::{
    ExpectedAuthError, Field, FieldSet, PropertyField, ScenarioContext, ScenarioError, SoftAssert,
    assert_unique_values, construct_property, create_property, expect_auth_error, expect_entity,
    expect_validation_error, validate_detail_mentions, validate_field_error,
    validate_property_response,
};
use stay_http_client::{Auth, PropertyRequest, PropertyResponse, StatusCode};
use tracing::debug;
use uuid::Uuid;

const PATH: &str = "/properties";

/// Post a property built from `fields` and check the echoed entity
fn create_and_validate(
    ctx: &ScenarioContext<'_>,
    fields: FieldSet<PropertyField>,
) -> Result<(), ScenarioError> {
    let property = construct_property(&fields);
    let response = ctx.properties().create(&property, &ctx.admin()?)?;

    let mut soft = SoftAssert::new();
    if let Some(created) = expect_entity::<PropertyResponse>(&mut soft, &response, StatusCode::CREATED) {
        // The server always assigns an id
        validate_property_response(&mut soft, &created, &fields.with(PropertyField::Id), &property);
    }
    Ok(soft.finish()?)
}

fn create_property_with_all_fields(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    create_and_validate(ctx, FieldSet::all().without(PropertyField::Id))
}
scenario!(Property, create_property_with_all_fields, ["positive", "regression"]);

fn create_property_with_client_id(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    create_and_validate(ctx, FieldSet::all())
}
scenario!(Property, create_property_with_client_id, ["positive"]);

fn create_property_with_alias_only(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    create_and_validate(ctx, FieldSet::none().with(PropertyField::Alias))
}
scenario!(Property, create_property_with_alias_only, ["positive"]);

fn create_property_without_alias(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let property = construct_property(&FieldSet::all().without(PropertyField::Alias));
    let response = ctx.properties().create(&property, &ctx.admin()?)?;

    let mut soft = SoftAssert::new();
    if let Some(problem) = expect_validation_error(&mut soft, &response, StatusCode::BAD_REQUEST) {
        validate_field_error(&mut soft, &problem, PropertyField::Alias.name());
    }
    Ok(soft.finish()?)
}
scenario!(Property, create_property_without_alias, ["negative", "regression"]);

fn create_property_with_blank_alias(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let property = PropertyRequest {
        alias: Some(String::new()),
        ..construct_property(&FieldSet::all().without(PropertyField::Id))
    };
    let response = ctx.properties().create(&property, &ctx.admin()?)?;

    let mut soft = SoftAssert::new();
    if let Some(problem) = expect_validation_error(&mut soft, &response, StatusCode::BAD_REQUEST) {
        validate_field_error(&mut soft, &problem, PropertyField::Alias.name());
    }
    Ok(soft.finish()?)
}
scenario!(Property, create_property_with_blank_alias, ["negative"]);

fn create_property_with_duplicate_alias(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let auth = ctx.admin()?;
    let existing = create_property(&ctx.properties(), &auth)?;
    let duplicate = PropertyRequest {
        alias: existing.alias.clone(),
        ..construct_property(&FieldSet::all().without(PropertyField::Id))
    };
    let response = ctx.properties().create(&duplicate, &auth)?;

    let mut soft = SoftAssert::new();
    expect_validation_error(&mut soft, &response, StatusCode::CONFLICT);
    Ok(soft.finish()?)
}
scenario!(Property, create_property_with_duplicate_alias, ["negative", "regression"]);

fn create_property_with_invalid_credentials(
    ctx: &ScenarioContext<'_>,
) -> Result<(), ScenarioError> {
    let property = construct_property(&FieldSet::all().without(PropertyField::Id));
    let response = ctx.properties().create(&property, &Auth::invalid())?;

    let mut soft = SoftAssert::new();
    expect_auth_error(
        &mut soft,
        &response,
        StatusCode::UNAUTHORIZED,
        &ExpectedAuthError::bad_credentials(PATH),
    );
    Ok(soft.finish()?)
}
scenario!(Property, create_property_with_invalid_credentials, ["negative", "security"]);

fn retrieve_created_property(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let auth = ctx.admin()?;
    let created = create_property(&ctx.properties(), &auth)?;
    let id = created.id.clone().unwrap_or_default();
    let expected = PropertyRequest {
        id: created.id.clone(),
        alias: created.alias.clone(),
        country_code: created.country_code.clone(),
        created_at: None,
    };

    let response = ctx.properties().retrieve(&id, &auth)?;
    let mut soft = SoftAssert::new();
    if let Some(fetched) = expect_entity::<PropertyResponse>(&mut soft, &response, StatusCode::OK) {
        soft.assert_eq(&fetched.id, &expected.id, "Property ID mismatch");
        validate_property_response(&mut soft, &fetched, &FieldSet::all(), &expected);
    }
    Ok(soft.finish()?)
}
scenario!(Property, retrieve_created_property, ["positive", "regression"]);

fn retrieve_unknown_property(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let id = Uuid::new_v4().to_string();
    let response = ctx.properties().retrieve(&id, &ctx.admin()?)?;

    let mut soft = SoftAssert::new();
    soft.expect_status(&response, StatusCode::NO_CONTENT);
    soft.check(
        response.is_empty(),
        format!("Expected an empty body, got {:?}", response.body()),
    );
    Ok(soft.finish()?)
}
scenario!(Property, retrieve_unknown_property, ["negative"]);

fn retrieve_property_with_malformed_id(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let id = "not-a-valid-uuid";
    let response = ctx.properties().retrieve(id, &ctx.admin()?)?;

    let mut soft = SoftAssert::new();
    if let Some(problem) = expect_validation_error(&mut soft, &response, StatusCode::BAD_REQUEST) {
        validate_detail_mentions(&mut soft, &problem, id);
    }
    Ok(soft.finish()?)
}
scenario!(Property, retrieve_property_with_malformed_id, ["negative"]);

fn list_properties_have_unique_ids(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let response = ctx.properties().retrieve_all(&ctx.admin()?)?;

    let mut soft = SoftAssert::new();
    if let Some(properties) = expect_entity::<Vec<PropertyResponse>>(&mut soft, &response, StatusCode::OK) {
        debug!(count = properties.len(), "listed properties");
        assert_unique_values(&mut soft, &properties, |p| p.id.clone(), "Duplicate IDs found");
    }
    Ok(soft.finish()?)
}
scenario!(Property, list_properties_have_unique_ids, ["positive", "regression"]);

fn list_properties_without_credentials(ctx: &ScenarioContext<'_>) -> Result<(), ScenarioError> {
    let response = ctx.properties().retrieve_all(&Auth::anonymous())?;

    let mut soft = SoftAssert::new();
    expect_auth_error(
        &mut soft,
        &response,
        StatusCode::UNAUTHORIZED,
        &ExpectedAuthError::missing_credentials(PATH),
    );
    Ok(soft.finish()?)
}
scenario!(Property, list_properties_without_credentials, ["negative", "security", "regression"]);

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use stay_contract::FixtureError;
    use stay_http_client::{ApiClient, Credentials, Role, RoleCredentials};
    use std::sync::{Arc, Mutex};

    fn credentials() -> RoleCredentials {
        RoleCredentials::new().with(Role::Admin, Credentials::new("admin", "secret"))
    }

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::builder().base_url(server.url()).unwrap().build().unwrap()
    }

    fn echo_property(request: &mockito::Request) -> Vec<u8> {
        let mut body: serde_json::Value = serde_json::from_slice(request.body().unwrap()).unwrap();
        body["id"] = json!("4814adee-cd2e-4c70-921d-19b4f0cd527d");
        body["createdAt"] = json!([2025, 3, 1, 23, 37, 6, 536538509]);
        body.to_string().into_bytes()
    }

    #[test]
    fn test_create_scenarios_pass_against_echoing_server() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/properties")
            .with_status(201)
            .with_body_from_request(echo_property)
            .expect(3)
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        create_property_with_all_fields(&ctx).unwrap();
        create_property_with_client_id(&ctx).unwrap();
        create_property_with_alias_only(&ctx).unwrap();
    }

    #[test]
    fn test_create_scenario_reports_wrong_status() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/properties")
            .with_status(400)
            .with_body(r#"{"title":"Bad Request","errors":[]}"#)
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        let result = create_property_with_all_fields(&ctx);
        assert!(matches!(result, Err(ScenarioError::Assertions(_))));
    }

    #[test]
    fn test_missing_alias_is_checked_by_field() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/properties")
            .match_request(|request| {
                let body: serde_json::Value =
                    serde_json::from_slice(request.body().unwrap()).unwrap();
                body.get("alias").is_none()
            })
            .with_status(400)
            .with_body(
                json!({
                    "title": "Bad Request",
                    "status": 400,
                    "errors": [{"field": PropertyField::Alias.name(), "code": "NotNull"}]
                })
                .to_string(),
            )
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        create_property_without_alias(&ctx).unwrap();
    }

    #[test]
    fn test_duplicate_alias_expects_conflict() {
        let mut server = mockito::Server::new();
        let first = server
            .mock("POST", "/properties")
            .with_status(201)
            .with_body_from_request(echo_property)
            .expect(1)
            .create();
        let second = server
            .mock("POST", "/properties")
            .with_status(409)
            .with_body(
                json!({
                    "title": "Conflict",
                    "status": 409,
                    "detail": "Property alias already exists",
                    "instance": "/properties",
                    "errors": null
                })
                .to_string(),
            )
            .expect(1)
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        create_property_with_duplicate_alias(&ctx).unwrap();
        first.assert();
        second.assert();
    }

    #[test]
    fn test_duplicate_alias_accepted_fails() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/properties")
            .with_status(201)
            .with_body_from_request(echo_property)
            .expect(2)
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        let error = create_property_with_duplicate_alias(&ctx).unwrap_err();
        assert!(matches!(error, ScenarioError::Assertions(_)));
        assert!(error.to_string().contains("409"));
    }

    #[test]
    fn test_created_property_is_retrieved() {
        let mut server = mockito::Server::new();
        let stored = Arc::new(Mutex::new(Vec::new()));
        let remember = Arc::clone(&stored);
        server
            .mock("POST", "/properties")
            .with_status(201)
            .with_body_from_request(move |request| {
                let body = echo_property(request);
                *remember.lock().unwrap() = body.clone();
                body
            })
            .create();
        let fetch = Arc::clone(&stored);
        let get = server
            .mock("GET", "/properties/4814adee-cd2e-4c70-921d-19b4f0cd527d")
            .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
            .with_status(200)
            .with_body_from_request(move |_| fetch.lock().unwrap().clone())
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        retrieve_created_property(&ctx).unwrap();
        get.assert();
    }

    #[test]
    fn test_retrieved_property_with_other_alias_fails() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/properties")
            .with_status(201)
            .with_body_from_request(echo_property)
            .create();
        server
            .mock("GET", Matcher::Regex(r"^/properties/[0-9a-f-]{36}$".to_string()))
            .with_status(200)
            .with_body(
                json!({
                    "id": "4814adee-cd2e-4c70-921d-19b4f0cd527d",
                    "alias": "Somewhere else",
                    "countryCode": "PT",
                    "createdAt": [2025, 3, 1, 23, 37, 6, 536538509]
                })
                .to_string(),
            )
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        let error = retrieve_created_property(&ctx).unwrap_err();
        assert!(error.to_string().contains("Alias mismatch"));
    }

    #[test]
    fn test_malformed_id_detail_names_the_id() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/properties/not-a-valid-uuid")
            .with_status(400)
            .with_body(
                json!({
                    "type": "about:blank",
                    "title": "Bad Request",
                    "status": 400,
                    "detail": "Invalid UUID string: not-a-valid-uuid",
                    "instance": "/properties/not-a-valid-uuid"
                })
                .to_string(),
            )
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        retrieve_property_with_malformed_id(&ctx).unwrap();
    }

    #[test]
    fn test_malformed_id_detail_without_the_id_fails() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/properties/not-a-valid-uuid")
            .with_status(400)
            .with_body(r#"{"title":"Bad Request","status":400,"detail":"Failed to convert value"}"#)
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        let error = retrieve_property_with_malformed_id(&ctx).unwrap_err();
        assert!(error.to_string().contains("not-a-valid-uuid"));
    }

    #[test]
    fn test_unknown_property_expects_no_content() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", Matcher::Regex(r"^/properties/[0-9a-f-]{36}$".to_string()))
            .with_status(204)
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        retrieve_unknown_property(&ctx).unwrap();
    }

    #[test]
    fn test_anonymous_listing_checks_auth_body() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/properties")
            .match_header("authorization", Matcher::Missing)
            .with_status(401)
            .with_body(
                json!({
                    "exception": "Full authentication is required to access this resource",
                    "path": "/properties",
                    "error": "Unauthorized",
                    "message": "Error while authenticating your access",
                    "timestamp": "2025-03-01T23:37:06.536Z"
                })
                .to_string(),
            )
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        list_properties_without_credentials(&ctx).unwrap();
    }

    #[test]
    fn test_duplicate_listing_fails() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/properties")
            .with_status(200)
            .with_body(r#"[{"id":"a"},{"id":"b"},{"id":"a"}]"#)
            .create();
        let client = client_for(&server);
        let credentials = credentials();
        let ctx = ScenarioContext::new(&client, &credentials);

        let error = list_properties_have_unique_ids(&ctx).unwrap_err();
        assert!(error.to_string().contains("Duplicate IDs found"));
    }

    #[test]
    fn test_missing_admin_credentials_abort() {
        let client = ApiClient::new().unwrap();
        let credentials = RoleCredentials::new();
        let ctx = ScenarioContext::new(&client, &credentials);

        assert!(matches!(
            retrieve_unknown_property(&ctx),
            Err(ScenarioError::Fixture(FixtureError::MissingCredentials(Role::Admin)))
        ));
    }
}
