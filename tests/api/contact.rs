use crate::helpers::{spawn_app, spawn_app_without, Missing, TEST_DOMAIN, TEST_RECIPIENT};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use wiremock::matchers::{any, header_exists, method, path};
use wiremock::{Mock, MockBuilder, ResponseTemplate};

fn when_sending_email() -> MockBuilder {
    Mock::given(path(format!("/v3/{}/messages", TEST_DOMAIN)))
        .and(method("POST"))
        .and(header_exists("Authorization"))
}

async fn outcome(response: reqwest::Response) -> serde_json::Value {
    response
        .json()
        .await
        .expect("Response body was not a submission outcome")
}

#[tokio::test]
async fn contact_returns_200_and_relays_a_valid_submission() {
    let app = spawn_app().await;
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();

    when_sending_email()
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "<20261016@mg>", "message": "Queued. Thank you."})),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_contact(&serde_json::json!({
            "name": name,
            "email": email,
            "budget": "$5k - $10k",
            "details": "I would like a landing page for my bakery."
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        outcome(response).await,
        serde_json::json!({"success": true, "error": null})
    );

    let message = app.sent_message().await;
    assert_eq!(message["to"], TEST_RECIPIENT);
    assert_eq!(message["h:Reply-To"], email);
    assert_eq!(message["subject"], format!("New Portfolio Contact: {}", name));
    assert!(message["text"].contains("Budget: $5k - $10k"));
    assert!(message["text"].contains("I would like a landing page for my bakery."));
}

#[tokio::test]
async fn contact_without_budget_reports_it_as_not_specified() {
    let app = spawn_app().await;

    when_sending_email()
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_contact(&serde_json::json!({
            "name": "Jo",
            "email": "jo@x.com",
            "details": "Need a website built"
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let message = app.sent_message().await;
    assert!(message["text"].contains("Budget: Not specified"));
    assert_eq!(message["h:Reply-To"], "jo@x.com");
}

#[tokio::test]
async fn contact_returns_400_when_data_is_invalid() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            serde_json::json!({"name": "J", "email": "jo@x.com", "details": "Need a website built"}),
            "a one character name",
        ),
        (
            serde_json::json!({"name": "Jo", "email": "jo-at-x.com", "details": "Need a website built"}),
            "an invalid email",
        ),
        (
            serde_json::json!({"name": "Jo", "email": "jo@x.com", "details": "Too short"}),
            "details under ten characters",
        ),
        (
            serde_json::json!({"name": "Jo", "email": "jo@x.com"}),
            "missing details",
        ),
        (
            serde_json::json!({"email": "jo@x.com", "details": "Need a website built"}),
            "missing name",
        ),
    ];

    for (invalid_body, description) in test_cases {
        let response = app.post_contact(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload had {}.",
            description
        );
        assert_eq!(
            outcome(response).await,
            serde_json::json!({"success": false, "error": "Invalid data provided."}),
            "The API leaked validation details when the payload had {}.",
            description
        );
    }
}

#[tokio::test]
async fn contact_returns_400_for_a_malformed_body() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_raw_contact("{\"name\": \"Jo\",").await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(
        outcome(response).await,
        serde_json::json!({"success": false, "error": "Invalid data provided."})
    );
}

#[tokio::test]
async fn contact_returns_500_naming_the_missing_configuration() {
    let test_cases = vec![
        (
            Missing {
                api_key: true,
                ..Missing::default()
            },
            "Server configuration error [API Key].",
        ),
        (
            Missing {
                domain: true,
                ..Missing::default()
            },
            "Server configuration error [Domain].",
        ),
        (
            Missing {
                recipient: true,
                ..Missing::default()
            },
            "Server configuration error [Recipient].",
        ),
    ];

    for (missing, expected_error) in test_cases {
        let app = spawn_app_without(missing).await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&app.email_server)
            .await;

        let response = app
            .post_contact(&serde_json::json!({
                "name": "Jo",
                "email": "jo@x.com",
                "details": "Need a website built"
            }))
            .await;

        assert_eq!(500, response.status().as_u16());
        assert_eq!(
            outcome(response).await,
            serde_json::json!({"success": false, "error": expected_error})
        );
    }
}

#[tokio::test]
async fn contact_surfaces_the_provider_error_message() {
    let app = spawn_app().await;

    when_sending_email()
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "Invalid private key"})),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_contact(&serde_json::json!({
            "name": "Jo",
            "email": "jo@x.com",
            "details": "Need a website built"
        }))
        .await;

    assert_eq!(502, response.status().as_u16());
    assert_eq!(
        outcome(response).await,
        serde_json::json!({"success": false, "error": "Invalid private key"})
    );
}

#[tokio::test]
async fn a_failed_delivery_is_not_retried() {
    let app = spawn_app().await;

    when_sending_email()
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_contact(&serde_json::json!({
            "name": "Jo",
            "email": "jo@x.com",
            "details": "Need a website built"
        }))
        .await;

    assert_eq!(502, response.status().as_u16());
    let body = outcome(response).await;
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap_or_default().is_empty());
}
