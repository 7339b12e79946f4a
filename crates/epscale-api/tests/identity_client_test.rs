#![allow(clippy::unwrap_used)]
// Integration tests for `IdentityClient` using wiremock.

use secrecy::ExposeSecret;
use serde_json::json;
use wiremock::matchers::{header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use epscale_api::{Error, IdentityClient, TransportConfig};

async fn setup() -> (MockServer, IdentityClient) {
    let server = MockServer::start().await;
    let client =
        IdentityClient::with_endpoint(&server.uri(), "test-client-id", &TransportConfig::default())
            .unwrap();
    (server, client)
}

fn secret(s: &str) -> secrecy::SecretString {
    s.to_owned().into()
}

#[tokio::test]
async fn test_sign_in_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(header(
            "x-amz-target",
            "AWSCognitoIdentityProviderService.InitiateAuth",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "AuthenticationResult": {
                "IdToken": "id-jwt",
                "AccessToken": "access-jwt",
                "RefreshToken": "refresh-jwt",
                "ExpiresIn": 3600,
                "TokenType": "Bearer"
            }
        })))
        .mount(&server)
        .await;

    let tokens = client
        .sign_in("user@example.com", &secret("hunter2"))
        .await
        .unwrap();

    assert_eq!(tokens.id_token.expose_secret(), "id-jwt");
    assert_eq!(tokens.expires_in_secs, 3600);
    assert!(tokens.refresh_token.is_some());
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "NotAuthorizedException",
            "message": "Incorrect username or password."
        })))
        .mount(&server)
        .await;

    let result = client.sign_in("user@example.com", &secret("wrong")).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("Incorrect"), "got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_in_unconfirmed_account() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "__type": "UserNotConfirmedException",
            "message": "User is not confirmed."
        })))
        .mount(&server)
        .await;

    let result = client.sign_in("user@example.com", &secret("hunter2")).await;

    assert!(
        matches!(result, Err(Error::NotConfirmed)),
        "expected NotConfirmed, got: {result:?}"
    );
}

#[tokio::test]
async fn test_sign_up_and_confirm() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(header(
            "x-amz-target",
            "AWSCognitoIdentityProviderService.SignUp",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "UserConfirmed": false,
            "UserSub": "1234"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header(
            "x-amz-target",
            "AWSCognitoIdentityProviderService.ConfirmSignUp",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let attrs = epscale_api::SignUpAttributes {
        email: "user@example.com".to_owned(),
        given_name: "Ada".to_owned(),
        family_name: "Lovelace".to_owned(),
        company: "Analytical Engines".to_owned(),
        title: "Engineer".to_owned(),
    };

    let confirmed = client.sign_up(&attrs, &secret("hunter2")).await.unwrap();
    assert!(!confirmed);

    client
        .confirm_sign_up("user@example.com", "123456")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_omits_refresh_token() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "AuthenticationResult": {
                "IdToken": "fresh-id",
                "AccessToken": "fresh-access",
                "ExpiresIn": 3600
            }
        })))
        .mount(&server)
        .await;

    let tokens = client.refresh(&secret("refresh-jwt")).await.unwrap();

    assert_eq!(tokens.id_token.expose_secret(), "fresh-id");
    assert!(tokens.refresh_token.is_none());
}
