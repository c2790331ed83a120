use flowdose::adapters::admin_api::AdminApiClient;
use flowdose::adapters::resend::{OutboundEmail, ResendClient};
use flowdose::adapters::store_api::StoreApiClient;
use flowdose::core::notifier::ResendNotifier;
use flowdose::core::prefetch::summarize;
use flowdose::domain::model::{Channel, EmailTemplate, NotificationRequest};
use flowdose::domain::ports::{NotificationModule, StorefrontData, UserModule};
use flowdose::GlueError;
use httpmock::prelude::*;

#[tokio::test]
async fn test_resend_client_posts_email_with_bearer_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/emails")
                .header("authorization", "Bearer re_test")
                .json_body(serde_json::json!({
                    "from": "noreply@flowdose.xyz",
                    "to": ["a@example.com"],
                    "subject": "Hello",
                    "html": "<p>hi</p>"
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({ "id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794" }));
        })
        .await;

    let client = ResendClient::with_base_url(server.base_url(), "re_test");
    let receipt = client
        .send(&OutboundEmail {
            from: "noreply@flowdose.xyz".to_string(),
            to: vec!["a@example.com".to_string()],
            subject: "Hello".to_string(),
            html: "<p>hi</p>".to_string(),
            reply_to: None,
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(receipt.id, "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");
}

#[tokio::test]
async fn test_resend_rejection_becomes_provider_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/emails");
            then.status(403)
                .json_body(serde_json::json!({ "name": "validation_error", "message": "domain is not verified" }));
        })
        .await;

    let notifier = ResendNotifier::new(
        ResendClient::with_base_url(server.base_url(), "re_test"),
        "noreply@flowdose.xyz",
    );
    let result = notifier
        .create_notification(NotificationRequest {
            to: "a@example.com".to_string(),
            channel: Channel::Email,
            template: EmailTemplate::VerifyTest,
            data: serde_json::Value::Null,
        })
        .await;

    match result {
        Err(GlueError::ProviderError { status, message }) => {
            assert_eq!(status, 403);
            assert!(message.contains("domain is not verified"));
        }
        other => panic!("expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_notifier_sends_rendered_invite_with_reply_to() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/emails")
                .body_contains("\"reply_to\":\"support@flowdose.xyz\"")
                .body_contains("\"subject\":\"You've been invited to Medusa!\"")
                .body_contains("/app/invite?token=tok_abc");
            then.status(200).json_body(serde_json::json!({ "id": "email_1" }));
        })
        .await;

    let notifier = ResendNotifier::new(
        ResendClient::with_base_url(server.base_url(), "re_test"),
        "Flowdose <noreply@flowdose.xyz>",
    );
    let receipt = notifier
        .create_notification(NotificationRequest {
            to: "newadmin@example.com".to_string(),
            channel: Channel::Email,
            template: EmailTemplate::InviteUser,
            data: serde_json::json!({
                "emailOptions": {
                    "replyTo": "support@flowdose.xyz",
                    "subject": "You've been invited to Medusa!"
                },
                "inviteLink": "https://api.flowdose.xyz/app/invite?token=tok_abc",
                "preview": "The administration dashboard awaits..."
            }),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(receipt.id, "email_1");
}

#[tokio::test]
async fn test_admin_api_retrieves_and_creates_invites() {
    let server = MockServer::start_async().await;
    let invite = serde_json::json!({
        "invite": {
            "id": "invite_01",
            "email": "newadmin@example.com",
            "token": "tok_abc",
            "accepted": false,
            "expires_at": "2026-10-18T12:00:00Z"
        }
    });

    let retrieve = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/admin/invites/invite_01")
                .header("authorization", "Bearer admin_token");
            then.status(200).json_body(invite.clone());
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/admin/invites")
                .json_body(serde_json::json!({ "email": "newadmin@example.com" }));
            then.status(200).json_body(invite.clone());
        })
        .await;

    let client = AdminApiClient::new(server.base_url(), Some("admin_token".to_string()));

    let fetched = client.retrieve_invite("invite_01").await.unwrap();
    assert_eq!(fetched.token, "tok_abc");
    assert!(fetched.expires_at.is_some());

    let created = client.create_invite("newadmin@example.com").await.unwrap();
    assert_eq!(created.id, "invite_01");

    retrieve.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_store_api_sends_publishable_key() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/store/collections")
                .header("x-publishable-api-key", "pk_test");
            then.status(200).json_body(serde_json::json!({
                "collections": [{ "id": "pcol_1", "title": "Sleep" }],
                "count": 1,
                "offset": 0,
                "limit": 50
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/store/products");
            then.status(200)
                .json_body(serde_json::json!({ "products": [], "count": 0 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/store/regions");
            then.status(200).json_body(serde_json::json!({
                "regions": [{ "id": "reg_1", "name": "Europe", "currency_code": "eur" }]
            }));
        })
        .await;

    let client = StoreApiClient::new(server.base_url(), Some("pk_test".to_string()));

    let categories = client.prefetch_categories().await.unwrap();
    assert_eq!(categories.count, 1);

    let summary = summarize(&client).await.unwrap();
    assert_eq!(summary.categories, 1);
    assert_eq!(summary.products, 0);
    assert_eq!(summary.regions, 1);
}

#[tokio::test]
async fn test_store_api_client_times_out_on_silent_backend() {
    // accepted into the backlog, never answered
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let client = StoreApiClient::new(base_url, None)
        .with_timeout(std::time::Duration::from_millis(300));

    let result = tokio::time::timeout(std::time::Duration::from_secs(5), summarize(&client))
        .await
        .expect("request timeout should fire before the outer limit");

    assert!(matches!(result, Err(GlueError::HttpError(_))));
}
