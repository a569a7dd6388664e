use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use api_core::{ApiResult, CancellationToken, Cancelled, ResponseEnvelope, NULL_BODY_MESSAGE};
use async_trait::async_trait;
use example_api::{UserApi, UserRequest, UserResponse, UserService, DEFAULT_PAGE};
use httpmock::prelude::{Method, MockServer};
use network::{ClientRegistry, NetworkConfig, TransportError};
use serde_json::json;

fn user_42() -> UserResponse {
    UserResponse {
        id: "42".into(),
        name: "A".into(),
        email: "a@x.com".into(),
        created_at: "2024-01-01".into(),
    }
}

fn service_for(server: &MockServer) -> (UserService, Arc<ClientRegistry>) {
    let registry = Arc::new(ClientRegistry::new());
    let service = UserService::new(server.base_url(), Arc::clone(&registry));
    (service, registry)
}

// ---------------------------------------------------------------------------
// Scenarios over HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_user_success_returns_the_record() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/users/42");
            then.status(200).json_body(json!({
                "id": "42",
                "name": "A",
                "email": "a@x.com",
                "createdAt": "2024-01-01"
            }));
        })
        .await;

    let (service, _) = service_for(&server);
    let result = service.get_user("42").await;

    mock.assert_async().await;
    match result {
        ApiResult::Success(user) => assert_eq!(user, user_42()),
        other => panic!("expected Success, got {other:?}"),
    }
}

#[tokio::test]
async fn get_user_not_found_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/users/99");
            then.status(404);
        })
        .await;

    let (service, _) = service_for(&server);
    match service.get_user("99").await {
        ApiResult::Error { code, message } => {
            assert_eq!(code, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected Error, got {other:?}"),
    }
}

#[tokio::test]
async fn get_users_timeout_is_an_exception() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/users")
                .query_param("page", "1");
            then.status(200)
                .delay(Duration::from_secs(5))
                .json_body(json!([]));
        })
        .await;

    let config = NetworkConfig::default().with_request_timeout(Duration::from_millis(200));
    let registry = Arc::new(ClientRegistry::with_config(config));
    let service = UserService::new(server.base_url(), registry);

    match service.get_users(DEFAULT_PAGE).await {
        ApiResult::Exception(cause) => {
            let transport = cause
                .downcast_ref::<TransportError>()
                .expect("cause should be a transport error");
            assert!(transport.is_timeout(), "expected timeout, got {transport}");
        }
        other => panic!("expected Exception, got {other:?}"),
    }
}

#[tokio::test]
async fn get_users_passes_the_page() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::GET)
                .path("/users")
                .query_param("page", "3");
            then.status(200).json_body(json!([{
                "id": "42",
                "name": "A",
                "email": "a@x.com",
                "createdAt": "2024-01-01"
            }]));
        })
        .await;

    let (service, _) = service_for(&server);
    let users = service.get_users(3).await.value_or(Vec::new());

    mock.assert_async().await;
    assert_eq!(users, vec![user_42()]);
}

#[tokio::test]
async fn create_user_posts_the_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::POST)
                .path("/users")
                .json_body(json!({"name": "A", "email": "a@x.com"}));
            then.status(201).json_body(json!({
                "id": "42",
                "name": "A",
                "email": "a@x.com",
                "createdAt": "2024-01-01"
            }));
        })
        .await;

    let (service, _) = service_for(&server);
    let result = service
        .create_user(&UserRequest::new("A", "a@x.com"))
        .await;

    mock.assert_async().await;
    assert_eq!(result.into_value(), Some(user_42()));
}

#[tokio::test]
async fn success_without_body_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/users/7");
            then.status(200);
        })
        .await;

    let (service, _) = service_for(&server);
    match service.get_user("7").await {
        ApiResult::Error { code, message } => {
            assert_eq!(code, 200);
            assert_eq!(message, NULL_BODY_MESSAGE);
        }
        other => panic!("expected Error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_user_accepts_no_content() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(Method::DELETE).path("/users/42");
            then.status(204);
        })
        .await;

    let (service, _) = service_for(&server);
    let result = service.delete_user("42").await;

    mock.assert_async().await;
    assert!(result.is_success());
}

#[tokio::test]
async fn delete_user_ignores_a_plain_text_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::DELETE).path("/users/42");
            then.status(200).body("OK");
        })
        .await;

    let (service, _) = service_for(&server);
    assert!(service.delete_user("42").await.is_success());
}

#[tokio::test]
async fn dot_ids_never_reach_the_collection() {
    let server = MockServer::start_async().await;
    let collection_delete = server
        .mock_async(|when, then| {
            when.method(Method::DELETE).path("/users");
            then.status(204);
        })
        .await;
    let collection_get = server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/users");
            then.status(200).json_body(json!([]));
        })
        .await;

    let (service, _) = service_for(&server);
    for result in [
        service.delete_user("..").await.map(|_| ()),
        service.get_user(".").await.map(|_| ()),
        service.get_user("").await.map(|_| ()),
    ] {
        match result {
            ApiResult::Exception(cause) => assert!(matches!(
                cause.downcast_ref::<TransportError>(),
                Some(TransportError::InvalidPath { .. })
            )),
            other => panic!("expected Exception, got {other:?}"),
        }
    }
    collection_delete.assert_calls_async(0).await;
    collection_get.assert_calls_async(0).await;
}

#[tokio::test]
async fn services_on_one_address_share_a_client() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/users/42");
            then.status(200).json_body(json!({
                "id": "42",
                "name": "A",
                "email": "a@x.com",
                "createdAt": "2024-01-01"
            }));
        })
        .await;

    let registry = Arc::new(ClientRegistry::new());
    let first = UserService::new(server.base_url(), Arc::clone(&registry));
    let second = UserService::new(server.base_url(), Arc::clone(&registry));

    assert!(registry.is_empty(), "clients are bound lazily");
    assert!(first.get_user("42").await.is_success());
    assert!(second.get_user("42").await.is_success());
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn invalid_base_url_surfaces_as_exception() {
    let registry = Arc::new(ClientRegistry::new());
    let service = UserService::new("not a url", Arc::clone(&registry));

    match service.get_user("42").await {
        ApiResult::Exception(cause) => assert!(matches!(
            cause.downcast_ref::<TransportError>(),
            Some(TransportError::InvalidBaseUrl { .. })
        )),
        other => panic!("expected Exception, got {other:?}"),
    }
    assert!(registry.is_empty());
}

// ---------------------------------------------------------------------------
// Scenarios over an injected API
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ScriptedApi {
    calls: AtomicUsize,
}

#[async_trait]
impl UserApi for ScriptedApi {
    async fn get_user(
        &self,
        user_id: &str,
    ) -> Result<ResponseEnvelope<UserResponse>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match user_id {
            "42" => Ok(ResponseEnvelope::ok(200, user_42())),
            "slow" => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(ResponseEnvelope::ok(200, user_42()))
            }
            other => Err(TransportError::InvalidPath {
                path: format!("users/{other}"),
                reason: "scripted failure".into(),
            }),
        }
    }

    async fn get_users(
        &self,
        _page: u32,
    ) -> Result<ResponseEnvelope<Vec<UserResponse>>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResponseEnvelope::failed(503, None))
    }

    async fn create_user(
        &self,
        _user: &UserRequest,
    ) -> Result<ResponseEnvelope<UserResponse>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResponseEnvelope::empty(201))
    }

    async fn delete_user(&self, _user_id: &str) -> Result<ResponseEnvelope<()>, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResponseEnvelope::failed(409, Some("Conflict".into())))
    }
}

#[tokio::test]
async fn injected_api_outcomes_map_through_the_wrapper() {
    let api = Arc::new(ScriptedApi::default());
    let service = UserService::with_api(api.clone());

    assert_eq!(service.get_user("42").await.into_value(), Some(user_42()));
    assert!(matches!(
        service.get_user("boom").await,
        ApiResult::Exception(_)
    ));
    assert!(matches!(
        service.get_users(DEFAULT_PAGE).await,
        ApiResult::Error { code: 503, ref message } if message == "Unknown error"
    ));
    assert!(matches!(
        service.create_user(&UserRequest::new("B", "b@x.com")).await,
        ApiResult::Error { code: 201, .. }
    ));
    assert!(matches!(
        service.delete_user("42").await,
        ApiResult::Error { code: 409, .. }
    ));
    assert_eq!(api.calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn cancellation_token_aborts_in_flight_calls() {
    let token = CancellationToken::new();
    let service =
        UserService::with_api(Arc::new(ScriptedApi::default())).with_cancellation(token.clone());

    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    match service.get_user("slow").await {
        ApiResult::Exception(cause) => assert!(cause.downcast_ref::<Cancelled>().is_some()),
        other => panic!("expected Exception, got {other:?}"),
    }
    assert!(service.get_user("42").await.is_error());
}

#[test]
fn user_response_uses_camel_case_on_the_wire() {
    let user: UserResponse = serde_json::from_value(json!({
        "id": "42",
        "name": "A",
        "email": "a@x.com",
        "createdAt": "2024-01-01"
    }))
    .unwrap();
    assert_eq!(user, user_42());
    assert_eq!(
        serde_json::to_value(&user).unwrap()["createdAt"],
        json!("2024-01-01")
    );
}
