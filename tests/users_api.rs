//! Black-box tests for the users API router.
//!
//! The router is exercised through `tower::ServiceExt::oneshot` with an
//! in-memory `UserService` double, so these tests cover the controller
//! contract (status codes, Location header, validation short-circuit)
//! without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;
use uuid::Uuid;

use users_api::application::UserService;
use users_api::auth::jwt::{create_token, JwtConfig};
use users_api::create_api_router;
use users_api::domain::{CreateUserDto, DomainError, DomainResult, UpdateUserDto, User};

/// In-memory `UserService` double.
///
/// `fail` makes every call return a storage error; `calls` counts how
/// often the service was actually invoked.
#[derive(Default)]
struct MockUserService {
    users: Mutex<HashMap<Uuid, User>>,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl MockUserService {
    fn check(&self) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("Database error: gone away".to_string()));
        }
        Ok(())
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserService for MockUserService {
    async fn get_all(&self) -> DomainResult<Vec<User>> {
        self.check()?;
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }

    async fn get(&self, id: Uuid) -> DomainResult<Option<User>> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.check()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn post(&self, dto: CreateUserDto) -> DomainResult<Option<User>> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == dto.email) {
            return Ok(None);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: dto.name,
            email: dto.email,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(Some(user))
    }

    async fn put(&self, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(&dto.id) else {
            return Ok(None);
        };
        user.name = dto.name;
        user.email = dto.email;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        self.check()?;
        Ok(self.users.lock().unwrap().remove(&id).is_some())
    }
}

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        audience: "test-audience".to_string(),
        issuer: "test-issuer".to_string(),
        expiration_seconds: 3000,
    }
}

fn setup() -> (Router, Arc<MockUserService>, String) {
    let service = Arc::new(MockUserService::default());
    let config = jwt_config();
    let router = create_api_router(service.clone(), config.clone());
    let token = create_token("tester", "tester@example.com", &config).unwrap();
    (router, service, token)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_valid_user_returns_201_with_resolvable_location() {
    let (router, _service, token) = setup();

    let body = serde_json::json!({"name": "Alice Example", "email": "alice@example.com"});
    let response = router
        .clone()
        .oneshot(request("POST", "/api/users", Some(&token), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string();

    let created = json_body(response).await;
    assert_eq!(created["email"], "alice@example.com");
    assert_eq!(location, format!("/api/users/{}", created["id"].as_str().unwrap()));

    // The Location header must resolve through Get
    let response = router
        .oneshot(request("GET", &location, Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = json_body(response).await;
    assert_eq!(fetched["id"], created["id"]);
}

#[tokio::test]
async fn post_invalid_model_returns_400_without_invoking_service() {
    let (router, service, token) = setup();

    let body = serde_json::json!({"name": "Alice", "email": "not-an-email"});
    let response = router
        .oneshot(request("POST", "/api/users", Some(&token), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(service.call_count(), 0);

    let parsed = json_body(response).await;
    assert_eq!(parsed["details"][0]["field"], "email");
}

#[tokio::test]
async fn post_duplicate_email_returns_400() {
    let (router, _service, token) = setup();

    let body = serde_json::json!({"name": "Alice", "email": "alice@example.com"});
    let first = router
        .clone()
        .oneshot(request("POST", "/api/users", Some(&token), Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = router
        .oneshot(request("POST", "/api/users", Some(&token), Some(body)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_id_returns_204_with_empty_body() {
    let (router, _service, token) = setup();

    let uri = format!("/api/users/{}", Uuid::new_v4());
    let response = router
        .oneshot(request("GET", &uri, Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn put_invalid_model_returns_400_without_invoking_service() {
    let (router, service, token) = setup();

    let body = serde_json::json!({
        "id": Uuid::new_v4(),
        "name": "",
        "email": "alice@example.com"
    });
    let response = router
        .oneshot(request("PUT", "/api/users", Some(&token), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn delete_malformed_id_returns_400_without_invoking_service() {
    let (router, service, token) = setup();

    let response = router
        .oneshot(request("DELETE", "/api/users/not-a-uuid", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn get_malformed_id_returns_400_without_invoking_service() {
    let (router, service, token) = setup();

    let response = router
        .oneshot(request("GET", "/api/users/not-a-uuid", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn put_unknown_id_returns_400() {
    let (router, _service, token) = setup();

    let body = serde_json::json!({
        "id": Uuid::new_v4(),
        "name": "Nobody",
        "email": "nobody@example.com"
    });
    let response = router
        .oneshot(request("PUT", "/api/users", Some(&token), Some(body)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_returns_200_with_deletion_result() {
    let (router, _service, token) = setup();

    let body = serde_json::json!({"name": "Alice", "email": "alice@example.com"});
    let created = router
        .clone()
        .oneshot(request("POST", "/api/users", Some(&token), Some(body)))
        .await
        .unwrap();
    let id = json_body(created).await["id"].as_str().unwrap().to_string();

    let response = router
        .clone()
        .oneshot(request("DELETE", &format!("/api/users/{}", id), Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!(true));

    // Deleting again reports false, still 200
    let response = router
        .oneshot(request("DELETE", &format!("/api/users/{}", id), Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!(false));
}

#[tokio::test]
async fn service_failure_returns_500_with_message() {
    let (router, service, token) = setup();
    service.fail.store(true, Ordering::SeqCst);

    let response = router
        .oneshot(request("GET", "/api/users", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let parsed = json_body(response).await;
    assert!(parsed["error"].as_str().unwrap().contains("Database error"));
}

#[tokio::test]
async fn missing_token_returns_401() {
    let (router, service, _token) = setup();

    let response = router
        .oneshot(request("GET", "/api/users", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn token_from_another_issuer_returns_401() {
    let (router, _service, _token) = setup();

    let mut foreign = jwt_config();
    foreign.issuer = "someone-else".to_string();
    let token = create_token("tester", "tester@example.com", &foreign).unwrap();

    let response = router
        .oneshot(request("GET", "/api/users", Some(&token), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_issues_token_accepted_by_the_middleware() {
    let (router, _service, token) = setup();

    let body = serde_json::json!({"name": "Alice", "email": "alice@example.com"});
    let created = router
        .clone()
        .oneshot(request("POST", "/api/users", Some(&token), Some(body)))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let login = router
        .clone()
        .oneshot(request(
            "POST",
            "/api/login",
            None,
            Some(serde_json::json!({"email": "alice@example.com"})),
        ))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    let issued = json_body(login).await;
    let access_token = issued["access_token"].as_str().unwrap().to_string();
    assert_eq!(issued["token_type"], "Bearer");

    let response = router
        .oneshot(request("GET", "/api/users", Some(&access_token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_with_unknown_email_returns_401() {
    let (router, _service, _token) = setup();

    let response = router
        .oneshot(request(
            "POST",
            "/api/login",
            None,
            Some(serde_json::json!({"email": "ghost@example.com"})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let (router, _service, _token) = setup();

    let response = router
        .oneshot(request("GET", "/health", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}
