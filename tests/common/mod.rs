#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tower::ServiceExt;

use course_api::config::AppConfig;
use course_api::database::MemoryStore;
use course_api::{build_app, AppState};

/// Router over a fresh in-memory store, plus a handle on the store for
/// asserting what was (not) written.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = build_app(AppState::new(store.clone(), AppConfig::test()));
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, location, body }
    }

    pub async fn get(&self, uri: &str, auth: Option<(&str, &str)>) -> TestResponse {
        self.send(request("GET", uri, auth, None)).await
    }

    pub async fn post(&self, uri: &str, auth: Option<(&str, &str)>, body: Value) -> TestResponse {
        self.send(request("POST", uri, auth, Some(body))).await
    }

    pub async fn put(&self, uri: &str, auth: Option<(&str, &str)>, body: Value) -> TestResponse {
        self.send(request("PUT", uri, auth, Some(body))).await
    }

    pub async fn delete(&self, uri: &str, auth: Option<(&str, &str)>) -> TestResponse {
        self.send(request("DELETE", uri, auth, None)).await
    }

    /// Register a user and assert it succeeded
    pub async fn register(&self, first_name: &str, email: &str, password: &str) {
        let res = self
            .post(
                "/users",
                None,
                json!({
                    "firstName": first_name,
                    "lastName": "Tester",
                    "emailAddress": email,
                    "password": password
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "register failed: {}", res.body);
    }

    /// Create a course as `auth` and return its id
    pub async fn create_course(&self, auth: (&str, &str), title: &str) -> i64 {
        let res = self
            .post(
                "/courses",
                Some(auth),
                json!({ "title": title, "description": "A course about things" }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "create course failed: {}", res.body);

        res.location
            .as_deref()
            .and_then(|l| l.rsplit('/').next())
            .and_then(|id| id.parse().ok())
            .expect("Location header with course id")
    }
}

pub fn basic_auth(name: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", name, pass)))
}

pub fn request(method: &str, uri: &str, auth: Option<(&str, &str)>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some((name, pass)) = auth {
        builder = builder.header(header::AUTHORIZATION, basic_auth(name, pass));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
