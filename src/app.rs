use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{courses, system, users};
use crate::state::AppState;

/// Full application router. The resource routes are served both at the root
/// and under `/api`; `/api/course/:id` is the URL handed out in `Location`
/// after a course is created.
pub fn build_app(state: AppState) -> Router {
    let max_body = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config.security);

    let router = Router::new()
        .route("/", get(system::root).fallback(system::method_not_allowed))
        .route("/health", get(system::health).fallback(system::method_not_allowed))
        .merge(api_routes())
        .nest("/api", api_routes())
        .route("/api/course/:id", course_routes())
        .fallback(system::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body)),
        );

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(users::users_get)
                .post(users::users_post)
                .fallback(system::method_not_allowed),
        )
        .route(
            "/courses",
            get(courses::courses_list)
                .post(courses::course_post)
                .fallback(system::method_not_allowed),
        )
        .route("/courses/:id", course_routes())
}

fn course_routes() -> MethodRouter<AppState> {
    get(courses::course_get)
        .put(courses::course_put)
        .delete(courses::course_delete)
        .fallback(system::method_not_allowed)
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .expose_headers([axum::http::header::LOCATION]),
    )
}
