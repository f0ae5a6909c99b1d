use crate::{handlers, middleware, AppState};
use axum::{
    body::Body,
    http::Request,
    middleware::from_fn,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn app_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/auth/me", get(handlers::me_handler))
        .route("/api/companies", get(handlers::list_companies_handler))
        .route(
            "/api/reminders",
            get(handlers::list_reminders_handler).post(handlers::create_reminder_handler),
        )
        .route(
            "/api/reminders/{id}",
            get(handlers::get_reminder_handler)
                .put(handlers::update_reminder_handler)
                .delete(handlers::delete_reminder_handler),
        )
        .route("/api/dashboard", get(handlers::dashboard_handler))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::require_bearer_auth,
        ));

    // Authorization header must be listed explicitly (not covered by wildcard)
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/auth/register", post(handlers::register_handler))
        .route("/api/auth/login", post(handlers::login_handler))
        .merge(protected_routes)
        .layer(from_fn(middleware::add_security_headers))
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                // user_id is filled in by the bearer gate
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    user_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}
