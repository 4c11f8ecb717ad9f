//! Route table

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::handlers::{address, auth, companies, employees, health};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let company_routes = Router::new()
        .route(
            "/",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/{id}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route("/{id}/verify", post(companies::verify_company))
        .route(
            "/{id}/employees",
            get(employees::list_employees).post(employees::add_employee),
        )
        .route(
            "/{id}/employees/{employee_id}",
            put(employees::update_employee_role).delete(employees::remove_employee),
        );

    let address_routes = Router::new()
        .route("/provinces", get(address::list_provinces))
        .route("/provinces/{id}", get(address::get_province))
        .route("/provinces/{id}/districts", get(address::list_districts))
        .route(
            "/provinces/{id}/districts/{district_id}/neighborhoods",
            get(address::list_neighborhoods),
        );

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/companies", company_routes)
        .nest("/api/address", address_routes)
        .nest("/api/auth", auth_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
