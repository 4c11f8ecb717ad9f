//! Router tests over the in-memory store and the real JWT provider.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    },
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use directory_api::{build_router, AppState};
use directory_core::domain::{District, LoginInput, Neighborhood, Province, RegisterInput};
use directory_core::providers::{AddressLookup, AuthProvider};
use directory_core::repositories::InMemoryStore;
use directory_core::DomainError;
use directory_security::JwtAuthProvider;

struct StubAddress {
    online: bool,
}

impl StubAddress {
    fn check(&self) -> Result<(), DomainError> {
        if self.online {
            Ok(())
        } else {
            Err(DomainError::UpstreamUnavailable("connection refused".into()))
        }
    }
}

#[async_trait]
impl AddressLookup for StubAddress {
    async fn list_provinces(&self) -> Result<Vec<Province>, DomainError> {
        self.check()?;
        Ok(vec![Province {
            id: 6,
            name: "Ankara".to_string(),
            population: 5_782_285,
            area: 25_632.0,
            altitude: 890.0,
            area_code: vec![312],
            is_metropolitan: true,
        }])
    }

    async fn get_province(&self, id: i32) -> Result<Option<Province>, DomainError> {
        Ok(self.list_provinces().await?.into_iter().find(|p| p.id == id))
    }

    async fn list_districts(&self, province_id: i32) -> Result<Vec<District>, DomainError> {
        self.check()?;
        if province_id != 6 {
            return Ok(vec![]);
        }
        Ok(vec![District {
            id: 1130,
            name: "Çankaya".to_string(),
            population: 942_553,
            area: 483.0,
        }])
    }

    async fn list_neighborhoods(
        &self,
        _province_id: i32,
        district_id: i32,
    ) -> Result<Vec<Neighborhood>, DomainError> {
        self.check()?;
        Ok(vec![Neighborhood {
            id: district_id * 10,
            name: "Kızılay".to_string(),
            population: 1_200,
        }])
    }
}

struct TestApp {
    router: Router,
    admin_token: String,
    customer_token: String,
    customer_id: i32,
}

async fn setup_with(address_online: bool) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let auth: Arc<dyn AuthProvider> = Arc::new(JwtAuthProvider::new("test-secret", 1, 4));
    let state = AppState::new(
        store.clone(),
        store.clone(),
        store,
        Arc::new(StubAddress {
            online: address_online,
        }),
        auth,
    );

    state
        .accounts
        .ensure_admin("admin@example.com", "admin-pass")
        .await
        .unwrap();
    let admin = state
        .accounts
        .login(LoginInput {
            email: "admin@example.com".to_string(),
            password: "admin-pass".to_string(),
        })
        .await
        .unwrap();
    let customer = state
        .accounts
        .register(RegisterInput {
            email: "ayse@example.com".to_string(),
            password: "secret123".to_string(),
            first_name: "Ayşe".to_string(),
            last_name: "Yılmaz".to_string(),
            phone: Some("+90 555 111 22 33".to_string()),
            role: None,
        })
        .await
        .unwrap();

    TestApp {
        router: build_router(state),
        admin_token: admin.token,
        customer_token: customer.token,
        customer_id: customer.user.id,
    }
}

async fn setup() -> TestApp {
    setup_with(true).await
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_company(app: &TestApp, body: Value) -> Value {
    let (status, value) = send(
        &app.router,
        "POST",
        "/api/companies",
        Some(&app.admin_token),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", value);
    value["data"].clone()
}

#[tokio::test]
async fn test_health() {
    let app = setup().await;
    let (status, body) = send(&app.router, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_company_requires_super_admin() {
    let app = setup().await;
    let payload = json!({ "name": "Golden Scissors" });

    let (status, body) = send(&app.router, "POST", "/api/companies", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/companies",
        Some("not-a-token"),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/companies",
        Some(&app.customer_token),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let company = create_company(&app, payload).await;
    assert_eq!(company["name"], "Golden Scissors");
    assert_eq!(company["is_active"], true);
    assert_eq!(company["is_verified"], false);
    assert_eq!(company["commission_rate"], 0.0);
}

#[tokio::test]
async fn test_create_company_reports_field_violations() {
    let app = setup().await;
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/companies",
        Some(&app.admin_token),
        Some(json!({ "name": "Acme", "commission_rate": 150, "latitude": 91 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["details"][0]["field"], "commission_rate");
    assert_eq!(body["details"][1]["field"], "latitude");
}

#[tokio::test]
async fn test_list_companies_newest_first_with_count() {
    let app = setup().await;
    for name in ["Alpha Salon", "Beta Barber", "Gamma Salon"] {
        create_company(&app, json!({ "name": name })).await;
    }

    let (status, body) = send(&app.router, "GET", "/api/companies", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["data"][0]["name"], "Gamma Salon");
    assert_eq!(body["data"][2]["name"], "Alpha Salon");

    let (_, body) = send(&app.router, "GET", "/api/companies?search=salon", None, None).await;
    assert_eq!(body["count"], 2);

    let (status, _) = send(&app.router, "GET", "/api/companies?is_active=maybe", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_company_not_found_and_bad_id() {
    let app = setup().await;
    let (status, body) = send(&app.router, "GET", "/api/companies/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app.router, "GET", "/api/companies/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_company_partial() {
    let app = setup().await;
    let company = create_company(
        &app,
        json!({ "name": "Acme", "phone": "+90 212 000 00 00", "latitude": 41.0 }),
    )
    .await;
    let uri = format!("/api/companies/{}", company["id"]);

    let (status, _) = send(&app.router, "PUT", &uri, None, Some(json!({ "name": "Acme Ltd" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app.router,
        "PUT",
        &uri,
        Some(&app.customer_token),
        Some(json!({ "name": "Acme Ltd", "phone": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Acme Ltd");
    assert_eq!(body["data"]["phone"], Value::Null);
    assert_eq!(body["data"]["latitude"], 41.0);

    let (status, body) = send(&app.router, "PUT", &uri, Some(&app.customer_token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app.router,
        "PUT",
        "/api/companies/4040",
        Some(&app.customer_token),
        Some(json!({ "name": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_and_verify_company() {
    let app = setup().await;
    let company = create_company(&app, json!({ "name": "Acme" })).await;
    let uri = format!("/api/companies/{}", company["id"]);

    let (status, _) = send(&app.router, "DELETE", &uri, Some(&app.customer_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app.router, "DELETE", &uri, Some(&app.admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Company deleted");

    let (_, body) = send(&app.router, "GET", &uri, None, None).await;
    assert_eq!(body["data"]["is_active"], false);

    let (status, body) = send(
        &app.router,
        "POST",
        &format!("{}/verify", uri),
        Some(&app.admin_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_verified"], true);
    assert_eq!(body["message"], "Company verified");

    let (status, _) = send(&app.router, "DELETE", "/api/companies/777", Some(&app.admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employee_lifecycle() {
    let app = setup().await;
    let company = create_company(&app, json!({ "name": "Acme" })).await;
    let employees_uri = format!("/api/companies/{}/employees", company["id"]);

    let (status, _) = send(
        &app.router,
        "POST",
        &employees_uri,
        Some(&app.customer_token),
        Some(json!({ "user_id": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app.router,
        "POST",
        &employees_uri,
        Some(&app.customer_token),
        Some(json!({ "user_id": app.customer_id, "role": "director" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app.router,
        "POST",
        &employees_uri,
        Some(&app.customer_token),
        Some(json!({ "user_id": app.customer_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "staff");
    let employee_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app.router, "GET", &employees_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["first_name"], "Ayşe");
    assert_eq!(body["data"][0]["email"], "ayse@example.com");

    let (status, body) = send(
        &app.router,
        "PUT",
        &format!("{}/{}", employees_uri, employee_id),
        Some(&app.customer_token),
        Some(json!({ "role": "manager" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "manager");

    // another company's path cannot remove this association
    let (status, _) = send(
        &app.router,
        "DELETE",
        &format!("/api/companies/{}/employees/{}", 9999, employee_id),
        Some(&app.customer_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app.router,
        "DELETE",
        &format!("{}/{}", employees_uri, employee_id),
        Some(&app.customer_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app.router, "GET", &employees_uri, None, None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_address_routes() {
    let app = setup().await;

    let (status, body) = send(&app.router, "GET", "/api/address/provinces", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["areaCode"][0], 312);
    assert_eq!(body["data"][0]["isMetropolitan"], true);

    let (status, _) = send(&app.router, "GET", "/api/address/provinces/99", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app.router, "GET", "/api/address/provinces/6/districts", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Çankaya");

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/address/provinces/6/districts/1130/neighborhoods",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (status, _) = send(&app.router, "GET", "/api/address/provinces/x/districts", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_address_upstream_down_is_503() {
    let app = setup_with(false).await;
    let (status, body) = send(&app.router, "GET", "/api/address/provinces", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_auth_routes() {
    let app = setup().await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "owner@example.com",
            "password": "secret123",
            "first_name": "Emre",
            "last_name": "Demir",
            "role": "company_admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["role"], "company_admin");
    assert!(body["data"]["user"].get("password_hash").is_none());
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app.router, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "owner@example.com");

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "root@example.com",
            "password": "secret123",
            "first_name": "Root",
            "last_name": "User",
            "role": "super_admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "role");

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "owner@example.com", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app.router, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
