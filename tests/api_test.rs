//! HTTP-level tests driving the router with the in-process store.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use storefront_api::config::AuthConfig;
use storefront_api::mail::Mailer;
use storefront_api::model::{Application, Enquiry, Offer, Product, Resource};
use storefront_api::persistence::MemoryConnector;
use storefront_api::upload::{detect_resource_type, AssetDescriptor, AssetHost, Upload, UploadError};
use storefront_api::{app, AppState, Persistence, SessionGate};
use tower::ServiceExt;

const MISSING_ID: &str = "7f6c1d2e-3a4b-4c5d-8e9f-0a1b2c3d4e5f";

struct StubAssetHost;

#[async_trait]
impl AssetHost for StubAssetHost {
    async fn store(&self, upload: Upload) -> Result<AssetDescriptor, UploadError> {
        let public_id = format!("storefront/{}", upload.file_name);
        Ok(AssetDescriptor {
            url: format!("https://cdn.test/{}", public_id),
            public_id,
            resource_type: detect_resource_type(upload.content_type.as_deref(), &upload.file_name),
        })
    }
}

fn auth_config() -> AuthConfig {
    AuthConfig {
        admin_username: Some("admin".into()),
        admin_password: Some("hunter2".into()),
        secret: Some("integration-secret".into()),
        session_ttl_secs: 3600,
    }
}

fn test_app() -> Router {
    let state = AppState {
        persistence: Arc::new(Persistence::new(Arc::new(MemoryConnector))),
        gate: Arc::new(SessionGate::new(auth_config())),
        assets: Some(Arc::new(StubAssetHost)),
        mailer: Arc::new(Mailer::disabled()),
    };
    app(state, 1024 * 1024)
}

fn admin_token() -> String {
    SessionGate::new(auth_config())
        .sign_in("admin", "hunter2")
        .unwrap()
        .token
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {}", t));
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn product_body(title: &str) -> Value {
    json!({
        "title": title,
        "shortDescription": "x",
        "longDescription": "y",
        "category": "ecommerce",
        "features": [{ "title": "Cart", "description": "checkout flow" }],
        "pricingOptions": [{ "label": "base", "price": 10 }]
    })
}

fn enquiry_body(product: &str) -> Value {
    json!({
        "name": "Ada",
        "email": "ada@example.com",
        "phone": "+1 555 0100",
        "product": product,
        "adjustmentType": "minor"
    })
}

fn application_body() -> Value {
    json!({
        "name": "Grace",
        "email": "grace@example.com",
        "role": "backend-developer",
        "experience": "3-5-years",
        "resume": "https://cdn.test/cv.pdf",
        "coverLetter": "hello"
    })
}

fn offer_body() -> Value {
    json!({
        "title": "Spring sale",
        "bannerImage": "https://cdn.test/banner.png",
        "expiresAt": "2030-01-01T00:00:00Z"
    })
}

async fn create_product(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = send(app, Method::POST, "/products", Some(token), Some(product_body(title))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["data"].clone()
}

#[tokio::test]
async fn mutations_without_session_are_rejected() {
    let app = test_app();
    let cases = [
        (Method::POST, "/products".to_string(), Some(product_body("Shop A"))),
        (Method::PATCH, format!("/products/{}", MISSING_ID), Some(json!({ "title": "B" }))),
        (Method::DELETE, format!("/products/{}", MISSING_ID), None),
        (Method::POST, "/offers".to_string(), Some(offer_body())),
        (Method::PATCH, format!("/offers/{}", MISSING_ID), Some(json!({}))),
        (Method::DELETE, format!("/offers/{}", MISSING_ID), None),
        (Method::PATCH, format!("/enquiries/{}", MISSING_ID), Some(json!({}))),
        (Method::DELETE, format!("/enquiries/{}", MISSING_ID), None),
        (Method::PATCH, format!("/applications/{}", MISSING_ID), Some(json!({}))),
        (Method::DELETE, format!("/applications/{}", MISSING_ID), None),
    ];
    for (method, uri, body) in cases {
        for token in [None, Some("not-a-token")] {
            let (status, res) = send(&app, method.clone(), &uri, token, body.clone()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
            assert_eq!(res["success"], false);
            assert_eq!(res["error"]["code"], "unauthorized");
            if token.is_some() {
                assert_eq!(res["message"], "invalid session");
            }
        }
    }
}

#[tokio::test]
async fn admin_listings_require_session() {
    let app = test_app();
    for uri in ["/enquiries", "/applications"] {
        let (status, _) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
    let (status, body) = send(&app, Method::GET, "/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["message"], "Products fetched successfully");
}

async fn assert_required_fields<R: Resource>(app: &Router, uri: &str, token: Option<&str>, valid: Value) {
    for field in R::REQUIRED {
        let mut body = valid.clone();
        body.as_object_mut().unwrap().remove(*field);
        let (status, res) = send(app, Method::POST, uri, token, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} without {}", uri, field);
        assert_eq!(res["message"], format!("{} is required", field));
        assert_eq!(res["error"]["code"], "validation_error");
    }
}

#[tokio::test]
async fn create_names_each_missing_required_field() {
    let app = test_app();
    let token = admin_token();
    assert_required_fields::<Product>(&app, "/products", Some(&token), product_body("Shop A")).await;
    assert_required_fields::<Offer>(&app, "/offers", Some(&token), offer_body()).await;
    assert_required_fields::<Enquiry>(&app, "/enquiries", None, enquiry_body(MISSING_ID)).await;
    assert_required_fields::<Application>(&app, "/applications", None, application_body()).await;

    let mut enquiry = enquiry_body(MISSING_ID);
    enquiry["email"] = json!("");
    let (status, res) = send(&app, Method::POST, "/enquiries", None, Some(enquiry)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "email is required");
}

#[tokio::test]
async fn gate_runs_before_body_parsing() {
    let app = test_app();
    let cases = [
        (Method::POST, "/products".to_string(), Body::empty()),
        (Method::POST, "/offers".to_string(), Body::from("{oops")),
        (Method::PATCH, format!("/products/{}", MISSING_ID), Body::from("{oops")),
        (Method::PATCH, format!("/enquiries/{}", MISSING_ID), Body::empty()),
        (Method::PATCH, format!("/applications/{}", MISSING_ID), Body::from("[1,")),
    ];
    for (method, uri, body) in cases {
        let req = Request::builder()
            .method(method.clone())
            .uri(&uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], "unauthorized");
    }
}

#[tokio::test]
async fn product_example_scenario() {
    let app = test_app();
    let token = admin_token();
    let (status, body) = send(&app, Method::POST, "/products", Some(&token), Some(product_body("Shop A"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["data"]["_id"].is_string());
    assert_eq!(body["data"]["category"], "ecommerce");
    assert_eq!(body["data"]["seo"]["slug"], "shop-a");
}

#[tokio::test]
async fn product_round_trip_and_delete() {
    let app = test_app();
    let token = admin_token();
    let created = create_product(&app, &token, "Round Trip").await;
    let id = created["_id"].as_str().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/products/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/products/{}", id),
        Some(&token),
        Some(json!({ "category": "blog", "_id": MISSING_ID })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["_id"], id);
    assert_eq!(updated["data"]["category"], "blog");
    assert_eq!(updated["data"]["title"], "Round Trip");

    let (status, bad) = send(
        &app,
        Method::PATCH,
        &format!("/products/{}", id),
        Some(&token),
        Some(json!({ "category": "shop" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(bad["message"].as_str().unwrap().starts_with("category must be one of"));

    let (status, deleted) = send(&app, Method::DELETE, &format!("/products/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["data"], Value::Null);

    let (status, _) = send(&app, Method::GET, &format!("/products/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_documents_are_not_found() {
    let app = test_app();
    let token = admin_token();
    let (status, body) = send(&app, Method::DELETE, &format!("/products/{}", MISSING_ID), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/products/{}", MISSING_ID),
        Some(&token),
        Some(json!({ "title": "B" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::GET, "/offers/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn slug_lookup() {
    let app = test_app();
    let token = admin_token();
    let (status, _) = send(&app, Method::GET, "/products/details-by-slug/shop-a", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let created = create_product(&app, &token, "Shop A").await;
    let (status, found) = send(&app, Method::GET, "/products/details-by-slug/shop-a", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["data"]["_id"], created["_id"]);

    let (status, dup) = send(&app, Method::POST, "/products", Some(&token), Some(product_body("Shop A"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(dup["message"], "seo.slug is already in use");
}

#[tokio::test]
async fn enquiry_flow() {
    let app = test_app();
    let token = admin_token();

    let (status, body) = send(&app, Method::POST, "/enquiries", None, Some(enquiry_body(MISSING_ID))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let product = create_product(&app, &token, "Agency Site").await;
    let product_id = product["_id"].as_str().unwrap();
    let (status, created) = send(&app, Method::POST, "/enquiries", None, Some(enquiry_body(product_id))).await;
    assert_eq!(status, StatusCode::OK, "{}", created);
    assert_eq!(created["data"]["status"], "pending");
    let id = created["data"]["_id"].as_str().unwrap();

    let (status, _) = send(&app, Method::GET, &format!("/enquiries/{}", id), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, detail) = send(&app, Method::GET, &format!("/enquiries/{}", id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["data"]["productDetails"]["title"], "Agency Site");

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/enquiries/{}", id),
        Some(&token),
        Some(json!({ "product": MISSING_ID })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/enquiries/{}", id),
        Some(&token),
        Some(json!({ "status": "contacted" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], "contacted");

    let (status, list) = send(&app, Method::GET, "/enquiries", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn application_is_public_to_submit() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/applications", None, Some(application_body())).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["role"], "backend-developer");
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
async fn offers_keep_manual_active_flag() {
    let app = test_app();
    let token = admin_token();
    let mut body = offer_body();
    body["expiresAt"] = json!("2000-01-01T00:00:00Z");
    body["active"] = json!(true);
    let (status, created) = send(&app, Method::POST, "/offers", Some(&token), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["data"]["active"], true);
}

#[tokio::test]
async fn sign_in_and_session() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth",
        None,
        Some(json!({ "username": "admin", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid credentials");

    let (status, _) = send(&app, Method::POST, "/auth", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth",
        None,
        Some(json!({ "username": "admin", "password": "hunter2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tokenType"], "Bearer");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, session) = send(&app, Method::GET, "/auth/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["data"]["user"]["role"], "admin");

    let (status, _) = send(&app, Method::GET, "/auth/session", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

fn multipart_request(file_name: &str, content_type: &str, payload: &[u8]) -> Request<Body> {
    let boundary = "storefront-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            file_name, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
        .body(Body::from(body))
        .unwrap()
}

async fn upload(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn upload_rejects_text_parts() {
    let app = test_app();
    let (status, body) = upload(&app, multipart_request("notes.txt", "text/plain", b"hello")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn upload_png_is_an_image() {
    let app = test_app();
    let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];
    let (status, body) = upload(&app, multipart_request("hero.png", "image/png", &png)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["resourceType"], "image");
    assert_eq!(body["data"]["publicId"], "storefront/hero.png");
    assert_eq!(body["message"], "File uploaded successfully");
}

#[tokio::test]
async fn unknown_routes_and_bad_json_use_envelope() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/nowhere", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/applications")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_and_ready() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let (status, body) = send(&app, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
}
