use reqwest::StatusCode;
use serde_json::{json, Value};

use orderdesk_api::app::{build_app, services::AppServices};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, in-memory repositories, ephemeral port.
        let app = build_app(AppServices::in_memory());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn post_raw(&self, path: &str, body: &str) -> (StatusCode, String, Value) {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap();
        let status = res.status();
        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        (status, content_type, res.json().await.unwrap())
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn customer(&self, email: &str) -> String {
        let (status, body) = self
            .post("/customers", json!({ "name": "C1", "email": email }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    async fn product(&self, name: &str, price: u64, quantity: i64) -> String {
        let (status, body) = self
            .post("/products", json!({ "name": name, "price": price, "quantity": quantity }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let (status, body) = srv.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn order_lifecycle_create_then_read_back() {
    let srv = TestServer::spawn().await;
    let customer_id = srv.customer("c1@example.test").await;
    let p1 = srv.product("P1", 1000, 5).await;

    let (status, order) = srv
        .post(
            "/orders",
            json!({ "customer_id": customer_id, "products": [{ "id": p1, "quantity": 2 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["customer_id"], customer_id.as_str());
    assert_eq!(
        order["products"],
        json!([{ "product_id": p1, "price": 1000, "quantity": 2 }])
    );

    let (status, product) = srv.get(&format!("/products/{p1}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["quantity"], 3);

    let order_id = order["id"].as_str().unwrap();
    let (status, loaded) = srv.get(&format!("/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, order);
}

#[tokio::test]
async fn insufficient_stock_is_a_conflict_and_changes_nothing() {
    let srv = TestServer::spawn().await;
    let customer_id = srv.customer("c1@example.test").await;
    let p1 = srv.product("Keyboard", 4500, 1).await;

    let (status, body) = srv
        .post(
            "/orders",
            json!({ "customer_id": customer_id, "products": [{ "id": p1, "quantity": 4 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "insufficient_stock");
    assert_eq!(
        body["message"],
        "The product Keyboard, has only 1 available, but you request 4."
    );

    let (_, product) = srv.get(&format!("/products/{p1}")).await;
    assert_eq!(product["quantity"], 1);
}

#[tokio::test]
async fn order_validation_failures_are_bad_requests() {
    let srv = TestServer::spawn().await;
    let customer_id = srv.customer("c1@example.test").await;
    let p1 = srv.product("P1", 1000, 5).await;
    let unknown_customer = "0190b0a4-0000-7000-8000-000000000000";
    let unknown_product = "0190b0a4-0000-7000-8000-000000000001";

    let cases = [
        (
            json!({ "customer_id": unknown_customer, "products": [{ "id": p1, "quantity": 1 }] }),
            "invalid_customer",
        ),
        (
            json!({ "customer_id": customer_id, "products": [{ "id": unknown_product, "quantity": 1 }] }),
            "unavailable_products",
        ),
        (
            json!({ "customer_id": customer_id, "products": [] }),
            "empty_order",
        ),
        (
            json!({ "customer_id": customer_id, "products": [{ "id": p1, "quantity": 0 }] }),
            "invalid_quantity",
        ),
        (
            json!({ "customer_id": "C1", "products": [{ "id": p1, "quantity": 1 }] }),
            "invalid_id",
        ),
    ];

    for (body, code) in cases {
        let (status, err) = srv.post("/orders", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{code}");
        assert_eq!(err["error"], code);
    }

    let (_, product) = srv.get(&format!("/products/{p1}")).await;
    assert_eq!(product["quantity"], 5);
}

#[tokio::test]
async fn catalog_and_customer_inputs_are_validated() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv
        .post("/products", json!({ "name": "Widget", "price": 100, "quantity": -1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = srv
        .post("/customers", json!({ "name": "Ada", "email": "no-at-sign" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    srv.customer("ada@example.test").await;
    let (status, body) = srv
        .post("/customers", json!({ "name": "Ada", "email": "ada@example.test" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn undecodable_bodies_use_the_error_envelope() {
    let srv = TestServer::spawn().await;
    let customer_id = srv.customer("c1@example.test").await;
    let product_id = srv.product("P1", 1000, 5).await;

    let wrong_type = format!(
        r#"{{"customer_id":"{customer_id}","products":[{{"id":"{product_id}","quantity":"two"}}]}}"#
    );
    let (status, content_type, body) = srv.post_raw("/orders", &wrong_type).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(content_type.starts_with("application/json"));
    assert_eq!(body["error"], "invalid_body");
    assert!(body["message"].as_str().unwrap().contains("quantity"));

    let (status, _, body) = srv.post_raw("/products", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_body");

    let (status, _, body) = srv.post_raw("/customers", r#"{"name":"Ada"}"#).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_body");

    let (status, body) = srv.get(&format!("/products/{product_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 5);
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let srv = TestServer::spawn().await;
    let (status, body) = srv
        .get("/orders/0190b0a4-0000-7000-8000-0000000000ff")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = srv.get("/orders/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
