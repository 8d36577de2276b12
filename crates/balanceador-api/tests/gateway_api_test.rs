//! End-to-end tests for the balanceador API
//!
//! Each test starts two stand-in hunters services and the gateway itself as
//! in-process HTTP servers, then drives the gateway with reqwest.

use std::sync::Arc;
use std::time::Duration;

use balanceador_api::{create_router, AppState, DEFAULT_PREFIX};
use balanceador_client::testing::{StubReply, StubRoute, StubService, TestServer};
use balanceador_client::{CazadoresClient, HunterBackend};
use balanceador_gateway::Gateway;
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

const CLIENT_TIMEOUT: Duration = Duration::from_millis(300);

/// Gateway wired to two stub backends, "mongo" then "postgres"
struct Harness {
    gateway: TestServer,
    mongo: StubService,
    postgres: StubService,
    _backends: Vec<TestServer>,
}

impl Harness {
    async fn new(mongo: StubService, postgres: StubService) -> Self {
        let mongo_server = TestServer::start(mongo.router()).await.unwrap();
        let postgres_server = TestServer::start(postgres.router()).await.unwrap();

        let backends: Vec<Arc<dyn HunterBackend>> = vec![
            Arc::new(client("mongo", &mongo_server.base_url())),
            Arc::new(client("postgres", &postgres_server.base_url())),
        ];
        let gateway = Gateway::new(backends).unwrap();
        let router = create_router(AppState::new(gateway), DEFAULT_PREFIX);

        Self {
            gateway: TestServer::start(router).await.unwrap(),
            mongo,
            postgres,
            _backends: vec![mongo_server, postgres_server],
        }
    }

    fn url(&self, path: &str) -> String {
        self.gateway.url(&format!("{}{}", DEFAULT_PREFIX, path))
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self.gateway.http.get(self.url(path)).send().await.unwrap();
        read(response).await
    }

    async fn send(&self, method: reqwest::Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = self.gateway.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        read(request.send().await.unwrap()).await
    }
}

fn client(name: &str, url: &str) -> CazadoresClient {
    CazadoresClient::with_config(name, url, CLIENT_TIMEOUT, CLIENT_TIMEOUT).unwrap()
}

async fn read(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_merges_and_deduplicates() {
    let mongo = StubService::new().on_list(StubReply::json(
        200,
        json!([{"id": 1, "name": "Ana", "origen": "mongo"}]),
    ));
    let postgres = StubService::new().on_list(StubReply::json(
        200,
        json!([
            {"id": 1, "name": "Ana", "origen": "postgres"},
            {"id": 2, "name": "Luis", "origen": "postgres"}
        ]),
    ));
    let h = Harness::new(mongo, postgres).await;

    let (status, body) = h.get("/cazadores").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "total": 2,
            "cazadores": [
                {"id": 1, "name": "Ana", "origen": "postgres"},
                {"id": 2, "name": "Luis", "origen": "postgres"}
            ]
        })
    );
}

#[tokio::test]
async fn test_list_is_deterministic_across_calls() {
    let mongo = StubService::new().on_list(StubReply::json(200, json!([{"id": 3}, {"id": 1, "v": "m"}])));
    let postgres = StubService::new().on_list(StubReply::json(200, json!([{"id": 1, "v": "p"}, {"id": 2}])));
    let h = Harness::new(mongo, postgres).await;

    let (_, first) = h.get("/cazadores").await;
    for _ in 0..5 {
        let (_, again) = h.get("/cazadores").await;
        assert_eq!(again, first);
    }
    assert_eq!(
        first["cazadores"],
        json!([{"id": 3}, {"id": 1, "v": "p"}, {"id": 2}])
    );
}

#[tokio::test]
async fn test_list_survives_one_backend_failing() {
    let mongo = StubService::new().on_list(StubReply::text(500, "caido"));
    let postgres = StubService::new().on_list(StubReply::json(200, json!([{"id": 2, "name": "Luis"}])));
    let h = Harness::new(mongo, postgres).await;

    let (status, body) = h.get("/cazadores").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(1));
}

#[tokio::test]
async fn test_list_all_backends_failing_is_aggregate_error() {
    let mongo = StubService::new().on_list(StubReply::text(500, "caido"));
    let postgres = StubService::new()
        .on_list(StubReply::json(200, json!([])).delayed(Duration::from_secs(2)));
    let h = Harness::new(mongo, postgres).await;

    let (status, body) = h.get("/cazadores").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_requires_nombre_without_calling_backends() {
    let h = Harness::new(StubService::new(), StubService::new()).await;

    let (status, body) = h.get("/cazadores/buscar").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Debes proporcionar un nombre"}));

    let (status, _) = h.get("/cazadores/buscar?nombre=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(h.mongo.call_count(), 0);
    assert_eq!(h.postgres.call_count(), 0);
}

#[tokio::test]
async fn test_search_with_one_backend_timing_out() {
    let mongo = StubService::new().on_search(
        StubReply::json(200, json!({"found": false})).delayed(Duration::from_secs(2)),
    );
    let postgres = StubService::new().on_search(StubReply::json(
        200,
        json!({"found": true, "cazador": {"id": 5, "name": "Mara"}}),
    ));
    let h = Harness::new(mongo, postgres).await;

    let (status, body) = h.get("/cazadores/buscar?nombre=Mara").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"found": true, "total": 1, "cazadores": [{"id": 5, "name": "Mara"}]})
    );
    assert_eq!(h.postgres.requests()[0].nombre.as_deref(), Some("Mara"));
}

#[tokio::test]
async fn test_search_match_in_both_backends_is_deduplicated() {
    let mongo = StubService::new().on_search(StubReply::json(
        200,
        json!({"found": true, "cazador": {"id": 5, "name": "Mara"}}),
    ));
    let postgres = StubService::new().on_search(StubReply::json(
        200,
        json!({"found": true, "cazadores": [{"id": 5, "name": "Mara", "rango": "A"}]}),
    ));
    let h = Harness::new(mongo, postgres).await;

    let (_, body) = h.get("/cazadores/buscar?nombre=Mara").await;

    assert_eq!(body["total"], json!(1));
    assert_eq!(body["cazadores"], json!([{"id": 5, "name": "Mara", "rango": "A"}]));
}

#[tokio::test]
async fn test_search_no_match_reports_not_found() {
    let mongo = StubService::new().on_search(StubReply::json(200, json!({"found": false})));
    let postgres = StubService::new().on_search(StubReply::json(200, json!({"found": false})));
    let h = Harness::new(mongo, postgres).await;

    let (status, body) = h.get("/cazadores/buscar?nombre=Nadie").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"found": false, "message": "Cazador no encontrado en ninguno"})
    );
}

#[tokio::test]
async fn test_search_all_backends_failing_also_reports_not_found() {
    // Failure and absence are reported the same way on the search path
    let mongo = StubService::new().on_search(StubReply::text(500, "caido"));
    let postgres = StubService::new().on_search(StubReply::text(200, "no es json"));
    let h = Harness::new(mongo, postgres).await;

    let (status, body) = h.get("/cazadores/buscar?nombre=Mara").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["found"], json!(false));
}

// =============================================================================
// Writes
// =============================================================================

#[tokio::test]
async fn test_create_fans_out_body_and_reports_provenance() {
    let mongo = StubService::new().on_create(StubReply::json(201, json!({"_id": "abc", "name": "Gon"})));
    let postgres = StubService::new().on_create(StubReply::json(201, json!({"id": 7, "name": "Gon"})));
    let h = Harness::new(mongo, postgres).await;

    let body = json!({"name": "Gon", "nen": "potenciador"});
    let (status, response) = h.send(reqwest::Method::POST, "/cazadores", Some(body.clone())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        response,
        json!({
            "message": "Cazador creado en todos los servicios",
            "resultados": [
                {"servicio": "mongo", "cazador": {"_id": "abc", "name": "Gon"}},
                {"servicio": "postgres", "cazador": {"id": 7, "name": "Gon"}}
            ]
        })
    );
    assert_eq!(h.mongo.requests()[0].body, Some(body.clone()));
    assert_eq!(h.postgres.requests()[0].body, Some(body));
}

#[tokio::test]
async fn test_create_all_failing() {
    let mongo = StubService::new().on_create(StubReply::text(500, "caido"));
    let postgres = StubService::new().on_create(StubReply::text(503, "caido"));
    let h = Harness::new(mongo, postgres).await;

    let (status, body) = h
        .send(reqwest::Method::POST, "/cazadores", Some(json!({"name": "Gon"})))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_with_invalid_json_makes_no_calls() {
    let h = Harness::new(StubService::new(), StubService::new()).await;

    let response = h
        .gateway
        .http
        .post(h.url("/cazadores"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(h.mongo.call_count() + h.postgres.call_count(), 0);
}

#[tokio::test]
async fn test_update_partial_success() {
    let mongo = StubService::new()
        .on_update(StubReply::json(404, json!({"error": "Cazador no encontrado"})));
    let postgres = StubService::new().on_update(StubReply::json(200, json!({"id": 9, "name": "Kite"})));
    let h = Harness::new(mongo, postgres).await;

    let (status, body) = h
        .send(reqwest::Method::PUT, "/cazadores/9", Some(json!({"name": "Kite"})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Cazador actualizado en 1 de 2 servicios",
            "resultados": [{"servicio": "postgres", "cazador": {"id": 9, "name": "Kite"}}]
        })
    );
    assert_eq!(h.mongo.requests()[0].id.as_deref(), Some("9"));
}

#[tokio::test]
async fn test_update_missing_everywhere_is_not_found() {
    let h = Harness::new(StubService::new(), StubService::new()).await;

    let (status, body) = h
        .send(reqwest::Method::PUT, "/cazadores/9", Some(json!({"name": "Kite"})))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Cazador no encontrado en ningún servicio"}));
}

#[tokio::test]
async fn test_delete_reports_eliminados() {
    let mongo = StubService::new().on_delete(StubReply::json(200, json!({"id": 9})));
    let postgres = StubService::new().on_delete(StubReply::json(200, json!({"id": 9})));
    let h = Harness::new(mongo, postgres).await;

    let (status, body) = h.send(reqwest::Method::DELETE, "/cazadores/9", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Cazador eliminado en todos los servicios"));
    assert_eq!(body["eliminados"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_delete_both_failing_is_not_found() {
    let mongo = StubService::new().on_delete(StubReply::text(500, "caido"));
    let postgres = StubService::new()
        .on_delete(StubReply::json(200, json!({})).delayed(Duration::from_secs(2)));
    let h = Harness::new(mongo, postgres).await;

    let (status, body) = h.send(reqwest::Method::DELETE, "/cazadores/9", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

// =============================================================================
// Plumbing
// =============================================================================

#[tokio::test]
async fn test_health_and_servicios() {
    let h = Harness::new(StubService::new(), StubService::new()).await;

    let health = h.gateway.http.get(h.gateway.url("/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().await.unwrap(), "OK");

    let (status, body) = h.get("/servicios").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    assert_eq!(names, vec!["mongo", "postgres"]);
}

#[tokio::test]
async fn test_routes_live_under_prefix_only() {
    let mongo = StubService::new().on_list(StubReply::json(200, json!([])));
    let h = Harness::new(mongo, StubService::new()).await;

    let response = h.gateway.http.get(h.gateway.url("/cazadores")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(h.mongo.requests().iter().filter(|r| r.route == StubRoute::List).count(), 0);
}
