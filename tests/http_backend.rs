//! Integration tests for the HTTP backend client against a mock server

use garcom::config::BackendConfig;
use garcom::providers::{
    BackendClient, ChatMessage, DishCatalog, SuggestionProvider, SuggestionRequest,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BackendClient {
    BackendClient::new(BackendConfig {
        api_base: server.uri(),
        timeout_seconds: 5,
    })
    .expect("client builds")
}

fn request() -> SuggestionRequest {
    SuggestionRequest {
        restaurant_id: "r1".to_string(),
        messages: vec![ChatMessage::user(
            "entrada, entrada_porcoes, entrada_porcoes_fritas",
        )],
    }
}

#[tokio::test]
async fn generate_suggestion_parses_dish_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ai/suggestions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "text": "Que tal uma porção de fritas?",
            "dish": {
                "id": "42",
                "name": "Porção de fritas",
                "description": "Batata frita crocante"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.generate_suggestion(&request()).await.unwrap();

    assert_eq!(response.text, "Que tal uma porção de fritas?");
    assert_eq!(response.dish.unwrap().id, "42");
}

#[tokio::test]
async fn generate_suggestion_sends_expected_body() {
    let server = MockServer::start().await;
    let expected = serde_json::json!({
        "restaurantId": "r1",
        "messages": [
            {"role": "user", "content": "entrada, entrada_porcoes, entrada_porcoes_fritas"}
        ]
    });
    Mock::given(method("POST"))
        .and(path("/ai/suggestions"))
        .and(body_json(&expected))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "ok"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.generate_suggestion(&request()).await.unwrap();
}

#[tokio::test]
async fn generate_suggestion_maps_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ai/suggestions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.generate_suggestion(&request()).await.unwrap_err();
    let text = format!("{:#}", error);
    assert!(text.contains("500"), "unexpected error: {}", text);
}

#[tokio::test]
async fn generate_suggestion_connection_failure_mentions_network() {
    // Nothing listens on port 1; the connect error must surface as a
    // "network" failure so the session picks connectivity copy.
    let client = BackendClient::new(BackendConfig {
        api_base: "http://127.0.0.1:1".to_string(),
        timeout_seconds: 2,
    })
    .unwrap();

    let error = client.generate_suggestion(&request()).await.unwrap_err();
    let text = format!("{:#}", error);
    assert!(text.contains("network"), "unexpected error: {}", text);
}

#[tokio::test]
async fn dish_by_id_parses_full_dish() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dishes/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "42",
            "name": "Porção de fritas",
            "description": "Batata frita crocante",
            "price": 29.9,
            "restaurantId": "r1",
            "categories": ["entrada"]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let dish = client.dish_by_id("42").await.unwrap();
    assert_eq!(dish.name, "Porção de fritas");
    assert_eq!(dish.restaurant_id, "r1");
    assert!((dish.price - 29.9).abs() < 1e-9);
}

#[tokio::test]
async fn dish_by_id_not_found_is_catalog_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dishes/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client.dish_by_id("missing").await.unwrap_err();
    assert!(format!("{:#}", error).contains("404"));
}

#[tokio::test]
async fn dishes_for_restaurant_lists_menu() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/restaurants/r1/dishes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": "1",
                "name": "Feijoada",
                "description": "Completa",
                "price": 48.9,
                "restaurantId": "r1"
            },
            {
                "id": "2",
                "name": "Moqueca",
                "description": "De peixe",
                "price": 79.0,
                "restaurantId": "r1"
            }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let dishes = client.dishes_for_restaurant("r1").await.unwrap();
    assert_eq!(dishes.len(), 2);
    assert_eq!(dishes[1].name, "Moqueca");
}
