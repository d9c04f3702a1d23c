mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use common::{
    config_for, mount_llm_reply, tmdb_movie, tmdb_page, TMDB_KEY, UNREACHABLE_TMDB_URL,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use vibe_movies::{
    api::{create_router, AppState},
    Config, Recommender,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_app(server: &MockServer) -> Router {
    app_for(&config_for(server))
}

fn app_for(config: &Config) -> Router {
    let recommender = Recommender::from_config(config).unwrap();
    create_router(AppState::new(recommender))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    let app = create_test_app(&server);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommendations_endpoint() {
    let server = MockServer::start().await;
    mount_llm_reply(&server, r#"{"keywords": ["time loop"]}"#).await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tmdb_page(vec![
            tmdb_movie(137, "Groundhog Day", "1993-02-11"),
            tmdb_movie(137113, "Edge of Tomorrow", "2014-05-27"),
            tmdb_movie(13, "Palm Springs", "2020-07-10"),
        ])))
        .mount(&server)
        .await;

    let (status, body) = post_json(
        create_test_app(&server),
        "/api/v1/recommendations",
        json!({"vibe": "stuck in a rut but make it funny", "limit": 2}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vibe"], "stuck in a rut but make it funny");
    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0]["title"], "Groundhog Day");
    assert_eq!(movies[0]["release_date"], "1993-02-11");
    assert_eq!(body["criteria"]["keywords"][0], "time loop");
}

#[tokio::test]
async fn test_blank_vibe_is_bad_request() {
    let server = MockServer::start().await;

    let (status, body) = post_json(
        create_test_app(&server),
        "/api/v1/recommendations",
        json!({"vibe": "   "}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let (status, body) = post_json(
        create_test_app(&server),
        "/api/v1/recommendations",
        json!({"vibe": "cozy"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("overloaded"));
}

#[tokio::test]
async fn test_oversized_limit_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_json(
        create_test_app(&server),
        "/api/v1/recommendations",
        json!({"vibe": "clever heist", "limit": u64::MAX}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Limit"));
    server.verify().await;
}

#[tokio::test]
async fn test_transport_failure_is_bad_gateway_without_key() {
    let server = MockServer::start().await;
    mount_llm_reply(&server, r#"{"titles": ["Heat"]}"#).await;

    let mut config = config_for(&server);
    config.tmdb_api_url = UNREACHABLE_TMDB_URL.to_string();

    let (status, body) = post_json(
        app_for(&config),
        "/api/v1/recommendations",
        json!({"vibe": "slick crime"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body.to_string().contains(TMDB_KEY));
}

#[tokio::test]
async fn test_index_serves_form() {
    let server = MockServer::start().await;

    let response = create_test_app(&server)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let page = body_text(response).await;
    assert!(page.contains("<form method=\"post\" action=\"/\">"));
    assert!(page.contains("name=\"preferences\""));
}

#[tokio::test]
async fn test_form_post_renders_results_page() {
    let server = MockServer::start().await;
    mount_llm_reply(&server, r#"{"titles": ["Paddington 2"]}"#).await;

    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tmdb_page(vec![tmdb_movie(
            346648,
            "Paddington 2",
            "2017-11-09",
        )])))
        .mount(&server)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("preferences=wholesome+and+funny"))
        .unwrap();

    let response = create_test_app(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("wholesome and funny"));
    assert!(page.contains("<li><strong>Paddington 2</strong> (2017)"));
}
