//! Router tests: the full pipeline against mocked ViaCEP and WeatherAPI.

use axum::http::{Request, StatusCode, header};
use cep_weather_core::{Config, TemperatureService, router};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(upstream: &MockServer, key: Option<&str>) -> Config {
    Config {
        weather_api_key: key.map(str::to_string),
        viacep_base_url: upstream.uri(),
        weatherapi_base_url: upstream.uri(),
        ..Config::default()
    }
}

async fn get(config: &Config, uri: &str) -> (StatusCode, Option<String>, String) {
    let app = router(TemperatureService::from_config(config).unwrap());
    let resp = app
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();

    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn mount_viacep(server: &MockServer, cep: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/ws/{cep}/json/")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolves_sao_paulo_end_to_end() {
    let upstream = MockServer::start().await;
    mount_viacep(&upstream, "01001000", serde_json::json!({"localidade": "São Paulo"})).await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", "KEY"))
        .and(query_param("q", "sao paulo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"current": {"temp_c": 22.5}})),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, content_type, body) = get(&config_for(&upstream, Some("KEY")), "/?cep=01001000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({"TempC": 22.5, "TempF": 72.5, "TempK": 295.5}));
}

#[tokio::test]
async fn malformed_cep_is_422() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;
    let config = config_for(&upstream, Some("KEY"));

    for uri in ["/", "/?cep=", "/?cep=123", "/?cep=123456789", "/?cep=0100100a", "/?cep=01001-00", "/?zip=01001000"] {
        let (status, _, body) = get(&config, uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(body, "invalid zipcode");
    }
}

#[tokio::test]
async fn repeated_cep_uses_first_value() {
    let upstream = MockServer::start().await;
    mount_viacep(&upstream, "01001000", serde_json::json!({"localidade": "São Paulo"})).await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("q", "sao paulo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"current": {"temp_c": 22.5}})),
        )
        .mount(&upstream)
        .await;
    let config = config_for(&upstream, Some("KEY"));

    for uri in ["/?cep=01001000&cep=x", "/?cep=01001000&cep=01001000"] {
        let (status, _, body) = get(&config, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json, serde_json::json!({"TempC": 22.5, "TempF": 72.5, "TempK": 295.5}));
    }

    let (status, _, _) = get(&config, "/?cep=x&cep=01001000").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn null_erro_flag_still_resolves() {
    let upstream = MockServer::start().await;
    mount_viacep(&upstream, "01001000", serde_json::json!({"localidade": "São Paulo", "erro": null})).await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"current": {"temp_c": 20.0}})),
        )
        .mount(&upstream)
        .await;

    let (status, _, body) = get(&config_for(&upstream, Some("KEY")), "/?cep=01001000").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, serde_json::json!({"TempC": 20.0, "TempF": 68.0, "TempK": 293.0}));
}

#[tokio::test]
async fn unknown_cep_is_404() {
    let upstream = MockServer::start().await;
    mount_viacep(&upstream, "99999999", serde_json::json!({"erro": "true"})).await;

    let (status, _, body) = get(&config_for(&upstream, Some("KEY")), "/?cep=99999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "can not find zipcode");
}

#[tokio::test]
async fn viacep_failure_is_500_without_leaking_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ws/01001000/json/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("viacep maintenance window"))
        .mount(&upstream)
        .await;

    let (status, content_type, body) = get(&config_for(&upstream, Some("KEY")), "/?cep=01001000").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "internal error");
    assert!(content_type.unwrap().starts_with("text/plain"));
}

#[tokio::test]
async fn weatherapi_error_is_500_without_leaking_message() {
    let upstream = MockServer::start().await;
    mount_viacep(&upstream, "01001000", serde_json::json!({"localidade": "São Paulo"})).await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {"code": 2008, "message": "API key has been disabled."}
        })))
        .mount(&upstream)
        .await;

    let (status, _, body) = get(&config_for(&upstream, Some("KEY")), "/?cep=01001000").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "internal error");
}

#[tokio::test]
async fn missing_api_key_is_500() {
    let upstream = MockServer::start().await;
    mount_viacep(&upstream, "01001000", serde_json::json!({"localidade": "São Paulo"})).await;

    let (status, _, body) = get(&config_for(&upstream, None), "/?cep=01001000").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "internal error");
}

#[tokio::test]
async fn unreachable_upstream_is_500() {
    let config = Config {
        weather_api_key: Some("KEY".to_string()),
        viacep_base_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };

    let (status, _, body) = get(&config, "/?cep=01001000").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "internal error");
}
