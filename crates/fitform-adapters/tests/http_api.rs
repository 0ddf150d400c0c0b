//! HTTP adapter tests against a mock backend.

use std::time::Duration;

use fitform_adapters::{HttpApi, HttpApiConfig};
use fitform_core::application::ports::{ApiError, FitnessApi};
use fitform_core::domain::{BiometricsUpdate, LoginPayload, ProgressPeriod};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpApi {
    HttpApi::new(&HttpApiConfig {
        base_url: format!("{}/", server.uri()),
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn login_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "ana@example.com", "password": "supersecret" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "jwt-123", "token_type": "bearer" })),
        )
        .mount(&server)
        .await;

    let token = api_for(&server)
        .login(&LoginPayload {
            email: "ana@example.com".into(),
            password: "supersecret".into(),
        })
        .await
        .unwrap();
    assert_eq!(token.access_token, "jwt-123");
}

#[tokio::test]
async fn bad_credentials_keep_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Incorrect email or password" })),
        )
        .mount(&server)
        .await;

    let err = api_for(&server)
        .login(&LoginPayload {
            email: "ana@example.com".into(),
            password: "wrong-password".into(),
        })
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.detail(), Some("Incorrect email or password"));
}

#[tokio::test]
async fn current_user_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer jwt-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "email": "ana@example.com", "first_name": "Ana", "last_name": "Ruiz",
            "weight": 61.5, "objective": "fat_loss", "aggressiveness_level": 2
        })))
        .mount(&server)
        .await;

    let me = api_for(&server).current_user("jwt-123").await.unwrap();
    assert_eq!(me.id, 7);
    assert_eq!(me.weight, Some(61.5));
}

#[tokio::test]
async fn biometric_only_update_uses_biometrics_endpoint() {
    let server = MockServer::start().await;
    let profile = json!({ "id": 7, "email": "a@b.co", "first_name": "Ana", "last_name": "Ruiz" });
    Mock::given(method("PUT"))
        .and(path("/users/me/biometrics"))
        .and(body_json(json!({ "weight": 60.2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/users/me"))
        .and(body_json(json!({ "first_name": "Anabel" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let weight_only = BiometricsUpdate {
        weight: Some(60.2),
        ..Default::default()
    };
    api.update_biometrics("jwt", &weight_only).await.unwrap();

    let rename = BiometricsUpdate {
        first_name: Some("Anabel".into()),
        ..Default::default()
    };
    api.update_biometrics("jwt", &rename).await.unwrap();
}

#[tokio::test]
async fn food_errors_use_the_error_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/food/parse-and-calculate"))
        .and(body_json(json!({ "text": "me duele la cabeza" })))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "error": "invalid_domain" })))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .parse_meal("me duele la cabeza")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.detail(), Some("invalid_domain"));
}

#[tokio::test]
async fn timeline_passes_period_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me/progress/timeline"))
        .and(query_param("periodo", "semana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "periodo": "semana",
            "rango_inicio": "2026-02-23",
            "rango_fin": "2026-03-01",
            "series": { "peso": [{ "fecha": "2026-03-01T08:30:00+00:00", "valor": 80.4 }] },
            "resumen": { "calorias_semana_real": 0.0, "calorias_semana_meta": 14000.0 },
            "advertencias": ["No hay consumo calórico diario registrado en el periodo seleccionado."]
        })))
        .mount(&server)
        .await;

    let timeline = api_for(&server)
        .progress_timeline("jwt", ProgressPeriod::Week)
        .await
        .unwrap();
    assert_eq!(timeline.series.peso.len(), 1);
    assert!(timeline.series.calorias_diarias.is_empty());
    assert_eq!(timeline.advertencias.len(), 1);
}

#[tokio::test]
async fn evaluate_posts_period_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/me/progress/evaluate"))
        .and(body_json(json!({ "periodo": "anio" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "periodo": "anio", "score": -12.0, "estado": "Desviación del objetivo",
            "resumen": "…", "metricas": { "deltaPeso": 2.0, "deltaGrasa": 1.5, "deltaMagra": -1.5 },
            "advertencias": []
        })))
        .mount(&server)
        .await;

    let eval = api_for(&server)
        .evaluate_progress("jwt", ProgressPeriod::Year)
        .await
        .unwrap();
    assert_eq!(eval.metricas.delta_fat, Some(1.5));
}

#[tokio::test]
async fn server_errors_are_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me/skinfolds"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = api_for(&server).skinfold_history("jwt").await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.detail(), None);
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).current_user("jwt").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}
