use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use outfit_core::{
    Config, ImageLookup, RecommendationRequest, RecommendationResponse, Translator,
    collect_images,
    service::{image_lookup_or_unconfigured, translator_from_config},
    transport::{
        ErrorBody, INVALID_JSON_MESSAGE, MISSING_TRANSLATE_FIELDS_MESSAGE, TranslateRequest,
        TranslateResponse,
    },
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Collaborators shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub images: Arc<dyn ImageLookup>,
    pub translator: Arc<dyn Translator>,
}

impl AppState {
    /// A missing image key is not fatal: pictures just come back empty.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            images: image_lookup_or_unconfigured(config),
            translator: translator_from_config(config)?,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/get_recommendations", post(get_recommendations))
        .route("/translate", post(translate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    tracing::info!("Listening on http://{addr}");
    println!("Serving recommendations on http://{addr}");

    axum::serve(listener, create_router(state)).await.context("Server error")?;

    Ok(())
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn get_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE);
    };

    let recommendation = match request.evaluate() {
        Ok(recommendation) => recommendation,
        Err(err) => {
            tracing::info!("Rejected recommendation request: {err}");
            return (StatusCode::BAD_REQUEST, Json(ErrorBody::for_request(&err))).into_response();
        }
    };

    let images = collect_images(state.images.as_ref(), &recommendation).await;
    Json(RecommendationResponse::from(recommendation).with_images(images)).into_response()
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE);
    };
    let Some((text, target_lang)) = request.fields() else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_TRANSLATE_FIELDS_MESSAGE);
    };

    match state.translator.translate(text, target_lang).await {
        Ok(translated) => Json(TranslateResponse { translated }).into_response(),
        Err(err) => {
            tracing::error!("Translation error: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("Translation failed: {err}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use outfit_core::ServiceError;
    use serde_json::{Value, json};
    use tower::ServiceExt; // for oneshot

    #[derive(Debug)]
    struct FakeImages {
        fail: bool,
    }

    #[async_trait]
    impl ImageLookup for FakeImages {
        async fn search(&self, query: &str) -> Result<Vec<String>, ServiceError> {
            if self.fail {
                return Err(ServiceError::MissingCredentials("pexels"));
            }
            Ok(vec![format!("https://img.test/{query}.jpg")])
        }
    }

    #[derive(Debug)]
    struct FakeTranslator;

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(&self, text: &str, target_lang: &str) -> Result<String, ServiceError> {
            if target_lang == "xx" {
                return Err(ServiceError::Decode { service: "fake", message: "unsupported".into() });
            }
            Ok(format!("[{target_lang}] {text}"))
        }
    }

    fn app(fail_images: bool) -> Router {
        create_router(AppState {
            images: Arc::new(FakeImages { fail: fail_images }),
            translator: Arc::new(FakeTranslator),
        })
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn recommendation_with_images() {
        let body = json!({ "temperature": 32, "humidity": 70, "uv_index": 8, "wind_speed": 10 });
        let (status, json) = post_json(app(false), "/get_recommendations", &body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["category"], "Very Hot");
        assert_eq!(json["clothing_score"], 1);
        assert_eq!(json["images"]["Tank top / Vest"], json!(["https://img.test/Tank top.jpg"]));
        assert_eq!(
            json["images"]["Consider Sunscreen"],
            json!(["https://img.test/Consider Sunscreen.jpg"])
        );
    }

    #[tokio::test]
    async fn image_failures_do_not_fail_the_request() {
        let body = json!({ "temperature": 2, "humidity": 80, "uv_index": 1, "wind_speed": 60 });
        let (status, json) = post_json(app(true), "/get_recommendations", &body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["category"], "Freezing");
        assert_eq!(json["images"]["Secure hat if worn"], json!([]));
        assert_eq!(json["images"]["Windproof outer layer recommended"], json!([]));
    }

    #[tokio::test]
    async fn missing_field_is_a_bad_request() {
        let body = json!({ "temperature": 20, "humidity": 50, "uv_index": 1 });
        let (status, json) = post_json(app(false), "/get_recommendations", &body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing weather data fields");
    }

    #[tokio::test]
    async fn out_of_range_input_is_a_bad_request() {
        let body = json!({ "temperature": 20, "humidity": 150, "uv_index": 1, "wind_speed": 3 });
        let (status, json) = post_json(app(false), "/get_recommendations", &body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid input for recommendations");
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_json() {
        let (status, json) = post_json(app(false), "/get_recommendations", "{oops").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid JSON data");
    }

    #[tokio::test]
    async fn translate_round_trip() {
        let body = json!({ "text": "Warm Coat", "target_lang": "de" });
        let (status, json) = post_json(app(false), "/translate", &body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["translated"], "[de] Warm Coat");
    }

    #[tokio::test]
    async fn translate_requires_text_and_language() {
        let body = json!({ "text": "Warm Coat" });
        let (status, json) = post_json(app(false), "/translate", &body.to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing text or target_lang");
    }

    #[tokio::test]
    async fn translation_failure_is_a_server_error() {
        let body = json!({ "text": "Warm Coat", "target_lang": "xx" });
        let (status, json) = post_json(app(false), "/translate", &body.to_string()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let message = json["error"].as_str().unwrap();
        assert!(message.starts_with("Translation failed: "));
        assert!(message.contains("unsupported"));
    }

    #[tokio::test]
    async fn index_serves_the_page() {
        let response = app(false)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("/get_recommendations"));
    }
}
