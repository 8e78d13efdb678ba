//! OpenAiClient against a local axum stub of the provider.

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use claquette_core::{GenerateRequest, Message, Output};
use claquette_error::{ClaquetteErrorKind, ImageGenerationErrorKind, ModelErrorKind};
use claquette_interface::{ClaquetteDriver, ImageGeneration};
use claquette_models::{OpenAiClient, ProviderSettings};
use serde_json::json;

const POSTER_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a];

async fn spawn_stub(build: impl FnOnce(String) -> Router) -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let base = format!("http://{}", listener.local_addr()?);
    let app = build(base.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(base)
}

fn settings(base_url: &str) -> ProviderSettings {
    ProviderSettings {
        name: "openai".to_string(),
        base_url: base_url.to_string(),
        chat_path: "/v1/chat/completions".to_string(),
        image_path: "/v1/images".to_string(),
        image_fallback_path: "/v1/images/generations".to_string(),
        chat_model: "gpt-4.1-mini".to_string(),
        image_model: "dall-e-3".to_string(),
        image_size: "1024x1024".to_string(),
        temperature: 0.7,
        timeout_secs: 5,
        api_key_env: "OPENAI_API_KEY".to_string(),
    }
}

fn request() -> GenerateRequest {
    GenerateRequest {
        messages: vec![Message::system("JSON only"), Message::user("Characters please")],
        ..Default::default()
    }
}

async fn chat(headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer test-key");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "bad key").into_response();
    }
    Json(json!({
        "choices": [{
            "message": {"content": "```json\n{\"characters\": []}\n```"},
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}

#[tokio::test]
async fn test_generate_returns_raw_text() -> anyhow::Result<()> {
    let base = spawn_stub(|_| Router::new().route("/v1/chat/completions", post(chat))).await?;
    let client = OpenAiClient::new("test-key", settings(&base))?;

    let response = client.generate(&request()).await?;

    assert_eq!(
        response.outputs,
        vec![Output::Text("```json\n{\"characters\": []}\n```".to_string())]
    );
    assert_eq!(client.provider_name(), "openai");
    assert_eq!(client.model_name(), "gpt-4.1-mini");
    Ok(())
}

#[tokio::test]
async fn test_wrong_key_is_unauthorized() -> anyhow::Result<()> {
    let base = spawn_stub(|_| Router::new().route("/v1/chat/completions", post(chat))).await?;
    let client = OpenAiClient::new("wrong-key", settings(&base))?;

    let err = client.generate(&request()).await.unwrap_err();

    match err.kind() {
        ClaquetteErrorKind::Model(model) => assert!(matches!(
            model.kind,
            ModelErrorKind::Unauthorized {
                status_code: 401,
                ..
            }
        )),
        other => panic!("expected model error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_throttled_request_is_rate_limited() -> anyhow::Result<()> {
    let base = spawn_stub(|_| {
        Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        )
    })
    .await?;
    let client = OpenAiClient::new("test-key", settings(&base))?;

    let err = client.generate(&request()).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        ClaquetteErrorKind::Model(m) if matches!(m.kind, ModelErrorKind::RateLimited(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_image_inline_base64_from_primary_path() -> anyhow::Result<()> {
    let base = spawn_stub(|_| {
        Router::new().route(
            "/v1/images",
            post(|| async { Json(json!({"data": [{"b64_json": "aW1hZ2U="}]})) }),
        )
    })
    .await?;
    let client = OpenAiClient::new("test-key", settings(&base))?;

    let image = client.generate_image("A neon vault door").await?;

    assert_eq!(image, "aW1hZ2U=");
    Ok(())
}

#[tokio::test]
async fn test_image_falls_back_and_downloads_url() -> anyhow::Result<()> {
    // No route for /v1/images, so the stub answers 404 there.
    let base = spawn_stub(|base| {
        let url = format!("{}/files/poster.png", base);
        Router::new()
            .route(
                "/v1/images/generations",
                post(move || {
                    let url = url.clone();
                    async move { Json(json!({"data": [{"url": url}]})) }
                }),
            )
            .route("/files/poster.png", get(|| async { POSTER_BYTES.to_vec() }))
    })
    .await?;
    let client = OpenAiClient::new("test-key", settings(&base))?;

    let image = client.generate_image("A neon vault door").await?;

    assert_eq!(STANDARD.decode(image)?, POSTER_BYTES);
    Ok(())
}

#[tokio::test]
async fn test_image_empty_download_fails() -> anyhow::Result<()> {
    let base = spawn_stub(|base| {
        let url = format!("{}/files/empty.png", base);
        Router::new()
            .route(
                "/v1/images",
                post(move || {
                    let url = url.clone();
                    async move { Json(json!({"data": [{"url": url}]})) }
                }),
            )
            .route("/files/empty.png", get(|| async { Vec::<u8>::new() }))
    })
    .await?;
    let client = OpenAiClient::new("test-key", settings(&base))?;

    let err = client.generate_image("poster").await.unwrap_err();

    assert!(matches!(
        err.kind(),
        ClaquetteErrorKind::ImageGeneration(e)
            if matches!(e.kind, ImageGenerationErrorKind::EmptyDownload(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_image_without_payload_fails() -> anyhow::Result<()> {
    let base = spawn_stub(|_| {
        Router::new().route(
            "/v1/images",
            post(|| async { Json(json!({"data": [{"revised_prompt": "x"}]})) }),
        )
    })
    .await?;
    let client = OpenAiClient::new("test-key", settings(&base))?;

    let err = client.generate_image("poster").await.unwrap_err();

    assert!(matches!(
        err.kind(),
        ClaquetteErrorKind::ImageGeneration(e)
            if matches!(e.kind, ImageGenerationErrorKind::NoPayload)
    ));
    Ok(())
}
