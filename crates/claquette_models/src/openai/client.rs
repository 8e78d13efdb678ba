use super::dto::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ImageRequest, ImageResponse,
};
use crate::{ClaquetteConfig, ProviderSettings};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use claquette_core::{GenerateRequest, GenerateResponse, Output};
use claquette_error::{
    ClaquetteError, ClaquetteResult, ImageGenerationError, ImageGenerationErrorKind, ModelError, ModelErrorKind,
};
use claquette_interface::{ClaquetteDriver, ImageGeneration};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// OpenAI-compatible API client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    settings: ProviderSettings,
}

impl OpenAiClient {
    /// Creates a new client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ModelErrorKind::ClientCreation`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, settings: ProviderSettings) -> Result<Self, ModelError> {
        debug!(base_url = %settings.base_url, model = %settings.chat_model, "Creating OpenAI client");
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build HTTP client");
                ModelError::new(ModelErrorKind::ClientCreation(e.to_string()))
            })?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            settings,
        })
    }

    /// Creates a client from loaded configuration, reading the API key from the environment.
    pub fn from_config(config: &ClaquetteConfig) -> Result<Self, ModelError> {
        let api_key = config.api_key()?;
        Self::new(api_key, config.provider.clone())
    }

    /// Provider settings in use.
    pub fn settings(&self) -> &ProviderSettings {
        &self.settings
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response, ModelError> {
        self.client
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, path, "Failed to send request to model provider");
                ModelError::new(ModelErrorKind::Transport(e.to_string()))
            })
    }

    async fn status_error(response: reqwest::Response) -> ModelError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "Model provider returned error");
        ModelError::new(ModelErrorKind::from_status(status.as_u16(), body))
    }

    fn convert_request(&self, request: &GenerateRequest) -> ClaquetteResult<ChatCompletionRequest> {
        let messages = request
            .messages
            .iter()
            .map(|msg| {
                ChatMessage::builder()
                    .role(msg.role.as_wire())
                    .content(msg.content.clone())
                    .build()
                    .map_err(|e| ModelError::new(ModelErrorKind::Envelope(e.to_string())))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.settings.chat_model.clone());
        let temperature = request.temperature.unwrap_or(self.settings.temperature);

        Ok(ChatCompletionRequest::builder()
            .model(model)
            .messages(messages)
            .temperature(Some(temperature))
            .max_tokens(request.max_tokens)
            .build()
            .map_err(|e| ModelError::new(ModelErrorKind::Envelope(e.to_string())))?)
    }

    fn convert_response(response: ChatCompletionResponse) -> Result<GenerateResponse, ModelError> {
        if let Some(err) = response.error() {
            error!(message = %err.message(), "Model provider embedded an error in the response");
            return Err(ModelError::new(ModelErrorKind::Api(err.message().clone())));
        }

        let choice = response.choices().first().ok_or_else(|| {
            ModelError::new(ModelErrorKind::Envelope("response has no choices".to_string()))
        })?;

        if let Some(reason) = choice.finish_reason() {
            if reason == "length" {
                warn!("Model output hit the token limit and may be truncated");
            }
        }

        let mut outputs = Vec::new();
        if let Some(text) = choice.message().content() {
            outputs.push(Output::Text(text.clone()));
        }
        if let Some(refusal) = choice.message().refusal() {
            outputs.push(Output::Refusal(refusal.clone()));
        }
        Ok(GenerateResponse { outputs })
    }

    async fn request_image(&self, body: &ImageRequest) -> ClaquetteResult<ImageResponse> {
        let mut response = self.post_json(&self.settings.image_path, body).await?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!(
                primary = %self.settings.image_path,
                fallback = %self.settings.image_fallback_path,
                "Primary image path not found, using fallback"
            );
            response = self
                .post_json(&self.settings.image_fallback_path, body)
                .await?;
        }

        if !response.status().is_success() {
            return Err(Self::status_error(response).await.into());
        }

        response.json::<ImageResponse>().await.map_err(|e| {
            error!(error = ?e, "Failed to parse image response");
            ClaquetteError::from(ImageGenerationError::new(ImageGenerationErrorKind::Provider(
                format!("Failed to parse response: {}", e),
            )))
        })
    }

    async fn download_base64(&self, url: &str) -> Result<String, ImageGenerationError> {
        let download_error = |message: String| {
            ImageGenerationError::new(ImageGenerationErrorKind::Download {
                url: url.to_string(),
                message,
            })
        };

        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = ?e, url, "Failed to download image");
            download_error(e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(download_error(format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| download_error(e.to_string()))?;
        if bytes.is_empty() {
            return Err(ImageGenerationError::new(
                ImageGenerationErrorKind::EmptyDownload(url.to_string()),
            ));
        }

        debug!(url, bytes = bytes.len(), "Downloaded image");
        Ok(STANDARD.encode(&bytes))
    }
}

#[async_trait::async_trait]
impl ClaquetteDriver for OpenAiClient {
    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.settings.chat_model
    }

    #[instrument(skip(self, request), fields(model = %self.settings.chat_model, messages = request.messages.len()))]
    async fn generate(&self, request: &GenerateRequest) -> ClaquetteResult<GenerateResponse> {
        let body = self.convert_request(request)?;
        debug!("Sending chat completion request");

        let response = self.post_json(&self.settings.chat_path, &body).await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await.into());
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat completion response");
            ModelError::new(ModelErrorKind::Envelope(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        Ok(Self::convert_response(parsed)?)
    }
}

#[async_trait::async_trait]
impl ImageGeneration for OpenAiClient {
    #[instrument(skip(self, prompt), fields(model = %self.settings.image_model, prompt_len = prompt.len()))]
    async fn generate_image(&self, prompt: &str) -> ClaquetteResult<String> {
        let body = ImageRequest::builder()
            .model(self.settings.image_model.clone())
            .prompt(prompt)
            .size(self.settings.image_size.clone())
            .build()
            .map_err(|e| ImageGenerationError::new(ImageGenerationErrorKind::Provider(e.to_string())))?;

        let response = self.request_image(&body).await?;
        let first = response
            .data()
            .first()
            .ok_or_else(|| ImageGenerationError::new(ImageGenerationErrorKind::NoData))?;

        if let Some(b64) = first.b64_json().as_deref().filter(|s| !s.is_empty()) {
            debug!(len = b64.len(), "Received inline image");
            return Ok(b64.to_string());
        }

        match first.url().as_deref().filter(|s| !s.is_empty()) {
            Some(url) => Ok(self.download_base64(url).await?),
            None => Err(ImageGenerationError::new(ImageGenerationErrorKind::NoPayload).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::dto::ImageData;

    #[test]
    fn test_refusal_becomes_refusal_output() {
        let parsed: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":null,"refusal":"I can't"},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        let response = OpenAiClient::convert_response(parsed).unwrap();
        assert_eq!(response.outputs, vec![Output::Refusal("I can't".into())]);
    }

    #[test]
    fn test_embedded_error_is_api_error() {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(r#"{"error":{"message":"model overloaded"}}"#).unwrap();
        let err = OpenAiClient::convert_response(parsed).unwrap_err();
        assert!(matches!(err.kind, ModelErrorKind::Api(ref m) if m == "model overloaded"));
    }

    #[test]
    fn test_no_choices_is_envelope_error() {
        let parsed: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let err = OpenAiClient::convert_response(parsed).unwrap_err();
        assert!(matches!(err.kind, ModelErrorKind::Envelope(_)));
    }

    #[test]
    fn test_image_request_defaults_to_inline_base64() {
        let body = ImageRequest::builder()
            .model("dall-e-3")
            .prompt("poster")
            .size("1024x1024")
            .build()
            .unwrap();
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"], "b64_json");
        assert_eq!(json["n"], 1);

        let empty = ImageData::default();
        assert!(empty.b64_json().is_none());
    }
}
