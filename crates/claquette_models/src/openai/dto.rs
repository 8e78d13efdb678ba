//! OpenAI wire data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One chat message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    role: String,
    /// Message text
    content: String,
}

impl ChatMessage {
    /// Creates a new builder for `ChatMessage`.
    pub fn builder() -> ChatMessageBuilder {
        ChatMessageBuilder::default()
    }
}

/// Chat completion request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation
    messages: Vec<ChatMessage>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    /// Creates a new builder for `ChatCompletionRequest`.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// Assistant message inside a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Default)]
pub struct ChoiceMessage {
    /// Generated text, absent on refusal
    #[serde(default)]
    content: Option<String>,
    /// Refusal text
    #[serde(default)]
    refusal: Option<String>,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Choice {
    /// The assistant message
    #[serde(default)]
    message: ChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Error object some gateways embed in a 2xx body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ApiErrorBody {
    /// Error message
    #[serde(default)]
    message: String,
}

/// Chat completion response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    /// Completion choices
    #[serde(default)]
    choices: Vec<Choice>,
    /// Embedded error, if any
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

/// Image generation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImageRequest {
    /// Image model
    model: String,
    /// Prompt text
    prompt: String,
    /// Number of images
    #[builder(default = "1")]
    n: u32,
    /// Dimensions, e.g. "1024x1024"
    size: String,
    /// "b64_json" or "url"
    #[builder(default = "\"b64_json\".to_string()")]
    response_format: String,
}

impl ImageRequest {
    /// Creates a new builder for `ImageRequest`.
    pub fn builder() -> ImageRequestBuilder {
        ImageRequestBuilder::default()
    }
}

/// One generated image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Default)]
pub struct ImageData {
    /// Inline base64 payload
    #[serde(default)]
    b64_json: Option<String>,
    /// Remote location of the image
    #[serde(default)]
    url: Option<String>,
}

/// Image generation response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ImageResponse {
    /// Generated images
    #[serde(default)]
    data: Vec<ImageData>,
}
