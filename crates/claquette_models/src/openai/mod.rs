//! OpenAI-compatible chat and image client.

mod client;
mod dto;

pub use client::OpenAiClient;
pub use dto::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ImageData, ImageRequest,
    ImageResponse,
};
