//! Model provider integration for Claquette.
//!
//! [`OpenAiClient`] speaks the chat-completion and image endpoints of an
//! OpenAI-compatible API and implements both
//! [`ClaquetteDriver`](claquette_interface::ClaquetteDriver) and
//! [`ImageGeneration`](claquette_interface::ImageGeneration).
//! [`ClaquetteConfig`] loads provider and logging settings from layered TOML.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod openai;

pub use config::{ClaquetteConfig, LoggingSettings, ProviderSettings};
pub use openai::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ImageData, ImageRequest,
    ImageResponse, OpenAiClient,
};
