//! Request and response types for text generation.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// A completion request.
///
/// # Examples
///
/// ```
/// use claquette_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest {
///     messages: vec![Message::system("JSON only"), Message::user("Hello!")],
///     max_tokens: None,
///     temperature: Some(0.7),
///     model: Some("gpt-4.1-mini".to_string()),
/// };
///
/// assert_eq!(request.messages.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Model identifier override
    pub model: Option<String>,
}

/// The outputs of a completion.
///
/// # Examples
///
/// ```
/// use claquette_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("{\"a\":".into()), Output::Text("1}".into())],
/// };
/// assert_eq!(response.text(), "{\"a\":1}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Concatenated text outputs; refusals are ignored.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                Output::Refusal(_) => None,
            })
            .collect()
    }

    /// First refusal message, if the model declined.
    pub fn refusal(&self) -> Option<&str> {
        self.outputs.iter().find_map(|output| match output {
            Output::Refusal(reason) => Some(reason.as_str()),
            Output::Text(_) => None,
        })
    }
}
