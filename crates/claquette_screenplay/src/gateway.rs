//! The boundary to the external model.

use crate::prompt::SYSTEM_DIRECTIVE;
use crate::sanitize::sanitize;
use claquette_core::{GenerateRequest, Message};
use claquette_error::{ClaquetteResult, MalformedResponseError, MalformedResponseKind};
use claquette_interface::{ClaquetteDriver, ImageGeneration};
use tracing::{debug, error, instrument};

/// Calls the model and repairs its output into a parseable JSON object.
///
/// Text calls go through any [`ClaquetteDriver`]; poster calls additionally
/// need the driver to implement [`ImageGeneration`].
#[derive(Debug, Clone)]
pub struct ModelGateway<D> {
    driver: D,
    temperature: Option<f32>,
}

impl<D> ModelGateway<D> {
    /// Wrap a driver; requests use the driver's default temperature.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            temperature: None,
        }
    }

    /// Send this temperature with every text request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// The wrapped driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

impl<D: ClaquetteDriver> ModelGateway<D> {
    /// Send `prompt` and return sanitized JSON text.
    ///
    /// # Errors
    ///
    /// - `ModelError` for transport, auth or rate-limit failures
    /// - `MalformedResponseError` for empty content, a refusal, or text that
    ///   stays unparsable after repair
    #[instrument(skip(self, prompt), fields(provider = self.driver.provider_name(), model = self.driver.model_name(), prompt_len = prompt.len()))]
    pub async fn complete_text(&self, prompt: &str) -> ClaquetteResult<String> {
        let request = GenerateRequest {
            messages: vec![Message::system(SYSTEM_DIRECTIVE), Message::user(prompt)],
            max_tokens: None,
            temperature: self.temperature,
            model: None,
        };

        let response = self.driver.generate(&request).await?;
        let text = response.text();

        if text.trim().is_empty() {
            if let Some(reason) = response.refusal() {
                error!(reason, "Model refused the request");
            } else {
                error!("Model returned no content");
            }
            return Err(
                MalformedResponseError::new(MalformedResponseKind::Empty, &text).into(),
            );
        }

        debug!(length = text.len(), "Received model response");
        let json = sanitize(&text)?;
        debug!(length = json.len(), "Sanitized model response");
        Ok(json)
    }
}

impl<D: ImageGeneration> ModelGateway<D> {
    /// Generate one image and return it base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns `ImageGenerationError` when the provider returns neither inline
    /// data nor a usable URL, or `ModelError` on transport failure.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate_image(&self, prompt: &str) -> ClaquetteResult<String> {
        let image = self.driver.generate_image(prompt).await?;
        debug!(length = image.len(), "Received image");
        Ok(image)
    }
}
