//! Test utilities for screenplay pipeline tests.
//!
//! A scripted driver that replays canned model responses in order and
//! records every request it receives, plus JSON fixtures for each stage.

#![allow(dead_code)]

use async_trait::async_trait;
use claquette_core::{GenerateRequest, GenerateResponse, Output};
use claquette_error::{
    ClaquetteResult, ImageGenerationError, ImageGenerationErrorKind, ModelError, ModelErrorKind,
};
use claquette_interface::{ClaquetteDriver, ImageGeneration};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Names handed out by [`characters_json`], in order.
pub const CAST: [&str; 10] = [
    "Mara Voss", "Rook", "Ines Calder", "Teodor Hale", "Juno", "Aziz Rahman", "Bea Lindqvist",
    "Colm", "Priya Desai", "Old Samuel",
];

/// Replays scripted text responses and records requests.
#[derive(Clone, Default)]
pub struct MockDriver {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    image: Option<String>,
}

impl MockDriver {
    /// Driver that answers with `responses` in order.
    pub fn scripted<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().map(Into::into).collect())),
            ..Self::default()
        }
    }

    /// Also answer image requests with `image`.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// The user prompt of request `n`.
    pub fn prompt(&self, n: usize) -> String {
        self.requests()[n]
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ClaquetteDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> ClaquetteResult<GenerateResponse> {
        self.requests.lock().expect("requests lock").push(req.clone());
        let next = self.responses.lock().expect("responses lock").pop_front();
        match next {
            Some(text) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text)],
            }),
            None => Err(ModelError::new(ModelErrorKind::Api("script exhausted".to_string())).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[async_trait]
impl ImageGeneration for MockDriver {
    async fn generate_image(&self, _prompt: &str) -> ClaquetteResult<String> {
        self.image
            .clone()
            .ok_or_else(|| ImageGenerationError::new(ImageGenerationErrorKind::NoData).into())
    }
}

/// Character stage response with the first `count` names of [`CAST`].
pub fn characters_json(count: usize) -> String {
    let characters: Vec<_> = CAST
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, name)| {
            json!({
                "name": name,
                "age": 20 + i * 5,
                "role": if i == 0 { "Lead" } else { "Supporting" },
                "traits": ["stubborn", "funny"],
                "backstory": format!("{} grew up by the harbour", name),
                "goal": "Get out",
                "arc": "Learns to stay",
            })
        })
        .collect();
    json!({ "assumptions": ["Set in the present day"], "characters": characters }).to_string()
}

/// Episode stage response whose scenes use `speakers`.
pub fn episode_json(index: u32, speakers: &[&str]) -> String {
    json!({
        "episode": {
            "episode_number": index,
            "title": format!("Chapter {}", index),
            "summary": format!("Things escalate in chapter {}", index),
            "duration_minutes": "42 min",
            "scenes": [
                {
                    "scene_number": 1,
                    "slug": "INT. HARBOUR OFFICE - NIGHT",
                    "action": "Rain hammers the glass.",
                    "dialogue": speakers
                        .iter()
                        .map(|s| json!({"character": s, "line": "We need to talk."}))
                        .collect::<Vec<_>>(),
                    "sound": "Rain",
                },
                {
                    "scene_number": 2,
                    "slug": "EXT. PIER - DAWN",
                    "action": "Gulls.",
                }
            ]
        }
    })
    .to_string()
}

/// Film stage response whose single scene uses `speakers`.
pub fn film_json(speakers: &[&str]) -> String {
    json!({
        "film": {
            "title": "Low Tide",
            "summary": "A harbour town hides a secret.",
            "duration_minutes": 104,
            "scenes": [{
                "slug": "EXT. HARBOUR - DAY",
                "action": "Boats knock together.",
                "dialogue": speakers
                    .iter()
                    .map(|s| json!({"character": s, "line": "Tide's turning."}))
                    .collect::<Vec<_>>(),
            }]
        }
    })
    .to_string()
}

/// Casting stage response: two suggestions per name.
pub fn casting_json(names: &[&str]) -> String {
    let casting: Vec<_> = names
        .iter()
        .map(|name| {
            json!({
                "character": name,
                "suggestions": [
                    {"actor": "Jane Roe", "age": 35, "match_percent": "85%", "why": "Range", "profile": "Stage actor"},
                    {"actor": "Ana Lima", "age": 41, "match_percent": 70}
                ]
            })
        })
        .collect();
    json!({ "casting": casting }).to_string()
}
