//! Output types from model responses.

use serde::{Deserialize, Serialize};

/// One output produced by a text model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Generated text
    Text(String),
    /// The model declined to answer
    Refusal(String),
}
