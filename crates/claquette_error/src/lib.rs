//! Error types for the Claquette library.
//!
//! This crate provides the error taxonomy used throughout the Claquette workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Errors that abort a pipeline invocation (`InputError`, `EntitlementError`,
//! `ModelError`, `MalformedResponseError`, `ImageGenerationError`,
//! `StorageError`, `ConfigError`) convert into [`ClaquetteError`].
//! [`ExtractionError`] is item-scoped: the extractor logs it and skips the item.
//!
//! # Examples
//!
//! ```
//! use claquette_error::{ClaquetteResult, InputError};
//!
//! fn check_brief(description: &str) -> ClaquetteResult<()> {
//!     if description.trim().is_empty() {
//!         Err(InputError::new("Story description is empty"))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_brief("").is_err());
//! assert!(check_brief("A heist in orbit").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod entitlement;
mod error;
mod extraction;
mod image;
mod input;
mod malformed;
mod model;
mod storage;

pub use config::ConfigError;
pub use entitlement::{EntitlementError, EntitlementErrorKind};
pub use error::{ClaquetteError, ClaquetteErrorKind, ClaquetteResult};
pub use extraction::{ExtractionError, ExtractionErrorKind};
pub use image::{ImageGenerationError, ImageGenerationErrorKind};
pub use input::InputError;
pub use malformed::{MalformedResponseError, MalformedResponseKind};
pub use model::{ModelError, ModelErrorKind};
pub use storage::{StorageError, StorageErrorKind};
