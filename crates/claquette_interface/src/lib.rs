//! Trait definitions for the Claquette screenplay pipeline.
//!
//! Providers implement [`ClaquetteDriver`] (text) and [`ImageGeneration`]
//! (posters). The persistence collaborator implements
//! [`ScreenplayRepository`], handing out one [`UnitOfWork`] per invocation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ClaquetteDriver, ImageGeneration, ScreenplayRepository, UnitOfWork};
