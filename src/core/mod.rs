//! Core library components.
//!
//! This module contains the resolution pipeline and the collaborators it
//! talks to: manifest reading, presence validation, secret resolution, type
//! coercion and publication.

pub mod coerce;
pub mod config;
pub mod constants;
pub mod env;
pub mod loader;
pub mod manifest;
pub mod presence;
pub mod publish;
pub mod resolve;
pub mod store;
pub mod validation;
