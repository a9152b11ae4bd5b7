//! Core types for the Wooble component loader.
//!
//! This crate provides the host-independent pieces used by the loader and
//! its browser bindings:
//! - Component parameters and the default/override merge
//! - The component registry and its builder
//! - The domain allow-list
//! - Loader configuration
//! - Error types

pub mod config;
pub mod domain;
pub mod errors;
pub mod params;
pub mod registry;

pub use config::*;
pub use domain::*;
pub use errors::*;
pub use params::*;
pub use registry::*;
