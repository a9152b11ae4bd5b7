//! The Wooble component loader.
//!
//! This crate handles:
//! - Domain allow-list checks at construction
//! - Creation lookup in the registry
//! - Merging caller parameters over registry defaults
//! - Waiting on a shared shadow DOM polyfill load when needed
//! - Instantiating a creation once per matching node
//!
//! The page is reached through the [`Host`] trait and creations are built
//! through [`ComponentFactory`], so the loader runs the same in the browser
//! and under test.
//!
//! ## Example
//!
//! ```ignore
//! let registry = ComponentRegistry::builder()
//!     .with("slider", SliderFactory, Params::new().with("speed", 300))?
//!     .build();
//! let loader = Loader::new(registry, LoaderConfig::new().secure(["wooble.io"]), host);
//!
//! if let Ok(handle) = loader.construct("slider") {
//!     if let Ok(pending) = handle.init("#slider", Some(&Params::new().with("speed", 100))) {
//!         let sliders = pending.await?;
//!     }
//! }
//! ```

mod host;
mod loader;
mod polyfill;

pub use host::{ComponentFactory, FnFactory, Host, ScriptLoad};
pub use loader::{Handle, Loader, PendingInit};
pub use polyfill::{PolyfillGate, PolyfillReady};

pub use wooble_core::{ComponentRegistry, LoaderConfig, LoaderError, Params, RegistryBuilder};
