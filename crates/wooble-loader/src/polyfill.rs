//! Shared shadow DOM polyfill loading.

use std::cell::RefCell;
use std::collections::HashMap;

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use wooble_core::LoaderError;

use crate::host::Host;

/// Resolves once the polyfill script has loaded, or failed to.
pub type PolyfillReady = Shared<LocalBoxFuture<'static, Result<(), LoaderError>>>;

/// One-time polyfill load per script URL.
///
/// Every `init` that needs the polyfill while a load is pending or done
/// waits on the same load, so the page gets a single script tag. A load that
/// failed is forgotten and the next caller starts a new one.
#[derive(Default)]
pub struct PolyfillGate {
    loads: RefCell<HashMap<String, PolyfillReady>>,
}

impl PolyfillGate {
    /// Create a gate with no loads started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the load for `url`, starting it through `host` if needed.
    pub fn ready<H: Host + ?Sized>(&self, host: &H, url: &str) -> PolyfillReady {
        let mut loads = self.loads.borrow_mut();

        if let Some(load) = loads.get(url) {
            match load.peek() {
                Some(Err(_)) => tracing::debug!(url, "previous polyfill load failed, retrying"),
                Some(Ok(())) => return load.clone(),
                None => {
                    tracing::debug!(url, "joining pending polyfill load");
                    return load.clone();
                }
            }
        }

        tracing::debug!(url, "loading shadow DOM polyfill");
        let script = host.load_script(url);
        let owned_url = url.to_string();
        let load = async move {
            script.await.map_err(|reason| {
                tracing::warn!(url = %owned_url, %reason, "polyfill failed to load");
                LoaderError::PolyfillLoadFailed {
                    url: owned_url,
                    reason,
                }
            })
        }
        .boxed_local()
        .shared();

        loads.insert(url.to_string(), load.clone());
        load
    }

    /// Whether a load for `url` has completed successfully.
    pub fn is_loaded(&self, url: &str) -> bool {
        matches!(
            self.loads.borrow().get(url).and_then(|load| load.peek()),
            Some(Ok(()))
        )
    }
}
