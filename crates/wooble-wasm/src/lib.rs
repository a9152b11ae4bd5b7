//! WebAssembly bindings for the Wooble component loader.
//!
//! This crate provides the JavaScript API used by pages that embed
//! creations.
//!
//! ## Example
//!
//! ```js
//! import { WoobleLoader } from 'wooble';
//!
//! class Slider {
//!   constructor(node, params) {
//!     this.document = node.attachShadow({ mode: 'open' });
//!     this.speed = params.speed;
//!   }
//! }
//!
//! const loader = new WoobleLoader(
//!   { slider: { factory: Slider, defaults: { speed: 300 } } },
//!   { allowedDomains: ['wooble.io'] },
//! );
//!
//! // `undefined` when the host is not allowed or the id is unknown.
//! const slider = loader.create('slider');
//!
//! // `undefined` when nothing matches; otherwise a Promise of instances.
//! const pending = slider && slider.init('.slider', { speed: 100 });
//! const sliders = pending ? await pending : [];
//! ```

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wooble_loader::{Handle, Loader, PolyfillGate};

mod dom;
mod factory;
mod types;

pub use dom::BrowserHost;
pub use factory::{params_to_js, JsFactory};
pub use types::*;

thread_local! {
    /// One polyfill load for the whole page, whichever loader asks first.
    static POLYFILL: Rc<PolyfillGate> = Rc::new(PolyfillGate::new());
}

/// Initialize panic hook and tracing output for the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(debug_assertions)]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }
}

/// Creates handles for the creations in a registry.
#[wasm_bindgen]
pub struct WoobleLoader {
    inner: Loader<BrowserHost, JsFactory>,
}

#[wasm_bindgen]
impl WoobleLoader {
    /// Create a loader from a registry object and an optional config object.
    #[wasm_bindgen(constructor)]
    pub fn new(registry: JsValue, config: JsValue) -> Result<WoobleLoader, JsError> {
        let registry = registry_from_js(registry)?;
        let config = config_from_js(config)?;
        let host = BrowserHost::new()?;

        let inner = Loader::new(registry, config, host)
            .with_polyfill_gate(POLYFILL.with(Rc::clone));
        Ok(WoobleLoader { inner })
    }

    /// Create a handle for a creation.
    ///
    /// Returns `undefined` when this page's host is not allowed or `id` is not
    /// registered; the reason is written to the console.
    pub fn create(&self, id: &str) -> Option<WoobleHandle> {
        self.inner.construct(id).ok().map(|inner| WoobleHandle { inner })
    }

    /// Check if a creation is registered.
    #[wasm_bindgen(js_name = hasCreation)]
    pub fn has_creation(&self, id: &str) -> bool {
        self.inner.registry().contains(id)
    }

    /// Get the registered creation ids.
    #[wasm_bindgen(js_name = getCreationIds)]
    pub fn creation_ids(&self) -> Vec<String> {
        self.inner.registry().ids().map(|s| s.to_string()).collect()
    }
}

/// A creation ready to be bound to page elements.
#[wasm_bindgen]
pub struct WoobleHandle {
    inner: Handle<BrowserHost, JsFactory>,
}

#[wasm_bindgen]
impl WoobleHandle {
    /// The creation id this handle was created for.
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.inner.id().to_string()
    }

    /// Instantiate the creation on every element matching `selector`.
    ///
    /// Returns `undefined` when nothing matches. Otherwise returns a Promise
    /// of the instances in document order; every instance gets the same
    /// params object. The Promise rejects if the shadow DOM polyfill fails to
    /// load or a constructor throws. Never throws.
    pub fn init(&self, selector: JsValue, params: JsValue) -> JsValue {
        let Some(selector) = selector.as_string() else {
            tracing::warn!(id = self.inner.id(), "init called without a selector string");
            return JsValue::UNDEFINED;
        };
        let overrides = params_from_js(&params);

        let pending = match self.inner.init(&selector, overrides.as_ref()) {
            Ok(pending) => pending,
            Err(_) => return JsValue::UNDEFINED,
        };

        let promise = wasm_bindgen_futures::future_to_promise(async move {
            let instances = pending
                .await
                .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
            Ok(instances.into_iter().collect::<js_sys::Array>().into())
        });
        promise.into()
    }
}

/// Create a handle in one call, without keeping the loader around.
///
/// Behaves exactly like `new WoobleLoader(registry, config).create(id)`.
#[wasm_bindgen]
pub fn wooble(
    registry: JsValue,
    config: JsValue,
    id: &str,
) -> Result<Option<WoobleHandle>, JsError> {
    Ok(WoobleLoader::new(registry, config)?.create(id))
}

/// Get the loader version.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
