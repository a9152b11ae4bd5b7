//! Decoding of the JavaScript-side registry, configuration and parameters.
//!
//! Parameter values stay live JS values: functions, nodes, `undefined` and
//! nested objects reach constructors exactly as the page wrote them.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wooble_core::{ComponentRegistry, LoaderConfig, Params};

use crate::factory::JsFactory;

/// Registry of JS-backed creations with JS parameter values.
pub type JsRegistry = ComponentRegistry<JsFactory, JsValue>;

/// Build a registry from `{ id: { factory, defaults }, ... }`.
pub fn registry_from_js(value: JsValue) -> Result<JsRegistry, JsError> {
    if !value.is_object() {
        return Err(JsError::new("Invalid registry: expected an object"));
    }

    let mut builder = ComponentRegistry::builder();
    for (id, creation) in own_entries(&value) {
        let factory = Reflect::get(&creation, &JsValue::from_str("factory"))
            .ok()
            .and_then(|factory| factory.dyn_into::<Function>().ok())
            .ok_or_else(|| {
                JsError::new(&format!("Invalid registry: creation {} has no factory", id))
            })?;
        let defaults = Reflect::get(&creation, &JsValue::from_str("defaults"))
            .ok()
            .and_then(|defaults| params_from_js(&defaults))
            .unwrap_or_default();

        builder
            .register(id, JsFactory::new(factory), defaults)
            .map_err(|e| JsError::new(&format!("Invalid registry: {}", e)))?;
    }
    Ok(builder.build())
}

/// Loader configuration; `undefined` or `null` gives the defaults.
pub fn config_from_js(value: JsValue) -> Result<LoaderConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(LoaderConfig::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid loader config: {}", e)))
}

/// Caller overrides for `init`; `undefined` or `null` means none.
///
/// Any other value contributes its own enumerable properties, so a
/// primitive simply overrides nothing.
pub fn params_from_js(value: &JsValue) -> Option<Params<JsValue>> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(own_entries(value).into_iter().collect())
}

/// `Object.entries(value)`, keeping the string keys.
fn own_entries(value: &JsValue) -> Vec<(String, JsValue)> {
    Object::entries(value.unchecked_ref::<Object>())
        .iter()
        .filter_map(|entry| {
            let pair = entry.unchecked_into::<Array>();
            pair.get(0).as_string().map(|key| (key, pair.get(1)))
        })
        .collect()
}
