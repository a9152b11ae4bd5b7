//! Creations backed by JavaScript classes.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::Element;
use wooble_core::Params;
use wooble_loader::ComponentFactory;

use crate::dom::describe;

/// Calls `new Class(node, params)` for each matched element.
///
/// Every instance from one `init` call receives the same params object.
pub struct JsFactory {
    constructor: Function,
}

impl JsFactory {
    pub fn new(constructor: Function) -> Self {
        Self { constructor }
    }
}

impl ComponentFactory<Element> for JsFactory {
    type Value = JsValue;
    type Args = JsValue;
    type Instance = JsValue;

    fn prepare(&self, params: Params<JsValue>) -> Result<JsValue, String> {
        params_to_js(&params).map_err(|e| describe(&e))
    }

    fn create(&self, node: Element, params: &JsValue) -> Result<JsValue, String> {
        let args = Array::of2(&node, params);
        Reflect::construct(&self.constructor, &args).map_err(|e| describe(&e))
    }
}

/// Parameters as a plain JS object, values passed through untouched.
pub fn params_to_js(params: &Params<JsValue>) -> Result<JsValue, JsValue> {
    let object = Object::new();
    for (name, value) in params.iter() {
        Reflect::set(&object, &JsValue::from_str(name), value)?;
    }
    Ok(object.into())
}
