//! Browser implementation of the loader's host.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::FutureExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlScriptElement, Window};
use wooble_loader::{Host, ScriptLoad};

type LoadSender = Rc<RefCell<Option<oneshot::Sender<Result<(), String>>>>>;

/// The current page, reached through `window` and `document`.
pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    /// Bind to the global window.
    pub fn new() -> Result<BrowserHost, JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("No window available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("Window has no document"))?;

        Ok(BrowserHost { window, document })
    }

    /// Append a `<script>` for `url` to the head and report when it settles.
    fn append_script(&self, url: &str) -> Result<ScriptLoad, String> {
        let script = self
            .document
            .create_element("script")
            .map_err(|e| describe(&e))?
            .dyn_into::<HtmlScriptElement>()
            .map_err(|_| "Failed to cast to HtmlScriptElement".to_string())?;
        script.set_type("text/javascript");
        script.set_src(url);

        let (tx, rx) = oneshot::channel();
        let tx: LoadSender = Rc::new(RefCell::new(Some(tx)));

        let on_load = {
            let tx = Rc::clone(&tx);
            Closure::<dyn FnMut()>::new(move || settle(&tx, Ok(())))
        };
        let on_error = {
            let tx = Rc::clone(&tx);
            let url = url.to_string();
            Closure::<dyn FnMut()>::new(move || settle(&tx, Err(format!("{} did not load", url))))
        };
        script.set_onload(Some(on_load.as_ref().unchecked_ref()));
        script.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let head = self
            .document
            .head()
            .ok_or_else(|| "Document has no head".to_string())?;
        head.append_child(&script).map_err(|e| describe(&e))?;

        Ok(async move {
            let outcome = rx
                .await
                .unwrap_or_else(|_| Err("script load abandoned".to_string()));
            // Handlers must outlive the load events.
            drop((on_load, on_error));
            outcome
        }
        .boxed_local())
    }
}

impl Host for BrowserHost {
    type Node = Element;

    fn hostname(&self) -> String {
        self.window.location().hostname().unwrap_or_default()
    }

    fn supports_shadow_dom(&self) -> bool {
        // Same check the polyfill itself keys on: `document.head.attachShadow`.
        self.document
            .head()
            .and_then(|head| js_sys::Reflect::get(&head, &JsValue::from_str("attachShadow")).ok())
            .map(|attach| attach.is_function())
            .unwrap_or(false)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(err) => {
                tracing::warn!(selector, error = %describe(&err), "selector rejected by document");
                Vec::new()
            }
        }
    }

    fn has_match(&self, selector: &str) -> bool {
        matches!(self.document.query_selector(selector), Ok(Some(_)))
    }

    fn load_script(&self, url: &str) -> ScriptLoad {
        match self.append_script(url) {
            Ok(load) => load,
            Err(reason) => async move { Err(reason) }.boxed_local(),
        }
    }

    fn log(&self, line: &str) {
        web_sys::console::log_1(&JsValue::from_str(line));
    }
}

fn settle(tx: &LoadSender, outcome: Result<(), String>) {
    if let Some(tx) = tx.borrow_mut().take() {
        let _ = tx.send(outcome);
    }
}

/// Readable text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
