//! Handle construction and initialization.

use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use wooble_core::{ComponentEntry, ComponentRegistry, LoaderConfig, LoaderError, Params};

use crate::host::{ComponentFactory, Host};
use crate::polyfill::PolyfillGate;

/// Instances for one `init` call, available once any polyfill has loaded.
pub type PendingInit<I> = LocalBoxFuture<'static, Result<Vec<I>, LoaderError>>;

/// Creates handles for registered creations.
pub struct Loader<H: Host, F: ComponentFactory<H::Node>> {
    registry: Rc<ComponentRegistry<F, F::Value>>,
    config: LoaderConfig,
    host: Rc<H>,
    polyfill: Rc<PolyfillGate>,
}

impl<H, F> Loader<H, F>
where
    H: Host + 'static,
    F: ComponentFactory<H::Node> + 'static,
    F::Instance: 'static,
{
    /// Create a loader with its own polyfill gate.
    pub fn new(registry: ComponentRegistry<F, F::Value>, config: LoaderConfig, host: H) -> Self {
        Self {
            registry: Rc::new(registry),
            config,
            host: Rc::new(host),
            polyfill: Rc::new(PolyfillGate::new()),
        }
    }

    /// Share a polyfill gate with other loaders on the same page.
    pub fn with_polyfill_gate(mut self, gate: Rc<PolyfillGate>) -> Self {
        self.polyfill = gate;
        self
    }

    pub fn registry(&self) -> &ComponentRegistry<F, F::Value> {
        &self.registry
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Create a handle for the creation registered as `id`.
    ///
    /// Fails when the page's host is not allowed or `id` is unknown; either
    /// failure writes its line to the host console first.
    pub fn construct(&self, id: &str) -> Result<Handle<H, F>, LoaderError> {
        let hostname = self.host.hostname();
        if !self.config.allowed_domains.permits(&hostname) {
            return Err(report(&*self.host, LoaderError::DomainRestricted { hostname }));
        }

        let entry = self.registry.entry(id).ok_or_else(|| {
            report(&*self.host, LoaderError::UnknownComponentId { id: id.to_string() })
        })?;

        tracing::debug!(id, "constructed handle");
        Ok(Handle {
            id: id.to_string(),
            entry,
            host: Rc::clone(&self.host),
            polyfill: Rc::clone(&self.polyfill),
            polyfill_url: Rc::from(self.config.polyfill_url.as_str()),
        })
    }
}

/// A resolved creation, ready to be bound to nodes.
pub struct Handle<H: Host, F: ComponentFactory<H::Node>> {
    id: String,
    entry: Rc<ComponentEntry<F, F::Value>>,
    host: Rc<H>,
    polyfill: Rc<PolyfillGate>,
    polyfill_url: Rc<str>,
}

impl<H: Host, F: ComponentFactory<H::Node>> Clone for Handle<H, F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            entry: Rc::clone(&self.entry),
            host: Rc::clone(&self.host),
            polyfill: Rc::clone(&self.polyfill),
            polyfill_url: Rc::clone(&self.polyfill_url),
        }
    }
}

impl<H, F> Handle<H, F>
where
    H: Host + 'static,
    F: ComponentFactory<H::Node> + 'static,
    F::Instance: 'static,
{
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Registered defaults for this creation.
    pub fn defaults(&self) -> &Params<F::Value> {
        &self.entry.defaults
    }

    /// Bind the creation to every node matching `selector`.
    ///
    /// Returns `Err(TargetNotFound)` right away when nothing matches; no
    /// script is loaded in that case. Otherwise returns a future that waits
    /// for the polyfill if the page lacks shadow DOM, queries `selector`
    /// again and builds one instance per node with the merged parameters.
    pub fn init(
        &self,
        selector: &str,
        overrides: Option<&Params<F::Value>>,
    ) -> Result<PendingInit<F::Instance>, LoaderError> {
        if !self.host.has_match(selector) {
            return Err(report(
                &*self.host,
                LoaderError::TargetNotFound { selector: selector.to_string() },
            ));
        }

        let params = match overrides {
            Some(overrides) => self.entry.defaults.merged_with(overrides),
            None => self.entry.defaults.clone(),
        };

        let ready = if self.host.supports_shadow_dom() {
            None
        } else {
            Some(self.polyfill.ready(&*self.host, &self.polyfill_url))
        };

        let host = Rc::clone(&self.host);
        let entry = Rc::clone(&self.entry);
        let id = self.id.clone();
        let selector = selector.to_string();

        Ok(async move {
            if let Some(ready) = ready {
                ready.await?;
            }
            instantiate(&*host, &entry, &id, &selector, params)
        }
        .boxed_local())
    }
}

fn instantiate<H, F>(
    host: &H,
    entry: &ComponentEntry<F, F::Value>,
    id: &str,
    selector: &str,
    params: Params<F::Value>,
) -> Result<Vec<F::Instance>, LoaderError>
where
    H: Host,
    F: ComponentFactory<H::Node>,
{
    let nodes = host.query_all(selector);
    tracing::debug!(id, selector, nodes = nodes.len(), "instantiating creation");

    let failed = |reason: String| {
        tracing::warn!(id, %reason, "creation constructor failed");
        LoaderError::Instantiation { id: id.to_string(), reason }
    };

    let args = entry.factory.prepare(params).map_err(failed)?;
    nodes
        .into_iter()
        .map(|node| entry.factory.create(node, &args).map_err(failed))
        .collect()
}

/// Log a soft failure and write its console line.
fn report<H: Host + ?Sized>(host: &H, err: LoaderError) -> LoaderError {
    tracing::warn!(error = %err, "wooble loader aborted");
    if let Some(line) = err.diagnostic() {
        host.log(&line);
    }
    err
}
