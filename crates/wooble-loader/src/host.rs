//! Environment and factory traits.

use futures::future::LocalBoxFuture;
use wooble_core::{Params, Value};

/// Completion of a script load: `Err` carries the reason the script failed.
pub type ScriptLoad = LocalBoxFuture<'static, Result<(), String>>;

/// The page the loader runs against.
///
/// Implement this trait to run the loader over a real document, or over a
/// scripted one in tests.
pub trait Host {
    /// A matched element.
    type Node;

    /// Hostname of the current page, compared against the allow-list.
    fn hostname(&self) -> String;

    /// Whether elements can attach a native shadow root.
    fn supports_shadow_dom(&self) -> bool;

    /// All nodes matching `selector`, in document order.
    ///
    /// A selector the host cannot parse matches nothing.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Whether at least one node matches `selector`.
    fn has_match(&self, selector: &str) -> bool {
        !self.query_all(selector).is_empty()
    }

    /// Start loading an external script.
    ///
    /// The load starts when this is called; the returned future only reports
    /// completion.
    fn load_script(&self, url: &str) -> ScriptLoad;

    /// Write one diagnostic line to the page console.
    fn log(&self, line: &str);
}

/// Builds creation instances bound to nodes.
///
/// One `init` call prepares the merged parameters once, then hands the same
/// prepared arguments to every node's [`create`](Self::create).
pub trait ComponentFactory<N> {
    /// Parameter value type, as stored in the registry defaults.
    type Value: Clone;

    /// Merged parameters in the form instances receive them.
    type Args;

    /// What the factory produces for one node.
    type Instance;

    /// Turn the merged parameters of one `init` call into instance arguments.
    fn prepare(&self, params: Params<Self::Value>) -> Result<Self::Args, String>;

    /// Build one instance for `node`. `Err` carries a reason.
    fn create(&self, node: N, args: &Self::Args) -> Result<Self::Instance, String>;
}

/// Adapts a closure over JSON parameters into a [`ComponentFactory`].
pub struct FnFactory<Fun>(pub Fun);

impl<N, I, Fun> ComponentFactory<N> for FnFactory<Fun>
where
    Fun: Fn(N, &Params) -> Result<I, String>,
{
    type Value = Value;
    type Args = Params;
    type Instance = I;

    fn prepare(&self, params: Params) -> Result<Params, String> {
        Ok(params)
    }

    fn create(&self, node: N, params: &Params) -> Result<I, String> {
        (self.0)(node, params)
    }
}
