//! Listener registration collaborator contract.
//!
//! The gesture tracker never touches the native event source directly, it goes through an
//! [`EventRegistry`] implemented by the host, a DOM binding, an embedded view, a test harness.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::{GestureEvent, PointerEventKind};

/// Boxed listener callback.
pub type ListenerFn = Box<dyn FnMut(&GestureEvent) + Send>;

/// Flags forwarded verbatim to the host when registering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ListenerOptions {
    /// Register for the capture phase in hosts that dispatch in two phases.
    pub capture: bool,

    /// Declares that the listener never suppresses the default action of the native event.
    pub passive: bool,
}
impl ListenerOptions {
    /// New options.
    pub fn new(capture: bool, passive: bool) -> Self {
        Self { capture, passive }
    }
}

/// Host capability that attaches native event listeners.
///
/// The registry also answers the environment questions the gesture tracker needs: whether
/// the unified pointer family is emitted natively and what node receives escalated
/// listeners during a drag.
pub trait EventRegistry {
    /// Node type listeners attach to.
    type Target: Clone;

    /// Attach `handler` to the `kind` native event on `target`.
    ///
    /// The returned handle detaches the listener when unregistered or dropped, detaching
    /// more than once must be a safe no-op.
    fn add_listener(
        &self,
        target: &Self::Target,
        kind: PointerEventKind,
        handler: ListenerFn,
        options: &ListenerOptions,
    ) -> ListenerHandle;

    /// If the environment emits the unified pointer family natively.
    ///
    /// Queried again on every [`PointerGestures::enable`] call, the result is never cached.
    ///
    /// [`PointerGestures::enable`]: crate::gesture::PointerGestures::enable
    fn supports_pointer_events(&self) -> bool;

    /// Target that receives escalated listeners during a drag.
    ///
    /// Mouse move and release listeners attach here so the gesture keeps tracking after the
    /// cursor leaves the pressed node. DOM-like hosts return the owner document, the default
    /// is `target` itself.
    fn root_target(&self, target: &Self::Target) -> Self::Target {
        target.clone()
    }
}

/// Represents an attached native event listener.
///
/// The listener is detached when the handle is unregistered or dropped. Detaching is
/// idempotent.
#[must_use = "the listener is detached when the handle is dropped"]
pub struct ListenerHandle(Option<Box<dyn FnOnce() + Send>>);
impl ListenerHandle {
    /// New handle that runs `unregister` on the first detach.
    pub fn new(unregister: impl FnOnce() + Send + 'static) -> Self {
        ListenerHandle(Some(Box::new(unregister)))
    }

    /// New handle that represents no listener.
    pub fn dummy() -> Self {
        ListenerHandle(None)
    }

    /// Detach the listener now.
    pub fn unregister(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(unregister) = self.0.take() {
            unregister();
        }
    }
}
impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.detach();
    }
}
impl fmt::Debug for ListenerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ListenerHandle({})",
            if self.0.is_some() { "attached" } else { "detached" }
        )
    }
}
