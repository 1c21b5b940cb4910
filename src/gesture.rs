//! Gesture tracking over the native input families.
//!
//! [`PointerGestures`] reduces whatever event family the device emits, touch, mouse or
//! unified pointer, to a single press/move/release cycle and suppresses the synthetic
//! mouse sequence hosts emit after touch interactions.

use std::{
    fmt,
    sync::{Arc, Weak},
    time::Duration,
};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{
    event::{GestureEvent, PointerEventKind, PointerFamily},
    listener::{EventRegistry, ListenerFn, ListenerHandle, ListenerOptions},
    time::{Deadline, TimeUnits as _},
};

/// Gesture tracking config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct GestureConfig {
    /// Time mouse events stay suppressed after a touch or pointer press.
    ///
    /// Hosts without native pointer events emit a synthetic mouse sequence shortly after
    /// every touch sequence, mouse presses before this window elapses are ignored as
    /// ghosts of the touch interaction that primed the window.
    ///
    /// The default is 2s, an empirically tuned value with margin for slow devices.
    pub mouse_wait: Duration,

    /// Flags forwarded verbatim to the listener registry.
    pub options: ListenerOptions,
}
impl GestureConfig {
    /// New config.
    pub fn new(mouse_wait: Duration, options: ListenerOptions) -> Self {
        Self { mouse_wait, options }
    }
}
impl Default for GestureConfig {
    /// 2s wait, default options.
    fn default() -> Self {
        Self {
            mouse_wait: 2.secs(),
            options: ListenerOptions::default(),
        }
    }
}

/// Boxed press callback, returns if the gesture is accepted.
pub type PressFn = Box<dyn FnMut(&GestureEvent) -> bool + Send>;

/// Boxed move or release callback.
pub type PhaseFn = Box<dyn FnMut(&GestureEvent) + Send>;

/// The gesture callbacks supplied by the component.
///
/// Only the press callback is required, the move and release phases default to doing
/// nothing.
pub struct GestureHandlers {
    press: PressFn,
    on_move: Option<PhaseFn>,
    release: Option<PhaseFn>,
}
impl GestureHandlers {
    /// New handlers with only the press callback.
    ///
    /// The press callback runs when a start event is dispatched for the winning family,
    /// returning `false` rejects the gesture and no other listener is attached for it.
    pub fn new(press: impl FnMut(&GestureEvent) -> bool + Send + 'static) -> Self {
        Self {
            press: Box::new(press),
            on_move: None,
            release: None,
        }
    }

    /// Set the move callback.
    pub fn with_move(mut self, on_move: impl FnMut(&GestureEvent) + Send + 'static) -> Self {
        self.on_move = Some(Box::new(on_move));
        self
    }

    /// Set the release callback.
    ///
    /// Runs on the end or cancel event of the family that owns the gesture.
    pub fn with_release(mut self, release: impl FnMut(&GestureEvent) + Send + 'static) -> Self {
        self.release = Some(Box::new(release));
        self
    }
}
impl fmt::Debug for GestureHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureHandlers")
            .field("has_move", &self.on_move.is_some())
            .field("has_release", &self.release.is_some())
            .finish_non_exhaustive()
    }
}

/// Move/end/cancel handles of one family.
///
/// A handle is `Some` exactly while its listener is attached.
#[derive(Debug, Default)]
struct FamilyListeners {
    on_move: Option<ListenerHandle>,
    on_end: Option<ListenerHandle>,
    on_cancel: Option<ListenerHandle>,
}
impl FamilyListeners {
    /// Take all handles so they drop outside the state lock.
    fn take(&mut self) -> [Option<ListenerHandle>; 3] {
        [self.on_move.take(), self.on_end.take(), self.on_cancel.take()]
    }
}

#[derive(Debug, Default)]
struct ListenerState {
    touch_start: Option<ListenerHandle>,
    mouse_down: Option<ListenerHandle>,
    pointer_down: Option<ListenerHandle>,

    touch: FamilyListeners,
    mouse: FamilyListeners,
    pointer: FamilyListeners,

    /// Mouse events are ignored until this deadline.
    mouse_suppress: Option<Deadline>,
}
impl ListenerState {
    fn family_mut(&mut self, family: PointerFamily) -> &mut FamilyListeners {
        match family {
            PointerFamily::Touch => &mut self.touch,
            PointerFamily::Mouse => &mut self.mouse,
            PointerFamily::Pointer => &mut self.pointer,
        }
    }
}

struct GesturesData<R: EventRegistry> {
    registry: R,
    target: R::Target,
    config: GestureConfig,

    // the `handlers` lock is held while a callback runs, `state` only for handle
    // bookkeeping, never both at once, so callbacks can call `enable`/`stop`.
    handlers: Mutex<Option<GestureHandlers>>,
    state: Mutex<ListenerState>,

    weak: Weak<Self>,
}
impl<R> GesturesData<R>
where
    R: EventRegistry + Send + Sync + 'static,
    R::Target: Send + Sync + 'static,
{
    fn new(registry: R, target: R::Target, handlers: GestureHandlers, config: GestureConfig) -> Arc<Self> {
        Arc::new_cyclic(|weak| GesturesData {
            registry,
            target,
            config,
            handlers: Mutex::new(Some(handlers)),
            state: Mutex::new(ListenerState::default()),
            weak: weak.clone(),
        })
    }

    /// New listener that weakly references the gesture state.
    ///
    /// After destroy or drop the native event reduces to a no-op.
    fn listener<F>(&self, f: F) -> ListenerFn
    where
        F: Fn(&Self, &GestureEvent) + Send + 'static,
    {
        let weak = self.weak.clone();
        Box::new(move |ev| {
            if let Some(data) = weak.upgrade() {
                f(&data, ev);
            }
        })
    }

    fn set_enabled(&self, enabled: bool) {
        if !enabled {
            let starts = {
                let mut state = self.state.lock();
                (
                    state.touch_start.take(),
                    state.mouse_down.take(),
                    state.pointer_down.take(),
                )
            };
            drop(starts);
            self.stop_all();
        } else {
            // not cached, the host capability can change between calls
            let pointer = self.registry.supports_pointer_events();
            tracing::debug!("arming start listeners, native pointer events: {pointer}");

            let mut state = self.state.lock();
            if pointer {
                if state.pointer_down.is_none() {
                    state.pointer_down = Some(self.registry.add_listener(
                        &self.target,
                        PointerEventKind::PointerDown,
                        self.listener(Self::on_pointer_down),
                        &self.config.options,
                    ));
                }
            } else {
                if state.touch_start.is_none() {
                    state.touch_start = Some(self.registry.add_listener(
                        &self.target,
                        PointerEventKind::TouchStart,
                        self.listener(Self::on_touch_start),
                        &self.config.options,
                    ));
                }
                if state.mouse_down.is_none() {
                    state.mouse_down = Some(self.registry.add_listener(
                        &self.target,
                        PointerEventKind::MouseDown,
                        self.listener(Self::on_mouse_down),
                        &self.config.options,
                    ));
                }
            }
        }
    }

    fn stop_all(&self) {
        let handles = {
            let mut state = self.state.lock();
            [state.touch.take(), state.mouse.take(), state.pointer.take()]
        };
        drop(handles);
    }

    fn on_touch_start(&self, ev: &GestureEvent) {
        // primed even if the press callback rejects, the native touch still happened
        self.state.lock().mouse_suppress = Some(Deadline::after(ev.timestamp, self.config.mouse_wait));
        self.on_start(PointerFamily::Touch, ev);
    }

    fn on_mouse_down(&self, ev: &GestureEvent) {
        if let Some(deadline) = self.state.lock().mouse_suppress {
            if !deadline.has_elapsed_by(ev.timestamp) {
                // ghost of the touch sequence that primed the window
                return;
            }
        }
        self.on_start(PointerFamily::Mouse, ev);
    }

    fn on_pointer_down(&self, ev: &GestureEvent) {
        self.state.lock().mouse_suppress = Some(Deadline::after(ev.timestamp, self.config.mouse_wait));
        self.on_start(PointerFamily::Pointer, ev);
    }

    fn on_start(&self, family: PointerFamily, ev: &GestureEvent) {
        let has_move = {
            let mut handlers = self.handlers.lock();
            let Some(h) = handlers.as_mut() else {
                return;
            };
            if !(h.press)(ev) {
                return;
            }
            h.on_move.is_some()
        };

        let target = match family {
            // mouse drags keep tracking after the cursor leaves the pressed node
            PointerFamily::Mouse => self.registry.root_target(&self.target),
            PointerFamily::Touch | PointerFamily::Pointer => self.target.clone(),
        };
        let (move_kind, end_kind, cancel_kind) = match family {
            PointerFamily::Touch => (
                PointerEventKind::TouchMove,
                PointerEventKind::TouchEnd,
                Some(PointerEventKind::TouchCancel),
            ),
            PointerFamily::Mouse => (PointerEventKind::MouseMove, PointerEventKind::MouseUp, None),
            PointerFamily::Pointer => (
                PointerEventKind::PointerMove,
                PointerEventKind::PointerUp,
                Some(PointerEventKind::PointerCancel),
            ),
        };

        let mut state = self.state.lock();
        let listeners = state.family_mut(family);
        if has_move && listeners.on_move.is_none() {
            listeners.on_move = Some(self.registry.add_listener(
                &target,
                move_kind,
                self.listener(|data, ev| data.forward_move(ev)),
                &self.config.options,
            ));
        }
        if listeners.on_end.is_none() {
            listeners.on_end = Some(self.registry.add_listener(
                &target,
                end_kind,
                self.listener(move |data, ev| data.on_gesture_end(family, ev)),
                &self.config.options,
            ));
        }
        if let Some(cancel_kind) = cancel_kind {
            if listeners.on_cancel.is_none() {
                listeners.on_cancel = Some(self.registry.add_listener(
                    &target,
                    cancel_kind,
                    self.listener(move |data, ev| data.on_gesture_end(family, ev)),
                    &self.config.options,
                ));
            }
        }
    }

    fn forward_move(&self, ev: &GestureEvent) {
        if let Some(h) = self.handlers.lock().as_mut() {
            if let Some(on_move) = &mut h.on_move {
                on_move(ev);
            }
        }
    }

    fn on_gesture_end(&self, family: PointerFamily, ev: &GestureEvent) {
        let handles = {
            let mut state = self.state.lock();
            state.family_mut(family).take()
        };
        drop(handles);

        if let Some(h) = self.handlers.lock().as_mut() {
            if let Some(release) = &mut h.release {
                release(ev);
            }
        }
    }
}

/// Tracks press/move/release gestures over the three native input families.
///
/// The tracker is bound to a target node and an [`EventRegistry`] on construction and
/// starts detached, [`enable`] arms it. When the host emits the unified pointer family
/// natively only `pointerdown` is armed, otherwise `touchstart` and `mousedown` are armed
/// and mouse presses inside the [`mouse_wait`] window of a touch press are dropped as
/// ghost events.
///
/// A start event runs the press callback. If it accepts, the family's move/end/cancel
/// listeners attach and stay attached until the gesture ends, by the native end or cancel
/// event, [`stop`], disable or [`destroy`]. Every listener the tracker attached is
/// detached when the tracker is dropped.
///
/// [`enable`]: Self::enable
/// [`stop`]: Self::stop
/// [`destroy`]: Self::destroy
/// [`mouse_wait`]: GestureConfig::mouse_wait
pub struct PointerGestures<R: EventRegistry> {
    data: Arc<GesturesData<R>>,
}
impl<R> PointerGestures<R>
where
    R: EventRegistry + Send + Sync + 'static,
    R::Target: Send + Sync + 'static,
{
    /// New tracker bound to `target`, with the default config.
    pub fn new(registry: R, target: R::Target, handlers: GestureHandlers) -> Self {
        Self::with_config(registry, target, handlers, GestureConfig::default())
    }

    /// New tracker bound to `target`.
    pub fn with_config(registry: R, target: R::Target, handlers: GestureHandlers, config: GestureConfig) -> Self {
        Self {
            data: GesturesData::new(registry, target, handlers, config),
        }
    }

    /// Attach or detach the start listeners.
    ///
    /// Enabling queries [`EventRegistry::supports_pointer_events`] and arms the start
    /// listeners for the families the environment needs, disabling detaches the start
    /// listeners and force-ends any active gesture. Repeated calls with the same value
    /// are no-ops.
    pub fn enable(&self, enabled: bool) {
        self.data.set_enabled(enabled);
    }

    /// Force-end any active gesture, keeping the start listeners attached.
    ///
    /// The release callback is not invoked. The next start event is processed normally.
    pub fn stop(&self) {
        self.data.stop_all();
    }

    /// Disable the tracker and drop the three callbacks.
    ///
    /// Terminal, native events after this are no-ops. Safe to call twice. Must not be
    /// called from inside a gesture callback.
    pub fn destroy(&self) {
        self.data.set_enabled(false);
        *self.data.handlers.lock() = None;
    }

    /// The gesture config.
    pub fn config(&self) -> &GestureConfig {
        &self.data.config
    }
}
impl<R: EventRegistry> fmt::Debug for PointerGestures<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerGestures").finish_non_exhaustive()
    }
}
