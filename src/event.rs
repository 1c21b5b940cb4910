//! Gesture event identity and data types.

use std::{fmt, time::Instant};

use serde::{Deserialize, Serialize};

/// Native input event family that can own a gesture.
///
/// At most one family has an active gesture at any instant, the start dispatch and the
/// mouse suppression window in [`PointerGestures`] arbitrate which one.
///
/// [`PointerGestures`]: crate::gesture::PointerGestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerFamily {
    /// Touch contact events, the `touchstart` set.
    Touch,
    /// Mouse button events, the `mousedown` set.
    Mouse,
    /// Unified pointer events, the `pointerdown` set.
    ///
    /// Hosts that emit this family natively don't need the other two, see
    /// [`EventRegistry::supports_pointer_events`].
    ///
    /// [`EventRegistry::supports_pointer_events`]: crate::listener::EventRegistry::supports_pointer_events
    Pointer,
}

/// Phase of a gesture within its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GesturePhase {
    /// A press began.
    Start,
    /// The contact or cursor moved while pressed.
    Move,
    /// The press was released.
    End,
    /// The host aborted the interaction.
    ///
    /// Handled exactly like [`End`](Self::End).
    Cancel,
}

/// Identifies one of the native events the gesture tracker listens to.
///
/// The mouse family has no native cancel event, so there is no `MouseCancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerEventKind {
    /// `touchstart`.
    TouchStart,
    /// `touchmove`.
    TouchMove,
    /// `touchend`.
    TouchEnd,
    /// `touchcancel`.
    TouchCancel,
    /// `mousedown`.
    MouseDown,
    /// `mousemove`.
    MouseMove,
    /// `mouseup`.
    MouseUp,
    /// `pointerdown`.
    PointerDown,
    /// `pointermove`.
    PointerMove,
    /// `pointerup`.
    PointerUp,
    /// `pointercancel`.
    PointerCancel,
}
impl PointerEventKind {
    /// Family the event belongs to.
    pub fn family(self) -> PointerFamily {
        use PointerEventKind::*;
        match self {
            TouchStart | TouchMove | TouchEnd | TouchCancel => PointerFamily::Touch,
            MouseDown | MouseMove | MouseUp => PointerFamily::Mouse,
            PointerDown | PointerMove | PointerUp | PointerCancel => PointerFamily::Pointer,
        }
    }

    /// Phase the event represents within its family.
    pub fn phase(self) -> GesturePhase {
        use PointerEventKind::*;
        match self {
            TouchStart | MouseDown | PointerDown => GesturePhase::Start,
            TouchMove | MouseMove | PointerMove => GesturePhase::Move,
            TouchEnd | MouseUp | PointerUp => GesturePhase::End,
            TouchCancel | PointerCancel => GesturePhase::Cancel,
        }
    }

    /// Native event name, as used by DOM-like hosts.
    pub fn name(self) -> &'static str {
        use PointerEventKind::*;
        match self {
            TouchStart => "touchstart",
            TouchMove => "touchmove",
            TouchEnd => "touchend",
            TouchCancel => "touchcancel",
            MouseDown => "mousedown",
            MouseMove => "mousemove",
            MouseUp => "mouseup",
            PointerDown => "pointerdown",
            PointerMove => "pointermove",
            PointerUp => "pointerup",
            PointerCancel => "pointercancel",
        }
    }
}
impl fmt::Display for PointerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Event data forwarded to the gesture callbacks.
///
/// Carries only the event identity and timestamp. Family specific payloads, coordinates
/// and contact forces stay in the host, callbacks that need them can correlate with the
/// host event dispatched at the same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct GestureEvent {
    /// The native event.
    pub kind: PointerEventKind,

    /// Instant the host stamped on the native event.
    ///
    /// The mouse suppression window is evaluated against this value, so hosts must stamp
    /// events with a monotonic instant, the dispatch time in synchronous event loops.
    pub timestamp: Instant,
}
impl GestureEvent {
    /// New event with an explicit timestamp.
    pub fn new(kind: PointerEventKind, timestamp: Instant) -> Self {
        Self { kind, timestamp }
    }

    /// New event timestamped now.
    pub fn now(kind: PointerEventKind) -> Self {
        Self::new(kind, Instant::now())
    }

    /// Family of the native event.
    pub fn family(&self) -> PointerFamily {
        self.kind.family()
    }

    /// Phase of the native event within its family.
    pub fn phase(&self) -> GesturePhase {
        self.kind.phase()
    }
}
