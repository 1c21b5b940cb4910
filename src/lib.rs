//! Unified touch, mouse and pointer gesture tracking for interactive components.
//!
//! Hosts that don't emit the unified pointer event family natively produce a touch
//! sequence followed by a synthetic mouse sequence for the same physical interaction.
//! [`PointerGestures`] owns the native listeners for all three families, drops the ghost
//! mouse sequence, and reduces whatever the device emits to one press/move/release cycle,
//! so sliders, range controls and drag handles only implement three callbacks.
//!
//! The native event source is abstracted behind the [`EventRegistry`] trait, implemented
//! by the host, a DOM binding, an embedded view or a test harness.
//!
//! # Examples
//!
//! ```
//! use pointer_gestures::{
//!     EventRegistry, GestureEvent, GestureHandlers, ListenerFn, ListenerHandle,
//!     ListenerOptions, PointerEventKind, PointerGestures,
//! };
//!
//! // headless host, listeners register but no native event ever fires
//! struct Headless;
//! impl EventRegistry for Headless {
//!     type Target = ();
//!
//!     fn add_listener(
//!         &self,
//!         _target: &(),
//!         _kind: PointerEventKind,
//!         _handler: ListenerFn,
//!         _options: &ListenerOptions,
//!     ) -> ListenerHandle {
//!         ListenerHandle::dummy()
//!     }
//!
//!     fn supports_pointer_events(&self) -> bool {
//!         true
//!     }
//! }
//!
//! let handlers = GestureHandlers::new(|_| true)
//!     .with_move(|ev: &GestureEvent| println!("drag {}", ev.kind))
//!     .with_release(|_| println!("drag done"));
//!
//! let drag = PointerGestures::new(Headless, (), handlers);
//! drag.enable(true);
//! // ... host dispatches native events ...
//! drag.destroy();
//! ```

#![warn(unused_extern_crates)]
#![warn(missing_docs)]

pub mod event;
pub mod gesture;
pub mod listener;
pub mod time;

pub use event::{GestureEvent, GesturePhase, PointerEventKind, PointerFamily};
pub use gesture::{GestureConfig, GestureHandlers, PointerGestures};
pub use listener::{EventRegistry, ListenerFn, ListenerHandle, ListenerOptions};
pub use time::{Deadline, TimeUnits};
