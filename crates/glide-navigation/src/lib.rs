//! # Screen-stack navigation
//!
//! A [`Navigator`] owns every [`Screen`] and three kinds of relationship
//! between them:
//!
//! - **Slide stack**: a screen with a [`container`](Screen::container) is a
//!   navigation root. [`push`](Navigator::push) slides a screen in from the
//!   right, [`pop`](Navigator::pop) slides it back out, and a left-edge swipe
//!   ([`handle_edge_pan`](Navigator::handle_edge_pan)) can drag it out
//!   interactively and either finish the pop or spring back.
//! - **Overlays**: [`add_overlay`](Navigator::add_overlay) layers screens over
//!   an owner without animation, in their own stack.
//! - **Sub-screens**: nested screens that follow their owner's lifecycle.
//!
//! ## Lifecycle
//!
//! ```text
//! Created → Added → Foreground ⇄ Background → Removed
//! ```
//!
//! Only the deepest top-of-stack screen is in the foreground. Every push
//! calls `leave()` on the pusher before `enter()` on the pushed screen; every
//! pop calls `leave()` on the popped screen before `enter()` on the one it
//! reveals. Leaving the foreground runs the screen's [`TaskHolder`] handles.
//!
//! ## Driving it
//!
//! The host implements [`ViewHost`], forwards edge-pan events, and calls
//! [`tick`](Navigator::tick) every frame while [`is_busy`](Navigator::is_busy):
//!
//! ```rust
//! use glide_navigation::*;
//! use glide_navigation::testing::RecordingHost;
//! use web_time::{Duration, Instant};
//!
//! struct Home { view: ViewId, container: ViewId }
//! impl Screen for Home {
//!     fn build(cx: &mut BuildCx<'_>) -> Self {
//!         let view = cx.host().create_view();
//!         let container = cx.host().create_view();
//!         cx.host().add_subview(view, container);
//!         Home { view, container }
//!     }
//!     fn view(&self) -> ViewId { self.view }
//!     fn container(&self) -> Option<ViewId> { Some(self.container) }
//! }
//!
//! struct Detail { view: ViewId }
//! impl Screen for Detail {
//!     fn build(cx: &mut BuildCx<'_>) -> Self {
//!         Detail { view: cx.host().create_view() }
//!     }
//!     fn view(&self) -> ViewId { self.view }
//! }
//!
//! let mut nav = Navigator::new(RecordingHost::new());
//! let home = nav.mount_root::<Home>(ScreenRequest::new()).unwrap();
//! let detail = nav.push::<Detail>(home, ScreenRequest::new()).unwrap();
//! assert!(nav.is_foreground(detail));
//!
//! let t0 = Instant::now();
//! assert!(nav.tick(t0));
//! assert!(!nav.tick(t0 + Duration::from_millis(400)));
//! assert!(!nav.is_busy(home));
//! ```
//!
//! [`TaskHolder`]: glide_core::TaskHolder

pub mod cache;
pub mod config;
pub mod gesture;
pub mod host;
pub mod lifecycle;
pub mod navigator;
mod overlay;
pub mod screen;
pub mod snapshot;
mod stack;
pub mod testing;
pub mod transition;

pub use cache::ScreenCache;
pub use config::{CommitRule, NavConfig};
pub use gesture::{EdgePan, PanPhase, PanResponse};
pub use host::{GestureId, ShadowStyle, ViewHost, ViewId};
pub use lifecycle::{LifecycleEvent, LifecycleState};
pub use navigator::Navigator;
pub use screen::{BuildCx, LifecycleCx, Screen, ScreenId, ScreenKey, ScreenRequest};
pub use snapshot::{ScreenSnapshot, StackSnapshot};
pub use transition::{Direction, NavEvent, SlideFrame, Source, TransitionOutcome, TransitionToken};

pub use glide_core::{NavError, NavResult};
