//! # Core primitives
//!
//! Host-independent building blocks used by `glide-navigation`:
//!
//! - [`Vec2`], [`Transform`] : the geometry a host applies to views.
//! - [`Color`] : RGBA8 colors (skin scrims, shadows).
//! - [`animation`] : easing curves, [`AnimationSpec`](animation::AnimationSpec)
//!   and a clock-explicit [`AnimatedValue`](animation::AnimatedValue).
//! - [`Dispose`] / [`TaskHolder`] : cancellation handles for work that must stop
//!   when a screen leaves the foreground.
//! - [`NavError`](error::NavError) : the error type of navigation operations.
//!
//! ## Tweens are driven by the caller
//!
//! There is no global clock. Whoever owns an animation passes `now`:
//!
//! ```rust
//! use glide_core::animation::*;
//! use web_time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut v = AnimatedValue::new(0.0f32, AnimationSpec::tween(Duration::from_millis(100), Easing::Linear));
//! v.set_target(1.0, t0);
//! v.update(t0 + Duration::from_millis(50));
//! assert!((*v.get() - 0.5).abs() < 0.01);
//! ```
//!
//! ## Task holders
//!
//! ```rust
//! use glide_core::*;
//! use std::{cell::Cell, rc::Rc};
//!
//! let stopped = Rc::new(Cell::new(false));
//! let mut tasks = TaskHolder::new();
//! let s = stopped.clone();
//! tasks.add(on_cancel(move || s.set(true)));
//! tasks.clear_all();
//! assert!(stopped.get());
//! ```

pub mod animation;
pub mod color;
pub mod effects;
pub mod error;
pub mod geometry;

pub use color::*;
pub use effects::*;
pub use error::*;
pub use geometry::*;
