//! What the engine needs from the host view system.
//!
//! The engine never renders anything. It inserts and removes views, pins them
//! to their parents, moves them horizontally, fades the skin, toggles shadows
//! and input, and registers one edge-pan recognizer per navigation root.

use glide_core::{Color, Transform, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureId(pub u64);

/// Drop shadow drawn on the screen that is sliding.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShadowStyle {
    pub offset: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            offset: Vec2::new(6.0, 0.0),
            radius: 10.0,
            color: Color::BLACK,
        }
    }
}

pub trait ViewHost {
    fn create_view(&mut self) -> ViewId;
    fn add_subview(&mut self, parent: ViewId, child: ViewId);
    fn remove_from_parent(&mut self, view: ViewId);
    /// Children of `parent`, back to front.
    fn subviews(&self, parent: ViewId) -> Vec<ViewId>;
    fn bring_to_front(&mut self, parent: ViewId, child: ViewId);
    /// Constrain all four edges of `child` to `parent`.
    fn pin_edges(&mut self, child: ViewId, parent: ViewId);
    fn set_clips_to_bounds(&mut self, view: ViewId, clips: bool);
    fn width(&self, view: ViewId) -> f32;

    fn set_transform(&mut self, view: ViewId, transform: Transform);
    fn set_alpha(&mut self, view: ViewId, alpha: f32);
    fn set_background(&mut self, view: ViewId, color: Color);
    fn set_shadow(&mut self, view: ViewId, style: ShadowStyle, opacity: f32);
    fn set_shadow_opacity(&mut self, view: ViewId, opacity: f32);
    fn set_interaction_enabled(&mut self, view: ViewId, enabled: bool);

    /// Register a left-edge pan recognizer on `view`. Its events are fed back
    /// through [`Navigator::handle_edge_pan`](crate::Navigator::handle_edge_pan).
    fn add_edge_pan(&mut self, view: ViewId) -> GestureId;
    fn remove_gesture(&mut self, view: ViewId, gesture: GestureId);
    /// `gesture` only begins once `other` has failed.
    fn require_to_fail(&mut self, gesture: GestureId, other: GestureId);
}
