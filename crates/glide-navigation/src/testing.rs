//! In-memory [`ViewHost`] that records every effect.
//!
//! Used by the tests and the headless demo; handy for any host-less check of
//! what the engine would have done to a real view tree.

use std::collections::HashMap;

use glide_core::{Color, Transform};

use crate::host::{GestureId, ShadowStyle, ViewHost, ViewId};

#[derive(Clone, Debug, PartialEq)]
pub enum HostOp {
    CreateView(ViewId),
    AddSubview { parent: ViewId, child: ViewId },
    RemoveFromParent(ViewId),
    BringToFront { parent: ViewId, child: ViewId },
    PinEdges { child: ViewId, parent: ViewId },
    ClipsToBounds { view: ViewId, clips: bool },
    Transform { view: ViewId, x: f32 },
    Alpha { view: ViewId, alpha: f32 },
    Background { view: ViewId, color: Color },
    Shadow { view: ViewId, opacity: f32 },
    ShadowOpacity { view: ViewId, opacity: f32 },
    Interaction { view: ViewId, enabled: bool },
    AddEdgePan { view: ViewId, gesture: GestureId },
    RemoveGesture { view: ViewId, gesture: GestureId },
    RequireToFail { gesture: GestureId, other: GestureId },
}

#[derive(Clone, Debug)]
pub struct ViewState {
    pub parent: Option<ViewId>,
    pub children: Vec<ViewId>,
    pub transform: Transform,
    pub alpha: f32,
    pub background: Option<Color>,
    pub shadow: Option<ShadowStyle>,
    pub shadow_opacity: f32,
    pub interaction: bool,
    pub clips: bool,
    pub pinned: bool,
    pub width: Option<f32>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::identity(),
            alpha: 1.0,
            background: None,
            shadow: None,
            shadow_opacity: 0.0,
            interaction: true,
            clips: false,
            pinned: false,
            width: None,
        }
    }
}

pub struct RecordingHost {
    views: HashMap<ViewId, ViewState>,
    gestures: HashMap<GestureId, ViewId>,
    failure_requirements: Vec<(GestureId, GestureId)>,
    ops: Vec<HostOp>,
    next_view: u64,
    next_gesture: u64,
    /// Width reported for views without an explicit one.
    pub default_width: f32,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
            gestures: HashMap::new(),
            failure_requirements: Vec::new(),
            ops: Vec::new(),
            next_view: 1,
            next_gesture: 1,
            default_width: 320.0,
        }
    }

    pub fn with_width(width: f32) -> Self {
        Self {
            default_width: width,
            ..Self::new()
        }
    }

    pub fn view(&self, view: ViewId) -> Option<&ViewState> {
        self.views.get(&view)
    }

    pub fn set_width(&mut self, view: ViewId, width: f32) {
        self.views.entry(view).or_default().width = Some(width);
    }

    pub fn parent_of(&self, view: ViewId) -> Option<ViewId> {
        self.views.get(&view).and_then(|v| v.parent)
    }

    pub fn translation_x(&self, view: ViewId) -> f32 {
        self.views
            .get(&view)
            .map(|v| v.transform.translate_x)
            .unwrap_or(0.0)
    }

    pub fn is_interactive(&self, view: ViewId) -> bool {
        self.views.get(&view).is_none_or(|v| v.interaction)
    }

    /// Gestures currently registered on `view`.
    pub fn gestures_on(&self, view: ViewId) -> Vec<GestureId> {
        let mut found: Vec<GestureId> = self
            .gestures
            .iter()
            .filter(|(_, v)| **v == view)
            .map(|(g, _)| *g)
            .collect();
        found.sort();
        found
    }

    pub fn failure_requirements(&self) -> &[(GestureId, GestureId)] {
        &self.failure_requirements
    }

    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    fn state(&mut self, view: ViewId) -> &mut ViewState {
        self.views.entry(view).or_default()
    }

    fn detach(&mut self, view: ViewId) {
        if let Some(parent) = self.views.get_mut(&view).and_then(|v| v.parent.take())
            && let Some(p) = self.views.get_mut(&parent)
        {
            p.children.retain(|c| *c != view);
        }
    }
}

impl ViewHost for RecordingHost {
    fn create_view(&mut self) -> ViewId {
        let id = ViewId(self.next_view);
        self.next_view += 1;
        self.views.insert(id, ViewState::default());
        self.ops.push(HostOp::CreateView(id));
        id
    }

    fn add_subview(&mut self, parent: ViewId, child: ViewId) {
        self.detach(child);
        self.state(child).parent = Some(parent);
        self.state(parent).children.push(child);
        self.ops.push(HostOp::AddSubview { parent, child });
    }

    fn remove_from_parent(&mut self, view: ViewId) {
        self.detach(view);
        self.state(view).pinned = false;
        self.ops.push(HostOp::RemoveFromParent(view));
    }

    fn subviews(&self, parent: ViewId) -> Vec<ViewId> {
        self.views
            .get(&parent)
            .map(|v| v.children.clone())
            .unwrap_or_default()
    }

    fn bring_to_front(&mut self, parent: ViewId, child: ViewId) {
        let p = self.state(parent);
        if let Some(pos) = p.children.iter().position(|c| *c == child) {
            p.children.remove(pos);
            p.children.push(child);
        }
        self.ops.push(HostOp::BringToFront { parent, child });
    }

    fn pin_edges(&mut self, child: ViewId, parent: ViewId) {
        self.state(child).pinned = true;
        self.ops.push(HostOp::PinEdges { child, parent });
    }

    fn set_clips_to_bounds(&mut self, view: ViewId, clips: bool) {
        self.state(view).clips = clips;
        self.ops.push(HostOp::ClipsToBounds { view, clips });
    }

    fn width(&self, view: ViewId) -> f32 {
        self.views
            .get(&view)
            .and_then(|v| v.width)
            .unwrap_or(self.default_width)
    }

    fn set_transform(&mut self, view: ViewId, transform: Transform) {
        self.state(view).transform = transform;
        self.ops.push(HostOp::Transform {
            view,
            x: transform.translate_x,
        });
    }

    fn set_alpha(&mut self, view: ViewId, alpha: f32) {
        self.state(view).alpha = alpha;
        self.ops.push(HostOp::Alpha { view, alpha });
    }

    fn set_background(&mut self, view: ViewId, color: Color) {
        self.state(view).background = Some(color);
        self.ops.push(HostOp::Background { view, color });
    }

    fn set_shadow(&mut self, view: ViewId, style: ShadowStyle, opacity: f32) {
        let s = self.state(view);
        s.shadow = Some(style);
        s.shadow_opacity = opacity;
        self.ops.push(HostOp::Shadow { view, opacity });
    }

    fn set_shadow_opacity(&mut self, view: ViewId, opacity: f32) {
        self.state(view).shadow_opacity = opacity;
        self.ops.push(HostOp::ShadowOpacity { view, opacity });
    }

    fn set_interaction_enabled(&mut self, view: ViewId, enabled: bool) {
        self.state(view).interaction = enabled;
        self.ops.push(HostOp::Interaction { view, enabled });
    }

    fn add_edge_pan(&mut self, view: ViewId) -> GestureId {
        let gesture = GestureId(self.next_gesture);
        self.next_gesture += 1;
        self.gestures.insert(gesture, view);
        self.ops.push(HostOp::AddEdgePan { view, gesture });
        gesture
    }

    fn remove_gesture(&mut self, view: ViewId, gesture: GestureId) {
        self.gestures.remove(&gesture);
        self.failure_requirements
            .retain(|(g, other)| *g != gesture && *other != gesture);
        self.ops.push(HostOp::RemoveGesture { view, gesture });
    }

    fn require_to_fail(&mut self, gesture: GestureId, other: GestureId) {
        self.failure_requirements.push((gesture, other));
        self.ops.push(HostOp::RequireToFail { gesture, other });
    }
}
