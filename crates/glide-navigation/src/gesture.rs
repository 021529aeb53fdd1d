//! Edge-swipe back.
//!
//! The host forwards the phases of its left-edge pan recognizer. While the
//! finger moves, the slide is positioned directly from the translation; on
//! release the [`CommitRule`](crate::CommitRule) decides between finishing
//! the pop and springing back, and the remaining distance is animated.
//! Lifecycle callbacks only run once the pop actually commits.

use glide_core::{NavResult, Vec2};

use crate::host::{ViewHost, ViewId};
use crate::navigator::{Navigator, Phase};
use crate::screen::ScreenKey;
use crate::transition::{
    Completion, Direction, SlideFrame, Source, TransitionPlan, TransitionToken, apply_frame,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One event from the edge-pan recognizer, in the dragged view's coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePan {
    pub phase: PanPhase,
    pub translation: Vec2,
    /// Points per second.
    pub velocity: Vec2,
}

impl EdgePan {
    pub fn began() -> Self {
        Self {
            phase: PanPhase::Began,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
        }
    }
    pub fn changed(dx: f32) -> Self {
        Self {
            phase: PanPhase::Changed,
            translation: Vec2::new(dx, 0.0),
            velocity: Vec2::ZERO,
        }
    }
    pub fn ended(dx: f32, vx: f32) -> Self {
        Self {
            phase: PanPhase::Ended,
            translation: Vec2::new(dx, 0.0),
            velocity: Vec2::new(vx, 0.0),
        }
    }
    pub fn cancelled(dx: f32, vx: f32) -> Self {
        Self {
            phase: PanPhase::Cancelled,
            ..Self::ended(dx, vx)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanResponse {
    /// No stack to go back through, or the root is mid-animation.
    Ignored,
    /// The slide follows the finger.
    Tracking,
    /// Released without having moved; nothing to animate.
    AtRest,
    /// Released past the threshold; the pop is finishing.
    Commit(TransitionToken),
    /// Released short of the threshold; springing back.
    Cancel(TransitionToken),
}

/// Live drag on a root.
pub(crate) struct Drag {
    pub(crate) container: ViewId,
    pub(crate) front: ViewId,
    width: f32,
    /// Same scale as transitions: 1.0 is at rest.
    progress: f32,
    offset: f32,
}

impl<H: ViewHost> Navigator<H> {
    pub fn handle_edge_pan(&mut self, root: ScreenKey, pan: EdgePan) -> NavResult<PanResponse> {
        let node = self.node(root)?;
        let Some(container) = node.screen.container() else {
            return Ok(PanResponse::Ignored);
        };
        let Some(&top) = node.stack.last() else {
            return Ok(PanResponse::Ignored);
        };
        if matches!(node.root.phase, Phase::Animating(_)) {
            return Ok(PanResponse::Ignored);
        }
        let rule = node.screen.commit_rule().unwrap_or(self.config.commit);
        let Some(front) = self.view_of(top) else {
            return Ok(PanResponse::Ignored);
        };
        let width = self.host.width(front);
        if width <= 0.0 {
            return Ok(PanResponse::Ignored);
        }

        let previous = self
            .screens
            .get_mut(root)
            .map(|n| std::mem::take(&mut n.root.phase));
        let mut drag = match previous {
            Some(Phase::Dragging(drag)) => drag,
            _ => {
                log::debug!("edge drag started");
                let shadow = self.config.shadow;
                self.host.set_shadow(front, shadow, 0.0);
                Drag {
                    container,
                    front,
                    width,
                    progress: 1.0,
                    offset: 0.0,
                }
            }
        };
        // Drawn before anything moves so it does not flash in.
        self.show_skin(root, container, front, 1.0);

        let tx = pan.translation.x;
        if tx > 0.0 {
            drag.progress = (1.0 - tx / drag.width).clamp(0.0, 1.0);
            let frame = SlideFrame::at(drag.progress, drag.width, self.config.slide_fraction);
            let skin = self.skin(root);
            apply_frame(&mut self.host, container, front, skin, &frame);
            drag.offset = frame.front_offset;
        }

        match pan.phase {
            PanPhase::Began | PanPhase::Changed => {
                if let Some(node) = self.screens.get_mut(root) {
                    node.root.phase = Phase::Dragging(drag);
                }
                Ok(PanResponse::Tracking)
            }
            PanPhase::Ended | PanPhase::Cancelled => {
                let commit = rule.should_commit(drag.width, tx, pan.velocity.x);
                Ok(self.release_drag(root, top, drag, &pan, commit))
            }
        }
    }

    fn release_drag(
        &mut self,
        root: ScreenKey,
        top: ScreenKey,
        drag: Drag,
        pan: &EdgePan,
        commit: bool,
    ) -> PanResponse {
        if drag.offset == 0.0 {
            self.hide_skin(root);
            self.host.set_shadow_opacity(drag.front, 0.0);
            return PanResponse::AtRest;
        }
        log::debug!(
            "edge drag released at {:.1} ({:.0} pt/s): {}",
            pan.translation.x,
            pan.velocity.x,
            if commit { "commit" } else { "cancel" }
        );
        let full = self.config.animation();

        if commit {
            let visible = self.routes_to_foreground(root);
            if let Some(node) = self.screens.get_mut(root) {
                node.stack.pop();
            }
            self.leave(top);
            if visible {
                self.enter(root);
            }
            let token = self.begin_transition(
                root,
                TransitionPlan {
                    container: drag.container,
                    moving: drag.front,
                    from: drag.progress,
                    spec: full.scaled(drag.progress),
                    direction: Direction::Backward,
                    source: Source::Gesture,
                    completion: Completion::FinishPop(top),
                },
            );
            PanResponse::Commit(token)
        } else {
            let token = self.begin_transition(
                root,
                TransitionPlan {
                    container: drag.container,
                    moving: drag.front,
                    from: drag.progress,
                    spec: full.scaled(1.0 - drag.progress),
                    direction: Direction::Forward,
                    source: Source::Gesture,
                    completion: Completion::Settle,
                },
            );
            PanResponse::Cancel(token)
        }
    }
}
