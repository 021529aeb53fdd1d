//! Slide transitions.
//!
//! One mapping, [`SlideFrame::at`], turns a progress value into the layout of
//! everything involved in a slide. Programmatic pushes and pops animate that
//! progress over time; the edge gesture sets it directly while dragging and
//! then hands the rest of the distance to an animation.

use glide_core::Transform;
use glide_core::animation::{AnimatedValue, AnimationSpec};
use web_time::Instant;

use crate::host::{ViewHost, ViewId};
use crate::navigator::{Navigator, Phase};
use crate::screen::ScreenKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionToken(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward the pushed screen at rest (progress → 1).
    Forward,
    /// Toward the pushed screen off-screen (progress → 0).
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Programmatic,
    Gesture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The moving screen came to rest in place.
    Settled,
    /// The moving screen was popped and torn down.
    Popped(ScreenKey),
}

#[derive(Clone, Debug, PartialEq)]
pub enum NavEvent {
    TransitionFinished {
        root: ScreenKey,
        token: TransitionToken,
        direction: Direction,
        source: Source,
        outcome: TransitionOutcome,
    },
}

/// Layout of a slide at one progress value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideFrame {
    /// Horizontal offset of the upper (pushed) screen.
    pub front_offset: f32,
    /// Horizontal offset of everything beneath it in the container.
    pub behind_offset: f32,
    pub skin_alpha: f32,
    pub shadow_opacity: f32,
}

impl SlideFrame {
    /// `progress` is 1.0 with the upper screen at rest and 0.0 with it fully
    /// off the right edge. Values outside 0..=1 are clamped.
    pub fn at(progress: f32, width: f32, slide_fraction: f32) -> Self {
        let p = progress.clamp(0.0, 1.0);
        Self {
            front_offset: width * (1.0 - p),
            behind_offset: -width * slide_fraction * p,
            skin_alpha: p,
            shadow_opacity: p,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Completion {
    Settle,
    FinishPop(ScreenKey),
}

pub(crate) struct Transition {
    pub(crate) token: TransitionToken,
    pub(crate) direction: Direction,
    pub(crate) source: Source,
    pub(crate) container: ViewId,
    pub(crate) moving: ViewId,
    pub(crate) width: f32,
    pub(crate) completion: Completion,
    value: AnimatedValue<f32>,
    to: f32,
    started: bool,
}

impl Transition {
    /// Advance to `now`. The first step pins the start time.
    fn step(&mut self, now: Instant) -> bool {
        if !self.started {
            self.started = true;
            self.value.set_target(self.to, now);
        }
        self.value.update(now)
    }

    fn progress(&self) -> f32 {
        *self.value.get()
    }
}

pub(crate) struct TransitionPlan {
    pub(crate) container: ViewId,
    pub(crate) moving: ViewId,
    pub(crate) from: f32,
    pub(crate) spec: AnimationSpec,
    pub(crate) direction: Direction,
    pub(crate) source: Source,
    pub(crate) completion: Completion,
}

pub(crate) fn apply_frame<H: ViewHost>(
    host: &mut H,
    container: ViewId,
    moving: ViewId,
    skin: Option<ViewId>,
    frame: &SlideFrame,
) {
    for view in host.subviews(container) {
        if view != moving && Some(view) != skin {
            host.set_transform(view, Transform::translate(frame.behind_offset, 0.0));
        }
    }
    host.set_transform(moving, Transform::translate(frame.front_offset, 0.0));
    host.set_shadow_opacity(moving, frame.shadow_opacity);
    if let Some(skin) = skin {
        host.set_alpha(skin, frame.skin_alpha);
    }
}

impl<H: ViewHost> Navigator<H> {
    /// Advance every running transition to `now`.
    ///
    /// Returns `true` while at least one transition is still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        let animating: Vec<ScreenKey> = self
            .screens
            .iter()
            .filter(|(_, n)| matches!(n.root.phase, Phase::Animating(_)))
            .map(|(k, _)| k)
            .collect();

        let slide_fraction = self.config.slide_fraction;
        let mut running = false;
        for root in animating {
            let Some(node) = self.screens.get_mut(root) else {
                continue;
            };
            let skin = node.root.skin;
            let Phase::Animating(t) = &mut node.root.phase else {
                continue;
            };
            let still_running = t.step(now);
            let frame = SlideFrame::at(t.progress(), t.width, slide_fraction);
            log::trace!("{:?} progress {:.3}", t.token, t.progress());
            apply_frame(&mut self.host, t.container, t.moving, skin, &frame);
            if still_running {
                running = true;
                continue;
            }
            if let Phase::Animating(t) = std::mem::take(&mut node.root.phase) {
                self.finalize(root, t);
            }
        }
        running
    }

    /// Lock input and start animating `plan.from` toward the end implied by
    /// its direction. Zero-length plans finish before returning.
    pub(crate) fn begin_transition(&mut self, root: ScreenKey, plan: TransitionPlan) -> TransitionToken {
        self.host.set_interaction_enabled(plan.container, false);
        self.host.set_interaction_enabled(plan.moving, false);

        let token = self.next_token();
        let to = match plan.direction {
            Direction::Forward => 1.0,
            Direction::Backward => 0.0,
        };
        let transition = Transition {
            token,
            direction: plan.direction,
            source: plan.source,
            container: plan.container,
            moving: plan.moving,
            width: self.host.width(plan.container),
            completion: plan.completion,
            value: AnimatedValue::new(plan.from, plan.spec),
            to,
            started: false,
        };
        log::debug!(
            "{token:?}: {:?} {:?} from {:.2} over {:?}",
            plan.source,
            plan.direction,
            plan.from,
            plan.spec.duration
        );

        if plan.spec.duration.is_zero() {
            self.finalize(root, transition);
        } else if let Some(node) = self.screens.get_mut(root) {
            node.root.phase = Phase::Animating(transition);
        }
        token
    }

    /// Snap `root` to the end of whatever it is doing, running completions.
    pub(crate) fn settle_now(&mut self, root: ScreenKey) {
        let Some(node) = self.screens.get_mut(root) else {
            return;
        };
        match std::mem::take(&mut node.root.phase) {
            Phase::Idle => {}
            Phase::Animating(t) => self.finalize(root, t),
            Phase::Dragging(drag) => {
                for view in self.host.subviews(drag.container) {
                    self.host.set_transform(view, Transform::identity());
                }
                self.host.set_shadow_opacity(drag.front, 0.0);
                self.hide_skin(root);
            }
        }
    }

    fn finalize(&mut self, root: ScreenKey, t: Transition) {
        self.hide_skin(root);
        for view in self.host.subviews(t.container) {
            self.host.set_transform(view, Transform::identity());
        }
        self.host.set_shadow_opacity(t.moving, 0.0);

        let outcome = match t.completion {
            Completion::Settle => TransitionOutcome::Settled,
            Completion::FinishPop(popped) => {
                self.finish_pop(root, popped);
                TransitionOutcome::Popped(popped)
            }
        };

        self.host.set_interaction_enabled(t.container, true);
        self.host.set_interaction_enabled(t.moving, true);
        log::debug!("{:?} finished: {outcome:?}", t.token);
        self.events.push(NavEvent::TransitionFinished {
            root,
            token: t.token,
            direction: t.direction,
            source: t.source,
            outcome,
        });
    }

    /// Upper screen parked off the right edge, skin transparent.
    pub(crate) fn prepare_forward(&mut self, root: ScreenKey, container: ViewId, moving: ViewId) {
        self.show_skin(root, container, moving, 0.0);
        let shadow = self.config.shadow;
        self.host.set_shadow(moving, shadow, 0.0);
        let width = self.host.width(container);
        self.host.set_transform(moving, Transform::translate(width, 0.0));
    }

    /// Revealed screens parked to the left, skin and shadow fully on.
    pub(crate) fn prepare_back(&mut self, root: ScreenKey, container: ViewId, moving: ViewId) {
        self.show_skin(root, container, moving, 1.0);
        let shadow = self.config.shadow;
        self.host.set_shadow(moving, shadow, 1.0);
        let skin = self.skin(root);
        let frame = SlideFrame::at(1.0, self.host.width(container), self.config.slide_fraction);
        for view in self.host.subviews(container) {
            if view != moving && Some(view) != skin {
                self.host
                    .set_transform(view, Transform::translate(frame.behind_offset, 0.0));
            }
        }
    }

    /// Insert the scrim under `front` unless one is already showing.
    pub(crate) fn show_skin(&mut self, root: ScreenKey, container: ViewId, front: ViewId, alpha: f32) {
        if self.skin(root).is_some() {
            return;
        }
        let skin = self.host.create_view();
        let color = self.config.skin_color;
        self.host.set_background(skin, color);
        self.host.set_alpha(skin, alpha);
        self.host.add_subview(container, skin);
        self.host.pin_edges(skin, container);
        self.host.bring_to_front(container, front);
        if let Some(node) = self.screens.get_mut(root) {
            node.root.skin = Some(skin);
        }
    }

    pub(crate) fn hide_skin(&mut self, root: ScreenKey) {
        let skin = self.screens.get_mut(root).and_then(|n| n.root.skin.take());
        if let Some(skin) = skin {
            self.host.remove_from_parent(skin);
        }
    }
}
