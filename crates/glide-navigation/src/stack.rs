use glide_core::{NavError, NavResult};

use crate::host::{GestureId, ViewHost};
use crate::navigator::{Navigator, Placement};
use crate::screen::{Screen, ScreenKey, ScreenRequest};
use crate::transition::{Completion, Direction, Source, TransitionPlan};

impl<H: ViewHost> Navigator<H> {
    /// Slide a `T` in on top of `root`'s stack.
    pub fn push<T: Screen>(&mut self, root: ScreenKey, req: ScreenRequest) -> NavResult<ScreenKey> {
        self.push_with::<T>(root, req, |_| {})
    }

    /// Like [`push`](Navigator::push), running `prepare` on the instance
    /// before it is added and entered.
    pub fn push_with<T: Screen>(
        &mut self,
        root: ScreenKey,
        req: ScreenRequest,
        prepare: impl FnOnce(&mut T),
    ) -> NavResult<ScreenKey> {
        let node = self.node(root)?;
        let root_view = node.screen.view();
        let Some(container) = node.screen.container() else {
            log::error!("push on {} which has no container", node.id);
            return Err(NavError::MissingContainer {
                screen: node.id.to_string(),
            });
        };
        self.ensure_idle(root)?;
        self.check_available::<T>(&req)?;

        let key = self.obtain::<T>(req.id.as_deref(), req.cache);
        let view = self.view_of(key).ok_or(NavError::UnknownScreen)?;
        if let Some(node) = self.screens.get_mut(key) {
            node.navigation_root = Some(root);
            node.placement = Some(Placement::Stacked(root));
        }

        self.host.add_subview(container, view);
        self.host.pin_edges(view, container);
        self.host.set_clips_to_bounds(container, true);

        // A root that is itself covered stays covered; its new top only
        // enters once the root does.
        let visible = self.routes_to_foreground(root);
        self.leave(root);
        if let Some(node) = self.screens.get_mut(root) {
            node.stack.push(key);
            log::debug!("pushed onto {} (depth {})", node.id, node.stack.len());
        }

        if req.animated {
            self.prepare_forward(root, container, view);
            let spec = self.config.animation();
            self.begin_transition(
                root,
                TransitionPlan {
                    container,
                    moving: view,
                    from: 0.0,
                    spec,
                    direction: Direction::Forward,
                    source: Source::Programmatic,
                    completion: Completion::Settle,
                },
            );
        }

        if self.edge_pan(root).is_none() {
            let gesture = self.host.add_edge_pan(root_view);
            if let Some(node) = self.screens.get_mut(root) {
                node.root.edge_pan = Some(gesture);
            }
        }

        if let Some(screen) = self.screen_mut::<T>(key) {
            prepare(screen);
        }
        self.added(key);
        if visible {
            self.enter(key);
        }
        Ok(key)
    }

    /// Slide the top screen of `root` out. Empty stacks are a no-op.
    ///
    /// Lifecycle runs immediately (the revealed screen only enters if the
    /// popped one was in the foreground); the popped screen is detached and
    /// `removed()` when the animation finishes (or right away if not animated).
    pub fn pop(&mut self, root: ScreenKey, animated: bool) -> NavResult<Option<ScreenKey>> {
        let node = self.node(root)?;
        let Some(container) = node.screen.container() else {
            return Ok(None);
        };
        if node.stack.is_empty() {
            return Ok(None);
        }
        self.ensure_idle(root)?;

        let visible = self.routes_to_foreground(root);
        let Some(popped) = self.screens.get_mut(root).and_then(|n| n.stack.pop()) else {
            return Ok(None);
        };
        self.leave(popped);
        if visible {
            self.enter(root);
        }

        match self.view_of(popped) {
            Some(moving) if animated => {
                self.prepare_back(root, container, moving);
                let spec = self.config.animation();
                self.begin_transition(
                    root,
                    TransitionPlan {
                        container,
                        moving,
                        from: 1.0,
                        spec,
                        direction: Direction::Backward,
                        source: Source::Programmatic,
                        completion: Completion::FinishPop(popped),
                    },
                );
            }
            _ => self.finish_pop(root, popped),
        }
        Ok(Some(popped))
    }

    /// Remove every pushed screen without animation.
    ///
    /// `run_enter` re-enters the root afterwards (forced reset); otherwise the
    /// root is left in the background (it is about to go away). Any running
    /// transition or drag on `root` is settled first.
    pub fn pop_all(&mut self, root: ScreenKey, run_enter: bool) -> NavResult<usize> {
        self.node(root)?;
        self.settle_now(root);
        self.leave(root);

        let entries = self
            .screens
            .get_mut(root)
            .map(|n| std::mem::take(&mut n.stack))
            .unwrap_or_default();
        for &key in &entries {
            if let Some(view) = self.view_of(key) {
                self.host.remove_from_parent(view);
            }
            self.removed(key);
        }
        for &key in &entries {
            self.release(key);
        }
        self.clear_edge_pan(root);

        if run_enter {
            self.enter(root);
        }
        log::debug!("popped all ({}) from root", entries.len());
        Ok(entries.len())
    }

    /// Make `scroll_gesture` wait for the edge-pan of `screen`'s navigation
    /// root to fail, so a scroll view does not swallow the back swipe.
    pub fn require_edge_pan_priority(&mut self, screen: ScreenKey, scroll_gesture: GestureId) -> bool {
        let Some(edge_pan) = self.navigation_root(screen).and_then(|root| self.edge_pan(root)) else {
            return false;
        };
        self.host.require_to_fail(scroll_gesture, edge_pan);
        true
    }

    pub(crate) fn finish_pop(&mut self, root: ScreenKey, popped: ScreenKey) {
        if let Some(view) = self.view_of(popped) {
            self.host.remove_from_parent(view);
        }
        self.removed(popped);
        self.clear_edge_pan(root);
        self.release(popped);
    }

    pub(crate) fn ensure_idle(&self, root: ScreenKey) -> NavResult<()> {
        if self.is_busy(root) {
            let name = self.node(root)?.id.to_string();
            log::warn!("{name} is busy; rejecting overlapping transition");
            return Err(NavError::TransitionInProgress { root: name });
        }
        Ok(())
    }

    fn clear_edge_pan(&mut self, root: ScreenKey) {
        let Some(node) = self.screens.get_mut(root) else {
            return;
        };
        if !node.stack.is_empty() {
            return;
        }
        if let Some(gesture) = node.root.edge_pan.take() {
            let view = node.screen.view();
            self.host.remove_gesture(view, gesture);
        }
    }
}
