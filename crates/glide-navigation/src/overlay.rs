use std::any::TypeId;

use glide_core::{NavError, NavResult};

use crate::host::ViewHost;
use crate::navigator::{Navigator, Placement};
use crate::screen::{Screen, ScreenKey, ScreenRequest};

impl<H: ViewHost> Navigator<H> {
    /// Layer a `T` over `owner`, filling its view. No animation.
    pub fn add_overlay<T: Screen>(&mut self, owner: ScreenKey, req: ScreenRequest) -> NavResult<ScreenKey> {
        self.add_overlay_with::<T>(owner, req, |_| {})
    }

    pub fn add_overlay_with<T: Screen>(
        &mut self,
        owner: ScreenKey,
        req: ScreenRequest,
        prepare: impl FnOnce(&mut T),
    ) -> NavResult<ScreenKey> {
        let host_view = self.node(owner)?.screen.view();
        self.check_available::<T>(&req)?;

        let key = self.obtain::<T>(req.id.as_deref(), req.cache);
        let view = self.view_of(key).ok_or(NavError::UnknownScreen)?;
        if let Some(node) = self.screens.get_mut(key) {
            node.owner = Some(owner);
            node.placement = Some(Placement::Overlay(owner));
        }
        if let Some(node) = self.screens.get_mut(owner) {
            node.overlays.push(key);
            log::debug!("overlay on {} (count {})", node.id, node.overlays.len());
        }

        self.host.add_subview(host_view, view);
        self.host.pin_edges(view, host_view);

        if let Some(screen) = self.screen_mut::<T>(key) {
            prepare(screen);
        }
        self.added(key);
        self.enter(key);
        Ok(key)
    }

    /// Remove the topmost overlay of `owner`.
    pub fn remove_overlay(&mut self, owner: ScreenKey) -> Option<ScreenKey> {
        let key = self.screens.get_mut(owner)?.overlays.pop()?;
        self.detach_overlay(key);
        Some(key)
    }

    /// Remove the lowest overlay of `owner` whose concrete type is `T`.
    pub fn remove_overlay_of<T: Screen>(&mut self, owner: ScreenKey) -> Option<ScreenKey> {
        let wanted = TypeId::of::<T>();
        let index = self
            .overlays(owner)
            .iter()
            .position(|&k| self.screen_id(k).is_some_and(|id| id.type_id() == wanted))?;
        let key = self.screens.get_mut(owner)?.overlays.remove(index);
        self.detach_overlay(key);
        Some(key)
    }

    /// Remove every overlay of `owner`, most recently added first.
    pub fn remove_all_overlays(&mut self, owner: ScreenKey) -> usize {
        let mut count = 0;
        while self.remove_overlay(owner).is_some() {
            count += 1;
        }
        count
    }

    fn detach_overlay(&mut self, key: ScreenKey) {
        if let Some(node) = self.screens.get_mut(key) {
            node.owner = None;
        }
        if let Some(view) = self.view_of(key) {
            self.host.remove_from_parent(view);
        }
        self.leave(key);
        self.removed(key);
        self.release(key);
    }
}
