use std::any::Any;

use glide_core::{NavError, NavResult, TaskHolder};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::cache::ScreenCache;
use crate::config::NavConfig;
use crate::gesture::Drag;
use crate::host::{GestureId, ViewHost, ViewId};
use crate::lifecycle::{LifecycleEvent, LifecycleState};
use crate::screen::{BuildCx, LifecycleCx, Screen, ScreenId, ScreenKey, ScreenRequest};
use crate::transition::{NavEvent, Transition, TransitionToken};

/// Where a screen is currently an active entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    Root,
    Stacked(ScreenKey),
    Overlay(ScreenKey),
}

/// Per-root slide state. Only meaningful for screens with a container.
#[derive(Default)]
pub(crate) enum Phase {
    #[default]
    Idle,
    Animating(Transition),
    Dragging(Drag),
}

#[derive(Default)]
pub(crate) struct RootState {
    pub(crate) edge_pan: Option<GestureId>,
    pub(crate) skin: Option<ViewId>,
    pub(crate) phase: Phase,
}

pub(crate) struct ScreenNode {
    pub(crate) screen: Box<dyn Screen>,
    pub(crate) id: ScreenId,
    pub(crate) cached: bool,
    pub(crate) state: LifecycleState,
    pub(crate) is_foreground: bool,
    pub(crate) tasks: TaskHolder,
    /// Non-owning: the screen an overlay or sub-screen belongs to.
    pub(crate) owner: Option<ScreenKey>,
    /// Non-owning: the root whose stack this screen was pushed on.
    pub(crate) navigation_root: Option<ScreenKey>,
    pub(crate) placement: Option<Placement>,
    pub(crate) sub_screens: SmallVec<[ScreenKey; 4]>,
    pub(crate) stack: Vec<ScreenKey>,
    pub(crate) overlays: Vec<ScreenKey>,
    pub(crate) root: RootState,
}

impl ScreenNode {
    fn new(screen: Box<dyn Screen>, id: ScreenId, cached: bool) -> Self {
        Self {
            screen,
            id,
            cached,
            state: LifecycleState::Created,
            is_foreground: false,
            tasks: TaskHolder::new(),
            owner: None,
            navigation_root: None,
            placement: None,
            sub_screens: SmallVec::new(),
            stack: Vec::new(),
            overlays: Vec::new(),
            root: RootState::default(),
        }
    }
}

/// Owns every screen, the instance cache and the slide/overlay stacks.
///
/// All mutation happens on one thread. Animations advance only when the host
/// calls [`tick`](Navigator::tick).
pub struct Navigator<H: ViewHost> {
    pub(crate) host: H,
    pub(crate) config: NavConfig,
    pub(crate) screens: SlotMap<ScreenKey, ScreenNode>,
    pub(crate) cache: ScreenCache<ScreenKey>,
    pub(crate) events: Vec<NavEvent>,
    next_token: u64,
}

impl<H: ViewHost> Navigator<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, NavConfig::default())
    }

    pub fn with_config(host: H, config: NavConfig) -> Self {
        Self {
            host,
            config,
            screens: SlotMap::with_key(),
            cache: ScreenCache::new(),
            events: Vec::new(),
            next_token: 1,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
    pub fn config(&self) -> &NavConfig {
        &self.config
    }
    pub fn set_config(&mut self, config: NavConfig) {
        self.config = config;
    }

    /// Cached instance for `T`/`id`, built on first use.
    ///
    /// One-shot (`cache: false`) instances are only built by the operations
    /// that place them, so every one of them is freed after its `removed()`.
    pub fn instance<T: Screen>(&mut self, id: Option<&str>) -> ScreenKey {
        self.obtain::<T>(id, true)
    }

    pub(crate) fn obtain<T: Screen>(&mut self, id: Option<&str>, cache: bool) -> ScreenKey {
        let sid = ScreenId::of::<T>(id);
        let Self {
            host,
            screens,
            cache: memo,
            ..
        } = self;
        memo.get_or_insert_with(sid, cache, |sid| {
            let screen = T::build(&mut BuildCx::new(sid, host));
            log::debug!("built {sid}");
            screens.insert(ScreenNode::new(Box::new(screen), sid.clone(), cache))
        })
    }

    /// Cached instance for `T`/`id`, without building one.
    pub fn cached_instance<T: Screen>(&self, id: Option<&str>) -> Option<ScreenKey> {
        self.cache.get(&ScreenId::of::<T>(id)).copied()
    }

    /// Build `T` as a top-level screen and bring it to the foreground.
    pub fn mount_root<T: Screen>(&mut self, req: ScreenRequest) -> NavResult<ScreenKey> {
        self.mount_root_with::<T>(req, |_| {})
    }

    pub fn mount_root_with<T: Screen>(
        &mut self,
        req: ScreenRequest,
        prepare: impl FnOnce(&mut T),
    ) -> NavResult<ScreenKey> {
        self.check_available::<T>(&req)?;
        let key = self.obtain::<T>(req.id.as_deref(), req.cache);
        if let Some(node) = self.screens.get_mut(key) {
            node.placement = Some(Placement::Root);
        }
        if let Some(screen) = self.screen_mut::<T>(key) {
            prepare(screen);
        }
        self.added(key);
        self.enter(key);
        Ok(key)
    }

    /// Tear down a root: its overlays, its stack, then the root itself.
    pub fn unmount_root(&mut self, root: ScreenKey) -> NavResult<()> {
        self.node(root)?;
        self.remove_all_overlays(root);
        self.pop_all(root, false)?;
        self.leave(root);
        self.removed(root);
        self.release(root);
        Ok(())
    }

    /// Build a nested screen owned by `owner`.
    ///
    /// Sub-screens follow their owner through `added()`/`removed()`; the ones
    /// the owner lists in `foreground_sub_screens()` also enter and leave with it.
    pub fn add_sub_screen<T: Screen>(
        &mut self,
        owner: ScreenKey,
        id: Option<&str>,
    ) -> NavResult<ScreenKey> {
        self.node(owner)?;
        let key = self.obtain::<T>(id, false);
        self.adopt_sub_screen(owner, key)?;
        Ok(key)
    }

    /// Make `child` a sub-screen of `owner`, detaching it from any previous
    /// owner. Adopting twice is a no-op.
    pub fn adopt_sub_screen(&mut self, owner: ScreenKey, child: ScreenKey) -> NavResult<()> {
        self.node(owner)?;
        let node = self.screens.get_mut(child).ok_or(NavError::UnknownScreen)?;
        if let Some(previous) = node.owner.replace(owner)
            && let Some(previous) = self.screens.get_mut(previous)
        {
            previous.sub_screens.retain(|k| *k != child);
        }
        if let Some(owner) = self.screens.get_mut(owner) {
            owner.sub_screens.push(child);
        }
        Ok(())
    }

    // Lifecycle

    pub fn added(&mut self, key: ScreenKey) {
        if !self.advance(key, LifecycleEvent::Added) {
            return;
        }
        self.run_hook(key, |s, cx| s.on_added(cx));
        for sub in self.sub_screen_list(key) {
            self.added(sub);
        }
    }

    /// Bring the foreground-most descendant of `key` into the foreground.
    pub fn enter(&mut self, key: ScreenKey) {
        let target = self.foreground_screen(key);
        self.enter_foreground(target);
    }

    /// Send the foreground-most descendant of `key` to the background,
    /// cancelling its pending tasks.
    pub fn leave(&mut self, key: ScreenKey) {
        let target = self.foreground_screen(key);
        self.leave_foreground(target);
    }

    pub fn removed(&mut self, key: ScreenKey) {
        if self.lifecycle(key) == Some(LifecycleState::Foreground) {
            self.leave_foreground(key);
        }
        if !self.advance(key, LifecycleEvent::Removed) {
            return;
        }
        self.run_hook(key, |s, cx| s.on_removed(cx));
        for sub in self.sub_screen_list(key) {
            self.removed(sub);
        }
        if let Some(node) = self.screens.get_mut(key) {
            node.navigation_root = None;
            node.placement = None;
        }
    }

    fn enter_foreground(&mut self, key: ScreenKey) {
        if !self.advance(key, LifecycleEvent::Enter) {
            return;
        }
        if let Some(node) = self.screens.get_mut(key) {
            node.is_foreground = true;
            log::debug!("{} entered foreground", node.id);
        }
        self.run_hook(key, |s, cx| s.on_enter_foreground(cx));
        for sub in self.foreground_sub_list(key) {
            self.enter(sub);
        }
    }

    fn leave_foreground(&mut self, key: ScreenKey) {
        if !self.advance(key, LifecycleEvent::Leave) {
            return;
        }
        if let Some(node) = self.screens.get_mut(key) {
            node.tasks.clear_all();
        }
        self.run_hook(key, |s, cx| s.on_leave_foreground(cx));
        for sub in self.foreground_sub_list(key) {
            self.leave(sub);
        }
        if let Some(node) = self.screens.get_mut(key) {
            node.is_foreground = false;
            log::debug!("{} left foreground", node.id);
        }
    }

    fn advance(&mut self, key: ScreenKey, event: LifecycleEvent) -> bool {
        let Some(node) = self.screens.get_mut(key) else {
            return false;
        };
        match node.state.apply(event) {
            Ok(next) => {
                node.state = next;
                true
            }
            Err(e) => {
                log::debug!("{}: ignoring {:?} while {:?}", node.id, e.event, e.from);
                false
            }
        }
    }

    fn run_hook(&mut self, key: ScreenKey, hook: impl FnOnce(&mut dyn Screen, &mut LifecycleCx<'_>)) {
        if let Some(node) = self.screens.get_mut(key) {
            let ScreenNode {
                screen, id, tasks, ..
            } = node;
            let mut cx = LifecycleCx { key, id, tasks };
            hook(&mut **screen, &mut cx);
        }
    }

    fn sub_screen_list(&self, key: ScreenKey) -> SmallVec<[ScreenKey; 4]> {
        self.screens
            .get(key)
            .map(|n| n.sub_screens.clone())
            .unwrap_or_default()
    }

    fn foreground_sub_list(&self, key: ScreenKey) -> Vec<ScreenKey> {
        self.screens
            .get(key)
            .map(|n| n.screen.foreground_sub_screens())
            .unwrap_or_default()
    }

    /// Drop a one-shot screen (and whatever it still holds) from the arena.
    pub(crate) fn release(&mut self, key: ScreenKey) {
        let Some(node) = self.screens.get(key) else {
            return;
        };
        if node.cached {
            return;
        }
        if !node.overlays.is_empty() {
            self.remove_all_overlays(key);
        }
        let has_stack = self
            .screens
            .get(key)
            .is_some_and(|n| !n.stack.is_empty() || !matches!(n.root.phase, Phase::Idle));
        if has_stack {
            let _ = self.pop_all(key, false);
        }
        for sub in self.sub_screen_list(key) {
            self.removed(sub);
            self.release(sub);
        }
        if let Some(node) = self.screens.remove(key) {
            log::trace!("freed {}", node.id);
        }
    }

    pub(crate) fn check_available<T: Screen>(&self, req: &ScreenRequest) -> NavResult<()> {
        if !req.cache {
            return Ok(());
        }
        let sid = ScreenId::of::<T>(req.id.as_deref());
        if let Some(&key) = self.cache.get(&sid)
            && self.screens.get(key).is_some_and(|n| n.placement.is_some())
        {
            log::error!("{sid} is already active; refusing to place it twice");
            return Err(NavError::ScreenAlreadyActive {
                screen: sid.to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn node(&self, key: ScreenKey) -> NavResult<&ScreenNode> {
        self.screens.get(key).ok_or(NavError::UnknownScreen)
    }

    pub(crate) fn view_of(&self, key: ScreenKey) -> Option<ViewId> {
        self.screens.get(key).map(|n| n.screen.view())
    }

    pub(crate) fn next_token(&mut self) -> TransitionToken {
        let token = TransitionToken(self.next_token);
        self.next_token += 1;
        token
    }

    // Queries

    pub fn contains(&self, key: ScreenKey) -> bool {
        self.screens.contains_key(key)
    }

    pub fn screen<T: Screen>(&self, key: ScreenKey) -> Option<&T> {
        let screen: &dyn Any = &*self.screens.get(key)?.screen;
        screen.downcast_ref::<T>()
    }

    pub fn screen_mut<T: Screen>(&mut self, key: ScreenKey) -> Option<&mut T> {
        let screen: &mut dyn Any = &mut *self.screens.get_mut(key)?.screen;
        screen.downcast_mut::<T>()
    }

    pub fn screen_id(&self, key: ScreenKey) -> Option<&ScreenId> {
        self.screens.get(key).map(|n| &n.id)
    }

    pub fn lifecycle(&self, key: ScreenKey) -> Option<LifecycleState> {
        self.screens.get(key).map(|n| n.state)
    }

    pub fn is_foreground(&self, key: ScreenKey) -> bool {
        self.screens.get(key).is_some_and(|n| n.is_foreground)
    }

    /// Whether the screen `enter(key)` would act on is in the foreground.
    pub(crate) fn routes_to_foreground(&self, key: ScreenKey) -> bool {
        self.is_foreground(self.foreground_screen(key))
    }

    /// Deepest pushed screen below `key`, or `key` itself.
    pub fn foreground_screen(&self, key: ScreenKey) -> ScreenKey {
        let mut current = key;
        while let Some(&top) = self.screens.get(current).and_then(|n| n.stack.last()) {
            current = top;
        }
        current
    }

    pub fn stack(&self, root: ScreenKey) -> &[ScreenKey] {
        self.screens.get(root).map(|n| n.stack.as_slice()).unwrap_or(&[])
    }

    pub fn top(&self, root: ScreenKey) -> Option<ScreenKey> {
        self.stack(root).last().copied()
    }

    pub fn overlays(&self, owner: ScreenKey) -> &[ScreenKey] {
        self.screens
            .get(owner)
            .map(|n| n.overlays.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_overlay(&self, owner: ScreenKey) -> bool {
        !self.overlays(owner).is_empty()
    }

    pub fn sub_screens(&self, owner: ScreenKey) -> &[ScreenKey] {
        self.screens
            .get(owner)
            .map(|n| n.sub_screens.as_slice())
            .unwrap_or(&[])
    }

    pub fn owner(&self, key: ScreenKey) -> Option<ScreenKey> {
        self.screens.get(key).and_then(|n| n.owner)
    }

    pub fn navigation_root(&self, key: ScreenKey) -> Option<ScreenKey> {
        self.screens.get(key).and_then(|n| n.navigation_root)
    }

    pub fn edge_pan(&self, root: ScreenKey) -> Option<GestureId> {
        self.screens.get(root).and_then(|n| n.root.edge_pan)
    }

    pub fn skin(&self, root: ScreenKey) -> Option<ViewId> {
        self.screens.get(root).and_then(|n| n.root.skin)
    }

    /// A transition or an edge drag is in flight on `root`.
    pub fn is_busy(&self, root: ScreenKey) -> bool {
        self.screens
            .get(root)
            .is_some_and(|n| !matches!(n.root.phase, Phase::Idle))
    }

    pub fn transition(&self, root: ScreenKey) -> Option<TransitionToken> {
        match &self.screens.get(root)?.root.phase {
            Phase::Animating(t) => Some(t.token),
            _ => None,
        }
    }

    pub fn tasks_mut(&mut self, key: ScreenKey) -> Option<&mut TaskHolder> {
        self.screens.get_mut(key).map(|n| &mut n.tasks)
    }

    pub fn drain_events(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }
}
