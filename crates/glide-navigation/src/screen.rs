use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use glide_core::TaskHolder;
use slotmap::new_key_type;

use crate::config::CommitRule;
use crate::host::{ViewHost, ViewId};

new_key_type! {
    /// Handle to a screen living in a [`Navigator`](crate::Navigator).
    pub struct ScreenKey;
}

/// Screen type plus optional discriminator; the cache key.
#[derive(Clone, Debug)]
pub struct ScreenId {
    type_id: TypeId,
    type_name: &'static str,
    discriminator: Option<String>,
}

impl ScreenId {
    pub fn of<T: 'static>(discriminator: Option<&str>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            discriminator: discriminator.map(str::to_owned),
        }
    }
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
    pub fn discriminator(&self) -> Option<&str> {
        self.discriminator.as_deref()
    }
    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        let base = self.type_name.split('<').next().unwrap_or(self.type_name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for ScreenId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.discriminator == other.discriminator
    }
}
impl Eq for ScreenId {}

impl Hash for ScreenId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.discriminator.hash(state);
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.discriminator {
            Some(d) => write!(f, "{}#{d}", self.short_name()),
            None => f.write_str(self.short_name()),
        }
    }
}

pub struct BuildCx<'a> {
    id: &'a ScreenId,
    host: &'a mut dyn ViewHost,
}

impl<'a> BuildCx<'a> {
    pub(crate) fn new(id: &'a ScreenId, host: &'a mut dyn ViewHost) -> Self {
        Self { id, host }
    }
    pub fn id(&self) -> &ScreenId {
        self.id
    }
    pub fn host(&mut self) -> &mut dyn ViewHost {
        &mut *self.host
    }
}

/// Passed to lifecycle hooks.
pub struct LifecycleCx<'a> {
    pub key: ScreenKey,
    pub id: &'a ScreenId,
    /// Cleared (every handle run) when the screen leaves the foreground.
    pub tasks: &'a mut TaskHolder,
}

/// One navigable unit of UI.
///
/// Screens are plain values; navigation, overlays and lifecycle sequencing
/// live in [`Navigator`](crate::Navigator). A screen opts into extra roles
/// through the capability methods:
///
/// - [`container`](Screen::container): it can be a navigation root.
/// - [`foreground_sub_screens`](Screen::foreground_sub_screens): nested
///   screens that enter and leave the foreground with it.
/// - [`commit_rule`](Screen::commit_rule): its own edge-swipe thresholds.
pub trait Screen: Any {
    fn build(cx: &mut BuildCx<'_>) -> Self
    where
        Self: Sized;

    fn view(&self) -> ViewId;

    /// View that pushed screens slide inside. Transitions are clipped to it.
    fn container(&self) -> Option<ViewId> {
        None
    }

    fn foreground_sub_screens(&self) -> Vec<ScreenKey> {
        Vec::new()
    }

    fn commit_rule(&self) -> Option<CommitRule> {
        None
    }

    fn on_added(&mut self, _cx: &mut LifecycleCx<'_>) {}
    fn on_enter_foreground(&mut self, _cx: &mut LifecycleCx<'_>) {}
    fn on_leave_foreground(&mut self, _cx: &mut LifecycleCx<'_>) {}
    fn on_removed(&mut self, _cx: &mut LifecycleCx<'_>) {}
}

/// How to obtain a screen instance for push/overlay/mount.
#[derive(Clone, Debug)]
pub struct ScreenRequest {
    pub id: Option<String>,
    pub cache: bool,
    pub animated: bool,
}

impl Default for ScreenRequest {
    fn default() -> Self {
        Self {
            id: None,
            cache: true,
            animated: true,
        }
    }
}

impl ScreenRequest {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
    /// `false` builds a one-shot instance that is never memoized.
    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Alpha;
    struct Beta;

    #[test]
    fn screen_id_equality_ignores_name_but_not_discriminator() {
        assert_eq!(ScreenId::of::<Alpha>(None), ScreenId::of::<Alpha>(None));
        assert_ne!(ScreenId::of::<Alpha>(None), ScreenId::of::<Beta>(None));
        assert_ne!(
            ScreenId::of::<Alpha>(Some("x")),
            ScreenId::of::<Alpha>(Some("y"))
        );

        let set: HashSet<_> = [
            ScreenId::of::<Alpha>(Some("x")),
            ScreenId::of::<Alpha>(Some("x")),
            ScreenId::of::<Alpha>(None),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn screen_id_display() {
        assert_eq!(ScreenId::of::<Alpha>(None).to_string(), "Alpha");
        assert_eq!(ScreenId::of::<Beta>(Some("2")).to_string(), "Beta#2");
    }

    #[test]
    fn request_builder() {
        let r = ScreenRequest::new().id("a").cache(false).animated(false);
        assert_eq!(r.id.as_deref(), Some("a"));
        assert!(!r.cache);
        assert!(!r.animated);

        let d = ScreenRequest::default();
        assert!(d.cache && d.animated && d.id.is_none());
    }
}
