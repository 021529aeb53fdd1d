use std::collections::HashMap;

use crate::screen::ScreenId;

/// Memoizes screen instances by [`ScreenId`].
///
/// Entries live as long as the cache; there is no eviction. A request with
/// `cache == false` always constructs and never stores.
#[derive(Debug)]
pub struct ScreenCache<V> {
    entries: HashMap<ScreenId, V>,
}

impl<V> Default for ScreenCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V: Clone> ScreenCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_insert_with(
        &mut self,
        id: ScreenId,
        cache: bool,
        make: impl FnOnce(&ScreenId) -> V,
    ) -> V {
        if !cache {
            return make(&id);
        }
        if let Some(v) = self.entries.get(&id) {
            return v.clone();
        }
        let v = make(&id);
        log::trace!("cached new instance of {id}");
        self.entries.insert(id, v.clone());
        v
    }

    pub fn get(&self, id: &ScreenId) -> Option<&V> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &ScreenId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct TypeA;
    struct TypeB;

    fn build(counter: &Cell<u32>) -> Rc<u32> {
        counter.set(counter.get() + 1);
        Rc::new(counter.get())
    }

    #[test]
    fn cached_lookup_returns_same_instance() {
        let built = Cell::new(0);
        let mut cache = ScreenCache::new();

        let a = cache.get_or_insert_with(ScreenId::of::<TypeA>(Some("x")), true, |_| build(&built));
        let b = cache.get_or_insert_with(ScreenId::of::<TypeA>(Some("x")), true, |_| build(&built));

        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(built.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn uncached_lookup_always_builds() {
        let built = Cell::new(0);
        let mut cache = ScreenCache::new();

        let a = cache.get_or_insert_with(ScreenId::of::<TypeA>(Some("x")), false, |_| build(&built));
        let b = cache.get_or_insert_with(ScreenId::of::<TypeA>(Some("x")), false, |_| build(&built));

        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(built.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn uncached_lookup_ignores_existing_entry() {
        let built = Cell::new(0);
        let mut cache = ScreenCache::new();
        let id = ScreenId::of::<TypeA>(None);

        let cached = cache.get_or_insert_with(id.clone(), true, |_| build(&built));
        let fresh = cache.get_or_insert_with(id.clone(), false, |_| build(&built));

        assert!(!Rc::ptr_eq(&cached, &fresh));
        assert!(Rc::ptr_eq(cache.get(&id).unwrap(), &cached));
    }

    #[test]
    fn keys_differ_by_type_and_discriminator() {
        let built = Cell::new(0);
        let mut cache = ScreenCache::new();

        cache.get_or_insert_with(ScreenId::of::<TypeA>(None), true, |_| build(&built));
        cache.get_or_insert_with(ScreenId::of::<TypeA>(Some("1")), true, |_| build(&built));
        cache.get_or_insert_with(ScreenId::of::<TypeB>(None), true, |_| build(&built));

        assert_eq!(cache.len(), 3);
        assert!(cache.contains(&ScreenId::of::<TypeA>(Some("1"))));
        assert!(!cache.contains(&ScreenId::of::<TypeB>(Some("1"))));
    }
}
