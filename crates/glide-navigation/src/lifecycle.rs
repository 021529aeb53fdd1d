use serde::Serialize;

/// Lifecycle of a screen instance.
///
/// ```text
/// Created ─added─▶ Added ─enter─▶ Foreground ⇄ Background ─removed─▶ Removed
///                                                         ◀─added── (reuse)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LifecycleState {
    Created,
    Added,
    Foreground,
    Background,
    Removed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    Added,
    Enter,
    Leave,
    Removed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: LifecycleState,
    pub event: LifecycleEvent,
}

impl LifecycleState {
    pub fn apply(self, event: LifecycleEvent) -> Result<LifecycleState, InvalidTransition> {
        use LifecycleEvent as E;
        use LifecycleState as S;
        match (self, event) {
            (S::Created | S::Removed, E::Added) => Ok(S::Added),
            (S::Added | S::Background, E::Enter) => Ok(S::Foreground),
            (S::Foreground, E::Leave) => Ok(S::Background),
            (S::Added | S::Background, E::Removed) => Ok(S::Removed),
            (from, event) => Err(InvalidTransition { from, event }),
        }
    }

    pub fn is_attached(self) -> bool {
        matches!(
            self,
            LifecycleState::Added | LifecycleState::Foreground | LifecycleState::Background
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleEvent as E;
    use LifecycleState as S;

    #[test]
    fn full_cycle() {
        let s = S::Created;
        let s = s.apply(E::Added).unwrap();
        let s = s.apply(E::Enter).unwrap();
        assert_eq!(s, S::Foreground);
        let s = s.apply(E::Leave).unwrap();
        let s = s.apply(E::Enter).unwrap();
        let s = s.apply(E::Leave).unwrap();
        let s = s.apply(E::Removed).unwrap();
        assert_eq!(s, S::Removed);
        // cached instances are reused
        assert_eq!(s.apply(E::Added), Ok(S::Added));
    }

    #[test]
    fn added_never_entered_can_be_removed() {
        assert_eq!(S::Added.apply(E::Removed), Ok(S::Removed));
    }

    #[test]
    fn rejects_out_of_order_events() {
        assert!(S::Created.apply(E::Enter).is_err());
        assert!(S::Foreground.apply(E::Enter).is_err());
        assert!(S::Background.apply(E::Leave).is_err());
        assert!(S::Foreground.apply(E::Removed).is_err());
        assert!(S::Added.apply(E::Added).is_err());
        assert_eq!(
            S::Removed.apply(E::Leave),
            Err(InvalidTransition {
                from: S::Removed,
                event: E::Leave
            })
        );
    }

    #[test]
    fn attached_states() {
        assert!(!S::Created.is_attached());
        assert!(S::Background.is_attached());
        assert!(!S::Removed.is_attached());
    }
}
