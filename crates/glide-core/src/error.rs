use thiserror::Error;

/// Errors returned by navigation operations.
///
/// Empty-stack pops and overlay removals are not errors; they are no-ops.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error(
        "screen `{screen}` has no container; `container()` must return the view that pushed screens slide inside"
    )]
    MissingContainer { screen: String },
    #[error("a transition is already running on `{root}`")]
    TransitionInProgress { root: String },
    #[error("screen `{screen}` is already active in a stack or overlay")]
    ScreenAlreadyActive { screen: String },
    #[error("unknown or freed screen key")]
    UnknownScreen,
}

pub type NavResult<T> = Result<T, NavError>;
