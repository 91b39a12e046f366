use thiserror::Error;

/// Contract violations reported by [`crate::WindowOptions::validate`].
///
/// The range and render paths never return these: they reflect invalid input as an empty
/// window instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("item height must be positive")]
    ZeroItemHeight,
    #[error("container height must be positive")]
    ZeroContainerHeight,
}
