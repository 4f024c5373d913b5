#![forbid(unsafe_code)]

//! Error types for the layout driver.
//!
//! The pure solver never fails: malformed constraints are normalized and
//! size distribution always returns a best-effort result. Errors are reserved
//! for construction-order bugs in the driver and for malformed input arriving
//! from the model-event channel.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T, E = LayoutError> = std::result::Result<T, E>;

/// Errors reported by the layout driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A layout operation was called on a component that has no layout.
    #[error("component {component} has no layout installed")]
    NoLayout { component: usize },

    /// The component's layout is already running further up the call stack.
    #[error("layout of component {component} is already in progress")]
    LayoutInProgress { component: usize },

    /// The component id does not refer to a live node.
    #[error("unknown component {component}")]
    UnknownComponent { component: usize },

    /// A model event could not be decoded.
    #[error("invalid model event: {0}")]
    InvalidModelEvent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            LayoutError::NoLayout { component: 3 }.to_string(),
            "component 3 has no layout installed"
        );
        assert_eq!(
            LayoutError::InvalidModelEvent("eof".into()).to_string(),
            "invalid model event: eof"
        );
    }
}
