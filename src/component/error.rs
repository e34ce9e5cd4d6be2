//! Error types for component operations

use crate::component::LifecyclePhase;

/// Errors that can occur during component operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ComponentError {
    /// Error acquiring lock
    #[error("Lock error: {0}")]
    LockError(String),

    /// Invalid lifecycle transition
    #[error("Invalid lifecycle transition: cannot {1} while in {0:?} phase")]
    InvalidLifecycleTransition(LifecyclePhase, String),

    /// Error rendering component
    #[error("Error rendering component: {0}")]
    RenderError(String),

    /// Error updating component
    #[error("Error updating component: {0}")]
    UpdateError(String),

    /// Error mounting component
    #[error("Error mounting component: {0}")]
    MountError(String),
}
