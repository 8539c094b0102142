//! Usage errors
//!
//! The components have no recoverable runtime failures. What can go wrong
//! is misuse by the calling code, and that is reported immediately.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// A scoped sub-component was rendered without its parent
    #[error("{component} must be used within a {provider} provider")]
    MissingProvider {
        component: &'static str,
        provider: &'static str,
    },

    /// A controlled-value update reached an uncontrolled Tabs instance
    #[error("Tabs instance is uncontrolled; its active tab cannot be set by the host")]
    NotControlled,

    #[error("unknown component: {0}")]
    UnknownComponent(String),
}
