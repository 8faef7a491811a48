//! The engine invocation boundary.

use async_trait::async_trait;

use crate::{EngineError, LintOptions, LintResult};

/// An opaque lint capability: a loaded Stylelint module.
#[async_trait]
pub trait LintEngine: Send + Sync {
    /// Runs one lint invocation.
    async fn lint(&self, options: &LintOptions) -> Result<LintResult, EngineError>;
}
