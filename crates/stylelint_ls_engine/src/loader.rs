//! Dynamic engine module loading.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::LintEngine;

/// Outcome of loading a candidate engine module.
#[derive(Clone)]
pub enum LoadOutcome {
    /// The module loaded and exposes a callable `lint`.
    Loaded(Arc<dyn LintEngine>),
    /// A module exists at the path but cannot be used as a lint engine,
    /// with the reason why.
    InvalidModule(String),
    /// Nothing exists at the path.
    NotFound,
}

impl fmt::Debug for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(_) => f.write_str("Loaded"),
            Self::InvalidModule(reason) => f.debug_tuple("InvalidModule").field(reason).finish(),
            Self::NotFound => f.write_str("NotFound"),
        }
    }
}

/// Loads engine modules by path.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Loads the module at `path`, validating that it exposes a callable
    /// `lint`.
    async fn load(&self, path: &Path) -> LoadOutcome;
}
