//! Global package root discovery.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::process::Command;
use tracing::debug;

use crate::PackageManager;

/// Queries a package manager for the directory its global packages live in.
#[async_trait]
pub trait GlobalRootQuery: Send + Sync {
    /// Returns the manager's global package directory, or `None` when the
    /// manager is not installed or the query fails.
    async fn global_root(&self, manager: PackageManager) -> Option<PathBuf>;
}

/// Shells out to the package manager binary on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandGlobalRootQuery;

#[async_trait]
impl GlobalRootQuery for CommandGlobalRootQuery {
    async fn global_root(&self, manager: PackageManager) -> Option<PathBuf> {
        match manager {
            PackageManager::Yarn => {
                let dir = capture_stdout(manager.as_str(), &["global", "dir"]).await?;
                Some(PathBuf::from(dir).join("node_modules"))
            }
            PackageManager::Npm => {
                let prefix = capture_stdout(manager.as_str(), &["config", "get", "prefix"]).await?;
                let prefix = PathBuf::from(prefix);
                if cfg!(windows) {
                    Some(prefix.join("node_modules"))
                } else {
                    Some(prefix.join("lib").join("node_modules"))
                }
            }
            PackageManager::Pnpm => {
                let root = capture_stdout(manager.as_str(), &["root", "-g"]).await?;
                Some(PathBuf::from(root))
            }
        }
    }
}

/// Runs a command and returns its trimmed stdout, or `None` on any failure.
async fn capture_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().await.ok()?;

    if !output.status.success() {
        debug!("{program} exited with {}", output.status);
        return None;
    }

    let stdout = String::from_utf8(output.stdout).ok()?;
    let trimmed = stdout.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Memoizes each package manager's global package root.
///
/// Failed lookups are cached as well, so a missing package manager is
/// queried at most once per resolver.
pub struct GlobalPathResolver {
    query: Box<dyn GlobalRootQuery>,
    cache: Mutex<HashMap<PackageManager, Option<PathBuf>>>,
}

impl GlobalPathResolver {
    /// Creates a resolver backed by the package manager binaries on `PATH`.
    pub fn new() -> Self {
        Self::with_query(Box::new(CommandGlobalRootQuery))
    }

    /// Creates a resolver backed by a custom query.
    pub fn with_query(query: Box<dyn GlobalRootQuery>) -> Self {
        Self {
            query,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the global package root for `manager`.
    ///
    /// Concurrent first calls for the same manager may race to compute the
    /// value; the computation is idempotent, so every caller converges on
    /// the same result.
    pub async fn resolve(&self, manager: PackageManager) -> Option<PathBuf> {
        if let Some(cached) = self.cache.lock().get(&manager) {
            return cached.clone();
        }

        let resolved = self.query.global_root(manager).await;

        match &resolved {
            Some(path) => debug!("{manager} global packages at {}", path.display()),
            None => debug!("no global package root found for {manager}"),
        }

        self.cache.lock().insert(manager, resolved.clone());
        resolved
    }
}

impl Default for GlobalPathResolver {
    fn default() -> Self {
        Self::new()
    }
}
