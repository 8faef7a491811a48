//! Stylelint module resolution.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, error, warn};

use stylelint_ls_engine::{LintEngine, LoadOutcome, ModuleLoader, NodeModuleLoader};
use stylelint_ls_packages::{GlobalPathResolver, resolve_module};

use crate::connection::{Connection, NullConnection};
use crate::workspace::{NoWorkspace, WorkspaceProvider};
use crate::{Document, ExtensionOptions};

/// Name of the engine package looked up in `node_modules`.
const STYLELINT_PACKAGE: &str = "stylelint";

/// A successfully resolved engine.
#[derive(Clone)]
pub struct ResolvedLinter {
    /// Absolute path of the loaded module's entry file.
    pub path: PathBuf,
    /// The loaded engine.
    pub stylelint: Arc<dyn LintEngine>,
}

/// Errors from [`StylelintResolver::resolve`].
///
/// Only an explicit custom path that cannot be found at all is an error;
/// every other miss is an expected, recoverable condition.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("failed to load Stylelint: no module found at configured path {}", path.display())]
    BadStylelintPath { path: PathBuf },
}

/// How a module was found, for the success trace. A custom path never
/// traces, so it has no variant here.
enum Strategy {
    Workspace,
    Global,
}

/// Outcome of the workspace/global resolution stage.
enum ModulesOutcome {
    Resolved(ResolvedLinter),
    /// A module was found but reported as unusable; already logged.
    Unusable,
    NotFound,
}

/// Resolves the Stylelint module to lint a document with.
///
/// Strategies are tried in a fixed order and the first success wins: an
/// explicit custom path, the document's workspace, then the configured
/// package manager's global packages. Loaded modules are cached by path
/// for the lifetime of the resolver, so a module is loaded at most once.
pub struct StylelintResolver {
    loader: Arc<dyn ModuleLoader>,
    connection: Arc<dyn Connection>,
    workspace: Arc<dyn WorkspaceProvider>,
    global_paths: GlobalPathResolver,
    loaded: Mutex<HashMap<PathBuf, Arc<dyn LintEngine>>>,
}

impl StylelintResolver {
    /// Creates a resolver with no collaborators attached: modules run under
    /// Node and nothing is reported back to an editor.
    pub fn new() -> Self {
        Self {
            loader: Arc::new(NodeModuleLoader::new()),
            connection: Arc::new(NullConnection),
            workspace: Arc::new(NoWorkspace),
            global_paths: GlobalPathResolver::new(),
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the module loader.
    pub fn with_loader(mut self, loader: Arc<dyn ModuleLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Attaches an editor connection for traces and notifications.
    pub fn with_connection(mut self, connection: Arc<dyn Connection>) -> Self {
        self.connection = connection;
        self
    }

    /// Attaches a workspace provider.
    pub fn with_workspace(mut self, workspace: Arc<dyn WorkspaceProvider>) -> Self {
        self.workspace = workspace;
        self
    }

    /// Replaces the global path resolver.
    pub fn with_global_paths(mut self, global_paths: GlobalPathResolver) -> Self {
        self.global_paths = global_paths;
        self
    }

    /// Resolves the engine used to lint `document`.
    ///
    /// Returns `Ok(None)` when no usable module is found anywhere; the only
    /// error is an explicit custom path that does not exist on disk.
    pub async fn resolve(
        &self,
        options: &ExtensionOptions,
        document: &Document,
    ) -> Result<Option<ResolvedLinter>, ResolverError> {
        if let Some(custom_path) = &options.stylelint_path {
            return self.resolve_custom_path(custom_path, document).await;
        }

        match self.resolve_from_modules(options, document).await {
            ModulesOutcome::Resolved(resolved) => Ok(Some(resolved)),
            ModulesOutcome::Unusable => Ok(None),
            ModulesOutcome::NotFound => {
                warn!(uri = %document.uri, "no Stylelint found with which to lint document");
                Ok(None)
            }
        }
    }

    /// Resolves an explicitly configured module path.
    async fn resolve_custom_path(
        &self,
        custom_path: &str,
        document: &Document,
    ) -> Result<Option<ResolvedLinter>, ResolverError> {
        let path = self.absolute_custom_path(custom_path, document).await;

        match self.load(&path).await {
            LoadOutcome::Loaded(engine) => Ok(Some(ResolvedLinter {
                path,
                stylelint: engine,
            })),
            LoadOutcome::InvalidModule(reason) => {
                warn!(path = %path.display(), "configured Stylelint module is not usable: {reason}");
                self.report_error(format!(
                    "stylelint.stylelintPath {} is not a valid Stylelint module",
                    path.display()
                ))
                .await;
                Ok(None)
            }
            LoadOutcome::NotFound => {
                self.report_error(format!(
                    "stylelint.stylelintPath {} does not exist",
                    path.display()
                ))
                .await;
                Err(ResolverError::BadStylelintPath { path })
            }
        }
    }

    /// Makes a configured path absolute relative to the document's
    /// workspace, falling back to the document's own directory.
    async fn absolute_custom_path(&self, custom_path: &str, document: &Document) -> PathBuf {
        let path = PathBuf::from(custom_path);

        if path.is_absolute() {
            return path;
        }

        self.base_directory(document).await.join(path)
    }

    /// Resolves from the workspace, then from the configured package
    /// manager's global packages.
    async fn resolve_from_modules(
        &self,
        options: &ExtensionOptions,
        document: &Document,
    ) -> ModulesOutcome {
        let cwd = self.base_directory(document).await;

        if let Some(path) =
            resolve_module(STYLELINT_PACKAGE, &cwd, None, |attempt| debug!("{attempt}")).await
        {
            return self.load_found(path, Strategy::Workspace).await;
        }

        let Some(manager) = options.package_manager else {
            return ModulesOutcome::NotFound;
        };

        let Some(global_path) = self.global_paths.resolve(manager).await else {
            return ModulesOutcome::NotFound;
        };

        match resolve_module(STYLELINT_PACKAGE, &cwd, Some(&global_path), |attempt| {
            debug!("{attempt}")
        })
        .await
        {
            Some(path) => self.load_found(path, Strategy::Global).await,
            None => ModulesOutcome::NotFound,
        }
    }

    /// Loads a module located by the workspace or global strategy,
    /// reporting the outcome.
    async fn load_found(&self, path: PathBuf, strategy: Strategy) -> ModulesOutcome {
        match self.load(&path).await {
            LoadOutcome::Loaded(engine) => {
                let description = match strategy {
                    Strategy::Workspace => "from the workspace",
                    Strategy::Global => "from global packages",
                };

                self.connection
                    .trace(format!(
                        "Resolved Stylelint {description}: {}",
                        path.display()
                    ))
                    .await;

                ModulesOutcome::Resolved(ResolvedLinter {
                    path,
                    stylelint: engine,
                })
            }
            LoadOutcome::InvalidModule(reason) => {
                warn!(path = %path.display(), "resolved Stylelint module is not usable: {reason}");
                self.report_error(format!(
                    "{} is not a valid Stylelint module",
                    path.display()
                ))
                .await;
                ModulesOutcome::Unusable
            }
            // The module disappeared between resolution and loading.
            LoadOutcome::NotFound => ModulesOutcome::NotFound,
        }
    }

    /// Loads the module at `path`, reusing a previously loaded engine.
    async fn load(&self, path: &Path) -> LoadOutcome {
        if let Some(engine) = self.loaded.lock().get(path).cloned() {
            debug!(path = %path.display(), "reusing loaded Stylelint module");
            return LoadOutcome::Loaded(engine);
        }

        let outcome = self.loader.load(path).await;

        if let LoadOutcome::Loaded(engine) = &outcome {
            self.loaded
                .lock()
                .insert(path.to_path_buf(), Arc::clone(engine));
        }

        outcome
    }

    async fn base_directory(&self, document: &Document) -> PathBuf {
        match self.workspace.workspace_folder(document).await {
            Some(folder) => folder,
            None => document.base_directory(),
        }
    }

    /// Logs an error and surfaces it to the user.
    async fn report_error(&self, message: String) {
        error!("{message}");
        self.connection.console_error(message.clone()).await;
        self.connection.show_error_message(message).await;
    }
}

impl Default for StylelintResolver {
    fn default() -> Self {
        Self::new()
    }
}
