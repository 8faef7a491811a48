//! Per-document lint orchestration.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use stylelint_ls_engine::{EngineError, LintOptions};

use crate::connection::Connection;
use crate::options_builder::build_lint_options;
use crate::processor::{LintDiagnostics, process_lint_result};
use crate::resolver::{ResolverError, StylelintResolver};
use crate::workspace::{NoWorkspace, WorkspaceProvider};
use crate::{Document, ExtensionOptions};

/// Errors surfaced by [`StylelintRunner::lint_document`].
#[derive(Debug, Error)]
pub enum LintError {
    /// The configured custom Stylelint path is unusable.
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// The engine failed for a reason other than a recognized
    /// configuration error.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Runs Stylelint against single documents.
///
/// A missing engine is never an error: the lint result is simply empty.
pub struct StylelintRunner {
    resolver: StylelintResolver,
    workspace: Arc<dyn WorkspaceProvider>,
}

impl StylelintRunner {
    /// Creates a runner with no collaborators attached.
    pub fn new() -> Self {
        Self {
            resolver: StylelintResolver::new(),
            workspace: Arc::new(NoWorkspace),
        }
    }

    /// Attaches a workspace provider, shared with the resolver.
    pub fn with_workspace(mut self, workspace: Arc<dyn WorkspaceProvider>) -> Self {
        self.resolver = self.resolver.with_workspace(Arc::clone(&workspace));
        self.workspace = workspace;
        self
    }

    /// Attaches an editor connection, shared with the resolver.
    pub fn with_connection(mut self, connection: Arc<dyn Connection>) -> Self {
        self.resolver = self.resolver.with_connection(connection);
        self
    }

    /// Replaces the resolver wholesale.
    pub fn with_resolver(mut self, resolver: StylelintResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Lints `document` and converts the engine's findings to diagnostics.
    pub async fn lint_document(
        &self,
        document: &Document,
        linter_options: &LintOptions,
        extension_options: &ExtensionOptions,
    ) -> Result<LintDiagnostics, LintError> {
        let workspace_folder = self.workspace.workspace_folder(document).await;

        let Some(resolved) = self.resolver.resolve(extension_options, document).await? else {
            info!(uri = %document.uri, "no Stylelint found with which to lint document");
            return Ok(LintDiagnostics::default());
        };

        let code_filename = document
            .fs_path()
            .map(|path| path.to_string_lossy().into_owned());

        let mut options = build_lint_options(
            workspace_folder.as_deref(),
            linter_options,
            extension_options,
        );
        options.code = Some(document.text.clone());
        // Only structured results are wanted; the engine host installs a
        // no-op formatter when none is named.
        options.formatter = None;

        match &code_filename {
            Some(filename) => options.code_filename = Some(filename.clone()),
            // Without a filename the engine cannot infer a syntax, so an
            // unconfigured run would fail outright; lint with no rules
            // instead unless the caller brought its own.
            None if !linter_options.has_rules() => {
                options.config = Some(LintOptions::empty_rules());
            }
            None => {}
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(options = ?redact_code(&options), "running Stylelint");
        }

        let result = match resolved.stylelint.lint(&options).await {
            Ok(result) => result,
            Err(err) if err.is_configuration_error() => {
                debug!("no configuration or rules available, retrying with an empty rule set");
                let mut fallback = options.clone();
                fallback.config = Some(LintOptions::empty_rules());
                resolved.stylelint.lint(&fallback).await?
            }
            Err(err) => return Err(err.into()),
        };

        Ok(process_lint_result(&result))
    }
}

impl Default for StylelintRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Clone of the options with the document text elided, for debug logging.
fn redact_code(options: &LintOptions) -> LintOptions {
    let mut redacted = options.clone();

    if redacted.code.is_some() {
        redacted.code = Some("...".to_string());
    }

    redacted
}
