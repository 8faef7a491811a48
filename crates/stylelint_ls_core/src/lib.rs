//! # stylelint_ls_core
//!
//! Document-level lint orchestration for the Stylelint language server.
//!
//! This crate provides:
//! - [`StylelintResolver`]: locates and loads the Stylelint module for a
//!   document, from a custom path, the workspace, or a package manager's
//!   global packages
//! - [`StylelintRunner`]: drives one lint invocation per document and
//!   applies the empty-rules fallback when no configuration is available
//! - Conversion of raw engine findings into LSP diagnostics
//!
//! ## Example
//!
//! ```rust,ignore
//! use stylelint_ls_core::{Document, ExtensionOptions, StylelintRunner};
//!
//! let runner = StylelintRunner::new();
//! let document = Document::new(uri, "a { color: #FFF; }");
//!
//! let diagnostics = runner
//!     .lint_document(&document, &LintOptions::default(), &ExtensionOptions::default())
//!     .await?;
//! ```

mod connection;
mod document;
mod options_builder;
mod processor;
mod resolver;
mod runner;
mod settings;
mod workspace;

#[cfg(test)]
mod test_utils;

pub use connection::{Connection, NullConnection};
pub use document::Document;
pub use options_builder::{build_lint_options, deep_merge, merge_lint_options};
pub use processor::{
    DisableReportRule, LintDiagnostics, process_lint_result, warning_to_diagnostic,
};
pub use resolver::{ResolvedLinter, ResolverError, StylelintResolver};
pub use runner::{LintError, StylelintRunner};
pub use settings::ExtensionOptions;
pub use workspace::{NoWorkspace, WorkspaceFolders, WorkspaceProvider};

pub use stylelint_ls_engine::{
    EngineError, LintEngine, LintOptions, LintResult, LoadOutcome, ModuleLoader,
};
pub use stylelint_ls_packages::PackageManager;
