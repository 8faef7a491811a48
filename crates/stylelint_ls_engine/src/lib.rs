//! # stylelint_ls_engine
//!
//! The engine boundary of the Stylelint language server.
//!
//! Stylelint itself is a Node package; this crate treats it as an opaque
//! capability. It provides:
//! - Loading a resolved module and validating that it exposes a callable
//!   `lint`
//! - Driving a single lint invocation and decoding its raw result
//! - The engine's option and result wire types
//!
//! ## Example
//!
//! ```rust,ignore
//! use stylelint_ls_engine::{LintOptions, ModuleLoader, NodeModuleLoader};
//!
//! let loader = NodeModuleLoader::new();
//! if let LoadOutcome::Loaded(engine) = loader.load(&path).await {
//!     let result = engine.lint(&LintOptions::default()).await?;
//! }
//! ```

mod engine;
mod error;
mod loader;
mod node;
mod options;
mod result;

pub use engine::LintEngine;
pub use error::EngineError;
pub use loader::{LoadOutcome, ModuleLoader};
pub use node::{NodeLintEngine, NodeModuleLoader};
pub use options::LintOptions;
pub use result::{FileResult, InvalidOptionWarning, LintResult, Warning, WarningSeverity};
