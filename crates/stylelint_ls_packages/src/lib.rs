//! # stylelint_ls_packages
//!
//! Package discovery for the Stylelint language server.
//!
//! This crate provides:
//! - Package manager identification
//! - Global package root discovery, memoized per resolver
//! - Resolution of a named package to the file `require()` would load
//!
//! ## Example
//!
//! ```rust,ignore
//! use stylelint_ls_packages::{resolve_module, GlobalPathResolver, PackageManager};
//!
//! let globals = GlobalPathResolver::new();
//! let global_path = globals.resolve(PackageManager::Npm).await;
//!
//! let entry = resolve_module("stylelint", cwd, global_path.as_deref(), |attempt| {
//!     eprintln!("{attempt}");
//! })
//! .await;
//! ```

mod global_path_resolver;
mod module_resolver;
mod package_manager;

pub use global_path_resolver::{CommandGlobalRootQuery, GlobalPathResolver, GlobalRootQuery};
pub use module_resolver::{find_package_root, resolve_module};
pub use package_manager::{PackageManager, UnknownPackageManager};
