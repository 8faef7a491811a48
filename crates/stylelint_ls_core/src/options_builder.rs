//! Layered construction of engine options.

use std::path::Path;

use serde_json::Value;

use stylelint_ls_engine::LintOptions;

use crate::ExtensionOptions;

/// Editor variable substituted in path-like settings.
const WORKSPACE_FOLDER_VAR: &str = "${workspaceFolder}";

/// Merges `overlay` into `base`, recursing through nested objects.
///
/// Non-object values, arrays included, replace the base value wholesale.
/// Neither input is mutated; this is the one mechanism used wherever two
/// partial option objects are combined.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();

            for (key, value) in overlay {
                let combined = match merged.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), combined);
            }

            Value::Object(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Combines two option sets; fields set in `overlay` win, and the nested
/// `config` objects are deep-merged.
pub fn merge_lint_options(base: &LintOptions, overlay: &LintOptions) -> LintOptions {
    let config = match (&base.config, &overlay.config) {
        (Some(base), Some(overlay)) => Some(deep_merge(base, overlay)),
        (base, overlay) => overlay.clone().or_else(|| base.clone()),
    };

    LintOptions {
        config,
        config_file: overlay.config_file.clone().or_else(|| base.config_file.clone()),
        config_basedir: overlay
            .config_basedir
            .clone()
            .or_else(|| base.config_basedir.clone()),
        custom_syntax: overlay
            .custom_syntax
            .clone()
            .or_else(|| base.custom_syntax.clone()),
        ignore_disables: overlay.ignore_disables.or(base.ignore_disables),
        report_needless_disables: overlay
            .report_needless_disables
            .or(base.report_needless_disables),
        report_invalid_scope_disables: overlay
            .report_invalid_scope_disables
            .or(base.report_invalid_scope_disables),
        code: overlay.code.clone().or_else(|| base.code.clone()),
        code_filename: overlay
            .code_filename
            .clone()
            .or_else(|| base.code_filename.clone()),
        formatter: overlay.formatter.clone().or_else(|| base.formatter.clone()),
    }
}

/// Builds the final engine options for one lint invocation.
///
/// Precedence, lowest to highest: engine defaults, settings derived from
/// the extension options, then the caller's own options.
pub fn build_lint_options(
    workspace_folder: Option<&Path>,
    linter_options: &LintOptions,
    extension_options: &ExtensionOptions,
) -> LintOptions {
    let derived = options_from_settings(workspace_folder, extension_options);
    let layered = merge_lint_options(&LintOptions::default(), &derived);

    merge_lint_options(&layered, linter_options)
}

/// Derives engine options from the extension settings.
fn options_from_settings(
    workspace_folder: Option<&Path>,
    extension: &ExtensionOptions,
) -> LintOptions {
    LintOptions {
        config_file: extension
            .config_file
            .as_deref()
            .map(|file| substitute_workspace_folder(file, workspace_folder)),
        config_basedir: extension
            .config_basedir
            .as_deref()
            .map(|dir| resolve_basedir(dir, workspace_folder)),
        custom_syntax: extension
            .custom_syntax
            .as_deref()
            .map(|syntax| substitute_workspace_folder(syntax, workspace_folder)),
        ignore_disables: Some(extension.ignore_disables),
        report_needless_disables: Some(extension.report_needless_disables),
        report_invalid_scope_disables: Some(extension.report_invalid_scope_disables),
        ..LintOptions::default()
    }
}

/// Replaces the editor's `${workspaceFolder}` variable.
fn substitute_workspace_folder(value: &str, workspace_folder: Option<&Path>) -> String {
    match workspace_folder {
        Some(folder) => value.replace(WORKSPACE_FOLDER_VAR, &folder.to_string_lossy()),
        None => value.to_string(),
    }
}

/// Resolves a relative config base directory against the workspace folder.
fn resolve_basedir(dir: &str, workspace_folder: Option<&Path>) -> String {
    let path = Path::new(dir);

    if path.is_absolute() {
        return dir.to_string();
    }

    match workspace_folder {
        Some(folder) => folder.join(path).to_string_lossy().into_owned(),
        None => dir.to_string(),
    }
}
