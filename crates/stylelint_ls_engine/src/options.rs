//! Engine invocation options.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for a single Stylelint `lint()` invocation.
///
/// Serializes to the exact camelCase shape the engine expects. Unset fields
/// are omitted entirely so layered option sources can be merged without
/// clobbering one another with nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LintOptions {
    /// Inline configuration object, as the engine understands it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,

    /// Path to a configuration file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,

    /// Base directory for resolving relative paths inside the
    /// configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_basedir: Option<String>,

    /// Name or path of a custom syntax module.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_syntax: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_disables: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_needless_disables: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_invalid_scope_disables: Option<bool>,

    /// The source text to lint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Filename attributed to `code`, used for syntax detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_filename: Option<String>,

    /// Named output formatter. When unset the host installs a no-op
    /// formatter, so only structured results are produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
}

impl LintOptions {
    /// Configuration that disables every rule, used to surface syntax-only
    /// findings.
    pub fn empty_rules() -> Value {
        serde_json::json!({ "rules": {} })
    }

    /// Returns `true` when the configuration carries a `rules` section.
    pub fn has_rules(&self) -> bool {
        self.config
            .as_ref()
            .is_some_and(|config| config.get("rules").is_some())
    }
}
