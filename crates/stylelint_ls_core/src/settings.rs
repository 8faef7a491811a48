//! Extension-side settings.

use serde::{Deserialize, Serialize};

use stylelint_ls_packages::PackageManager;

/// Settings the editor extension passes through to the lint layer.
///
/// Field names mirror the wire shape of the client configuration, so a
/// `workspace/configuration` payload deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionOptions {
    /// Explicit path to the Stylelint module to use instead of resolving
    /// one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylelint_path: Option<String>,

    /// Package manager whose global packages may provide Stylelint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManager>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_basedir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_syntax: Option<String>,

    pub ignore_disables: bool,

    pub report_invalid_scope_disables: bool,

    pub report_needless_disables: bool,

    /// Language identifiers linted as embedded snippets.
    pub snippet: Vec<String>,

    /// Language identifiers the extension validates.
    pub validate: Vec<String>,
}

impl Default for ExtensionOptions {
    fn default() -> Self {
        Self {
            stylelint_path: None,
            package_manager: None,
            config_file: None,
            config_basedir: None,
            custom_syntax: None,
            ignore_disables: false,
            report_invalid_scope_disables: false,
            report_needless_disables: false,
            snippet: default_languages(),
            validate: default_languages(),
        }
    }
}

fn default_languages() -> Vec<String> {
    vec!["css".to_string(), "postcss".to_string()]
}
