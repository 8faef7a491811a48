//! Raw engine results.

use serde::{Deserialize, Deserializer, Serialize};

/// Severity the engine attributes to a warning.
///
/// Anything the engine reports that is not `"error"` decodes as a warning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    Error,
    #[default]
    Warning,
}

impl<'de> Deserialize<'de> for WarningSeverity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "error" => Self::Error,
            _ => Self::Warning,
        })
    }
}

/// A single warning from the engine, positioned with 1-based coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warning {
    pub line: u32,
    pub column: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    /// Identifier of the rule that produced the warning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default)]
    pub severity: WarningSeverity,
    pub text: String,
}

/// A rule-option validation failure attached to a file result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidOptionWarning {
    pub text: String,
}

/// Result entry for one linted file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileResult {
    pub warnings: Vec<Warning>,
    pub invalid_option_warnings: Vec<InvalidOptionWarning>,
    /// Set when the file was excluded by an ignore pattern.
    pub ignored: bool,
}

/// Raw result of a single engine invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintResult {
    pub results: Vec<FileResult>,
    /// Formatter output, when a formatter produced any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}
