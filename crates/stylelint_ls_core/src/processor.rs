//! Conversion of raw engine results into LSP diagnostics.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

use stylelint_ls_engine::{LintResult, Warning, WarningSeverity};

/// Diagnostic source reported to the editor.
const DIAGNOSTIC_SOURCE: &str = "stylelint";

/// Diagnostics for one lint run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LintDiagnostics {
    /// One diagnostic per finding, in the engine's order.
    pub diagnostics: Vec<Diagnostic>,
    /// Raw formatter output, when a formatter produced any.
    pub output: Option<String>,
}

/// Rule identifiers the engine uses for disable-comment reports.
///
/// These double as the stable diagnostic codes for such findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableReportRule {
    Needless,
    InvalidScope,
    Descriptionless,
    Illegal,
}

impl DisableReportRule {
    /// The stable code reported for this kind of finding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Needless => "--report-needless-disables",
            Self::InvalidScope => "--report-invalid-scope-disables",
            Self::Descriptionless => "--report-descriptionless-disables",
            Self::Illegal => "reportDisables",
        }
    }

    /// Matches a warning's rule identifier against the disable-report set.
    pub fn from_rule(rule: &str) -> Option<Self> {
        match rule {
            "--report-needless-disables" => Some(Self::Needless),
            "--report-invalid-scope-disables" => Some(Self::InvalidScope),
            "--report-descriptionless-disables" => Some(Self::Descriptionless),
            "reportDisables" => Some(Self::Illegal),
            _ => None,
        }
    }
}

/// Converts one engine invocation's raw result.
///
/// Only the first per-file entry is considered; the runner always lints a
/// single in-memory document.
pub fn process_lint_result(result: &LintResult) -> LintDiagnostics {
    let Some(file) = result.results.first() else {
        return LintDiagnostics::default();
    };

    if file.ignored {
        return LintDiagnostics::default();
    }

    let mut diagnostics: Vec<Diagnostic> = file
        .invalid_option_warnings
        .iter()
        .map(|warning| invalid_option_to_diagnostic(&warning.text))
        .collect();

    diagnostics.extend(file.warnings.iter().map(warning_to_diagnostic));

    let output = result
        .output
        .as_deref()
        .filter(|output| !output.is_empty())
        .map(str::to_string);

    LintDiagnostics {
        diagnostics,
        output,
    }
}

/// Converts a 1-based engine warning into a 0-based LSP diagnostic.
pub fn warning_to_diagnostic(warning: &Warning) -> Diagnostic {
    let start = Position::new(
        warning.line.saturating_sub(1),
        warning.column.saturating_sub(1),
    );
    let end = match (warning.end_line, warning.end_column) {
        (Some(line), Some(column)) => {
            Position::new(line.saturating_sub(1), column.saturating_sub(1))
        }
        _ => start,
    };

    let severity = match warning.severity {
        WarningSeverity::Error => DiagnosticSeverity::ERROR,
        WarningSeverity::Warning => DiagnosticSeverity::WARNING,
    };

    let code = warning.rule.as_deref().map(|rule| {
        let code = DisableReportRule::from_rule(rule)
            .map(|report| report.as_str())
            .unwrap_or(rule);
        NumberOrString::String(code.to_string())
    });

    Diagnostic {
        range: Range::new(start, end),
        severity: Some(severity),
        code,
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: warning.text.clone(),
        ..Diagnostic::default()
    }
}

/// Surfaces an invalid rule-option report as a document-start error.
///
/// These reports carry no position data.
fn invalid_option_to_diagnostic(text: &str) -> Diagnostic {
    Diagnostic {
        range: Range::new(Position::new(0, 0), Position::new(0, 0)),
        severity: Some(DiagnosticSeverity::ERROR),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: text.to_string(),
        ..Diagnostic::default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use stylelint_ls_engine::{FileResult, InvalidOptionWarning};

    use super::*;

    fn warning(raw: serde_json::Value) -> Warning {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_converts_warning_to_zero_based_diagnostic() {
        let diagnostic = warning_to_diagnostic(&warning(json!({
            "line": 2,
            "column": 5,
            "rule": "color-hex-case",
            "severity": "error",
            "text": "Expected \"#AAA\" to be \"#aaa\" (color-hex-case)",
        })));

        assert_eq!(diagnostic.range.start, Position::new(1, 4));
        assert_eq!(diagnostic.range.end, Position::new(1, 4));
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(
            diagnostic.code,
            Some(NumberOrString::String("color-hex-case".to_string()))
        );
        assert_eq!(diagnostic.source.as_deref(), Some("stylelint"));
        assert_eq!(
            diagnostic.message,
            "Expected \"#AAA\" to be \"#aaa\" (color-hex-case)"
        );
    }

    #[test]
    fn test_non_error_severity_becomes_warning() {
        let diagnostic = warning_to_diagnostic(&warning(json!({
            "line": 1,
            "column": 1,
            "severity": "warning",
            "text": "warning text",
        })));

        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(diagnostic.code, None);
    }

    #[test]
    fn test_end_positions_used_when_present() {
        let diagnostic = warning_to_diagnostic(&warning(json!({
            "line": 2,
            "column": 5,
            "endLine": 2,
            "endColumn": 9,
            "severity": "error",
            "text": "t",
        })));

        assert_eq!(diagnostic.range.start, Position::new(1, 4));
        assert_eq!(diagnostic.range.end, Position::new(1, 8));
    }

    #[test]
    fn test_disable_report_codes_are_stable() {
        for report in [
            DisableReportRule::Needless,
            DisableReportRule::InvalidScope,
            DisableReportRule::Descriptionless,
            DisableReportRule::Illegal,
        ] {
            assert_eq!(DisableReportRule::from_rule(report.as_str()), Some(report));
        }

        let diagnostic = warning_to_diagnostic(&warning(json!({
            "line": 1,
            "column": 1,
            "rule": "--report-needless-disables",
            "severity": "warning",
            "text": "Needless disable for \"indentation\"",
        })));

        assert_eq!(
            diagnostic.code,
            Some(NumberOrString::String(
                "--report-needless-disables".to_string()
            ))
        );
    }

    #[test]
    fn test_processes_first_result_entry() {
        let result = LintResult {
            results: vec![FileResult {
                warnings: vec![
                    warning(json!({
                        "line": 1, "column": 2, "rule": "indentation",
                        "severity": "warning", "text": "Expected indentation of 2 spaces",
                    })),
                    warning(json!({
                        "line": 3, "column": 1, "rule": "color-no-invalid-hex",
                        "severity": "error", "text": "Unexpected invalid hex color",
                    })),
                ],
                ..FileResult::default()
            }],
            output: None,
        };

        let processed = process_lint_result(&result);

        assert_eq!(processed.diagnostics.len(), 2);
        assert_eq!(processed.output, None);
    }

    #[test]
    fn test_ignored_file_yields_no_diagnostics() {
        let result = LintResult {
            results: vec![FileResult {
                warnings: vec![warning(json!({
                    "line": 1, "column": 1, "severity": "error", "text": "t",
                }))],
                ignored: true,
                ..FileResult::default()
            }],
            output: None,
        };

        assert_eq!(process_lint_result(&result), LintDiagnostics::default());
    }

    #[test]
    fn test_empty_result_yields_no_diagnostics() {
        assert_eq!(
            process_lint_result(&LintResult::default()),
            LintDiagnostics::default()
        );
    }

    #[test]
    fn test_invalid_option_warnings_become_error_diagnostics() {
        let result = LintResult {
            results: vec![FileResult {
                invalid_option_warnings: vec![InvalidOptionWarning {
                    text: "Invalid option value \"always\" for rule \"color-hex-case\"".to_string(),
                }],
                ..FileResult::default()
            }],
            output: None,
        };

        let processed = process_lint_result(&result);

        assert_eq!(processed.diagnostics.len(), 1);
        let diagnostic = &processed.diagnostics[0];
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diagnostic.range.start, Position::new(0, 0));
        assert!(diagnostic.message.starts_with("Invalid option value"));
    }

    #[test]
    fn test_output_included_only_when_non_empty() {
        let mut result = LintResult {
            results: vec![FileResult::default()],
            output: Some(String::new()),
        };
        assert_eq!(process_lint_result(&result).output, None);

        result.output = Some("[]".to_string());
        assert_eq!(process_lint_result(&result).output.as_deref(), Some("[]"));
    }
}
