//! Node-backed engine implementation.
//!
//! A resolved Stylelint module is a Node package. Both the load-time probe
//! and each lint invocation run a small embedded host script in a `node`
//! subprocess, exchanging JSON over stdio. Invocations are stateless, so
//! concurrent lints never contend on shared engine state.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::loader::{LoadOutcome, ModuleLoader};
use crate::{EngineError, LintEngine, LintOptions, LintResult};

/// Host script driving a Stylelint module inside Node.
const HOST_SHIM: &str = include_str!("../js/host-shim.js");

/// Loads Stylelint modules by probing them in a Node subprocess.
#[derive(Debug, Clone)]
pub struct NodeModuleLoader {
    node_binary: String,
}

impl NodeModuleLoader {
    /// Creates a loader using `node` from `PATH`.
    pub fn new() -> Self {
        Self::with_node_binary("node")
    }

    /// Creates a loader using a specific Node binary.
    pub fn with_node_binary(node_binary: impl Into<String>) -> Self {
        Self {
            node_binary: node_binary.into(),
        }
    }
}

impl Default for NodeModuleLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModuleLoader for NodeModuleLoader {
    async fn load(&self, path: &Path) -> LoadOutcome {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => {}
            _ => return LoadOutcome::NotFound,
        }

        let request = json!({
            "mode": "probe",
            "modulePath": path.to_string_lossy(),
        });

        match run_shim(&self.node_binary, &request).await {
            Ok(stdout) => match parse_probe_output(&stdout) {
                Ok(()) => {
                    debug!(module = %path.display(), "loaded Stylelint module");
                    LoadOutcome::Loaded(Arc::new(NodeLintEngine {
                        node_binary: self.node_binary.clone(),
                        module_path: path.to_path_buf(),
                    }))
                }
                Err(reason) => LoadOutcome::InvalidModule(reason),
            },
            Err(err) => LoadOutcome::InvalidModule(format!("failed to probe module: {err}")),
        }
    }
}

/// Engine handle bound to one resolved Stylelint module.
#[derive(Debug)]
pub struct NodeLintEngine {
    node_binary: String,
    module_path: PathBuf,
}

impl NodeLintEngine {
    /// The module this engine runs.
    pub fn module_path(&self) -> &Path {
        &self.module_path
    }
}

#[async_trait]
impl LintEngine for NodeLintEngine {
    async fn lint(&self, options: &LintOptions) -> Result<LintResult, EngineError> {
        let request = json!({
            "mode": "lint",
            "modulePath": self.module_path.to_string_lossy(),
            "options": options,
        });

        debug!(module = %self.module_path.display(), "invoking Stylelint");

        let stdout = run_shim(&self.node_binary, &request).await?;
        parse_lint_output(&stdout)
    }
}

/// Runs the host script with one JSON request and returns raw stdout.
async fn run_shim(node_binary: &str, request: &Value) -> Result<Vec<u8>, EngineError> {
    let mut child = Command::new(node_binary)
        .arg("-e")
        .arg(HOST_SHIM)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(&serde_json::to_vec(request)?).await?;
        stdin.shutdown().await?;
    }

    let output = child.wait_with_output().await?;

    if output.stdout.is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(EngineError::invocation(format!(
            "node exited with {} without responding: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(output.stdout)
}

/// Response envelope written by the host script.
#[derive(Debug, Deserialize)]
struct ShimEnvelope {
    #[serde(default)]
    ok: bool,
    result: Option<LintResult>,
    error: Option<ShimError>,
}

#[derive(Debug, Deserialize)]
struct ShimError {
    kind: String,
    message: String,
}

/// Decodes a probe response; `Err` carries the reason the module cannot be
/// used.
fn parse_probe_output(stdout: &[u8]) -> Result<(), String> {
    let envelope: ShimEnvelope = match serde_json::from_slice(stdout) {
        Ok(envelope) => envelope,
        Err(err) => return Err(format!("unreadable probe response: {err}")),
    };

    if envelope.ok {
        return Ok(());
    }

    match envelope.error {
        Some(error) => Err(error.message),
        None => Err("probe reported neither success nor an error".to_string()),
    }
}

/// Decodes a lint response into a raw result or a classified engine error.
fn parse_lint_output(stdout: &[u8]) -> Result<LintResult, EngineError> {
    let envelope: ShimEnvelope = serde_json::from_slice(stdout)?;

    if let Some(result) = envelope.result {
        return Ok(result);
    }

    match envelope.error {
        Some(error) if error.kind == "lint" => Err(EngineError::from_engine_message(error.message)),
        Some(error) => Err(EngineError::invocation(error.message)),
        None => Err(EngineError::invocation("engine returned an empty response")),
    }
}
