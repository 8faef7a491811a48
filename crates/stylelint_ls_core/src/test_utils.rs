//! Shared fakes for resolver and runner tests.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tower_lsp::lsp_types::Url;

use stylelint_ls_engine::{
    EngineError, LintEngine, LintOptions, LintResult, LoadOutcome, ModuleLoader,
};
use stylelint_ls_packages::{GlobalPathResolver, GlobalRootQuery, PackageManager};

use crate::connection::Connection;
use crate::workspace::WorkspaceProvider;
use crate::Document;

/// Connection recording every message per channel.
#[derive(Default)]
pub struct RecordingConnection {
    pub traces: Mutex<Vec<String>>,
    pub error_messages: Mutex<Vec<String>>,
    pub console_errors: Mutex<Vec<String>>,
}

impl RecordingConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn trace_count(&self) -> usize {
        self.traces.lock().len()
    }

    pub fn error_message_count(&self) -> usize {
        self.error_messages.lock().len()
    }
}

#[async_trait]
impl Connection for RecordingConnection {
    async fn trace(&self, message: String) {
        self.traces.lock().push(message);
    }

    async fn show_error_message(&self, message: String) {
        self.error_messages.lock().push(message);
    }

    async fn console_error(&self, message: String) {
        self.console_errors.lock().push(message);
    }
}

/// Workspace provider with one fixed folder.
pub struct FixedWorkspace(pub PathBuf);

#[async_trait]
impl WorkspaceProvider for FixedWorkspace {
    async fn workspace_folder(&self, _document: &Document) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Engine returning one canned result for every invocation.
pub struct StaticEngine(pub LintResult);

#[async_trait]
impl LintEngine for StaticEngine {
    async fn lint(&self, _options: &LintOptions) -> Result<LintResult, EngineError> {
        Ok(self.0.clone())
    }
}

/// Engine replaying a queue of responses and recording received options.
#[derive(Default)]
pub struct ScriptedEngine {
    responses: Mutex<VecDeque<Result<LintResult, EngineError>>>,
    pub received: Mutex<Vec<LintOptions>>,
}

impl ScriptedEngine {
    pub fn new(
        responses: impl IntoIterator<Item = Result<LintResult, EngineError>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.received.lock().len()
    }
}

#[async_trait]
impl LintEngine for ScriptedEngine {
    async fn lint(&self, options: &LintOptions) -> Result<LintResult, EngineError> {
        self.received.lock().push(options.clone());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(LintResult::default()))
    }
}

/// Loader producing a fixed outcome and counting invocations.
pub struct FakeLoader {
    outcome: LoadOutcome,
    pub calls: AtomicUsize,
}

impl FakeLoader {
    pub fn with_engine(engine: Arc<dyn LintEngine>) -> Arc<Self> {
        Arc::new(Self {
            outcome: LoadOutcome::Loaded(engine),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn valid() -> Arc<Self> {
        Self::with_engine(Arc::new(StaticEngine(LintResult::default())))
    }

    pub fn invalid(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: LoadOutcome::InvalidModule(reason.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModuleLoader for FakeLoader {
    async fn load(&self, path: &Path) -> LoadOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => self.outcome.clone(),
            _ => LoadOutcome::NotFound,
        }
    }
}

/// Global root query serving fixed directories.
pub struct StaticGlobalRoots {
    roots: Vec<(PackageManager, PathBuf)>,
}

impl StaticGlobalRoots {
    pub fn resolver(roots: Vec<(PackageManager, PathBuf)>) -> GlobalPathResolver {
        GlobalPathResolver::with_query(Box::new(Self { roots }))
    }
}

#[async_trait]
impl GlobalRootQuery for StaticGlobalRoots {
    async fn global_root(&self, manager: PackageManager) -> Option<PathBuf> {
        self.roots
            .iter()
            .find(|(candidate, _)| *candidate == manager)
            .map(|(_, root)| root.clone())
    }
}

/// A document with a file URI under the given directory.
pub fn file_document(directory: &Path, name: &str, text: &str) -> Document {
    let url = Url::from_file_path(directory.join(name)).unwrap();
    Document::new(url, text)
}

/// A document with a non-file scheme.
pub fn untitled_document(text: &str) -> Document {
    Document::new(Url::parse("untitled:Untitled-1").unwrap(), text)
}

/// Installs a fake Stylelint package under `root/node_modules` and returns
/// its entry file.
pub fn install_stylelint(root: &Path) -> PathBuf {
    let package_dir = root.join("node_modules").join("stylelint");
    fs::create_dir_all(&package_dir).unwrap();
    fs::write(
        package_dir.join("package.json"),
        r#"{"name": "stylelint", "main": "lib/index.js"}"#,
    )
    .unwrap();

    let lib_dir = package_dir.join("lib");
    fs::create_dir_all(&lib_dir).unwrap();
    let entry = lib_dir.join("index.js");
    fs::write(&entry, "module.exports = { lint () {} };\n").unwrap();
    entry
}

/// Writes a lone module file and returns its path.
pub fn write_module(directory: &Path, name: &str) -> PathBuf {
    let path = directory.join(name);
    fs::write(&path, "module.exports = { lint () {} };\n").unwrap();
    path
}
