//! Workspace lookup for documents.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::Document;

/// Maps a document to the workspace folder that contains it.
#[async_trait]
pub trait WorkspaceProvider: Send + Sync {
    async fn workspace_folder(&self, document: &Document) -> Option<PathBuf>;
}

/// Provider used when no workspace is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoWorkspace;

#[async_trait]
impl WorkspaceProvider for NoWorkspace {
    async fn workspace_folder(&self, _document: &Document) -> Option<PathBuf> {
        None
    }
}

/// A fixed set of workspace folders, matched by path prefix.
///
/// Picks the most specific folder containing the document, the way an
/// editor associates documents with nested workspace folders.
#[derive(Debug, Default, Clone)]
pub struct WorkspaceFolders {
    folders: Vec<PathBuf>,
}

impl WorkspaceFolders {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self { folders }
    }
}

#[async_trait]
impl WorkspaceProvider for WorkspaceFolders {
    async fn workspace_folder(&self, document: &Document) -> Option<PathBuf> {
        let path = document.fs_path()?;

        self.folders
            .iter()
            .filter(|folder| path.starts_with(folder))
            .max_by_key(|folder| folder.components().count())
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use tower_lsp::lsp_types::Url;

    use super::*;

    fn document(uri: &str) -> Document {
        Document::new(Url::parse(uri).unwrap(), "")
    }

    #[tokio::test]
    async fn test_no_workspace_yields_none() {
        let doc = document("file:///workspace/a.css");
        assert_eq!(NoWorkspace.workspace_folder(&doc).await, None);
    }

    #[tokio::test]
    async fn test_selects_containing_folder() {
        let folders = WorkspaceFolders::new(vec![
            PathBuf::from("/workspace"),
            PathBuf::from("/elsewhere"),
        ]);
        let doc = document("file:///workspace/styles/a.css");

        assert_eq!(
            folders.workspace_folder(&doc).await,
            Some(PathBuf::from("/workspace"))
        );
    }

    #[tokio::test]
    async fn test_prefers_most_specific_folder() {
        let folders = WorkspaceFolders::new(vec![
            PathBuf::from("/workspace"),
            PathBuf::from("/workspace/packages/app"),
        ]);
        let doc = document("file:///workspace/packages/app/a.css");

        assert_eq!(
            folders.workspace_folder(&doc).await,
            Some(PathBuf::from("/workspace/packages/app"))
        );
    }

    #[tokio::test]
    async fn test_unrelated_document_has_no_folder() {
        let folders = WorkspaceFolders::new(vec![PathBuf::from("/workspace")]);
        let doc = document("file:///tmp/scratch.css");

        assert_eq!(folders.workspace_folder(&doc).await, None);
    }

    #[tokio::test]
    async fn test_non_file_document_has_no_folder() {
        let folders = WorkspaceFolders::new(vec![PathBuf::from("/workspace")]);
        let doc = document("untitled:Untitled-1");

        assert_eq!(folders.workspace_folder(&doc).await, None);
    }
}
