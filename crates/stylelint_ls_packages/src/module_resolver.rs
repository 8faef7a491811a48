//! Locating named packages on disk.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;
use tracing::debug;

/// The fields of `package.json` resolution cares about.
#[derive(Debug, Deserialize)]
struct PackageManifest {
    main: Option<String>,
}

/// Walks up from `directory` until a directory containing a `package.json`
/// file is found.
///
/// Returns `Ok(None)` when the filesystem root is reached without finding
/// one. Errors other than a missing manifest propagate.
pub async fn find_package_root(directory: &Path) -> io::Result<Option<PathBuf>> {
    let mut current = directory.to_path_buf();

    loop {
        let manifest = current.join("package.json");

        match fs::metadata(&manifest).await {
            Ok(meta) if meta.is_file() => return Ok(Some(current)),
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }

        let parent = match current.parent() {
            Some(parent) if parent != current => parent.to_path_buf(),
            _ => return Ok(None),
        };

        current = parent;
    }
}

/// Resolves a named package to the file `require()` would load.
///
/// Candidate directories are `node_modules/<name>` in `cwd` and each of its
/// ancestors, then `<global_path>/<name>` when a global path is supplied.
/// Every attempt is described through `on_trace` before it runs, whether or
/// not it succeeds.
pub async fn resolve_module(
    name: &str,
    cwd: &Path,
    global_path: Option<&Path>,
    mut on_trace: impl FnMut(&str),
) -> Option<PathBuf> {
    on_trace(&format!("Resolving locally: {name} from {}", cwd.display()));

    for ancestor in cwd.ancestors() {
        let candidate = ancestor.join("node_modules").join(name);

        if let Some(entry) = package_entry(&candidate).await {
            return Some(entry);
        }
    }

    if let Some(global) = global_path {
        on_trace(&format!(
            "Resolving globally: {name} from {}",
            global.display()
        ));

        if let Some(entry) = package_entry(&global.join(name)).await {
            return Some(entry);
        }
    }

    None
}

/// Resolves a package directory to its entry file: the manifest's `main`
/// when present, `index.js` otherwise. The entry file must exist.
async fn package_entry(package_dir: &Path) -> Option<PathBuf> {
    let manifest_path = package_dir.join("package.json");
    let raw = fs::read_to_string(&manifest_path).await.ok()?;

    let manifest: PackageManifest = match serde_json::from_str(&raw) {
        Ok(manifest) => manifest,
        Err(err) => {
            debug!("skipping {}: unreadable manifest: {err}", manifest_path.display());
            return None;
        }
    };

    let entry = match manifest.main {
        Some(main) => package_dir.join(main),
        None => package_dir.join("index.js"),
    };

    match fs::metadata(&entry).await {
        Ok(meta) if meta.is_file() => Some(entry),
        _ => None,
    }
}
