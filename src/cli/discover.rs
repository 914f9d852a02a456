//! Finding workflow documents to render

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Whether `path` names a YAML document
pub fn is_document(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    )
}

/// All `.yml`/`.yaml` files under `dir`, sorted by path.
///
/// Symlinked directories are not followed and the `out_dir` subtree is
/// skipped, so rendered output is never read back as input.
pub fn collect_documents(dir: &Path, out_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let resolved_out = out_dir.canonicalize().ok();
    let is_output_dir = |path: &Path| match (&resolved_out, path.canonicalize()) {
        (Some(out), Ok(resolved)) => resolved == *out,
        _ => false,
    };

    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.depth() > 0 && e.file_type().is_dir() && is_output_dir(e.path())));

    let mut documents = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.path().is_file() && is_document(entry.path()) {
            documents.push(entry.into_path());
        }
    }
    Ok(documents)
}
