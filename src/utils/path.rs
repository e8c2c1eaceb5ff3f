//! Path derivation for intermediate clips and manifests

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Extension of the concat manifest written next to the final output
pub const MANIFEST_EXTENSION: &str = "clips";

/// `<stem>-<index:03><.ext>` next to `output`
pub fn clip_path(output: &Path, index: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut file_name = OsString::from(format!("{}-{:03}", stem, index));
    if let Some(extension) = output.extension() {
        file_name.push(".");
        file_name.push(extension);
    }
    output.with_file_name(file_name)
}

/// `<output>` with its extension replaced by `.clips`
pub fn manifest_path(output: &Path) -> PathBuf {
    output.with_extension(MANIFEST_EXTENSION)
}

/// Directory a manifest lives in; empty for a bare file name
pub fn manifest_dir(manifest: &Path) -> &Path {
    manifest.parent().unwrap_or(Path::new(""))
}

/// `path` as seen from `base`, the way the concat demuxer resolves `file` lines
///
/// Relative paths outside `base` get one `..` per component of `base`; that
/// only works while `base` is itself a plain relative path, so anything else
/// is returned unchanged.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
    if base.as_os_str().is_empty() {
        return path.to_path_buf();
    }
    if let Ok(rest) = path.strip_prefix(base) {
        return rest.to_path_buf();
    }
    let plain_base = base.components().all(|c| matches!(c, Component::Normal(_)));
    if path.is_relative() && plain_base {
        let mut relative: PathBuf = base.components().map(|_| Component::ParentDir).collect();
        relative.push(path);
        return normalize(&relative);
    }
    path.to_path_buf()
}

/// Inverse of [`relative_to`]: a `file` path from a manifest in `base`
pub fn resolve_from(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        normalize(&base.join(path))
    }
}

/// Lexically drop `.` and fold `name/..` pairs
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if matches!(parts.last(), Some(Component::Normal(_))) => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}
