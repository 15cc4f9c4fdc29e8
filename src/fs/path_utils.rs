// src/fs/path_utils.rs

//! Path helpers shared by the build context and the scanners.

use std::path::{Component, Path, PathBuf};

use anyhow::Result;

use super::FileSystem;

/// Make `path` absolute against the current working directory.
///
/// Purely lexical: symlinks are not resolved and the path does not need to
/// exist. Falls back to the input if the working directory is unavailable.
pub fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Drop `.` components and fold `..` into the preceding component.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            // `..` at the root stays at the root; leading `..` in a relative
            // path is kept.
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Canonical form of `path` that tolerates paths which do not exist yet.
///
/// The longest existing prefix of the absolute path is canonicalized through
/// `fs` as written, so a `..` after a symlink resolves against the link's
/// target. Only the missing tail is folded lexically. A path with no existing
/// prefix at all comes back in its absolute, lexically normalized form.
pub fn canonicalize_lenient(fs: &dyn FileSystem, path: &Path) -> Result<PathBuf> {
    let abs = absolute(path);
    let components: Vec<Component<'_>> = abs.components().collect();

    for keep in (1..=components.len()).rev() {
        let head: PathBuf = components[..keep].iter().collect();
        if !fs.exists(&head) {
            continue;
        }

        let mut canon = fs.canonicalize(&head)?;
        for comp in &components[keep..] {
            canon.push(comp.as_os_str());
        }
        return Ok(normalize_lexically(&canon));
    }

    Ok(normalize_lexically(&abs))
}

/// Convert `path` into a string relative to `root`, with forward slashes.
///
/// Returns `None` unless `path` lies strictly below `root`; `root` itself
/// and anything outside it have no relative form.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(slash_str(rel))
}

/// Render a relative path with `/` separators on every platform.
pub fn slash_str(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
