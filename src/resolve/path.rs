//! Request path → canonical filesystem path.

use std::io;
use std::path::{Component, Path, PathBuf};

/// File served for a request to `/`.
pub const INDEX_FILE: &str = "index.html";

/// Maps URL paths onto the serving root.
///
/// The root is canonicalized once at construction. Every path handed out by
/// [`PathResolver::resolve`] is absolute and free of `.`/`..` segments, with
/// symlinks resolved for the part of the path that exists on disk.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let absolute = std::path::absolute(root.as_ref())?;
        Ok(Self {
            root: canonicalize_lenient(&absolute),
        })
    }

    /// The canonical serving root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins a decoded request path (e.g. `/css/site.css`) onto the root and
    /// canonicalizes the result.
    ///
    /// Only normal and `..` segments are taken from the request. Root,
    /// drive-prefix and `.` components are dropped, so a request such as
    /// `//etc/passwd` cannot replace the root with an absolute path.
    pub fn resolve(&self, request_path: &str) -> PathBuf {
        let residual = request_path.strip_prefix('/').unwrap_or(request_path);

        let mut joined = self.root.clone();
        if residual.is_empty() {
            joined.push(INDEX_FILE);
        } else {
            for segment in residual.split('/') {
                for component in Path::new(segment).components() {
                    match component {
                        Component::Normal(name) => joined.push(name),
                        Component::ParentDir => joined.push(".."),
                        Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
                    }
                }
            }
        }

        canonicalize_lenient(&joined)
    }
}

/// Upper bound on dangling symlinks followed while resolving one path.
const MAX_SYMLINK_HOPS: u32 = 40;

/// Canonicalizes `path` even when it does not (fully) exist.
///
/// Components are walked left to right. While the accumulated prefix exists
/// it is canonicalized after every step, resolving symlinks. A symlink whose
/// target is missing is replaced by that target, so the result names what a
/// later read would open rather than the link. Components below a missing
/// one cannot be symlinks and are appended lexically; a `..` that climbs
/// back out of the missing part returns to the canonical prefix, and
/// resolution on disk resumes from there. `..` therefore always pops a real
/// directory, never a symlink name.
///
/// `path` should be absolute; a relative input yields a relative output.
pub fn canonicalize_lenient(path: &Path) -> PathBuf {
    let mut hops = MAX_SYMLINK_HOPS;
    walk(path, &mut hops).0
}

/// Returns the resolved path and how many of its trailing components are
/// missing on disk.
fn walk(path: &Path, hops: &mut u32) -> (PathBuf, usize) {
    let mut resolved = PathBuf::new();
    let mut missing = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
                missing = missing.saturating_sub(1);
            }
            Component::Normal(name) => {
                resolved.push(name);
                if missing > 0 {
                    missing += 1;
                    continue;
                }
                match std::fs::canonicalize(&resolved) {
                    Ok(real) => resolved = real,
                    Err(_) => {
                        missing = 1;
                        if *hops == 0 {
                            continue;
                        }
                        // Dangling symlink: continue from its target.
                        if let Ok(target) = std::fs::read_link(&resolved) {
                            *hops -= 1;
                            resolved.pop();
                            let target = resolved.join(target);
                            (resolved, missing) = walk(&target, hops);
                        }
                    }
                }
            }
        }
    }

    (resolved, missing)
}
