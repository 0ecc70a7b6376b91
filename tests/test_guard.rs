use fileward::resolve::guard::{resolve_entries, Access, AccessGuard};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn test_empty_blacklist_allows_everything() {
    let guard = AccessGuard::default();

    assert!(guard.is_allowed(Path::new("/srv/site/index.html")));
}

#[test]
fn test_prefix_match_respects_segment_boundaries() {
    let guard = AccessGuard::new(vec![PathBuf::from("/a/b")]);

    assert!(!guard.is_allowed(Path::new("/a/b")));
    assert!(!guard.is_allowed(Path::new("/a/b/c")));
    assert!(guard.is_allowed(Path::new("/a/bc")));
    assert!(guard.is_allowed(Path::new("/a")));
}

#[test]
fn test_ancestor_entry_blocks_descendants() {
    let guard = AccessGuard::new(vec![PathBuf::from("/a")]);

    assert!(!guard.is_allowed(Path::new("/a/b")));
    assert!(guard.is_allowed(Path::new("/ab")));
}

#[test]
fn test_first_matching_entry_wins() {
    let guard = AccessGuard::new(vec![PathBuf::from("/a/b"), PathBuf::from("/a")]);

    assert_eq!(guard.check(Path::new("/a/b/c")), Access::Denied(Path::new("/a/b")));
    assert_eq!(guard.check(Path::new("/a/x")), Access::Denied(Path::new("/a")));
    assert_eq!(guard.check(Path::new("/z")), Access::Allowed);
}

#[test]
fn test_relative_entries_resolve_against_root() {
    let dir = tempdir().unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();

    let entries = resolve_entries(&root, &["uploads/private", "./secrets/../keys"]);

    assert_eq!(entries, vec![root.join("uploads/private"), root.join("keys")]);
}

#[test]
fn test_absolute_entries_are_kept_absolute() {
    let dir = tempdir().unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();
    let other = tempdir().unwrap();

    let entries = resolve_entries(&root, &[other.path().to_string_lossy().into_owned()]);

    assert_eq!(entries, vec![fs::canonicalize(other.path()).unwrap()]);
}

#[test]
fn test_blank_entries_are_ignored() {
    let dir = tempdir().unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();

    let entries = resolve_entries(&root, &["", "   ", "logs"]);

    assert_eq!(entries, vec![root.join("logs")]);
}

#[cfg(unix)]
#[test]
fn test_symlinked_entry_is_stored_as_its_target() {
    let dir = tempdir().unwrap();
    let root = fs::canonicalize(dir.path()).unwrap();
    fs::create_dir(root.join("private")).unwrap();
    std::os::unix::fs::symlink(root.join("private"), root.join("shortcut")).unwrap();

    let entries = resolve_entries(&root, &["shortcut"]);

    assert_eq!(entries, vec![root.join("private")]);
}
