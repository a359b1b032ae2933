use hashdupe::duplicates::DuplicateFinder;
use hashdupe::scanner::ReadError;
use std::fs;
use tempfile::tempdir;

#[cfg(unix)]
fn make_unreadable(path: &std::path::Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users can still open the file; callers skip those checks.
    fs::File::open(path).is_err()
}

#[cfg(unix)]
fn restore(path: &std::path::Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(mode));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_skipped_and_duplicates_found() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), b"twin").unwrap();
    fs::write(dir.path().join("b.txt"), b"twin").unwrap();
    let locked = dir.path().join("locked.txt");
    fs::write(&locked, b"twin").unwrap();

    let unreadable = make_unreadable(&locked);
    let result = DuplicateFinder::with_defaults().find_duplicates(dir.path());
    restore(&locked, 0o644);

    let (groups, summary) = result.unwrap();
    assert_eq!(summary.files_visited, 3);

    if unreadable {
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].files.len(), 2);
        assert!(groups[0].files.iter().all(|p| !p.ends_with("locked.txt")));
        assert_eq!(summary.unreadable_files(), 1);
        assert!(matches!(
            summary.read_errors[0],
            ReadError::PermissionDenied(_)
        ));
        assert!(summary.read_errors[0].path().ends_with("locked.txt"));
    } else {
        assert_eq!(groups[0].files.len(), 3);
        assert!(!summary.has_errors());
    }
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_reported_and_scan_continues() {
    let dir = tempdir().unwrap();
    let sealed = dir.path().join("sealed");
    fs::create_dir(&sealed).unwrap();
    fs::write(sealed.join("hidden.txt"), b"x").unwrap();
    fs::write(dir.path().join("a"), b"pair").unwrap();
    fs::write(dir.path().join("b"), b"pair").unwrap();

    let unreadable = make_unreadable(&sealed);
    let result = DuplicateFinder::with_defaults().find_duplicates(dir.path());
    restore(&sealed, 0o755);

    let (groups, summary) = result.unwrap();
    assert_eq!(groups.len(), 1);
    if unreadable {
        assert_eq!(summary.files_visited, 2);
        assert_eq!(summary.traversal_errors.len(), 1);
        assert!(summary.has_errors());
    }
}

#[test]
fn test_clean_tree_reports_no_errors() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"1").unwrap();

    let (_, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(summary.unreadable_files(), 0);
    assert!(!summary.has_errors());
}

#[cfg(unix)]
#[test]
fn test_dangling_link_is_traversal_error_when_following() {
    use hashdupe::duplicates::FinderConfig;
    use hashdupe::scanner::{ExclusionSet, WalkerConfig};

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"pair").unwrap();
    fs::write(dir.path().join("b"), b"pair").unwrap();
    let dangling = dir.path().join("dangling");
    std::os::unix::fs::symlink(dir.path().join("gone"), &dangling).unwrap();

    let config = FinderConfig::default().with_walker_config(WalkerConfig::new(true));
    let (groups, summary) = DuplicateFinder::new(config, ExclusionSet::empty())
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files.len(), 2);
    assert!(summary.read_errors.is_empty());
    assert_eq!(summary.unreadable_files(), 1);
    assert!(summary.has_errors());
    match &summary.traversal_errors[0] {
        ReadError::NotFound(path) => assert!(path.ends_with("dangling")),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}
