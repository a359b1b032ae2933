use hashdupe::duplicates::{DuplicateFinder, FinderConfig};
use hashdupe::scanner::{ExclusionSet, WalkerConfig};
use std::fs;
use tempfile::tempdir;

fn following() -> DuplicateFinder {
    let config = FinderConfig::default().with_walker_config(WalkerConfig::new(true));
    DuplicateFinder::new(config, ExclusionSet::empty())
}

#[test]
fn test_hardlinks_are_distinct_paths_with_equal_content() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("original.txt");
    fs::write(&original, b"identical content").unwrap();

    if let Err(e) = fs::hard_link(&original, dir.path().join("hardlink.txt")) {
        eprintln!("Skipping hardlink test: {}", e);
        return;
    }

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files.len(), 2);
    assert_eq!(summary.files_visited, 2);
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn test_symlinks_not_followed_by_default() {
        let dir = tempdir().unwrap();
        let original = dir.path().join("original.txt");
        fs::write(&original, b"content").unwrap();
        symlink(&original, dir.path().join("link.txt")).unwrap();

        let (groups, summary) = DuplicateFinder::with_defaults()
            .find_duplicates(dir.path())
            .unwrap();

        assert!(groups.is_empty());
        assert_eq!(summary.files_visited, 1);
    }

    #[test]
    fn test_followed_file_link_is_not_its_own_duplicate() {
        let dir = tempdir().unwrap();
        let original = dir.path().join("original.txt");
        fs::write(&original, b"content").unwrap();
        symlink(&original, dir.path().join("link.txt")).unwrap();

        let (groups, summary) = following().find_duplicates(dir.path()).unwrap();

        assert!(groups.is_empty());
        assert_eq!(summary.files_visited, 1);
    }

    #[test]
    fn test_followed_directory_link_outside_root() {
        let outside = tempdir().unwrap();
        fs::write(outside.path().join("shared.bin"), b"payload").unwrap();

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("local.bin"), b"payload").unwrap();
        symlink(outside.path(), dir.path().join("linked")).unwrap();

        let (not_followed, _) = DuplicateFinder::with_defaults()
            .find_duplicates(dir.path())
            .unwrap();
        assert!(not_followed.is_empty());

        let (groups, _) = following().find_duplicates(dir.path()).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].files.len(), 2);
    }

    #[test]
    fn test_symlink_cycle_terminates() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("a"), b"x").unwrap();
        symlink(dir.path(), sub.join("back_to_root")).unwrap();

        let (groups, summary) = following().find_duplicates(dir.path()).unwrap();

        assert!(groups.is_empty());
        assert_eq!(summary.files_visited, 1);
        assert!(summary.traversal_errors.len() >= 1);
    }

    #[test]
    fn test_followed_link_into_excluded_directory_is_pruned() {
        let dir = tempdir().unwrap();
        let skip = dir.path().join("skip");
        fs::create_dir(&skip).unwrap();
        fs::write(skip.join("a"), b"same").unwrap();
        fs::write(dir.path().join("b"), b"same").unwrap();
        symlink(&skip, dir.path().join("alias")).unwrap();

        let config = FinderConfig::default().with_walker_config(WalkerConfig::new(true));
        let exclusions = ExclusionSet::from_paths([&skip]);
        let (groups, summary) = DuplicateFinder::new(config, exclusions)
            .find_duplicates(dir.path())
            .unwrap();

        assert!(groups.is_empty());
        assert_eq!(summary.files_visited, 1);
        assert_eq!(summary.dirs_pruned, 2);
    }
}
