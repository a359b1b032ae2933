use hashdupe::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use hashdupe::error::ConfigError;
use hashdupe::scanner::{ExclusionSet, WalkError};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn write(path: &std::path::Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.files_visited, 0);
    assert_eq!(summary.duplicate_groups, 0);
    assert!(!summary.has_errors());
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"content a");
    write(&dir.path().join("b.txt"), b"content b");
    write(&dir.path().join("c.txt"), b"content c");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.files_visited, 3);
    assert_eq!(summary.files_hashed, 3);
}

#[test]
fn test_scan_two_identical_one_different() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a.txt"), b"duplicate");
    write(&dir.path().join("b.txt"), b"duplicate");
    write(&dir.path().join("c.txt"), b"unique");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    let root = fs::canonicalize(dir.path()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].files,
        vec![root.join("a.txt"), root.join("b.txt")]
    );
    assert_eq!(groups[0].size, 9);
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.duplicate_files, 1);
    assert_eq!(summary.reclaimable_space, 9);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let deep = dir.path().join("one").join("two").join("three");
    fs::create_dir_all(&deep).unwrap();

    write(&dir.path().join("top.txt"), b"shared");
    write(&deep.join("bottom.txt"), b"shared");
    write(&dir.path().join("one").join("other.txt"), b"alone");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files.len(), 2);
    assert!(groups[0].files.iter().all(|p| p.is_absolute()));
    assert_eq!(summary.files_visited, 3);
}

#[test]
fn test_scan_multiple_groups_in_discovery_order() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("a1.txt"), b"alpha");
    write(&dir.path().join("b1.txt"), b"beta");
    write(&dir.path().join("b2.txt"), b"beta");
    write(&dir.path().join("a2.txt"), b"alpha");
    write(&dir.path().join("a3.txt"), b"alpha");

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 2);
    // Siblings are visited by name, so "alpha" (a1) is seen before "beta" (b1).
    assert_eq!(groups[0].files.len(), 3);
    assert!(groups[0].files[0].ends_with("a1.txt"));
    assert_eq!(groups[1].files.len(), 2);
    assert_eq!(summary.duplicate_files, 3);
}

#[test]
fn test_identical_content_different_names_and_dirs() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("photos")).unwrap();
    fs::create_dir(dir.path().join("backup")).unwrap();
    write(&dir.path().join("photos").join("IMG_001.jpg"), &[0xff; 5000]);
    write(&dir.path().join("backup").join("copy of photo"), &[0xff; 5000]);

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
}

#[test]
fn test_empty_files_are_duplicates_of_each_other() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("empty1")).unwrap();
    File::create(dir.path().join("empty2")).unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size, 0);
    assert_eq!(
        groups[0].fingerprint.to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_large_file_spanning_many_chunks() {
    let dir = tempdir().unwrap();
    let mut content = vec![0u8; 300_000];
    for (i, b) in content.iter_mut().enumerate() {
        *b = (i % 251) as u8;
    }
    write(&dir.path().join("big1.bin"), &content);
    write(&dir.path().join("big2.bin"), &content);
    content[299_999] ^= 1;
    write(&dir.path().join("big3.bin"), &content);

    let config = FinderConfig::default().with_chunk_size(8 * 1024);
    let (groups, summary) = DuplicateFinder::new(config, ExclusionSet::empty())
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].files.len(), 2);
    assert_eq!(summary.bytes_hashed, 900_000);
}

#[test]
fn test_missing_root_fails_before_hashing() {
    let dir = tempdir().unwrap();
    let result = DuplicateFinder::with_defaults().find_duplicates(&dir.path().join("absent"));

    assert!(matches!(
        result,
        Err(FinderError::Config(ConfigError::Root(WalkError::NotFound(_))))
    ));
}

#[test]
fn test_root_is_a_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    write(&file, b"x");

    let result = DuplicateFinder::with_defaults().find_duplicates(&file);

    assert!(matches!(
        result,
        Err(FinderError::Config(ConfigError::Root(WalkError::NotADirectory(_))))
    ));
}

#[test]
fn test_repeated_scans_are_identical() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("x"), b"same");
    write(&dir.path().join("y"), b"same");
    write(&dir.path().join("z"), b"same");

    let (first, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    let (second, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(first, second);
}
