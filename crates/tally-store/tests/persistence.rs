//! On-disk save/load behaviour.

use std::fs;

use proptest::prelude::*;
use tally_core::{fibonacci, recurrence, Buffer, ErrorKind, TallyError};
use tally_store::{load, save, Store, StoreConfig, WriteMode};
use tally_test_utils::raw_record;

fn both_modes() -> [Store; 2] {
    [
        Store::new(StoreConfig::with_write_mode(WriteMode::Atomic)).unwrap(),
        Store::new(StoreConfig::with_write_mode(WriteMode::Truncate)).unwrap(),
    ]
}

#[test]
fn save_then_load_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    for (i, store) in both_modes().iter().enumerate() {
        let path = dir.path().join(format!("fib-{i}.bin"));
        let fib = fibonacci(25).unwrap();
        store.save(&fib, &path).unwrap();
        assert_eq!(store.load(&path).unwrap(), fib);
    }
}

#[test]
fn file_layout_matches_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fib.bin");
    save(&fibonacci(4).unwrap(), &path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), raw_record(4, &[1, 1, 2, 3]));
}

#[test]
fn loading_twice_gives_equal_buffers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fib.bin");
    save(&fibonacci(12).unwrap(), &path).unwrap();
    let first = load(&path).unwrap();
    let second = load(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn save_fully_rewrites_a_longer_record() {
    let dir = tempfile::tempdir().unwrap();
    for (i, store) in both_modes().iter().enumerate() {
        let path = dir.path().join(format!("shrink-{i}.bin"));
        store.save(&fibonacci(100).unwrap(), &path).unwrap();
        let lucas = recurrence(3, 2, 1).unwrap();
        store.save(&lucas, &path).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 16);
        assert_eq!(store.load(&path).unwrap(), [2, 1, 3]);
    }
}

#[test]
fn empty_record_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.bin");
    save(&Buffer::default(), &path).unwrap();
    assert!(load(&path).unwrap().is_empty());
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.bin");
    match load(&path) {
        Err(TallyError::NotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn interrupted_write_is_detected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.bin");
    // What an in-place write cut off after the third element would leave.
    fs::write(&path, raw_record(5, &[1, 1, 2])).unwrap();
    assert_eq!(load(&path).unwrap_err().kind(), ErrorKind::TruncatedInput);
}

#[test]
fn negative_length_on_disk_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("neg.bin");
    fs::write(&path, raw_record(-1, &[])).unwrap();
    assert_eq!(load(&path).unwrap_err().kind(), ErrorKind::CorruptFormat);
}

#[test]
fn trailing_bytes_on_disk_are_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tail.bin");
    fs::write(&path, raw_record(1, &[1, 99])).unwrap();
    assert_eq!(load(&path).unwrap_err().kind(), ErrorKind::CorruptFormat);
}

#[test]
fn store_limit_rejects_oversized_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.bin");
    save(&fibonacci(10).unwrap(), &path).unwrap();

    let mut config = StoreConfig::default();
    config.codec.max_elements = 5;
    let store = Store::new(config).unwrap();
    assert_eq!(store.load(&path).unwrap_err().kind(), ErrorKind::CorruptFormat);
}

#[test]
fn failed_atomic_save_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    // Renaming a file over a non-empty directory always fails.
    let target = dir.path().join("occupied");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep"), b"x").unwrap();

    let err = save(&fibonacci(5).unwrap(), &target).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
    assert!(target.join("keep").exists());
}

#[test]
fn save_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("fib.bin");
    for store in both_modes() {
        let err = store.save(&fibonacci(3).unwrap(), &path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}

#[cfg(unix)]
#[test]
fn saved_files_are_not_executable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    for (i, store) in both_modes().iter().enumerate() {
        let path = dir.path().join(format!("mode-{i}.bin"));
        store.save(&fibonacci(3).unwrap(), &path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o600, 0o600, "owner must read and write");
        assert_eq!(mode & 0o111, 0, "record files are never executable");
    }
}

#[cfg(unix)]
#[test]
fn failed_atomic_save_keeps_previous_record() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let records = dir.path().join("records");
    fs::create_dir(&records).unwrap();
    let path = records.join("fib.bin");
    let fib = fibonacci(10).unwrap();
    save(&fib, &path).unwrap();

    fs::set_permissions(&records, fs::Permissions::from_mode(0o555)).unwrap();
    // Privileged users ignore directory permissions; nothing to check there.
    let privileged = fs::write(records.join("canary"), b"").is_ok();
    let result = save(&fibonacci(20).unwrap(), &path);
    fs::set_permissions(&records, fs::Permissions::from_mode(0o755)).unwrap();
    if privileged {
        return;
    }

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Io);
    assert_eq!(load(&path).unwrap(), fib);
}

#[cfg(unix)]
#[test]
fn symlink_targets_follow_write_mode() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("target.bin");
    let link = dir.path().join("link.bin");
    let old = fibonacci(3).unwrap();
    let new = fibonacci(6).unwrap();

    save(&old, &target).unwrap();
    symlink(&target, &link).unwrap();
    Store::new(StoreConfig::with_write_mode(WriteMode::Truncate))
        .unwrap()
        .save(&new, &link)
        .unwrap();
    assert_eq!(load(&target).unwrap(), new);

    save(&old, &target).unwrap();
    save(&new, &link).unwrap();
    assert!(!fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(load(&link).unwrap(), new);
    assert_eq!(load(&target).unwrap(), old);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn persisted_sequences_roundtrip(n in 1usize..500) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fib.bin");
        let fib = fibonacci(n).unwrap();
        save(&fib, &path).unwrap();
        prop_assert_eq!(load(&path).unwrap(), fib);
    }
}
