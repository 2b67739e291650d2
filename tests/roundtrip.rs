//! Split/merge round-trip integration tests.
//!
//! These tests pin down the load-bearing correctness property: splitting a
//! file and merging the parts back, in index order, reproduces the
//! original byte-for-byte, with part lengths summing exactly to the source
//! length. Edge cases around part counts, repeat runs, and missing parts
//! are covered alongside a property test over arbitrary sizes.

use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use tempfile::TempDir;

use filestitch::checksum::{crc32_of_file, crc32_of_parts};
use filestitch::{Error, FilePart, SplitPlan, merge, part_path, split};

/// Writes `len` bytes of seeded pseudo-random data and returns the path.
fn random_source(dir: &TempDir, name: &str, len: usize, seed: u64) -> PathBuf {
    let mut data = vec![0u8; len];
    StdRng::seed_from_u64(seed).fill_bytes(&mut data);
    let path = dir.path().join(name);
    fs::write(&path, &data).unwrap();
    path
}

fn part_paths(parts: &[FilePart]) -> Vec<PathBuf> {
    parts.iter().map(|p| p.path.clone()).collect()
}

#[test]
fn test_split_then_merge_reproduces_source() {
    let dir = TempDir::new().unwrap();
    let source = random_source(&dir, "payload.bin", 100_003, 1);

    let parts = split(&source, 7).unwrap();
    assert_eq!(parts.len(), 7);
    let total: u64 = parts.iter().map(|p| p.length).sum();
    assert_eq!(total, 100_003);

    let target = dir.path().join("restored.bin");
    let written = merge(&target, &part_paths(&parts)).unwrap();
    assert_eq!(written, 100_003);
    assert_eq!(fs::read(&source).unwrap(), fs::read(&target).unwrap());
}

#[test]
fn test_worked_example_sizes() {
    // 10_000_000 / 4 splits evenly; one extra byte lands in the last part
    let even = SplitPlan::new(10_000_000, 4).unwrap();
    assert_eq!(
        (0..4).map(|i| even.part_len(i)).collect::<Vec<_>>(),
        [2_500_000, 2_500_000, 2_500_000, 2_500_000]
    );

    let odd = SplitPlan::new(10_000_001, 4).unwrap();
    assert_eq!(
        (0..4).map(|i| odd.part_len(i)).collect::<Vec<_>>(),
        [2_500_000, 2_500_000, 2_500_000, 2_500_001]
    );
}

#[test]
fn test_part_files_follow_naming_convention() {
    let dir = TempDir::new().unwrap();
    let source = random_source(&dir, "clip.mp4", 64, 2);

    let parts = split(&source, 3).unwrap();
    for (i, part) in parts.iter().enumerate() {
        assert_eq!(part.index as usize, i);
        assert_eq!(part.path, part_path(&source, part.index));
        assert!(part.path.to_string_lossy().ends_with(&format!(".{}.part", i)));
    }
}

#[test]
fn test_split_is_idempotent_across_runs() {
    let dir = TempDir::new().unwrap();
    let source = random_source(&dir, "again.bin", 10_240, 3);

    let first = split(&source, 4).unwrap();
    let first_bytes: Vec<Vec<u8>> = first.iter().map(|p| fs::read(&p.path).unwrap()).collect();

    // second run overwrites, never appends
    let second = split(&source, 4).unwrap();
    for (part, bytes) in second.iter().zip(&first_bytes) {
        assert_eq!(&fs::read(&part.path).unwrap(), bytes);
        assert_eq!(part.length, fs::metadata(&part.path).unwrap().len());
    }
}

#[test]
fn test_checksum_confirms_byte_exact_reconstruction() {
    let dir = TempDir::new().unwrap();
    let source = random_source(&dir, "verify.bin", 50_000, 4);

    let parts = split(&source, 6).unwrap();
    assert_eq!(
        crc32_of_file(&source).unwrap(),
        crc32_of_parts(&part_paths(&parts)).unwrap()
    );
}

#[test]
fn test_merge_missing_part_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = random_source(&dir, "gap.bin", 9_000, 5);

    let parts = split(&source, 3).unwrap();
    fs::remove_file(&parts[1].path).unwrap();

    let target = dir.path().join("gap-restored.bin");
    let err = merge(&target, &part_paths(&parts)).unwrap_err();
    assert!(matches!(err, Error::PartMissing { .. }));
    assert!(!target.exists(), "doomed merge must not create the target");
}

#[test]
fn test_merge_order_is_the_callers_responsibility() {
    let dir = TempDir::new().unwrap();
    let source = random_source(&dir, "order.bin", 6_000, 6);

    let parts = split(&source, 3).unwrap();
    let shuffled = vec![
        parts[2].path.clone(),
        parts[0].path.clone(),
        parts[1].path.clone(),
    ];

    let target = dir.path().join("order-restored.bin");
    merge(&target, &shuffled).unwrap();

    let mut expected = fs::read(&parts[2].path).unwrap();
    expected.extend(fs::read(&parts[0].path).unwrap());
    expected.extend(fs::read(&parts[1].path).unwrap());
    assert_eq!(fs::read(&target).unwrap(), expected);
    assert_ne!(fs::read(&target).unwrap(), fs::read(&source).unwrap());
}

#[test]
fn test_interrupted_part_is_visible_through_from_path() {
    let dir = TempDir::new().unwrap();
    let source = random_source(&dir, "short.bin", 4_096, 7);

    let parts = split(&source, 2).unwrap();
    // simulate an interrupted earlier run by truncating a part
    let truncated = fs::read(&parts[0].path).unwrap();
    fs::write(&parts[0].path, &truncated[..100]).unwrap();

    let observed = FilePart::from_path(0, &parts[0].path).unwrap();
    assert_eq!(observed.length, 100);
    assert!(observed.length < parts[0].length);
}

#[test]
fn test_part_count_equal_to_size_yields_single_byte_parts() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("bytes.bin");
    fs::write(&source, b"abcde").unwrap();

    let parts = split(&source, 5).unwrap();
    assert!(parts.iter().all(|p| p.length == 1));

    let target = dir.path().join("bytes-restored.bin");
    merge(&target, &part_paths(&parts)).unwrap();
    assert_eq!(fs::read(&target).unwrap(), b"abcde");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_roundtrip_is_byte_exact(len in 1usize..4096, count in 1u32..9, seed in any::<u64>()) {
        prop_assume!(count as usize <= len);

        let dir = TempDir::new().unwrap();
        let source = random_source(&dir, "prop.bin", len, seed);

        let parts = split(&source, count).unwrap();
        prop_assert_eq!(parts.len(), count as usize);
        let sum: u64 = parts.iter().map(|p| p.length).sum();
        prop_assert_eq!(sum, len as u64);

        let target = dir.path().join("prop-restored.bin");
        let written = merge(&target, &part_paths(&parts)).unwrap();
        prop_assert_eq!(written, len as u64);
        prop_assert_eq!(fs::read(&source).unwrap(), fs::read(&target).unwrap());
    }
}
