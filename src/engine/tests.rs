use super::*;
use crate::boundary::LineBoundary;
use crate::collect::NameBlacklist;
use crate::config::{PartitionConfig, SortOrder};
use crate::error::PartitionError;
use crate::store::{DocumentStore, MemoryStore, StoreOp};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn paths(store: &MemoryStore, dir: &str) -> Vec<PathBuf> {
    store.list(Path::new(dir), false).unwrap()
}

/// Non-whitespace characters of every document, sorted
fn char_bag<'a>(texts: impl Iterator<Item = &'a str>) -> Vec<char> {
    let mut chars: Vec<char> = texts
        .flat_map(|t| t.chars())
        .filter(|c| !c.is_whitespace())
        .collect();
    chars.sort_unstable();
    chars
}

fn store_bag(store: &MemoryStore) -> Vec<char> {
    char_bag(store.paths().map(|p| store.get(p).unwrap()))
}

/// Every write in the journal happens before the first removal
fn writes_before_removes(journal: &[StoreOp]) -> bool {
    let first_remove = journal
        .iter()
        .position(|op| matches!(op, StoreOp::Remove(_)))
        .unwrap_or(journal.len());
    journal[first_remove..]
        .iter()
        .all(|op| matches!(op, StoreOp::Remove(_)))
}

#[test]
fn test_small_documents_merged_to_file_limit() {
    let mut store = MemoryStore::new();
    for i in 0..10 {
        let letter = (b'a' + i as u8) as char;
        store.insert(format!("txt/doc{}.txt", i), letter.to_string().repeat(5_000));
    }
    let before = store_bag(&store);

    let partitioner = Partitioner::new(PartitionConfig::new(50_000, 3)).unwrap();
    let inputs = paths(&store, "txt");
    let plan = partitioner.run(&mut store, &inputs, Path::new("txt")).unwrap();

    assert!(plan.outputs.len() <= 3);
    assert_eq!(store.file_count(), plan.outputs.len());
    for path in plan.output_paths() {
        assert!(store.get(&path).unwrap().chars().count() <= 50_000);
    }
    assert_eq!(store_bag(&store), before);
    assert!(writes_before_removes(store.journal()));
    assert!(store.exists(Path::new("txt/concatenated_1.txt")));
}

#[test]
fn test_infeasible_run_touches_nothing() {
    let block = "m".repeat(1_000);
    let text = vec![block; 60].join("\n\n");
    let mut store = MemoryStore::new();
    for i in 0..5 {
        store.insert(format!("txt/big{}.txt", i), text.clone());
    }

    let partitioner = Partitioner::new(PartitionConfig::new(50_000, 3)).unwrap();
    let inputs = paths(&store, "txt");
    let err = partitioner
        .run(&mut store, &inputs, Path::new("txt"))
        .unwrap_err();

    match err {
        PartitionError::ConstraintInfeasible {
            required,
            max_files,
            ..
        } => {
            assert_eq!(required, 10);
            assert_eq!(max_files, 3);
        }
        other => panic!("expected infeasible, got {:?}", other),
    }
    assert!(store.journal().is_empty());
    assert_eq!(store.file_count(), 5);
}

#[test]
fn test_count_equal_to_limit_passes_through() {
    let mut store = MemoryStore::new()
        .with_file("txt/a.txt", "alpha")
        .with_file("txt/b.txt", "beta")
        .with_file("txt/c.txt", "gamma");

    let partitioner = Partitioner::new(PartitionConfig::new(100, 3)).unwrap();
    let inputs = paths(&store, "txt");
    let plan = partitioner.run(&mut store, &inputs, Path::new("txt")).unwrap();

    assert_eq!(plan.merges, 0);
    assert_eq!(plan.count("untouched"), 3);
    assert!(store.journal().is_empty());
}

#[test]
fn test_oversized_document_split_and_removed() {
    let mut store = MemoryStore::new()
        .with_file("txt/general.txt", "first block\n\nsecond block\n\nthird block")
        .with_file("txt/tiny.txt", "hi");

    let partitioner = Partitioner::new(PartitionConfig::new(20, 5)).unwrap();
    let inputs = paths(&store, "txt");
    let plan = partitioner.run(&mut store, &inputs, Path::new("txt")).unwrap();

    assert_eq!(plan.split_documents, 1);
    assert_eq!(
        plan.output_paths(),
        vec![
            PathBuf::from("txt/general_part1.txt"),
            PathBuf::from("txt/general_part2.txt"),
            PathBuf::from("txt/general_part3.txt"),
            PathBuf::from("txt/tiny.txt"),
        ]
    );
    assert!(!store.exists(Path::new("txt/general.txt")));
    assert_eq!(
        store.get(Path::new("txt/general_part2.txt")),
        Some("second block")
    );
    assert_eq!(
        store.journal().last(),
        Some(&StoreOp::Remove(PathBuf::from("txt/general.txt")))
    );
}

#[test]
fn test_greedy_shortfall_is_consistency_violation() {
    let mut store = MemoryStore::new();
    for name in ["a", "b", "c", "d"] {
        store.insert(format!("txt/{}.txt", name), "n".repeat(60));
    }

    // 240 / 120 = 2 bins in theory, but no two documents fit together
    let partitioner = Partitioner::new(PartitionConfig::new(120, 2)).unwrap();
    let inputs = paths(&store, "txt");
    let err = partitioner
        .run(&mut store, &inputs, Path::new("txt"))
        .unwrap_err();

    assert!(matches!(
        err,
        PartitionError::ConsistencyViolation {
            produced: 4,
            max_files: 2
        }
    ));
    assert!(store.journal().is_empty());
}

#[test]
fn test_part_name_colliding_with_untouched_document() {
    let mut store = MemoryStore::new()
        .with_file("txt/chan.txt", "aaaa\n\nbbbb")
        .with_file("txt/chan_part1.txt", "old");

    let partitioner = Partitioner::new(PartitionConfig::new(5, 10)).unwrap();
    let inputs = paths(&store, "txt");
    let err = partitioner
        .run(&mut store, &inputs, Path::new("txt"))
        .unwrap_err();

    assert!(matches!(err, PartitionError::OutputCollision(_)));
    assert!(store.journal().is_empty());
}

#[test]
fn test_new_output_never_replaces_filtered_out_file() {
    let mut store = MemoryStore::new()
        .with_file("txt/concatenated_1.txt", "excluded notes")
        .with_file("txt/a.txt", "aaa")
        .with_file("txt/b.txt", "bbb");
    let blacklist = NameBlacklist::new(["concatenated"]);

    let partitioner = Partitioner::new(PartitionConfig::new(100, 1)).unwrap();
    let err = partitioner
        .run_dir(&mut store, Path::new("txt"), |p| blacklist.allows(p), false)
        .unwrap_err();

    match err {
        PartitionError::OutputCollision(path) => {
            assert_eq!(path, PathBuf::from("txt/concatenated_1.txt"))
        }
        other => panic!("expected OutputCollision, got {other}"),
    }
    assert!(store.journal().is_empty());
    assert_eq!(
        store.get(Path::new("txt/concatenated_1.txt")),
        Some("excluded notes")
    );
    assert_eq!(store.file_count(), 3);
}

#[test]
fn test_dry_run_reports_collision_in_output_dir() {
    let mut store = MemoryStore::new()
        .with_file("txt/log.txt", "aaaa\n\nbbbb")
        .with_file("out/log_part1.txt", "kept");

    let config = PartitionConfig::new(5, 10).output_dir("out");
    let partitioner = Partitioner::new(config).unwrap();
    let err = partitioner
        .run_dir(&mut store, Path::new("txt"), |_| true, true)
        .unwrap_err();

    assert!(matches!(err, PartitionError::OutputCollision(_)));
    assert_eq!(store.get(Path::new("out/log_part1.txt")), Some("kept"));
}

#[test]
fn test_bin_reusing_a_source_name_is_kept() {
    let mut store = MemoryStore::new()
        .with_file("txt/a.txt", "x")
        .with_file("txt/concatenated_1.txt", "y");

    let partitioner = Partitioner::new(PartitionConfig::new(10, 1)).unwrap();
    let inputs = paths(&store, "txt");
    partitioner.run(&mut store, &inputs, Path::new("txt")).unwrap();

    assert_eq!(store.file_count(), 1);
    assert_eq!(store.get(Path::new("txt/concatenated_1.txt")), Some("x\n\ny"));
}

#[test]
fn test_separate_output_directory() {
    let mut store = MemoryStore::new()
        .with_file("txt/long.txt", "one\n\ntwo\n\nthree")
        .with_file("txt/s1.txt", "s")
        .with_file("txt/s2.txt", "t");

    let config = PartitionConfig::new(8, 3).output_dir("out");
    let partitioner = Partitioner::new(config).unwrap();
    let plan = partitioner
        .run_dir(&mut store, Path::new("txt"), |_| true, false)
        .unwrap();

    assert_eq!(plan.outputs.len(), 3);
    assert!(store.exists(Path::new("out/long_part1.txt")));
    assert!(store.exists(Path::new("out/long_part2.txt")));
    assert!(store.exists(Path::new("out/concatenated_1.txt")));
    assert_eq!(store.get(Path::new("out/concatenated_1.txt")), Some("s\n\nt"));
    assert_eq!(paths(&store, "txt"), Vec::<PathBuf>::new());
}

#[test]
fn test_dry_run_plans_without_mutation() {
    let mut store = MemoryStore::new()
        .with_file("txt/a.txt", "aaa")
        .with_file("txt/b.txt", "bbb")
        .with_file("txt/skip.txt", "zzz");

    let partitioner = Partitioner::new(PartitionConfig::new(10, 1)).unwrap();
    let plan = partitioner
        .run_dir(
            &mut store,
            Path::new("txt"),
            |p| !p.ends_with("skip.txt"),
            true,
        )
        .unwrap();

    assert_eq!(plan.input_count, 2);
    assert_eq!(plan.outputs.len(), 1);
    assert_eq!(plan.outputs[0].content, "aaa\n\nbbb");
    assert!(store.journal().is_empty());
    assert_eq!(store.file_count(), 3);
}

#[test]
fn test_size_descending_order() {
    let store = MemoryStore::new()
        .with_file("txt/a.txt", "a")
        .with_file("txt/b.txt", "bbb")
        .with_file("txt/c.txt", "cc");

    let config = PartitionConfig::new(10, 3).order(SortOrder::SizeDescending);
    let partitioner = Partitioner::new(config).unwrap();
    let docs = partitioner.load(&store, &paths(&store, "txt")).unwrap();

    let sizes: Vec<usize> = docs.iter().map(|d| d.size).collect();
    assert_eq!(sizes, vec![3, 2, 1]);
}

#[test]
fn test_registered_detector_used_for_extension() {
    let mut store = MemoryStore::new().with_file("logs/app.log", "l1\nl2\nl3\nl4");

    let mut config = PartitionConfig::new(6, 4);
    config.collect.extension = "log".to_string();
    let mut partitioner = Partitioner::new(config).unwrap();
    partitioner.registry_mut().register("log", LineBoundary);

    let plan = partitioner
        .run_dir(&mut store, Path::new("logs"), |_| true, false)
        .unwrap();

    assert_eq!(plan.count("part"), 2);
    assert_eq!(store.get(Path::new("logs/app_part1.log")), Some("l1\n\nl2"));
}

#[test]
fn test_invalid_pattern_rejected_at_construction() {
    let config = PartitionConfig::new(10, 2).split_pattern("[");
    let err = Partitioner::new(config).err().unwrap();
    assert!(matches!(err, PartitionError::InvalidPattern(_)));
}

#[test]
fn test_oversized_line_output_is_reported() {
    let mut store = MemoryStore::new().with_file("txt/wide.txt", "x".repeat(30));

    let partitioner = Partitioner::new(PartitionConfig::new(10, 3)).unwrap();
    let inputs = paths(&store, "txt");
    let plan = partitioner.run(&mut store, &inputs, Path::new("txt")).unwrap();

    assert_eq!(plan.outputs.len(), 1);
    assert_eq!(plan.oversized_outputs(10), 1);
}
