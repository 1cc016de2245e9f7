// Integration tests for commit log append and persistence
// Covers the novelty filter, id assignment, and no-op appends

use gshot_core::hash::hash_bytes;
use gshot_core::model::{Branch, FileRecord};
use gshot_core::{ExErrorKind, NoveltyPolicy};
use gshot_store::{AppendOutcome, CommitLog};
use std::fs;
use tempfile::TempDir;

fn setup_log() -> (TempDir, CommitLog) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let log = CommitLog::load(dir.path().join("commits").join("commits.json")).unwrap();
    (dir, log)
}

fn record(path: &str, content: &str) -> FileRecord {
    FileRecord::new(path, hash_bytes(content.as_bytes()))
}

#[test]
fn test_first_append_records_all_files_as_id_one() {
    // Given: An empty history and three distinct files
    let (_dir, mut log) = setup_log();
    let candidates = vec![record("a.txt", "a"), record("b.txt", "b"), record("c.txt", "c")];

    // When: They are appended
    let outcome = log
        .append("init", &candidates, None, NoveltyPolicy::GlobalDigest)
        .unwrap();

    // Then: One commit with id 1 holds all of them in order
    let commit = outcome.commit().expect("expected a commit");
    assert_eq!(commit.id, 1);
    assert_eq!(commit.records, candidates);
}

#[test]
fn test_repeat_append_is_no_op_without_writing() {
    // Given: A history with one commit
    let (_dir, mut log) = setup_log();
    let candidates = vec![record("a.txt", "hello"), record("b.txt", "world")];
    log.append("init", &candidates, None, NoveltyPolicy::GlobalDigest)
        .unwrap();
    let before = fs::read(log.path()).unwrap();

    // When: The same files are appended again
    let outcome = log
        .append("again", &candidates, None, NoveltyPolicy::GlobalDigest)
        .unwrap();

    // Then: Nothing changed, in memory or on disk
    assert_eq!(outcome, AppendOutcome::NoChanges);
    assert_eq!(log.commits().len(), 1);
    assert_eq!(fs::read(log.path()).unwrap(), before);
}

#[test]
fn test_mixed_change_records_only_changed_file() {
    // Given: A history where a.txt="hello" and b.txt="world"
    let (_dir, mut log) = setup_log();
    log.append(
        "init",
        &[record("a.txt", "hello"), record("b.txt", "world")],
        None,
        NoveltyPolicy::GlobalDigest,
    )
    .unwrap();

    // When: a.txt changes and b.txt does not
    let outcome = log
        .append(
            "update a",
            &[record("a.txt", "hello!"), record("b.txt", "world")],
            Some(Branch::head("master")),
            NoveltyPolicy::GlobalDigest,
        )
        .unwrap();

    // Then: Commit 2 holds only a.txt's new digest
    let commit = outcome.commit().unwrap();
    assert_eq!(commit.id, 2);
    assert_eq!(commit.records, vec![record("a.txt", "hello!")]);
    assert_eq!(commit.branch.as_ref().unwrap().name, "master");
}

#[test]
fn test_global_policy_skips_content_reused_at_new_path() {
    let (_dir, mut log) = setup_log();
    log.append("init", &[record("a.txt", "x")], None, NoveltyPolicy::GlobalDigest)
        .unwrap();

    let outcome = log
        .append("copy", &[record("copy.txt", "x")], None, NoveltyPolicy::GlobalDigest)
        .unwrap();

    assert_eq!(outcome, AppendOutcome::NoChanges);
}

#[test]
fn test_per_path_policy_records_reverted_content() {
    let (_dir, mut log) = setup_log();
    log.append("v1", &[record("a.txt", "one")], None, NoveltyPolicy::PerPath)
        .unwrap();
    log.append("v2", &[record("a.txt", "two")], None, NoveltyPolicy::PerPath)
        .unwrap();

    let outcome = log
        .append("revert", &[record("a.txt", "one")], None, NoveltyPolicy::PerPath)
        .unwrap();

    assert_eq!(outcome.commit().unwrap().id, 3);
    assert_eq!(log.history().last_digest_for("a.txt"), Some(hash_bytes(b"one").as_str()));
}

#[test]
fn test_reload_continues_ids_and_index() {
    // Given: A persisted history of two commits
    let (dir, mut log) = setup_log();
    log.append("one", &[record("a.txt", "1")], None, NoveltyPolicy::GlobalDigest)
        .unwrap();
    log.append("two", &[record("a.txt", "2")], None, NoveltyPolicy::GlobalDigest)
        .unwrap();

    // When: It is reloaded and appended to
    let mut reloaded = CommitLog::load(dir.path().join("commits").join("commits.json")).unwrap();
    let repeat = reloaded
        .append("repeat", &[record("a.txt", "1")], None, NoveltyPolicy::GlobalDigest)
        .unwrap();
    let next = reloaded
        .append("three", &[record("a.txt", "3")], None, NoveltyPolicy::GlobalDigest)
        .unwrap();

    // Then: The index survived the reload and ids continue
    assert_eq!(repeat, AppendOutcome::NoChanges);
    assert_eq!(next.commit().unwrap().id, 3);
}

#[test]
fn test_wire_format_uses_file_hash_and_hash() {
    let (_dir, mut log) = setup_log();
    log.append("init", &[record("a.txt", "a")], None, NoveltyPolicy::GlobalDigest)
        .unwrap();

    let json: serde_json::Value = serde_json::from_slice(&fs::read(log.path()).unwrap()).unwrap();

    assert_eq!(json[0]["id"], 1);
    assert_eq!(json[0]["description"], "init");
    assert_eq!(json[0]["file_hash"][0]["path"], "a.txt");
    assert_eq!(json[0]["file_hash"][0]["hash"], hash_bytes(b"a"));
    assert!(json[0]["timestamp"].is_string());
}

#[test]
fn test_out_of_order_ids_fail_fast() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("commits.json");
    fs::write(
        &path,
        r#"[
            {"id": 2, "description": "b", "file_hash": [], "timestamp": "2024-01-01T00:00:00Z"},
            {"id": 1, "description": "a", "file_hash": [], "timestamp": "2024-01-01T00:00:00Z"}
        ]"#,
    )
    .unwrap();

    let err = CommitLog::load(&path).err().unwrap();

    assert_eq!(err.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_find_unknown_id_is_not_found() {
    let (_dir, log) = setup_log();
    let err = log.find(7).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.commit_id(), Some(7));
}
