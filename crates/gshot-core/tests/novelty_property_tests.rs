//! Property tests for content addressing and the novelty filter

use gshot_core::hash::{hash_bytes, hash_reader};
use gshot_core::model::now_timestamp;
use gshot_core::{Commit, FileRecord, History, NoveltyPolicy};
use proptest::prelude::*;
use std::collections::HashSet;
use std::io::Cursor;

fn commit_of(history: &History, records: Vec<FileRecord>) -> Commit {
    Commit {
        id: history.next_id(),
        description: "prop".into(),
        records,
        branch: None,
        timestamp: now_timestamp(),
    }
}

fn files() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    prop::collection::vec(("[a-e]{1,2}\\.txt", prop::collection::vec(0u8..4, 0..6)), 1..12)
}

proptest! {
    #[test]
    fn identical_bytes_share_a_digest(content in prop::collection::vec(any::<u8>(), 0..2048)) {
        let copy = content.clone();
        prop_assert_eq!(hash_bytes(&content), hash_bytes(&copy));
        prop_assert_eq!(hash_reader(Cursor::new(&content)).unwrap(), hash_bytes(&copy));
    }

    #[test]
    fn committing_twice_is_a_noop(files in files(), per_path in any::<bool>()) {
        let policy = if per_path { NoveltyPolicy::PerPath } else { NoveltyPolicy::GlobalDigest };
        let candidates: Vec<FileRecord> = files
            .iter()
            .map(|(p, c)| FileRecord::new(p.clone(), hash_bytes(c)))
            .collect();

        let mut history = History::new();
        let novel = history.novel_records(&candidates, policy);
        prop_assert!(!novel.is_empty());
        let first = commit_of(&history, novel);
        history.push(first).unwrap();
        prop_assert_eq!(history.last_id(), 1);

        prop_assert!(history.novel_records(&candidates, policy).is_empty());
    }

    #[test]
    fn global_novel_digests_are_unseen(
        first in files(),
        second in files(),
    ) {
        let mut history = History::new();
        let initial: Vec<FileRecord> = first
            .iter()
            .map(|(p, c)| FileRecord::new(p.clone(), hash_bytes(c)))
            .collect();
        let novel = history.novel_records(&initial, NoveltyPolicy::GlobalDigest);
        let c1 = commit_of(&history, novel);
        history.push(c1).unwrap();

        let prior: HashSet<String> = history
            .commits()
            .iter()
            .flat_map(|c| c.records.iter().map(|r| r.digest.clone()))
            .collect();
        let candidates: Vec<FileRecord> = second
            .iter()
            .map(|(p, c)| FileRecord::new(p.clone(), hash_bytes(c)))
            .collect();

        for record in history.novel_records(&candidates, NoveltyPolicy::GlobalDigest) {
            prop_assert!(!prior.contains(&record.digest));
        }
    }
}
