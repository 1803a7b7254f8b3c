#[cfg(test)]
mod storage_tests {
    use crate::Storage;
    use chrono::{TimeZone, Utc};
    use storynest_core::{BillingPeriod, NewMemory};
    use tempfile::TempDir;

    fn create_test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let storage = Storage::new(&db_path).unwrap();
        (storage, temp_dir)
    }

    fn march_2025() -> chrono::DateTime<Utc> {
        BillingPeriod::containing(Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap()).start()
    }

    #[test]
    fn test_reserve_creates_row_on_first_call() {
        let (storage, _temp_dir) = create_test_storage();
        let decision = storage.reserve_call("user-1", march_2025(), 5).unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.calls, 1);

        let usage = storage.get_usage("user-1", march_2025()).unwrap().unwrap();
        assert_eq!(usage.calls, 1);
    }

    #[test]
    fn test_reserve_counts_n_calls() {
        let (storage, _temp_dir) = create_test_storage();
        for expected in 1..=4u32 {
            let decision = storage.reserve_call("user-1", march_2025(), 5).unwrap();
            assert!(decision.allowed);
            assert_eq!(decision.calls, expected);
        }
    }

    #[test]
    fn test_reserve_allows_at_quota_minus_one_then_denies() {
        let (storage, _temp_dir) = create_test_storage();
        for _ in 0..4 {
            assert!(storage.reserve_call("user-1", march_2025(), 5).unwrap().allowed);
        }
        // calls == 4 == quota-1: allowed, increments to quota
        let fifth = storage.reserve_call("user-1", march_2025(), 5).unwrap();
        assert!(fifth.allowed);
        assert_eq!(fifth.calls, 5);
        // at quota: denied, count untouched
        let sixth = storage.reserve_call("user-1", march_2025(), 5).unwrap();
        assert!(!sixth.allowed);
        assert_eq!(sixth.calls, 5);
        assert_eq!(storage.get_usage("user-1", march_2025()).unwrap().unwrap().calls, 5);
    }

    #[test]
    fn test_reserve_zero_quota_denies_without_row() {
        let (storage, _temp_dir) = create_test_storage();
        let decision = storage.reserve_call("user-1", march_2025(), 0).unwrap();
        assert!(!decision.allowed);
        assert_eq!(decision.calls, 0);
        assert!(storage.get_usage("user-1", march_2025()).unwrap().is_none());
    }

    #[test]
    fn test_release_undoes_reservation() {
        let (storage, _temp_dir) = create_test_storage();
        storage.reserve_call("user-1", march_2025(), 5).unwrap();
        storage.reserve_call("user-1", march_2025(), 5).unwrap();
        storage.release_call("user-1", march_2025()).unwrap();
        assert_eq!(storage.get_usage("user-1", march_2025()).unwrap().unwrap().calls, 1);
    }

    #[test]
    fn test_release_never_goes_negative() {
        let (storage, _temp_dir) = create_test_storage();
        storage.release_call("user-1", march_2025()).unwrap();
        storage.reserve_call("user-1", march_2025(), 5).unwrap();
        storage.release_call("user-1", march_2025()).unwrap();
        storage.release_call("user-1", march_2025()).unwrap();
        assert_eq!(storage.get_usage("user-1", march_2025()).unwrap().unwrap().calls, 0);
    }

    #[test]
    fn test_periods_are_independent() {
        let (storage, _temp_dir) = create_test_storage();
        let april = BillingPeriod::containing(Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap())
            .start();
        for _ in 0..5 {
            assert!(storage.reserve_call("user-1", march_2025(), 5).unwrap().allowed);
        }
        assert!(!storage.reserve_call("user-1", march_2025(), 5).unwrap().allowed);
        // new month, fresh allowance
        let decision = storage.reserve_call("user-1", april, 5).unwrap();
        assert!(decision.allowed);
        assert_eq!(decision.calls, 1);
    }

    #[test]
    fn test_users_are_independent() {
        let (storage, _temp_dir) = create_test_storage();
        for _ in 0..5 {
            storage.reserve_call("user-1", march_2025(), 5).unwrap();
        }
        assert!(!storage.reserve_call("user-1", march_2025(), 5).unwrap().allowed);
        assert!(storage.reserve_call("user-2", march_2025(), 5).unwrap().allowed);
    }

    #[test]
    fn test_token_roundtrip() {
        let (storage, _temp_dir) = create_test_storage();
        storage.grant_token("user-1", "tok-abc").unwrap();
        assert_eq!(storage.lookup_token("tok-abc").unwrap().as_deref(), Some("user-1"));
        assert!(storage.lookup_token("tok-missing").unwrap().is_none());
    }

    #[test]
    fn test_add_and_get_child() {
        let (storage, _temp_dir) = create_test_storage();
        let child = storage.add_child("user-1", "Mia").unwrap();
        let fetched = storage.get_child(child.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Mia");
        assert_eq!(fetched.user_id, "user-1");
        assert!(storage.get_child(9999).unwrap().is_none());
    }

    #[test]
    fn test_list_children_insertion_ordered() {
        let (storage, _temp_dir) = create_test_storage();
        storage.add_child("user-1", "Mia").unwrap();
        storage.add_child("user-1", "Noah").unwrap();
        storage.add_child("user-2", "Ada").unwrap();
        let children = storage.list_children("user-1").unwrap();
        let names: Vec<_> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Mia", "Noah"]);
    }

    #[test]
    fn test_memories_ordered_by_taken_at_nulls_last() {
        let (storage, _temp_dir) = create_test_storage();
        let child = storage.add_child("user-1", "Mia").unwrap();
        let dated = |y, m, d| Some(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap());

        let mem = |note: &str, taken_at| NewMemory {
            child_id: child.id,
            note: Some(note.to_owned()),
            image_path: None,
            taken_at,
        };
        storage.add_memory(&mem("undated-first", None)).unwrap();
        storage.add_memory(&mem("newer", dated(2025, 5, 20))).unwrap();
        storage.add_memory(&mem("older", dated(2025, 5, 1))).unwrap();
        storage.add_memory(&mem("undated-second", None)).unwrap();

        let memories = storage.list_memories(child.id).unwrap();
        let notes: Vec<_> = memories.iter().map(|m| m.note.as_deref().unwrap()).collect();
        assert_eq!(notes, ["older", "newer", "undated-first", "undated-second"]);
    }

    #[test]
    fn test_memory_fields_roundtrip() {
        let (storage, _temp_dir) = create_test_storage();
        let child = storage.add_child("user-1", "Mia").unwrap();
        let taken_at = Utc.with_ymd_and_hms(2025, 5, 1, 8, 30, 0).unwrap();
        let created = storage
            .add_memory(&NewMemory {
                child_id: child.id,
                note: Some("First steps".to_owned()),
                image_path: Some("photos/steps.jpg".to_owned()),
                taken_at: Some(taken_at),
            })
            .unwrap();

        let memories = storage.list_memories(child.id).unwrap();
        assert_eq!(memories.len(), 1);
        assert_eq!(memories[0].id, created.id);
        assert_eq!(memories[0].note.as_deref(), Some("First steps"));
        assert_eq!(memories[0].image_path.as_deref(), Some("photos/steps.jpg"));
        assert_eq!(memories[0].taken_at, Some(taken_at));
    }

    #[test]
    fn test_memories_scoped_to_child() {
        let (storage, _temp_dir) = create_test_storage();
        let mia = storage.add_child("user-1", "Mia").unwrap();
        let noah = storage.add_child("user-1", "Noah").unwrap();
        storage
            .add_memory(&NewMemory {
                child_id: mia.id,
                note: Some("Mia's day".to_owned()),
                image_path: None,
                taken_at: None,
            })
            .unwrap();
        assert_eq!(storage.list_memories(mia.id).unwrap().len(), 1);
        assert!(storage.list_memories(noah.id).unwrap().is_empty());
    }
}
