//! Property tests: store and in-memory value stay in sync.

use persisted_cell::storage::{KeyValueStore, MemoryStore};
use persisted_cell::{CellError, PersistedCell};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(i64),
    Add(i64),
    Enqueue(i64),
    Flush,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-1000i64..1000).prop_map(Op::Set),
        (-1000i64..1000).prop_map(Op::Add),
        (-1000i64..1000).prop_map(Op::Enqueue),
        Just(Op::Flush),
    ]
}

fn stored_value(store: &MemoryStore, key: &str) -> Option<i64> {
    store
        .get_item(key)
        .unwrap()
        .map(|text| serde_json::from_str(&text).unwrap())
}

proptest! {
    #[test]
    fn store_matches_value_after_every_op(ops in proptest::collection::vec(arb_op(), 1..50)) {
        let store = MemoryStore::new();
        let mut cell = PersistedCell::new("n", 0i64, store.clone()).unwrap();
        let mut expected = 0i64;
        let mut queued = Vec::new();
        // The default isn't stored until the first commit
        let mut written = false;

        for op in ops {
            match op {
                Op::Set(v) => {
                    cell.set(v).unwrap();
                    expected = v;
                    written = true;
                }
                Op::Add(d) => {
                    cell.update(move |x| x + d).unwrap();
                    expected += d;
                    written = true;
                }
                Op::Enqueue(d) => {
                    cell.enqueue(move |x| x + d);
                    queued.push(d);
                    continue;
                }
                Op::Flush => {
                    cell.flush().unwrap();
                    written |= !queued.is_empty();
                    expected += queued.drain(..).sum::<i64>();
                }
            }
            prop_assert_eq!(*cell.value(), expected);
            let in_store = if written { Some(expected) } else { None };
            prop_assert_eq!(stored_value(&store, "n"), in_store);
        }

        cell.flush().unwrap();
        written |= !queued.is_empty();
        expected += queued.drain(..).sum::<i64>();
        prop_assert_eq!(*cell.value(), expected);
        prop_assert_eq!(cell.pending(), 0);
        let in_store = if written { Some(expected) } else { None };
        prop_assert_eq!(stored_value(&store, "n"), in_store);
    }

    #[test]
    fn reload_sees_last_committed_value(values in proptest::collection::vec(any::<i64>(), 1..20)) {
        let store = MemoryStore::new();
        {
            let mut cell = PersistedCell::new("n", 0i64, store.clone()).unwrap();
            for v in &values {
                cell.set(*v).unwrap();
            }
        }
        let cell = PersistedCell::new("n", 0i64, store).unwrap();
        prop_assert_eq!(*cell.value(), *values.last().unwrap());
    }

    #[test]
    fn string_values_round_trip(text in ".*") {
        let store = MemoryStore::new();
        let mut cell = PersistedCell::new("s", String::new(), store.clone()).unwrap();
        cell.set(text.clone()).unwrap();

        let reloaded = PersistedCell::new("s", String::from("default"), store).unwrap();
        prop_assert_eq!(reloaded.value(), &text);
    }

    #[test]
    fn quota_failures_never_desync(values in proptest::collection::vec(any::<u32>(), 1..30)) {
        // "q" plus up to 5 digits fits; larger numbers are rejected
        let store = MemoryStore::with_quota(6);
        let mut cell = PersistedCell::new("q", 0u32, store.clone()).unwrap();

        for v in values {
            let before = *cell.value();
            match cell.set(v) {
                Ok(()) => prop_assert_eq!(*cell.value(), v),
                Err(CellError::StoreWrite { .. }) => prop_assert_eq!(*cell.value(), before),
                Err(other) => prop_assert!(false, "unexpected error: {}", other),
            }
            if let Some(text) = store.get_item("q").unwrap() {
                prop_assert_eq!(text.parse::<u32>().unwrap(), *cell.value());
            }
        }
    }
}
