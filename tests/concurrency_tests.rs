//! Concurrency and thread safety tests for the shared store

use std::sync::{Arc, Barrier};
use std::thread;

use propmatch::{parse_properties, NotationExt, PatternStore, SharedStore};

fn tenant_pattern(tenant: usize) -> String {
    format!("tenant:t{tenant}, tier:gold")
}

#[test]
fn concurrent_writers_all_land() {
    let shared: SharedStore<usize> = SharedStore::default();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    let tenant = t * 25 + i;
                    shared.add(parse_properties(&tenant_pattern(tenant)), tenant);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    assert_eq!(shared.pattern_count(), 200);
    for tenant in 0..200 {
        assert_eq!(
            shared.find(&parse_properties(&tenant_pattern(tenant))),
            Some(tenant)
        );
    }
}

#[test]
fn readers_interleaved_with_writer() {
    let mut seed: PatternStore<String> = PatternStore::new();
    seed.add_str("tier:gold", "gold".to_string());
    let shared = SharedStore::from(seed);
    let barrier = Arc::new(Barrier::new(5));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..200).all(|_| {
                    // The fallback pattern is never removed, so every read hits.
                    shared
                        .find(&parse_properties("tier:gold, region:eu"))
                        .is_some()
                })
            })
        })
        .collect();

    barrier.wait();
    for i in 0..100 {
        let pattern = parse_properties(&format!("tier:gold, region:r{i}"));
        shared.add(pattern.clone(), format!("r{i}"));
        if i % 2 == 0 {
            shared.remove(&pattern);
        }
    }

    for reader in readers {
        assert!(reader.join().expect("reader thread panicked"));
    }
    assert_eq!(shared.pattern_count(), 51);
}

#[test]
fn batch_write_is_atomic_to_readers() {
    let shared: SharedStore<String> = SharedStore::default();

    shared.write(|store| {
        store
            .add_str("a:1", "A".to_string())
            .add_str("a:1, b:2", "B".to_string());
    });

    let listed = shared.read(|store| store.list_str("a:1, b:*", false));
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].data, "B");
    assert_eq!(shared.list(None, false).len(), 2);
}

#[test]
fn results_identical_across_threads() {
    let shared: SharedStore<String> = SharedStore::default();
    shared.write(|store| {
        store
            .add_str("a:1, b:2", "X".to_string())
            .add_str("c:3", "Y".to_string());
    });

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || shared.find(&parse_properties("a:1, b:0, c:3")))
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().expect("reader thread panicked"),
            Some("Y".to_string())
        );
    }
}
