// Copyright 2025-2026 Neil Henderson

use super::super::string_pool::StringPool;

#[test]
fn ids_follow_first_use_order() {
    let pool = StringPool::new();
    assert!(pool.is_empty());

    assert_eq!(pool.intern("сайн"), 0);
    assert_eq!(pool.intern("байна"), 1);
    assert_eq!(pool.intern("уу"), 2);

    assert_eq!(pool.len(), 3);
    assert_eq!(
        pool.entries(),
        vec![(0, "сайн".to_string()), (1, "байна".to_string()), (2, "уу".to_string())]
    );
}

#[test]
fn duplicate_text_shares_an_id() {
    let pool = StringPool::new();

    let first = pool.intern("hello\n");
    assert_eq!(pool.intern("other"), 1);
    assert_eq!(pool.intern("hello\n"), first);

    assert_eq!(pool.len(), 2);
    assert_eq!(pool.lookup("other"), Some(1));
    assert_eq!(pool.lookup("missing"), None);
}

#[test]
fn interning_from_several_threads() {
    let pool = StringPool::new();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for n in 0..50 {
                    pool.intern(&format!("s{n}"));
                }
            });
        }
    });

    assert_eq!(pool.len(), 50);
    let entries = pool.entries();
    assert!(entries.iter().enumerate().all(|(index, (id, _))| index == *id));
}
