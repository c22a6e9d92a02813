//! Black-box tests against the public `propstore` surface
//!
//! Each test mirrors a documented property of the store, driven only
//! through the root re-exports the way an embedding application would.

use propstore::{
    CacheConfig, CachingHistoryStore, CachingPropertyStore, HistoryPropertyStore, InstanceStatus,
    JsonCodec, KeyId, KeyPath, LruCache, PropertyStore, StorageKind, Timestamp,
};

#[test]
fn round_trip_per_kind() {
    let store = PropertyStore::new(JsonCodec);
    store.set(9000i64, KeyPath::new(1, 1, "mem_mb"));
    store.set(0.75f64, KeyPath::new(1, 1, "load"));
    store.set("vm-a".to_string(), KeyPath::new(1, 1, "name"));
    store.set(vec![0xde, 0xad], KeyPath::new(1, 1, "uuid"));

    assert_eq!(store.get::<i64>(&KeyPath::new(1, 1, "mem_mb")), Some(9000));
    assert_eq!(store.get::<f64>(&KeyPath::new(1, 1, "load")), Some(0.75));
    assert_eq!(
        store.get::<String>(&KeyPath::new(1, 1, "name")),
        Some("vm-a".to_string())
    );
    assert_eq!(
        store.get::<Vec<u8>>(&KeyPath::new(1, 1, "uuid")),
        Some(vec![0xde, 0xad])
    );
}

#[test]
fn unset_vs_explicit_nil() {
    let store = PropertyStore::new(JsonCodec);
    let k = KeyPath::new(1, 1, "label");
    store.set(None::<String>, k.clone());

    assert_eq!(store.get::<Option<String>>(&k), Some(None));
    assert_eq!(store.get::<Option<String>>(&KeyPath::new(1, 1, "other")), None);
}

#[test]
fn history_idempotence_scenario() {
    // Integer property at (1,1,1): 123 at t0, then 124 at t0 -> one row of
    // 124; 123 again at t0+1s -> two rows total.
    let store = HistoryPropertyStore::new(JsonCodec);
    let k = KeyPath::new(1, 1, 1);
    let t0 = Timestamp::from_secs(1_700_000_000);
    let t1 = t0.saturating_add(std::time::Duration::from_secs(1));

    store.set_at(123i64, k.clone(), t0);
    store.set_at(124i64, k.clone(), t0);
    assert_eq!(store.versions(StorageKind::Int, &k), 1);
    assert_eq!(store.get_at::<i64>(&k, Some(t0)), Some((124, t0)));

    store.set_at(123i64, k.clone(), t1);
    assert_eq!(store.versions(StorageKind::Int, &k), 2);
    assert_eq!(store.get::<i64>(&k), Some(123));
}

#[test]
fn eviction_scenario() {
    // capacity=1000, fraction=0.5: 1000 keys -> count 1000; one more -> 501
    let cache: LruCache<u32, u32> = LruCache::new(1000, 0.5);
    for i in 0..1000 {
        cache.set(i, i);
    }
    assert_eq!(cache.len(), 1000);
    cache.set(1000, 1000);
    assert_eq!(cache.len(), 501);
    // The newest key survives the pass
    assert_eq!(cache.get(&1000), Some(1000));
}

#[test]
fn cache_coherence_and_clearing() {
    let store = CachingPropertyStore::new(
        PropertyStore::new(JsonCodec),
        &CacheConfig::default(),
    );
    let k = KeyPath::new(1, 1, "state");
    store.set("warm".to_string(), k.clone());

    store.store().set("cold".to_string(), k.clone());
    assert_eq!(store.get::<String>(&k).as_deref(), Some("warm"));

    store.remove_all();
    assert_eq!(store.get::<String>(&k).as_deref(), Some("cold"));
}

#[test]
fn existence_and_enumeration() {
    let store = CachingHistoryStore::new(
        HistoryPropertyStore::new(JsonCodec),
        &CacheConfig::default(),
    );
    store.set_at(
        InstanceStatus::Active,
        KeyPath::existence("vm", 1),
        Timestamp::from_micros(10),
    );
    store.set_at(
        InstanceStatus::Retired,
        KeyPath::existence("vm", 2),
        Timestamp::from_micros(20),
    );

    let live: Vec<KeyId> = store.store().instances(&KeyId::from("vm"), |instance, status| {
        status.is_live().then(|| instance.clone())
    });
    assert_eq!(live, vec![KeyId::Int(1)]);

    assert_eq!(
        store.store().status(&KeyId::from("vm"), &KeyId::Int(2)),
        Some((InstanceStatus::Retired, Timestamp::from_micros(20)))
    );
}
