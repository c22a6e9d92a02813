//! Secondary index: latest status per (model, instance).
//!
//! Logical schema: `(model, instance) -> (status, timestamp)`, one row per
//! pair. The index exists so existence/status queries and model-scoped
//! enumeration never scan history.
//!
//! ## Monotonic timestamp invariant
//!
//! In history mode an incoming write with an older timestamp still lands in
//! the full history table (written by the caller), but must not regress
//! this index: [`InstanceStatusIndex::update_monotonic`] refuses stale
//! timestamps. Point-in-time stores use the unconditional
//! [`InstanceStatusIndex::update`].

use parking_lot::RwLock;
use propstore_core::{InstanceStatus, KeyId, Timestamp};
use std::collections::BTreeMap;

/// Latest lifecycle status per (model, instance).
#[derive(Debug, Default)]
pub struct InstanceStatusIndex {
    rows: RwLock<BTreeMap<(KeyId, KeyId), (InstanceStatus, Timestamp)>>,
}

impl InstanceStatusIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Unconditional upsert (point-in-time mode).
    pub fn update(&self, model: KeyId, instance: KeyId, status: InstanceStatus, ts: Timestamp) {
        self.rows.write().insert((model, instance), (status, ts));
    }

    /// Upsert only if `ts` is not older than the stored timestamp (history
    /// mode). Returns whether the index changed.
    pub fn update_monotonic(
        &self,
        model: KeyId,
        instance: KeyId,
        status: InstanceStatus,
        ts: Timestamp,
    ) -> bool {
        let mut rows = self.rows.write();
        let slot = (model, instance);
        match rows.get(&slot) {
            Some((_, stored)) if ts < *stored => false,
            _ => {
                rows.insert(slot, (status, ts));
                true
            }
        }
    }

    /// Latest status and timestamp for one instance.
    pub fn value(&self, model: &KeyId, instance: &KeyId) -> Option<(InstanceStatus, Timestamp)> {
        self.rows
            .read()
            .get(&(model.clone(), instance.clone()))
            .copied()
    }

    /// Scan all instances of a model, collecting non-nil predicate results.
    ///
    /// O(rows for that model): the scan ranges over the model prefix of the
    /// ordered index, no further filtering below this layer.
    pub fn all<T>(
        &self,
        model: &KeyId,
        predicate: impl Fn(&KeyId, InstanceStatus) -> Option<T>,
    ) -> Vec<T> {
        let rows = self.rows.read();
        rows.range((model.clone(), KeyId::MIN)..)
            .take_while(|((m, _), _)| m == model)
            .filter_map(|((_, instance), (status, _))| predicate(instance, *status))
            .collect()
    }

    /// Row count (diagnostic).
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the index holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(micros: u64) -> Timestamp {
        Timestamp::from_micros(micros)
    }

    fn id(i: i64) -> KeyId {
        KeyId::Int(i)
    }

    #[test]
    fn test_update_and_value() {
        let index = InstanceStatusIndex::new();
        index.update(id(1), id(7), InstanceStatus::Active, ts(10));
        assert_eq!(
            index.value(&id(1), &id(7)),
            Some((InstanceStatus::Active, ts(10)))
        );
        assert_eq!(index.value(&id(1), &id(8)), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_unconditional_update_accepts_older_timestamp() {
        let index = InstanceStatusIndex::new();
        index.update(id(1), id(7), InstanceStatus::Active, ts(20));
        index.update(id(1), id(7), InstanceStatus::Retired, ts(10));
        assert_eq!(
            index.value(&id(1), &id(7)),
            Some((InstanceStatus::Retired, ts(10)))
        );
    }

    #[test]
    fn test_monotonic_update_refuses_regression() {
        let index = InstanceStatusIndex::new();
        assert!(index.update_monotonic(id(1), id(7), InstanceStatus::Active, ts(20)));
        assert!(!index.update_monotonic(id(1), id(7), InstanceStatus::Retired, ts(10)));
        assert_eq!(
            index.value(&id(1), &id(7)),
            Some((InstanceStatus::Active, ts(20)))
        );

        // Equal timestamp is accepted (idempotent re-write)
        assert!(index.update_monotonic(id(1), id(7), InstanceStatus::Suspended, ts(20)));
        assert_eq!(
            index.value(&id(1), &id(7)),
            Some((InstanceStatus::Suspended, ts(20)))
        );
    }

    #[test]
    fn test_all_scans_one_model_only() {
        let index = InstanceStatusIndex::new();
        index.update(id(1), id(1), InstanceStatus::Active, ts(1));
        index.update(id(1), id(2), InstanceStatus::Retired, ts(2));
        index.update(id(1), id(3), InstanceStatus::Active, ts(3));
        index.update(id(2), id(4), InstanceStatus::Active, ts(4));

        let live: Vec<KeyId> = index.all(&id(1), |instance, status| {
            status.is_live().then(|| instance.clone())
        });
        assert_eq!(live, vec![id(1), id(3)]);

        let everyone: Vec<KeyId> = index.all(&id(2), |instance, _| Some(instance.clone()));
        assert_eq!(everyone, vec![id(4)]);
    }

    #[test]
    fn test_all_with_text_model_ids() {
        let index = InstanceStatusIndex::new();
        index.update(KeyId::from("vm"), id(1), InstanceStatus::Active, ts(1));
        index.update(KeyId::from("vm"), id(2), InstanceStatus::Suspended, ts(2));
        index.update(KeyId::from("volume"), id(3), InstanceStatus::Active, ts(3));

        let vms: Vec<KeyId> =
            index.all(&KeyId::from("vm"), |instance, _| Some(instance.clone()));
        assert_eq!(vms.len(), 2);
    }
}
