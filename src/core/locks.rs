use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

// KeyedLocks serializes critical sections per key without any global lock.
// Hold creation and booking finalization acquire the lock for their
// (master_id, date) key; requests for different masters or dates proceed in
// parallel. Waiters on one key are granted in FIFO order by the tokio mutex.
pub(crate) struct KeyedLocks<K> {
    entries: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash + Clone + Send> KeyedLocks<K> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    // The map lock is held only to fetch or insert the per-key cell; the
    // caller then awaits the cell itself, so a slow ledger read under one key
    // never blocks lookups for other keys.
    pub async fn acquire(&self, key: &K) -> OwnedMutexGuard<()> {
        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(key.clone()).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
        };
        cell.lock_owned().await
    }

    // drops cells nobody is holding or waiting on; called by the expiry sweep
    pub async fn prune(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, cell| Arc::strong_count(cell) > 1);
        before - entries.len()
    }
}
