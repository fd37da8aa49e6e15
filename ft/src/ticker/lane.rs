//! A single ticker lane
//!
//! An ordered, key-deduplicating registry of pending callbacks. Order is
//! carried by an append-only queue of slots; a superseded or cancelled key
//! leaves a tombstone (`None`) behind so the remaining entries keep their
//! relative order. The queue is reset wholesale at the end of every drain,
//! which is when tombstones disappear.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Callback invoked once with a frame timestamp in milliseconds.
pub type TickCallback = Box<dyn FnOnce(f64) + Send>;

/// Caller-supplied key used to deduplicate registrations within a lane.
///
/// Blanket-implemented; any hashable, equatable, cloneable key type works.
/// Keys of different types never collide because the key type is fixed per
/// ticker rather than coerced to a string.
pub trait TickKey: Eq + Hash + Clone + Debug + Send + 'static {}

impl<T: Eq + Hash + Clone + Debug + Send + 'static> TickKey for T {}

/// A live registration: the slot it currently occupies plus its callback.
struct Entry {
    slot: usize,
    callback: TickCallback,
}

/// One lane of pending work.
///
/// Invariant: a key is in `entries` if and only if it occupies exactly one
/// non-tombstone slot in `queue`.
pub(crate) struct Lane<K> {
    /// Append-only order of keys; `None` marks a superseded or cancelled slot.
    queue: Vec<Option<K>>,
    /// Live registrations by key, each holding its current slot index.
    entries: HashMap<K, Entry>,
}

impl<K: TickKey> Lane<K> {
    pub(crate) fn new() -> Self {
        Self {
            queue: Vec::new(),
            entries: HashMap::new(),
        }
    }

    /// Register `callback` under `key`, superseding any earlier registration.
    ///
    /// A superseded key moves to the back of the lane: its old slot becomes a
    /// tombstone and a fresh slot is appended, so ordering follows the *last*
    /// registration.
    pub(crate) fn add(&mut self, key: K, callback: TickCallback) {
        if let Some(prev) = self.entries.get(&key) {
            self.queue[prev.slot] = None;
        }
        let slot = self.queue.len();
        self.queue.push(Some(key.clone()));
        self.entries.insert(key, Entry { slot, callback });
    }

    /// Cancel a pending registration. Returns false for unknown keys.
    pub(crate) fn remove(&mut self, key: &K) -> bool {
        match self.entries.remove(key) {
            Some(entry) => {
                self.queue[entry.slot] = None;
                true
            }
            None => false,
        }
    }

    /// Number of live registrations.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Move every live registration, in queue order, into `out`, leaving the
    /// lane completely empty. Tombstones are skipped.
    pub(crate) fn drain_into(&mut self, out: &mut Vec<(K, TickCallback)>) {
        for slot in self.queue.drain(..) {
            let Some(key) = slot else { continue };
            if let Some(entry) = self.entries.remove(&key) {
                out.push((key, entry.callback));
            }
        }
        debug_assert!(self.entries.is_empty());
    }
}
