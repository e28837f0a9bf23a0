//! Profile store — the durable, ordered list of saved profiles.
//!
//! Write-through: every mutation rewrites the whole serialized list into
//! the storage slot, and the in-memory list is only updated after the
//! write succeeds. Insertion order is preserved; an edit replaces its
//! entry in place.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast, watch};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::StorageError;
use crate::profile::model::{Profile, storage_keys};
use crate::store::traits::StorageSlot;

const EVENT_CAPACITY: usize = 64;

/// State-change events fanned out to subscribers.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// The list was (re)loaded from storage.
    Loaded { count: usize },
    /// A profile was appended or replaced in place.
    Saved { profile: Profile, replaced: bool },
    /// A profile was removed.
    Deleted { id: String },
}

/// Sets the loading flag for the duration of a mutation; the drop resets
/// it on success and failure alike.
struct LoadingGuard<'a>(&'a watch::Sender<bool>);

impl<'a> LoadingGuard<'a> {
    fn engage(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

/// Ordered collection of profiles backed by a single storage slot.
pub struct ProfileStore {
    slot: Arc<dyn StorageSlot>,
    profiles: RwLock<Vec<Profile>>,
    loading: watch::Sender<bool>,
    events: broadcast::Sender<StoreEvent>,
    config: StoreConfig,
}

impl ProfileStore {
    pub fn new(slot: Arc<dyn StorageSlot>, config: StoreConfig) -> Arc<Self> {
        let (loading, _) = watch::channel(false);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            slot,
            profiles: RwLock::new(Vec::new()),
            loading,
            events,
            config,
        })
    }

    /// Read the slot and replace the in-memory list. Returns the number of
    /// profiles loaded.
    ///
    /// Absent or unreadable data degrades to an empty list; loading never
    /// fails the caller.
    pub async fn load(&self) -> usize {
        let loaded = match self.slot.get(storage_keys::PROFILES).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Profile>>(&raw) {
                Ok(profiles) => profiles,
                Err(e) => {
                    warn!("Stored profile list is unreadable, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read profile storage, starting empty: {e}");
                Vec::new()
            }
        };

        let count = loaded.len();
        *self.profiles.write().await = loaded;
        info!(count, "Profiles loaded");
        let _ = self.events.send(StoreEvent::Loaded { count });
        count
    }

    /// Insert or replace `profile` by id and write the list through.
    ///
    /// A replace keeps the entry's position in the list; a new profile
    /// appends. On a failed write the in-memory list is left untouched.
    pub async fn upsert(&self, profile: Profile) -> Result<(), StorageError> {
        let _loading = LoadingGuard::engage(&self.loading);
        tokio::time::sleep(self.config.save_latency).await;

        let mut profiles = self.profiles.write().await;
        let mut next = profiles.clone();
        let replaced = match next.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => {
                *existing = profile.clone();
                true
            }
            None => {
                next.push(profile.clone());
                false
            }
        };

        let raw = serde_json::to_string(&next)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        if let Err(e) = self.slot.set(storage_keys::PROFILES, &raw).await {
            warn!(id = %profile.id, "Profile save failed, keeping previous state: {e}");
            return Err(e);
        }

        *profiles = next;
        info!(id = %profile.id, replaced, "Profile saved");
        let _ = self.events.send(StoreEvent::Saved { profile, replaced });
        Ok(())
    }

    /// Remove the profile with `id` and write the list through.
    ///
    /// An unknown id is a no-op, not an error; the slot is still rewritten.
    /// Returns whether an entry was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let _loading = LoadingGuard::engage(&self.loading);
        tokio::time::sleep(self.config.delete_latency).await;

        let mut profiles = self.profiles.write().await;
        let mut next = profiles.clone();
        let before = next.len();
        next.retain(|p| p.id != id);
        let removed = next.len() < before;

        let raw = serde_json::to_string(&next)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        if let Err(e) = self.slot.set(storage_keys::PROFILES, &raw).await {
            warn!(id, "Profile delete failed, keeping previous state: {e}");
            return Err(e);
        }

        *profiles = next;
        if removed {
            info!(id, "Profile deleted");
            let _ = self.events.send(StoreEvent::Deleted { id: id.to_string() });
        } else {
            debug!(id, "Delete matched no profile");
        }
        Ok(removed)
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Snapshot of the list in insertion order.
    pub async fn list(&self) -> Vec<Profile> {
        self.profiles.read().await.clone()
    }

    /// Look up a profile by id.
    pub async fn get(&self, id: &str) -> Option<Profile> {
        self.profiles.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }

    /// Whether a mutation is currently in flight.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Watch channel that tracks the loading flag.
    pub fn loading_watch(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Subscribe to store events.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::store::memory::MemorySlot;

    fn make_profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            full_name: format!("Person {id}"),
            email: format!("{id}@example.com"),
            age: "30".to_string(),
            city: "Lima".to_string(),
            state: "Lima".to_string(),
            country: "Peru".to_string(),
            avatar: None,
        }
    }

    fn make_store() -> (Arc<MemorySlot>, Arc<ProfileStore>) {
        let slot = Arc::new(MemorySlot::new());
        let store = ProfileStore::new(slot.clone(), StoreConfig::instant());
        (slot, store)
    }

    #[tokio::test]
    async fn load_with_empty_storage_starts_empty() {
        let (_slot, store) = make_store();
        assert_eq!(store.load().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn load_with_unreadable_storage_degrades_to_empty() {
        let (slot, store) = make_store();
        slot.set(storage_keys::PROFILES, "not json at all").await.unwrap();
        assert_eq!(store.load().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn upsert_appends_and_preserves_order() {
        let (_slot, store) = make_store();
        store.load().await;

        for id in ["a", "b", "c"] {
            store.upsert(make_profile(id)).await.unwrap();
        }

        let ids: Vec<String> = store.list().await.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let (_slot, store) = make_store();
        store.load().await;
        for id in ["a", "b", "c"] {
            store.upsert(make_profile(id)).await.unwrap();
        }

        let mut edited = make_profile("b");
        edited.city = "Cusco".to_string();
        store.upsert(edited).await.unwrap();

        let profiles = store.list().await;
        assert_eq!(profiles.len(), 3);
        assert_eq!(profiles[1].id, "b");
        assert_eq!(profiles[1].city, "Cusco");
    }

    #[tokio::test]
    async fn upsert_persists_through_reload() {
        let (slot, store) = make_store();
        store.load().await;
        store.upsert(make_profile("a")).await.unwrap();

        // A fresh store over the same slot sees the saved profile.
        let reopened = ProfileStore::new(slot, StoreConfig::instant());
        assert_eq!(reopened.load().await, 1);
        assert_eq!(reopened.get("a").await.unwrap().full_name, "Person a");
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let (_slot, store) = make_store();
        store.load().await;
        for id in ["a", "b"] {
            store.upsert(make_profile(id)).await.unwrap();
        }

        assert!(store.delete("a").await.unwrap());
        let profiles = store.list().await;
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "b");
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_a_noop() {
        let (_slot, store) = make_store();
        store.load().await;
        store.upsert(make_profile("a")).await.unwrap();

        assert!(!store.delete("ghost").await.unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn failed_write_keeps_memory_and_resets_loading() {
        let (slot, store) = make_store();
        store.load().await;
        store.upsert(make_profile("a")).await.unwrap();

        slot.fail_writes(true);
        assert!(store.upsert(make_profile("b")).await.is_err());
        assert!(store.delete("a").await.is_err());

        // Memory still matches the last successful write.
        let ids: Vec<String> = store.list().await.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["a"]);
        assert!(!store.is_loading());

        slot.fail_writes(false);
        store.upsert(make_profile("b")).await.unwrap();
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn loading_flag_is_set_while_a_save_runs() {
        let slot = Arc::new(MemorySlot::new());
        let config = StoreConfig {
            save_latency: Duration::from_millis(200),
            delete_latency: Duration::ZERO,
        };
        let store = ProfileStore::new(slot, config);
        assert!(!store.is_loading());

        let mut loading = store.loading_watch();
        let task = tokio::spawn({
            let store = store.clone();
            async move { store.upsert(make_profile("a")).await }
        });

        loading.changed().await.unwrap();
        assert!(*loading.borrow());

        task.await.unwrap().unwrap();
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn events_cover_save_and_delete() {
        let (_slot, store) = make_store();
        let mut events = store.subscribe();

        store.load().await;
        store.upsert(make_profile("a")).await.unwrap();
        store.upsert(make_profile("a")).await.unwrap();
        store.delete("a").await.unwrap();

        assert!(matches!(events.recv().await.unwrap(), StoreEvent::Loaded { count: 0 }));
        assert!(matches!(
            events.recv().await.unwrap(),
            StoreEvent::Saved { replaced: false, .. }
        ));
        assert!(matches!(
            events.recv().await.unwrap(),
            StoreEvent::Saved { replaced: true, .. }
        ));
        match events.recv().await.unwrap() {
            StoreEvent::Deleted { id } => assert_eq!(id, "a"),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
