use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;
use wicket_core::account::Role;

/// Per-handle session entry: one identity slot per role class, plus expiry.
///
/// The slots are independent. Binding a member identity does not disturb an
/// admin identity already bound to the same handle, and vice versa; `clear`
/// drops both.
#[derive(Debug)]
struct SessionEntry {
    slots: HashMap<Role, String>,
    expires_at: DateTime<Utc>,
}

impl SessionEntry {
    fn is_valid(&self) -> bool {
        self.expires_at > Utc::now()
    }
}

/// Maps opaque session handles to authenticated identities.
///
/// Handles are issued at sign-in and presented as bearer tokens. Entries
/// expire after the configured lifetime; expired entries behave as absent
/// and are swept periodically by the cleanup task spawned at startup.
#[derive(Debug)]
pub struct SessionStore {
    entries: Mutex<HashMap<String, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Issue a fresh opaque session handle.
    pub fn issue_handle(&self) -> String {
        Uuid::new_v4().to_string()
    }

    /// Associate `identifier` with `handle` under the given role-class slot,
    /// overwriting any prior identity in that slot and refreshing expiry.
    pub async fn bind(&self, handle: &str, identifier: &str, role: Role) {
        let mut entries = self.entries.lock().await;
        let expires_at = Utc::now() + self.ttl;
        let entry = entries
            .entry(handle.to_string())
            .or_insert_with(|| SessionEntry {
                slots: HashMap::new(),
                expires_at,
            });
        entry.slots.insert(role, identifier.to_string());
        entry.expires_at = expires_at;
    }

    /// Resolve the identity bound under the role-class slot, if any.
    pub async fn lookup(&self, handle: &str, role: Role) -> Option<String> {
        let entries = self.entries.lock().await;
        entries
            .get(handle)
            .filter(|entry| entry.is_valid())
            .and_then(|entry| entry.slots.get(&role).cloned())
    }

    /// Remove all role-class bindings for the handle.
    pub async fn clear(&self, handle: &str) {
        let mut entries = self.entries.lock().await;
        entries.remove(handle);
    }

    /// Drop expired entries. Driven by the periodic cleanup task.
    pub async fn purge_expired(&self) {
        let mut entries = self.entries.lock().await;
        let initial_count = entries.len();
        entries.retain(|_, entry| entry.is_valid());
        let removed_count = initial_count - entries.len();

        if removed_count > 0 {
            info!("cleaned up {removed_count} expired sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Duration::hours(1))
    }

    #[tokio::test]
    async fn bind_then_lookup_returns_the_identity() {
        let store = store();
        let handle = store.issue_handle();

        store.bind(&handle, "alice", Role::Member).await;
        assert_eq!(
            store.lookup(&handle, Role::Member).await.as_deref(),
            Some("alice")
        );
    }

    #[tokio::test]
    async fn role_class_slots_are_independent() {
        let store = store();
        let handle = store.issue_handle();

        store.bind(&handle, "alice", Role::Member).await;
        store.bind(&handle, "root_admin", Role::Admin).await;

        assert_eq!(
            store.lookup(&handle, Role::Member).await.as_deref(),
            Some("alice")
        );
        assert_eq!(
            store.lookup(&handle, Role::Admin).await.as_deref(),
            Some("root_admin")
        );
    }

    #[tokio::test]
    async fn bind_overwrites_the_existing_slot() {
        let store = store();
        let handle = store.issue_handle();

        store.bind(&handle, "alice", Role::Member).await;
        store.bind(&handle, "bob", Role::Member).await;

        assert_eq!(
            store.lookup(&handle, Role::Member).await.as_deref(),
            Some("bob")
        );
    }

    #[tokio::test]
    async fn clear_removes_all_slots() {
        let store = store();
        let handle = store.issue_handle();

        store.bind(&handle, "alice", Role::Member).await;
        store.bind(&handle, "root_admin", Role::Admin).await;
        store.clear(&handle).await;

        assert!(store.lookup(&handle, Role::Member).await.is_none());
        assert!(store.lookup(&handle, Role::Admin).await.is_none());
    }

    #[tokio::test]
    async fn lookup_of_unknown_handle_returns_none() {
        let store = store();
        assert!(store.lookup("no-such-handle", Role::Member).await.is_none());
    }

    #[tokio::test]
    async fn expired_entries_behave_as_absent_and_are_purged() {
        let store = SessionStore::new(Duration::zero());
        let handle = store.issue_handle();

        store.bind(&handle, "alice", Role::Member).await;
        assert!(store.lookup(&handle, Role::Member).await.is_none());

        store.purge_expired().await;
        assert!(store.entries.lock().await.is_empty());
    }
}
