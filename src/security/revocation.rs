/// In-memory revocation registry for explicitly logged-out tokens
///
/// Entries live only until the token would have expired on its own; an
/// expired token is simply invalid and no longer needs to be remembered.
/// The registry is process-local and non-persistent: after a restart,
/// revoked-but-unexpired tokens become valid again. Known limitation of
/// the single-process design.
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::task::JoinHandle;

#[derive(Default)]
pub struct RevocationRegistry {
    entries: DashMap<String, DateTime<Utc>>,
}

impl RevocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a token as revoked until `expires_at`. Overwrites any prior
    /// entry; visible to other tasks as soon as this returns.
    pub fn revoke(&self, token: &str, expires_at: DateTime<Utc>) {
        self.entries.insert(token.to_string(), expires_at);
    }

    /// True only while the token is present and its recorded expiry has not
    /// passed. An expired entry is removed on the way out (lazy expiry).
    pub fn is_revoked(&self, token: &str) -> bool {
        // Copy the expiry out before touching the map again; holding a
        // shard guard across `remove` would deadlock.
        let expiry = self.entries.get(token).map(|entry| *entry.value());
        match expiry {
            None => false,
            Some(expires_at) if Utc::now() > expires_at => {
                self.entries.remove(token);
                false
            }
            Some(_) => true,
        }
    }

    /// Drop every expired entry. Returns the number removed.
    ///
    /// Removals are counted inside the retain pass; comparing map sizes
    /// before and after would race with concurrent revokes.
    pub fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut removed = 0usize;
        self.entries.retain(|_, expires_at| {
            let keep = *expires_at > now;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Run `sweep` on a fixed period, independent of lookups, so tokens that
/// are revoked and never re-checked still get reclaimed.
pub fn spawn_sweeper(registry: Arc<RevocationRegistry>, period: StdDuration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await; // first tick fires immediately
        loop {
            ticker.tick().await;
            let removed = registry.sweep();
            if removed > 0 {
                tracing::debug!(removed, "Revocation sweep reclaimed expired entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn revoke_is_immediately_visible() {
        let registry = RevocationRegistry::new();
        registry.revoke("token-a", Utc::now() + Duration::hours(1));
        assert!(registry.is_revoked("token-a"));
        assert!(!registry.is_revoked("token-b"));
    }

    #[test]
    fn expired_entry_reports_not_revoked_and_is_reclaimed() {
        let registry = RevocationRegistry::new();
        registry.revoke("token-a", Utc::now() - Duration::seconds(1));

        assert!(!registry.is_revoked("token-a"));
        assert!(registry.is_empty(), "lazy expiry should remove the entry");
    }

    #[test]
    fn revoking_again_overwrites_expiry() {
        let registry = RevocationRegistry::new();
        registry.revoke("token-a", Utc::now() - Duration::seconds(1));
        registry.revoke("token-a", Utc::now() + Duration::hours(1));
        assert!(registry.is_revoked("token-a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn sweep_removes_only_expired_entries() {
        let registry = RevocationRegistry::new();
        registry.revoke("dead", Utc::now() - Duration::seconds(1));
        registry.revoke("alive", Utc::now() + Duration::hours(1));

        let removed = registry.sweep();
        assert_eq!(removed, 1);
        assert!(registry.is_revoked("alive"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn sweep_racing_with_revokes_counts_sanely() {
        let registry = Arc::new(RevocationRegistry::new());
        let writer = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for i in 0..2_000 {
                    registry.revoke(&format!("fresh-{i}"), Utc::now() + Duration::hours(1));
                }
            })
        };

        // Keep seeding expired entries and sweeping while the writer
        // inserts live ones; each sweep reclaims at most what expired.
        for i in 0..200 {
            registry.revoke(&format!("stale-{i}"), Utc::now() - Duration::seconds(1));
            let removed = registry.sweep();
            assert!(removed <= i + 1);
        }
        writer.join().unwrap();

        registry.sweep();
        assert_eq!(registry.len(), 2_000);
    }

    #[tokio::test]
    async fn concurrent_revokes_and_lookups() {
        let registry = Arc::new(RevocationRegistry::new());
        let mut handles = Vec::new();

        for i in 0..16 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                let token = format!("token-{i}");
                registry.revoke(&token, Utc::now() + Duration::hours(1));
                assert!(registry.is_revoked(&token));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.len(), 16);
        assert_eq!(registry.sweep(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn background_sweeper_reclaims_entries() {
        let registry = Arc::new(RevocationRegistry::new());
        registry.revoke("dead", Utc::now() - Duration::seconds(1));

        let handle = spawn_sweeper(Arc::clone(&registry), StdDuration::from_secs(60));
        // Let the sweeper run at least one full period.
        tokio::time::sleep(StdDuration::from_secs(61)).await;

        assert!(registry.is_empty());
        handle.abort();
    }
}
