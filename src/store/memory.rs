use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Account;
use crate::store::CredentialStore;

/// In-memory account store keyed by id, with an email index for the
/// primary lookup path.
#[derive(Default)]
pub struct MemoryStore {
    accounts: DashMap<Uuid, Account>,
    email_index: DashMap<String, Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let id = self.email_index.get(email).map(|entry| *entry.value());
        match id {
            Some(id) => Ok(self.accounts.get(&id).map(|entry| entry.value().clone())),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.accounts.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, account: Account) -> Result<Account> {
        // Drop a stale email index entry if the address changed.
        if let Some(previous) = self.accounts.get(&account.id).map(|e| e.value().email.clone()) {
            if previous != account.email {
                self.email_index.remove(&previous);
            }
        }
        self.email_index.insert(account.email.clone(), account.id);
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        if let Some((_, account)) = self.accounts.remove(&id) {
            self.email_index.remove(&account.email);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn account(email: &str) -> Account {
        Account::new(email, "hash", "Ada", "Lovelace", Role::new("ROLE_MEMBER"))
    }

    #[tokio::test]
    async fn save_and_find_by_email() {
        let store = MemoryStore::new();
        let saved = store.save(account("a@x.com")).await.unwrap();

        let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, saved.id);
        assert!(store.find_by_email("b@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_email_index() {
        let store = MemoryStore::new();
        let saved = store.save(account("a@x.com")).await.unwrap();

        store.delete(saved.id).await.unwrap();
        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());
        assert!(store.find_by_id(saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn changing_email_reindexes() {
        let store = MemoryStore::new();
        let mut saved = store.save(account("a@x.com")).await.unwrap();

        saved.email = "new@x.com".to_string();
        store.save(saved.clone()).await.unwrap();

        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());
        let found = store.find_by_email("new@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, saved.id);
    }
}
