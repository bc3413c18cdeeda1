/// Credential store collaborator contract and the in-process implementation
mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::Account;

/// Persistence boundary for account records. The service only depends on
/// this contract; the backing store is swappable.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    /// Inserts or overwrites the record for `account.id`.
    async fn save(&self, account: Account) -> Result<Account>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}
