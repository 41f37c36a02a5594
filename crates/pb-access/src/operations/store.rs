//! User Store
//!
//! Seam to the external user store. Only the role column is ever written.

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

use crate::role::entity::BackendRole;
use crate::user::User;

/// Failure of the persistence collaborator.
///
/// `Unavailable` and `Timeout` are transient. `Rejected` means the store
/// refused this particular write and repeating it will not help.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("User store unavailable: {message}")]
    Unavailable { message: String },

    #[error("User store timed out after {elapsed_ms} ms")]
    Timeout { elapsed_ms: u64 },

    #[error("User store rejected the write: {message}")]
    Rejected { message: String },
}

impl TransportError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable { message: message.into() }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected { message: message.into() }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Timeout { .. })
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, TransportError>;

    async fn update_backend_role(
        &self,
        id: &str,
        role: BackendRole,
    ) -> Result<(), TransportError>;
}

/// In-process user store for local use and tests
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(user);
        }
        store
    }

    pub fn insert(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.users.get(id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, TransportError> {
        Ok(self.get(id))
    }

    /// Enforces the protected-account rule again at commit time.
    async fn update_backend_role(
        &self,
        id: &str,
        role: BackendRole,
    ) -> Result<(), TransportError> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| TransportError::rejected(format!("no user with id '{}'", id)))?;

        if entry.is_protected() && role != BackendRole::Admin {
            tracing::warn!(
                user_id = %id,
                requested = %role,
                "Refusing to downgrade protected account"
            );
            return Err(TransportError::rejected(format!(
                "protected account '{}' must stay {}",
                entry.username,
                BackendRole::Admin
            )));
        }

        entry.backend_role = role;
        Ok(())
    }
}
