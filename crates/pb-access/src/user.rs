//! User Record
//!
//! The slice of a user record the access core reads. Storage is owned by
//! the user store; this crate never creates or deletes users.

use serde::{Deserialize, Serialize};

use crate::role::entity::BackendRole;

/// Reserved username of the built-in administrator account
pub const PROTECTED_USERNAME: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub backend_role: BackendRole,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        backend_role: BackendRole,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
            backend_role,
        }
    }

    /// Whether this is the protected built-in administrator
    pub fn is_protected(&self) -> bool {
        self.username == PROTECTED_USERNAME
    }
}
