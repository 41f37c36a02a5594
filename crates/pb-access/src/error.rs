//! Access Error Types
//!
//! Two families:
//! - `PermissionError`: policy decisions a user can act on (rendered by the UI)
//! - `AccessError`: identifier parsing and registry/resolver consistency failures

use thiserror::Error;

use crate::role::entity::{BackendRole, Role};

/// Policy rejection of a role change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Protected account: the role of '{username}' cannot be changed")]
    ProtectedAccount { username: String },
}

impl PermissionError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    pub fn protected_account(username: impl Into<String>) -> Self {
        Self::ProtectedAccount { username: username.into() }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::ProtectedAccount { .. } => "PROTECTED_ACCOUNT",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unknown role: {id}")]
    UnknownRole { id: String },

    #[error("Unknown backend role: {id}")]
    UnknownBackendRole { id: String },

    #[error("Unknown resource: {id}")]
    UnknownResource { id: String },

    #[error("Unknown action: {id}")]
    UnknownAction { id: String },

    #[error("Malformed permission '{value}', expected resource:action")]
    MalformedPermission { value: String },

    #[error("Backend role {backend} has no canonical display role")]
    UnmappedRole { backend: BackendRole },

    #[error("Backend role {backend} has more than one canonical display role")]
    DuplicateCanonicalRole { backend: BackendRole },

    #[error("Canonical role {role} for backend role {backend} persists as {persisted}")]
    InvalidCanonicalRole {
        backend: BackendRole,
        role: Role,
        persisted: BackendRole,
    },
}

impl AccessError {
    pub fn unknown_role(id: impl Into<String>) -> Self {
        Self::UnknownRole { id: id.into() }
    }

    pub fn unknown_backend_role(id: impl Into<String>) -> Self {
        Self::UnknownBackendRole { id: id.into() }
    }
}

pub type Result<T> = std::result::Result<T, AccessError>;
