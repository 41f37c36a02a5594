//! Role and Permission Entities
//!
//! Closed enumerations for the role model. Display-facing `Role` values are
//! fine-grained; `BackendRole` is what the user store persists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccessError;

/// Industry role shown to administrators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Highest privilege; always the role of the protected account
    SuperAdmin,
    Admin,
    Manager,
    Developer,
    Qa,
    Viewer,
    Guest,
}

impl Role {
    /// Fixed iteration order used by role pickers
    pub const ALL: [Role; 7] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Manager,
        Role::Developer,
        Role::Qa,
        Role::Viewer,
        Role::Guest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Developer => "developer",
            Role::Qa => "qa",
            Role::Viewer => "viewer",
            Role::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| AccessError::unknown_role(value))
    }
}

/// Role persisted against a user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendRole {
    Admin,
    Manager,
    Viewer,
}

impl BackendRole {
    pub const ALL: [BackendRole; 3] =
        [BackendRole::Admin, BackendRole::Manager, BackendRole::Viewer];

    pub fn as_str(self) -> &'static str {
        match self {
            BackendRole::Admin => "admin",
            BackendRole::Manager => "manager",
            BackendRole::Viewer => "viewer",
        }
    }
}

impl fmt::Display for BackendRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendRole {
    type Err = AccessError;

    /// Unrecognized values are an error; they never fall back to `viewer`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BackendRole::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| AccessError::unknown_backend_role(value))
    }
}

/// Dashboard resource a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Dashboard,
    PullRequests,
    Tickets,
    Releases,
    Reports,
    /// GitHub/Jira connections and their sync jobs
    Integrations,
    Users,
    Roles,
    Settings,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::Dashboard,
        Resource::PullRequests,
        Resource::Tickets,
        Resource::Releases,
        Resource::Reports,
        Resource::Integrations,
        Resource::Users,
        Resource::Roles,
        Resource::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Dashboard => "dashboard",
            Resource::PullRequests => "pull_requests",
            Resource::Tickets => "tickets",
            Resource::Releases => "releases",
            Resource::Reports => "reports",
            Resource::Integrations => "integrations",
            Resource::Users => "users",
            Resource::Roles => "roles",
            Resource::Settings => "settings",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = AccessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == value)
            .ok_or_else(|| AccessError::UnknownResource { id: value.to_string() })
    }
}

/// Operation on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
    Export,
    Sync,
    /// Superset marker: every action on the resource
    Manage,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Read,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Export,
        Action::Sync,
        Action::Manage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Export => "export",
            Action::Sync => "sync",
            Action::Manage => "manage",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AccessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| AccessError::UnknownAction { id: value.to_string() })
    }
}

/// Actions a role holds on one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionGrant {
    pub resource: Resource,
    pub actions: Vec<Action>,
}

impl PermissionGrant {
    pub fn new(resource: Resource, actions: &[Action]) -> Self {
        Self {
            resource,
            actions: actions.to_vec(),
        }
    }

    /// Full control over the resource
    pub fn manage(resource: Resource) -> Self {
        Self::new(resource, &[Action::Manage])
    }

    /// `Manage` in the grant allows every action. Asking for `Manage`
    /// itself only matches a grant that lists it.
    pub fn allows(&self, action: Action) -> bool {
        self.actions.contains(&Action::Manage) || self.actions.contains(&action)
    }
}

/// Visual grouping for role badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    Administrative,
    Management,
    Engineering,
    ReadOnly,
}

/// Display metadata for a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleInfo {
    pub role: Role,
    pub label: &'static str,
    pub description: &'static str,
    pub category: RoleCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[test]
    fn test_unknown_identifiers_fail() {
        assert_eq!(
            "owner".parse::<Role>(),
            Err(AccessError::UnknownRole { id: "owner".to_string() })
        );
        assert_eq!(
            "superuser".parse::<BackendRole>(),
            Err(AccessError::UnknownBackendRole { id: "superuser".to_string() })
        );
        assert!("wiki".parse::<Resource>().is_err());
        assert!("approve".parse::<Action>().is_err());
    }

    #[test]
    fn test_serde_ids_match_as_str() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"super_admin\"");
        assert_eq!(serde_json::to_string(&Resource::PullRequests).unwrap(), "\"pull_requests\"");
        let backend: BackendRole = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(backend, BackendRole::Manager);
        assert!(serde_json::from_str::<BackendRole>("\"owner\"").is_err());
    }

    #[test]
    fn test_manage_is_superset() {
        let grant = PermissionGrant::manage(Resource::Tickets);
        for action in Action::ALL {
            assert!(grant.allows(action));
        }
    }

    #[test]
    fn test_enumerated_actions_do_not_imply_manage() {
        let grant = PermissionGrant::new(
            Resource::Tickets,
            &[
                Action::Read,
                Action::Create,
                Action::Update,
                Action::Delete,
                Action::Export,
                Action::Sync,
            ],
        );
        assert!(grant.allows(Action::Delete));
        assert!(!grant.allows(Action::Manage));
    }
}
