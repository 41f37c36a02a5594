//! Capability Checks
//!
//! The session/auth context answers two questions for the core: does the
//! caller hold a (resource, action) permission, and does it hold a role.

use std::collections::HashSet;

use crate::error::{AccessError, Result};
use crate::role::entity::{Action, Resource, Role};
use crate::role::registry::RoleRegistry;

/// Capability check supplied by the authentication context
pub trait CapabilityCheck {
    fn has_permission(&self, resource: Resource, action: Action) -> bool;

    fn has_role(&self, role: Role) -> bool;

    /// Check if any of the specified permissions is held
    fn has_any_permission(&self, required: &[(Resource, Action)]) -> bool {
        required
            .iter()
            .any(|(resource, action)| self.has_permission(*resource, *action))
    }
}

/// Capability context for a signed-in user. Permission checks go to the
/// role registry.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: String,
    pub username: String,
    pub role: Role,
    registry: &'static RoleRegistry,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Self::with_registry(user_id, username, role, RoleRegistry::global())
    }

    pub fn with_registry(
        user_id: impl Into<String>,
        username: impl Into<String>,
        role: Role,
        registry: &'static RoleRegistry,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            role,
            registry,
        }
    }
}

impl CapabilityCheck for SessionContext {
    fn has_permission(&self, resource: Resource, action: Action) -> bool {
        self.registry.permits(self.role, resource, action)
    }

    fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

/// Capabilities carried as raw `resource:action` strings, e.g. from a token
#[derive(Debug, Clone, Default)]
pub struct StaticCapabilities {
    permissions: HashSet<(Resource, Action)>,
    roles: HashSet<Role>,
}

impl StaticCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `resource:action` permission strings. Malformed or unknown
    /// entries are errors rather than being skipped.
    pub fn from_permission_strings<I, S>(permissions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut caps = Self::new();
        for permission in permissions {
            let (resource, action) = parse_permission(permission.as_ref())?;
            caps.permissions.insert((resource, action));
        }
        Ok(caps)
    }

    pub fn with_permission(mut self, resource: Resource, action: Action) -> Self {
        self.permissions.insert((resource, action));
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }
}

impl CapabilityCheck for StaticCapabilities {
    fn has_permission(&self, resource: Resource, action: Action) -> bool {
        self.permissions.contains(&(resource, action))
            || self.permissions.contains(&(resource, Action::Manage))
    }

    fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Parse a `resource:action` permission string
pub fn parse_permission(value: &str) -> Result<(Resource, Action)> {
    let (resource, action) = value
        .split_once(':')
        .ok_or_else(|| AccessError::MalformedPermission { value: value.to_string() })?;

    if resource.is_empty() || action.is_empty() || action.contains(':') {
        return Err(AccessError::MalformedPermission { value: value.to_string() });
    }

    Ok((resource.parse()?, action.parse()?))
}
