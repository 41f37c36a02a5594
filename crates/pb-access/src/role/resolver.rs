//! Role Resolver
//!
//! Translates between display roles and persisted backend roles and is the
//! single authority on whether a role change may happen.
//!
//! Forward direction (`Role -> BackendRole`) is a fixed, total table. The
//! reverse direction is not derived from it: several roles collapse onto one
//! backend role, so each backend role names one canonical display role in a
//! separate, configurable table.

use tracing::debug;

use pb_config::AccessConfig;

use crate::capability::{CapabilityCheck, SessionContext};
use crate::error::{AccessError, PermissionError, Result};
use crate::role::entity::{Action, BackendRole, Resource, Role};
use crate::role::registry::RoleRegistry;
use crate::user::User;

/// Capabilities that allow changing another user's role (any one suffices)
pub const ROLE_CHANGE_CAPABILITIES: &[(Resource, Action)] = &[
    (Resource::Roles, Action::Manage),
    (Resource::Users, Action::Update),
];

/// Persisted role for a display role.
///
/// Exhaustive on purpose: adding a `Role` without an entry here does not compile.
pub fn to_backend_role(role: Role) -> BackendRole {
    match role {
        Role::SuperAdmin => BackendRole::Admin,
        Role::Admin => BackendRole::Admin,
        Role::Manager => BackendRole::Manager,
        Role::Developer => BackendRole::Manager,
        Role::Qa => BackendRole::Viewer,
        Role::Viewer => BackendRole::Viewer,
        Role::Guest => BackendRole::Viewer,
    }
}

/// Canonical display role for each backend role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalRoles {
    admin: Role,
    manager: Role,
    viewer: Role,
}

impl Default for CanonicalRoles {
    fn default() -> Self {
        Self {
            admin: Role::Admin,
            manager: Role::Manager,
            viewer: Role::Viewer,
        }
    }
}

impl CanonicalRoles {
    /// Build from explicit pairs.
    ///
    /// Every backend role needs exactly one entry, and each canonical role
    /// must persist back to the backend role it represents.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (BackendRole, Role)>) -> Result<Self> {
        let mut admin = None;
        let mut manager = None;
        let mut viewer = None;

        for (backend, role) in pairs {
            let persisted = to_backend_role(role);
            if persisted != backend {
                return Err(AccessError::InvalidCanonicalRole {
                    backend,
                    role,
                    persisted,
                });
            }
            let slot = match backend {
                BackendRole::Admin => &mut admin,
                BackendRole::Manager => &mut manager,
                BackendRole::Viewer => &mut viewer,
            };
            if slot.replace(role).is_some() {
                return Err(AccessError::DuplicateCanonicalRole { backend });
            }
        }

        let unmapped = |backend| AccessError::UnmappedRole { backend };
        Ok(Self {
            admin: admin.ok_or_else(|| unmapped(BackendRole::Admin))?,
            manager: manager.ok_or_else(|| unmapped(BackendRole::Manager))?,
            viewer: viewer.ok_or_else(|| unmapped(BackendRole::Viewer))?,
        })
    }

    /// Build from the `access.canonical_roles` configuration section.
    pub fn from_config(config: &AccessConfig) -> Result<Self> {
        let pairs = config
            .canonical_roles
            .iter()
            .map(|(backend, role)| -> Result<(BackendRole, Role)> {
                Ok((backend.parse()?, role.parse()?))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_pairs(pairs)
    }

    pub fn get(&self, backend: BackendRole) -> Role {
        match backend {
            BackendRole::Admin => self.admin,
            BackendRole::Manager => self.manager,
            BackendRole::Viewer => self.viewer,
        }
    }
}

/// How the UI should render the role picker for a target user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleControl {
    /// Actor may change the role
    Editable,
    /// Target is the protected account; render a locked control
    Locked { reason: PermissionError },
    /// Actor lacks the capability; render read-only
    ReadOnly { reason: PermissionError },
}

impl RoleControl {
    pub fn is_editable(&self) -> bool {
        matches!(self, RoleControl::Editable)
    }
}

/// Role resolution and role-change authority
#[derive(Debug, Clone)]
pub struct RoleResolver {
    registry: &'static RoleRegistry,
    canonical: CanonicalRoles,
}

impl Default for RoleResolver {
    fn default() -> Self {
        Self::new(CanonicalRoles::default())
    }
}

impl RoleResolver {
    pub fn new(canonical: CanonicalRoles) -> Self {
        Self {
            registry: RoleRegistry::global(),
            canonical,
        }
    }

    /// Build a resolver from configuration, failing on an incomplete or
    /// inconsistent canonical table.
    pub fn from_config(config: &AccessConfig) -> Result<Self> {
        let canonical = CanonicalRoles::from_config(config)?;
        debug!(
            admin = %canonical.admin,
            manager = %canonical.manager,
            viewer = %canonical.viewer,
            "Canonical role table loaded"
        );
        Ok(Self::new(canonical))
    }

    pub fn registry(&self) -> &'static RoleRegistry {
        self.registry
    }

    pub fn canonical_roles(&self) -> &CanonicalRoles {
        &self.canonical
    }

    pub fn to_backend_role(&self, role: Role) -> BackendRole {
        to_backend_role(role)
    }

    /// Role to display for a user. The protected account is always the
    /// highest-privilege role, whatever its stored backend role says.
    pub fn to_display_role(&self, user: &User) -> Role {
        if user.is_protected() {
            return Role::SuperAdmin;
        }
        self.canonical.get(user.backend_role)
    }

    /// Human label for the user's display role
    pub fn display_label(&self, user: &User) -> &'static str {
        self.registry.info_for(self.to_display_role(user)).label
    }

    /// Capability context for a user acting in the dashboard
    pub fn session_for(&self, user: &User) -> SessionContext {
        let role = self.to_display_role(user);
        SessionContext::with_registry(&user.id, &user.username, role, self.registry)
    }

    /// Whether a user may perform `action` on `resource`
    pub fn is_permitted(&self, user: &User, resource: Resource, action: Action) -> bool {
        self.registry.permits(self.to_display_role(user), resource, action)
    }

    /// Check whether `actor` may change the role of `target`.
    ///
    /// The protected account is checked first so it is reported for every
    /// actor, including ones without any capability.
    pub fn can_change_role<C>(
        &self,
        actor: &C,
        target: &User,
    ) -> std::result::Result<(), PermissionError>
    where
        C: CapabilityCheck + ?Sized,
    {
        if target.is_protected() {
            return Err(PermissionError::protected_account(&target.username));
        }

        if !actor.has_any_permission(ROLE_CHANGE_CAPABILITIES) {
            return Err(PermissionError::forbidden(format!(
                "Changing the role of '{}' requires roles:manage or users:update",
                target.username
            )));
        }

        Ok(())
    }

    /// Picker state for the UI, from the same check used on commit
    pub fn role_control<C>(&self, actor: &C, target: &User) -> RoleControl
    where
        C: CapabilityCheck + ?Sized,
    {
        match self.can_change_role(actor, target) {
            Ok(()) => RoleControl::Editable,
            Err(reason @ PermissionError::ProtectedAccount { .. }) => {
                RoleControl::Locked { reason }
            }
            Err(reason @ PermissionError::Forbidden { .. }) => RoleControl::ReadOnly { reason },
        }
    }

    /// Validate a role change and return the backend role to persist.
    ///
    /// Pure: the caller persists the result only on `Ok`.
    pub fn request_role_change<C>(
        &self,
        actor: &C,
        target: &User,
        new_role: Role,
    ) -> std::result::Result<BackendRole, PermissionError>
    where
        C: CapabilityCheck + ?Sized,
    {
        self.can_change_role(actor, target)?;
        let backend = self.to_backend_role(new_role);
        debug!(
            target_id = %target.id,
            new_role = %new_role,
            backend_role = %backend,
            "Role change accepted"
        );
        Ok(backend)
    }
}
