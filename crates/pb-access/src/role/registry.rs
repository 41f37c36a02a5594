//! Role Registry
//!
//! The static catalogue of roles: display metadata and permission grants.
//! Built once per process; there is no API to mutate it afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{AccessError, Result};
use crate::role::entity::{Action, PermissionGrant, Resource, Role, RoleCategory, RoleInfo};

static REGISTRY: OnceLock<RoleRegistry> = OnceLock::new();

/// Read-only role catalogue
#[derive(Debug)]
pub struct RoleRegistry {
    infos: HashMap<Role, RoleInfo>,
    grants: HashMap<Role, Vec<PermissionGrant>>,
}

impl RoleRegistry {
    /// Process-wide registry, built on first access.
    pub fn global() -> &'static RoleRegistry {
        REGISTRY.get_or_init(RoleRegistry::builtin)
    }

    fn builtin() -> Self {
        let infos = Role::ALL
            .into_iter()
            .map(|role| (role, builtin::info(role)))
            .collect();
        let grants = Role::ALL
            .into_iter()
            .map(|role| (role, builtin::grants(role)))
            .collect();

        tracing::debug!(roles = Role::ALL.len(), "Role registry initialized");

        Self { infos, grants }
    }

    /// Grants for a role in display order. Empty for a role without grants.
    pub fn grants_for(&self, role: Role) -> &[PermissionGrant] {
        self.grants.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Display metadata for a role.
    pub fn info_for(&self, role: Role) -> &RoleInfo {
        match self.infos.get(&role) {
            Some(info) => info,
            // Every enum value is inserted by builtin()
            None => unreachable!("role registry has no metadata for {role}"),
        }
    }

    /// Display metadata for a role identifier received as text.
    pub fn info_for_id(&self, id: &str) -> Result<&RoleInfo> {
        let role: Role = id.parse()?;
        self.infos.get(&role).ok_or_else(|| AccessError::unknown_role(id))
    }

    /// Every role, in picker order.
    pub fn all_roles(&self) -> &'static [Role] {
        &Role::ALL
    }

    /// Whether `role` may perform `action` on `resource`.
    pub fn permits(&self, role: Role, resource: Resource, action: Action) -> bool {
        self.grants_for(role)
            .iter()
            .any(|grant| grant.resource == resource && grant.allows(action))
    }
}

/// Built-in role definitions
mod builtin {
    use super::*;
    use Action::*;
    use Resource::*;

    pub(super) fn info(role: Role) -> RoleInfo {
        let (label, description, category) = match role {
            Role::SuperAdmin => (
                "Super Administrator",
                "Full control of the dashboard, including settings and every account",
                RoleCategory::Administrative,
            ),
            Role::Admin => (
                "Administrator",
                "Manages users, roles, integrations and all tracked data",
                RoleCategory::Administrative,
            ),
            Role::Manager => (
                "Engineering Manager",
                "Plans releases, triages tickets, runs syncs and exports reports",
                RoleCategory::Management,
            ),
            Role::Developer => (
                "Developer",
                "Works on pull requests and tickets",
                RoleCategory::Engineering,
            ),
            Role::Qa => (
                "QA Engineer",
                "Verifies releases, files tickets and exports test reports",
                RoleCategory::Engineering,
            ),
            Role::Viewer => (
                "Viewer",
                "Read-only access to tracked data and reports",
                RoleCategory::ReadOnly,
            ),
            Role::Guest => (
                "Guest",
                "Dashboard overview only",
                RoleCategory::ReadOnly,
            ),
        };

        RoleInfo {
            role,
            label,
            description,
            category,
        }
    }

    pub(super) fn grants(role: Role) -> Vec<PermissionGrant> {
        match role {
            Role::SuperAdmin => Resource::ALL.into_iter().map(PermissionGrant::manage).collect(),
            Role::Admin => {
                let mut grants: Vec<PermissionGrant> = [
                    Dashboard, PullRequests, Tickets, Releases, Reports, Integrations, Users, Roles,
                ]
                .into_iter()
                .map(PermissionGrant::manage)
                .collect();
                grants.push(PermissionGrant::new(Settings, &[Read, Update]));
                grants
            }
            Role::Manager => vec![
                PermissionGrant::new(Dashboard, &[Read]),
                PermissionGrant::new(PullRequests, &[Read, Update]),
                PermissionGrant::new(Tickets, &[Read, Create, Update, Delete]),
                PermissionGrant::new(Releases, &[Read, Create, Update]),
                PermissionGrant::new(Reports, &[Read, Export]),
                PermissionGrant::new(Integrations, &[Read, Sync]),
                PermissionGrant::new(Users, &[Read]),
            ],
            Role::Developer => vec![
                PermissionGrant::new(Dashboard, &[Read]),
                PermissionGrant::new(PullRequests, &[Read, Create, Update]),
                PermissionGrant::new(Tickets, &[Read, Create, Update]),
                PermissionGrant::new(Releases, &[Read]),
                PermissionGrant::new(Reports, &[Read]),
            ],
            Role::Qa => vec![
                PermissionGrant::new(Dashboard, &[Read]),
                PermissionGrant::new(PullRequests, &[Read]),
                PermissionGrant::new(Tickets, &[Read, Create, Update]),
                PermissionGrant::new(Releases, &[Read, Update]),
                PermissionGrant::new(Reports, &[Read, Export]),
            ],
            Role::Viewer => [Dashboard, PullRequests, Tickets, Releases, Reports]
                .into_iter()
                .map(|resource| PermissionGrant::new(resource, &[Read]))
                .collect(),
            Role::Guest => vec![PermissionGrant::new(Dashboard, &[Read])],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_roles_order() {
        let registry = RoleRegistry::global();
        assert_eq!(
            registry.all_roles(),
            &[
                Role::SuperAdmin,
                Role::Admin,
                Role::Manager,
                Role::Developer,
                Role::Qa,
                Role::Viewer,
                Role::Guest,
            ]
        );
    }

    #[test]
    fn test_grants_are_stable() {
        let registry = RoleRegistry::global();
        for role in Role::ALL {
            let first = registry.grants_for(role).to_vec();
            let second = registry.grants_for(role);
            assert_eq!(first.as_slice(), second);
            // Same backing storage on every call
            assert!(std::ptr::eq(registry.grants_for(role), second));
        }
    }

    #[test]
    fn test_super_admin_manages_everything() {
        let registry = RoleRegistry::global();
        for resource in Resource::ALL {
            for action in Action::ALL {
                assert!(registry.permits(Role::SuperAdmin, resource, action));
            }
        }
    }

    #[test]
    fn test_admin_cannot_manage_settings() {
        let registry = RoleRegistry::global();
        assert!(registry.permits(Role::Admin, Resource::Settings, Action::Update));
        assert!(!registry.permits(Role::Admin, Resource::Settings, Action::Manage));
        assert!(registry.permits(Role::Admin, Resource::Roles, Action::Manage));
    }

    #[test]
    fn test_guest_sees_only_dashboard() {
        let registry = RoleRegistry::global();
        assert_eq!(registry.grants_for(Role::Guest).len(), 1);
        assert!(registry.permits(Role::Guest, Resource::Dashboard, Action::Read));
        assert!(!registry.permits(Role::Guest, Resource::Tickets, Action::Read));
    }

    #[test]
    fn test_manager_grants_in_display_order() {
        let resources: Vec<Resource> = RoleRegistry::global()
            .grants_for(Role::Manager)
            .iter()
            .map(|grant| grant.resource)
            .collect();
        assert_eq!(
            resources,
            vec![
                Resource::Dashboard,
                Resource::PullRequests,
                Resource::Tickets,
                Resource::Releases,
                Resource::Reports,
                Resource::Integrations,
                Resource::Users,
            ]
        );
    }

    #[test]
    fn test_info_lookup() {
        let registry = RoleRegistry::global();
        assert_eq!(registry.info_for(Role::Qa).label, "QA Engineer");
        assert_eq!(registry.info_for(Role::Viewer).category, RoleCategory::ReadOnly);
        assert_eq!(registry.info_for_id("developer").unwrap().role, Role::Developer);
        assert_eq!(
            registry.info_for_id("owner"),
            Err(AccessError::UnknownRole { id: "owner".to_string() })
        );
    }
}
