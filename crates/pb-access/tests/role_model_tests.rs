//! Role Model Integration Tests
//!
//! Properties of the registry and resolver seen from a caller.

use pb_access::{
    to_backend_role, Action, BackendRole, PermissionError, Resource, Role, RoleRegistry,
    RoleResolver, StaticCapabilities, User,
};

fn user(id: &str, username: &str, backend_role: BackendRole) -> User {
    User::new(id, username, format!("{}@example.com", username), backend_role)
}

fn full_capabilities() -> StaticCapabilities {
    let mut caps = StaticCapabilities::new().with_role(Role::SuperAdmin);
    for resource in Resource::ALL {
        caps = caps.with_permission(resource, Action::Manage);
    }
    caps
}

mod registry_tests {
    use super::*;

    #[test]
    fn test_every_role_has_info_and_grants() {
        let registry = RoleRegistry::global();
        for role in registry.all_roles() {
            assert_eq!(registry.info_for(*role).role, *role);
            assert!(!registry.info_for(*role).label.is_empty());
            assert!(!registry.grants_for(*role).is_empty());
        }
    }

    #[test]
    fn test_registry_is_a_single_instance() {
        assert!(std::ptr::eq(RoleRegistry::global(), RoleRegistry::global()));
    }

    #[test]
    fn test_grants_for_is_stable_across_calls() {
        let registry = RoleRegistry::global();
        let before: Vec<_> = Role::ALL.iter().map(|r| registry.grants_for(*r).to_vec()).collect();
        let after: Vec<_> = Role::ALL.iter().map(|r| registry.grants_for(*r).to_vec()).collect();
        assert_eq!(before, after);
    }
}

mod resolver_tests {
    use super::*;

    #[test]
    fn test_backend_mapping_is_total() {
        for role in Role::ALL {
            assert!(BackendRole::ALL.contains(&to_backend_role(role)));
        }
    }

    #[test]
    fn test_protected_display_role_ignores_stored_role() {
        let resolver = RoleResolver::default();
        for backend in BackendRole::ALL {
            let admin = user("u0", "admin", backend);
            assert_eq!(resolver.to_display_role(&admin), Role::SuperAdmin);
            assert_eq!(resolver.display_label(&admin), "Super Administrator");
        }
    }

    #[test]
    fn test_corrupted_admin_still_displays_highest_privilege() {
        let resolver = RoleResolver::default();
        let admin = user("u0", "admin", BackendRole::Viewer);
        assert_eq!(resolver.to_display_role(&admin), Role::SuperAdmin);
        assert!(resolver.is_permitted(&admin, Resource::Settings, Action::Manage));
    }

    #[test]
    fn test_protected_account_rejected_for_every_actor_and_role() {
        let resolver = RoleResolver::default();
        let admin = user("u0", "admin", BackendRole::Admin);
        let actors = [
            full_capabilities(),
            StaticCapabilities::new(),
            StaticCapabilities::new().with_permission(Resource::Users, Action::Update),
        ];

        for actor in &actors {
            for role in Role::ALL {
                assert_eq!(
                    resolver.request_role_change(actor, &admin, role),
                    Err(PermissionError::ProtectedAccount { username: "admin".to_string() })
                );
            }
        }
    }

    #[test]
    fn test_actor_without_capability_is_forbidden() {
        let resolver = RoleResolver::default();
        let actor = StaticCapabilities::new()
            .with_permission(Resource::Users, Action::Read)
            .with_permission(Resource::Roles, Action::Update);

        for backend in BackendRole::ALL {
            let target = user("u2", "alice", backend);
            for role in Role::ALL {
                assert!(matches!(
                    resolver.request_role_change(&actor, &target, role),
                    Err(PermissionError::Forbidden { .. })
                ));
            }
        }
    }

    #[test]
    fn test_round_trip_for_canonical_representatives() {
        let resolver = RoleResolver::default();
        for backend in BackendRole::ALL {
            let u = user("u3", "carol", backend);
            assert_eq!(to_backend_role(resolver.to_display_role(&u)), u.backend_role);
        }
    }

    #[test]
    fn test_scenario_manager_promotion() {
        let resolver = RoleResolver::default();
        let actor = StaticCapabilities::from_permission_strings(["roles:manage"]).unwrap();
        let bob = user("u1", "bob", BackendRole::Viewer);
        assert_eq!(
            resolver.request_role_change(&actor, &bob, Role::Manager),
            Ok(BackendRole::Manager)
        );
    }

    #[test]
    fn test_scenario_forbidden_leaves_target_untouched() {
        let resolver = RoleResolver::default();
        let alice = user("u2", "alice", BackendRole::Admin);
        let result = resolver.request_role_change(&StaticCapabilities::new(), &alice, Role::Viewer);
        assert!(matches!(result, Err(PermissionError::Forbidden { .. })));
        assert_eq!(alice.backend_role, BackendRole::Admin);
    }

    #[test]
    fn test_session_capabilities_drive_role_change() {
        let resolver = RoleResolver::default();
        let admin_session = resolver.session_for(&user("u4", "dave", BackendRole::Admin));
        let manager_session = resolver.session_for(&user("u5", "erin", BackendRole::Manager));
        let target = user("u6", "frank", BackendRole::Viewer);

        assert_eq!(
            resolver.request_role_change(&admin_session, &target, Role::Qa),
            Ok(BackendRole::Viewer)
        );
        assert!(matches!(
            resolver.request_role_change(&manager_session, &target, Role::Qa),
            Err(PermissionError::Forbidden { .. })
        ));
    }
}
