//! Role Model
//!
//! Role catalogue and role resolution.

pub mod entity;
pub mod registry;
pub mod resolver;

pub use entity::{Action, BackendRole, PermissionGrant, Resource, Role, RoleCategory, RoleInfo};
pub use registry::RoleRegistry;
pub use resolver::{
    to_backend_role, CanonicalRoles, RoleControl, RoleResolver, ROLE_CHANGE_CAPABILITIES,
};
