//! Pulseboard Access Core
//!
//! Role and permission resolution for the Pulseboard dashboard:
//! - Role registry: the fixed role catalogue with display metadata and grants
//! - Role resolver: display role <-> backend role translation and the
//!   protected administrator account rules
//! - Capability contexts consumed from the session layer
//! - Navigation and administrative action visibility
//! - The role-change use case, the only path that writes a user's role
//!
//! ## Module Organization
//!
//! - `role` - entities, registry and resolver
//! - `capability` - capability check trait and implementations
//! - `visibility` - sidebar sections and admin buttons
//! - `operations` - role-change use case and user store seam

pub mod capability;
pub mod error;
pub mod operations;
pub mod role;
pub mod user;
pub mod visibility;

pub use capability::{parse_permission, CapabilityCheck, SessionContext, StaticCapabilities};
pub use error::{AccessError, PermissionError, Result};
pub use operations::{
    ChangeRoleCommand, ChangeRoleUseCase, ExecutionContext, InMemoryUserStore, RejectionReason,
    RoleChangeAttempt, RoleChangeError, RoleChangeState, RoleChanged, TransportError, UserStore,
};
pub use role::{
    to_backend_role, Action, BackendRole, CanonicalRoles, PermissionGrant, Resource, Role,
    RoleCategory, RoleControl, RoleInfo, RoleRegistry, RoleResolver,
};
pub use user::{User, PROTECTED_USERNAME};
pub use visibility::{enabled_actions, visible_sections, AdminAction, NavSection};
