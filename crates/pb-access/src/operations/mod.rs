//! Access Operations
//!
//! Use cases that mutate state owned by collaborators.

pub mod change_role;
pub mod context;
pub mod events;
pub mod store;

pub use change_role::{
    ChangeRoleCommand, ChangeRoleUseCase, RejectionReason, RoleChangeAttempt, RoleChangeError,
    RoleChangeState,
};
pub use context::ExecutionContext;
pub use events::RoleChanged;
pub use store::{InMemoryUserStore, TransportError, UserStore};
