//! Change User Role Use Case
//!
//! Every role change funnels through here: load the target, ask the resolver,
//! write the backend role. Policy rejections never reach the store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use super::context::ExecutionContext;
use super::events::RoleChanged;
use super::store::{TransportError, UserStore};
use crate::capability::CapabilityCheck;
use crate::error::PermissionError;
use crate::role::entity::Role;
use crate::role::resolver::RoleResolver;

/// Command for changing a user's role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleCommand {
    pub user_id: String,
    pub new_role: Role,
}

/// Why an attempt ended in `Rejected`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    Forbidden,
    ProtectedAccount,
    UserNotFound,
    /// Transient store failure
    Transport,
    /// The store refused the write itself
    StoreRejected,
}

impl RejectionReason {
    /// Only transient store failures are worth retrying
    pub fn is_retryable(self) -> bool {
        matches!(self, RejectionReason::Transport)
    }
}

/// Lifecycle of one role-change attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChangeState {
    Idle,
    Validating,
    Applying,
    Applied,
    Rejected(RejectionReason),
}

impl RoleChangeState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RoleChangeState::Applied | RoleChangeState::Rejected(_))
    }

    fn can_advance_to(self, next: RoleChangeState) -> bool {
        use RoleChangeState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Applying)
                | (Validating, Rejected(_))
                | (Applying, Applied)
                | (Applying, Rejected(_))
        )
    }
}

/// States an attempt went through, oldest first
#[derive(Debug, Clone)]
pub struct RoleChangeAttempt {
    history: Vec<RoleChangeState>,
}

impl Default for RoleChangeAttempt {
    fn default() -> Self {
        Self {
            history: vec![RoleChangeState::Idle],
        }
    }
}

impl RoleChangeAttempt {
    pub fn state(&self) -> RoleChangeState {
        self.history.last().copied().unwrap_or(RoleChangeState::Idle)
    }

    pub fn history(&self) -> &[RoleChangeState] {
        &self.history
    }

    fn advance(&mut self, next: RoleChangeState) {
        let current = self.state();
        debug_assert!(
            current.can_advance_to(next),
            "invalid role change transition {:?} -> {:?}",
            current,
            next
        );
        debug!(from = ?current, to = ?next, "Role change state");
        self.history.push(next);
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleChangeError {
    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl RoleChangeError {
    pub fn rejection_reason(&self) -> RejectionReason {
        match self {
            Self::Permission(PermissionError::Forbidden { .. }) => RejectionReason::Forbidden,
            Self::Permission(PermissionError::ProtectedAccount { .. }) => {
                RejectionReason::ProtectedAccount
            }
            Self::UserNotFound { .. } => RejectionReason::UserNotFound,
            Self::Transport(e) if e.is_retryable() => RejectionReason::Transport,
            Self::Transport(_) => RejectionReason::StoreRejected,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Permission(err) => err.code(),
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::Transport(TransportError::Rejected { .. }) => "STORE_REJECTED",
            Self::Transport(_) => "TRANSPORT_FAILURE",
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.rejection_reason().is_retryable()
    }
}

/// Use case for changing a user's role.
pub struct ChangeRoleUseCase<S: UserStore> {
    resolver: Arc<RoleResolver>,
    store: Arc<S>,
}

impl<S: UserStore> ChangeRoleUseCase<S> {
    pub fn new(resolver: Arc<RoleResolver>, store: Arc<S>) -> Self {
        Self { resolver, store }
    }

    pub async fn execute<C>(
        &self,
        actor: &C,
        command: ChangeRoleCommand,
        ctx: ExecutionContext,
    ) -> Result<RoleChanged, RoleChangeError>
    where
        C: CapabilityCheck + Sync + ?Sized,
    {
        self.execute_tracked(actor, command, ctx).await.1
    }

    /// Same as `execute`, also returning the states the attempt went through.
    pub async fn execute_tracked<C>(
        &self,
        actor: &C,
        command: ChangeRoleCommand,
        ctx: ExecutionContext,
    ) -> (RoleChangeAttempt, Result<RoleChanged, RoleChangeError>)
    where
        C: CapabilityCheck + Sync + ?Sized,
    {
        let mut attempt = RoleChangeAttempt::default();
        let result = self.run(&mut attempt, actor, &command, &ctx).await;

        if let Err(err) = &result {
            attempt.advance(RoleChangeState::Rejected(err.rejection_reason()));
        }

        (attempt, result)
    }

    async fn run<C>(
        &self,
        attempt: &mut RoleChangeAttempt,
        actor: &C,
        command: &ChangeRoleCommand,
        ctx: &ExecutionContext,
    ) -> Result<RoleChanged, RoleChangeError>
    where
        C: CapabilityCheck + Sync + ?Sized,
    {
        attempt.advance(RoleChangeState::Validating);

        let target = match self.store.find_by_id(&command.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                return Err(RoleChangeError::UserNotFound {
                    user_id: command.user_id.clone(),
                });
            }
            Err(e) => {
                error!(
                    user_id = %command.user_id,
                    error = %e,
                    "Failed to load user for role change"
                );
                return Err(e.into());
            }
        };

        let backend_role = self
            .resolver
            .request_role_change(actor, &target, command.new_role)
            .map_err(|e| {
                warn!(
                    principal_id = %ctx.principal_id,
                    user_id = %target.id,
                    code = e.code(),
                    "Role change rejected"
                );
                e
            })?;

        attempt.advance(RoleChangeState::Applying);

        if let Err(e) = self.store.update_backend_role(&target.id, backend_role).await {
            error!(user_id = %target.id, error = %e, "Failed to persist role change");
            return Err(e.into());
        }

        let display_role = self.resolver.canonical_roles().get(backend_role);
        let event = RoleChanged::new(ctx, &target, backend_role, command.new_role, display_role);

        attempt.advance(RoleChangeState::Applied);
        tracing::info!(
            principal_id = %ctx.principal_id,
            user_id = %target.id,
            previous = %event.previous_backend_role,
            new = %event.new_backend_role,
            "User role changed"
        );

        Ok(event)
    }
}
