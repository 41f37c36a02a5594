//! Role Change Events

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::context::ExecutionContext;
use crate::role::entity::{BackendRole, Role};
use crate::user::User;

/// Emitted after a role change has been persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleChanged {
    pub event_id: Uuid,
    pub event_type: &'static str,
    pub execution_id: String,
    pub correlation_id: String,
    pub principal_id: String,
    pub occurred_at: DateTime<Utc>,

    pub user_id: String,
    pub username: String,
    pub previous_backend_role: BackendRole,
    pub new_backend_role: BackendRole,
    /// Role picked by the administrator
    pub requested_role: Role,
    /// Role the user displays as after the change
    pub display_role: Role,
}

impl RoleChanged {
    const EVENT_TYPE: &'static str = "pulseboard:access:user-role:changed";

    pub fn new(
        ctx: &ExecutionContext,
        target: &User,
        new_backend_role: BackendRole,
        requested_role: Role,
        display_role: Role,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: Self::EVENT_TYPE,
            execution_id: ctx.execution_id.clone(),
            correlation_id: ctx.correlation_id.clone(),
            principal_id: ctx.principal_id.clone(),
            occurred_at: Utc::now(),
            user_id: target.id.clone(),
            username: target.username.clone(),
            previous_backend_role: target.backend_role,
            new_backend_role,
            requested_role,
            display_role,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.previous_backend_role == self.new_backend_role
    }
}
