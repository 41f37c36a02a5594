//! Execution Context
//!
//! Carries the acting principal and correlation id through a use case.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Unique ID for this execution (generated)
    pub execution_id: String,
    /// ID for tracing across services (usually from the original request)
    pub correlation_id: String,
    /// ID of the principal performing the action
    pub principal_id: String,
    pub initiated_at: DateTime<Utc>,
}

impl ExecutionContext {
    /// Fresh context; the correlation id starts as the execution id.
    pub fn create(principal_id: impl Into<String>) -> Self {
        let exec_id = format!("exec-{}", Uuid::new_v4());
        Self {
            execution_id: exec_id.clone(),
            correlation_id: exec_id,
            principal_id: principal_id.into(),
            initiated_at: Utc::now(),
        }
    }

    pub fn with_correlation_id(
        principal_id: impl Into<String>,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            ..Self::create(principal_id)
        }
    }
}
