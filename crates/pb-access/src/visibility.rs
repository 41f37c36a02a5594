//! Navigation and Action Visibility
//!
//! Which sidebar sections and administrative buttons a caller gets to see.
//! Rendering belongs to the UI; this module only decides.

use serde::Serialize;

use crate::capability::CapabilityCheck;
use crate::role::entity::{Action, Resource};
use crate::role::resolver::ROLE_CHANGE_CAPABILITIES;

/// Sidebar navigation section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavSection {
    Overview,
    PullRequests,
    Tickets,
    Releases,
    Reports,
    Integrations,
    Users,
    Roles,
    Settings,
}

impl NavSection {
    /// Sidebar order
    pub const ALL: [NavSection; 9] = [
        NavSection::Overview,
        NavSection::PullRequests,
        NavSection::Tickets,
        NavSection::Releases,
        NavSection::Reports,
        NavSection::Integrations,
        NavSection::Users,
        NavSection::Roles,
        NavSection::Settings,
    ];

    pub fn resource(self) -> Resource {
        match self {
            NavSection::Overview => Resource::Dashboard,
            NavSection::PullRequests => Resource::PullRequests,
            NavSection::Tickets => Resource::Tickets,
            NavSection::Releases => Resource::Releases,
            NavSection::Reports => Resource::Reports,
            NavSection::Integrations => Resource::Integrations,
            NavSection::Users => Resource::Users,
            NavSection::Roles => Resource::Roles,
            NavSection::Settings => Resource::Settings,
        }
    }

    pub fn is_visible<C: CapabilityCheck + ?Sized>(self, ctx: &C) -> bool {
        ctx.has_permission(self.resource(), Action::Read)
    }
}

/// Administrative button guarded by one or more alternative capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    ExportReport,
    SyncGithub,
    SyncJira,
    InviteUser,
    ChangeRole,
    EditSettings,
}

impl AdminAction {
    pub const ALL: [AdminAction; 6] = [
        AdminAction::ExportReport,
        AdminAction::SyncGithub,
        AdminAction::SyncJira,
        AdminAction::InviteUser,
        AdminAction::ChangeRole,
        AdminAction::EditSettings,
    ];

    /// Capabilities enabling the action; holding any one suffices.
    ///
    /// `ChangeRole` reuses the resolver's rule so the button and the
    /// commit-time check cannot disagree.
    pub fn requirements(self) -> &'static [(Resource, Action)] {
        match self {
            AdminAction::ExportReport => &[(Resource::Reports, Action::Export)],
            AdminAction::SyncGithub | AdminAction::SyncJira => {
                &[(Resource::Integrations, Action::Sync)]
            }
            AdminAction::InviteUser => &[(Resource::Users, Action::Create)],
            AdminAction::ChangeRole => ROLE_CHANGE_CAPABILITIES,
            AdminAction::EditSettings => &[(Resource::Settings, Action::Update)],
        }
    }

    pub fn is_enabled<C: CapabilityCheck + ?Sized>(self, ctx: &C) -> bool {
        ctx.has_any_permission(self.requirements())
    }
}

/// Visible sidebar sections, in sidebar order
pub fn visible_sections<C: CapabilityCheck + ?Sized>(ctx: &C) -> Vec<NavSection> {
    NavSection::ALL
        .into_iter()
        .filter(|section| section.is_visible(ctx))
        .collect()
}

/// Enabled administrative actions
pub fn enabled_actions<C: CapabilityCheck + ?Sized>(ctx: &C) -> Vec<AdminAction> {
    AdminAction::ALL
        .into_iter()
        .filter(|action| action.is_enabled(ctx))
        .collect()
}
