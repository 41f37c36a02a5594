//! Pulseboard Role Inspector
//!
//! Operator CLI over the access core:
//! - `list` - role catalogue with backend mapping and grants
//! - `map` - backend role a display role persists as
//! - `check` - whether a role may perform an action on a resource
//! - `display` - display role and label for a stored user
//! - `nav` - sidebar sections and admin actions a role gets

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use pb_access::{
    enabled_actions, visible_sections, Action, AdminAction, BackendRole, NavSection,
    PermissionGrant, Resource, Role, RoleCategory, RoleResolver, SessionContext, User,
};
use pb_config::ConfigLoader;

#[derive(Parser, Debug)]
#[command(name = "pb-roles", about = "Inspect Pulseboard roles and capabilities")]
struct Args {
    /// Configuration file (falls back to PULSEBOARD_CONFIG and standard paths)
    #[arg(long, env = "PULSEBOARD_CONFIG")]
    config: Option<String>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every role with its backend role and grants
    List,
    /// Show the backend role a display role is persisted as
    Map { role: String },
    /// Check a single (resource, action) permission for a role
    Check {
        #[arg(long)]
        role: String,
        #[arg(long)]
        resource: String,
        #[arg(long)]
        action: String,
    },
    /// Resolve the display role of a stored user
    Display {
        #[arg(long)]
        username: String,
        #[arg(long)]
        backend_role: String,
    },
    /// Sidebar sections and admin actions available to a role
    Nav { role: String },
}

#[derive(Serialize)]
struct RoleSummary<'a> {
    role: Role,
    label: &'static str,
    description: &'static str,
    category: RoleCategory,
    backend_role: BackendRole,
    grants: &'a [PermissionGrant],
}

#[derive(Serialize)]
struct NavSummary {
    role: Role,
    sections: Vec<NavSection>,
    actions: Vec<AdminAction>,
}

fn main() -> Result<()> {
    pb_common::init_logging("pb-roles");

    let args = Args::parse();

    let loader = match &args.config {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load().context("Failed to load configuration")?;
    let resolver =
        RoleResolver::from_config(&config.access).context("Invalid access configuration")?;
    info!("Role resolver ready");

    match args.command {
        Command::List => list(&resolver, args.json),
        Command::Map { role } => {
            let role: Role = role.parse()?;
            let backend = resolver.to_backend_role(role);
            print(args.json, &serde_json::json!({ "role": role, "backendRole": backend }), || {
                format!("{} -> {}", role, backend)
            })
        }
        Command::Check { role, resource, action } => {
            let role: Role = role.parse()?;
            let resource: Resource = resource.parse()?;
            let action: Action = action.parse()?;
            let allowed = resolver.registry().permits(role, resource, action);
            let verdict = if allowed { "allowed" } else { "denied" };
            print(
                args.json,
                &serde_json::json!({
                    "role": role,
                    "resource": resource,
                    "action": action,
                    "allowed": allowed
                }),
                || format!("{} {}:{} -> {}", role, resource, action, verdict),
            )
        }
        Command::Display { username, backend_role } => {
            let backend_role: BackendRole = backend_role.parse()?;
            let user = User::new("cli", username, "", backend_role);
            let role = resolver.to_display_role(&user);
            let label = resolver.display_label(&user);
            print(
                args.json,
                &serde_json::json!({ "username": user.username, "role": role, "label": label }),
                || format!("{} ({}) -> {} [{}]", user.username, backend_role, label, role),
            )
        }
        Command::Nav { role } => {
            let role: Role = role.parse()?;
            let ctx = SessionContext::with_registry("cli", "cli", role, resolver.registry());
            let summary = NavSummary {
                role,
                sections: visible_sections(&ctx),
                actions: enabled_actions(&ctx),
            };
            print(args.json, &summary, || {
                format!(
                    "{}\n  sections: {:?}\n  actions:  {:?}",
                    role, summary.sections, summary.actions
                )
            })
        }
    }
}

fn list(resolver: &RoleResolver, json: bool) -> Result<()> {
    let registry = resolver.registry();
    let summaries: Vec<RoleSummary<'_>> = registry
        .all_roles()
        .iter()
        .map(|role| {
            let info = registry.info_for(*role);
            RoleSummary {
                role: *role,
                label: info.label,
                description: info.description,
                category: info.category,
                backend_role: resolver.to_backend_role(*role),
                grants: registry.grants_for(*role),
            }
        })
        .collect();

    print(json, &summaries, || {
        summaries
            .iter()
            .map(|s| {
                let grants: Vec<String> = s
                    .grants
                    .iter()
                    .map(|g| {
                        let actions: Vec<&str> = g.actions.iter().map(|a| a.as_str()).collect();
                        format!("{}[{}]", g.resource, actions.join(","))
                    })
                    .collect();
                format!("{:<12} {:<22} {:<8} {}", s.role, s.label, s.backend_role, grants.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn print<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
