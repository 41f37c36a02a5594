//! Configuration loader tests

use std::env;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use pb_config::{ConfigError, ConfigLoader};
use tempfile::NamedTempFile;

const ENV_VARS: &[&str] = &[
    "PULSEBOARD_CONFIG",
    "PULSEBOARD_DATA_DIR",
    "PULSEBOARD_CANONICAL_ADMIN",
    "PULSEBOARD_CANONICAL_MANAGER",
    "PULSEBOARD_CANONICAL_VIEWER",
];

/// Every loader run reads the process environment, so tests take this lock.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the env lock with all loader variables cleared; clears them again on drop.
struct EnvGuard {
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    fn acquire() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        clear_env();
        Self { _lock: lock }
    }

    fn set(&self, key: &str, value: &str) {
        env::set_var(key, value);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        clear_env();
    }
}

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", content).unwrap();
    file
}

fn canonical(config: &pb_config::AppConfig, backend: &str) -> Option<String> {
    config.access.canonical_roles.get(backend).cloned()
}

#[test]
fn test_load_from_explicit_path() {
    let _env = EnvGuard::acquire();
    let file = config_file(
        r#"
data_dir = "/var/lib/pulseboard"

[access.canonical_roles]
admin = "super_admin"
manager = "developer"
viewer = "guest"
"#,
    );

    let config = ConfigLoader::with_path(file.path()).load().unwrap();
    assert_eq!(config.data_dir, "/var/lib/pulseboard");
    assert_eq!(canonical(&config, "admin").as_deref(), Some("super_admin"));
    assert_eq!(canonical(&config, "manager").as_deref(), Some("developer"));
    assert_eq!(canonical(&config, "viewer").as_deref(), Some("guest"));
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let _env = EnvGuard::acquire();
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigLoader::with_path(dir.path().join("absent.toml")).load();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_malformed_file_is_a_parse_error() {
    let _env = EnvGuard::acquire();
    let file = config_file("[access");

    let result = ConfigLoader::with_path(file.path()).load();
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_empty_canonical_table_fails_validation() {
    let _env = EnvGuard::acquire();
    let file = config_file("[access.canonical_roles]");

    let result = ConfigLoader::with_path(file.path()).load();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_unknown_backend_role_key_fails_validation() {
    let _env = EnvGuard::acquire();
    let file = config_file(
        r#"
[access.canonical_roles]
admin = "admin"
owner = "admin"
"#,
    );

    let result = ConfigLoader::with_path(file.path()).load();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_env_overrides_canonical_roles() {
    let env = EnvGuard::acquire();
    let file = config_file(
        r#"
[access.canonical_roles]
admin = "admin"
manager = "manager"
viewer = "viewer"
"#,
    );
    env.set("PULSEBOARD_CANONICAL_MANAGER", "developer");
    env.set("PULSEBOARD_CANONICAL_VIEWER", "  guest ");

    let config = ConfigLoader::with_path(file.path()).load().unwrap();
    assert_eq!(canonical(&config, "admin").as_deref(), Some("admin"));
    assert_eq!(canonical(&config, "manager").as_deref(), Some("developer"));
    assert_eq!(canonical(&config, "viewer").as_deref(), Some("guest"));
}

#[test]
fn test_env_override_fills_missing_table_entry() {
    let env = EnvGuard::acquire();
    let file = config_file(
        r#"
[access.canonical_roles]
manager = "developer"
"#,
    );
    env.set("PULSEBOARD_CANONICAL_ADMIN", "super_admin");

    let config = ConfigLoader::with_path(file.path()).load().unwrap();
    assert_eq!(config.access.canonical_roles.len(), 2);
    assert_eq!(canonical(&config, "admin").as_deref(), Some("super_admin"));
}

#[test]
fn test_empty_canonical_env_var_is_an_error() {
    let env = EnvGuard::acquire();
    let file = config_file("data_dir = \"./data\"");
    env.set("PULSEBOARD_CANONICAL_ADMIN", "   ");

    let result = ConfigLoader::with_path(file.path()).load();
    match result {
        Err(ConfigError::EnvError(message)) => {
            assert!(message.contains("PULSEBOARD_CANONICAL_ADMIN"));
        }
        other => panic!("expected EnvError, got {:?}", other),
    }
}

#[test]
fn test_env_overrides_data_dir() {
    let env = EnvGuard::acquire();
    let file = config_file("data_dir = \"/from/file\"");
    env.set("PULSEBOARD_DATA_DIR", "/from/env");

    let config = ConfigLoader::with_path(file.path()).load().unwrap();
    assert_eq!(config.data_dir, "/from/env");
}

#[test]
fn test_config_path_from_env() {
    let env = EnvGuard::acquire();
    let file = config_file("data_dir = \"/via/env/path\"");
    env.set("PULSEBOARD_CONFIG", &file.path().to_string_lossy());

    let config = ConfigLoader::new().load().unwrap();
    assert_eq!(config.data_dir, "/via/env/path");
}

#[test]
fn test_missing_env_config_path_is_an_error() {
    let env = EnvGuard::acquire();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    env.set("PULSEBOARD_CONFIG", &missing.to_string_lossy());

    let result = ConfigLoader::new().load();
    assert!(matches!(result, Err(ConfigError::EnvError(_))));
}

#[test]
fn test_explicit_path_wins_over_env_path() {
    let env = EnvGuard::acquire();
    let file = config_file("data_dir = \"/explicit\"");
    let dir = tempfile::tempdir().unwrap();
    env.set("PULSEBOARD_CONFIG", &dir.path().join("absent.toml").to_string_lossy());

    let config = ConfigLoader::with_path(file.path()).load().unwrap();
    assert_eq!(config.data_dir, "/explicit");
}
