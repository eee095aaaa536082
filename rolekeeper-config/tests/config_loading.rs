use std::{collections::HashMap, fs, path::Path};

use anyhow::Result;
use rolekeeper_config::{
    ConfigFormat, ConfigSource, LoggingConfig, RolekeeperConfig, SeedConfig,
    init_tracing,
};
use rolekeeper_core::{DashboardIntent, IntentOutcome, MissingIdPolicy};
use rolekeeper_model::{NewUser, PermissionType, UserId, UserStatus};
use tempfile::tempdir;

const SMALL_TOML: &str = r#"
permissions = ["read", "update"]

[policy]
validation = "strict"
missing_ids = "report"

[logging]
filter = "rolekeeper_core=debug"

[[seed.roles]]
id = 7
name = "auditor"
description = "Reads logs"
permissions = ["read"]

[[seed.users]]
id = 40
name = "Ada"
email = "ada@example.com"
role = "auditor"
status = "active"
"#;

fn vars(pairs: &[(&str, String)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn nothing_set_yields_defaults() -> Result<()> {
    let dir = tempdir()?;
    let (config, source) = RolekeeperConfig::load_with(vars(&[]), dir.path())?;

    assert_eq!(source, ConfigSource::Default);
    assert_eq!(config, RolekeeperConfig::default());
    Ok(())
}

#[test]
fn env_path_wins_over_inline_and_default_files() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("custom.toml");
    fs::write(&path, SMALL_TOML)?;
    fs::write(dir.path().join("rolekeeper.json"), "{}")?;

    let lookup = vars(&[
        ("ROLEKEEPER_CONFIG_PATH", path.display().to_string()),
        ("ROLEKEEPER_CONFIG_JSON", r#"{ "permissions": [] }"#.to_string()),
    ]);
    let (config, source) = RolekeeperConfig::load_with(lookup, dir.path())?;

    assert_eq!(source, ConfigSource::EnvPath(path));
    assert_eq!(
        config.permissions,
        vec![PermissionType::Read, PermissionType::Update]
    );
    assert_eq!(config.policy.missing_ids, MissingIdPolicy::Report);
    assert_eq!(config.logging.filter, "rolekeeper_core=debug");
    assert_eq!(config.seed.users[0].id, UserId(40));
    Ok(())
}

#[test]
fn inline_json_is_used_when_no_path() -> Result<()> {
    let dir = tempdir()?;
    let lookup = vars(&[
        ("ROLEKEEPER_CONFIG_PATH", "   ".to_string()),
        (
            "ROLEKEEPER_CONFIG_JSON",
            r#"{ "seed": { "users": [] } }"#.to_string(),
        ),
    ]);

    let (config, source) = RolekeeperConfig::load_with(lookup, dir.path())?;
    assert_eq!(source, ConfigSource::EnvInline);
    assert!(config.seed.users.is_empty());
    assert_eq!(config.seed.roles.len(), 3);
    Ok(())
}

#[test]
fn bad_inline_json_names_the_variable() -> Result<()> {
    let dir = tempdir()?;
    let lookup =
        vars(&[("ROLEKEEPER_CONFIG_JSON", "{ not json".to_string())]);

    let err = RolekeeperConfig::load_with(lookup, dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("ROLEKEEPER_CONFIG_JSON"));
    Ok(())
}

#[test]
fn default_file_in_config_dir_is_found() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("config"))?;
    let path = dir.path().join("config/rolekeeper.toml");
    fs::write(&path, "[logging]\nansi = false\n")?;

    let (config, source) = RolekeeperConfig::load_with(vars(&[]), dir.path())?;
    assert_eq!(source, ConfigSource::File(path));
    assert!(!config.logging.ansi);
    Ok(())
}

#[test]
fn extensionless_file_accepts_either_format() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("rolekeeper.conf");
    fs::write(&path, r#"{ "policy": { "role_references": "enforced" } }"#)?;

    let config = RolekeeperConfig::load_from_file(&path)?;
    assert!(config.policy.enforces_role_references());
    Ok(())
}

#[test]
fn missing_file_reports_path() {
    let err = RolekeeperConfig::load_from_file(Path::new(
        "/definitely/not/here/rolekeeper.toml",
    ))
    .unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here"));
}

#[test]
fn rendered_config_loads_back() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("rolekeeper.toml");
    let mut config = RolekeeperConfig::default();
    config.seed = SeedConfig::empty();
    config.logging.ansi = false;
    fs::write(&path, config.to_toml_string()?)?;

    assert_eq!(RolekeeperConfig::load_from_file(&path)?, config);
    Ok(())
}

#[test]
fn configured_dashboard_uses_seed_and_policy() -> Result<()> {
    let config = RolekeeperConfig::parse(SMALL_TOML, ConfigFormat::Toml)?;
    assert!(config.validate()?.is_empty());

    let mut dashboard = config.build_dashboard()?;
    assert_eq!(dashboard.users().len(), 1);
    assert_eq!(dashboard.roles()[0].name, "auditor");

    let IntentOutcome::UserAdded(user) = dashboard.apply(
        DashboardIntent::AddUser(NewUser::new(
            "Lin",
            "lin@example.com",
            "auditor",
            UserStatus::Inactive,
        )),
    )?
    else {
        panic!("add should report the new user");
    };
    assert_eq!(user.id, UserId(41));

    // missing_ids = "report"
    let err = dashboard
        .apply(DashboardIntent::DeleteUser(UserId(999)))
        .unwrap_err();
    assert!(err.is_not_found());

    // Strict validation rejects blank names
    assert!(
        dashboard
            .apply(DashboardIntent::AddUser(NewUser::new(
                " ",
                "x@example.com",
                "auditor",
                UserStatus::Active,
            )))
            .is_err()
    );
    Ok(())
}

#[test]
fn seed_outside_universe_fails_to_build() {
    let config = RolekeeperConfig {
        permissions: vec![PermissionType::Read],
        ..RolekeeperConfig::default()
    };

    assert!(config.validate().is_err());
    let err = config.build_dashboard().unwrap_err();
    assert!(format!("{err:#}").contains("failed to seed entity store"));
}

#[test]
fn tracing_init_is_repeatable() -> Result<()> {
    let logging = LoggingConfig {
        ansi: false,
        ..LoggingConfig::default()
    };

    init_tracing(&logging)?;
    assert!(!init_tracing(&logging)?);
    Ok(())
}
