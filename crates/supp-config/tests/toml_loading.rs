//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use supp_config::SuppConfig;

#[test]
fn loads_archive_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[archive]
enabled = true
bucket_name = "audit-bucket"
region = "us-east-1"
endpoint = "http://localhost:9000"
access_key_id = "toml-key"
secret_access_key = "toml-secret"
allow_http = true
"#,
        )?;

        let config: SuppConfig = Figment::from(Serialized::defaults(SuppConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.archive.enabled);
        assert_eq!(config.archive.bucket_name, "audit-bucket");
        assert_eq!(config.archive.region, "us-east-1");
        assert_eq!(config.archive.endpoint_url(), Some("http://localhost:9000"));
        assert!(config.archive.has_static_credentials());
        assert!(config.archive.allow_http);
        Ok(())
    });
}

#[test]
fn loads_actor_and_audit_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[actor]
display_name = "Ada Lovelace"
email = "ada@example.com"

[audit]
blank_as_absent = true
log_json = true
"#,
        )?;

        let config: SuppConfig = Figment::from(Serialized::defaults(SuppConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        let identity = config.actor.identity().expect("actor configured");
        assert_eq!(identity.display_name, "Ada Lovelace");
        assert_eq!(identity.email, "ada@example.com");
        assert!(config.audit.blank_as_absent);
        assert!(config.audit.log_json);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[archive]
enabled = true
"#,
        )?;

        let config: SuppConfig = Figment::from(Serialized::defaults(SuppConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.archive.enabled);
        assert_eq!(config.archive.bucket_name, "suppression-audit-logs");
        assert_eq!(config.archive.region, "eu-central-1");
        assert_eq!(config.database.path, ".supp/suppressions.db");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[archive]
bucket_name = "from-toml"
"#,
        )?;
        jail.set_env("SUPP_ARCHIVE__BUCKET_NAME", "from-env");

        let config: SuppConfig = Figment::from(Serialized::defaults(SuppConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("SUPP_").split("__"))
            .extract()?;

        assert_eq!(config.archive.bucket_name, "from-env");
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".supp")).map_err(|e| e.to_string())?;
        jail.create_file(
            ".supp/config.toml",
            r#"
[database]
path = "local.db"
"#,
        )?;

        let config: SuppConfig = SuppConfig::figment().extract()?;
        assert_eq!(config.database.path, "local.db");
        Ok(())
    });
}
