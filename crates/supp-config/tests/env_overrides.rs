use figment::Jail;
use supp_config::SuppConfig;

#[test]
fn env_enables_archive() {
    Jail::expect_with(|jail| {
        jail.set_env("SUPP_ARCHIVE__ENABLED", "true");
        jail.set_env("SUPP_ARCHIVE__BUCKET_NAME", "env-bucket");

        let config = SuppConfig::load().expect("config loads");
        assert!(config.archive.enabled);
        assert_eq!(config.archive.bucket_name, "env-bucket");
        Ok(())
    });
}

#[test]
fn env_sets_actor_identity() {
    Jail::expect_with(|jail| {
        jail.set_env("SUPP_ACTOR__DISPLAY_NAME", "Grace");
        jail.set_env("SUPP_ACTOR__EMAIL", "grace@example.com");

        let config = SuppConfig::load().expect("config loads");
        assert!(config.actor.is_configured());
        Ok(())
    });
}

#[test]
fn env_blank_policy_flag() {
    Jail::expect_with(|jail| {
        jail.set_env("SUPP_AUDIT__BLANK_AS_ABSENT", "true");

        let config = SuppConfig::load().expect("config loads");
        assert!(config.audit.blank_as_absent);
        Ok(())
    });
}

#[test]
fn load_accepts_incomplete_archive_section() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".supp")).map_err(|e| e.to_string())?;
        jail.create_file(
            ".supp/config.toml",
            r#"
[archive]
enabled = true
bucket_name = ""
"#,
        )?;

        let config = SuppConfig::load().expect("config loads");
        assert!(config.archive.enabled);
        assert!(!config.archive.is_configured());
        Ok(())
    });
}

#[test]
fn load_accepts_plain_http_endpoint_without_allow_http() {
    Jail::expect_with(|jail| {
        jail.set_env("SUPP_ARCHIVE__ENABLED", "true");
        jail.set_env("SUPP_ARCHIVE__ENDPOINT", "http://minio:9000");

        let config = SuppConfig::load().expect("config loads");
        assert!(config.archive.is_plain_http());
        assert!(!config.archive.allow_http);
        Ok(())
    });
}
