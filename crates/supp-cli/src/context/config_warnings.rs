use supp_config::SuppConfig;

/// Emit warnings for settings that silently fell back to defaults.
pub fn warn_unconfigured(config: &SuppConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &SuppConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.actor.is_configured() {
        if has_env_prefix(&env_keys, "SUPP_ACTOR") {
            warnings.push(
                "Actor config appears default while SUPP_ACTOR* env vars exist. Use double underscores (example: SUPP_ACTOR__EMAIL)."
                    .to_string(),
            );
        } else {
            warnings.push(
                "No actor configured; create, update and delete will be refused. Set actor.display_name and actor.email."
                    .to_string(),
            );
        }
    }

    if !config.archive.enabled && has_env_prefix(&env_keys, "SUPP_ARCHIVE") {
        warnings.push(
            "Archive is disabled while SUPP_ARCHIVE* env vars exist. Set SUPP_ARCHIVE__ENABLED=true to archive audit entries."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
