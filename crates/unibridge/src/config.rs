//! Settings resolution for the CLI: config file and `UNIFI_*` env vars
//! through `unibridge-config`, then command-line flags on top.

use std::path::PathBuf;

use unibridge_config::Settings;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(unibridge_config::config_path)
}

pub fn effective_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let mut settings = unibridge_config::load_settings(Some(config_file(global).as_path()))?;
    apply_overrides(&mut settings, global);
    Ok(settings)
}

fn apply_overrides(settings: &mut Settings, global: &GlobalOpts) {
    if let Some(url) = &global.base_url {
        settings.base_url = Some(url.clone());
    }
    if let Some(site) = &global.site {
        settings.site_id = Some(site.clone());
    }
    if let Some(key) = &global.api_key {
        settings.api_key = Some(key.clone());
    }
    if global.insecure {
        settings.insecure = true;
    }
    if let Some(secs) = global.timeout {
        settings.timeout_secs = secs;
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn flags_override_loaded_settings() {
        let cli = Cli::parse_from([
            "unibridge",
            "--base-url",
            "https://10.0.0.1/proxy/network",
            "--site",
            "branch",
            "-k",
            "--timeout",
            "5",
            "health",
        ]);
        let mut settings = Settings {
            base_url: Some("https://old".into()),
            site_id: Some("default".into()),
            ..Settings::default()
        };
        apply_overrides(&mut settings, &cli.global);

        assert_eq!(settings.base_url.as_deref(), Some("https://10.0.0.1/proxy/network"));
        assert_eq!(settings.site_id.as_deref(), Some("branch"));
        assert!(settings.insecure);
        assert_eq!(settings.timeout_secs, 5);
    }

    #[test]
    fn absent_flags_leave_settings_alone() {
        let cli = Cli::parse_from(["unibridge", "health"]);
        let original = Settings {
            site_id: Some("default".into()),
            insecure: true,
            ..Settings::default()
        };
        let mut settings = original.clone();
        apply_overrides(&mut settings, &cli.global);
        assert_eq!(settings, original);
    }
}
