use std::io::{self, BufRead};

use secrecy::SecretString;

use unibridge_config::{ConfigError, Settings};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

fn settings_detail(s: &Settings) -> Vec<(&'static str, String)> {
    vec![
        ("Base URL", output::opt(s.base_url.as_deref())),
        ("Site", output::opt(s.site_id.as_deref())),
        ("API key", output::opt(s.api_key.as_deref())),
        ("API key env", output::opt(s.api_key_env.as_deref())),
        ("Insecure", output::flag(s.insecure, false)),
        (
            "CA cert",
            output::opt(s.ca_cert.as_ref().map(|p| p.display().to_string())),
        ),
        ("Timeout (s)", s.timeout_secs.to_string()),
        ("Max response bytes", s.max_response_bytes.to_string()),
    ]
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_file(global);

    match args.command {
        ConfigCommand::Path => output::print_output(&path.display().to_string(), global.quiet),

        ConfigCommand::Show => {
            let mut settings = config::effective_settings(global)?;
            if settings.api_key.is_some() {
                settings.api_key = Some(REDACTED.into());
            }
            let out = output::render_single(global.output, &settings, settings_detail, |s| {
                output::opt(s.base_url.as_deref())
            })?;
            output::print_output(&out, global.quiet);
        }

        ConfigCommand::Init { api_key_env, force } => {
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            let settings = Settings {
                base_url: Some(required(global.base_url.as_deref(), "base_url", "--base-url")?),
                site_id: Some(required(global.site.as_deref(), "site_id", "--site")?),
                api_key_env,
                insecure: global.insecure,
                ..Settings::default()
            };
            // Reject a bad URL or site before writing anything. Credentials
            // are not required yet.
            match settings.to_client_config() {
                Ok(_) | Err(ConfigError::NoCredentials { .. }) => {}
                Err(err) => return Err(err.into()),
            }
            unibridge_config::save_settings(&path, &settings)?;
            output::print_output(&format!("Wrote {}", path.display()), global.quiet);
        }

        ConfigCommand::SetKey => {
            let settings = config::effective_settings(global)?;
            let site = settings.site()?.to_owned();
            let key = read_key(io::stdin().lock())?;
            unibridge_config::store_api_key(&site, &key)?;
            output::print_output(&format!("Stored API key for site '{site}'"), global.quiet);
        }
    }
    Ok(())
}

fn required(value: Option<&str>, field: &str, flag: &str) -> Result<String, CliError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| CliError::Validation {
            field: field.into(),
            reason: format!("{flag} is required"),
        })
}

/// First non-empty line of `input`, trimmed.
fn read_key(input: impl BufRead) -> Result<SecretString, CliError> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(SecretString::from(trimmed.to_owned()));
        }
    }
    Err(CliError::Validation {
        field: "api_key".into(),
        reason: "no key on stdin".into(),
    })
}
