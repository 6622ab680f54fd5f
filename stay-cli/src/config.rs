//! Configuration resolution from CLI args, environment and settings files

use crate::cli::Args;
use crate::error::CliError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use stay_http_client::{Credentials, DEFAULT_BASE_URL, Role, RoleCredentials};
use tracing::{debug, info};
use zeroize::Zeroizing;

pub const BASE_URI_KEY: &str = "API_BASE_URI";

/// Settings keys holding the username and password of a role
fn credential_keys(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Admin => ("ADMIN_USERNAME", "ADMIN_PASSWORD"),
        Role::User => ("USER_USERNAME", "USER_PASSWORD"),
    }
}

/// Key/value pairs from an `appsettings-<env>.properties` file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// File name for an environment; names are case-insensitive
    pub fn file_name(environment: &str) -> String {
        format!("appsettings-{}.properties", environment.to_lowercase())
    }

    /// Parse `KEY=VALUE` (or `KEY: VALUE`) lines; `#` and `!` start comments
    pub fn parse(text: &str) -> Self {
        let values = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
            .filter_map(|line| {
                let split = line.find(['=', ':'])?;
                let key = line[..split].trim();
                let value = line[split + 1..].trim();
                (!key.is_empty()).then(|| (key.to_string(), value.to_string()))
            })
            .collect();
        Self { values }
    }

    /// Load the settings file for `environment` from `dir`
    ///
    /// A missing file yields empty settings, so the environment alone can
    /// configure a run.
    pub fn load(dir: &Path, environment: &str) -> Result<Self, CliError> {
        let path = dir.join(Self::file_name(environment));
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                info!(path = %path.display(), "loaded settings");
                Ok(Self::parse(&text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file");
                Ok(Self::default())
            }
            Err(source) => Err(CliError::Settings { path, source }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Lookup chain: process environment first, then the settings file
pub struct Lookup<'a> {
    settings: &'a Settings,
    env: &'a dyn Fn(&str) -> Option<String>,
}

impl<'a> Lookup<'a> {
    pub fn new(settings: &'a Settings, env: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self { settings, env }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        (self.env)(key)
            .filter(|value| !value.is_empty())
            .or_else(|| self.settings.get(key).map(str::to_string))
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// API base URL
    pub base_url: String,
    /// Credentials per role
    pub credentials: RoleCredentials,
    /// Per-request timeout
    pub timeout: Duration,
    /// Settings file that was consulted
    pub settings_path: PathBuf,
}

impl Config {
    /// Build config from CLI args, the process environment and the settings file
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        let settings = Settings::load(&args.settings_dir, &args.environment)?;
        let env = |key: &str| std::env::var(key).ok();
        Self::resolve(args, &settings, &env, &prompt_password)
    }

    /// Resolve config from explicit sources
    pub fn resolve(
        args: &Args,
        settings: &Settings,
        env: &dyn Fn(&str) -> Option<String>,
        prompt: &dyn Fn(&str) -> Result<Zeroizing<String>, CliError>,
    ) -> Result<Self, CliError> {
        let lookup = Lookup::new(settings, env);

        let base_url = args
            .base_url
            .clone()
            .unwrap_or_else(|| lookup.get_or(BASE_URI_KEY, DEFAULT_BASE_URL));

        let mut credentials = RoleCredentials::new();
        for role in [Role::Admin, Role::User] {
            let username = match role {
                Role::Admin => args.admin_username.clone(),
                Role::User => None,
            };
            if let Some(creds) = resolve_role(role, username, &lookup, prompt)? {
                credentials = credentials.with(role, creds);
            }
        }

        Ok(Config {
            base_url,
            credentials,
            timeout: Duration::from_secs(args.timeout_secs),
            settings_path: args.settings_dir.join(Settings::file_name(&args.environment)),
        })
    }
}

/// Credentials for one role; prompts when a username has no password
fn resolve_role(
    role: Role,
    username: Option<String>,
    lookup: &Lookup<'_>,
    prompt: &dyn Fn(&str) -> Result<Zeroizing<String>, CliError>,
) -> Result<Option<Credentials>, CliError> {
    let (username_key, password_key) = credential_keys(role);
    let Some(username) = username.or_else(|| lookup.get(username_key)) else {
        debug!(%role, "no username configured");
        return Ok(None);
    };

    let password = match lookup.get(password_key) {
        Some(password) => Zeroizing::new(password),
        None => prompt(&format!("{} password for '{}': ", role, username))?,
    };
    Ok(Some(Credentials::new(username, password.as_str())))
}

/// Prompt for a password without echo
fn prompt_password(message: &str) -> Result<Zeroizing<String>, CliError> {
    let password = rpassword::prompt_password(message)
        .map_err(|e| CliError::Config(format!("Failed to read password: {}", e)))?;
    if password.is_empty() {
        return Err(CliError::Config("Password is required.".to_string()));
    }
    Ok(Zeroizing::new(password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use proptest::prelude::*;
    use std::cell::Cell;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["stay-check", "--env", "qa"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn no_prompt(message: &str) -> Result<Zeroizing<String>, CliError> {
        panic!("unexpected prompt: {}", message)
    }

    #[test]
    fn test_parse_properties_format() {
        let settings = Settings::parse(
            "# comment\n! also a comment\nAPI_BASE_URI = http://localhost:8080\n\nADMIN_USERNAME:admin\nbroken line\n",
        );

        assert_eq!(settings.get(BASE_URI_KEY), Some("http://localhost:8080"));
        assert_eq!(settings.get("ADMIN_USERNAME"), Some("admin"));
        assert_eq!(settings.get("broken line"), None);
    }

    #[test]
    fn test_missing_settings_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path(), "staging").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_file_selected_by_environment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("appsettings-qa.properties"),
            "API_BASE_URI=http://qa.local\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path(), "QA").unwrap();
        assert_eq!(settings.get(BASE_URI_KEY), Some("http://qa.local"));
    }

    #[test]
    fn test_environment_overrides_settings_file() {
        let settings = Settings::parse("API_BASE_URI=http://file.local\nADMIN_USERNAME=file-admin\nADMIN_PASSWORD=file-pass\n");
        let env = |key: &str| (key == BASE_URI_KEY).then(|| "http://env.local".to_string());

        let config = Config::resolve(&args(&[]), &settings, &env, &no_prompt).unwrap();
        assert_eq!(config.base_url, "http://env.local");

        let admin = config.credentials.get(Role::Admin).unwrap();
        assert_eq!(admin.username(), "file-admin");
        assert!(config.credentials.get(Role::User).is_none());
    }

    #[test]
    fn test_flags_override_everything() {
        let settings = Settings::parse("API_BASE_URI=http://file.local\nADMIN_PASSWORD=pw\n");
        let env = |key: &str| (key == BASE_URI_KEY).then(|| "http://env.local".to_string());

        let config = Config::resolve(
            &args(&["--base-url", "http://flag.local", "--admin-username", "root"]),
            &settings,
            &env,
            &no_prompt,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://flag.local");
        assert_eq!(config.credentials.get(Role::Admin).unwrap().username(), "root");
    }

    #[test]
    fn test_defaults_without_any_source() {
        let config = Config::resolve(&args(&[]), &Settings::default(), &no_env, &no_prompt).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.credentials.get(Role::Admin).is_none());
        assert!(config.settings_path.ends_with("appsettings-qa.properties"));
    }

    #[test]
    fn test_prompts_only_when_password_missing() {
        let settings = Settings::parse("ADMIN_USERNAME=admin\nUSER_USERNAME=guest\nUSER_PASSWORD=pw\n");
        let prompts = Cell::new(0);
        let prompt = |message: &str| {
            assert!(message.contains("ADMIN"));
            prompts.set(prompts.get() + 1);
            Ok::<_, CliError>(Zeroizing::new("typed".to_string()))
        };

        let config = Config::resolve(&args(&[]), &settings, &no_env, &prompt).unwrap();
        assert_eq!(prompts.get(), 1);
        assert!(config.credentials.get(Role::Admin).is_some());
        assert_eq!(config.credentials.get(Role::User).unwrap().username(), "guest");
    }

    #[test]
    fn test_prompt_failure_is_reported() {
        let settings = Settings::parse("ADMIN_USERNAME=admin\n");
        let prompt = |_: &str| Err::<Zeroizing<String>, _>(CliError::Config("no tty".to_string()));

        let result = Config::resolve(&args(&[]), &settings, &no_env, &prompt);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_parsed_pairs_are_trimmed(key in "[A-Z_]{1,12}", value in "[a-z0-9:/.]{0,20}") {
            let settings = Settings::parse(&format!("  {} =  {}  \n", key, value));
            prop_assert_eq!(settings.get(&key), Some(value.as_str()));
        }
    }
}
