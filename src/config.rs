use anyhow::Result;
use clap::Parser;
use regex::{Captures, Regex};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("valid regex")
});

#[derive(Parser, Debug)]
#[command(name = "bookmarks")]
#[command(about = "Runs the bookmarks service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookmarks")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct App {
    database: String,
    port: u16,
    #[serde(default)]
    pub turso_url: Option<String>,
    #[serde(default)]
    pub turso_auth_token: Option<String>,
    #[serde(default = "default_sync_interval")]
    pub sync_interval_seconds: u64,
}

fn default_sync_interval() -> u64 {
    60
}

impl App {
    pub fn get_db(&self) -> &str {
        &self.database
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    /// Remote primary and token, when the store runs as an embedded replica.
    pub fn replica(&self) -> Option<(&str, &str)> {
        match (&self.turso_url, &self.turso_auth_token) {
            (Some(url), Some(token)) if !url.is_empty() && !token.is_empty() => {
                Some((url.as_str(), token.as_str()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub app: App,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let yaml_str = fs::read_to_string(path)?;
        Config::from_yaml(&yaml_str)
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str);
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    /// Expands `${VAR}` and `${VAR:-default}`. Anything else that merely
    /// looks like a placeholder is left as written.
    fn substitute_env_vars(yaml_str: &str) -> String {
        ENV_VAR_RE
            .replace_all(yaml_str, |caps: &Captures| {
                let name = &caps[1];
                match (env::var(name), caps.get(2)) {
                    (Ok(value), _) => value,
                    (Err(_), Some(default)) => default.as_str().to_string(),
                    (Err(_), None) => {
                        tracing::warn!(variable = %name, "environment variable not found");
                        String::new()
                    }
                }
            })
            .into_owned()
    }
}
