//! ---
//! seva_section: "01-core-functionality"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Shared configuration and tracing setup."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use seva_identity::{Account, PasswordPolicy, Role};
use seva_portal::{ResourceKind, ResourceStatus};
use tracing::debug;

use crate::logging::LogFormat;

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_auth_latency() -> Duration {
    Duration::from_millis(800)
}

fn default_provisioned_accounts() -> Vec<AccountSeed> {
    vec![
        AccountSeed {
            display_name: "Admin User".to_owned(),
            email: "admin@test.com".to_owned(),
            password: "password".to_owned(),
            role: Role::Admin,
        },
        AccountSeed {
            display_name: "Staff User".to_owned(),
            email: "staff@test.com".to_owned(),
            password: "password".to_owned(),
            role: Role::Staff,
        },
    ]
}

/// Primary configuration object for portal binaries.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub resources: Vec<ResourceSeed>,
}

/// Metadata describing where a [`PortalConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedPortalConfig {
    pub config: PortalConfig,
    /// `None` when built-in defaults were used.
    pub source: Option<PathBuf>,
}

impl PortalConfig {
    pub const ENV_CONFIG_PATH: &'static str = "SEVA_CONFIG";

    /// Load configuration, respecting the `SEVA_CONFIG` override and falling back to defaults.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    ///
    /// An explicit `SEVA_CONFIG` path must exist. Candidates are optional;
    /// when none exists the built-in defaults are returned.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedPortalConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedPortalConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedPortalConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(LoadedPortalConfig {
            config: Self::default(),
            source: None,
        })
    }

    /// Read and validate a configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<PortalConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()?;
        for resource in &self.resources {
            if resource.name.trim().is_empty() {
                return Err(anyhow!("resource names cannot be empty"));
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for PortalConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: PortalConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for daily rolling log files. No file output when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            format: default_log_format(),
            file_prefix: None,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Pause applied by interactive front ends before reporting an auth result.
    #[serde(default = "default_auth_latency", rename = "auth_latency_ms")]
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub auth_latency: Duration,
    #[serde(default)]
    pub password_policy: PasswordPolicy,
    #[serde(default = "default_provisioned_accounts")]
    pub accounts: Vec<AccountSeed>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            auth_latency: default_auth_latency(),
            password_policy: PasswordPolicy::default(),
            accounts: default_provisioned_accounts(),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for seed in &self.accounts {
            if seed.email.trim().is_empty() {
                return Err(anyhow!("provisioned account emails cannot be empty"));
            }
            if !seen.insert(seed.email.to_lowercase()) {
                return Err(anyhow!("duplicate provisioned account {}", seed.email));
            }
        }
        Ok(())
    }
}

/// Account created at start-up, outside the self-registration path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSeed {
    pub display_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl AccountSeed {
    pub fn to_account(&self) -> Account {
        Account::new(&self.display_name, &self.email, &self.password, self.role)
    }
}

/// Inventory entry created at start-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSeed {
    pub name: String,
    pub kind: ResourceKind,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub status: ResourceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_provision_admin_and_staff() {
        let config = PortalConfig::default();
        let roles: Vec<_> = config.auth.accounts.iter().map(|a| a.role).collect();
        assert_eq!(roles, vec![Role::Admin, Role::Staff]);
        assert_eq!(config.auth.auth_latency, Duration::from_millis(800));
        assert!(config.resources.is_empty());
    }

    #[test]
    fn parses_full_document() {
        let config: PortalConfig = r#"
            [logging]
            format = "structured-json"

            [auth]
            auth_latency_ms = 0

            [auth.password_policy]
            require_digit = false

            [[auth.accounts]]
            display_name = "Coordinator"
            email = "coord@seva.org"
            password = "Coord1"
            role = "Staff"

            [[resources]]
            name = "Community Van"
            kind = "Vehicle"
            capacity = 8
        "#
        .parse()
        .unwrap();
        assert_eq!(config.logging.format, LogFormat::StructuredJson);
        assert_eq!(config.auth.auth_latency, Duration::ZERO);
        assert!(!config.auth.password_policy.require_digit);
        assert!(config.auth.password_policy.require_uppercase);
        assert_eq!(config.auth.accounts.len(), 1);
        assert_eq!(config.resources[0].status, ResourceStatus::Available);
    }

    #[test]
    fn rejects_duplicate_accounts_ignoring_case() {
        let result: Result<PortalConfig> = r#"
            [[auth.accounts]]
            display_name = "A"
            email = "a@seva.org"
            password = "x"
            role = "Admin"

            [[auth.accounts]]
            display_name = "B"
            email = "A@SEVA.org"
            password = "y"
            role = "User"
        "#
        .parse();
        assert!(result.is_err());
    }

    #[test]
    fn policy_table_defaults_to_strict() {
        let config: PortalConfig = "[auth]\nauth_latency_ms = 0\n".parse().unwrap();
        assert_eq!(config.auth.password_policy, PasswordPolicy::default());
    }

    #[test]
    fn missing_candidates_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded =
            PortalConfig::load_with_source(&[dir.path().join("absent.toml")]).unwrap();
        assert!(loaded.source.is_none());
        assert_eq!(loaded.config.auth.accounts.len(), 2);
    }

    #[test]
    fn loads_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seva.toml");
        fs::write(&path, "[auth]\nauth_latency_ms = 250\n").unwrap();
        let loaded = PortalConfig::load_with_source(&[dir.path().join("absent.toml"), path.clone()])
            .unwrap();
        assert_eq!(loaded.source, Some(path));
        assert_eq!(loaded.config.auth.auth_latency, Duration::from_millis(250));
    }
}
