//! Configuration management for Navguard Core

use anyhow::{Context, Result};
use std::env;

/// Elevated role name issued by the backend for its top-level administrators.
pub const DEFAULT_ELEVATED_ROLE: &str = "SuperAdmin";

/// Label of the navigation entry that leads to the administration area.
pub const DEFAULT_ADMIN_PANEL_LABEL: &str = "Admin Panel";

/// Environment variable the CLI reads the session token from by default.
pub const DEFAULT_TOKEN_VAR: &str = "NAVGUARD_TOKEN";

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Admin detection settings
    pub policy: PolicyConfig,
    /// Menu filtering settings
    pub navigation: NavigationConfig,
    /// Session token handling
    pub session: SessionConfig,
    /// Logging configuration
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Exact (case-sensitive) role value that always means "administrator"
    pub elevated_role: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            elevated_role: DEFAULT_ELEVATED_ROLE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationConfig {
    /// Sentinel label that triggers the admin panel visibility rule
    pub admin_panel_label: String,
    /// Default menu description file used by the CLI
    pub menu_path: Option<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            admin_panel_label: DEFAULT_ADMIN_PANEL_LABEL.to_string(),
            menu_path: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Treat tokens whose `exp` lies in the past as undecodable
    pub reject_expired: bool,
    /// Environment variable holding the session token
    pub token_var: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reject_expired: false,
            token_var: DEFAULT_TOKEN_VAR.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Log output format: "text" or "json"
    pub log_format: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        if log_format != "text" && log_format != "json" {
            anyhow::bail!("Invalid LOG_FORMAT: expected \"text\" or \"json\", got {log_format:?}");
        }

        Ok(Self {
            policy: PolicyConfig {
                elevated_role: non_empty_var("NAVGUARD_ELEVATED_ROLE")
                    .unwrap_or_else(|| DEFAULT_ELEVATED_ROLE.to_string()),
            },
            navigation: NavigationConfig {
                admin_panel_label: non_empty_var("NAVGUARD_ADMIN_PANEL_LABEL")
                    .unwrap_or_else(|| DEFAULT_ADMIN_PANEL_LABEL.to_string()),
                menu_path: non_empty_var("NAVGUARD_MENU_PATH"),
            },
            session: SessionConfig {
                reject_expired: env::var("NAVGUARD_REJECT_EXPIRED")
                    .map(|s| parse_bool(&s))
                    .unwrap_or(Ok(false))
                    .context("Invalid NAVGUARD_REJECT_EXPIRED")?,
                token_var: non_empty_var("NAVGUARD_TOKEN_VAR")
                    .unwrap_or_else(|| DEFAULT_TOKEN_VAR.to_string()),
            },
            telemetry: TelemetryConfig { log_format },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other:?}"),
    }
}
