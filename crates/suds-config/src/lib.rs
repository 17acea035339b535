//! Configuration module for the suds back-office system.
//!
//! Loads configuration from TOML, resolves `${ENV_VAR}` placeholders (with
//! optional `${VAR:-default}` fallbacks) so the spreadsheet auth token never
//! has to live in the file, and validates that required values are set
//! before any remote call is attempted.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use suds_retry::RetryPolicy;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the back-office core.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// The spreadsheet acting as the shared store.
	pub spreadsheet: SpreadsheetConfig,
	/// Retry budget for remote operations.
	#[serde(default)]
	pub retry: RetryConfig,
	/// Date handling.
	#[serde(default)]
	pub dates: DateConfig,
}

/// Configuration for the remote spreadsheet endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpreadsheetConfig {
	/// Base URL of the Sheets-style API.
	#[serde(default = "default_base_url")]
	pub base_url: String,
	/// Identifier of the shared spreadsheet.
	pub spreadsheet_id: String,
	/// Opaque bearer token, normally injected via `${...}` placeholder.
	pub token: String,
	/// Per-request timeout in seconds. Applies to each individual transport
	/// call, not across a whole retry loop.
	#[serde(default = "default_timeout_seconds")]
	pub timeout_seconds: u64,
}

fn default_base_url() -> String {
	"https://sheets.googleapis.com".to_string()
}

/// Returns the default per-request timeout in seconds.
fn default_timeout_seconds() -> u64 {
	30
}

impl SpreadsheetConfig {
	/// The per-request timeout as a duration.
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_seconds)
	}
}

/// Retry budget configuration, mirroring [`RetryPolicy`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
	#[serde(default = "default_attempts")]
	pub attempts: u32,
	#[serde(default = "default_initial_delay_ms")]
	pub initial_delay_ms: u64,
	#[serde(default = "default_max_delay_ms")]
	pub max_delay_ms: u64,
	#[serde(default = "default_backoff_factor")]
	pub backoff_factor: f64,
}

fn default_attempts() -> u32 {
	3
}

fn default_initial_delay_ms() -> u64 {
	1000
}

fn default_max_delay_ms() -> u64 {
	5000
}

fn default_backoff_factor() -> f64 {
	2.0
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			attempts: default_attempts(),
			initial_delay_ms: default_initial_delay_ms(),
			max_delay_ms: default_max_delay_ms(),
			backoff_factor: default_backoff_factor(),
		}
	}
}

impl RetryConfig {
	/// Builds the executor policy from this configuration.
	pub fn policy(&self) -> RetryPolicy {
		RetryPolicy {
			attempts: self.attempts,
			initial_delay: Duration::from_millis(self.initial_delay_ms),
			max_delay: Duration::from_millis(self.max_delay_ms),
			backoff_factor: self.backoff_factor,
		}
	}
}

/// Date format configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DateConfig {
	/// chrono format string for order and due dates.
	#[serde(default = "default_date_format")]
	pub format: String,
}

fn default_date_format() -> String {
	suds_query::DEFAULT_DATE_FORMAT.to_string()
}

impl Default for DateConfig {
	fn default() -> Self {
		Self {
			format: default_date_format(),
		}
	}
}

impl Config {
	/// Loads and validates configuration from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		content.parse()
	}

	/// Validates the configuration values.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.spreadsheet.spreadsheet_id.trim().is_empty() {
			return Err(ConfigError::Validation(
				"spreadsheet.spreadsheet_id must not be empty".into(),
			));
		}
		if self.spreadsheet.token.trim().is_empty() {
			return Err(ConfigError::Validation(
				"spreadsheet.token must not be empty".into(),
			));
		}
		if self.spreadsheet.timeout_seconds == 0 {
			return Err(ConfigError::Validation(
				"spreadsheet.timeout_seconds must be at least 1".into(),
			));
		}
		if self.retry.attempts == 0 {
			return Err(ConfigError::Validation(
				"retry.attempts must be at least 1".into(),
			));
		}
		if self.retry.backoff_factor < 1.0 {
			return Err(ConfigError::Validation(
				"retry.backoff_factor must be at least 1.0".into(),
			));
		}
		if self.retry.max_delay_ms < self.retry.initial_delay_ms {
			return Err(ConfigError::Validation(
				"retry.max_delay_ms must not be below retry.initial_delay_ms".into(),
			));
		}
		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

/// Resolves `${VAR}` and `${VAR:-default}` placeholders against the process
/// environment. A placeholder without a default for an unset variable is a
/// validation error.
fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).map(|m| m.as_str()).unwrap_or_default();
		let var_name = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				}
			},
		};
		result = result.replace(full_match, &value);
	}
	Ok(result)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn minimal_toml() -> &'static str {
		r#"
[spreadsheet]
spreadsheet_id = "sheet-1"
token = "secret"
"#
	}

	#[test]
	fn minimal_config_uses_defaults() {
		let config: Config = minimal_toml().parse().unwrap();
		assert_eq!(config.spreadsheet.base_url, "https://sheets.googleapis.com");
		assert_eq!(config.spreadsheet.timeout_seconds, 30);
		assert_eq!(config.retry.attempts, 3);
		assert_eq!(config.retry.initial_delay_ms, 1000);
		assert_eq!(config.retry.max_delay_ms, 5000);
		assert_eq!(config.dates.format, "%Y-%m-%d");
	}

	#[test]
	fn retry_config_converts_to_policy() {
		let config: Config = minimal_toml().parse().unwrap();
		let policy = config.retry.policy();
		assert_eq!(policy, RetryPolicy::default());
	}

	#[test]
	fn env_placeholders_are_resolved() {
		std::env::set_var("SUDS_TEST_TOKEN", "from-env");
		let toml = r#"
[spreadsheet]
spreadsheet_id = "sheet-1"
token = "${SUDS_TEST_TOKEN}"
"#;
		let config: Config = toml.parse().unwrap();
		assert_eq!(config.spreadsheet.token, "from-env");
	}

	#[test]
	fn missing_env_var_without_default_fails() {
		let toml = r#"
[spreadsheet]
spreadsheet_id = "sheet-1"
token = "${SUDS_DEFINITELY_UNSET_VAR}"
"#;
		let result: Result<Config, _> = toml.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn env_default_fallback_applies() {
		let toml = r#"
[spreadsheet]
spreadsheet_id = "sheet-1"
token = "${SUDS_OTHER_UNSET_VAR:-fallback}"
"#;
		let config: Config = toml.parse().unwrap();
		assert_eq!(config.spreadsheet.token, "fallback");
	}

	#[test]
	fn validation_rejects_zero_attempts() {
		let toml = r#"
[spreadsheet]
spreadsheet_id = "sheet-1"
token = "secret"

[retry]
attempts = 0
"#;
		let result: Result<Config, _> = toml.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn validation_rejects_empty_spreadsheet_id() {
		let toml = r#"
[spreadsheet]
spreadsheet_id = ""
token = "secret"
"#;
		let result: Result<Config, _> = toml.parse();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(minimal_toml().as_bytes()).unwrap();
		let config = Config::from_file(file.path()).unwrap();
		assert_eq!(config.spreadsheet.spreadsheet_id, "sheet-1");
	}
}
