//! Configuration for the security oracle CLI.
//!
//! Configuration is loaded from a TOML file. Values may reference environment variables with
//! `${VAR_NAME}`; placeholders inside comments are left alone.

use alloy_primitives::Address;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use secoracle_core::{Score, DEFAULT_INITIAL_SCORE};

/// Main configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Oracle bootstrap parameters
    pub oracle: OracleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Oracle bootstrap parameters, used when no saved state exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Deploying identity; becomes the fixed administrator
    pub admin: Address,

    /// Initial default score
    #[serde(default = "default_score")]
    pub default_score: Score,

    /// Editors granted by the administrator at bootstrap
    #[serde(default)]
    pub editors: Vec<Address>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_score() -> Score {
    DEFAULT_INITIAL_SCORE
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, expanding `${VAR_NAME}` placeholders first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let expanded = expand_env_vars(&contents)?;

        let config: Config = toml::from_str(&expanded)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml).context("Failed to parse TOML configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.oracle.admin.is_zero() {
            anyhow::bail!("Oracle admin must be a non-zero address");
        }

        if let Some(position) = self.oracle.editors.iter().position(|e| e.is_zero()) {
            anyhow::bail!(
                "Oracle editors[{}] must be a non-zero address",
                position
            );
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Logging level must be one of: {} (got '{}')",
                valid_levels.join(", "),
                self.logging.level
            );
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!(
                "Logging format must be one of: {} (got '{}')",
                valid_formats.join(", "),
                self.logging.format
            );
        }

        Ok(())
    }
}

/// Expand `${VAR_NAME}` placeholders outside TOML comments.
///
/// Fails if a placeholder is unclosed, empty, or names an unset variable.
fn expand_env_vars(input: &str) -> Result<String> {
    let mut output = String::with_capacity(input.len());
    for (index, line) in input.split_inclusive('\n').enumerate() {
        let (body, comment) = split_comment(line);
        output.push_str(&expand_line(body, index + 1)?);
        output.push_str(comment);
    }
    Ok(output)
}

/// Split a line at the first `#` that is not inside a quoted string.
fn split_comment(line: &str) -> (&str, &str) {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, ch) in line.char_indices() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if ch == '\\' => escaped = true,
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == '#' => return line.split_at(idx),
            None => {}
        }
    }

    (line, "")
}

fn expand_line(body: &str, line_no: usize) -> Result<String> {
    let mut output = String::with_capacity(body.len());
    let mut rest = body;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let end = after.find('}').with_context(|| {
            format!("Unclosed environment variable placeholder on line {}", line_no)
        })?;
        let name = &after[..end];
        anyhow::ensure!(
            !name.is_empty(),
            "Empty environment variable name on line {}",
            line_no
        );

        let value = std::env::var(name).with_context(|| {
            format!(
                "Environment variable '{}' is not set (referenced on line {})",
                name, line_no
            )
        })?;
        output.push_str(&value);
        rest = &after[end + 1..];
    }

    output.push_str(rest);
    Ok(output)
}
