use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use tracing::info;

use secoracle_engine::{OracleState, SecurityOracle};

use crate::config::Config;

pub mod check;
pub mod replay;
pub mod score;
pub mod selector;

/// Restore the oracle from `state_path` if it exists, otherwise bootstrap it from config.
pub fn open_oracle(config: &Config, state_path: Option<&Path>) -> Result<SecurityOracle> {
    if let Some(path) = state_path.filter(|p| p.exists()) {
        let state: OracleState = read_json(path)?;
        anyhow::ensure!(
            state.admin == config.oracle.admin,
            "State file {} is administered by {}, but the configuration names {}",
            path.display(),
            state.admin,
            config.oracle.admin
        );
        info!("Restoring oracle state from {}", path.display());
        return SecurityOracle::from_state(state)
            .with_context(|| format!("Invalid oracle state in {}", path.display()));
    }

    bootstrap(config)
}

/// Construct a fresh oracle and grant the configured editors.
pub fn bootstrap(config: &Config) -> Result<SecurityOracle> {
    let admin = config.oracle.admin;
    let mut oracle = SecurityOracle::new(admin, Some(config.oracle.default_score))
        .context("Failed to construct oracle")?;

    for editor in &config.oracle.editors {
        oracle
            .grant_editor(admin, *editor)
            .with_context(|| format!("Failed to grant editor {}", editor))?;
    }

    info!(
        "Bootstrapped oracle (admin={}, default_score={}, editors={})",
        admin,
        config.oracle.default_score,
        oracle.editors().len()
    );
    Ok(oracle)
}

pub fn save_state(path: &Path, oracle: &SecurityOracle) -> Result<()> {
    write_json(path, &oracle.snapshot())?;
    info!("Saved oracle state to {}", path.display());
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
