use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::script::{run_script, Call};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path to a JSON array of calls
    #[arg(long)]
    script: PathBuf,

    /// Oracle state file; restored if present and rewritten after the replay
    #[arg(long)]
    state: Option<PathBuf>,

    /// Write the events emitted during the replay to this JSON file
    #[arg(long)]
    events: Option<PathBuf>,
}

pub fn run(config: &Config, args: ReplayArgs) -> Result<()> {
    let mut oracle = super::open_oracle(config, args.state.as_deref())?;

    let calls: Vec<Call> = super::read_json(&args.script).context("Failed to load call script")?;
    info!("Replaying {} calls from {}", calls.len(), args.script.display());

    let outcomes = run_script(&mut oracle, &calls);
    for outcome in &outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }

    let rejected = outcomes.iter().filter(|o| !o.ok).count();
    if rejected > 0 {
        warn!("{} of {} calls were rejected", rejected, outcomes.len());
    } else {
        info!("All {} calls succeeded", outcomes.len());
    }

    if let Some(path) = &args.state {
        super::save_state(path, &oracle)?;
    }

    if let Some(path) = &args.events {
        super::write_json(path, oracle.events())?;
        info!("Wrote {} events to {}", oracle.events().len(), path.display());
    }

    Ok(())
}
