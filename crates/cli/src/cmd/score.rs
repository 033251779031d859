use anyhow::Result;
use clap::Args;
use secoracle_core::parse_selector;
use secoracle_engine::Address;
use std::path::PathBuf;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Target address (0x...)
    #[arg(long)]
    target: Address,

    /// Function selector: 4-byte hex or a function signature
    #[arg(long)]
    selector: Option<String>,

    /// Oracle state file to read from (defaults to a fresh oracle from config)
    #[arg(long)]
    state: Option<PathBuf>,
}

pub fn run(config: &Config, args: ScoreArgs) -> Result<()> {
    let oracle = super::open_oracle(config, args.state.as_deref())?;

    let selector = args.selector.as_deref().map(parse_selector).transpose()?;
    let resolution = oracle.resolve_security_score(args.target, selector)?;

    println!("score: {}", resolution.score);
    println!("source: {}", resolution.source);
    if let Some(entry) = oracle.score_entry(args.target, selector)? {
        println!("confidence: {}", entry.confidence);
    }

    Ok(())
}
