use anyhow::Result;
use clap::Args;
use secoracle_core::selector_from_signature;

#[derive(Debug, Args)]
pub struct SelectorArgs {
    /// Canonical function signature (e.g. "transfer(address,uint256)")
    signature: String,
}

pub fn run(args: SelectorArgs) -> Result<()> {
    println!("{}", selector_from_signature(args.signature.trim()));
    Ok(())
}
