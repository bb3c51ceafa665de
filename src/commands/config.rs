use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Write the effective configuration to `config.json`
    #[arg(short, long)]
    save: bool,
}

/// Prints the configuration after file and environment overrides.
pub fn cmd(args: ConfigArgs, config: Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&config)?);

    if args.save {
        config.save()?;
        msg_success!(Message::ConfigSaved);
    }
    Ok(())
}
