use crate::db::db::Store;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_info;
use anyhow::Result;
use clap::Args;

/// Creates the tables without starting the server. Existing data is kept.
#[derive(Debug, Args)]
pub struct InitDbArgs {
    /// SQLite file, absolute or relative to the data directory
    #[arg(long)]
    db: Option<String>,
}

pub fn cmd(args: InitDbArgs, config: Config) -> Result<()> {
    let file = args.db.unwrap_or(config.database.file);
    let store = Store::new(DataStorage::new().get_path(&file)?);
    store.init()?;
    msg_info!(Message::DatabaseOpened(store.path().display().to_string()));
    Ok(())
}
