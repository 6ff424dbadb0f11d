//! Account board server command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use anyhow::Error;

use crate::store::RecordStore;

/// The command line arguments.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Configuration file path.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// The command to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Operational commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prints every record in the store.
    #[command(name = "list")]
    List,
}

/// Prints every record in the store as pretty JSON.
pub async fn list_records(store: &RecordStore) -> Result<(), Error> {
    let records = store.load_all().await;

    println!("{}", serde_json::to_string_pretty(&records)?);

    Ok(())
}
