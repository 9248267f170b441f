use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pan-eth")]
#[command(about = "Manage firewall ethernet interfaces in a configuration file")]
pub struct Cli {
    /// Device settings TOML (config path, version, default vsys).
    #[arg(long, global = true)]
    pub device_config: Option<PathBuf>,
    /// Configuration XML to operate on. Overrides the settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Software version the device reports (for example 7.0.1 or 10.1.6-h3).
    #[arg(long, global = true)]
    pub device_version: Option<String>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// List ethernet interface names.
    List(ListArgs),
    /// Show one ethernet interface.
    Get(GetArgs),
    /// Create or merge ethernet interfaces from a JSON file.
    Set(SetArgs),
    /// Replace one ethernet interface from a JSON file.
    Edit(EditArgs),
    /// Delete ethernet interfaces by name or record.
    Delete(DeleteArgs),
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Read the running config instead of the candidate.
    #[arg(long)]
    pub show: bool,
}

#[derive(Parser, Debug)]
pub struct GetArgs {
    pub name: String,
    /// Read the running config instead of the candidate.
    #[arg(long)]
    pub show: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct SetArgs {
    /// JSON file holding one record or an array of records.
    pub records: PathBuf,
    /// Vsys to import the interfaces into.
    #[arg(long)]
    pub vsys: Option<String>,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// JSON file holding one record.
    pub record: PathBuf,
    /// Vsys to import the interface into.
    #[arg(long)]
    pub vsys: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Interface names.
    pub names: Vec<String>,
    /// JSON array of names and/or records to delete as well.
    #[arg(long)]
    pub from_json: Option<PathBuf>,
    /// Vsys to remove the interfaces from first.
    #[arg(long)]
    pub vsys: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
