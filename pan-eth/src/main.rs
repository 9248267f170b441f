use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use pan_eth::config::{load_device_settings, DeviceSettings};
use pan_eth::device::FileDevice;
use pan_eth::eth::{Entry, Eth, Identifier};
use pan_eth::report::{render_entry, render_list};
use pan_eth::version::Version;
use serde_json::Value;

mod cli;

use cli::{Cli, Command, DeleteArgs, EditArgs, GetArgs, ListArgs, OutputFormat, SetArgs};

/// Device selection after merging the settings file with the flags.
struct Target {
    config: PathBuf,
    version: Option<Version>,
    vsys: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let target = resolve_target(&cli)?;
    let device = FileDevice::open(&target.config, target.version.clone())
        .with_context(|| format!("failed to open {}", target.config.display()))?;
    log::debug!(
        "using {} (version {})",
        target.config.display(),
        device.version()
    );
    let mut eth = Eth::new(device);

    match cli.command {
        Command::List(args) => run_list(&eth, args),
        Command::Get(args) => run_get(&eth, args),
        Command::Set(args) => run_set(&mut eth, args, &target.vsys),
        Command::Edit(args) => run_edit(&mut eth, args, &target.vsys),
        Command::Delete(args) => run_delete(&mut eth, args, &target.vsys),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn resolve_target(cli: &Cli) -> Result<Target> {
    let settings = match &cli.device_config {
        Some(path) => load_device_settings(path)?,
        None => DeviceSettings::default(),
    };

    let Some(config) = cli.config.clone().or_else(|| settings.config.clone()) else {
        bail!("no configuration file given; pass --config or set `config` in --device-config");
    };

    let version = match &cli.device_version {
        Some(raw) => Some(
            raw.parse::<Version>()
                .with_context(|| "invalid --device-version".to_string())?,
        ),
        None => settings.parsed_version()?,
    };

    Ok(Target {
        config,
        version,
        vsys: settings.vsys.unwrap_or_default(),
    })
}

fn run_list(eth: &Eth<FileDevice>, args: ListArgs) -> Result<()> {
    let names = if args.show {
        eth.show_list()?
    } else {
        eth.get_list()?
    };
    println!("{}", render_list(&names));
    Ok(())
}

fn run_get(eth: &Eth<FileDevice>, args: GetArgs) -> Result<()> {
    let entry = if args.show {
        eth.show(&args.name)
    } else {
        eth.get(&args.name)
    }
    .with_context(|| format!("failed to read ethernet interface {}", args.name))?;

    match args.format {
        OutputFormat::Text => println!("{}", render_entry(&entry)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
    }
    Ok(())
}

fn run_set(eth: &mut Eth<FileDevice>, args: SetArgs, default_vsys: &str) -> Result<()> {
    let entries = match read_json(&args.records)? {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value::<Entry>)
            .collect::<Result<Vec<_>, _>>(),
        value @ Value::Object(_) => serde_json::from_value::<Entry>(value).map(|e| vec![e]),
        other => bail!(
            "{}: expected a record or an array of records, found {other}",
            args.records.display()
        ),
    }
    .with_context(|| format!("invalid interface record in {}", args.records.display()))?;

    if entries.is_empty() {
        eprintln!("{} no records in {}", "warning:".yellow(), args.records.display());
        return Ok(());
    }

    let vsys = args.vsys.as_deref().unwrap_or(default_vsys);
    eth.set(vsys, &entries)
        .context("failed to set ethernet interfaces")?;
    for entry in &entries {
        println!("{} {}", "set".green(), entry.name);
    }
    Ok(())
}

fn run_edit(eth: &mut Eth<FileDevice>, args: EditArgs, default_vsys: &str) -> Result<()> {
    let entry: Entry = serde_json::from_value(read_json(&args.record)?)
        .with_context(|| format!("invalid interface record in {}", args.record.display()))?;

    let vsys = args.vsys.as_deref().unwrap_or(default_vsys);
    eth.edit(vsys, &entry)
        .with_context(|| format!("failed to edit ethernet interface {}", entry.name))?;
    println!("{} {}", "edited".green(), entry.name);
    Ok(())
}

fn run_delete(eth: &mut Eth<FileDevice>, args: DeleteArgs, default_vsys: &str) -> Result<()> {
    let mut ids = args
        .names
        .into_iter()
        .map(|name| Identifier::try_from(Value::String(name)))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid interface name")?;
    if let Some(path) = &args.from_json {
        let items = match read_json(path)? {
            Value::Array(items) => items,
            other => vec![other],
        };
        for item in items {
            ids.push(
                Identifier::try_from(item)
                    .with_context(|| format!("invalid delete target in {}", path.display()))?,
            );
        }
    }

    if ids.is_empty() {
        eprintln!("{} nothing to delete", "warning:".yellow());
        return Ok(());
    }

    let vsys = args.vsys.as_deref().unwrap_or(default_vsys);
    eth.delete(vsys, &ids)
        .context("failed to delete ethernet interfaces")?;
    for id in &ids {
        println!("{} {}", "deleted".red(), id.name());
    }
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
