use std::cmp::Ordering;
use std::path::PathBuf;

use artifact_version::config::{Config, log_path};
use artifact_version::logging;
use artifact_version::version::release::{
    calculate_latest_major, calculate_latest_minor, calculate_latest_patch, dedup_versions,
    sort_versions,
};
use artifact_version::version::{VersionParser, VersionValue};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::debug;

#[derive(Parser)]
#[command(name = "artifact-version")]
#[command(version, about = "Parse, compare and sort release artifact versions")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/artifact-version/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use the strict semantic version grammar instead of the lenient one
    #[arg(long, global = true)]
    strict: bool,

    /// Write logs to the default log file instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the canonical form of each version
    Parse {
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Print every field as JSON
        #[arg(long)]
        json: bool,
        /// Print every field on one line
        #[arg(long, conflicts_with = "json")]
        long: bool,
    },
    /// Compare two versions and print `<`, `=` or `>`
    Compare {
        left: String,
        right: String,
        /// Compare against RIGHT as a plain string instead of parsing it
        #[arg(long)]
        raw: bool,
    },
    /// Sort versions ascending
    Sort {
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Drop versions equal to an earlier one
        #[arg(long)]
        dedup: bool,
        /// Sort descending
        #[arg(long)]
        reverse: bool,
    },
    /// Show the newest patch, minor and major upgrades for a version
    Latest {
        #[arg(long)]
        current: String,
        #[arg(required = true)]
        available: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if cli.log_file && config.logging.file.is_none() {
        config.logging.file = Some(log_path());
    }
    let _guard = logging::init(&config.logging)?;
    debug!("Loaded config: {:?}", config);

    let parser = VersionParser::new(config.grammar)?;
    run(&cli, &parser)
}

fn run(cli: &Cli, parser: &VersionParser) -> anyhow::Result<()> {
    match &cli.command {
        Command::Parse { inputs, json, long } => {
            for input in inputs {
                let version = parse_input(parser, input, cli.strict)?;
                if *json {
                    let report = json!({
                        "input": input,
                        "canonical": version.to_string(),
                        "channelRank": version.channel_rank(),
                        "version": version,
                    });
                    println!("{}", serde_json::to_string(&report)?);
                } else if *long {
                    println!("{}", version.long_name());
                } else {
                    println!("{version}");
                }
            }
        }
        Command::Compare { left, right, raw } => {
            let left = parse_input(parser, left, cli.strict)?;
            let ordering = if *raw {
                left.compare(right)
            } else {
                left.compare(&parse_input(parser, right, cli.strict)?)
            };
            println!("{}", ordering_symbol(ordering));
        }
        Command::Sort {
            inputs,
            dedup,
            reverse,
        } => {
            let mut versions = inputs
                .iter()
                .map(|input| parse_input(parser, input, cli.strict))
                .collect::<anyhow::Result<Vec<_>>>()?;
            if *dedup {
                versions = dedup_versions(versions);
            } else {
                sort_versions(&mut versions);
            }
            if *reverse {
                versions.reverse();
            }
            for version in &versions {
                println!("{version}");
            }
        }
        Command::Latest { current, available } => {
            let upgrades = latest_upgrades(parser, current, available, cli.strict)?;
            if upgrades.iter().all(|(_, v)| v.is_none()) {
                println!("{current} is up to date");
            }
            for (kind, version) in upgrades {
                if let Some(version) = version {
                    println!("{kind}: {version}");
                }
            }
        }
    }
    Ok(())
}

/// Newest patch, minor and major upgrades, parsing every input with the
/// selected grammar
fn latest_upgrades(
    parser: &VersionParser,
    current: &str,
    available: &[String],
    strict: bool,
) -> anyhow::Result<[(&'static str, Option<VersionValue>); 3]> {
    let current = parse_input(parser, current, strict)?;
    let available = available
        .iter()
        .map(|input| parse_input(parser, input, strict))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok([
        ("patch", calculate_latest_patch(&current, &available)),
        ("minor", calculate_latest_minor(&current, &available)),
        ("major", calculate_latest_major(&current, &available)),
    ])
}

fn parse_input(parser: &VersionParser, input: &str, strict: bool) -> anyhow::Result<VersionValue> {
    if strict {
        Ok(parser.parse_strict(input)?)
    } else {
        Ok(parser.parse(Some(input)))
    }
}

fn ordering_symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}
