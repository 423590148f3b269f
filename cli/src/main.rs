//! roster: derive and check epoch rosters from a chain snapshot.

use anyhow::Context;
use clap::Parser;
use roster_chain::ChainReader;
use roster_election::{ElectionScanner, RosterBuilder, RosterConfig};
use roster_nullables::{ChainSnapshot, NullChain};
use roster_types::NetworkId;
use roster_utils::LogFormat;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "roster", about = "Epoch roster derivation tool")]
struct Cli {
    /// Network: "live", "test", or "dev". Overrides the chain id the
    /// snapshot declares; when unset the snapshot's own network is used.
    #[arg(long, env = "ROSTER_NETWORK")]
    network: Option<String>,

    /// Blocks between broadcast blocks.
    #[arg(long, env = "ROSTER_BROADCAST_INTERVAL")]
    broadcast_interval: Option<u64>,

    /// Wealth assigned to bootstrap nodes in the genesis epoch.
    #[arg(long, env = "ROSTER_BOOTSTRAP_WEALTH")]
    bootstrap_wealth: Option<u64>,

    /// Bootstrap nodes (comma-separated enode URLs, first one seeds the committee).
    #[arg(long, env = "ROSTER_BOOTNODES", value_delimiter = ',')]
    bootnodes: Vec<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "ROSTER_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "ROSTER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Build the roster at an epoch boundary and print it as JSON.
    Build {
        /// Chain snapshot (JSON).
        #[arg(long)]
        chain: PathBuf,
        /// Boundary height; defaults to the latest boundary at or below the head.
        #[arg(long)]
        height: Option<u64>,
    },
    /// Print the latest election declaration per node over a block range.
    Scan {
        #[arg(long)]
        chain: PathBuf,
        #[arg(long)]
        start: u64,
        #[arg(long)]
        end: u64,
    },
    /// Check the roster recorded in a broadcast block against chain history.
    Verify {
        #[arg(long)]
        chain: PathBuf,
        /// Broadcast block number.
        #[arg(long)]
        block: u64,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn parse_network(s: &str) -> anyhow::Result<NetworkId> {
    NetworkId::from_name(s).with_context(|| format!("unknown network {s:?}"))
}

/// Layer CLI flags and env vars over the file configuration (or defaults).
fn effective_config(cli: &Cli, file: Option<RosterConfig>) -> anyhow::Result<RosterConfig> {
    let base = file.unwrap_or_default();
    let network = match cli.network.as_deref() {
        Some(name) => Some(parse_network(name)?),
        None => base.network,
    };
    Ok(RosterConfig {
        network,
        broadcast_interval: cli.broadcast_interval.unwrap_or(base.broadcast_interval),
        bootstrap_wealth: cli.bootstrap_wealth.unwrap_or(base.bootstrap_wealth),
        bootnodes: if cli.bootnodes.is_empty() {
            base.bootnodes
        } else {
            cli.bootnodes.clone()
        },
        log_format: cli.log_format.clone().unwrap_or(base.log_format),
        log_level: cli.log_level.clone().unwrap_or(base.log_level),
    })
}

fn load_chain(path: &Path, config: &RosterConfig) -> anyhow::Result<NullChain> {
    let mut snapshot = ChainSnapshot::from_json_file(path)
        .with_context(|| format!("loading chain snapshot {}", path.display()))?;
    let resolved = config.chain_config(&snapshot.config);
    if resolved != snapshot.config {
        tracing::info!(
            snapshot = snapshot.config.network.as_str(),
            configured = resolved.network.as_str(),
            chain_id = resolved.chain_id,
            "reading snapshot under configured network"
        );
    }
    snapshot.config = resolved;
    let chain = NullChain::from_snapshot(snapshot);
    tracing::info!(
        path = %path.display(),
        blocks = chain.block_count(),
        head = chain.current_height(),
        "chain snapshot loaded"
    );
    Ok(chain)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => Some(
            RosterConfig::from_toml_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
        ),
        None => None,
    };
    let config = effective_config(&cli, file_config)?;
    roster_utils::init_tracing_with(LogFormat::from_name(&config.log_format), &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Build { chain, height } => {
            let params = config.epoch_params()?;
            let chain = load_chain(&chain, &config)?;
            let head = chain.current_height();
            let height = match height {
                Some(h) => h,
                None => params
                    .boundary_at_or_below(head)
                    .with_context(|| format!("no epoch boundary at or below head {head}"))?,
            };
            let builder = RosterBuilder::new(chain, params);
            let roster = builder.build_roster(height)?;
            tracing::info!(stats = ?builder.scanner().stats().snapshot(), "scan finished");
            print_json(&serde_json::json!({
                "height": height,
                "digest": hex_digest(&roster)?,
                "roster": roster,
            }))?;
        }
        Command::Scan { chain, start, end } => {
            let scanner = ElectionScanner::new(load_chain(&chain, &config)?);
            let records = scanner.scan(start, end)?;
            print_json(&serde_json::json!({
                "start": start,
                "end": end,
                "records": records,
                "stats": scanner.stats().snapshot(),
            }))?;
        }
        Command::Verify { chain, block } => {
            let params = config.epoch_params()?;
            let chain = load_chain(&chain, &config)?;
            let broadcast = chain
                .block_by_number(block)
                .with_context(|| format!("block {block} not found in snapshot"))?;
            RosterBuilder::new(chain, params).verify_broadcast_block(&broadcast)?;
            println!("block {block}: roster ok");
        }
    }

    Ok(())
}

fn hex_digest(roster: &roster_types::EpochRoster) -> anyhow::Result<String> {
    Ok(hex::encode(roster.digest()?))
}
