use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "follyo", version)]
#[command(about = "Track crypto purchases, sales, loans and stakes, and value them over time")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true, env = "FOLLYO_CONFIG")]
    pub config: Option<String>,
    /// Override the data directory.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Allow selling more than the available balance.
    #[arg(long, global = true)]
    pub allow_negative_holdings: bool,
    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Purchases.
    Buy {
        #[command(subcommand)]
        command: TradeCommand,
    },
    /// Sales.
    Sell {
        #[command(subcommand)]
        command: TradeCommand,
    },
    /// Borrowed coins.
    Loan {
        #[command(subcommand)]
        command: LoanCommand,
    },
    /// Coins locked on a platform.
    Stake {
        #[command(subcommand)]
        command: StakeCommand,
    },
    /// Per-coin balances and USD totals.
    Summary,
    /// Priced valuations of the portfolio.
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum TradeCommand {
    Add(TradeArgs),
    List,
    Remove { id: String },
}

#[derive(Args, Debug)]
pub struct TradeArgs {
    pub coin: String,
    pub amount: f64,
    /// USD price per coin.
    pub price: f64,
    #[command(flatten)]
    pub common: RecordArgs,
    #[arg(long)]
    pub platform: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum LoanCommand {
    Add(LoanArgs),
    List,
    Remove { id: String },
}

#[derive(Args, Debug)]
pub struct LoanArgs {
    pub coin: String,
    pub amount: f64,
    #[arg(long)]
    pub platform: String,
    /// Annual interest rate in percent.
    #[arg(long)]
    pub rate: Option<f64>,
    #[command(flatten)]
    pub common: RecordArgs,
}

#[derive(Subcommand, Debug)]
pub enum StakeCommand {
    Add(StakeArgs),
    List,
    Remove { id: String },
}

#[derive(Args, Debug)]
pub struct StakeArgs {
    pub coin: String,
    pub amount: f64,
    #[arg(long)]
    pub platform: String,
    /// Annual percentage yield.
    #[arg(long)]
    pub apy: Option<f64>,
    #[command(flatten)]
    pub common: RecordArgs,
}

#[derive(Args, Debug)]
pub struct RecordArgs {
    #[arg(long)]
    pub notes: Option<String>,
    /// YYYY-MM-DD, defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum SnapshotCommand {
    /// Value the portfolio and store the snapshot.
    Save {
        #[arg(long, default_value = "")]
        note: String,
        #[command(flatten)]
        prices: PriceArgs,
    },
    /// Save a snapshot with today's date as the note.
    Daily {
        #[command(flatten)]
        prices: PriceArgs,
    },
    List,
    Show { id: String },
    /// Compare two snapshots, or one snapshot against current prices.
    Compare {
        id: String,
        other: Option<String>,
        #[command(flatten)]
        prices: PriceArgs,
    },
    Remove { id: String },
}

#[derive(Args, Debug, Default)]
pub struct PriceArgs {
    /// USD price as COIN=VALUE, repeatable.
    #[arg(long = "price", value_name = "COIN=VALUE", value_parser = parse_price)]
    pub prices: Vec<(String, f64)>,
}

fn parse_price(raw: &str) -> Result<(String, f64), String> {
    let (coin, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COIN=VALUE, got `{raw}`"))?;
    let coin = coin.trim();
    if coin.is_empty() {
        return Err(format!("missing coin in `{raw}`"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid price in `{raw}`"))?;
    Ok((coin.to_string(), value))
}
