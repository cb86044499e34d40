use anyhow::Context;
use clap::{Parser, ValueEnum};
use softglass::{
    init_logging, AccessoryCountPolicy, Engine, EngineConfig, FastenerCountPolicy, Order,
    PriceTable, QuoteRequest, BUILD_DATE, VERSION,
};
use softglass_settings::{default_config_path, load_price_table};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputKind {
    /// Spec, layout, quote and drawing
    Full,
    /// Quote only
    Quote,
    /// Plain-text order summary
    Summary,
}

#[derive(Parser)]
#[command(
    name = "softglass",
    version = VERSION,
    about = "Compute layouts and quotes for soft PVC windows"
)]
struct Cli {
    /// Request JSON file: one window or an array of windows (stdin if not specified)
    request: Option<PathBuf>,

    /// Price table JSON file (falls back to the configured price table)
    #[arg(short, long)]
    prices: Option<PathBuf>,

    /// Engine config file, .toml or .json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bill the fasteners actually placed instead of the estimate
    #[arg(long)]
    bill_placed: bool,

    /// Bill the patches and cutouts actually placed instead of the requested counts
    #[arg(long)]
    bill_placed_accessories: bool,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = OutputKind::Full)]
    output: OutputKind,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn read_requests(path: Option<&PathBuf>) -> anyhow::Result<Vec<QuoteRequest>> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    let value: serde_json::Value = serde_json::from_str(&content).context("Invalid request JSON")?;
    let requests = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(requests)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    tracing::debug!(version = VERSION, build_date = BUILD_DATE, "softglass starting");

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = EngineConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    if cli.bill_placed {
        config.fastener_count_policy = FastenerCountPolicy::Placed;
    }
    if cli.bill_placed_accessories {
        config.accessory_count_policy = AccessoryCountPolicy::Placed;
    }

    let prices = match cli.prices.as_ref().or(config.price_table_path.as_ref()) {
        Some(path) => load_price_table(path)
            .with_context(|| format!("Failed to load price table {}", path.display()))?,
        None => {
            tracing::warn!("no price table given, every price is zero");
            PriceTable::default()
        }
    };

    let engine = Engine::new(config, prices);
    let requests = read_requests(cli.request.as_ref())?;

    let mut computations = Vec::with_capacity(requests.len());
    for (index, request) in requests.iter().enumerate() {
        let computation = engine
            .compute(request)
            .with_context(|| format!("Window {} rejected", index + 1))?;
        computations.push(computation);
    }

    let output = match cli.output {
        OutputKind::Full => to_json(&computations, cli.pretty)?,
        OutputKind::Quote => {
            let quotes: Vec<_> = computations.iter().map(|c| &c.quote).collect();
            to_json(&quotes, cli.pretty)?
        }
        OutputKind::Summary => {
            let mut order = Order::new();
            for computation in computations {
                order.add(computation.quote);
            }
            order.format_summary()
        }
    };
    println!("{}", output);

    Ok(())
}
