mod seed;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use log::{debug, info};
use roomgen::{
    BasicRoomConfig, BspConfig, BuiltMap, CellularConfig, GenerationStats, GeneratorConfig,
    GridSnapshot, IgnoreEvents, MapBuilder, MapConfig, Room, StrategyConfig, Topology,
};
use serde::Serialize;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use seed::{SeedChoice, generate_runtime_seed, resolve_seed};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Basic,
    Bsp,
    Cellular,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TopologyArg {
    Square,
    Hex,
}

impl From<TopologyArg> for Topology {
    fn from(arg: TopologyArg) -> Self {
        match arg {
            TopologyArg::Square => Topology::Square,
            TopologyArg::Hex => Topology::Hex,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map configuration file (.json or .toml); overrides the size and strategy flags
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 60)]
    width: i32,
    #[arg(long, default_value_t = 40)]
    height: i32,
    #[arg(long, value_enum, default_value_t = StrategyArg::Bsp)]
    strategy: StrategyArg,
    #[arg(long, value_enum, default_value_t = TopologyArg::Square)]
    topology: TopologyArg,
    /// Run seed; generated from the clock when neither this nor the configuration sets one
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    /// Repeat for more log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct MapReport<'a> {
    seed: u64,
    rooms: &'a [Room],
    stats: &'a [GenerationStats],
    grid: GridSnapshot,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => config_from_flags(args.width, args.height, args.strategy, args.topology),
    };
    let seed = resolve_seed(args.seed, config.seed, generate_runtime_seed());
    eprintln!("seed {} ({})", seed.value(), seed.source());

    let built = MapBuilder::new(config)
        .with_seed(seed.value())
        .build(&mut IgnoreEvents)
        .context("map generation failed")?;
    info!(
        "built {}x{} map with {} rooms from {} generators",
        built.grid.width(),
        built.grid.height(),
        built.rooms.len(),
        built.stats.len()
    );

    print!("{}", render(&built, seed, args.format)?);
    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        ConfigBuilder::new()
            .set_target_level(LevelFilter::Off)
            .set_location_level(LevelFilter::Off)
            .build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to install logger")
}

fn load_config(path: &Path) -> Result<MapConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read map configuration: {}", path.display()))?;
    let config: MapConfig = match path.extension().and_then(|extension| extension.to_str()) {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON configuration: {}", path.display()))?,
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("Failed to parse TOML configuration: {}", path.display()))?,
        _ => bail!(
            "unsupported configuration format: {} (expected .json or .toml)",
            path.display()
        ),
    };
    config.validate().with_context(|| format!("Invalid map configuration: {}", path.display()))?;
    debug!("loaded {} generators from {}", config.generators.len(), path.display());
    Ok(config)
}

fn config_from_flags(
    width: i32,
    height: i32,
    strategy: StrategyArg,
    topology: TopologyArg,
) -> MapConfig {
    let strategy: StrategyConfig = match strategy {
        StrategyArg::Basic => BasicRoomConfig::default().into(),
        StrategyArg::Bsp => BspConfig::default().into(),
        StrategyArg::Cellular => CellularConfig::default().into(),
    };
    MapConfig {
        width,
        height,
        topology: topology.into(),
        generators: vec![GeneratorConfig::new(strategy)],
        ..Default::default()
    }
}

fn render(built: &BuiltMap, seed: SeedChoice, format: OutputFormat) -> Result<String> {
    let snapshot = built.snapshot();
    Ok(match format {
        OutputFormat::Ascii => snapshot.to_ascii(),
        OutputFormat::Json => {
            let report = MapReport {
                seed: seed.value(),
                rooms: &built.rooms,
                stats: &built.stats,
                grid: snapshot,
            };
            let mut json =
                serde_json::to_string_pretty(&report).context("Failed to serialize map")?;
            json.push('\n');
            json
        }
    })
}
