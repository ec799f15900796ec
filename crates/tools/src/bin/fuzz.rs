use anyhow::{Result, bail};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use roomgen::{
    BasicRoomConfig, BspConfig, CellularConfig, EventLog, GeneratorConfig, GridEventKind,
    MapBuilder, MapConfig, Pos, Region, Shape, Size, StrategyConfig, Topology,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of generated maps to check
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_strategy(rng: &mut ChaCha8Rng) -> StrategyConfig {
    match rng.next_u64() % 3 {
        0 => BasicRoomConfig {
            room_count_min: choose(rng, &[0, 2, 4]),
            room_count_max: choose(rng, &[4, 8, 12]),
            room_size_min: choose(rng, &[1, 3]),
            room_size_max: choose(rng, &[4, 6]),
            attempts_per_room: choose(rng, &[5, 100]),
        }
        .into(),
        1 => BspConfig {
            division_depth: choose(rng, &[1, 3, 5]),
            min_connections_per_room: 1,
            max_connections_per_room: choose(rng, &[1, 2, 4]),
        }
        .into(),
        _ => CellularConfig {
            starting_density: choose(rng, &[0.1, 0.45, 0.7]),
            life_cycles: choose(rng, &[1, 5, 10]),
            ..Default::default()
        }
        .into(),
    }
}

fn random_map(rng: &mut ChaCha8Rng) -> (MapConfig, Option<Shape>) {
    let width = choose(rng, &[16, 32, 64]);
    let height = choose(rng, &[12, 24, 48]);
    let area = (rng.next_u64() % 2 == 0)
        .then(|| Shape::rectangle(Pos::new(0, 0), Size::new(width / 2 + 1, height)));

    let mut generators = Vec::new();
    for _ in 0..choose(rng, &[1, 2, 3]) {
        let generator = GeneratorConfig::new(random_strategy(rng));
        generators.push(match area {
            Some(area) => generator.with_selected_areas([area]),
            None => generator,
        });
    }
    let topology = choose(rng, &[Topology::Square, Topology::Hex]);
    (MapConfig { width, height, seed: Some(rng.next_u64()), topology, generators }, area)
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for {} maps...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for run in 0..args.runs {
        let (config, area) = random_map(&mut rng);
        let generator_count = config.generators.len();
        let mut log = EventLog::default();
        let built = MapBuilder::new(config.clone()).build(&mut log)?;

        let finalized = log.count(GridEventKind::Finalized);
        if finalized != generator_count {
            bail!(
                "Invariant failed: run {run} finalized {finalized} of {generator_count} generators"
            );
        }
        if let Some(area) = area {
            if let Some(pos) =
                built.grid.query_active_cells(true).into_keys().find(|&pos| !area.contains(pos))
            {
                bail!("Invariant failed: run {run} activated {pos:?} outside the selection");
            }
        }
        for room in &built.rooms {
            if !room.shape().area().into_iter().all(|pos| built.grid.is_position_safe(pos)) {
                bail!("Invariant failed: run {run} placed {} off the grid", room.id());
            }
        }
        if built.snapshot() != MapBuilder::new(config).build(&mut EventLog::default())?.snapshot() {
            bail!("Invariant failed: run {run} is not reproducible");
        }
    }

    println!("Fuzz run complete: {} maps checked.", args.runs);
    Ok(())
}
