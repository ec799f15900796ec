use proptest::prelude::*;
use roomgen::{
    BasicRoomConfig, BspConfig, CellularConfig, EventLog, GeneratorConfig, GridEventKind,
    IgnoreEvents, MapBuilder, MapConfig, Pos, Region, Shape, Size, StrategyConfig,
};

fn strategy(pick: u8) -> StrategyConfig {
    match pick % 3 {
        0 => BasicRoomConfig { room_size_max: 5, ..Default::default() }.into(),
        1 => BspConfig { division_depth: 2, ..Default::default() }.into(),
        _ => CellularConfig { life_cycles: 3, ..Default::default() }.into(),
    }
}

#[test]
fn layered_generators_share_one_grid() {
    let west = Shape::rectangle(Pos::new(0, 0), Size::new(24, 32));
    let east = Shape::rectangle(Pos::new(24, 0), Size::new(24, 32));
    let config = MapConfig {
        width: 48,
        height: 32,
        seed: Some(2_048),
        generators: vec![
            GeneratorConfig::new(CellularConfig::default()).with_selected_areas([west]),
            GeneratorConfig::new(BasicRoomConfig::default()).with_selected_areas([east]),
        ],
        ..Default::default()
    };

    let mut log = EventLog::default();
    let built = MapBuilder::new(config).build(&mut log).expect("build");

    assert_eq!(log.count(GridEventKind::Finalized), 2);
    assert!(
        built.rooms.iter().all(|room| room.shape().area().iter().all(|&pos| east.contains(pos)))
    );
    assert_eq!(built.tile_types.len(), 1);
    assert_eq!(built.stats.len(), 2);
}

#[test]
fn selection_does_not_leak_into_the_next_generator() {
    let corner = Shape::rectangle(Pos::new(0, 0), Size::new(8, 8));
    let config = MapConfig {
        width: 40,
        height: 40,
        seed: Some(9),
        generators: vec![
            GeneratorConfig::new(CellularConfig { life_cycles: 1, ..Default::default() })
                .with_selected_areas([corner]),
            GeneratorConfig::new(BspConfig { division_depth: 2, ..Default::default() }),
        ],
        ..Default::default()
    };
    let built = MapBuilder::new(config).build(&mut IgnoreEvents).expect("build");

    // The unrestricted BSP pass carves a room in every quadrant, far outside the corner.
    assert_eq!(built.stats[1].rooms_placed, 4);
    assert!(built.grid.query_active_cells(true).keys().any(|pos| pos.x >= 20 && pos.y >= 20));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn restricted_generators_never_touch_unselected_cells(
        seed in any::<u64>(),
        pick in 0_u8..3,
        x in 0_i32..20,
        y in 0_i32..20,
        width in 10_i32..20,
        height in 10_i32..20,
    ) {
        let area = Shape::rectangle(Pos::new(x, y), Size::new(width, height));
        let config = MapConfig {
            width: 40,
            height: 40,
            seed: Some(seed),
            generators: vec![GeneratorConfig::new(strategy(pick)).with_selected_areas([area])],
            ..Default::default()
        };
        let built = MapBuilder::new(config).build(&mut IgnoreEvents).expect("build");

        for pos in built.grid.query_active_cells(true).into_keys() {
            prop_assert!(area.contains(pos), "{pos:?} outside {area:?}");
        }
    }
}
