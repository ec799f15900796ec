use roomgen::{
    BasicRoomConfig, EventLog, GeneratorConfig, Generator, GridEventKind, Region, SpatialGrid,
    is_room_area_isolated,
};

fn three_room_generator(seed: u64) -> Generator {
    let config = GeneratorConfig::new(BasicRoomConfig {
        room_count_min: 3,
        room_count_max: 3,
        room_size_min: 3,
        room_size_max: 5,
        ..Default::default()
    });
    let grid = SpatialGrid::new(20, 20).expect("20x20 grid");
    Generator::new(config, grid).with_seed(seed)
}

#[test]
fn test_smoke_three_isolated_rooms_on_small_grid() {
    let mut generator = three_room_generator(2024);
    let mut log = EventLog::default();
    generator.run(&mut log).expect("generation should succeed");

    assert_eq!(generator.rooms().len(), 3, "all three slots should find room on a 20x20 grid");
    assert_eq!(log.count(GridEventKind::Finalized), 1);
    assert_eq!(log.count(GridEventKind::Generated), 1);

    // Re-check isolation against a grid holding only the other rooms.
    for (index, room) in generator.rooms().iter().enumerate() {
        let mut others = SpatialGrid::new(20, 20).expect("grid");
        let floor = roomgen::TileType::new(roomgen::FLOOR_TILE);
        for (other_index, other) in generator.rooms().iter().enumerate() {
            if other_index != index {
                for pos in other.shape().area() {
                    others.activate(pos, &floor);
                }
            }
        }
        assert!(is_room_area_isolated(room, &others), "room {} touches a neighbor", room.id());
    }
}

#[test]
fn test_smoke_rooms_are_joined_by_corridors() {
    let mut generator = three_room_generator(77);
    generator.run(&mut EventLog::default()).expect("generation should succeed");

    let room_cells: usize = generator.rooms().iter().map(|room| room.shape().area().len()).sum();
    assert!(generator.grid().count_active() > room_cells, "corridors add floor outside rooms");
    assert_eq!(generator.stats().corridors_carved, generator.rooms().len().saturating_sub(1));
}

#[test]
fn test_smoke_step_by_step_matches_run() {
    let mut stepped = three_room_generator(5);
    let mut stepped_log = EventLog::default();
    stepped.begin(&mut stepped_log).expect("begin");
    let mut steps = 0;
    while stepped.step(&mut stepped_log).expect("step") == roomgen::StepResult::Continue {
        steps += 1;
        assert!(steps < 1_000, "generator never finished");
    }

    let mut ran = three_room_generator(5);
    let mut ran_log = EventLog::default();
    ran.run(&mut ran_log).expect("run");

    assert_eq!(stepped_log.kinds(), ran_log.kinds());
    assert_eq!(
        roomgen::GridSnapshot::capture(stepped.grid()),
        roomgen::GridSnapshot::capture(ran.grid())
    );
}
