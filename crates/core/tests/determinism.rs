use roomgen::{
    BasicRoomConfig, BspConfig, CellularConfig, GeneratorConfig, IgnoreEvents, MapBuilder,
    MapConfig, StrategyConfig,
};

fn fingerprint(strategy: impl Into<StrategyConfig>, seed: u64) -> u64 {
    let config = MapConfig {
        width: 48,
        height: 32,
        seed: Some(seed),
        generators: vec![GeneratorConfig::new(strategy)],
        ..Default::default()
    };
    MapBuilder::new(config).build(&mut IgnoreEvents).expect("build").snapshot().fingerprint()
}

#[test]
fn test_determinism_identical_seeds_produce_same_fingerprint() {
    for seed in [1_u64, 99, 12_345] {
        assert_eq!(
            fingerprint(BasicRoomConfig::default(), seed),
            fingerprint(BasicRoomConfig::default(), seed),
            "basic placement must be reproducible for seed {seed}"
        );
        assert_eq!(
            fingerprint(BspConfig::default(), seed),
            fingerprint(BspConfig::default(), seed)
        );
        assert_eq!(
            fingerprint(CellularConfig::default(), seed),
            fingerprint(CellularConfig::default(), seed)
        );
    }
}

#[test]
fn test_determinism_different_seeds_produce_different_fingerprints() {
    assert_ne!(fingerprint(BspConfig::default(), 123), fingerprint(BspConfig::default(), 456));
    assert_ne!(
        fingerprint(CellularConfig::default(), 123),
        fingerprint(CellularConfig::default(), 456)
    );
}

#[test]
fn test_determinism_step_delay_does_not_change_output() {
    let mut delayed = GeneratorConfig::new(CellularConfig { life_cycles: 2, ..Default::default() });
    delayed.step_delay_ms = 1;
    let plain = GeneratorConfig::new(CellularConfig { life_cycles: 2, ..Default::default() });

    let build = |generator: GeneratorConfig| {
        let config = MapConfig {
            width: 16,
            height: 16,
            seed: Some(8),
            generators: vec![generator],
            ..Default::default()
        };
        MapBuilder::new(config).build(&mut IgnoreEvents).expect("build").snapshot()
    };
    assert_eq!(build(delayed), build(plain));
}

#[test]
fn test_determinism_config_round_trip_reproduces_map() {
    let config = MapConfig {
        width: 40,
        height: 40,
        seed: Some(31),
        generators: vec![
            GeneratorConfig::new(BspConfig { division_depth: 2, ..Default::default() }),
            GeneratorConfig::new(BasicRoomConfig::default()).with_seed(4),
        ],
        ..Default::default()
    };
    let json = serde_json::to_string(&config).expect("serialize config");
    let restored: MapConfig = serde_json::from_str(&json).expect("parse config");
    assert_eq!(restored, config);

    let original = MapBuilder::new(config).build(&mut IgnoreEvents).expect("build");
    let replayed = MapBuilder::new(restored).build(&mut IgnoreEvents).expect("build");
    assert_eq!(original.snapshot().canonical_bytes(), replayed.snapshot().canonical_bytes());
}
