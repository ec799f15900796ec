//! Serializable generator parameters and their validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::shape::Shape;
use crate::types::Topology;

pub const DEFAULT_ATTEMPTS_PER_ROOM: u32 = 100;

/// One entry of a map's generator sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Pins this generator's random stream; otherwise derived from the map seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Pause between steps when driven by [`super::Generator::run`]. Purely cosmetic.
    #[serde(default)]
    pub step_delay_ms: u64,
    /// Cells this generator may touch; empty means the whole grid.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_areas: Vec<Shape>,
    #[serde(flatten)]
    pub strategy: StrategyConfig,
}

impl GeneratorConfig {
    pub fn new(strategy: impl Into<StrategyConfig>) -> Self {
        Self { seed: None, step_delay_ms: 0, selected_areas: Vec::new(), strategy: strategy.into() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_selected_areas(mut self, areas: impl IntoIterator<Item = Shape>) -> Self {
        self.selected_areas = areas.into_iter().collect();
        self
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn validate(&self, width: i32, height: i32) -> Result<(), ConfigError> {
        match &self.strategy {
            StrategyConfig::BasicRoomPlacement(config) => config.validate(width, height),
            StrategyConfig::BinarySpacePartition(config) => config.validate(),
            StrategyConfig::CellularAutomata(config) => config.validate(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyConfig {
    BasicRoomPlacement(BasicRoomConfig),
    BinarySpacePartition(BspConfig),
    CellularAutomata(CellularConfig),
}

impl StrategyConfig {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyConfig::BasicRoomPlacement(_) => "basic_room_placement",
            StrategyConfig::BinarySpacePartition(_) => "binary_space_partition",
            StrategyConfig::CellularAutomata(_) => "cellular_automata",
        }
    }
}

impl From<BasicRoomConfig> for StrategyConfig {
    fn from(config: BasicRoomConfig) -> Self {
        StrategyConfig::BasicRoomPlacement(config)
    }
}

impl From<BspConfig> for StrategyConfig {
    fn from(config: BspConfig) -> Self {
        StrategyConfig::BinarySpacePartition(config)
    }
}

impl From<CellularConfig> for StrategyConfig {
    fn from(config: CellularConfig) -> Self {
        StrategyConfig::CellularAutomata(config)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicRoomConfig {
    pub room_count_min: i32,
    pub room_count_max: i32,
    pub room_size_min: i32,
    pub room_size_max: i32,
    /// Consecutive rejected candidates before a room slot is abandoned.
    pub attempts_per_room: u32,
}

impl Default for BasicRoomConfig {
    fn default() -> Self {
        Self {
            room_count_min: 4,
            room_count_max: 8,
            room_size_min: 3,
            room_size_max: 6,
            attempts_per_room: DEFAULT_ATTEMPTS_PER_ROOM,
        }
    }
}

impl BasicRoomConfig {
    pub fn validate(&self, width: i32, height: i32) -> Result<(), ConfigError> {
        ConfigError::check_minimum("room_count_min", 0, i64::from(self.room_count_min))?;
        ConfigError::check_range(
            "room_count",
            i64::from(self.room_count_min),
            i64::from(self.room_count_max),
        )?;
        ConfigError::check_minimum("room_size_min", 1, i64::from(self.room_size_min))?;
        ConfigError::check_range(
            "room_size",
            i64::from(self.room_size_min),
            i64::from(self.room_size_max),
        )?;
        ConfigError::check_minimum("attempts_per_room", 1, i64::from(self.attempts_per_room))?;
        if self.room_size_max > width.min(height) {
            return Err(ConfigError::DoesNotFit {
                parameter: "room_size_max",
                value: i64::from(self.room_size_max),
                width,
                height,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspConfig {
    pub division_depth: u32,
    pub min_connections_per_room: i32,
    pub max_connections_per_room: i32,
}

impl Default for BspConfig {
    fn default() -> Self {
        Self { division_depth: 3, min_connections_per_room: 1, max_connections_per_room: 1 }
    }
}

impl BspConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_minimum("division_depth", 1, i64::from(self.division_depth))?;
        ConfigError::check_minimum(
            "min_connections_per_room",
            1,
            i64::from(self.min_connections_per_room),
        )?;
        ConfigError::check_range(
            "connections_per_room",
            i64::from(self.min_connections_per_room),
            i64::from(self.max_connections_per_room),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellularConfig {
    /// Fraction of the grid's area used as the number of seed stamps.
    pub starting_density: f64,
    pub life_cycles: u32,
    pub min_neighbors_for_sustained_life: u8,
    pub max_neighbors_for_sustained_life: u8,
    pub min_neighbors_for_new_life: u8,
    pub max_neighbors_for_new_life: u8,
}

impl Default for CellularConfig {
    fn default() -> Self {
        Self {
            starting_density: 0.5,
            life_cycles: 10,
            min_neighbors_for_sustained_life: 2,
            max_neighbors_for_sustained_life: 3,
            min_neighbors_for_new_life: 3,
            max_neighbors_for_new_life: 3,
        }
    }
}

impl CellularConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.starting_density) {
            return Err(ConfigError::OutOfRange {
                parameter: "starting_density",
                min: 0.0,
                max: 1.0,
                value: self.starting_density,
            });
        }
        ConfigError::check_minimum("life_cycles", 1, i64::from(self.life_cycles))?;
        ConfigError::check_range(
            "neighbors_for_sustained_life",
            i64::from(self.min_neighbors_for_sustained_life),
            i64::from(self.max_neighbors_for_sustained_life),
        )?;
        ConfigError::check_range(
            "neighbors_for_new_life",
            i64::from(self.min_neighbors_for_new_life),
            i64::from(self.max_neighbors_for_new_life),
        )
    }
}

/// A grid plus the generator sequence that fills it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub width: i32,
    pub height: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Square or hex cells; square when omitted.
    #[serde(default)]
    pub topology: Topology,
    pub generators: Vec<GeneratorConfig>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            seed: None,
            topology: Topology::Square,
            generators: Vec::new(),
        }
    }
}

impl MapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::GridDimensions { width: self.width, height: self.height });
        }
        if self.generators.is_empty() {
            return Err(ConfigError::EmptyGeneratorSequence);
        }
        self.generators.iter().try_for_each(|generator| generator.validate(self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Pos, Size};

    #[test]
    fn basic_config_rejects_inverted_ranges_and_oversized_rooms() {
        let inverted = BasicRoomConfig { room_size_min: 6, room_size_max: 4, ..Default::default() };
        assert_eq!(
            inverted.validate(20, 20),
            Err(ConfigError::InvertedRange { parameter: "room_size", min: 6, max: 4 })
        );

        let counts = BasicRoomConfig { room_count_min: 3, room_count_max: 2, ..Default::default() };
        assert!(matches!(
            counts.validate(20, 20),
            Err(ConfigError::InvertedRange { parameter: "room_count", .. })
        ));

        let oversized = BasicRoomConfig { room_size_max: 12, ..Default::default() };
        assert!(matches!(oversized.validate(20, 10), Err(ConfigError::DoesNotFit { .. })));
        assert_eq!(BasicRoomConfig::default().validate(20, 20), Ok(()));
    }

    #[test]
    fn bsp_config_requires_depth_and_ordered_connections() {
        assert!(BspConfig { division_depth: 0, ..Default::default() }.validate().is_err());
        let inverted = BspConfig {
            min_connections_per_room: 3,
            max_connections_per_room: 2,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
        assert_eq!(BspConfig::default().validate(), Ok(()));
    }

    #[test]
    fn cellular_config_checks_density_and_thresholds() {
        let dense = CellularConfig { starting_density: 1.5, ..Default::default() };
        assert!(matches!(dense.validate(), Err(ConfigError::OutOfRange { .. })));

        let thresholds =
            CellularConfig { min_neighbors_for_new_life: 4, ..Default::default() };
        assert!(matches!(
            thresholds.validate(),
            Err(ConfigError::InvertedRange { parameter: "neighbors_for_new_life", .. })
        ));
        assert_eq!(CellularConfig::default().validate(), Ok(()));
    }

    #[test]
    fn map_config_needs_generators() {
        let config = MapConfig { width: 10, height: 10, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyGeneratorSequence));
    }

    #[test]
    fn map_config_topology_defaults_to_square() {
        let square: MapConfig = serde_json::from_str(
            r#"{ "width": 8, "height": 8, "generators": [{ "strategy": "cellular_automata" }] }"#,
        )
        .expect("parse square map");
        assert_eq!(square.topology, Topology::Square);

        let hex: MapConfig = serde_json::from_str(
            r#"{ "width": 8, "height": 8, "topology": "hex", "generators": [] }"#,
        )
        .expect("parse hex map");
        assert_eq!(hex.topology, Topology::Hex);
    }

    #[test]
    fn generator_config_parses_tagged_json_with_defaults() {
        let json = r#"{
            "strategy": "basic_room_placement",
            "room_count_min": 2,
            "room_count_max": 5,
            "selected_areas": [{
                "shape": "rectangle",
                "top_left": { "x": 0, "y": 0 },
                "size": { "width": 10, "height": 8 }
            }]
        }"#;
        let config: GeneratorConfig = serde_json::from_str(json).expect("parse config");

        assert_eq!(config.seed, None);
        assert_eq!(config.step_delay(), Duration::ZERO);
        assert_eq!(config.selected_areas, vec![Shape::rectangle(Pos::new(0, 0), Size::new(10, 8))]);
        let StrategyConfig::BasicRoomPlacement(basic) = &config.strategy else {
            panic!("expected basic room placement, got {:?}", config.strategy);
        };
        assert_eq!(basic.room_count_min, 2);
        assert_eq!(basic.room_count_max, 5);
        assert_eq!(basic.attempts_per_room, DEFAULT_ATTEMPTS_PER_ROOM);
    }
}
