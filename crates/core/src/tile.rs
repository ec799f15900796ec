//! Named tile tags attached to active cells.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity is the name; metadata rides along for whoever renders the grid.
#[derive(Clone)]
pub struct TileType {
    inner: Arc<TileTypeData>,
}

struct TileTypeData {
    name: String,
    metadata: BTreeMap<String, String>,
}

impl TileType {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_metadata(name, BTreeMap::new())
    }

    pub fn with_metadata(name: impl Into<String>, metadata: BTreeMap<String, String>) -> Self {
        Self { inner: Arc::new(TileTypeData { name: name.into(), metadata }) }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.inner.metadata.get(key).map(String::as_str)
    }
}

impl PartialEq for TileType {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for TileType {}

impl Hash for TileType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl fmt::Debug for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TileType").field(&self.name()).finish()
    }
}

#[derive(Clone, Debug, Default)]
pub struct TileTypeRegistry {
    types: Vec<TileType>,
}

impl TileTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tile_type` unless a type with the same name exists; returns the stored one.
    pub fn register(&mut self, tile_type: TileType) -> TileType {
        if let Some(existing) = self.find_by_name(tile_type.name()) {
            return existing.clone();
        }
        self.types.push(tile_type.clone());
        tile_type
    }

    pub fn find_by_name(&self, name: &str) -> Option<&TileType> {
        self.types.iter().find(|tile_type| tile_type.name() == name)
    }

    pub fn merge(&mut self, other: &TileTypeRegistry) {
        for tile_type in &other.types {
            self.register(tile_type.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
