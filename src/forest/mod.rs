//! Lineage forest built from flat paper records.

mod builder;

pub use builder::{Forest, Plant, PlantNode, TreeBuilder, DEFAULT_FLOWER_COLOR};
