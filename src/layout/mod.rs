//! Garden layout.
//!
//! This module turns a paper forest into positioned draw instructions.
//! [`GardenComposer`] drives a build; [`LayoutEngine`] walks each plant,
//! filling a per-build [`PositionRegistry`] that indirect connections are
//! resolved against.

pub mod color;
pub mod composer;
pub mod config;
pub mod draw;
pub mod engine;
pub mod registry;
pub mod scenery;

pub use color::{shade, FALLBACK_COLOR};
pub use composer::{Garden, GardenComposer, PlantSummary};
pub use config::{ConnectionResolution, GardenConfig, ParentResolution};
pub use draw::{ConnectionStyle, DrawInstruction, PlantId, Point, StemKind, StemShape};
pub use engine::{FlowerPlacement, LayoutContext, LayoutEngine, PlantFrame};
pub use registry::PositionRegistry;
