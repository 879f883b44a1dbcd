//! Garden composition.
//!
//! The composer runs one complete build: it assembles the lineage forest,
//! gives every plant a slot of `plant_width` from left to right, lays the
//! plants out, and packages the drawing together with the record index.

use serde::Serialize;

use super::config::GardenConfig;
use super::draw::{BackgroundLayer, DrawInstruction, PlantId};
use super::engine::{FlowerPlacement, LayoutContext, LayoutEngine};
use super::scenery;
use crate::diagnostics::Diagnostic;
use crate::forest::{Forest, TreeBuilder};
use crate::paper::{PaperDetails, PaperId, PaperIndex, PaperRecord};
use crate::spatial::FlowerIndex;

/// A plant as shown in the garden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantSummary {
    pub id: PlantId,
    pub name: String,
    pub flower_color: String,
    pub root: PaperId,
    /// Center x of the plant's slot.
    pub slot_center: f32,
}

/// The output of one build.
#[derive(Debug, Serialize)]
pub struct Garden {
    /// Canvas width.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
    pub plants: Vec<PlantSummary>,
    /// Primitives in paint order.
    pub instructions: Vec<DrawInstruction>,
    /// One entry per laid out paper, in traversal order.
    pub placements: Vec<FlowerPlacement>,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip)]
    index: PaperIndex,
    #[serde(skip)]
    flowers: FlowerIndex,
}

impl Garden {
    fn assemble(
        config: &GardenConfig,
        width: f32,
        plants: Vec<PlantSummary>,
        ctx: LayoutContext,
        forest: Forest,
    ) -> Self {
        let flowers = FlowerIndex::from_points(
            ctx.placements
                .iter()
                .enumerate()
                .map(|(slot, placement)| (slot, placement.position.x, placement.position.y)),
        );
        Self {
            width,
            height: config.garden_height,
            plants,
            instructions: ctx.draw.into_instructions(),
            placements: ctx.placements,
            diagnostics: ctx.diagnostics,
            index: forest.into_index(),
            flowers,
        }
    }

    /// Index over every record of the build, laid out or not.
    pub fn index(&self) -> &PaperIndex {
        &self.index
    }

    /// Detail view data for `id`.
    pub fn details(&self, id: &PaperId) -> Option<PaperDetails> {
        self.index.details(id)
    }

    /// Placement of `id`, if it was laid out.
    pub fn placement(&self, id: &PaperId) -> Option<&FlowerPlacement> {
        self.placements.iter().find(|placement| &placement.paper == id)
    }

    /// The flower closest to `(x, y)` within `radius`.
    pub fn flower_at(&self, x: f32, y: f32, radius: f32) -> Option<&FlowerPlacement> {
        self.flowers
            .nearest_within(x, y, radius)
            .and_then(|slot| self.placements.get(slot))
    }

    /// Flowers inside the rectangle spanned by two corners.
    pub fn flowers_in_rect(&self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Vec<&FlowerPlacement> {
        self.flowers
            .in_rect(min_x, min_y, max_x, max_y)
            .into_iter()
            .filter_map(|slot| self.placements.get(slot))
            .collect()
    }
}

/// Runs complete garden builds.
#[derive(Debug, Clone, Default)]
pub struct GardenComposer {
    config: GardenConfig,
}

impl GardenComposer {
    /// Create a composer with the given configuration.
    pub fn new(config: GardenConfig) -> Self {
        Self { config }
    }

    /// Create a composer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(GardenConfig::default())
    }

    /// The configuration every build uses.
    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    /// Build a garden from `records`.
    ///
    /// Never fails: problems with single papers end up in
    /// [`Garden::diagnostics`], and empty input gives an empty garden with
    /// only the background.
    pub fn build(&self, records: Vec<PaperRecord>) -> Garden {
        let config = &self.config;

        let mut diagnostics = Vec::new();
        let mut forest = TreeBuilder::new(config.parent_resolution).build(records, &mut diagnostics);
        let plant_count = forest.plants().len();
        let width = config.garden_width(plant_count);

        let mut ctx = LayoutContext::with_diagnostics(diagnostics);
        ctx.draw
            .push_background(BackgroundLayer::Clouds, scenery::clouds(config, width));
        ctx.draw
            .push_background(BackgroundLayer::Grass, scenery::grass(config, width));

        let engine = LayoutEngine::new(config);
        for i in 0..plant_count {
            engine.layout_plant(&mut forest, PlantId(i), &mut ctx);
        }
        engine.finish(&mut ctx);

        let plants = forest
            .plants()
            .iter()
            .enumerate()
            .filter_map(|(i, plant)| {
                let root = forest.record(plant.root)?;
                Some(PlantSummary {
                    id: PlantId(i),
                    name: plant.name.clone(),
                    flower_color: plant.flower_color.clone(),
                    root: root.id.clone(),
                    slot_center: config.slot_center(i),
                })
            })
            .collect();

        Garden::assemble(config, width, plants, ctx, forest)
    }
}
