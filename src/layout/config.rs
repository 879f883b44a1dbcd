//! Garden layout configuration.

use serde::Deserialize;

/// How non-root records find their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentResolution {
    /// Parents must appear before their children in the input; later
    /// parents are not found and the child is dropped.
    #[default]
    SinglePass,
    /// All records are indexed first, so input order does not matter.
    TwoPass,
}

/// When indirect connections are resolved against known positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionResolution {
    /// Resolve while the owning paper is visited; targets not laid out yet
    /// are skipped.
    #[default]
    SamePass,
    /// Resolve once every plant has been laid out.
    Deferred,
}

/// Configuration for the garden layout.
///
/// All lengths are in SVG user units. The y axis points down, so the sky
/// is at small y and the garden baseline sits at `garden_height`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Horizontal slot width reserved for each plant.
    pub plant_width: f32,
    /// Canvas height; also the baseline every plant grows from.
    pub garden_height: f32,
    /// Extra width added to the canvas beyond the plant slots.
    pub garden_margin: f32,
    /// Length of the straight stem below each root paper.
    pub root_stem_height: f32,
    /// Gap between the baseline and the bottom of the root stem.
    pub root_offset: f32,
    /// Vertical length of every stem between papers.
    pub stem_height: f32,
    /// Horizontal distance of a forked child from its parent.
    pub branch_spread: f32,
    /// Horizontal distance of a paper label from its flower.
    pub label_offset: f32,
    /// Distance between label lines.
    pub label_line_height: f32,
    /// Downward shift applied to every label line.
    pub label_baseline: f32,
    /// How far the plant name sits above the root stem bottom.
    pub plant_label_rise: f32,
    /// Shade applied to a plant color for idle flowers (negative darkens).
    pub idle_shade: i32,
    pub cloud_width: f32,
    pub cloud_height: f32,
    pub cloud_offset: f32,
    pub wave_width: f32,
    pub wave_height: f32,
    pub wave_offset: f32,
    pub parent_resolution: ParentResolution,
    pub connection_resolution: ConnectionResolution,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            plant_width: 400.0,
            garden_height: 580.0,
            garden_margin: 100.0,
            root_stem_height: 70.0,
            root_offset: 60.0,
            stem_height: 80.0,
            branch_spread: 50.0,
            label_offset: 30.0,
            label_line_height: 20.0,
            label_baseline: 15.0,
            plant_label_rise: 15.0,
            idle_shade: -30,
            cloud_width: 75.0,
            cloud_height: 30.0,
            cloud_offset: 0.0,
            wave_width: 150.0,
            wave_height: 50.0,
            wave_offset: 80.0,
            parent_resolution: ParentResolution::SinglePass,
            connection_resolution: ConnectionResolution::SamePass,
        }
    }
}

impl GardenConfig {
    /// Canvas width for `plant_count` plants.
    pub fn garden_width(&self, plant_count: usize) -> f32 {
        self.plant_width * plant_count as f32 + self.garden_margin
    }

    /// Center x of the slot at `index`.
    pub fn slot_center(&self, index: usize) -> f32 {
        (index as f32 + 0.5) * self.plant_width
    }

    /// Height above the baseline where each root paper sits.
    pub fn root_rise(&self) -> f32 {
        self.root_stem_height + self.root_offset
    }
}
