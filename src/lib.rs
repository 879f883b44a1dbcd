//! Research Garden - WASM Module
//!
//! This crate lays out a publication lineage as a garden of plants. Every
//! root paper grows a plant in its own slot; derived papers branch off their
//! parent as flowers, and indirect connections are drawn as lines between
//! flowers. The crate is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen; rendering is left to the host.
//!
//! # Architecture
//!
//! - `paper`: Input records, identifiers and the per-build record index
//! - `forest`: Lineage forest assembled from the records
//! - `layout`: Plant geometry, draw instructions and garden composition
//! - `spatial`: R-tree spatial indexing for flower hit testing
//! - `diagnostics`: Non-fatal build diagnostics and boundary errors

use js_sys::Float32Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod diagnostics;
pub mod forest;
pub mod layout;
pub mod paper;
pub mod spatial;

use diagnostics::{Diagnostic, GardenError};
use layout::{Garden, GardenComposer, GardenConfig};
use paper::{CoauthorSelection, PaperId, PaperRecord, DEFAULT_COAUTHOR_LIMIT};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for the garden.
///
/// Holds the configuration and the most recent build. Every call to
/// `buildGarden` replaces the previous garden as a whole.
#[wasm_bindgen]
pub struct ResearchGardenWasm {
    composer: GardenComposer,
    garden: Option<Garden>,
    selection: CoauthorSelection,
}

#[wasm_bindgen]
impl ResearchGardenWasm {
    /// Create a garden with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_config(GardenConfig::default())
    }

    /// Create a garden from a (partial) configuration object.
    ///
    /// Missing fields take their default values; `null` or `undefined`
    /// gives the default configuration.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<ResearchGardenWasm, JsValue> {
        if config.is_null() || config.is_undefined() {
            return Ok(Self::new());
        }
        let config: GardenConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| GardenError::InvalidConfig(e.to_string()))?;
        Ok(Self::from_config(config))
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Build a garden from an array of paper records.
    ///
    /// Returns the garden (plants, draw instructions in paint order,
    /// placements and diagnostics) as a plain JS object. Diagnostics are
    /// also written to the console as warnings. A highlighted coauthor stays
    /// selected and applies to the new garden.
    #[wasm_bindgen(js_name = buildGarden)]
    pub fn build_garden(&mut self, papers: JsValue) -> Result<JsValue, JsValue> {
        let records: Vec<PaperRecord> = serde_wasm_bindgen::from_value(papers)
            .map_err(|e| GardenError::InvalidPapers(e.to_string()))?;

        let garden = self.composer.build(records);
        report(&garden.diagnostics);

        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let value = garden
            .serialize(&serializer)
            .map_err(|e| GardenError::Serialization(e.to_string()))?;

        self.garden = Some(garden);
        Ok(value)
    }

    /// Whether a garden has been built.
    #[wasm_bindgen(js_name = hasGarden)]
    pub fn has_garden(&self) -> bool {
        self.garden.is_some()
    }

    /// Canvas width of the current garden.
    pub fn width(&self) -> f32 {
        match &self.garden {
            Some(garden) => garden.width,
            None => self.composer.config().garden_width(0),
        }
    }

    /// Canvas height of the current garden.
    pub fn height(&self) -> f32 {
        self.composer.config().garden_height
    }

    // =========================================================================
    // Flowers
    // =========================================================================

    /// Number of flowers in the current garden.
    #[wasm_bindgen(js_name = flowerCount)]
    pub fn flower_count(&self) -> u32 {
        self.garden
            .as_ref()
            .map_or(0, |garden| garden.placements.len() as u32)
    }

    /// Flower positions as a Float32Array [x0, y0, x1, y1, ...].
    ///
    /// Order matches `flowerIds`.
    #[wasm_bindgen(js_name = flowerPositions)]
    pub fn flower_positions(&self) -> Float32Array {
        let positions: Vec<f32> = self
            .garden
            .iter()
            .flat_map(|garden| garden.placements.iter())
            .flat_map(|placement| [placement.position.x, placement.position.y])
            .collect();
        Float32Array::from(&positions[..])
    }

    /// Paper ids of the flowers, in traversal order.
    #[wasm_bindgen(js_name = flowerIds)]
    pub fn flower_ids(&self) -> Vec<String> {
        self.garden
            .iter()
            .flat_map(|garden| garden.placements.iter())
            .map(|placement| placement.paper.to_string())
            .collect()
    }

    /// Paper id of the flower nearest `(x, y)` within `radius`.
    #[wasm_bindgen(js_name = flowerAt)]
    pub fn flower_at(&self, x: f32, y: f32, radius: f32) -> Option<String> {
        self.garden
            .as_ref()?
            .flower_at(x, y, radius)
            .map(|placement| placement.paper.to_string())
    }

    // =========================================================================
    // Paper details and coauthors
    // =========================================================================

    /// Detail view data for a paper, or `null` if the id is unknown.
    #[wasm_bindgen(js_name = paperDetails)]
    pub fn paper_details(&self, id: &str) -> Result<JsValue, JsValue> {
        let details = self
            .garden
            .as_ref()
            .and_then(|garden| garden.details(&PaperId::from(id)));
        match details {
            Some(details) => to_js(&details),
            None => Ok(JsValue::NULL),
        }
    }

    /// The most frequent coauthors of the current garden.
    ///
    /// `limit` of 0 uses the default of ten.
    #[wasm_bindgen(js_name = topCoauthors)]
    pub fn top_coauthors(&self, limit: usize) -> Result<JsValue, JsValue> {
        let limit = if limit == 0 { DEFAULT_COAUTHOR_LIMIT } else { limit };
        let ranking = self
            .garden
            .as_ref()
            .map(|garden| garden.index().coauthor_ranking(limit))
            .unwrap_or_default();
        to_js(&ranking)
    }

    /// Toggle the highlighted coauthor.
    ///
    /// Returns the ids of the papers to highlight; empty when the call
    /// cleared the selection.
    #[wasm_bindgen(js_name = selectCoauthor)]
    pub fn select_coauthor(&mut self, name: &str) -> Vec<String> {
        self.selection.toggle(name);
        self.highlighted_papers()
    }

    /// The highlighted coauthor, if any.
    #[wasm_bindgen(js_name = selectedCoauthor)]
    pub fn selected_coauthor(&self) -> Option<String> {
        self.selection.selected().map(str::to_owned)
    }

    /// Ids of the papers listing the highlighted coauthor.
    #[wasm_bindgen(js_name = highlightedPapers)]
    pub fn highlighted_papers(&self) -> Vec<String> {
        match &self.garden {
            Some(garden) => self
                .selection
                .highlighted(garden.index())
                .iter()
                .map(PaperId::to_string)
                .collect(),
            None => Vec::new(),
        }
    }
}

impl ResearchGardenWasm {
    fn from_config(config: GardenConfig) -> Self {
        Self {
            composer: GardenComposer::new(config),
            garden: None,
            selection: CoauthorSelection::new(),
        }
    }

    /// The current garden, for native callers.
    pub fn garden(&self) -> Option<&Garden> {
        self.garden.as_ref()
    }
}

impl Default for ResearchGardenWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| GardenError::Serialization(e.to_string()).into())
}

/// Forward build diagnostics to the browser console.
fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        web_sys::console::warn_1(&JsValue::from_str(&diagnostic.to_string()));
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use layout::{DrawInstruction, StemKind, StemShape};

    fn records(json: &str) -> Vec<PaperRecord> {
        serde_json::from_str(json).unwrap()
    }

    fn branch_stems(garden: &Garden) -> Vec<&StemShape> {
        garden
            .instructions
            .iter()
            .filter_map(|instruction| match instruction {
                DrawInstruction::Stem {
                    shape,
                    kind: StemKind::Branch,
                    ..
                } => Some(shape),
                _ => None,
            })
            .collect()
    }

    fn connection_count(garden: &Garden) -> usize {
        garden
            .instructions
            .iter()
            .filter(|instruction| matches!(instruction, DrawInstruction::Connection { .. }))
            .count()
    }

    /// Two roots with one child each, using numeric ids.
    #[test]
    fn test_two_plant_document() {
        let garden = GardenComposer::with_defaults().build(records(
            r##"[
                {"id": 1, "root_node": true, "root_name": "A", "root_color": "#3366cc"},
                {"id": 2, "root_node": true, "root_name": "B", "root_color": "#cc3366"},
                {"id": 3, "parent": 1, "title": "X"},
                {"id": 4, "parent": 2, "title": "Y"}
            ]"##,
        ));

        assert_eq!(garden.plants.len(), 2);
        assert_eq!(garden.placements.len(), 4);

        let x = garden.placement(&PaperId::from(3u32)).unwrap();
        let y = garden.placement(&PaperId::from(4u32)).unwrap();
        assert!((y.position.x - x.position.x - 400.0).abs() < 1e-4);
        assert_eq!(connection_count(&garden), 0);
        assert!(garden.diagnostics.is_empty());
    }

    #[test]
    fn test_every_reachable_paper_laid_out_once() {
        let garden = GardenComposer::with_defaults().build(records(
            r##"[
                {"id": "root", "root_node": true, "root_name": "Lab", "root_color": "#2e8b57"},
                {"id": "a", "parent": "root", "title": "A"},
                {"id": "b", "parent": "root", "title": "B"},
                {"id": "c", "parent": "a", "title": "C"},
                {"id": "orphan", "parent": "missing", "title": "O"},
                {"id": "d", "parent": "orphan", "title": "D"}
            ]"##,
        ));

        let mut laid_out: Vec<&str> = garden
            .placements
            .iter()
            .map(|placement| placement.paper.as_str())
            .collect();
        laid_out.sort_unstable();
        assert_eq!(laid_out, vec!["a", "b", "c", "root"]);
        assert_eq!(garden.diagnostics.len(), 2);
    }

    #[test]
    fn test_single_child_chain_uses_straight_stems() {
        let garden = GardenComposer::with_defaults().build(vec![
            PaperRecord::root(1u32, "A", "#3366cc"),
            PaperRecord::child(2u32, 1u32, "a"),
            PaperRecord::child(3u32, 2u32, "b"),
            PaperRecord::child(4u32, 3u32, "c"),
        ]);

        let stems = branch_stems(&garden);
        assert_eq!(stems.len(), 3);
        assert!(stems.iter().all(|shape| !shape.is_curved()));
    }

    #[test]
    fn test_fork_uses_opposite_curves() {
        let garden = GardenComposer::with_defaults().build(vec![
            PaperRecord::root(1u32, "A", "#3366cc"),
            PaperRecord::child(2u32, 1u32, "a"),
            PaperRecord::child(3u32, 1u32, "b"),
        ]);

        let ends: Vec<f32> = garden
            .instructions
            .iter()
            .filter_map(|instruction| match instruction {
                DrawInstruction::Stem {
                    start,
                    end,
                    shape,
                    kind: StemKind::Branch,
                } if shape.is_curved() => Some(end.x - start.x),
                _ => None,
            })
            .collect();
        assert_eq!(ends.len(), 2);
        assert!(ends[0] < 0.0 && ends[1] > 0.0);
    }

    #[test]
    fn test_connection_to_later_sibling_subtree_is_omitted() {
        let build = |config: GardenConfig| {
            GardenComposer::new(config).build(vec![
                PaperRecord::root(1u32, "A", "#3366cc"),
                PaperRecord::child(2u32, 1u32, "early").with_connections([4u32]),
                PaperRecord::child(3u32, 1u32, "sibling"),
                PaperRecord::child(4u32, 3u32, "late").with_connections([2u32]),
            ])
        };

        let lossy = build(GardenConfig::default());
        // 4 -> 2 resolves, 2 -> 4 does not
        assert_eq!(connection_count(&lossy), 1);
        assert_eq!(
            lossy.diagnostics,
            vec![Diagnostic::UnresolvedConnection {
                paper: PaperId::from(2u32),
                target: PaperId::from(4u32),
            }]
        );

        let deferred = build(GardenConfig {
            connection_resolution: layout::ConnectionResolution::Deferred,
            ..Default::default()
        });
        assert_eq!(connection_count(&deferred), 2);
        assert!(deferred.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_document() {
        let garden = GardenComposer::with_defaults().build(records("[]"));

        assert!(garden.plants.is_empty());
        assert_eq!(garden.instructions.len(), 2);
        assert!(garden.diagnostics.is_empty());
    }

    #[test]
    fn test_facade_without_build() {
        let garden = ResearchGardenWasm::new();

        assert!(!garden.has_garden());
        assert_eq!(garden.flower_count(), 0);
        assert!(garden.flower_ids().is_empty());
        assert!(garden.flower_at(0.0, 0.0, 100.0).is_none());
        assert!(garden.highlighted_papers().is_empty());
        assert!((garden.width() - 100.0).abs() < 1e-4);
        assert!((garden.height() - 580.0).abs() < 1e-4);
    }

    #[test]
    fn test_null_fields_still_build() {
        let garden = GardenComposer::with_defaults().build(records(
            r##"[
                {"id": 1, "root_node": true, "root_name": "A", "root_color": "#3366cc"},
                {"id": 2, "parent": 1, "title": null, "coauthors": null,
                 "indirect_connections": null}
            ]"##,
        ));

        assert_eq!(garden.placements.len(), 2);
        assert!(garden.diagnostics.is_empty());
        assert!(garden.index().coauthor_ranking(DEFAULT_COAUTHOR_LIMIT).is_empty());
    }
}
