//! Lineage forest assembly.
//!
//! Records only know their parent. The builder turns the flat record list
//! into one tree per root paper. Nodes live in a flat arena whose slots
//! match the record slots of the build's [`PaperIndex`], and children are
//! slot lists kept in input order (the order later decides which child of
//! a fork grows to the left).

use std::collections::HashSet;

use crate::diagnostics::Diagnostic;
use crate::layout::ParentResolution;
use crate::paper::{PaperIndex, PaperRecord};

/// Color used by plants whose root paper has none.
pub const DEFAULT_FLOWER_COLOR: &str = "#aaaaaa";

/// Arena node wrapping one record.
#[derive(Debug, Clone, Default)]
pub struct PlantNode {
    /// Child slots in input order.
    pub children: Vec<usize>,
    /// Set by the layout for children that grow to the left of a fork.
    pub is_left_child: bool,
    /// Set by the layout: the base color of the plant this node grows on.
    pub flower_color: Option<String>,
    /// Whether the node was attached below some parent.
    attached: bool,
}

/// One plant: a root paper and its lineage.
#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    pub name: String,
    pub flower_color: String,
    /// Slot of the root paper.
    pub root: usize,
}

/// The lineage forest of one build.
#[derive(Debug, Default)]
pub struct Forest {
    index: PaperIndex,
    nodes: Vec<PlantNode>,
    plants: Vec<Plant>,
}

impl Forest {
    /// Plants in input order of their root records.
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    /// The record index of this build.
    pub fn index(&self) -> &PaperIndex {
        &self.index
    }

    /// Give up the forest, keeping the record index.
    pub fn into_index(self) -> PaperIndex {
        self.index
    }

    /// Layout state of the paper at `slot`.
    pub fn node(&self, slot: usize) -> Option<&PlantNode> {
        self.nodes.get(slot)
    }

    /// Mutable layout state of the paper at `slot`.
    pub fn node_mut(&mut self, slot: usize) -> Option<&mut PlantNode> {
        self.nodes.get_mut(slot)
    }

    /// Record stored at `slot`.
    pub fn record(&self, slot: usize) -> Option<&PaperRecord> {
        self.index.record(slot)
    }

    /// Child slots of `slot`.
    pub fn children(&self, slot: usize) -> &[usize] {
        self.nodes
            .get(slot)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Slots of the subtree below `root` (inclusive) in pre-order.
    pub fn subtree(&self, root: usize) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(slot) = stack.pop() {
            if slot >= self.nodes.len() {
                continue;
            }
            order.push(slot);
            stack.extend(self.children(slot).iter().rev().copied());
        }
        order
    }

    /// Number of papers that made it into some plant.
    pub fn tree_size(&self) -> usize {
        self.plants
            .iter()
            .map(|plant| self.subtree(plant.root).len())
            .sum()
    }
}

/// Builds a [`Forest`] from input records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    resolution: ParentResolution,
}

impl TreeBuilder {
    /// Create a builder with the given parent resolution mode.
    pub fn new(resolution: ParentResolution) -> Self {
        Self { resolution }
    }

    /// Create a builder with single-pass parent resolution.
    pub fn with_defaults() -> Self {
        Self::new(ParentResolution::default())
    }

    /// Assemble the forest.
    ///
    /// Problems with single records are pushed to `diagnostics`; the
    /// affected papers are left out of every plant.
    pub fn build(&self, records: Vec<PaperRecord>, diagnostics: &mut Vec<Diagnostic>) -> Forest {
        let mut forest = Forest {
            index: PaperIndex::with_capacity(records.len()),
            nodes: Vec::with_capacity(records.len()),
            plants: Vec::new(),
        };

        match self.resolution {
            ParentResolution::SinglePass => {
                for record in records {
                    let slot = Self::insert(&mut forest, record, diagnostics);
                    Self::place(&mut forest, slot, diagnostics);
                }
            }
            ParentResolution::TwoPass => {
                let slots: Vec<usize> = records
                    .into_iter()
                    .map(|record| Self::insert(&mut forest, record, diagnostics))
                    .collect();
                for slot in slots {
                    Self::place(&mut forest, slot, diagnostics);
                }
            }
        }

        Self::report_unreachable(&forest, diagnostics);
        forest
    }

    fn insert(forest: &mut Forest, record: PaperRecord, diagnostics: &mut Vec<Diagnostic>) -> usize {
        let id = record.id.clone();
        let (slot, replaced) = forest.index.insert(record);
        forest.nodes.push(PlantNode::default());
        if replaced {
            diagnostics.push(Diagnostic::DuplicatePaperId { paper: id });
        }
        slot
    }

    /// Start a plant for a root, or attach a non-root below its parent.
    fn place(forest: &mut Forest, slot: usize, diagnostics: &mut Vec<Diagnostic>) {
        let Some(record) = forest.index.record(slot) else {
            return;
        };

        if record.is_root {
            let flower_color = record
                .plant_color
                .clone()
                .filter(|color| !color.is_empty())
                .unwrap_or_else(|| DEFAULT_FLOWER_COLOR.to_owned());
            forest.plants.push(Plant {
                name: record.plant_name.clone().unwrap_or_default(),
                flower_color,
                root: slot,
            });
            return;
        }

        let parent_slot = record
            .parent
            .as_ref()
            .and_then(|parent| forest.index.slot_of(parent))
            .filter(|&parent_slot| parent_slot != slot);

        match parent_slot {
            Some(parent_slot) => {
                forest.nodes[parent_slot].children.push(slot);
                forest.nodes[slot].attached = true;
            }
            None => diagnostics.push(Diagnostic::DanglingParent {
                paper: record.id.clone(),
                parent: record.parent.clone(),
            }),
        }
    }

    /// Report attached papers whose parent chain never reaches a root.
    fn report_unreachable(forest: &Forest, diagnostics: &mut Vec<Diagnostic>) {
        let reachable: HashSet<usize> = forest
            .plants
            .iter()
            .flat_map(|plant| forest.subtree(plant.root))
            .collect();

        for (slot, node) in forest.nodes.iter().enumerate() {
            if node.attached && !reachable.contains(&slot) {
                if let Some(record) = forest.index.record(slot) {
                    diagnostics.push(Diagnostic::UnreachablePaper {
                        paper: record.id.clone(),
                    });
                }
            }
        }
    }
}
