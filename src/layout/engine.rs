//! Plant layout.
//!
//! Each plant is walked depth-first from its root paper, which sits on top
//! of a fixed root stem at the center of the plant's slot. Every visited
//! paper is registered in the [`PositionRegistry`] before its children are
//! laid out, and its indirect connections are resolved only after its
//! whole subtree is done.
//!
//! # Branch geometry
//!
//! - no children: the paper is a leaf.
//! - one child: a straight stem of `stem_height` straight up.
//! - two children: two curved stems, `branch_spread` to the left for the
//!   first child and to the right for the second.
//! - more children: curved stems fanned out evenly over the same spread,
//!   reported as [`Diagnostic::ExcessChildren`].
//!
//! Plant-local offsets are accumulated during the walk and converted into
//! garden coordinates through the plant's [`PlantFrame`].

use serde::Serialize;

use super::color::shade;
use super::config::{ConnectionResolution, GardenConfig};
use super::draw::{
    ConnectionStyle, DrawList, FlowerStyle, PlantId, Point, StemKind, StemShape, TextLine,
    TextStyle,
};
use super::registry::PositionRegistry;
use crate::diagnostics::Diagnostic;
use crate::forest::{Forest, Plant};
use crate::paper::PaperId;

/// How far along the spread the first control point of a branch sits.
const BRANCH_CURVE_PULL: f32 = 0.6;
/// How far below the parent the first control point of a branch dips.
const BRANCH_CURVE_SAG: f32 = 5.0;

/// Where a paper ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowerPlacement {
    pub paper: PaperId,
    pub plant: PlantId,
    /// Garden coordinates of the flower.
    pub position: Point,
    /// Distance from the plant's root paper.
    pub depth: u32,
    pub is_left_child: bool,
}

/// Maps plant-local offsets into garden coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantFrame {
    /// Center x of the plant's slot.
    pub origin_x: f32,
    /// The garden baseline.
    pub baseline_y: f32,
}

impl PlantFrame {
    /// Convert a plant-local point into garden coordinates.
    #[inline]
    pub fn to_garden(&self, local: Point) -> Point {
        Point::new(self.origin_x + local.x, self.baseline_y + local.y)
    }
}

#[derive(Debug)]
struct PendingConnection {
    source: PaperId,
    from: Point,
    target: PaperId,
    style: ConnectionStyle,
}

/// A stem drawn just before the paper it leads to.
#[derive(Debug)]
struct IncomingStem {
    start: Point,
    end: Point,
    shape: StemShape,
}

/// Work item of the plant walk.
#[derive(Debug)]
enum Step {
    /// Place the paper at `slot` and queue its children.
    Enter {
        slot: usize,
        local: Point,
        depth: u32,
        stem: Option<IncomingStem>,
    },
    /// Every child of `slot` is done.
    Leave {
        slot: usize,
        position: Point,
        depth: u32,
    },
}

/// Mutable state of one build.
///
/// A context is created per build and dropped with it, so separate builds
/// never see each other's positions.
#[derive(Debug, Default)]
pub struct LayoutContext {
    pub registry: PositionRegistry,
    pub draw: DrawList,
    pub placements: Vec<FlowerPlacement>,
    pub diagnostics: Vec<Diagnostic>,
    pending: Vec<PendingConnection>,
}

impl LayoutContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from diagnostics gathered before the layout.
    pub fn with_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            ..Self::default()
        }
    }
}

/// Per-plant values shared by every paper of the plant.
struct PlantScope {
    id: PlantId,
    frame: PlantFrame,
    color: String,
}

/// The plant layout engine.
pub struct LayoutEngine<'a> {
    config: &'a GardenConfig,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine using `config`.
    pub fn new(config: &'a GardenConfig) -> Self {
        Self { config }
    }

    /// Frame of the plant in slot `plant`.
    pub fn frame(&self, plant: PlantId) -> PlantFrame {
        PlantFrame {
            origin_x: self.config.slot_center(plant.0),
            baseline_y: self.config.garden_height,
        }
    }

    /// Lay out one plant of `forest`.
    ///
    /// Unknown plant ids are ignored.
    pub fn layout_plant(&self, forest: &mut Forest, plant: PlantId, ctx: &mut LayoutContext) {
        let Some(Plant {
            name,
            flower_color,
            root,
        }) = forest.plants().get(plant.0).cloned()
        else {
            return;
        };

        let scope = PlantScope {
            id: plant,
            frame: self.frame(plant),
            color: flower_color,
        };

        self.draw_plant_base(&scope, &name, ctx);

        let anchor = Point::new(0.0, -self.config.root_rise());
        self.walk(forest, root, anchor, &scope, ctx);
    }

    /// Resolve connections held back for [`ConnectionResolution::Deferred`].
    ///
    /// Call after every plant has been laid out.
    pub fn finish(&self, ctx: &mut LayoutContext) {
        for pending in std::mem::take(&mut ctx.pending) {
            match ctx.registry.lookup(&pending.target) {
                Some(to) => ctx.draw.push_connection(
                    pending.from,
                    to,
                    &pending.source,
                    &pending.target,
                    pending.style,
                ),
                None => ctx.diagnostics.push(Diagnostic::UnresolvedConnection {
                    paper: pending.source,
                    target: pending.target,
                }),
            }
        }
    }

    /// Root stem and the plant name below it.
    fn draw_plant_base(&self, scope: &PlantScope, name: &str, ctx: &mut LayoutContext) {
        let config = self.config;
        let stem_bottom = scope.frame.to_garden(Point::new(0.0, -config.root_offset));
        let stem_top = scope.frame.to_garden(Point::new(0.0, -config.root_rise()));
        ctx.draw
            .push_stem(stem_bottom, stem_top, StemShape::Straight, StemKind::Root);

        let first_line = scope
            .frame
            .to_garden(Point::new(0.0, -(config.root_offset - config.plant_label_rise)));
        let lines = name
            .split('\n')
            .enumerate()
            .map(|(i, text)| TextLine {
                text: text.to_owned(),
                position: first_line.offset(0.0, i as f32 * config.label_line_height),
            })
            .collect();
        ctx.draw
            .push_text(lines, TextStyle::PlantName { plant: scope.id });
    }

    /// Depth-first walk over one plant.
    ///
    /// Runs on an explicit work stack so chain depth is bounded by memory,
    /// not by the call stack.
    fn walk(
        &self,
        forest: &mut Forest,
        root: usize,
        anchor: Point,
        scope: &PlantScope,
        ctx: &mut LayoutContext,
    ) {
        let mut stack = vec![Step::Enter {
            slot: root,
            local: anchor,
            depth: 0,
            stem: None,
        }];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter {
                    slot,
                    local,
                    depth,
                    stem,
                } => self.enter(forest, slot, local, depth, stem, scope, ctx, &mut stack),
                Step::Leave {
                    slot,
                    position,
                    depth,
                } => self.leave(forest, slot, position, depth, scope, ctx),
            }
        }
    }

    /// Register a paper and queue its children, each behind its stem.
    #[allow(clippy::too_many_arguments)]
    fn enter(
        &self,
        forest: &mut Forest,
        slot: usize,
        local: Point,
        depth: u32,
        stem: Option<IncomingStem>,
        scope: &PlantScope,
        ctx: &mut LayoutContext,
        stack: &mut Vec<Step>,
    ) {
        if let Some(IncomingStem { start, end, shape }) = stem {
            ctx.draw.push_stem(start, end, shape, StemKind::Branch);
        }

        let Some(record) = forest.record(slot) else {
            return;
        };
        let id = record.id.clone();
        let position = scope.frame.to_garden(local);

        // Duplicate ids keep their first position; the builder reported them.
        ctx.registry.record(&id, position);

        if let Some(node) = forest.node_mut(slot) {
            node.flower_color = Some(scope.color.clone());
        }

        let children = forest.children(slot).to_vec();
        let stem_height = self.config.stem_height;
        let mut queued = Vec::with_capacity(children.len());
        match children.len() {
            0 => {}
            1 => {
                let child = children[0];
                if let Some(node) = forest.node_mut(child) {
                    node.is_left_child = false;
                }
                queued.push(Step::Enter {
                    slot: child,
                    local: local.offset(0.0, -stem_height),
                    depth: depth + 1,
                    stem: Some(IncomingStem {
                        start: position,
                        end: position.offset(0.0, -stem_height),
                        shape: StemShape::Straight,
                    }),
                });
            }
            count => {
                if count > 2 {
                    ctx.diagnostics.push(Diagnostic::ExcessChildren {
                        paper: id.clone(),
                        count,
                    });
                }
                for (i, &child) in children.iter().enumerate() {
                    let dx = fan_offset(i, count, self.config.branch_spread);
                    if let Some(node) = forest.node_mut(child) {
                        node.is_left_child = dx < 0.0;
                    }
                    queued.push(Step::Enter {
                        slot: child,
                        local: local.offset(dx, -stem_height),
                        depth: depth + 1,
                        stem: Some(IncomingStem {
                            start: position,
                            end: position.offset(dx, -stem_height),
                            shape: StemShape::Curved {
                                control1: position
                                    .offset(dx * BRANCH_CURVE_PULL, BRANCH_CURVE_SAG),
                                control2: position.offset(dx, 0.0),
                            },
                        }),
                    });
                }
            }
        }

        stack.push(Step::Leave {
            slot,
            position,
            depth,
        });
        // reversed so the first child is popped first
        stack.extend(queued.into_iter().rev());
    }

    /// Flower, label and connections of a paper whose subtree is done.
    fn leave(
        &self,
        forest: &Forest,
        slot: usize,
        position: Point,
        depth: u32,
        scope: &PlantScope,
        ctx: &mut LayoutContext,
    ) {
        let Some(record) = forest.record(slot) else {
            return;
        };
        let id = record.id.clone();
        let is_left_child = forest.node(slot).is_some_and(|node| node.is_left_child);
        let style = FlowerStyle {
            plant: scope.id,
            idle_fill: shade(&scope.color, self.config.idle_shade),
            hover_fill: scope.color.clone(),
        };

        ctx.draw.push_flower(position, &id, style);
        ctx.draw.push_text(
            self.label_lines(position, is_left_child, record.label_lines()),
            TextStyle::PaperTitle {
                plant: scope.id,
                left_branch: is_left_child,
            },
        );
        ctx.placements.push(FlowerPlacement {
            paper: id.clone(),
            plant: scope.id,
            position,
            depth,
            is_left_child,
        });

        let style = ConnectionStyle { plant: scope.id };
        for target in &record.indirect_connections {
            self.connect(&id, position, target.clone(), style, ctx);
        }
    }

    /// Title block beside the flower, vertically centered on it.
    fn label_lines(&self, flower: Point, is_left_child: bool, lines: Vec<String>) -> Vec<TextLine> {
        let config = self.config;
        let dx = if is_left_child {
            -config.label_offset
        } else {
            config.label_offset
        };
        let count = lines.len() as f32;
        lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| TextLine {
                text,
                position: flower.offset(
                    dx,
                    config.label_baseline + i as f32 * config.label_line_height
                        - 0.5 * config.label_line_height * count,
                ),
            })
            .collect()
    }

    fn connect(
        &self,
        source: &PaperId,
        from: Point,
        target: PaperId,
        style: ConnectionStyle,
        ctx: &mut LayoutContext,
    ) {
        match self.config.connection_resolution {
            ConnectionResolution::Deferred => ctx.pending.push(PendingConnection {
                source: source.clone(),
                from,
                target,
                style,
            }),
            ConnectionResolution::SamePass => match ctx.registry.lookup(&target) {
                Some(to) => ctx.draw.push_connection(from, to, source, &target, style),
                None => ctx.diagnostics.push(Diagnostic::UnresolvedConnection {
                    paper: source.clone(),
                    target,
                }),
            },
        }
    }
}

/// Horizontal offset of child `index` out of `count` fork children.
///
/// Children spread evenly from `-spread` to `+spread`, so a plain fork
/// puts its first child at `-spread` and its second at `+spread`.
fn fan_offset(index: usize, count: usize, spread: f32) -> f32 {
    if count < 2 {
        return 0.0;
    }
    -spread + 2.0 * spread * index as f32 / (count - 1) as f32
}
