//! Draw instructions handed to the renderer.
//!
//! The layout engine never touches the DOM. It emits a flat list of typed
//! primitives in garden coordinates which the JS side turns into SVG
//! nodes. Styling is expressed as intent (plant identity, colors, label
//! side) rather than CSS strings.

use serde::Serialize;

use crate::paper::PaperId;

/// A point in garden coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// This point moved by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Identity of a plant: its position in the garden, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlantId(pub usize);

/// Geometry of one stem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum StemShape {
    /// A straight segment.
    Straight,
    /// A cubic curve through two control points.
    Curved { control1: Point, control2: Point },
}

impl StemShape {
    /// Whether the stem needs control points.
    pub fn is_curved(&self) -> bool {
        matches!(self, Self::Curved { .. })
    }
}

/// Which part of a plant a stem belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StemKind {
    /// The stem below a root paper.
    Root,
    /// A stem between a paper and one of its children.
    Branch,
}

/// One line of a text block, already positioned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub text: String,
    pub position: Point,
}

/// What a text block labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum TextStyle {
    /// The name under a plant.
    PlantName { plant: PlantId },
    /// A paper title next to its flower; left-branch labels are
    /// right-aligned towards the flower.
    PaperTitle { plant: PlantId, left_branch: bool },
}

/// Fill intent for a flower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowerStyle {
    pub plant: PlantId,
    /// Fill while idle: the plant color shaded.
    pub idle_fill: String,
    /// Fill while hovered: the plant color itself.
    pub hover_fill: String,
}

/// Style intent for an indirect connection line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectionStyle {
    /// Plant of the paper the connection starts at.
    pub plant: PlantId,
}

/// Decorative background layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundLayer {
    Clouds,
    Grass,
}

/// One command of a closed outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo { to: Point },
    LineTo { to: Point },
    CubicTo { control1: Point, control2: Point, to: Point },
    Close,
}

/// A renderable primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawInstruction {
    Stem {
        start: Point,
        end: Point,
        shape: StemShape,
        kind: StemKind,
    },
    Text {
        lines: Vec<TextLine>,
        style: TextStyle,
    },
    Flower {
        anchor: Point,
        paper: PaperId,
        style: FlowerStyle,
    },
    Connection {
        from: Point,
        to: Point,
        source: PaperId,
        target: PaperId,
        style: ConnectionStyle,
    },
    Background {
        layer: BackgroundLayer,
        outline: Vec<PathSegment>,
    },
}

/// Instructions collected per paint layer during a build.
///
/// Connections paint first so the scenery covers their ends, flowers
/// paint last so they stay clickable above stems and labels.
#[derive(Debug, Default)]
pub struct DrawList {
    connections: Vec<DrawInstruction>,
    background: Vec<DrawInstruction>,
    plants: Vec<DrawInstruction>,
    flowers: Vec<DrawInstruction>,
}

impl DrawList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection line; connections paint behind everything else.
    pub fn push_connection(
        &mut self,
        from: Point,
        to: Point,
        source: &PaperId,
        target: &PaperId,
        style: ConnectionStyle,
    ) {
        self.connections.push(DrawInstruction::Connection {
            from,
            to,
            source: source.clone(),
            target: target.clone(),
            style,
        });
    }

    /// Add a background band.
    pub fn push_background(&mut self, layer: BackgroundLayer, outline: Vec<PathSegment>) {
        self.background
            .push(DrawInstruction::Background { layer, outline });
    }

    /// Add a stem to the plant layer.
    pub fn push_stem(&mut self, start: Point, end: Point, shape: StemShape, kind: StemKind) {
        self.plants.push(DrawInstruction::Stem {
            start,
            end,
            shape,
            kind,
        });
    }

    /// Add a text block to the plant layer.
    pub fn push_text(&mut self, lines: Vec<TextLine>, style: TextStyle) {
        self.plants.push(DrawInstruction::Text { lines, style });
    }

    /// Add a flower; flowers paint on top.
    pub fn push_flower(&mut self, anchor: Point, paper: &PaperId, style: FlowerStyle) {
        self.flowers.push(DrawInstruction::Flower {
            anchor,
            paper: paper.clone(),
            style,
        });
    }

    /// Flatten into paint order.
    pub fn into_instructions(self) -> Vec<DrawInstruction> {
        let mut out = Vec::with_capacity(
            self.connections.len() + self.background.len() + self.plants.len() + self.flowers.len(),
        );
        out.extend(self.connections);
        out.extend(self.background);
        out.extend(self.plants);
        out.extend(self.flowers);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_offset() {
        let p = Point::new(10.0, 20.0).offset(-5.0, 3.0);
        assert_eq!(p, Point::new(5.0, 23.0));
    }

    #[test]
    fn test_paint_order() {
        let mut list = DrawList::new();
        let a = PaperId::from("a");
        let b = PaperId::from("b");

        list.push_flower(
            Point::default(),
            &a,
            FlowerStyle {
                plant: PlantId(0),
                idle_fill: "#000000".into(),
                hover_fill: "#111111".into(),
            },
        );
        list.push_stem(
            Point::default(),
            Point::new(0.0, -80.0),
            StemShape::Straight,
            StemKind::Branch,
        );
        list.push_background(BackgroundLayer::Grass, vec![PathSegment::Close]);
        list.push_connection(
            Point::default(),
            Point::new(1.0, 1.0),
            &a,
            &b,
            ConnectionStyle { plant: PlantId(0) },
        );

        let kinds: Vec<&str> = list
            .into_instructions()
            .iter()
            .map(|instruction| match instruction {
                DrawInstruction::Connection { .. } => "connection",
                DrawInstruction::Background { .. } => "background",
                DrawInstruction::Stem { .. } => "stem",
                DrawInstruction::Text { .. } => "text",
                DrawInstruction::Flower { .. } => "flower",
            })
            .collect();
        assert_eq!(kinds, vec!["connection", "background", "stem", "flower"]);
    }

    #[test]
    fn test_instruction_json_shape() {
        let stem = DrawInstruction::Stem {
            start: Point::new(0.0, 0.0),
            end: Point::new(-50.0, -80.0),
            shape: StemShape::Curved {
                control1: Point::new(-30.0, 5.0),
                control2: Point::new(-50.0, 0.0),
            },
            kind: StemKind::Branch,
        };
        let json = serde_json::to_value(&stem).unwrap();
        assert_eq!(json["type"], "stem");
        assert_eq!(json["kind"], "branch");
        assert_eq!(json["shape"]["shape"], "curved");
        assert_eq!(json["shape"]["control1"]["x"], -30.0);
    }

    #[test]
    fn test_connection_carries_style() {
        let connection = DrawInstruction::Connection {
            from: Point::new(200.0, 370.0),
            to: Point::new(600.0, 450.0),
            source: PaperId::from("a"),
            target: PaperId::from("b"),
            style: ConnectionStyle { plant: PlantId(0) },
        };
        let json = serde_json::to_value(&connection).unwrap();
        assert_eq!(json["type"], "connection");
        assert_eq!(json["style"]["plant"], 0);
        assert_eq!(json["target"], "b");
    }
}
