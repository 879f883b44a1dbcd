//! Background bands: wavy clouds along the top and wavy grass along the
//! bottom of the canvas.

use super::config::GardenConfig;
use super::draw::{PathSegment, Point};

/// Closed outline of the cloud band.
pub fn clouds(config: &GardenConfig, width: f32) -> Vec<PathSegment> {
    let top = config.cloud_offset;
    let upper = top + 0.3 * config.cloud_height;
    let lower = top + 0.7 * config.cloud_height;

    let mut outline = vec![
        PathSegment::MoveTo {
            to: Point::new(0.0, 0.0),
        },
        PathSegment::CubicTo {
            control1: Point::new(0.0, upper),
            control2: Point::new(0.0, lower),
            to: Point::new(0.0, top),
        },
    ];
    outline.extend(waves(width, config.cloud_width, top, upper, lower));
    outline.extend([
        PathSegment::LineTo {
            to: Point::new(width, 0.0),
        },
        PathSegment::LineTo {
            to: Point::new(0.0, 0.0),
        },
        PathSegment::Close,
    ]);
    outline
}

/// Closed outline of the grass band.
pub fn grass(config: &GardenConfig, width: f32) -> Vec<PathSegment> {
    let height = config.garden_height;
    let top = height - config.wave_offset;

    let mut outline = vec![PathSegment::MoveTo {
        to: Point::new(0.0, top),
    }];
    outline.extend(waves(
        width,
        config.wave_width,
        top,
        top - 0.3 * config.wave_height,
        top - 0.7 * config.wave_height,
    ));
    outline.extend([
        PathSegment::LineTo {
            to: Point::new(width, height),
        },
        PathSegment::LineTo {
            to: Point::new(0.0, height),
        },
        PathSegment::Close,
    ]);
    outline
}

/// Enough cubic waves of `wave_width` to cover `width`.
fn waves(
    width: f32,
    wave_width: f32,
    base: f32,
    first_control: f32,
    second_control: f32,
) -> impl Iterator<Item = PathSegment> {
    let count = if wave_width > 0.0 {
        (width / wave_width).ceil().max(0.0) as usize
    } else {
        0
    };
    (0..count).map(move |i| {
        let x1 = i as f32 * wave_width;
        PathSegment::CubicTo {
            control1: Point::new(x1 + 0.25 * wave_width, first_control),
            control2: Point::new(x1 + 0.75 * wave_width, second_control),
            to: Point::new(x1 + wave_width, base),
        }
    })
}
