// src/draw/path_draw.rs
// Parsed document elements translated to Nannou Draw calls

use nannou::prelude::*;
use crate::markup::{Document, PathCommand, PathElement};
use super::{color_for, turtle_draw::draw_turtle, DrawParams, Transform2D};

use nannou::lyon::tessellation::LineCap;

use std::f32::consts::PI;

const ARC_RESOLUTION: usize = 64;

/// Scales the canvas to fit inside the window, centered.
pub fn fit_transform(document: &Document, window: Rect) -> Transform2D {
    let scale_x = window.w() / document.width.max(1) as f32;
    let scale_y = window.h() / document.height.max(1) as f32;
    Transform2D {
        translation: Vec2::ZERO,
        scale: scale_x.min(scale_y),
        rotation: 0.0,
    }
}

pub fn draw_document(draw: &Draw, document: &Document, transform: &Transform2D) {
    let center = (document.width as f32 / 2.0, document.height as f32 / 2.0);

    // canvas background
    draw.rect()
        .xy(transform.translation)
        .w_h(
            document.width as f32 * transform.scale,
            document.height as f32 * transform.scale,
        )
        .color(color_for(&document.background));

    for element in &document.elements {
        draw_element(draw, element, center, transform);
    }

    if let Some(turtle) = &document.turtle {
        draw_turtle(draw, turtle, center, transform);
    }
}

pub fn draw_element(
    draw: &Draw,
    element: &PathElement,
    center: (f32, f32),
    transform: &Transform2D,
) {
    match element {
        PathElement::Line { x1, y1, x2, y2, color, width } => {
            let params = DrawParams {
                color: color_for(color),
                stroke_weight: *width as f32 * transform.scale,
            };
            let start = transform_point(*x1 as f32, *y1 as f32, center, transform);
            let end = transform_point(*x2 as f32, *y2 as f32, center, transform);
            draw_line(draw, start, end, &params);
        }
        PathElement::Arc {
            start_x, start_y, rx, ry, x_axis_rotation, large_arc, sweep, end_x, end_y, color, width,
        } => {
            let params = DrawParams {
                color: color_for(color),
                stroke_weight: *width as f32 * transform.scale,
            };
            let start = transform_point(*start_x as f32, *start_y as f32, center, transform);
            let end = transform_point(*end_x as f32, *end_y as f32, center, transform);
            let points = arc_points(
                start,
                end,
                (*rx as f32 * transform.scale, *ry as f32 * transform.scale),
                *x_axis_rotation as f32,
                *large_arc,
                *sweep,
            );
            for window in points.windows(2) {
                if let [p1, p2] = window {
                    draw_line(draw, *p1, *p2, &params);
                }
            }
        }
        PathElement::Fill { commands, color } => {
            let outline = fill_outline(commands, center, transform);
            if outline.len() >= 3 {
                draw.polygon().points(outline).color(color_for(color));
            }
        }
    }
}

// Method to transform from origin at top left to origin at center and apply transform
pub(super) fn transform_point(svg_x: f32, svg_y: f32, center: (f32, f32), transform: &Transform2D) -> Point2 {
    // 1. Translate from SVG coordinates (top-left origin) to local coordinates
    let local_x = svg_x - center.0;
    let local_y = center.1 - svg_y; // invert y to match nannou

    // 2. Apply scale
    let scaled_x = local_x * transform.scale;
    let scaled_y = local_y * transform.scale;

    // 3. Apply rotation
    let cos_rot = transform.rotation.cos();
    let sin_rot = transform.rotation.sin();
    let rotated_x = (scaled_x * cos_rot) - (scaled_y * sin_rot);
    let rotated_y = (scaled_x * sin_rot) + (scaled_y * cos_rot);

    // 4. Apply final translation to Nannou coordinates
    pt2(
        transform.translation.x + rotated_x,
        transform.translation.y + rotated_y,
    )
}

fn draw_line(draw: &Draw, start: Point2, end: Point2, params: &DrawParams) {
    draw.line()
        .points(start, end)
        .color(params.color)
        .stroke_weight(params.stroke_weight)
        .caps(LineCap::Round);
}

// Walks the fill's path commands, flattening arcs, in screen space
fn fill_outline(commands: &[PathCommand], center: (f32, f32), transform: &Transform2D) -> Vec<Point2> {
    let mut outline: Vec<Point2> = Vec::new();
    for command in commands {
        match command {
            PathCommand::MoveTo(x, y) | PathCommand::LineTo(x, y) => {
                outline.push(transform_point(*x as f32, *y as f32, center, transform));
            }
            PathCommand::ArcTo { rx, ry, x_axis_rotation, large_arc, sweep, x, y } => {
                let end = transform_point(*x as f32, *y as f32, center, transform);
                match outline.last().copied() {
                    Some(start) => {
                        let points = arc_points(
                            start,
                            end,
                            (*rx as f32 * transform.scale, *ry as f32 * transform.scale),
                            *x_axis_rotation as f32,
                            *large_arc,
                            *sweep,
                        );
                        outline.extend(points.into_iter().skip(1));
                    }
                    None => outline.push(end),
                }
            }
            PathCommand::Close => {}
        }
    }
    outline
}

/// Samples an SVG elliptical arc between two screen-space points.
fn arc_points(
    start: Point2,
    end: Point2,
    (rx, ry): (f32, f32),
    x_axis_rotation: f32,
    large_arc: bool,
    sweep: bool,
) -> Vec<Point2> {
    if rx.abs() < f32::EPSILON || ry.abs() < f32::EPSILON || start == end {
        return vec![start, end];
    }

    let (center, start_angle, sweep_angle, (rx, ry)) =
        calculate_arc_center(start, end, rx.abs(), ry.abs(), x_axis_rotation, large_arc, sweep);

    let rotation = x_axis_rotation.to_radians();
    (0..=ARC_RESOLUTION)
        .map(|i| {
            let t = i as f32 / ARC_RESOLUTION as f32;
            let angle = start_angle + t * sweep_angle;
            let x = center.x + rx * (angle.cos() * rotation.cos() - angle.sin() * rotation.sin());
            let y = center.y + ry * (angle.cos() * rotation.sin() + angle.sin() * rotation.cos());
            pt2(x, y)
        })
        .collect()
}

// Returns (center, start_angle, sweep_angle, corrected radii) for points in
// Nannou space. The center flip compensates for Nannou's y axis; a positive
// SVG sweep still runs clockwise on screen.
fn calculate_arc_center(
    start: Point2,
    end: Point2,
    rx: f32,
    ry: f32,
    x_axis_rotation: f32,
    large_arc: bool,
    sweep: bool,
) -> (Point2, f32, f32, (f32, f32)) {
    // Step 1: Transform to origin and unrotated coordinates
    let dx = (start.x - end.x) / 2.0;
    let dy = (start.y - end.y) / 2.0;

    let angle_rad = x_axis_rotation.to_radians();
    let cos_phi = angle_rad.cos();
    let sin_phi = angle_rad.sin();

    let x1p = cos_phi * dx + sin_phi * dy;
    let y1p = -sin_phi * dx + cos_phi * dy;

    // Step 2: Ensure radii are large enough
    let x1p_sq = x1p * x1p;
    let y1p_sq = y1p * y1p;
    let radii_check = x1p_sq / (rx * rx) + y1p_sq / (ry * ry);
    let (rx, ry) = if radii_check > 1.0 {
        let sqrt_scale = radii_check.sqrt();
        (rx * sqrt_scale, ry * sqrt_scale)
    } else {
        (rx, ry)
    };

    // Step 3: Calculate center parameters
    let rx_sq = rx * rx;
    let ry_sq = ry * ry;
    let term = (rx_sq * ry_sq - rx_sq * y1p_sq - ry_sq * x1p_sq) / (rx_sq * y1p_sq + ry_sq * x1p_sq);
    let s = if term <= 0.0 { 0.0 } else { term.sqrt() };

    let cxp = s * rx * y1p / ry;
    let cyp = -s * ry * x1p / rx;

    // Flip the center for a positive sweep; y is mirrored in Nannou space
    let (cxp, cyp) = if sweep { (-cxp, -cyp) } else { (cxp, cyp) };

    // Step 4: Transform center back to original coordinate space
    let cx = cos_phi * cxp - sin_phi * cyp + (start.x + end.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (start.y + end.y) / 2.0;

    // Step 5: Calculate angles
    let start_angle = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
    let mut sweep_angle = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx) - start_angle;

    if !sweep && sweep_angle > 0.0 {
        sweep_angle -= 2.0 * PI;
    } else if sweep && sweep_angle < 0.0 {
        sweep_angle += 2.0 * PI;
    }

    // Force the short path for !large_arc
    if !large_arc && sweep_angle.abs() > PI {
        sweep_angle = if sweep_angle > 0.0 {
            sweep_angle - 2.0 * PI
        } else {
            sweep_angle + 2.0 * PI
        };
    }

    (pt2(cx, cy), start_angle, sweep_angle, (rx, ry))
}
