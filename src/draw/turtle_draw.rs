// src/draw/turtle_draw.rs
// The turtle glyph in Nannou space

use nannou::prelude::*;

use super::path_draw::transform_point;
use super::{color_for, Transform2D};
use crate::markup::GlyphPose;
use crate::render::{GLYPH_SHAPES, GLYPH_STROKE_WIDTH};

pub fn draw_turtle(draw: &Draw, pose: &GlyphPose, center: (f32, f32), transform: &Transform2D) {
    if !pose.visible {
        return;
    }

    let origin = transform_point(pose.x as f32, pose.y as f32, center, transform);
    // SVG rotates clockwise on a y-down canvas
    let angle = glyph_angle(pose.rotation as f32) + transform.rotation;
    let local = draw.xy(origin).rotate(angle);
    let color = color_for(&pose.color);

    for shape in GLYPH_SHAPES.iter() {
        local
            .ellipse()
            .x_y(shape.cx as f32 * transform.scale, -shape.cy as f32 * transform.scale)
            .w_h(
                shape.rx as f32 * 2.0 * transform.scale,
                shape.ry as f32 * 2.0 * transform.scale,
            )
            .no_fill()
            .stroke(color)
            .stroke_weight(GLYPH_STROKE_WIDTH as f32 * transform.scale);
    }
}

fn glyph_angle(svg_rotation_degrees: f32) -> f32 {
    -svg_rotation_degrees.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_angle_mirrors_svg_rotation() {
        // heading 0 is rotate(-90): the head (SVG local +y, -y here) turns to face +x
        let angle = glyph_angle(-90.0);
        let (x, y) = (0.0f32, -15.0f32);
        let head = vec2(x * angle.cos() - y * angle.sin(), x * angle.sin() + y * angle.cos());
        assert!((head.x - 15.0).abs() < 1e-4);
        assert!(head.y.abs() < 1e-4);
    }
}
