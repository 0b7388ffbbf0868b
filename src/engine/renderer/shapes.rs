// Unlit debug geometry: spheres and the ground grid, in world space

use super::ColorVertex;
use glam::{Vec3, Vec4};
use std::f32::consts::{PI, TAU};

const GRID_AXIS_GRAY: Vec4 = Vec4::new(0.5, 0.5, 0.5, 1.0);
const GRID_LINE_GRAY: Vec4 = Vec4::new(0.75, 0.75, 0.75, 1.0);

/// Point on a sphere for latitude band `ring` (0 = south pole) and meridian `slice`
fn sphere_point(center: Vec3, radius: f32, ring: u32, rings: u32, slice: u32, slices: u32) -> Vec3 {
    let theta = PI * ring as f32 / rings as f32 - PI / 2.0;
    let phi = TAU * slice as f32 / slices as f32;
    center + Vec3::new(theta.cos() * phi.sin(), theta.sin(), theta.cos() * phi.cos()) * radius
}

/// Solid UV sphere as a triangle list
pub fn sphere_triangles(
    out: &mut Vec<ColorVertex>,
    center: Vec3,
    radius: f32,
    rings: u32,
    slices: u32,
    color: Vec4,
) {
    let rings = rings.max(2);
    let slices = slices.max(3);
    let point = |ring, slice| {
        ColorVertex::new(sphere_point(center, radius, ring, rings, slice, slices), color)
    };

    for ring in 0..rings {
        for slice in 0..slices {
            let a = point(ring, slice);
            let b = point(ring, slice + 1);
            let c = point(ring + 1, slice);
            let d = point(ring + 1, slice + 1);
            out.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }
}

/// Wireframe UV sphere as a line list
pub fn sphere_wires(
    out: &mut Vec<ColorVertex>,
    center: Vec3,
    radius: f32,
    rings: u32,
    slices: u32,
    color: Vec4,
) {
    let rings = rings.max(2);
    let slices = slices.max(3);
    let point = |ring, slice| {
        ColorVertex::new(sphere_point(center, radius, ring, rings, slice, slices), color)
    };

    for ring in 0..rings {
        for slice in 0..slices {
            // Meridian segment
            out.push(point(ring, slice));
            out.push(point(ring + 1, slice));
            // Parallel segment (skip the degenerate south pole)
            if ring > 0 {
                out.push(point(ring, slice));
                out.push(point(ring, slice + 1));
            }
        }
    }
}

/// Square grid on the XZ plane centered at the origin, as a line list
///
/// `slices` cells per side, each `spacing` wide; the center lines are darker.
pub fn grid_lines(out: &mut Vec<ColorVertex>, slices: u32, spacing: f32) {
    let half = (slices / 2) as i32;
    let extent = half as f32 * spacing;

    for i in -half..=half {
        let color = if i == 0 { GRID_AXIS_GRAY } else { GRID_LINE_GRAY };
        let offset = i as f32 * spacing;

        out.push(ColorVertex::new(Vec3::new(offset, 0.0, -extent), color));
        out.push(ColorVertex::new(Vec3::new(offset, 0.0, extent), color));
        out.push(ColorVertex::new(Vec3::new(-extent, 0.0, offset), color));
        out.push(ColorVertex::new(Vec3::new(extent, 0.0, offset), color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_triangle_count() {
        let mut out = Vec::new();
        sphere_triangles(&mut out, Vec3::ZERO, 0.2, 8, 8, Vec4::ONE);
        assert_eq!(out.len(), 8 * 8 * 6);
    }

    #[test]
    fn test_sphere_points_on_surface() {
        let center = Vec3::new(-2.0, 2.0, -2.0);
        let mut out = Vec::new();
        sphere_triangles(&mut out, center, 0.2, 8, 8, Vec4::ONE);
        for v in &out {
            assert_relative_eq!(Vec3::from(v.position).distance(center), 0.2, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sphere_wires_are_line_pairs() {
        let mut out = Vec::new();
        sphere_wires(&mut out, Vec3::ZERO, 1.0, 8, 8, Vec4::new(1.0, 0.0, 0.0, 0.3));
        assert_eq!(out.len() % 2, 0);
        assert_eq!(out.len(), (8 * 8 + 7 * 8) * 2);
        assert!(out.iter().all(|v| v.color[3] == 0.3));
    }

    #[test]
    fn test_grid_extent() {
        let mut out = Vec::new();
        grid_lines(&mut out, 150, 1.0);

        // 151 lines in each direction, two vertices each
        assert_eq!(out.len(), 151 * 4);
        let max_x = out.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        assert_relative_eq!(max_x, 75.0);
        assert!(out.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn test_grid_center_line_is_darker() {
        let mut out = Vec::new();
        grid_lines(&mut out, 2, 1.0);
        let center: Vec<_> = out.iter().filter(|v| v.color[0] == 0.5).collect();
        assert_eq!(center.len(), 4);
    }
}
