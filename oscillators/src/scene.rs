//! Screen-space drawing model of both oscillators
//!
//! Produces plain line segments from a snapshot so that the geometry can be
//! checked without a GPU. Units are screen units with the pivot at the origin
//! and +y pointing up.

use glam::Vec2;

use crate::config::SpringConfig;
use crate::pendulum::PendulumSnapshot;
use crate::spring::SpringSnapshot;

/// Screen units per metre of displayed rod length
pub const PENDULUM_PIXELS_PER_UNIT: f32 = 11.0;
pub const BOB_RADIUS: f32 = 20.0;
pub const SPRING_COILS: usize = 10;
pub const COIL_AMPLITUDE: f32 = 10.0;

const CIRCLE_SEGMENTS: usize = 32;
const BEZIER_SAMPLES: usize = 8;

pub const STRUCTURE_COLOR: [f32; 4] = [0.25, 0.45, 1.0, 1.0];
pub const BOB_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const FROZEN_BOB_COLOR: [f32; 4] = [0.9, 0.35, 0.3, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub segments: Vec<Segment>,
    /// Centre of the bob, for camera framing
    pub bob: Vec2,
}

impl Scene {
    fn line(&mut self, a: Vec2, b: Vec2, color: [f32; 4]) {
        self.segments.push(Segment { a, b, color });
    }

    fn polyline(&mut self, points: &[Vec2], color: [f32; 4]) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color);
        }
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let points: Vec<Vec2> = (0..=CIRCLE_SEGMENTS)
            .map(|i| {
                let t = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
                center + Vec2::new(t.cos(), t.sin()) * radius
            })
            .collect();
        self.polyline(&points, color);
    }
}

fn bob_color(enabled: bool) -> [f32; 4] {
    if enabled {
        BOB_COLOR
    } else {
        FROZEN_BOB_COLOR
    }
}

/// Support, rod and bob of the pendulum
pub fn pendulum_scene(snapshot: &PendulumSnapshot) -> Scene {
    let mut scene = Scene::default();
    let length = snapshot.display_length as f32 * PENDULUM_PIXELS_PER_UNIT;
    let angle = (snapshot.angle_deg as f32).to_radians();
    let bob = Vec2::new(length * angle.sin(), -length * angle.cos());

    scene.line(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0), STRUCTURE_COLOR);
    scene.line(Vec2::ZERO, bob, STRUCTURE_COLOR);
    scene.circle(bob, BOB_RADIUS, bob_color(snapshot.oscillations_enabled));
    scene.bob = bob;
    scene
}

/// Distance from the support down to the bob centre.
///
/// Disabled runs are drawn hanging still at equilibrium; otherwise the bob
/// follows `position` but never rises above `bob_radius`.
pub fn spring_length(snapshot: &SpringSnapshot, config: &SpringConfig) -> f64 {
    if !snapshot.oscillations_enabled {
        snapshot.equilibrium_length
    } else if snapshot.at_rest_length {
        config.compressed_length
    } else {
        (snapshot.equilibrium_length + snapshot.position).max(config.bob_radius)
    }
}

fn cubic(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Points of a coil spring hanging from `top` down to `bottom_y`
pub fn coil_points(top: Vec2, bottom_y: f32) -> Vec<Vec2> {
    let coil_height = (top.y - bottom_y) / SPRING_COILS as f32;
    let mut points = vec![top];

    for i in 0..SPRING_COILS {
        let y_start = top.y - i as f32 * coil_height;
        let y_end = y_start - coil_height;
        let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
        let offset = COIL_AMPLITUDE * direction;

        let p0 = Vec2::new(top.x, y_start);
        let p1 = Vec2::new(top.x + offset, y_start - coil_height / 3.0);
        let p2 = Vec2::new(top.x + offset, y_end + coil_height / 3.0);
        let p3 = Vec2::new(top.x, y_end);
        for s in 1..=BEZIER_SAMPLES {
            points.push(cubic(p0, p1, p2, p3, s as f32 / BEZIER_SAMPLES as f32));
        }
    }
    points
}

/// Support, coil spring and bob of the spring oscillator
pub fn spring_scene(snapshot: &SpringSnapshot, config: &SpringConfig) -> Scene {
    let mut scene = Scene::default();
    let length = spring_length(snapshot, config) as f32;
    let bob = Vec2::new(0.0, -length);

    scene.line(Vec2::new(-20.0, 0.0), Vec2::new(20.0, 0.0), STRUCTURE_COLOR);
    scene.polyline(&coil_points(Vec2::ZERO, bob.y + BOB_RADIUS), STRUCTURE_COLOR);
    scene.circle(bob, BOB_RADIUS, bob_color(snapshot.oscillations_enabled));
    scene.bob = bob;
    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Motion, OscillatorModel};
    use crate::params::{PendulumField, SpringField};
    use crate::pendulum::MathPendulumModel;
    use crate::spring::SpringOscillatorModel;

    #[test]
    fn test_pendulum_bob_hangs_below_pivot() {
        let m = MathPendulumModel::new();
        let scene = pendulum_scene(&m.snapshot(None, Motion::Live));
        assert!(scene.bob.x.abs() < 1e-4);
        assert!((scene.bob.y + 110.0).abs() < 1e-3);
    }

    #[test]
    fn test_pendulum_uses_display_length() {
        let mut m = MathPendulumModel::new();
        m.set_parameter(PendulumField::Length, 500.0).unwrap();
        m.set_parameter(PendulumField::Angle, 90.0).unwrap();
        let scene = pendulum_scene(&m.snapshot(None, Motion::Live));
        // Clamped to 50 for drawing
        assert!((scene.bob.x - 550.0).abs() < 1e-2);
        assert!(scene.bob.y.abs() < 1e-2);
    }

    #[test]
    fn test_spring_length_modes() {
        let config = SpringConfig::default();
        let mut m = SpringOscillatorModel::new();

        let idle = m.snapshot(None, Motion::Live);
        assert_eq!(spring_length(&idle, &config), 200.0);

        m.set_parameter(SpringField::MaxStretch, 30.0).unwrap();
        let stretched = m.snapshot(None, Motion::Live);
        assert!((spring_length(&stretched, &config) - (stretched.equilibrium_length + 30.0)).abs() < 1e-9);

        let frozen = m.snapshot(None, Motion::Frozen);
        assert_eq!(spring_length(&frozen, &config), frozen.equilibrium_length);
    }

    #[test]
    fn test_coil_spans_support_to_bob() {
        let points = coil_points(Vec2::ZERO, -180.0);
        assert_eq!(points.len(), 1 + SPRING_COILS * BEZIER_SAMPLES);
        assert_eq!(points[0], Vec2::ZERO);
        let last = points[points.len() - 1];
        assert!(last.x.abs() < 1e-4);
        assert!((last.y + 180.0).abs() < 1e-3);
        assert!(points.iter().all(|p| p.x.abs() <= COIL_AMPLITUDE));
    }

    #[test]
    fn test_spring_scene_bob_position() {
        let config = SpringConfig::default();
        let mut m = SpringOscillatorModel::new();
        m.set_parameter(SpringField::MaxStretch, 50.0).unwrap();
        let snap = m.snapshot(None, Motion::Live);
        let scene = spring_scene(&snap, &config);
        assert!((scene.bob.y + (snap.equilibrium_length + 50.0) as f32).abs() < 1e-3);
        assert!(!scene.segments.is_empty());
    }
}
