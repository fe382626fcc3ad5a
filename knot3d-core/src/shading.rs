/// Flat face shading: Lambert brightness and a normal-driven hue
use std::f64::consts::{PI, TAU};

use crate::vector::Vec3;

/// Brightness floor so that no face is fully black
pub const AMBIENT: f64 = 0.1;

/// Faces whose intensity byte ends up below this are not drawn
pub const MIN_INTENSITY: u8 = 20;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Lambert term `normal · light`, floored at [`AMBIENT`]
pub fn brightness(normal: &Vec3, light_direction: &Vec3) -> f64 {
    normal.dot(light_direction).max(AMBIENT)
}

/// Hue in `[0, 1)` from the direction of the normal in the xy-plane, shifted
/// by `color_shift` turns
pub fn hue(normal: &Vec3, color_shift: f64) -> f64 {
    let base = (normal.y.atan2(normal.x) + PI) / TAU;
    (base + color_shift).rem_euclid(1.0)
}

/// Six-segment piecewise-linear hue wheel at full saturation and value
pub fn hue_to_rgb(hue: f64) -> (f64, f64, f64) {
    let scaled = hue.rem_euclid(1.0) * 6.0;
    // rem_euclid can round up to exactly 1.0
    let segment = (scaled.floor() as usize).min(5);
    let t = scaled - segment as f64;

    match segment {
        0 => (1.0, t, 0.0),
        1 => (1.0 - t, 1.0, 0.0),
        2 => (0.0, 1.0, t),
        3 => (0.0, 1.0 - t, 1.0),
        4 => (t, 0.0, 1.0),
        _ => (1.0, 0.0, 1.0 - t),
    }
}

/// Color of a flat-shaded face, or `None` if it would be too dark to draw
pub fn shade(normal: &Vec3, light_direction: &Vec3, color_shift: f64) -> Option<Rgb> {
    let intensity = (brightness(normal, light_direction) * 255.0) as u8;
    if intensity < MIN_INTENSITY {
        return None;
    }

    let (r, g, b) = hue_to_rgb(hue(normal, color_shift));
    let scale = |channel: f64| (intensity as f64 * channel) as u8;
    Some(Rgb::new(scale(r), scale(g), scale(b)))
}
