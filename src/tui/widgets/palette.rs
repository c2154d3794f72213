//! Continuous color scales for charts and tables.

use ratatui::style::Color;

/// Viridis, sampled at nine evenly spaced stops.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 45, 123),
    (59, 82, 139),
    (44, 114, 142),
    (33, 145, 140),
    (40, 174, 128),
    (94, 201, 98),
    (173, 220, 48),
    (253, 231, 37),
];

/// Sequential blues, light to dark.
const BLUES: [(u8, u8, u8); 9] = [
    (247, 251, 255),
    (222, 235, 247),
    (198, 219, 239),
    (158, 202, 225),
    (107, 174, 214),
    (66, 146, 198),
    (33, 113, 181),
    (8, 81, 156),
    (8, 48, 107),
];

/// Color at position `t` (clamped to 0..=1) on the viridis scale.
pub fn viridis(t: f64) -> Color {
    sample(&VIRIDIS, t)
}

/// Color at position `t` (clamped to 0..=1) on the blues scale.
pub fn blues(t: f64) -> Color {
    sample(&BLUES, t)
}

/// Foreground that stays readable on `blues(t)`.
pub fn blues_text(t: f64) -> Color {
    if t > 0.5 {
        Color::White
    } else {
        Color::Black
    }
}

/// Maps `value` into 0..=1 relative to `[min, max]`. A flat range maps to 1.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let span = max - min;
    if span <= f64::EPSILON {
        return 1.0;
    }
    ((value - min) / span).clamp(0.0, 1.0)
}

/// Distinct categorical colors drawn from viridis.
pub fn categorical(index: usize, count: usize) -> Color {
    if count <= 1 {
        return viridis(0.0);
    }
    viridis(index as f64 / (count - 1) as f64)
}

fn sample(stops: &[(u8, u8, u8)], t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (stops.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(stops.len() - 1);
    let frac = scaled - lower as f64;

    let (r0, g0, b0) = stops[lower];
    let (r1, g1, b1) = stops[upper];
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;

    Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}
