//! Terrain color scale.

/// Control points of the terrain scale: position in `[0, 1]` and RGB in `[0, 1]`.
const TERRAIN: [(f64, [f64; 3]); 6] = [
    (0.00, [0.2, 0.2, 0.6]),
    (0.15, [0.0, 0.6, 1.0]),
    (0.25, [0.0, 0.8, 0.4]),
    (0.50, [1.0, 1.0, 0.6]),
    (0.75, [0.5, 0.36, 0.33]),
    (1.00, [1.0, 1.0, 1.0]),
];

/// Terrain color for a normalized value; inputs outside `[0, 1]` are clamped.
pub fn terrain(t: f64) -> [u8; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let upper = TERRAIN
        .iter()
        .position(|(pos, _)| *pos >= t)
        .unwrap_or(TERRAIN.len() - 1)
        .max(1);
    let (p0, c0) = TERRAIN[upper - 1];
    let (p1, c1) = TERRAIN[upper];
    let w = (t - p0) / (p1 - p0);

    let mut rgb = [0u8; 3];
    for (out, (a, b)) in rgb.iter_mut().zip(c0.iter().zip(c1.iter())) {
        *out = ((a + (b - a) * w) * 255.0).round() as u8;
    }
    rgb
}

/// Linear map from a data range onto `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Normalize {
    pub min: f64,
    pub max: f64,
}

impl Normalize {
    /// Range spanning `values`; a flat or empty set gets a unit-wide range.
    pub fn spanning<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in values {
            min = min.min(v);
            max = max.max(v);
        }
        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        if max <= min {
            max = min + 1.0;
        }
        Self { min, max }
    }

    pub fn apply(&self, v: f64) -> f64 {
        (v - self.min) / (self.max - self.min)
    }
}
