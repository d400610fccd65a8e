use std::ops::Range;

/// Pointer press in device pixels, origin at the top-left corner of the figure.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerClick {
    pub x_px: f64,
    pub y_px: f64,
}

impl PointerClick {
    pub fn new(x_px: f64, y_px: f64) -> Self {
        Self { x_px, y_px }
    }
}

/// Mapping between the pixel rectangle of a plot and its data ranges.
///
/// Data `y` grows upwards while pixel `y` grows downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub pixels_x: Range<i32>,
    pub pixels_y: Range<i32>,
    pub x: Range<f64>,
    pub y: Range<f64>,
}

impl Viewport {
    /// Data coordinates under `click`, or `None` outside the plot rectangle.
    pub fn to_data(&self, click: PointerClick) -> Option<(f64, f64)> {
        let (px0, px1) = (f64::from(self.pixels_x.start), f64::from(self.pixels_x.end));
        let (py0, py1) = (f64::from(self.pixels_y.start), f64::from(self.pixels_y.end));
        if click.x_px < px0 || click.x_px > px1 || click.y_px < py0 || click.y_px > py1 {
            return None;
        }
        if px1 <= px0 || py1 <= py0 {
            return None;
        }

        let fx = (click.x_px - px0) / (px1 - px0);
        let fy = (click.y_px - py0) / (py1 - py0);
        let x = self.x.start + fx * (self.x.end - self.x.start);
        let y = self.y.end - fy * (self.y.end - self.y.start);
        Some((x, y))
    }

    /// Pixel position of a data point (not clamped to the plot rectangle).
    pub fn to_pixels(&self, x: f64, y: f64) -> (f64, f64) {
        let (px0, px1) = (f64::from(self.pixels_x.start), f64::from(self.pixels_x.end));
        let (py0, py1) = (f64::from(self.pixels_y.start), f64::from(self.pixels_y.end));
        let fx = (x - self.x.start) / (self.x.end - self.x.start);
        let fy = (self.y.end - y) / (self.y.end - self.y.start);
        (px0 + fx * (px1 - px0), py0 + fy * (py1 - py0))
    }
}
