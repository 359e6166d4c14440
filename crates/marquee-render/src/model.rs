use serde::{Deserialize, Serialize};

/// One rendered leaf rectangle, with everything the SVG stage (or an
/// interactive host) needs: geometry, data attributes, fill, and the
/// pre-split label lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayout {
    /// Dot-joined ancestor path, root name first.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Aggregate value (the leaf's own value for leaves).
    pub value: f64,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub fill: String,
    pub label_lines: Vec<String>,
}

impl TileLayout {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

/// One legend entry: a color swatch plus its text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendItemLayout {
    pub label: String,
    pub fill: String,
    pub swatch_x: f64,
    pub swatch_y: f64,
    pub swatch_size: f64,
    pub label_x: f64,
    pub label_y: f64,
}

/// Declarative description of the whole chart: everything to draw,
/// nothing about how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    /// Height of the legend band at the bottom of the canvas. The plot
    /// area is `width x (height - legend_height)`.
    pub legend_height: f64,
    pub tiles: Vec<TileLayout>,
    pub legend: Vec<LegendItemLayout>,
}

impl ChartLayout {
    /// Top edge of the legend band.
    pub fn legend_top(&self) -> f64 {
        (self.height - self.legend_height).max(0.0)
    }
}
