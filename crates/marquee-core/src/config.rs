use serde::Deserialize;

fn default_width() -> f64 {
    1200.0
}

fn default_height() -> f64 {
    615.0
}

fn default_legend_height() -> f64 {
    100.0
}

fn default_padding_inner() -> f64 {
    1.0
}

/// Chart geometry knobs. Defaults reproduce the reference surface:
/// a 1200x615 viewbox with a 100px legend band and 1px tile gaps.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub legend_height: f64,
    pub padding_inner: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            legend_height: default_legend_height(),
            padding_inner: default_padding_inner(),
        }
    }
}

impl ChartConfig {
    /// Height of the treemap plot area (the canvas minus the legend band).
    pub fn plot_height(&self) -> f64 {
        (self.height - self.legend_height).max(0.0)
    }
}
