#![forbid(unsafe_code)]

//! Treemap layout + SVG emission for marquee.
//!
//! The pipeline is two pure stages: [`layout_chart`] turns a validated
//! sales tree into a [`model::ChartLayout`] (a declarative description of
//! every tile and legend entry), and [`svg::render_chart_svg`] serializes
//! that description to an SVG string. Hover behavior lives in [`hover`]
//! as an explicit state machine so hosts can drive it with real pointer
//! events.

pub mod color;
pub mod hover;
pub mod label;
pub mod model;
pub mod svg;
pub mod treemap;

use marquee_core::{ChartConfig, SalesNode};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid chart model: {message}")]
    InvalidModel { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

pub use svg::SvgRenderOptions;
pub use treemap::layout_chart;

/// Convenience wrapper: layout + SVG emission in one call.
pub fn render_dataset_svg(
    root: &SalesNode,
    config: &ChartConfig,
    options: &SvgRenderOptions,
) -> Result<String> {
    let layout = layout_chart(root, config)?;
    Ok(svg::render_chart_svg(&layout, options))
}
