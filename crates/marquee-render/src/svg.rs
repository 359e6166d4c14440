use std::fmt::Write as _;

use crate::hover::tooltip_lines;
use crate::model::ChartLayout;

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Optional id for the root `<svg>` element, useful when embedding
    /// several charts in one document.
    pub chart_id: Option<String>,
    /// When true, each tile group carries a `<title>` element so the
    /// static document shows hover tooltips without scripting.
    pub include_tooltips: bool,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            chart_id: None,
            include_tooltips: true,
        }
    }
}

/// Serializes a [`ChartLayout`] to an SVG document.
///
/// The emitted shape mirrors the reference surface: one group per tile
/// (a `class="tile"` rect exposing `data-name`/`data-category`/
/// `data-value`, plus a `class="tile-text"` label with one `<tspan>` per
/// line) followed by a `id="legend"` group with a white backing band.
pub fn render_chart_svg(layout: &ChartLayout, options: &SvgRenderOptions) -> String {
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
    if let Some(id) = options.chart_id.as_deref() {
        let _ = write!(&mut out, r#" id="{}""#, escape_attr(id));
    }
    let _ = write!(
        &mut out,
        r#" preserveAspectRatio="xMinYMin meet" viewBox="0 0 {w} {h}">"#,
        w = fmt(layout.width),
        h = fmt(layout.height),
    );
    out.push_str("<g>");

    for tile in &layout.tiles {
        let _ = write!(
            &mut out,
            r#"<g class="cell" transform="translate({x},{y})">"#,
            x = fmt(tile.x0),
            y = fmt(tile.y0)
        );

        if options.include_tooltips {
            let lines = tooltip_lines(&tile.name, tile.category.as_deref(), tile.value);
            let _ = write!(
                &mut out,
                "<title>{}</title>",
                escape_xml(&lines.join("\n"))
            );
        }

        let _ = write!(
            &mut out,
            r#"<rect id="{id}" class="tile" width="{w}" height="{h}" data-name="{name}""#,
            id = escape_attr(&tile.id),
            w = fmt(tile.width()),
            h = fmt(tile.height()),
            name = escape_attr(&tile.name),
        );
        if let Some(category) = tile.category.as_deref() {
            let _ = write!(
                &mut out,
                r#" data-category="{}""#,
                escape_attr(category)
            );
        }
        let _ = write!(
            &mut out,
            r#" data-value="{value}" fill="{fill}"/>"#,
            value = fmt(tile.value),
            fill = escape_attr(&tile.fill),
        );

        out.push_str(r#"<text class="tile-text">"#);
        for (i, line) in tile.label_lines.iter().enumerate() {
            let _ = write!(
                &mut out,
                r#"<tspan font-size="10px" fill="white" x="2" y="{y}">{text}</tspan>"#,
                y = fmt(10.0 * (i as f64 + 1.0)),
                text = escape_xml(line)
            );
        }
        out.push_str("</text></g>");
    }

    out.push_str(r#"<g id="legend">"#);
    let _ = write!(
        &mut out,
        r##"<rect y="{y}" width="{w}" height="{h}" fill="#fff"/>"##,
        y = fmt(layout.legend_top()),
        w = fmt(layout.width),
        h = fmt(layout.legend_height),
    );
    for item in &layout.legend {
        let _ = write!(
            &mut out,
            r#"<rect class="legend-item" x="{x}" y="{y}" width="{s}" height="{s}" fill="{fill}"/>"#,
            x = fmt(item.swatch_x),
            y = fmt(item.swatch_y),
            s = fmt(item.swatch_size),
            fill = escape_attr(&item.fill),
        );
        let _ = write!(
            &mut out,
            r##"<text font-size="12px" fill="#555" x="{x}" y="{y}">{text}</text>"##,
            x = fmt(item.label_x),
            y = fmt(item.label_y),
            text = escape_xml(&item.label),
        );
    }
    out.push_str("</g>");

    out.push_str("</g></svg>\n");
    out
}

pub(crate) fn fmt(v: f64) -> String {
    // Round-trippable decimal form (similar to JS `Number#toString()`),
    // avoiding `-0` and tiny float noise from our own calculations.
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn escape_attr(text: &str) -> String {
    // Attributes only need escaped XML here. No URL encoding.
    escape_xml(text)
}
