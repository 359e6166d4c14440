use crate::model::TileLayout;
use crate::svg::fmt;

/// Pointer position in page coordinates, passed explicitly into the
/// hover transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// Offset between the pointer and the tooltip's top-left corner.
pub const TOOLTIP_OFFSET: f64 = 10.0;

/// Tooltip presentation state. Hover transitions only ever touch this;
/// chart data is immutable once laid out.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible {
        name: String,
        category: Option<String>,
        value: f64,
        x: f64,
        y: f64,
    },
}

impl TooltipState {
    /// Entering a tile shows the tooltip near the pointer, populated from
    /// that tile.
    pub fn pointer_enter(tile: &TileLayout, pointer: Pointer) -> Self {
        Self::Visible {
            name: tile.name.clone(),
            category: tile.category.clone(),
            value: tile.value,
            x: pointer.x + TOOLTIP_OFFSET,
            y: pointer.y + TOOLTIP_OFFSET,
        }
    }

    /// Leaving a tile hides the tooltip.
    pub fn pointer_leave() -> Self {
        Self::Hidden
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Visible { .. })
    }

    /// The tooltip's display lines, empty while hidden.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Hidden => Vec::new(),
            Self::Visible {
                name,
                category,
                value,
                ..
            } => tooltip_lines(name, category.as_deref(), *value),
        }
    }
}

pub(crate) fn tooltip_lines(name: &str, category: Option<&str>, value: f64) -> Vec<String> {
    vec![
        format!("Name: {name}"),
        format!("Category: {}", category.unwrap_or("-")),
        format!("Value: {}", fmt(value)),
    ]
}
