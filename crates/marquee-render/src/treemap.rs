use marquee_core::{ChartConfig, SalesNode};

use crate::color::OrdinalScale;
use crate::label::split_label;
use crate::model::{ChartLayout, LegendItemLayout, TileLayout};
use crate::{Error, Result};

const LEGEND_COLUMN_LEFT: f64 = 300.0;
const LEGEND_COLUMN_STEP: f64 = 90.0;
const LEGEND_SWATCH_TOP: f64 = 40.0;
const LEGEND_SWATCH_SIZE: f64 = 15.0;
const LEGEND_LABEL_DX: f64 = 20.0;
const LEGEND_LABEL_DY: f64 = 11.0;

#[derive(Debug, Clone)]
struct HierNode {
    name: String,
    category: Option<String>,
    /// Dot-joined ancestor path; the root's id is its own name.
    id: String,
    own_value: f64,
    value: f64,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: usize,
    /// Max distance to a leaf (leaves are 0).
    height: usize,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

fn push_node(nodes: &mut Vec<HierNode>, node: &SalesNode, parent: Option<usize>, depth: usize) {
    let own_value = if node.is_leaf() {
        node.value.unwrap_or(0.0)
    } else {
        0.0
    };
    let idx = nodes.len();
    nodes.push(HierNode {
        name: node.name.clone(),
        category: node.category.clone(),
        id: String::new(),
        own_value,
        value: 0.0,
        parent,
        children: Vec::new(),
        depth,
        height: 0,
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: 0.0,
    });

    if let Some(parent_idx) = parent {
        nodes[parent_idx].children.push(idx);
    }

    if let Some(children) = node.children.as_deref() {
        for child in children {
            push_node(nodes, child, Some(idx), depth + 1);
        }
    }
}

fn compute_sum(nodes: &mut [HierNode], idx: usize) -> f64 {
    let mut sum = nodes[idx].own_value;
    let children = nodes[idx].children.clone();
    for c in children {
        sum += compute_sum(nodes, c);
    }
    nodes[idx].value = sum;
    sum
}

fn compute_height(nodes: &mut [HierNode], idx: usize) -> usize {
    let children = nodes[idx].children.clone();
    let mut height = 0usize;
    for c in children {
        height = height.max(compute_height(nodes, c) + 1);
    }
    nodes[idx].height = height;
    height
}

/// Sibling order: taller subtrees first, then higher aggregate values,
/// input order on full ties.
fn sort_children(nodes: &mut [HierNode], idx: usize) {
    let mut items = nodes[idx]
        .children
        .iter()
        .copied()
        .enumerate()
        .map(|(pos, child)| (child, pos))
        .collect::<Vec<_>>();
    items.sort_by(|(a, a_pos), (b, b_pos)| {
        let ah = nodes[*a].height;
        let bh = nodes[*b].height;
        bh.cmp(&ah)
            .then_with(|| {
                let av = nodes[*a].value;
                let bv = nodes[*b].value;
                bv.partial_cmp(&av).unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a_pos.cmp(b_pos))
    });
    nodes[idx].children = items.into_iter().map(|(child, _pos)| child).collect();

    let children = nodes[idx].children.clone();
    for c in children {
        sort_children(nodes, c);
    }
}

fn assign_ids(nodes: &mut [HierNode], root: usize) {
    for idx in each_before(nodes, root) {
        nodes[idx].id = match nodes[idx].parent {
            Some(p) => format!("{}.{}", nodes[p].id, nodes[idx].name),
            None => nodes[idx].name.clone(),
        };
    }
}

fn each_before(nodes: &[HierNode], root: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        out.push(idx);
        let children = &nodes[idx].children;
        for &c in children.iter().rev() {
            stack.push(c);
        }
    }
    out
}

fn leaves_each_before(nodes: &[HierNode], root: usize) -> Vec<usize> {
    let mut out = Vec::new();
    for idx in each_before(nodes, root) {
        if nodes[idx].children.is_empty() {
            out.push(idx);
        }
    }
    out
}

fn treemap_dice(
    nodes: &mut [HierNode],
    children: &[usize],
    row_value: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
) {
    let mut x = x0;
    let k = if row_value != 0.0 {
        (x1 - x0) / row_value
    } else {
        0.0
    };
    for &child in children {
        nodes[child].y0 = y0;
        nodes[child].y1 = y1;
        nodes[child].x0 = x;
        x += nodes[child].value * k;
        nodes[child].x1 = x;
    }
}

fn treemap_slice(
    nodes: &mut [HierNode],
    children: &[usize],
    row_value: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
) {
    let mut y = y0;
    let k = if row_value != 0.0 {
        (y1 - y0) / row_value
    } else {
        0.0
    };
    for &child in children {
        nodes[child].x0 = x0;
        nodes[child].x1 = x1;
        nodes[child].y0 = y;
        y += nodes[child].value * k;
        nodes[child].y1 = y;
    }
}

fn squarify(nodes: &mut [HierNode], parent: usize, mut x0: f64, mut y0: f64, x1: f64, y1: f64) {
    const PHI: f64 = (1.0 + 2.23606797749979) / 2.0;
    let ratio = PHI;

    let children = nodes[parent].children.clone();
    if children.is_empty() {
        return;
    }

    let n = children.len();
    let mut i0 = 0usize;
    let mut i1 = 0usize;
    let mut value = nodes[parent].value;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        let mut sum_value;
        loop {
            if i1 >= n {
                return;
            }
            sum_value = nodes[children[i1]].value;
            i1 += 1;
            if sum_value != 0.0 || i1 >= n {
                break;
            }
        }

        let mut min_value = sum_value;
        let mut max_value = sum_value;

        let alpha = (dy / dx).max(dx / dy) / (value * ratio);
        let mut beta = sum_value * sum_value * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        while i1 < n {
            let node_value = nodes[children[i1]].value;
            sum_value += node_value;
            if node_value < min_value {
                min_value = node_value;
            }
            if node_value > max_value {
                max_value = node_value;
            }
            beta = sum_value * sum_value * alpha;
            let new_ratio = (max_value / beta).max(beta / min_value);
            if new_ratio > min_ratio {
                sum_value -= node_value;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        let dice = dx < dy;
        let row_children = &children[i0..i1];
        if dice {
            let y2 = if value != 0.0 {
                y0 + dy * sum_value / value
            } else {
                y1
            };
            treemap_dice(nodes, row_children, sum_value, x0, y0, x1, y2);
            y0 = y2;
        } else {
            let x2 = if value != 0.0 {
                x0 + dx * sum_value / value
            } else {
                x1
            };
            treemap_slice(nodes, row_children, sum_value, x0, y0, x2, y1);
            x0 = x2;
        }

        value -= sum_value;
        i0 = i1;
    }
}

fn position_node(
    nodes: &mut [HierNode],
    idx: usize,
    padding_stack: &mut Vec<f64>,
    padding_inner: f64,
) {
    let depth = nodes[idx].depth;
    if padding_stack.len() <= depth {
        padding_stack.resize(depth + 1, 0.0);
    }
    let mut p = padding_stack[depth];
    let mut x0 = nodes[idx].x0 + p;
    let mut y0 = nodes[idx].y0 + p;
    let mut x1 = nodes[idx].x1 - p;
    let mut y1 = nodes[idx].y1 - p;
    if x1 < x0 {
        x0 = (x0 + x1) / 2.0;
        x1 = x0;
    }
    if y1 < y0 {
        y0 = (y0 + y1) / 2.0;
        y1 = y0;
    }
    nodes[idx].x0 = x0;
    nodes[idx].y0 = y0;
    nodes[idx].x1 = x1;
    nodes[idx].y1 = y1;

    if nodes[idx].children.is_empty() {
        return;
    }

    // Half the inner padding is shaved off every side of every child; the
    // other half comes back here when the packing area is expanded, so
    // siblings end up separated by exactly `padding_inner` while the
    // outer edges stay flush.
    p = padding_inner / 2.0;
    if padding_stack.len() <= depth + 1 {
        padding_stack.resize(depth + 2, 0.0);
    }
    padding_stack[depth + 1] = p;

    x0 -= p;
    y0 -= p;
    x1 += p;
    y1 += p;
    if x1 < x0 {
        x0 = (x0 + x1) / 2.0;
        x1 = x0;
    }
    if y1 < y0 {
        y0 = (y0 + y1) / 2.0;
        y1 = y0;
    }

    squarify(nodes, idx, x0, y0, x1, y1);
}

/// Computes the full chart layout for a sales tree: hierarchy ids and
/// aggregates, squarified tile packing over the plot area, per-tile fills
/// and label lines, and the legend band entries.
pub fn layout_chart(root: &SalesNode, config: &ChartConfig) -> Result<ChartLayout> {
    if !(config.width.is_finite()
        && config.height.is_finite()
        && config.legend_height.is_finite()
        && config.padding_inner.is_finite())
        || config.width < 0.0
        || config.height < 0.0
    {
        return Err(Error::InvalidModel {
            message: "chart dimensions must be finite and non-negative".to_string(),
        });
    }

    let mut nodes: Vec<HierNode> = Vec::new();
    push_node(&mut nodes, root, None, 0);
    let root_idx = 0usize;

    compute_sum(&mut nodes, root_idx);
    compute_height(&mut nodes, root_idx);
    sort_children(&mut nodes, root_idx);
    assign_ids(&mut nodes, root_idx);

    nodes[root_idx].x0 = 0.0;
    nodes[root_idx].y0 = 0.0;
    nodes[root_idx].x1 = config.width;
    nodes[root_idx].y1 = config.plot_height();

    let mut padding_stack = vec![0.0];
    for idx in each_before(&nodes, root_idx) {
        position_node(
            &mut nodes,
            idx,
            &mut padding_stack,
            config.padding_inner.max(0.0),
        );
    }

    let mut scale = OrdinalScale::default();

    let mut tiles = Vec::new();
    for idx in leaves_each_before(&nodes, root_idx) {
        let fill_key = match (&nodes[idx].category, nodes[idx].parent) {
            (Some(category), _) => category.clone(),
            (None, Some(p)) => nodes[p].name.clone(),
            (None, None) => nodes[idx].name.clone(),
        };
        let fill = scale.get(&fill_key).to_string();
        let n = &nodes[idx];
        tiles.push(TileLayout {
            id: n.id.clone(),
            name: n.name.clone(),
            category: n.category.clone(),
            value: n.value,
            x0: n.x0,
            y0: n.y0,
            x1: n.x1,
            y1: n.y1,
            fill,
            label_lines: split_label(&n.name),
        });
    }

    // The legend walks the root's children in input order (not layout
    // order) and shares the tile color scale, so a swatch and its tiles
    // always agree.
    let legend_top = config.plot_height();
    let mut legend = Vec::new();
    for (i, child) in root.children.as_deref().unwrap_or(&[]).iter().enumerate() {
        let fill = scale.get(&child.name).to_string();
        let swatch_x = LEGEND_COLUMN_LEFT + LEGEND_COLUMN_STEP * i as f64;
        let swatch_y = legend_top + LEGEND_SWATCH_TOP;
        legend.push(LegendItemLayout {
            label: child.name.clone(),
            fill,
            swatch_x,
            swatch_y,
            swatch_size: LEGEND_SWATCH_SIZE,
            label_x: swatch_x + LEGEND_LABEL_DX,
            label_y: swatch_y + LEGEND_LABEL_DY,
        });
    }

    Ok(ChartLayout {
        width: config.width,
        height: config.height,
        legend_height: config.legend_height,
        tiles,
        legend,
    })
}
