use marquee_core::{ChartConfig, parse_dataset};
use marquee_render::layout_chart;

fn layout(text: &str, config: &ChartConfig) -> marquee_render::model::ChartLayout {
    let root = parse_dataset(text).expect("dataset ok");
    layout_chart(&root, config).expect("layout ok")
}

#[test]
fn tile_ids_are_dot_joined_ancestor_paths() {
    let out = layout(
        r#"{
            "name": "Movies",
            "children": [
                { "name": "Action", "children": [
                    { "name": "Movie1", "category": "Action", "value": 100 },
                    { "name": "Movie2", "category": "Action", "value": 50 }
                ] }
            ]
        }"#,
        &ChartConfig::default(),
    );

    let ids: Vec<&str> = out.tiles.iter().map(|t| t.id.as_str()).collect();
    assert!(ids.contains(&"Movies.Action.Movie1"));
    assert!(ids.contains(&"Movies.Action.Movie2"));
}

#[test]
fn tiles_fill_the_plot_area_proportionally_without_padding() {
    let cfg = ChartConfig {
        padding_inner: 0.0,
        ..ChartConfig::default()
    };
    let out = layout(
        r#"{
            "name": "Root",
            "children": [
                { "name": "Big", "category": "A", "value": 300 },
                { "name": "Small", "category": "B", "value": 100 }
            ]
        }"#,
        &cfg,
    );

    assert_eq!(out.tiles.len(), 2);
    let area: f64 = out
        .tiles
        .iter()
        .map(|t| t.width() * t.height())
        .sum();
    let plot_area = cfg.width * cfg.plot_height();
    assert!((area - plot_area).abs() < 1e-6, "area {area} != {plot_area}");

    let big = out.tiles.iter().find(|t| t.name == "Big").unwrap();
    let small = out.tiles.iter().find(|t| t.name == "Small").unwrap();
    let ratio = (big.width() * big.height()) / (small.width() * small.height());
    assert!((ratio - 3.0).abs() < 1e-6, "ratio {ratio}");
}

#[test]
fn taller_subtree_sorts_before_higher_value() {
    // "Deep" has a taller subtree than "Flat", but a lower aggregate value.
    let out = layout(
        r#"{
            "name": "Root",
            "children": [
                { "name": "Flat", "category": "Flat", "value": 1000 },
                { "name": "Deep", "children": [
                    { "name": "DeepLeaf", "category": "Deep", "value": 1 }
                ] }
            ]
        }"#,
        &ChartConfig::default(),
    );

    assert_eq!(out.tiles[0].name, "DeepLeaf");
    assert_eq!(out.tiles[1].name, "Flat");
}

#[test]
fn equal_heights_sort_by_descending_aggregate_value() {
    let out = layout(
        r#"{
            "name": "Root",
            "children": [
                { "name": "A", "children": [
                    { "name": "A1", "category": "A", "value": 10 }
                ] },
                { "name": "B", "children": [
                    { "name": "B1", "category": "B", "value": 90 }
                ] }
            ]
        }"#,
        &ChartConfig::default(),
    );

    assert_eq!(out.tiles[0].name, "B1");
    assert_eq!(out.tiles[1].name, "A1");
}

#[test]
fn tiles_stay_inside_the_plot_area() {
    let cfg = ChartConfig::default();
    let out = layout(
        r#"{
            "name": "Movies",
            "children": [
                { "name": "Action", "children": [
                    { "name": "AvengersEndgame", "category": "Action", "value": 858.37 },
                    { "name": "BlackPanther", "category": "Action", "value": 700.06 }
                ] },
                { "name": "Drama", "children": [
                    { "name": "Titanic", "category": "Drama", "value": 659.36 }
                ] },
                { "name": "Comedy", "children": [
                    { "name": "HomeAlone", "category": "Comedy", "value": 285.76 }
                ] }
            ]
        }"#,
        &cfg,
    );

    assert_eq!(out.tiles.len(), 4);
    for tile in &out.tiles {
        assert!(tile.x0 >= -1e-9 && tile.x1 <= cfg.width + 1e-9, "{tile:?}");
        assert!(
            tile.y0 >= -1e-9 && tile.y1 <= cfg.plot_height() + 1e-9,
            "{tile:?}"
        );
        assert!(tile.x0 <= tile.x1 && tile.y0 <= tile.y1, "{tile:?}");
    }
}

#[test]
fn layout_is_deterministic() {
    let text = r#"{
        "name": "Root",
        "children": [
            { "name": "A", "children": [
                { "name": "A1", "category": "A", "value": 3 },
                { "name": "A2", "category": "A", "value": 7 }
            ] },
            { "name": "B", "value": 5, "category": "B" }
        ]
    }"#;
    let a = layout(text, &ChartConfig::default());
    let b = layout(text, &ChartConfig::default());
    assert_eq!(a, b);
}

#[test]
fn tiles_of_one_category_share_a_fill_and_match_their_swatch() {
    let out = layout(
        r#"{
            "name": "Movies",
            "children": [
                { "name": "Action", "children": [
                    { "name": "Movie1", "category": "Action", "value": 10 },
                    { "name": "Movie2", "category": "Action", "value": 20 }
                ] },
                { "name": "Drama", "children": [
                    { "name": "Movie3", "category": "Drama", "value": 30 }
                ] }
            ]
        }"#,
        &ChartConfig::default(),
    );

    let action_fills: Vec<&str> = out
        .tiles
        .iter()
        .filter(|t| t.category.as_deref() == Some("Action"))
        .map(|t| t.fill.as_str())
        .collect();
    assert_eq!(action_fills.len(), 2);
    assert_eq!(action_fills[0], action_fills[1]);

    let swatch = out.legend.iter().find(|l| l.label == "Action").unwrap();
    assert_eq!(swatch.fill, action_fills[0]);

    let drama = out.tiles.iter().find(|t| t.name == "Movie3").unwrap();
    assert_ne!(drama.fill, action_fills[0]);
}

#[test]
fn legend_lays_out_in_fixed_columns_below_the_plot() {
    let out = layout(
        r#"{
            "name": "Movies",
            "children": [
                { "name": "Action", "children": [
                    { "name": "M1", "category": "Action", "value": 1 }
                ] },
                { "name": "Drama", "children": [
                    { "name": "M2", "category": "Drama", "value": 1 }
                ] },
                { "name": "Comedy", "children": [
                    { "name": "M3", "category": "Comedy", "value": 1 }
                ] }
            ]
        }"#,
        &ChartConfig::default(),
    );

    assert_eq!(out.legend.len(), 3);
    for (i, item) in out.legend.iter().enumerate() {
        assert_eq!(item.swatch_x, 300.0 + 90.0 * i as f64);
        assert_eq!(item.swatch_y, 555.0);
        assert_eq!(item.swatch_size, 15.0);
        assert_eq!(item.label_x, item.swatch_x + 20.0);
        assert_eq!(item.label_y, 566.0);
    }
    // Input order, not layout order.
    assert_eq!(out.legend[0].label, "Action");
    assert_eq!(out.legend[1].label, "Drama");
    assert_eq!(out.legend[2].label, "Comedy");
}

#[test]
fn zero_valued_dataset_stays_finite() {
    let out = layout(
        r#"{
            "name": "Root",
            "children": [
                { "name": "A", "category": "A", "value": 0 },
                { "name": "B", "category": "B", "value": 0 }
            ]
        }"#,
        &ChartConfig::default(),
    );
    for tile in &out.tiles {
        assert!(tile.x0.is_finite() && tile.y0.is_finite());
        assert!(tile.x1.is_finite() && tile.y1.is_finite());
    }
}

#[test]
fn legend_band_taller_than_canvas_yields_empty_plot() {
    let cfg = ChartConfig {
        height: 80.0,
        legend_height: 100.0,
        ..ChartConfig::default()
    };
    let out = layout(
        r#"{ "name": "Root", "children": [ { "name": "A", "category": "A", "value": 1 } ] }"#,
        &cfg,
    );
    for tile in &out.tiles {
        assert!(tile.width() <= 1e-9);
        assert!(tile.height() <= 1e-9);
    }
}

#[test]
fn non_finite_config_is_rejected() {
    let root = parse_dataset(
        r#"{ "name": "Root", "children": [ { "name": "A", "category": "A", "value": 1 } ] }"#,
    )
    .unwrap();
    let cfg = ChartConfig {
        width: f64::NAN,
        ..ChartConfig::default()
    };
    assert!(layout_chart(&root, &cfg).is_err());
}
