// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::vec;
use alloc::vec::Vec;

use crate::{
    AxisOverrides, CalcMode, GridAxes, GridError, GridLayout, GridOptions, HeuristicTextMeasurer,
    InvalidAxisReason, Key, LabelOptions, MultiSeriesIndex, Orientation, Projection3D, Series,
    SubdivisionOptions,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn months() -> MultiSeriesIndex {
    MultiSeriesIndex::merge(&[Series::keyed([
        ("a", 10.0),
        ("b", 20.0),
        ("c", 30.0),
        ("d", 40.0),
        ("e", 50.0),
    ])])
}

fn no_labels() -> LabelOptions {
    LabelOptions {
        show_horizontal: false,
        show_vertical: false,
        ..LabelOptions::default()
    }
}

fn compute(options: &GridOptions, data: &MultiSeriesIndex, mode: CalcMode) -> GridAxes {
    GridAxes::compute(options, data, &HeuristicTextMeasurer::default(), mode).unwrap()
}

#[test]
fn ordinal_bar_chart() {
    let data = months();
    let axes = compute(&GridOptions::new(300.0, 200.0), &data, CalcMode::bars());

    // Left padding: "50" plus one glyph; bottom padding: one line.
    let plot = axes.plot_area();
    assert!(approx(plot.x0, 28.0));
    assert!(approx(plot.y1, 180.0));
    assert_eq!(axes.grid_rect(), plot);

    // Five slots across 262 px.
    assert!(approx(axes.slot_width(), 52.4));
    assert!(approx(axes.value_grid().step, 5.0));
    assert!(approx(axes.value_grid().spacing, 17.0));
    assert!(approx(axes.value_grid().unit, 3.4));

    let p = axes.point(&Key::from("c"), 2, 30.0).unwrap();
    assert!(approx(p.x, 28.0 + 2.0 * 52.4));
    assert!(approx(p.y, 78.0));
    assert_eq!(axes.position(&Key::from("z"), 6), None);

    let bar = axes.bar_extent(30.0);
    assert!(approx(bar.start, 78.0));
    assert!(approx(bar.length, 102.0));
    let capped = axes.bar_extent(60.0);
    assert!(approx(capped.start, 10.0));
    assert!(approx(capped.end(), 180.0));
}

#[test]
fn ordinal_grid_points_use_key_labels() {
    let data = months();
    let axes = compute(&GridOptions::new(300.0, 200.0), &data, CalcMode::bars());
    let points = axes.grid_points(&data);

    let keys: Vec<&str> = points.horizontal.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(keys, ["a", "b", "c", "d", "e", ""]);

    let values: Vec<&str> = points.vertical.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(
        values,
        ["0", "5", "10", "15", "20", "25", "30", "35", "40", "45", "50"]
    );
    assert!(approx(points.vertical[0].position, 180.0));
    assert!(approx(points.vertical[10].position, 10.0));
    assert!(points.horizontal_subdivisions.is_empty());
}

#[test]
fn horizontal_bar_chart_measures_keys() {
    let data = months();
    let options = GridOptions::new(300.0, 200.0).with_flip_axes(true);
    let axes = compute(&options, &data, CalcMode::bars());

    // Widest key is one glyph.
    assert!(approx(axes.plot_area().x0, 16.0));
    assert!(axes.is_flipped());
    assert!(approx(axes.slot_width(), 34.0));
    assert!(approx(axes.value_grid().step, 5.0));
    assert!(approx(axes.value_grid().unit, 5.48));

    let p = axes.point(&Key::from("a"), 0, 10.0).unwrap();
    assert!(approx(p.x, 16.0 + 54.8));
    assert!(approx(p.y, 180.0));

    let bar = axes.bar_extent(30.0);
    assert!(approx(bar.start, 16.0));
    assert!(approx(bar.length, 164.4));
}

#[test]
fn negative_values_put_zero_on_a_grid_line() {
    let data = MultiSeriesIndex::merge(&[Series::Scalar(vec![-30.0, 45.0, 10.0])]);
    let options = GridOptions::new(300.0, 200.0).with_labels(no_labels());
    let axes = compute(&options, &data, CalcMode::points());

    let v = axes.value_grid();
    assert!(approx(v.step, 10.0));
    assert!(approx(v.spacing, 22.5));
    assert!(approx(v.zero, 67.5));
    assert!(approx(v.zero % v.spacing, 0.0));
    assert!(approx(axes.key_grid().unit, 140.0));

    let lines = axes.axis_lines();
    assert!(approx(lines.horizontal.unwrap(), 122.5));
    assert!(approx(lines.vertical.unwrap(), 10.0));

    let p = axes.point(&Key::Number(1.0), 1, 45.0).unwrap();
    assert!(approx(p.x, 150.0));
    assert!(approx(p.y, 21.25));

    let labels: Vec<_> = axes
        .grid_points(&data)
        .vertical
        .into_iter()
        .map(|p| p.label)
        .collect();
    assert_eq!(
        labels,
        ["-30", "-20", "-10", "0", "10", "20", "30", "40", "50"]
    );
}

#[test]
fn subdivisions_respect_spacing_and_whole_keys() {
    let data = MultiSeriesIndex::merge(&[Series::Scalar(vec![-30.0, 45.0, 10.0])]);
    let options = GridOptions::new(300.0, 200.0)
        .with_labels(no_labels())
        .with_subdivisions(SubdivisionOptions {
            enabled: true,
            ..SubdivisionOptions::default()
        });
    let points = compute(&options, &data, CalcMode::points()).grid_points(&data);

    // 22.5 px divisions split in four; keys one unit apart cannot be split.
    assert_eq!(points.vertical_subdivisions.len(), 8 * 3);
    assert!(approx(points.vertical_subdivisions[0].value, -27.5));
    assert!(points.horizontal_subdivisions.is_empty());
}

#[test]
fn fixed_division_overrides_the_search() {
    let data = months();
    let options = GridOptions::new(300.0, 200.0)
        .with_vertical(AxisOverrides::default().with_division(7.0));
    let axes = compute(&options, &data, CalcMode::bars());

    assert_eq!(axes.minimum_spacing(Orientation::Vertical), 1.0);
    let v = axes.value_grid();
    assert!(approx(v.step, 7.0));
    assert!(approx(v.count, 8.0));
    assert!(approx(v.spacing, 21.25));

    let points = axes.grid_points(&data);
    assert_eq!(points.vertical.len(), 9);
    assert_eq!(points.vertical[8].label, "56");
}

#[test]
fn stacked_charts_size_from_sums() {
    let data = MultiSeriesIndex::merge(&[
        Series::keyed([("a", 3.0), ("b", -1.0)]),
        Series::keyed([("a", 2.0), ("b", 4.0)]),
    ]);
    let axes = compute(
        &GridOptions::new(300.0, 200.0),
        &data,
        CalcMode::stacked_bars(),
    );
    let v = axes.value_grid();
    let height = axes.grid_rect().height();
    assert!(approx(v.offset_of(5.0), height));
    assert!(approx(v.offset_of(-1.0), 0.0));
}

#[test]
fn guidelines_widen_the_value_axis() {
    let data = months();
    let options = GridOptions::new(300.0, 200.0)
        .with_labels(no_labels())
        .with_guideline(80.0);
    let axes = compute(&options, &data, CalcMode::bars());
    assert!(axes.value_grid().offset_of(80.0) <= axes.grid_rect().height() + 1e-9);
}

#[test]
fn depth_shrinks_the_grid() {
    let data = months();
    let options = GridOptions::new(300.0, 200.0)
        .with_labels(no_labels())
        .with_projection(Projection3D::default());
    let axes = compute(&options, &data, CalcMode::bars());

    let grid = axes.grid_rect();
    let depth = axes.depth().unwrap();
    assert!(approx(depth.depth_unit, 280.0 / (5.0 + 30_f64.to_radians().cos())));
    assert!(approx(grid.x0, 10.0));
    assert!(approx(grid.y1, 190.0));
    assert!(grid.width() < 280.0);

    // The back top-right corner lands on the plot corner.
    let back = axes.project(grid.x1, grid.y0, depth.depth_pixels());
    assert!(approx(back.x, 290.0));
    assert!(approx(back.y, 10.0));
    assert!(approx(axes.clamp_horizontal(1000.0), grid.x1));
}

#[test]
fn inverted_bounds_are_rejected() {
    let options = GridOptions::new(300.0, 200.0)
        .with_vertical(AxisOverrides::default().with_range(10.0, 5.0));
    let err = GridAxes::compute(
        &options,
        &months(),
        &HeuristicTextMeasurer::default(),
        CalcMode::bars(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        GridError::InvalidAxis(InvalidAxisReason::Inverted {
            orientation: Orientation::Vertical
        })
    );
}

#[test]
fn bounds_excluding_all_data_are_rejected() {
    let mut above = AxisOverrides::default();
    above.min = Some(100.0);
    let options = GridOptions::new(300.0, 200.0).with_vertical(above);
    let err = GridAxes::compute(
        &options,
        &months(),
        &HeuristicTextMeasurer::default(),
        CalcMode::bars(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        GridError::InvalidAxis(InvalidAxisReason::NoValuesInRange {
            orientation: Orientation::Vertical
        })
    );

    let mut left = AxisOverrides::default();
    left.max = Some(-2.0);
    let options = GridOptions::new(300.0, 200.0).with_horizontal(left);
    let err = GridAxes::compute(
        &options,
        &months(),
        &HeuristicTextMeasurer::default(),
        CalcMode::bars(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        GridError::InvalidAxis(InvalidAxisReason::NoValuesInRange {
            orientation: Orientation::Horizontal
        })
    ));
}

#[test]
fn degenerate_inputs_fail() {
    let m = HeuristicTextMeasurer::default();
    let options = GridOptions::new(300.0, 200.0);

    let empty = MultiSeriesIndex::merge(&[]);
    assert_eq!(
        GridAxes::compute(&options, &empty, &m, CalcMode::bars()),
        Err(GridError::NoData)
    );

    let zeros = MultiSeriesIndex::merge(&[Series::Scalar(vec![0.0, 0.0])]);
    assert!(matches!(
        GridAxes::compute(&options, &zeros, &m, CalcMode::bars()),
        Err(GridError::Domain { .. })
    ));

    let tiny = GridOptions::new(30.0, 30.0);
    assert!(matches!(
        GridAxes::compute(&tiny, &months(), &m, CalcMode::bars()),
        Err(GridError::NoRoom { .. })
    ));
}

#[test]
fn layout_computes_axes_once() {
    let layout = GridLayout::new(GridOptions::new(300.0, 200.0));
    assert!(layout.axes().is_none());
    let m = HeuristicTextMeasurer::default();

    let first = layout.calc_axes(&months(), &m, CalcMode::bars()).unwrap() as *const GridAxes;
    let other = MultiSeriesIndex::merge(&[Series::Scalar(vec![1000.0])]);
    let second = layout.calc_axes(&other, &m, CalcMode::points()).unwrap() as *const GridAxes;
    assert_eq!(first, second);
    assert!(approx(layout.axes().unwrap().value_grid().step, 5.0));
}

#[test]
fn failed_layout_can_be_retried() {
    let layout = GridLayout::new(GridOptions::new(300.0, 200.0));
    let m = HeuristicTextMeasurer::default();
    assert!(
        layout
            .calc_axes(&MultiSeriesIndex::merge(&[]), &m, CalcMode::bars())
            .is_err()
    );
    assert!(layout.calc_axes(&months(), &m, CalcMode::bars()).is_ok());
}
