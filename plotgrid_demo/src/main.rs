// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demos for `plotgrid`.
//!
//! Renders a handful of charts through the grid layout into SVG files under
//! `plotgrid_demo_output/`. Set `RUST_LOG=plotgrid=debug` to see the axis sizing.

mod svg;

use std::path::Path;

use kurbo::{BezPath, Point, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use plotgrid::{
    AxisOverrides, BarGrouping, CalcMode, GridAxes, GridLayout, GridOptions, GridPoints,
    HeuristicTextMeasurer, MultiSeriesIndex, Orientation, Projection3D, Series,
    SubdivisionOptions, TextMeasurer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::svg::{SvgDoc, TextAnchor};

const PALETTE: [Color; 4] = [css::STEEL_BLUE, css::TOMATO, css::SEA_GREEN, css::GOLDENROD];
const BAR_SPACE: f64 = 10.0;
const GROUP_SPACE: f64 = 3.0;

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let out_dir = Path::new("plotgrid_demo_output");
    std::fs::create_dir_all(out_dir).expect("create plotgrid_demo_output");

    let measurer = HeuristicTextMeasurer::default();
    let charts = [
        ("bar", bar_demo(&measurer)),
        ("stacked_bar", stacked_bar_demo(&measurer)),
        ("horizontal_bar", horizontal_bar_demo(&measurer)),
        ("grouped_bar_3d", grouped_bar_3d_demo(&measurer)),
        ("scatter", scatter_demo(&measurer)),
        ("invalid_axes", invalid_axes_demo(&measurer)),
    ];
    for (name, svg) in charts {
        let path = out_dir.join(format!("{name}.svg"));
        std::fs::write(&path, svg).expect("write chart svg");
        println!("wrote {}", path.display());
    }
}

fn monthly_sales() -> Vec<Series> {
    vec![
        Series::keyed([
            ("Jan", 12.0),
            ("Feb", 27.0),
            ("Mar", 31.5),
            ("Apr", 18.0),
            ("May", 42.0),
            ("Jun", 37.0),
        ]),
        Series::keyed([
            ("Jan", 8.0),
            ("Feb", 14.0),
            ("Mar", -6.0),
            ("Apr", 21.0),
            ("May", 17.5),
            ("Jun", 9.0),
        ]),
        Series::keyed([
            ("Jan", 3.0),
            ("Feb", 5.5),
            ("Mar", 11.0),
            ("Apr", -4.0),
            ("May", 6.0),
            ("Jun", 13.0),
        ]),
    ]
}

/// Lays out `rows` and hands the axes to `draw`; failures render as an error message.
fn render(
    title: &str,
    options: GridOptions,
    rows: &[Series],
    mode: CalcMode,
    measurer: &dyn TextMeasurer,
    draw: impl FnOnce(&mut SvgDoc, &GridAxes, &MultiSeriesIndex),
) -> String {
    let canvas = Rect::new(0.0, 0.0, options.width, options.height);
    let mut doc = SvgDoc::new(canvas);
    doc.rect(canvas, &Brush::from(css::WHITE));

    let data = MultiSeriesIndex::merge(rows);
    let layout = GridLayout::new(options);
    match layout.calc_axes(&data, measurer, mode) {
        Ok(axes) => {
            draw_grid(&mut doc, axes, &axes.grid_points(&data), mode.bar);
            draw(&mut doc, axes, &data);
        }
        Err(err) => {
            tracing::error!(title, %err, "chart layout failed");
            doc.text(
                Point::new(canvas.center().x, canvas.center().y),
                &err.to_string(),
                12.0,
                TextAnchor::Middle,
                &Brush::from(css::DARK_RED),
            );
        }
    }
    doc.text(
        Point::new(canvas.x0 + 10.0, 14.0),
        title,
        12.0,
        TextAnchor::Start,
        &Brush::from(css::BLACK),
    );
    doc.to_svg_string()
}

/// Grid lines, axis lines and labels. Lines recede along the projection in 3-D.
fn draw_grid(doc: &mut SvgDoc, axes: &GridAxes, points: &GridPoints, centre_labels: bool) {
    let grid = axes.grid_rect();
    let depth = axes.depth().map_or(0.0, |d| d.depth_pixels());
    let back = axes.project(0.0, 0.0, depth);
    let minor = Brush::from(css::GAINSBORO);
    let major = Brush::from(css::SILVER);

    let mut lines = |pts: &[plotgrid::GridPoint], orientation: Orientation, brush: &Brush| {
        let mut path = BezPath::new();
        for p in pts {
            match orientation {
                Orientation::Horizontal => {
                    path.move_to((p.position, grid.y1));
                    path.line_to((p.position + back.x, grid.y1 + back.y));
                    path.line_to((p.position + back.x, grid.y0 + back.y));
                }
                Orientation::Vertical => {
                    path.move_to((grid.x0, p.position));
                    path.line_to((grid.x0 + back.x, p.position + back.y));
                    path.line_to((grid.x1 + back.x, p.position + back.y));
                }
            }
        }
        doc.path(&path, &Brush::from(Color::TRANSPARENT), Some((brush, 1.0)));
    };
    lines(&points.horizontal_subdivisions, Orientation::Horizontal, &minor);
    lines(&points.vertical_subdivisions, Orientation::Vertical, &minor);
    lines(&points.horizontal, Orientation::Horizontal, &major);
    lines(&points.vertical, Orientation::Vertical, &major);

    let axis = Brush::from(css::BLACK);
    let zero = axes.axis_lines();
    if let Some(y) = zero.horizontal {
        doc.line(Point::new(grid.x0, y), Point::new(grid.x1, y), &axis, 2.0);
    }
    if let Some(x) = zero.vertical {
        doc.line(Point::new(x, grid.y0), Point::new(x, grid.y1), &axis, 2.0);
    }

    let font = plotgrid::DEFAULT_FONT_SIZE;
    let label = Brush::from(css::DIM_GRAY);
    let flipped = axes.is_flipped();
    let half_slot = if centre_labels {
        axes.slot_width() / 2.0
    } else {
        0.0
    };
    for p in points.labelled(
        Orientation::Horizontal,
        axes.minimum_spacing(Orientation::Horizontal),
        centre_labels && !flipped,
    ) {
        let dx = if flipped { 0.0 } else { half_slot };
        let pos = Point::new(p.position + dx, grid.y1 + font);
        doc.text(pos, &p.label, font, TextAnchor::Middle, &label);
    }
    for p in points.labelled(
        Orientation::Vertical,
        axes.minimum_spacing(Orientation::Vertical),
        centre_labels && flipped,
    ) {
        let dy = if flipped { -half_slot } else { 0.0 };
        let pos = Point::new(grid.x0 - 2.0, p.position + dy + font * 0.3);
        doc.text(pos, &p.label, font, TextAnchor::End, &label);
    }
}

fn bar_demo(measurer: &dyn TextMeasurer) -> String {
    let sales = monthly_sales();
    let rows = &sales[..1];
    let options = GridOptions::new(480.0, 300.0)
        .with_guideline(45.0)
        .with_subdivisions(SubdivisionOptions {
            enabled: true,
            ..SubdivisionOptions::default()
        });
    render("Bar", options, rows, CalcMode::bars(), measurer, |doc, axes, data| {
        let grid = axes.grid_rect();
        let slot = axes.slot_width();
        let fill = Brush::from(PALETTE[0]);
        for (i, v) in data.row(0) {
            let Some(key) = data.key(i) else { continue };
            let Some(x) = axes.position(key, i) else {
                continue;
            };
            let bar = axes.bar_extent(v);
            let x0 = grid.x0 + x + BAR_SPACE / 2.0;
            doc.rect(
                Rect::new(x0, bar.start, x0 + slot - BAR_SPACE, bar.end()),
                &fill,
            );
        }
    })
}

fn stacked_bar_demo(measurer: &dyn TextMeasurer) -> String {
    let rows = monthly_sales();
    let options = GridOptions::new(480.0, 300.0);
    render(
        "Stacked bar",
        options,
        &rows,
        CalcMode::stacked_bars(),
        measurer,
        |doc, axes, data| {
            let grid = axes.grid_rect();
            let slot = axes.slot_width();
            for (i, key) in data.keys().iter().enumerate() {
                let Some(x) = axes.position(key, i) else {
                    continue;
                };
                let x0 = grid.x0 + x + BAR_SPACE / 2.0;
                let (mut up, mut down) = (0.0, 0.0);
                for row in 0..data.row_count() {
                    let Some(v) = data.value(i, row) else {
                        continue;
                    };
                    let base = if v > 0.0 { &mut up } else { &mut down };
                    let bar = axes.bar_span(*base, *base + v);
                    *base += v;
                    doc.rect(
                        Rect::new(x0, bar.start, x0 + slot - BAR_SPACE, bar.end()),
                        &Brush::from(PALETTE[row % PALETTE.len()]),
                    );
                }
            }
        },
    )
}

fn horizontal_bar_demo(measurer: &dyn TextMeasurer) -> String {
    let sales = monthly_sales();
    let rows = &sales[1..2];
    let options = GridOptions::new(480.0, 300.0).with_flip_axes(true);
    render(
        "Horizontal bar",
        options,
        rows,
        CalcMode::bars(),
        measurer,
        |doc, axes, data| {
            let grid = axes.grid_rect();
            let slot = axes.slot_width();
            let fill = Brush::from(PALETTE[1]);
            for (i, v) in data.row(0) {
                let Some(key) = data.key(i) else { continue };
                let Some(y) = axes.position(key, i) else {
                    continue;
                };
                let bar = axes.bar_extent(v);
                let y1 = grid.y1 - y - BAR_SPACE / 2.0;
                doc.rect(
                    Rect::new(bar.start, y1 - slot + BAR_SPACE, bar.end(), y1),
                    &fill,
                );
            }
        },
    )
}

fn grouped_bar_3d_demo(measurer: &dyn TextMeasurer) -> String {
    let rows = monthly_sales();
    let projection = Projection3D::new(35.0).with_grouping(BarGrouping {
        series_count: rows.len(),
        bar_space: BAR_SPACE,
        group_space: GROUP_SPACE,
    });
    let options = GridOptions::new(520.0, 320.0).with_projection(projection);
    render(
        "Grouped 3-D bar",
        options,
        &rows,
        CalcMode::bars(),
        measurer,
        |doc, axes, data| {
            let grid = axes.grid_rect();
            let slot = axes.slot_width();
            let depth = axes.depth().map_or(0.0, |d| d.depth_pixels());
            let n = data.row_count().max(1) as f64;
            let width = (slot - BAR_SPACE - (n - 1.0) * GROUP_SPACE) / n;
            let edge = Brush::from(css::BLACK.with_alpha(0.4));
            for row in 0..data.row_count() {
                let base = PALETTE[row % PALETTE.len()];
                let front = Brush::from(base);
                let shade = Brush::from(base.map_lightness(|l| l * 0.8));
                for (i, v) in data.row(row) {
                    let Some(key) = data.key(i) else { continue };
                    let Some(x) = axes.position(key, i) else {
                        continue;
                    };
                    let bar = axes.bar_extent(v);
                    let x0 = grid.x0 + x + BAR_SPACE / 2.0 + row as f64 * (width + GROUP_SPACE);
                    let x1 = x0 + width;
                    let top = if v >= 0.0 { bar.start } else { bar.end() };

                    let side = quad(
                        Point::new(x1, bar.end()),
                        Point::new(x1, bar.start),
                        axes.project(x1, bar.start, depth),
                        axes.project(x1, bar.end(), depth),
                    );
                    doc.path(&side, &shade, Some((&edge, 0.5)));
                    let lid = quad(
                        Point::new(x0, top),
                        Point::new(x1, top),
                        axes.project(x1, top, depth),
                        axes.project(x0, top, depth),
                    );
                    doc.path(&lid, &shade, Some((&edge, 0.5)));
                    doc.rect(Rect::new(x0, bar.start, x1, bar.end()), &front);
                }
            }
        },
    )
}

fn scatter_demo(measurer: &dyn TextMeasurer) -> String {
    let rows = vec![
        Series::keyed([(-4.0, 12.0), (1.5, 30.0), (3.0, 18.0), (7.5, 41.0), (11.0, 26.0)]),
        Series::keyed([(0.0, -8.0), (2.5, 6.0), (6.0, 15.0), (9.0, 33.0)]),
    ];
    let options = GridOptions::new(420.0, 300.0)
        .with_horizontal(AxisOverrides::default().with_division(2.0))
        .with_subdivisions(SubdivisionOptions {
            enabled: true,
            vertical: Some(2),
            ..SubdivisionOptions::default()
        });
    render(
        "Scatter",
        options,
        &rows,
        CalcMode::points(),
        measurer,
        |doc, axes, data| {
            for row in 0..data.row_count() {
                let fill = Brush::from(PALETTE[row % PALETTE.len()]);
                for (i, v) in data.row(row) {
                    let Some(key) = data.key(i) else { continue };
                    if let Some(p) = axes.point(key, i, v) {
                        doc.circle(p, 3.5, &fill);
                    }
                }
            }
        },
    )
}

fn invalid_axes_demo(measurer: &dyn TextMeasurer) -> String {
    let options = GridOptions::new(420.0, 200.0)
        .with_vertical(AxisOverrides::default().with_range(50.0, 10.0));
    render(
        "Invalid axes",
        options,
        &monthly_sales(),
        CalcMode::bars(),
        measurer,
        |_, _, _| {},
    )
}

fn quad(a: Point, b: Point, c: Point, d: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path.line_to(c);
    path.line_to(d);
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_demo_renders() {
        let m = HeuristicTextMeasurer::default();
        for svg in [
            bar_demo(&m),
            stacked_bar_demo(&m),
            horizontal_bar_demo(&m),
            grouped_bar_3d_demo(&m),
            scatter_demo(&m),
        ] {
            assert!(svg.starts_with("<svg"));
            assert!(svg.contains("<rect") || svg.contains("<circle"));
            assert!(!svg.contains("no values"), "{svg}");
        }
    }

    #[test]
    fn invalid_axes_render_an_error() {
        let svg = invalid_axes_demo(&HeuristicTextMeasurer::default());
        assert!(svg.contains("maximum is not above its minimum"), "{svg}");
    }

    #[test]
    fn titles_are_left_aligned() {
        let svg = bar_demo(&HeuristicTextMeasurer::default());
        assert!(
            svg.contains(r##"text-anchor="start" fill="#000000">Bar</text>"##),
            "{svg}"
        );
    }

    #[test]
    fn month_labels_are_drawn() {
        let svg = bar_demo(&HeuristicTextMeasurer::default());
        assert!(svg.contains(">Jan</text>"), "{svg}");
        assert!(svg.contains(">Jun</text>"), "{svg}");
    }
}
