// Copyright 2025 the Plotgrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for `plotgrid_demo`.

use std::fmt::Write as _;

use kurbo::{BezPath, Point, Rect};
use peniko::Brush;

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextAnchor {
    Start,
    Middle,
    End,
}

/// An SVG document built element by element, in paint order.
#[derive(Debug)]
pub(crate) struct SvgDoc {
    view_box: Rect,
    body: String,
}

impl SvgDoc {
    pub(crate) fn new(view_box: Rect) -> Self {
        Self {
            view_box,
            body: String::new(),
        }
    }

    pub(crate) fn rect(&mut self, r: Rect, fill: &Brush) {
        let _ = write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            r.x0,
            r.y0,
            r.width(),
            r.height(),
        );
        write_paint_attr(&mut self.body, "fill", fill);
        self.body.push_str("/>\n");
    }

    pub(crate) fn line(&mut self, a: Point, b: Point, stroke: &Brush, width: f64) {
        let _ = write!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{width}""#,
            a.x, a.y, b.x, b.y
        );
        write_paint_attr(&mut self.body, "stroke", stroke);
        self.body.push_str("/>\n");
    }

    pub(crate) fn path(&mut self, path: &BezPath, fill: &Brush, stroke: Option<(&Brush, f64)>) {
        let d = path.to_svg();
        let _ = write!(self.body, r#"<path d="{d}""#);
        write_paint_attr(&mut self.body, "fill", fill);
        if let Some((brush, width)) = stroke {
            write_paint_attr(&mut self.body, "stroke", brush);
            let _ = write!(self.body, r#" stroke-width="{width}""#);
        }
        self.body.push_str("/>\n");
    }

    pub(crate) fn circle(&mut self, centre: Point, radius: f64, fill: &Brush) {
        let _ = write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{radius}""#,
            centre.x, centre.y
        );
        write_paint_attr(&mut self.body, "fill", fill);
        self.body.push_str("/>\n");
    }

    pub(crate) fn text(
        &mut self,
        pos: Point,
        text: &str,
        font_size: f64,
        anchor: TextAnchor,
        fill: &Brush,
    ) {
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{font_size}" font-family="sans-serif""#,
            pos.x, pos.y
        );
        self.body.push_str(match anchor {
            TextAnchor::Start => r#" text-anchor="start""#,
            TextAnchor::Middle => r#" text-anchor="middle""#,
            TextAnchor::End => r#" text-anchor="end""#,
        });
        write_paint_attr(&mut self.body, "fill", fill);
        self.body.push('>');
        self.body.push_str(&escape_xml(text));
        self.body.push_str("</text>\n");
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let v = self.view_box;
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
            v.x0,
            v.y0,
            v.width(),
            v.height(),
            v.width(),
            v.height()
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
