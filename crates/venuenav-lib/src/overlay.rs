//! Declarative drawing primitives for the floor-plan overlay.
//!
//! The overlay is a plain list of lines, markers and text. A rendering
//! surface consumes it as-is; [`MapOverlay::render_svg`] is the bundled
//! consumer used by the CLI.

use std::fmt::Write;

use serde::Serialize;

use crate::graph::VenueGraph;
use crate::routing::RoutePlan;
use crate::venue::{Point, ViewBox};

/// Vertical offset of a booth label above its marker.
const LABEL_OFFSET: f64 = 15.0;

/// Visual role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Corridor,
    Route,
}

/// Visual role of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    Booth,
    RouteStart,
    RouteEnd,
}

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        style: LineStyle,
    },
    Marker {
        at: Point,
        style: MarkerStyle,
    },
    Label {
        at: Point,
        text: String,
    },
}

/// Baseline map plus an optional highlighted route.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapOverlay {
    pub baseline: Vec<Primitive>,
    pub route: Vec<Primitive>,
}

impl MapOverlay {
    /// Corridors first, then booth markers and labels. Waypoints get no marker.
    pub fn baseline(graph: &VenueGraph) -> Self {
        let mut baseline = Vec::new();

        for corridor in graph.corridors() {
            if let (Some(a), Some(b)) = (graph.node(corridor.a), graph.node(corridor.b)) {
                baseline.push(Primitive::Line {
                    from: a.position,
                    to: b.position,
                    style: LineStyle::Corridor,
                });
            }
        }

        for node in graph.nodes() {
            let Some(name) = node.label.booth_name() else {
                continue;
            };
            baseline.push(Primitive::Marker {
                at: node.position,
                style: MarkerStyle::Booth,
            });
            baseline.push(Primitive::Label {
                at: Point::new(node.position.x, node.position.y - LABEL_OFFSET),
                text: name.to_string(),
            });
        }

        Self {
            baseline,
            route: Vec::new(),
        }
    }

    /// Replace any previous route with the one in `plan`.
    pub fn with_route(mut self, plan: &RoutePlan) -> Self {
        self.route = route_primitives(plan);
        self
    }

    /// Drop the highlighted route, keeping the baseline.
    pub fn clear_route(&mut self) {
        self.route.clear();
    }

    pub fn has_route(&self) -> bool {
        !self.route.is_empty()
    }

    /// Every primitive in drawing order.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.baseline.iter().chain(self.route.iter())
    }

    /// Render the overlay as a standalone SVG document.
    pub fn render_svg(&self, viewbox: ViewBox) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w} {h}">"#,
            w = viewbox.width,
            h = viewbox.height
        );
        for primitive in self.primitives() {
            write_primitive(&mut svg, primitive);
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn route_primitives(plan: &RoutePlan) -> Vec<Primitive> {
    let mut primitives: Vec<Primitive> = plan
        .segments
        .iter()
        .map(|segment| Primitive::Line {
            from: segment.from,
            to: segment.to,
            style: LineStyle::Route,
        })
        .collect();

    // A route from a node to itself has no lines but still shows both markers.
    primitives.push(Primitive::Marker {
        at: plan.start_at,
        style: MarkerStyle::RouteStart,
    });
    primitives.push(Primitive::Marker {
        at: plan.goal_at,
        style: MarkerStyle::RouteEnd,
    });

    primitives
}

fn write_primitive(svg: &mut String, primitive: &Primitive) {
    let _ = match primitive {
        Primitive::Line {
            from,
            to,
            style: LineStyle::Corridor,
        } => writeln!(
            svg,
            r##"  <line class="edge-line" x1="{}" y1="{}" x2="{}" y2="{}" stroke="#ddd" stroke-width="2"/>"##,
            from.x, from.y, to.x, to.y
        ),
        Primitive::Line {
            from,
            to,
            style: LineStyle::Route,
        } => writeln!(
            svg,
            r##"  <line class="path-line" x1="{}" y1="{}" x2="{}" y2="{}" stroke="#ff4444" stroke-width="8" stroke-linecap="round" fill="none" opacity="0.9"/>"##,
            from.x, from.y, to.x, to.y
        ),
        Primitive::Marker { at, style } => {
            let (class, radius, fill) = match style {
                MarkerStyle::Booth => ("booth", 10, "#007bff"),
                MarkerStyle::RouteStart => ("route-start", 12, "#22aa55"),
                MarkerStyle::RouteEnd => ("route-end", 12, "#ff4444"),
            };
            writeln!(
                svg,
                r##"  <circle class="{class}" cx="{}" cy="{}" r="{radius}" fill="{fill}" stroke="#fff" stroke-width="3" opacity="0.9"/>"##,
                at.x, at.y
            )
        }
        Primitive::Label { at, text } => writeln!(
            svg,
            r##"  <text x="{}" y="{}" fill="#333" font-size="14px" font-weight="bold" text-anchor="middle">{}</text>"##,
            at.x,
            at.y,
            escape_xml(text)
        ),
    };
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
