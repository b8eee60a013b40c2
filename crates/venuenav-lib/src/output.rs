use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::routing::{route_labels, LabelMode, RoutePlan};
use crate::venue::{NodeId, Venue};

/// Origin shown on every summary; routes always start at the entrance.
pub const ORIGIN_LABEL: &str = "Entrance";

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    Compact,
}

/// Decoration applied to the parts of a plain-text summary.
///
/// Every hook defaults to the undecorated text, so front ends override only
/// what they highlight.
pub trait SummaryStyle {
    fn banner(&self, text: &str) -> String {
        text.to_string()
    }

    fn origin(&self, text: &str) -> String {
        text.to_string()
    }

    fn destination(&self, text: &str) -> String {
        text.to_string()
    }

    fn distance(&self, text: &str) -> String {
        text.to_string()
    }

    /// Separator placed between route labels.
    fn separator(&self) -> String {
        " → ".to_string()
    }
}

/// Summary style without any decoration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unstyled;

impl SummaryStyle for Unstyled {}

/// Human-readable description of a solved route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    pub hops: usize,
    pub nodes: Vec<NodeId>,
    pub route: Vec<String>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved labels.
    pub fn from_plan(venue: &Venue, plan: &RoutePlan, mode: LabelMode) -> Result<Self> {
        Ok(Self {
            origin: ORIGIN_LABEL.to_string(),
            destination: plan.destination.clone(),
            distance: plan.distance(),
            hops: plan.hop_count(),
            nodes: plan.path.nodes.clone(),
            route: route_labels(venue.graph(), &plan.path, mode)?,
        })
    }

    /// Total distance with one decimal, e.g. `819.0`.
    pub fn formatted_distance(&self) -> String {
        format_distance(self.distance)
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_styled(&Unstyled),
            RouteRenderMode::Compact => self.render_compact(),
        }
    }

    /// Multi-line summary with each part passed through `style`.
    pub fn render_styled<S: SummaryStyle + ?Sized>(&self, style: &S) -> String {
        let mut buffer = String::new();
        let _ = writeln!(buffer, "{}", style.banner("Path Found!"));
        let _ = writeln!(buffer, "From: {}", style.origin(&self.origin));
        let _ = writeln!(buffer, "To: {}", style.destination(&self.destination));
        let _ = writeln!(
            buffer,
            "Total Distance: {} units",
            style.distance(&self.formatted_distance())
        );
        let _ = writeln!(buffer, "Route: {}", self.route.join(&style.separator()));
        buffer
    }

    fn render_compact(&self) -> String {
        format!(
            "{} -> {} ({} units, {} hops)\n",
            self.origin,
            self.destination,
            self.formatted_distance(),
            self.hops
        )
    }
}

/// Format a distance with one decimal of precision.
pub fn format_distance(distance: f64) -> String {
    format!("{distance:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathResult;
    use crate::venue::{bundled_venue, Point};

    fn coffee_plan() -> RoutePlan {
        RoutePlan {
            destination: "Coffee Shop".to_string(),
            start: 1,
            goal: 6,
            start_at: Point::new(1420.0, 800.0),
            goal_at: Point::new(1020.0, 380.0),
            path: PathResult {
                nodes: vec![1, 2, 3, 5, 6],
                distance: 819.0,
            },
            segments: Vec::new(),
        }
    }

    #[test]
    fn plain_render_matches_modal_summary() {
        let venue = bundled_venue().expect("bundled venue");
        let summary =
            RouteSummary::from_plan(&venue, &coffee_plan(), LabelMode::Turn).expect("summary");
        let text = summary.render(RouteRenderMode::PlainText);

        assert!(text.starts_with("Path Found!\n"));
        assert!(text.contains("From: Entrance"));
        assert!(text.contains("To: Coffee Shop"));
        assert!(text.contains("Total Distance: 819.0 units"));
        assert!(text.contains("Route: Entrance → turn → turn → turn → Coffee Shop"));
    }

    #[test]
    fn compact_render_omits_waypoints() {
        let venue = bundled_venue().expect("bundled venue");
        let summary =
            RouteSummary::from_plan(&venue, &coffee_plan(), LabelMode::Omit).expect("summary");
        assert_eq!(summary.route, vec!["Entrance", "Coffee Shop"]);
        assert_eq!(
            summary.render(RouteRenderMode::Compact),
            "Entrance -> Coffee Shop (819.0 units, 4 hops)\n"
        );
    }

    #[test]
    fn styled_render_decorates_each_part() {
        struct Brackets;
        impl SummaryStyle for Brackets {
            fn destination(&self, text: &str) -> String {
                format!("[{text}]")
            }
            fn separator(&self) -> String {
                " / ".to_string()
            }
        }

        let venue = bundled_venue().expect("bundled venue");
        let summary =
            RouteSummary::from_plan(&venue, &coffee_plan(), LabelMode::Omit).expect("summary");
        let text = summary.render_styled(&Brackets);
        assert!(text.contains("From: Entrance\n"));
        assert!(text.contains("To: [Coffee Shop]\n"));
        assert!(text.contains("Route: Entrance / Coffee Shop\n"));
        assert_eq!(text, summary.render_styled(&Brackets));
        assert_eq!(
            summary.render(RouteRenderMode::PlainText),
            summary.render_styled(&Unstyled)
        );
    }

    #[test]
    fn distance_rounds_to_one_decimal() {
        assert_eq!(format_distance(1760.0), "1760.0");
        assert_eq!(format_distance(12.345), "12.3");
    }

    #[test]
    fn summary_serializes_to_json() {
        let venue = bundled_venue().expect("bundled venue");
        let summary =
            RouteSummary::from_plan(&venue, &coffee_plan(), LabelMode::Omit).expect("summary");
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["destination"], "Coffee Shop");
        assert_eq!(json["distance"], 819.0);
        assert_eq!(json["nodes"], serde_json::json!([1, 2, 3, 5, 6]));
    }
}
