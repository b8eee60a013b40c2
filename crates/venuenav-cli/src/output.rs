//! Output formatting for route rendering.
//!
//! Formatters write into any [`Write`] so commands print to stdout while tests
//! render into a buffer.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use venuenav_lib::{Directory, RouteOutcome, RouteRenderMode, RouteSummary};

use crate::terminal::ColorPalette;

/// Output format for route and listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Multi-line summary as shown in the navigation view.
    #[default]
    Text,
    /// One line per route.
    Compact,
    /// Machine-readable JSON.
    Json,
}

/// JSON document emitted by `route --format json`.
#[derive(Debug, Serialize)]
pub struct RouteReport<'a> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<&'a RouteSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl<'a> RouteReport<'a> {
    pub fn new(outcome: &RouteOutcome, summary: Option<&'a RouteSummary>) -> Self {
        let (status, suggestions) = match outcome {
            RouteOutcome::Solved(_) => ("solved", Vec::new()),
            RouteOutcome::Unreachable { .. } => ("unreachable", Vec::new()),
            RouteOutcome::UnknownDestination { suggestions, .. } => {
                ("unknown_destination", suggestions.clone())
            }
        };
        Self {
            status,
            message: outcome.no_route_reason(),
            summary,
            suggestions,
        }
    }
}

/// Write a solved route.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write!(out, "{}", summary.render_styled(&palette)),
        OutputFormat::Compact => write!(out, "{}", summary.render(RouteRenderMode::Compact)),
        OutputFormat::Json => write_json(out, &RouteReport {
            status: "solved",
            message: None,
            summary: Some(summary),
            suggestions: Vec::new(),
        }),
    }
}

/// Write the "no route" state for an unknown or unreachable destination.
pub fn write_no_route<W: Write>(
    out: &mut W,
    outcome: &RouteOutcome,
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, &RouteReport::new(outcome, None)),
        OutputFormat::Text | OutputFormat::Compact => {
            let reason = outcome.no_route_reason().unwrap_or_default();
            writeln!(out, "{}{}{}", palette.red, reason, palette.reset)
        }
    }
}

/// Write the destination directory.
pub fn write_destinations<W: Write>(
    out: &mut W,
    directory: &Directory,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Entry<'a> {
                name: &'a str,
                node: u32,
            }
            let entries: Vec<_> = directory
                .entries()
                .map(|(name, node)| Entry { name, node })
                .collect();
            write_json(out, &entries)
        }
        OutputFormat::Text | OutputFormat::Compact => {
            let width = directory
                .entries()
                .map(|(name, _)| name.chars().count())
                .max()
                .unwrap_or(0);
            for (name, node) in directory.entries() {
                writeln!(out, "{name:<width$}  (node {node})")?;
            }
            Ok(())
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
