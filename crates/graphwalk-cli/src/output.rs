//! Output formatting for CLI commands.
//!
//! Every command produces a report value that renders either as
//! human-readable text or as a single JSON document for programmatic use.

use colored::Colorize;
use graphwalk::{Color, Distance, NodeId};
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

impl OutputMode {
    /// Pick the mode from the `--json` flag.
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// A command result that can be shown to the user.
pub trait Report: Serialize {
    /// Write the human-readable form.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()>;
}

/// Write `report` in the given mode, followed by a newline.
///
/// # Errors
///
/// Propagates write and serialization failures.
pub fn emit<R: Report>(w: &mut impl Write, report: &R, mode: OutputMode) -> crate::Result<()> {
    match mode {
        OutputMode::Text => report.write_text(w)?,
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, report)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn verdict(yes: bool, yes_text: &str, no_text: &str) -> String {
    if yes {
        yes_text.green().bold().to_string()
    } else {
        no_text.red().bold().to_string()
    }
}

// ============================================================================
// Graph reports
// ============================================================================

/// Visit order of a traversal.
#[derive(Debug, Serialize)]
pub struct TraversalReport {
    /// `bfs` or `dfs`.
    pub order: &'static str,
    /// Start node, or `None` when every component was walked.
    pub start: Option<NodeId>,
    /// Nodes in visit order.
    pub visited: Vec<NodeId>,
}

impl Report for TraversalReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        let from = self
            .start
            .map_or_else(|| "all components".to_string(), |s| format!("node {s}"));
        writeln!(w, "{} from {}:", self.order.to_uppercase().bold(), from)?;
        writeln!(w, "  {}", join(&self.visited))
    }
}

/// Connected components.
#[derive(Debug, Serialize)]
pub struct ComponentsReport {
    /// Number of components.
    pub count: usize,
    /// Members of each component.
    pub components: Vec<Vec<NodeId>>,
}

impl Report for ComponentsReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{} component(s)", self.count.to_string().cyan().bold())?;
        for (i, component) in self.components.iter().enumerate() {
            writeln!(w, "  {}: {}", (i + 1).to_string().dimmed(), join(component))?;
        }
        Ok(())
    }
}

/// Bipartiteness verdict.
#[derive(Debug, Serialize)]
pub struct BipartiteReport {
    /// Whether a valid 2-coloring exists.
    pub bipartite: bool,
    /// Color per node (in node order) when bipartite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coloring: Option<Vec<Color>>,
    /// External id of node 0, for labeling the coloring in text mode.
    #[serde(skip)]
    pub first_id: usize,
}

impl Report for BipartiteReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", verdict(self.bipartite, "bipartite", "not bipartite"))?;
        if let Some(coloring) = &self.coloring {
            for (offset, color) in coloring.iter().enumerate() {
                let label = match color {
                    Color::Red => color.to_string().red(),
                    Color::Blue => color.to_string().blue(),
                };
                writeln!(w, "  {}: {label}", self.first_id + offset)?;
            }
        }
        Ok(())
    }
}

/// Cycle detection verdict.
#[derive(Debug, Serialize)]
pub struct CycleReport {
    /// Whether the graph contains a cycle.
    pub has_cycle: bool,
    /// Detection method that was used.
    pub method: &'static str,
}

impl Report for CycleReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{} ({})",
            verdict(!self.has_cycle, "acyclic", "cycle detected"),
            self.method.dimmed()
        )
    }
}

/// Topological order, or `None` for a cyclic graph.
#[derive(Debug, Serialize)]
pub struct TopoReport {
    /// Nodes in topological order.
    pub order: Option<Vec<NodeId>>,
}

impl Report for TopoReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        match &self.order {
            Some(order) => writeln!(w, "{}", join(order)),
            None => writeln!(w, "{}", "cycle: no topological order".red().bold()),
        }
    }
}

/// Eventually safe nodes.
#[derive(Debug, Serialize)]
pub struct SafeNodesReport {
    /// Safe nodes in ascending order.
    pub safe_nodes: Vec<NodeId>,
}

impl Report for SafeNodesReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        if self.safe_nodes.is_empty() {
            writeln!(w, "{}", "no safe nodes".yellow())
        } else {
            writeln!(w, "{}", join(&self.safe_nodes))
        }
    }
}

/// Course scheduling verdict.
#[derive(Debug, Serialize)]
pub struct CoursesReport {
    /// Whether all courses can be finished.
    pub can_finish: bool,
    /// A valid order when one exists.
    pub order: Option<Vec<NodeId>>,
}

impl Report for CoursesReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}",
            verdict(self.can_finish, "can finish", "cannot finish")
        )?;
        if let Some(order) = &self.order {
            writeln!(w, "  order: {}", join(order))?;
        }
        Ok(())
    }
}

// ============================================================================
// Grid reports
// ============================================================================

/// A single count (islands, provinces, enclaves, ...).
#[derive(Debug, Serialize)]
pub struct CountReport {
    /// What was counted.
    pub kind: &'static str,
    /// The count.
    pub count: usize,
}

impl Report for CountReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{} {}", self.count.to_string().cyan().bold(), self.kind)
    }
}

/// Minutes until every orange is rotten.
#[derive(Debug, Serialize)]
pub struct RotReport {
    /// `None` when some fresh orange can never rot.
    pub minutes: Option<u32>,
}

impl Report for RotReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        match self.minutes {
            Some(minutes) => writeln!(w, "{} minute(s)", minutes.to_string().cyan().bold()),
            None => writeln!(w, "{}", "impossible: some oranges never rot".red().bold()),
        }
    }
}

/// Per-cell distance to the nearest source. Unreachable cells are `null` in JSON.
#[derive(Debug, Serialize)]
pub struct DistanceReport {
    /// Distances by row.
    pub distances: Vec<Vec<Option<u32>>>,
}

impl DistanceReport {
    /// Build a report from distance rows.
    #[must_use]
    pub fn new(rows: Vec<Vec<Distance>>) -> Self {
        let distances = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|d| d.is_reachable().then(|| d.get()))
                    .collect()
            })
            .collect();
        Self { distances }
    }
}

impl Report for DistanceReport {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        for row in &self.distances {
            let cells: Vec<String> = row
                .iter()
                .map(|d| d.map_or_else(|| "inf".to_string(), |d| d.to_string()))
                .collect();
            writeln!(w, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// A transformed grid, printed row by row.
#[derive(Debug, Serialize)]
pub struct GridReport<T> {
    /// Cells by row.
    pub grid: Vec<Vec<T>>,
    /// Text-mode separator between cells.
    #[serde(skip)]
    pub separator: &'static str,
}

impl<T: Display + Serialize> Report for GridReport<T> {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        for row in &self.grid {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(w, "{}", cells.join(self.separator))?;
        }
        Ok(())
    }
}
