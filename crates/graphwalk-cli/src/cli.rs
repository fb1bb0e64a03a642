//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `traverse`: BFS or DFS visit order
//! - `components`: connected components
//! - `bipartite`: 2-coloring check
//! - `cycle`: cycle detection
//! - `toposort`: topological order
//! - `safe-nodes`: nodes that cannot reach a cycle
//! - `courses`: course scheduling from prerequisite pairs
//! - `provinces`: connected groups in an adjacency matrix
//! - `grid`: flooding, distance and region queries on grids
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//! - `--config <path>`: YAML configuration file
//! - `-v`: log verbosity, repeatable
//!
//! # Example
//!
//! ```bash
//! graphwalk traverse graph.txt --order dfs --start 0
//! graphwalk --json toposort deps.json --method kahn
//! graphwalk courses --count 4 --prereq 1:0 --prereq 2:1
//! graphwalk grid islands map.txt --connectivity eight
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use graphwalk::{
    Cell, Connectivity, Direction, Graph, IndexBase, NodeId, Traversal, bipartite, components,
    cycle, distance, topo, traversal,
};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::input::{self, GraphOptions};
use crate::output::{
    self, BipartiteReport, ComponentsReport, CountReport, CoursesReport, CycleReport,
    DistanceReport, GridReport, OutputMode, RotReport, SafeNodesReport, TopoReport,
    TraversalReport,
};

/// Graphwalk - classical graph and grid algorithms from the command line
///
/// Graphs are read from JSON documents or `n m` edge lists; grids and
/// matrices from JSON arrays or plain text rows.
#[derive(Parser, Debug)]
#[command(name = "graphwalk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./graphwalk.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the BFS or DFS visit order
    Traverse {
        /// Graph input
        #[command(flatten)]
        graph: GraphArgs,

        /// Traversal order (defaults to the configured traversal)
        #[arg(long, value_enum)]
        order: Option<TraversalArg>,

        /// Start node; every component is walked when omitted
        #[arg(long)]
        start: Option<usize>,
    },

    /// List connected components
    Components {
        /// Graph input
        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Check whether the graph is bipartite
    Bipartite {
        /// Graph input
        #[command(flatten)]
        graph: GraphArgs,

        /// Flooding strategy (defaults to the configured traversal)
        #[arg(long, value_enum)]
        method: Option<TraversalArg>,
    },

    /// Detect cycles
    ///
    /// Undirected graphs support `bfs` and `dfs`; directed graphs support
    /// `dfs` (three-state coloring) and `kahn`.
    Cycle {
        /// Graph input
        #[command(flatten)]
        graph: GraphArgs,

        /// Detection method
        #[arg(long, value_enum, default_value_t = CycleMethod::Dfs)]
        method: CycleMethod,
    },

    /// Print a topological order of a directed graph
    Toposort {
        /// Graph input
        #[command(flatten)]
        graph: GraphArgs,

        /// Sorting method
        #[arg(long, value_enum, default_value_t = TopoMethod::Kahn)]
        method: TopoMethod,
    },

    /// List nodes from which every path ends at a terminal node
    SafeNodes {
        /// Graph input
        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Check whether courses with prerequisites can all be taken
    Courses {
        /// Number of courses, numbered from 0
        #[arg(long)]
        count: usize,

        /// Prerequisite `a:b`, meaning course `b` comes before course `a`
        #[arg(long = "prereq", value_name = "A:B", value_parser = parse_prerequisite)]
        prerequisites: Vec<(usize, usize)>,
    },

    /// Count provinces in an adjacency matrix
    Provinces {
        /// Matrix file
        file: PathBuf,
    },

    /// Grid algorithms
    #[command(subcommand)]
    Grid(GridCommand),
}

/// Grid subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum GridCommand {
    /// Distance from every cell to the nearest `1`
    Distance {
        /// Grid file
        file: PathBuf,
    },

    /// Minutes until every orange rots (0 empty, 1 fresh, 2 rotten)
    Rot {
        /// Grid file
        file: PathBuf,
    },

    /// Count islands of non-zero cells
    Islands {
        /// Grid file
        file: PathBuf,

        /// Cell adjacency (defaults to the configured connectivity)
        #[arg(long, value_enum)]
        connectivity: Option<ConnectivityArg>,

        /// Flooding strategy (defaults to the configured traversal)
        #[arg(long, value_enum)]
        method: Option<TraversalArg>,
    },

    /// Count island shapes, ignoring position
    DistinctIslands {
        /// Grid file
        file: PathBuf,
    },

    /// Count land cells that cannot reach the boundary
    Enclaves {
        /// Grid file
        file: PathBuf,
    },

    /// Capture `O` regions not connected to the boundary
    Surround {
        /// Board file
        file: PathBuf,
    },

    /// Recolor the region around a cell
    Fill {
        /// Image file
        file: PathBuf,

        /// Start row
        #[arg(long)]
        row: usize,

        /// Start column
        #[arg(long)]
        col: usize,

        /// New color
        #[arg(long, allow_negative_numbers = true)]
        color: i64,
    },
}

/// Graph input shared by the graph commands
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Graph file (JSON document or `n m` edge list)
    pub file: PathBuf,

    /// Treat edge-list edges as directed
    #[arg(long, conflicts_with = "undirected")]
    pub directed: bool,

    /// Treat edge-list edges as undirected
    #[arg(long)]
    pub undirected: bool,

    /// Node ids in the input and output start at 1
    #[arg(long)]
    pub one_indexed: bool,
}

/// Traversal order for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalArg {
    /// Breadth-first
    Bfs,
    /// Depth-first
    Dfs,
}

impl From<TraversalArg> for Traversal {
    fn from(arg: TraversalArg) -> Self {
        match arg {
            TraversalArg::Bfs => Traversal::Bfs,
            TraversalArg::Dfs => Traversal::Dfs,
        }
    }
}

/// Cycle detection method for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleMethod {
    /// Breadth-first parent tracking (undirected)
    Bfs,
    /// Depth-first search
    Dfs,
    /// Kahn's in-degree peeling (directed)
    Kahn,
}

/// Topological sort method for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopoMethod {
    /// Kahn's in-degree peeling
    Kahn,
    /// Reversed DFS post-order
    Dfs,
}

/// Cell adjacency for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityArg {
    /// Up, down, left, right
    Four,
    /// Including diagonals
    Eight,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(arg: ConnectivityArg) -> Self {
        match arg {
            ConnectivityArg::Four => Connectivity::Four,
            ConnectivityArg::Eight => Connectivity::Eight,
        }
    }
}

fn parse_prerequisite(s: &str) -> std::result::Result<(usize, usize), String> {
    let (course, required) = s
        .split_once(':')
        .ok_or_else(|| format!("expected `a:b`, got `{s}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid course id `{part}`"))
    };
    Ok((parse(course)?, parse(required)?))
}

/// Graph input resolved against configuration.
struct LoadedGraph {
    graph: Graph,
    index_base: IndexBase,
}

impl LoadedGraph {
    fn load(args: &GraphArgs, config: &Config) -> Result<Self> {
        let direction = if args.directed {
            Direction::Directed
        } else if args.undirected {
            Direction::Undirected
        } else {
            config.direction()
        };
        let index_base = if args.one_indexed {
            IndexBase::One
        } else {
            config.index_base
        };

        let text = input::read_document(&args.file)?;
        let graph = input::parse_graph(
            &text,
            GraphOptions {
                direction,
                index_base,
            },
        )?;
        Ok(Self { graph, index_base })
    }

    fn internal(&self, id: usize) -> Result<NodeId> {
        self.index_base
            .to_internal(id, self.graph.node_count())
            .ok_or(Error::Graph(graphwalk::GraphError::InvalidNodeId {
                node: id,
                node_count: self.graph.node_count(),
            }))
    }

    fn external(&self, nodes: Vec<NodeId>) -> Vec<usize> {
        nodes
            .into_iter()
            .map(|node| self.index_base.to_external(node))
            .collect()
    }
}

fn traversal_name(traversal: Traversal) -> &'static str {
    match traversal {
        Traversal::Bfs => "bfs",
        Traversal::Dfs => "dfs",
    }
}

/// Execute a command, writing its report to `out`.
///
/// # Errors
///
/// Returns input, parse and validation errors, and write failures.
pub fn execute(
    command: &Commands,
    config: &Config,
    mode: OutputMode,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Traverse {
            graph,
            order,
            start,
        } => {
            let loaded = LoadedGraph::load(graph, config)?;
            let strategy = order.map_or(config.traversal, Traversal::from);
            let visited = match (*start, strategy) {
                (Some(s), Traversal::Bfs) => traversal::bfs(&loaded.graph, loaded.internal(s)?)?,
                (Some(s), Traversal::Dfs) => traversal::dfs(&loaded.graph, loaded.internal(s)?)?,
                (None, Traversal::Bfs) => traversal::bfs_all(&loaded.graph),
                (None, Traversal::Dfs) => traversal::dfs_all(&loaded.graph),
            };
            let report = TraversalReport {
                order: traversal_name(strategy),
                start: *start,
                visited: loaded.external(visited),
            };
            output::emit(out, &report, mode)
        }

        Commands::Components { graph } => {
            let loaded = LoadedGraph::load(graph, config)?;
            let components: Vec<Vec<usize>> = traversal::connected_components(&loaded.graph)
                .into_iter()
                .map(|component| loaded.external(component))
                .collect();
            let report = ComponentsReport {
                count: components.len(),
                components,
            };
            output::emit(out, &report, mode)
        }

        Commands::Bipartite { graph, method } => {
            let loaded = LoadedGraph::load(graph, config)?;
            let strategy = method.map_or(config.traversal, Traversal::from);
            let is_bipartite = match strategy {
                Traversal::Bfs => bipartite::is_bipartite_bfs(&loaded.graph),
                Traversal::Dfs => bipartite::is_bipartite_dfs(&loaded.graph),
            };
            let coloring = if is_bipartite {
                bipartite::two_coloring(&loaded.graph)
            } else {
                None
            };
            let report = BipartiteReport {
                bipartite: is_bipartite,
                coloring,
                first_id: loaded.index_base.to_external(0),
            };
            output::emit(out, &report, mode)
        }

        Commands::Cycle { graph, method } => {
            let loaded = LoadedGraph::load(graph, config)?;
            let g = &loaded.graph;
            let (has_cycle, name) = match (g.direction(), method) {
                (Direction::Undirected, CycleMethod::Bfs) => {
                    (cycle::has_cycle_undirected_bfs(g), "undirected bfs")
                }
                (Direction::Undirected, CycleMethod::Dfs) => {
                    (cycle::has_cycle_undirected_dfs(g), "undirected dfs")
                }
                (Direction::Undirected, CycleMethod::Kahn) => {
                    return Err(Error::Config(
                        "--method kahn needs a directed graph (pass --directed)".to_string(),
                    ));
                }
                (Direction::Directed, CycleMethod::Dfs) => {
                    (cycle::has_cycle_directed_dfs(g), "directed dfs")
                }
                (Direction::Directed, CycleMethod::Bfs | CycleMethod::Kahn) => {
                    (cycle::has_cycle_directed_kahn(g), "kahn")
                }
            };
            output::emit(
                out,
                &CycleReport {
                    has_cycle,
                    method: name,
                },
                mode,
            )
        }

        Commands::Toposort { graph, method } => {
            let loaded = LoadedGraph::load(graph, config)?;
            if !loaded.graph.direction().is_directed() {
                tracing::warn!("Topological sort of an undirected graph; every edge is a cycle");
            }
            let order = match method {
                TopoMethod::Kahn => topo::toposort_kahn(&loaded.graph),
                TopoMethod::Dfs => topo::toposort_dfs(&loaded.graph),
            };
            let report = TopoReport {
                order: order.map(|order| loaded.external(order)),
            };
            output::emit(out, &report, mode)
        }

        Commands::SafeNodes { graph } => {
            let loaded = LoadedGraph::load(graph, config)?;
            let report = SafeNodesReport {
                safe_nodes: loaded.external(cycle::eventual_safe_nodes(&loaded.graph)),
            };
            output::emit(out, &report, mode)
        }

        Commands::Courses {
            count,
            prerequisites,
        } => {
            let order = topo::find_order(*count, prerequisites)?;
            let report = CoursesReport {
                can_finish: order.is_some(),
                order,
            };
            output::emit(out, &report, mode)
        }

        Commands::Provinces { file } => {
            let matrix = input::parse_matrix(&input::read_document(file)?)?;
            let report = CountReport {
                kind: "province(s)",
                count: components::count_provinces(&matrix),
            };
            output::emit(out, &report, mode)
        }

        Commands::Grid(grid_command) => execute_grid(grid_command, config, mode, out),
    }
}

fn execute_grid(
    command: &GridCommand,
    config: &Config,
    mode: OutputMode,
    out: &mut impl Write,
) -> Result<()> {
    let read_ints = |file: &Path| input::parse_int_grid(&input::read_document(file)?);

    match command {
        GridCommand::Distance { file } => {
            let grid = input::to_binary(&read_ints(file)?);
            let distances = distance::nearest_one_distances(&grid);
            output::emit(out, &DistanceReport::new(distances.to_rows()), mode)
        }

        GridCommand::Rot { file } => {
            let oranges = input::to_oranges(&read_ints(file)?)?;
            let report = RotReport {
                minutes: distance::rotting_time(&oranges),
            };
            output::emit(out, &report, mode)
        }

        GridCommand::Islands {
            file,
            connectivity,
            method,
        } => {
            let land = input::to_land(&read_ints(file)?);
            let connectivity = connectivity.map_or(config.connectivity, Connectivity::from);
            let strategy = method.map_or(config.traversal, Traversal::from);
            let report = CountReport {
                kind: "island(s)",
                count: components::count_islands_with(&land, connectivity, strategy),
            };
            output::emit(out, &report, mode)
        }

        GridCommand::DistinctIslands { file } => {
            let land = input::to_land(&read_ints(file)?);
            let report = CountReport {
                kind: "distinct island(s)",
                count: components::count_distinct_islands(&land),
            };
            output::emit(out, &report, mode)
        }

        GridCommand::Enclaves { file } => {
            let land = input::to_land(&read_ints(file)?);
            let report = CountReport {
                kind: "enclave cell(s)",
                count: components::count_enclaves(&land),
            };
            output::emit(out, &report, mode)
        }

        GridCommand::Surround { file } => {
            let board = input::parse_char_grid(&input::read_document(file)?)?;
            let report = GridReport {
                grid: components::capture_surrounded(&board).to_rows(),
                separator: "",
            };
            output::emit(out, &report, mode)
        }

        GridCommand::Fill {
            file,
            row,
            col,
            color,
        } => {
            let image = read_ints(file)?;
            let filled = components::flood_fill(&image, Cell::new(*row, *col), *color)?;
            let report = GridReport {
                grid: filled.to_rows(),
                separator: " ",
            };
            output::emit(out, &report, mode)
        }
    }
}

/// Execute the parsed command line against stdout.
///
/// # Errors
///
/// See [`execute`].
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    execute(
        &cli.command,
        config,
        OutputMode::from_json_flag(cli.json),
        &mut handle,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn run_json(command: &Commands, config: &Config) -> serde_json::Value {
        let mut buf = Vec::new();
        execute(command, config, OutputMode::Json, &mut buf).unwrap();
        serde_json::from_slice(&buf).unwrap()
    }

    fn graph_args(file: PathBuf) -> GraphArgs {
        GraphArgs {
            file,
            directed: false,
            undirected: false,
            one_indexed: false,
        }
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["graphwalk", "toposort", "g.txt", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Toposort { .. }));
    }

    #[test]
    fn test_cli_rejects_directed_and_undirected() {
        let result =
            Cli::try_parse_from(["graphwalk", "cycle", "g.txt", "--directed", "--undirected"]);
        assert!(result.is_err());
    }

    #[rstest]
    #[case::simple("1:0", (1, 0))]
    #[case::spaced(" 3 : 2 ", (3, 2))]
    fn test_parse_prerequisite(#[case] input: &str, #[case] expected: (usize, usize)) {
        assert_eq!(parse_prerequisite(input), Ok(expected));
    }

    #[rstest]
    #[case::missing_colon("10")]
    #[case::negative("1:-1")]
    fn test_parse_prerequisite_rejects(#[case] input: &str) {
        assert!(parse_prerequisite(input).is_err());
    }

    #[test]
    fn test_traverse_from_start() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "g.txt", "4 3\n0 1\n0 2\n1 3\n");
        let command = Commands::Traverse {
            graph: graph_args(file),
            order: Some(TraversalArg::Dfs),
            start: Some(0),
        };

        let value = run_json(&command, &Config::default());
        assert_eq!(value["visited"], serde_json::json!([0, 1, 3, 2]));
        assert_eq!(value["order"], "dfs");
    }

    #[test]
    fn test_traverse_uses_configured_order_and_index_base() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "g.txt", "3 2\n1 3\n1 2\n");
        let config = Config {
            index_base: IndexBase::One,
            traversal: Traversal::Dfs,
            ..Config::default()
        };
        let command = Commands::Traverse {
            graph: graph_args(file),
            order: None,
            start: Some(1),
        };

        let value = run_json(&command, &config);
        assert_eq!(value["order"], "dfs");
        assert_eq!(value["visited"], serde_json::json!([1, 3, 2]));
    }

    #[test]
    fn test_traverse_invalid_start() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "g.txt", "2 1\n0 1\n");
        let command = Commands::Traverse {
            graph: graph_args(file),
            order: None,
            start: Some(5),
        };

        let mut buf = Vec::new();
        let result = execute(&command, &Config::default(), OutputMode::Json, &mut buf);
        assert!(matches!(result, Err(Error::Graph(_))));
    }

    #[test]
    fn test_cycle_kahn_on_undirected_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "g.txt", "2 1\n0 1\n");
        let command = Commands::Cycle {
            graph: graph_args(file),
            method: CycleMethod::Kahn,
        };

        let mut buf = Vec::new();
        let result = execute(&command, &Config::default(), OutputMode::Text, &mut buf);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_cycle_directed_from_config() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "g.txt", "3 3\n0 1\n1 2\n2 0\n");
        let config = Config {
            directed: true,
            ..Config::default()
        };
        let command = Commands::Cycle {
            graph: graph_args(file),
            method: CycleMethod::Kahn,
        };

        let value = run_json(&command, &config);
        assert_eq!(value["has_cycle"], true);
        assert_eq!(value["method"], "kahn");
    }

    #[test]
    fn test_courses() {
        let command = Commands::Courses {
            count: 2,
            prerequisites: vec![(1, 0), (0, 1)],
        };
        let value = run_json(&command, &Config::default());
        assert_eq!(value, serde_json::json!({"can_finish": false, "order": null}));
    }

    #[test]
    fn test_grid_islands_connectivity_from_config() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "map.txt", "1100\n1100\n0010\n0001\n");
        let command = Commands::Grid(GridCommand::Islands {
            file,
            connectivity: None,
            method: None,
        });

        assert_eq!(run_json(&command, &Config::default())["count"], 3);

        let eight = Config {
            connectivity: Connectivity::Eight,
            ..Config::default()
        };
        assert_eq!(run_json(&command, &eight)["count"], 1);
    }

    #[test]
    fn test_grid_fill() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "img.txt", "111\n110\n101\n");
        let command = Commands::Grid(GridCommand::Fill {
            file,
            row: 1,
            col: 1,
            color: 2,
        });

        let value = run_json(&command, &Config::default());
        assert_eq!(value["grid"], serde_json::json!([[2, 2, 2], [2, 2, 0], [2, 0, 1]]));
    }
}
