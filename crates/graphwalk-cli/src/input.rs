//! Reading graphs, grids and matrices from input documents.
//!
//! Every document comes in two flavors, picked by its first non-blank
//! character: JSON (`{` for graphs, `[` for grids and matrices) or a plain
//! text layout. In text documents `#` starts a comment and blank lines are
//! skipped; reported line numbers are 1-based and count every line.

use crate::error::{Error, Result};
use graphwalk::{AdjacencyMatrix, Direction, Graph, GraphBuilder, Grid, IndexBase, Orange};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// How text edge lists are interpreted. JSON documents may override both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Edge direction.
    pub direction: Direction,
    /// Numbering of node ids.
    pub index_base: IndexBase,
}

/// JSON graph document.
///
/// ```json
/// {"nodes": 4, "directed": true, "one_indexed": false, "edges": [[0, 1], [1, 2, 5]]}
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphDocument {
    nodes: usize,
    #[serde(default)]
    directed: Option<bool>,
    #[serde(default)]
    one_indexed: Option<bool>,
    #[serde(default)]
    edges: Vec<EdgeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EdgeEntry {
    Plain(usize, usize),
    Weighted(usize, usize, i64),
}

/// A JSON grid cell: a number or a one-character string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCell {
    Number(i64),
    Text(String),
}

/// Read a whole input file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn read_document(path: &Path) -> Result<String> {
    tracing::debug!(path = %path.display(), "Reading input");
    Ok(fs::read_to_string(path)?)
}

/// Parse a graph document.
///
/// # Errors
///
/// - [`Error::Json`] for malformed JSON
/// - [`Error::Parse`] for malformed text edge lists
/// - [`Error::Graph`] for out-of-range node ids
pub fn parse_graph(text: &str, options: GraphOptions) -> Result<Graph> {
    if text.trim_start().starts_with('{') {
        parse_graph_json(text, options)
    } else {
        parse_edge_list(text, options)
    }
}

fn parse_graph_json(text: &str, options: GraphOptions) -> Result<Graph> {
    let doc: GraphDocument = serde_json::from_str(text)?;

    let direction = match doc.directed {
        Some(true) => Direction::Directed,
        Some(false) => Direction::Undirected,
        None => options.direction,
    };
    let index_base = match doc.one_indexed {
        Some(true) => IndexBase::One,
        Some(false) => IndexBase::Zero,
        None => options.index_base,
    };

    let edges = doc.edges.into_iter().map(|edge| match edge {
        EdgeEntry::Plain(u, v) => (u, v, graphwalk::graph::DEFAULT_WEIGHT),
        EdgeEntry::Weighted(u, v, w) => (u, v, w),
    });

    Ok(GraphBuilder::new(doc.nodes, direction)
        .index_base(index_base)
        .weighted_edges(edges)
        .build()?)
}

/// Text edge list: a `n m` header followed by `m` lines of `u v [w]`.
fn parse_edge_list(text: &str, options: GraphOptions) -> Result<Graph> {
    let mut lines = content_lines(text);

    let (header_line, header) = lines
        .next()
        .ok_or_else(|| Error::parse(1, "missing `<nodes> <edges>` header"))?;
    let [nodes, declared] = parse_fields::<usize, 2>(header_line, header, "`<nodes> <edges>`")?;

    let mut builder = GraphBuilder::new(nodes, options.direction).index_base(options.index_base);
    let mut seen = 0;
    let mut last_line = header_line;

    for (line_no, line) in lines {
        last_line = line_no;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let (u, v, w) = match fields.as_slice() {
            [u, v] => (
                parse_field::<usize>(line_no, u)?,
                parse_field::<usize>(line_no, v)?,
                graphwalk::graph::DEFAULT_WEIGHT,
            ),
            [u, v, w] => (
                parse_field::<usize>(line_no, u)?,
                parse_field::<usize>(line_no, v)?,
                parse_field::<i64>(line_no, w)?,
            ),
            _ => {
                return Err(Error::parse(
                    line_no,
                    format!("expected `u v [w]`, found {} fields", fields.len()),
                ));
            }
        };
        builder = builder.weighted_edge(u, v, w);
        seen += 1;
    }

    if seen != declared {
        return Err(Error::parse(
            last_line,
            format!("header declares {declared} edges but {seen} were given"),
        ));
    }

    Ok(builder.build()?)
}

/// Parse a numeric grid.
///
/// Text rows are either whitespace-separated integers or runs of digits.
///
/// # Errors
///
/// - [`Error::Json`] / [`Error::Parse`] for malformed input
/// - [`Error::Graph`] for empty or ragged grids
pub fn parse_int_grid(text: &str) -> Result<Grid<i64>> {
    let rows = if is_json_array(text) {
        json_rows(text)?
            .into_iter()
            .enumerate()
            .map(|(r, row)| {
                row.into_iter()
                    .map(|cell| json_cell_to_int(r + 1, cell))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        content_lines(text)
            .map(|(line_no, line)| parse_int_row(line_no, line))
            .collect::<Result<Vec<_>>>()?
    };

    Ok(Grid::from_rows(rows)?)
}

/// Parse a character grid. Whitespace between cells in text rows is ignored.
///
/// # Errors
///
/// - [`Error::Json`] / [`Error::Parse`] for malformed input
/// - [`Error::Graph`] for empty or ragged grids
pub fn parse_char_grid(text: &str) -> Result<Grid<char>> {
    let rows = if is_json_array(text) {
        json_rows(text)?
            .into_iter()
            .enumerate()
            .map(|(r, row)| {
                row.into_iter()
                    .map(|cell| json_cell_to_char(r + 1, cell))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        content_lines(text)
            .map(|(_, line)| line.chars().filter(|c| !c.is_whitespace()).collect())
            .collect()
    };

    Ok(Grid::from_rows(rows)?)
}

/// Parse an adjacency matrix. Non-zero entries are edges.
///
/// # Errors
///
/// - [`Error::Json`] / [`Error::Parse`] for malformed input
/// - [`Error::Graph`] for empty or non-square matrices
pub fn parse_matrix(text: &str) -> Result<AdjacencyMatrix> {
    let rows: Vec<Vec<i64>> = if is_json_array(text) {
        serde_json::from_str(text)?
    } else {
        content_lines(text)
            .map(|(line_no, line)| {
                line.split_whitespace()
                    .map(|field| parse_field::<i64>(line_no, field))
                    .collect()
            })
            .collect::<Result<_>>()?
    };

    Ok(AdjacencyMatrix::from_rows(&rows)?)
}

/// Land cells are the non-zero ones.
#[must_use]
pub fn to_land(grid: &Grid<i64>) -> Grid<bool> {
    grid.map(|&value| value != 0)
}

/// Sources for nearest-distance queries are the `1` cells.
#[must_use]
pub fn to_binary(grid: &Grid<i64>) -> Grid<u8> {
    grid.map(|&value| u8::from(value == 1))
}

/// Decode `0`/`1`/`2` cells as empty/fresh/rotten.
///
/// # Errors
///
/// Returns [`Error::Parse`] naming the row of the first unknown value.
pub fn to_oranges(grid: &Grid<i64>) -> Result<Grid<Orange>> {
    let mut oranges = grid.filled(Orange::Empty);
    for cell in grid.cells() {
        oranges[cell] = Orange::try_from(grid[cell]).map_err(|value| {
            Error::parse(
                cell.row + 1,
                format!(
                    "invalid orange state {value} in column {} (expected 0, 1 or 2)",
                    cell.col + 1
                ),
            )
        })?;
    }
    Ok(oranges)
}

/// Non-blank lines with comments stripped, paired with 1-based line numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let content = line.split('#').next().unwrap_or_default().trim();
        (!content.is_empty()).then_some((i + 1, content))
    })
}

fn is_json_array(text: &str) -> bool {
    text.trim_start().starts_with('[')
}

fn json_rows(text: &str) -> Result<Vec<Vec<JsonCell>>> {
    Ok(serde_json::from_str(text)?)
}

fn json_cell_to_int(row: usize, cell: JsonCell) -> Result<i64> {
    match cell {
        JsonCell::Number(n) => Ok(n),
        JsonCell::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| Error::parse(row, format!("expected a number, found {s:?}"))),
    }
}

fn json_cell_to_char(row: usize, cell: JsonCell) -> Result<char> {
    match cell {
        JsonCell::Number(n) => u32::try_from(n)
            .ok()
            .and_then(|digit| char::from_digit(digit, 10))
            .ok_or_else(|| Error::parse(row, format!("expected a single character, found {n}"))),
        JsonCell::Text(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(Error::parse(
                    row,
                    format!("expected a single character, found {s:?}"),
                )),
            }
        }
    }
}

fn parse_int_row(line_no: usize, line: &str) -> Result<Vec<i64>> {
    if line.contains(char::is_whitespace) {
        line.split_whitespace()
            .map(|field| parse_field(line_no, field))
            .collect()
    } else {
        line.chars()
            .map(|c| {
                c.to_digit(10)
                    .map(i64::from)
                    .ok_or_else(|| Error::parse(line_no, format!("expected a digit, found {c:?}")))
            })
            .collect()
    }
}

fn parse_field<T: std::str::FromStr>(line_no: usize, field: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| Error::parse(line_no, format!("invalid number {field:?}")))
}

fn parse_fields<T: std::str::FromStr + Copy + Default, const N: usize>(
    line_no: usize,
    line: &str,
    expected: &str,
) -> Result<[T; N]> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != N {
        return Err(Error::parse(
            line_no,
            format!("expected {expected}, found {} fields", fields.len()),
        ));
    }

    let mut values = [T::default(); N];
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = parse_field(line_no, field)?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphwalk::{Cell, GraphError};
    use rstest::rstest;

    fn undirected() -> GraphOptions {
        GraphOptions::default()
    }

    #[test]
    fn test_json_graph() {
        let graph = parse_graph(
            r#"{"nodes": 3, "directed": true, "edges": [[0, 1], [1, 2, 5]]}"#,
            undirected(),
        )
        .unwrap();

        assert_eq!(graph.direction(), Direction::Directed);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1, 1), (1, 2, 5)]);
    }

    #[test]
    fn test_json_graph_uses_options_when_fields_absent() {
        let options = GraphOptions {
            direction: Direction::Directed,
            index_base: IndexBase::One,
        };
        let graph = parse_graph(r#"{"nodes": 2, "edges": [[1, 2]]}"#, options).unwrap();

        assert_eq!(graph.direction(), Direction::Directed);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1, 1)]);
    }

    #[test]
    fn test_json_graph_one_indexed_field() {
        let graph = parse_graph(
            r#"{"nodes": 2, "one_indexed": true, "edges": [[2, 1]]}"#,
            undirected(),
        )
        .unwrap();
        assert_eq!(graph.neighbor_ids(1).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_json_graph_bad_edge_arity() {
        let result = parse_graph(r#"{"nodes": 2, "edges": [[0]]}"#, undirected());
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_json_graph_invalid_node() {
        let result = parse_graph(r#"{"nodes": 2, "edges": [[0, 2]]}"#, undirected());
        assert!(matches!(
            result,
            Err(Error::Graph(GraphError::InvalidNodeId { node: 2, .. }))
        ));
    }

    #[test]
    fn test_edge_list() {
        let text = "# triangle plus a tail\n4 4\n0 1\n1 2\n\n2 0 # closes the loop\n2 3 7\n";
        let graph = parse_graph(text, undirected()).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.neighbors(3)[0].weight, 7);
    }

    #[rstest]
    #[case::empty("", 1)]
    #[case::bad_header("3\n0 1\n", 1)]
    #[case::bad_number("2 1\n0 x\n", 2)]
    #[case::too_many_fields("2 1\n0 1 1 1\n", 2)]
    #[case::count_mismatch("3 2\n0 1\n", 2)]
    fn test_edge_list_errors(#[case] text: &str, #[case] expected_line: usize) {
        match parse_graph(text, undirected()) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_list_one_indexed_rejects_zero() {
        let options = GraphOptions {
            index_base: IndexBase::One,
            ..GraphOptions::default()
        };
        let result = parse_graph("2 1\n0 1\n", options);
        assert!(matches!(
            result,
            Err(Error::Graph(GraphError::InvalidNodeId { node: 0, .. }))
        ));
    }

    #[rstest]
    #[case::json_numbers("[[0, 1], [2, 0]]")]
    #[case::json_strings(r#"[["0", "1"], ["2", "0"]]"#)]
    #[case::digit_runs("01\n20\n")]
    #[case::separated("0 1\n2 0\n")]
    fn test_int_grid_formats(#[case] text: &str) {
        let grid = parse_int_grid(text).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0, 1], vec![2, 0]]);
    }

    #[test]
    fn test_int_grid_ragged() {
        assert!(matches!(
            parse_int_grid("01\n2\n"),
            Err(Error::Graph(GraphError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_int_grid_bad_digit() {
        assert!(matches!(
            parse_int_grid("01\n2x\n"),
            Err(Error::Parse { line: 2, .. })
        ));
    }

    #[rstest]
    #[case::text("XO\nOX\n")]
    #[case::spaced("X O\nO X\n")]
    #[case::json(r#"[["X", "O"], ["O", "X"]]"#)]
    fn test_char_grid_formats(#[case] text: &str) {
        let grid = parse_char_grid(text).unwrap();
        assert_eq!(grid.to_rows(), vec![vec!['X', 'O'], vec!['O', 'X']]);
    }

    #[test]
    fn test_char_grid_rejects_long_strings() {
        assert!(matches!(
            parse_char_grid(r#"[["XO"]]"#),
            Err(Error::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_matrix_formats() {
        let json = parse_matrix("[[1, 1], [1, 1]]").unwrap();
        let text = parse_matrix("1 1\n1 1\n").unwrap();
        assert_eq!(json, text);
        assert!(json.has_edge(0, 1));
    }

    #[test]
    fn test_matrix_not_square() {
        assert!(matches!(
            parse_matrix("1 0 0\n0 1 0\n"),
            Err(Error::Graph(GraphError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_to_oranges() {
        let grid = parse_int_grid("21\n03\n").unwrap();
        assert!(matches!(to_oranges(&grid), Err(Error::Parse { line: 2, .. })));

        let grid = parse_int_grid("21\n00\n").unwrap();
        let oranges = to_oranges(&grid).unwrap();
        assert_eq!(oranges[Cell::new(0, 0)], Orange::Rotten);
        assert_eq!(oranges[Cell::new(0, 1)], Orange::Fresh);
    }

    #[test]
    fn test_grid_conversions() {
        let grid = parse_int_grid("012\n").unwrap();
        assert_eq!(to_land(&grid).to_rows(), vec![vec![false, true, true]]);
        assert_eq!(to_binary(&grid).to_rows(), vec![vec![0, 1, 0]]);
    }
}
