//! Distance matrix over towns.
//!
//! A [`Graph`] is loaded once per run and never mutated afterwards. Every
//! parsed distance is shifted by a positive offset so that edge weights are
//! strictly positive and `1 / distance` stays finite in the selection rule.

use crate::error::{AcoError, Result};
use std::fs;
use std::path::Path;

/// Offset added to every distance at load time.
pub const DEFAULT_DISTANCE_OFFSET: f64 = 1.0;

/// Immutable `n × n` distance matrix.
///
/// Distances are stored row-major with the load-time offset already
/// applied, so [`Graph::distance`] is what the solver sees everywhere:
/// selection weights, tour lengths and pheromone deposits.
///
/// # Examples
///
/// ```
/// use u_antsp::aco::Graph;
///
/// let graph = Graph::parse("0 2\n3 0\n", 1.0).unwrap();
/// assert_eq!(graph.size(), 2);
/// assert_eq!(graph.distance(0, 1), 3.0);
/// assert_eq!(graph.distance(1, 0), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    towns: usize,
    distances: Vec<f64>,
}

impl Graph {
    /// Builds a graph from an in-memory matrix.
    ///
    /// # Errors
    ///
    /// Fails on ragged or non-square input, fewer than two towns, negative
    /// or non-finite distances, and a non-positive offset.
    pub fn from_matrix(rows: Vec<Vec<f64>>, offset: f64) -> Result<Self> {
        check_offset(offset)?;
        let columns = rows.first().map_or(0, Vec::len);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(AcoError::RaggedRow {
                    line: i + 1,
                    expected: columns,
                    found: row.len(),
                });
            }
        }
        Self::assemble(rows.into_iter().flatten().collect(), columns, offset)
    }

    /// Parses rows of whitespace-separated distances.
    ///
    /// Blank lines are skipped. Line numbers in errors refer to the
    /// input text.
    pub fn parse(text: &str, offset: f64) -> Result<Self> {
        check_offset(offset)?;
        let mut values = Vec::new();
        let mut columns = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let start = values.len();
            for token in line.split_whitespace() {
                let value = token.parse::<f64>().map_err(|_| AcoError::InvalidToken {
                    line: line_no,
                    token: token.to_string(),
                })?;
                values.push(value);
            }
            let found = values.len() - start;
            if found == 0 {
                continue;
            }
            match columns {
                None => columns = Some(found),
                Some(expected) if expected != found => {
                    return Err(AcoError::RaggedRow {
                        line: line_no,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
        }

        Self::assemble(values, columns.unwrap_or(0), offset)
    }

    /// Reads and parses a distance matrix file.
    pub fn from_file(path: impl AsRef<Path>, offset: f64) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AcoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, offset)
    }

    fn assemble(mut values: Vec<f64>, columns: usize, offset: f64) -> Result<Self> {
        let rows = if columns == 0 { 0 } else { values.len() / columns };
        if rows != columns {
            return Err(AcoError::NotSquare { rows, columns });
        }
        if columns < 2 {
            return Err(AcoError::TooFewTowns(columns));
        }
        for (k, value) in values.iter_mut().enumerate() {
            if !value.is_finite() || *value < 0.0 {
                return Err(AcoError::InvalidDistance {
                    row: k / columns,
                    column: k % columns,
                    value: *value,
                });
            }
            *value += offset;
        }
        Ok(Self {
            towns: columns,
            distances: values,
        })
    }

    /// Number of towns.
    #[inline]
    pub fn size(&self) -> usize {
        self.towns
    }

    /// Distance from town `i` to town `j`, offset included.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i * self.towns + j]
    }

    /// Length of a closed tour: consecutive edges plus the edge from the
    /// last town back to the first.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        let Some((&first, &last)) = tour.first().zip(tour.last()) else {
            return 0.0;
        };
        let open: f64 = tour.windows(2).map(|w| self.distance(w[0], w[1])).sum();
        open + self.distance(last, first)
    }
}

fn check_offset(offset: f64) -> Result<()> {
    if offset.is_finite() && offset > 0.0 {
        Ok(())
    } else {
        Err(AcoError::InvalidOffset(offset))
    }
}
