//! Labeled simple graphs on `u64` bitset rows (currently \(n \le 64\)).
//!
//! Vertices carry arbitrary `u32` labels: a graph produced by removing vertex
//! `3` from a graph on `{0..=5}` keeps the labels `{0, 1, 2, 4, 5}`. Labels
//! are stored sorted; all adjacency data is indexed by *position* (the rank of
//! a label), so the hot paths work on dense bitsets exactly as if the vertices
//! were `0..n`.

use rand::Rng;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Returns a mask with the lowest `n` bits set.
#[inline(always)]
pub const fn all_bits(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

#[inline(always)]
pub(crate) const fn bit(v: usize) -> u64 {
    1u64 << v
}

// ============================================================================
// Graph
// ============================================================================

/// An immutable simple undirected graph with labeled vertices.
///
/// Representation:
/// - `labels` is the sorted list of vertex identifiers.
/// - `adj[i]` is the neighbor bitset of the vertex at position `i`, with bit
///   `j` set iff the vertices at positions `i` and `j` are adjacent.
///
/// Invariants (enforced at construction): no self-loops, every edge endpoint
/// is a declared vertex, no duplicate labels, at most 64 vertices. The edge
/// and vertex sets never change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    labels: Vec<u32>,
    adj: Vec<u64>,
}

impl Graph {
    /// Builds a graph from a vertex label set and a list of labeled edges.
    ///
    /// Duplicate edges collapse (set semantics); the order of `labels` and
    /// `edges` does not matter.
    ///
    /// # Errors
    /// Returns an error on duplicate labels, more than 64 vertices,
    /// self-loops, or an edge endpoint that is not a declared vertex.
    pub fn from_edges(labels: &[u32], edges: &[(u32, u32)]) -> Result<Self, GraphError> {
        let mut sorted = labels.to_vec();
        sorted.sort_unstable();
        for w in sorted.windows(2) {
            if w[0] == w[1] {
                return Err(GraphError::DuplicateLabel { label: w[0] });
            }
        }
        let n = sorted.len();
        if n > 64 {
            return Err(GraphError::TooManyVertices { n });
        }

        let mut adj = vec![0u64; n];
        for &(a, b) in edges {
            if a == b {
                return Err(GraphError::SelfLoop { label: a });
            }
            let i = sorted
                .binary_search(&a)
                .map_err(|_| GraphError::UnknownEndpoint { label: a })?;
            let j = sorted
                .binary_search(&b)
                .map_err(|_| GraphError::UnknownEndpoint { label: b })?;
            adj[i] |= bit(j);
            adj[j] |= bit(i);
        }

        Ok(Self {
            labels: sorted,
            adj,
        })
    }

    /// Builds a graph with labels `0..n` directly from adjacency bitset rows.
    ///
    /// # Errors
    /// Returns an error if a row has bits outside `0..n`, the diagonal is
    /// non-zero, or the matrix is not symmetric.
    pub fn from_adj_rows(adj: Vec<u64>) -> Result<Self, GraphError> {
        let n = adj.len();
        if n > 64 {
            return Err(GraphError::TooManyVertices { n });
        }
        let mask = all_bits(n);
        for (i, &row) in adj.iter().enumerate() {
            if row & !mask != 0 {
                return Err(GraphError::UnknownEndpoint {
                    label: (row & !mask).trailing_zeros(),
                });
            }
            if (row >> i) & 1 != 0 {
                return Err(GraphError::SelfLoop { label: i as u32 });
            }
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if (adj[i] >> j) & 1 != (adj[j] >> i) & 1 {
                    return Err(GraphError::NotSymmetric { i, j });
                }
            }
        }
        Ok(Self {
            labels: (0..n as u32).collect(),
            adj,
        })
    }

    /// Generates a random graph on labels `0..n` with edge probability `p`.
    pub fn random<R: Rng>(rng: &mut R, n: usize, p: f64) -> Self {
        debug_assert!(n <= 64, "this representation assumes n <= 64");
        debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
        let mut adj = vec![0u64; n];
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.random_bool(p) {
                    adj[i] |= bit(j);
                    adj[j] |= bit(i);
                }
            }
        }
        Self {
            labels: (0..n as u32).collect(),
            adj,
        }
    }

    /// Returns the number of vertices.
    #[inline(always)]
    pub fn order(&self) -> usize {
        self.labels.len()
    }

    /// Returns the sorted vertex labels.
    #[inline(always)]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Returns the label of the vertex at `pos`.
    #[inline(always)]
    pub fn label(&self, pos: usize) -> u32 {
        self.labels[pos]
    }

    /// Returns the position of `label`, if it names a vertex.
    #[inline]
    pub fn position_of(&self, label: u32) -> Option<usize> {
        self.labels.binary_search(&label).ok()
    }

    /// Returns the adjacency bitset rows, indexed by position.
    #[inline(always)]
    pub fn adjacency(&self) -> &[u64] {
        &self.adj
    }

    /// Returns the neighbor bitset of the vertex at `pos`.
    #[inline(always)]
    pub fn row(&self, pos: usize) -> u64 {
        self.adj[pos]
    }

    /// Returns whether the vertices at positions `u` and `v` are adjacent.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        debug_assert!(u < self.order() && v < self.order());
        (self.adj[u] & bit(v)) != 0
    }

    /// Returns the degree of the vertex at `pos`.
    #[inline(always)]
    pub fn degree(&self, pos: usize) -> u32 {
        self.adj[pos].count_ones()
    }

    /// Returns the total number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        let sum: u32 = self.adj.iter().map(|r| r.count_ones()).sum();
        (sum as usize) / 2
    }

    /// Returns the degree sequence, sorted ascending.
    pub fn degree_sequence(&self) -> Vec<u32> {
        let mut degs: Vec<u32> = self.adj.iter().map(|r| r.count_ones()).collect();
        degs.sort_unstable();
        degs
    }

    /// Returns the graph obtained by deleting the vertex with `label`, or
    /// `None` if no vertex carries that label.
    ///
    /// Remaining vertices keep their labels.
    pub fn remove_vertex(&self, label: u32) -> Option<Graph> {
        let pos = self.position_of(label)?;
        let n = self.order();
        let mut labels = Vec::with_capacity(n - 1);
        let mut adj = Vec::with_capacity(n - 1);
        let low = all_bits(pos);

        for i in 0..n {
            if i == pos {
                continue;
            }
            labels.push(self.labels[i]);
            let row = self.adj[i];
            // Splice bit `pos` out of the row: bits above it shift down one.
            adj.push((row & low) | ((row >> 1) & !low));
        }
        Some(Graph { labels, adj })
    }

    /// Writes the adjacency matrix as `n` rows of `0/1` characters.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        let n = self.order();
        for i in 0..n {
            for j in 0..n {
                let edge = (self.adj[i] >> j) & 1;
                write!(w, "{edge}")?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    /// Loads a graph from a file containing a square `0/1` adjacency matrix.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the matrix is malformed.
    pub fn load_from_file(filename: impl AsRef<Path>) -> Result<Self, GraphError> {
        let file = File::open(filename).map_err(|e| GraphError::Io(e.to_string()))?;
        let reader = BufReader::new(file);
        let mut text = String::new();
        for line in reader.lines() {
            let line = line.map_err(|e| GraphError::Io(e.to_string()))?;
            text.push_str(&line);
            text.push('\n');
        }
        parse_adjacency_matrix(&text)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors encountered while constructing or parsing a graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphError {
    /// The same label appears twice in the vertex set.
    DuplicateLabel {
        /// The repeated label.
        label: u32,
    },
    /// More than 64 vertices, which does not fit a `u64` bitset row.
    TooManyVertices {
        /// Number of vertices supplied.
        n: usize,
    },
    /// An edge joins a vertex to itself.
    SelfLoop {
        /// The offending label.
        label: u32,
    },
    /// An edge endpoint is not in the vertex set.
    UnknownEndpoint {
        /// The undeclared label.
        label: u32,
    },
    /// The parsed matrix has no non-empty rows.
    Empty,
    /// The parsed matrix is not square.
    NonSquare {
        /// Row index with the wrong length.
        row: usize,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// A character other than `0`/`1` in the matrix.
    InvalidChar {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The invalid character.
        ch: char,
    },
    /// `A[i][j] != A[j][i]`.
    NotSymmetric {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
    },
    /// I/O error (file not found, etc.).
    Io(String),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateLabel { label } => {
                write!(f, "duplicate vertex label {label}")
            }
            GraphError::TooManyVertices { n } => {
                write!(
                    f,
                    "graph has {n} vertices; this implementation supports n <= 64"
                )
            }
            GraphError::SelfLoop { label } => write!(f, "self-loop at vertex {label}"),
            GraphError::UnknownEndpoint { label } => {
                write!(f, "edge endpoint {label} is not a declared vertex")
            }
            GraphError::Empty => write!(f, "adjacency matrix is empty"),
            GraphError::NonSquare { row, expected, got } => write!(
                f,
                "adjacency matrix is not square: row {row} has length {got}, expected {expected}"
            ),
            GraphError::InvalidChar { row, col, ch } => write!(
                f,
                "invalid character at ({row}, {col}): {ch:?} (expected '0' or '1')"
            ),
            GraphError::NotSymmetric { i, j } => {
                write!(f, "matrix is not symmetric at ({i},{j})")
            }
            GraphError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for GraphError {}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a `0/1` adjacency matrix into a graph with labels `0..n`.
///
/// Rules:
/// - Blank lines are ignored.
/// - The matrix must be square, symmetric, and have a zero diagonal.
/// - `n` must be `<= 64`.
///
/// # Errors
/// Returns an error if the input is empty, non-square, contains invalid
/// characters, has a non-zero diagonal, or is not symmetric.
pub fn parse_adjacency_matrix(text: &str) -> Result<Graph, GraphError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GraphError::Empty);
    }
    let n = lines.len();
    if n > 64 {
        return Err(GraphError::TooManyVertices { n });
    }

    let mut rows = Vec::with_capacity(n);
    for (i, line) in lines.iter().enumerate() {
        let bytes = line.as_bytes();
        if bytes.len() != n {
            return Err(GraphError::NonSquare {
                row: i,
                expected: n,
                got: bytes.len(),
            });
        }
        let mut mask = 0u64;
        for (j, &b) in bytes.iter().enumerate() {
            match b {
                b'0' => {}
                b'1' => mask |= bit(j),
                _ => {
                    return Err(GraphError::InvalidChar {
                        row: i,
                        col: j,
                        ch: b as char,
                    })
                }
            }
        }
        rows.push(mask);
    }

    Graph::from_adj_rows(rows)
}

// ============================================================================
// Tests
// ============================================================================
