//! Similarity and adjacency matrices
//!
//! The O(N²) heart of the engine. The similarity matrix is rebuilt whole
//! whenever the dream set changes - there is no incremental update path,
//! so callers should run the pipeline at most once per change.

use serde::{Deserialize, Serialize};

use crate::dream::DreamRecord;
use crate::similarity::similarity;

// ============================================================================
// SIMILARITY MATRIX
// ============================================================================

/// Square symmetric matrix of pairwise similarities in [0,1]
///
/// The diagonal is never computed and stays at 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    fn zeroed(n: usize) -> Self {
        Self {
            rows: vec![vec![0.0; n]; n],
        }
    }

    /// Build from pre-computed rows. Rows must form a square matrix;
    /// anything else is a programming error upstream.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let n = rows.len();
        assert!(
            rows.iter().all(|r| r.len() == n),
            "similarity matrix rows must be square"
        );
        Self { rows }
    }

    /// Number of dreams in the working set
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the working set is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Entry at (i, j)
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    /// Raw rows, for the rendering collaborator
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// The N·(N-1)/2 upper-triangle values (i < j), in row-major order
    pub fn upper_triangle(&self) -> Vec<f64> {
        let n = self.len();
        let mut values = Vec::with_capacity(n.saturating_sub(1) * n / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                values.push(self.rows[i][j]);
            }
        }
        values
    }
}

/// Build the full pairwise similarity matrix
///
/// Each unordered pair is computed once and stored symmetrically. This is
/// the dominant cost of the whole engine.
pub fn build_matrix(dreams: &[DreamRecord]) -> SimilarityMatrix {
    let n = dreams.len();
    let mut matrix = SimilarityMatrix::zeroed(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let sim = similarity(&dreams[i], &dreams[j]);
            matrix.rows[i][j] = sim;
            matrix.rows[j][i] = sim;
        }
    }
    matrix
}

// ============================================================================
// THRESHOLD SELECTOR
// ============================================================================

/// Derive the similarity cutoff that keeps roughly `target_density` of the
/// possible edges
///
/// Collects the upper-triangle values, sorts ascending, and picks the value
/// at rank `floor((count - 1) * (1 - target_density))`. Zero or one dream
/// yields no pairs and returns 0.0. `target_density` is clamped to [0,1];
/// lower values produce sparser graphs.
pub fn determine_dynamic_threshold(matrix: &SimilarityMatrix, target_density: f64) -> f64 {
    let mut values = matrix.upper_triangle();
    if values.is_empty() {
        return 0.0;
    }

    let density = target_density.clamp(0.0, 1.0);
    values.sort_by(f64::total_cmp);

    let rank = ((values.len() - 1) as f64 * (1.0 - density)).floor() as usize;
    values[rank.min(values.len() - 1)]
}

// ============================================================================
// ADJACENCY MATRIX
// ============================================================================

/// Binary connectivity derived from thresholding the similarity matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    rows: Vec<Vec<u8>>,
}

impl AdjacencyMatrix {
    /// Build from pre-computed binary rows. Rows must form a square matrix
    /// of 0/1 values.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Self {
        let n = rows.len();
        assert!(
            rows.iter().all(|r| r.len() == n),
            "adjacency matrix rows must be square"
        );
        assert!(
            rows.iter().flatten().all(|&v| v <= 1),
            "adjacency matrix entries must be 0 or 1"
        );
        Self { rows }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no nodes
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Entry at (i, j): 1 when the nodes are connected
    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.rows[i][j]
    }

    /// Raw rows, for the rendering collaborator
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }
}

/// Binarize the similarity matrix at a threshold
///
/// Strictly-greater-than comparison, applied element-wise over the full
/// matrix. The diagonal stays 0 because the similarity diagonal is 0 and
/// derived thresholds are never negative.
pub fn adjacency_matrix(matrix: &SimilarityMatrix, threshold: f64) -> AdjacencyMatrix {
    let rows = matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|&sim| if sim > threshold { 1 } else { 0 })
                .collect()
        })
        .collect();
    AdjacencyMatrix { rows }
}

// ============================================================================
// TESTS
// ============================================================================
