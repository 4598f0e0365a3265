//! Constellation Engine
//!
//! Chains the five pure stages in a fixed pipeline:
//!
//! Similarity → Matrix → Threshold → Adjacency → Clusters
//!
//! A run is synchronous, single-threaded, and total over well-formed input:
//! zero or one dream yields empty/degenerate structures, never an error.
//! The engine takes an immutable snapshot of the dream set and never
//! re-reads a live collection mid-computation.
//!
//! Hosts that must not pause an event thread for a large O(N²) run can use
//! [`Constellation::compute_off_thread`], which executes the whole pipeline
//! on a blocking worker and delivers the complete result once - no partial
//! results, no streaming.

pub mod clusters;
pub mod matrix;

pub use clusters::find_clusters;
pub use matrix::{
    AdjacencyMatrix, SimilarityMatrix, adjacency_matrix, build_matrix,
    determine_dynamic_threshold,
};

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::dream::DreamRecord;

/// Default fraction of possible edges that survive thresholding
pub const DEFAULT_TARGET_DENSITY: f64 = 0.25;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Configuration for a constellation run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConstellationConfig {
    /// Target edge density in [0,1]; lower values produce sparser graphs.
    /// Values outside the range are clamped by the threshold selector.
    pub target_density: f64,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            target_density: DEFAULT_TARGET_DENSITY,
        }
    }
}

// ============================================================================
// RESULT
// ============================================================================

/// An edge surviving the threshold, with its similarity weight
///
/// Listed once per unordered pair (`a < b`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstellationEdge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// The complete result of one pipeline run
///
/// Everything here is derived and ephemeral: it is recomputed whole when
/// the dream set changes and is never persisted. Indices refer to positions
/// in the input snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constellation {
    /// Pairwise similarity matrix
    pub similarity: SimilarityMatrix,
    /// The similarity cutoff derived for the configured density
    pub threshold: f64,
    /// Binary connectivity at the threshold
    pub adjacency: AdjacencyMatrix,
    /// Connected components, ordered by ascending root index;
    /// members in DFS preorder
    pub clusters: Vec<Vec<usize>>,
    /// Surviving edges with weights, for node/edge placement
    pub edges: Vec<ConstellationEdge>,
}

impl Constellation {
    /// Run the full pipeline over a snapshot of dream records
    pub fn compute(dreams: &[DreamRecord], config: &ConstellationConfig) -> Self {
        let start = Instant::now();

        let similarity = build_matrix(dreams);
        let threshold = determine_dynamic_threshold(&similarity, config.target_density);
        let adjacency = adjacency_matrix(&similarity, threshold);
        let clusters = find_clusters(&adjacency);
        let edges = collect_edges(&similarity, &adjacency);

        tracing::debug!(
            dreams = dreams.len(),
            threshold,
            edges = edges.len(),
            clusters = clusters.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "constellation computed"
        );

        Self {
            similarity,
            threshold,
            adjacency,
            clusters,
            edges,
        }
    }

    /// Run the pipeline on a blocking worker thread
    ///
    /// Takes an owned snapshot so the backing collection can keep changing
    /// while the run is in flight. Delivers the complete result once.
    pub async fn compute_off_thread(
        dreams: Vec<DreamRecord>,
        config: ConstellationConfig,
    ) -> Self {
        tokio::task::spawn_blocking(move || Self::compute(&dreams, &config))
            .await
            .expect("constellation compute task panicked")
    }

    /// Number of dreams in the snapshot this result was computed from
    pub fn len(&self) -> usize {
        self.similarity.len()
    }

    /// True when the snapshot was empty
    pub fn is_empty(&self) -> bool {
        self.similarity.is_empty()
    }

    /// Index of the cluster containing a dream index, if in range
    pub fn cluster_of(&self, index: usize) -> Option<usize> {
        self.clusters
            .iter()
            .position(|cluster| cluster.contains(&index))
    }

    /// Serialize for the rendering collaborator
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn collect_edges(
    similarity: &SimilarityMatrix,
    adjacency: &AdjacencyMatrix,
) -> Vec<ConstellationEdge> {
    let n = adjacency.len();
    let mut edges = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            if adjacency.get(a, b) == 1 {
                edges.push(ConstellationEdge {
                    a,
                    b,
                    weight: similarity.get(a, b),
                });
            }
        }
    }
    edges
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dream::{DreamTag, Emotion};

    fn make_dream(content: &str, tags: &[DreamTag], emotion: Emotion) -> DreamRecord {
        DreamRecord::new("user-1", "test", content, tags.to_vec(), emotion)
    }

    fn two_pair_dreams() -> Vec<DreamRecord> {
        vec![
            make_dream(
                "flying above glowing clouds toward sunrise",
                &[DreamTag::Flying, DreamTag::Lucid],
                Emotion::Joy,
            ),
            make_dream(
                "flying through glowing clouds chasing sunrise",
                &[DreamTag::Flying, DreamTag::Lucid],
                Emotion::Joy,
            ),
            make_dream(
                "trapped inside a flooding basement, water rising",
                &[DreamTag::Water, DreamTag::Nightmare],
                Emotion::Fear,
            ),
            make_dream(
                "basement flooding again, dark water rising fast",
                &[DreamTag::Water, DreamTag::Nightmare],
                Emotion::Fear,
            ),
        ]
    }

    #[test]
    fn test_empty_snapshot() {
        let result = Constellation::compute(&[], &ConstellationConfig::default());
        assert!(result.is_empty());
        assert_eq!(result.threshold, 0.0);
        assert!(result.clusters.is_empty());
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_single_dream_snapshot() {
        let dreams = two_pair_dreams()[..1].to_vec();
        let result = Constellation::compute(&dreams, &ConstellationConfig::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result.threshold, 0.0);
        assert_eq!(result.clusters, vec![vec![0]]);
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_pipeline_separates_unrelated_groups() {
        let result = Constellation::compute(&two_pair_dreams(), &ConstellationConfig::default());
        assert_eq!(result.clusters, vec![vec![0, 1], vec![2, 3]]);
        assert_eq!(result.edges.len(), 2);
        assert_eq!((result.edges[0].a, result.edges[0].b), (0, 1));
        assert_eq!((result.edges[1].a, result.edges[1].b), (2, 3));
    }

    #[test]
    fn test_edges_match_adjacency() {
        let result = Constellation::compute(&two_pair_dreams(), &ConstellationConfig::default());
        for edge in &result.edges {
            assert!(edge.a < edge.b, "edges listed once per unordered pair");
            assert_eq!(result.adjacency.get(edge.a, edge.b), 1);
            assert_eq!(result.similarity.get(edge.a, edge.b), edge.weight);
            assert!(edge.weight > result.threshold);
        }
    }

    #[test]
    fn test_density_controls_edge_count() {
        let dreams = two_pair_dreams();
        let sparse = Constellation::compute(
            &dreams,
            &ConstellationConfig {
                target_density: 0.1,
            },
        );
        let dense = Constellation::compute(
            &dreams,
            &ConstellationConfig {
                target_density: 0.9,
            },
        );
        assert!(
            dense.edges.len() >= sparse.edges.len(),
            "higher density must keep at least as many edges ({} vs {})",
            dense.edges.len(),
            sparse.edges.len()
        );
    }

    #[test]
    fn test_cluster_of_lookup() {
        let result = Constellation::compute(&two_pair_dreams(), &ConstellationConfig::default());
        assert_eq!(result.cluster_of(0), Some(0));
        assert_eq!(result.cluster_of(3), Some(1));
        assert_eq!(result.cluster_of(99), None);
    }

    #[test]
    fn test_result_serializes_to_json() {
        let result = Constellation::compute(&two_pair_dreams(), &ConstellationConfig::default());
        let json = result.to_json().unwrap();
        assert!(json.contains("\"threshold\""));
        assert!(json.contains("\"clusters\""));

        let back: Constellation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.clusters, result.clusters);
        assert_eq!(back.threshold, result.threshold);
    }

    #[tokio::test]
    async fn test_off_thread_matches_synchronous_run() {
        let dreams = two_pair_dreams();
        let sync = Constellation::compute(&dreams, &ConstellationConfig::default());
        let off = Constellation::compute_off_thread(dreams, ConstellationConfig::default()).await;
        assert_eq!(off.clusters, sync.clusters);
        assert_eq!(off.threshold, sync.threshold);
        assert_eq!(off.edges.len(), sync.edges.len());
    }
}
