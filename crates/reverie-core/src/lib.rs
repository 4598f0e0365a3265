//! # Reverie Core
//!
//! Dream similarity and clustering engine for the Reverie journal. Given a
//! snapshot of dream records it computes pairwise similarity, derives a
//! connectivity threshold for a target edge density, binarizes the graph,
//! and partitions the entries into connected-component clusters - the data
//! behind the constellation visualization.
//!
//! The pipeline is a chain of pure functions:
//!
//! Similarity → Matrix → Threshold → Adjacency → Clusters
//!
//! Everything downstream of the record model is derived, ephemeral, and
//! recomputed whole on any change to the dream set. Persistence, rendering,
//! and platform integrations live in external collaborators.
//!
//! ## Quick Start
//!
//! ```rust
//! use reverie_core::{Constellation, ConstellationConfig, DreamRecord, DreamTag, Emotion};
//!
//! let dreams = vec![
//!     DreamRecord::new(
//!         "user-1",
//!         "Night flight",
//!         "flying over the sleeping city toward the mountains",
//!         vec![DreamTag::Flying, DreamTag::Lucid],
//!         Emotion::Joy,
//!     ),
//!     DreamRecord::new(
//!         "user-1",
//!         "Still flying",
//!         "flying over the mountains beyond the city again",
//!         vec![DreamTag::Flying, DreamTag::Recurring],
//!         Emotion::Joy,
//!     ),
//! ];
//!
//! let constellation = Constellation::compute(&dreams, &ConstellationConfig::default());
//! assert_eq!(constellation.len(), 2);
//! assert_eq!(constellation.clusters.iter().flatten().count(), 2);
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod constellation;
pub mod dream;
pub mod insights;
pub mod similarity;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Record model
pub use dream::{DreamError, DreamRecord, DreamTag, Emotion};

// Similarity function
pub use similarity::{similarity, tag_similarity};

// Constellation engine
pub use constellation::{
    AdjacencyMatrix, Constellation, ConstellationConfig, ConstellationEdge, SimilarityMatrix,
    adjacency_matrix, build_matrix, determine_dynamic_threshold, find_clusters,
    DEFAULT_TARGET_DENSITY,
};

// Journal analytics
pub use insights::{DreamSetStats, RecurringTheme, dream_set_stats, recurring_themes};

/// Convenience imports for hosts of the engine
pub mod prelude {
    pub use crate::{
        Constellation, ConstellationConfig, ConstellationEdge, DreamRecord, DreamTag, Emotion,
    };
}
