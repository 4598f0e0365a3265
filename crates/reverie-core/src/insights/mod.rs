//! Dream-set analytics
//!
//! Lightweight aggregates over a journal snapshot: emotion and tag
//! distributions, plus recurring themes (tags that keep showing up across
//! entries). Pure functions, same snapshot discipline as the engine.

use serde::Serialize;
use std::collections::HashMap;

use crate::constellation::Constellation;
use crate::dream::{DreamRecord, DreamTag, Emotion};

/// A tag must appear in at least this many dreams to count as recurring
const MIN_THEME_OCCURRENCES: usize = 3;

// ============================================================================
// RECURRING THEMES
// ============================================================================

/// A tag that recurs across the journal
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTheme {
    /// The recurring tag
    pub tag: DreamTag,
    /// Ids of the dreams carrying it, in snapshot order
    pub dream_ids: Vec<String>,
    /// Fraction of the snapshot carrying the tag
    pub confidence: f64,
}

/// Find tags appearing in at least three dreams
///
/// Duplicate tags within one record count once. Results are sorted by
/// descending confidence, ties broken by tag name for determinism.
pub fn recurring_themes(dreams: &[DreamRecord]) -> Vec<RecurringTheme> {
    if dreams.is_empty() {
        return Vec::new();
    }

    let mut occurrences: HashMap<DreamTag, Vec<String>> = HashMap::new();
    for dream in dreams {
        let mut seen: Vec<DreamTag> = Vec::new();
        for &tag in &dream.tags {
            if !seen.contains(&tag) {
                seen.push(tag);
                occurrences.entry(tag).or_default().push(dream.id.clone());
            }
        }
    }

    let total = dreams.len();
    let mut themes: Vec<RecurringTheme> = occurrences
        .into_iter()
        .filter(|(_, ids)| ids.len() >= MIN_THEME_OCCURRENCES)
        .map(|(tag, dream_ids)| RecurringTheme {
            confidence: dream_ids.len() as f64 / total as f64,
            tag,
            dream_ids,
        })
        .collect();

    themes.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.tag.as_str().cmp(b.tag.as_str()))
    });
    themes
}

// ============================================================================
// SET STATISTICS
// ============================================================================

/// Aggregate statistics over a journal snapshot
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamSetStats {
    /// Number of dreams in the snapshot
    pub total: usize,
    /// Dreams per emotion
    pub emotion_counts: HashMap<Emotion, usize>,
    /// Dreams per tag (duplicates within one record count once)
    pub tag_counts: HashMap<DreamTag, usize>,
    /// Number of clusters, when computed against a constellation
    pub cluster_count: usize,
    /// Size of the largest cluster, 0 when no constellation was supplied
    pub largest_cluster: usize,
}

/// Compute snapshot statistics, optionally enriched with cluster shape
pub fn dream_set_stats(
    dreams: &[DreamRecord],
    constellation: Option<&Constellation>,
) -> DreamSetStats {
    let mut stats = DreamSetStats {
        total: dreams.len(),
        ..Default::default()
    };

    for dream in dreams {
        *stats.emotion_counts.entry(dream.emotion).or_insert(0) += 1;
        let mut seen: Vec<DreamTag> = Vec::new();
        for &tag in &dream.tags {
            if !seen.contains(&tag) {
                seen.push(tag);
                *stats.tag_counts.entry(tag).or_insert(0) += 1;
            }
        }
    }

    if let Some(constellation) = constellation {
        stats.cluster_count = constellation.clusters.len();
        stats.largest_cluster = constellation
            .clusters
            .iter()
            .map(|c| c.len())
            .max()
            .unwrap_or(0);
    }

    stats
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constellation::ConstellationConfig;

    fn make_dream(content: &str, tags: &[DreamTag], emotion: Emotion) -> DreamRecord {
        DreamRecord::new("user-1", "test", content, tags.to_vec(), emotion)
    }

    fn journal() -> Vec<DreamRecord> {
        vec![
            make_dream("flying again", &[DreamTag::Flying], Emotion::Joy),
            make_dream("flying over water", &[DreamTag::Flying, DreamTag::Water], Emotion::Joy),
            make_dream("flying home", &[DreamTag::Flying], Emotion::Peace),
            make_dream("sinking ship", &[DreamTag::Water], Emotion::Fear),
        ]
    }

    #[test]
    fn test_recurring_theme_needs_three_dreams() {
        let themes = recurring_themes(&journal());
        assert_eq!(themes.len(), 1, "only flying recurs three times");
        assert_eq!(themes[0].tag, DreamTag::Flying);
        assert_eq!(themes[0].dream_ids.len(), 3);
        assert!((themes[0].confidence - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_recurring_themes_empty_input() {
        assert!(recurring_themes(&[]).is_empty());
    }

    #[test]
    fn test_duplicate_tags_count_once_per_dream() {
        let dreams = vec![
            make_dream("a", &[DreamTag::Chase, DreamTag::Chase], Emotion::Fear),
            make_dream("b", &[DreamTag::Chase], Emotion::Fear),
        ];
        assert!(
            recurring_themes(&dreams).is_empty(),
            "two dreams must not reach the three-dream cutoff"
        );
        let stats = dream_set_stats(&dreams, None);
        assert_eq!(stats.tag_counts[&DreamTag::Chase], 2);
    }

    #[test]
    fn test_stats_count_emotions_and_tags() {
        let stats = dream_set_stats(&journal(), None);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.emotion_counts[&Emotion::Joy], 2);
        assert_eq!(stats.emotion_counts[&Emotion::Peace], 1);
        assert_eq!(stats.emotion_counts[&Emotion::Fear], 1);
        assert_eq!(stats.tag_counts[&DreamTag::Flying], 3);
        assert_eq!(stats.tag_counts[&DreamTag::Water], 2);
        assert_eq!(stats.cluster_count, 0);
    }

    #[test]
    fn test_stats_pick_up_cluster_shape() {
        let dreams = journal();
        let constellation = Constellation::compute(&dreams, &ConstellationConfig::default());
        let stats = dream_set_stats(&dreams, Some(&constellation));
        assert_eq!(stats.cluster_count, constellation.clusters.len());
        let expected_largest = constellation.clusters.iter().map(|c| c.len()).max().unwrap();
        assert_eq!(stats.largest_cluster, expected_largest);
    }
}
