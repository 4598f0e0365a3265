//! Pairwise dream similarity
//!
//! Combines three signals into one weighted scalar in [0,1]:
//!
//! - **Content overlap**: Jaccard index over the significant words of the
//!   logged and generated text
//! - **Tag overlap**: Jaccard index over the tag multisets collapsed to sets
//! - **Emotion match**: binary, both records carry exactly one emotion
//!
//! The function is pure and symmetric. Records with empty content or empty
//! tag sets contribute 0.0 for that signal rather than dividing by zero.

use std::collections::HashSet;

use crate::dream::{DreamRecord, DreamTag, Emotion};

// ============================================================================
// WEIGHTS
// ============================================================================

/// Signal weights, must sum to 1.0 so the combined score stays in [0,1]
const CONTENT_WEIGHT: f64 = 0.5;
const TAG_WEIGHT: f64 = 0.3;
const EMOTION_WEIGHT: f64 = 0.2;

/// Words at or below this length carry little signal and are skipped
const MIN_WORD_LEN: usize = 4;

// ============================================================================
// SIMILARITY
// ============================================================================

/// Similarity between two dream records, in [0,1]
///
/// Symmetric: `similarity(a, b) == similarity(b, a)`. The reflexive value
/// is unused; the matrix builder never computes the diagonal.
pub fn similarity(a: &DreamRecord, b: &DreamRecord) -> f64 {
    let content = content_similarity(a, b);
    let tags = tag_similarity(&a.tags, &b.tags);
    let emotion = emotion_match(a.emotion, b.emotion);

    CONTENT_WEIGHT * content + TAG_WEIGHT * tags + EMOTION_WEIGHT * emotion
}

/// Content similarity via word overlap (Jaccard)
///
/// Pools the logged and generated text of each record so an AI retelling
/// can connect two dreams whose raw logs use different words.
pub fn content_similarity(a: &DreamRecord, b: &DreamRecord) -> f64 {
    jaccard(&significant_words(a), &significant_words(b))
}

/// Tag similarity (Jaccard index over the collapsed tag sets)
pub fn tag_similarity(tags_a: &[DreamTag], tags_b: &[DreamTag]) -> f64 {
    let set_a: HashSet<_> = tags_a.iter().collect();
    let set_b: HashSet<_> = tags_b.iter().collect();
    jaccard(&set_a, &set_b)
}

/// Emotion match: 1.0 when the dominant emotions agree, else 0.0
pub fn emotion_match(a: Emotion, b: Emotion) -> f64 {
    if a == b { 1.0 } else { 0.0 }
}

fn significant_words(dream: &DreamRecord) -> HashSet<String> {
    dream
        .content
        .split_whitespace()
        .chain(dream.generated_content.split_whitespace())
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .collect()
}

fn jaccard<T: std::hash::Hash + Eq>(set_a: &HashSet<T>, set_b: &HashSet<T>) -> f64 {
    let union = set_a.union(set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(set_b).count();
    intersection as f64 / union as f64
}

// ============================================================================
// TESTS
// ============================================================================
