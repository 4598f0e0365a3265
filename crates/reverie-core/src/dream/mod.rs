//! Dream Record - The fundamental unit of the journal
//!
//! Each record represents one logged dream with:
//! - User-written content and an optional AI-augmented retelling
//! - A multiset of tags drawn from a closed theme enumeration
//! - Exactly one emotion drawn from a closed 7-value enumeration
//! - Optional image references
//!
//! Tags and emotions are closed sets on purpose: anything outside them is a
//! caller contract violation and is rejected at parse/construction time,
//! never tolerated inside the similarity computation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised by the upstream data layer when a record is malformed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DreamError {
    /// A tag string outside the closed theme enumeration
    #[error("unrecognized dream tag: '{0}'")]
    UnknownTag(String),
    /// An emotion string outside the closed 7-value enumeration
    #[error("unrecognized emotion: '{0}'")]
    UnknownEmotion(String),
    /// Record id is empty
    #[error("dream record has an empty id")]
    EmptyId,
    /// Owner id is empty
    #[error("dream record has an empty owner id")]
    EmptyOwner,
}

// ============================================================================
// TAGS
// ============================================================================

/// Closed enumeration of recognized dream themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DreamTag {
    /// Aware of dreaming while dreaming
    Lucid,
    /// Distressing or frightening dream
    Nightmare,
    /// A dream the user has logged before
    Recurring,
    Flying,
    Falling,
    /// Being chased or pursued
    Chase,
    Water,
    Family,
    Friends,
    Animals,
    Travel,
    School,
    Work,
    /// Surreal or impossible settings
    Fantasy,
}

impl DreamTag {
    /// All recognized tags, in display order
    pub const ALL: [DreamTag; 14] = [
        DreamTag::Lucid,
        DreamTag::Nightmare,
        DreamTag::Recurring,
        DreamTag::Flying,
        DreamTag::Falling,
        DreamTag::Chase,
        DreamTag::Water,
        DreamTag::Family,
        DreamTag::Friends,
        DreamTag::Animals,
        DreamTag::Travel,
        DreamTag::School,
        DreamTag::Work,
        DreamTag::Fantasy,
    ];

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DreamTag::Lucid => "lucid",
            DreamTag::Nightmare => "nightmare",
            DreamTag::Recurring => "recurring",
            DreamTag::Flying => "flying",
            DreamTag::Falling => "falling",
            DreamTag::Chase => "chase",
            DreamTag::Water => "water",
            DreamTag::Family => "family",
            DreamTag::Friends => "friends",
            DreamTag::Animals => "animals",
            DreamTag::Travel => "travel",
            DreamTag::School => "school",
            DreamTag::Work => "work",
            DreamTag::Fantasy => "fantasy",
        }
    }
}

impl std::fmt::Display for DreamTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DreamTag {
    type Err = DreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lucid" => Ok(DreamTag::Lucid),
            "nightmare" => Ok(DreamTag::Nightmare),
            "recurring" => Ok(DreamTag::Recurring),
            "flying" => Ok(DreamTag::Flying),
            "falling" => Ok(DreamTag::Falling),
            "chase" => Ok(DreamTag::Chase),
            "water" => Ok(DreamTag::Water),
            "family" => Ok(DreamTag::Family),
            "friends" => Ok(DreamTag::Friends),
            "animals" => Ok(DreamTag::Animals),
            "travel" => Ok(DreamTag::Travel),
            "school" => Ok(DreamTag::School),
            "work" => Ok(DreamTag::Work),
            "fantasy" => Ok(DreamTag::Fantasy),
            other => Err(DreamError::UnknownTag(other.to_string())),
        }
    }
}

// ============================================================================
// EMOTIONS
// ============================================================================

/// Closed enumeration of emotions - exactly one per record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Fear,
    Sadness,
    Anger,
    #[default]
    Peace,
    Confusion,
    Excitement,
}

impl Emotion {
    /// All seven emotions, in display order
    pub const ALL: [Emotion; 7] = [
        Emotion::Joy,
        Emotion::Fear,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Peace,
        Emotion::Confusion,
        Emotion::Excitement,
    ];

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Fear => "fear",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Peace => "peace",
            Emotion::Confusion => "confusion",
            Emotion::Excitement => "excitement",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = DreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "joy" => Ok(Emotion::Joy),
            "fear" => Ok(Emotion::Fear),
            "sadness" => Ok(Emotion::Sadness),
            "anger" => Ok(Emotion::Anger),
            "peace" => Ok(Emotion::Peace),
            "confusion" => Ok(Emotion::Confusion),
            "excitement" => Ok(Emotion::Excitement),
            other => Err(DreamError::UnknownEmotion(other.to_string())),
        }
    }
}

// ============================================================================
// DREAM RECORD
// ============================================================================

/// One journal entry
///
/// Immutable value from the engine's point of view: the pipeline takes a
/// snapshot of records and treats it as read-only for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamRecord {
    /// Unique identifier (UUID v4), unique within an owner's collection
    pub id: String,
    /// Owner identifier
    pub owner_id: String,
    /// Short title shown in the journal
    pub title: String,
    /// When the dream was logged
    pub created_at: DateTime<Utc>,
    /// User-written dream content
    pub content: String,
    /// AI-augmented retelling (may be empty)
    #[serde(default)]
    pub generated_content: String,
    /// Tag multiset - duplicates allowed per source, collapsed to a set
    /// by the similarity computation
    #[serde(default)]
    pub tags: Vec<DreamTag>,
    /// Dominant emotion of the dream
    pub emotion: Emotion,
    /// References to attached images (storage keys, owned elsewhere)
    #[serde(default)]
    pub image_refs: Vec<String>,
}

impl DreamRecord {
    /// Create a new record with a fresh UUID and the current timestamp
    pub fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<DreamTag>,
        emotion: Emotion,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            title: title.into(),
            created_at: Utc::now(),
            content: content.into(),
            generated_content: String::new(),
            tags,
            emotion,
            image_refs: Vec::new(),
        }
    }

    /// Attach an AI-augmented retelling
    pub fn with_generated_content(mut self, generated: impl Into<String>) -> Self {
        self.generated_content = generated.into();
        self
    }

    /// Attach image references
    pub fn with_image_refs(mut self, refs: Vec<String>) -> Self {
        self.image_refs = refs;
        self
    }

    /// Validate the caller contract before the record enters a collection
    ///
    /// Tags and emotion are already closed by type; only the identifiers
    /// can be malformed at this point.
    pub fn validate(&self) -> Result<(), DreamError> {
        if self.id.trim().is_empty() {
            return Err(DreamError::EmptyId);
        }
        if self.owner_id.trim().is_empty() {
            return Err(DreamError::EmptyOwner);
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
