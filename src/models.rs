// Core data structures for hashpulse

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social-media platform a hashtag is tracked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    Youtube,
    Tiktok,
}

impl Platform {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::Youtube => "youtube",
            Self::Tiktok => "tiktok",
        }
    }

    /// Create from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "twitter" | "x" => Some(Self::Twitter),
            "instagram" => Some(Self::Instagram),
            "youtube" => Some(Self::Youtube),
            "tiktok" => Some(Self::Tiktok),
            _ => None,
        }
    }

    /// Get all platforms
    pub fn all() -> Vec<Self> {
        vec![Self::Twitter, Self::Instagram, Self::Youtube, Self::Tiktok]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown platform: {s}"))
    }
}

/// Topic category assigned to a hashtag at ingestion time
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Politics,
    Sports,
    Entertainment,
    Technology,
    Business,
    Health,
    Education,
    Lifestyle,
    News,
    #[default]
    Other,
}

impl Category {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Politics => "politics",
            Self::Sports => "sports",
            Self::Entertainment => "entertainment",
            Self::Technology => "technology",
            Self::Business => "business",
            Self::Health => "health",
            Self::Education => "education",
            Self::Lifestyle => "lifestyle",
            Self::News => "news",
            Self::Other => "other",
        }
    }

    /// Create from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "politics" => Some(Self::Politics),
            "sports" => Some(Self::Sports),
            "entertainment" => Some(Self::Entertainment),
            "technology" | "tech" => Some(Self::Technology),
            "business" => Some(Self::Business),
            "health" => Some(Self::Health),
            "education" => Some(Self::Education),
            "lifestyle" => Some(Self::Lifestyle),
            "news" => Some(Self::News),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Normalize a hashtag for storage and lookup: trimmed, lower-cased, no leading `#`
pub fn normalize_hashtag(raw: &str) -> String {
    raw.trim().trim_start_matches('#').to_lowercase()
}

/// Identity of a tracked hashtag on one platform
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashtagKey {
    pub hashtag: String,
    pub platform: Platform,
}

impl HashtagKey {
    pub fn new(hashtag: &str, platform: Platform) -> Self {
        Self {
            hashtag: normalize_hashtag(hashtag),
            platform,
        }
    }
}

impl std::fmt::Display for HashtagKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}@{}", self.hashtag, self.platform)
    }
}

/// One timestamped measurement of a hashtag on a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub mentions: u64,
    pub engagement: u64,
    #[serde(default)]
    pub sentiment_score: f64,
}

impl Observation {
    /// Create an observation with neutral sentiment
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, mentions: u64, engagement: u64) -> Self {
        Self {
            timestamp,
            mentions,
            engagement,
            sentiment_score: 0.0,
        }
    }

    #[must_use]
    pub fn with_sentiment(mut self, score: f64) -> Self {
        self.sentiment_score = score;
        self
    }
}

/// Running aggregate metrics, owned by the ingestion pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateMetrics {
    pub mentions: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub views: u64,
    pub engagement_rate: f64,
    pub reach: u64,
}

impl AggregateMetrics {
    /// Likes + shares + comments
    pub fn total_engagement(&self) -> u64 {
        self.likes
            .saturating_add(self.shares)
            .saturating_add(self.comments)
    }
}

/// Displayed polarity of a sentiment summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

/// Counts of classified posts plus a mean lexicon score
///
/// `overall_score` is roughly in [-1, 1] but unbounded, since raw lexicon
/// scores are not normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentSummary {
    #[serde(alias = "positive")]
    pub positive_count: u64,
    #[serde(alias = "negative")]
    pub negative_count: u64,
    #[serde(alias = "neutral")]
    pub neutral_count: u64,
    pub overall_score: f64,
}

impl SentimentSummary {
    /// Polarity label derived from the sign of `overall_score`
    pub fn polarity(&self) -> Polarity {
        if self.overall_score > 0.0 {
            Polarity::Positive
        } else if self.overall_score < 0.0 {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

/// Bookkeeping maintained on every ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagMetadata {
    pub first_seen: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub total_mentions: u64,
    pub peak_mentions: u64,
    pub peak_date: Option<DateTime<Utc>>,
}

impl HashtagMetadata {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            first_seen: now,
            last_updated: now,
            total_mentions: 0,
            peak_mentions: 0,
            peak_date: None,
        }
    }
}

/// Stored state of one hashtag on one platform, minus its observation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagRecord {
    pub hashtag: String,
    pub platform: Platform,
    pub category: Category,
    pub metrics: AggregateMetrics,
    pub sentiment: SentimentSummary,
    pub trending_score: f64,
    pub metadata: HashtagMetadata,
}

impl HashtagRecord {
    /// Create an empty record first seen at `now`
    pub fn new(key: &HashtagKey, category: Category, now: DateTime<Utc>) -> Self {
        Self {
            hashtag: key.hashtag.clone(),
            platform: key.platform,
            category,
            metrics: AggregateMetrics::default(),
            sentiment: SentimentSummary::default(),
            trending_score: 0.0,
            metadata: HashtagMetadata::new(now),
        }
    }

    pub fn key(&self) -> HashtagKey {
        HashtagKey {
            hashtag: self.hashtag.clone(),
            platform: self.platform,
        }
    }
}

/// Ingestion payload produced by a platform fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagSnapshot {
    pub hashtag: String,
    pub platform: Platform,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub metrics: AggregateMetrics,
    #[serde(default)]
    pub sentiment: SentimentSummary,
    #[serde(default)]
    pub observation: Option<Observation>,
}

impl HashtagSnapshot {
    pub fn key(&self) -> HashtagKey {
        HashtagKey::new(&self.hashtag, self.platform)
    }
}
