use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

pub type Hash32 = [u8; 32];

/// Sentiment class predicted for a single review.
///
/// Declaration order is the tie-break order used when reports sort labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Positive, Label::Neutral, Label::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Neutral => "Neutral",
            Label::Negative => "Negative",
        }
    }

    /// Business rating on the 1..=5 scale.
    pub fn stars(&self) -> u8 {
        match self {
            Label::Positive => 5,
            Label::Neutral => 3,
            Label::Negative => 1,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sentiment label: {0:?}")]
pub struct UnknownLabel(pub String);

impl FromStr for Label {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Positive" => Ok(Label::Positive),
            "Neutral" => Ok(Label::Neutral),
            "Negative" => Ok(Label::Negative),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// Which half of the model pair a file holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactRole {
    Classifier,
    Vectorizer,
}

impl ArtifactRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactRole::Classifier => "classifier",
            ArtifactRole::Vectorizer => "vectorizer",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub role: ArtifactRole,
    pub path: String,
    pub size: u64,
    #[serde(with = "hex", rename = "fingerprint_hex")]
    pub fingerprint: Hash32,  // BLAKE3(file bytes)
}

/// Read-only description of the loaded pair, computed once at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub files: Vec<ArtifactFile>,
    #[serde(with = "hex", rename = "manifest_hash_hex")]
    pub manifest_hash: Hash32,
    pub classes: Vec<Label>,
    pub n_features: usize,
    pub loaded_at: u64,
}
