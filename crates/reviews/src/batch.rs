use serde::Serialize;
use textmodel::{ClassifyError, Label, SentimentModel};

/// Cell values treated as missing, in addition to blank cells.
const NA_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>", "#N/A"];

/// Row as reconstructed by a parse strategy, before filtering.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRow {
    pub line: Option<u64>,
    pub text: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Review {
    /// 1-based line in the upload, when the review came from a file.
    pub row: Option<u64>,
    pub text: String,
}

/// Reviews that survived the missing-value filter, in upload order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReviewBatch {
    reviews: Vec<Review>,
    dropped_rows: usize,
}

impl ReviewBatch {
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let mut batch = ReviewBatch::default();
        for row in rows {
            match row.text {
                Some(text) if !is_missing(&text) => batch.reviews.push(Review { row: row.line, text }),
                _ => batch.dropped_rows += 1,
            }
        }
        batch
    }

    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rows(
            texts
                .into_iter()
                .map(|t| RawRow { line: None, text: Some(t.into()) })
                .collect(),
        )
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }
}

pub fn is_missing(text: &str) -> bool {
    let t = text.trim();
    t.is_empty() || NA_MARKERS.contains(&t)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub review: Review,
    pub label: Label,
}

/// Classifies every review independently, preserving order.
pub fn classify_batch(
    model: &SentimentModel,
    batch: &ReviewBatch,
) -> Result<Vec<ClassificationResult>, ClassifyError> {
    batch
        .reviews()
        .iter()
        .map(|review| -> Result<ClassificationResult, ClassifyError> {
            Ok(ClassificationResult {
                label: model.classify(&review.text)?,
                review: review.clone(),
            })
        })
        .collect()
}
