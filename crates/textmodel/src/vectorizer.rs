use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
};

/// Sparse feature row: `(feature index, weight)` pairs, sorted by index, no duplicates.
pub type SparseVector = Vec<(usize, f64)>;

/// Fitted transform from raw text to the classifier's feature space.
pub trait TextVectorizer: Send + Sync {
    fn validate(&self) -> Result<(), String>;
    fn transform(&self, text: &str) -> SparseVector;
    fn n_features(&self) -> usize;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    L1,
    None,
}

/// Pre-fitted TF-IDF transform.
///
/// Tokens are runs of two or more word characters (letters, digits, `_`).
/// Stop words are removed before word n-grams are built; n-grams join
/// tokens with a single space, matching the vocabulary keys.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub vocabulary: BTreeMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: BTreeSet<String>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

impl TfidfVectorizer {
    /// Unigram vectorizer with lowercase, raw tf and l2 norm.
    pub fn new(vocabulary: BTreeMap<String, usize>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf,
            lowercase: default_lowercase(),
            ngram_range: default_ngram_range(),
            stop_words: BTreeSet::new(),
            sublinear_tf: false,
            norm: Norm::default(),
        }
    }

    /// Terms (n-grams) extracted from `text`, in order, with repeats.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = tokenize(text, self.lowercase)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect();

        let (lo, hi) = self.ngram_range;
        let mut out = Vec::new();
        for n in lo..=hi {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                out.push(window.join(" "));
            }
        }
        out
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn validate(&self) -> Result<(), String> {
        let (lo, hi) = self.ngram_range;
        if lo == 0 || lo > hi {
            return Err(format!("invalid ngram_range ({lo}, {hi})"));
        }
        if let Some((term, idx)) = self.vocabulary.iter().find(|(_, idx)| **idx >= self.idf.len()) {
            return Err(format!(
                "vocabulary term {term:?} maps to feature {idx} but idf has {} entries",
                self.idf.len()
            ));
        }
        if let Some(pos) = self.idf.iter().position(|w| !w.is_finite()) {
            return Err(format!("idf weight at feature {pos} is not finite"));
        }
        Ok(())
    }

    fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.terms(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .filter_map(|(idx, tf)| {
                let idf = self.idf.get(idx)?;
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                Some((idx, tf * idf))
            })
            .collect();

        normalize(&mut row, self.norm);
        row
    }

    fn n_features(&self) -> usize {
        self.idf.len()
    }
}

/// Splits on anything that is not a word character and keeps tokens of two or more chars.
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    let text = if lowercase {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    };

    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

fn normalize(row: &mut SparseVector, norm: Norm) {
    let total = match norm {
        Norm::None => return,
        Norm::L1 => row.iter().map(|(_, w)| w.abs()).sum::<f64>(),
        Norm::L2 => row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
    };
    if total > 0.0 {
        for (_, w) in row.iter_mut() {
            *w /= total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> BTreeMap<String, usize> {
        terms.iter().enumerate().map(|(i, t)| (t.to_string(), i)).collect()
    }

    #[test]
    fn tokenize_drops_single_chars_and_punctuation() {
        assert_eq!(
            tokenize("Great service! A 10/10, would_return", true),
            vec!["great", "service", "10", "10", "would_return"]
        );
    }

    #[test]
    fn transform_is_l2_normalized() {
        let v = TfidfVectorizer::new(vocab(&["good", "bad"]), vec![1.0, 2.0]);
        let row = v.transform("good bad");
        let norm: f64 = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        assert!(row[1].1 > row[0].1);
    }

    #[test]
    fn unknown_and_empty_text_give_empty_row() {
        let v = TfidfVectorizer::new(vocab(&["good"]), vec![1.0]);
        assert!(v.transform("").is_empty());
        assert!(v.transform("zzz qqq").is_empty());
    }

    #[test]
    fn bigrams_skip_stop_words() {
        let mut v = TfidfVectorizer::new(vocab(&["never", "again", "never again"]), vec![1.0; 3]);
        v.ngram_range = (1, 2);
        v.stop_words.insert("so".to_string());
        assert_eq!(v.terms("Never so again"), vec!["never", "again", "never again"]);
        assert_eq!(v.transform("never again").len(), 3);
    }

    #[test]
    fn sublinear_tf_dampens_repeats() {
        let mut v = TfidfVectorizer::new(vocab(&["good"]), vec![1.0]);
        v.norm = Norm::None;
        assert_eq!(v.transform("good good good")[0].1, 3.0);
        v.sublinear_tf = true;
        assert!((v.transform("good good good")[0].1 - (1.0 + 3f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_out_of_range_vocabulary() {
        let v = TfidfVectorizer::new(vocab(&["a1", "b2"]), vec![1.0]);
        assert!(v.validate().is_err());

        let mut v = TfidfVectorizer::new(vocab(&["a1"]), vec![1.0]);
        v.ngram_range = (2, 1);
        assert!(v.validate().is_err());
    }
}
