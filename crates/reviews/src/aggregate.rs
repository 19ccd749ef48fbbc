use crate::{ClassificationResult, Recommendation};
use serde::Serialize;
use textmodel::Label;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("no usable reviews in upload ({dropped_rows} empty rows dropped)")]
    NoData { dropped_rows: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelShare {
    pub label: Label,
    pub count: usize,
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregateReport {
    pub total_rows: usize,
    pub dropped_rows: usize,
    /// Present labels only, by count descending then label order.
    pub distribution: Vec<LabelShare>,
    pub avg_stars: f64,
    pub recommendation: Recommendation,
    pub positive_text: String,
    pub negative_text: String,
}

impl AggregateReport {
    pub fn share(&self, label: Label) -> Option<&LabelShare> {
        self.distribution.iter().find(|s| s.label == label)
    }

    pub fn count(&self, label: Label) -> usize {
        self.share(label).map_or(0, |s| s.count)
    }
}

pub fn aggregate(
    results: &[ClassificationResult],
    dropped_rows: usize,
) -> Result<AggregateReport, AggregateError> {
    let total = results.len();
    if total == 0 {
        return Err(AggregateError::NoData { dropped_rows });
    }

    let mut counts = [0usize; 3];
    let mut star_sum: u64 = 0;
    for r in results {
        counts[label_index(r.label)] += 1;
        star_sum += u64::from(r.label.stars());
    }

    let mut distribution: Vec<LabelShare> = Label::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(&label, count)| LabelShare {
            label,
            count,
            percent: 100.0 * count as f64 / total as f64,
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));

    let avg_stars = round2(star_sum as f64 / total as f64);

    Ok(AggregateReport {
        total_rows: total,
        dropped_rows,
        distribution,
        avg_stars,
        recommendation: Recommendation::for_rating(avg_stars),
        positive_text: polarity_text(results, Label::Positive),
        negative_text: polarity_text(results, Label::Negative),
    })
}

fn label_index(label: Label) -> usize {
    match label {
        Label::Positive => 0,
        Label::Neutral => 1,
        Label::Negative => 2,
    }
}

/// Texts of one polarity bucket joined with single spaces.
pub fn polarity_text(results: &[ClassificationResult], label: Label) -> String {
    results
        .iter()
        .filter(|r| r.label == label)
        .map(|r| r.review.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Review;

    fn results(labels: &[(Label, &str)]) -> Vec<ClassificationResult> {
        labels
            .iter()
            .map(|(label, text)| ClassificationResult {
                review: Review { row: None, text: text.to_string() },
                label: *label,
            })
            .collect()
    }

    #[test]
    fn three_way_split() {
        let rs = results(&[
            (Label::Positive, "Great service!"),
            (Label::Negative, "Terrible, never again"),
            (Label::Neutral, "It was fine"),
        ]);
        let report = aggregate(&rs, 0).unwrap();
        assert_eq!(report.total_rows, 3);
        for label in Label::ALL {
            assert_eq!(report.count(label), 1);
            assert_eq!(format!("{:.1}", report.share(label).unwrap().percent), "33.3");
        }
        assert_eq!(report.avg_stars, 3.0);
        assert_eq!(report.recommendation, Recommendation::Mixed);
        assert_eq!(report.positive_text, "Great service!");
        assert_eq!(report.negative_text, "Terrible, never again");
    }

    #[test]
    fn absent_labels_are_omitted_and_order_is_by_count() {
        let rs = results(&[
            (Label::Negative, "bad"),
            (Label::Positive, "good"),
            (Label::Negative, "awful"),
        ]);
        let report = aggregate(&rs, 2).unwrap();
        let labels: Vec<_> = report.distribution.iter().map(|s| s.label).collect();
        assert_eq!(labels, vec![Label::Negative, Label::Positive]);
        assert!(report.share(Label::Neutral).is_none());
        assert_eq!(report.dropped_rows, 2);
        assert_eq!(report.avg_stars, 2.33);
        assert_eq!(report.recommendation, Recommendation::ActionRequired);
        assert_eq!(report.negative_text, "bad awful");
    }

    #[test]
    fn percentages_sum_to_hundred_and_stars_stay_in_range() {
        let labels = [Label::Positive, Label::Neutral, Label::Negative];
        for n in 1..40usize {
            let rs: Vec<_> = (0..n)
                .map(|i| ClassificationResult {
                    review: Review { row: None, text: format!("r{i}") },
                    label: labels[(i * 7 + n) % 3],
                })
                .collect();
            let report = aggregate(&rs, 0).unwrap();
            let sum: f64 = report.distribution.iter().map(|s| s.percent).sum();
            assert!((sum - 100.0).abs() < 1e-9, "n={n} sum={sum}");
            assert!((1.0..=5.0).contains(&report.avg_stars));
        }
    }

    #[test]
    fn empty_polarity_bucket_is_empty_text() {
        let report = aggregate(&results(&[(Label::Neutral, "meh")]), 0).unwrap();
        assert_eq!(report.positive_text, "");
        assert_eq!(report.negative_text, "");
    }

    #[test]
    fn no_rows_is_no_data() {
        assert_eq!(aggregate(&[], 4), Err(AggregateError::NoData { dropped_rows: 4 }));
    }
}
