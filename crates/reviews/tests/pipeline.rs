use reviews::{analyze, AggregateError, AnalyzeError, Recommendation, TableAdapter};
use std::collections::BTreeMap;
use textmodel::{Label, LinearClassifier, SentimentModel, TfidfVectorizer};

/// "great" pushes Positive, "terrible" pushes Negative, nothing else matters.
fn keyword_model() -> SentimentModel {
    let vocab: BTreeMap<String, usize> = [("great", 0), ("terrible", 1)]
        .into_iter()
        .map(|(t, i)| (t.to_string(), i))
        .collect();
    let vectorizer = TfidfVectorizer::new(vocab, vec![1.0, 1.0]);
    let classifier = LinearClassifier {
        classes: vec![Label::Negative, Label::Neutral, Label::Positive],
        coef: vec![vec![-2.0, 3.0], vec![0.0, 0.0], vec![3.0, -2.0]],
        intercept: vec![0.0, 0.5, 0.0],
    };
    SentimentModel::new(Box::new(vectorizer), Box::new(classifier), vec![]).unwrap()
}

#[test]
fn headerless_three_row_scenario() {
    let model = keyword_model();
    let parsed = TableAdapter::default()
        .parse(b"Great service!\nTerrible, never again\nIt was fine\n")
        .unwrap();
    assert_eq!(parsed.strategy, "headerless");

    let report = analyze(&model, &parsed.batch).unwrap();
    assert_eq!(report.count(Label::Positive), 1);
    assert_eq!(report.count(Label::Negative), 1);
    assert_eq!(report.count(Label::Neutral), 1);
    assert_eq!(report.avg_stars, 3.0);
    assert_eq!(report.recommendation, Recommendation::Mixed);
}

#[test]
fn header_and_fallback_paths_agree() {
    let model = keyword_model();
    let body = "Great food\nterrible parking\n\"Great, but terrible wait\"\nok\n";

    let headerless = TableAdapter::default().parse(body.as_bytes()).unwrap();
    let headered = TableAdapter::default()
        .parse(format!("Review\n{body}").as_bytes())
        .unwrap();
    assert_eq!(headerless.strategy, "headerless");
    assert_eq!(headered.strategy, "headered");

    let a = analyze(&model, &headerless.batch).unwrap();
    let b = analyze(&model, &headered.batch).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rerun_is_identical() {
    let model = keyword_model();
    let upload = b"Id,Review,Stars\n1,Great,5\n2,terrible,1\n3,,3\n4,meh,3\n";
    let first = analyze(&model, &TableAdapter::default().parse(upload).unwrap().batch).unwrap();
    let second = analyze(&model, &TableAdapter::default().parse(upload).unwrap().batch).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.dropped_rows, 1);
    assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
}

#[test]
fn all_rows_empty_reports_no_data() {
    let model = keyword_model();
    let parsed = TableAdapter::default().parse(b"Id,Review\n1,\n2,  \n3,NaN\n").unwrap();
    assert_eq!(
        analyze(&model, &parsed.batch),
        Err(AnalyzeError::Aggregate(AggregateError::NoData { dropped_rows: 3 }))
    );
}

#[test]
fn empty_manual_entry_is_intercept_class() {
    assert_eq!(keyword_model().classify("").unwrap(), Label::Neutral);
}
