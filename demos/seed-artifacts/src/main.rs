//! Seed artifacts: a tiny hand-weighted model pair
//!
//! Writes `final_sentiment_model.bin` and `tfidf_vectorizer.bin` (plus JSON
//! copies for inspection) into the directory given as the first argument,
//! or the current directory. Good enough to click through the dashboard;
//! replace with real artifacts for anything else.

use std::{collections::BTreeMap, path::PathBuf};

use textmodel::{
    encode_artifact, ArtifactRole, Label, LinearClassifier, SentimentModel, TfidfVectorizer,
};

const POSITIVE: &[&str] = &[
    "great", "excellent", "amazing", "love", "loved", "friendly", "delicious", "fantastic",
    "perfect", "recommend", "best", "helpful", "wonderful", "fast",
];
const NEGATIVE: &[&str] = &[
    "terrible", "awful", "bad", "worst", "rude", "slow", "cold", "never", "disappointing",
    "horrible", "dirty", "broken", "refund", "waste",
];
const NEUTRAL: &[&str] = &["fine", "okay", "ok", "average", "decent", "alright"];

fn main() {
    let out_dir = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    println!("Seeding sentiment artifacts into {}", out_dir.display());
    println!("─────────────────────────────────────────────");

    let mut vocabulary = BTreeMap::new();
    for term in POSITIVE.iter().chain(NEGATIVE).chain(NEUTRAL) {
        let next = vocabulary.len();
        vocabulary.insert(term.to_string(), next);
    }
    let n = vocabulary.len();
    let vectorizer = TfidfVectorizer::new(vocabulary.clone(), vec![1.0; n]);

    // rows follow `classes`
    let classes = vec![Label::Negative, Label::Neutral, Label::Positive];
    let mut coef = vec![vec![0.0; n]; classes.len()];
    for (term, &idx) in &vocabulary {
        let (neg, neu, pos) = if POSITIVE.contains(&term.as_str()) {
            (-1.0, -0.5, 2.0)
        } else if NEGATIVE.contains(&term.as_str()) {
            (2.0, -0.5, -1.0)
        } else {
            (-0.5, 1.5, -0.5)
        };
        coef[0][idx] = neg;
        coef[1][idx] = neu;
        coef[2][idx] = pos;
    }
    let classifier = LinearClassifier {
        classes,
        coef,
        intercept: vec![0.0, 0.1, 0.0],
    };

    for (model_name, vectorizer_name) in [
        ("final_sentiment_model.bin", "tfidf_vectorizer.bin"),
        ("final_sentiment_model.json", "tfidf_vectorizer.json"),
    ] {
        let model_path = out_dir.join(model_name);
        let vectorizer_path = out_dir.join(vectorizer_name);

        let written = [
            encode_artifact(ArtifactRole::Classifier, &model_path, &classifier),
            encode_artifact(ArtifactRole::Vectorizer, &vectorizer_path, &vectorizer),
        ];
        for file in written {
            match file {
                Ok(f) => println!("   {:<11} {} ({} bytes, {})", f.role.as_str(), f.path, f.size, &hex::encode(f.fingerprint)[..12]),
                Err(e) => {
                    eprintln!("   ✗ {e}");
                    std::process::exit(1);
                }
            }
        }

        // read the pair back the way the dashboard will
        match SentimentModel::load(&model_path, &vectorizer_path) {
            Ok(model) => {
                for sample in ["Great service!", "Terrible, never again", "It was fine"] {
                    let label = model.classify(sample).map(|l| l.to_string()).unwrap_or_else(|e| e.to_string());
                    println!("   {sample:<24} → {label}");
                }
                println!("   ✓ pair loads cleanly\n");
            }
            Err(e) => {
                eprintln!("   ✗ {e}");
                std::process::exit(1);
            }
        }
    }
}
