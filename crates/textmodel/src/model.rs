use crate::{
    decode_artifact, manifest_hash, ArtifactError, ArtifactFile, ArtifactRole, ClassifyError, Label,
    LabelClassifier, LinearClassifier, ModelInfo, TextVectorizer, TfidfVectorizer,
};
use std::path::Path;

/// Classifier and vectorizer pair, loaded once and shared read-only.
pub struct SentimentModel {
    vectorizer: Box<dyn TextVectorizer>,
    classifier: Box<dyn LabelClassifier>,
    info: ModelInfo,
}

impl std::fmt::Debug for SentimentModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentModel").field("info", &self.info).finish_non_exhaustive()
    }
}

impl SentimentModel {
    /// Pairs a vectorizer and classifier.
    ///
    /// Fails when either is malformed or the two disagree on feature dimensionality.
    pub fn new(
        vectorizer: Box<dyn TextVectorizer>,
        classifier: Box<dyn LabelClassifier>,
        files: Vec<ArtifactFile>,
    ) -> Result<Self, ArtifactError> {
        classifier.validate().map_err(|reason| ArtifactError::Invalid {
            role: ArtifactRole::Classifier.as_str(),
            reason,
        })?;
        vectorizer.validate().map_err(|reason| ArtifactError::Invalid {
            role: ArtifactRole::Vectorizer.as_str(),
            reason,
        })?;
        if vectorizer.n_features() != classifier.n_features() {
            return Err(ArtifactError::Incompatible(format!(
                "vectorizer produces {} features, classifier expects {}",
                vectorizer.n_features(),
                classifier.n_features()
            )));
        }

        let info = ModelInfo {
            manifest_hash: manifest_hash(files.clone()),
            files,
            classes: classifier.classes().to_vec(),
            n_features: classifier.n_features(),
            loaded_at: now(),
        };

        Ok(Self { vectorizer, classifier, info })
    }

    /// Reads both artifacts from disk; every failure here is fatal for the caller.
    pub fn load(classifier_path: &Path, vectorizer_path: &Path) -> Result<Self, ArtifactError> {
        let (classifier, classifier_file): (LinearClassifier, _) =
            decode_artifact(ArtifactRole::Classifier, classifier_path)?;
        let (vectorizer, vectorizer_file): (TfidfVectorizer, _) =
            decode_artifact(ArtifactRole::Vectorizer, vectorizer_path)?;

        Self::new(
            Box::new(vectorizer),
            Box::new(classifier),
            vec![classifier_file, vectorizer_file],
        )
    }

    pub fn classify(&self, text: &str) -> Result<Label, ClassifyError> {
        let features = self.vectorizer.transform(text);
        self.classifier.predict(&features)
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }
}

fn now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_artifact;
    use std::collections::BTreeMap;

    fn pair() -> (LinearClassifier, TfidfVectorizer) {
        let vocab: BTreeMap<String, usize> =
            [("great", 0), ("terrible", 1)].into_iter().map(|(t, i)| (t.to_string(), i)).collect();
        let vectorizer = TfidfVectorizer::new(vocab, vec![1.0, 1.0]);
        let classifier = LinearClassifier {
            classes: vec![Label::Negative, Label::Neutral, Label::Positive],
            coef: vec![vec![-2.0, 3.0], vec![0.0, 0.0], vec![3.0, -2.0]],
            intercept: vec![0.0, 0.5, 0.0],
        };
        (classifier, vectorizer)
    }

    #[test]
    fn load_and_classify() {
        let dir = tempfile::tempdir().unwrap();
        let (c, v) = pair();
        let cp = dir.path().join("model.bin");
        let vp = dir.path().join("vectorizer.json");
        encode_artifact(ArtifactRole::Classifier, &cp, &c).unwrap();
        encode_artifact(ArtifactRole::Vectorizer, &vp, &v).unwrap();

        let model = SentimentModel::load(&cp, &vp).unwrap();
        assert_eq!(model.classify("Great service!").unwrap(), Label::Positive);
        assert_eq!(model.classify("Terrible, never again").unwrap(), Label::Negative);
        assert_eq!(model.classify("It was fine").unwrap(), Label::Neutral);
        assert_eq!(model.classify("").unwrap(), Label::Neutral);
        assert_eq!(model.info().n_features, 2);
        assert_eq!(model.info().files.len(), 2);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let (mut c, v) = pair();
        for row in c.coef.iter_mut() {
            row.push(0.0);
        }
        let err = SentimentModel::new(Box::new(v), Box::new(c), vec![]).unwrap_err();
        assert!(matches!(err, ArtifactError::Incompatible(_)));
    }

    #[test]
    fn new_validates_both_halves() {
        let (_, v) = pair();
        let c = LinearClassifier {
            classes: vec![Label::Negative, Label::Positive],
            coef: vec![vec![1.0, -1.0]],
            intercept: vec![],
        };
        let err = SentimentModel::new(Box::new(v), Box::new(c), vec![]).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { role: "classifier", .. }));

        let (c, mut v) = pair();
        v.ngram_range = (2, 1);
        let err = SentimentModel::new(Box::new(v), Box::new(c), vec![]).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { role: "vectorizer", .. }));
    }

    #[test]
    fn invalid_classifier_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let (mut c, v) = pair();
        c.intercept.clear();
        let cp = dir.path().join("model.bin");
        let vp = dir.path().join("vectorizer.bin");
        encode_artifact(ArtifactRole::Classifier, &cp, &c).unwrap();
        encode_artifact(ArtifactRole::Vectorizer, &vp, &v).unwrap();

        let err = SentimentModel::load(&cp, &vp).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { role: "classifier", .. }));
    }
}
