use crate::{ArtifactFile, ArtifactRole};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {role} artifact {path}: {source}")]
    Io {
        role: &'static str,
        path: String,
        source: std::io::Error,
    },
    #[error("failed to decode {role} artifact {path}: {reason}")]
    Decode {
        role: &'static str,
        path: String,
        reason: String,
    },
    #[error("failed to encode {role} artifact: {reason}")]
    Encode { role: &'static str, reason: String },
    #[error("invalid {role} artifact: {reason}")]
    Invalid { role: &'static str, reason: String },
    #[error("classifier and vectorizer are incompatible: {0}")]
    Incompatible(String),
}

pub type Result<T> = std::result::Result<T, ArtifactError>;

/// On-disk encoding, picked from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Bincode,
    Json,
}

impl Encoding {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Encoding::Json,
            _ => Encoding::Bincode,
        }
    }
}

pub fn decode_artifact<T: DeserializeOwned>(role: ArtifactRole, path: &Path) -> Result<(T, ArtifactFile)> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        role: role.as_str(),
        path: display.clone(),
        source,
    })?;

    let value: T = match Encoding::for_path(path) {
        Encoding::Json => serde_json::from_slice(&bytes).map_err(|e| e.to_string()),
        Encoding::Bincode => bincode::deserialize(&bytes).map_err(|e| e.to_string()),
    }
    .map_err(|reason| ArtifactError::Decode {
        role: role.as_str(),
        path: display.clone(),
        reason,
    })?;

    let file = ArtifactFile {
        role,
        path: display,
        size: bytes.len() as u64,
        fingerprint: blake3::hash(&bytes).into(),
    };
    Ok((value, file))
}

pub fn encode_artifact<T: Serialize>(role: ArtifactRole, path: &Path, value: &T) -> Result<ArtifactFile> {
    let bytes = match Encoding::for_path(path) {
        Encoding::Json => serde_json::to_vec_pretty(value).map_err(|e| e.to_string()),
        Encoding::Bincode => bincode::serialize(value).map_err(|e| e.to_string()),
    }
    .map_err(|reason| ArtifactError::Encode {
        role: role.as_str(),
        reason,
    })?;

    let display = path.display().to_string();
    std::fs::write(path, &bytes).map_err(|source| ArtifactError::Io {
        role: role.as_str(),
        path: display.clone(),
        source,
    })?;

    Ok(ArtifactFile {
        role,
        path: display,
        size: bytes.len() as u64,
        fingerprint: blake3::hash(&bytes).into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TfidfVectorizer;
    use std::collections::BTreeMap;

    fn sample() -> TfidfVectorizer {
        let vocab: BTreeMap<String, usize> = [("great".to_string(), 0)].into_iter().collect();
        TfidfVectorizer::new(vocab, vec![1.5])
    }

    #[test]
    fn encoding_follows_extension() {
        assert_eq!(Encoding::for_path(Path::new("m.json")), Encoding::Json);
        assert_eq!(Encoding::for_path(Path::new("m.JSON")), Encoding::Json);
        assert_eq!(Encoding::for_path(Path::new("m.bin")), Encoding::Bincode);
        assert_eq!(Encoding::for_path(Path::new("model")), Encoding::Bincode);
    }

    #[test]
    fn written_file_fingerprint_matches_read() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["v.bin", "v.json"] {
            let path = dir.path().join(name);
            let written = encode_artifact(ArtifactRole::Vectorizer, &path, &sample()).unwrap();
            let (back, read): (TfidfVectorizer, _) = decode_artifact(ArtifactRole::Vectorizer, &path).unwrap();
            assert_eq!(written.fingerprint, read.fingerprint);
            assert_eq!(back.idf, vec![1.5]);
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_artifact::<TfidfVectorizer>(ArtifactRole::Vectorizer, &dir.path().join("nope.bin"))
            .unwrap_err();
        assert!(matches!(err, ArtifactError::Io { role: "vectorizer", .. }));
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"{not json").unwrap();
        let err = decode_artifact::<TfidfVectorizer>(ArtifactRole::Vectorizer, &path).unwrap_err();
        assert!(matches!(err, ArtifactError::Decode { .. }));
    }
}
