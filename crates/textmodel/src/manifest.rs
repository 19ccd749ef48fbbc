use crate::{ArtifactFile, Hash32};

/// Deterministic manifest hash over a loaded artifact set:
/// - sort by role name
/// - hash bytes: "<role>\n<size>\n<fingerprint>" for each file
pub fn manifest_hash(mut files: Vec<ArtifactFile>) -> Hash32 {
    files.sort_by(|a, b| a.role.as_str().cmp(b.role.as_str()));

    let mut hasher = blake3::Hasher::new();
    for f in files {
        hasher.update(f.role.as_str().as_bytes());
        hasher.update(b"\n");
        hasher.update(f.size.to_string().as_bytes());
        hasher.update(b"\n");
        hasher.update(&f.fingerprint);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArtifactRole;

    fn file(role: ArtifactRole, size: u64, byte: u8) -> ArtifactFile {
        ArtifactFile { role, path: format!("{}.bin", role.as_str()), size, fingerprint: [byte; 32] }
    }

    #[test]
    fn test_manifest_hash_deterministic() {
        let files1 = vec![
            file(ArtifactRole::Vectorizer, 2, 2),
            file(ArtifactRole::Classifier, 1, 1),
        ];
        let files2 = vec![
            file(ArtifactRole::Classifier, 1, 1),
            file(ArtifactRole::Vectorizer, 2, 2),
        ];
        assert_eq!(manifest_hash(files1), manifest_hash(files2));
    }

    #[test]
    fn test_manifest_hash_changes_on_content() {
        let files1 = vec![file(ArtifactRole::Classifier, 1, 1)];
        let files2 = vec![file(ArtifactRole::Classifier, 1, 9)];
        assert_ne!(manifest_hash(files1), manifest_hash(files2));
    }
}
