//! Loads the static FAQ dataset from disk.

use std::path::Path;

use tokio::fs;
use tracing::info;

use crate::errors::faq_rag_error::FaqRagError;
use crate::structs::faq_entry::FaqEntry;

/// Reads the dataset file and deserializes it as an ordered JSON array of
/// FAQ entries.
///
/// The load is all-or-nothing: a missing file, invalid JSON, or any entry
/// lacking a required field aborts the whole load. The dataset is read once
/// at startup, so a malformed file should stop the process loudly rather
/// than index a subset.
pub async fn load_faq(path: &Path) -> Result<Vec<FaqEntry>, FaqRagError> {
    let raw = fs::read_to_string(path).await?;
    let entries: Vec<FaqEntry> = serde_json::from_str(&raw)?;

    info!(
        target: "faq_rag::loader",
        path = %path.display(),
        entries = entries.len(),
        "load_faq: dataset loaded"
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn loads_entries_in_file_order() {
        let file = write_dataset(
            r#"[
                {"id":"1","question":"ক?","answer":"ক উত্তর।","metadata":{"topic":"geography","difficulty":"easy"}},
                {"id":"2","question":"খ?","answer":"খ উত্তর।","metadata":{"topic":"history","difficulty":"hard"}}
            ]"#,
        );

        let entries = load_faq(file.path()).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "1");
        assert_eq!(entries[1].id, "2");
        assert_eq!(entries[1].metadata.topic, "history");
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let err = load_faq(Path::new("does/not/exist.json")).await.unwrap_err();
        assert!(matches!(err, FaqRagError::Io(_)));
    }

    #[tokio::test]
    async fn invalid_json_aborts_the_load() {
        let file = write_dataset("not json at all");
        let err = load_faq(file.path()).await.unwrap_err();
        assert!(matches!(err, FaqRagError::Json(_)));
    }

    #[tokio::test]
    async fn entry_missing_a_required_field_aborts_the_whole_load() {
        // Second entry has no `answer`; the first valid entry must not
        // survive either.
        let file = write_dataset(
            r#"[
                {"id":"1","question":"ক?","answer":"ক উত্তর।","metadata":{"topic":"t","difficulty":"easy"}},
                {"id":"2","question":"খ?","metadata":{"topic":"t","difficulty":"easy"}}
            ]"#,
        );

        let err = load_faq(file.path()).await.unwrap_err();
        assert!(matches!(err, FaqRagError::Json(_)));
    }

    #[tokio::test]
    async fn entry_missing_metadata_field_aborts() {
        let file = write_dataset(
            r#"[{"id":"1","question":"ক?","answer":"উ।","metadata":{"topic":"t"}}]"#,
        );
        let err = load_faq(file.path()).await.unwrap_err();
        assert!(matches!(err, FaqRagError::Json(_)));
    }
}
