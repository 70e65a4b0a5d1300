use crate::{PostgenError, Result};
use crate::collection::types::Collection;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;

pub struct CollectionWriter;

impl CollectionWriter {
    /// Render the collection as JSON, one tab per nesting level.
    ///
    /// Non-ASCII text is written as-is; serde_json never escapes it.
    pub fn to_json(collection: &Collection) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut ser = Serializer::with_formatter(&mut buf, formatter);
        collection.serialize(&mut ser)?;

        // serde_json only emits valid UTF-8
        String::from_utf8(buf).map_err(|e| PostgenError::Other(e.to_string()))
    }

    /// Validate placeholders, then overwrite `path` with the rendered document.
    ///
    /// The write is not atomic: a crash mid-write can leave a truncated file.
    pub fn write(collection: &Collection, path: &Path) -> Result<()> {
        collection.validate()?;
        let json = Self::to_json(collection)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Collection written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionBuilder;
    use crate::context::ScaffoldContext;
    use tempfile::TempDir;

    #[test]
    fn test_tab_indentation() {
        let ctx = ScaffoldContext::from_dir("shop").unwrap();
        let json = CollectionWriter::to_json(&CollectionBuilder::build(&ctx, "http://localhost:8000"))
            .unwrap();

        assert!(json.starts_with("{\n\t\"info\": {\n\t\t\"_postman_id\": \"shop-api-collection\""));
        assert!(!json.contains("\n  "));
    }

    #[test]
    fn test_non_ascii_preserved() {
        let ctx = ScaffoldContext::from_dir("café_api").unwrap();
        let json = CollectionWriter::to_json(&CollectionBuilder::build(&ctx, "http://localhost:8000"))
            .unwrap();

        assert!(json.contains("café_api-api-collection"));
        assert!(!json.contains("\\u00e9"));
    }

    #[test]
    fn test_write_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("postman_collection.json");
        fs::write(&path, "stale content that is longer than nothing").unwrap();

        let ctx = ScaffoldContext::from_dir("shop").unwrap();
        let collection = CollectionBuilder::build(&ctx, "http://localhost:8000");
        CollectionWriter::write(&collection, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        let parsed: Collection = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, collection);
    }

    #[test]
    fn test_write_rejects_undeclared_placeholder() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("postman_collection.json");

        let ctx = ScaffoldContext::from_dir("shop").unwrap();
        let mut collection = CollectionBuilder::build(&ctx, "http://localhost:8000");
        collection.variable.pop();
        collection.variable.pop();

        assert!(CollectionWriter::write(&collection, &path).is_err());
        assert!(!path.exists());
    }
}
