//! JSON output of the collected listings.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Result, ScrapeError};
use crate::types::JobListings;

/// Pretty-print listings as a JSON array with 2-space indentation.
pub fn to_pretty_json(listings: &JobListings) -> Result<String> {
    Ok(serde_json::to_string_pretty(listings)?)
}

/// Replace `path` with the pretty-printed listings.
///
/// The JSON goes to a sibling `.tmp` file first and is renamed over the
/// target, so readers see either the old file or the complete new one.
pub async fn write_listings(path: &Path, listings: &JobListings) -> Result<()> {
    let json = to_pretty_json(listings)?;
    let tmp = temp_path(path);

    debug!(path = %tmp.display(), bytes = json.len(), "Writing listings to temp file");
    tokio::fs::write(&tmp, json.as_bytes())
        .await
        .map_err(|source| ScrapeError::Persist {
            path: tmp.clone(),
            source,
        })?;

    if let Err(source) = tokio::fs::rename(&tmp, path).await {
        if let Err(e) = tokio::fs::remove_file(&tmp).await {
            warn!(path = %tmp.display(), error = %e, "Failed to clean up temp file");
        }
        return Err(ScrapeError::Persist {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobRecord;

    fn listings(titles: &[&str]) -> JobListings {
        JobListings::from(titles.iter().map(|t| JobRecord::new(*t)).collect::<Vec<_>>())
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let json = to_pretty_json(&listings(&["Dev"])).unwrap();
        let expected = "[\n  {\n    \"jobTitle\": \"Dev\",\n    \"location\": \"\",\n    \"jobDescription\": \"\",\n    \"jobLink\": \"\"\n  }\n]";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_empty_listings_are_empty_array() {
        assert_eq!(to_pretty_json(&JobListings::new()).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_write_overwrites_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job_listings.json");

        write_listings(&path, &listings(&["a", "b", "c"])).await.unwrap();
        write_listings(&path, &listings(&["z"])).await.unwrap();

        let written: Vec<JobRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, vec![JobRecord::new("z")]);
        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        let err = write_listings(&path, &listings(&["a"])).await.unwrap_err();
        assert!(matches!(err, ScrapeError::Persist { .. }));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(
            temp_path(Path::new("out/job_listings.json")),
            PathBuf::from("out/job_listings.json.tmp")
        );
    }
}
