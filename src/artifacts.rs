//! JSON artifacts written per time window.
//!
//! ```text
//! <prefix>_tracks_data.json   enriched tracks, rewritten after every track
//! <prefix>_tags.json          tag -> summed score, ranked
//! <prefix>_<n>_tags.json      top n tag names, for n in 10, 50, 250
//! ```
//!
//! Every write goes to a temporary file in the same directory which is then
//! renamed over the target, so readers only ever see complete documents.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::FilesystemError;
use crate::lastfm::TimeWindow;
use crate::tags::{EnrichedTrack, TagTable, TOP_SLICE_SIZES};

/// Paths of the artifacts belonging to one time window.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    dir: PathBuf,
    prefix: String,
}

impl ArtifactPaths {
    fn new(dir: &Path, prefix: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
        }
    }

    pub fn for_window(dir: &Path, window: TimeWindow) -> Self {
        Self::new(dir, window.artifact_prefix())
    }

    pub fn tracks_data(&self) -> PathBuf {
        self.dir.join(format!("{}_tracks_data.json", self.prefix))
    }

    pub fn tags(&self) -> PathBuf {
        self.dir.join(format!("{}_tags.json", self.prefix))
    }

    pub fn top_tags(&self, n: usize) -> PathBuf {
        self.dir.join(format!("{}_{}_tags.json", self.prefix, n))
    }
}

/// Serialize `value` as JSON indented with four spaces and atomically
/// replace `path` with it.
pub fn write_json_pretty<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), FilesystemError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|source| FilesystemError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    let write_err = |source| FilesystemError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(&buf).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FilesystemError> {
    let content = std::fs::read(path).map_err(|source| FilesystemError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| FilesystemError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a previously written enriched-tracks snapshot.
pub fn read_tracks_data(paths: &ArtifactPaths) -> Result<Vec<EnrichedTrack>, FilesystemError> {
    read_json(&paths.tracks_data())
}

/// Write the full ranked table and each of its top-n name slices.
pub fn write_tag_artifacts(paths: &ArtifactPaths, table: &TagTable) -> Result<(), FilesystemError> {
    write_json_pretty(&paths.tags(), table)?;
    for n in TOP_SLICE_SIZES {
        write_json_pretty(&paths.top_tags(n), &table.top_names(n))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{aggregate, Tag};
    use tempfile::TempDir;

    #[test]
    fn test_artifact_paths() {
        let paths = ArtifactPaths::for_window(Path::new("/out"), TimeWindow::SevenDay);
        assert_eq!(paths.tracks_data(), PathBuf::from("/out/7day_tracks_data.json"));
        assert_eq!(paths.tags(), PathBuf::from("/out/7day_tags.json"));
        assert_eq!(paths.top_tags(50), PathBuf::from("/out/7day_50_tags.json"));
    }

    #[test]
    fn test_write_json_pretty_uses_four_spaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("names.json");

        write_json_pretty(&path, &vec!["rock", "jazz"]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[\n    \"rock\",\n    \"jazz\"\n]");
    }

    #[test]
    fn test_write_json_pretty_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        write_json_pretty(&path, &vec![1, 2, 3]).unwrap();
        write_json_pretty(&path, &vec![4]).unwrap();

        let value: Vec<u32> = read_json(&path).unwrap();
        assert_eq!(value, vec![4]);
        // No temporary files are left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("data.json");
        let result = write_json_pretty(&path, &vec![1]);
        assert!(matches!(result, Err(FilesystemError::Write { .. })));
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let paths = ArtifactPaths::new(dir.path(), "overall");
        assert!(matches!(
            read_tracks_data(&paths),
            Err(FilesystemError::Read { .. })
        ));
    }

    #[test]
    fn test_read_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        let paths = ArtifactPaths::new(dir.path(), "overall");
        std::fs::write(paths.tracks_data(), "[[\"only a name\"]]").unwrap();
        assert!(matches!(
            read_tracks_data(&paths),
            Err(FilesystemError::Decode { .. })
        ));
    }

    #[test]
    fn test_write_tag_artifacts() {
        let dir = TempDir::new().unwrap();
        let paths = ArtifactPaths::new(dir.path(), "overall");
        let table = aggregate(&[EnrichedTrack {
            name: "t".to_string(),
            artist: "a".to_string(),
            image_url: String::new(),
            playcount: 1,
            tags: vec![
                Tag {
                    score: 2,
                    name: "jazz".to_string(),
                },
                Tag {
                    score: 8,
                    name: "rock".to_string(),
                },
            ],
        }]);

        write_tag_artifacts(&paths, &table).unwrap();

        let tags = std::fs::read_to_string(paths.tags()).unwrap();
        assert_eq!(tags, "{\n    \"rock\": 8,\n    \"jazz\": 2\n}");
        for n in TOP_SLICE_SIZES {
            let names: Vec<String> = read_json(&paths.top_tags(n)).unwrap();
            assert_eq!(names, vec!["rock", "jazz"]);
        }
    }
}
