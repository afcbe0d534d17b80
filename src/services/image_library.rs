//! The set of loaded images and their resized versions.
//!
//! Images are identified by filename stem (name without the final
//! extension). Loading a second file with the same stem is skipped, so
//! output names derived from the stem stay unique.

use std::path::Path;
use std::sync::Arc;

use nearest_resample::{Bitmap, ResizeRequest};

use crate::codec::decode;
use crate::error::ProcessError;
use crate::services::batch::{BatchResizer, ProcessedImage};

/// One loaded image
#[derive(Debug, Clone)]
pub struct LibraryEntry {
    /// Filename without its final extension
    pub stem: String,
    /// Filename as supplied
    pub source_name: String,
    /// Decoded original
    pub original: Arc<Bitmap>,
    /// Result of the most recent resize, if any
    pub resized: Option<ProcessedImage>,
}

/// Result of adding a file to the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added { stem: String },
    SkippedDuplicate { stem: String },
}

/// Loaded images keyed by stem, in load order
#[derive(Debug, Default)]
pub struct ImageLibrary {
    entries: Vec<LibraryEntry>,
}

impl ImageLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` and add them under the stem of `filename`.
    ///
    /// Duplicate stems are skipped without decoding. Undecodable input
    /// fails with [`ProcessError::Decode`] and leaves the library unchanged.
    pub fn add_bytes(&mut self, filename: &str, bytes: &[u8]) -> Result<AddOutcome, ProcessError> {
        let stem = file_stem(filename);
        if self.contains(&stem) {
            tracing::warn!(file = %filename, stem = %stem, "Skipped duplicate image");
            return Ok(AddOutcome::SkippedDuplicate { stem });
        }

        let bitmap = decode(bytes)?;
        tracing::info!(
            file = %filename,
            width = bitmap.width(),
            height = bitmap.height(),
            "Loaded image"
        );
        self.entries.push(LibraryEntry {
            stem: stem.clone(),
            source_name: filename.to_string(),
            original: Arc::new(bitmap),
            resized: None,
        });
        Ok(AddOutcome::Added { stem })
    }

    /// Read and add an image file
    pub fn add_file(&mut self, path: &Path) -> Result<AddOutcome, ProcessError> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let stem = file_stem(&filename);
        if self.contains(&stem) {
            tracing::warn!(file = %path.display(), stem = %stem, "Skipped duplicate image");
            return Ok(AddOutcome::SkippedDuplicate { stem });
        }
        let bytes = std::fs::read(path)?;
        self.add_bytes(&filename, &bytes)
    }

    /// Remove the image with this stem. Returns whether it was present.
    pub fn remove(&mut self, stem: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.stem != stem);
        before != self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, stem: &str) -> bool {
        self.entries.iter().any(|e| e.stem == stem)
    }

    pub fn get(&self, stem: &str) -> Option<&LibraryEntry> {
        self.entries.iter().find(|e| e.stem == stem)
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that have a resized version, in load order
    pub fn resized(&self) -> impl Iterator<Item = (&LibraryEntry, &ProcessedImage)> {
        self.entries
            .iter()
            .filter_map(|e| e.resized.as_ref().map(|r| (e, r)))
    }

    /// Resize every loaded image with `request`.
    ///
    /// Each entry's previous result is replaced; entries that fail are left
    /// without a resized version. Returns the failures by stem.
    pub async fn resize_all(
        &mut self,
        batch: &BatchResizer,
        request: ResizeRequest,
    ) -> Vec<(String, ProcessError)> {
        let inputs = self
            .entries
            .iter()
            .map(|e| (e.stem.clone(), e.original.clone()))
            .collect();
        let report = batch.resize_decoded(inputs, request).await;

        let mut failures = Vec::new();
        for outcome in report.into_outcomes() {
            let Some(entry) = self.entries.iter_mut().find(|e| e.stem == outcome.key) else {
                continue;
            };
            match outcome.result {
                Ok(image) => entry.resized = Some(image),
                Err(e) => {
                    entry.resized = None;
                    failures.push((outcome.key, e));
                }
            }
        }
        failures
    }
}

/// Filename without directory and final extension (`a.b.png` -> `a.b`)
pub fn file_stem(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_png;
    use pretty_assertions::assert_eq;

    fn png(width: u32, height: u32) -> Vec<u8> {
        encode_png(&Bitmap::filled(width, height, [40, 80, 120, 255])).unwrap()
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("hero.png"), "hero");
        assert_eq!(file_stem("tiles.v2.gif"), "tiles.v2");
        assert_eq!(file_stem("noext"), "noext");
        assert_eq!(file_stem("dir/sprite.bmp"), "sprite");
    }

    #[test]
    fn test_add_and_get() {
        let mut library = ImageLibrary::new();
        let outcome = library.add_bytes("hero.png", &png(4, 3)).unwrap();
        assert_eq!(
            outcome,
            AddOutcome::Added {
                stem: "hero".to_string()
            }
        );
        let entry = library.get("hero").unwrap();
        assert_eq!(entry.original.dimensions(), (4, 3));
        assert_eq!(entry.source_name, "hero.png");
        assert!(entry.resized.is_none());
    }

    #[test]
    fn test_duplicate_stem_skipped() {
        let mut library = ImageLibrary::new();
        library.add_bytes("hero.png", &png(4, 4)).unwrap();
        let outcome = library.add_bytes("hero.gif", &png(8, 8)).unwrap();
        assert_eq!(
            outcome,
            AddOutcome::SkippedDuplicate {
                stem: "hero".to_string()
            }
        );
        assert_eq!(library.len(), 1);
        assert_eq!(library.get("hero").unwrap().original.dimensions(), (4, 4));
    }

    #[test]
    fn test_corrupt_input_not_added() {
        let mut library = ImageLibrary::new();
        let err = library.add_bytes("broken.png", b"garbage").unwrap_err();
        assert!(matches!(err, ProcessError::Decode(_)));
        assert!(library.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut library = ImageLibrary::new();
        library.add_bytes("a.png", &png(1, 1)).unwrap();
        library.add_bytes("b.png", &png(1, 1)).unwrap();

        assert!(library.remove("a"));
        assert!(!library.remove("a"));
        assert_eq!(library.len(), 1);

        library.clear();
        assert!(library.is_empty());
    }

    #[tokio::test]
    async fn test_resize_all_stores_results() {
        let mut library = ImageLibrary::new();
        library.add_bytes("a.png", &png(2, 2)).unwrap();
        library.add_bytes("b.png", &png(3, 1)).unwrap();

        let failures = library
            .resize_all(&BatchResizer::new(2), ResizeRequest::Uniform { factor: 4 })
            .await;

        assert!(failures.is_empty());
        let dims: Vec<(String, u32, u32)> = library
            .resized()
            .map(|(e, r)| (e.stem.clone(), r.width(), r.height()))
            .collect();
        assert_eq!(
            dims,
            vec![("a".to_string(), 8, 8), ("b".to_string(), 12, 4)]
        );
    }

    #[tokio::test]
    async fn test_resize_all_failure_clears_previous_result() {
        let mut library = ImageLibrary::new();
        library.add_bytes("a.png", &png(2, 2)).unwrap();
        let batch = BatchResizer::new(1);

        library
            .resize_all(&batch, ResizeRequest::Uniform { factor: 2 })
            .await;
        assert!(library.get("a").unwrap().resized.is_some());

        let failures = library
            .resize_all(&batch, ResizeRequest::Uniform { factor: 0 })
            .await;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "a");
        assert!(library.get("a").unwrap().resized.is_none());
    }
}
