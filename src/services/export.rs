//! Writing resized images to disk.
//!
//! All names in one export share a single timestamp, captured when the
//! [`Exporter`] is created.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use nearest_resample::ResizeMode;

use crate::error::ProcessError;
use crate::services::archive::{unique_name, ArchivePackager};
use crate::services::batch::ProcessedImage;
use crate::services::filename_template::{expand, TemplateContext};

/// Writes processed images as individual PNGs or as one zip archive
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    filename_template: String,
    mode: ResizeMode,
    date: DateTime<Utc>,
}

impl Exporter {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        filename_template: impl Into<String>,
        mode: ResizeMode,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            filename_template: filename_template.into(),
            mode,
            date: Utc::now(),
        }
    }

    /// Use a fixed timestamp for `{date}`
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output filename (with `.png`) for one image
    pub fn file_name(&self, stem: &str, image: &ProcessedImage) -> String {
        let context = TemplateContext::new(self.date)
            .filename(stem)
            .dimensions(image.width(), image.height())
            .scale(image.result.applied_factor)
            .mode(self.mode);
        let name = sanitize(&expand(&self.filename_template, &context));
        let name = if name.is_empty() { stem.to_string() } else { name };
        format!("{name}.png")
    }

    /// Archive filename (with `.zip`) from an archive name template
    pub fn archive_name(&self, template: &str) -> String {
        let context = TemplateContext::new(self.date).mode(self.mode);
        let name = sanitize(&expand(template, &context));
        let name = if name.is_empty() {
            "resized-images".to_string()
        } else {
            name
        };
        format!("{name}.zip")
    }

    fn named<'a>(
        &self,
        images: &[(&str, &'a ProcessedImage)],
    ) -> Vec<(String, &'a ProcessedImage)> {
        let mut used = HashSet::new();
        images
            .iter()
            .map(|(stem, image)| {
                let name = unique_name(&self.file_name(stem, image), &used);
                used.insert(name.clone());
                (name, *image)
            })
            .collect()
    }

    /// Write each image as its own PNG file. Returns the written paths.
    pub fn write_files(
        &self,
        images: &[(&str, &ProcessedImage)],
    ) -> Result<Vec<PathBuf>, ProcessError> {
        std::fs::create_dir_all(&self.output_dir)?;
        let mut written = Vec::with_capacity(images.len());
        for (name, image) in self.named(images) {
            let path = self.output_dir.join(&name);
            std::fs::write(&path, &image.png)?;
            tracing::info!(path = %path.display(), bytes = image.png.len(), "Wrote image");
            written.push(path);
        }
        Ok(written)
    }

    /// Write all images into one zip archive. Returns the archive path.
    pub fn write_archive(
        &self,
        archive_template: &str,
        images: &[(&str, &ProcessedImage)],
    ) -> Result<PathBuf, ProcessError> {
        let files: Vec<(String, Vec<u8>)> = self
            .named(images)
            .into_iter()
            .map(|(name, image)| (name, image.png.clone()))
            .collect();
        let archive = ArchivePackager::new().package(&files)?;

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(self.archive_name(archive_template));
        std::fs::write(&path, &archive)?;
        tracing::info!(
            path = %path.display(),
            entries = files.len(),
            bytes = archive.len(),
            "Wrote archive"
        );
        Ok(path)
    }
}

/// Keep generated names inside the output directory and free of `:`
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            ':' => '-',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::batch::process;
    use chrono::TimeZone;
    use nearest_resample::{Bitmap, ResizeRequest};
    use pretty_assertions::assert_eq;

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 9).unwrap()
    }

    fn processed(width: u32, height: u32, request: ResizeRequest) -> ProcessedImage {
        process(&Bitmap::filled(width, height, [200, 10, 10, 255]), &request).unwrap()
    }

    #[test]
    fn test_file_name_scale_mode() {
        let exporter = Exporter::new("out", "{filename}_x{scale}", ResizeMode::Scale);
        let image = processed(4, 4, ResizeRequest::Uniform { factor: 3 });
        assert_eq!(exporter.file_name("hero", &image), "hero_x3.png");
    }

    #[test]
    fn test_file_name_dimensions_mode() {
        let exporter = Exporter::new("out", "{filename}_{width}x{height}", ResizeMode::Dimensions);
        let image = processed(
            400,
            300,
            ResizeRequest::Dimensions {
                width: Some(800),
                height: None,
            },
        );
        assert_eq!(exporter.file_name("map", &image), "map_800x600.png");
    }

    #[test]
    fn test_empty_expansion_falls_back_to_stem() {
        let exporter = Exporter::new("out", "{scale}", ResizeMode::Dimensions);
        let image = processed(
            2,
            2,
            ResizeRequest::Dimensions {
                width: Some(4),
                height: None,
            },
        );
        assert_eq!(exporter.file_name("tile", &image), "tile.png");
    }

    #[test]
    fn test_separators_replaced() {
        let exporter = Exporter::new("out", "../{filename}", ResizeMode::Scale);
        let image = processed(1, 1, ResizeRequest::Uniform { factor: 2 });
        assert_eq!(exporter.file_name("a", &image), ".._a.png");
    }

    #[test]
    fn test_colons_replaced() {
        let exporter = Exporter::new("out", "{filename}@12:30", ResizeMode::Scale);
        let image = processed(1, 1, ResizeRequest::Uniform { factor: 2 });
        assert_eq!(exporter.file_name("a", &image), "a@12-30.png");
    }

    #[test]
    fn test_archive_name_uses_shared_date() {
        let exporter =
            Exporter::new("out", "{filename}", ResizeMode::Scale).with_date(fixed_date());
        assert_eq!(
            exporter.archive_name("resized-images-{date}"),
            "resized-images-2024-05-01T13-45-09.zip"
        );
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(
            dir.path().join("nested"),
            "{filename}_x{scale}",
            ResizeMode::Scale,
        );
        let a = processed(2, 2, ResizeRequest::Uniform { factor: 2 });
        let b = processed(3, 1, ResizeRequest::Uniform { factor: 2 });

        let written = exporter.write_files(&[("a", &a), ("b", &b)]).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("nested/a_x2.png"),
                dir.path().join("nested/b_x2.png"),
            ]
        );
        assert_eq!(std::fs::read(&written[0]).unwrap(), a.png);
    }

    #[test]
    fn test_write_files_colliding_names() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), "sprite", ResizeMode::Scale);
        let a = processed(1, 1, ResizeRequest::Uniform { factor: 2 });

        let written = exporter.write_files(&[("a", &a), ("b", &a)]).unwrap();

        assert_eq!(
            written,
            vec![dir.path().join("sprite.png"), dir.path().join("sprite-2.png")]
        );
    }

    #[test]
    fn test_write_archive() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path(), "{filename}_x{scale}", ResizeMode::Scale)
            .with_date(fixed_date());
        let a = processed(2, 2, ResizeRequest::Uniform { factor: 4 });

        let path = exporter.write_archive("pack-{date}", &[("a", &a)]).unwrap();

        assert_eq!(path, dir.path().join("pack-2024-05-01T13-45-09.zip"));
        let bytes = std::fs::read(&path).unwrap();
        let mut zip = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(zip.len(), 1);
        assert_eq!(zip.by_index(0).unwrap().name(), "a_x4.png");
    }
}
