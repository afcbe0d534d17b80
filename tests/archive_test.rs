//! Exporting resized images as files and zip archives.

mod common;

use std::io::{Cursor, Read};

use chrono::{TimeZone, Utc};
use common::fixtures::checkerboard_png;
use crispscale::codec::decode;
use crispscale::services::{BatchResizer, Exporter, ImageLibrary, ProcessedImage};
use nearest_resample::{ResizeMode, ResizeRequest};
use pretty_assertions::assert_eq;
use zip::ZipArchive;

async fn resized_library() -> ImageLibrary {
    let mut library = ImageLibrary::new();
    library.add_bytes("knight.png", &checkerboard_png(8, 8)).unwrap();
    library.add_bytes("castle.gif.png", &checkerboard_png(16, 4)).unwrap();
    library
        .resize_all(&BatchResizer::new(2), ResizeRequest::Uniform { factor: 3 })
        .await;
    library
}

fn collect(library: &ImageLibrary) -> Vec<(&str, &ProcessedImage)> {
    library
        .resized()
        .map(|(entry, image)| (entry.stem.as_str(), image))
        .collect()
}

#[tokio::test]
async fn test_archive_contains_every_image() {
    let library = resized_library().await;
    let images = collect(&library);
    let dir = tempfile::tempdir().unwrap();
    let date = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let exporter =
        Exporter::new(dir.path(), "{filename}_x{scale}", ResizeMode::Scale).with_date(date);

    let path = exporter
        .write_archive("resized-images-{date}", &images)
        .unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "resized-images-2025-01-02T03-04-05.zip"
    );

    let mut zip = ZipArchive::new(Cursor::new(std::fs::read(&path).unwrap())).unwrap();
    let mut entries = Vec::new();
    for i in 0..zip.len() {
        let mut file = zip.by_index(i).unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        entries.push((file.name().to_string(), decode(&data).unwrap().dimensions()));
    }
    assert_eq!(
        entries,
        vec![
            ("knight_x3.png".to_string(), (24, 24)),
            ("castle.gif_x3.png".to_string(), (48, 12)),
        ]
    );
}

#[tokio::test]
async fn test_individual_files_named_by_template() {
    let library = resized_library().await;
    let images = collect(&library);
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(
        dir.path(),
        "{mode}-{filename}-{width}x{height}",
        ResizeMode::Scale,
    );

    let written = exporter.write_files(&images).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec!["scale-knight-24x24.png", "scale-castle.gif-48x12.png"]
    );
    for path in &written {
        common::assert_png(&std::fs::read(path).unwrap());
    }
}
