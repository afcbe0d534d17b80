//! Zip packaging of resized images.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ProcessError;

/// Packs named files into a single zip archive.
///
/// Entries are stored without compression; PNG data is already deflated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchivePackager;

impl ArchivePackager {
    pub fn new() -> Self {
        Self
    }

    /// Build an archive from `(entry name, contents)` pairs, in order.
    ///
    /// A name already used by an earlier entry becomes `stem-2.ext`,
    /// `stem-3.ext` and so on.
    pub fn package(&self, files: &[(String, Vec<u8>)]) -> Result<Vec<u8>, ProcessError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let mut used = HashSet::new();

        for (name, bytes) in files {
            let entry = unique_name(name, &used);
            if entry != *name {
                tracing::warn!(name = %name, renamed = %entry, "Archive entry name collision");
            }
            writer.start_file(entry.as_str(), options)?;
            writer.write_all(bytes)?;
            used.insert(entry);
        }

        let archive = writer.finish()?.into_inner();
        tracing::debug!(
            entries = files.len(),
            bytes = archive.len(),
            "Packaged archive"
        );
        Ok(archive)
    }
}

pub(crate) fn unique_name(name: &str, used: &HashSet<String>) -> String {
    if !used.contains(name) {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => (&name[..dot], &name[dot..]),
        _ => (name, ""),
    };
    (2..)
        .map(|n| format!("{stem}-{n}{ext}"))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| name.to_string())
}
