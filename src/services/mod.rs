pub mod archive;
pub mod batch;
pub mod export;
pub mod filename_template;
pub mod image_library;

pub use archive::ArchivePackager;
pub use batch::{
    BatchOutcome, BatchReport, BatchResizer, CancelHandle, EncodedImage, ProcessedImage,
};
pub use export::Exporter;
pub use filename_template::{expand, TemplateContext};
pub use image_library::{AddOutcome, ImageLibrary, LibraryEntry};
