pub mod file_relocator;
pub mod image_filter;

pub use file_relocator::{FileEntry, FileRelocator, MoveFailure, RelocationReport};
pub use image_filter::ImageFilter;
