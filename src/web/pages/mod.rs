//! Maud-based page templates for the web UI.

pub mod gallery;

pub use gallery::{render_gallery_page, FilterPanel, GalleryPageParams};
