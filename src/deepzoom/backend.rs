//! Pyramid generation backend trait.
//!
//! The [`PyramidBackend`] trait is the narrow seam between the collection
//! builder and the Deep Zoom machinery: two operations, nothing else. The
//! production implementation is
//! [`DeepZoomBackend`](super::rust_backend::DeepZoomBackend); orchestration
//! tests swap in a recording mock so they never touch pixels.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("pyramid generation failed: {0}")]
    ProcessingFailed(String),
}

/// Interface to the image-pyramid collaborator.
pub trait PyramidBackend {
    /// Build one multi-level pyramid for `source`, writing the descriptor
    /// document to `descriptor` and the tile files next to it.
    fn create_image(&self, source: &Path, descriptor: &Path) -> Result<(), BackendError>;

    /// Combine per-image pyramids into one collection manifest at
    /// `manifest`. `descriptors` are descriptor filenames relative to the
    /// manifest's directory, in collection item order.
    fn create_collection(&self, descriptors: &[String], manifest: &Path)
    -> Result<(), BackendError>;
}
