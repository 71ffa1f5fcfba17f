//! Deep Zoom pyramid generation — the image side of the collection package.
//!
//! The module is split into:
//! - **Geometry** ([`dzi`]): pure functions for level counts, per-level
//!   dimensions, and tile grids (unit testable, no I/O)
//! - **Backend** ([`backend`]): the [`PyramidBackend`] trait the builder
//!   talks to — `create_image` and `create_collection`, nothing else
//! - **Implementation** ([`rust_backend`]): [`DeepZoomBackend`], pure Rust
//!   tiling via the `image` crate

pub mod backend;
pub mod dzi;
pub mod rust_backend;

pub use backend::{BackendError, PyramidBackend};
pub use rust_backend::DeepZoomBackend;
