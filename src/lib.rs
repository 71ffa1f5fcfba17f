//! # Pivot Forge
//!
//! Builds zoomable PivotViewer collections from CSV metadata and a folder of
//! images: one `collection.cxml` document describing facets and items, plus
//! Deep Zoom image pyramids for smooth zooming in the viewer.
//!
//! # Architecture
//!
//! ```text
//! facets.csv ─┐
//!             ├─ tables ─→ Collection ─→ cxml ─→ dest/collection.cxml
//! items.csv ──┘                │
//!                              └─ image_path facet
//!                                     │
//! images/ ────────────────────── deepzoom ─→ dest/pyramid/<img>.xml + tiles
//!                                            dest/pyramid/collection.xml
//! ```
//!
//! The [`builder`] module wires the stages together; everything upstream of
//! the pyramid backend is pure data transformation over the in-memory
//! [`collection::Collection`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tables`] | CSV loading — facet definitions and item records, row order preserving |
//! | [`collection`] | In-memory model; enforces the value-count/facet-count invariant at attachment |
//! | [`cxml`] | Streaming CXML serialization — exact wire strings, two-space indentation |
//! | [`deepzoom`] | Pyramid generation behind the narrow [`deepzoom::PyramidBackend`] trait |
//! | [`builder`] | End-to-end orchestration: load → assemble → serialize → pyramids |
//! | [`output`] | CLI output formatting — pure `format_*` functions |
//!
//! # Design Decisions
//!
//! ## Exact Wire Strings
//!
//! The CXML namespaces, `SchemaVersion`, and attribute names are fixed
//! contract with the viewer; [`cxml`] keeps them all in one place and the
//! serializer tests pin them. Visibility flags render as lowercase
//! `"true"`/`"false"` — the viewer does not accept `1`/`0`.
//!
//! ## Streaming Serialization
//!
//! The document is emitted element by element through an indenting
//! `quick_xml::Writer` rather than building a tree and pretty-printing it
//! afterwards. Output is deterministic: insertion order in, document order
//! out, byte-identical across runs.
//!
//! ## The Backend Seam
//!
//! Pyramid generation is a well-known, replaceable sub-algorithm, so the
//! builder only sees [`deepzoom::PyramidBackend`] — two operations, trait
//! object at the call site. Orchestration tests run against a recording
//! mock; the shipped implementation is pure Rust (`image` crate, Lanczos3,
//! JPEG tiles), so there is no ImageMagick or other system dependency to
//! install.
//!
//! ## Synchronous By Design
//!
//! One collection, one thread, no shared state. A build either runs to
//! completion or fails with the triggering error; nothing is retried and
//! nothing already written is rolled back.

pub mod builder;
pub mod collection;
pub mod cxml;
pub mod deepzoom;
pub mod output;
pub mod tables;

#[cfg(test)]
pub(crate) mod test_helpers;
