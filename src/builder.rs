//! End-to-end collection build orchestration.
//!
//! The builder wires the table loaders, the collection model, the CXML
//! serializer, and the pyramid backend into one pipeline:
//!
//! ```text
//! 1. Assemble   facets.csv + items.csv  →  Collection (in memory)
//! 2. Serialize  Collection             →  dest/collection.cxml
//! 3. Pyramids   image_path facet       →  dest/<pyramid_dir>/*.xml + tiles
//!                                         dest/<pyramid_dir>/collection.xml
//! ```
//!
//! Any failure aborts the whole build and surfaces to the caller; there is
//! no partial-success mode and no rollback of directories already created.

use crate::collection::{Collection, CollectionError, Facet};
use crate::cxml::{self, CxmlError};
use crate::deepzoom::{BackendError, PyramidBackend};
use crate::tables::{self, TableError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Document filename written into the destination folder.
pub const CXML_FILENAME: &str = "collection.cxml";

/// Manifest filename written into the pyramid subfolder.
pub const PYRAMID_MANIFEST: &str = "collection.xml";

/// Facet that names each item's source image file.
pub const IMAGE_PATH_FACET: &str = "image_path";

/// Default pyramid subfolder below the destination.
pub const DEFAULT_PYRAMID_DIR: &str = "pyramid";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error(transparent)]
    Cxml(#[from] CxmlError),
    #[error(transparent)]
    Pyramid(#[from] BackendError),
    #[error("no facet named '{IMAGE_PATH_FACET}'; the builder needs it to locate item images")]
    MissingImagePathFacet,
    #[error("multiple facets named '{IMAGE_PATH_FACET}' (positions {first} and {second})")]
    DuplicateImagePathFacet { first: usize, second: usize },
}

/// Inputs for a full build.
pub struct BuildParams<'a> {
    pub name: &'a str,
    pub facets_csv: &'a Path,
    pub items_csv: &'a Path,
    pub image_dir: &'a Path,
    pub dest: &'a Path,
    pub pyramid_dir: &'a str,
}

/// What a build produced, for display and machine consumption.
#[derive(Debug, Serialize)]
pub struct BuildReport {
    pub facet_count: usize,
    pub item_count: usize,
    pub cxml_path: PathBuf,
    pub manifest_path: PathBuf,
}

/// Load both tables and assemble the in-memory collection.
///
/// Items are attached one by one so the value-count invariant is enforced
/// on every row; the first mismatching row aborts the assembly.
pub fn assemble(
    name: &str,
    facets_csv: &Path,
    items_csv: &Path,
    pyramid_dir: &str,
) -> Result<Collection, BuildError> {
    let facets = tables::load_facets(facets_csv, true)?;
    let items = tables::load_items(items_csv, true)?;

    // Forward slash regardless of platform: ImgBase is a wire-format
    // relative path interpreted by the viewer, not by this filesystem.
    let img_base = format!("{pyramid_dir}/{PYRAMID_MANIFEST}");
    let mut collection = Collection::with_img_base(name, img_base);
    for facet in facets {
        collection.append_facet(facet);
    }
    for item in items {
        collection.append_item(item)?;
    }
    Ok(collection)
}

/// Position of the `image_path` facet. First match wins, but a second facet
/// with the same name is rejected rather than silently shadowed.
pub fn image_path_column(facets: &[Facet]) -> Result<usize, BuildError> {
    let mut found = None;
    for (idx, facet) in facets.iter().enumerate() {
        if facet.name == IMAGE_PATH_FACET {
            match found {
                None => found = Some(idx),
                Some(first) => {
                    return Err(BuildError::DuplicateImagePathFacet { first, second: idx });
                }
            }
        }
    }
    found.ok_or(BuildError::MissingImagePathFacet)
}

/// Descriptor filename for a source image: file stem plus `.xml`.
fn descriptor_name(image_name: &str) -> String {
    match image_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => format!("{stem}.xml"),
        _ => format!("{image_name}.xml"),
    }
}

/// Run the full pipeline against the given pyramid backend.
pub fn build(
    params: &BuildParams<'_>,
    backend: &dyn PyramidBackend,
) -> Result<BuildReport, BuildError> {
    let pyramid_root = params.dest.join(params.pyramid_dir);
    std::fs::create_dir_all(&pyramid_root)?;

    let collection = assemble(
        params.name,
        params.facets_csv,
        params.items_csv,
        params.pyramid_dir,
    )?;

    let cxml_path = params.dest.join(CXML_FILENAME);
    cxml::save(&collection, &cxml_path)?;

    let image_column = image_path_column(collection.facets())?;

    let mut descriptors = Vec::with_capacity(collection.items().len());
    for item in collection.items() {
        // Safe index: append_item guarantees values.len() == facets.len().
        let image_name = &item.values[image_column];
        let source = params.image_dir.join(image_name);
        let name = descriptor_name(image_name);
        backend.create_image(&source, &pyramid_root.join(&name))?;
        descriptors.push(name);
    }

    let manifest_path = pyramid_root.join(PYRAMID_MANIFEST);
    backend.create_collection(&descriptors, &manifest_path)?;

    Ok(BuildReport {
        facet_count: collection.facets().len(),
        item_count: collection.items().len(),
        cxml_path,
        manifest_path,
    })
}
