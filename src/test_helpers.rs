//! Shared test utilities for the pivot-forge test suite.
//!
//! CSV fixture writers plus small constructors for the model types, so
//! individual tests stay focused on the behavior they exercise.

use crate::collection::{Collection, Facet, FacetKind, Item};
use std::path::{Path, PathBuf};

/// Header row used by facet table fixtures.
pub const FACETS_HEADER: &str = "name,type,filter,metadata,wordwheel";

/// Write `lines` as a CSV file under `dir` and return its path.
pub fn write_csv(dir: &Path, filename: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(filename);
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// Write the standard three-facet / two-item fixture pair: facets
/// `name`, `image_path`, `color`; items `Red` (with href) and `Blue`
/// (without).
pub fn sample_inputs(dir: &Path) -> (PathBuf, PathBuf) {
    let facets = write_csv(
        dir,
        "facets.csv",
        &[
            FACETS_HEADER,
            "name,String,1,1,1",
            "image_path,String,0,0,0",
            "color,String,1,1,1",
        ],
    );
    let items = write_csv(
        dir,
        "items.csv",
        &[
            "name,href,description,image_path,color",
            "Red,http://example.com/red,a red car,red.jpg,Red",
            "Blue,,a blue car,blue.jpg,Blue",
        ],
    );
    (facets, items)
}

/// A `String` facet visible everywhere.
pub fn string_facet(name: &str) -> Facet {
    Facet::new(name, FacetKind::String)
}

/// An item with loader-style id/img and the given values.
pub fn item_with_values(name: &str, values: &[&str]) -> Item {
    Item {
        name: name.to_string(),
        id: "0".to_string(),
        img: "#0".to_string(),
        description: format!("a {} car", name.to_lowercase()),
        values: values.iter().map(|v| v.to_string()).collect(),
        href: None,
    }
}

/// A two-facet, two-item collection used by serializer tests.
pub fn sample_collection() -> Collection {
    let mut collection = Collection::new("Cars");
    collection.append_facet(string_facet("color"));
    collection.append_facet(Facet::new("year", FacetKind::Number));

    collection
        .append_item(Item {
            name: "Red".to_string(),
            id: "0".to_string(),
            img: "#0".to_string(),
            description: "a red car".to_string(),
            values: vec!["Red".to_string(), "1999".to_string()],
            href: Some("http://example.com/red".to_string()),
        })
        .unwrap();
    collection
        .append_item(Item {
            name: "Blue".to_string(),
            id: "1".to_string(),
            img: "#1".to_string(),
            description: "a blue car".to_string(),
            values: vec!["Blue".to_string(), "2004".to_string()],
            href: None,
        })
        .unwrap();

    collection
}
