//! In-memory collection model: facets, items, and the owning collection.
//!
//! A [`Collection`] is an ordered aggregate: facet order defines the
//! positional alignment with every item's value list, and item order is the
//! display order in the viewer. Both orders are insertion order — nothing
//! here sorts, filters, or dedupes.
//!
//! The one cross-entity invariant lives at the attachment point:
//! [`Collection::append_item`] rejects any item whose value count disagrees
//! with the current facet count. Items themselves can be constructed freely;
//! the check happens when they join a collection, not before.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error(
        "item '{item}' carries {got} values but the collection defines {expected} facet categories"
    )]
    SchemaMismatch {
        item: String,
        expected: usize,
        got: usize,
    },
}

/// Facet value types the CXML format recognizes.
///
/// The serialized name of each variant doubles as the tag name wrapping the
/// facet value inside an item, so the spellings are wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FacetKind {
    String,
    LongString,
    Number,
    DateTime,
    Link,
}

impl FacetKind {
    /// Parse the type column of a facet table. Case-sensitive: these are the
    /// exact spellings the viewer understands.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "String" => Some(Self::String),
            "LongString" => Some(Self::LongString),
            "Number" => Some(Self::Number),
            "DateTime" => Some(Self::DateTime),
            "Link" => Some(Self::Link),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::LongString => "LongString",
            Self::Number => "Number",
            Self::DateTime => "DateTime",
            Self::Link => "Link",
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed metadata column shared by all items.
///
/// Identity is the name. The three visibility flags control where the viewer
/// surfaces the facet (filter pane, info pane, word wheel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub name: String,
    pub kind: FacetKind,
    pub is_filter_visible: bool,
    pub is_meta_data_visible: bool,
    pub is_word_wheel_visible: bool,
}

impl Facet {
    /// A facet visible everywhere, matching the viewer's defaults.
    pub fn new(name: impl Into<String>, kind: FacetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_filter_visible: true,
            is_meta_data_visible: true,
            is_word_wheel_visible: true,
        }
    }
}

/// One entry in the collection.
///
/// `values` is positional: entry `i` belongs to facet `i` of the owning
/// collection. `id` and `img` are assigned by the item loader (`id` is a
/// per-load row counter, `img` an `#id` reference into the pyramid
/// manifest); they are not taken from input data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub name: String,
    pub id: String,
    pub img: String,
    pub description: String,
    pub values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// The collection aggregate: a name, ordered facets, ordered items, and the
/// relative path to the pyramid manifest the items' `Img` references resolve
/// against.
///
/// Facets and items are owned exclusively; every `Collection` starts with
/// its own fresh sequences.
#[derive(Debug, Serialize)]
pub struct Collection {
    pub name: String,
    facets: Vec<Facet>,
    items: Vec<Item>,
    pub img_base: String,
}

impl Collection {
    pub const DEFAULT_IMG_BASE: &'static str = "pyramid/collection.xml";

    pub fn new(name: impl Into<String>) -> Self {
        Self::with_img_base(name, Self::DEFAULT_IMG_BASE)
    }

    pub fn with_img_base(name: impl Into<String>, img_base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            facets: Vec::new(),
            items: Vec::new(),
            img_base: img_base.into(),
        }
    }

    /// Append a facet category.
    ///
    /// Name uniqueness is not enforced; duplicates are the caller's problem
    /// and surface later (the builder rejects a duplicated `image_path`).
    pub fn append_facet(&mut self, facet: Facet) {
        self.facets.push(facet);
    }

    /// Append an item, rejecting it when its value count disagrees with the
    /// current facet count. A rejected item leaves the collection unchanged.
    pub fn append_item(&mut self, item: Item) -> Result<(), CollectionError> {
        if item.values.len() != self.facets.len() {
            return Err(CollectionError::SchemaMismatch {
                item: item.name,
                expected: self.facets.len(),
                got: item.values.len(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{item_with_values, string_facet};

    #[test]
    fn new_collections_do_not_share_sequences() {
        let mut first = Collection::new("First");
        first.append_facet(string_facet("color"));

        let second = Collection::new("Second");
        assert_eq!(first.facets().len(), 1);
        assert!(second.facets().is_empty());
    }

    #[test]
    fn append_item_accepts_matching_value_count() {
        let mut collection = Collection::new("Cars");
        collection.append_facet(string_facet("color"));
        collection.append_facet(string_facet("year"));

        collection
            .append_item(item_with_values("Red", &["Red", "1999"]))
            .unwrap();
        assert_eq!(collection.items().len(), 1);
    }

    #[test]
    fn append_item_rejects_value_count_mismatch() {
        let mut collection = Collection::new("Cars");
        collection.append_facet(string_facet("color"));

        let err = collection
            .append_item(item_with_values("Red", &["Red", "1999"]))
            .unwrap_err();
        assert!(matches!(
            err,
            CollectionError::SchemaMismatch {
                expected: 1,
                got: 2,
                ..
            }
        ));
        assert!(collection.items().is_empty(), "rejected item must not land");
    }

    #[test]
    fn append_item_rejects_against_empty_facets() {
        let mut collection = Collection::new("Cars");
        let err = collection
            .append_item(item_with_values("Red", &["Red"]))
            .unwrap_err();
        assert!(matches!(err, CollectionError::SchemaMismatch { .. }));
    }

    #[test]
    fn duplicate_facet_names_are_not_deduped() {
        let mut collection = Collection::new("Cars");
        collection.append_facet(string_facet("color"));
        collection.append_facet(string_facet("color"));
        assert_eq!(collection.facets().len(), 2);
    }

    #[test]
    fn facet_kind_parses_exact_spellings_only() {
        assert_eq!(FacetKind::parse("String"), Some(FacetKind::String));
        assert_eq!(FacetKind::parse("LongString"), Some(FacetKind::LongString));
        assert_eq!(FacetKind::parse("Number"), Some(FacetKind::Number));
        assert_eq!(FacetKind::parse("DateTime"), Some(FacetKind::DateTime));
        assert_eq!(FacetKind::parse("Link"), Some(FacetKind::Link));
        assert_eq!(FacetKind::parse("string"), None);
        assert_eq!(FacetKind::parse(""), None);
    }

    #[test]
    fn facet_order_is_insertion_order() {
        let mut collection = Collection::new("Cars");
        for name in ["b", "a", "c"] {
            collection.append_facet(string_facet(name));
        }
        let names: Vec<&str> = collection.facets().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
