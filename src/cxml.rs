//! CXML serialization — the wire document the viewer consumes.
//!
//! Everything here is contract: the namespace URIs, `SchemaVersion`, and
//! attribute spellings (`Name`, `Id`, `Img`, `Href`, the three
//! `p:Is*Visible` flags) must match the viewer byte for byte. Booleans
//! render as the lowercase literals `"true"`/`"false"`, never `1`/`0`.
//!
//! Emission is streaming: the document is written element by element through
//! `quick_xml::Writer` with two-space indentation, so no intermediate tree
//! is built and pretty-printing needs no post-processing pass. Facets and
//! items appear exactly in insertion order, and serializing the same
//! unmodified collection twice yields byte-identical output.

use crate::collection::Collection;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::path::Path;
use thiserror::Error;

/// Fixed schema version stamped on every document.
pub const SCHEMA_VERSION: &str = "1.0";

const XMLNS: &str = "http://schemas.microsoft.com/collection/metadata/2009";
const XMLNS_P: &str = "http://schemas.microsoft.com/livelabs/pivot/collection/2009";
const XMLNS_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XMLNS_XSD: &str = "http://www.w3.org/2001/XMLSchema";

#[derive(Error, Debug)]
pub enum CxmlError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("serializer produced non-UTF-8 output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Render the collection as a CXML document.
pub fn to_cxml(collection: &Collection) -> Result<String, CxmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let mut root = BytesStart::new("Collection");
    root.push_attribute(("xmlns:xsi", XMLNS_XSI));
    root.push_attribute(("xmlns:xsd", XMLNS_XSD));
    root.push_attribute(("xmlns:p", XMLNS_P));
    root.push_attribute(("Name", collection.name.as_str()));
    root.push_attribute(("SchemaVersion", SCHEMA_VERSION));
    root.push_attribute(("xmlns", XMLNS));
    writer.write_event(Event::Start(root))?;

    writer.write_event(Event::Start(BytesStart::new("FacetCategories")))?;
    for facet in collection.facets() {
        let mut node = BytesStart::new("FacetCategory");
        node.push_attribute(("Name", facet.name.as_str()));
        node.push_attribute(("Type", facet.kind.as_str()));
        node.push_attribute(("p:IsFilterVisible", bool_str(facet.is_filter_visible)));
        node.push_attribute(("p:IsMetaDataVisible", bool_str(facet.is_meta_data_visible)));
        node.push_attribute(("p:IsWordWheelVisible", bool_str(facet.is_word_wheel_visible)));
        writer.write_event(Event::Empty(node))?;
    }
    writer.write_event(Event::End(BytesEnd::new("FacetCategories")))?;

    let mut items_node = BytesStart::new("Items");
    items_node.push_attribute(("ImgBase", collection.img_base.as_str()));
    writer.write_event(Event::Start(items_node))?;
    for item in collection.items() {
        let mut node = BytesStart::new("Item");
        node.push_attribute(("Name", item.name.as_str()));
        node.push_attribute(("Id", item.id.as_str()));
        node.push_attribute(("Img", item.img.as_str()));
        if let Some(href) = &item.href {
            node.push_attribute(("Href", href.as_str()));
        }
        writer.write_event(Event::Start(node))?;

        writer.write_event(Event::Start(BytesStart::new("Description")))?;
        writer.write_event(Event::Text(BytesText::new(&item.description)))?;
        writer.write_event(Event::End(BytesEnd::new("Description")))?;

        writer.write_event(Event::Start(BytesStart::new("Facets")))?;
        for (facet, value) in collection.facets().iter().zip(&item.values) {
            let mut facet_node = BytesStart::new("Facet");
            facet_node.push_attribute(("Name", facet.name.as_str()));
            writer.write_event(Event::Start(facet_node))?;

            let mut value_node = BytesStart::new(facet.kind.as_str());
            value_node.push_attribute(("Value", value.as_str()));
            writer.write_event(Event::Empty(value_node))?;

            writer.write_event(Event::End(BytesEnd::new("Facet")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("Facets")))?;
        writer.write_event(Event::End(BytesEnd::new("Item")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Items")))?;
    writer.write_event(Event::End(BytesEnd::new("Collection")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes)?)
}

/// Serialize and write the document to `path`, overwriting unconditionally.
///
/// The write is not atomic: a crash mid-write can leave a partial file.
pub fn save(collection: &Collection, path: &Path) -> Result<(), CxmlError> {
    let document = to_cxml(collection)?;
    std::fs::write(path, document)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{Facet, FacetKind};
    use crate::test_helpers::{item_with_values, sample_collection, string_facet};
    use tempfile::TempDir;

    #[test]
    fn root_carries_namespaces_and_schema_version() {
        let cxml = to_cxml(&sample_collection()).unwrap();
        assert!(cxml.starts_with("<Collection "));
        assert!(cxml.contains(r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#));
        assert!(cxml.contains(r#"xmlns:xsd="http://www.w3.org/2001/XMLSchema""#));
        assert!(
            cxml.contains(r#"xmlns:p="http://schemas.microsoft.com/livelabs/pivot/collection/2009""#)
        );
        assert!(cxml.contains(r#"xmlns="http://schemas.microsoft.com/collection/metadata/2009""#));
        assert!(cxml.contains(r#"SchemaVersion="1.0""#));
        assert!(cxml.contains(r#"Name="Cars""#));
    }

    #[test]
    fn one_node_per_facet_and_item() {
        let collection = sample_collection();
        let cxml = to_cxml(&collection).unwrap();

        let facet_nodes = cxml.matches("<FacetCategory ").count();
        let item_nodes = cxml.matches("<Item ").count();
        assert_eq!(facet_nodes, collection.facets().len());
        assert_eq!(item_nodes, collection.items().len());

        // Each item carries exactly one value entry per facet.
        let value_entries = cxml.matches("<Facet ").count();
        assert_eq!(
            value_entries,
            collection.facets().len() * collection.items().len()
        );
    }

    #[test]
    fn visibility_flags_render_as_lowercase_literals() {
        let mut collection = Collection::new("Flags");
        collection.append_facet(Facet {
            name: "color".to_string(),
            kind: FacetKind::String,
            is_filter_visible: true,
            is_meta_data_visible: false,
            is_word_wheel_visible: true,
        });

        let cxml = to_cxml(&collection).unwrap();
        assert!(cxml.contains(r#"p:IsFilterVisible="true""#));
        assert!(cxml.contains(r#"p:IsMetaDataVisible="false""#));
        assert!(cxml.contains(r#"p:IsWordWheelVisible="true""#));
        assert!(!cxml.contains(r#"="1""#));
    }

    #[test]
    fn facet_values_wrapped_in_type_named_elements() {
        let mut collection = Collection::new("Typed");
        collection.append_facet(Facet::new("year", FacetKind::Number));
        collection
            .append_item(item_with_values("Red", &["1999"]))
            .unwrap();

        let cxml = to_cxml(&collection).unwrap();
        assert!(cxml.contains(r#"<Facet Name="year">"#));
        assert!(cxml.contains(r#"<Number Value="1999"/>"#));
    }

    #[test]
    fn items_carry_img_base_and_item_attributes() {
        let collection = sample_collection();
        let cxml = to_cxml(&collection).unwrap();

        assert!(cxml.contains(r#"<Items ImgBase="pyramid/collection.xml">"#));
        assert!(cxml.contains(r#"Id="0""#));
        assert!(cxml.contains(r##"Img="#0""##));
    }

    #[test]
    fn href_attribute_omitted_when_absent() {
        let mut collection = Collection::new("NoHref");
        collection.append_facet(string_facet("color"));
        collection
            .append_item(item_with_values("Red", &["Red"]))
            .unwrap();

        let cxml = to_cxml(&collection).unwrap();
        assert!(!cxml.contains("Href="));
    }

    #[test]
    fn description_is_a_text_bearing_child() {
        let cxml = to_cxml(&sample_collection()).unwrap();
        assert!(cxml.contains("<Description>a red car</Description>"));
    }

    #[test]
    fn ordering_matches_insertion_order() {
        let mut collection = Collection::new("Ordered");
        for name in ["zebra", "apple", "mango"] {
            collection.append_facet(string_facet(name));
        }
        let cxml = to_cxml(&collection).unwrap();

        let zebra = cxml.find(r#"Name="zebra""#).unwrap();
        let apple = cxml.find(r#"Name="apple""#).unwrap();
        let mango = cxml.find(r#"Name="mango""#).unwrap();
        assert!(zebra < apple && apple < mango);
    }

    #[test]
    fn nested_elements_indent_two_spaces_per_level() {
        let cxml = to_cxml(&sample_collection()).unwrap();
        assert!(cxml.contains("\n  <FacetCategories>"));
        assert!(cxml.contains("\n    <FacetCategory "));
        assert!(cxml.contains("\n  <Items "));
        assert!(cxml.contains("\n    <Item "));
        assert!(cxml.contains("\n      <Description>"));
        assert!(cxml.contains("\n      <Facets>"));
        assert!(cxml.contains("\n        <Facet "));
        assert!(cxml.ends_with("</Collection>\n"));
    }

    #[test]
    fn serialization_is_idempotent() {
        let collection = sample_collection();
        let first = to_cxml(&collection).unwrap();
        let second = to_cxml(&collection).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reserved_characters_are_escaped() {
        let mut collection = Collection::new("A & B");
        collection.append_facet(string_facet("note"));
        collection
            .append_item(item_with_values("X<Y", &["\"quoted\" & <tagged>"]))
            .unwrap();

        let cxml = to_cxml(&collection).unwrap();
        assert!(cxml.contains(r#"Name="A &amp; B""#));
        assert!(cxml.contains("&lt;tagged&gt;"));
        assert!(!cxml.contains("<tagged>"));
    }

    #[test]
    fn save_writes_document_and_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("collection.cxml");
        std::fs::write(&path, "stale").unwrap();

        save(&sample_collection(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_cxml(&sample_collection()).unwrap());
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("collection.cxml");

        let err = save(&sample_collection(), &path).unwrap_err();
        assert!(matches!(err, CxmlError::Io(_)));
    }
}
