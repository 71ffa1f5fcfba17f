//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! Display is information-centric: the primary line for every entity is its
//! positional index and name, with attributes as indented context lines.
//!
//! ```text
//! Facets
//! 001 name (String)
//! 002 image_path (String)
//! 003 color (String)
//!
//! Items
//! 001 Red
//!     Img: #0
//!     Href: http://example.com/red
//! 002 Blue
//!     Img: #1
//! ```

use crate::builder::BuildReport;
use crate::collection::Collection;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Inventory of an assembled collection: facets then items.
pub fn format_collection_summary(collection: &Collection) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Facets".to_string());
    for (i, facet) in collection.facets().iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            facet.name,
            facet.kind
        ));
    }

    lines.push(String::new());
    lines.push("Items".to_string());
    for (i, item) in collection.items().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), item.name));
        lines.push(format!("    Img: {}", item.img));
        if let Some(href) = &item.href {
            lines.push(format!("    Href: {href}"));
        }
    }

    lines
}

pub fn print_collection_summary(collection: &Collection) {
    for line in format_collection_summary(collection) {
        println!("{line}");
    }
}

/// One line per artifact, then the totals.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    vec![
        format!("Wrote {}", report.cxml_path.display()),
        format!("Wrote {}", report.manifest_path.display()),
        format!(
            "{} facets, {} items",
            report.facet_count, report.item_count
        ),
    ]
}

pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_collection;
    use std::path::PathBuf;

    #[test]
    fn summary_lists_facets_then_items_in_order() {
        let lines = format_collection_summary(&sample_collection());
        assert_eq!(lines[0], "Facets");
        assert_eq!(lines[1], "001 color (String)");
        assert_eq!(lines[2], "002 year (Number)");
        assert_eq!(lines[4], "Items");
        assert_eq!(lines[5], "001 Red");
        assert_eq!(lines[6], "    Img: #0");
        assert_eq!(lines[7], "    Href: http://example.com/red");
        assert_eq!(lines[8], "002 Blue");
    }

    #[test]
    fn summary_omits_href_line_when_absent() {
        let lines = format_collection_summary(&sample_collection());
        let blue_pos = lines.iter().position(|l| l == "002 Blue").unwrap();
        assert_eq!(lines[blue_pos + 1], "    Img: #1");
        assert_eq!(lines.len(), blue_pos + 2);
    }

    #[test]
    fn build_report_names_both_artifacts() {
        let report = BuildReport {
            facet_count: 3,
            item_count: 2,
            cxml_path: PathBuf::from("out/collection.cxml"),
            manifest_path: PathBuf::from("out/pyramid/collection.xml"),
        };
        let lines = format_build_report(&report);
        assert_eq!(lines[0], "Wrote out/collection.cxml");
        assert_eq!(lines[1], "Wrote out/pyramid/collection.xml");
        assert_eq!(lines[2], "3 facets, 2 items");
    }
}
