//! CSV table loading for facet definitions and item records.
//!
//! Two loaders, both strictly row-order preserving:
//!
//! - [`load_facets`]: each row is `name, type, filterVisible, metaDataVisible,
//!   wordWheelVisible` with the three flags integer-coded as `0`/`1`.
//! - [`load_items`]: the header row locates the `href` and `description`
//!   columns by exact text; those two columns are extracted per row and the
//!   remaining columns, in original left-to-right order, become the item's
//!   value list. The first column is the item's display name AND stays in
//!   the value list — the viewer's tables are written with a leading facet
//!   for the name, so removing it here would shift every value one facet to
//!   the left.
//!
//! Value count is not checked against any facet count here; that invariant
//! belongs to [`Collection::append_item`](crate::collection::Collection::append_item).

use crate::collection::{Facet, FacetKind, Item};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{path}: row {row}: {message}")]
    Parse {
        path: String,
        row: usize,
        message: String,
    },
    #[error("{path}: required column '{column}' not found in header")]
    MissingColumn { path: String, column: String },
    #[error("{path}: item tables need a header row to locate the href and description columns")]
    HeaderRequired { path: String },
}

/// Column headers [`load_items`] resolves by exact, case-sensitive text.
pub const HREF_COLUMN: &str = "href";
pub const DESCRIPTION_COLUMN: &str = "description";

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, TableError> {
    // Header handling is ours: csv's own has_headers would hide the first
    // row instead of letting us inspect or skip it. flexible because column
    // counts are validated per-row with real error messages.
    Ok(csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?)
}

fn parse_error(path: &Path, row: usize, message: String) -> TableError {
    TableError::Parse {
        path: path.display().to_string(),
        row,
        message,
    }
}

/// Load facet definitions from a CSV table, in file row order.
pub fn load_facets(path: &Path, has_header: bool) -> Result<Vec<Facet>, TableError> {
    let mut reader = open_reader(path)?;
    let mut facets = Vec::new();

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if has_header && idx == 0 {
            continue;
        }
        let row = idx + 1;
        if record.len() < 5 {
            return Err(parse_error(
                path,
                row,
                format!("expected at least 5 columns, got {}", record.len()),
            ));
        }
        let kind = FacetKind::parse(&record[1]).ok_or_else(|| {
            parse_error(path, row, format!("unknown facet type '{}'", &record[1]))
        })?;
        facets.push(Facet {
            name: record[0].to_string(),
            kind,
            is_filter_visible: parse_flag(&record[2], path, row, "filterVisible")?,
            is_meta_data_visible: parse_flag(&record[3], path, row, "metaDataVisible")?,
            is_word_wheel_visible: parse_flag(&record[4], path, row, "wordWheelVisible")?,
        });
    }

    Ok(facets)
}

/// Parse a `0`/`1` visibility flag. Anything else, including `true`/`false`
/// spellings, is malformed input.
fn parse_flag(raw: &str, path: &Path, row: usize, column: &str) -> Result<bool, TableError> {
    match raw {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(parse_error(
            path,
            row,
            format!("column {column} must be 0 or 1, got '{other}'"),
        )),
    }
}

/// Load item records from a CSV table, in file row order.
///
/// `has_header = false` is rejected outright: without a header there is no
/// way to locate the `href` and `description` columns, and guessing
/// positions would silently mangle the value list.
pub fn load_items(path: &Path, has_header: bool) -> Result<Vec<Item>, TableError> {
    if !has_header {
        return Err(TableError::HeaderRequired {
            path: path.display().to_string(),
        });
    }

    let mut reader = open_reader(path)?;
    let mut records = reader.records();

    let missing = |column: &str| TableError::MissingColumn {
        path: path.display().to_string(),
        column: column.to_string(),
    };
    let header = match records.next() {
        Some(record) => record?,
        None => return Err(missing(HREF_COLUMN)),
    };
    let column_index = |name: &str| header.iter().position(|h| h == name);
    let href_idx = column_index(HREF_COLUMN).ok_or_else(|| missing(HREF_COLUMN))?;
    let desc_idx = column_index(DESCRIPTION_COLUMN).ok_or_else(|| missing(DESCRIPTION_COLUMN))?;

    let mut items = Vec::new();
    for (id, record) in records.enumerate() {
        let record = record?;
        let row = id + 2;
        let needed = href_idx.max(desc_idx) + 1;
        if record.len() < needed {
            return Err(parse_error(
                path,
                row,
                format!("expected at least {needed} columns, got {}", record.len()),
            ));
        }

        let mut values: Vec<String> = record.iter().map(str::to_string).collect();
        // Higher index first so the lower one is still valid after removal.
        values.remove(href_idx.max(desc_idx));
        values.remove(href_idx.min(desc_idx));

        let href = record[href_idx].to_string();
        items.push(Item {
            name: record[0].to_string(),
            id: id.to_string(),
            img: format!("#{id}"),
            description: record[desc_idx].to_string(),
            values,
            href: (!href.is_empty()).then_some(href),
        });
    }

    Ok(items)
}
