use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::constants::{
    expected_value_column, mapped_column_for, LINKED_FORMAT_COLUMNS, VALUE_COLUMN_MARKER,
    VALUE_COLUMN_PREFIX, VALUE_COLUMN_SUFFIX,
};

/// Layout flags detected from a file's header row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CsvLayout {
    /// Header carries a filename or link identity column
    pub linked: bool,
    /// Categories live in `1_Value1_<Category>_values` columns
    pub value_columns: bool,
}

/// A category whose value column only matched case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMismatch {
    pub category: String,
    pub expected: String,
    pub found: String,
}

/// The column a row read should use for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryColumn {
    pub category: String,
    pub column: Option<String>,
}

/// Everything learned from the header row, computed once per file
#[derive(Debug, Clone)]
pub struct ColumnResolution {
    pub layout: CsvLayout,
    /// Lower-cased category token -> header as written in the file
    pub column_map: HashMap<String, String>,
    /// One entry per canonical category, in canonical order
    pub category_columns: Vec<CategoryColumn>,
    pub mismatches: Vec<ColumnMismatch>,
    /// Categories with no column in this file; they read as 0
    pub unresolved: Vec<String>,
}

impl ColumnResolution {
    /// Resolved column for a category, if the file has one
    pub fn column_for(&self, category: &str) -> Option<&str> {
        self.category_columns
            .iter()
            .find(|c| c.category == category)
            .and_then(|c| c.column.as_deref())
    }
}

pub fn detect_layout(headers: &[String]) -> CsvLayout {
    CsvLayout {
        linked: headers
            .iter()
            .any(|h| LINKED_FORMAT_COLUMNS.contains(&h.as_str())),
        value_columns: headers.iter().any(|h| h.contains(VALUE_COLUMN_MARKER)),
    }
}

/// Case-insensitive map from category token to the header that carries it
pub fn build_column_map(headers: &[String]) -> HashMap<String, String> {
    let mut column_map = HashMap::new();

    for header in headers {
        let token = header
            .strip_prefix(VALUE_COLUMN_PREFIX)
            .and_then(|rest| rest.strip_suffix(VALUE_COLUMN_SUFFIX));
        if let Some(token) = token {
            column_map.insert(token.to_lowercase(), header.clone());
        }
    }

    column_map
}

/// Inspect the header row once and decide, for each category, which column
/// rows should be read from.
pub fn resolve_columns(headers: &[String], categories: &[String]) -> ColumnResolution {
    let layout = detect_layout(headers);
    info!(
        "Detected format: linked={}, value_columns={}",
        layout.linked, layout.value_columns
    );

    let column_map = build_column_map(headers);
    info!("Built column mapping for {} categories", column_map.len());

    let present: HashSet<&str> = headers.iter().map(String::as_str).collect();

    let mut mismatches = Vec::new();
    for category in categories {
        let expected = expected_value_column(category);
        if present.contains(expected.as_str()) {
            continue;
        }
        if let Some(found) = column_map.get(&category.to_lowercase()) {
            warn!(
                "Column case mismatch for '{}': expected '{}', found '{}'",
                category, expected, found
            );
            mismatches.push(ColumnMismatch {
                category: category.clone(),
                expected,
                found: found.clone(),
            });
        }
    }

    let category_columns: Vec<CategoryColumn> = categories
        .iter()
        .map(|category| {
            let column = if layout.value_columns {
                mapped_column_for(category)
                    .filter(|col| present.contains(col))
                    .map(str::to_string)
                    .or_else(|| column_map.get(&category.to_lowercase()).cloned())
            } else {
                present
                    .contains(category.as_str())
                    .then(|| category.clone())
            };
            CategoryColumn {
                category: category.clone(),
                column,
            }
        })
        .collect();

    let unresolved: Vec<String> = category_columns
        .iter()
        .filter(|c| c.column.is_none())
        .map(|c| c.category.clone())
        .collect();
    for category in &unresolved {
        debug!("No column found for category '{}'", category);
    }

    ColumnResolution {
        layout,
        column_map,
        category_columns,
        mismatches,
        unresolved,
    }
}
