use csv::StringRecord;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::warn;

use super::columns::ColumnResolution;
use crate::constants::{FILENAME_COLUMN, LINK_COLUMN, VIDEO_ID_COLUMN};
use crate::error::RowError;
use crate::types::PredictionResult;
use crate::values::ValueNormalizer;
use crate::video_id::VideoIdResolver;

/// Header name -> field position, built once per file
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new(headers: &[String]) -> Self {
        // Repeated headers resolve to the last occurrence
        let positions = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        Self { positions }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }
}

/// One data row viewed as column name -> cell text
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    index: &'a HeaderIndex,
    record: &'a StringRecord,
}

impl<'a> RawRow<'a> {
    pub fn new(index: &'a HeaderIndex, record: &'a StringRecord) -> Self {
        Self { index, record }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains(column)
    }

    /// Cell for a column. `Ok(None)` if the header lacks the column; an error
    /// if the header has it but this record is too short to hold it.
    pub fn cell(&self, column: &str) -> Result<Option<&'a str>, RowError> {
        match self.index.positions.get(column) {
            None => Ok(None),
            Some(&idx) => self
                .record
                .get(idx)
                .map(Some)
                .ok_or_else(|| RowError::MissingCell {
                    column: column.to_string(),
                }),
        }
    }
}

/// An unrecognized value, remembered with the first row it appeared in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnexpectedValue {
    pub category: String,
    pub value: String,
    pub first_row: usize,
}

/// Unrecognized `(category, value)` pairs already reported during one load.
///
/// Each load owns its own log so concurrent loads never share warnings.
#[derive(Debug, Default)]
pub struct UnexpectedValueLog {
    seen: HashSet<(String, String)>,
    entries: Vec<UnexpectedValue>,
}

impl UnexpectedValueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time a pair is recorded
    pub fn record(&mut self, category: &str, value: &str, row_num: usize) -> bool {
        let key = (category.to_string(), value.to_string());
        if self.seen.contains(&key) {
            return false;
        }
        self.seen.insert(key);
        self.entries.push(UnexpectedValue {
            category: category.to_string(),
            value: value.to_string(),
            first_row: row_num,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[UnexpectedValue] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<UnexpectedValue> {
        self.entries
    }
}

/// Turns raw rows into prediction records
pub struct RowParser<'a> {
    values: &'a dyn ValueNormalizer,
    video_ids: &'a dyn VideoIdResolver,
}

impl<'a> RowParser<'a> {
    pub fn new(values: &'a dyn ValueNormalizer, video_ids: &'a dyn VideoIdResolver) -> Self {
        Self { values, video_ids }
    }

    /// Parse one row. `Ok(None)` means the row has no usable identifier and
    /// should be skipped quietly.
    pub fn parse(
        &self,
        row: &RawRow<'_>,
        columns: &ColumnResolution,
        row_num: usize,
        log: &mut UnexpectedValueLog,
    ) -> Result<Option<PredictionResult>, RowError> {
        let video_id = match self.extract_video_id(row)? {
            Some(id) if !id.is_empty() => id,
            _ => return Ok(None),
        };

        let mut predictions = BTreeMap::new();
        for entry in &columns.category_columns {
            let raw = match &entry.column {
                Some(column) => row.cell(column)?.unwrap_or(""),
                None => "",
            };
            let code = self.convert_value(raw.trim(), &entry.category, row_num, log);
            predictions.insert(entry.category.clone(), code);
        }

        Ok(Some(PredictionResult {
            video_id,
            predictions,
            success: true,
            error_message: None,
            inference_time: 0.0,
        }))
    }

    /// Identifier from the first identity column the header carries
    fn extract_video_id(&self, row: &RawRow<'_>) -> Result<Option<String>, RowError> {
        if row.has_column(FILENAME_COLUMN) {
            let raw = row.cell(FILENAME_COLUMN)?.unwrap_or("");
            return Ok(Some(self.video_id_from_filename(raw)));
        }
        if row.has_column(LINK_COLUMN) {
            let raw = row.cell(LINK_COLUMN)?.unwrap_or("");
            return Ok(Some(self.video_ids.resolve(raw)));
        }
        if row.has_column(VIDEO_ID_COLUMN) {
            let raw = row.cell(VIDEO_ID_COLUMN)?.unwrap_or("");
            return Ok(Some(raw.trim().to_string()));
        }
        Ok(None)
    }

    /// Filenames that don't resolve are kept as written (trimmed)
    fn video_id_from_filename(&self, filename: &str) -> String {
        let resolved = self.video_ids.resolve(filename);
        if resolved.is_empty() {
            filename.trim().to_string()
        } else {
            resolved
        }
    }

    fn convert_value(
        &self,
        value: &str,
        category: &str,
        row_num: usize,
        log: &mut UnexpectedValueLog,
    ) -> i8 {
        match self.values.convert(value) {
            Some(code) => code,
            None => {
                if !value.is_empty() && log.record(category, value, row_num) {
                    warn!(
                        "Unexpected value '{}' for category '{}' in row {}. Expected: '', 'absent', \
                         'conflict', 'present', 'dominant', or numeric -1, 0, 1, 2",
                        value, category, row_num
                    );
                }
                0
            }
        }
    }
}
