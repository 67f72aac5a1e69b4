// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use csv::StringRecord;
use csv::StringRecordsIntoIter;

use crate::error::Fallible;
use crate::error::fail;

/// One usable line of the input table.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceRow {
    /// The sentence to speak, possibly with emphasis markup.
    pub front: String,
    /// The translation shown on the back of the card.
    pub back: String,
}

impl SourceRow {
    /// Returns `None` for rows with fewer than two columns or an empty front.
    /// Columns past the second are ignored.
    pub fn from_record(record: &StringRecord) -> Option<Self> {
        if record.len() < 2 {
            return None;
        }
        let front = record[0].trim();
        if front.is_empty() {
            return None;
        }
        Some(Self {
            front: front.to_string(),
            back: record[1].trim().to_string(),
        })
    }
}

/// Lazy reader over a CSV file. The first line is always treated as a header
/// and skipped.
pub struct RowReader {
    records: StringRecordsIntoIter<File>,
}

impl RowReader {
    pub fn open(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail(format!("input file {} does not exist.", path.display()));
        }
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        log::debug!("Reading rows from {}", path.display());
        Ok(Self {
            records: reader.into_records(),
        })
    }

    /// Every record after the header, with malformed rows as `None`.
    pub fn records(self) -> impl Iterator<Item = Fallible<Option<SourceRow>>> {
        self.records
            .map(|record| -> Fallible<Option<SourceRow>> {
                Ok(SourceRow::from_record(&record?))
            })
    }

    /// Only the usable rows.
    pub fn rows(self) -> impl Iterator<Item = Fallible<SourceRow>> {
        self.records().filter_map(|row| row.transpose())
    }
}
